//! Authentication flow hooks
//!
//! [`ClientContext`] bundles the session store and the notification bus so
//! the authentication flow can be handed one injectable handle. It is the
//! only writer of the session.

use std::sync::Arc;

use crate::bus::{self, BusError, Event, LOGIN_CHANNEL, NotificationBus, REGISTER_CHANNEL};
use crate::session::{self, Identity, SessionStore};

#[derive(Debug, Clone, Default)]
pub struct ClientContext {
    session: Arc<SessionStore>,
    bus: Arc<NotificationBus>,
}

impl ClientContext {
    /// A fresh, isolated context: no session, no channels.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(session: Arc<SessionStore>, bus: Arc<NotificationBus>) -> Self {
        Self { session, bus }
    }

    /// Context over the process-wide session and bus.
    pub fn global() -> Self {
        Self::from_parts(session::global(), bus::global())
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn bus(&self) -> &Arc<NotificationBus> {
        &self.bus
    }

    /// Records a successful login and tells the login channel about it.
    ///
    /// The session is updated before any handler runs, so handlers reading
    /// the store see the new user.
    pub fn complete_login(&self, identity: Identity) -> Result<(), BusError> {
        self.session.set_user(identity.clone());
        self.bus.notify(LOGIN_CHANNEL, Event::UserLoggedIn(identity))
    }

    /// Tells the registration channel the backend accepted a registration.
    pub fn complete_registration(&self) -> Result<(), BusError> {
        self.bus.notify(REGISTER_CHANNEL, Event::RegisterSuccess)
    }

    /// Asks the login page to show itself.
    pub fn request_login_redirect(&self) -> Result<(), BusError> {
        self.bus.notify(LOGIN_CHANNEL, Event::RedirectToLogin)
    }

    pub fn logout(&self) {
        self.session.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{EventKind, Handlers};
    use serde_json::json;
    use serial_test::serial;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn alice() -> Identity {
        Identity::new(json!({ "id": 7, "email": "alice@example.com" }))
    }

    #[test]
    fn test_login_updates_session_before_handlers_run() {
        let ctx = ClientContext::new();
        let observed: Arc<Mutex<Option<Option<Identity>>>> = Arc::default();

        let session = Arc::clone(ctx.session());
        let sink = Arc::clone(&observed);
        ctx.bus().register(
            LOGIN_CHANNEL,
            Handlers::new().on(EventKind::UserLoggedIn, move |event| {
                assert_eq!(event.kind(), EventKind::UserLoggedIn);
                *sink.lock().unwrap() = Some(session.get_user());
                Ok(())
            }),
        );

        ctx.complete_login(alice()).unwrap();

        assert_eq!(*observed.lock().unwrap(), Some(Some(alice())));
        assert_eq!(ctx.session().get_user(), Some(alice()));
    }

    #[test]
    fn test_login_without_subscribers() {
        let ctx = ClientContext::new();
        ctx.complete_login(alice()).unwrap();
        assert!(ctx.session().is_authenticated());
    }

    #[test]
    fn test_login_handler_failure_keeps_session() {
        let ctx = ClientContext::new();
        ctx.bus().register(
            LOGIN_CHANNEL,
            Handlers::new().on(EventKind::UserLoggedIn, |_| Err("navigation failed".into())),
        );

        assert!(ctx.complete_login(alice()).is_err());
        assert_eq!(ctx.session().get_user(), Some(alice()));
    }

    #[test]
    fn test_registration_and_redirect_events() {
        let ctx = ClientContext::new();
        let registered = Arc::new(AtomicUsize::new(0));
        let redirected = Arc::new(AtomicUsize::new(0));

        let r = Arc::clone(&registered);
        ctx.bus().register(
            REGISTER_CHANNEL,
            Handlers::new().on(EventKind::RegisterSuccess, move |_| {
                r.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        );
        let r = Arc::clone(&redirected);
        ctx.bus().register(
            LOGIN_CHANNEL,
            Handlers::new().on(EventKind::RedirectToLogin, move |_| {
                r.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        );

        ctx.complete_registration().unwrap();
        ctx.request_login_redirect().unwrap();

        assert_eq!(registered.load(Ordering::SeqCst), 1);
        assert_eq!(redirected.load(Ordering::SeqCst), 1);
        // Registration alone does not start a session
        assert!(!ctx.session().is_authenticated());
    }

    #[test]
    fn test_logout_clears_session() {
        let ctx = ClientContext::new();
        ctx.complete_login(alice()).unwrap();
        ctx.logout();
        ctx.logout();
        assert_eq!(ctx.session().get_user(), None);
    }

    #[test]
    fn test_contexts_are_isolated() {
        let a = ClientContext::new();
        let b = ClientContext::new();
        a.complete_login(alice()).unwrap();
        assert!(!b.session().is_authenticated());
    }

    #[test]
    #[serial]
    fn test_global_context_shares_singletons() {
        let ctx = ClientContext::global();
        let other = ClientContext::global();
        assert!(Arc::ptr_eq(ctx.session(), other.session()));
        assert!(Arc::ptr_eq(ctx.bus(), other.bus()));
        assert!(!Arc::ptr_eq(ctx.bus(), ClientContext::new().bus()));

        ctx.complete_login(alice()).unwrap();
        assert_eq!(session::global().get_user(), Some(alice()));
        ClientContext::global().logout();
        assert!(!ctx.session().is_authenticated());
    }
}
