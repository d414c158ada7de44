//! Notification bus
//!
//! UI regions register a set of [`Handlers`] under a channel name and
//! publishers [`notify`](NotificationBus::notify) that channel without
//! holding a reference to the subscriber. Publishing to a channel or event
//! nobody listens to is a silent no-op.
//!
//! Handlers run synchronously on the publisher's thread, before `notify`
//! returns, and their errors are returned to the publisher.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use thiserror::Error;

use crate::session::Identity;

/// Channel of the login page.
pub const LOGIN_CHANNEL: &str = "Login";
/// Channel of the registration page.
pub const REGISTER_CHANNEL: &str = "Register";

static GLOBAL_BUS: LazyLock<Arc<NotificationBus>> =
    LazyLock::new(|| Arc::new(NotificationBus::new()));

/// Error type returned by a failing handler.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

type Handler = Arc<dyn Fn(&Event) -> Result<(), HandlerError> + Send + Sync>;

#[derive(Error, Debug)]
pub enum BusError {
    #[error("Handler for {event} on channel {channel:?} failed: {source}")]
    HandlerFailed {
        channel: String,
        event: EventKind,
        #[source]
        source: HandlerError,
    },
}

/// Events published between UI regions.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    UserLoggedIn(Identity),
    RegisterSuccess,
    RedirectToLogin,
}

/// Payload-free discriminant of an [`Event`], used as handler key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    UserLoggedIn,
    RegisterSuccess,
    RedirectToLogin,
}

impl EventKind {
    /// Name existing subscribers know this event by.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::UserLoggedIn => "USER_LOGGED_IN",
            EventKind::RegisterSuccess => "REGISTER_SUCCESS",
            EventKind::RedirectToLogin => "redirectToLogin",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "USER_LOGGED_IN" => Some(EventKind::UserLoggedIn),
            "REGISTER_SUCCESS" => Some(EventKind::RegisterSuccess),
            "redirectToLogin" => Some(EventKind::RedirectToLogin),
            _ => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::UserLoggedIn(_) => EventKind::UserLoggedIn,
            Event::RegisterSuccess => EventKind::RegisterSuccess,
            Event::RedirectToLogin => EventKind::RedirectToLogin,
        }
    }

    /// Rebuilds an event from its name and optional payload.
    ///
    /// Returns `None` for an unknown name, or for `USER_LOGGED_IN` without
    /// an identity. Payloads on payload-free events are ignored.
    pub fn from_name(name: &str, payload: Option<Identity>) -> Option<Self> {
        match EventKind::from_name(name)? {
            EventKind::UserLoggedIn => payload.map(Event::UserLoggedIn),
            EventKind::RegisterSuccess => Some(Event::RegisterSuccess),
            EventKind::RedirectToLogin => Some(Event::RedirectToLogin),
        }
    }
}

/// The handlers one channel registers, keyed by event kind.
#[derive(Clone, Default)]
pub struct Handlers {
    map: HashMap<EventKind, Handler>,
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the handler for `kind`.
    pub fn on<F>(mut self, kind: EventKind, handler: F) -> Self
    where
        F: Fn(&Event) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.map.insert(kind, Arc::new(handler));
        self
    }

    pub fn handles(&self, kind: EventKind) -> bool {
        self.map.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.map.keys()).finish()
    }
}

/// Registry of channels and their handlers.
#[derive(Debug, Default)]
pub struct NotificationBus {
    channels: RwLock<HashMap<String, Handlers>>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `handlers` under `channel`, replacing any previous entry.
    pub fn register(&self, channel: impl Into<String>, handlers: Handlers) {
        let channel = channel.into();
        let mut guard = self.channels.write().unwrap_or_else(PoisonError::into_inner);
        let _replaced = guard.insert(channel.clone(), handlers).is_some();

        #[cfg(feature = "tracing")]
        tracing::debug!("Channel {:?} registered (replaced: {})", channel, _replaced);
    }

    /// Removes `channel`. Unknown channels are ignored.
    pub fn unregister(&self, channel: &str) {
        let mut guard = self.channels.write().unwrap_or_else(PoisonError::into_inner);
        let _removed = guard.remove(channel).is_some();

        #[cfg(feature = "tracing")]
        {
            if _removed {
                tracing::debug!("Channel {:?} unregistered", channel);
            }
        }
    }

    pub fn is_registered(&self, channel: &str) -> bool {
        let guard = self.channels.read().unwrap_or_else(PoisonError::into_inner);
        guard.contains_key(channel)
    }

    pub fn channel_count(&self) -> usize {
        let guard = self.channels.read().unwrap_or_else(PoisonError::into_inner);
        guard.len()
    }

    /// Delivers `event` to the handler `channel` registered for its kind.
    ///
    /// The registry lock is released before the handler runs, so handlers
    /// may register, unregister or notify themselves.
    ///
    /// # Errors
    ///
    /// Returns `HandlerFailed` with the handler's own error if it fails.
    pub fn notify(&self, channel: &str, event: Event) -> Result<(), BusError> {
        let kind = event.kind();
        let handler = {
            let guard = self.channels.read().unwrap_or_else(PoisonError::into_inner);
            guard
                .get(channel)
                .and_then(|handlers| handlers.map.get(&kind))
                .cloned()
        };

        let Some(handler) = handler else {
            #[cfg(feature = "tracing")]
            tracing::trace!("No handler for {} on channel {:?}", kind, channel);
            return Ok(());
        };

        (*handler)(&event).map_err(|source| {
            #[cfg(feature = "tracing")]
            tracing::error!("Handler for {} on channel {:?} failed: {}", kind, channel, source);
            BusError::HandlerFailed {
                channel: channel.to_string(),
                event: kind,
                source,
            }
        })
    }

    /// String-keyed variant of [`notify`](Self::notify).
    ///
    /// Anything [`Event::from_name`] cannot build is a silent no-op.
    pub fn notify_named(
        &self,
        channel: &str,
        event: &str,
        payload: Option<Identity>,
    ) -> Result<(), BusError> {
        match Event::from_name(event, payload) {
            Some(event) => self.notify(channel, event),
            None => Ok(()),
        }
    }
}

/// Returns the process-wide notification bus.
pub(crate) fn global() -> Arc<NotificationBus> {
    Arc::clone(&GLOBAL_BUS)
}
