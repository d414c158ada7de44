//! Client security utilities for the MyPass password manager
//!
//! This library provides the stateful pieces the client pages share:
//! password generation, password strength classification, the session
//! holder and a notification bus between UI regions.
//!
//! # Features
//!
//! - `tracing`: Enables logging via tracing crate
//!
//! # Process-wide state
//!
//! [`ClientContext::global`] is the single entry point to the process-wide
//! session store and notification bus; [`ClientContext::new`] builds an
//! isolated pair instead.
//!
//! # Example
//!
//! ```rust
//! use mypass_core::{ClientContext, Identity, PasswordBuilder, StrengthVerdict, classify};
//!
//! // Suggest a password and give feedback on it
//! let generator = PasswordBuilder::new()
//!     .length(12)?
//!     .uppercase(true)
//!     .numbers(true)
//!     .special_chars(true)
//!     .require_each_class(true)
//!     .build()?;
//! let password = generator.generate();
//! assert_eq!(classify(&password), StrengthVerdict::Strong);
//!
//! // After the backend accepted the credentials
//! let ctx = ClientContext::new();
//! ctx.complete_login(Identity::new(serde_json::json!({ "id": 1 })))?;
//! assert!(ctx.session().is_authenticated());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Internal modules
mod auth;
mod bus;
mod classifier;
mod generator;
mod sections;
mod session;
mod verdict;

// Public API
pub use auth::ClientContext;
pub use bus::{
    BusError, Event, EventKind, HandlerError, Handlers, LOGIN_CHANNEL, NotificationBus,
    REGISTER_CHANNEL,
};
pub use classifier::{RegistrationError, check_new_password, classify};
pub use generator::{
    CharClass, DEFAULT_LENGTH, DIGIT_CHARS, GeneratorError, LOWERCASE_CHARS, PasswordBuilder,
    PasswordGenerator, PasswordPolicy, SPECIAL_CHARS, UPPERCASE_CHARS,
};
pub use sections::MIN_LENGTH;
pub use session::{Identity, SessionStore};
pub use verdict::StrengthVerdict;

