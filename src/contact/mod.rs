//! Contact form collaborator.
//!
//! Visitors submit a [`ContactSubmission`]; the [`ContactForm`] gates it on
//! the relay configuration, validates it, and hands a [`ComposedMessage`] to
//! an [`EmailRelay`]. Relay failures are mapped to visitor-facing messages
//! and cleared after [`ERROR_RESET_AFTER`].

pub mod form;
pub mod relay;
pub mod submission;

pub use form::{
    ContactError, ContactForm, FormStatus, PendingSubmission, ERROR_RESET_AFTER, SENDING_TIMEOUT,
};
pub use relay::{
    EmailRelay, HttpEmailRelay, MockEmailRelay, RelayConfig, RelayConfigError, RelayError,
    RelayField, DEFAULT_ENDPOINT,
};
pub use submission::{ComposedMessage, ContactSubmission, SubmissionError};
