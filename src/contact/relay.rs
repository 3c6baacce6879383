//! The transactional-email relay the contact form hands messages to.
//!
//! The relay is identified by three credentials (service id, template id,
//! public key). Until all three are set to real values the form refuses to
//! submit; see [`RelayConfig::check`].

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

use super::ComposedMessage;

/// Relay endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Placeholder shipped for the service id.
pub const SERVICE_ID_PLACEHOLDER: &str = "YOUR_SERVICE_ID";
/// Placeholder shipped for the template id.
pub const TEMPLATE_ID_PLACEHOLDER: &str = "YOUR_TEMPLATE_ID";
/// Placeholder shipped for the public key.
pub const PUBLIC_KEY_PLACEHOLDER: &str = "YOUR_PUBLIC_KEY";

/// Maximum relay response body kept in debug logs.
const LOGGED_BODY_LIMIT: usize = 200;

/// Relay credentials and endpoint, stored in the `[contact]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Relay service identifier
    pub service_id: String,
    /// Relay template identifier
    pub template_id: String,
    /// Relay public key (sent as `user_id`)
    pub public_key: String,
    /// HTTP endpoint messages are posted to
    pub endpoint: String,
    /// Address shown to visitors when the form cannot be used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_email: Option<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            service_id: SERVICE_ID_PLACEHOLDER.to_string(),
            template_id: TEMPLATE_ID_PLACEHOLDER.to_string(),
            public_key: PUBLIC_KEY_PLACEHOLDER.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            fallback_email: None,
        }
    }
}

/// One of the three relay credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayField {
    /// `service_id`
    ServiceId,
    /// `template_id`
    TemplateId,
    /// `public_key`
    PublicKey,
}

impl RelayField {
    /// Config key name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ServiceId => "service_id",
            Self::TemplateId => "template_id",
            Self::PublicKey => "public_key",
        }
    }
}

impl fmt::Display for RelayField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the relay configuration cannot be used.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum RelayConfigError {
    /// The credential is empty
    #[error("contact.{0} is not set")]
    Unset(RelayField),
    /// The credential still holds its shipped placeholder
    #[error("contact.{0} is still the placeholder value")]
    Placeholder(RelayField),
}

impl RelayConfigError {
    /// The offending credential.
    #[must_use]
    pub const fn field(self) -> RelayField {
        match self {
            Self::Unset(field) | Self::Placeholder(field) => field,
        }
    }
}

impl RelayConfig {
    /// Confirms all three credentials hold real values.
    ///
    /// Reports the first offending field in `service_id`, `template_id`,
    /// `public_key` order.
    pub fn check(&self) -> Result<(), RelayConfigError> {
        for (field, value, placeholder) in [
            (RelayField::ServiceId, &self.service_id, SERVICE_ID_PLACEHOLDER),
            (RelayField::TemplateId, &self.template_id, TEMPLATE_ID_PLACEHOLDER),
            (RelayField::PublicKey, &self.public_key, PUBLIC_KEY_PLACEHOLDER),
        ] {
            let value = value.trim();
            if value.is_empty() {
                return Err(RelayConfigError::Unset(field));
            }
            if value == placeholder {
                return Err(RelayConfigError::Placeholder(field));
            }
        }
        Ok(())
    }

    /// Whether the form may submit with this configuration.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.check().is_ok()
    }
}

/// A failed relay call, classified by what the visitor should be told.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RelayError {
    /// 422: the relay template has no valid recipient
    #[error("relay template recipient is misconfigured (422)")]
    RecipientMisconfigured,
    /// 400: the relay rejected the request shape
    #[error("relay rejected the request (400)")]
    BadRequest,
    /// 401 or 403: credentials rejected
    #[error("relay authentication failed ({0})")]
    Unauthorized(u16),
    /// 429: too many requests
    #[error("relay rate limit reached (429)")]
    RateLimited,
    /// Any other non-success status
    #[error("relay returned status {0}")]
    Status(u16),
    /// The request never produced a response
    #[error("could not reach relay: {0}")]
    Transport(String),
}

impl RelayError {
    /// Classifies a non-success HTTP status.
    #[must_use]
    pub const fn from_status(code: u16) -> Self {
        match code {
            422 => Self::RecipientMisconfigured,
            400 => Self::BadRequest,
            401 | 403 => Self::Unauthorized(code),
            429 => Self::RateLimited,
            _ => Self::Status(code),
        }
    }

    /// HTTP status behind the failure, if there was one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RecipientMisconfigured => Some(422),
            Self::BadRequest => Some(400),
            Self::Unauthorized(code) | Self::Status(code) => Some(*code),
            Self::RateLimited => Some(429),
            Self::Transport(_) => None,
        }
    }

    /// Message shown to the visitor.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::RecipientMisconfigured => {
                "The contact form's recipient is misconfigured. Please email me directly instead."
            }
            Self::BadRequest => {
                "Some of your details could not be processed. Please check the form and try again."
            }
            Self::Unauthorized(_) => {
                "The contact form could not authenticate with its email service. Please email me directly instead."
            }
            Self::RateLimited => {
                "Too many messages were sent recently. Please wait a minute and try again."
            }
            Self::Transport(_) => {
                "Could not reach the email service. Check your connection and try again."
            }
            Self::Status(_) => "Something went wrong sending your message. Please try again.",
        }
    }
}

/// Delivers composed messages. Implementations block until the relay
/// answers.
pub trait EmailRelay: Send + Sync {
    /// Sends `message` using `config`'s credentials.
    fn send(&self, config: &RelayConfig, message: &ComposedMessage) -> Result<(), RelayError>;
}

/// Relay client that posts JSON to the configured endpoint.
pub struct HttpEmailRelay {
    agent: ureq::Agent,
}

impl HttpEmailRelay {
    /// Creates a client with a 15 second overall timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(15))
    }

    /// Creates a client with a custom overall timeout.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self { agent }
    }
}

impl Default for HttpEmailRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl EmailRelay for HttpEmailRelay {
    fn send(&self, config: &RelayConfig, message: &ComposedMessage) -> Result<(), RelayError> {
        let body = json!({
            "service_id": config.service_id,
            "template_id": config.template_id,
            "user_id": config.public_key,
            "template_params": message.params,
        });

        debug!(reference = %message.reference, endpoint = %config.endpoint, "Posting contact message to relay");

        let mut response = self
            .agent
            .post(&config.endpoint)
            .header("Content-Type", "application/json")
            .send_json(&body)
            .map_err(|e| {
                warn!(reference = %message.reference, error = %e, "Relay request failed");
                RelayError::Transport(e.to_string())
            })?;

        let status = response.status().as_u16();
        if (200..300).contains(&status) {
            debug!(reference = %message.reference, status, "Relay accepted message");
            return Ok(());
        }

        let error = RelayError::from_status(status);
        warn!(reference = %message.reference, status, error = %error, "Relay rejected message");
        if let Ok(text) = response.body_mut().read_to_string() {
            let excerpt: String = text.chars().take(LOGGED_BODY_LIMIT).collect();
            debug!(reference = %message.reference, body = %excerpt, "Relay response body");
        }
        Err(error)
    }
}

/// Relay double that records calls instead of sending.
pub struct MockEmailRelay {
    /// Error returned from every call, or `None` to succeed.
    pub failure: Option<RelayError>,
    calls: AtomicUsize,
    sent: Mutex<Vec<ComposedMessage>>,
}

impl MockEmailRelay {
    /// A relay that accepts everything.
    #[must_use]
    pub fn succeeding() -> Self {
        Self::with_failure(None)
    }

    /// A relay that fails every call with `error`.
    #[must_use]
    pub fn failing(error: RelayError) -> Self {
        Self::with_failure(Some(error))
    }

    fn with_failure(failure: Option<RelayError>) -> Self {
        Self {
            failure,
            calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Number of `send` calls so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Messages passed to `send`, in order.
    #[must_use]
    pub fn sent(&self) -> Vec<ComposedMessage> {
        self.sent
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl Default for MockEmailRelay {
    fn default() -> Self {
        Self::succeeding()
    }
}

impl EmailRelay for MockEmailRelay {
    fn send(&self, _config: &RelayConfig, message: &ComposedMessage) -> Result<(), RelayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sent
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(message.clone());
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}
