//! Contact form status machine.
//!
//! ```text
//! Idle ──begin──► Sending ──finish(ok)──► Sent
//!   ▲         │        └────finish(err)──► Failed ──5s──► Idle
//!   │         └──────── no finish in 30s ──► Failed
//!   └── begin with placeholder config ──► Blocked
//! ```
//!
//! Submission is split into [`ContactForm::begin`] and
//! [`ContactForm::finish`] so callers can run the blocking relay call without
//! holding a lock on the form.

use std::time::{Duration, Instant};

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use super::{
    ComposedMessage, ContactSubmission, EmailRelay, RelayConfig, RelayConfigError, RelayError,
    SubmissionError,
};

/// How long a failure stays visible before the form returns to idle.
pub const ERROR_RESET_AFTER: Duration = Duration::from_secs(5);

/// How long a submission may stay in flight before it is reported as failed.
/// Longer than the relay client's own timeout.
pub const SENDING_TIMEOUT: Duration = Duration::from_secs(30);

const STALLED_MESSAGE: &str =
    "Your message could not be confirmed. Please try again or email me directly.";

/// What the form shows to the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FormStatus {
    /// Ready for input
    Idle,
    /// A submission is in flight
    Sending,
    /// The relay accepted the last submission
    Sent {
        /// Submission reference
        reference: Uuid,
    },
    /// The last submission failed; clears after [`ERROR_RESET_AFTER`]
    Failed {
        /// Visitor-facing explanation
        message: String,
    },
    /// Relay credentials are missing; the form cannot be used
    Blocked {
        /// Remediation notice pointing to the direct address
        message: String,
    },
}

/// Errors from a submission attempt.
#[derive(Debug, Error)]
pub enum ContactError {
    /// The visitor's input was rejected
    #[error(transparent)]
    Invalid(#[from] SubmissionError),
    /// Relay credentials are placeholders or unset
    #[error("contact form is not configured: {0}")]
    Misconfigured(#[from] RelayConfigError),
    /// The relay call failed
    #[error(transparent)]
    Relay(#[from] RelayError),
    /// Another submission is still in flight
    #[error("a submission is already being sent")]
    Busy,
}

/// A submission that passed the gate and is ready to send.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    /// Credentials to send with
    pub config: RelayConfig,
    /// The composed message
    pub message: ComposedMessage,
}

impl PendingSubmission {
    /// Performs the relay call. Blocks.
    pub fn send(&self, relay: &dyn EmailRelay) -> Result<(), RelayError> {
        relay.send(&self.config, &self.message)
    }
}

/// Contact form state: relay configuration plus the current status.
#[derive(Debug)]
pub struct ContactForm {
    config: RelayConfig,
    fallback_email: String,
    status: FormStatus,
    failed_at: Option<Instant>,
    in_flight: Option<(Uuid, Instant)>,
}

impl ContactForm {
    /// Creates an idle form.
    ///
    /// `fallback_email` is offered to visitors when the form cannot be used;
    /// `config.fallback_email` takes precedence when set.
    #[must_use]
    pub fn new(config: RelayConfig, fallback_email: impl Into<String>) -> Self {
        let fallback_email = config
            .fallback_email
            .clone()
            .unwrap_or_else(|| fallback_email.into());
        Self {
            config,
            fallback_email,
            status: FormStatus::Idle,
            failed_at: None,
            in_flight: None,
        }
    }

    /// Relay configuration in use.
    #[must_use]
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Address shown when the form cannot be used.
    #[must_use]
    pub fn fallback_email(&self) -> &str {
        &self.fallback_email
    }

    /// Misconfiguration notice, or `None` when the relay is configured.
    #[must_use]
    pub fn blocked_notice(&self) -> Option<String> {
        self.config
            .check()
            .err()
            .map(|_| self.misconfiguration_message())
    }

    fn misconfiguration_message(&self) -> String {
        format!(
            "The contact form is not set up yet. Please email me directly at {}.",
            self.fallback_email
        )
    }

    /// Current status, clearing an expired failure first.
    pub fn status(&mut self) -> FormStatus {
        self.status_at(Instant::now())
    }

    /// Status as of `now`, clearing a failure older than
    /// [`ERROR_RESET_AFTER`] and failing a submission that has been in flight
    /// longer than [`SENDING_TIMEOUT`].
    pub fn status_at(&mut self, now: Instant) -> FormStatus {
        if let Some((reference, started)) = self.in_flight {
            if now.saturating_duration_since(started) >= SENDING_TIMEOUT {
                warn!(%reference, "Contact submission never finished");
                self.in_flight = None;
                self.fail(STALLED_MESSAGE.to_string(), now);
            }
        }
        if let Some(failed_at) = self.failed_at {
            if now.saturating_duration_since(failed_at) >= ERROR_RESET_AFTER {
                self.status = FormStatus::Idle;
                self.failed_at = None;
            }
        }
        self.status.clone()
    }

    /// Gates and validates a submission, moving the form to `Sending`.
    ///
    /// With placeholder credentials the form becomes `Blocked` and no message
    /// is composed, so no relay call can follow.
    pub fn begin(&mut self, submission: &ContactSubmission) -> Result<PendingSubmission, ContactError> {
        self.begin_at(submission, Instant::now())
    }

    /// [`begin`](Self::begin) with an explicit clock.
    pub fn begin_at(
        &mut self,
        submission: &ContactSubmission,
        now: Instant,
    ) -> Result<PendingSubmission, ContactError> {
        if self.status_at(now) == FormStatus::Sending {
            return Err(ContactError::Busy);
        }

        if let Err(e) = self.config.check() {
            warn!(error = %e, "Refusing contact submission");
            self.status = FormStatus::Blocked {
                message: self.misconfiguration_message(),
            };
            self.failed_at = None;
            return Err(e.into());
        }

        if let Err(e) = submission.validate() {
            self.fail(e.to_string(), now);
            return Err(e.into());
        }

        let message = submission.compose();
        self.status = FormStatus::Sending;
        self.failed_at = None;
        self.in_flight = Some((message.reference, now));
        Ok(PendingSubmission {
            config: self.config.clone(),
            message,
        })
    }

    /// Records the outcome of a relay call started by [`begin`](Self::begin).
    ///
    /// An outcome for a submission that is no longer in flight (it already
    /// timed out) is returned to the caller but leaves the status alone.
    pub fn finish(
        &mut self,
        reference: Uuid,
        result: Result<(), RelayError>,
    ) -> Result<Uuid, ContactError> {
        self.finish_at(reference, result, Instant::now())
    }

    /// [`finish`](Self::finish) with an explicit clock.
    pub fn finish_at(
        &mut self,
        reference: Uuid,
        result: Result<(), RelayError>,
        now: Instant,
    ) -> Result<Uuid, ContactError> {
        let current = self.in_flight.is_some_and(|(id, _)| id == reference);
        if current {
            self.in_flight = None;
        } else {
            warn!(%reference, ok = result.is_ok(), "Late outcome for a timed out submission");
            return result.map(|()| reference).map_err(ContactError::from);
        }

        match result {
            Ok(()) => {
                info!(%reference, "Contact message sent");
                self.status = FormStatus::Sent { reference };
                self.failed_at = None;
                Ok(reference)
            }
            Err(e) => {
                warn!(%reference, status = ?e.status(), error = %e, "Contact message failed");
                self.fail(e.user_message().to_string(), now);
                Err(e.into())
            }
        }
    }

    /// Runs a whole submission synchronously.
    pub fn submit(
        &mut self,
        relay: &dyn EmailRelay,
        submission: &ContactSubmission,
    ) -> Result<Uuid, ContactError> {
        let pending = self.begin(submission)?;
        let result = pending.send(relay);
        self.finish(pending.message.reference, result)
    }

    /// Whether a submission is currently in flight.
    #[must_use]
    pub const fn is_sending(&self) -> bool {
        self.in_flight.is_some()
    }

    fn fail(&mut self, message: String, now: Instant) {
        self.status = FormStatus::Failed { message };
        self.failed_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::MockEmailRelay;

    fn configured() -> RelayConfig {
        RelayConfig {
            service_id: "service_abc".to_string(),
            template_id: "template_xyz".to_string(),
            public_key: "pk_123".to_string(),
            ..RelayConfig::default()
        }
    }

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            message: "Please review our API gateway.".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_placeholder_config_blocks_without_relay_call() {
        let relay = MockEmailRelay::succeeding();
        let mut form = ContactForm::new(RelayConfig::default(), "hello@example.com");

        let result = form.submit(&relay, &submission());
        assert!(matches!(result, Err(ContactError::Misconfigured(_))));
        assert_eq!(relay.calls(), 0);

        let FormStatus::Blocked { message } = form.status() else {
            panic!("expected blocked status");
        };
        assert!(message.contains("hello@example.com"));
        assert_eq!(form.blocked_notice(), Some(message));
    }

    #[test]
    fn test_configured_fallback_email_wins() {
        let config = RelayConfig {
            fallback_email: Some("ops@example.com".to_string()),
            ..RelayConfig::default()
        };
        let form = ContactForm::new(config, "hello@example.com");
        assert_eq!(form.fallback_email(), "ops@example.com");
        assert!(form.blocked_notice().unwrap().contains("ops@example.com"));
    }

    #[test]
    fn test_successful_submission() {
        let relay = MockEmailRelay::succeeding();
        let mut form = ContactForm::new(configured(), "hello@example.com");
        assert_eq!(form.blocked_notice(), None);

        let reference = form.submit(&relay, &submission()).unwrap();
        assert_eq!(relay.calls(), 1);
        assert_eq!(form.status(), FormStatus::Sent { reference });
    }

    #[test]
    fn test_failure_resets_after_five_seconds() {
        let relay = MockEmailRelay::failing(RelayError::from_status(422));
        let mut form = ContactForm::new(configured(), "hello@example.com");
        let start = Instant::now();

        let pending = form.begin_at(&submission(), start).unwrap();
        let result = pending.send(&relay);
        assert!(form
            .finish_at(pending.message.reference, result, start)
            .is_err());

        assert_eq!(
            form.status_at(start + Duration::from_secs(4)),
            FormStatus::Failed {
                message: RelayError::RecipientMisconfigured.user_message().to_string()
            }
        );
        assert_eq!(form.status_at(start + ERROR_RESET_AFTER), FormStatus::Idle);
    }

    #[test]
    fn test_invalid_submission_fails_without_relay_call() {
        let relay = MockEmailRelay::succeeding();
        let mut form = ContactForm::new(configured(), "hello@example.com");
        let mut bad = submission();
        bad.email = "not-an-email".to_string();

        assert!(matches!(
            form.submit(&relay, &bad),
            Err(ContactError::Invalid(_))
        ));
        assert_eq!(relay.calls(), 0);
        assert!(matches!(form.status(), FormStatus::Failed { .. }));
    }

    #[test]
    fn test_second_begin_while_sending_is_busy() {
        let mut form = ContactForm::new(configured(), "hello@example.com");
        let _pending = form.begin(&submission()).unwrap();
        assert!(matches!(form.begin(&submission()), Err(ContactError::Busy)));
    }

    #[test]
    fn test_stalled_submission_times_out() {
        let mut form = ContactForm::new(configured(), "hello@example.com");
        let start = Instant::now();
        let pending = form.begin_at(&submission(), start).unwrap();

        assert_eq!(
            form.status_at(start + Duration::from_secs(29)),
            FormStatus::Sending
        );
        assert!(matches!(
            form.status_at(start + SENDING_TIMEOUT),
            FormStatus::Failed { .. }
        ));
        assert!(!form.is_sending());

        // A late success is reported to its caller without touching the form.
        let late = start + SENDING_TIMEOUT + Duration::from_secs(1);
        assert_eq!(
            form.finish_at(pending.message.reference, Ok(()), late).unwrap(),
            pending.message.reference
        );
        assert!(matches!(form.status_at(late), FormStatus::Failed { .. }));
        assert_eq!(
            form.status_at(late + ERROR_RESET_AFTER),
            FormStatus::Idle
        );
    }

    #[test]
    fn test_form_accepts_new_submission_after_stall() {
        let mut form = ContactForm::new(configured(), "hello@example.com");
        let start = Instant::now();
        let _stalled = form.begin_at(&submission(), start).unwrap();

        let later = start + SENDING_TIMEOUT;
        assert!(form.begin_at(&submission(), later).is_ok());
        assert_eq!(form.status_at(later), FormStatus::Sending);
    }

    #[test]
    fn test_unknown_status_gets_generic_message() {
        let relay = MockEmailRelay::failing(RelayError::from_status(500));
        let mut form = ContactForm::new(configured(), "hello@example.com");
        let _ = form.submit(&relay, &submission());

        assert_eq!(
            form.status(),
            FormStatus::Failed {
                message: RelayError::Status(500).user_message().to_string()
            }
        );
    }
}
