//! Contact form fields and the message handed to the relay.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// What a visitor typed into the contact form.
///
/// Only `name`, `email`, and `message` are required; the rest are optional
/// qualifiers that are passed through to the relay as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSubmission {
    /// Visitor name
    pub name: String,
    /// Reply address
    pub email: String,
    /// Organization, if any
    pub company: String,
    /// Kind of engagement (audit, pentest, ...)
    pub project_type: String,
    /// Desired start or deadline
    pub timeline: String,
    /// Budget range
    pub budget: String,
    /// Free-text message
    pub message: String,
    /// How the visitor found the site
    pub referral: String,
}

/// Reasons a submission is rejected before it reaches the relay.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmissionError {
    /// A required field is blank
    #[error("{0} is required")]
    Missing(&'static str),
    /// The email field is not shaped like an address
    #[error("'{0}' does not look like an email address")]
    InvalidEmail(String),
}

impl ContactSubmission {
    /// Checks required fields and the email shape.
    pub fn validate(&self) -> Result<(), SubmissionError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(SubmissionError::Missing(field));
            }
        }

        let email = self.email.trim();
        if !EMAIL_REGEX.is_match(email) {
            return Err(SubmissionError::InvalidEmail(email.to_string()));
        }

        Ok(())
    }

    /// Builds the relay message, stamping a fresh reference and the current
    /// time.
    #[must_use]
    pub fn compose(&self) -> ComposedMessage {
        self.compose_at(Uuid::new_v4(), Utc::now())
    }

    /// Builds the relay message with an explicit reference and timestamp.
    #[must_use]
    pub fn compose_at(&self, reference: Uuid, submitted_at: DateTime<Utc>) -> ComposedMessage {
        let optional = |value: &str| {
            let value = value.trim();
            if value.is_empty() {
                "Not specified".to_string()
            } else {
                value.to_string()
            }
        };

        let mut params = BTreeMap::new();
        params.insert("from_name".to_string(), self.name.trim().to_string());
        params.insert("from_email".to_string(), self.email.trim().to_string());
        params.insert("reply_to".to_string(), self.email.trim().to_string());
        params.insert("company".to_string(), optional(&self.company));
        params.insert("project_type".to_string(), optional(&self.project_type));
        params.insert("timeline".to_string(), optional(&self.timeline));
        params.insert("budget".to_string(), optional(&self.budget));
        params.insert("referral".to_string(), optional(&self.referral));
        params.insert("message".to_string(), self.message.trim().to_string());
        params.insert("reference".to_string(), reference.to_string());
        params.insert("submitted_at".to_string(), submitted_at.to_rfc3339());

        ComposedMessage {
            reference,
            submitted_at,
            params,
        }
    }
}

/// A submission ready for the relay: flat template parameters plus a
/// reference for correlating logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedMessage {
    /// Submission reference included in the email and logs
    pub reference: Uuid,
    /// When the submission was composed
    pub submitted_at: DateTime<Utc>,
    /// Template parameters
    pub params: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ContactSubmission {
        ContactSubmission {
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            message: "We need a pentest before launch.".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_accepts_minimal_submission() {
        assert_eq!(valid().validate(), Ok(()));
    }

    #[test]
    fn test_validate_required_fields() {
        let mut submission = valid();
        submission.name = "   ".to_string();
        assert_eq!(submission.validate(), Err(SubmissionError::Missing("name")));

        let mut submission = valid();
        submission.message.clear();
        assert_eq!(
            submission.validate(),
            Err(SubmissionError::Missing("message"))
        );
    }

    #[test]
    fn test_validate_email_shape() {
        for bad in ["dana", "dana@", "dana@example", "da na@example.com"] {
            let mut submission = valid();
            submission.email = bad.to_string();
            assert!(
                matches!(submission.validate(), Err(SubmissionError::InvalidEmail(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_compose_fills_optional_fields() {
        let reference = Uuid::new_v4();
        let at = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let mut submission = valid();
        submission.budget = "$10k-$25k".to_string();

        let message = submission.compose_at(reference, at);
        assert_eq!(message.params["from_name"], "Dana");
        assert_eq!(message.params["budget"], "$10k-$25k");
        assert_eq!(message.params["company"], "Not specified");
        assert_eq!(message.params["reference"], reference.to_string());
        assert_eq!(message.params["submitted_at"], "2024-05-01T12:00:00+00:00");
    }
}
