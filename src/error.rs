// Moderation outcome taxonomy.
//
// Every submission that isn't allowed ends in exactly one of these. The two
// violation variants are content decisions and are never retried; the other
// two are operational faults that the retry driver has already retried as
// far as its budget allowed by the time a caller sees them.

use std::time::Duration;

use thiserror::Error;

use crate::filter::violation::ViolationType;
use crate::mode::Mode;

/// Why a submission was not allowed through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModerationError {
    /// The local profanity filter rejected the text before any network call.
    #[error("Content contains {violation_type}: {}", .detected_words.join(", "))]
    ClientSideViolation {
        violation_type: ViolationType,
        detected_words: Vec<String>,
        mode: Mode,
    },

    /// The remote moderation service rejected the text.
    #[error("Content rejected by moderation service: {server_message}")]
    ServerSideViolation {
        violation_type: Option<ViolationType>,
        mode: Mode,
        server_message: String,
        /// Optional rewrite hint to show alongside the rejection
        suggestion: Option<String>,
    },

    /// The moderation service throttled us and the retry budget ran out
    /// (or its wait hint was too long to sit through).
    #[error("Moderation service rate limited the request{}", retry_after_suffix(.retry_after_seconds))]
    RateLimited { retry_after_seconds: Option<u64> },

    /// The moderation service was unreachable, timed out, or answered with
    /// something we couldn't use.
    #[error("Moderation service unavailable{}", cause_suffix(.cause))]
    ServiceError { cause: Option<String> },
}

fn retry_after_suffix(seconds: &Option<u64>) -> String {
    seconds
        .map(|s| format!(" (retry after {s}s)"))
        .unwrap_or_default()
}

fn cause_suffix(cause: &Option<String>) -> String {
    cause
        .as_deref()
        .map(|c| format!(": {c}"))
        .unwrap_or_default()
}

impl ModerationError {
    /// Whether resubmitting the same text later could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ModerationError::RateLimited { .. } | ModerationError::ServiceError { .. }
        )
    }

    /// Whether this is a decision about the content itself. The text has to
    /// change before resubmitting.
    pub fn is_content_decision(&self) -> bool {
        matches!(
            self,
            ModerationError::ClientSideViolation { .. } | ModerationError::ServerSideViolation { .. }
        )
    }

    /// Minimum wait before resubmitting, when the service gave one.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            ModerationError::RateLimited {
                retry_after_seconds: Some(secs),
            } => Some(Duration::from_secs(*secs)),
            _ => None,
        }
    }

    /// The violation category, for either violation variant.
    pub fn violation_type(&self) -> Option<ViolationType> {
        match self {
            ModerationError::ClientSideViolation { violation_type, .. } => Some(*violation_type),
            ModerationError::ServerSideViolation { violation_type, .. } => *violation_type,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_violation() -> ModerationError {
        ModerationError::ClientSideViolation {
            violation_type: ViolationType::Profanity,
            detected_words: vec!["badword".to_string(), "worse".to_string()],
            mode: Mode::Shine,
        }
    }

    #[test]
    fn test_only_operational_faults_are_retryable() {
        assert!(!client_violation().is_retryable());
        assert!(!ModerationError::ServerSideViolation {
            violation_type: None,
            mode: Mode::Shadow,
            server_message: "no".to_string(),
            suggestion: None,
        }
        .is_retryable());
        assert!(ModerationError::RateLimited {
            retry_after_seconds: None
        }
        .is_retryable());
        assert!(ModerationError::ServiceError { cause: None }.is_retryable());
    }

    #[test]
    fn test_content_decision_is_complement_of_retryable() {
        let all = [
            client_violation(),
            ModerationError::ServerSideViolation {
                violation_type: Some(ViolationType::Harassment),
                mode: Mode::Shine,
                server_message: "no".to_string(),
                suggestion: Some("be kind".to_string()),
            },
            ModerationError::RateLimited {
                retry_after_seconds: Some(5),
            },
            ModerationError::ServiceError {
                cause: Some("timeout".to_string()),
            },
        ];
        for err in &all {
            assert_ne!(err.is_retryable(), err.is_content_decision(), "{err:?}");
        }
    }

    #[test]
    fn test_retry_after_only_for_rate_limited_with_hint() {
        let limited = ModerationError::RateLimited {
            retry_after_seconds: Some(30),
        };
        assert_eq!(limited.retry_after(), Some(Duration::from_secs(30)));
        assert_eq!(
            ModerationError::RateLimited {
                retry_after_seconds: None
            }
            .retry_after(),
            None
        );
        assert_eq!(client_violation().retry_after(), None);
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            client_violation().to_string(),
            "Content contains profanity: badword, worse"
        );
        assert_eq!(
            ModerationError::RateLimited {
                retry_after_seconds: Some(30)
            }
            .to_string(),
            "Moderation service rate limited the request (retry after 30s)"
        );
        assert_eq!(
            ModerationError::ServiceError { cause: None }.to_string(),
            "Moderation service unavailable"
        );
        assert_eq!(
            ModerationError::ServiceError {
                cause: Some("HTTP 503".to_string())
            }
            .to_string(),
            "Moderation service unavailable: HTTP 503"
        );
    }

    #[test]
    fn test_violation_type_accessor() {
        assert_eq!(client_violation().violation_type(), Some(ViolationType::Profanity));
        assert_eq!(
            ModerationError::ServiceError { cause: None }.violation_type(),
            None
        );
    }
}
