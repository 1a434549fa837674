// Moderation client trait — the swap-ready abstraction for the remote check.
//
// A verdict (allowed or denied) is a successful answer. Only operational
// problems come back as ServerFailure, which keeps "the server said no"
// and "the server couldn't answer" from ever being confused.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::filter::violation::ViolationType;
use crate::mode::Mode;

/// What we send to the moderation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModerationRequest {
    pub text: String,
    pub mode: Mode,
}

impl ModerationRequest {
    pub fn new(text: impl Into<String>, mode: Mode) -> Self {
        Self {
            text: text.into(),
            mode,
        }
    }
}

/// The service's decision about a piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerVerdict {
    pub allowed: bool,
    #[serde(default, alias = "violation_type")]
    pub violation_type: Option<ViolationType>,
    /// Human-readable explanation from the service
    #[serde(default)]
    pub message: Option<String>,
    /// Optional rewrite hint
    #[serde(default)]
    pub suggestion: Option<String>,
}

impl ServerVerdict {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            violation_type: None,
            message: None,
            suggestion: None,
        }
    }

    pub fn deny(violation_type: Option<ViolationType>, message: impl Into<String>) -> Self {
        Self {
            allowed: false,
            violation_type,
            message: Some(message.into()),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Operational failures talking to the moderation service. Rate limits and
/// unavailability are transient and eligible for retry; a refused request
/// would get the same answer again and is not.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServerFailure {
    /// HTTP 429. `retry_after` is the service's minimum wait, if it sent one.
    #[error("rate limited (retry after {retry_after:?})")]
    RateLimited { retry_after: Option<Duration> },

    /// Unreachable, timed out, or an unexpected response.
    #[error("{cause}")]
    Unavailable { cause: String },

    /// A 4xx other than 408/429: bad credentials or a request the service
    /// won't accept.
    #[error("{cause}")]
    Refused { status: u16, cause: String },
}

impl ServerFailure {
    pub fn unavailable(cause: impl Into<String>) -> Self {
        ServerFailure::Unavailable {
            cause: cause.into(),
        }
    }

    /// Whether another attempt with the same request could succeed.
    pub fn is_transient(&self) -> bool {
        !matches!(self, ServerFailure::Refused { .. })
    }
}

/// Trait for the remote moderation check. Implementations must be async
/// because the real one is an HTTP call.
#[async_trait]
pub trait ModerationClient: Send + Sync {
    /// Ask the service whether this text may be posted.
    async fn moderate(&self, request: &ModerationRequest) -> Result<ServerVerdict, ServerFailure>;
}

/// Client that approves everything without a network call. Stands in for
/// the server stage when configuration turns it off.
pub struct AllowAllClient;

#[async_trait]
impl ModerationClient for AllowAllClient {
    async fn moderate(&self, _request: &ModerationRequest) -> Result<ServerVerdict, ServerFailure> {
        Ok(ServerVerdict::allow())
    }
}
