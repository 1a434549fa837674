// HTTP moderation client.
//
// POSTs `{text, mode}` to the moderation service and maps the response:
// 2xx bodies are verdicts, 429 is a rate limit (with Retry-After if the
// service sent one), anything else is the service being unavailable.
// The current auth token is attached to every call; refreshing it is the
// auth layer's job.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::RETRY_AFTER;
use reqwest::StatusCode;
use tracing::debug;

use super::traits::{ModerationClient, ModerationRequest, ServerFailure, ServerVerdict};
use crate::auth::AuthTokenSource;
use crate::output::truncate_chars;

/// Default moderation service endpoint.
pub const DEFAULT_MODERATION_URL: &str = "http://localhost:8080";

/// Path of the moderation endpoint, relative to the base URL.
pub const MODERATE_PATH: &str = "/v1/moderate";

/// Moderation client backed by the remote service's HTTP API.
pub struct HttpModerationClient {
    client: reqwest::Client,
    base_url: String,
    auth: Arc<dyn AuthTokenSource>,
}

impl HttpModerationClient {
    /// Create a client for the service at `base_url`.
    ///
    /// `timeout` bounds each HTTP exchange at the transport level; the retry
    /// driver applies its own per-attempt timeout on top.
    pub fn new(base_url: &str, timeout: Duration, auth: Arc<dyn AuthTokenSource>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("shinegate/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, MODERATE_PATH)
    }
}

#[async_trait]
impl ModerationClient for HttpModerationClient {
    async fn moderate(&self, request: &ModerationRequest) -> Result<ServerVerdict, ServerFailure> {
        let url = self.endpoint();

        let mut builder = self.client.post(&url).json(request);
        if let Some(token) = self.auth.current_token() {
            builder = builder.bearer_auth(token);
        }

        debug!(
            mode = request.mode.api_value(),
            text_preview = %truncate_chars(&request.text, 40),
            "Moderation request"
        );

        let response = builder
            .send()
            .await
            .map_err(|e| ServerFailure::unavailable(format!("Moderation request failed: {e}")))?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| parse_retry_after(value, Utc::now()));
            debug!(retry_after = ?retry_after, "Moderation service rate limited the request");
            return Err(ServerFailure::RateLimited { retry_after });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let cause = format!(
                "Moderation service returned {status}: {}",
                truncate_chars(&body, 200)
            );
            // 408 is a timeout on their side; other 4xx repeat on every retry
            if status.is_client_error() && status != StatusCode::REQUEST_TIMEOUT {
                return Err(ServerFailure::Refused {
                    status: status.as_u16(),
                    cause,
                });
            }
            return Err(ServerFailure::unavailable(cause));
        }

        let verdict = response
            .json::<ServerVerdict>()
            .await
            .map_err(|e| ServerFailure::unavailable(format!("Failed to parse moderation response: {e}")))?;

        debug!(
            allowed = verdict.allowed,
            violation = ?verdict.violation_type,
            "Moderation verdict"
        );

        Ok(verdict)
    }
}

/// Parse a Retry-After header value: either delay-seconds or an HTTP-date.
/// Dates in the past mean "retry now". Unparseable values are ignored.
pub fn parse_retry_after(value: &str, now: DateTime<Utc>) -> Option<Duration> {
    let value = value.trim();

    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    let when = DateTime::parse_from_rfc2822(value).ok()?;
    let wait = when.with_timezone(&Utc) - now;
    Some(wait.to_std().unwrap_or(Duration::ZERO))
}
