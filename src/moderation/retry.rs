// Retry driver for moderation calls — timeouts plus backoff.
//
// Every attempt is bounded by a timeout. Rate-limit responses that carry a
// Retry-After hint are waited out exactly (never shortened by jitter); a
// refused request is returned at once; all other failures back off
// exponentially with jitter, capped at a ceiling.
// When the budget is spent, the last failure is returned to the caller.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use super::traits::ServerFailure;

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default base delay for exponential backoff (doubles each retry).
pub const DEFAULT_BASE_BACKOFF: Duration = Duration::from_millis(500);

/// Default cap on backoff delays.
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Default longest Retry-After hint we are willing to sit through.
pub const DEFAULT_MAX_RETRY_AFTER: Duration = Duration::from_secs(120);

/// Default per-attempt timeout.
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);

/// How moderation calls are retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt (total attempts = max_retries + 1)
    pub max_retries: u32,
    /// First backoff delay when the service gives no hint
    pub base_backoff: Duration,
    /// Ceiling for any computed backoff delay
    pub max_backoff: Duration,
    /// Retry-After hints longer than this are surfaced instead of waited out
    pub max_retry_after: Duration,
    /// Upper bound on a single attempt
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_backoff: DEFAULT_BASE_BACKOFF,
            max_backoff: DEFAULT_MAX_BACKOFF,
            max_retry_after: DEFAULT_MAX_RETRY_AFTER,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }
}

impl RetryPolicy {
    /// A policy that makes exactly one attempt.
    pub fn no_retries() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Un-jittered backoff before retry number `retry` (1-based):
    /// base * 2^(retry-1), capped at max_backoff.
    pub fn backoff_for(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(31);
        self.base_backoff
            .saturating_mul(1u32 << exponent)
            .min(self.max_backoff)
    }

    /// How long to wait before retry number `retry` after `failure`, or
    /// `None` if the failure should be surfaced right away.
    fn delay_before(&self, failure: &ServerFailure, retry: u32) -> Option<Duration> {
        match failure {
            ServerFailure::RateLimited {
                retry_after: Some(hint),
            } => {
                if *hint > self.max_retry_after {
                    None
                } else {
                    Some(*hint)
                }
            }
            ServerFailure::RateLimited { retry_after: None } | ServerFailure::Unavailable { .. } => {
                Some(jittered(self.backoff_for(retry), self.max_backoff))
            }
            ServerFailure::Refused { .. } => None,
        }
    }
}

/// Spread a backoff by +/- 25% so concurrent callers don't retry in lockstep.
/// Never exceeds `cap`.
///
/// The nanosecond component of the wall clock gives enough variation without
/// pulling in a random number generator.
fn jittered(backoff: Duration, cap: Duration) -> Duration {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();
    let jitter_factor = 0.75 + (nanos % 500) as f64 / 1000.0; // 0.75 to 1.25
    Duration::from_secs_f64(backoff.as_secs_f64() * jitter_factor).min(cap)
}

/// Run a moderation call with per-attempt timeouts and retries.
///
/// A timed-out attempt counts as `ServerFailure::Unavailable`. Dropping the
/// returned future at any point abandons the call without side effects.
pub async fn with_retry<F, Fut, T>(policy: &RetryPolicy, mut operation: F) -> Result<T, ServerFailure>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ServerFailure>>,
{
    let mut retry = 0u32;

    loop {
        let outcome = match tokio::time::timeout(policy.attempt_timeout, operation()).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ServerFailure::unavailable(format!(
                "moderation request timed out after {}ms",
                policy.attempt_timeout.as_millis()
            ))),
        };

        let failure = match outcome {
            Ok(value) => return Ok(value),
            Err(failure) => failure,
        };

        if !failure.is_transient() {
            warn!(error = %failure, "Moderation service refused the request, not retrying");
            return Err(failure);
        }

        if retry >= policy.max_retries {
            warn!(
                attempts = retry + 1,
                error = %failure,
                "Moderation retries exhausted"
            );
            return Err(failure);
        }

        retry += 1;

        let Some(delay) = policy.delay_before(&failure, retry) else {
            warn!(
                error = %failure,
                max_retry_after_secs = policy.max_retry_after.as_secs(),
                "Retry-After hint exceeds what we will wait, surfacing to caller"
            );
            return Err(failure);
        };

        warn!(
            attempt = retry,
            max_retries = policy.max_retries,
            delay_ms = delay.as_millis() as u64,
            error = %failure,
            "Moderation call failed, retrying in {:.1}s (attempt {}/{})",
            delay.as_secs_f64(),
            retry,
            policy.max_retries,
        );

        tokio::time::sleep(delay).await;
    }
}
