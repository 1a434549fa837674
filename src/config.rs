use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::mode::Mode;
use crate::moderation::http::DEFAULT_MODERATION_URL;
use crate::moderation::retry::{
    RetryPolicy, DEFAULT_ATTEMPT_TIMEOUT, DEFAULT_BASE_BACKOFF, DEFAULT_MAX_BACKOFF,
    DEFAULT_MAX_RETRIES, DEFAULT_MAX_RETRY_AFTER,
};

/// Central configuration loaded from environment variables.
///
/// Secrets come from env vars (never hardcoded). The .env file is loaded
/// automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote moderation service
    pub moderation_url: String,
    /// Whether submissions are sent to the moderation service at all
    pub server_check: bool,
    /// Static bearer token for the moderation service, when not supplied
    /// by a live token stream
    pub auth_token: Option<String>,
    /// Per-attempt timeout for moderation calls
    pub request_timeout: Duration,
    pub max_retries: u32,
    pub base_backoff: Duration,
    pub max_backoff: Duration,
    /// Longest Retry-After hint we will wait out before giving up
    pub max_retry_after: Duration,
    /// Words added to the default profanity list at startup
    pub extra_words: Vec<String>,
    /// Mode used when a command doesn't specify one
    pub default_mode: Mode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            moderation_url: DEFAULT_MODERATION_URL.to_string(),
            server_check: true,
            auth_token: None,
            request_timeout: DEFAULT_ATTEMPT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            base_backoff: DEFAULT_BASE_BACKOFF,
            max_backoff: DEFAULT_MAX_BACKOFF,
            max_retry_after: DEFAULT_MAX_RETRY_AFTER,
            extra_words: Vec::new(),
            default_mode: Mode::default(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source. Unset keys take their
    /// defaults; set-but-malformed numbers are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let server_check = match lookup("SHINEGATE_SERVER_CHECK").as_deref().map(str::trim) {
            Some("off") | Some("false") | Some("0") => false,
            // "on", unset, or anything else keeps the server stage enabled
            _ => true,
        };

        let extra_words = lookup("SHINEGATE_EXTRA_WORDS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|w| !w.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let config = Self {
            moderation_url: lookup("SHINEGATE_MODERATION_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.moderation_url),
            server_check,
            auth_token: lookup("SHINEGATE_AUTH_TOKEN").filter(|t| !t.is_empty()),
            request_timeout: parse_var(&lookup, "SHINEGATE_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            max_retries: parse_var(&lookup, "SHINEGATE_MAX_RETRIES")?
                .unwrap_or(defaults.max_retries),
            base_backoff: parse_var(&lookup, "SHINEGATE_BASE_BACKOFF_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.base_backoff),
            max_backoff: parse_var(&lookup, "SHINEGATE_MAX_BACKOFF_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.max_backoff),
            max_retry_after: parse_var(&lookup, "SHINEGATE_MAX_RETRY_AFTER_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.max_retry_after),
            extra_words,
            default_mode: lookup("SHINEGATE_MODE")
                .map(|m| Mode::from_api_value(&m))
                .unwrap_or(defaults.default_mode),
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make the retry contract meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout.is_zero() {
            anyhow::bail!("SHINEGATE_TIMEOUT_SECS must be greater than zero");
        }
        if self.max_backoff < self.base_backoff {
            anyhow::bail!(
                "SHINEGATE_MAX_BACKOFF_SECS ({}s) is smaller than SHINEGATE_BASE_BACKOFF_MS ({}ms)",
                self.max_backoff.as_secs(),
                self.base_backoff.as_millis()
            );
        }
        Ok(())
    }

    /// The retry policy for moderation calls.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_backoff: self.base_backoff,
            max_backoff: self.max_backoff,
            max_retry_after: self.max_retry_after,
            attempt_timeout: self.request_timeout,
        }
    }
}

/// Parse an optional numeric variable, with the key in the error message.
fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("{key} must be a whole number, got {raw:?}")),
    }
}
