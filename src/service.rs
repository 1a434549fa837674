// Content filter service — the single entry point per submission.
//
// Runs the local filter first and only calls the moderation service when
// the text passes locally, so content that is already rejected never costs
// a network round trip or quota. The service owns the profanity list;
// clones share it.

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::auth::{AuthTokenSource, StaticToken};
use crate::config::Config;
use crate::error::ModerationError;
use crate::filter::classifier::ViolationClassifier;
use crate::filter::client_side::ClientSideFilter;
use crate::filter::result::FilterResult;
use crate::filter::violation::ViolationType;
use crate::filter::words::ProfanityList;
use crate::mode::Mode;
use crate::moderation::http::HttpModerationClient;
use crate::moderation::retry::{with_retry, RetryPolicy};
use crate::moderation::traits::{
    AllowAllClient, ModerationClient, ModerationRequest, ServerFailure, ServerVerdict,
};
use crate::output::truncate_chars;
use crate::requests::{CreateMessageRequest, CreateReplyRequest};

/// Shown when the service rejects text without explaining why.
pub const DEFAULT_SERVER_MESSAGE: &str = "This content doesn't meet our community guidelines.";

/// Two-stage moderation pipeline: local filter, then the remote service.
#[derive(Clone)]
pub struct ContentFilterService {
    filter: ClientSideFilter,
    server: Arc<dyn ModerationClient>,
    retry: RetryPolicy,
}

impl ContentFilterService {
    /// Build a service around an existing word list and moderation client.
    pub fn new(
        server: Arc<dyn ModerationClient>,
        words: Arc<ProfanityList>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            filter: ClientSideFilter::new(ViolationClassifier::new(words)),
            server,
            retry,
        }
    }

    /// Build the service from configuration, using a static token (if any)
    /// for the moderation service.
    pub fn from_config(config: &Config) -> Result<Self> {
        let auth: Arc<dyn AuthTokenSource> = Arc::new(StaticToken::from(config.auth_token.clone()));
        Self::from_config_with_auth(config, auth)
    }

    /// Build the service from configuration with a live auth token source.
    pub fn from_config_with_auth(config: &Config, auth: Arc<dyn AuthTokenSource>) -> Result<Self> {
        let words = Arc::new(ProfanityList::with_defaults());
        words.extend(&config.extra_words);

        let server: Arc<dyn ModerationClient> = if config.server_check {
            Arc::new(HttpModerationClient::new(
                &config.moderation_url,
                config.request_timeout,
                auth,
            )?)
        } else {
            info!("Server-side moderation disabled by configuration");
            Arc::new(AllowAllClient)
        };

        Ok(Self::new(server, words, config.retry_policy()))
    }

    /// The shared profanity list.
    pub fn profanity_list(&self) -> &Arc<ProfanityList> {
        self.filter.classifier().word_list()
    }

    /// Local submission check under the mode policy.
    pub fn filter_content(&self, text: &str, mode: Mode) -> FilterResult {
        self.filter.filter_content(text, mode)
    }

    /// Local, mode-independent check for typing feedback.
    pub fn check_profanity(&self, text: &str) -> FilterResult {
        self.filter.check_profanity(text)
    }

    /// Add words to the profanity list. Takes effect for every check that
    /// starts after this returns. Returns how many words were new.
    pub fn update_profanity_list<I, S>(&self, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let added = self.profanity_list().extend(words);
        if added > 0 {
            info!(added, "Profanity list extended");
        }
        added
    }

    /// Run the full pipeline for one submission.
    ///
    /// Ends in exactly one of: allowed, a violation, or an operational
    /// fault after the retry budget is spent.
    pub async fn moderate(&self, text: &str, mode: Mode) -> Result<FilterResult, ModerationError> {
        let local = self.filter.filter_content(text, mode);
        if !local.is_allowed() {
            return Err(ModerationError::ClientSideViolation {
                violation_type: local.primary_violation().unwrap_or(ViolationType::Profanity),
                detected_words: local.detected_words().to_vec(),
                mode,
            });
        }

        let request = ModerationRequest::new(text, mode);
        let outcome = with_retry(&self.retry, || self.server.moderate(&request)).await;

        match outcome {
            Ok(verdict) if verdict.allowed => {
                debug!(mode = mode.api_value(), "Submission allowed");
                Ok(FilterResult::allowed())
            }
            Ok(verdict) => Err(server_violation(verdict, mode)),
            Err(failure) => {
                warn!(
                    mode = mode.api_value(),
                    text_preview = %truncate_chars(text, 40),
                    error = %failure,
                    "Moderation service could not decide on submission"
                );
                Err(failure_to_error(failure))
            }
        }
    }

    /// Screen a create-message request before it is dispatched.
    pub async fn screen_message(
        &self,
        request: &CreateMessageRequest,
    ) -> Result<FilterResult, ModerationError> {
        self.moderate(&request.body, request.mode).await
    }

    /// Screen a create-reply request before it is dispatched. Replies don't
    /// carry a mode, so the caller passes the active one.
    pub async fn screen_reply(
        &self,
        request: &CreateReplyRequest,
        mode: Mode,
    ) -> Result<FilterResult, ModerationError> {
        debug!(parent_id = %request.parent_id, public = request.public, "Screening reply");
        self.moderate(&request.body, mode).await
    }
}

fn server_violation(verdict: ServerVerdict, mode: Mode) -> ModerationError {
    debug!(
        mode = mode.api_value(),
        violation = ?verdict.violation_type,
        "Moderation service rejected submission"
    );
    ModerationError::ServerSideViolation {
        violation_type: verdict.violation_type,
        mode,
        server_message: verdict
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_MESSAGE.to_string()),
        suggestion: verdict.suggestion.filter(|s| !s.trim().is_empty()),
    }
}

fn failure_to_error(failure: ServerFailure) -> ModerationError {
    match failure {
        ServerFailure::RateLimited { retry_after } => ModerationError::RateLimited {
            // Round up so a caller waiting the reported seconds never resubmits early
            retry_after_seconds: retry_after
                .map(|d| d.as_secs() + u64::from(d.subsec_nanos() > 0)),
        },
        ServerFailure::Unavailable { cause } | ServerFailure::Refused { cause, .. } => {
            ModerationError::ServiceError { cause: Some(cause) }
        }
    }
}
