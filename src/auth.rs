// Auth context for the moderation call.
//
// The app's auth layer owns the token and its refresh cycle and publishes
// the current value on a watch channel. The moderation client only reads
// whatever token is current at the moment it sends a request.

use tokio::sync::watch;

/// Anything that can hand out the current auth token.
pub trait AuthTokenSource: Send + Sync {
    /// The token to attach right now, or `None` to send the request without one.
    fn current_token(&self) -> Option<String>;
}

/// The token stream published by the auth layer.
impl AuthTokenSource for watch::Receiver<Option<String>> {
    fn current_token(&self) -> Option<String> {
        self.borrow().clone()
    }
}

/// A token fixed at construction (from configuration, or none at all).
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl From<Option<String>> for StaticToken {
    fn from(token: Option<String>) -> Self {
        Self(token.filter(|t| !t.is_empty()))
    }
}

impl AuthTokenSource for StaticToken {
    fn current_token(&self) -> Option<String> {
        self.0.clone()
    }
}
