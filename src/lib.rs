// Shinegate: two-stage content moderation for outgoing messages and replies.
//
// This is the library root. The local filter lives in `filter`, the remote
// check in `moderation`, and `service` composes the two into one decision
// per submission.

pub mod auth;
pub mod config;
pub mod error;
pub mod filter;
pub mod mode;
pub mod moderation;
pub mod output;
pub mod requests;
pub mod service;

pub use error::ModerationError;
pub use filter::result::FilterResult;
pub use filter::violation::ViolationType;
pub use mode::Mode;
pub use service::ContentFilterService;
