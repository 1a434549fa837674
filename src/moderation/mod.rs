// Server-side moderation — trait-based abstraction over the remote authority.
//
// The ModerationClient trait is the seam the orchestrator talks to.
// HttpModerationClient implements it over reqwest; tests swap in fakes.
// The retry driver wraps any client with timeouts and backoff.

pub mod http;
pub mod retry;
pub mod traits;
