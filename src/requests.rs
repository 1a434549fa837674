// Outgoing creation requests that pass through the moderation gate.
//
// These mirror the bodies the network layer sends when creating a message
// or a reply. The gate only reads them; dispatching is the caller's job
// once screening comes back allowed.

use serde::{Deserialize, Serialize};

use crate::mode::Mode;

/// Body of a create-message request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMessageRequest {
    pub body: String,
    pub mode: Mode,
}

impl CreateMessageRequest {
    pub fn new(body: impl Into<String>, mode: Mode) -> Self {
        Self {
            body: body.into(),
            mode,
        }
    }
}

/// Body of a create-reply request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReplyRequest {
    pub body: String,
    pub public: bool,
    pub parent_id: String,
}

impl CreateReplyRequest {
    pub fn new(body: impl Into<String>, public: bool, parent_id: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            public,
            parent_id: parent_id.into(),
        }
    }
}
