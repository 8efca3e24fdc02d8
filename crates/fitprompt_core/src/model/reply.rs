//! AI coach reply pasted back by the user.

use serde::{Deserialize, Serialize};

/// Latest coaching answer, stored verbatim after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachReply {
    pub body: String,
    /// Unix epoch milliseconds when the reply was recorded.
    pub recorded_at_ms: i64,
}

impl CoachReply {
    /// Returns `None` when `body` is blank after trimming.
    pub fn new(body: &str, recorded_at_ms: i64) -> Option<Self> {
        let body = body.trim();
        if body.is_empty() {
            return None;
        }
        Some(Self {
            body: body.to_string(),
            recorded_at_ms,
        })
    }
}
