//! Feedback record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use feedback_desk_core::{FeedbackId, Rating};

/// A stored feedback record.
///
/// Records are never updated after creation; the only mutation is deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Store-assigned identifier.
    pub id: FeedbackId,
    pub name: String,
    pub email: String,
    pub rating: Rating,
    pub comments: String,
    /// Assigned by the store at creation; listing sorts on it, newest first.
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating a feedback record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewFeedback {
    pub name: String,
    pub email: String,
    pub rating: Rating,
    pub comments: String,
}
