//! In-memory feedback repository.
//!
//! Used by tests and local experiments. Ordering matches the `PostgreSQL`
//! repository: `created_at` descending, ties broken by identifier.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use feedback_desk_core::FeedbackId;

use super::{FeedbackRepository, RepositoryError};
use crate::models::{Feedback, NewFeedback};

/// Feedback repository held in process memory.
#[derive(Debug, Default)]
pub struct MemoryFeedbackRepository {
    records: RwLock<Vec<Feedback>>,
    next_id: AtomicI32,
    unavailable: AtomicBool,
}

impl MemoryFeedbackRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail, simulating a store outage.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable(
                "memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl FeedbackRepository for MemoryFeedbackRepository {
    async fn create(&self, input: NewFeedback) -> Result<Feedback, RepositoryError> {
        self.check_available()?;

        let previous = self
            .next_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
            .map_err(|_| RepositoryError::Unavailable("feedback ids exhausted".to_string()))?;
        let id = previous + 1;
        let feedback = Feedback {
            id: FeedbackId::new(id),
            name: input.name,
            email: input.email,
            rating: input.rating,
            comments: input.comments,
            created_at: Utc::now(),
        };

        self.records.write().await.push(feedback.clone());
        Ok(feedback)
    }

    async fn list_newest_first(&self) -> Result<Vec<Feedback>, RepositoryError> {
        self.check_available()?;

        let mut records = self.records.read().await.clone();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(records)
    }

    async fn delete(&self, id: FeedbackId) -> Result<bool, RepositoryError> {
        self.check_available()?;

        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|record| record.id != id);
        Ok(records.len() != before)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.check_available()
    }
}
