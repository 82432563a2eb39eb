//! Record store for feedback.
//!
//! # Tables
//!
//! - `feedback` - Submitted feedback records
//! - `tower_sessions.session` - Session storage (managed by `tower-sessions-sqlx-store`)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p feedback-desk-cli -- migrate
//! ```
//!
//! Handlers only see the [`FeedbackRepository`] trait. Production wires in
//! [`PgFeedbackRepository`]; tests use [`MemoryFeedbackRepository`].

pub mod feedback;
pub mod memory;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use feedback_desk_core::FeedbackId;

use crate::models::{Feedback, NewFeedback};

pub use feedback::PgFeedbackRepository;
pub use memory::MemoryFeedbackRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The store refused the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence operations for feedback records.
///
/// Every method is a single atomic store call; callers never see a partial
/// write.
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Persist a new record, assigning its identifier and creation time.
    async fn create(&self, input: NewFeedback) -> Result<Feedback, RepositoryError>;

    /// Return every record, newest first.
    async fn list_newest_first(&self) -> Result<Vec<Feedback>, RepositoryError>;

    /// Delete a record by identifier.
    ///
    /// Returns whether a record was removed. Callers treat both outcomes as
    /// success.
    async fn delete(&self, id: FeedbackId) -> Result<bool, RepositoryError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
