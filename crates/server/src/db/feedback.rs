//! `PostgreSQL` feedback repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use feedback_desk_core::{FeedbackId, Rating};

use super::{FeedbackRepository, RepositoryError};
use crate::models::{Feedback, NewFeedback};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` feedback queries.
#[derive(Debug, sqlx::FromRow)]
struct FeedbackRow {
    id: i32,
    name: String,
    email: String,
    rating: i32,
    comments: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<FeedbackRow> for Feedback {
    type Error = RepositoryError;

    fn try_from(row: FeedbackRow) -> Result<Self, Self::Error> {
        if row.id <= 0 {
            return Err(RepositoryError::DataCorruption(format!(
                "invalid feedback id in database: {}",
                row.id
            )));
        }

        Ok(Self {
            id: FeedbackId::new(row.id),
            name: row.name,
            email: row.email,
            rating: Rating::new(row.rating),
            comments: row.comments,
            created_at: row.created_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Feedback repository backed by the `feedback` table.
#[derive(Clone)]
pub struct PgFeedbackRepository {
    pool: PgPool,
}

impl PgFeedbackRepository {
    /// Create a new feedback repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackRepository for PgFeedbackRepository {
    async fn create(&self, input: NewFeedback) -> Result<Feedback, RepositoryError> {
        let row = sqlx::query_as::<_, FeedbackRow>(
            r"
            INSERT INTO feedback (name, email, rating, comments)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, rating, comments, created_at
            ",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(input.rating.value())
        .bind(&input.comments)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn list_newest_first(&self) -> Result<Vec<Feedback>, RepositoryError> {
        let rows = sqlx::query_as::<_, FeedbackRow>(
            r"
            SELECT id, name, email, rating, comments, created_at
            FROM feedback
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn delete(&self, id: FeedbackId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
