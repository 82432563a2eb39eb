//! Feedback record commands.

use feedback_desk_core::FeedbackId;
use feedback_desk_server::db::{FeedbackRepository, PgFeedbackRepository};

use super::{CommandError, connect};

/// Print every record, newest first.
#[allow(clippy::print_stdout)]
pub async fn list() -> Result<(), CommandError> {
    let repo = PgFeedbackRepository::new(connect().await?);
    let records = repo.list_newest_first().await?;

    for record in &records {
        println!(
            "{:>6}  {}  {:<24} {:<32} {:>3}  {}",
            record.id,
            record.created_at.format("%Y-%m-%d %H:%M"),
            record.name,
            record.email,
            record.rating,
            record.comments.replace('\n', " ")
        );
    }
    tracing::info!("{} feedback record(s)", records.len());
    Ok(())
}

/// Delete one record. A missing id is reported but is not a failure.
pub async fn delete(id: FeedbackId) -> Result<(), CommandError> {
    let repo = PgFeedbackRepository::new(connect().await?);

    if repo.delete(id).await? {
        tracing::info!(feedback_id = %id, "Feedback deleted");
    } else {
        tracing::warn!(feedback_id = %id, "No feedback with that id");
    }
    Ok(())
}
