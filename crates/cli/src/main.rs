//! Feedback Desk CLI - Database migrations and record management.
//!
//! # Usage
//!
//! ```bash
//! # Create the feedback table and the session table
//! fd-cli migrate
//!
//! # Print every feedback record, newest first
//! fd-cli feedback list
//!
//! # Delete one record
//! fd-cli feedback delete 42
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use feedback_desk_core::FeedbackId;

mod commands;

#[derive(Parser)]
#[command(name = "fd-cli")]
#[command(author, version, about = "Feedback Desk CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations (feedback records and sessions)
    Migrate,
    /// Inspect or remove feedback records
    Feedback {
        #[command(subcommand)]
        action: FeedbackAction,
    },
}

#[derive(Subcommand)]
enum FeedbackAction {
    /// List all feedback, newest first
    List,
    /// Delete a feedback record by id
    Delete {
        /// Feedback record id
        id: FeedbackId,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Feedback { action } => match action {
            FeedbackAction::List => commands::feedback::list().await?,
            FeedbackAction::Delete { id } => commands::feedback::delete(id).await?,
        },
    }
    Ok(())
}
