//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::FeedbackConfig;
use crate::db::FeedbackRepository;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds no per-request data; sessions reach
/// handlers through the `Session` extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: FeedbackConfig,
    feedback: Arc<dyn FeedbackRepository>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: FeedbackConfig, feedback: Arc<dyn FeedbackRepository>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, feedback }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &FeedbackConfig {
        &self.inner.config
    }

    /// Get a reference to the feedback record store.
    #[must_use]
    pub fn feedback(&self) -> &dyn FeedbackRepository {
        self.inner.feedback.as_ref()
    }
}
