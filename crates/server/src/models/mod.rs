//! Domain models.

pub mod feedback;
pub mod session;

pub use feedback::{Feedback, NewFeedback};
pub use session::keys as session_keys;
