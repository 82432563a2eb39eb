//! Core types for Feedback Desk.
//!
//! This module provides type-safe wrappers for the feedback domain.

pub mod id;
pub mod rating;

pub use id::*;
pub use rating::{Rating, RatingError};
