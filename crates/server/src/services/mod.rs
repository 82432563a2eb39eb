//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Static admin credential check

pub mod auth;

pub use auth::{AdminAuthService, LoginOutcome};
