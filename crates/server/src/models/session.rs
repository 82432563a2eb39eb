//! Session-related types for admin authentication.

/// Session keys for authentication data.
pub mod keys {
    /// Key for the admin flag. Absent means "not an admin".
    pub const ADMIN: &str = "admin";
}
