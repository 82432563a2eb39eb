//! Admin authentication service.
//!
//! The dashboard has exactly one identity, configured through
//! `ADMIN_USERNAME` / `ADMIN_PASSWORD`. Submitted values must match both
//! exactly: no trimming, no case folding, no hashing.

use secrecy::ExposeSecret;

use crate::config::AdminCredentials;

/// Result of a login attempt.
///
/// A mismatch is a normal outcome, not an error, and deliberately does not
/// say which field was wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Accepted,
    Rejected,
}

/// Admin authentication service.
pub struct AdminAuthService<'a> {
    credentials: &'a AdminCredentials,
}

impl<'a> AdminAuthService<'a> {
    /// Create a new admin authentication service.
    #[must_use]
    pub const fn new(credentials: &'a AdminCredentials) -> Self {
        Self { credentials }
    }

    /// Check submitted credentials against the configured ones.
    ///
    /// Both comparisons always run so the outcome does not depend on which
    /// field differs first.
    #[must_use]
    pub fn verify(&self, username: &str, password: &str) -> LoginOutcome {
        let username_ok = username == self.credentials.username;
        let password_ok = password == self.credentials.password.expose_secret();

        if username_ok & password_ok {
            LoginOutcome::Accepted
        } else {
            LoginOutcome::Rejected
        }
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn credentials() -> AdminCredentials {
        AdminCredentials {
            username: "admin".to_string(),
            password: SecretString::from("s3cret-Pass"),
        }
    }

    #[test]
    fn test_exact_match_is_accepted() {
        let creds = credentials();
        let service = AdminAuthService::new(&creds);
        assert_eq!(service.verify("admin", "s3cret-Pass"), LoginOutcome::Accepted);
    }

    #[test]
    fn test_either_field_wrong_is_rejected() {
        let creds = credentials();
        let service = AdminAuthService::new(&creds);
        assert_eq!(service.verify("admin", "wrong"), LoginOutcome::Rejected);
        assert_eq!(service.verify("root", "s3cret-Pass"), LoginOutcome::Rejected);
        assert_eq!(service.verify("root", "wrong"), LoginOutcome::Rejected);
    }

    #[test]
    fn test_no_normalization() {
        let creds = credentials();
        let service = AdminAuthService::new(&creds);
        assert_eq!(service.verify("Admin", "s3cret-Pass"), LoginOutcome::Rejected);
        assert_eq!(service.verify("admin ", "s3cret-Pass"), LoginOutcome::Rejected);
        assert_eq!(service.verify("admin", " s3cret-Pass"), LoginOutcome::Rejected);
        assert_eq!(service.verify("", ""), LoginOutcome::Rejected);
    }
}
