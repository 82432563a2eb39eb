//! Session middleware configuration.
//!
//! Sessions live in a tower-sessions store (`PostgreSQL` in production,
//! `MemoryStore` in tests). The cookie only carries the session id and is
//! signed with a key derived from `SESSION_SECRET`.

use secrecy::ExposeSecret;
use sha2::{Digest, Sha512};
use tower_sessions::cookie::Key;
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

use crate::config::FeedbackConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "fd_session";

/// Session expiry time in seconds (24 hours of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Derive the 64-byte cookie signing key from the configured secret.
#[must_use]
pub fn signing_key(config: &FeedbackConfig) -> Key {
    let digest = Sha512::digest(config.session_secret.expose_secret().as_bytes());
    Key::from(digest.as_slice())
}

/// Create the session layer over the given store.
///
/// # Arguments
///
/// * `store` - Session store (e.g. `PostgresStore`, `MemoryStore`)
/// * `config` - Server configuration (signing secret, HTTPS mode)
#[must_use]
pub fn create_session_layer<S>(store: S, config: &FeedbackConfig) -> SessionManagerLayer<S, SignedCookie>
where
    S: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(signing_key(config))
}
