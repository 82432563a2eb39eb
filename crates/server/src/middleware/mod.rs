//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers
//! 5. Session layer (tower-sessions, signed cookie)
//! 6. Access guard (`RequireAdmin` on admin pages, `RequireAdminAction` on
//!    script-driven admin actions)

pub mod auth;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{AccessDecision, RequireAdmin, RequireAdminAction, destroy_session, grant_admin};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
