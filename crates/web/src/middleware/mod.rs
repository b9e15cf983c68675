//! HTTP middleware stack.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, binary only)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with a bounded in-memory store, signed cookie)

pub mod auth;
pub mod session;
pub mod session_store;

pub use auth::{OptionalAuth, RequireAuth, clear_current_user, set_current_user};
pub use session::{SESSION_COOKIE_NAME, with_session_layer};
pub use session_store::CacheSessionStore;
