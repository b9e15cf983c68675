//! Session middleware configuration.
//!
//! Sessions live in a bounded in-memory server-side store; the cookie only
//! carries the session ID, signed with a key derived from `SECRET_KEY`.

use axum::Router;
use secrecy::ExposeSecret;
use sha2::{Digest, Sha512};
use tower_sessions::cookie::Key;
use tower_sessions::{Expiry, SessionManagerLayer};

use super::session_store::CacheSessionStore;
use crate::config::AppConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "vitrine_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Wrap a router in the session layer backed by a [`CacheSessionStore`].
///
/// # Arguments
///
/// * `router` - Router whose handlers extract `Session`
/// * `config` - Application configuration (for the signing secret and cookie security)
#[must_use]
pub fn with_session_layer(router: Router, config: &AppConfig) -> Router {
    let store = CacheSessionStore::default();

    let layer = SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.secure_cookies())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(signing_key(config.secret_key.expose_secret()));

    router.layer(layer)
}

/// Derive the 64-byte cookie signing key from the configured secret.
fn signing_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}
