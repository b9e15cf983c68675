//! HTTP route handlers for the catalog.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health               - Liveness check
//! GET    /health/ready         - Readiness check (database)
//!
//! # Product API (JSON, requires auth)
//! GET    /produtos             - Product list (login form when anonymous)
//! POST   /produtos             - Create product
//! PUT    /produtos/{id}        - Overwrite product
//! DELETE /produtos/{id}        - Delete product
//!
//! # Pages (requires auth)
//! GET    /                     - Product list page
//! GET    /editar/{id}          - Edit form
//!
//! # Auth
//! GET    /register             - Register page
//! POST   /register             - Register action
//! GET    /login                - Login page
//! POST   /login                - Login action
//! POST   /logout               - Logout action
//! ```

pub mod auth;
pub mod health;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::middleware::with_session_layer;
use crate::state::AppState;

/// Create the product API router.
///
/// Not nested: `RequireAuth` reads the unstripped request path.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/produtos", get(products::index).post(products::create))
        .route(
            "/produtos/{id}",
            put(products::update).delete(products::delete),
        )
}

/// Create the page and auth routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/editar/{id}", get(home::edit))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .merge(product_routes())
}

/// Build the complete application router with state and session handling.
///
/// Sentry layers are added by the binary so tests can drive this router
/// directly.
pub fn app(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    with_session_layer(router, state.config())
}
