//! Authentication middleware and extractors.
//!
//! The gate is a single boolean in the session. A client is authenticated
//! exactly when `logged_in` is `true`; nothing else is consulted.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;
use tower_sessions::Session;

use crate::models::{CurrentUser, session_keys};

/// Path prefix of the JSON product API.
const API_PREFIX: &str = "/produtos";

/// Extractor that requires a logged-in session.
///
/// Rejects JSON API requests with 401 and everything else with a redirect
/// to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Error returned when authentication is required but the client is not logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "erro": "Autenticação necessária" })),
            )
                .into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let is_api = parts.uri.path().starts_with(API_PREFIX);
        let rejection = if is_api {
            AuthRejection::Unauthorized
        } else {
            AuthRejection::RedirectToLogin
        };

        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        current_user(session).await.map(Self).ok_or(rejection)
    }
}

/// Extractor that optionally gets the logged-in user.
///
/// Unlike `RequireAuth`, this does not reject the request if the client is not logged in.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => current_user(session).await,
            None => None,
        };

        Ok(Self(user))
    }
}

/// Read the logged-in user from a session, if the flag is set.
async fn current_user(session: &Session) -> Option<CurrentUser> {
    let logged_in = session
        .get::<bool>(session_keys::LOGGED_IN)
        .await
        .ok()
        .flatten()
        .unwrap_or(false);

    if !logged_in {
        return None;
    }

    let email = session
        .get::<String>(session_keys::USER_EMAIL)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();

    Some(CurrentUser { email })
}

/// Helper to mark the session as logged in.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::LOGGED_IN, true).await?;
    session.insert(session_keys::USER_EMAIL, &user.email).await
}

/// Helper to clear the session entirely (logout).
///
/// # Errors
///
/// Returns an error if the session store cannot be updated.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
