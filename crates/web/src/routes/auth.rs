//! Authentication route handlers.
//!
//! Handles registration, login and logout with local email/password
//! accounts. Authentication state is the session's `logged_in` flag.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Credenciais inválidas";
const MISSING_FIELDS: &str = "Preencha todos os campos";

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Default, Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Register page template.
#[derive(Default, Template, WebTemplate)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate::default()
}

/// Handle registration form submission.
///
/// No uniqueness check is made on the email.
#[instrument(skip(state, form))]
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    if is_blank(&form.name) || is_blank(&form.email) || form.password.is_empty() {
        let page = RegisterTemplate {
            error: Some(MISSING_FIELDS.to_string()),
        };
        return Ok((StatusCode::BAD_REQUEST, page).into_response());
    }

    let user = AuthService::new(state.users())
        .register(form.name.trim(), form.email.trim(), &form.password)
        .await?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok(Redirect::to("/login").into_response())
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate::default()
}

/// Handle login form submission.
///
/// Wrong password and unknown email are indistinguishable to the client.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    if is_blank(&form.email) || form.password.is_empty() {
        let page = LoginTemplate {
            error: Some(MISSING_FIELDS.to_string()),
        };
        return Ok((StatusCode::BAD_REQUEST, page).into_response());
    }

    let email = form.email.trim();

    match AuthService::new(state.users()).login(email, &form.password).await {
        Ok(user) => {
            set_current_user(
                &session,
                &CurrentUser {
                    email: user.email.clone(),
                },
            )
            .await?;
            set_sentry_user(&user.email);

            tracing::info!(user_id = %user.id, "User logged in");
            Ok(Redirect::to("/").into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::info!("Login rejected");
            let page = LoginTemplate {
                error: Some(INVALID_CREDENTIALS.to_string()),
            };
            Ok((StatusCode::UNAUTHORIZED, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Handle logout.
///
/// Clears the whole session and shows the login form.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<impl IntoResponse> {
    clear_current_user(&session).await?;
    clear_sentry_user();

    Ok(LoginTemplate::default())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
