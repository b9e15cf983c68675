//! Product API route handlers.
//!
//! Bodies are JSON with Portuguese field names. Malformed bodies are
//! rejected by the `Json` extractor before any repository call.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::instrument;

use vitrine_core::ProductId;

use crate::error::Result;
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::NewProduct;
use crate::routes::auth::LoginTemplate;
use crate::state::AppState;

/// List all products.
///
/// Anonymous clients get the login form instead of data.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Result<Response> {
    if user.is_none() {
        return Ok(LoginTemplate::default().into_response());
    }

    let products = state.products().list_all().await?;
    Ok(Json(products).into_response())
}

/// Create a product.
#[instrument(skip(state, _user, input))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(input): Json<NewProduct>,
) -> Result<impl IntoResponse> {
    let product = state.products().create(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "mensagem": "Produto adicionado com sucesso",
            "produto": product,
        })),
    ))
}

/// Overwrite every field of an existing product.
///
/// The response echoes the submitted fields, not a re-read of storage.
#[instrument(skip(state, _user, input))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<ProductId>,
    Json(input): Json<NewProduct>,
) -> Result<Response> {
    if state.products().find_by_id(id).await?.is_none() {
        return Ok(not_found());
    }

    // The row can vanish between lookup and update
    if !state.products().update(&input.clone().with_id(id)).await? {
        return Ok(not_found());
    }

    tracing::info!(product_id = %id, "Product updated");

    Ok(Json(json!({
        "mensagem": "Produto atualizado com sucesso",
        "produto": input,
    }))
    .into_response())
}

/// Delete a product. Succeeds whether or not the product existed.
#[instrument(skip(state, _user))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    let existed = state.products().delete(id).await?;
    tracing::info!(product_id = %id, existed, "Product deleted");

    Ok(Json(json!({ "mensagem": "Produto excluído com sucesso" })))
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "mensagem": "Produto não encontrado" })),
    )
        .into_response()
}
