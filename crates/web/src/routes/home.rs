//! Page route handlers: product list and edit form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use vitrine_core::ProductId;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::Product;
use crate::state::AppState;

/// Product list page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub user_email: String,
    pub products: Vec<Product>,
}

/// Edit form template.
///
/// Renders an empty form when the product does not exist.
#[derive(Template, WebTemplate)]
#[template(path = "editar_produto.html")]
pub struct EditProductTemplate {
    pub product: Option<Product>,
}

/// Display the product list page.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let products = state.products().list_all().await?;

    Ok(HomeTemplate {
        user_email: user.email,
        products,
    })
}

/// Display the edit form for a product.
#[instrument(skip(state, _user))]
pub async fn edit(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    let product = state.products().find_by_id(id).await?;

    Ok(EditProductTemplate { product })
}
