//! Product domain types.
//!
//! Field names are English in Rust and Portuguese on the wire (`nome`,
//! `descricao`, `preco`), matching the `produto` table columns.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use vitrine_core::{Price, ProductId};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Product {
    /// Storage-assigned identifier, immutable once assigned.
    pub id: ProductId,
    #[serde(rename = "nome")]
    #[sqlx(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    #[sqlx(rename = "descricao")]
    pub description: String,
    #[serde(rename = "preco")]
    #[sqlx(rename = "preco")]
    pub price: Price,
}

/// Product fields supplied by a client, without an identifier.
///
/// Used both for creation and as the full replacement on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "preco")]
    pub price: Price,
}

impl NewProduct {
    /// Attach an identifier, producing the full record.
    #[must_use]
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
        }
    }
}
