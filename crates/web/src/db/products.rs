//! Product repository for database operations.
//!
//! Every statement binds its values as parameters; nothing supplied by a
//! client is ever formatted into SQL text.

use async_trait::async_trait;

use vitrine_core::ProductId;

use super::{ConnectionProvider, RepositoryError};
use crate::models::{NewProduct, Product};

/// Storage operations on products.
///
/// Handlers depend on this trait so the HTTP layer can be exercised without a
/// database.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Get every product. Order is whatever the storage returns.
    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError>;

    /// Get a product by its ID.
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Insert a product and return it with its storage-assigned ID.
    async fn create(&self, product: NewProduct) -> Result<Product, RepositoryError>;

    /// Overwrite all fields of the product with `product.id`.
    ///
    /// Returns `false` if no row has that ID.
    async fn update(&self, product: &Product) -> Result<bool, RepositoryError>;

    /// Delete a product by ID.
    ///
    /// Returns `false` if no row had that ID; that is not an error.
    async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError>;

    /// Verify the backing storage is reachable.
    async fn check_connection(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

/// `PostgreSQL`-backed product repository.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    provider: ConnectionProvider,
}

impl ProductRepository {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(provider: ConnectionProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let mut conn = self.provider.open().await?;

        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT id, nome, descricao, preco
            FROM produto
            ",
        )
        .fetch_all(&mut conn)
        .await?;

        Ok(products)
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let mut conn = self.provider.open().await?;

        let product = sqlx::query_as::<_, Product>(
            r"
            SELECT id, nome, descricao, preco
            FROM produto
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&mut conn)
        .await?;

        Ok(product)
    }

    async fn create(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let mut conn = self.provider.open().await?;

        let created = sqlx::query_as::<_, Product>(
            r"
            INSERT INTO produto (nome, descricao, preco)
            VALUES ($1, $2, $3)
            RETURNING id, nome, descricao, preco
            ",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .fetch_one(&mut conn)
        .await?;

        tracing::info!(product_id = %created.id, "Product created");
        Ok(created)
    }

    async fn update(&self, product: &Product) -> Result<bool, RepositoryError> {
        let mut conn = self.provider.open().await?;

        let result = sqlx::query(
            r"
            UPDATE produto
            SET nome = $1, descricao = $2, preco = $3
            WHERE id = $4
            ",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.id)
        .execute(&mut conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let mut conn = self.provider.open().await?;

        let result = sqlx::query(
            r"
            DELETE FROM produto
            WHERE id = $1
            ",
        )
        .bind(id)
        .execute(&mut conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn check_connection(&self) -> Result<(), RepositoryError> {
        self.provider.ping().await
    }
}
