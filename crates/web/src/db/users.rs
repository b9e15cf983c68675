//! User repository for database operations.

use async_trait::async_trait;
use sqlx::FromRow;

use vitrine_core::UserId;

use super::{ConnectionProvider, RepositoryError};
use crate::models::{NewUser, User};

/// Storage operations on users.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user.
    ///
    /// Emails are not required to be unique.
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError>;

    /// Get a user and their password hash by email.
    ///
    /// When several users share an email, the one registered first wins.
    async fn find_by_email(&self, email: &str)
    -> Result<Option<(User, String)>, RepositoryError>;
}

/// Row shape of the `users` table. Columns are read by name.
#[derive(FromRow)]
struct UserRow {
    id: UserId,
    name: String,
    email: String,
    password: String,
}

impl UserRow {
    fn into_parts(self) -> (User, String) {
        (
            User {
                id: self.id,
                name: self.name,
                email: self.email,
            },
            self.password,
        )
    }
}

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct UserRepository {
    provider: ConnectionProvider,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(provider: ConnectionProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut conn = self.provider.open().await?;

        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password
            ",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&mut conn)
        .await?;

        let (created, _) = row.into_parts();
        Ok(created)
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let mut conn = self.provider.open().await?;

        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, name, email, password
            FROM users
            WHERE email = $1
            ORDER BY id
            LIMIT 1
            ",
        )
        .bind(email)
        .fetch_optional(&mut conn)
        .await?;

        Ok(row.map(UserRow::into_parts))
    }
}
