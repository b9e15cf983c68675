//! User domain types.
//!
//! These types represent validated domain objects separate from database row types.

use vitrine_core::UserId;

/// A registered user.
///
/// The password hash is deliberately not part of this type; it only travels
/// between the user store and the auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name given at registration.
    pub name: String,
    /// Email address used as the login key.
    pub email: String,
}

/// A user about to be inserted, with an already-hashed password.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
}
