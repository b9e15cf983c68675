//! Domain models for the catalog.

pub mod product;
pub mod session;
pub mod user;

pub use product::{NewProduct, Product};
pub use session::{CurrentUser, keys as session_keys};
pub use user::{NewUser, User};
