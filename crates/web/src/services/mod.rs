//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Password registration and login

pub mod auth;
