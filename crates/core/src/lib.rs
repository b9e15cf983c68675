//! Vitrine Core - Shared types library.
//!
//! This crate provides the domain newtypes used by the catalog web
//! application and its integration tests.
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP.
//! `PostgreSQL` encoding is opt-in through the `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
