//! Integration tests for Vitrine.
//!
//! These tests need live infrastructure and are `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! # Apply the schema to a scratch database
//! psql -f crates/web/sql/schema.sql
//!
//! # Repository tests (reads DATABASE_* like the server does)
//! cargo test -p vitrine-integration-tests --test repository -- --ignored
//!
//! # HTTP tests against a running server
//! VITRINE_TEST_URL=http://127.0.0.1:5000 \
//!     cargo test -p vitrine-integration-tests --test http_flow -- --ignored
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

/// Base URL of the server under test.
#[must_use]
pub fn server_url() -> String {
    std::env::var("VITRINE_TEST_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string())
}

/// A value unique to this test run, for emails and product names.
#[must_use]
pub fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{prefix}-{nanos}")
}
