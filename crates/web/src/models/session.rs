//! Session-related types.
//!
//! The session holds exactly two values: a logged-in flag and the email the
//! client authenticated with.

use serde::{Deserialize, Serialize};

/// Session-stored identity of the logged-in client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Email the client logged in with.
    pub email: String,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for the boolean logged-in flag.
    pub const LOGGED_IN: &str = "logged_in";

    /// Key for the authenticated email.
    pub const USER_EMAIL: &str = "user_email";
}
