//! Bearer credential held for the lifetime of a session.

use std::fmt;

use chrono::{DateTime, Utc};

/// Opaque token proving an authenticated identity to the painting store.
#[derive(Clone)]
pub struct Credential {
    token: String,
    pub username: String,
    /// Lifetime the server reported, in milliseconds. Informational only.
    pub expires_in: Option<i64>,
    pub obtained_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(token: impl Into<String>, username: impl Into<String>, expires_in: Option<i64>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
            expires_in,
            obtained_at: Utc::now(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("username", &self.username)
            .field("expires_in", &self.expires_in)
            .field("obtained_at", &self.obtained_at)
            .finish()
    }
}
