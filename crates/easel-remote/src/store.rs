//! The painting store abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use easel_canvas::Document;

use crate::credential::Credential;
use crate::error::RemoteError;

/// Body of `POST /auth/signup` and `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful auth response. Signup may omit the token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
}

/// Remote storage for one painting per account.
#[async_trait]
pub trait PaintingStore: Send + Sync {
    /// Register an account.
    async fn signup(&self, request: &LoginRequest) -> Result<AuthResponse, RemoteError>;

    /// Log in to an existing account.
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, RemoteError>;

    /// Replace the account's saved painting.
    async fn save(&self, credential: &Credential, document: &Document) -> Result<(), RemoteError>;

    /// Fetch and validate the account's saved painting.
    async fn fetch(&self, credential: &Credential) -> Result<Document, RemoteError>;
}
