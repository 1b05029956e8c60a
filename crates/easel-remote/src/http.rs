//! HTTP implementation of [`PaintingStore`].
//!
//! Endpoints, relative to the configured base URL:
//! - `POST /auth/signup`, `POST /auth/login`: `{username, password}` → `{token?, expiresIn?}`
//! - `POST /painting` (bearer): body is the document
//! - `GET /painting` (bearer): the saved document, or 404

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, info};

use easel_canvas::{Document, file};
use easel_core::config::Config;

use crate::credential::Credential;
use crate::error::RemoteError;
use crate::store::{AuthResponse, LoginRequest, PaintingStore};

const AUTH_FALLBACK: &str = "Something went wrong";
const PAINTING_FALLBACK: &str = "Unknown error";

pub const AUTH_PREFIX: &str = "Error";
pub const SAVE_PREFIX: &str = "Error saving painting";
pub const RESTORE_PREFIX: &str = "Error restoring painting";

/// Longest plain-text error body shown to the user as-is.
const MAX_TEXT_MESSAGE: usize = 200;

pub struct HttpStore {
    pub base_url: String,
    client: reqwest::Client,
}

impl HttpStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, RemoteError> {
        Self::new(&config.base_url(), config.timeout())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn post_auth(&self, path: &str, request: &LoginRequest) -> Result<AuthResponse, RemoteError> {
        debug!(url = %self.url(path), username = %request.username, "Auth request");

        let response = self.client.post(self.url(path)).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(server_error(AUTH_PREFIX, status, &body, AUTH_FALLBACK));
        }
        if body.trim().is_empty() {
            return Ok(AuthResponse::default());
        }
        serde_json::from_str(&body).map_err(|e| RemoteError::InvalidPayload(e.to_string()))
    }
}

/// Build a server error, preferring the `message` the server sent.
fn server_error(prefix: &'static str, status: StatusCode, body: &str, fallback: &str) -> RemoteError {
    RemoteError::Server {
        prefix,
        status: status.as_u16(),
        message: extract_message(body).unwrap_or_else(|| fallback.to_string()),
    }
}

fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => value
            .get("message")
            .and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
            .map(str::to_string),
        // Plain-text bodies such as "Unauthorized"; skip HTML error pages.
        Err(_) if !trimmed.starts_with('<') && trimmed.len() <= MAX_TEXT_MESSAGE => {
            Some(trimmed.to_string())
        }
        Err(_) => None,
    }
}

#[async_trait]
impl PaintingStore for HttpStore {
    async fn signup(&self, request: &LoginRequest) -> Result<AuthResponse, RemoteError> {
        self.post_auth("/auth/signup", request).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, RemoteError> {
        self.post_auth("/auth/login", request).await
    }

    async fn save(&self, credential: &Credential, document: &Document) -> Result<(), RemoteError> {
        let response = self
            .client
            .post(self.url("/painting"))
            .header("authorization", credential.bearer())
            .json(document)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(server_error(SAVE_PREFIX, status, &body, PAINTING_FALLBACK));
        }

        info!(title = %document.title, shapes = document.shapes.len(), "Saved painting");
        Ok(())
    }

    async fn fetch(&self, credential: &Credential) -> Result<Document, RemoteError> {
        let response = self
            .client
            .get(self.url("/painting"))
            .header("authorization", credential.bearer())
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(RemoteError::NotFound);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(server_error(RESTORE_PREFIX, status, &body, PAINTING_FALLBACK));
        }

        let body = response.text().await?;
        let document =
            file::decode(&body).map_err(|e| RemoteError::InvalidPayload(e.to_string()))?;
        info!(title = %document.title, shapes = document.shapes.len(), "Fetched painting");
        Ok(document)
    }
}
