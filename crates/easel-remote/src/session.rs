//! Application session: the canvas plus the held bearer credential.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use easel_canvas::{CanvasSession, ImportError, file};

use crate::credential::Credential;
use crate::error::RemoteError;
use crate::store::{LoginRequest, PaintingStore};

/// Result of a successful signup or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    LoggedIn { username: String },
    SignedUp { username: String },
    /// Signup succeeded but returned no token; the user must log in.
    SignupPendingLogin,
}

impl AuthOutcome {
    pub fn message(&self) -> String {
        match self {
            AuthOutcome::LoggedIn { username } => format!("Successfully logged in as {username}"),
            AuthOutcome::SignedUp { username } => {
                format!("Successfully signed up and logged in as {username}")
            }
            AuthOutcome::SignupPendingLogin => {
                "Sign up successful! Please log in to continue.".to_string()
            }
        }
    }
}

pub const SAVED_MESSAGE: &str = "Your painting has been saved successfully.";
pub const RESTORED_MESSAGE: &str = "Your painting has been restored successfully.";
pub const LOGGED_OUT_MESSAGE: &str = "You have been logged out.";

/// Everything one user session owns. Handlers receive it explicitly.
pub struct AppSession {
    pub canvas: CanvasSession,
    credential: Option<Credential>,
    store: Arc<dyn PaintingStore>,
}

impl AppSession {
    pub fn new(canvas: CanvasSession, store: Arc<dyn PaintingStore>) -> Self {
        Self {
            canvas,
            credential: None,
            store,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.credential.is_some()
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub async fn signup(&mut self, username: &str, password: &str) -> Result<AuthOutcome, RemoteError> {
        let request = login_request(username, password)?;
        let response = self.store.signup(&request).await?;
        match response.token {
            Some(token) if !token.is_empty() => {
                self.credential = Some(Credential::new(token, username, response.expires_in));
                info!(username, "Signed up and logged in");
                Ok(AuthOutcome::SignedUp {
                    username: username.to_string(),
                })
            }
            _ => {
                info!(username, "Signed up without token");
                Ok(AuthOutcome::SignupPendingLogin)
            }
        }
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<AuthOutcome, RemoteError> {
        let request = login_request(username, password)?;
        let response = self.store.login(&request).await?;
        let token = response
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| RemoteError::InvalidPayload("login response carried no token".into()))?;
        self.credential = Some(Credential::new(token, username, response.expires_in));
        info!(username, "Logged in");
        Ok(AuthOutcome::LoggedIn {
            username: username.to_string(),
        })
    }

    /// Drop the credential. Local only; returns whether one was held.
    pub fn logout(&mut self) -> bool {
        let was = self.credential.take().is_some();
        if was {
            info!("Logged out");
        }
        was
    }

    /// Overwrite the remote copy with the current document.
    pub async fn save(&self) -> Result<(), RemoteError> {
        let credential = self.credential.as_ref().ok_or_else(|| {
            warn!("Save attempted without credential");
            RemoteError::NotAuthenticated {
                action: "save your painting",
            }
        })?;
        self.store.save(credential, &self.canvas.document).await
    }

    /// Replace the current document with the remote copy.
    pub async fn restore(&mut self) -> Result<(), RemoteError> {
        let credential = self.credential.as_ref().ok_or_else(|| {
            warn!("Restore attempted without credential");
            RemoteError::NotAuthenticated {
                action: "restore a painting",
            }
        })?;
        let document = self.store.fetch(credential).await?;
        self.canvas.replace_document(document);
        Ok(())
    }

    /// Replace the current document with a painting file.
    pub async fn import_file(&mut self, path: &Path) -> Result<(), ImportError> {
        let document = file::import_file(path).await?;
        self.canvas.replace_document(document);
        Ok(())
    }

    /// Write the current document into `dir`. Returns the written path.
    pub async fn export_to_dir(&self, dir: &Path) -> std::io::Result<PathBuf> {
        file::export_to_dir(&self.canvas.document, dir).await
    }
}

fn login_request(username: &str, password: &str) -> Result<LoginRequest, RemoteError> {
    if username.is_empty() || password.is_empty() {
        return Err(RemoteError::MissingFields);
    }
    Ok(LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use easel_canvas::{Document, Point};
    use easel_core::error::{Categorized, ErrorCategory};

    use super::*;
    use crate::store::AuthResponse;

    /// In-memory store that records how often it was called.
    #[derive(Default)]
    struct MemoryStore {
        calls: AtomicUsize,
        saved: Mutex<Option<Document>>,
        signup_token: Option<String>,
    }

    #[async_trait]
    impl PaintingStore for MemoryStore {
        async fn signup(&self, _request: &LoginRequest) -> Result<AuthResponse, RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(AuthResponse {
                token: self.signup_token.clone(),
                expires_in: None,
            })
        }

        async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if request.password != "pw" {
                return Err(RemoteError::Server {
                    prefix: "Error",
                    status: 401,
                    message: "Bad credentials".into(),
                });
            }
            Ok(AuthResponse {
                token: Some(format!("token-{}", request.username)),
                expires_in: Some(3_600_000),
            })
        }

        async fn save(&self, _credential: &Credential, document: &Document) -> Result<(), RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.saved.lock().unwrap() = Some(document.clone());
            Ok(())
        }

        async fn fetch(&self, _credential: &Credential) -> Result<Document, RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.saved.lock().unwrap().clone().ok_or(RemoteError::NotFound)
        }
    }

    fn session_with(store: Arc<MemoryStore>) -> AppSession {
        AppSession::new(CanvasSession::default(), store)
    }

    #[tokio::test]
    async fn test_save_without_credential_makes_no_call() {
        let store = Arc::new(MemoryStore::default());
        let session = session_with(store.clone());

        let err = session.save().await.unwrap_err();
        assert!(matches!(err, RemoteError::NotAuthenticated { .. }));
        assert_eq!(err.category(), ErrorCategory::MissingInput);
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_restore_without_credential_makes_no_call() {
        let store = Arc::new(MemoryStore::default());
        let mut session = session_with(store.clone());
        assert!(session.restore().await.is_err());
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_fields_rejected_locally() {
        let store = Arc::new(MemoryStore::default());
        let mut session = session_with(store.clone());
        assert!(matches!(
            session.login("", "pw").await,
            Err(RemoteError::MissingFields)
        ));
        assert!(matches!(
            session.signup("ada", "").await,
            Err(RemoteError::MissingFields)
        ));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_login_save_restore_round_trip() {
        let store = Arc::new(MemoryStore::default());
        let mut session = session_with(store.clone());

        let outcome = session.login("ada", "pw").await.unwrap();
        assert_eq!(outcome.message(), "Successfully logged in as ada");
        assert_eq!(session.credential().unwrap().token(), "token-ada");

        session.canvas.set_title("Saved");
        session.canvas.click(Point::new(3.0, 4.0));
        let saved = session.canvas.document.clone();
        session.save().await.unwrap();

        session.canvas.replace_document(Document::default());
        session.restore().await.unwrap();
        assert_eq!(session.canvas.document, saved);
    }

    #[tokio::test]
    async fn test_failed_login_holds_no_credential() {
        let store = Arc::new(MemoryStore::default());
        let mut session = session_with(store);
        let err = session.login("ada", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "Error: Bad credentials");
        assert!(!session.is_logged_in());
    }

    #[tokio::test]
    async fn test_signup_without_token_requires_login() {
        let store = Arc::new(MemoryStore::default());
        let mut session = session_with(store);
        let outcome = session.signup("ada", "pw").await.unwrap();
        assert_eq!(outcome, AuthOutcome::SignupPendingLogin);
        assert!(!session.is_logged_in());
    }

    #[tokio::test]
    async fn test_signup_with_token_logs_in() {
        let store = Arc::new(MemoryStore {
            signup_token: Some("fresh".into()),
            ..MemoryStore::default()
        });
        let mut session = session_with(store);
        let outcome = session.signup("ada", "pw").await.unwrap();
        assert!(matches!(outcome, AuthOutcome::SignedUp { .. }));
        assert!(session.is_logged_in());
    }

    #[tokio::test]
    async fn test_logout_is_local() {
        let store = Arc::new(MemoryStore::default());
        let mut session = session_with(store.clone());
        session.login("ada", "pw").await.unwrap();
        let before = store.calls.load(Ordering::SeqCst);

        assert!(session.logout());
        assert!(!session.is_logged_in());
        assert!(!session.logout());
        assert_eq!(store.calls.load(Ordering::SeqCst), before);
    }

    #[tokio::test]
    async fn test_restore_not_found_keeps_document() {
        let store = Arc::new(MemoryStore::default());
        let mut session = session_with(store);
        session.login("ada", "pw").await.unwrap();
        session.canvas.click(Point::new(1.0, 1.0));

        let err = session.restore().await.unwrap_err();
        assert!(matches!(err, RemoteError::NotFound));
        assert_eq!(session.canvas.document.len(), 1);
    }

    #[tokio::test]
    async fn test_import_failure_keeps_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"title": "x"}"#).unwrap();

        let store = Arc::new(MemoryStore::default());
        let mut session = session_with(store);
        session.canvas.click(Point::new(1.0, 1.0));
        let before = session.canvas.document.clone();

        assert!(matches!(
            session.import_file(&path).await,
            Err(ImportError::Invalid(_))
        ));
        assert_eq!(session.canvas.document, before);
    }

    #[tokio::test]
    async fn test_export_then_import() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::default());
        let mut session = session_with(store);
        session.canvas.set_title("Round Trip");
        session.canvas.click(Point::new(7.0, 8.0));
        let before = session.canvas.document.clone();

        let path = session.export_to_dir(dir.path()).await.unwrap();
        session.canvas.replace_document(Document::default());
        session.import_file(&path).await.unwrap();
        assert_eq!(session.canvas.document, before);
    }
}
