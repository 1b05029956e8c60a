//! Painting store client.
//!
//! The remote store is an external HTTP service offering signup/login (which
//! hand out bearer tokens) and a single saved painting per account. The
//! [`PaintingStore`] trait abstracts it; [`HttpStore`] talks to the real
//! service. [`AppSession`] ties a canvas session to the held credential.

pub mod credential;
pub mod error;
pub mod http;
pub mod session;
pub mod store;

pub use credential::Credential;
pub use error::RemoteError;
pub use http::HttpStore;
pub use session::{AppSession, AuthOutcome};
pub use store::{AuthResponse, LoginRequest, PaintingStore};
