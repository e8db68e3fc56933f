//! Error types for login, logout and API operations

use compliance_traits::{ExchangeRejected, StoreError};
use thiserror::Error;

/// Insufficient or conflicting credential options. Never persists anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("missing {0}")]
    Missing(&'static str),

    #[error("{0}")]
    Conflict(&'static str),
}

#[derive(Debug, Error)]
pub enum LoginError {
    #[error(transparent)]
    Input(#[from] InputError),

    /// The remote service refused the credential; message is verbatim.
    #[error(transparent)]
    ExchangeRejected(#[from] ExchangeRejected),

    #[error("failed to store session: {0}")]
    Persistence(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum LogoutError {
    #[error("failed to remove session: {0}")]
    Persistence(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session has no {0}")]
    MissingCredential(&'static str),

    #[error("token refresh failed: {0}")]
    TokenRefresh(String),

    #[error("invalid profile archive: {0}")]
    InvalidArchive(String),

    #[error("server rejected request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },
}
