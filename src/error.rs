//! Error types shared by the App and Network layers.

use thiserror::Error;

/// Every failure the guest book can report.
///
/// Variants carry rendered messages rather than source errors so that the
/// type stays `Clone` and can travel inside actor messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuestbookError {
    /// Provider unreachable, HTTP failure or RPC-level error
    #[error("Transport error: {0}")]
    Transport(String),

    /// Payload was not UTF-8 / JSON of the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Signer or network refused the transaction
    #[error("Submission rejected: {0}")]
    SubmissionRejected(String),

    /// Message was recorded but the list could not be reloaded
    #[error("Refresh failed: {0}")]
    RefreshFailed(String),

    /// Session could not be terminated
    #[error("Sign out failed: {0}")]
    SignOutFailed(String),

    /// Donation is not a valid NEAR amount
    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    /// Not a syntactically valid NEAR account id
    #[error("Invalid account id '{0}'")]
    InvalidAccountId(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GuestbookError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::SubmissionRejected(message.into())
    }
}

impl From<reqwest::Error> for GuestbookError {
    fn from(e: reqwest::Error) -> Self {
        let msg = if e.is_timeout() {
            "Request timed out (30s)".to_string()
        } else if e.is_connect() {
            format!("Connection failed: {}", e)
        } else {
            format!("Request failed: {}", e)
        };
        GuestbookError::Transport(msg)
    }
}

impl From<serde_json::Error> for GuestbookError {
    fn from(e: serde_json::Error) -> Self {
        GuestbookError::Decode(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GuestbookError>;
