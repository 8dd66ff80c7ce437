//! Network messages - communication between App and Network layers

use crate::error::GuestbookError;
use crate::models::{Account, Message, SubmissionDraft};
use crate::network::guestbook::Submitted;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Load the message list
    FetchMessages { id: u64 },
    /// Query the state of a selected account
    ViewAccount { id: u64, account_id: String },
    /// Sign and send `addMessage`, then reload the list
    SubmitMessage {
        id: u64,
        signer_id: String,
        draft: SubmissionDraft,
    },
    /// End the wallet session
    SignOut,
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// Message list loaded
    Messages { id: u64, messages: Vec<Message> },
    /// Message list could not be loaded
    MessagesFailed { id: u64, error: GuestbookError },
    /// Account state resolved
    Account { id: u64, account: Account },
    /// Account query failed
    AccountFailed {
        id: u64,
        account_id: String,
        error: GuestbookError,
    },
    /// Transaction accepted; carries the follow-up reload
    Submitted { id: u64, submitted: Submitted },
    /// Transaction was not sent or was rejected
    SubmissionFailed { id: u64, error: GuestbookError },
    /// Sign-out did not go through
    SignOutFailed { error: GuestbookError },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> Option<u64> {
        match self {
            NetworkResponse::Messages { id, .. } => Some(*id),
            NetworkResponse::MessagesFailed { id, .. } => Some(*id),
            NetworkResponse::Account { id, .. } => Some(*id),
            NetworkResponse::AccountFailed { id, .. } => Some(*id),
            NetworkResponse::Submitted { id, .. } => Some(*id),
            NetworkResponse::SubmissionFailed { id, .. } => Some(*id),
            NetworkResponse::SignOutFailed { .. } => None,
        }
    }
}
