use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::amount::format_near_amount;
use crate::constants::SUGGESTED_DONATION;

const NANOS_PER_MILLI: i64 = 1_000_000;

/// A guest book entry as stored by the contract
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: String,
    pub text: String,
    /// Block timestamp in nanoseconds
    #[serde(rename = "createdAt")]
    pub created_at: i64,
    pub premium: bool,
}

impl Message {
    /// Local date-time of the message, or the raw value if out of range
    pub fn created_at_display(&self) -> String {
        chrono::DateTime::from_timestamp_millis(self.created_at / NANOS_PER_MILLI)
            .map(|utc| {
                utc.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_else(|| self.created_at.to_string())
    }
}

/// Newest first. Ordering is applied when reading, never stored.
pub fn sort_newest_first(messages: &[Message]) -> Vec<Message> {
    let mut sorted = messages.to_vec();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

/// A resolved account: the watched id plus whatever `view_account` returned
#[derive(Clone, Debug, PartialEq)]
pub struct Account {
    pub account_id: String,
    pub state: Map<String, Value>,
}

impl Account {
    pub fn new(account_id: impl Into<String>, state: Map<String, Value>) -> Self {
        Account {
            account_id: account_id.into(),
            state,
        }
    }

    /// Liquid balance in yoctoNEAR
    pub fn amount(&self) -> Option<&str> {
        self.state.get("amount").and_then(Value::as_str)
    }

    /// Balance formatted for display, e.g. "12.5 NEAR"
    pub fn balance_display(&self) -> Option<String> {
        self.amount()
            .and_then(|yocto| format_near_amount(yocto, 5).ok())
            .map(|near| format!("{} NEAR", near))
    }
}

/// Values read from the form at submit time
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionDraft {
    pub text: String,
    pub donation: String,
}

impl SubmissionDraft {
    pub fn new(text: impl Into<String>, donation: impl Into<String>) -> Self {
        SubmissionDraft {
            text: text.into(),
            donation: donation.into(),
        }
    }

    /// The donation with blank meaning the suggested default
    pub fn donation_or_default(&self) -> &str {
        if self.donation.trim().is_empty() {
            SUGGESTED_DONATION
        } else {
            &self.donation
        }
    }
}

/// Arguments of `addMessage`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddMessageArgs {
    pub text: String,
}

/// Parameters of a function-call action
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCall {
    pub method_name: String,
    pub args: Value,
    /// Gas units, decimal string
    pub gas: String,
    /// yoctoNEAR, decimal string
    pub deposit: String,
}

/// A single transaction instruction
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params")]
pub enum Action {
    FunctionCall(FunctionCall),
}

/// Transaction handed to the wallet selector for signing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub signer_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub receiver_id: Option<String>,
    pub actions: Vec<Action>,
}

/// Whatever the signer reports back once the transaction is accepted
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionOutcome {
    pub raw: Value,
}

impl TransactionOutcome {
    /// Transaction hash, when the signer reports one
    pub fn hash(&self) -> Option<&str> {
        self.raw
            .pointer("/transaction/hash")
            .or_else(|| self.raw.get("hash"))
            .and_then(Value::as_str)
    }
}

/// RPC connection parameters of the selector's network
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub network_id: String,
    pub node_url: String,
}

/// Severity of a user-visible notification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A user-visible alert
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}
