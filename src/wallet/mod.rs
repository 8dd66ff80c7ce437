//! Wallet layer - the session/selector collaborator
//!
//! The App layer only ever sees `Arc<dyn WalletSelector>`: it watches the
//! selected account, asks for signatures and forwards sign-in/out requests.

pub mod local;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::Result;
use crate::models::{NetworkConfig, Transaction, TransactionOutcome};

pub use local::LocalSelector;

/// Observable selector state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectorState {
    /// Currently selected account
    pub account_id: Option<String>,
    /// Accounts listed by the open chooser, `None` when it is closed
    pub chooser: Option<Vec<String>>,
}

#[async_trait]
pub trait WalletSelector: Send + Sync {
    fn network(&self) -> &NetworkConfig;

    /// Guest book contract the selector is bound to
    fn contract_id(&self) -> &str;

    /// Currently selected account, read without subscribing
    fn account_id(&self) -> Option<String>;

    /// Receive every change of the selector state
    fn subscribe(&self) -> watch::Receiver<SelectorState>;

    /// Sign and broadcast; fails when the user or the network rejects it
    async fn sign_and_send_transaction(&self, transaction: Transaction)
        -> Result<TransactionOutcome>;

    async fn sign_out(&self) -> Result<()>;

    /// Open the account chooser
    fn show(&self);

    /// Chooser callback: make `account_id` the selected account
    fn select_account(&self, account_id: &str) -> Result<()>;

    /// Close the chooser without selecting
    fn dismiss_chooser(&self);
}
