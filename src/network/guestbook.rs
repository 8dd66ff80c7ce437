//! Guest book contract calls composed from the provider and the selector

use serde_json::Value;

use crate::amount::parse_near_amount;
use crate::constants::{ADD_MESSAGE_METHOD, BOATLOAD_OF_GAS, GET_MESSAGES_METHOD};
use crate::error::{GuestbookError, Result};
use crate::models::{
    Account, Action, AddMessageArgs, FunctionCall, Message, SubmissionDraft, Transaction,
    TransactionOutcome,
};
use crate::network::client::{encode_args, RpcProvider};
use crate::wallet::WalletSelector;

/// Result of a submission whose transaction went through
#[derive(Debug, Clone)]
pub struct Submitted {
    pub outcome: TransactionOutcome,
    /// Reload that ran after the transaction; `RefreshFailed` on error
    pub refresh: Result<Vec<Message>>,
}

/// Decode a `getMessages` payload
pub fn decode_messages(bytes: &[u8]) -> Result<Vec<Message>> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| GuestbookError::decode(format!("messages are not UTF-8: {}", e)))?;
    Ok(serde_json::from_str(text)?)
}

/// Load the stored messages in contract order
pub async fn fetch_messages(provider: &dyn RpcProvider, contract_id: &str) -> Result<Vec<Message>> {
    let bytes = provider
        .call_function(contract_id, GET_MESSAGES_METHOD, &encode_args(&Value::Null))
        .await?;
    decode_messages(&bytes)
}

/// Query an account and merge the view with its id
pub async fn load_account(provider: &dyn RpcProvider, account_id: &str) -> Result<Account> {
    let state = provider.view_account(account_id).await?;
    Ok(Account::new(account_id, state))
}

/// Build the `addMessage` transaction for a draft
pub fn build_add_message(signer_id: &str, contract_id: &str, draft: &SubmissionDraft) -> Result<Transaction> {
    let deposit = parse_near_amount(draft.donation_or_default())?;
    let args = serde_json::to_value(AddMessageArgs {
        text: draft.text.clone(),
    })?;

    Ok(Transaction {
        signer_id: signer_id.to_string(),
        receiver_id: Some(contract_id.to_string()),
        actions: vec![Action::FunctionCall(FunctionCall {
            method_name: ADD_MESSAGE_METHOD.to_string(),
            args,
            gas: BOATLOAD_OF_GAS.to_string(),
            deposit,
        })],
    })
}

/// Sign and send `addMessage`, then reload the list.
///
/// The outer error is the submission itself failing. A failed reload is
/// reported inside `Submitted::refresh` since the message was recorded.
pub async fn submit_message(
    provider: &dyn RpcProvider,
    selector: &dyn WalletSelector,
    signer_id: &str,
    draft: &SubmissionDraft,
) -> Result<Submitted> {
    let transaction = build_add_message(signer_id, selector.contract_id(), draft)?;

    let outcome = selector
        .sign_and_send_transaction(transaction)
        .await
        .map_err(|e| match e {
            GuestbookError::SubmissionRejected(_) => e,
            other => GuestbookError::SubmissionRejected(other.to_string()),
        })?;

    let refresh = fetch_messages(provider, selector.contract_id())
        .await
        .map_err(|e| GuestbookError::RefreshFailed(e.to_string()));

    Ok(Submitted { outcome, refresh })
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory collaborators for flow and actor tests

    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{Map, Value};
    use tokio::sync::watch;

    use crate::error::{GuestbookError, Result};
    use crate::models::{Message, NetworkConfig, Transaction, TransactionOutcome};
    use crate::network::client::RpcProvider;
    use crate::wallet::{SelectorState, WalletSelector};

    #[derive(Default)]
    pub struct MockProvider {
        pub accounts: Mutex<HashMap<String, Map<String, Value>>>,
        /// Queued `getMessages` replies, the last one repeats
        pub message_replies: Mutex<Vec<Result<Vec<u8>>>>,
        pub view_calls: Mutex<Vec<String>>,
        pub function_calls: Mutex<Vec<(String, String, String)>>,
    }

    impl MockProvider {
        pub fn with_messages(messages: &[Message]) -> Self {
            let provider = MockProvider::default();
            provider.push_messages(messages);
            provider
        }

        pub fn push_messages(&self, messages: &[Message]) {
            let bytes = serde_json::to_vec(messages).unwrap();
            self.message_replies.lock().unwrap().push(Ok(bytes));
        }

        pub fn push_reply(&self, reply: Result<Vec<u8>>) {
            self.message_replies.lock().unwrap().push(reply);
        }

        pub fn insert_account(&self, account_id: &str, state: Value) {
            self.accounts
                .lock()
                .unwrap()
                .insert(account_id.to_string(), state.as_object().unwrap().clone());
        }
    }

    #[async_trait]
    impl RpcProvider for MockProvider {
        async fn view_account(&self, account_id: &str) -> Result<Map<String, Value>> {
            self.view_calls.lock().unwrap().push(account_id.to_string());
            self.accounts
                .lock()
                .unwrap()
                .get(account_id)
                .cloned()
                .ok_or_else(|| GuestbookError::transport(format!("UNKNOWN_ACCOUNT: {}", account_id)))
        }

        async fn call_function(
            &self,
            account_id: &str,
            method_name: &str,
            args_base64: &str,
        ) -> Result<Vec<u8>> {
            self.function_calls.lock().unwrap().push((
                account_id.to_string(),
                method_name.to_string(),
                args_base64.to_string(),
            ));
            let mut replies = self.message_replies.lock().unwrap();
            match replies.len() {
                0 => Ok(b"[]".to_vec()),
                1 => replies[0].clone(),
                _ => replies.remove(0),
            }
        }
    }

    pub struct MockSelector {
        pub network: NetworkConfig,
        pub contract_id: String,
        pub state_tx: watch::Sender<SelectorState>,
        pub reject_with: Mutex<Option<GuestbookError>>,
        pub sent: Mutex<Vec<Transaction>>,
        pub fail_sign_out: bool,
    }

    impl MockSelector {
        pub fn new() -> Self {
            let (state_tx, _) = watch::channel(SelectorState::default());
            MockSelector {
                network: NetworkConfig {
                    network_id: "testnet".into(),
                    node_url: "http://localhost:3030".into(),
                },
                contract_id: "guest-book.testnet".into(),
                state_tx,
                reject_with: Mutex::new(None),
                sent: Mutex::new(Vec::new()),
                fail_sign_out: false,
            }
        }

        pub fn signed_in(account_id: &str) -> Self {
            let selector = MockSelector::new();
            selector
                .state_tx
                .send_modify(|s| s.account_id = Some(account_id.to_string()));
            selector
        }

        pub fn reject(&self, reason: &str) {
            *self.reject_with.lock().unwrap() = Some(GuestbookError::rejected(reason));
        }
    }

    #[async_trait]
    impl WalletSelector for MockSelector {
        fn network(&self) -> &NetworkConfig {
            &self.network
        }

        fn contract_id(&self) -> &str {
            &self.contract_id
        }

        fn account_id(&self) -> Option<String> {
            self.state_tx.borrow().account_id.clone()
        }

        fn subscribe(&self) -> watch::Receiver<SelectorState> {
            self.state_tx.subscribe()
        }

        async fn sign_and_send_transaction(
            &self,
            transaction: Transaction,
        ) -> Result<TransactionOutcome> {
            if let Some(err) = self.reject_with.lock().unwrap().clone() {
                return Err(err);
            }
            self.sent.lock().unwrap().push(transaction);
            Ok(TransactionOutcome::default())
        }

        async fn sign_out(&self) -> Result<()> {
            if self.fail_sign_out {
                return Err(GuestbookError::SignOutFailed("wallet unavailable".into()));
            }
            self.state_tx.send_modify(|s| s.account_id = None);
            Ok(())
        }

        fn show(&self) {
            self.state_tx
                .send_modify(|s| s.chooser = Some(vec!["alice".into(), "bob".into()]));
        }

        fn select_account(&self, account_id: &str) -> Result<()> {
            let account_id = account_id.to_string();
            self.state_tx.send_modify(|s| {
                s.account_id = Some(account_id);
                s.chooser = None;
            });
            Ok(())
        }

        fn dismiss_chooser(&self) {
            self.state_tx.send_modify(|s| s.chooser = None);
        }
    }
}
