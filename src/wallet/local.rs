//! Local selector - accounts from config, signing delegated to a signer endpoint

use async_trait::async_trait;
use tokio::sync::watch;

use crate::config::{validate_account_id, AppConfig};
use crate::error::{GuestbookError, Result};
use crate::models::{NetworkConfig, Transaction, TransactionOutcome};
use crate::network::client::create_client;
use crate::wallet::{SelectorState, WalletSelector};

/// Selector backed by the config file and an external signer
pub struct LocalSelector {
    network: NetworkConfig,
    contract_id: String,
    accounts: Vec<String>,
    signer_url: Option<String>,
    client: reqwest::Client,
    state_tx: watch::Sender<SelectorState>,
}

impl LocalSelector {
    pub fn new(config: &AppConfig) -> Self {
        let (state_tx, _) = watch::channel(SelectorState::default());
        LocalSelector {
            network: config.network(),
            contract_id: config.contract_id.clone(),
            accounts: config.accounts.clone(),
            signer_url: config.signer_url.clone(),
            client: create_client(),
            state_tx,
        }
    }
}

#[async_trait]
impl WalletSelector for LocalSelector {
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
        mut transaction: Transaction,
    ) -> Result<TransactionOutcome> {
        let Some(signer_url) = &self.signer_url else {
            return Err(GuestbookError::rejected("no signer configured"));
        };
        if self.account_id().as_deref() != Some(transaction.signer_id.as_str()) {
            return Err(GuestbookError::rejected(format!(
                "{} is not signed in",
                transaction.signer_id
            )));
        }
        if transaction.receiver_id.is_none() {
            transaction.receiver_id = Some(self.contract_id.clone());
        }

        tracing::info!(signer = %transaction.signer_id, url = %signer_url, "Forwarding transaction to signer");
        let resp = self
            .client
            .post(signer_url)
            .json(&transaction)
            .send()
            .await
            .map_err(|e| GuestbookError::rejected(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| GuestbookError::rejected(e.to_string()))?;
        if !status.is_success() {
            let reason = if body.is_empty() {
                format!("signer returned HTTP {}", status.as_u16())
            } else {
                body
            };
            return Err(GuestbookError::rejected(reason));
        }

        let raw = serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body));
        Ok(TransactionOutcome { raw })
    }

    async fn sign_out(&self) -> Result<()> {
        if self.state_tx.borrow().account_id.is_none() {
            return Err(GuestbookError::SignOutFailed("no account signed in".into()));
        }
        self.state_tx.send_modify(|state| {
            state.account_id = None;
            state.chooser = None;
        });
        Ok(())
    }

    fn show(&self) {
        let accounts = self.accounts.clone();
        self.state_tx.send_modify(|state| state.chooser = Some(accounts));
    }

    fn select_account(&self, account_id: &str) -> Result<()> {
        validate_account_id(account_id)?;
        let account_id = account_id.to_string();
        self.state_tx.send_modify(|state| {
            state.account_id = Some(account_id);
            state.chooser = None;
        });
        Ok(())
    }

    fn dismiss_chooser(&self) {
        self.state_tx.send_if_modified(|state| state.chooser.take().is_some());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Action;

    fn selector(signer_url: Option<&str>) -> LocalSelector {
        let config = AppConfig {
            accounts: vec!["alice.testnet".into(), "bob.testnet".into()],
            signer_url: signer_url.map(str::to_string),
            ..AppConfig::default()
        };
        LocalSelector::new(&config)
    }

    #[test]
    fn test_show_and_select() {
        let selector = selector(None);
        let rx = selector.subscribe();

        selector.show();
        assert_eq!(
            rx.borrow().chooser.as_deref(),
            Some(&["alice.testnet".to_string(), "bob.testnet".to_string()][..])
        );

        selector.select_account("bob.testnet").unwrap();
        assert_eq!(selector.account_id().as_deref(), Some("bob.testnet"));
        assert!(rx.borrow().chooser.is_none());

        assert!(selector.select_account("Not Valid").is_err());
        assert_eq!(selector.account_id().as_deref(), Some("bob.testnet"));
    }

    #[tokio::test]
    async fn test_sign_out() {
        let selector = selector(None);
        assert!(matches!(
            selector.sign_out().await,
            Err(GuestbookError::SignOutFailed(_))
        ));

        selector.select_account("alice.testnet").unwrap();
        selector.sign_out().await.unwrap();
        assert!(selector.account_id().is_none());
    }

    #[tokio::test]
    async fn test_without_signer_rejects() {
        let selector = selector(None);
        selector.select_account("alice.testnet").unwrap();
        let tx = Transaction {
            signer_id: "alice.testnet".into(),
            receiver_id: None,
            actions: Vec::<Action>::new(),
        };
        assert!(matches!(
            selector.sign_and_send_transaction(tx).await,
            Err(GuestbookError::SubmissionRejected(_))
        ));
    }
}
