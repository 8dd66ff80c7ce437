//! Network actor - runs provider queries and wallet operations in the Tokio runtime

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::RpcProvider;
use crate::network::guestbook::{fetch_messages, load_account, submit_message};
use crate::wallet::WalletSelector;

/// Network actor that executes commands against the injected collaborators
pub struct NetworkActor {
    provider: Arc<dyn RpcProvider>,
    selector: Arc<dyn WalletSelector>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(
        provider: Arc<dyn RpcProvider>,
        selector: Arc<dyn WalletSelector>,
        response_tx: mpsc::UnboundedSender<NetworkResponse>,
    ) -> Self {
        NetworkActor {
            provider,
            selector,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                // Handle incoming commands
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Shutdown) | None => {
                            self.active_requests.abort_all();
                            break;
                        }
                        Some(cmd) => self.spawn(cmd),
                    }
                }

                // Clean up completed tasks
                Some(result) = self.active_requests.join_next() => {
                    if let Err(e) = result {
                        tracing::error!(error = %e, "Network task failed");
                    }
                }
            }
        }
    }

    fn spawn(&mut self, cmd: NetworkCommand) {
        let provider = self.provider.clone();
        let selector = self.selector.clone();
        let response_tx = self.response_tx.clone();

        match cmd {
            NetworkCommand::FetchMessages { id } => {
                self.active_requests.spawn(async move {
                    let contract_id = selector.contract_id();
                    tracing::info!(id, %contract_id, "Fetching messages");
                    let response = match fetch_messages(provider.as_ref(), contract_id).await {
                        Ok(messages) => {
                            tracing::info!(id, count = messages.len(), "Messages loaded");
                            NetworkResponse::Messages { id, messages }
                        }
                        Err(error) => {
                            tracing::error!(id, %error, "Fetching messages failed");
                            NetworkResponse::MessagesFailed { id, error }
                        }
                    };
                    let _ = response_tx.send(response);
                });
            }

            NetworkCommand::ViewAccount { id, account_id } => {
                self.active_requests.spawn(async move {
                    tracing::info!(id, %account_id, "Querying account");
                    let response = match load_account(provider.as_ref(), &account_id).await {
                        Ok(account) => NetworkResponse::Account { id, account },
                        Err(error) => {
                            tracing::error!(id, %account_id, %error, "Account query failed");
                            NetworkResponse::AccountFailed { id, account_id, error }
                        }
                    };
                    let _ = response_tx.send(response);
                });
            }

            NetworkCommand::SubmitMessage { id, signer_id, draft } => {
                self.active_requests.spawn(async move {
                    tracing::info!(id, %signer_id, donation = %draft.donation_or_default(), "Submitting message");
                    let result =
                        submit_message(provider.as_ref(), selector.as_ref(), &signer_id, &draft).await;
                    let response = match result {
                        Ok(submitted) => {
                            tracing::info!(id, hash = ?submitted.outcome.hash(), "Message submitted");
                            NetworkResponse::Submitted { id, submitted }
                        }
                        Err(error) => {
                            tracing::error!(id, %error, "Submission failed");
                            NetworkResponse::SubmissionFailed { id, error }
                        }
                    };
                    let _ = response_tx.send(response);
                });
            }

            NetworkCommand::SignOut => {
                self.active_requests.spawn(async move {
                    if let Err(error) = selector.sign_out().await {
                        let _ = response_tx.send(NetworkResponse::SignOutFailed { error });
                    }
                });
            }

            NetworkCommand::Shutdown => {}
        }
    }
}
