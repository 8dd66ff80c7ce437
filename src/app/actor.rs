//! App actor - message loop processing UI events, selector changes and network responses

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::app::state::AppState;
use crate::messages::ui_events::InputMode;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use crate::models::Notice;
use crate::wallet::{SelectorState, WalletSelector};

/// App actor that owns the single state container
pub struct AppActor {
    state: AppState,
    selector: Arc<dyn WalletSelector>,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        selector: Arc<dyn WalletSelector>,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        let state = AppState::new(selector.network().network_id.clone(), selector.contract_id());
        AppActor {
            state,
            selector,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        let mut selector_rx = self.selector.subscribe();

        // Messages are public: load them once, signed in or not
        let fetch = self.state.fetch_messages();
        self.send(fetch);
        self.on_selector_change(&mut selector_rx);
        self.render();

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        self.send(NetworkCommand::Shutdown);
                        break;
                    }
                    self.render();
                }
                Some(response) = net_rx.recv() => {
                    tracing::debug!(id = ?response.id(), "Network response");
                    self.state.handle_response(response);
                    self.render();
                }
                Ok(()) = selector_rx.changed() => {
                    self.on_selector_change(&mut selector_rx);
                    self.render();
                }
                else => break,
            }
        }
    }

    fn send(&self, cmd: NetworkCommand) {
        let _ = self.network_tx.send(cmd);
    }

    fn render(&self) {
        let _ = self.render_tx.send(self.state.to_render_state());
    }

    fn on_selector_change(&mut self, selector_rx: &mut watch::Receiver<SelectorState>) {
        let selector_state = selector_rx.borrow_and_update().clone();
        if let Some(cmd) = self.state.apply_selector_state(selector_state) {
            if let NetworkCommand::ViewAccount { id, account_id } = &cmd {
                tracing::info!(id, %account_id, "Selected account changed");
            }
            self.send(cmd);
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Session
            UiEvent::SignIn => self.selector.show(),
            UiEvent::SignOut => {
                if self.state.account_id.is_some() {
                    self.send(NetworkCommand::SignOut);
                }
            }

            // Account chooser
            UiEvent::ChooserNext => self.state.chooser_next(),
            UiEvent::ChooserPrev => self.state.chooser_prev(),
            UiEvent::ChooserSelect => match self.state.chosen_account() {
                Some(account_id) => {
                    if let Err(e) = self.selector.select_account(&account_id) {
                        self.state.notice = Some(Notice::error(e.to_string()));
                    }
                }
                None => self.selector.dismiss_chooser(),
            },
            UiEvent::ChooserCancel => self.selector.dismiss_chooser(),

            // Form editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::NextField => self.state.next_field(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),
            UiEvent::Submit => {
                if self.state.input_mode == InputMode::Editing {
                    self.state.stop_editing();
                }
                if let Some(cmd) = self.state.prepare_submission() {
                    self.send(cmd);
                }
            }

            // Message list
            UiEvent::RefreshMessages => {
                let cmd = self.state.fetch_messages();
                self.send(cmd);
            }
            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),

            UiEvent::DismissNotice => self.state.dismiss_notice(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Message;
    use crate::network::guestbook::testing::{MockProvider, MockSelector};
    use crate::network::NetworkActor;
    use serde_json::json;
    use std::time::Duration;

    struct Harness {
        ui_tx: mpsc::UnboundedSender<UiEvent>,
        render_rx: mpsc::UnboundedReceiver<RenderState>,
        provider: Arc<MockProvider>,
        selector: Arc<MockSelector>,
    }

    fn spawn(provider: MockProvider, selector: MockSelector) -> Harness {
        let provider = Arc::new(provider);
        let selector = Arc::new(selector);
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel();
        let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
        let (render_tx, render_rx) = mpsc::unbounded_channel();

        let network = NetworkActor::new(provider.clone(), selector.clone(), net_resp_tx);
        tokio::spawn(network.run(net_cmd_rx));
        let app = AppActor::new(selector.clone(), net_cmd_tx, render_tx);
        tokio::spawn(app.run(ui_rx, net_resp_rx));

        Harness {
            ui_tx,
            render_rx,
            provider,
            selector,
        }
    }

    impl Harness {
        /// Wait for the first render state matching `pred`
        async fn until(&mut self, pred: impl Fn(&RenderState) -> bool) -> RenderState {
            tokio::time::timeout(Duration::from_secs(5), async {
                loop {
                    let state = self.render_rx.recv().await.expect("app actor stopped");
                    if pred(&state) {
                        return state;
                    }
                }
            })
            .await
            .expect("timed out waiting for render state")
        }
    }

    fn hello_from(sender: &str, created_at: i64) -> Message {
        Message {
            sender: sender.into(),
            text: "hello".into(),
            created_at,
            premium: false,
        }
    }

    #[tokio::test]
    async fn test_anonymous_visitor_sees_messages() {
        let provider = MockProvider::with_messages(&[hello_from("bob", 1), hello_from("carol", 2)]);
        let mut h = spawn(provider, MockSelector::new());

        let state = h.until(|s| s.messages.len() == 2).await;
        assert!(state.account_id.is_none());
        assert_eq!(state.messages[0].sender, "carol");
        assert_eq!(h.provider.function_calls.lock().unwrap().len(), 1);
        assert!(h.provider.view_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sign_in_loads_account() {
        let provider = MockProvider::default();
        provider.insert_account("alice", json!({ "amount": "500" }));
        let mut h = spawn(provider, MockSelector::new());

        h.ui_tx.send(UiEvent::SignIn).unwrap();
        h.until(|s| s.chooser.is_some()).await;
        h.ui_tx.send(UiEvent::ChooserSelect).unwrap();

        let state = h.until(|s| s.account_id.is_some()).await;
        assert_eq!(state.account_id.as_deref(), Some("alice"));
        assert!(!state.account_loading);
        assert!(state.chooser.is_none());
    }

    #[tokio::test]
    async fn test_rejected_signature_reenables_form() {
        let provider = MockProvider::default();
        provider.insert_account("alice", json!({ "amount": "500" }));
        let selector = MockSelector::signed_in("alice");
        selector.reject("user declined");
        let mut h = spawn(provider, selector);

        h.until(|s| s.account_id.is_some()).await;
        h.ui_tx.send(UiEvent::StartEditing).unwrap();
        for c in "hello".chars() {
            h.ui_tx.send(UiEvent::CharInput(c)).unwrap();
        }
        h.ui_tx.send(UiEvent::Submit).unwrap();

        let state = h.until(|s| s.notice.is_some()).await;
        assert!(!state.form_disabled);
        assert_eq!(state.message_input, "hello");
        assert!(state.notice.unwrap().text.starts_with("Failed to add message"));
        assert!(h.selector.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_refreshes_and_clears() {
        let provider = MockProvider::default();
        provider.insert_account("alice", json!({ "amount": "500" }));
        provider.push_messages(&[]);
        provider.push_messages(&[hello_from("alice", 5)]);
        let mut h = spawn(provider, MockSelector::signed_in("alice"));

        h.until(|s| s.account_id.is_some() && !s.messages_loading).await;
        h.ui_tx.send(UiEvent::StartEditing).unwrap();
        for c in "hello".chars() {
            h.ui_tx.send(UiEvent::CharInput(c)).unwrap();
        }
        h.ui_tx.send(UiEvent::Submit).unwrap();

        let state = h.until(|s| s.messages.len() == 1).await;
        assert_eq!(state.message_input, "");
        assert_eq!(state.donation_input, "0");
        assert!(!state.form_disabled);

        let sent = h.selector.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].signer_id, "alice");
    }
}
