//! Command handlers - business logic for processing UI events and responses

use crate::amount::parse_near_amount;
use crate::app::AppState;
use crate::messages::ui_events::InputMode;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::Notice;
use crate::wallet::SelectorState;

impl AppState {
    // ========================
    // Account synchronizer
    // ========================

    /// Follow the selector. Returns the query to run when a new account
    /// became selected.
    pub fn apply_selector_state(&mut self, selector: SelectorState) -> Option<NetworkCommand> {
        if self.chooser != selector.chooser {
            self.chooser_index = 0;
            self.chooser = selector.chooser;
        }
        self.sync_account(selector.account_id)
    }

    /// Re-selecting the current account only queries again after a failed load.
    pub fn sync_account(&mut self, account_id: Option<String>) -> Option<NetworkCommand> {
        if self.account_id == account_id && self.account_error.is_none() {
            return None;
        }
        self.account_id = account_id.clone();
        self.account = None;
        self.account_error = None;

        match account_id {
            None => {
                // Nothing to query; any in-flight answer becomes stale
                self.account_loading = false;
                self.pending_account_request = None;
                self.input_mode = InputMode::Normal;
                None
            }
            Some(account_id) => {
                self.account_loading = true;
                let id = self.next_id();
                self.pending_account_request = Some(id);
                Some(NetworkCommand::ViewAccount { id, account_id })
            }
        }
    }

    // ========================
    // Message board
    // ========================

    pub fn fetch_messages(&mut self) -> NetworkCommand {
        let id = self.next_id();
        self.pending_messages_request = Some(id);
        NetworkCommand::FetchMessages { id }
    }

    /// Lock the form and build the submit command, or explain why not
    pub fn prepare_submission(&mut self) -> Option<NetworkCommand> {
        if self.is_submitting() {
            return None;
        }

        let Some(signer_id) = self.account_id.clone() else {
            self.notice = Some(Notice::error("Log in to sign the guest book"));
            return None;
        };

        if self.form.message.trim().is_empty() {
            self.notice = Some(Notice::error("Write a message first"));
            return None;
        }

        let draft = self.form.draft();
        if let Err(e) = parse_near_amount(draft.donation_or_default()) {
            self.notice = Some(Notice::error(e.to_string()));
            return None;
        }

        self.form.disabled = true;
        self.input_mode = InputMode::Normal;
        let id = self.next_id();
        self.pending_submission = Some(id);

        Some(NetworkCommand::SubmitMessage {
            id,
            signer_id,
            draft,
        })
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        match response {
            NetworkResponse::Messages { id, messages } => {
                if self.pending_messages_request == Some(id) {
                    self.pending_messages_request = None;
                    self.messages = messages;
                    self.messages_error = None;
                } else {
                    tracing::debug!(id, "Discarding stale message list");
                }
            }
            NetworkResponse::MessagesFailed { id, error } => {
                if self.pending_messages_request == Some(id) {
                    tracing::warn!(id, %error, "Failed to load messages");
                    self.pending_messages_request = None;
                    self.messages_error = Some(error.to_string());
                    self.notice = Some(Notice::error(format!("Failed to load messages\n\n{}", error)));
                }
            }
            NetworkResponse::Account { id, account } => {
                let current = self.account_id.as_deref() == Some(account.account_id.as_str());
                if self.pending_account_request == Some(id) && current {
                    self.pending_account_request = None;
                    self.account = Some(account);
                    self.account_loading = false;
                    self.account_error = None;
                } else {
                    tracing::debug!(id, account_id = %account.account_id, "Discarding stale account");
                }
            }
            NetworkResponse::AccountFailed { id, account_id, error } => {
                if self.pending_account_request == Some(id) {
                    tracing::warn!(id, %account_id, %error, "Failed to load account");
                    self.pending_account_request = None;
                    self.account = None;
                    self.account_loading = false;
                    self.account_error = Some(error.to_string());
                    self.notice = Some(Notice::error(format!(
                        "Failed to load account {}\n\n{}",
                        account_id, error
                    )));
                }
            }
            NetworkResponse::Submitted { id, submitted } => {
                if self.pending_submission != Some(id) {
                    return;
                }
                self.pending_submission = None;
                self.form.disabled = false;

                match submitted.refresh {
                    Ok(messages) => {
                        // Newer than anything a concurrent fetch could return
                        self.pending_messages_request = None;
                        self.messages = messages;
                        self.messages_error = None;
                        self.form.reset();
                    }
                    Err(error) => {
                        tracing::warn!(id, %error, "Failed to refresh messages");
                        self.messages_error = Some(error.to_string());
                        self.notice = Some(Notice::error(format!(
                            "Failed to refresh messages\n\nYour message was added.\n{}",
                            error
                        )));
                    }
                }
            }
            NetworkResponse::SubmissionFailed { id, error } => {
                if self.pending_submission != Some(id) {
                    return;
                }
                tracing::warn!(id, %error, "Failed to add message");
                self.pending_submission = None;
                self.form.disabled = false;
                self.notice = Some(Notice::error(format!("Failed to add message\n\n{}", error)));
            }
            NetworkResponse::SignOutFailed { error } => {
                tracing::warn!(%error, "Failed to sign out");
            }
        }
    }

    // ========================
    // Form editing
    // ========================

    pub fn start_editing(&mut self) {
        if self.form.disabled || self.account_id.is_none() {
            return;
        }
        self.input_mode = InputMode::Editing;
        self.form.cursor_position = self.form.current_input().len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn next_field(&mut self) {
        if self.form.disabled {
            return;
        }
        self.form.field = self.form.field.next();
        self.form.cursor_position = self.form.current_input().len();
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.form.current_input();
        let cursor = self.form.cursor_position;
        if cursor > 0 {
            self.form.cursor_position = input[..cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.form.current_input();
        let cursor = self.form.cursor_position;
        if cursor < input.len() {
            self.form.cursor_position = input[cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| cursor + i)
                .unwrap_or(input.len());
        }
    }

    pub fn enter_char(&mut self, c: char) {
        if self.form.disabled {
            return;
        }
        let cursor_pos = self.form.cursor_position;
        let input = self.form.current_input_mut();
        if cursor_pos <= input.len() {
            input.insert(cursor_pos, c);
            self.form.cursor_position = cursor_pos + c.len_utf8();
        }
    }

    pub fn delete_char(&mut self) {
        if self.form.disabled || self.form.cursor_position == 0 {
            return;
        }
        let cursor_pos = self.form.cursor_position;
        let input = self.form.current_input_mut();
        let prev_pos = input[..cursor_pos]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        input.remove(prev_pos);
        self.form.cursor_position = prev_pos;
    }

    // ========================
    // Account chooser
    // ========================

    pub fn chooser_next(&mut self) {
        if let Some(accounts) = &self.chooser {
            if !accounts.is_empty() {
                self.chooser_index = (self.chooser_index + 1) % accounts.len();
            }
        }
    }

    pub fn chooser_prev(&mut self) {
        if let Some(accounts) = &self.chooser {
            if !accounts.is_empty() {
                self.chooser_index = self
                    .chooser_index
                    .checked_sub(1)
                    .unwrap_or(accounts.len() - 1);
            }
        }
    }

    pub fn chosen_account(&self) -> Option<String> {
        self.chooser
            .as_ref()
            .and_then(|accounts| accounts.get(self.chooser_index).cloned())
    }

    // ========================
    // Scrolling / popups
    // ========================

    pub fn scroll_up(&mut self) {
        self.message_scroll = self.message_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.message_scroll = self.message_scroll.saturating_add(1);
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
