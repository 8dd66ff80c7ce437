//! App state - pure data structure with no I/O logic

use crate::constants::SUGGESTED_DONATION;
use crate::messages::ui_events::{FormField, InputMode};
use crate::messages::RenderState;
use crate::models::{sort_newest_first, Account, Message, Notice, SubmissionDraft};

/// The sign-the-guest-book form
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormState {
    pub message: String,
    pub donation: String,
    pub field: FormField,
    pub cursor_position: usize,
    /// Locked while a submission is in flight
    pub disabled: bool,
}

impl Default for FormState {
    fn default() -> Self {
        FormState {
            message: String::new(),
            donation: String::from(SUGGESTED_DONATION),
            field: FormField::Message,
            cursor_position: 0,
            disabled: false,
        }
    }
}

impl FormState {
    pub fn draft(&self) -> SubmissionDraft {
        SubmissionDraft::new(self.message.clone(), self.donation.clone())
    }

    /// Clear the message and restore the suggested donation
    pub fn reset(&mut self) {
        self.message.clear();
        self.donation = String::from(SUGGESTED_DONATION);
        self.field = FormField::Message;
        self.cursor_position = 0;
    }

    pub fn current_input(&self) -> &str {
        match self.field {
            FormField::Message => &self.message,
            FormField::Donation => &self.donation,
        }
    }

    pub fn current_input_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Message => &mut self.message,
            FormField::Donation => &mut self.donation,
        }
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Network context shown in the header
    pub network_id: String,
    pub contract_id: String,

    // Account synchronizer
    pub account_id: Option<String>,
    pub account: Option<Account>,
    pub account_loading: bool,
    pub account_error: Option<String>,
    pub pending_account_request: Option<u64>,

    // Message board
    pub messages: Vec<Message>,
    pub messages_error: Option<String>,
    pub pending_messages_request: Option<u64>,
    pub message_scroll: u16,

    // Submission
    pub form: FormState,
    pub pending_submission: Option<u64>,
    pub input_mode: InputMode,

    // Popups
    pub notice: Option<Notice>,
    pub chooser: Option<Vec<String>>,
    pub chooser_index: usize,

    pub next_request_id: u64,
}

impl AppState {
    pub fn new(network_id: impl Into<String>, contract_id: impl Into<String>) -> Self {
        AppState {
            network_id: network_id.into(),
            contract_id: contract_id.into(),
            account_id: None,
            account: None,
            account_loading: false,
            account_error: None,
            pending_account_request: None,
            messages: Vec::new(),
            messages_error: None,
            pending_messages_request: None,
            message_scroll: 0,
            form: FormState::default(),
            pending_submission: None,
            input_mode: InputMode::Normal,
            notice: None,
            chooser: None,
            chooser_index: 0,
            next_request_id: 1,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn is_submitting(&self) -> bool {
        self.pending_submission.is_some()
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            network_id: self.network_id.clone(),
            contract_id: self.contract_id.clone(),
            account_id: self.account.as_ref().map(|a| a.account_id.clone()),
            balance: self.account.as_ref().and_then(Account::balance_display),
            account_loading: self.account_loading,
            account_error: self.account_error.clone(),
            messages: sort_newest_first(&self.messages),
            messages_error: self.messages_error.clone(),
            messages_loading: self.pending_messages_request.is_some(),
            message_scroll: self.message_scroll,
            message_input: self.form.message.clone(),
            donation_input: self.form.donation.clone(),
            active_field: self.form.field,
            cursor_position: self.form.cursor_position,
            form_disabled: self.form.disabled,
            input_mode: self.input_mode,
            notice: self.notice.clone(),
            chooser: self.chooser.clone(),
            chooser_index: self.chooser_index,
        }
    }
}
