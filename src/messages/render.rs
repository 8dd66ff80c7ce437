//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::ui_events::{FormField, InputMode, KeyContext};
use crate::models::{Message, Notice};

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // Header
    pub network_id: String,
    pub contract_id: String,

    // Account
    pub account_id: Option<String>,
    pub balance: Option<String>,
    pub account_loading: bool,
    pub account_error: Option<String>,

    // Messages, newest first
    pub messages: Vec<Message>,
    pub messages_error: Option<String>,
    pub messages_loading: bool,
    pub message_scroll: u16,

    // Form
    pub message_input: String,
    pub donation_input: String,
    pub active_field: FormField,
    pub cursor_position: usize,
    pub form_disabled: bool,
    pub input_mode: InputMode,

    // Popups
    pub notice: Option<Notice>,
    pub chooser: Option<Vec<String>>,
    pub chooser_index: usize,
}

impl RenderState {
    pub fn key_context(&self) -> KeyContext {
        KeyContext {
            input_mode: self.input_mode,
            show_notice: self.notice.is_some(),
            show_chooser: self.chooser.is_some(),
        }
    }
}
