//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Session
    SignIn,
    SignOut,

    // Account chooser
    ChooserNext,
    ChooserPrev,
    ChooserSelect,
    ChooserCancel,

    // Form editing
    StartEditing,
    StopEditing,
    NextField,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    Submit,

    // Message list
    RefreshMessages,
    ScrollUp,
    ScrollDown,

    // Notifications
    DismissNotice,

    // System
    Quit,
}

/// Form field with keyboard focus
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum FormField {
    #[default]
    Message,
    Donation,
}

impl FormField {
    pub fn next(&self) -> FormField {
        match self {
            FormField::Message => FormField::Donation,
            FormField::Donation => FormField::Message,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FormField::Message => "Message",
            FormField::Donation => "Donation (NEAR)",
        }
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// What the UI currently shows on top, used to map keys in context
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct KeyContext {
    pub input_mode: InputMode,
    pub show_notice: bool,
    pub show_chooser: bool,
}

/// Convert a key event to a UI event based on current context
pub fn key_to_ui_event(key: KeyEvent, ctx: KeyContext) -> Option<UiEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    // Alerts are modal
    if ctx.show_notice {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') => Some(UiEvent::DismissNotice),
            _ => None,
        };
    }

    if ctx.show_chooser {
        return match key.code {
            KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::ChooserNext),
            KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::ChooserPrev),
            KeyCode::Enter => Some(UiEvent::ChooserSelect),
            KeyCode::Esc | KeyCode::Char('q') => Some(UiEvent::ChooserCancel),
            _ => None,
        };
    }

    match ctx.input_mode {
        InputMode::Editing => match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Enter => Some(UiEvent::Submit),
            KeyCode::Tab => Some(UiEvent::NextField),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        },
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('l') => Some(UiEvent::SignIn),
            KeyCode::Char('o') => Some(UiEvent::SignOut),
            KeyCode::Char('e') | KeyCode::Char('i') => Some(UiEvent::StartEditing),
            KeyCode::Tab => Some(UiEvent::NextField),
            KeyCode::Char('r') => Some(UiEvent::RefreshMessages),
            KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::ScrollDown),
            KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::ScrollUp),
            _ => None,
        },
    }
}
