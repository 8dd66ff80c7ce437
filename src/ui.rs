//! Terminal drawing - projects a `RenderState` onto a ratatui frame

use ratatui::{prelude::*, widgets::*};
use unicode_width::UnicodeWidthStr;

use crate::constants::{APP_NAME, APP_VERSION};
use crate::messages::ui_events::{FormField, InputMode};
use crate::messages::RenderState;
use crate::models::{Message, NoticeLevel};

pub fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_header(f, state, chunks[0]);

    if state.account_loading {
        let loading = Paragraph::new("Loading account...")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(loading, chunks[1]);
    } else if state.account_id.is_some() {
        let body = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Message
                Constraint::Length(3), // Donation
                Constraint::Min(3),    // Messages
            ])
            .split(chunks[1]);
        draw_field(f, state, FormField::Message, body[0]);
        draw_field(f, state, FormField::Donation, body[1]);
        draw_messages(f, state, body[2]);
    } else {
        let body = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(3)])
            .split(chunks[1]);
        draw_sign_in(f, body[0]);
        draw_messages(f, state, body[1]);
    }

    draw_status_bar(f, state, chunks[2]);

    if let Some(accounts) = &state.chooser {
        draw_chooser(f, accounts, state.chooser_index, area);
    }

    if state.notice.is_some() {
        draw_notice(f, state, area);
    }
}

fn draw_header(f: &mut Frame, state: &RenderState, area: Rect) {
    let title = format!(" {} v{} ", APP_NAME, APP_VERSION);

    let account = match (&state.account_id, &state.balance) {
        (Some(id), Some(balance)) => Line::from(vec![
            Span::styled(id.clone(), Style::default().fg(Color::Green).bold()),
            Span::raw("  "),
            Span::styled(balance.clone(), Style::default().fg(Color::Yellow)),
        ]),
        (Some(id), None) => {
            let mut spans = vec![Span::styled(id.clone(), Style::default().fg(Color::Green).bold())];
            if let Some(error) = &state.account_error {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(error.clone(), Style::default().fg(Color::Red)));
            }
            Line::from(spans)
        }
        (None, _) => match &state.account_error {
            Some(error) => Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red))),
            None => Line::from(Span::styled("Not signed in", Style::default().fg(Color::DarkGray))),
        },
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title)
        .title_bottom(format!(" {} @ {} ", state.contract_id, state.network_id));

    f.render_widget(Paragraph::new(account).block(block), area);
}

fn draw_sign_in(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from("This app demonstrates a key element of NEAR's UX: once an app has"),
        Line::from(vec![
            Span::raw("permission to make calls on your behalf, you sign messages. Press "),
            Span::styled("l", Style::default().fg(Color::Yellow).bold()),
            Span::raw(" to log in."),
        ]),
    ];
    f.render_widget(
        Paragraph::new(text).wrap(Wrap { trim: true }).block(Block::default().padding(Padding::horizontal(1))),
        area,
    );
}

fn draw_field(f: &mut Frame, state: &RenderState, field: FormField, area: Rect) {
    let focused = state.active_field == field;
    let editing = focused && state.input_mode == InputMode::Editing;

    let border = if state.form_disabled {
        Style::default().fg(Color::DarkGray)
    } else if editing {
        Style::default().fg(Color::Yellow)
    } else if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let content = match field {
        FormField::Message => state.message_input.as_str(),
        FormField::Donation => state.donation_input.as_str(),
    };

    let mut title = format!(" {} ", field.as_str());
    if state.form_disabled && field == FormField::Message {
        title.push_str("(signing...) ");
    }

    let block = Block::default().borders(Borders::ALL).border_style(border).title(title);
    f.render_widget(Paragraph::new(content).block(block), area);

    if editing {
        // Columns, not chars: wide glyphs take two cells
        let before_cursor = content
            .get(..state.cursor_position)
            .map(UnicodeWidthStr::width)
            .unwrap_or(0) as u16;
        f.set_cursor_position((area.x + 1 + before_cursor, area.y + 1));
    }
}

fn message_item(message: &Message) -> ListItem<'static> {
    let sender = if message.premium {
        Style::default().fg(Color::Magenta).bold()
    } else {
        Style::default().fg(Color::Cyan).bold()
    };
    let mut header = vec![
        Span::styled(message.sender.clone(), sender),
        Span::styled(
            format!("  {}", message.created_at_display()),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if message.premium {
        header.push(Span::styled("  ★ premium", Style::default().fg(Color::Magenta)));
    }

    ListItem::new(vec![
        Line::from(header),
        Line::from(format!("  {}", message.text)),
        Line::from(""),
    ])
}

fn draw_messages(f: &mut Frame, state: &RenderState, area: Rect) {
    let title = if state.messages_loading {
        " Messages (loading...) ".to_string()
    } else if let Some(error) = &state.messages_error {
        format!(" Messages ({}) ", error)
    } else {
        format!(" Messages ({}) ", state.messages.len())
    };

    let block = Block::default().borders(Borders::ALL).title(title);

    if state.messages.is_empty() {
        let empty = Paragraph::new("No messages yet")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = state
        .messages
        .iter()
        .skip(state.message_scroll as usize)
        .map(message_item)
        .collect();
    f.render_widget(List::new(items).block(block), area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let hints = match state.input_mode {
        InputMode::Editing => " Enter: sign  Tab: next field  Esc: stop editing ",
        InputMode::Normal if state.account_id.is_some() => {
            " e: edit  Tab: field  r: refresh  j/k: scroll  o: log out  q: quit "
        }
        InputMode::Normal => " l: log in  r: refresh  j/k: scroll  q: quit ",
    };
    f.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::Black).bg(Color::Cyan)),
        area,
    );
}

fn draw_chooser(f: &mut Frame, accounts: &[String], selected: usize, area: Rect) {
    let popup = centered_rect(50, 40, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Select an account (Enter / Esc) ");

    if accounts.is_empty() {
        let empty = Paragraph::new("No accounts configured.\nAdd them under `accounts:` in ~/.guestbook/config.yaml")
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(empty, popup);
        return;
    }

    let items: Vec<ListItem> = accounts
        .iter()
        .enumerate()
        .map(|(i, account)| {
            let style = if i == selected {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default()
            };
            ListItem::new(format!(" {} ", account)).style(style)
        })
        .collect();
    f.render_widget(List::new(items).block(block), popup);
}

fn draw_notice(f: &mut Frame, state: &RenderState, area: Rect) {
    let Some(notice) = &state.notice else {
        return;
    };
    let popup = centered_rect(60, 30, area);
    f.render_widget(Clear, popup);

    let color = match notice.level {
        NoticeLevel::Info => Color::Green,
        NoticeLevel::Error => Color::Red,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(" Notice (Enter to close) ");
    f.render_widget(
        Paragraph::new(notice.text.as_str()).wrap(Wrap { trim: false }).block(block),
        popup,
    );
}

/// Helper to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Notice;
    use ratatui::backend::TestBackend;

    fn rendered(state: &RenderState) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_anonymous_screen() {
        let state = RenderState {
            messages: vec![Message {
                sender: "bob.testnet".into(),
                text: "first!".into(),
                created_at: 1_000_000_000,
                premium: true,
            }],
            ..RenderState::default()
        };
        let screen = rendered(&state);
        assert!(screen.contains("NEAR Guest Book"));
        assert!(screen.contains("Not signed in"));
        assert!(screen.contains("bob.testnet"));
        assert!(screen.contains("first!"));
    }

    #[test]
    fn test_cursor_after_wide_chars() {
        let state = RenderState {
            account_id: Some("alice.testnet".into()),
            input_mode: InputMode::Editing,
            active_field: FormField::Message,
            message_input: "日本".into(),
            cursor_position: "日本".len(),
            ..RenderState::default()
        };
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw_ui(f, &state)).unwrap();

        // Border column, then two cells per glyph; first row inside the field
        assert_eq!(terminal.get_cursor_position().unwrap(), Position::new(5, 4));
    }

    #[test]
    fn test_signed_in_screen_with_notice() {
        let state = RenderState {
            account_id: Some("alice.testnet".into()),
            balance: Some("2.5 NEAR".into()),
            form_disabled: true,
            notice: Some(Notice::error("Failed to add message")),
            ..RenderState::default()
        };
        let screen = rendered(&state);
        assert!(screen.contains("alice.testnet"));
        assert!(screen.contains("2.5 NEAR"));
        assert!(screen.contains("signing..."));
        assert!(screen.contains("Failed to add message"));
    }
}
