use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;

use super::{Component, ACCENT_RED, ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;

#[derive(Clone, Copy)]
pub struct SearchBarProps<'a> {
    pub query: &'a str,
    /// Captures keystrokes while true
    pub active: bool,
}

/// Title line plus the free-text lookup field
#[derive(Default)]
pub struct SearchBar;

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.active {
            return None;
        }
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Esc => Some(Action::SearchCancel),
                KeyCode::Enter => Some(Action::SearchSubmit),
                KeyCode::Backspace => Some(Action::SearchBackspace),
                KeyCode::Char(ch) => Some(Action::SearchInput(ch)),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let field = if props.active {
            Span::styled(
                format!("{}_", props.query),
                Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD),
            )
        } else if props.query.is_empty() {
            Span::styled("press / to search by name", Style::default().fg(TEXT_DIM))
        } else {
            Span::styled(props.query.to_string(), Style::default().fg(TEXT_MAIN))
        };
        let line = Line::from(vec![Span::raw("Search: "), field]);

        let border = if props.active { ACCENT_TEAL } else { ACCENT_RED };
        let block = Block::default()
            .borders(Borders::ALL)
            .title("POKEDEX")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(Style::default().fg(border));
        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}
