use crossterm::event::{KeyCode, MouseButton, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps, SelectListStyle,
    SelectionStyle,
};

use super::{format_name, Component, ACCENT_TEAL, BG_HIGHLIGHT, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::state::PokemonDetail;

#[derive(Clone, Copy)]
pub struct DexListProps<'a> {
    /// Entries on the visible page only
    pub entries: &'a [PokemonDetail],
    pub selected: usize,
    pub page: usize,
    pub page_count: usize,
    pub loading: bool,
    pub is_focused: bool,
}

/// One page of the catalog. Arrow keys move the cursor, Enter or a click
/// opens the row, Left/Right turn the page.
#[derive(Default)]
pub struct DexList {
    list: SelectList,
    /// Row area from the last render, for click hit-testing
    rows: Rect,
    /// First visible row in `rows`
    offset: usize,
}

impl DexList {
    pub fn new() -> Self {
        Self::default()
    }

    fn items(entries: &[PokemonDetail]) -> Vec<Line<'static>> {
        entries
            .iter()
            .map(|entry| Line::from(format!("#{:03} {}", entry.id, format_name(&entry.name))))
            .collect()
    }

    fn list_style() -> SelectListStyle {
        SelectListStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::xy(1, 0),
                bg: None,
                fg: Some(TEXT_MAIN),
            },
            selection: SelectionStyle {
                style: Some(
                    Style::default()
                        .bg(BG_HIGHLIGHT)
                        .fg(TEXT_MAIN)
                        .add_modifier(Modifier::BOLD),
                ),
                marker: None,
                disabled: false,
            },
            ..SelectListStyle::default()
        }
    }

    /// Visible-page index under a terminal cell, if any.
    fn row_at(&self, column: u16, row: u16, len: usize) -> Option<usize> {
        let area = self.rows;
        let inside = column >= area.x
            && column < area.x.saturating_add(area.width)
            && row >= area.y
            && row < area.y.saturating_add(area.height);
        if !inside {
            return None;
        }
        let index = self.offset + usize::from(row - area.y);
        (index < len).then_some(index)
    }
}

impl Component<Action> for DexList {
    type Props<'a> = DexListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        // Jumps only move the cursor; opening a row is Enter or a click
        let jump = i16::try_from(props.entries.len()).unwrap_or(i16::MAX);
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectionMove(-1)),
                KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectionMove(1)),
                KeyCode::Home | KeyCode::Char('g') => Some(Action::SelectionMove(-jump)),
                KeyCode::End | KeyCode::Char('G') => Some(Action::SelectionMove(jump)),
                KeyCode::Enter => Some(Action::EntryOpen),
                KeyCode::Right | KeyCode::Char('n') => Some(Action::PageNext),
                KeyCode::Left | KeyCode::Char('b') => Some(Action::PagePrev),
                _ => None,
            },
            EventKind::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => self
                    .row_at(mouse.column, mouse.row, props.entries.len())
                    .map(Action::DexSelect),
                _ => None,
            },
            EventKind::Scroll { delta, .. } => Some(Action::SelectionMove(*delta as i16)),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let border = if props.is_focused {
            Style::default().fg(ACCENT_TEAL)
        } else {
            Style::default().fg(TEXT_DIM)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("POKEMON  {}/{}", props.page, props.page_count))
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.rows = Rect {
            x: inner.x.saturating_add(1),
            width: inner.width.saturating_sub(2),
            ..inner
        };
        let height = usize::from(inner.height.max(1));
        self.offset = (props.selected + 1).saturating_sub(height);

        if props.entries.is_empty() {
            let text = if props.loading {
                ""
            } else {
                "No entries."
            };
            frame.render_widget(
                Paragraph::new(text).style(Style::default().fg(TEXT_DIM)),
                inner,
            );
            return;
        }

        let items = Self::items(props.entries);
        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: props.selected.min(items.len().saturating_sub(1)),
            is_focused: props.is_focused,
            style: Self::list_style(),
            behavior: SelectListBehavior {
                show_scrollbar: false,
                wrap_navigation: false,
            },
            on_select: Action::DexSelect,
            render_item: &|item| item.clone(),
        };
        self.list.render(frame, inner, list_props);
    }
}
