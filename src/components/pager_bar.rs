use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::Borders,
    Frame,
};
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    BaseStyle, Padding, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection,
    StatusBarStyle,
};

use super::{Component, ACCENT_GOLD, ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;

pub struct PagerBarProps<'a> {
    pub page: usize,
    pub page_count: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub searching: bool,
    pub message: Option<&'a str>,
}

/// Footer: key hints, Back/Next controls, last diagnostic
#[derive(Default)]
pub struct PagerBar {
    status_bar: StatusBar,
}

impl PagerBar {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Back/Next labels; a disabled control loses its arrow.
pub fn pager_labels(has_prev: bool, has_next: bool) -> (&'static str, &'static str) {
    let back = if has_prev { "< Back" } else { "  Back" };
    let next = if has_next { "Next >" } else { "Next  " };
    (back, next)
}

fn hints(searching: bool) -> Vec<StatusBarHint<'static>> {
    if searching {
        return vec![
            StatusBarHint::new("Enter", "Search"),
            StatusBarHint::new("Esc", "Cancel"),
            StatusBarHint::new("Bksp", "Delete"),
        ];
    }
    vec![
        StatusBarHint::new("j/k", "Move"),
        StatusBarHint::new("Enter", "Open"),
        StatusBarHint::new("b/n", "Page"),
        StatusBarHint::new("/", "Search"),
        StatusBarHint::new("q", "Quit"),
    ]
}

impl Component<Action> for PagerBar {
    type Props<'a> = PagerBarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let (back, next) = pager_labels(props.has_prev, props.has_next);
        let enabled = Style::default()
            .fg(ACCENT_TEAL)
            .add_modifier(Modifier::BOLD);
        let disabled = Style::default().fg(TEXT_DIM);
        let page_items = [
            StatusBarItem::span(Span::styled(
                back,
                if props.has_prev { enabled } else { disabled },
            )),
            StatusBarItem::span(Span::styled(
                format!("{}/{}", props.page, props.page_count),
                Style::default().fg(TEXT_MAIN),
            )),
            StatusBarItem::span(Span::styled(
                next,
                if props.has_next { enabled } else { disabled },
            )),
        ];
        let status = props.message.unwrap_or("");
        let status_items = [StatusBarItem::span(Span::styled(
            status,
            Style::default().fg(ACCENT_GOLD),
        ))];
        let left_hints = hints(props.searching);

        let style = StatusBarStyle {
            base: BaseStyle {
                border: Some(BorderStyle {
                    borders: Borders::ALL,
                    style: Style::default().fg(TEXT_DIM),
                    focused_style: Some(Style::default().fg(ACCENT_TEAL)),
                }),
                padding: Padding::xy(1, 0),
                bg: Some(BG_PANEL),
                fg: Some(TEXT_MAIN),
            },
            text: Style::default().fg(TEXT_DIM),
            hint_key: Style::default()
                .fg(ACCENT_TEAL)
                .add_modifier(Modifier::BOLD),
            hint_label: Style::default().fg(TEXT_DIM),
            separator: Style::default().fg(TEXT_DIM),
        };

        let status_props = StatusBarProps {
            left: StatusBarSection::hints(&left_hints).with_separator("  "),
            center: StatusBarSection::items(&page_items).with_separator("  "),
            right: StatusBarSection::items(&status_items).with_separator("  "),
            style,
            is_focused: false,
        };
        Component::<Action>::render(&mut self.status_bar, frame, area, status_props);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    #[test]
    fn labels_drop_arrow_when_disabled() {
        assert_eq!(pager_labels(false, true), ("  Back", "Next >"));
        assert_eq!(pager_labels(true, false), ("< Back", "Next  "));
    }

    #[test]
    fn renders_page_position() {
        let mut render = RenderHarness::new(120, 3);
        let mut pager = PagerBar::new();
        let output = render.render_to_string_plain(|frame| {
            let props = PagerBarProps {
                page: 2,
                page_count: 5,
                has_prev: true,
                has_next: true,
                searching: false,
                message: None,
            };
            pager.render(frame, frame.area(), props);
        });
        assert!(output.contains("2/5"), "{output}");
        assert!(output.contains("< Back"), "{output}");
        assert!(output.contains("Next >"), "{output}");
    }
}
