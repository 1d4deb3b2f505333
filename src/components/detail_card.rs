use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{
    format_name, Component, ACCENT_GOLD, ACCENT_RED, ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN,
};
use crate::action::Action;
use crate::state::{LookupPhase, PokemonDetail, PokemonStat};

pub const NOT_FOUND_TEXT: &str = "Pokemon not found";

#[derive(Clone, Copy)]
pub struct DetailCardProps<'a> {
    pub detail: Option<&'a PokemonDetail>,
    pub lookup: LookupPhase,
}

/// Read-only view of the current search result or opened entry
#[derive(Default)]
pub struct DetailCard;

impl DetailCard {
    fn body(props: &DetailCardProps<'_>) -> Text<'static> {
        if props.lookup == LookupPhase::NotFound {
            return Text::from(Line::from(Span::styled(
                NOT_FOUND_TEXT,
                Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD),
            )));
        }
        let Some(detail) = props.detail else {
            return Text::from(Line::from(Span::styled(
                "Search with / or open an entry with Enter.",
                Style::default().fg(TEXT_DIM),
            )));
        };

        let heading = Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    format_name(&detail.name),
                    Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("  #{:03}", detail.id)),
            ]),
            Line::from(vec![
                Span::styled("Image: ", heading),
                Span::raw(detail.sprite_front_default.clone().unwrap_or_else(|| "-".into())),
            ]),
            Line::from(""),
            Line::from(Span::styled("Species", heading)),
            Line::from(detail.species.clone().unwrap_or_else(|| "-".into())),
            Line::from(Span::styled("Types", heading)),
            Line::from(join_or_dash(&detail.types)),
            Line::from(Span::styled("Abilities", heading)),
            Line::from(join_or_dash(&detail.abilities)),
            Line::from(Span::styled("Stats", heading)),
        ];
        lines.extend(detail.stats.iter().map(|stat| Line::from(render_stat(stat))));
        Text::from(lines)
    }
}

impl Component<Action> for DetailCard {
    type Props<'a> = DetailCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("DETAIL")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(Style::default().fg(TEXT_DIM));
        let paragraph = Paragraph::new(Self::body(&props))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

fn render_stat(stat: &PokemonStat) -> String {
    let bar_len = (stat.value as usize / 10).clamp(1, 20);
    let bar = "#".repeat(bar_len);
    format!("{:<16} {:>3} {bar}", stat.name, stat.value)
}
