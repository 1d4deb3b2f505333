pub mod detail_card;
pub mod dex_list;
pub mod pager_bar;
pub mod search_bar;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use detail_card::{DetailCard, DetailCardProps};
pub use dex_list::{DexList, DexListProps};
pub use pager_bar::{PagerBar, PagerBarProps};
pub use search_bar::{SearchBar, SearchBarProps};

use ratatui::style::Color;

pub(crate) const BG_PANEL: Color = Color::Rgb(20, 32, 46);
pub(crate) const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);
pub(crate) const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
pub(crate) const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
pub(crate) const ACCENT_RED: Color = Color::Rgb(220, 38, 38);
pub(crate) const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
pub(crate) const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);

/// `mr-mime` -> `Mr Mime`
pub fn format_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
                None => "".to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
