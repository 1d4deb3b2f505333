//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::paginate::{self, PAGE_SIZE};

/// List-level stub returned by the catalog list endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EntryRef {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonStat {
    pub name: String,
    pub value: u16,
}

/// Full record for one entry. Replaced wholesale on re-fetch, never patched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    pub sprite_front_default: Option<String>,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub stats: Vec<PokemonStat>,
    pub species: Option<String>,
}

/// Where the detail pane is in its lookup cycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum LookupPhase {
    #[default]
    Idle,
    Searching,
    NotFound,
    DetailShown,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchState {
    /// Search bar captures keystrokes
    pub active: bool,
    pub query: String,
}

#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Fetched details in completion order: Empty → Loading → Loaded/Failed
    #[debug(section = "Catalog", label = "Entries", debug_fmt)]
    pub catalog: DataResource<Vec<PokemonDetail>>,

    /// 1-based page number
    #[debug(section = "Catalog", label = "Page")]
    pub page: usize,

    /// Cursor row within the visible page
    #[debug(section = "Catalog", label = "Cursor")]
    pub selected: usize,

    #[debug(section = "Detail", label = "Phase", debug_fmt)]
    pub lookup: LookupPhase,

    /// Phase to fall back to when a search fails without an answer
    #[debug(skip)]
    pub lookup_before_search: LookupPhase,

    #[debug(section = "Detail", label = "Showing", debug_fmt)]
    pub detail: Option<PokemonDetail>,

    #[debug(section = "Search", label = "Query", debug_fmt)]
    pub search: SearchState,

    #[debug(section = "Status", label = "Message", debug_fmt)]
    pub message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            catalog: DataResource::Empty,
            page: 1,
            selected: 0,
            lookup: LookupPhase::Idle,
            lookup_before_search: LookupPhase::Idle,
            detail: None,
            search: SearchState::default(),
            message: None,
        }
    }
}

impl AppState {
    /// Every fetched entry; a failed or pending catalog reads as empty.
    pub fn entries(&self) -> &[PokemonDetail] {
        self.catalog.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn visible_entries(&self) -> &[PokemonDetail] {
        paginate::page_slice(self.entries(), self.page, PAGE_SIZE)
    }

    pub fn has_prev_page(&self) -> bool {
        paginate::has_prev(self.page)
    }

    pub fn has_next_page(&self) -> bool {
        paginate::has_next(self.entries().len(), self.page, PAGE_SIZE)
    }

    pub fn page_count(&self) -> usize {
        paginate::page_count(self.entries().len(), PAGE_SIZE)
    }

    pub fn cursor_entry(&self) -> Option<&PokemonDetail> {
        self.visible_entries().get(self.selected)
    }

    /// Keep the cursor on a real row after the page or list changes.
    pub fn clamp_selection(&mut self) {
        let len = self.visible_entries().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn not_found(&self) -> bool {
        self.lookup == LookupPhase::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(id: u32) -> PokemonDetail {
        PokemonDetail {
            id,
            name: format!("mon-{id}"),
            sprite_front_default: None,
            types: vec!["normal".into()],
            abilities: Vec::new(),
            stats: Vec::new(),
            species: None,
        }
    }

    #[test]
    fn pending_catalog_reads_empty() {
        let mut state = AppState::default();
        assert!(state.entries().is_empty());
        state.catalog = DataResource::Loading;
        assert!(state.entries().is_empty());
        state.catalog = DataResource::Failed("offline".into());
        assert!(state.entries().is_empty());
        assert!(!state.has_next_page());
        assert_eq!(state.page_count(), 1);
    }

    #[test]
    fn visible_entries_follow_page() {
        let state = AppState {
            catalog: DataResource::Loaded((1..=23).map(detail).collect()),
            page: 3,
            ..Default::default()
        };
        let ids: Vec<u32> = state.visible_entries().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![21, 22, 23]);
        assert!(state.has_prev_page());
        assert!(!state.has_next_page());
        assert_eq!(state.page_count(), 3);
    }

    #[test]
    fn clamp_selection_stays_on_short_page() {
        let mut state = AppState {
            catalog: DataResource::Loaded((1..=12).map(detail).collect()),
            page: 2,
            selected: 7,
            ..Default::default()
        };
        state.clamp_selection();
        assert_eq!(state.selected, 1);
        assert_eq!(state.cursor_entry().map(|d| d.id), Some(12));
    }
}
