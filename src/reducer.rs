//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, LookupPhase};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.catalog = DataResource::Loading;
            state.page = 1;
            state.selected = 0;
            state.message = None;
            DispatchResult::changed_with(Effect::LoadCatalog)
        }

        Action::CatalogDidLoad(entries) => {
            if entries.is_empty() {
                state.message = Some("No entries could be loaded".to_string());
            }
            state.catalog = DataResource::Loaded(entries);
            state.page = 1;
            state.selected = 0;
            DispatchResult::changed()
        }

        Action::CatalogDidError(error) => {
            state.message = Some(format!("Catalog error: {error}"));
            state.catalog = DataResource::Failed(error);
            state.page = 1;
            state.selected = 0;
            DispatchResult::changed()
        }

        Action::PageNext => {
            if !state.has_next_page() {
                return DispatchResult::unchanged();
            }
            state.page += 1;
            state.clamp_selection();
            DispatchResult::changed()
        }

        Action::PagePrev => {
            if !state.has_prev_page() {
                return DispatchResult::unchanged();
            }
            state.page -= 1;
            state.clamp_selection();
            DispatchResult::changed()
        }

        Action::SelectionMove(delta) => {
            let len = state.visible_entries().len();
            if len == 0 {
                return DispatchResult::unchanged();
            }
            let next = clamp_index(state.selected, len, delta);
            if next == state.selected {
                return DispatchResult::unchanged();
            }
            state.selected = next;
            DispatchResult::changed()
        }

        Action::DexSelect(index) => {
            if index >= state.visible_entries().len() {
                return DispatchResult::unchanged();
            }
            state.selected = index;
            open_cursor_entry(state)
        }

        Action::EntryOpen => open_cursor_entry(state),

        Action::EntryDidLoad(detail) => {
            state.detail = Some(detail);
            state.lookup = LookupPhase::DetailShown;
            state.message = None;
            DispatchResult::changed()
        }

        Action::EntryDidError { name, error } => {
            state.message = Some(format!("{name} load error: {error}"));
            DispatchResult::changed()
        }

        Action::SearchStart => {
            if state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = true;
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if !state.search.active && state.search.query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.search.query.clear();
            if state.lookup == LookupPhase::NotFound {
                state.lookup = LookupPhase::Idle;
            }
            DispatchResult::changed()
        }

        Action::SearchInput(ch) => {
            state.search.query.push(ch);
            DispatchResult::changed()
        }

        Action::SearchBackspace => {
            if state.search.query.pop().is_none() {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            state.search.active = false;
            let query = normalize_query(&state.search.query);
            if query.is_empty() {
                return DispatchResult::changed();
            }
            if state.lookup != LookupPhase::Searching {
                state.lookup_before_search = state.lookup;
            }
            state.lookup = LookupPhase::Searching;
            state.message = None;
            DispatchResult::changed_with(Effect::SearchEntry { query })
        }

        Action::SearchDidLoad(detail) => {
            state.detail = Some(detail);
            state.lookup = LookupPhase::DetailShown;
            state.message = None;
            DispatchResult::changed()
        }

        Action::SearchDidMiss { .. } => {
            state.detail = None;
            state.lookup = LookupPhase::NotFound;
            DispatchResult::changed()
        }

        Action::SearchDidError { query, error } => {
            state.lookup = state.lookup_before_search;
            state.message = Some(format!("Search for {query} failed: {error}"));
            DispatchResult::changed()
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Lowercased, trimmed search text as sent to the lookup endpoint.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn open_cursor_entry(state: &mut AppState) -> DispatchResult<Effect> {
    let Some(entry) = state.cursor_entry() else {
        return DispatchResult::unchanged();
    };
    let name = entry.name.clone();
    DispatchResult::changed_with(Effect::LoadEntry { name })
}

fn clamp_index(current: usize, len: usize, delta: i16) -> usize {
    let max = len.saturating_sub(1) as i64;
    (current as i64 + delta as i64).clamp(0, max) as usize
}
