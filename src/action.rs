//! Actions: user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::PokemonDetail;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    Init,

    // ===== Catalog =====
    /// Result: every detail that could be fetched, in completion order
    CatalogDidLoad(Vec<PokemonDetail>),
    CatalogDidError(String),

    // ===== Pagination =====
    PageNext,
    PagePrev,

    // ===== List selection =====
    SelectionMove(i16),
    /// Row clicked on the visible page; moves the cursor and opens it
    DexSelect(usize),
    /// Open the row under the cursor
    EntryOpen,
    EntryDidLoad(PokemonDetail),
    EntryDidError { name: String, error: String },

    // ===== Search =====
    SearchStart,
    SearchCancel,
    SearchSubmit,
    SearchInput(char),
    SearchBackspace,
    SearchDidLoad(PokemonDetail),
    /// Result: the service answered with a non-success status
    SearchDidMiss { query: String },
    /// Result: transport or parse failure, distinct from a miss
    SearchDidError { query: String, error: String },

    Quit,
}
