//! Effects - side effects declared by the reducer

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fetch the reference list, then every detail concurrently
    LoadCatalog,
    /// Look up one entry by normalized search text
    SearchEntry { query: String },
    /// Re-fetch the detail of a listed entry
    LoadEntry { name: String },
}
