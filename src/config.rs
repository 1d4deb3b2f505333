//! Catalog client configuration

use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_LIST_LIMIT: u16 = 50;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where the catalog lives and how hard to hit it
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogConfig {
    /// Service root, e.g. `https://pokeapi.co/api/v2`
    pub api_base: String,
    /// Number of references requested from the list endpoint
    pub list_limit: u16,
    /// Cap on concurrent detail fetches; `None` issues them all at once
    pub max_in_flight: Option<usize>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            list_limit: DEFAULT_LIST_LIMIT,
            max_in_flight: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl CatalogConfig {
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            ..Self::default()
        }
    }

    pub fn list_url(&self) -> String {
        format!("{}/pokemon?limit={}", self.base(), self.list_limit)
    }

    /// `name` is user text; it is escaped as a single path segment.
    pub fn entry_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}", self.base(), urlencoding::encode(name))
    }

    fn base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_without_double_slash() {
        let config = CatalogConfig::with_api_base("http://localhost:9000/api/");
        assert_eq!(config.list_url(), "http://localhost:9000/api/pokemon?limit=50");
        assert_eq!(
            config.entry_url("pikachu"),
            "http://localhost:9000/api/pokemon/pikachu"
        );
    }

    #[test]
    fn entry_url_escapes_reserved_characters() {
        let config = CatalogConfig::with_api_base("http://localhost:9000");
        assert_eq!(
            config.entry_url("bulbasaur?x"),
            "http://localhost:9000/pokemon/bulbasaur%3Fx"
        );
        assert_eq!(
            config.entry_url("ivysaur#zz"),
            "http://localhost:9000/pokemon/ivysaur%23zz"
        );
        assert_eq!(
            config.entry_url("../type/1"),
            "http://localhost:9000/pokemon/..%2Ftype%2F1"
        );
        assert_eq!(config.entry_url("mr-mime"), "http://localhost:9000/pokemon/mr-mime");
    }

    #[test]
    fn default_points_at_pokeapi() {
        let config = CatalogConfig::default();
        assert_eq!(config.list_url(), "https://pokeapi.co/api/v2/pokemon?limit=50");
        assert_eq!(config.max_in_flight, None);
    }
}
