//! PokeAPI client

use std::future::Future;
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::CatalogConfig;
use crate::state::{EntryRef, PokemonDetail, PokemonStat};

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("{0} not found")]
    NotFound(String),
    #[error("response parse error: {0}")]
    Parse(String),
    #[error("detail fetch cancelled")]
    Cancelled,
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    #[serde(default)]
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    #[serde(default)]
    sprites: serde_json::Value,
    #[serde(default)]
    types: Vec<PokemonTypeSlot>,
    #[serde(default)]
    abilities: Vec<PokemonAbilitySlot>,
    #[serde(default)]
    stats: Vec<PokemonStatSlot>,
    species: Option<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonAbilitySlot {
    ability: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u16,
    stat: NamedResource,
}

impl From<PokemonResponse> for PokemonDetail {
    fn from(response: PokemonResponse) -> Self {
        PokemonDetail {
            id: response.id,
            sprite_front_default: pointer_string(&response.sprites, "/front_default"),
            name: response.name,
            types: response
                .types
                .into_iter()
                .map(|slot| slot.type_info.name)
                .collect(),
            abilities: response
                .abilities
                .into_iter()
                .map(|slot| slot.ability.name)
                .collect(),
            stats: response
                .stats
                .into_iter()
                .map(|slot| PokemonStat {
                    name: slot.stat.name,
                    value: slot.base_stat,
                })
                .collect(),
            species: response.species.map(|species| species.name),
        }
    }
}

// ============================================================================
// Client
// ============================================================================

/// Read-only handle on the catalog service. Cheap to clone.
#[derive(Clone, Debug)]
pub struct CatalogClient {
    http: reqwest::Client,
    config: Arc<CatalogConfig>,
}

impl CatalogClient {
    pub fn new(config: CatalogConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("pokedex/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Bounded list of `{name, url}` stubs from the list endpoint.
    pub async fn fetch_entry_refs(&self) -> Result<Vec<EntryRef>, ApiError> {
        let url = self.config.list_url();
        let response: ListResponse = self.get_json(&url).await?;
        Ok(response
            .results
            .into_iter()
            .map(|entry| EntryRef {
                name: entry.name,
                url: entry.url,
            })
            .collect())
    }

    /// Full detail from an entry's locator URL.
    pub async fn fetch_detail(&self, url: &str) -> Result<PokemonDetail, ApiError> {
        let response: PokemonResponse = self.get_json(url).await?;
        Ok(response.into())
    }

    /// Detail by name or numeric id. Any non-success status reads as not found.
    pub async fn lookup(&self, name: &str) -> Result<PokemonDetail, ApiError> {
        let url = self.config.entry_url(name);
        tracing::debug!(%url, "lookup");
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), name, "lookup missed");
            return Err(ApiError::NotFound(name.to_string()));
        }
        let bytes = response.bytes().await?;
        let parsed: PokemonResponse =
            serde_json::from_slice(&bytes).map_err(|err| ApiError::Parse(err.to_string()))?;
        Ok(parsed.into())
    }

    /// List, then every detail concurrently. Items that fail are dropped;
    /// only a list failure is an error. Nothing is retried.
    pub async fn load_catalog(&self) -> Result<Vec<PokemonDetail>, ApiError> {
        let refs = self.fetch_entry_refs().await.inspect_err(|error| {
            tracing::warn!(%error, "catalog list unavailable");
        })?;
        let total = refs.len();
        let client = self.clone();
        let details = fan_out(refs, self.config.max_in_flight, move |entry| {
            let client = client.clone();
            async move { client.fetch_detail(&entry.url).await }
        })
        .await;
        tracing::info!(loaded = details.len(), total, "catalog loaded");
        Ok(details)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        tracing::debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|err| ApiError::Parse(err.to_string()))
    }
}

/// Run `fetch` for every reference at once (or at most `max_in_flight` at a
/// time) and wait for all of them. Results come back in completion order;
/// failures are logged and omitted.
pub async fn fan_out<T, F, Fut>(
    refs: Vec<EntryRef>,
    max_in_flight: Option<usize>,
    fetch: F,
) -> Vec<T>
where
    T: Send + 'static,
    F: Fn(EntryRef) -> Fut,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    if refs.is_empty() {
        return Vec::new();
    }

    let permits = max_in_flight.unwrap_or(refs.len()).max(1);
    let semaphore = Arc::new(Semaphore::new(permits));
    let mut join_set = JoinSet::new();
    let expected = refs.len();
    for entry in refs {
        let name = entry.name.clone();
        let semaphore = semaphore.clone();
        let request = fetch(entry);
        join_set.spawn(async move {
            let result = match semaphore.acquire_owned().await {
                Ok(_permit) => request.await,
                Err(_) => Err(ApiError::Cancelled),
            };
            (name, result)
        });
    }

    let mut items = Vec::with_capacity(expected);
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((_, Ok(item))) => items.push(item),
            Ok((name, Err(error))) => {
                tracing::warn!(entry = %name, %error, "dropping entry");
            }
            Err(error) => {
                tracing::warn!(%error, "detail task failed to join");
            }
        }
    }
    items
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}
