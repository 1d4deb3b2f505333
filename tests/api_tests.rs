//! Catalog client against an in-process PokeAPI stand-in.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use pretty_assertions::assert_eq;
use serde_json::json;

use pokedex::api::{ApiError, CatalogClient};
use pokedex::config::CatalogConfig;
use pokedex::reducer::normalize_query;

#[derive(Clone)]
struct Fixture {
    base: String,
    names: Arc<Vec<String>>,
    broken: Arc<HashSet<String>>,
    list_down: bool,
}

async fn list_handler(
    State(fixture): State<Fixture>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if fixture.list_down {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let limit = params
        .get("limit")
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(20);
    let results: Vec<_> = fixture
        .names
        .iter()
        .take(limit)
        .map(|name| {
            json!({ "name": name, "url": format!("{}/pokemon/{name}/", fixture.base) })
        })
        .collect();
    Json(json!({ "count": fixture.names.len(), "results": results })).into_response()
}

async fn detail_handler(State(fixture): State<Fixture>, Path(name): Path<String>) -> Response {
    let Some(index) = fixture.names.iter().position(|known| *known == name) else {
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    };
    if fixture.broken.contains(&name) {
        return (StatusCode::SERVICE_UNAVAILABLE, "upstream busy").into_response();
    }
    let id = index + 1;
    Json(json!({
        "id": id,
        "name": name,
        "sprites": {
            "front_default": format!("{}/sprites/{id}.png", fixture.base),
            "back_default": null
        },
        "types": [{ "slot": 1, "type": { "name": "grass", "url": "" } }],
        "abilities": [
            { "ability": { "name": "overgrow", "url": "" }, "is_hidden": false, "slot": 1 }
        ],
        "stats": [
            { "base_stat": 45, "effort": 0, "stat": { "name": "hp", "url": "" } },
            { "base_stat": 49, "effort": 0, "stat": { "name": "attack", "url": "" } }
        ],
        "species": { "name": name, "url": "" },
        "height": 7
    }))
    .into_response()
}

/// Serve the fixture on an ephemeral port and return its base URL.
async fn spawn_catalog(names: &[&str], broken: &[&str], list_down: bool) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let base = format!("http://{}", listener.local_addr().expect("local addr"));
    let fixture = Fixture {
        base: base.clone(),
        names: Arc::new(names.iter().map(|name| name.to_string()).collect()),
        broken: Arc::new(broken.iter().map(|name| name.to_string()).collect()),
        list_down,
    };
    let app = Router::new()
        .route("/pokemon", get(list_handler))
        .route("/pokemon/:name", get(detail_handler))
        .route("/pokemon/:name/", get(detail_handler))
        .with_state(fixture);
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve fixture");
    });
    base
}

fn client(base: &str, max_in_flight: Option<usize>) -> CatalogClient {
    let config = CatalogConfig {
        max_in_flight,
        ..CatalogConfig::with_api_base(base)
    };
    CatalogClient::new(config).expect("build client")
}

const STARTERS: [&str; 6] = [
    "bulbasaur",
    "ivysaur",
    "venusaur",
    "charmander",
    "charmeleon",
    "charizard",
];

#[tokio::test]
async fn failed_detail_is_omitted_from_catalog() {
    let base = spawn_catalog(&STARTERS, &["venusaur"], false).await;

    let entries = client(&base, None)
        .load_catalog()
        .await
        .expect("list endpoint is up");

    assert_eq!(entries.len(), STARTERS.len() - 1);
    let mut names: Vec<_> = entries.iter().map(|entry| entry.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(
        names,
        vec!["bulbasaur", "charizard", "charmander", "charmeleon", "ivysaur"]
    );
}

#[tokio::test]
async fn list_limit_bounds_the_catalog() {
    let base = spawn_catalog(&STARTERS, &[], false).await;
    let config = CatalogConfig {
        list_limit: 4,
        ..CatalogConfig::with_api_base(&base)
    };
    let client = CatalogClient::new(config).expect("build client");

    let refs = client.fetch_entry_refs().await.expect("list");
    assert_eq!(refs.len(), 4);
    assert_eq!(refs[0].url, format!("{base}/pokemon/bulbasaur/"));

    let entries = client.load_catalog().await.expect("catalog");
    assert_eq!(entries.len(), 4);
}

#[tokio::test]
async fn capped_fan_out_still_loads_everything() {
    let base = spawn_catalog(&STARTERS, &[], false).await;

    let entries = client(&base, Some(2)).load_catalog().await.expect("catalog");

    let mut ids: Vec<_> = entries.iter().map(|entry| entry.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn list_failure_is_an_error() {
    let base = spawn_catalog(&STARTERS, &[], true).await;

    let result = client(&base, None).load_catalog().await;

    assert!(
        matches!(result, Err(ApiError::Status { status: 500, .. })),
        "{result:?}"
    );
}

#[tokio::test]
async fn unreachable_service_is_a_request_error() {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let result = client(&format!("http://{addr}"), None).load_catalog().await;

    assert!(matches!(result, Err(ApiError::Request(_))), "{result:?}");
}

#[tokio::test]
async fn lookup_maps_detail_fields() {
    let base = spawn_catalog(&STARTERS, &[], false).await;

    let detail = client(&base, None)
        .lookup("charmander")
        .await
        .expect("known entry");

    assert_eq!(detail.id, 4);
    assert_eq!(detail.name, "charmander");
    assert_eq!(
        detail.sprite_front_default,
        Some(format!("{base}/sprites/4.png"))
    );
    assert_eq!(detail.types, vec!["grass".to_string()]);
    assert_eq!(detail.abilities, vec!["overgrow".to_string()]);
    assert_eq!(detail.stats.len(), 2);
    assert_eq!(detail.stats[1].name, "attack");
    assert_eq!(detail.stats[1].value, 49);
    assert_eq!(detail.species.as_deref(), Some("charmander"));
}

#[tokio::test]
async fn lookup_miss_is_not_found() {
    let base = spawn_catalog(&STARTERS, &[], false).await;

    let result = client(&base, None).lookup("missingno").await;

    assert!(
        matches!(&result, Err(ApiError::NotFound(name)) if name == "missingno"),
        "{result:?}"
    );
}

#[tokio::test]
async fn lookup_non_success_status_is_not_found() {
    let base = spawn_catalog(&STARTERS, &["ivysaur"], false).await;

    let result = client(&base, None).lookup("ivysaur").await;

    assert!(matches!(result, Err(ApiError::NotFound(_))), "{result:?}");
}

#[tokio::test]
async fn normalized_query_matches_lowercase_names() {
    let base = spawn_catalog(&STARTERS, &[], false).await;
    let client = client(&base, None);

    assert!(matches!(
        client.lookup("Bulbasaur").await,
        Err(ApiError::NotFound(_))
    ));

    let detail = client
        .lookup(&normalize_query("  Bulbasaur "))
        .await
        .expect("lowercased query resolves");
    assert_eq!(detail.id, 1);
}

#[tokio::test]
async fn reserved_characters_in_query_stay_in_the_name() {
    let base = spawn_catalog(&STARTERS, &[], false).await;
    let client = client(&base, None);

    for query in ["bulbasaur?x", "ivysaur#zz", "ivysaur/", "../pokemon"] {
        let result = client.lookup(query).await;
        assert!(
            matches!(&result, Err(ApiError::NotFound(name)) if name == query),
            "{query}: {result:?}"
        );
    }
}
