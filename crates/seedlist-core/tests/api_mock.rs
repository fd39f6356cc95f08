//! API client against an in-process mock of the backend.
//!
//! Each test binds a fresh axum router on an ephemeral port and records what
//! the client sent (path, decoded query, body, cookie header).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use seedlist_core::api::{ApiClient, ApiError, AuthStatus};
use seedlist_core::config::{ApiSettings, Config};
use seedlist_core::models::ItemKind;
use seedlist_core::recommend::{RecommendationRequest, Targets};
use seedlist_core::seeds::{SeedItem, Seeds};

#[derive(Debug, Clone)]
struct Recorded {
    path: &'static str,
    query: HashMap<String, String>,
    /// Query string exactly as it arrived on the wire.
    raw_query: Option<String>,
    body: Option<Value>,
    cookie: Option<String>,
}

#[derive(Clone, Default)]
struct Mock {
    log: Arc<Mutex<Vec<Recorded>>>,
    authenticated: bool,
}

impl Mock {
    fn record(
        &self,
        path: &'static str,
        query: HashMap<String, String>,
        body: Option<Value>,
        headers: &HeaderMap,
    ) {
        let cookie = headers
            .get("cookie")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.log.lock().unwrap().push(Recorded {
            path,
            query,
            raw_query: None,
            body,
            cookie,
        });
    }

    fn set_raw_query(&self, raw: Option<&str>) {
        if let Some(last) = self.log.lock().unwrap().last_mut() {
            last.raw_query = raw.map(str::to_string);
        }
    }

    fn requests(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }
}

async fn auth(State(mock): State<Mock>, headers: HeaderMap) -> StatusCode {
    mock.record("/auth", HashMap::new(), None, &headers);
    if mock.authenticated {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    }
}

async fn search(
    State(mock): State<Mock>,
    uri: Uri,
    Query(q): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    mock.record("/search", q.clone(), None, &headers);
    mock.set_raw_query(uri.query());
    match q.get("type").map(String::as_str) {
        Some("artist") => Json(json!({
            "artists": {"items": [
                {"id": "X1", "name": "Daft Punk", "type": "artist"}
            ]}
        })),
        Some("track") => Json(json!({
            "tracks": {"items": [
                {"id": "T1", "name": "One More Time", "type": "track",
                 "artists": [{"name": "Daft Punk"}]},
                {"id": "T2", "name": "Genesis", "type": "track",
                 "artists": [{"name": "Justice"}]},
                {"id": "T3", "name": "Midnight City", "type": "track",
                 "artists": [{"name": "M83"}]}
            ]}
        })),
        _ => Json(json!({})),
    }
}

async fn rec(
    State(mock): State<Mock>,
    Query(q): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Json<Value> {
    mock.record("/rec", q, None, &headers);
    Json(json!({
        "tracks": [
            {"uri": "u1", "name": "Aerodynamic", "artists": [{"name": "Daft Punk"}]},
            {"uri": "u2", "name": "D.A.N.C.E.", "artists": [{"name": "Justice"}]}
        ]
    }))
}

async fn playlist(
    State(mock): State<Mock>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    mock.record("/playlist", HashMap::new(), Some(body), &headers);
    Json(json!({"id": "P1", "username": "alice"}))
}

async fn start(mock: Mock) -> String {
    let app = Router::new()
        .route("/auth", get(auth))
        .route("/search", get(search))
        .route("/rec", get(rec))
        .route("/playlist", post(playlist))
        .with_state(mock);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(base: &str, cookie: Option<&str>) -> ApiClient {
    let config = Config::resolve(false).unwrap().with_api_url(base);
    ApiClient::new(&config, &ApiSettings::default(), cookie).unwrap()
}

#[tokio::test]
async fn test_search_artist_scenario() {
    let mock = Mock::default();
    let base = start(mock.clone()).await;
    let api = client(&base, None);

    let items = api.search("Daft Punk", ItemKind::Artist).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "X1");
    assert_eq!(items[0].label(), "Daft Punk");

    let reqs = mock.requests();
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].path, "/search");
    assert_eq!(reqs[0].query.get("q").unwrap(), "Daft Punk");
    assert_eq!(reqs[0].query.get("type").unwrap(), "artist");
    assert_eq!(reqs[0].raw_query.as_deref(), Some("q=Daft%20Punk&type=artist"));
}

#[tokio::test]
async fn test_search_returns_every_item_with_id_and_type() {
    let mock = Mock::default();
    let base = start(mock.clone()).await;
    let api = client(&base, None);

    let items = api.search("anything", ItemKind::Track).await.unwrap();
    assert_eq!(items.len(), 3);
    let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["T1", "T2", "T3"]);
    assert!(items.iter().all(|i| i.kind == ItemKind::Track));
    assert_eq!(items[1].label(), "Justice - Genesis");
}

#[tokio::test]
async fn test_recommend_scenario() {
    let mock = Mock::default();
    let base = start(mock.clone()).await;
    let api = client(&base, None);

    let mut seeds = Seeds::new();
    seeds
        .add(SeedItem {
            id: "X1".into(),
            label: "Daft Punk".into(),
            kind: ItemKind::Artist,
        })
        .unwrap();
    let req = RecommendationRequest::from_seeds(&seeds, Targets::default());
    let tracks = api.recommend(&req).await.unwrap();
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].display_name, "Daft Punk - Aerodynamic");
    assert_eq!(tracks[1].uri, "u2");

    let reqs = mock.requests();
    assert_eq!(reqs[0].path, "/rec");
    let q = &reqs[0].query;
    assert_eq!(q.get("seed_artists").unwrap(), "X1");
    assert_eq!(q.get("seed_tracks").unwrap(), "");
    assert_eq!(q.get("target_danceability").unwrap(), "0.50");
    assert_eq!(q.get("target_energy").unwrap(), "0.50");
    assert_eq!(q.get("target_popularity").unwrap(), "50");
    assert_eq!(q.get("target_valence").unwrap(), "0.50");
}

#[tokio::test]
async fn test_recommend_joins_multiple_seeds_with_commas() {
    let mock = Mock::default();
    let base = start(mock.clone()).await;
    let api = client(&base, None);

    let mut seeds = Seeds::new();
    for id in ["T1", "T2"] {
        seeds
            .add(SeedItem {
                id: id.into(),
                label: id.into(),
                kind: ItemKind::Track,
            })
            .unwrap();
    }
    let req = RecommendationRequest::from_seeds(&seeds, Targets::default());
    api.recommend(&req).await.unwrap();
    assert_eq!(mock.requests()[0].query.get("seed_tracks").unwrap(), "T1,T2");
}

#[tokio::test]
async fn test_save_playlist_scenario() {
    let mock = Mock::default();
    let base = start(mock.clone()).await;
    let api = client(&base, None);

    let saved = api
        .save_playlist(&["u1".to_string(), "u2".to_string()])
        .await
        .unwrap();
    assert_eq!(saved.id, "P1");
    assert_eq!(saved.username, "alice");
    assert_eq!(saved.url(), "https://open.spotify.com/user/alice/playlist/P1");

    let reqs = mock.requests();
    assert_eq!(reqs[0].path, "/playlist");
    assert_eq!(reqs[0].body, Some(json!({"uris": ["u1", "u2"]})));
}

#[tokio::test]
async fn test_auth_status_and_session_cookie() {
    let mock = Mock {
        authenticated: true,
        ..Mock::default()
    };
    let base = start(mock.clone()).await;
    let api = client(&base, Some("access_token=abc; token_expiry=xyz"));

    assert_eq!(api.check_auth().await.unwrap(), AuthStatus::Authenticated);
    let cookie = mock.requests()[0].cookie.clone().unwrap();
    assert!(cookie.contains("access_token=abc"));
    assert!(cookie.contains("token_expiry=xyz"));
}

#[tokio::test]
async fn test_auth_unauthenticated() {
    let mock = Mock::default();
    let base = start(mock.clone()).await;
    let api = client(&base, None);

    assert_eq!(
        api.check_auth().await.unwrap(),
        AuthStatus::Unauthenticated(reqwest_status(401))
    );
}

#[tokio::test]
async fn test_unreachable_server_is_connect_error() {
    // Bind then drop to get a port that is very likely closed.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = client(&format!("http://{}", addr), None);
    let err = api.check_auth().await.unwrap_err();
    assert!(err.is_connect(), "unexpected error: {err}");
}

#[tokio::test]
async fn test_missing_paging_object_is_an_error() {
    let app = Router::new().route(
        "/search",
        get(|| async { Json(json!({"tracks": {"items": []}})) }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let api = client(&format!("http://{}", addr), None);
    let err = api.search("x", ItemKind::Artist).await.unwrap_err();
    assert!(matches!(err, ApiError::MissingField { field: "artists", .. }));
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let app = Router::new().route(
        "/playlist",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let api = client(&format!("http://{}", addr), None);
    let err = api.save_playlist(&["u1".to_string()]).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { .. }));
}

fn reqwest_status(code: u16) -> reqwest::StatusCode {
    reqwest::StatusCode::from_u16(code).unwrap()
}
