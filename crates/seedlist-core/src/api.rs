//! Backend API client
//!
//! Every request carries the session cookie through a shared jar, the way a
//! browser sends `credentials: "include"`.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::{Client, RequestBuilder, Response, Url};
pub use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::config::{ApiSettings, Config};
use crate::models::{
    ItemKind, RecommendationResponse, SavePlaylistRequest, SavedPlaylist, SearchResponse,
    SearchResultItem,
};
use crate::playlist::PlaylistTrack;
use crate::recommend::RecommendationRequest;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid type: {0:?}")]
    InvalidSearchType(String),
    #[error("empty search query")]
    EmptyQuery,
    #[error("invalid API base URL {url}: {reason}")]
    BaseUrl { url: String, reason: String },
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("failed to fetch {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned status {status}")]
    Status { url: String, status: StatusCode },
    #[error("failed to parse response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("response from {url} has no `{field}` object")]
    MissingField { url: String, field: &'static str },
}

impl ApiError {
    /// The server could not be reached at all.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Connect { .. })
    }
}

/// Outcome of `GET /auth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Authenticated,
    Unauthenticated(StatusCode),
}

/// Validate a radio label before anything touches the network.
pub fn parse_search_type(label: &str) -> Result<ItemKind, ApiError> {
    ItemKind::from_label(label).ok_or_else(|| ApiError::InvalidSearchType(label.to_string()))
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(
        config: &Config,
        settings: &ApiSettings,
        session_cookie: Option<&str>,
    ) -> Result<Self, ApiError> {
        let base_url = config.api_url.trim_end_matches('/').to_string();
        let url = Url::parse(&base_url).map_err(|e| ApiError::BaseUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;

        let jar = Jar::default();
        if let Some(cookie) = session_cookie {
            for pair in cookie.split(';').map(str::trim).filter(|p| !p.is_empty()) {
                jar.add_cookie_str(pair, &url);
            }
        }

        let http = Client::builder()
            .cookie_provider(Arc::new(jar))
            .timeout(Duration::from_secs(settings.timeout_secs.max(1)))
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /auth`: any 2xx means the session cookie is valid.
    pub async fn check_auth(&self) -> Result<AuthStatus, ApiError> {
        let url = self.endpoint("/auth");
        let response = send(&url, self.http.get(&url)).await?;
        let status = response.status();
        debug!("auth check: {}", status);
        if status.is_success() {
            Ok(AuthStatus::Authenticated)
        } else {
            Ok(AuthStatus::Unauthenticated(status))
        }
    }

    /// `GET /search?q=&type=`: returns `json[type+"s"].items`.
    pub async fn search(
        &self,
        query: &str,
        kind: ItemKind,
    ) -> Result<Vec<SearchResultItem>, ApiError> {
        if query.is_empty() {
            return Err(ApiError::EmptyQuery);
        }
        let url = self.endpoint("/search");
        // Spaces go out as %20, not the form-style `+`.
        let full = format!(
            "{}?q={}&type={}",
            url,
            urlencoding::encode(query),
            kind.as_str()
        );
        let request = self.http.get(&full);
        let body: SearchResponse = json(&url, send_ok(&url, request).await?).await?;
        body.into_items(kind).ok_or(ApiError::MissingField {
            url,
            field: kind.plural(),
        })
    }

    /// `GET /rec?seed_artists=&seed_tracks=&target_*=`
    pub async fn recommend(
        &self,
        req: &RecommendationRequest,
    ) -> Result<Vec<PlaylistTrack>, ApiError> {
        let url = self.endpoint("/rec");
        let request = self.http.get(&url).query(&req.query_pairs());
        let body: RecommendationResponse = json(&url, send_ok(&url, request).await?).await?;
        Ok(body.tracks.into_iter().map(PlaylistTrack::from).collect())
    }

    /// `POST /playlist` with `{"uris": [...]}`.
    pub async fn save_playlist(&self, uris: &[String]) -> Result<SavedPlaylist, ApiError> {
        let url = self.endpoint("/playlist");
        let request = self.http.post(&url).json(&SavePlaylistRequest { uris });
        json(&url, send_ok(&url, request).await?).await
    }
}

async fn send(url: &str, request: RequestBuilder) -> Result<Response, ApiError> {
    request.send().await.map_err(|source| {
        if source.is_connect() {
            ApiError::Connect {
                url: url.to_string(),
                source,
            }
        } else {
            ApiError::Request {
                url: url.to_string(),
                source,
            }
        }
    })
}

async fn send_ok(url: &str, request: RequestBuilder) -> Result<Response, ApiError> {
    let response = send(url, request).await?;
    if !response.status().is_success() {
        return Err(ApiError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }
    Ok(response)
}

async fn json<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, ApiError> {
    response.json().await.map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}
