use serde::{Deserialize, Serialize};

/// Catalog item type.  Doubles as the search type and the seed list key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Artist,
    Track,
}

impl ItemKind {
    pub const ALL: [ItemKind; 2] = [ItemKind::Artist, ItemKind::Track];

    /// Wire name, as used in `?type=`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Artist => "artist",
            Self::Track => "track",
        }
    }

    /// Key of the paging object in a search response (`artists` / `tracks`).
    pub fn plural(self) -> &'static str {
        match self {
            Self::Artist => "artists",
            Self::Track => "tracks",
        }
    }

    /// Parse a radio label.  Only the exact wire names are accepted.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "artist" => Some(Self::Artist),
            "track" => Some(Self::Track),
            _ => None,
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

/// One entry of a search response.  Transient: only lives in the result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Only populated for tracks.
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

impl SearchResultItem {
    /// `name` for artists, `"{primaryArtist} - {name}"` for tracks.
    pub fn label(&self) -> String {
        match self.kind {
            ItemKind::Artist => self.name.clone(),
            ItemKind::Track => with_primary_artist(&self.artists, &self.name),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// `GET /search` body.  Only the paging object matching the requested type
/// is expected to be present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    pub artists: Option<Paging<SearchResultItem>>,
    pub tracks: Option<Paging<SearchResultItem>>,
}

impl SearchResponse {
    pub fn into_items(self, kind: ItemKind) -> Option<Vec<SearchResultItem>> {
        let paging = match kind {
            ItemKind::Artist => self.artists,
            ItemKind::Track => self.tracks,
        };
        paging.map(|p| p.items)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecommendedTrack {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

impl RecommendedTrack {
    pub fn label(&self) -> String {
        with_primary_artist(&self.artists, &self.name)
    }
}

/// `GET /rec` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationResponse {
    #[serde(default)]
    pub tracks: Vec<RecommendedTrack>,
}

/// `POST /playlist` body.
#[derive(Debug, Clone, Serialize)]
pub struct SavePlaylistRequest<'a> {
    pub uris: &'a [String],
}

/// `POST /playlist` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SavedPlaylist {
    pub id: String,
    pub username: String,
}

pub const SPOTIFY_OPEN_URL: &str = "https://open.spotify.com";

impl SavedPlaylist {
    pub fn url(&self) -> String {
        format!(
            "{}/user/{}/playlist/{}",
            SPOTIFY_OPEN_URL, self.username, self.id
        )
    }
}

fn with_primary_artist(artists: &[ArtistRef], name: &str) -> String {
    match artists.first() {
        Some(artist) => format!("{} - {}", artist.name, name),
        None => name.to_string(),
    }
}
