//! AppContainer: the search / seed / playlist workflow as an explicit model.
//!
//! The App owns one of these once the session is authenticated.  Operations
//! that need the network do not perform it: they return an [`Effect`] carrying
//! a [`RequestToken`], the App runs it on a background task, and the result
//! comes back through the matching `apply_*` method.  A result whose token has
//! been superseded is dropped ([`Outcome::Stale`]).

use chrono::{DateTime, Local};
use tracing::{debug, error, info, warn};

use seedlist_core::api::{parse_search_type, ApiError};
use seedlist_core::models::{ItemKind, SavedPlaylist, SearchResultItem};
use seedlist_core::playlist::{Playlist, PlaylistTrack};
use seedlist_core::recommend::{RecommendationRequest, TargetKind, Targets};
use seedlist_core::request::{RequestGate, RequestKind, RequestToken};
use seedlist_core::seeds::{SeedAdded, SeedItem, Seeds};

use crate::widgets::link_button::LinkButton;
use crate::widgets::radio_button::{RadioButton, RadioGroup};

pub const SEARCH_TYPE_GROUP: &str = "search-method";

/// Network work requested by the model.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Search {
        token: RequestToken,
        query: String,
        kind: ItemKind,
    },
    Recommend {
        token: RequestToken,
        request: RecommendationRequest,
    },
    Save {
        token: RequestToken,
        uris: Vec<String>,
    },
}

impl Effect {
    pub fn token(&self) -> RequestToken {
        match self {
            Self::Search { token, .. } | Self::Recommend { token, .. } | Self::Save { token, .. } => {
                *token
            }
        }
    }
}

/// What happened to a response handed back to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// A newer request of the same kind was issued (or it was cancelled).
    Stale,
    Failed(String),
}

/// The link rendered after a successful save.
#[derive(Debug, Clone)]
pub struct SavedLink {
    pub link: LinkButton,
    pub saved_at: DateTime<Local>,
}

impl SavedLink {
    fn new(saved: &SavedPlaylist) -> Self {
        let url = saved.url();
        Self {
            link: LinkButton::new(url.clone(), url),
            saved_at: Local::now(),
        }
    }

    pub fn url(&self) -> &str {
        self.link.href()
    }
}

pub struct AppContainer {
    query: String,
    search_type: RadioGroup,
    results: Vec<SearchResultItem>,
    seeds: Seeds,
    targets: Targets,
    playlist: Playlist,
    saved: Option<SavedLink>,
    /// URIs of the save in flight, to tell whether the shown playlist is the
    /// one being saved when the response lands.
    saving: Vec<String>,
    alert: Option<String>,
    gate: RequestGate,
}

impl AppContainer {
    pub fn new(targets: Targets) -> Self {
        let buttons = ItemKind::ALL
            .iter()
            .map(|k| RadioButton::new(k.as_str(), *k == ItemKind::Artist))
            .collect();
        Self {
            query: String::new(),
            search_type: RadioGroup::new(SEARCH_TYPE_GROUP, buttons),
            results: Vec::new(),
            seeds: Seeds::new(),
            targets,
            playlist: Playlist::new(),
            saved: None,
            saving: Vec::new(),
            alert: None,
            gate: RequestGate::new(),
        }
    }

    /// Build with a caller-supplied search-type group (any labels).
    pub fn with_search_type(mut self, group: RadioGroup) -> Self {
        self.search_type = group;
        self
    }

    // ── Search ────────────────────────────────────────────────────────────────

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Mirror the search field.  An empty field clears the result list and
    /// drops any search still in flight.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        if self.query.is_empty() {
            self.clear_results();
            self.gate.cancel(RequestKind::Search);
        }
    }

    pub fn search_type(&self) -> &RadioGroup {
        &self.search_type
    }

    /// Enter in the search field.
    pub fn submit_search(&mut self) -> Option<Effect> {
        self.search()
    }

    /// Radio selection change re-runs the search with the current query.
    pub fn select_search_type(&mut self, id: &str) -> Option<Effect> {
        if self.search_type.select(id) {
            self.search()
        } else {
            None
        }
    }

    pub fn toggle_search_type(&mut self) -> Option<Effect> {
        self.search_type.select_next()?;
        self.search()
    }

    fn search(&mut self) -> Option<Effect> {
        if self.query.is_empty() {
            return None;
        }
        let label = self.search_type.selected().unwrap_or_default();
        let kind = match parse_search_type(label) {
            Ok(kind) => kind,
            Err(e) => {
                error!("{}", e);
                return None;
            }
        };
        let token = self.gate.issue(RequestKind::Search);
        debug!("search #{}: {:?} ({})", token.seq(), self.query, kind);
        Some(Effect::Search {
            token,
            query: self.query.clone(),
            kind,
        })
    }

    pub fn apply_search(
        &mut self,
        token: RequestToken,
        result: Result<Vec<SearchResultItem>, ApiError>,
    ) -> Outcome {
        if !self.gate.complete(token) {
            debug!("dropping stale search #{}", token.seq());
            return Outcome::Stale;
        }
        match result {
            Ok(items) => {
                debug!("search #{}: {} results", token.seq(), items.len());
                self.results = items;
                Outcome::Applied
            }
            Err(e) => {
                error!("search failed: {}", e);
                Outcome::Failed(e.to_string())
            }
        }
    }

    pub fn results(&self) -> &[SearchResultItem] {
        &self.results
    }

    pub fn clear_results(&mut self) {
        self.results.clear();
    }

    // ── Seeds ─────────────────────────────────────────────────────────────────

    /// Add the result at `idx` to its seed list.  A full list raises the
    /// blocking alert and returns `None`.
    pub fn add_seed(&mut self, idx: usize) -> Option<SeedAdded> {
        let item = SeedItem::from(self.results.get(idx)?);
        let label = item.label.clone();
        match self.seeds.add(item) {
            Ok(SeedAdded::Added) => {
                info!("seed added: {}", label);
                Some(SeedAdded::Added)
            }
            Ok(SeedAdded::AlreadyPresent) => Some(SeedAdded::AlreadyPresent),
            Err(e) => {
                warn!("{}", e);
                self.alert = Some(e.to_string());
                None
            }
        }
    }

    pub fn remove_seed(&mut self, kind: ItemKind, id: &str) -> Option<SeedItem> {
        let removed = self.seeds.remove(kind, id);
        if let Some(ref seed) = removed {
            info!("seed removed: {}", seed.label);
        }
        removed
    }

    pub fn seeds(&self) -> &Seeds {
        &self.seeds
    }

    /// The get-playlist button is enabled iff any seed exists.
    pub fn get_playlist_enabled(&self) -> bool {
        self.seeds.has_seeds()
    }

    // ── Recommendations ───────────────────────────────────────────────────────

    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    pub fn nudge_target(&mut self, kind: TargetKind, up: bool) {
        self.targets.nudge(kind, up);
    }

    pub fn get_playlist(&mut self) -> Option<Effect> {
        if !self.get_playlist_enabled() {
            error!("The button abides");
            return None;
        }
        self.clear_results();
        self.gate.cancel(RequestKind::Search);
        let request = RecommendationRequest::from_seeds(&self.seeds, self.targets);
        let token = self.gate.issue(RequestKind::Recommend);
        debug!("recommend #{}: {:?}", token.seq(), request);
        Some(Effect::Recommend { token, request })
    }

    pub fn apply_recommendation(
        &mut self,
        token: RequestToken,
        result: Result<Vec<PlaylistTrack>, ApiError>,
    ) -> Outcome {
        if !self.gate.complete(token) {
            debug!("dropping stale recommendation #{}", token.seq());
            return Outcome::Stale;
        }
        match result {
            Ok(tracks) => {
                info!("playlist: {} tracks", tracks.len());
                self.playlist.replace(tracks);
                Outcome::Applied
            }
            Err(e) => {
                error!("recommendation failed: {}", e);
                Outcome::Failed(e.to_string())
            }
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    // ── Save / clear ──────────────────────────────────────────────────────────

    /// Only available while the playlist section is shown.
    pub fn save_playlist(&mut self) -> Option<Effect> {
        if !self.playlist.is_visible() {
            return None;
        }
        let uris = self.playlist.uris();
        let token = self.gate.issue(RequestKind::Save);
        debug!("save #{}: {} uris", token.seq(), uris.len());
        self.saving = uris.clone();
        Some(Effect::Save { token, uris })
    }

    pub fn apply_save(
        &mut self,
        token: RequestToken,
        result: Result<SavedPlaylist, ApiError>,
    ) -> Outcome {
        if !self.gate.complete(token) {
            debug!("dropping stale save #{}", token.seq());
            return Outcome::Stale;
        }
        match result {
            Ok(saved) => {
                let link = SavedLink::new(&saved);
                info!("playlist saved: {}", link.url());
                self.saved = Some(link);
                // A newer recommendation may have replaced what was saved.
                if self.playlist.is_visible() && self.playlist.uris() == self.saving {
                    self.clear_playlist();
                } else {
                    debug!("keeping playlist shown after save: it changed meanwhile");
                }
                self.saving.clear();
                Outcome::Applied
            }
            Err(e) => {
                error!("saving playlist failed: {}", e);
                Outcome::Failed(e.to_string())
            }
        }
    }

    pub fn clear_playlist(&mut self) {
        self.playlist.clear();
    }

    pub fn saved(&self) -> Option<&SavedLink> {
        self.saved.as_ref()
    }

    // ── Alert ─────────────────────────────────────────────────────────────────

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn is_pending(&self, kind: RequestKind) -> bool {
        self.gate.is_pending(kind)
    }

    /// Drop everything in flight; late responses come back stale.
    pub fn cancel_pending(&mut self) {
        for kind in [RequestKind::Search, RequestKind::Recommend, RequestKind::Save] {
            self.gate.cancel(kind);
        }
        self.saving.clear();
    }
}

impl Default for AppContainer {
    fn default() -> Self {
        Self::new(Targets::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedlist_core::models::ArtistRef;

    fn artist(id: &str, name: &str) -> SearchResultItem {
        SearchResultItem {
            id: id.into(),
            name: name.into(),
            kind: ItemKind::Artist,
            artists: Vec::new(),
        }
    }

    fn track(id: &str, artist: &str, name: &str) -> SearchResultItem {
        SearchResultItem {
            id: id.into(),
            name: name.into(),
            kind: ItemKind::Track,
            artists: vec![ArtistRef {
                name: artist.into(),
            }],
        }
    }

    /// Run a search for `query` and apply `items` as its response.
    fn search_with(c: &mut AppContainer, query: &str, items: Vec<SearchResultItem>) {
        c.set_query(query);
        let token = c.submit_search().expect("search effect").token();
        assert_eq!(c.apply_search(token, Ok(items)), Outcome::Applied);
    }

    fn decode_error() -> ApiError {
        ApiError::MissingField {
            url: "http://localhost:3000/search".into(),
            field: "artists",
        }
    }

    #[test]
    fn test_search_effect_uses_query_and_selected_type() {
        let mut c = AppContainer::default();
        c.set_query("Daft Punk");
        match c.submit_search() {
            Some(Effect::Search { query, kind, .. }) => {
                assert_eq!(query, "Daft Punk");
                assert_eq!(kind, ItemKind::Artist);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(c.is_pending(RequestKind::Search));
    }

    #[test]
    fn test_empty_query_makes_no_request() {
        let mut c = AppContainer::default();
        assert_eq!(c.submit_search(), None);
        assert_eq!(c.toggle_search_type(), None);
    }

    #[test]
    fn test_invalid_search_type_makes_no_request() {
        let group = RadioGroup::new(
            SEARCH_TYPE_GROUP,
            vec![
                RadioButton::new("album", true),
                RadioButton::new("artist", false),
            ],
        );
        let mut c = AppContainer::default().with_search_type(group);
        c.set_query("Daft Punk");
        assert_eq!(c.submit_search(), None);
        assert!(!c.is_pending(RequestKind::Search));
        // Switching to a valid label re-runs the search.
        assert!(matches!(
            c.select_search_type("artist"),
            Some(Effect::Search {
                kind: ItemKind::Artist,
                ..
            })
        ));
    }

    #[test]
    fn test_radio_change_reruns_search() {
        let mut c = AppContainer::default();
        c.set_query("Genesis");
        match c.select_search_type("track") {
            Some(Effect::Search { query, kind, .. }) => {
                assert_eq!(query, "Genesis");
                assert_eq!(kind, ItemKind::Track);
            }
            other => panic!("unexpected {:?}", other),
        }
        // Same selection again is not a change.
        assert_eq!(c.select_search_type("track"), None);
    }

    #[test]
    fn test_results_carry_id_and_type() {
        let mut c = AppContainer::default();
        search_with(
            &mut c,
            "x",
            vec![
                track("T1", "Daft Punk", "One More Time"),
                track("T2", "Justice", "Genesis"),
                track("T3", "M83", "Midnight City"),
            ],
        );
        assert_eq!(c.results().len(), 3);
        assert_eq!(c.results()[1].id, "T2");
        assert_eq!(c.results()[1].kind, ItemKind::Track);
        assert_eq!(c.results()[1].label(), "Justice - Genesis");
    }

    #[test]
    fn test_clearing_query_empties_results() {
        let mut c = AppContainer::default();
        search_with(&mut c, "Daft Punk", vec![artist("X1", "Daft Punk")]);
        assert_eq!(c.results().len(), 1);
        c.set_query("");
        assert!(c.results().is_empty());
    }

    #[test]
    fn test_response_after_clearing_is_dropped() {
        let mut c = AppContainer::default();
        c.set_query("Daft Punk");
        let token = c.submit_search().unwrap().token();
        c.set_query("");
        assert_eq!(
            c.apply_search(token, Ok(vec![artist("X1", "Daft Punk")])),
            Outcome::Stale
        );
        assert!(c.results().is_empty());
    }

    #[test]
    fn test_superseded_search_is_dropped() {
        let mut c = AppContainer::default();
        c.set_query("daft");
        let first = c.submit_search().unwrap().token();
        c.set_query("daft punk");
        let second = c.submit_search().unwrap().token();

        assert_eq!(
            c.apply_search(second, Ok(vec![artist("X1", "Daft Punk")])),
            Outcome::Applied
        );
        assert_eq!(
            c.apply_search(first, Ok(vec![artist("X9", "Daft")])),
            Outcome::Stale
        );
        assert_eq!(c.results()[0].id, "X1");
    }

    #[test]
    fn test_failed_search_keeps_prior_results() {
        let mut c = AppContainer::default();
        search_with(&mut c, "Daft Punk", vec![artist("X1", "Daft Punk")]);
        let token = c.submit_search().unwrap().token();
        assert!(matches!(
            c.apply_search(token, Err(decode_error())),
            Outcome::Failed(_)
        ));
        assert_eq!(c.results().len(), 1);
    }

    #[test]
    fn test_adding_same_result_twice_keeps_one_seed() {
        let mut c = AppContainer::default();
        search_with(&mut c, "Daft Punk", vec![artist("X1", "Daft Punk")]);
        assert_eq!(c.add_seed(0), Some(SeedAdded::Added));
        assert_eq!(c.add_seed(0), Some(SeedAdded::AlreadyPresent));
        let artists = c.seeds().list(ItemKind::Artist);
        assert_eq!(artists.len(), 1);
        assert_eq!(artists.items()[0].id, "X1");
        assert_eq!(artists.items()[0].label, "Daft Punk");
    }

    #[test]
    fn test_sixth_seed_raises_alert() {
        let mut c = AppContainer::default();
        let items = (1..=6)
            .map(|i| artist(&format!("A{}", i), &format!("Artist {}", i)))
            .collect();
        search_with(&mut c, "a", items);
        for i in 0..5 {
            assert_eq!(c.add_seed(i), Some(SeedAdded::Added));
        }
        assert_eq!(c.alert(), None);
        assert_eq!(c.add_seed(5), None);
        assert_eq!(c.alert(), Some("Max of 5 items per seed"));
        assert_eq!(c.seeds().list(ItemKind::Artist).len(), 5);
        c.dismiss_alert();
        assert_eq!(c.alert(), None);
    }

    #[test]
    fn test_out_of_range_result_is_ignored() {
        let mut c = AppContainer::default();
        assert_eq!(c.add_seed(3), None);
        assert_eq!(c.alert(), None);
    }

    #[test]
    fn test_get_playlist_enablement_tracks_seeds() {
        let mut c = AppContainer::default();
        assert!(!c.get_playlist_enabled());
        search_with(
            &mut c,
            "x",
            vec![artist("X1", "Daft Punk"), track("T1", "Justice", "Genesis")],
        );
        c.add_seed(0);
        assert!(c.get_playlist_enabled());
        c.add_seed(1);
        c.remove_seed(ItemKind::Artist, "X1");
        assert!(c.get_playlist_enabled());
        c.remove_seed(ItemKind::Track, "T1");
        assert!(!c.get_playlist_enabled());
        assert_eq!(c.remove_seed(ItemKind::Track, "T1"), None);
    }

    #[test]
    fn test_get_playlist_without_seeds_is_noop() {
        let mut c = AppContainer::default();
        assert_eq!(c.get_playlist(), None);
        assert!(!c.is_pending(RequestKind::Recommend));
    }

    #[test]
    fn test_get_playlist_clears_results_and_builds_request() {
        let mut c = AppContainer::default();
        search_with(&mut c, "Daft Punk", vec![artist("X1", "Daft Punk")]);
        c.add_seed(0);
        c.nudge_target(TargetKind::Energy, true);
        match c.get_playlist() {
            Some(Effect::Recommend { request, .. }) => {
                assert_eq!(request.seed_artists, "X1");
                assert_eq!(request.seed_tracks, "");
                assert_eq!(request.targets.energy, 55);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(c.results().is_empty());
    }

    #[test]
    fn test_recommendation_reveals_playlist() {
        let mut c = AppContainer::default();
        search_with(&mut c, "Daft Punk", vec![artist("X1", "Daft Punk")]);
        c.add_seed(0);
        assert!(!c.playlist().is_visible());
        let token = c.get_playlist().unwrap().token();
        let tracks = vec![
            PlaylistTrack {
                uri: "u1".into(),
                display_name: "Daft Punk - Aerodynamic".into(),
            },
            PlaylistTrack {
                uri: "u2".into(),
                display_name: "Justice - D.A.N.C.E.".into(),
            },
        ];
        assert_eq!(c.apply_recommendation(token, Ok(tracks)), Outcome::Applied);
        assert!(c.playlist().is_visible());
        assert_eq!(c.playlist().len(), 2);
        assert_eq!(c.playlist().tracks()[0].display_name, "Daft Punk - Aerodynamic");
    }

    #[test]
    fn test_failed_recommendation_keeps_playlist_hidden() {
        let mut c = AppContainer::default();
        search_with(&mut c, "Daft Punk", vec![artist("X1", "Daft Punk")]);
        c.add_seed(0);
        let token = c.get_playlist().unwrap().token();
        assert!(matches!(
            c.apply_recommendation(token, Err(decode_error())),
            Outcome::Failed(_)
        ));
        assert!(!c.playlist().is_visible());
    }

    #[test]
    fn test_save_requires_visible_playlist() {
        let mut c = AppContainer::default();
        assert_eq!(c.save_playlist(), None);
    }

    #[test]
    fn test_save_renders_link_and_clears_playlist() {
        let mut c = AppContainer::default();
        search_with(&mut c, "Daft Punk", vec![artist("X1", "Daft Punk")]);
        c.add_seed(0);
        let token = c.get_playlist().unwrap().token();
        c.apply_recommendation(
            token,
            Ok(vec![
                PlaylistTrack {
                    uri: "u1".into(),
                    display_name: "a".into(),
                },
                PlaylistTrack {
                    uri: "u2".into(),
                    display_name: "b".into(),
                },
            ]),
        );

        let effect = c.save_playlist().unwrap();
        match &effect {
            Effect::Save { uris, .. } => assert_eq!(uris, &vec!["u1".to_string(), "u2".to_string()]),
            other => panic!("unexpected {:?}", other),
        }
        let saved = SavedPlaylist {
            id: "P1".into(),
            username: "alice".into(),
        };
        assert_eq!(c.apply_save(effect.token(), Ok(saved)), Outcome::Applied);
        assert_eq!(
            c.saved().map(|s| s.url()),
            Some("https://open.spotify.com/user/alice/playlist/P1")
        );
        assert!(c.playlist().is_empty());
        assert!(!c.playlist().is_visible());
    }

    #[test]
    fn test_clear_playlist_hides_section() {
        let mut c = AppContainer::default();
        search_with(&mut c, "Daft Punk", vec![artist("X1", "Daft Punk")]);
        c.add_seed(0);
        let token = c.get_playlist().unwrap().token();
        c.apply_recommendation(
            token,
            Ok(vec![PlaylistTrack {
                uri: "u1".into(),
                display_name: "a".into(),
            }]),
        );
        c.clear_playlist();
        assert!(c.playlist().is_empty());
        assert!(!c.playlist().is_visible());
        assert_eq!(c.save_playlist(), None);
    }

    #[test]
    fn test_cancel_pending_makes_late_responses_stale() {
        let mut c = AppContainer::default();
        search_with(&mut c, "Daft Punk", vec![artist("X1", "Daft Punk")]);
        c.add_seed(0);
        let token = c.get_playlist().unwrap().token();
        assert!(c.is_pending(RequestKind::Recommend));
        c.cancel_pending();
        assert!(!c.is_pending(RequestKind::Recommend));
        assert_eq!(c.apply_recommendation(token, Ok(Vec::new())), Outcome::Stale);
        assert!(!c.playlist().is_visible());
    }

    #[test]
    fn test_save_response_keeps_newer_playlist() {
        let track = |uri: &str| PlaylistTrack {
            uri: uri.into(),
            display_name: uri.into(),
        };
        let mut c = AppContainer::default();
        search_with(&mut c, "Daft Punk", vec![artist("X1", "Daft Punk")]);
        c.add_seed(0);
        let token = c.get_playlist().unwrap().token();
        c.apply_recommendation(token, Ok(vec![track("a1"), track("a2")]));

        let save_token = c.save_playlist().unwrap().token();
        // Fetch another playlist before the save returns.
        let token = c.get_playlist().unwrap().token();
        c.apply_recommendation(token, Ok(vec![track("b1")]));

        let saved = SavedPlaylist {
            id: "P1".into(),
            username: "alice".into(),
        };
        assert_eq!(c.apply_save(save_token, Ok(saved)), Outcome::Applied);
        assert_eq!(
            c.saved().unwrap().url(),
            "https://open.spotify.com/user/alice/playlist/P1"
        );
        assert!(c.playlist().is_visible());
        assert_eq!(c.playlist().uris(), vec!["b1".to_string()]);
    }
}
