//! Recommended playlist: ordered tracks plus their URIs for saving.

use crate::models::RecommendedTrack;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistTrack {
    pub uri: String,
    pub display_name: String,
}

impl From<RecommendedTrack> for PlaylistTrack {
    fn from(track: RecommendedTrack) -> Self {
        Self {
            display_name: track.label(),
            uri: track.uri,
        }
    }
}

/// The playlist section.  Hidden until a recommendation has been rendered.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    tracks: Vec<PlaylistTrack>,
    visible: bool,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with a fresh recommendation and reveal the section.
    pub fn replace(&mut self, tracks: Vec<PlaylistTrack>) {
        self.tracks = tracks;
        self.visible = true;
    }

    /// Empty the list and hide the section.
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.visible = false;
    }

    pub fn uris(&self) -> Vec<String> {
        self.tracks.iter().map(|t| t.uri.clone()).collect()
    }

    pub fn tracks(&self) -> &[PlaylistTrack] {
        &self.tracks
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArtistRef;

    fn rec(uri: &str, artist: &str, name: &str) -> RecommendedTrack {
        RecommendedTrack {
            uri: uri.into(),
            name: name.into(),
            artists: vec![ArtistRef {
                name: artist.into(),
            }],
        }
    }

    #[test]
    fn test_replace_reveals_and_clear_hides() {
        let mut p = Playlist::new();
        assert!(!p.is_visible());
        p.replace(vec![
            rec("u1", "Daft Punk", "Aerodynamic").into(),
            rec("u2", "Justice", "D.A.N.C.E.").into(),
        ]);
        assert!(p.is_visible());
        assert_eq!(p.tracks()[0].display_name, "Daft Punk - Aerodynamic");
        assert_eq!(p.uris(), vec!["u1".to_string(), "u2".to_string()]);

        p.clear();
        assert!(!p.is_visible());
        assert!(p.is_empty());
    }

    #[test]
    fn test_empty_recommendation_still_reveals() {
        let mut p = Playlist::new();
        p.replace(Vec::new());
        assert!(p.is_visible());
        assert!(p.uris().is_empty());
    }
}
