//! Recommendation request: seed ids plus the four tunable targets.

use serde::{Deserialize, Serialize};

use crate::models::ItemKind;
use crate::seeds::Seeds;

/// One of the numeric preferences forwarded as `target_*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Danceability,
    Energy,
    Popularity,
    Valence,
}

impl TargetKind {
    pub const ALL: [TargetKind; 4] = [
        TargetKind::Danceability,
        TargetKind::Energy,
        TargetKind::Popularity,
        TargetKind::Valence,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Danceability => "danceability",
            Self::Energy => "energy",
            Self::Popularity => "popularity",
            Self::Valence => "valence",
        }
    }

    pub fn query_key(self) -> &'static str {
        match self {
            Self::Danceability => "target_danceability",
            Self::Energy => "target_energy",
            Self::Popularity => "target_popularity",
            Self::Valence => "target_valence",
        }
    }

    /// Slider step in raw units (percent for the 0..1 targets).
    pub fn step(self) -> u8 {
        5
    }
}

/// Target values.  Danceability, energy and valence are stored as whole
/// percent and sent as `0.00..=1.00`; popularity is sent as `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Targets {
    #[serde(default = "default_ratio")]
    pub danceability: u8,
    #[serde(default = "default_ratio")]
    pub energy: u8,
    #[serde(default = "default_popularity")]
    pub popularity: u8,
    #[serde(default = "default_ratio")]
    pub valence: u8,
}

fn default_ratio() -> u8 {
    50
}

fn default_popularity() -> u8 {
    50
}

impl Default for Targets {
    fn default() -> Self {
        Self {
            danceability: default_ratio(),
            energy: default_ratio(),
            popularity: default_popularity(),
            valence: default_ratio(),
        }
    }
}

impl Targets {
    pub fn get(&self, kind: TargetKind) -> u8 {
        match kind {
            TargetKind::Danceability => self.danceability,
            TargetKind::Energy => self.energy,
            TargetKind::Popularity => self.popularity,
            TargetKind::Valence => self.valence,
        }
    }

    /// Set a raw value, clamped to `0..=100`.
    pub fn set(&mut self, kind: TargetKind, value: u8) {
        let value = value.min(100);
        match kind {
            TargetKind::Danceability => self.danceability = value,
            TargetKind::Energy => self.energy = value,
            TargetKind::Popularity => self.popularity = value,
            TargetKind::Valence => self.valence = value,
        }
    }

    pub fn nudge(&mut self, kind: TargetKind, up: bool) {
        let current = self.get(kind);
        let next = if up {
            current.saturating_add(kind.step())
        } else {
            current.saturating_sub(kind.step())
        };
        self.set(kind, next);
    }

    /// Value as sent on the wire.
    pub fn format(&self, kind: TargetKind) -> String {
        let raw = self.get(kind);
        match kind {
            TargetKind::Popularity => raw.to_string(),
            _ => format!("{:.2}", raw as f32 / 100.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationRequest {
    pub seed_artists: String,
    pub seed_tracks: String,
    pub targets: Targets,
}

impl RecommendationRequest {
    pub fn from_seeds(seeds: &Seeds, targets: Targets) -> Self {
        Self {
            seed_artists: seeds.list(ItemKind::Artist).joined_ids(),
            seed_tracks: seeds.list(ItemKind::Track).joined_ids(),
            targets,
        }
    }

    /// Query pairs in the order the backend documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("seed_artists", self.seed_artists.clone()),
            ("seed_tracks", self.seed_tracks.clone()),
        ];
        for kind in TargetKind::ALL {
            pairs.push((kind.query_key(), self.targets.format(kind)));
        }
        pairs
    }
}
