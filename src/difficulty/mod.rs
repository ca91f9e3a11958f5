//! Difficulty profiles: spawn pacing, fall speed and the backing track.
//!
//! The three built-in profiles live in their own files (`easy.rs`,
//! `medium.rs`, `hard.rs`) and are gathered into a [`DifficultyTable`]
//! through [`builtin()`]. Additional tables can be supplied as JSON when the
//! `serde_json` feature is on:
//!
//! ```json
//! [
//!   { "key": "easy", "label": "Easy", "song_path": "songs/Song1.mp3",
//!     "spawn_interval_ms": 900, "note_speed": 220 }
//! ]
//! ```

#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::error::GameError;

mod easy;
mod hard;
mod medium;

pub use easy::easy;
pub use hard::hard;
pub use medium::medium;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct DifficultyProfile {
    pub key: String,
    pub label: String,
    pub song_path: String,
    pub spawn_interval_ms: f64,
    /// Fall speed in pixels per second.
    pub note_speed: f64,
}

impl DifficultyProfile {
    fn validate(&self) -> Result<(), GameError> {
        let invalid = |what: &str| {
            Err(GameError::InvalidProfiles(format!(
                "profile '{}': {what}",
                self.key
            )))
        };
        if !self.note_speed.is_finite() || self.note_speed <= 0.0 {
            return invalid("note_speed must be a positive number");
        }
        if !self.spawn_interval_ms.is_finite() || self.spawn_interval_ms < 0.0 {
            return invalid("spawn_interval_ms must be zero or more");
        }
        Ok(())
    }
}

/// Ordered set of selectable profiles, looked up by key.
#[derive(Clone, Debug, PartialEq)]
pub struct DifficultyTable {
    profiles: Vec<DifficultyProfile>,
}

impl DifficultyTable {
    /// Rejects empty tables, duplicate keys and profiles whose notes would
    /// never fall off the board.
    pub fn new(profiles: Vec<DifficultyProfile>) -> Result<Self, GameError> {
        if profiles.is_empty() {
            return Err(GameError::EmptyProfileTable);
        }
        for (i, profile) in profiles.iter().enumerate() {
            profile.validate()?;
            if profiles[..i].iter().any(|p| p.key == profile.key) {
                return Err(GameError::InvalidProfiles(format!(
                    "duplicate key '{}'",
                    profile.key
                )));
            }
        }
        Ok(Self { profiles })
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let profiles: Vec<DifficultyProfile> =
            serde_json::from_str(json).map_err(|e| GameError::InvalidProfiles(e.to_string()))?;
        Self::new(profiles)
    }

    pub fn get(&self, key: &str) -> Option<&DifficultyProfile> {
        self.profiles.iter().find(|p| p.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// The shipped easy / medium / hard table.
pub fn builtin() -> &'static DifficultyTable {
    use std::sync::OnceLock;
    static TABLE: OnceLock<DifficultyTable> = OnceLock::new();
    TABLE.get_or_init(|| DifficultyTable {
        profiles: vec![easy(), medium(), hard()],
    })
}
