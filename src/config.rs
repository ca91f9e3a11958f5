//! Playfield geometry and scoring constants.
//!
//! Everything the loop needs to know about the board lives in [`GameConfig`].
//! The defaults match the shipped page; the browser glue only overrides the
//! playfield size with the real canvas dimensions.

#[cfg(feature = "serde")]
use serde::Deserialize;

/// Visible drawing area in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Playfield {
    pub width: f64,
    pub height: f64,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub playfield: Playfield,
    /// Vertical position where taps are judged.
    pub hit_line_y: f64,
    /// A tap hits when `|note.y - hit_line_y| < hit_tolerance`.
    pub hit_tolerance: f64,
    /// Notes are culled once `y >= playfield.height + cull_margin`.
    pub cull_margin: f64,
    /// Spawn height, negative so new notes start above the canvas.
    pub spawn_y: f64,
    pub note_radius: f64,
    pub lane_line_width: f64,
    pub hit_reward: u64,
    pub default_difficulty: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield: Playfield::default(),
            hit_line_y: 350.0,
            hit_tolerance: 40.0,
            cull_margin: 20.0,
            spawn_y: -20.0,
            note_radius: 15.0,
            lane_line_width: 2.0,
            hit_reward: 100,
            default_difficulty: "easy".to_string(),
        }
    }
}

impl GameConfig {
    /// First `y` at which a note no longer survives a motion update.
    pub fn cull_limit(&self) -> f64 {
        self.playfield.height + self.cull_margin
    }

    pub fn with_playfield(mut self, width: f64, height: f64) -> Self {
        self.playfield = Playfield { width, height };
        self
    }
}
