//! Time-gated note creation.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::lanes::Lane;
use crate::notes::{Note, NoteSet};

/// Spawns at most one note per poll once more than `interval_ms` has passed
/// since the previous spawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spawner {
    pub interval_ms: f64,
    pub spawn_y: f64,
}

impl Spawner {
    pub fn new(interval_ms: f64, spawn_y: f64) -> Self {
        Self {
            interval_ms,
            spawn_y,
        }
    }

    pub fn is_due(&self, now_ms: f64, last_spawn_ms: f64) -> bool {
        now_ms - last_spawn_ms > self.interval_ms
    }

    /// Pushes one note into a uniformly chosen lane when due and moves
    /// `last_spawn_ms` forward. Returns whether a note was added.
    pub fn poll<R: Rng + ?Sized>(
        &self,
        now_ms: f64,
        last_spawn_ms: &mut f64,
        lanes: &[Lane],
        rng: &mut R,
        notes: &mut NoteSet,
    ) -> bool {
        if !self.is_due(now_ms, *last_spawn_ms) {
            return false;
        }
        let Some(lane) = lanes.choose(rng) else {
            return false;
        };
        notes.push(Note::new(lane, self.spawn_y));
        *last_spawn_ms = now_ms;
        true
    }
}
