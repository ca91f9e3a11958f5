//! Falling notes and the per-frame motion / cull pass.

use crate::lanes::Lane;

/// A single falling target. `lane_x` and `color` are copied from the lane it
/// spawned in so rendering never has to look the lane up again.
#[derive(Clone, Debug, PartialEq)]
pub struct Note {
    pub lane_x: f64,
    pub y: f64,
    pub color: &'static str,
    pub resolved: bool,
}

impl Note {
    pub fn new(lane: &Lane, y: f64) -> Self {
        Self {
            lane_x: lane.x,
            y,
            color: lane.color,
            resolved: false,
        }
    }
}

/// Notes in spawn order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoteSet {
    notes: Vec<Note>,
}

impl NoteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, note: Note) {
        self.notes.push(note);
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }

    pub fn clear(&mut self) {
        self.notes.clear();
    }

    /// Moves every note down by `speed * delta_secs`, then drops the ones at or
    /// past `cull_limit`. Returns how many were dropped.
    pub fn advance(&mut self, delta_secs: f64, speed: f64, cull_limit: f64) -> usize {
        let step = speed * delta_secs;
        for note in self.notes.iter_mut() {
            note.y += step;
        }
        let before = self.notes.len();
        self.notes.retain(|n| n.y < cull_limit);
        before - self.notes.len()
    }

    /// First unresolved note in `lane_x` whose distance to `hit_y` is strictly
    /// below `tolerance`. Ties go to the earliest spawned note.
    pub fn find_hittable(&mut self, lane_x: f64, hit_y: f64, tolerance: f64) -> Option<&mut Note> {
        self.notes
            .iter_mut()
            .find(|n| !n.resolved && n.lane_x == lane_x && (n.y - hit_y).abs() < tolerance)
    }

    pub fn remove_resolved(&mut self) {
        self.notes.retain(|n| !n.resolved);
    }
}
