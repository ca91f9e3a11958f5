//! Tap judgement against the hit line.

use crate::config::GameConfig;
use crate::lanes;
use crate::notes::NoteSet;
use crate::score::ScoreBoard;

/// Result of a single lane tap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    Hit { score: u64, combo: u32 },
    Miss,
    /// Not playing, or the lane does not exist. Nothing changed.
    Ignored,
}

/// Judges a tap on `lane_index`. The caller decides whether the session is
/// playing; this only looks at notes and counters.
pub fn judge_tap(
    lane_index: usize,
    notes: &mut NoteSet,
    scores: &mut ScoreBoard,
    cfg: &GameConfig,
) -> HitOutcome {
    let Some(lane) = lanes::lane(lane_index) else {
        log::warn!("tap on unknown lane {lane_index}");
        return HitOutcome::Ignored;
    };

    match notes.find_hittable(lane.x, cfg.hit_line_y, cfg.hit_tolerance) {
        Some(note) => {
            note.resolved = true;
            scores.register_hit(cfg.hit_reward);
            notes.remove_resolved();
            HitOutcome::Hit {
                score: scores.score(),
                combo: scores.combo(),
            }
        }
        None => {
            scores.register_miss();
            HitOutcome::Miss
        }
    }
}
