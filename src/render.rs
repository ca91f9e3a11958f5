//! Drawing the playfield onto an abstract 2D surface.

use crate::config::GameConfig;
use crate::lanes::{HIT_LINE_COLOR, Lane};
use crate::notes::NoteSet;

/// The handful of 2D operations the game needs. The browser implementation
/// wraps a `CanvasRenderingContext2d`.
pub trait Surface {
    fn clear(&mut self);
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: &str, width: f64);
    fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: &str);
}

/// Lane guides plus the hit line.
pub fn draw_background(surface: &mut dyn Surface, lanes: &[Lane], cfg: &GameConfig) {
    let w = cfg.lane_line_width;
    let field = cfg.playfield;
    for lane in lanes {
        surface.stroke_line((lane.x, 0.0), (lane.x, field.height), lane.color, w);
    }
    surface.stroke_line(
        (0.0, cfg.hit_line_y),
        (field.width, cfg.hit_line_y),
        HIT_LINE_COLOR,
        w,
    );
}

pub fn draw_notes(surface: &mut dyn Surface, notes: &NoteSet, radius: f64) {
    for note in notes.iter() {
        surface.fill_circle((note.lane_x, note.y), radius, note.color);
    }
}

/// Blank frame with only the static background: the idle / reset look.
pub fn draw_idle(surface: &mut dyn Surface, lanes: &[Lane], cfg: &GameConfig) {
    surface.clear();
    draw_background(surface, lanes, cfg);
}
