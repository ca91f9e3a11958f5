//! Lane registry: the fixed set of tracks notes fall along.

/// One vertical track. Notes spawned in a lane copy its `x` and `color`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lane {
    pub x: f64,
    pub color: &'static str,
}

pub const LANES: [Lane; 3] = [
    Lane {
        x: 200.0,
        color: "#FBDB93",
    },
    Lane {
        x: 400.0,
        color: "#8D5F8C",
    },
    Lane {
        x: 600.0,
        color: "#FF69B4",
    },
];

/// Colour of the horizontal hit line.
pub const HIT_LINE_COLOR: &str = "white";

/// Lane lookup that tolerates out-of-range indices from the input layer.
pub fn lane(index: usize) -> Option<&'static Lane> {
    LANES.get(index)
}
