use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in field coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// AABB overlap test (shared edges do not count as overlap).
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    /// Interior point test; points on the boundary are outside.
    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px > self.x && px < self.x + self.w && py > self.y && py < self.y + self.h
    }
}
