// Small helpers shared by the simulation and the renderer

pub fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// Axis-aligned box in canvas pixels, origin top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Touching edges count as an overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.x + self.w < other.x
            || other.x + other.w < self.x
            || self.y + self.h < other.y
            || other.y + other.h < self.y)
    }
}
