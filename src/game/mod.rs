//! The runner simulation. Nothing in here touches the browser, so the whole
//! module runs under plain `cargo test`.

pub mod clock;
pub mod cue;
pub mod director;
pub mod input;
pub mod player;
pub mod rng;
pub mod world;

pub use clock::FrameClock;
pub use cue::Cue;
pub use director::Session;
pub use input::{Command, Control};
pub use rng::{RandomSource, SeededRng};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Running,
    Paused,
    GameOver,
}

/// Drawing area in device-independent pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 300.0)
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Height of the ground band at the bottom of the canvas.
    pub fn ground_level(&self) -> f64 {
        (self.height * 0.16).max(80.0)
    }

    /// Canvas y of the ground baseline.
    pub fn ground_y(&self) -> f64 {
        self.height - self.ground_level()
    }
}
