//! Gameplay tuning and persisted user settings.

use serde::{Deserialize, Serialize};

/// Gravity applied to the player, px/s^2.
pub const GRAVITY: f64 = 2200.0;
/// Ground scroll speed at difficulty 1, px/s.
pub const RUN_SPEED: f64 = 520.0;
/// Initial jump velocity (negative is up), px/s.
pub const JUMP_V: f64 = -750.0;
/// Fraction of `JUMP_V` used by the double jump.
pub const DOUBLE_JUMP_FACTOR: f64 = 0.82;
/// Double jump is only allowed once the player rises slower than this.
pub const DOUBLE_JUMP_MIN_VY: f64 = -50.0;
pub const DUCK_H: f64 = 28.0;
pub const WALK_H: f64 = 48.0;
pub const PLAYER_W: f64 = 58.0;
pub const PLAYER_X: f64 = 90.0;
/// Height easing rate, per second.
pub const HEIGHT_EASE: f64 = 15.0;

pub const SPAWN_INTERVAL_BASE: f64 = 1.2;
pub const INITIAL_SPAWN_TIMER: f64 = 0.8;
pub const POWERUP_CHANCE: f64 = 0.12;
pub const SHIELD_CHANCE: f64 = 0.6;
pub const POWERUP_GAP: f64 = 1.6;

pub const SHIELD_SECS: f64 = 5.0;
pub const MULTIPLIER_BOOST: f64 = 2.4;
pub const MULTIPLIER_DECAY: f64 = 0.02;
pub const PASS_BONUS: f64 = 12.0;
pub const PICKUP_BONUS: f64 = 25.0;
pub const DISTANCE_SCORE_RATE: f64 = 0.03;

pub const PARTICLE_GRAVITY: f64 = 800.0;
pub const CLOUD_SPAWN_CHANCE: f64 = 0.008;
pub const INITIAL_CLOUDS: usize = 6;
pub const MAX_CLOUDS: usize = 14;
/// Ground stripe scroll per pixel of world travel.
pub const GROUND_SCROLL: f64 = 0.09;
pub const GROUND_STRIPE: f64 = 40.0;

/// Upper bound on a single simulation step, seconds.
pub const MAX_FRAME_DT: f64 = 0.032;

pub const HIGH_SCORE_KEY: &str = "sitedino_high";
pub const SETTINGS_KEY: &str = "sitedino_settings";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { sound: true }
    }
}

impl Settings {
    /// Parses a stored settings record, falling back to defaults on any error.
    pub fn from_json(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|err| {
            tracing::warn!(%err, "discarding malformed settings");
            Self::default()
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
