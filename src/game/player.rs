use super::Viewport;
use super::input::Intents;
use crate::config::{
    DOUBLE_JUMP_FACTOR, DOUBLE_JUMP_MIN_VY, DUCK_H, GRAVITY, HEIGHT_EASE, JUMP_V,
    MULTIPLIER_DECAY, PLAYER_W, PLAYER_X, WALK_H,
};
use crate::util::{Rect, clamp01};

/// What the player did this frame, if anything worth a cue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Motion {
    Jumped,
    DoubleJumped,
    Landed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f64,
    /// Offset of the feet from the ground baseline; negative while airborne.
    pub y: f64,
    pub vy: f64,
    pub width: f64,
    pub height: f64,
    pub on_ground: bool,
    pub ducking: bool,
    pub double_jumped: bool,
    pub shield_secs: f64,
    pub score_mult: f64,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: PLAYER_X,
            y: 0.0,
            vy: 0.0,
            width: PLAYER_W,
            height: WALK_H,
            on_ground: true,
            ducking: false,
            double_jumped: false,
            shield_secs: 0.0,
            score_mult: 1.0,
        }
    }
}

impl Player {
    pub fn update(&mut self, dt: f64, intents: Intents) -> Option<Motion> {
        self.ducking = intents.duck && self.on_ground;
        let target_h = if self.ducking { DUCK_H } else { WALK_H };
        self.height += (target_h - self.height) * clamp01(HEIGHT_EASE * dt);

        let mut motion = None;
        if intents.jump {
            if self.on_ground {
                self.vy = JUMP_V;
                self.on_ground = false;
                motion = Some(Motion::Jumped);
            } else if !self.double_jumped && self.vy > DOUBLE_JUMP_MIN_VY {
                self.vy = JUMP_V * DOUBLE_JUMP_FACTOR;
                self.double_jumped = true;
                motion = Some(Motion::DoubleJumped);
            }
        }

        if !self.on_ground {
            self.vy += GRAVITY * dt;
            self.y += self.vy * dt;
            // A zero-length step right after takeoff must not count as touchdown.
            if self.y >= 0.0 && self.vy >= 0.0 {
                self.y = 0.0;
                self.vy = 0.0;
                self.on_ground = true;
                self.double_jumped = false;
                motion = Some(Motion::Landed);
            }
        }

        if self.shield_secs > 0.0 {
            self.shield_secs = (self.shield_secs - dt).max(0.0);
        }
        if self.score_mult > 1.0 {
            self.score_mult = (self.score_mult - dt * MULTIPLIER_DECAY).max(1.0);
        }
        motion
    }

    pub fn has_shield(&self) -> bool {
        self.shield_secs > 0.0
    }

    pub fn bounds(&self, viewport: Viewport) -> Rect {
        Rect {
            x: self.x,
            y: viewport.ground_y() - self.height + self.y,
            w: self.width,
            h: self.height,
        }
    }

    /// Where landing dust and pass sparks originate.
    pub fn emitter(&self, viewport: Viewport) -> (f64, f64) {
        (self.x + 8.0, viewport.ground_y() - self.height / 2.0)
    }
}
