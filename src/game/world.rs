//! Scrolling world entities: obstacles, power-ups, particles and clouds.
//!
//! Everything here moves left at the world speed (clouds at their own
//! parallax speed) and owns its own bounding box. Per-kind geometry is fixed
//! by the kind enum.

use super::Viewport;
use super::rng::RandomSource;
use crate::config::PARTICLE_GRAVITY;
use crate::util::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstacleKind {
    SmallCactus,
    BigCactus,
    Bird,
}

impl ObstacleKind {
    /// Weighted pick from a uniform draw in `[0, 1)`.
    pub fn from_roll(roll: f64) -> Self {
        if roll > 0.85 {
            Self::Bird
        } else if roll > 0.5 {
            Self::BigCactus
        } else {
            Self::SmallCactus
        }
    }

    pub fn width(self) -> f64 {
        match self {
            Self::SmallCactus => 22.0,
            Self::BigCactus => 36.0,
            Self::Bird => 40.0,
        }
    }

    pub fn height(self) -> f64 {
        match self {
            Self::SmallCactus => 36.0,
            Self::BigCactus => 56.0,
            Self::Bird => 28.0,
        }
    }

    /// Vertical lift above the ground baseline (negative is up).
    pub fn y_offset(self) -> f64 {
        match self {
            Self::SmallCactus | Self::BigCactus => 0.0,
            Self::Bird => -48.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub x: f64,
    /// Set once the trailing edge clears the player; the pass bonus is paid then.
    pub passed: bool,
    /// Wing animation phase, birds only.
    pub flap: f64,
}

impl Obstacle {
    pub const DESPAWN_MARGIN: f64 = -50.0;

    pub fn new(kind: ObstacleKind, x: f64) -> Self {
        Self {
            kind,
            x,
            passed: false,
            flap: 0.0,
        }
    }

    pub fn width(&self) -> f64 {
        self.kind.width()
    }

    pub fn update(&mut self, dt: f64, speed: f64) {
        self.x -= speed * dt;
        if self.kind == ObstacleKind::Bird {
            self.flap += dt * 12.0;
        }
    }

    pub fn right_edge(&self) -> f64 {
        self.x + self.width()
    }

    pub fn is_off_screen(&self) -> bool {
        self.right_edge() < Self::DESPAWN_MARGIN
    }

    pub fn bounds(&self, viewport: Viewport) -> Rect {
        let h = self.kind.height();
        Rect {
            x: self.x,
            y: viewport.ground_y() - h + self.kind.y_offset(),
            w: self.width(),
            h,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerupKind {
    Shield,
    Multiplier,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Powerup {
    pub kind: PowerupKind,
    pub x: f64,
    /// Rotation for rendering.
    pub spin: f64,
}

impl Powerup {
    pub const SIZE: f64 = 28.0;
    pub const Y_OFFSET: f64 = -24.0;
    pub const DESPAWN_MARGIN: f64 = -20.0;

    pub fn new(kind: PowerupKind, x: f64) -> Self {
        Self { kind, x, spin: 0.0 }
    }

    pub fn update(&mut self, dt: f64, speed: f64) {
        self.x -= speed * dt;
        self.spin += dt * 6.0;
    }

    pub fn is_off_screen(&self) -> bool {
        self.x + Self::SIZE < Self::DESPAWN_MARGIN
    }

    pub fn bounds(&self, viewport: Viewport) -> Rect {
        Rect {
            x: self.x,
            y: viewport.ground_y() - Self::SIZE + Self::Y_OFFSET,
            w: Self::SIZE,
            h: Self::SIZE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    Dust,
    Spark,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub age: f64,
    pub lifetime: f64,
    pub kind: ParticleKind,
}

impl Particle {
    pub fn spawn(rng: &mut dyn RandomSource, x: f64, y: f64, kind: ParticleKind) -> Self {
        Self {
            x,
            y,
            vx: (rng.next_f64() - 0.5) * 220.0,
            vy: -rng.next_f64() * 260.0 - 40.0,
            age: 0.0,
            lifetime: 0.6 + rng.next_f64() * 0.8,
            kind,
        }
    }

    pub fn update(&mut self, dt: f64) {
        self.age += dt;
        self.vy += PARTICLE_GRAVITY * dt;
        self.x += self.vx * dt;
        self.y += self.vy * dt;
    }

    pub fn is_expired(&self) -> bool {
        self.age > self.lifetime
    }

    /// 1 when fresh, 0 at end of life.
    pub fn fade(&self) -> f64 {
        (1.0 - self.age / self.lifetime).max(0.0)
    }
}

pub fn burst(
    particles: &mut Vec<Particle>,
    rng: &mut dyn RandomSource,
    (x, y): (f64, f64),
    count: usize,
    kind: ParticleKind,
) {
    particles.extend((0..count).map(|_| Particle::spawn(rng, x, y, kind)));
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cloud {
    pub x: f64,
    pub y: f64,
    pub speed: f64,
    pub scale: f64,
}

impl Cloud {
    pub fn new(x: f64, y: f64, speed: f64, scale: f64) -> Self {
        Self { x, y, speed, scale }
    }

    /// A cloud somewhere across the initial sky.
    pub fn scattered(rng: &mut dyn RandomSource, viewport: Viewport) -> Self {
        Self::new(
            rng.next_f64() * viewport.width,
            rng.range(60.0, 160.0),
            rng.range(10.0, 40.0),
            rng.range(0.6, 1.6),
        )
    }

    /// A cloud drifting in from past the right edge.
    pub fn incoming(rng: &mut dyn RandomSource, viewport: Viewport) -> Self {
        Self::new(
            viewport.width + 40.0,
            rng.range(40.0, 160.0),
            rng.range(8.0, 30.0),
            rng.range(0.6, 1.5),
        )
    }

    pub fn width(&self) -> f64 {
        120.0 * self.scale
    }

    pub fn update(&mut self, dt: f64, rng: &mut dyn RandomSource, viewport: Viewport) {
        self.x -= self.speed * dt;
        if self.x + self.width() < -20.0 {
            self.x = viewport.width + rng.next_f64() * 200.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rng::SeededRng;
    use crate::game::rng::tests::Scripted;

    #[test]
    fn kind_ranges() {
        assert_eq!(ObstacleKind::from_roll(0.0), ObstacleKind::SmallCactus);
        assert_eq!(ObstacleKind::from_roll(0.5), ObstacleKind::SmallCactus);
        assert_eq!(ObstacleKind::from_roll(0.51), ObstacleKind::BigCactus);
        assert_eq!(ObstacleKind::from_roll(0.85), ObstacleKind::BigCactus);
        assert_eq!(ObstacleKind::from_roll(0.86), ObstacleKind::Bird);
    }

    #[test]
    fn small_cactus_scrolls_and_despawns() {
        let vp = Viewport::new(800.0, 400.0);
        let mut ob = Obstacle::new(ObstacleKind::SmallCactus, vp.width + 30.0);
        let speed = 520.0;
        ob.update(0.5, speed);
        assert!((ob.x - (830.0 - 260.0)).abs() < 1e-9);
        assert!(!ob.is_off_screen());

        // x + 22 < -50 requires x < -72
        while ob.x >= -72.0 {
            assert!(!ob.is_off_screen());
            ob.update(0.016, speed);
        }
        assert!(ob.is_off_screen());
    }

    #[test]
    fn bird_flies_above_ground() {
        let vp = Viewport::new(800.0, 400.0);
        let bird = Obstacle::new(ObstacleKind::Bird, 100.0);
        let b = bird.bounds(vp);
        assert_eq!(b.y + b.h, vp.ground_y() - 48.0);
    }

    #[test]
    fn only_birds_flap() {
        let mut bird = Obstacle::new(ObstacleKind::Bird, 0.0);
        let mut cactus = Obstacle::new(ObstacleKind::BigCactus, 0.0);
        bird.update(0.1, 0.0);
        cactus.update(0.1, 0.0);
        assert!(bird.flap > 0.0);
        assert_eq!(cactus.flap, 0.0);
    }

    #[test]
    fn particles_fall_and_expire() {
        let mut rng = SeededRng::new(3);
        let mut p = Particle::spawn(&mut rng, 10.0, 10.0, ParticleKind::Spark);
        assert!(p.vy < 0.0);
        assert!((0.6..1.4).contains(&p.lifetime));
        let start_vy = p.vy;
        p.update(0.1);
        assert!(p.vy > start_vy);
        while !p.is_expired() {
            p.update(0.05);
        }
        assert_eq!(p.fade(), 0.0);
    }

    #[test]
    fn burst_spawns_count() {
        let mut rng = SeededRng::new(9);
        let mut particles = Vec::new();
        burst(&mut particles, &mut rng, (1.0, 2.0), 20, ParticleKind::Dust);
        assert_eq!(particles.len(), 20);
        assert!(particles.iter().all(|p| p.kind == ParticleKind::Dust));
    }

    #[test]
    fn cloud_wraps_to_right_edge() {
        let vp = Viewport::new(800.0, 400.0);
        let mut rng = Scripted::new(&[0.5]);
        let mut cloud = Cloud::new(-139.0, 50.0, 10.0, 1.0);
        cloud.update(0.2, &mut rng, vp);
        assert_eq!(cloud.x, 900.0);
    }

    #[test]
    fn powerup_despawn_margin() {
        let mut p = Powerup::new(PowerupKind::Shield, -47.0);
        assert!(!p.is_off_screen());
        p.update(0.01, 200.0);
        assert!(p.is_off_screen());
    }
}
