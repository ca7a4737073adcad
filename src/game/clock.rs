use crate::config::MAX_FRAME_DT;

/// Turns frame timestamps (milliseconds) into clamped simulation steps.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    /// Resets the baseline so the next tick only measures time from `now_ms`.
    pub fn anchor(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }

    /// Seconds since the previous tick, in `[0, MAX_FRAME_DT]`.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).clamp(0.0, MAX_FRAME_DT),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_frames_pass_through() {
        let mut clock = FrameClock::default();
        clock.anchor(1000.0);
        let dt = clock.tick(1016.0);
        assert!((dt - 0.016).abs() < 1e-12);
    }

    #[test]
    fn stalls_are_clamped() {
        let mut clock = FrameClock::default();
        clock.anchor(0.0);
        assert_eq!(clock.tick(5000.0), MAX_FRAME_DT);
    }

    #[test]
    fn backwards_time_is_zero() {
        let mut clock = FrameClock::default();
        clock.anchor(100.0);
        assert_eq!(clock.tick(50.0), 0.0);
    }

    #[test]
    fn unanchored_first_tick_is_zero() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick(12345.0), 0.0);
        assert!(clock.tick(12355.0) > 0.0);
    }

    #[test]
    fn reanchor_excludes_pause() {
        let mut clock = FrameClock::default();
        clock.anchor(0.0);
        clock.tick(16.0);
        // paused for ten seconds, then resumed
        clock.anchor(10_016.0);
        let dt = clock.tick(10_032.0);
        assert!((dt - 0.016).abs() < 1e-12);
    }
}
