/// Sound events raised by the simulation; the browser shell turns them into
/// tones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Jump,
    DoubleJump,
    Land,
    Pass,
    ShieldHit,
    Pickup,
    GameOver,
    Restart,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub freq: f32,
    pub secs: f64,
    pub wave: Waveform,
    pub volume: f32,
}

impl Cue {
    pub fn tone(self) -> Tone {
        let (freq, secs, wave, volume) = match self {
            Cue::Jump => (540.0, 0.08, Waveform::Sine, 0.06),
            Cue::DoubleJump => (660.0, 0.06, Waveform::Square, 0.06),
            Cue::Land => (180.0, 0.03, Waveform::Sine, 0.04),
            Cue::Pass => (880.0, 0.02, Waveform::Sine, 0.02),
            Cue::ShieldHit => (260.0, 0.05, Waveform::Square, 0.06),
            Cue::Pickup => (920.0, 0.06, Waveform::Triangle, 0.06),
            Cue::GameOver => (180.0, 0.18, Waveform::Sawtooth, 0.08),
            Cue::Restart => (420.0, 0.06, Waveform::Sine, 0.06),
        };
        Tone {
            freq,
            secs,
            wave,
            volume,
        }
    }
}
