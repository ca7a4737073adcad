use web_sys::{AudioContext, OscillatorType};

use crate::error::PlatformError;
use crate::game::Cue;
use crate::game::cue::{Tone, Waveform};

/// Short synthesised beeps. Without an `AudioContext` every call is a no-op.
pub struct Beeper {
    ctx: Option<AudioContext>,
}

impl Beeper {
    pub fn new() -> Self {
        match AudioContext::new() {
            Ok(ctx) => Self { ctx: Some(ctx) },
            Err(err) => {
                let err = PlatformError::js(PlatformError::Audio, err);
                tracing::warn!(%err, "sound disabled");
                Self { ctx: None }
            }
        }
    }

    /// Contexts made before a user gesture start suspended.
    pub fn wake(&self) {
        let Some(ctx) = &self.ctx else { return };
        if let Err(err) = ctx.resume() {
            let err = PlatformError::js(PlatformError::Audio, err);
            tracing::debug!(%err, "audio resume failed");
        }
    }

    pub fn play(&self, cue: Cue) {
        let Some(ctx) = &self.ctx else { return };
        if let Err(err) = beep(ctx, cue.tone()) {
            tracing::debug!(%err, ?cue, "beep failed");
        }
    }
}

impl Default for Beeper {
    fn default() -> Self {
        Self::new()
    }
}

fn oscillator_type(wave: Waveform) -> OscillatorType {
    match wave {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Square => OscillatorType::Square,
        Waveform::Sawtooth => OscillatorType::Sawtooth,
        Waveform::Triangle => OscillatorType::Triangle,
    }
}

fn beep(ctx: &AudioContext, tone: Tone) -> Result<(), PlatformError> {
    let audio = |err| PlatformError::js(PlatformError::Audio, err);
    let osc = ctx.create_oscillator().map_err(audio)?;
    let gain = ctx.create_gain().map_err(audio)?;
    osc.set_type(oscillator_type(tone.wave));
    osc.frequency().set_value(tone.freq);
    gain.gain().set_value(tone.volume);
    osc.connect_with_audio_node(&gain).map_err(audio)?;
    gain.connect_with_audio_node(&ctx.destination()).map_err(audio)?;
    osc.start().map_err(audio)?;
    let now = ctx.current_time();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.0001, now + tone.secs)
        .map_err(audio)?;
    osc.stop_with_when(now + tone.secs + 0.02).map_err(audio)?;
    Ok(())
}
