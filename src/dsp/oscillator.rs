use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::node::RenderCtx;

/// Oscillator shape of a single tone.
///
/// Practice notes are sine tones. The square wave only colours the first
/// half of the "incorrect" chime.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OscillatorWaveform {
    #[default]
    Sine,
    Square,
}

/// Phase-accumulating oscillator.
///
/// Phase is kept in cycles (0.0..1.0) so it can be advanced by
/// `frequency / sample_rate` without wrapping through TAU.
pub struct OscillatorBlock {
    waveform: OscillatorWaveform,
    phase: f32,
}

impl OscillatorBlock {
    pub fn new(waveform: OscillatorWaveform) -> Self {
        Self { waveform, phase: 0.0 }
    }

    pub fn set_waveform(&mut self, waveform: OscillatorWaveform) {
        self.waveform = waveform;
    }

    /// Restart the cycle at phase zero.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Produce the current sample, then advance the phase.
    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let value = match self.waveform {
            OscillatorWaveform::Sine => (TAU * self.phase).sin(),
            OscillatorWaveform::Square => {
                if self.phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
        };

        self.phase += frequency / sample_rate;
        self.phase -= self.phase.floor();

        value
    }

    pub fn render(&mut self, destination: &mut [f32], ctx: &RenderCtx) {
        for sample in destination.iter_mut() {
            *sample = self.next_sample(ctx.frequency, ctx.sample_rate);
        }
    }
}
