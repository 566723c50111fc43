use crate::dsp::oscillator::{OscillatorBlock, OscillatorWaveform};
use crate::graph::node::{GraphNode, RenderCtx};

/*
Tone Oscillator
===============

The oscillator is the raw sound source of every tone the trainer plays.
Only two waveforms are needed:

Sine: The purest tone - a single frequency with no harmonics.
  - Sound: Smooth, hollow, flute-like
  - Use: Every practice note, and the bright "correct" chime

Square: Hollow but buzzy - odd harmonics only.
  - Sound: Darker and rougher than a sine at the same pitch
  - Use: First half of the "incorrect" chime

Voices are preallocated, so one node serves every tone a voice plays.
Scheduling a tone retunes it in place; with no fixed frequency the node
follows the frequency carried in the RenderCtx:

  let mut osc = OscNode::sine();
  osc.retune(OscillatorWaveform::Square, Some(220.0)); // incorrect chime
  osc.retune(OscillatorWaveform::Sine, None);          // tracks ctx.frequency
*/

pub struct OscNode {
    osc: OscillatorBlock,
    /// Fixed frequency (Hz). If Some, ignores ctx.frequency and uses this instead.
    fixed_frequency: Option<f32>,
}

impl OscNode {
    pub fn new(waveform: OscillatorWaveform) -> Self {
        Self {
            osc: OscillatorBlock::new(waveform),
            fixed_frequency: None,
        }
    }

    pub fn sine() -> Self {
        Self::new(OscillatorWaveform::Sine)
    }

    /// Retune an existing node in place (voice reuse on the audio thread).
    pub fn retune(&mut self, waveform: OscillatorWaveform, frequency: Option<f32>) {
        self.osc.set_waveform(waveform);
        self.fixed_frequency = frequency;
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let frequency = self.fixed_frequency.unwrap_or(ctx.frequency);

        let modified_ctx = RenderCtx { frequency, ..*ctx };
        self.osc.render(out, &modified_ctx);
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        // Every tone starts at a zero crossing
        self.osc.reset();
    }
}
