use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Multiply a signal by a gain modulator (an oscillator shaped by an envelope).
///
/// The modulator gates the pair: once it goes quiet the whole node reports
/// inactive, even though the signal side could keep oscillating forever.
pub struct Amplify<N, M> {
    pub signal: N,
    pub modulator: M,
    temp_buffer: Vec<f32>,
}

impl<N, M> Amplify<N, M> {
    pub fn new(signal: N, modulator: M) -> Self {
        Self {
            signal,
            modulator,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<N: GraphNode, M: GraphNode> GraphNode for Amplify<N, M> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        debug_assert!(out.len() <= MAX_BLOCK_SIZE);

        self.signal.render_block(out, ctx);

        // Slice temp buffer to match output size (RT-safe, no allocation)
        let gains = &mut self.temp_buffer[..out.len()];
        self.modulator.render_block(gains, ctx);

        for (o, g) in out.iter_mut().zip(gains.iter()) {
            *o *= *g;
        }
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.signal.note_on(ctx);
        self.modulator.note_on(ctx);
    }

    fn is_active(&self) -> bool {
        self.modulator.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dsp::oscillator::OscillatorWaveform,
        graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode},
    };

    #[test]
    fn tone_is_silent_once_envelope_ends() {
        let ctx = RenderCtx::from_freq(1_000.0, 100.0, 1.0);
        let mut tone = OscNode::sine().amplify(EnvNode::tone(0.01, 0.05, 0.5));
        tone.signal.retune(OscillatorWaveform::Square, None);
        tone.note_on(&ctx);

        let mut buffer = vec![0.0f32; 80];
        tone.render_block(&mut buffer, &ctx);

        assert!(buffer[..50].iter().any(|s| s.abs() > 0.4));
        assert!(buffer[..50].iter().all(|s| s.abs() <= 0.5 + 1e-6));
        assert!(buffer[50..].iter().all(|&s| s == 0.0));
        assert!(!tone.is_active());
    }
}
