use crate::{
    dsp::envelope::{Envelope, EnvelopeShape},
    graph::node::{GraphNode, RenderCtx},
};

/// Graph node wrapping the tone envelope.
///
/// Renders gain values rather than audio, so it is meant to be the modulator
/// side of an `.amplify()`.
pub struct EnvNode {
    env: Envelope,
}

impl EnvNode {
    pub fn new(shape: EnvelopeShape) -> Self {
        Self {
            env: Envelope::new(shape),
        }
    }

    /// Attack, total duration and peak gain, all in one call.
    pub fn tone(attack: f32, duration: f32, peak: f32) -> Self {
        Self::new(EnvelopeShape::new(attack, duration, peak))
    }

    pub fn set_shape(&mut self, shape: EnvelopeShape) {
        self.env.set_shape(shape);
    }

    pub fn reset(&mut self) {
        self.env.reset();
    }
}

impl GraphNode for EnvNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        self.env.render(out);
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.env.note_on(ctx);
    }

    fn is_active(&self) -> bool {
        self.env.is_active()
    }
}
