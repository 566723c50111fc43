use crate::{
    graph::{
        amplify::Amplify,
        envelope::EnvNode,
        extensions::NodeExt,
        node::{GraphNode, RenderCtx},
        oscillator::OscNode,
    },
    sequencing::ToneEvent,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Free,     // Available for allocation
    Pending,  // Scheduled, onset not reached yet
    Sounding, // Envelope running
}

/// A single tone slot: one oscillator shaped by one envelope.
///
/// Voices are allocated once and reused, so starting a tone on the audio
/// thread never allocates.
pub struct ToneVoice {
    state: VoiceState,
    start_frame: u64,
    frequency: f32,
    sample_rate: f32,
    graph: Amplify<OscNode, EnvNode>,
}

impl ToneVoice {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            state: VoiceState::Free,
            start_frame: 0,
            frequency: 0.0,
            sample_rate,
            graph: OscNode::sine().amplify(EnvNode::new(Default::default())),
        }
    }

    /// Arm the voice for `event`, sounding from `start_frame` on.
    pub fn schedule(&mut self, event: &ToneEvent, start_frame: u64) {
        self.graph.signal.retune(event.waveform, Some(event.frequency));
        self.graph.modulator.set_shape(event.envelope_shape());
        self.frequency = event.frequency;
        self.start_frame = start_frame;
        self.state = VoiceState::Pending;
    }

    /// Add this voice's output for the block starting at `block_start` to `out`.
    ///
    /// `scratch` must be at least as long as `out`.
    pub fn render_into(&mut self, out: &mut [f32], scratch: &mut [f32], block_start: u64) {
        let block_end = block_start + out.len() as u64;
        let ctx = self.ctx();

        let offset = match self.state {
            VoiceState::Free => return,
            VoiceState::Pending if self.start_frame >= block_end => return,
            VoiceState::Pending => {
                let offset = self.start_frame.saturating_sub(block_start) as usize;
                self.graph.note_on(&ctx);
                self.state = VoiceState::Sounding;
                offset
            }
            VoiceState::Sounding => 0,
        };

        let len = out.len() - offset;
        let scratch = &mut scratch[..len];
        self.graph.render_block(scratch, &ctx);

        for (o, s) in out[offset..].iter_mut().zip(scratch.iter()) {
            *o += s;
        }

        if !self.graph.is_active() {
            self.free();
        }
    }

    pub fn free(&mut self) {
        self.state = VoiceState::Free;
        self.graph.modulator.reset();
    }

    pub fn is_free(&self) -> bool {
        self.state == VoiceState::Free
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn start_frame(&self) -> u64 {
        self.start_frame
    }

    fn ctx(&self) -> RenderCtx {
        RenderCtx::from_freq(self.sample_rate, self.frequency, 1.0)
    }
}
