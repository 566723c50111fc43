use crate::{
    synth::{
        message::{MessageReceiver, ToneMessage},
        voice::ToneVoice,
    },
    MAX_BLOCK_SIZE,
};

/// Voices per renderer. A request never schedules more than two tones.
pub const DEFAULT_MAX_VOICES: usize = 8;

/// Audio-thread side of a synthesis context.
///
/// Pops tone commands, starts voices at their scheduled frame and sums every
/// sounding voice into the output. Keeps its own frame clock, which defines
/// the time base `ToneMessage::Start::at` refers to.
pub struct ToneRenderer<R: MessageReceiver> {
    voices: Vec<ToneVoice>,
    rx: R,
    temp_buffer: Vec<f32>,
    sample_rate: f32,
    frame_counter: u64,
    dropped: u64,
}

impl<R: MessageReceiver> ToneRenderer<R> {
    pub fn new(sample_rate: f32, max_voices: usize, rx: R) -> Self {
        let voices = (0..max_voices.max(1))
            .map(|_| ToneVoice::new(sample_rate))
            .collect();

        Self {
            voices,
            rx,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
            sample_rate,
            frame_counter: 0,
            dropped: 0,
        }
    }

    /// Render any number of frames, in blocks of at most `MAX_BLOCK_SIZE`.
    pub fn render(&mut self, out: &mut [f32]) {
        for block in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.render_block(block);
        }
    }

    /// Render one block. `out.len()` must not exceed `MAX_BLOCK_SIZE`.
    pub fn render_block(&mut self, out: &mut [f32]) {
        // Process control messages
        while let Some(ToneMessage::Start { event, at }) = self.rx.pop() {
            let start_frame = (at.max(0.0) * self.sample_rate as f64).round() as u64;
            match self.voices.iter_mut().find(|v| v.is_free()) {
                Some(voice) => voice.schedule(&event, start_frame),
                None => self.dropped += 1,
            }
        }

        // Mix voices
        out.fill(0.0);
        let block_start = self.frame_counter;
        for voice in &mut self.voices {
            voice.render_into(out, &mut self.temp_buffer, block_start);
        }

        self.frame_counter += out.len() as u64;
    }

    /// Seconds rendered so far.
    pub fn time(&self) -> f64 {
        self.frame_counter as f64 / self.sample_rate as f64
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// True when no voice is pending or sounding.
    pub fn is_idle(&self) -> bool {
        self.voices.iter().all(|v| v.is_free())
    }

    /// Tones that arrived while every voice was busy.
    pub fn dropped_tones(&self) -> u64 {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::{
        dsp::oscillator::OscillatorWaveform,
        sequencing::{ToneEvent, ToneSchedule},
    };

    const SAMPLE_RATE: f32 = 8_000.0;

    fn queue(schedule: &ToneSchedule) -> VecDeque<ToneMessage> {
        schedule
            .events()
            .iter()
            .map(|event| ToneMessage::Start {
                event: *event,
                at: event.start_offset,
            })
            .collect()
    }

    #[test]
    fn starts_tone_at_scheduled_frame() {
        let event = ToneEvent::chime(1_000.0, 0.01, 0.05, OscillatorWaveform::Square, 0.5);
        let schedule = ToneSchedule::new().tone(event);
        let mut renderer = ToneRenderer::new(SAMPLE_RATE, 4, queue(&schedule));

        let mut out = vec![0.0f32; 1_000];
        renderer.render(&mut out);

        // 0.01s at 8kHz = frame 80; first sample of the tone is the floor gain
        assert!(out[..80].iter().all(|&s| s == 0.0));
        assert!(out[80] > 0.0);
        assert!(out[80] < 0.001);
        // Tone ends 0.06s in = frame 480
        assert!(out[480..].iter().all(|&s| s == 0.0));
        assert!(renderer.is_idle());
    }

    #[test]
    fn overlapping_tones_are_summed() {
        let a = ToneEvent::chime(1_000.0, 0.0, 0.1, OscillatorWaveform::Square, 0.2);
        let schedule = ToneSchedule::new().tone(a).tone(a);
        let mut renderer = ToneRenderer::new(SAMPLE_RATE, 4, queue(&schedule));

        let mut out = vec![0.0f32; 800];
        renderer.render(&mut out);

        let peak = out.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
        assert!((peak - 0.4).abs() < 1e-4, "peak {peak}");
    }

    #[test]
    fn excess_tones_are_dropped_not_queued() {
        let a = ToneEvent::chime(500.0, 0.0, 0.01, OscillatorWaveform::Sine, 0.2);
        let schedule = ToneSchedule::new().tone(a).tone(a).tone(a);
        let mut renderer = ToneRenderer::new(SAMPLE_RATE, 2, queue(&schedule));

        let mut out = vec![0.0f32; 64];
        renderer.render(&mut out);

        assert_eq!(renderer.dropped_tones(), 1);
    }

    #[test]
    fn clock_advances_with_rendered_frames() {
        let mut renderer = ToneRenderer::new(SAMPLE_RATE, 1, VecDeque::new());
        let mut out = vec![0.0f32; 4_000];
        renderer.render(&mut out);

        assert_eq!(renderer.time(), 0.5);
        assert!(out.iter().all(|&s| s == 0.0));
    }
}
