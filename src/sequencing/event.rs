use crate::{
    dsp::{envelope::EnvelopeShape, oscillator::OscillatorWaveform},
    pitch::pitch_to_frequency,
};

/// Gain peak of a practice note.
pub const NOTE_PEAK_VOLUME: f32 = 0.25;
/// Attack of a practice note, in seconds.
pub const NOTE_ATTACK_SECONDS: f64 = 0.02;
/// Attack of a feedback chime, in seconds.
pub const CHIME_ATTACK_SECONDS: f64 = 0.01;

/// One timed tone in a schedule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneEvent {
    /// Keyboard pitch the tone was derived from (None for fixed-frequency chimes)
    pub pitch: Option<u8>,
    /// Oscillator frequency in Hz
    pub frequency: f32,
    /// Seconds from the start of the schedule
    pub start_offset: f64,
    /// Seconds from onset to silence
    pub duration: f64,
    pub waveform: OscillatorWaveform,
    /// Loudest gain of the envelope
    pub peak_volume: f32,
    /// Seconds from onset to peak
    pub attack: f64,
}

impl ToneEvent {
    /// A practice note: sine, 20ms attack, 0.25 peak.
    pub fn note(pitch: u8, start_offset: f64, duration: f64) -> Self {
        Self {
            pitch: Some(pitch),
            frequency: pitch_to_frequency(pitch) as f32,
            start_offset,
            duration,
            waveform: OscillatorWaveform::Sine,
            peak_volume: NOTE_PEAK_VOLUME,
            attack: NOTE_ATTACK_SECONDS,
        }
    }

    /// A fixed-frequency feedback tone with a 10ms attack.
    pub fn chime(
        frequency: f32,
        start_offset: f64,
        duration: f64,
        waveform: OscillatorWaveform,
        peak_volume: f32,
    ) -> Self {
        Self {
            pitch: None,
            frequency,
            start_offset,
            duration,
            waveform,
            peak_volume,
            attack: CHIME_ATTACK_SECONDS,
        }
    }

    /// Offset at which the tone has fully ended.
    pub fn end_offset(&self) -> f64 {
        self.start_offset + self.duration
    }

    pub fn envelope_shape(&self) -> EnvelopeShape {
        EnvelopeShape::new(self.attack as f32, self.duration as f32, self.peak_volume)
    }

    /// Whether the tone is sounding `offset` seconds into the schedule.
    pub fn sounds_at(&self, offset: f64) -> bool {
        offset >= self.start_offset && offset < self.end_offset()
    }
}
