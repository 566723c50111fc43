use crate::{
    dsp::oscillator::OscillatorWaveform,
    practice::{PracticeConfiguration, Round, TrainingMode},
};

use super::event::ToneEvent;

/*
Tone Schedules
==============

A schedule is the complete list of tones one playback request will sound,
each with an offset from the moment the request starts. Schedules are
plain data: building one touches no audio device, so every timing rule
below is testable without sound.

Practice notes (duration D, gap G = 0.15s)
------------------------------------------

  single pitch:   [note ........ D]

  harmony:        [note1 ....... D]
                  [note2 ....... D]          both start at 0

  melodic:        [note1 ....... D]   G   [note2 ....... D]
                  0                 D    D+G            2D+G


Feedback chimes
---------------

Chimes are not derived from a round. They are short enough to finish
before the user can ask for the next round.

  correct:     880.00 Hz sine   0.09s @ 0.00   peak 0.30
              1174.66 Hz sine   0.12s @ 0.10   peak 0.33   (A5 → D6, bright)

  incorrect:   220.00 Hz square 0.14s @ 0.00   peak 0.18
               180.00 Hz sine   0.16s @ 0.11   peak 0.15   (low, darker)
*/

/// Silence between the two notes of a melodic round, in seconds.
pub const NOTE_GAP_SECONDS: f64 = 0.15;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToneSchedule {
    events: Vec<ToneEvent>,
}

impl ToneSchedule {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add a tone to the schedule
    pub fn tone(mut self, event: ToneEvent) -> Self {
        self.events.push(event);
        self
    }

    /// One practice note starting immediately.
    pub fn single_pitch(pitch: u8, note_seconds: f64) -> Self {
        Self::new().tone(ToneEvent::note(pitch, 0.0, note_seconds))
    }

    /// Both notes of a round, sequenced for the given mode.
    pub fn round(round: &Round, mode: TrainingMode, note_seconds: f64) -> Self {
        let second_onset = match mode {
            TrainingMode::Harmony => 0.0,
            TrainingMode::Melodic => note_seconds + NOTE_GAP_SECONDS,
        };

        Self::new()
            .tone(ToneEvent::note(round.note1_pitch, 0.0, note_seconds))
            .tone(ToneEvent::note(round.note2_pitch, second_onset, note_seconds))
    }

    /// Round schedule using the configured mode and note length.
    pub fn for_round(round: &Round, config: &PracticeConfiguration) -> Self {
        Self::round(round, config.training_mode, config.note_seconds())
    }

    pub fn correct_chime() -> Self {
        Self::new()
            .tone(ToneEvent::chime(880.0, 0.0, 0.09, OscillatorWaveform::Sine, 0.3))
            .tone(ToneEvent::chime(1174.66, 0.1, 0.12, OscillatorWaveform::Sine, 0.33))
    }

    pub fn incorrect_chime() -> Self {
        Self::new()
            .tone(ToneEvent::chime(220.0, 0.0, 0.14, OscillatorWaveform::Square, 0.18))
            .tone(ToneEvent::chime(180.0, 0.11, 0.16, OscillatorWaveform::Sine, 0.15))
    }

    pub fn events(&self) -> &[ToneEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Offset at which the last tone has ended (0.0 for an empty schedule).
    pub fn end_time(&self) -> f64 {
        self.events
            .iter()
            .map(ToneEvent::end_offset)
            .fold(0.0, f64::max)
    }

    /// Number of tones sounding `offset` seconds into the schedule.
    pub fn voices_at(&self, offset: f64) -> usize {
        self.events.iter().filter(|e| e.sounds_at(offset)).count()
    }
}
