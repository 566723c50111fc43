//! Practice configuration - what to ask and how to play it.
//!
//! The surrounding UI owns a `PracticeConfiguration` and mutates it as the
//! user changes settings. The round generator and the tone player only read
//! a snapshot of it per call.

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::intervals::{Interval, Preset};

/// Longest note the trainer will play, in seconds.
pub const MAX_NOTE_SECONDS: f64 = 10.0;

/// Maximum distance between the two notes of a round.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaxRange {
    /// Intervals are played within a single octave (12 semitones).
    #[default]
    OneOctave,
    /// Intervals may be widened into the second octave (24 semitones).
    TwoOctaves,
}

impl MaxRange {
    pub const fn semitones(self) -> u8 {
        match self {
            MaxRange::OneOctave => 12,
            MaxRange::TwoOctaves => 24,
        }
    }
}

/// How the two notes of a round are sounded.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrainingMode {
    /// One after another; the first note is the reference.
    #[default]
    Melodic,
    /// Together; the lower note is the reference.
    Harmony,
}

/// A concrete melodic direction.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// The user's direction preference, possibly left to chance.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectionSetting {
    Ascending,
    Descending,
    #[default]
    Random,
}

/// Note length presets, in seconds.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteLength {
    #[default]
    Short,
    Medium,
    Long,
}

impl NoteLength {
    pub const fn seconds(self) -> f64 {
        match self {
            NoteLength::Short => 0.6,
            NoteLength::Medium => 1.0,
            NoteLength::Long => 2.0,
        }
    }
}

/// Everything the generator and the player need to know about a practice run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeConfiguration {
    /// Intervals that may be asked. Empty means no round can be generated.
    pub selected_intervals: BTreeSet<Interval>,
    pub max_range: MaxRange,
    pub training_mode: TrainingMode,
    pub direction: DirectionSetting,
    /// Length of each played note, in seconds. Always positive.
    pub note_duration_seconds: f64,
}

impl PracticeConfiguration {
    /// Create a configuration with the default practice settings:
    /// the normal preset, one octave, melodic, random direction, short notes.
    pub fn new() -> Self {
        Self {
            selected_intervals: Preset::Basic.selection(),
            max_range: MaxRange::OneOctave,
            training_mode: TrainingMode::Melodic,
            direction: DirectionSetting::Random,
            note_duration_seconds: NoteLength::Short.seconds(),
        }
    }

    /// Replace the selection with the given intervals.
    pub fn intervals(mut self, intervals: impl IntoIterator<Item = Interval>) -> Self {
        self.selected_intervals = intervals.into_iter().collect();
        self
    }

    /// Replace the selection with a preset.
    pub fn preset(mut self, preset: Preset) -> Self {
        self.selected_intervals = preset.selection();
        self
    }

    pub fn max_range(mut self, max_range: MaxRange) -> Self {
        self.max_range = max_range;
        self
    }

    pub fn mode(mut self, mode: TrainingMode) -> Self {
        self.training_mode = mode;
        self
    }

    pub fn direction(mut self, direction: DirectionSetting) -> Self {
        self.direction = direction;
        self
    }

    pub fn note_length(mut self, length: NoteLength) -> Self {
        self.note_duration_seconds = length.seconds();
        self
    }

    /// Set the note duration directly. Non-positive or non-finite values are
    /// replaced by the short note length; longer ones are capped at
    /// `MAX_NOTE_SECONDS`.
    pub fn note_duration(mut self, seconds: f64) -> Self {
        self.note_duration_seconds = sanitize_duration(seconds);
        self
    }

    /// Selected intervals in catalogue order.
    pub fn pool(&self) -> Vec<Interval> {
        Interval::ALL
            .into_iter()
            .filter(|interval| self.selected_intervals.contains(interval))
            .collect()
    }

    pub fn is_selected(&self, interval: Interval) -> bool {
        self.selected_intervals.contains(&interval)
    }

    /// The preset the current selection corresponds to, if any.
    pub fn active_preset(&self) -> Option<Preset> {
        Preset::matching(&self.selected_intervals)
    }

    /// Note length as used for playback.
    pub fn note_seconds(&self) -> f64 {
        sanitize_duration(self.note_duration_seconds)
    }
}

impl Default for PracticeConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

fn sanitize_duration(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.min(MAX_NOTE_SECONDS)
    } else {
        NoteLength::Short.seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_normal_practice() {
        let config = PracticeConfiguration::default();
        assert_eq!(config.active_preset(), Some(Preset::Basic));
        assert_eq!(config.max_range.semitones(), 12);
        assert_eq!(config.training_mode, TrainingMode::Melodic);
        assert_eq!(config.direction, DirectionSetting::Random);
        assert_eq!(config.note_duration_seconds, 0.6);
    }

    #[test]
    fn builder_chains() {
        let config = PracticeConfiguration::new()
            .intervals([Interval::Octave, Interval::MinorSecond])
            .max_range(MaxRange::TwoOctaves)
            .mode(TrainingMode::Harmony)
            .direction(DirectionSetting::Descending)
            .note_length(NoteLength::Long);

        assert_eq!(config.pool(), vec![Interval::MinorSecond, Interval::Octave]);
        assert_eq!(config.max_range.semitones(), 24);
        assert_eq!(config.note_duration_seconds, 2.0);
        assert_eq!(config.active_preset(), None);
    }

    #[test]
    fn invalid_durations_fall_back_to_short() {
        assert_eq!(PracticeConfiguration::new().note_duration(-1.0).note_seconds(), 0.6);
        assert_eq!(PracticeConfiguration::new().note_duration(f64::NAN).note_seconds(), 0.6);
        assert_eq!(PracticeConfiguration::new().note_duration(1.5).note_seconds(), 1.5);
    }

    #[test]
    fn long_durations_are_capped() {
        let config = PracticeConfiguration::new().note_duration(1e20);
        assert_eq!(config.note_duration_seconds, MAX_NOTE_SECONDS);

        // A field written directly is still capped on read
        let config = PracticeConfiguration {
            note_duration_seconds: f64::MAX,
            ..PracticeConfiguration::new()
        };
        assert_eq!(config.note_seconds(), MAX_NOTE_SECONDS);
    }
}
