//! Practice session state.
//!
//! Thin orchestration around the round generator: it remembers the current
//! round, whether it has been answered, and the running tallies. Playback is
//! left to the caller, which hands `current_round()` to a `TonePlayer`.

use std::collections::BTreeMap;

use crate::intervals::{Interval, Preset};
use crate::random::RandomSource;

use super::config::{DirectionSetting, MaxRange, NoteLength, PracticeConfiguration, TrainingMode};
use super::round::{generate_round, Round};

/// Per-interval counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntervalStats {
    /// Rounds generated with this interval as the answer.
    pub asked: u32,
    /// Of those, how many were answered.
    pub answered: u32,
    /// Of those, how many were answered correctly.
    pub correct: u32,
}

/// Result of checking a submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub answer: Interval,
    pub submitted: Interval,
}

pub struct PracticeSession<R: RandomSource> {
    config: PracticeConfiguration,
    rng: R,
    current: Option<Round>,
    answered: bool,
    submitted: Option<Interval>,
    total: u32,
    correct: u32,
    stats: BTreeMap<Interval, IntervalStats>,
}

impl<R: RandomSource> PracticeSession<R> {
    pub fn new(config: PracticeConfiguration, rng: R) -> Self {
        Self {
            config,
            rng,
            current: None,
            answered: false,
            submitted: None,
            total: 0,
            correct: 0,
            stats: Interval::ALL
                .into_iter()
                .map(|interval| (interval, IntervalStats::default()))
                .collect(),
        }
    }

    pub fn config(&self) -> &PracticeConfiguration {
        &self.config
    }

    /// Generate a fresh round, replacing the current one.
    ///
    /// Records the answer interval as asked. If no round is feasible the
    /// current round is cleared and `None` is returned.
    pub fn next_round(&mut self) -> Option<Round> {
        let round = generate_round(&self.config, &mut self.rng);
        self.current = round;

        if let Some(round) = round {
            self.stats.entry(round.answer).or_default().asked += 1;
            self.clear_answer();
        }

        round
    }

    /// The round to play or answer, generating one when needed.
    ///
    /// A round whose answer was removed from the selection is replaced.
    pub fn current_round(&mut self) -> Option<Round> {
        match self.current {
            Some(round) if self.config.is_selected(round.answer) => Some(round),
            _ => self.next_round(),
        }
    }

    /// The current round without generating a new one.
    pub fn peek_round(&self) -> Option<&Round> {
        self.current.as_ref()
    }

    /// Check `choice` against the current round.
    ///
    /// Returns `None` when the round was already answered or no round is
    /// available.
    pub fn check_answer(&mut self, choice: Interval) -> Option<AnswerOutcome> {
        if self.answered {
            return None;
        }

        let round = self.current_round()?;
        let is_correct = choice == round.answer;

        self.submitted = Some(choice);
        self.total += 1;

        let stats = self.stats.entry(round.answer).or_default();
        stats.answered += 1;
        if is_correct {
            stats.correct += 1;
            self.correct += 1;
        }

        self.answered = true;

        Some(AnswerOutcome {
            correct: is_correct,
            answer: round.answer,
            submitted: choice,
        })
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    pub fn submitted(&self) -> Option<Interval> {
        self.submitted
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    /// Share of correct answers, in percent. Zero before the first answer.
    pub fn accuracy_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64 * 100.0
    }

    pub fn interval_stats(&self, interval: Interval) -> IntervalStats {
        self.stats.get(&interval).copied().unwrap_or_default()
    }

    pub fn stats(&self) -> impl Iterator<Item = (Interval, IntervalStats)> + '_ {
        self.stats.iter().map(|(interval, stats)| (*interval, *stats))
    }

    pub fn reset_stats(&mut self) {
        self.total = 0;
        self.correct = 0;
        for stats in self.stats.values_mut() {
            *stats = IntervalStats::default();
        }
    }

    pub fn active_preset(&self) -> Option<Preset> {
        self.config.active_preset()
    }

    /// Add or remove an interval from the selection.
    pub fn toggle_interval(&mut self, interval: Interval) {
        if !self.config.selected_intervals.remove(&interval) {
            self.config.selected_intervals.insert(interval);
        }
        self.clear_answer();
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        self.config.selected_intervals = preset.selection();
        self.clear_answer();
    }

    pub fn set_max_range(&mut self, max_range: MaxRange) {
        self.config.max_range = max_range;
        self.clear_answer();
    }

    pub fn set_training_mode(&mut self, mode: TrainingMode) {
        self.config.training_mode = mode;
    }

    pub fn set_direction(&mut self, direction: DirectionSetting) {
        self.config.direction = direction;
    }

    pub fn set_note_length(&mut self, length: NoteLength) {
        self.config.note_duration_seconds = length.seconds();
    }

    fn clear_answer(&mut self) {
        self.answered = false;
        self.submitted = None;
    }
}
