use crate::{
    intervals::Interval,
    pitch::{KEYBOARD_SPAN, MAX_PITCH, MIN_PITCH},
    random::{pick, RandomSource},
};

use super::config::{Direction, DirectionSetting, MaxRange, PracticeConfiguration, TrainingMode};

/*
Round Generation
================

A round is one question: an answer interval plus the two concrete pitches
that will be played for it.

  answer      The interval the user must name (e.g. P5).
  direction   Ascending or descending, resolved from the user's setting.
  distance    The semitone distance actually sounded.
  note1       The reference note (played first in melodic mode).
  note2       The second note.


Descending Intervals Are Heard As Complements
---------------------------------------------

The answer is always named relative to the reference note. In melodic mode
a descending round keeps that naming by sounding the complement inside the
octave, measured downward:

  answer   up from note1   played downward
  ------   -------------   ---------------
  M2 (2)        2              10
  M3 (4)        4               8
  P5 (7)        7               5
  P8 (12)      12              12   (no complement)

    base = (12 - d) mod 12,   0 → 12

Harmony mode never does this: the lower note is the reference, so the base
is simply the interval's own distance.


Octave Widening
---------------

With a two-octave range the base may be widened by twelve, so a P5 can be
heard as 7 or 19 semitones. Any candidate wider than the keyboard is
dropped.


Placing The Notes
-----------------

note1 is drawn uniformly from every key that leaves room for note2:

  descending melodic:   [MIN + d, MAX]     note2 = note1 - d
  everything else:      [MIN, MAX - d]     note2 = note1 + d

The keyboard is two octaves wide, so a 24 semitone distance pins the notes
to C4 and C6.


Bounded Retry
-------------

An attempt that finds no candidate distance or an empty window starts over
with a fresh draw. After MAX_ATTEMPTS failed attempts the generator gives up
and returns None rather than looping.
*/

/// Attempts before the generator gives up on a configuration.
pub const MAX_ATTEMPTS: usize = 40;

/// A generated question. Immutable once returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    /// The interval the user is asked to identify.
    pub answer: Interval,
    /// Semitone distance between the played notes.
    pub distance_semitones: u8,
    /// Direction the round was resolved to.
    pub direction: Direction,
    /// Reference note.
    pub note1_pitch: u8,
    pub note2_pitch: u8,
}

impl Round {
    /// Signed distance from note1 to note2.
    pub fn signed_distance(&self) -> i32 {
        self.note2_pitch as i32 - self.note1_pitch as i32
    }
}

/// Resolve a possibly-random direction setting with a fair coin.
pub fn resolve_direction<R: RandomSource + ?Sized>(
    setting: DirectionSetting,
    rng: &mut R,
) -> Direction {
    match setting {
        DirectionSetting::Ascending => Direction::Ascending,
        DirectionSetting::Descending => Direction::Descending,
        DirectionSetting::Random => {
            if rng.uniform_float() < 0.5 {
                Direction::Ascending
            } else {
                Direction::Descending
            }
        }
    }
}

/// Distance sounded for an answer before any octave widening.
pub fn played_base_distance(answer_semitones: u8, mode: TrainingMode, direction: Direction) -> u8 {
    if mode == TrainingMode::Melodic && direction == Direction::Descending {
        if answer_semitones == 12 {
            return 12;
        }

        let downward = (12 - answer_semitones % 12) % 12;
        return if downward == 0 { 12 } else { downward };
    }

    answer_semitones
}

/// Candidate distances for a base distance under the configured range.
pub fn distance_options(base: u8, max_range: MaxRange) -> Vec<u8> {
    let two_octaves = max_range == MaxRange::TwoOctaves;

    if base == 12 {
        return if two_octaves { vec![12, 24] } else { vec![12] };
    }

    if two_octaves && base + 12 <= 24 {
        return vec![base, base + 12];
    }

    vec![base]
}

/// Inclusive window of valid `note1` pitches for a distance.
///
/// Returns `None` when the distance does not fit on the keyboard.
pub fn note1_window(distance: u8, mode: TrainingMode, direction: Direction) -> Option<(u8, u8)> {
    let min = MIN_PITCH as i32;
    let max = MAX_PITCH as i32;
    let distance = distance as i32;

    let (low, high) = if mode == TrainingMode::Melodic && direction == Direction::Descending {
        (min + distance, max)
    } else {
        (min, max - distance)
    };

    if low > high {
        return None;
    }

    Some((low as u8, high as u8))
}

/// Generate a round for `config`, or `None` if no round is feasible.
///
/// An empty selection returns `None` without touching `rng`.
pub fn generate_round<R: RandomSource + ?Sized>(
    config: &PracticeConfiguration,
    rng: &mut R,
) -> Option<Round> {
    let pool = config.pool();
    if pool.is_empty() {
        return None;
    }

    for _ in 0..MAX_ATTEMPTS {
        let Some(&answer) = pick(rng, &pool) else {
            return None;
        };
        let direction = resolve_direction(config.direction, rng);
        let base = played_base_distance(answer.semitones(), config.training_mode, direction);

        let candidates: Vec<u8> = distance_options(base, config.max_range)
            .into_iter()
            .filter(|&distance| distance <= KEYBOARD_SPAN)
            .collect();

        let Some(&distance) = pick(rng, &candidates) else {
            continue;
        };

        let Some((low, high)) = note1_window(distance, config.training_mode, direction) else {
            continue;
        };

        let note1 = rng.uniform_int(low as i32, high as i32) as u8;
        let note2 = match (config.training_mode, direction) {
            (TrainingMode::Melodic, Direction::Descending) => note1 - distance,
            _ => note1 + distance,
        };

        let round = Round {
            answer,
            distance_semitones: distance,
            direction,
            note1_pitch: note1,
            note2_pitch: note2,
        };
        log::debug!(
            "generated round {} ({:?}): {} -> {} ({} semitones)",
            answer,
            direction,
            note1,
            note2,
            distance
        );
        return Some(round);
    }

    log::debug!("no feasible round after {MAX_ATTEMPTS} attempts");
    None
}
