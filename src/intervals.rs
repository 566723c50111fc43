/*
Interval Catalogue
==================

An interval is the distance between two pitches, counted in semitones.
The trainer asks about the twelve intervals inside one octave:

  id   semitones   name
  ---  ---------   -----------------
  m2       1       minor second
  M2       2       major second
  m3       3       minor third
  M3       4       major third
  P4       5       perfect fourth
  b5       6       tritone (flat five)
  P5       7       perfect fifth
  #5       8       augmented fifth
  M6       9       major sixth
  m7      10       minor seventh
  M7      11       major seventh
  P8      12       octave

The set is fixed. Practice configurations select a subset of it, either one
interval at a time or through a preset.
*/

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the twelve practice intervals.
///
/// Variants are declared in semitone order, so the derived `Ord` sorts a
/// selection from smallest to largest interval.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Interval {
    MinorSecond,
    MajorSecond,
    MinorThird,
    MajorThird,
    PerfectFourth,
    Tritone,
    PerfectFifth,
    AugmentedFifth,
    MajorSixth,
    MinorSeventh,
    MajorSeventh,
    Octave,
}

impl Interval {
    /// Every interval, smallest first.
    pub const ALL: [Interval; 12] = [
        Interval::MinorSecond,
        Interval::MajorSecond,
        Interval::MinorThird,
        Interval::MajorThird,
        Interval::PerfectFourth,
        Interval::Tritone,
        Interval::PerfectFifth,
        Interval::AugmentedFifth,
        Interval::MajorSixth,
        Interval::MinorSeventh,
        Interval::MajorSeventh,
        Interval::Octave,
    ];

    /// Short identifier, e.g. `"M3"`.
    pub const fn id(self) -> &'static str {
        match self {
            Interval::MinorSecond => "m2",
            Interval::MajorSecond => "M2",
            Interval::MinorThird => "m3",
            Interval::MajorThird => "M3",
            Interval::PerfectFourth => "P4",
            Interval::Tritone => "b5",
            Interval::PerfectFifth => "P5",
            Interval::AugmentedFifth => "#5",
            Interval::MajorSixth => "M6",
            Interval::MinorSeventh => "m7",
            Interval::MajorSeventh => "M7",
            Interval::Octave => "P8",
        }
    }

    /// Distance in semitones (1..=12).
    pub const fn semitones(self) -> u8 {
        match self {
            Interval::MinorSecond => 1,
            Interval::MajorSecond => 2,
            Interval::MinorThird => 3,
            Interval::MajorThird => 4,
            Interval::PerfectFourth => 5,
            Interval::Tritone => 6,
            Interval::PerfectFifth => 7,
            Interval::AugmentedFifth => 8,
            Interval::MajorSixth => 9,
            Interval::MinorSeventh => 10,
            Interval::MajorSeventh => 11,
            Interval::Octave => 12,
        }
    }

    /// Look up an interval by its identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|interval| interval.id() == id)
    }

    /// Look up an interval by its semitone distance.
    pub fn from_semitones(semitones: u8) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|interval| interval.semitones() == semitones)
    }

    /// Label shown on answer buttons.
    ///
    /// Minor second and minor seventh are shown as scale degrees (`b2`, `b7`),
    /// the octave by name.
    pub const fn display_label(self) -> &'static str {
        match self {
            Interval::MinorSecond => "b2",
            Interval::MinorSeventh => "b7",
            Interval::Octave => "Octave",
            other => other.id(),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownInterval(pub String);

impl fmt::Display for UnknownInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown interval id '{}'", self.0)
    }
}

impl std::error::Error for UnknownInterval {}

impl FromStr for Interval {
    type Err = UnknownInterval;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| UnknownInterval(s.to_owned()))
    }
}

/// Named interval selections.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Major third, fifth and octave.
    Beginner,
    /// The diatonic major intervals plus fourth, fifth and octave.
    Basic,
    /// Everything.
    JazzIntro,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Beginner, Preset::Basic, Preset::JazzIntro];

    pub fn intervals(self) -> &'static [Interval] {
        use Interval::*;
        match self {
            Preset::Beginner => &[MajorThird, PerfectFifth, Octave],
            Preset::Basic => &[
                MajorSecond,
                MajorThird,
                PerfectFourth,
                PerfectFifth,
                MajorSixth,
                MajorSeventh,
                Octave,
            ],
            Preset::JazzIntro => &Interval::ALL,
        }
    }

    pub fn selection(self) -> BTreeSet<Interval> {
        self.intervals().iter().copied().collect()
    }

    /// The preset whose intervals are exactly `selection`, if any.
    pub fn matching(selection: &BTreeSet<Interval>) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| {
            let intervals = preset.intervals();
            intervals.len() == selection.len()
                && intervals.iter().all(|interval| selection.contains(interval))
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            Preset::Beginner => "Easy",
            Preset::Basic => "Normal",
            Preset::JazzIntro => "Hard",
        }
    }
}
