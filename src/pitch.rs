/*
Pitch Utilities
===============

Pitches are MIDI-style note numbers in twelve-tone equal temperament.
Middle C (C4) is 60 and A4 (69) is the 440 Hz tuning reference.

  frequency = 440 * 2^((pitch - 69) / 12)

Every semitone multiplies the frequency by 2^(1/12), so twelve semitones
(one octave) double it:

  pitch 69 (A4) → 440 Hz
  pitch 81 (A5) → 880 Hz
  pitch 57 (A3) → 220 Hz

The trainer's keyboard spans two octaves, C4 (60) to C6 (84). Every round
keeps both of its notes inside that window.
*/

/// Lowest pitch on the practice keyboard (C4).
pub const MIN_PITCH: u8 = 60;

/// Highest pitch on the practice keyboard (C6).
pub const MAX_PITCH: u8 = 84;

/// Distance in semitones between the lowest and highest key.
pub const KEYBOARD_SPAN: u8 = MAX_PITCH - MIN_PITCH;

/// Tuning reference: A4 = 440 Hz = pitch 69.
pub const REFERENCE_PITCH: u8 = 69;
pub const REFERENCE_FREQUENCY: f64 = 440.0;

/// Scale-degree labels relative to a root, one per semitone class.
pub const DEGREE_LABELS: [&str; 12] = [
    "R", "b2", "2", "b3", "3", "4", "b5", "5", "#5", "6", "b7", "7",
];

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Convert a pitch to its equal-tempered frequency in Hz.
#[inline]
pub fn pitch_to_frequency(pitch: u8) -> f64 {
    REFERENCE_FREQUENCY * 2.0_f64.powf((pitch as f64 - REFERENCE_PITCH as f64) / 12.0)
}

/// Label `target` by its scale degree above `root`.
///
/// Works in either direction: a target below the root is folded into the
/// octave above it, so `scale_degree_label(60, 55)` is `"4"`.
pub fn scale_degree_label(root: u8, target: u8) -> &'static str {
    let diff = (target as i32 - root as i32).rem_euclid(12);
    DEGREE_LABELS[diff as usize]
}

/// Black keys are the five accidentals of each octave.
pub fn is_black_key(pitch: u8) -> bool {
    matches!(pitch % 12, 1 | 3 | 6 | 8 | 10)
}

/// Note name with octave, e.g. `C4`, `F#5`.
pub fn note_name(pitch: u8) -> String {
    let octave = pitch as i32 / 12 - 1;
    format!("{}{}", NOTE_NAMES[(pitch % 12) as usize], octave)
}

/// Whether `pitch` lies on the practice keyboard.
pub fn on_keyboard(pitch: u8) -> bool {
    (MIN_PITCH..=MAX_PITCH).contains(&pitch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn reference_pitch_is_440() {
        assert_eq!(pitch_to_frequency(69), 440.0);
    }

    #[test]
    fn octave_doubles_frequency() {
        assert_eq!(pitch_to_frequency(81), 880.0);
        assert_eq!(pitch_to_frequency(57), 220.0);
    }

    #[test]
    fn middle_c_frequency() {
        assert_relative_eq!(pitch_to_frequency(60), 261.625_565_300_6, epsilon = 1e-9);
    }

    #[test]
    fn degree_labels_above_root() {
        assert_eq!(scale_degree_label(60, 60), "R");
        assert_eq!(scale_degree_label(60, 67), "5");
        assert_eq!(scale_degree_label(60, 71), "7");
        assert_eq!(scale_degree_label(60, 72), "R");
        assert_eq!(scale_degree_label(60, 80), "#5");
    }

    #[test]
    fn degree_labels_below_root_wrap() {
        assert_eq!(scale_degree_label(72, 60), "R");
        assert_eq!(scale_degree_label(60, 55), "4");
        assert_eq!(scale_degree_label(67, 66), "7");
    }

    #[test]
    fn keyboard_spans_two_octaves() {
        assert_eq!(KEYBOARD_SPAN, 24);
        assert!(on_keyboard(60) && on_keyboard(84));
        assert!(!on_keyboard(59) && !on_keyboard(85));
    }

    #[test]
    fn names_and_key_colours() {
        assert_eq!(note_name(60), "C4");
        assert_eq!(note_name(66), "F#4");
        assert_eq!(note_name(84), "C6");
        assert!(is_black_key(61));
        assert!(!is_black_key(64));
        assert!(!is_black_key(65));
    }
}
