/*
Tone Player
===========

The player is the fire-and-forget face of playback. Every request:

  1. opens a fresh synthesis context from the backend
  2. resumes it (never waits for the device)
  3. schedules each tone at `now + offset`
  4. hands the context to `close_after(end + margin)`

Requests never share a context, so a second request issued while the first
is still sounding plays on top of it instead of cutting it off.

If any step fails the context is dropped on the spot, which tears it down,
and the failure is logged. Callers never see an error: a practice round
that cannot sound is still a valid round.
*/

use crate::{
    io::{AudioBackend, AudioError, MAX_CONTEXT_SECONDS},
    practice::{PracticeConfiguration, Round},
    sequencing::ToneSchedule,
};

/// Extra lifetime given to a context after its last tone ends.
pub const TEARDOWN_MARGIN_SECONDS: f64 = 0.1;

pub struct TonePlayer<B: AudioBackend> {
    backend: B,
    sound_effects: bool,
}

#[cfg(feature = "rtrb")]
impl TonePlayer<crate::io::CpalBackend> {
    /// Player on the system's default output device.
    pub fn default_output() -> Self {
        Self::new(crate::io::CpalBackend::new())
    }
}

impl<B: AudioBackend> TonePlayer<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            sound_effects: true,
        }
    }

    /// Enable or disable the feedback chimes
    pub fn with_sound_effects(mut self, enabled: bool) -> Self {
        self.sound_effects = enabled;
        self
    }

    pub fn set_sound_effects(&mut self, enabled: bool) {
        self.sound_effects = enabled;
    }

    pub fn sound_effects(&self) -> bool {
        self.sound_effects
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Both notes of a round, sequential or simultaneous per the configured mode.
    pub fn play_round(&self, round: &Round, config: &PracticeConfiguration) {
        self.play(&ToneSchedule::for_round(round, config));
    }

    pub fn play_single_pitch(&self, pitch: u8, config: &PracticeConfiguration) {
        self.play(&ToneSchedule::single_pitch(pitch, config.note_seconds()));
    }

    pub fn play_correct_feedback(&self) {
        if self.sound_effects {
            self.play(&ToneSchedule::correct_chime());
        }
    }

    pub fn play_incorrect_feedback(&self) {
        if self.sound_effects {
            self.play(&ToneSchedule::incorrect_chime());
        }
    }

    /// Play a schedule, logging any failure.
    pub fn play(&self, schedule: &ToneSchedule) {
        if let Err(err) = self.try_play(schedule) {
            log::warn!("playback failed: {err}");
        }
    }

    /// Play a schedule and report failures instead of logging them.
    pub fn try_play(&self, schedule: &ToneSchedule) -> Result<(), AudioError> {
        if schedule.is_empty() {
            return Ok(());
        }

        let lifetime = schedule.end_time() + TEARDOWN_MARGIN_SECONDS;
        if !(lifetime <= MAX_CONTEXT_SECONDS) {
            return Err(AudioError::ScheduleTooLong(schedule.end_time()));
        }

        let mut context = self.backend.create_context()?;
        context.resume_if_suspended()?;

        let now = context.now();
        for event in schedule.events() {
            context.schedule_tone(event, now + event.start_offset)?;
        }

        log::debug!(
            "scheduled {} tones at t={now:.3}s, closing in {lifetime:.3}s",
            schedule.len()
        );
        context.close_after(lifetime);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        intervals::Interval,
        io::OfflineBackend,
        practice::{Direction, NoteLength, TrainingMode},
    };
    use approx::assert_relative_eq;

    const SAMPLE_RATE: f32 = 8_000.0;

    fn third() -> Round {
        Round {
            answer: Interval::MajorThird,
            distance_semitones: 4,
            direction: Direction::Ascending,
            note1_pitch: 64,
            note2_pitch: 68,
        }
    }

    #[test]
    fn round_gets_its_own_context() {
        let player = TonePlayer::new(OfflineBackend::new(SAMPLE_RATE));
        let config = PracticeConfiguration::new().mode(TrainingMode::Melodic);

        player.play_round(&third(), &config);
        player.play_round(&third(), &config);

        let renders = player.backend().renders();
        assert_eq!(renders.len(), 2);
        for render in &renders {
            assert_eq!(render.tones.len(), 2);
            assert_relative_eq!(render.linger, 0.6 * 2.0 + 0.15 + 0.1, epsilon = 1e-9);
        }
    }

    #[test]
    fn single_pitch_uses_configured_length() {
        let player = TonePlayer::new(OfflineBackend::new(SAMPLE_RATE));
        let config = PracticeConfiguration::new().note_length(NoteLength::Medium);

        player.play_single_pitch(69, &config);

        let renders = player.backend().take_renders();
        assert_eq!(renders.len(), 1);
        let (event, at) = renders[0].tones[0];
        assert_eq!(event.frequency, 440.0);
        assert_eq!(event.duration, 1.0);
        assert_eq!(at, 0.0);
        assert!(renders[0].peak() > 0.2);
    }

    #[test]
    fn chimes_follow_sound_effects_switch() {
        let mut player = TonePlayer::new(OfflineBackend::new(SAMPLE_RATE));

        player.play_correct_feedback();
        player.play_incorrect_feedback();
        assert_eq!(player.backend().take_renders().len(), 2);

        player.set_sound_effects(false);
        player.play_correct_feedback();
        player.play_incorrect_feedback();
        assert!(player.backend().renders().is_empty());
        assert!(!player.sound_effects());
    }

    #[test]
    fn oversized_note_length_is_capped() {
        let player = TonePlayer::new(OfflineBackend::new(SAMPLE_RATE));
        let config = PracticeConfiguration {
            note_duration_seconds: 1e20,
            ..PracticeConfiguration::new().mode(TrainingMode::Harmony)
        };

        player.play_round(&third(), &config);

        let renders = player.backend().take_renders();
        assert_eq!(renders.len(), 1);
        let (event, _) = renders[0].tones[0];
        assert_eq!(event.duration, crate::practice::MAX_NOTE_SECONDS);
        assert_relative_eq!(renders[0].linger, 10.1, epsilon = 1e-9);
    }

    #[test]
    fn overlong_schedule_is_refused_before_opening_a_context() {
        let player = TonePlayer::new(OfflineBackend::new(SAMPLE_RATE));
        let schedule = ToneSchedule::single_pitch(60, 1e13);

        assert!(matches!(
            player.try_play(&schedule),
            Err(AudioError::ScheduleTooLong(_))
        ));
        player.play(&schedule);
        assert!(player.backend().renders().is_empty());
    }

    #[test]
    fn empty_schedule_opens_no_context() {
        let player = TonePlayer::new(OfflineBackend::new(SAMPLE_RATE));
        assert!(player.try_play(&ToneSchedule::new()).is_ok());
        assert!(player.backend().renders().is_empty());
    }
}
