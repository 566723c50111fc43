//! App - key handling and the practice loop

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{DefaultTerminal, Frame};
use rand_pcg::Pcg32;
use std::time::Duration;

use interval_trainer::{
    pitch::{MAX_PITCH, MIN_PITCH},
    practice::{AnswerOutcome, DirectionSetting, MaxRange, NoteLength, TrainingMode},
    Interval, Preset, PracticeSession, TonePlayer,
};

use crate::output::Output;
use crate::ui;

/// Keys that answer with each interval, in catalogue order.
pub const ANSWER_KEYS: [char; 12] = ['1', '2', '3', '4', '5', '6', '7', '8', '9', '0', '-', '='];

pub struct App {
    pub session: PracticeSession<Pcg32>,
    pub player: TonePlayer<Output>,
    pub seed: u64,
    pub last_outcome: Option<AnswerOutcome>,
    pub status: String,
    pub last_peak: Option<f32>,
    /// Keyboard key picked for free play once a round is answered.
    pub cursor: u8,
    should_quit: bool,
}

impl App {
    pub fn new(session: PracticeSession<Pcg32>, player: TonePlayer<Output>, seed: u64) -> Self {
        Self {
            session,
            player,
            seed,
            last_outcome: None,
            status: String::from("Press Space to hear the first round"),
            last_peak: None,
            cursor: MIN_PITCH,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        ui::render(frame, self);
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') | KeyCode::Enter => self.play_current(),
            KeyCode::Char('n') => {
                self.last_outcome = None;
                if self.session.next_round().is_some() {
                    self.play_current();
                } else {
                    self.no_round();
                }
            }
            KeyCode::Char('[') => self.play_note(|round| round.note1_pitch),
            KeyCode::Char(']') => self.play_note(|round| round.note2_pitch),
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Char('k') => {
                let cursor = self.cursor;
                self.play_note(|_| cursor);
            }
            KeyCode::Char('m') => {
                let mode = match self.session.config().training_mode {
                    TrainingMode::Melodic => TrainingMode::Harmony,
                    TrainingMode::Harmony => TrainingMode::Melodic,
                };
                self.session.set_training_mode(mode);
                self.settings_changed();
            }
            KeyCode::Char('d') => {
                let direction = match self.session.config().direction {
                    DirectionSetting::Random => DirectionSetting::Ascending,
                    DirectionSetting::Ascending => DirectionSetting::Descending,
                    DirectionSetting::Descending => DirectionSetting::Random,
                };
                self.session.set_direction(direction);
                self.settings_changed();
            }
            KeyCode::Char('r') => {
                let range = match self.session.config().max_range {
                    MaxRange::OneOctave => MaxRange::TwoOctaves,
                    MaxRange::TwoOctaves => MaxRange::OneOctave,
                };
                self.session.set_max_range(range);
                self.settings_changed();
            }
            KeyCode::Char('l') => {
                let length = match self.session.config().note_seconds() {
                    s if s < NoteLength::Medium.seconds() => NoteLength::Medium,
                    s if s < NoteLength::Long.seconds() => NoteLength::Long,
                    _ => NoteLength::Short,
                };
                self.session.set_note_length(length);
                self.settings_changed();
            }
            KeyCode::Char('p') => {
                let preset = match self.session.active_preset() {
                    Some(Preset::Beginner) => Preset::Basic,
                    Some(Preset::Basic) => Preset::JazzIntro,
                    Some(Preset::JazzIntro) | None => Preset::Beginner,
                };
                self.session.apply_preset(preset);
                self.settings_changed();
            }
            KeyCode::Char('s') => {
                let enabled = !self.player.sound_effects();
                self.player.set_sound_effects(enabled);
                self.status = format!("Sound effects {}", if enabled { "on" } else { "off" });
            }
            KeyCode::Char('c') => {
                self.session.reset_stats();
                self.status = String::from("Statistics cleared");
            }
            KeyCode::Char(c) => {
                if let Some(index) = ANSWER_KEYS.iter().position(|&k| k == c) {
                    self.answer(Interval::ALL[index]);
                }
            }
            _ => {}
        }
    }

    fn play_current(&mut self) {
        match self.session.current_round() {
            Some(round) => {
                self.player.play_round(&round, self.session.config());
                self.refresh_peak();
                if !self.session.is_answered() {
                    self.status = String::from("Which interval was that?");
                }
            }
            None => self.no_round(),
        }
    }

    fn play_note(&mut self, pitch: impl Fn(&interval_trainer::Round) -> u8) {
        // Replaying single notes would give the answer away
        if !self.session.is_answered() {
            return;
        }
        if let Some(round) = self.session.peek_round() {
            let pitch = pitch(round);
            self.player.play_single_pitch(pitch, self.session.config());
            self.refresh_peak();
        }
    }

    fn move_cursor(&mut self, step: i16) {
        if !self.session.is_answered() {
            return;
        }
        let target = (self.cursor as i16 + step).clamp(MIN_PITCH as i16, MAX_PITCH as i16);
        self.cursor = target as u8;
    }

    fn answer(&mut self, choice: Interval) {
        if !self.session.config().is_selected(choice) {
            return;
        }

        let Some(outcome) = self.session.check_answer(choice) else {
            return;
        };

        if outcome.correct {
            self.player.play_correct_feedback();
            self.status = format!("Correct: {}. Press N for the next round", outcome.answer.display_label());
        } else {
            self.player.play_incorrect_feedback();
            self.status = format!(
                "It was {}, not {}. Press N for the next round",
                outcome.answer.display_label(),
                outcome.submitted.display_label()
            );
        }
        self.refresh_peak();
        self.last_outcome = Some(outcome);
        if let Some(round) = self.session.peek_round() {
            self.cursor = round.note1_pitch;
        }
    }

    fn settings_changed(&mut self) {
        if !self.session.is_answered() {
            self.last_outcome = None;
        }
        self.status = String::from("Settings changed. Press Space to play");
    }

    fn no_round(&mut self) {
        self.status = String::from("No round fits these settings. Press P to pick a preset");
    }

    fn refresh_peak(&mut self) {
        if let Some(peak) = self.player.backend().last_peak() {
            self.last_peak = Some(peak);
        }
    }
}
