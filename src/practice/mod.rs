// Purpose: what to ask - configuration, round generation, session tallies

pub mod config;
pub mod round;
pub mod session;

pub use config::{
    Direction, DirectionSetting, MaxRange, NoteLength, PracticeConfiguration, TrainingMode,
    MAX_NOTE_SECONDS,
};
pub use round::{generate_round, Round, MAX_ATTEMPTS};
pub use session::{AnswerOutcome, IntervalStats, PracticeSession};
