pub mod dsp;
pub mod graph; // Composable audio graph nodes
pub mod intervals; // Interval catalogue and presets
pub mod io;
pub mod pitch;
pub mod player;
pub mod practice; // Round generation and session state
pub mod random;
pub mod sequencing; // Tone events and schedules
pub mod synth; // Tone voices and the renderer that mixes them

pub use intervals::{Interval, Preset};
pub use pitch::{pitch_to_frequency, scale_degree_label, MAX_PITCH, MIN_PITCH};
pub use player::TonePlayer;
pub use practice::{generate_round, PracticeConfiguration, PracticeSession, Round};
pub use sequencing::{ToneEvent, ToneSchedule};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
