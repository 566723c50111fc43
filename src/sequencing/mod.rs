pub mod event;
pub mod schedule;

pub use event::ToneEvent;
pub use schedule::{ToneSchedule, NOTE_GAP_SECONDS};
