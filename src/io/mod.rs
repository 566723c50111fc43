// Purpose - external interfaces: synthesis contexts that turn tone schedules into sound

#[cfg(feature = "rtrb")]
pub mod device;
pub mod offline;

use std::time::Duration;

use thiserror::Error;

use crate::sequencing::ToneEvent;

#[cfg(feature = "rtrb")]
pub use device::CpalBackend;
pub use offline::{render_schedule, OfflineBackend, OfflineRender};

/// Longest time a synthesis context may be kept alive, in seconds.
pub const MAX_CONTEXT_SECONDS: f64 = 600.0;

/// Why sound could not be produced.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no default output device available")]
    NoOutputDevice,

    #[error("failed to fetch default output config: {0}")]
    StreamConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("output stream did not start within {0:?}")]
    ResumeTimeout(Duration),

    #[error("synthesis context is closed")]
    ContextClosed,

    #[error("tone queue is full")]
    QueueFull,

    #[error("schedule lasts {0}s, longer than a context may live")]
    ScheduleTooLong(f64),

    #[error("failed to spawn audio thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// A source of synthesis contexts.
///
/// Each playback request opens its own context, so requests never share
/// state and overlapping playback cannot cancel each other.
pub trait AudioBackend {
    fn create_context(&self) -> Result<Box<dyn SynthContext>, AudioError>;
}

impl<B: AudioBackend + ?Sized> AudioBackend for &B {
    fn create_context(&self) -> Result<Box<dyn SynthContext>, AudioError> {
        (**self).create_context()
    }
}

/// One playback request's handle on the synthesis engine.
///
/// Dropping a context tears it down immediately. `close_after` is the only
/// way to let scheduled tones finish.
pub trait SynthContext {
    /// Make sure the context will produce audio, reporting a start-up
    /// failure that is already known. Must not block on the device.
    fn resume_if_suspended(&mut self) -> Result<(), AudioError>;

    /// Current context time in seconds. Tone start times are absolute on this clock.
    fn now(&self) -> f64;

    /// Schedule `event` to start at context time `at`.
    fn schedule_tone(&mut self, event: &ToneEvent, at: f64) -> Result<(), AudioError>;

    /// Keep the context alive for `seconds` more, then tear it down.
    fn close_after(self: Box<Self>, seconds: f64);
}
