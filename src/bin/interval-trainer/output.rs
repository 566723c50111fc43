//! Where the front end sends its sound.

use interval_trainer::io::{AudioBackend, AudioError, CpalBackend, OfflineBackend, SynthContext};

pub enum Output {
    Device(CpalBackend),
    /// Renders every request in memory and discards it.
    DryRun(OfflineBackend),
}

impl Output {
    pub fn device() -> Self {
        Output::Device(CpalBackend::new())
    }

    pub fn dry_run() -> Self {
        Output::DryRun(OfflineBackend::default())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Output::Device(_) => "device",
            Output::DryRun(_) => "dry run",
        }
    }

    /// Peak level of the most recent dry-run render, if any.
    pub fn last_peak(&self) -> Option<f32> {
        match self {
            Output::Device(_) => None,
            Output::DryRun(backend) => backend.take_renders().last().map(|r| r.peak()),
        }
    }
}

impl AudioBackend for Output {
    fn create_context(&self) -> Result<Box<dyn SynthContext>, AudioError> {
        match self {
            Output::Device(backend) => backend.create_context(),
            Output::DryRun(backend) => backend.create_context(),
        }
    }
}
