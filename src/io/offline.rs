//! Offline synthesis - render schedules into memory instead of a device.
//!
//! Every context renders its tones when it is closed and files the result
//! with the backend, so tests (and `--dry-run`) can inspect exactly what a
//! playback request would have sounded like.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::{
    io::{AudioBackend, AudioError, SynthContext, MAX_CONTEXT_SECONDS},
    sequencing::{ToneEvent, ToneSchedule},
    synth::{ToneMessage, ToneRenderer, DEFAULT_MAX_VOICES},
};

/// One closed context's output.
#[derive(Debug, Clone)]
pub struct OfflineRender {
    pub sample_rate: f32,
    /// Tones as scheduled, with their absolute start times.
    pub tones: Vec<(ToneEvent, f64)>,
    /// Seconds the context was kept alive after scheduling.
    pub linger: f64,
    pub samples: Vec<f32>,
}

impl OfflineRender {
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
    }

    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Samples between two times, in seconds.
    pub fn window(&self, from: f64, to: f64) -> &[f32] {
        let sr = self.sample_rate as f64;
        let start = ((from * sr).round() as usize).min(self.samples.len());
        let end = ((to * sr).round() as usize).clamp(start, self.samples.len());
        &self.samples[start..end]
    }
}

#[derive(Clone)]
pub struct OfflineBackend {
    sample_rate: f32,
    renders: Arc<Mutex<Vec<OfflineRender>>>,
}

impl OfflineBackend {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            renders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Everything rendered so far, oldest first.
    pub fn renders(&self) -> Vec<OfflineRender> {
        self.renders
            .lock()
            .map(|renders| renders.clone())
            .unwrap_or_default()
    }

    /// Drain the rendered clips.
    pub fn take_renders(&self) -> Vec<OfflineRender> {
        self.renders
            .lock()
            .map(|mut renders| std::mem::take(&mut *renders))
            .unwrap_or_default()
    }
}

impl Default for OfflineBackend {
    fn default() -> Self {
        Self::new(48_000.0)
    }
}

impl AudioBackend for OfflineBackend {
    fn create_context(&self) -> Result<Box<dyn SynthContext>, AudioError> {
        Ok(Box::new(OfflineContext {
            sample_rate: self.sample_rate,
            tones: Vec::new(),
            sink: Arc::clone(&self.renders),
        }))
    }
}

struct OfflineContext {
    sample_rate: f32,
    tones: Vec<(ToneEvent, f64)>,
    sink: Arc<Mutex<Vec<OfflineRender>>>,
}

impl SynthContext for OfflineContext {
    fn resume_if_suspended(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn now(&self) -> f64 {
        0.0
    }

    fn schedule_tone(&mut self, event: &ToneEvent, at: f64) -> Result<(), AudioError> {
        self.tones.push((*event, at));
        Ok(())
    }

    fn close_after(self: Box<Self>, seconds: f64) {
        let OfflineContext {
            sample_rate,
            tones,
            sink,
        } = *self;

        let linger = clamp_linger(seconds);
        let queue: VecDeque<ToneMessage> = tones
            .iter()
            .map(|(event, at)| ToneMessage::Start { event: *event, at: *at })
            .collect();

        let mut renderer = ToneRenderer::new(sample_rate, DEFAULT_MAX_VOICES, queue);
        let mut samples = vec![0.0f32; (linger * sample_rate as f64).ceil() as usize];
        renderer.render(&mut samples);

        let render = OfflineRender {
            sample_rate,
            tones,
            linger,
            samples,
        };

        match sink.lock() {
            Ok(mut renders) => renders.push(render),
            Err(_) => log::warn!("offline render sink poisoned; dropping render"),
        };
    }
}

/// Rendered length for a requested lifetime, capped at `MAX_CONTEXT_SECONDS`.
fn clamp_linger(seconds: f64) -> f64 {
    if seconds.is_nan() {
        return 0.0;
    }
    seconds.clamp(0.0, MAX_CONTEXT_SECONDS)
}

/// Render a whole schedule, plus `tail` seconds of silence, at `sample_rate`.
pub fn render_schedule(schedule: &ToneSchedule, sample_rate: f32, tail: f64) -> Vec<f32> {
    let queue: VecDeque<ToneMessage> = schedule
        .events()
        .iter()
        .map(|event| ToneMessage::Start {
            event: *event,
            at: event.start_offset,
        })
        .collect();

    let mut renderer = ToneRenderer::new(sample_rate, DEFAULT_MAX_VOICES, queue);
    let length = clamp_linger(schedule.end_time() + tail.max(0.0));
    let frames = (length * sample_rate as f64).ceil() as usize;
    let mut samples = vec![0.0f32; frames];
    renderer.render(&mut samples);
    samples
}
