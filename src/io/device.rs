//! Device output through cpal.
//!
//! Each context owns one output stream. The stream lives on a dedicated
//! thread (cpal streams are not `Send` on every platform) which builds it,
//! starts it, reports readiness and then waits for its linger time before
//! dropping it. Tone commands reach the audio callback through a lock-free
//! `rtrb` ring buffer; the callback publishes the context clock through an
//! atomic.
//!
//! The control thread never waits for the device. Tones are queued while the
//! stream is still opening and the clock reads zero until it starts, so they
//! sound relative to the first rendered frame. A stream that takes longer
//! than the resume timeout to build is dropped without playing.
//!
//! ```text
//!   control thread                 context thread            audio callback
//!   --------------                 --------------            --------------
//!   create_context ──spawn──────▶  build stream
//!   schedule_tone ──────────rtrb─────────────────┐
//!                                  play stream ──┴─────────▶ start voices
//!   resume_if_suspended ◀─ready──  (or drop it if too late)
//!   now() ◀──────────────────────────────────── clock ────── publish time
//!   close_after(s) ──linger──────▶ sleep(s), drop stream
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, Producer, RingBuffer};

use crate::{
    io::{AudioBackend, AudioError, SynthContext, MAX_CONTEXT_SECONDS},
    sequencing::ToneEvent,
    synth::{ToneMessage, ToneRenderer, DEFAULT_MAX_VOICES},
    MAX_BLOCK_SIZE,
};

const TONE_QUEUE_SIZE: usize = 64;

/// Default bound on how long a context may take to start producing audio.
pub const DEFAULT_RESUME_TIMEOUT: Duration = Duration::from_secs(2);

/// Opens a fresh output stream on the default device for every context.
#[derive(Debug, Clone)]
pub struct CpalBackend {
    resume_timeout: Duration,
    max_voices: usize,
}

impl CpalBackend {
    pub fn new() -> Self {
        Self {
            resume_timeout: DEFAULT_RESUME_TIMEOUT,
            max_voices: DEFAULT_MAX_VOICES,
        }
    }

    /// Set how long a stream may take to open before it is abandoned.
    pub fn resume_timeout(mut self, timeout: Duration) -> Self {
        self.resume_timeout = timeout;
        self
    }

    pub fn max_voices(mut self, voices: usize) -> Self {
        self.max_voices = voices.max(1);
        self
    }
}

impl Default for CpalBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioBackend for CpalBackend {
    fn create_context(&self) -> Result<Box<dyn SynthContext>, AudioError> {
        let context = DeviceContext::open(self.resume_timeout, self.max_voices)?;
        Ok(Box::new(context))
    }
}

enum ContextState {
    Starting(mpsc::Receiver<Result<(), AudioError>>),
    Running,
    Failed,
}

struct DeviceContext {
    tx: Producer<ToneMessage>,
    clock: Arc<AtomicU64>,
    state: ContextState,
    // Dropping this without sending wakes the stream thread for an immediate teardown
    linger: Option<mpsc::Sender<Duration>>,
}

impl DeviceContext {
    fn open(resume_timeout: Duration, max_voices: usize) -> Result<Self, AudioError> {
        Self::spawn(
            resume_timeout,
            move |rx, clock| build_stream(rx, clock, max_voices),
            |stream| Ok(stream.play()?),
        )
    }

    /// Start a context thread that hosts whatever `build` produces.
    ///
    /// `build` and `play` run on the context thread. The stream is dropped
    /// unplayed when building it takes longer than `resume_timeout`.
    fn spawn<S, B, P>(resume_timeout: Duration, build: B, play: P) -> Result<Self, AudioError>
    where
        B: FnOnce(Consumer<ToneMessage>, Arc<AtomicU64>) -> Result<S, AudioError> + Send + 'static,
        P: FnOnce(&S) -> Result<(), AudioError> + Send + 'static,
    {
        let (tx, rx) = RingBuffer::<ToneMessage>::new(TONE_QUEUE_SIZE);
        let clock = Arc::new(AtomicU64::new(0.0f64.to_bits()));
        let (ready_tx, ready_rx) = mpsc::channel();
        let (linger_tx, linger_rx) = mpsc::channel::<Duration>();

        let stream_clock = Arc::clone(&clock);
        thread::Builder::new()
            .name("tone-context".into())
            .spawn(move || {
                let started = Instant::now();
                let stream = match build(rx, stream_clock) {
                    Ok(stream) if started.elapsed() <= resume_timeout => stream,
                    Ok(_) => {
                        log::warn!("output stream took longer than {resume_timeout:?} to open");
                        let _ = ready_tx.send(Err(AudioError::ResumeTimeout(resume_timeout)));
                        return;
                    }
                    Err(err) => {
                        log::warn!("could not open output stream: {err}");
                        let _ = ready_tx.send(Err(err));
                        return;
                    }
                };

                if let Err(err) = play(&stream) {
                    log::warn!("could not start output stream: {err}");
                    let _ = ready_tx.send(Err(err));
                    return;
                }
                let _ = ready_tx.send(Ok(()));

                if let Ok(linger) = linger_rx.recv() {
                    thread::sleep(linger);
                }

                drop(stream);
                log::debug!("tone context closed");
            })?;

        Ok(Self {
            tx,
            clock,
            state: ContextState::Starting(ready_rx),
            linger: Some(linger_tx),
        })
    }
}

impl SynthContext for DeviceContext {
    /// Never blocks. A stream still opening counts as resumed; a failure
    /// the context thread has already reported is returned.
    fn resume_if_suspended(&mut self) -> Result<(), AudioError> {
        match std::mem::replace(&mut self.state, ContextState::Failed) {
            ContextState::Running => {
                self.state = ContextState::Running;
                Ok(())
            }
            ContextState::Failed => Err(AudioError::ContextClosed),
            ContextState::Starting(ready) => match ready.try_recv() {
                Ok(Ok(())) => {
                    self.state = ContextState::Running;
                    Ok(())
                }
                Ok(Err(err)) => Err(err),
                Err(mpsc::TryRecvError::Empty) => {
                    self.state = ContextState::Starting(ready);
                    Ok(())
                }
                Err(mpsc::TryRecvError::Disconnected) => Err(AudioError::ContextClosed),
            },
        }
    }

    fn now(&self) -> f64 {
        f64::from_bits(self.clock.load(Ordering::Acquire))
    }

    fn schedule_tone(&mut self, event: &ToneEvent, at: f64) -> Result<(), AudioError> {
        self.tx
            .push(ToneMessage::Start { event: *event, at })
            .map_err(|_| AudioError::QueueFull)
    }

    fn close_after(mut self: Box<Self>, seconds: f64) {
        let Some(linger) = self.linger.take() else {
            return;
        };

        match linger_duration(seconds) {
            Some(duration) => {
                let _ = linger.send(duration);
            }
            // Dropping the sender unsent tears the stream down right away
            None => log::warn!("cannot keep a tone context alive for {seconds}s; closing now"),
        }
    }
}

/// How long a closing context keeps its stream. `None` for an unusable request.
fn linger_duration(seconds: f64) -> Option<Duration> {
    if !(seconds <= MAX_CONTEXT_SECONDS) {
        return None;
    }
    Duration::try_from_secs_f64(seconds.max(0.0)).ok()
}

/// Build the output stream on the default device. Runs on the context thread.
fn build_stream(
    rx: Consumer<ToneMessage>,
    clock: Arc<AtomicU64>,
    max_voices: usize,
) -> Result<cpal::Stream, AudioError> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or(AudioError::NoOutputDevice)?;
    let config = device.default_output_config()?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;
    log::debug!("opening tone context: {sample_rate} Hz, {channels} channels");

    let mut renderer = ToneRenderer::new(sample_rate, max_voices, rx);
    let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _| {
            let total_frames = data.len() / channels;
            let mut frames_written = 0;

            while frames_written < total_frames {
                let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                let block = &mut render_buf[..frames_to_render];
                renderer.render_block(block);

                // Copy to output (mono to all channels)
                let out_off = frames_written * channels;
                for (i, &s) in block.iter().enumerate() {
                    for ch in 0..channels {
                        data[out_off + i * channels + ch] = s;
                    }
                }

                frames_written += frames_to_render;
            }

            clock.store(renderer.time().to_bits(), Ordering::Release);
        },
        |err| log::error!("audio stream error: {err}"),
        None,
    )?;

    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stand-in stream that reports what happens to it.
    struct FakeStream(mpsc::Sender<&'static str>);

    impl Drop for FakeStream {
        fn drop(&mut self) {
            let _ = self.0.send("dropped");
        }
    }

    fn fake_context(
        timeout: Duration,
        build_time: Duration,
    ) -> (DeviceContext, mpsc::Receiver<&'static str>) {
        let (events_tx, events) = mpsc::channel();
        let played = events_tx.clone();
        let context = DeviceContext::spawn(
            timeout,
            move |_rx, _clock| {
                thread::sleep(build_time);
                Ok(FakeStream(events_tx))
            },
            move |_stream| {
                let _ = played.send("played");
                Ok(())
            },
        )
        .unwrap();
        (context, events)
    }

    fn wait_for_failure(context: &mut DeviceContext) -> AudioError {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            match context.resume_if_suspended() {
                Err(err) => return err,
                Ok(()) if Instant::now() > deadline => panic!("failure never reported"),
                Ok(()) => thread::sleep(Duration::from_millis(5)),
            }
        }
    }

    #[test]
    fn resume_does_not_wait_for_the_stream() {
        let (context, events) = fake_context(Duration::from_secs(2), Duration::from_millis(300));
        let mut context = Box::new(context);

        let started = Instant::now();
        context.resume_if_suspended().unwrap();
        let now = context.now();
        context
            .schedule_tone(&ToneEvent::note(69, 0.0, 0.5), now)
            .unwrap();
        assert!(started.elapsed() < Duration::from_millis(200));
        assert_eq!(now, 0.0);

        context.close_after(0.05);
        let timeout = Duration::from_secs(2);
        assert_eq!(events.recv_timeout(timeout), Ok("played"));
        assert_eq!(events.recv_timeout(timeout), Ok("dropped"));
    }

    #[test]
    fn slow_stream_is_dropped_unplayed() {
        let (mut context, events) =
            fake_context(Duration::from_millis(10), Duration::from_millis(100));

        assert_eq!(events.recv_timeout(Duration::from_secs(2)), Ok("dropped"));
        assert!(matches!(
            wait_for_failure(&mut context),
            AudioError::ResumeTimeout(_)
        ));
    }

    #[test]
    fn build_failure_is_reported_on_a_later_resume() {
        let mut context = DeviceContext::spawn(
            Duration::from_secs(2),
            |_rx, _clock| Err::<(), _>(AudioError::NoOutputDevice),
            |_stream| Ok(()),
        )
        .unwrap();

        assert!(matches!(
            wait_for_failure(&mut context),
            AudioError::NoOutputDevice
        ));
        assert!(matches!(
            context.resume_if_suspended(),
            Err(AudioError::ContextClosed)
        ));
    }

    #[test]
    fn linger_covers_the_requested_time() {
        assert_eq!(linger_duration(1.45), Some(Duration::from_secs_f64(1.45)));
        assert_eq!(linger_duration(-1.0), Some(Duration::ZERO));
        assert_eq!(linger_duration(MAX_CONTEXT_SECONDS), Some(Duration::from_secs(600)));
    }

    #[test]
    fn unusable_linger_closes_immediately() {
        assert_eq!(linger_duration(2e20), None);
        assert_eq!(linger_duration(MAX_CONTEXT_SECONDS + 1.0), None);
        assert_eq!(linger_duration(f64::INFINITY), None);
        assert_eq!(linger_duration(f64::NAN), None);
    }
}
