use crate::{graph::node::RenderCtx, MIN_TIME};

/*
Tone Envelope
=============

Every practice tone is shaped by a two-stage exponential envelope. Starting
or stopping an oscillator at full level produces an audible click, so the
gain starts near silence, swells to its peak and sinks back before the
oscillator stops.

Vocabulary
----------

  floor       The "near silence" level both ramps start from or end at
              (0.0001, about -80 dB). An exponential ramp cannot start at
              exactly zero.

  peak        The loudest gain of the tone (0.25 for practice notes).

  attack      Seconds from onset to peak (20 ms for practice notes).

  duration    Seconds from onset to the end of the tone. The release
              occupies everything after the attack.


The Shape: Exponential Ramps
----------------------------

  Gain
  peak ┐  ╭╮
       │  │ ╲
       │  │  ╲
       │ ╱    ╲_
       │╱        ╲___
  floor└──────────────╲──→ Time
        A   Release      (silent after `duration`)

Both ramps move by a constant RATIO per unit of time rather than a constant
step, which our ears hear as an even fade:

  attack   (0 <= t < A):   gain = floor * (peak / floor) ^ (t / A)
  release  (A <= t < D):   gain = peak * (floor / peak) ^ ((t - A) / (D - A))
  after D:                 gain = 0


Implementation Notes
--------------------

The sample-by-sample generator evaluates the same formula as
`EnvelopeShape::gain_at` from the elapsed sample count, so the two never
drift apart over long notes.
*/

/// Level the ramps start from and end at.
pub const SILENCE_FLOOR: f32 = 0.0001;

/// The gain curve of one tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeShape {
    attack: f32,
    duration: f32,
    peak: f32,
}

impl EnvelopeShape {
    /// Build a shape, clamping the parameters into a playable range:
    /// the attack is at least `MIN_TIME`, the release is at least `MIN_TIME`
    /// long and the peak lies between the floor and full scale.
    pub fn new(attack: f32, duration: f32, peak: f32) -> Self {
        let attack = attack.max(MIN_TIME);
        let duration = duration.max(attack + MIN_TIME);
        let peak = peak.clamp(SILENCE_FLOOR, 1.0);

        Self { attack, duration, peak }
    }

    pub fn attack(&self) -> f32 {
        self.attack
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn peak(&self) -> f32 {
        self.peak
    }

    /// Gain `t` seconds after onset.
    pub fn gain_at(&self, t: f32) -> f32 {
        if !(0.0..self.duration).contains(&t) {
            return 0.0;
        }

        if t < self.attack {
            exponential_ramp(SILENCE_FLOOR, self.peak, t / self.attack)
        } else {
            let release = self.duration - self.attack;
            exponential_ramp(self.peak, SILENCE_FLOOR, (t - self.attack) / release)
        }
    }
}

impl Default for EnvelopeShape {
    fn default() -> Self {
        Self::new(0.02, 0.6, 0.25)
    }
}

#[inline]
fn exponential_ramp(from: f32, to: f32, progress: f32) -> f32 {
    from * (to / from).powf(progress)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Idle,    // Not started, or finished; level = 0
    Attack,  // Rising from the floor to the peak
    Release, // Falling from the peak back to the floor
}

pub struct Envelope {
    shape: EnvelopeShape,

    stage: EnvelopeState,
    level: f32,

    // Sample bookkeeping for the current stage
    stage_elapsed: u32,
    stage_total: u32,
    release_total: u32,
}

impl Envelope {
    pub fn new(shape: EnvelopeShape) -> Self {
        Self {
            shape,
            stage: EnvelopeState::Idle,
            level: 0.0,
            stage_elapsed: 0,
            stage_total: 1,
            release_total: 1,
        }
    }

    /// Replace the shape. Takes effect on the next `note_on`.
    pub fn set_shape(&mut self, shape: EnvelopeShape) {
        self.shape = shape;
    }

    pub fn shape(&self) -> EnvelopeShape {
        self.shape
    }

    /// Start the tone from the floor.
    pub fn note_on(&mut self, ctx: &RenderCtx) {
        let total = (self.shape.duration * ctx.sample_rate).round().max(2.0) as u32;
        let attack = ((self.shape.attack * ctx.sample_rate).round() as u32).clamp(1, total - 1);

        self.stage = EnvelopeState::Attack;
        self.level = SILENCE_FLOOR;
        self.stage_elapsed = 0;
        self.stage_total = attack;
        self.release_total = total - attack;
    }

    /// Produce the gain for the current sample, then advance one sample.
    pub fn next_sample(&mut self) -> f32 {
        let progress = self.stage_elapsed as f32 / self.stage_total as f32;

        self.level = match self.stage {
            EnvelopeState::Idle => 0.0,
            EnvelopeState::Attack => exponential_ramp(SILENCE_FLOOR, self.shape.peak, progress),
            EnvelopeState::Release => exponential_ramp(self.shape.peak, SILENCE_FLOOR, progress),
        };

        if !matches!(self.stage, EnvelopeState::Idle) {
            self.stage_elapsed += 1;

            if self.stage_elapsed >= self.stage_total {
                self.stage_elapsed = 0;
                self.stage = match self.stage {
                    EnvelopeState::Attack => {
                        self.stage_total = self.release_total;
                        EnvelopeState::Release
                    }
                    _ => EnvelopeState::Idle,
                };
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
        self.level
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }

    /// True while the tone is still sounding.
    pub fn is_active(&self) -> bool {
        !matches!(self.stage, EnvelopeState::Idle)
    }

    pub fn reset(&mut self) {
        self.stage = EnvelopeState::Idle;
        self.level = 0.0;
        self.stage_elapsed = 0;
    }

    /// Gain of the most recently produced sample.
    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn state(&self) -> EnvelopeState {
        self.stage
    }
}
