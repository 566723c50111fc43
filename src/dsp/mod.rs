//! Low-level DSP primitives used by the graph nodes.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside tone voices.

/// Two-stage exponential envelope that keeps tone onsets and endings click-free.
pub mod envelope;
/// Sine and square oscillators.
pub mod oscillator;

pub use envelope::{EnvelopeShape, EnvelopeState, SILENCE_FLOOR};
pub use oscillator::OscillatorWaveform;
