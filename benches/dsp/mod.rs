//! Benchmarks for low-level DSP primitives.

mod envelope;
mod tone;

pub use envelope::bench_envelope;
pub use tone::bench_tone;
