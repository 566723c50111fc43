//! Benchmarks for tone rendering and round generation.
//!
//! Run with: cargo bench
//!
//! Rendering runs on the audio callback, so the DSP benches must stay well
//! within real-time deadlines.
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline
//!
//! Benchmark groups:
//!   - dsp/*        Low-level primitives (tone voice, envelope)
//!   - scenarios/*  Round generation and whole-schedule rendering

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

criterion_group!(
    benches,
    // Low-level DSP primitives
    dsp::bench_tone,
    dsp::bench_envelope,
    // Real-world scenarios
    scenarios::bench_rounds,
    scenarios::bench_render,
);
criterion_main!(benches);
