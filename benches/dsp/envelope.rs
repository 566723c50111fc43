//! Benchmarks for the exponential tone envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use interval_trainer::dsp::envelope::{Envelope, EnvelopeShape};
use interval_trainer::graph::node::RenderCtx;

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let ctx = RenderCtx::from_freq(48_000.0, 440.0, 1.0);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Attack phase (ramping up); a long attack keeps every iteration in it
        let mut env = Envelope::new(EnvelopeShape::new(10.0, 20.0, 0.25));
        env.note_on(&ctx);
        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });

        // Release phase (ramping down)
        let mut env = Envelope::new(EnvelopeShape::new(0.001, 60.0, 0.25));
        env.note_on(&ctx);
        for _ in 0..200 {
            env.next_sample();
        }
        group.bench_with_input(BenchmarkId::new("release", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
