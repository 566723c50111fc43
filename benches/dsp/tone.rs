//! Benchmarks for a single tone voice: retuned oscillator through its envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use interval_trainer::dsp::oscillator::OscillatorWaveform;
use interval_trainer::synth::ToneVoice;
use interval_trainer::ToneEvent;

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

// Long enough that the envelope never closes during a measurement
const HELD_SECONDS: f64 = 86_400.0;

pub fn bench_tone(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/tone");

    let tones = [
        // Practice note - sine
        ("sine_note", ToneEvent::note(69, 0.0, HELD_SECONDS)),
        // Feedback chime - square, fixed frequency
        (
            "square_chime",
            ToneEvent::chime(880.0, 0.0, HELD_SECONDS, OscillatorWaveform::Square, 0.2),
        ),
    ];

    for &size in BLOCK_SIZES {
        let mut out = vec![0.0f32; size];
        let mut scratch = vec![0.0f32; size];

        for (name, event) in &tones {
            let mut voice = ToneVoice::new(SAMPLE_RATE);
            voice.schedule(event, 0);
            let mut block_start = 0u64;

            group.bench_with_input(BenchmarkId::new(*name, size), &size, |b, _| {
                b.iter(|| {
                    out.fill(0.0);
                    voice.render_into(black_box(&mut out), &mut scratch, block_start);
                    block_start += size as u64;
                })
            });
        }
    }

    // Retuning a pooled voice for the next request
    let mut voice = ToneVoice::new(SAMPLE_RATE);
    group.bench_function("schedule", |b| {
        b.iter(|| voice.schedule(black_box(&tones[1].1), black_box(0)))
    });

    group.finish();
}
