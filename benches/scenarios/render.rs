//! Benchmarks for rendering complete tone schedules.

use std::collections::VecDeque;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use interval_trainer::{
    intervals::Interval,
    io::render_schedule,
    practice::{Direction, Round, TrainingMode},
    synth::{ToneMessage, ToneRenderer, DEFAULT_MAX_VOICES},
    ToneSchedule,
};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

fn round() -> Round {
    Round {
        answer: Interval::MajorSixth,
        distance_semitones: 9,
        direction: Direction::Ascending,
        note1_pitch: 64,
        note2_pitch: 73,
    }
}

pub fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/render");

    // Two voices sounding at once, block by block as the audio callback sees them.
    // Long notes keep both voices busy for the whole measurement.
    let harmony = ToneSchedule::round(&round(), TrainingMode::Harmony, 600.0);
    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];
        let queue: VecDeque<ToneMessage> = harmony
            .events()
            .iter()
            .map(|event| ToneMessage::Start { event: *event, at: 0.0 })
            .collect();
        let mut renderer = ToneRenderer::new(SAMPLE_RATE, DEFAULT_MAX_VOICES, queue);

        group.bench_with_input(BenchmarkId::new("harmony_block", size), &size, |b, _| {
            b.iter(|| {
                renderer.render_block(black_box(&mut buffer));
            })
        });
    }

    // Whole schedules rendered offline, as --dry-run does
    let schedules = [
        ("melodic_short", ToneSchedule::round(&round(), TrainingMode::Melodic, 0.6)),
        ("correct_chime", ToneSchedule::correct_chime()),
        ("incorrect_chime", ToneSchedule::incorrect_chime()),
    ];
    for (name, schedule) in &schedules {
        group.bench_with_input(BenchmarkId::new("offline", name), schedule, |b, schedule| {
            b.iter(|| render_schedule(black_box(schedule), SAMPLE_RATE, 0.1))
        });
    }

    group.finish();
}
