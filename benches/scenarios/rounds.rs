//! Benchmarks for round generation.
//!
//! Descending two-octave rounds with every interval selected exercise the
//! widest set of distance candidates and note windows.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use interval_trainer::{
    generate_round,
    practice::{DirectionSetting, MaxRange, PracticeConfiguration, TrainingMode},
    random, Preset,
};

pub fn bench_rounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/rounds");

    let configs = [
        ("easy_melodic", PracticeConfiguration::new().preset(Preset::Beginner)),
        (
            "hard_descending_two_octaves",
            PracticeConfiguration::new()
                .preset(Preset::JazzIntro)
                .direction(DirectionSetting::Descending)
                .max_range(MaxRange::TwoOctaves),
        ),
        (
            "hard_harmony",
            PracticeConfiguration::new()
                .preset(Preset::JazzIntro)
                .mode(TrainingMode::Harmony),
        ),
    ];

    for (name, config) in &configs {
        let mut rng = random::seeded(42);
        group.bench_with_input(BenchmarkId::new("generate", name), config, |b, config| {
            b.iter(|| generate_round(black_box(config), &mut rng))
        });
    }

    group.finish();
}
