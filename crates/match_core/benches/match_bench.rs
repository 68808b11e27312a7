use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use match_core::commentary::NoTemplates;
use match_core::data::presets;
use match_core::{simulate_batch, EngineConfig, MatchEngine, TemplateLibrary};

fn bench_single_match(c: &mut Criterion) {
    let home = presets::red_433_attacking();
    let away = presets::blue_4141_balanced();
    let narrated = MatchEngine::new(&home, &away);
    let silent = MatchEngine::new(&home, &away).with_templates(&NoTemplates);

    let mut group = c.benchmark_group("single_match");
    group.bench_function("with_commentary", |b| b.iter(|| narrated.simulate(black_box(42), 90)));
    group.bench_function("without_commentary", |b| b.iter(|| silent.simulate(black_box(42), 90)));
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let home = presets::red_433_attacking();
    let away = presets::grey_541_defensive();
    let config = EngineConfig::default();

    let mut group = c.benchmark_group("batch");
    group.sample_size(20);
    for size in [16, 128] {
        let seeds: Vec<i32> = (0..size).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &seeds, |b, seeds| {
            b.iter(|| simulate_batch(&home, &away, seeds, 90, &config, TemplateLibrary::embedded()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_match, bench_batch);
criterion_main!(benches);
