use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pipeline::{target, LinearModel, ModelRegistry, Pipeline, PipelineConfig};
use std::f64::consts::PI;
use std::sync::Arc;

fn bench_pipeline(c: &mut Criterion) {
    let registry = ModelRegistry::builder()
        .register(
            target::PULSE,
            LinearModel::new(vec![1.0], 0.0).with_features(["heart_rate_bpm"]),
        )
        .build();
    let pipeline = Pipeline::new(&PipelineConfig::default(), Arc::new(registry)).unwrap();

    // 10 s recording at the nominal 25 Hz
    let raw: Vec<f64> = (0..250)
        .map(|i| 2000.0 + 100.0 * (2.0 * PI * 1.2 * i as f64 / 25.0).sin())
        .collect();

    c.bench_function("pipeline_run_10s", |b| {
        b.iter(|| pipeline.run(black_box(&raw)))
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
