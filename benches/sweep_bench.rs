use contact_sweep::*;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

fn bench_spawn_sampling(c: &mut Criterion) {
    let bounds = SpawnBounds::new(Vec3::new(-10.0, 1.0, -10.0), Vec3::new(10.0, 10.0, 10.0));
    let mut group = c.benchmark_group("spawn_sampling");
    for &count in &[200u32, 1000, 5000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut sampler = SpawnSampler::new(12345, bounds, 5.0);
            b.iter(|| {
                sampler.reseed(12345);
                for _ in 0..count {
                    black_box(sampler.sample());
                }
            })
        });
    }
    group.finish();
}

fn bench_headless_sweep(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = SweepConfig {
        minimum_spawn_count: 200,
        maximum_spawn_count: 800,
        spawn_count_increment: 300,
        extra_spawn_counts: Vec::new(),
        warmup_duration: 0.0,
        measurement_duration: 1.0,
        output_dir: Some(dir.path().to_path_buf()),
        ..SweepConfig::default()
    };

    c.bench_function("headless_sweep_200_to_800", |b| {
        b.iter(|| {
            let mut host = HeadlessHost::new("Cube", 1.0 / 60.0).with_contacts_per_instance(4);
            black_box(run_sweep(&mut host, config.clone()).expect("sweep"))
        })
    });
}

criterion_group!(benches, bench_spawn_sampling, bench_headless_sweep);
criterion_main!(benches);
