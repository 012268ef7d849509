use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use kinema::motion::{AcceleratedRectilinear, Kinematics, Motion, UniformCircular};
use kinema::sampling::linspace;

fn braking_car() -> AcceleratedRectilinear {
    AcceleratedRectilinear::new(0.0, 30.0, -6.0).expect("valid initial conditions")
}

fn bench_time_for_position(c: &mut Criterion) {
    let mut group = c.benchmark_group("time_for_position");
    let targets = linspace(-50.0, 80.0, 10_000);

    group.bench_function(BenchmarkId::new("braking_car", targets.len()), |b| {
        b.iter_batched(
            braking_car,
            |car| {
                for target in &targets {
                    let _ = black_box(car.time_for_position(*target));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_forward_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("forward_evaluation");
    let times = linspace(0.0, 10.0, 10_000);
    let motions = [
        ("rectilinear", Motion::from(braking_car())),
        ("circular", Motion::from(UniformCircular::new(2.0, 0.0, 3.0).expect("valid"))),
    ];

    for (name, motion) in &motions {
        group.bench_function(BenchmarkId::new(*name, times.len()), |b| {
            b.iter(|| {
                for t in &times {
                    let _ = black_box(motion.position(*t));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_time_for_position, bench_forward_evaluation);
criterion_main!(benches);
