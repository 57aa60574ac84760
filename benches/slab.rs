#![allow(clippy::all)] // Clippy will attempt to remove black_box() internals

use criterion::*;
use slabfield::fit::{AmplitudeModel, OffsetModel};
use slabfield::math::linspace_into;
use slabfield::physics::flux_density_slab_surface;
use std::time::Duration;

fn bench_slab_surface(c: &mut Criterion) {
    let mut group = c.benchmark_group("Slab Surface Field");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(5));

    for nobs in (0_usize..=6).map(|i| 10_usize.pow(i as u32)) {
        let mut x = vec![0.0_f64; nobs];
        linspace_into(-2e-3, 2e-3, &mut x);

        group.throughput(Throughput::Elements(nobs as u64));
        group.bench_with_input(
            BenchmarkId::new("Surface Field w/ Alloc", nobs),
            &nobs,
            |b, &_| {
                b.iter(|| {
                    let mut by = vec![0.0; x.len()];
                    black_box(
                        flux_density_slab_surface(&x, 1e-3, 1e-4, 1e4, &mut by).unwrap(),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_fit_models(c: &mut Criterion) {
    let mut group = c.benchmark_group("Convolved Fit Models");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(5));

    let amp = AmplitudeModel::new(1e-3, 2e-3);
    let off = OffsetModel::new(1e-3, 1e-3, 1e-4, 1.0);

    for nobs in [10_usize, 100, 1000] {
        let mut x = vec![0.0_f64; nobs];
        linspace_into(-5e-3, 5e-3, &mut x);

        group.throughput(Throughput::Elements(nobs as u64));
        group.bench_with_input(BenchmarkId::new("Amplitude", nobs), &nobs, |b, &_| {
            b.iter(|| {
                let mut out = vec![0.0; x.len()];
                black_box(amp.eval(&x, 0.0, 1.0, &mut out).unwrap())
            });
        });
        group.bench_with_input(BenchmarkId::new("Offset", nobs), &nobs, |b, &_| {
            b.iter(|| {
                let mut out = vec![0.0; x.len()];
                black_box(off.eval(&x, 0.0, 1.0, &mut out).unwrap())
            });
        });
        group.bench_with_input(
            BenchmarkId::new("Offset Parallel", nobs),
            &nobs,
            |b, &_| {
                b.iter(|| {
                    let mut out = vec![0.0; x.len()];
                    black_box(off.eval_par(&x, 0.0, 1.0, &mut out).unwrap())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(group_bench_slab, bench_slab_surface, bench_fit_models);
criterion_main!(group_bench_slab);
