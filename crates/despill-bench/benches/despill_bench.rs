//! Benchmarks for the despill pipeline.
//!
//! Run with: `cargo bench -p despill-bench`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use despill_core::{ChannelSet, Strip};
use despill_math::{HueRotation, Vec3};
use despill_ops::{
    AuxStrips, Connections, DespillConfig, DespillMath, DespillPlan, Kernel, SpillColor,
    ToneProtection,
};

/// Deterministic row of greenish pixels with some spread.
fn row(width: usize) -> Strip {
    let pixels: Vec<[f32; 4]> = (0..width)
        .map(|i| {
            let t = i as f32 / width as f32;
            [0.1 + 0.3 * t, 0.6 + 0.3 * (1.0 - t), 0.2 + 0.1 * t, 1.0]
        })
        .collect();
    Strip::from_rgba(0, &pixels)
}

/// Kernel alone, per math variant.
fn bench_kernel(c: &mut Criterion) {
    let mut group = c.benchmark_group("kernel");
    let rotation = HueRotation::new(-120.0);
    let pixels: Vec<Vec3> = (0..10000)
        .map(|i| Vec3::new(0.2, 0.5 + i as f32 / 20000.0, 0.3))
        .collect();
    group.throughput(Throughput::Elements(pixels.len() as u64));

    for math in DespillMath::ALL {
        let kernel = Kernel::new(math, 0.5, 0, ToneProtection::default());
        group.bench_function(math.label(), |b| {
            b.iter(|| {
                pixels
                    .iter()
                    .map(|&p| kernel.apply(black_box(p), &rotation, 1.0).rgb)
                    .collect::<Vec<_>>()
            })
        });
    }

    group.finish();
}

/// Full strip processing at several widths.
fn bench_strip(c: &mut Criterion) {
    let mut group = c.benchmark_group("strip");
    let fixed = DespillPlan::new(
        &DespillConfig { color: SpillColor::Green, ..Default::default() },
        Connections::default(),
    );
    let mut protected_config = DespillConfig { absolute: true, ..Default::default() };
    protected_config.protect.enabled = true;
    protected_config.protect.color = [0.8, 0.6, 0.5];
    let protected = DespillPlan::new(&protected_config, Connections::default());
    let live = DespillPlan::new(
        &DespillConfig::default(),
        Connections { color: true, ..Default::default() },
    );

    for width in [256, 1920, 4096] {
        let source = row(width);
        let reference = Strip::filled(0, width, ChannelSet::RGB, 0.0)
            .with_plane(despill_core::Channel::GREEN, vec![1.0; width])
            .unwrap();
        group.throughput(Throughput::Elements(width as u64));

        group.bench_with_input(BenchmarkId::new("fixed", width), &source, |b, s| {
            b.iter(|| fixed.process(black_box(s), &AuxStrips::default(), ChannelSet::RGBA).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("absolute_protected", width), &source, |b, s| {
            b.iter(|| {
                protected
                    .process(black_box(s), &AuxStrips::default(), ChannelSet::RGBA)
                    .unwrap()
            })
        });

        let aux = AuxStrips { color: Some(&reference), ..Default::default() };
        group.bench_with_input(BenchmarkId::new("live", width), &source, |b, s| {
            b.iter(|| live.process(black_box(s), &aux, ChannelSet::RGBA).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_kernel, bench_strip);

criterion_main!(benches);
