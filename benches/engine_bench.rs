//! Benchmarks for the correlation engine.
//!
//! Run with: cargo bench
//!
//! A front end re-evaluates the whole scene on every parameter change, so
//! the numbers that matter are full evaluations at the default 10 kHz grid.
//!
//! Benchmark groups:
//!   - generate/*   Waveform sampling per shape
//!   - correlate/*  Product + scalar product by window length
//!   - spectrum/*   Direct sweep vs FFT over the same bins
//!   - scene/*      Full evaluation of each demo preset

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use phasor_lab::{
    analysis::{correlate, fft_scalar_products, sweep, Normalization},
    dsp::{
        grid::SampleGrid,
        waveform::{generate, WaveformKind},
    },
    scene::Demo,
    SAMPLE_RATE,
};

/// Window lengths in seconds.
const DURATIONS: &[f64] = &[0.5, 1.0, 2.0, 5.0];

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let grid = SampleGrid::new(0.0, 2.0, SAMPLE_RATE).unwrap();

    for kind in WaveformKind::ALL {
        group.bench_with_input(BenchmarkId::new(kind.name(), grid.len()), &kind, |b, &kind| {
            b.iter(|| generate(black_box(kind), black_box(&grid), 1.0, 2.0, 0.3).unwrap())
        });
    }

    group.finish();
}

fn bench_correlate(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlate");

    for &duration in DURATIONS {
        let grid = SampleGrid::new(0.0, duration, SAMPLE_RATE).unwrap();
        let signal = generate(WaveformKind::Cosine, &grid, 1.0, 1.0, 0.0).unwrap();
        group.bench_with_input(
            BenchmarkId::new("per_duration", grid.len()),
            &duration,
            |b, _| {
                b.iter(|| {
                    correlate(
                        black_box(&signal),
                        black_box(&grid),
                        black_box(1.0),
                        Normalization::PerDuration,
                    )
                    .unwrap()
                })
            },
        );
    }

    group.finish();
}

fn bench_spectrum(c: &mut Criterion) {
    let mut group = c.benchmark_group("spectrum");
    let grid = SampleGrid::new(0.0, 1.0, SAMPLE_RATE).unwrap();
    let signal = generate(WaveformKind::Square, &grid, 1.0, 3.0, 0.0).unwrap();
    let bins: Vec<f64> = (-50..=50).map(|f| f as f64).collect();

    group.bench_function("sweep_101_bins", |b| {
        b.iter(|| sweep(black_box(&signal), &grid, &bins, Normalization::PerDuration).unwrap())
    });
    group.bench_function("fft_all_bins", |b| {
        b.iter(|| fft_scalar_products(black_box(&signal), &grid, Normalization::PerDuration).unwrap())
    });

    group.finish();
}

fn bench_scene(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene");

    for demo in Demo::ALL {
        let params = demo.params();
        group.bench_function(format!("{demo:?}"), |b| {
            b.iter(|| black_box(&params).evaluate().unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate, bench_correlate, bench_spectrum, bench_scene);
criterion_main!(benches);
