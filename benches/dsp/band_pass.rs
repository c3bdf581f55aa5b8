//! Benchmarks for the band-pass filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};

use cascade_dsp::dsp::band_pass::BandPass;
use cascade_dsp::sample::StereoSample;
use cascade_dsp::DEFAULT_SAMPLE_RATE;

use crate::BLOCK_SIZES;

pub fn bench_band_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/band_pass");

    for &size in BLOCK_SIZES {
        // Sawtooth-like ramp as input material.
        let input: Vec<StereoSample> = (0..size)
            .map(|i| StereoSample::from_mono((i as f32 / size as f32) * 2.0 - 1.0))
            .collect();

        let mut narrow = BandPass::new(1_000.0, 8.0, DEFAULT_SAMPLE_RATE).unwrap();
        group.bench_with_input(BenchmarkId::new("narrow", size), &size, |b, _| {
            b.iter(|| {
                for &sample in &input {
                    black_box(narrow.filter(black_box(sample)));
                }
            })
        });

        let mut wide = BandPass::from_corners(200.0, 4_000.0, DEFAULT_SAMPLE_RATE).unwrap();
        group.bench_with_input(BenchmarkId::new("wide", size), &size, |b, _| {
            b.iter(|| {
                for &sample in &input {
                    black_box(wide.filter(black_box(sample)));
                }
            })
        });
    }

    group.finish();
}
