//! Benchmarks for the envelope follower and the ADSR gate.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};

use cascade_dsp::dsp::adsr::Adsr;
use cascade_dsp::dsp::envelope::EnvelopeFollower;
use cascade_dsp::sample::StereoSample;
use cascade_dsp::DEFAULT_SAMPLE_RATE;

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        // Jagged input so the follower keeps switching attack/release.
        let input: Vec<StereoSample> = (0..size)
            .map(|i| StereoSample::from_mono((i % 7) as f32 / 7.0 - 0.5))
            .collect();

        let mut follower = EnvelopeFollower::new(20_000.0, 20.0, DEFAULT_SAMPLE_RATE).unwrap();
        group.bench_with_input(BenchmarkId::new("follower", size), &size, |b, _| {
            b.iter(|| {
                for &sample in &input {
                    black_box(follower.filter(black_box(sample)));
                }
            })
        });

        let mut adsr = Adsr::new(0.01, 0.1, -6.0, 0.2, DEFAULT_SAMPLE_RATE).unwrap();
        group.bench_with_input(BenchmarkId::new("adsr", size), &size, |b, _| {
            b.iter(|| {
                for &sample in &input {
                    black_box(adsr.filter(black_box(sample)));
                }
            })
        });
    }

    group.finish();
}
