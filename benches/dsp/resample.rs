//! Benchmarks for track resampling.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};

use cascade_dsp::dsp::resample::Resampler;
use cascade_dsp::sample::{DecodedAudio, StereoSample};

use crate::BLOCK_SIZES;

/// One second of material at the given rate.
fn source(rate: u32) -> DecodedAudio {
    let track = (0..rate as usize)
        .map(|n| StereoSample::from_mono((n as f32 * 0.001).sin()))
        .collect();
    DecodedAudio::new(track, rate).unwrap()
}

pub fn bench_resample(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/resample");

    for &size in BLOCK_SIZES {
        // Non-integral rate ratio: every tick interpolates between samples.
        let audio = source(44_100);
        let mut converting = Resampler::new(&audio, 48_000.0, 0, audio.len()).unwrap();
        group.bench_with_input(BenchmarkId::new("looped_44k1", size), &size, |b, &size| {
            b.iter(|| {
                for _ in 0..size {
                    black_box(converting.produce());
                }
            })
        });

        let audio = source(48_000);
        let mut matched = Resampler::new(&audio, 48_000.0, 0, audio.len()).unwrap();
        group.bench_with_input(BenchmarkId::new("looped_48k", size), &size, |b, &size| {
            b.iter(|| {
                for _ in 0..size {
                    black_box(matched.produce());
                }
            })
        });
    }

    group.finish();
}
