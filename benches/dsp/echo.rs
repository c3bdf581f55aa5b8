//! Benchmarks for the feedback echo.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};

use cascade_dsp::dsp::echo::Echo;
use cascade_dsp::sample::StereoSample;

use crate::BLOCK_SIZES;

pub fn bench_echo(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/echo");

    for &size in BLOCK_SIZES {
        let input: Vec<StereoSample> = (0..size)
            .map(|i| StereoSample::from_mono((i as f32 * 0.37).sin()))
            .collect();

        // 100ms at 48kHz.
        let mut echo = Echo::new(4_800, 0.4).unwrap();
        group.bench_with_input(BenchmarkId::new("feedback", size), &size, |b, _| {
            b.iter(|| {
                for &sample in &input {
                    black_box(echo.filter(black_box(sample)));
                }
            })
        });
    }

    group.finish();
}
