//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};

use cascade_dsp::dsp::oscillator::Oscillator;
use cascade_dsp::dsp::Waveform;
use cascade_dsp::DEFAULT_SAMPLE_RATE;

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        for (name, waveform) in [
            ("sine", Waveform::Sine),
            ("sawtooth", Waveform::Sawtooth),
            ("square", Waveform::Square),
            ("triangle", Waveform::Triangle),
            ("noise", Waveform::Noise),
        ] {
            let mut osc = Oscillator::new(waveform, 440.0, DEFAULT_SAMPLE_RATE).unwrap();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, &size| {
                b.iter(|| {
                    for _ in 0..size {
                        black_box(osc.produce());
                    }
                })
            });
        }
    }

    group.finish();
}
