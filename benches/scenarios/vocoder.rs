//! Benchmarks for full vocoder patches.
//!
//! The vocoder is the densest consumer of the graph: per tick it runs one
//! modulator, N band filters, N carrier/follower pairs, and 2N edges.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};

use cascade_dsp::dsp::Waveform;
use cascade_dsp::graph::oscillator::OscNode;
use cascade_dsp::graph::Node;
use cascade_dsp::vocoder::Vocoder;
use cascade_dsp::DEFAULT_SAMPLE_RATE;

use crate::BLOCK_SIZES;

fn build(bands: usize) -> Vocoder {
    let modulator = Node::generator(
        OscNode::new(Waveform::Sawtooth, 110.0, DEFAULT_SAMPLE_RATE).unwrap(),
    );
    Vocoder::new(modulator, bands, DEFAULT_SAMPLE_RATE).unwrap()
}

pub fn bench_vocoder(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/vocoder");

    for &size in BLOCK_SIZES {
        for bands in [4, 16] {
            let mut vocoder = build(bands);
            group.bench_with_input(
                BenchmarkId::new(format!("{bands}_bands"), size),
                &size,
                |b, &size| {
                    b.iter(|| {
                        for _ in 0..size {
                            black_box(vocoder.tick());
                        }
                    })
                },
            );
        }
    }

    group.finish();
}
