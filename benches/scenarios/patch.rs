//! Benchmarks for hand-wired mixing patches.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};

use cascade_dsp::dsp::Waveform;
use cascade_dsp::graph::echo::EchoNode;
use cascade_dsp::graph::gain::GainNode;
use cascade_dsp::graph::oscillator::OscNode;
use cascade_dsp::graph::{Node, Patch};
use cascade_dsp::DEFAULT_SAMPLE_RATE;

use crate::BLOCK_SIZES;

/// `voices` sawtooth oscillators, each through its own gain stage, all mixed
/// into a single echo on the output.
fn build(voices: usize) -> Patch {
    let mut patch = Patch::new();
    let echo = patch.add_output(Node::modifier(EchoNode::new(4_800, 0.3).unwrap()), 2);

    for voice in 0..voices {
        let frequency = 110.0 * (voice + 1) as f64;
        let osc = patch.add_node(
            Node::generator(OscNode::new(Waveform::Sawtooth, frequency, DEFAULT_SAMPLE_RATE).unwrap()),
            0,
        );
        let gain = patch.add_node(Node::modifier(GainNode::new(1.0 / voices as f32)), 1);
        patch.connect(osc, gain).unwrap();
        patch.connect(gain, echo).unwrap();
    }
    patch
}

pub fn bench_patch(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/patch");

    for &size in BLOCK_SIZES {
        for voices in [2, 8] {
            let mut patch = build(voices);
            group.bench_with_input(
                BenchmarkId::new(format!("{voices}_voices"), size),
                &size,
                |b, &size| {
                    b.iter(|| {
                        for _ in 0..size {
                            black_box(patch.tick());
                        }
                    })
                },
            );
        }
    }

    group.finish();
}
