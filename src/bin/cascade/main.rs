//! cascade - vocoder playback demo
//!
//! Run with: cargo run --bin cascade
//! Set RUST_LOG=debug to see the band table and graph wiring.

use std::thread;
use std::time::Duration;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cascade_dsp::dsp::Waveform;
use cascade_dsp::graph::oscillator::OscNode;
use cascade_dsp::graph::{GeneratorControl, Node};
use cascade_dsp::vocoder::Vocoder;

const BANDS: usize = 16;

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = f64::from(config.sample_rate().0);
    let channels = config.channels() as usize;
    info!(sample_rate, channels, "audio device ready");

    // A bright drone as program material; its harmonic comb gives every
    // band something to follow.
    let modulator = Node::generator(OscNode::new(Waveform::Sawtooth, 110.0, sample_rate)?);
    let vocoder = Vocoder::new(modulator, BANDS, sample_rate)?;
    let modulator_id = vocoder.modulator();

    let (mut patch, mut carriers) = vocoder.split()?;
    let mut voice = patch.controller(modulator_id)?;

    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _| {
            for frame in data.chunks_mut(channels) {
                let sample = patch.tick();
                frame[0] = sample.left;
                if channels > 1 {
                    frame[1] = sample.right;
                }
            }
        },
        |err| eprintln!("audio error: {err}"),
        None,
    )?;
    stream.play().wrap_err("failed to start playback")?;

    // Walk the modulator up an arpeggio while the carrier bank sweeps from
    // an octave below back past unison.
    let notes = [110.0, 130.81, 164.81, 220.0];
    for (step, &note) in notes.iter().cycle().take(20).enumerate() {
        voice.send(GeneratorControl::SetFrequency(note));
        let cents = -1200.0 + 120.0 * step as f64;
        carriers.set_offset(cents);
        info!(note, cents, "retuned");
        thread::sleep(Duration::from_millis(500));
    }

    Ok(())
}
