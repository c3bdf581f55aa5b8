use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::BuildError;
use crate::sample::StereoSample;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
    Sawtooth,
    Noise,
}

/// Seed used when the caller does not care which noise sequence they get.
/// Runs are still repeatable: the same build always produces the same noise.
const DEFAULT_NOISE_SEED: u32 = 0x0C_A5_CA_DE;

/*
One phase accumulator serves every waveform: `phase` walks [0, 1) in steps
of frequency/sample_rate and each shape is a direct function of it. The
shapes are the naive ones (no band-limiting), so high fundamentals alias;
for a vocoder carrier bank topping out at 4 kHz that is the sound the
original engine had, not a defect to engineer away.

Noise ignores the phase and draws from a PCG32 stream seeded at
construction, which keeps whole-graph output reproducible tick for tick.
*/
pub struct Oscillator {
    waveform: Waveform,
    frequency: f64,
    sample_rate: f64,
    phase: f64,
    rng: Pcg32,
}

impl Oscillator {
    pub fn new(waveform: Waveform, frequency: f64, sample_rate: f64) -> Result<Self, BuildError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(BuildError::InvalidSampleRate(sample_rate));
        }
        Ok(Self {
            waveform,
            frequency,
            sample_rate,
            phase: 0.0,
            rng: seeded_rng(DEFAULT_NOISE_SEED),
        })
    }

    /// Picks the noise stream. Distinct seeds give decorrelated noise when a
    /// patch layers several noise sources.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.rng = seeded_rng(seed);
        self
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// A negative frequency runs the phase backwards.
    pub fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
    }

    pub fn produce(&mut self) -> StereoSample {
        let value = match self.waveform {
            Waveform::Sine => (std::f64::consts::TAU * self.phase).sin(),
            Waveform::Triangle => 1.0 - 4.0 * (self.phase - 0.5).abs(),
            Waveform::Square => {
                if self.phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * self.phase - 1.0,
            Waveform::Noise => self.rng.gen_range(-1.0..=1.0),
        };

        self.phase += self.frequency / self.sample_rate;
        self.phase -= self.phase.floor();

        StereoSample::from_mono(value as f32)
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

/// PCG32 wants 64 bits of state seed; duplicate the 32-bit seed into both
/// halves rather than zero-extending it.
fn seeded_rng(seed: u32) -> Pcg32 {
    let seed64 = u64::from(seed) | (u64::from(seed) << 32);
    Pcg32::seed_from_u64(seed64)
}
