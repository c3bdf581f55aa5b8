use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::BuildError;

/// One tick's worth of audio: a left/right amplitude pair, nominally in [-1, 1].
///
/// Everything in the engine speaks this type. It is plain data; all the
/// arithmetic a signal path needs (mixing, scaling, ring-style products) is
/// on the operators so DSP code stays close to the difference equations it
/// implements.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StereoSample {
    pub left: f32,
    pub right: f32,
}

impl StereoSample {
    pub const ZERO: StereoSample = StereoSample {
        left: 0.0,
        right: 0.0,
    };

    pub const fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    /// Splits a mono amplitude across both channels at equal power
    /// (-3 dB per side, so the pair sums back to the source level).
    pub fn from_mono(value: f32) -> Self {
        let side = value * std::f32::consts::FRAC_1_SQRT_2;
        Self::new(side, side)
    }

    /// Channel sum folded back to mono.
    pub fn to_mono(self) -> f32 {
        (self.left + self.right) * std::f32::consts::FRAC_1_SQRT_2
    }

    /// Largest channel magnitude, the value meters care about.
    pub fn peak(self) -> f32 {
        self.left.abs().max(self.right.abs())
    }
}

impl Add for StereoSample {
    type Output = StereoSample;

    fn add(self, rhs: StereoSample) -> StereoSample {
        StereoSample::new(self.left + rhs.left, self.right + rhs.right)
    }
}

impl AddAssign for StereoSample {
    fn add_assign(&mut self, rhs: StereoSample) {
        self.left += rhs.left;
        self.right += rhs.right;
    }
}

impl Sub for StereoSample {
    type Output = StereoSample;

    fn sub(self, rhs: StereoSample) -> StereoSample {
        StereoSample::new(self.left - rhs.left, self.right - rhs.right)
    }
}

/// Per-channel product: amplitude modulation of one signal by another.
impl Mul for StereoSample {
    type Output = StereoSample;

    fn mul(self, rhs: StereoSample) -> StereoSample {
        StereoSample::new(self.left * rhs.left, self.right * rhs.right)
    }
}

impl Mul<f32> for StereoSample {
    type Output = StereoSample;

    fn mul(self, rhs: f32) -> StereoSample {
        StereoSample::new(self.left * rhs, self.right * rhs)
    }
}

impl MulAssign<f32> for StereoSample {
    fn mul_assign(&mut self, rhs: f32) {
        self.left *= rhs;
        self.right *= rhs;
    }
}

impl Neg for StereoSample {
    type Output = StereoSample;

    fn neg(self) -> StereoSample {
        StereoSample::new(-self.left, -self.right)
    }
}

impl Sum for StereoSample {
    fn sum<I: Iterator<Item = StereoSample>>(iter: I) -> StereoSample {
        iter.fold(StereoSample::ZERO, |acc, s| acc + s)
    }
}

/// An ordered run of samples; index order is playback order.
pub type Track = Vec<StereoSample>;

/// Already-decoded audio as handed over by a file-decoding collaborator:
/// normalized stereo samples plus the rate they were captured at.
///
/// The samples live behind an `Arc` so every player reading the track shares
/// one buffer; nothing in the engine copies sample data. Decoding itself
/// (container parsing, bit depth, channel folding) happens upstream; by the
/// time audio reaches this type it is plain stereo in [-1, 1].
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    samples: Arc<[StereoSample]>,
    sample_rate: u32,
}

impl DecodedAudio {
    /// Takes ownership of a decoded track. Rejects the two states a decoder
    /// can hand over that the engine cannot play: an empty track and a zero
    /// sample rate.
    pub fn new(track: Track, sample_rate: u32) -> Result<Self, BuildError> {
        if track.is_empty() {
            return Err(BuildError::EmptyTrack);
        }
        if sample_rate == 0 {
            return Err(BuildError::ZeroSampleRate);
        }
        Ok(Self {
            samples: track.into(),
            sample_rate,
        })
    }

    /// A shared handle to the sample buffer (cheap, no copy).
    pub fn samples(&self) -> Arc<[StereoSample]> {
        Arc::clone(&self.samples)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mix_is_per_channel_sum() {
        let a = StereoSample::new(0.25, -0.5);
        let b = StereoSample::new(0.5, 0.25);

        let sum = a + b;
        assert_relative_eq!(sum.left, 0.75);
        assert_relative_eq!(sum.right, -0.25);

        let mut acc = StereoSample::ZERO;
        acc += a;
        acc += b;
        assert_eq!(acc, sum);
    }

    #[test]
    fn product_modulates_per_channel() {
        let carrier = StereoSample::new(0.8, -0.8);
        let envelope = StereoSample::new(0.5, 0.25);

        let out = carrier * envelope;
        assert_relative_eq!(out.left, 0.4);
        assert_relative_eq!(out.right, -0.2);
    }

    #[test]
    fn mono_split_preserves_power() {
        let s = StereoSample::from_mono(1.0);

        // left² + right² == 1² for an equal-power split
        let power = s.left * s.left + s.right * s.right;
        assert_relative_eq!(power, 1.0, epsilon = 1e-6);
        assert_relative_eq!(s.to_mono(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn sum_folds_an_iterator() {
        let parts = [
            StereoSample::new(0.1, 0.0),
            StereoSample::new(0.2, 0.5),
            StereoSample::new(-0.1, 0.5),
        ];

        let total: StereoSample = parts.into_iter().sum();
        assert_relative_eq!(total.left, 0.2);
        assert_relative_eq!(total.right, 1.0);
    }

    #[test]
    fn decoded_audio_rejects_empty_track() {
        assert!(DecodedAudio::new(Track::new(), 44_100).is_err());
    }

    #[test]
    fn decoded_audio_rejects_zero_rate() {
        let track = vec![StereoSample::ZERO; 8];
        assert!(DecodedAudio::new(track, 0).is_err());
    }

    #[test]
    fn decoded_audio_shares_one_buffer() {
        let track = vec![StereoSample::from_mono(0.5); 16];
        let audio = DecodedAudio::new(track, 48_000).unwrap();

        let a = audio.samples();
        let b = audio.samples();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(audio.len(), 16);
    }
}
