use crate::error::BuildError;
use crate::sample::StereoSample;

/*
Envelope Follower
=================

Tracks how loud a signal is, per channel, by rectifying it and smoothing
the result with a one-pole low-pass:

    rect = |x[n]|
    y[n] = a*(rect[n] + rect[n-1]) + b*y[n-1]

The trick is that (a, b) is not one pair but two. While the rectified
input sits ABOVE the current envelope the filter runs with coefficients
derived from the attack corner (high, e.g. 20 kHz -> the envelope snaps
up in a handful of samples); once the input falls BELOW the envelope it
switches to the release pair (low, e.g. 20 Hz -> the envelope sags over
milliseconds). Fast up, slow down is what makes speech modulation usable:
consonant onsets register immediately, but the envelope does not flutter
at the audio rate between waveform peaks.

Corners map to coefficients through the same bilinear warp as the
band-pass sections: theta = tan(pi*f/rate), a = theta/(1+theta),
b = (1-theta)/(1+theta), which keeps unity gain at DC.
*/

pub struct EnvelopeFollower {
    attack: (f64, f64),  // (a, b) while input exceeds the envelope
    release: (f64, f64), // (a, b) while it does not

    env: [f64; 2],
    prev_rect: [f64; 2],
}

impl EnvelopeFollower {
    /// `attack_hz` is the fast corner used while the signal rises,
    /// `release_hz` the slow one used while it falls.
    pub fn new(attack_hz: f64, release_hz: f64, sample_rate: f64) -> Result<Self, BuildError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(BuildError::InvalidSampleRate(sample_rate));
        }
        Ok(Self {
            attack: one_pole(attack_hz, sample_rate)?,
            release: one_pole(release_hz, sample_rate)?,
            env: [0.0; 2],
            prev_rect: [0.0; 2],
        })
    }

    /// The output is the envelope itself, not the enveloped input; a node
    /// interactor multiplies it into whatever should ride the envelope.
    pub fn filter(&mut self, input: StereoSample) -> StereoSample {
        let x = [f64::from(input.left), f64::from(input.right)];

        for ch in 0..2 {
            let rect = x[ch].abs();
            let (a, b) = if rect > self.env[ch] {
                self.attack
            } else {
                self.release
            };
            self.env[ch] = a * (rect + self.prev_rect[ch]) + b * self.env[ch];
            self.prev_rect[ch] = rect;
        }

        StereoSample::new(self.env[0] as f32, self.env[1] as f32)
    }

    pub fn reset(&mut self) {
        self.env = [0.0; 2];
        self.prev_rect = [0.0; 2];
    }
}

fn one_pole(corner_hz: f64, sample_rate: f64) -> Result<(f64, f64), BuildError> {
    if !corner_hz.is_finite() || corner_hz <= 0.0 {
        return Err(BuildError::InvalidCorner(corner_hz));
    }
    let theta = (std::f64::consts::PI * corner_hz / sample_rate).tan();
    Ok((theta / (1.0 + theta), (1.0 - theta) / (1.0 + theta)))
}
