use crate::error::BuildError;
use crate::sample::StereoSample;

/*
Two-Pole Band-Pass
==================

The filter is described by a center frequency f and a quality factor Q.
Those two numbers pin down the corner frequencies: the corners are the
roots of

    x^2 - (f/Q)*x - f^2 = 0

which puts the upper corner at the positive root and the lower corner a
bandwidth (f/Q) below it. The corners then multiply back to f^2 (f is
their geometric mean) and subtract to f/Q, which is what "center" and
"quality" mean for a resonant band.

Each corner is mapped through the bilinear warp

    theta = tan(pi * corner / sample_rate)

into a one-pole section a = 1/(1+theta), b = (1-theta)/(1+theta). The
high-pass section at the upper corner and the low-pass section at the
lower corner combine into one difference equation per channel:

    y[n] = a0*(x[n] - x[n-2]) + b1*y[n-1] - b2*y[n-2]

    a0 = (1 - a_upper) * a_lower
    b1 = b_upper + b_lower
    b2 = b_upper * b_lower

Coefficients and filter state are kept in f64; the narrow bands a vocoder
asks for (Q near 1 at 100 Hz against a 48 kHz tick rate) put b1 and b2
close enough to the unit circle that f32 state audibly drifts.
*/

pub struct BandPass {
    center: f64,
    quality: f64,
    sample_rate: f64,

    a0: f64,
    b1: f64,
    b2: f64,

    // Two ticks of input and output history per channel.
    x1: [f64; 2],
    x2: [f64; 2],
    y1: [f64; 2],
    y2: [f64; 2],
}

impl BandPass {
    pub fn new(center: f64, quality: f64, sample_rate: f64) -> Result<Self, BuildError> {
        check_tuning(center, quality)?;
        check_rate(sample_rate)?;

        let mut bp = Self {
            center,
            quality,
            sample_rate,
            a0: 0.0,
            b1: 0.0,
            b2: 0.0,
            x1: [0.0; 2],
            x2: [0.0; 2],
            y1: [0.0; 2],
            y2: [0.0; 2],
        };
        bp.retune();
        Ok(bp)
    }

    /// Builds the band from explicit corner frequencies: the center is their
    /// geometric mean and Q is center over bandwidth.
    pub fn from_corners(low: f64, high: f64, sample_rate: f64) -> Result<Self, BuildError> {
        if !(low.is_finite() && high.is_finite()) || low <= 0.0 || high <= low {
            return Err(BuildError::InvalidBand { low, high });
        }
        let center = (low * high).sqrt();
        Self::new(center, center / (high - low), sample_rate)
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    pub fn quality(&self) -> f64 {
        self.quality
    }

    /// Moves the band. Recomputes coefficients and clears the filter state,
    /// since history samples from the old band are meaningless to the new one.
    pub fn set_center(&mut self, center: f64) -> Result<(), BuildError> {
        check_tuning(center, self.quality)?;
        self.center = center;
        self.retune();
        self.reset();
        Ok(())
    }

    pub fn set_quality(&mut self, quality: f64) -> Result<(), BuildError> {
        check_tuning(self.center, quality)?;
        self.quality = quality;
        self.retune();
        self.reset();
        Ok(())
    }

    pub fn filter(&mut self, input: StereoSample) -> StereoSample {
        let x = [f64::from(input.left), f64::from(input.right)];
        let mut y = [0.0f64; 2];

        for ch in 0..2 {
            y[ch] = self.a0 * (x[ch] - self.x2[ch]) + self.b1 * self.y1[ch]
                - self.b2 * self.y2[ch];
        }

        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;

        StereoSample::new(y[0] as f32, y[1] as f32)
    }

    pub fn reset(&mut self) {
        self.x1 = [0.0; 2];
        self.x2 = [0.0; 2];
        self.y1 = [0.0; 2];
        self.y2 = [0.0; 2];
    }

    fn retune(&mut self) {
        let bandwidth = self.center / self.quality;

        // Positive root of x^2 - (f/Q)x - f^2 = 0.
        let upper = (bandwidth + (bandwidth * bandwidth + 4.0 * self.center * self.center).sqrt())
            / 2.0;
        let lower = upper - bandwidth;

        let theta_upper = (std::f64::consts::PI * upper / self.sample_rate).tan();
        let theta_lower = (std::f64::consts::PI * lower / self.sample_rate).tan();

        let a_upper = 1.0 / (1.0 + theta_upper);
        let a_lower = 1.0 / (1.0 + theta_lower);
        let b_upper = (1.0 - theta_upper) / (1.0 + theta_upper);
        let b_lower = (1.0 - theta_lower) / (1.0 + theta_lower);

        self.a0 = (1.0 - a_upper) * a_lower;
        self.b1 = b_upper + b_lower;
        self.b2 = b_upper * b_lower;
    }
}

fn check_tuning(center: f64, quality: f64) -> Result<(), BuildError> {
    if !(center.is_finite() && quality.is_finite()) || center <= 0.0 || quality <= 0.0 {
        return Err(BuildError::InvalidTuning { center, quality });
    }
    Ok(())
}

fn check_rate(sample_rate: f64) -> Result<(), BuildError> {
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(BuildError::InvalidSampleRate(sample_rate));
    }
    Ok(())
}
