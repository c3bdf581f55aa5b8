use crate::sample::StereoSample;

/// Scales both channels by a single factor. A negative gain inverts the
/// signal's polarity.
#[derive(Debug, Clone)]
pub struct Gain {
    gain: f32,
}

impl Gain {
    pub fn new(gain: f32) -> Self {
        Self { gain }
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
    }

    pub fn filter(&mut self, input: StereoSample) -> StereoSample {
        input * self.gain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn scales_both_channels() {
        let mut gain = Gain::new(0.5);
        let out = gain.filter(StereoSample::new(0.8, -0.4));

        assert_relative_eq!(out.left, 0.4);
        assert_relative_eq!(out.right, -0.2);
    }

    #[test]
    fn negative_gain_inverts_polarity() {
        let mut gain = Gain::new(-1.0);
        let out = gain.filter(StereoSample::new(0.3, -0.7));

        assert_relative_eq!(out.left, -0.3);
        assert_relative_eq!(out.right, 0.7);
    }

    #[test]
    fn set_gain_takes_effect_next_sample() {
        let mut gain = Gain::new(1.0);
        let x = StereoSample::new(0.5, 0.5);

        assert_eq!(gain.filter(x), x);
        gain.set_gain(2.0);
        assert_relative_eq!(gain.filter(x).left, 1.0);
    }
}
