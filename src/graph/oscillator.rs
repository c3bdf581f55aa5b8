use crate::dsp::oscillator::{Oscillator, Waveform};
use crate::error::{BuildError, ControlError};
use crate::graph::control::GeneratorControl;
use crate::graph::node::Generator;
use crate::sample::StereoSample;

/// [`Oscillator`] as a graph generator. Answers
/// [`GeneratorControl::SetFrequency`], which is how a vocoder retunes its
/// carrier bank while the patch runs.
pub struct OscNode {
    osc: Oscillator,
}

impl OscNode {
    pub fn new(waveform: Waveform, frequency: f64, sample_rate: f64) -> Result<Self, BuildError> {
        Ok(Self {
            osc: Oscillator::new(waveform, frequency, sample_rate)?,
        })
    }

    /// Picks the noise stream for [`Waveform::Noise`]; the other shapes
    /// ignore it.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.osc = self.osc.with_seed(seed);
        self
    }
}

impl Generator for OscNode {
    fn produce(&mut self) -> StereoSample {
        self.osc.produce()
    }

    fn control(&mut self, control: GeneratorControl) -> Result<(), ControlError> {
        match control {
            GeneratorControl::SetFrequency(frequency) => {
                self.osc.set_frequency(frequency);
                Ok(())
            }
            other => Err(ControlError::Unsupported {
                kind: "oscillator",
                control: other.name(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_SAMPLE_RATE;

    #[test]
    fn matches_the_raw_oscillator() {
        let mut node = OscNode::new(Waveform::Sawtooth, 440.0, DEFAULT_SAMPLE_RATE).unwrap();
        let mut raw = Oscillator::new(Waveform::Sawtooth, 440.0, DEFAULT_SAMPLE_RATE).unwrap();

        for _ in 0..64 {
            assert_eq!(node.produce(), raw.produce());
        }
    }

    #[test]
    fn retunes_mid_stream() {
        // A quarter of the sample rate: sawtooth steps of 0.5 per tick.
        let rate = DEFAULT_SAMPLE_RATE;
        let mut node = OscNode::new(Waveform::Sawtooth, rate / 4.0, rate).unwrap();

        let before = node.produce();
        node.control(GeneratorControl::SetFrequency(rate / 2.0)).unwrap();
        let after = node.produce();

        // Phase continues from where it was; only the step size changed.
        assert_eq!(before, StereoSample::from_mono(-1.0));
        assert_eq!(after, StereoSample::from_mono(-0.5));
    }

    #[test]
    fn refuses_sampler_controls() {
        let mut node = OscNode::new(Waveform::Sine, 440.0, DEFAULT_SAMPLE_RATE).unwrap();
        assert!(matches!(
            node.control(GeneratorControl::SetSpeed(2.0)),
            Err(ControlError::Unsupported {
                kind: "oscillator",
                control: "SetSpeed",
            })
        ));
    }
}
