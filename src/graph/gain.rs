use crate::dsp::gain::Gain;
use crate::error::ControlError;
use crate::graph::control::ModifierControl;
use crate::graph::node::Modifier;
use crate::sample::StereoSample;

/// [`Gain`] as a graph modifier. Answers [`ModifierControl::SetGain`].
pub struct GainNode {
    gain: Gain,
}

impl GainNode {
    pub fn new(gain: f32) -> Self {
        Self {
            gain: Gain::new(gain),
        }
    }
}

impl Modifier for GainNode {
    fn filter(&mut self, input: StereoSample) -> StereoSample {
        self.gain.filter(input)
    }

    fn control(&mut self, control: ModifierControl) -> Result<(), ControlError> {
        match control {
            ModifierControl::SetGain(gain) => {
                self.gain.set_gain(gain);
                Ok(())
            }
            other => Err(ControlError::Unsupported {
                kind: "gain",
                control: other.name(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_and_retunes() {
        let mut node = GainNode::new(0.5);
        assert_eq!(
            node.filter(StereoSample::new(1.0, -1.0)),
            StereoSample::new(0.5, -0.5)
        );

        node.control(ModifierControl::SetGain(2.0)).unwrap();
        assert_eq!(
            node.filter(StereoSample::new(1.0, -1.0)),
            StereoSample::new(2.0, -2.0)
        );
    }

    #[test]
    fn refuses_foreign_controls() {
        let mut node = GainNode::new(1.0);
        let err = node.control(ModifierControl::Trigger).unwrap_err();
        assert!(matches!(
            err,
            ControlError::Unsupported {
                kind: "gain",
                control: "Trigger"
            }
        ));
    }
}
