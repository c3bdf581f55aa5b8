use crate::dsp::envelope::EnvelopeFollower;
use crate::error::{BuildError, ControlError};
use crate::graph::control::ModifierControl;
use crate::graph::node::Modifier;
use crate::sample::StereoSample;

/// [`EnvelopeFollower`] as a graph modifier.
///
/// Its time constants are fixed at construction; it answers no control
/// messages. Inside a vocoder band it sits as the modifier half of a carrier
/// node, turning the filtered program material into the amplitude contour
/// that shapes the carrier.
pub struct EnvelopeNode {
    follower: EnvelopeFollower,
}

impl EnvelopeNode {
    pub fn new(attack_hz: f64, release_hz: f64, sample_rate: f64) -> Result<Self, BuildError> {
        Ok(Self {
            follower: EnvelopeFollower::new(attack_hz, release_hz, sample_rate)?,
        })
    }
}

impl Modifier for EnvelopeNode {
    fn filter(&mut self, input: StereoSample) -> StereoSample {
        self.follower.filter(input)
    }

    fn control(&mut self, control: ModifierControl) -> Result<(), ControlError> {
        Err(ControlError::Unsupported {
            kind: "envelope",
            control: control.name(),
        })
    }
}
