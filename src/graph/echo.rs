use crate::dsp::echo::Echo;
use crate::error::{BuildError, ControlError};
use crate::graph::control::ModifierControl;
use crate::graph::node::Modifier;
use crate::sample::StereoSample;

/// [`Echo`] as a graph modifier. Answers [`ModifierControl::SetRatio`].
pub struct EchoNode {
    echo: Echo,
}

impl EchoNode {
    pub fn new(sample_delay: usize, decay_ratio: f32) -> Result<Self, BuildError> {
        Ok(Self {
            echo: Echo::new(sample_delay, decay_ratio)?,
        })
    }
}

impl Modifier for EchoNode {
    fn filter(&mut self, input: StereoSample) -> StereoSample {
        self.echo.filter(input)
    }

    fn control(&mut self, control: ModifierControl) -> Result<(), ControlError> {
        match control {
            ModifierControl::SetRatio(ratio) => {
                self.echo.set_ratio(ratio);
                Ok(())
            }
            other => Err(ControlError::Unsupported {
                kind: "echo",
                control: other.name(),
            }),
        }
    }
}
