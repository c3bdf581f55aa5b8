use crate::dsp::adsr::Adsr;
use crate::error::{BuildError, ControlError};
use crate::graph::control::ModifierControl;
use crate::graph::node::Modifier;
use crate::sample::StereoSample;

/// [`Adsr`] as a graph modifier.
///
/// [`ModifierControl::Trigger`] opens the gate, [`ModifierControl::Release`]
/// starts the tail; both are safe to send from a controller thread while the
/// envelope runs.
pub struct AdsrNode {
    adsr: Adsr,
}

impl AdsrNode {
    pub fn new(
        attack: f32,
        decay: f32,
        sustain_db: f32,
        release: f32,
        sample_rate: f64,
    ) -> Result<Self, BuildError> {
        Ok(Self {
            adsr: Adsr::new(attack, decay, sustain_db, release, sample_rate)?,
        })
    }

    pub fn is_stopped(&self) -> bool {
        self.adsr.is_stopped()
    }
}

impl Modifier for AdsrNode {
    fn filter(&mut self, input: StereoSample) -> StereoSample {
        self.adsr.filter(input)
    }

    fn control(&mut self, control: ModifierControl) -> Result<(), ControlError> {
        match control {
            ModifierControl::Trigger => {
                self.adsr.trigger();
                Ok(())
            }
            ModifierControl::Release => {
                self.adsr.release();
                Ok(())
            }
            other => Err(ControlError::Unsupported {
                kind: "adsr",
                control: other.name(),
            }),
        }
    }
}
