use crate::dsp::band_pass::BandPass;
use crate::error::{BuildError, ControlError};
use crate::graph::control::ModifierControl;
use crate::graph::node::Modifier;
use crate::sample::StereoSample;

/// [`BandPass`] as a graph modifier.
///
/// Answers [`ModifierControl::SetCenter`] and [`ModifierControl::SetQuality`];
/// a retune that the filter refuses (non-positive or non-finite values) comes
/// back as [`ControlError::Rejected`] and leaves the old tuning running.
pub struct BandPassNode {
    filter: BandPass,
}

impl BandPassNode {
    pub fn new(center: f64, quality: f64, sample_rate: f64) -> Result<Self, BuildError> {
        Ok(Self {
            filter: BandPass::new(center, quality, sample_rate)?,
        })
    }

    /// Tunes the band from its corner frequencies instead of center/quality.
    pub fn from_corners(low: f64, high: f64, sample_rate: f64) -> Result<Self, BuildError> {
        Ok(Self {
            filter: BandPass::from_corners(low, high, sample_rate)?,
        })
    }
}

impl Modifier for BandPassNode {
    fn filter(&mut self, input: StereoSample) -> StereoSample {
        self.filter.filter(input)
    }

    fn control(&mut self, control: ModifierControl) -> Result<(), ControlError> {
        match control {
            ModifierControl::SetCenter(center) => {
                self.filter
                    .set_center(center)
                    .map_err(|source| ControlError::Rejected {
                        kind: "band_pass",
                        control: "SetCenter",
                        source,
                    })
            }
            ModifierControl::SetQuality(quality) => {
                self.filter
                    .set_quality(quality)
                    .map_err(|source| ControlError::Rejected {
                        kind: "band_pass",
                        control: "SetQuality",
                        source,
                    })
            }
            other => Err(ControlError::Unsupported {
                kind: "band_pass",
                control: other.name(),
            }),
        }
    }
}
