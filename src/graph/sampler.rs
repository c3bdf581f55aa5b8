use tracing::debug;

use crate::dsp::resample::Resampler;
use crate::error::{BuildError, ControlError};
use crate::graph::control::GeneratorControl;
use crate::graph::node::Generator;
use crate::sample::{DecodedAudio, StereoSample};

/*
SamplerNode
===========

Plays a decoded track into the graph, resampling from the track's native
rate to the engine rate. The node outlives its material: it can be built
silent and handed a source later, a finished one-shot keeps producing
silence instead of leaving a hole in the graph, and SetSource swaps the
track while the patch runs. Loop region and speed belong to the node, so a
source swap restarts playback at the top with both intact, which also
means a replacement track too short for the stored loop region is refused.
*/
pub struct SamplerNode {
    resampler: Option<Resampler>,
    engine_rate: f64,
    loop_start: usize,
    loop_end: usize,
    speed: f64,
}

impl SamplerNode {
    /// `loop_end == 0` plays the track once; otherwise playback cycles
    /// through `loop_start..loop_end` forever.
    pub fn new(
        source: &DecodedAudio,
        engine_rate: f64,
        loop_start: usize,
        loop_end: usize,
    ) -> Result<Self, BuildError> {
        let resampler = Resampler::new(source, engine_rate, loop_start, loop_end)?;
        debug!(
            len = source.len(),
            source_rate = source.sample_rate(),
            engine_rate,
            loop_start,
            loop_end,
            "sampler built"
        );
        Ok(Self {
            resampler: Some(resampler),
            engine_rate,
            loop_start,
            loop_end,
            speed: 1.0,
        })
    }

    /// A sampler with no material: silence until a
    /// [`SetSource`](GeneratorControl::SetSource) arrives.
    pub fn silent(engine_rate: f64) -> Result<Self, BuildError> {
        if !engine_rate.is_finite() || engine_rate <= 0.0 {
            return Err(BuildError::InvalidSampleRate(engine_rate));
        }
        debug!(engine_rate, "sampler built without a source");
        Ok(Self {
            resampler: None,
            engine_rate,
            loop_start: 0,
            loop_end: 0,
            speed: 1.0,
        })
    }

    /// True when there is nothing left to play: no source, or a one-shot
    /// that has run off the end of its track.
    pub fn is_done(&self) -> bool {
        self.resampler.as_ref().map_or(true, Resampler::is_done)
    }
}

impl Generator for SamplerNode {
    fn produce(&mut self) -> StereoSample {
        match &mut self.resampler {
            Some(resampler) => resampler.produce(),
            None => StereoSample::ZERO,
        }
    }

    fn control(&mut self, control: GeneratorControl) -> Result<(), ControlError> {
        match control {
            GeneratorControl::SetSpeed(multiplier) => {
                self.speed = multiplier;
                if let Some(resampler) = &mut self.resampler {
                    resampler.set_speed(multiplier);
                }
                Ok(())
            }
            GeneratorControl::SetSource(source) => {
                let mut resampler =
                    Resampler::new(&source, self.engine_rate, self.loop_start, self.loop_end)
                        .map_err(|error| ControlError::Rejected {
                            kind: "sampler",
                            control: "SetSource",
                            source: error,
                        })?;
                resampler.set_speed(self.speed);
                self.resampler = Some(resampler);
                debug!(len = source.len(), "sampler source replaced");
                Ok(())
            }
            GeneratorControl::SetFrequency(_) => Err(ControlError::Unsupported {
                kind: "sampler",
                control: "SetFrequency",
            }),
        }
    }
}
