use tracing::debug;

use crate::dsp::Waveform;
use crate::error::{BuildError, ControlError};
use crate::graph::band_pass::BandPassNode;
use crate::graph::envelope::EnvelopeNode;
use crate::graph::oscillator::OscNode;
#[cfg(feature = "rtrb")]
use crate::graph::Controller;
use crate::graph::{GeneratorControl, Node, NodeId, Patch};
use crate::sample::StereoSample;

/// Lower edge of the analyzed spectrum.
pub const LOW_CUTOFF_HZ: f64 = 80.0;
/// Upper edge of the analyzed spectrum.
pub const HIGH_CUTOFF_HZ: f64 = 4_000.0;

/// Envelope-follower corners: snap up within a few samples, sag over
/// milliseconds, so consonants register without tremolo between peaks.
const FOLLOWER_ATTACK_HZ: f64 = 20_000.0;
const FOLLOWER_RELEASE_HZ: f64 = 20.0;

/*
Vocoder
=======

The classic channel vocoder as a patch recipe. The spectrum between 80 Hz
and 4 kHz is split log-uniformly into N bands; each band measures how much
of the modulator lives there and imposes that contour on a synthetic
carrier:

    modulator (layer 0)
        |
        +--> band-pass @ center[i] (layer 1)
                |
                +--> carrier osc @ center[i] * envelope follower
                     (layer 2, output-flagged)          ... one per band

The combine node carries both roles: its generator is the carrier, its
modifier the follower, and the default both-present interactor multiplies
them per channel. Summing the N flagged nodes is the patch's own mixing.

Every band filter shares the Q derived from the first band's boundaries.
On a log-uniform grid each band has the same boundary ratio, so a single
Q is close to right everywhere, and it is what this recipe has always
sounded like.

Carrier ids are captured while the bank is built; `set_offset` walks that
vector and retunes each oscillator in place. Nothing ever searches the
graph after construction.
*/
pub struct Vocoder {
    patch: Patch,
    modulator: NodeId,
    carriers: Vec<NodeId>,
    centers: Vec<f64>,
    pitch: f64,
}

impl Vocoder {
    /// Builds a vocoder around `modulator` with square-wave carriers.
    pub fn new(modulator: Node, bands: usize, sample_rate: f64) -> Result<Self, BuildError> {
        Self::with_waveform(modulator, bands, Waveform::Square, sample_rate)
    }

    /// Builds a vocoder with the given carrier waveform.
    pub fn with_waveform(
        modulator: Node,
        bands: usize,
        waveform: Waveform,
        sample_rate: f64,
    ) -> Result<Self, BuildError> {
        if bands == 0 {
            return Err(BuildError::ZeroBands);
        }

        let boundaries = band_boundaries(bands);
        let centers: Vec<f64> = boundaries
            .windows(2)
            .map(|pair| (pair[0] * pair[1]).sqrt())
            .collect();
        let quality = (boundaries[0] * boundaries[1]).sqrt() / (boundaries[1] - boundaries[0]);
        debug!(bands, quality, ?centers, "vocoder band table");

        let mut patch = Patch::new();
        let modulator = patch.add_node(modulator, 0);

        let mut carriers = Vec::with_capacity(bands);
        for &center in &centers {
            let filter = patch.add_node(
                Node::modifier(BandPassNode::new(center, quality, sample_rate)?),
                1,
            );
            let combine = patch.add_output(
                Node::new(
                    OscNode::new(waveform, center, sample_rate)?,
                    EnvelopeNode::new(FOLLOWER_ATTACK_HZ, FOLLOWER_RELEASE_HZ, sample_rate)?,
                ),
                2,
            );
            patch.connect(modulator, filter)?;
            patch.connect(filter, combine)?;
            carriers.push(combine);
        }

        Ok(Self {
            patch,
            modulator,
            carriers,
            centers,
            pitch: 1.0,
        })
    }

    /// Transposes the carrier bank by `cents` (hundredths of a semitone,
    /// negative transposes down). Retunes the captured carriers in place;
    /// the graph's structure is untouched.
    pub fn set_offset(&mut self, cents: f64) -> Result<(), ControlError> {
        self.pitch = (cents / 1200.0).exp2();
        for (index, &carrier) in self.carriers.iter().enumerate() {
            let frequency = self.centers[index] * self.pitch;
            self.patch
                .control(carrier, GeneratorControl::SetFrequency(frequency))?;
        }
        Ok(())
    }

    /// Advances the vocoder's patch by one sample.
    pub fn tick(&mut self) -> StereoSample {
        self.patch.tick()
    }

    pub fn bands(&self) -> usize {
        self.carriers.len()
    }

    /// Band center frequencies, one per band, ascending.
    pub fn centers(&self) -> &[f64] {
        &self.centers
    }

    /// The modulator node, e.g. to feed or control it through the patch.
    pub fn modulator(&self) -> NodeId {
        self.modulator
    }

    /// The underlying patch, for wiring extras around the bank.
    pub fn patch_mut(&mut self) -> &mut Patch {
        &mut self.patch
    }

    /// Converts the composite into the patch (for the audio thread) and a
    /// handle that retunes the carrier bank from anywhere else.
    #[cfg(feature = "rtrb")]
    pub fn split(mut self) -> Result<(Patch, VocoderHandle), BuildError> {
        let mut controllers = Vec::with_capacity(self.carriers.len());
        for &carrier in &self.carriers {
            controllers.push(self.patch.controller(carrier)?);
        }
        Ok((
            self.patch,
            VocoderHandle {
                controllers,
                centers: self.centers,
            },
        ))
    }
}

/// The retuning half of a split vocoder.
#[cfg(feature = "rtrb")]
pub struct VocoderHandle {
    controllers: Vec<Controller>,
    centers: Vec<f64>,
}

#[cfg(feature = "rtrb")]
impl VocoderHandle {
    /// Queues a transpose of the whole carrier bank, applied at the patch's
    /// next tick.
    pub fn set_offset(&mut self, cents: f64) {
        let pitch = (cents / 1200.0).exp2();
        for (controller, &center) in self.controllers.iter_mut().zip(&self.centers) {
            controller.send(GeneratorControl::SetFrequency(center * pitch));
        }
    }

    pub fn bands(&self) -> usize {
        self.controllers.len()
    }
}

/// N+1 band edges, log-uniform from [`LOW_CUTOFF_HZ`] to [`HIGH_CUTOFF_HZ`].
/// The outer edges are set exactly; only interior edges go through the
/// exponential.
fn band_boundaries(bands: usize) -> Vec<f64> {
    let delta = (HIGH_CUTOFF_HZ.log10() - LOW_CUTOFF_HZ.log10()) / bands as f64;
    let mut boundaries = Vec::with_capacity(bands + 1);
    boundaries.push(LOW_CUTOFF_HZ);
    for i in 1..bands {
        boundaries.push(LOW_CUTOFF_HZ * 10f64.powf(i as f64 * delta));
    }
    boundaries.push(HIGH_CUTOFF_HZ);
    boundaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_SAMPLE_RATE;
    use approx::assert_relative_eq;

    fn saw_modulator() -> Node {
        Node::generator(OscNode::new(Waveform::Sawtooth, 220.0, DEFAULT_SAMPLE_RATE).unwrap())
    }

    #[test]
    fn zero_bands_is_rejected() {
        assert!(matches!(
            Vocoder::new(saw_modulator(), 0, DEFAULT_SAMPLE_RATE),
            Err(BuildError::ZeroBands)
        ));
    }

    #[test]
    fn boundaries_follow_the_log_grid() {
        let bounds = band_boundaries(4);

        assert_eq!(bounds[0], LOW_CUTOFF_HZ);
        assert_eq!(bounds[4], HIGH_CUTOFF_HZ);
        assert_relative_eq!(bounds[1], 212.731_836, max_relative = 1e-6);
        assert_relative_eq!(bounds[2], 565.685_425, max_relative = 1e-6);
        assert_relative_eq!(bounds[3], 1_504.241_2, max_relative = 1e-6);
    }

    #[test]
    fn centers_sit_inside_their_bands() {
        for bands in [1, 4, 16] {
            let bounds = band_boundaries(bands);
            assert_eq!(bounds.len(), bands + 1);
            for pair in bounds.windows(2) {
                assert!(pair[0] < pair[1], "edges must ascend: {pair:?}");
            }

            let centers: Vec<f64> = bounds
                .windows(2)
                .map(|pair| (pair[0] * pair[1]).sqrt())
                .collect();
            for (i, &center) in centers.iter().enumerate() {
                assert!(
                    bounds[i] < center && center < bounds[i + 1],
                    "center {center} escapes band {i}"
                );
            }
        }
    }

    #[test]
    fn builds_one_filter_and_combine_pair_per_band() {
        let vocoder = Vocoder::new(saw_modulator(), 8, DEFAULT_SAMPLE_RATE).unwrap();

        assert_eq!(vocoder.bands(), 8);
        assert_eq!(vocoder.centers().len(), 8);
        assert_eq!(vocoder.patch.len(), 1 + 2 * 8);
    }

    #[test]
    fn set_offset_retunes_the_carriers() {
        let mut transposed = Vocoder::new(saw_modulator(), 4, DEFAULT_SAMPLE_RATE).unwrap();
        let mut straight = Vocoder::new(saw_modulator(), 4, DEFAULT_SAMPLE_RATE).unwrap();

        transposed.set_offset(700.0).unwrap();

        // Identical deterministic modulators; only the carrier tuning
        // differs, and it must be audible.
        let diverged = (0..512).any(|_| transposed.tick() != straight.tick());
        assert!(diverged);
    }

    #[cfg(feature = "rtrb")]
    #[test]
    fn split_handle_retunes_from_outside() {
        let (mut patch, mut handle) =
            Vocoder::new(saw_modulator(), 4, DEFAULT_SAMPLE_RATE)
                .unwrap()
                .split()
                .unwrap();
        let mut straight = Vocoder::new(saw_modulator(), 4, DEFAULT_SAMPLE_RATE).unwrap();

        assert_eq!(handle.bands(), 4);
        handle.set_offset(-1200.0);

        let diverged = (0..512).any(|_| patch.tick() != straight.tick());
        assert!(diverged);
    }
}
