use thiserror::Error;

use crate::graph::NodeId;

/// Construction-time validation failures.
///
/// Everything here is caught while a patch is being wired or a primitive is
/// being tuned, before the first tick. The tick path itself never returns
/// an error; a patch that built successfully cannot fail while running.
#[derive(Debug, Error)]
pub enum BuildError {
    /// An edge must point from a lower layer to a strictly higher one, or the
    /// downstream node would read its accumulated input before every parent
    /// has written this tick's contribution.
    #[error("edge {from:?} (layer {from_layer}) -> {to:?} (layer {to_layer}) does not increase the layer")]
    LayerOrder {
        from: NodeId,
        to: NodeId,
        from_layer: u32,
        to_layer: u32,
    },

    #[error("{0:?} is not a node in this patch")]
    UnknownNode(NodeId),

    #[error("a vocoder needs at least one band")]
    ZeroBands,

    #[error("band corners must satisfy 0 < low < high, got {low}..{high}")]
    InvalidBand { low: f64, high: f64 },

    #[error("band-pass tuning needs a positive finite center and quality, got center {center}, quality {quality}")]
    InvalidTuning { center: f64, quality: f64 },

    #[error("corner frequency must be positive and finite, got {0}")]
    InvalidCorner(f64),

    #[error("engine sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f64),

    #[error("source sample rate must be positive")]
    ZeroSampleRate,

    #[error("loop region {start}..{end} does not fit a track of {len} samples")]
    InvalidLoopRegion {
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("decoded track holds no samples")]
    EmptyTrack,

    #[error("echo delay must be at least one sample")]
    ZeroDelay,

    #[error("{0:?} already has a controller attached")]
    ControllerTaken(NodeId),
}

/// Control dispatch failures.
///
/// A control message is typed, so the old failure mode of mistyping an
/// operation name is gone; what remains is sending a message the receiving
/// kind genuinely has no answer for, or addressing a role the node does not
/// carry. Both come back to the caller rather than disappearing.
#[derive(Debug, Error)]
pub enum ControlError {
    #[error("{kind} does not answer {control}")]
    Unsupported {
        kind: &'static str,
        control: &'static str,
    },

    #[error("{0:?} has no generator to control")]
    NoGenerator(NodeId),

    #[error("{0:?} has no modifier to control")]
    NoModifier(NodeId),

    #[error("{0:?} is not a node in this patch")]
    UnknownNode(NodeId),

    /// The message was understood but carried a value the receiver refuses,
    /// e.g. retuning a filter to a non-positive center frequency.
    #[error("{kind} rejected {control}")]
    Rejected {
        kind: &'static str,
        control: &'static str,
        #[source]
        source: BuildError,
    },
}
