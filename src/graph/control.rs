use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, PushError, RingBuffer};
#[cfg(feature = "rtrb")]
use tracing::warn;

#[cfg(feature = "rtrb")]
use crate::graph::patch::NodeId;
use crate::sample::{DecodedAudio, StereoSample};

/*
Typed node control
==================

Concrete generators and modifiers each answer a different subset of
operations: an oscillator retunes, a sampler swaps sources, a filter moves
its band. Callers that only hold a role handle (the patch, a vocoder, a UI
thread) still need to reach those operations, so the whole vocabulary lives
in two closed enums, one per role. A kind that does not answer a message
returns a typed error instead of silently ignoring it, and adding a new
message fails to compile until every kind has chosen an answer.
*/

/// Operations a [`Generator`](crate::graph::Generator) may answer.
#[derive(Debug, Clone)]
pub enum GeneratorControl {
    /// Retune an oscillator, in Hz. Negative runs the waveform backwards.
    SetFrequency(f64),
    /// Scale a player's playback rate (1.0 = recorded speed).
    SetSpeed(f64),
    /// Replace a player's source wholesale; playback restarts at the top.
    SetSource(DecodedAudio),
}

impl GeneratorControl {
    pub fn name(&self) -> &'static str {
        match self {
            GeneratorControl::SetFrequency(_) => "SetFrequency",
            GeneratorControl::SetSpeed(_) => "SetSpeed",
            GeneratorControl::SetSource(_) => "SetSource",
        }
    }
}

/// Operations a [`Modifier`](crate::graph::Modifier) may answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModifierControl {
    /// Rescale a gain stage (negative inverts polarity).
    SetGain(f32),
    /// Change an echo's feedback ratio.
    SetRatio(f32),
    /// Move a band-pass filter's center frequency, in Hz.
    SetCenter(f64),
    /// Change a band-pass filter's quality factor.
    SetQuality(f64),
    /// Restart an envelope's attack stage.
    Trigger,
    /// Start an envelope's release stage.
    Release,
}

impl ModifierControl {
    pub fn name(&self) -> &'static str {
        match self {
            ModifierControl::SetGain(_) => "SetGain",
            ModifierControl::SetRatio(_) => "SetRatio",
            ModifierControl::SetCenter(_) => "SetCenter",
            ModifierControl::SetQuality(_) => "SetQuality",
            ModifierControl::Trigger => "Trigger",
            ModifierControl::Release => "Release",
        }
    }
}

/// A control message addressed to one node, tagged with the role it is for.
#[derive(Debug, Clone)]
pub enum NodeControl {
    Generator(GeneratorControl),
    Modifier(ModifierControl),
}

impl NodeControl {
    pub fn name(&self) -> &'static str {
        match self {
            NodeControl::Generator(control) => control.name(),
            NodeControl::Modifier(control) => control.name(),
        }
    }
}

impl From<GeneratorControl> for NodeControl {
    fn from(control: GeneratorControl) -> Self {
        NodeControl::Generator(control)
    }
}

impl From<ModifierControl> for NodeControl {
    fn from(control: ModifierControl) -> Self {
        NodeControl::Modifier(control)
    }
}

/// A slot one node overwrites with its sample every tick, readable from any
/// thread; a meter or scope probe, not a signal path.
///
/// Both channels are packed as `f32` bit patterns into a single atomic, so a
/// reader always sees a coherent pair rather than one channel from tick `n`
/// and the other from tick `n+1`.
#[derive(Debug, Clone)]
pub struct Tap {
    slot: Arc<AtomicU64>,
}

impl Tap {
    pub(crate) fn new() -> Self {
        // 0u64 unpacks to (0.0, 0.0): silence until the first tick.
        Self {
            slot: Arc::new(AtomicU64::new(0)),
        }
    }

    pub(crate) fn publish(&self, sample: StereoSample) {
        let bits = (u64::from(sample.left.to_bits()) << 32) | u64::from(sample.right.to_bits());
        self.slot.store(bits, Ordering::Relaxed);
    }

    /// The most recently published sample.
    pub fn read(&self) -> StereoSample {
        let bits = self.slot.load(Ordering::Relaxed);
        StereoSample::new(f32::from_bits((bits >> 32) as u32), f32::from_bits(bits as u32))
    }
}

#[cfg(feature = "rtrb")]
const CONTROL_QUEUE_SIZE: usize = 64;

/// The sending half of one node's control inbox.
///
/// Obtained from [`Patch::controller`](crate::graph::Patch::controller) and
/// free to live on another thread; queued messages are applied at the top of
/// the node's next tick.
#[cfg(feature = "rtrb")]
pub struct Controller {
    node: NodeId,
    tx: Producer<NodeControl>,
}

#[cfg(feature = "rtrb")]
impl Controller {
    pub(crate) fn attach(node: NodeId) -> (Self, Consumer<NodeControl>) {
        let (tx, rx) = RingBuffer::new(CONTROL_QUEUE_SIZE);
        (Self { node, tx }, rx)
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Queues a message for the node's next tick. Never blocks: when the
    /// inbox is full the message is dropped here, with a warning, rather
    /// than stalling the sender or the audio thread.
    pub fn send(&mut self, control: impl Into<NodeControl>) {
        if let Err(PushError::Full(control)) = self.tx.push(control.into()) {
            warn!(node = ?self.node, control = control.name(), "control inbox full, message dropped");
        }
    }
}
