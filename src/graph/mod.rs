//! The layered signal graph and the nodes that populate it.
//!
//! A [`Patch`] owns an arena of [`Node`]s, each sitting on a numbered layer;
//! every tick runs the layers bottom-up and yields one mixed
//! [`StereoSample`](crate::sample::StereoSample). Adapter modules here wrap
//! the raw primitives from [`dsp`](crate::dsp) into the [`Generator`] and
//! [`Modifier`] roles, and [`control`] carries the typed messages that steer
//! a running graph from outside.

/// Attack/decay/sustain/release gate as a modifier.
pub mod adsr;
/// Resonant band-pass filter node.
pub mod band_pass;
/// Typed control messages, taps, and cross-thread controllers.
pub mod control;
/// Feedback echo node.
pub mod echo;
/// Envelope-follower node for amplitude tracking.
pub mod envelope;
/// Fixed gain stage.
pub mod gain;
/// The node container and its generator/modifier roles.
pub mod node;
/// Audio-band oscillators and noise.
pub mod oscillator;
/// The arena, layers, and the tick loop.
pub mod patch;
/// Resampling track player.
pub mod sampler;

#[cfg(feature = "rtrb")]
pub use control::Controller;
pub use control::{GeneratorControl, ModifierControl, NodeControl, Tap};
pub use node::{Generator, Interactor, Modifier, Node};
pub use patch::{NodeId, Patch};
