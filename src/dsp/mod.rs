//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! Every component here produces or transforms one stereo sample per call,
//! is allocation-free after construction, and knows nothing about the graph.
//! Construction validates its parameters; the per-sample path cannot fail.

/// Linear attack/decay/sustain/release gain ramp.
pub mod adsr;
/// Two-pole resonant band-pass filter.
pub mod band_pass;
/// Fixed-length feedback delay.
pub mod echo;
/// Amplitude-tracking envelope follower.
pub mod envelope;
/// Scalar gain, including polarity inversion.
pub mod gain;
/// Phase-accumulator oscillator waveforms and seeded noise.
pub mod oscillator;
/// Cursor-based playback of a decoded track at the engine tick rate.
pub mod resample;

pub use oscillator::Waveform;
