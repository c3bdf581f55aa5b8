//! Whole-patch scenario benchmarks.
//!
//! These model assembled graphs rather than lone primitives: a full vocoder
//! bank, and a hand-wired mixing patch with several voices.

mod patch;
mod vocoder;

pub use patch::bench_patch;
pub use vocoder::bench_vocoder;
