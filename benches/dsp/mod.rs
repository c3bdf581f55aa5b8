//! Benchmarks for low-level DSP primitives.

mod band_pass;
mod echo;
mod envelope;
mod oscillator;
mod resample;

pub use band_pass::bench_band_pass;
pub use echo::bench_echo;
pub use envelope::bench_envelope;
pub use oscillator::bench_oscillator;
pub use resample::bench_resample;
