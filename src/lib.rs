pub mod dsp;
pub mod error;
pub mod graph; // Layered signal-flow execution model
pub mod sample;
pub mod vocoder; // Band-pass bank + envelope followers + carriers

pub const DEFAULT_SAMPLE_RATE: f64 = 48_000.0;
