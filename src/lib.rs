pub mod analysis; // Correlation engine: products, scalar products, sweeps
pub mod dsp;
pub mod error;
pub mod scene; // Parameter sets and full evaluations for the renderer

pub use error::{ErrorKind, PhasorError, Result};

/// Sample rate used by every demo (samples per second).
pub const SAMPLE_RATE: f64 = 10_000.0;
