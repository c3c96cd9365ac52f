//! Error types for the phasor engine.
//!
//! Singular limits that have a defined fallback (sinc at the origin, square
//! and sawtooth at a zero fundamental, per-period normalization of a DC
//! signal) are resolved in place and never show up here. What remains are
//! parameter combinations the engine cannot give a meaning to.

use rustfft::num_complex::Complex64;
use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, PhasorError>;

/// Broad classification of a [`PhasorError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid parameter combination
    Domain,
    /// A value that would turn into NaN or infinity
    NumericSingularity,
}

/// Errors reported by grid construction, waveform generation and correlation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhasorError {
    /// Window length is zero, negative or not finite
    #[error("invalid duration {0} s: must be finite and > 0")]
    InvalidDuration(f64),

    /// Sample rate is zero, negative or not finite
    #[error("invalid sample rate {0} Hz: must be finite and > 0")]
    InvalidSampleRate(f64),

    /// Window holds more samples than the engine will allocate
    #[error("window of {duration} s at {sample_rate} Hz exceeds {limit} samples")]
    TooManySamples {
        duration: f64,
        sample_rate: f64,
        limit: usize,
    },

    /// Window is shorter than one sample
    #[error("window of {duration} s at {sample_rate} Hz holds no samples")]
    EmptyGrid { duration: f64, sample_rate: f64 },

    /// A window expressed in periods needs at least one period
    #[error("invalid period count {0}: need at least one period")]
    InvalidPeriods(u32),

    /// A window expressed in periods needs a non-zero fundamental
    #[error("cannot span {periods} period(s) of a 0 Hz fundamental")]
    ZeroFundamental { periods: u32 },

    /// A scalar parameter is NaN or infinite
    #[error("parameter `{name}` is not finite: {value}")]
    NonFiniteParameter { name: &'static str, value: f64 },

    /// Amplitude must be strictly positive
    #[error("invalid amplitude {0}: must be > 0")]
    InvalidAmplitude(f64),

    /// Pulse width must be strictly positive
    #[error("invalid pulse width {0} s: must be finite and > 0")]
    InvalidPulseWidth(f64),

    /// Signal and grid disagree on the number of samples
    #[error("signal length mismatch: grid has {expected} samples, signal has {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Signal contains NaN or infinity
    #[error("signal sample {index} is not finite")]
    NonFiniteSample { index: usize },

    /// A computed quantity overflowed or became NaN
    #[error("{quantity} is not finite")]
    NonFiniteResult { quantity: &'static str },
}

impl PhasorError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PhasorError::NonFiniteParameter { .. }
            | PhasorError::NonFiniteSample { .. }
            | PhasorError::NonFiniteResult { .. } => ErrorKind::NumericSingularity,
            _ => ErrorKind::Domain,
        }
    }
}

/// Reject NaN and infinities in a named scalar parameter.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PhasorError::NonFiniteParameter { name, value })
    }
}

/// Reject a complex result with a NaN or infinite part.
pub(crate) fn ensure_finite_complex(quantity: &'static str, value: Complex64) -> Result<Complex64> {
    if value.re.is_finite() && value.im.is_finite() {
        Ok(value)
    } else {
        Err(PhasorError::NonFiniteResult { quantity })
    }
}
