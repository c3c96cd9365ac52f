//! Low-level numeric primitives used by the correlation engine.
//!
//! Everything here is a pure function of its inputs: grids are immutable
//! once built and every generator returns a fresh buffer. The engine in
//! [`crate::analysis`] layers products and integrals on top.

/// Evenly spaced time axis and time-stamp lookup.
pub mod grid;
/// Magnitude/argument form of complex values.
pub mod polar;
/// Finite-support pulse shapes (rect, tri, sinc).
pub mod pulse;
/// Periodic and pulse waveform generation over a grid.
pub mod waveform;

pub use grid::{SampleGrid, TimeStamp};
pub use polar::Polar;
pub use waveform::{Waveform, WaveformKind};
