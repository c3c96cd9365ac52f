//! Correlation of sampled signals against complex phasors.
//!
//! [`correlate`] produces the sample-wise product with a reference phasor
//! and its normalized integral (the scalar product). [`spectrum`] repeats
//! that over many analysis frequencies.

pub mod correlate;
pub mod spectrum;

pub use correlate::{
    correlate, phasor, scalar_product, Correlation, Highlight, Normalization, ProductSeries,
    ScalarProduct,
};
pub use spectrum::{fft_scalar_products, sweep, SpectrumPoint};
