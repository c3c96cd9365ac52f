//! Scalar products across many analysis frequencies.
//!
//! [`sweep`] runs the direct sum at arbitrary frequencies. For frequencies
//! that fall on FFT bins (`k·fe/n`) [`fft_scalar_products`] gets all of them
//! at once; both agree to rounding error.

use rustfft::{num_complex::Complex64, Fft, FftPlanner};
use std::f64::consts::TAU;

use crate::analysis::correlate::{scalar_product, Normalization, ScalarProduct};
use crate::dsp::grid::SampleGrid;
use crate::error::{ensure_finite_complex, PhasorError, Result};

/// Scalar product at one analysis frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumPoint {
    /// Analysis frequency in Hz
    pub frequency: f64,
    pub scalar: ScalarProduct,
}

/// Scalar product of `signal` at each of `frequencies`, in the given order.
pub fn sweep(
    signal: &[f64],
    grid: &SampleGrid,
    frequencies: &[f64],
    normalization: Normalization,
) -> Result<Vec<SpectrumPoint>> {
    frequencies
        .iter()
        .map(|&frequency| {
            scalar_product(signal, grid, frequency, normalization)
                .map(|scalar| SpectrumPoint { frequency, scalar })
        })
        .collect()
}

/// Scalar products at every bin frequency of an `n`-point FFT, sorted by
/// frequency from the most negative bin up to Nyquist.
///
/// Bin k maps to k·fe/n for k <= n/2 and to (k - n)·fe/n above, so the
/// result covers negative frequencies the same way the direct engine does.
pub fn fft_scalar_products(
    signal: &[f64],
    grid: &SampleGrid,
    normalization: Normalization,
) -> Result<Vec<SpectrumPoint>> {
    let n = grid.len();
    if signal.len() != n {
        return Err(PhasorError::LengthMismatch {
            expected: n,
            actual: signal.len(),
        });
    }
    if let Some(index) = signal.iter().position(|x| !x.is_finite()) {
        return Err(PhasorError::NonFiniteSample { index });
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    let mut buffer: Vec<Complex64> = signal.iter().map(|&x| Complex64::new(x, 0.0)).collect();
    fft.process(&mut buffer);

    let scale = grid.step() / normalization.divisor(grid);
    let t_start = grid.t_start();
    let bin_width = grid.sample_rate() / n as f64;

    let mut points: Vec<SpectrumPoint> = buffer
        .iter()
        .enumerate()
        .map(|(k, &bin)| {
            let signed = if k <= n / 2 { k as f64 } else { k as f64 - n as f64 };
            let frequency = signed * bin_width;
            // The FFT assumes the first sample sits at t = 0.
            let angle = -TAU * frequency * t_start;
            let shift = Complex64::new(angle.cos(), angle.sin());
            ensure_finite_complex("scalar product", bin * shift * scale).map(|value| {
                SpectrumPoint {
                    frequency,
                    scalar: ScalarProduct {
                        value,
                        normalization,
                    },
                }
            })
        })
        .collect::<Result<_>>()?;
    points.sort_by(|a, b| a.frequency.total_cmp(&b.frequency));
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::waveform::{generate, WaveformKind};

    #[test]
    fn sweep_finds_only_the_fundamental() {
        let grid = SampleGrid::new(0.0, 1.0, 10_000.0).unwrap();
        let x = generate(WaveformKind::Cosine, &grid, 2.0, 3.0, 0.0).unwrap();
        let freqs: Vec<f64> = (-5..=5).map(|f| f as f64).collect();
        let points = sweep(&x, &grid, &freqs, Normalization::PerDuration).unwrap();
        for p in &points {
            let expected = if p.frequency.abs() == 3.0 { 1.0 } else { 0.0 };
            assert!(
                (p.scalar.magnitude() - expected).abs() < 1e-9,
                "f = {} gave {}",
                p.frequency,
                p.scalar.magnitude()
            );
        }
    }

    #[test]
    fn fft_agrees_with_direct_sum_off_origin() {
        let grid = SampleGrid::new(0.3, 0.5, 1_000.0).unwrap();
        let x = generate(WaveformKind::Sawtooth, &grid, 1.0, 4.0, 0.2).unwrap();
        let norm = Normalization::PerDuration;
        let fast = fft_scalar_products(&x, &grid, norm).unwrap();
        assert_eq!(fast.len(), grid.len());
        assert!(fast.windows(2).all(|w| w[0].frequency < w[1].frequency));

        for point in fast.iter().filter(|p| p.frequency.abs() <= 20.0) {
            let direct = scalar_product(&x, &grid, point.frequency, norm).unwrap();
            assert!(
                (direct.value - point.scalar.value).norm() < 1e-9,
                "mismatch at {} Hz",
                point.frequency
            );
        }
    }

    #[test]
    fn overflowing_bins_are_an_error() {
        let grid = SampleGrid::new(0.0, 1.0, 1_000.0).unwrap();
        let huge = vec![1e307; grid.len()];
        assert_eq!(
            fft_scalar_products(&huge, &grid, Normalization::RawSum).map(|p| p.len()),
            Err(PhasorError::NonFiniteResult {
                quantity: "scalar product"
            })
        );
    }
}
