use rustfft::num_complex::Complex64;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::dsp::grid::{SampleGrid, TimeStamp};
use crate::dsp::polar::Polar;
use crate::error::{ensure_finite, ensure_finite_complex, PhasorError, Result};

/*
Inner Product with a Phasor
===========================

To find how much of frequency f a signal x(t) contains, multiply it by the
phasor e^{-j2πft} and average the result:

    <x, e^{j2πft}> = (1/T) ∫ x(t) e^{-j2πft} dt

Geometrically the product traces a curve in the complex plane that spins
at -f while its radius follows |x(t)|. If every element dt of that curve
carries mass dt, the integral divided by the window is the curve's
center of gravity (CG).

For x(t) = a·cos(2πf0 t + phi) over whole periods the CG sits at the
origin for every f except ±f0, where it lands on (a/2)·e^{±j·phi}. Twice
its modulus recovers the amplitude, its argument the phase.


Discretization
--------------

The integral is a rectangle-rule sum over the grid, step 1/fe:

    prod[i]  = x[i] · e^{-j2πf t[i]}
    integral = (1/fe) Σ prod[i]

then divided according to the normalization:

    PerPeriod    integral / T0        average over one fundamental period
    PerDuration  integral / dur       average over the whole window
    RawSum       integral             absolute area (Dirac demonstrations)

Over N whole periods PerPeriod reads N times the single-period average
while PerDuration reads the average itself. A DC signal has no period, so
PerPeriod with f0 = 0 falls back to the window length.
*/

/// How the integrated product is scaled into a scalar product.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Normalization {
    /// Divide by one period of `fundamental` (Hz)
    PerPeriod { fundamental: f64 },
    /// Divide by the window length
    PerDuration,
    /// No division beyond the 1/fe integration step
    RawSum,
}

impl Normalization {
    /// Length in seconds the integral is divided by.
    pub fn divisor(&self, grid: &SampleGrid) -> f64 {
        match *self {
            Normalization::PerPeriod { fundamental } if fundamental != 0.0 => {
                1.0 / fundamental.abs()
            }
            Normalization::PerPeriod { .. } => {
                tracing::debug!(
                    duration = grid.duration(),
                    "0 Hz fundamental has no period, normalizing by window length"
                );
                grid.duration()
            }
            Normalization::PerDuration => grid.duration(),
            Normalization::RawSum => 1.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Normalization::PerPeriod { .. } => "per period",
            Normalization::PerDuration => "per duration",
            Normalization::RawSum => "raw sum",
        }
    }
}

/// Reference phasor e^{-j2πft} sampled on `grid`, for the unit-circle overlay.
pub fn phasor(grid: &SampleGrid, frequency: f64) -> Vec<Complex64> {
    grid.times().map(|t| unit_phasor(frequency, t)).collect()
}

#[inline]
fn unit_phasor(frequency: f64, t: f64) -> Complex64 {
    let angle = -TAU * frequency * t;
    Complex64::new(angle.cos(), angle.sin())
}

fn check_signal(signal: &[f64], grid: &SampleGrid) -> Result<()> {
    if signal.len() != grid.len() {
        return Err(PhasorError::LengthMismatch {
            expected: grid.len(),
            actual: signal.len(),
        });
    }
    match signal.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(PhasorError::NonFiniteSample { index }),
        None => Ok(()),
    }
}

/// Sample-wise product of a signal with a phasor.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSeries {
    samples: Vec<Complex64>,
}

impl ProductSeries {
    /// Multiply `signal` by e^{-j2πft} on every grid point.
    pub fn new(signal: &[f64], grid: &SampleGrid, frequency: f64) -> Result<Self> {
        let frequency = ensure_finite("f", frequency)?;
        check_signal(signal, grid)?;
        let samples = signal
            .iter()
            .zip(grid.times())
            .map(|(&x, t)| unit_phasor(frequency, t) * x)
            .collect();
        Ok(Self { samples })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Complex64> {
        self.samples.get(index).copied()
    }

    pub fn as_slice(&self) -> &[Complex64] {
        &self.samples
    }

    pub fn real(&self) -> Vec<f64> {
        self.samples.iter().map(|z| z.re).collect()
    }

    pub fn imag(&self) -> Vec<f64> {
        self.samples.iter().map(|z| z.im).collect()
    }

    /// Polar trace of the product, for the polar plot.
    pub fn polar(&self) -> Vec<Polar> {
        self.samples.iter().map(|&z| Polar::from_complex(z)).collect()
    }

    pub fn sum(&self) -> Complex64 {
        self.samples.iter().sum()
    }
}

/// Normalized integral of a product series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarProduct {
    pub value: Complex64,
    pub normalization: Normalization,
}

impl ScalarProduct {
    #[inline]
    pub fn re(&self) -> f64 {
        self.value.re
    }

    #[inline]
    pub fn im(&self) -> f64 {
        self.value.im
    }

    pub fn polar(&self) -> Polar {
        Polar::from_complex(self.value)
    }

    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.polar().magnitude
    }

    /// Argument in (−π, π].
    #[inline]
    pub fn argument(&self) -> f64 {
        self.polar().argument
    }
}

/// Every quantity the product plots show at one highlighted instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Highlight {
    pub stamp: TimeStamp,
    /// Signal value at the stamp
    pub signal: f64,
    pub phasor: Complex64,
    pub phasor_polar: Polar,
    pub product: Complex64,
    pub product_polar: Polar,
}

/// Result of correlating one signal with one phasor.
#[derive(Debug, Clone, PartialEq)]
pub struct Correlation {
    /// Analysis frequency in Hz
    pub frequency: f64,
    pub product: ProductSeries,
    pub scalar: ScalarProduct,
    grid: SampleGrid,
    divisor: f64,
}

impl Correlation {
    /// Grid the product was sampled on.
    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    /// Running scalar product: the normalized integral up to and including
    /// each sample. The last entry equals `scalar.value`.
    pub fn running(&self) -> Result<Vec<Complex64>> {
        let scale = self.grid.step() / self.divisor;
        let mut acc = Complex64::new(0.0, 0.0);
        self.product
            .as_slice()
            .iter()
            .map(|&z| {
                acc += z;
                ensure_finite_complex("running product", acc * scale)
            })
            .collect()
    }

    /// Snap `time_stamp` onto the grid and read every array at that index.
    pub fn highlight(&self, time_stamp: f64) -> Result<Highlight> {
        let stamp = self.grid.stamp(time_stamp)?;
        let phasor = unit_phasor(self.frequency, stamp.time);
        let product = self.product.samples[stamp.index];
        // The phasor has unit modulus, so projecting back onto it recovers x[k].
        let signal = (product * phasor.conj()).re;
        Ok(Highlight {
            stamp,
            signal,
            phasor,
            phasor_polar: Polar::from_complex(phasor),
            product,
            product_polar: Polar::from_complex(product),
        })
    }
}

/// Correlate `signal` with the phasor at `frequency` over `grid`.
pub fn correlate(
    signal: &[f64],
    grid: &SampleGrid,
    frequency: f64,
    normalization: Normalization,
) -> Result<Correlation> {
    let product = ProductSeries::new(signal, grid, frequency)?;
    let divisor = normalization.divisor(grid);
    let value = ensure_finite_complex("scalar product", product.sum() * (grid.step() / divisor))?;

    tracing::trace!(
        frequency,
        normalization = normalization.name(),
        re = value.re,
        im = value.im,
        "correlated {} samples",
        product.len()
    );

    Ok(Correlation {
        frequency,
        product,
        scalar: ScalarProduct {
            value,
            normalization,
        },
        grid: grid.clone(),
        divisor,
    })
}

/// Scalar product alone, without keeping the product series.
pub fn scalar_product(
    signal: &[f64],
    grid: &SampleGrid,
    frequency: f64,
    normalization: Normalization,
) -> Result<ScalarProduct> {
    let frequency = ensure_finite("f", frequency)?;
    check_signal(signal, grid)?;
    let sum: Complex64 = signal
        .iter()
        .zip(grid.times())
        .map(|(&x, t)| unit_phasor(frequency, t) * x)
        .sum();
    let value = ensure_finite_complex(
        "scalar product",
        sum * (grid.step() / normalization.divisor(grid)),
    )?;
    Ok(ScalarProduct {
        value,
        normalization,
    })
}
