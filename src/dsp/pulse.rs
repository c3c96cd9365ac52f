use crate::error::{ensure_finite, PhasorError, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/*
Pulses and the Dirac Limit
==========================

The three prototype shapes all have unit area:

    rect(x) = 1        for |x| <= 1/2, else 0
    tri(x)  = 1 - |x|  for |x| <= 1,   else 0
    sinc(x) = sin(πx) / (πx),  sinc(0) = 1

A pulse of width w centered at c rescales time before calling the shape
and rescales height so the area stays 1:

    p(t) = a / w * shape((t - c) / w)

As w shrinks the pulse gets taller and narrower while its integral stays
at a. In the limit it behaves like a·δ(t - c), and its inner product with
a phasor tends to a·e^{-j2πfc}: magnitude a at every frequency.


The Sinc Singularity
--------------------

sin(πx)/(πx) is 0/0 at the origin. Near zero we switch to the Taylor
series 1 - (πx)²/6 + (πx)⁴/120, which is exact to double precision for
|x| below the switch-over and returns exactly 1.0 at 0.
*/

/// Below this |x| the sinc is evaluated from its Taylor series.
const SINC_SERIES_LIMIT: f64 = 1e-4;

/// Unit rectangle: 1 on |x| <= 1/2.
#[inline]
pub fn rect(x: f64) -> f64 {
    if x.abs() <= 0.5 {
        1.0
    } else {
        0.0
    }
}

/// Unit triangle: 1 - |x| on |x| <= 1.
#[inline]
pub fn tri(x: f64) -> f64 {
    let ax = x.abs();
    if ax <= 1.0 {
        1.0 - ax
    } else {
        0.0
    }
}

/// Normalized cardinal sine, with sincard(0) == 1.
#[inline]
pub fn sincard(x: f64) -> f64 {
    let px = PI * x;
    if x.abs() < SINC_SERIES_LIMIT {
        let px2 = px * px;
        1.0 - px2 / 6.0 + px2 * px2 / 120.0
    } else {
        px.sin() / px
    }
}

/// Which prototype shape a pulse uses.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseShape {
    Rect,
    Tri,
    Sinc,
}

impl PulseShape {
    #[inline]
    pub fn eval(self, x: f64) -> f64 {
        match self {
            PulseShape::Rect => rect(x),
            PulseShape::Tri => tri(x),
            PulseShape::Sinc => sincard(x),
        }
    }
}

/// Unit-area pulse of a given width, scaled by an amplitude.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    pub shape: PulseShape,
    pub amplitude: f64,
    /// Time scale in seconds. Height is amplitude / width.
    pub width: f64,
    /// Center of the pulse in seconds
    pub center: f64,
}

impl Pulse {
    pub fn new(shape: PulseShape, amplitude: f64, width: f64, center: f64) -> Result<Self> {
        let amplitude = ensure_finite("amplitude", amplitude)?;
        let center = ensure_finite("pulse_center", center)?;
        if !(width.is_finite() && width > 0.0) {
            return Err(PhasorError::InvalidPulseWidth(width));
        }
        Ok(Self {
            shape,
            amplitude,
            width,
            center,
        })
    }

    /// Value at time `t`.
    #[inline]
    pub fn at(&self, t: f64) -> f64 {
        self.amplitude / self.width * self.shape.eval((t - self.center) / self.width)
    }
}
