//! Magnitude/argument representation of complex values.

use rustfft::num_complex::Complex64;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// A complex value in polar form, argument in (−π, π].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar {
    pub magnitude: f64,
    pub argument: f64,
}

impl Polar {
    /// Convert from rectangular form.
    ///
    /// A zero value has argument 0, whatever the signs of its zero parts.
    pub fn from_complex(z: Complex64) -> Self {
        let magnitude = z.re.hypot(z.im);
        let argument = if magnitude == 0.0 {
            0.0
        } else {
            wrap_angle(z.im.atan2(z.re))
        };
        Self {
            magnitude,
            argument,
        }
    }

    /// Back to rectangular form.
    pub fn to_complex(self) -> Complex64 {
        Complex64::from_polar(self.magnitude, self.argument)
    }
}

impl From<Complex64> for Polar {
    fn from(z: Complex64) -> Self {
        Self::from_complex(z)
    }
}

/// Fold any finite angle into (−π, π].
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}
