use crate::dsp::grid::SampleGrid;
use crate::dsp::pulse::{Pulse, PulseShape};
use crate::error::{ensure_finite, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/*
Test Waveforms
==============

The generator covers the small set of signals used to explore frequency
content. Periodic shapes take an amplitude a, a fundamental f0 and an
initial phase phi; pulse shapes take an amplitude, a width and a center.

Cosine:    a·cos(2π f0 t + phi)
           A single spectral line at ±f0, each of weight a/2.

Square:    +a for the first half of each period, -a for the second.
           Odd harmonics only, falling off as 1/n.

Sawtooth:  a linear ramp from +a down to -a over each period.
           Every harmonic, falling off as 1/n.

Rect/Tri/Sinc:  single unit-area pulses (see `pulse`), used to show the
           Dirac limit: a very narrow pulse correlates equally with every
           phasor.


Phase Folding
-------------

Square and sawtooth need the position inside the current period, as a
fraction in [0, 1):

    frac = (f0·t + phi/2π) mod 1

This is the same as shifting time by phi/(2π f0), wrapping by the period
1/f0 and scaling back by f0, without ever dividing by f0. At f0 = 0 the
fraction is the constant phi/2π mod 1, so both shapes degenerate to a DC
level set by the phase instead of dividing by zero.
*/

/// Closed set of signal shapes the generator can produce.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveformKind {
    Cosine,
    Square,
    Sawtooth,
    Rect,
    Tri,
    Sinc,
}

impl WaveformKind {
    pub const ALL: [WaveformKind; 6] = [
        WaveformKind::Cosine,
        WaveformKind::Square,
        WaveformKind::Sawtooth,
        WaveformKind::Rect,
        WaveformKind::Tri,
        WaveformKind::Sinc,
    ];

    /// True for shapes that repeat every 1/f0.
    pub fn is_periodic(self) -> bool {
        matches!(
            self,
            WaveformKind::Cosine | WaveformKind::Square | WaveformKind::Sawtooth
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            WaveformKind::Cosine => "cosine",
            WaveformKind::Square => "square",
            WaveformKind::Sawtooth => "sawtooth",
            WaveformKind::Rect => "rect",
            WaveformKind::Tri => "tri",
            WaveformKind::Sinc => "sinc",
        }
    }

    /// Next shape in `ALL`, wrapping around.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&k| k == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

/// A fully parameterized signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Waveform {
    Cosine {
        amplitude: f64,
        frequency: f64,
        phase: f64,
    },
    Square {
        amplitude: f64,
        frequency: f64,
        phase: f64,
    },
    Sawtooth {
        amplitude: f64,
        frequency: f64,
        phase: f64,
    },
    Pulse(Pulse),
}

impl Waveform {
    /// Periodic shapes only; `from_kind` routes pulse kinds away from here.
    fn periodic(kind: WaveformKind, amplitude: f64, frequency: f64, phase: f64) -> Result<Self> {
        let amplitude = ensure_finite("amplitude", amplitude)?;
        let frequency = ensure_finite("f0", frequency)?;
        let phase = ensure_finite("phi", phase)?;
        Ok(match kind {
            WaveformKind::Square => Waveform::Square {
                amplitude,
                frequency,
                phase,
            },
            WaveformKind::Sawtooth => Waveform::Sawtooth {
                amplitude,
                frequency,
                phase,
            },
            _ => Waveform::Cosine {
                amplitude,
                frequency,
                phase,
            },
        })
    }

    /// Build a single pulse of unit area times `amplitude`.
    pub fn pulse(shape: PulseShape, amplitude: f64, width: f64, center: f64) -> Result<Self> {
        Pulse::new(shape, amplitude, width, center).map(Waveform::Pulse)
    }

    /// Build any kind. Periodic kinds ignore `width`/`center`, pulses ignore
    /// `frequency`/`phase`.
    pub fn from_kind(
        kind: WaveformKind,
        amplitude: f64,
        frequency: f64,
        phase: f64,
        width: f64,
        center: f64,
    ) -> Result<Self> {
        match kind {
            WaveformKind::Rect => Self::pulse(PulseShape::Rect, amplitude, width, center),
            WaveformKind::Tri => Self::pulse(PulseShape::Tri, amplitude, width, center),
            WaveformKind::Sinc => Self::pulse(PulseShape::Sinc, amplitude, width, center),
            periodic => Self::periodic(periodic, amplitude, frequency, phase),
        }
    }

    pub fn kind(&self) -> WaveformKind {
        match self {
            Waveform::Cosine { .. } => WaveformKind::Cosine,
            Waveform::Square { .. } => WaveformKind::Square,
            Waveform::Sawtooth { .. } => WaveformKind::Sawtooth,
            Waveform::Pulse(p) => match p.shape {
                PulseShape::Rect => WaveformKind::Rect,
                PulseShape::Tri => WaveformKind::Tri,
                PulseShape::Sinc => WaveformKind::Sinc,
            },
        }
    }

    /// Fundamental frequency, if the shape is periodic.
    pub fn fundamental(&self) -> Option<f64> {
        match *self {
            Waveform::Cosine { frequency, .. }
            | Waveform::Square { frequency, .. }
            | Waveform::Sawtooth { frequency, .. } => Some(frequency),
            Waveform::Pulse(_) => None,
        }
    }

    /// Value at time `t`.
    #[inline]
    pub fn at(&self, t: f64) -> f64 {
        match *self {
            Waveform::Cosine {
                amplitude,
                frequency,
                phase,
            } => amplitude * (TAU * frequency * t + phase).cos(),
            Waveform::Square {
                amplitude,
                frequency,
                phase,
            } => {
                if cycle_fraction(t, frequency, phase) <= 0.5 {
                    amplitude
                } else {
                    -amplitude
                }
            }
            Waveform::Sawtooth {
                amplitude,
                frequency,
                phase,
            } => amplitude * (1.0 - 2.0 * cycle_fraction(t, frequency, phase)),
            Waveform::Pulse(pulse) => pulse.at(t),
        }
    }

    /// Sample the waveform on every point of `grid`.
    pub fn generate(&self, grid: &SampleGrid) -> Vec<f64> {
        if matches!(self.fundamental(), Some(f) if f == 0.0)
            && matches!(self, Waveform::Square { .. } | Waveform::Sawtooth { .. })
        {
            tracing::debug!(kind = self.kind().name(), "0 Hz fundamental, generating a DC level");
        }
        grid.times().map(|t| self.at(t)).collect()
    }
}

/// Position inside the current period as a fraction in [0, 1).
#[inline]
fn cycle_fraction(t: f64, frequency: f64, phase: f64) -> f64 {
    (frequency * t + phase / TAU).rem_euclid(1.0)
}

/// Sample a waveform of `kind` on `grid`.
///
/// Convenience wrapper over [`Waveform::from_kind`] + [`Waveform::generate`].
/// Pulse kinds get a width of 1/f0 (the whole window at f0 = 0) and are
/// centered in the window.
pub fn generate(
    kind: WaveformKind,
    grid: &SampleGrid,
    amplitude: f64,
    frequency: f64,
    phase: f64,
) -> Result<Vec<f64>> {
    let width = if frequency != 0.0 && frequency.is_finite() {
        1.0 / frequency.abs()
    } else {
        grid.duration()
    };
    let center = grid.t_start() + grid.duration() / 2.0;
    let waveform = Waveform::from_kind(kind, amplitude, frequency, phase, width, center)?;
    Ok(waveform.generate(grid))
}
