//! Parameter sets and full evaluations.
//!
//! A [`SceneParams`] holds every value a front end lets the user adjust.
//! [`SceneParams::evaluate`] builds the grid, generates the signal,
//! correlates it and snaps the time stamp, returning everything the plots
//! need in one [`Evaluation`]. Nothing is cached between calls: each
//! parameter change is a fresh evaluation.

use rustfft::num_complex::Complex64;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::analysis::correlate::{correlate, phasor, Correlation, Highlight, Normalization};
use crate::dsp::grid::SampleGrid;
use crate::dsp::polar::Polar;
use crate::dsp::waveform::{Waveform, WaveformKind};
use crate::error::{ensure_finite, PhasorError, Result};
use crate::SAMPLE_RATE;

/// Length of the analysis window.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Window {
    /// Fixed length in seconds
    Duration(f64),
    /// Whole periods of the fundamental
    Periods(u32),
}

/// Which [`Normalization`] to apply; `PerPeriod` takes its period from the
/// scene's fundamental.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationKind {
    PerPeriod,
    PerDuration,
    RawSum,
}

impl NormalizationKind {
    pub const ALL: [NormalizationKind; 3] = [
        NormalizationKind::PerPeriod,
        NormalizationKind::PerDuration,
        NormalizationKind::RawSum,
    ];

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&k| k == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

/// Named parameter sets, one per demonstration.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    /// Two seconds of a cosine, averaged over the window
    MeasuringFrequency,
    /// Exactly one period of a cosine, averaged over that period
    SinglePeriod,
    /// Square wave: odd harmonics only
    SquareWave,
    /// Sawtooth: every harmonic
    SawtoothWave,
    /// Narrow rectangle approaching a Dirac impulse
    DiracRect,
    /// Narrow triangle approaching a Dirac impulse
    DiracTri,
    /// Narrow sinc approaching a Dirac impulse
    DiracSinc,
}

impl Demo {
    pub const ALL: [Demo; 7] = [
        Demo::MeasuringFrequency,
        Demo::SinglePeriod,
        Demo::SquareWave,
        Demo::SawtoothWave,
        Demo::DiracRect,
        Demo::DiracTri,
        Demo::DiracSinc,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Demo::MeasuringFrequency => "Measuring frequency content",
            Demo::SinglePeriod => "Inner product over one period",
            Demo::SquareWave => "Harmonics of a square wave",
            Demo::SawtoothWave => "Harmonics of a sawtooth",
            Demo::DiracRect => "Dirac limit: rect",
            Demo::DiracTri => "Dirac limit: tri",
            Demo::DiracSinc => "Dirac limit: sinc",
        }
    }

    pub fn params(self) -> SceneParams {
        let base = SceneParams::default();
        match self {
            Demo::MeasuringFrequency => base,
            Demo::SinglePeriod => base
                .with_window(Window::Periods(1))
                .with_normalization(NormalizationKind::PerPeriod),
            Demo::SquareWave => base
                .with_waveform(WaveformKind::Square)
                .with_window(Window::Periods(2)),
            Demo::SawtoothWave => base
                .with_waveform(WaveformKind::Sawtooth)
                .with_window(Window::Periods(2)),
            Demo::DiracRect => base.dirac(WaveformKind::Rect),
            Demo::DiracTri => base.dirac(WaveformKind::Tri),
            Demo::DiracSinc => base.dirac(WaveformKind::Sinc),
        }
    }
}

/// Every adjustable input of one evaluation.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneParams {
    pub waveform: WaveformKind,
    /// Amplitude a (> 0)
    pub amplitude: f64,
    /// Fundamental f0 in Hz
    pub fundamental: f64,
    /// Initial phase phi in radians
    pub phase: f64,
    pub window: Window,
    /// Phasor frequency f in Hz, signed
    pub analysis_frequency: f64,
    /// Highlighted instant in seconds, clamped to the window
    pub time_stamp: f64,
    pub normalization: NormalizationKind,
    /// Pulse width in seconds (pulse kinds only)
    pub pulse_width: f64,
    /// Pulse center in seconds (pulse kinds only)
    pub pulse_center: f64,
    pub sample_rate: f64,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            waveform: WaveformKind::Cosine,
            amplitude: 1.0,
            fundamental: 1.0,
            phase: 0.0,
            window: Window::Duration(2.0),
            analysis_frequency: 1.0,
            time_stamp: 0.0,
            normalization: NormalizationKind::PerDuration,
            pulse_width: 0.1,
            pulse_center: 1.0,
            sample_rate: SAMPLE_RATE,
        }
    }
}

impl SceneParams {
    pub fn with_waveform(mut self, waveform: WaveformKind) -> Self {
        self.waveform = waveform;
        self
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn with_fundamental(mut self, fundamental: f64) -> Self {
        self.fundamental = fundamental;
        self
    }

    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_window(mut self, window: Window) -> Self {
        self.window = window;
        self
    }

    pub fn with_analysis_frequency(mut self, frequency: f64) -> Self {
        self.analysis_frequency = frequency;
        self
    }

    pub fn with_time_stamp(mut self, time_stamp: f64) -> Self {
        self.time_stamp = time_stamp;
        self
    }

    pub fn with_normalization(mut self, normalization: NormalizationKind) -> Self {
        self.normalization = normalization;
        self
    }

    /// Set pulse width and center.
    pub fn with_pulse(mut self, width: f64, center: f64) -> Self {
        self.pulse_width = width;
        self.pulse_center = center;
        self
    }

    fn dirac(self, kind: WaveformKind) -> Self {
        self.with_waveform(kind)
            .with_window(Window::Duration(2.0))
            .with_pulse(0.1, 1.0)
            .with_normalization(NormalizationKind::RawSum)
    }

    /// Time axis for this scene.
    pub fn grid(&self) -> Result<SampleGrid> {
        match self.window {
            Window::Duration(duration) => SampleGrid::new(0.0, duration, self.sample_rate),
            Window::Periods(periods) => {
                SampleGrid::from_periods(self.fundamental, periods, self.sample_rate)
            }
        }
    }

    pub fn waveform(&self) -> Result<Waveform> {
        if !(self.amplitude > 0.0) {
            return Err(PhasorError::InvalidAmplitude(self.amplitude));
        }
        Waveform::from_kind(
            self.waveform,
            self.amplitude,
            self.fundamental,
            self.phase,
            self.pulse_width,
            self.pulse_center,
        )
    }

    pub fn normalization(&self) -> Normalization {
        match self.normalization {
            NormalizationKind::PerPeriod => Normalization::PerPeriod {
                fundamental: self.fundamental,
            },
            NormalizationKind::PerDuration => Normalization::PerDuration,
            NormalizationKind::RawSum => Normalization::RawSum,
        }
    }

    /// Run the whole pipeline for these parameters.
    pub fn evaluate(&self) -> Result<Evaluation> {
        let grid = self.grid()?;
        let waveform = self.waveform()?;
        let analysis_frequency = ensure_finite("f", self.analysis_frequency)?;

        let signal = waveform.generate(&grid);
        let correlation = correlate(&signal, &grid, analysis_frequency, self.normalization())?;
        let highlight = correlation.highlight(self.time_stamp)?;
        let phasor = phasor(&grid, analysis_frequency);

        tracing::debug!(
            waveform = self.waveform.name(),
            samples = grid.len(),
            magnitude = correlation.scalar.magnitude(),
            argument = correlation.scalar.argument(),
            "evaluated scene"
        );

        Ok(Evaluation {
            params: *self,
            grid,
            signal,
            phasor,
            correlation,
            highlight,
        })
    }
}

/// Everything one evaluation produces for the renderer.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub params: SceneParams,
    pub grid: SampleGrid,
    /// Real signal, one value per grid point
    pub signal: Vec<f64>,
    /// Reference phasor e^{-j2πft}, one value per grid point
    pub phasor: Vec<Complex64>,
    pub correlation: Correlation,
    pub highlight: Highlight,
}

impl Evaluation {
    /// Scalar product in polar form.
    pub fn scalar_polar(&self) -> Polar {
        self.correlation.scalar.polar()
    }

    /// Polar trace of the product.
    pub fn product_polar(&self) -> Vec<Polar> {
        self.correlation.product.polar()
    }

    /// `(time, value)` pairs of the signal, ready for a line plot.
    pub fn signal_points(&self) -> Vec<(f64, f64)> {
        self.grid.times().zip(self.signal.iter().copied()).collect()
    }
}
