use crate::error::{ensure_finite, PhasorError, Result};

/*
Sample Grid
===========

Every array in the engine is aligned to the same time axis:

    t[i] = t_start + i / fe        for i = 0, 1, ..., n-1
    n    = round(dur * fe)

The grid covers the half-open window [t_start, t_start + dur). The last
sample sits one step before the end, so a window of exactly one period
holds exactly one period of samples and the rectangle rule sums each
point of the cycle once.

    fe = 4, dur = 1
    |----|----|----|----|
    t0   t1   t2   t3   (t_start + dur, not sampled)


Time Stamps
-----------

A time stamp picks one instant to highlight on every plot. It maps to the
grid index whose sample is the last one at or before the stamp:

    k = floor((time_stamp - t_start) * fe),  clamped to [0, n-1]

so that t[k] <= time_stamp < t[k] + 1/fe. A small tolerance keeps stamps
that land on a grid point (0.3 s at 10 kHz is 2999.9999999999995 samples
in floating point) on that grid point.
*/

/// Largest grid the engine builds (about 28 minutes at 10 kHz).
pub const MAX_SAMPLES: usize = 1 << 24;

/// Tolerance, in samples, when snapping a time stamp onto the grid.
const SNAP_TOLERANCE: f64 = 1e-9;

/// Evenly spaced time axis shared by the signal, phasor and product arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    t_start: f64,
    duration: f64,
    sample_rate: f64,
    len: usize,
}

/// One highlighted instant, snapped onto a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeStamp {
    /// Grid index of the highlighted sample
    pub index: usize,
    /// Time of that sample in seconds
    pub time: f64,
}

impl SampleGrid {
    /// Build a grid over `[t_start, t_start + duration)` at `sample_rate`.
    pub fn new(t_start: f64, duration: f64, sample_rate: f64) -> Result<Self> {
        let t_start = ensure_finite("t_start", t_start)?;
        if !(duration.is_finite() && duration > 0.0) {
            return Err(PhasorError::InvalidDuration(duration));
        }
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(PhasorError::InvalidSampleRate(sample_rate));
        }

        let samples = (duration * sample_rate).round();
        if !(samples <= MAX_SAMPLES as f64) {
            return Err(PhasorError::TooManySamples {
                duration,
                sample_rate,
                limit: MAX_SAMPLES,
            });
        }
        let len = samples as usize;
        if len == 0 {
            return Err(PhasorError::EmptyGrid {
                duration,
                sample_rate,
            });
        }

        Ok(Self {
            t_start,
            duration,
            sample_rate,
            len,
        })
    }

    /// Build a grid starting at 0 that spans `periods` cycles of `fundamental`.
    pub fn from_periods(fundamental: f64, periods: u32, sample_rate: f64) -> Result<Self> {
        let fundamental = ensure_finite("f0", fundamental)?;
        if periods == 0 {
            return Err(PhasorError::InvalidPeriods(periods));
        }
        if fundamental == 0.0 {
            return Err(PhasorError::ZeroFundamental { periods });
        }
        Self::new(0.0, periods as f64 / fundamental.abs(), sample_rate)
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: construction rejects empty windows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn t_start(&self) -> f64 {
        self.t_start
    }

    /// Requested window length in seconds.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    #[inline]
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Integration step (1 / fe).
    #[inline]
    pub fn step(&self) -> f64 {
        1.0 / self.sample_rate
    }

    /// Time of sample `index`.
    #[inline]
    pub fn time(&self, index: usize) -> f64 {
        self.t_start + index as f64 / self.sample_rate
    }

    /// Iterate over all sample times.
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(move |i| self.time(i))
    }

    /// Index of the last sample at or before `time_stamp`, clamped to the grid.
    pub fn index_at(&self, time_stamp: f64) -> Result<usize> {
        let time_stamp = ensure_finite("time_stamp", time_stamp)?;
        let position = (time_stamp - self.t_start) * self.sample_rate;
        if position <= 0.0 {
            return Ok(0);
        }
        let index = (position + SNAP_TOLERANCE).floor() as usize;
        Ok(index.min(self.len - 1))
    }

    /// Snap `time_stamp` onto the grid.
    pub fn stamp(&self, time_stamp: f64) -> Result<TimeStamp> {
        let index = self.index_at(time_stamp)?;
        Ok(TimeStamp {
            index,
            time: self.time(index),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_count_rounds_duration() {
        let grid = SampleGrid::new(0.0, 2.0, 10_000.0).unwrap();
        assert_eq!(grid.len(), 20_000);
        assert!((grid.time(15_000) - 1.5).abs() < 1e-12);
        assert!((grid.step() - 1e-4).abs() < 1e-15);
    }

    #[test]
    fn times_follow_start_offset() {
        let grid = SampleGrid::new(-0.5, 1.0, 4.0).unwrap();
        let times: Vec<f64> = grid.times().collect();
        assert_eq!(times, vec![-0.5, -0.25, 0.0, 0.25]);
    }

    #[test]
    fn from_periods_spans_whole_cycles() {
        let grid = SampleGrid::from_periods(4.0, 3, 10_000.0).unwrap();
        assert!((grid.duration() - 0.75).abs() < 1e-12);
        assert_eq!(grid.len(), 7_500);
    }

    #[test]
    fn rejects_bad_windows() {
        assert_eq!(
            SampleGrid::new(0.0, 0.0, 10_000.0),
            Err(PhasorError::InvalidDuration(0.0))
        );
        assert_eq!(
            SampleGrid::new(0.0, 1.0, -1.0),
            Err(PhasorError::InvalidSampleRate(-1.0))
        );
        assert!(matches!(
            SampleGrid::new(0.0, 1e-6, 10_000.0),
            Err(PhasorError::EmptyGrid { .. })
        ));
        assert_eq!(
            SampleGrid::from_periods(0.0, 1, 10_000.0),
            Err(PhasorError::ZeroFundamental { periods: 1 })
        );
        assert_eq!(
            SampleGrid::from_periods(1.0, 0, 10_000.0),
            Err(PhasorError::InvalidPeriods(0))
        );
    }

    #[test]
    fn rejects_windows_too_long_to_allocate() {
        assert_eq!(
            SampleGrid::new(0.0, 1e300, 10_000.0),
            Err(PhasorError::TooManySamples {
                duration: 1e300,
                sample_rate: 10_000.0,
                limit: MAX_SAMPLES,
            })
        );
        assert!(matches!(
            SampleGrid::new(0.0, 1.0, f64::MAX),
            Err(PhasorError::TooManySamples { .. })
        ));
        let at_limit = SampleGrid::new(0.0, MAX_SAMPLES as f64, 1.0).unwrap();
        assert_eq!(at_limit.len(), MAX_SAMPLES);
    }

    #[test]
    fn index_snaps_to_grid_points() {
        let grid = SampleGrid::new(0.0, 1.0, 10_000.0).unwrap();
        assert_eq!(grid.index_at(0.3).unwrap(), 3_000);
        assert_eq!(grid.index_at(0.00015).unwrap(), 1);
        assert_eq!(grid.index_at(0.0).unwrap(), 0);
    }

    #[test]
    fn index_clamps_outside_window() {
        let grid = SampleGrid::new(0.0, 1.0, 10_000.0).unwrap();
        assert_eq!(grid.index_at(-3.0).unwrap(), 0);
        assert_eq!(grid.index_at(1.0).unwrap(), 9_999);
        assert_eq!(grid.index_at(42.0).unwrap(), 9_999);
        assert!(grid.index_at(f64::NAN).is_err());
    }

    #[test]
    fn stamp_reports_grid_time() {
        let grid = SampleGrid::new(1.0, 1.0, 100.0).unwrap();
        let stamp = grid.stamp(1.257).unwrap();
        assert_eq!(stamp.index, 25);
        assert!((stamp.time - 1.25).abs() < 1e-12);
    }
}
