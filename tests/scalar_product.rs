use phasor_lab::{
    analysis::{correlate, Normalization},
    dsp::{
        grid::SampleGrid,
        pulse::{sincard, PulseShape},
        waveform::{generate, Waveform, WaveformKind},
    },
    SAMPLE_RATE,
};
use std::f64::consts::PI;

fn one_period(kind: WaveformKind, amplitude: f64, f0: f64, phase: f64) -> (SampleGrid, Vec<f64>) {
    let grid = SampleGrid::from_periods(f0, 1, SAMPLE_RATE).unwrap();
    let signal = generate(kind, &grid, amplitude, f0, phase).unwrap();
    (grid, signal)
}

#[test]
fn cosine_is_orthogonal_to_other_integer_frequencies() {
    let f0 = 2.0;
    let (grid, x) = one_period(WaveformKind::Cosine, 1.4, f0, 0.0);
    let norm = Normalization::PerPeriod { fundamental: f0 };
    for f in -10..=10 {
        let f = f as f64 * f0;
        let scal = correlate(&x, &grid, f, norm).unwrap().scalar;
        let expected = if f.abs() == f0 { 0.7 } else { 0.0 };
        assert!(
            (scal.magnitude() - expected).abs() < 1e-6,
            "f = {f}: |scal| = {}",
            scal.magnitude()
        );
    }
}

#[test]
fn argument_recovers_phase() {
    for &phi in &[-3.0, -1.2, 0.0, 0.7, 2.9] {
        let (grid, x) = one_period(WaveformKind::Cosine, 1.0, 3.0, phi);
        let scal = correlate(&x, &grid, 3.0, Normalization::PerPeriod { fundamental: 3.0 })
            .unwrap()
            .scalar;
        assert!((scal.argument() - phi).abs() < 1e-6, "phi {phi} -> {}", scal.argument());

        // The mirrored line carries the conjugate phase.
        let mirrored = correlate(&x, &grid, -3.0, Normalization::PerPeriod { fundamental: 3.0 })
            .unwrap()
            .scalar;
        assert!((mirrored.argument() + phi).abs() < 1e-6);
    }
}

#[test]
fn raw_sum_is_linear_in_period_count() {
    let f0 = 1.0;
    let single = SampleGrid::from_periods(f0, 1, SAMPLE_RATE).unwrap();
    let triple = SampleGrid::from_periods(f0, 3, SAMPLE_RATE).unwrap();
    for kind in [WaveformKind::Cosine, WaveformKind::Square, WaveformKind::Sawtooth] {
        let x1 = generate(kind, &single, 1.0, f0, 0.4).unwrap();
        let x3 = generate(kind, &triple, 1.0, f0, 0.4).unwrap();
        let s1 = correlate(&x1, &single, 1.0, Normalization::RawSum).unwrap().scalar;
        let s3 = correlate(&x3, &triple, 1.0, Normalization::RawSum).unwrap().scalar;
        assert!(
            (s3.value - s1.value * 3.0).norm() < 1e-6,
            "{kind:?}: {} vs 3 x {}",
            s3.value,
            s1.value
        );
    }
}

#[test]
fn sincard_is_stable_at_origin() {
    assert_eq!(sincard(0.0), 1.0);
    let mut previous = sincard(-1e-3);
    for i in -999..=1000 {
        let value = sincard(i as f64 * 1e-6);
        assert!(!value.is_nan());
        assert!((value - previous).abs() < 1e-5);
        previous = value;
    }
}

#[test]
fn time_stamps_land_on_the_sample_before() {
    let grid = SampleGrid::new(0.0, 2.0, SAMPLE_RATE).unwrap();
    let step = grid.step();
    for &ts in &[0.0, 0.00005, 0.1234567, 0.3, 1.0, 1.99995, 1.9999] {
        let k = grid.index_at(ts).unwrap();
        assert!(k < grid.len());
        let t = grid.time(k);
        assert!(t <= ts + 1e-12, "t[{k}] = {t} > {ts}");
        assert!(ts < t + step, "{ts} beyond t[{k}] + step");
    }
}

#[test]
fn unit_cosine_scenario() {
    let grid = SampleGrid::new(0.0, 1.0, 10_000.0).unwrap();
    let x = generate(WaveformKind::Cosine, &grid, 1.0, 1.0, 0.0).unwrap();
    let norm = Normalization::PerPeriod { fundamental: 1.0 };

    let on = correlate(&x, &grid, 1.0, norm).unwrap().scalar;
    assert!((on.re() - 0.5).abs() < 1e-6);
    assert!(on.im().abs() < 1e-6);
    assert!((on.magnitude() - 0.5).abs() < 1e-6);
    assert!(on.argument().abs() < 1e-6);

    let off = correlate(&x, &grid, 2.0, norm).unwrap().scalar;
    assert!(off.re().abs() < 1e-6 && off.im().abs() < 1e-6);
}

#[test]
fn square_wave_has_only_odd_harmonics() {
    let (grid, x) = one_period(WaveformKind::Square, 1.0, 1.0, 0.0);
    let norm = Normalization::PerPeriod { fundamental: 1.0 };
    let at = |f: f64| correlate(&x, &grid, f, norm).unwrap().scalar.magnitude();

    assert!((at(1.0) - 2.0 / PI).abs() < 2e-3);
    assert!((at(3.0) - 2.0 / (3.0 * PI)).abs() < 2e-3);
    assert!(at(2.0) < 2e-3);
    assert!(at(4.0) < 2e-3);
}

#[test]
fn sawtooth_has_every_harmonic() {
    let (grid, x) = one_period(WaveformKind::Sawtooth, 1.0, 1.0, 0.0);
    let norm = Normalization::PerPeriod { fundamental: 1.0 };
    for n in 1..=4 {
        let f = n as f64;
        let mag = correlate(&x, &grid, f, norm).unwrap().scalar.magnitude();
        assert!((mag - 1.0 / (PI * f)).abs() < 1e-3, "harmonic {n}: {mag}");
    }
}

#[test]
fn narrow_pulses_correlate_with_every_frequency() {
    let grid = SampleGrid::new(0.0, 1.0, SAMPLE_RATE).unwrap();
    for shape in [PulseShape::Rect, PulseShape::Tri] {
        let pulse = Waveform::pulse(shape, 1.0, 0.002, 0.25).unwrap();
        let x = pulse.generate(&grid);
        for f in [0.0, 1.0, 5.0, -7.0] {
            let scal = correlate(&x, &grid, f, Normalization::RawSum).unwrap().scalar;
            assert!(
                (scal.magnitude() - 1.0).abs() < 0.06,
                "{shape:?} at {f} Hz: {}",
                scal.magnitude()
            );
        }
        // Delay by a quarter second at 1 Hz is a quarter turn clockwise.
        let quarter = correlate(&x, &grid, 1.0, Normalization::RawSum).unwrap().scalar;
        assert!((quarter.argument() + PI / 2.0).abs() < 0.05);
    }
}
