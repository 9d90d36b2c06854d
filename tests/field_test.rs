//! Drive schedule semantics, including the ω = 0 fallback and whole-period
//! measurement rounding.

use ising_scan::field::FieldSchedule;
use std::f64::consts::TAU;

#[test]
fn constant_mode_is_flat() {
    let drive = FieldSchedule::constant(0.1);
    for step in [0, 1, 10, 12_345] {
        assert_eq!(drive.at(step), 0.1);
    }
}

#[test]
fn zero_omega_sinusoidal_falls_back_to_constant() {
    // sin(0·step) would silently zero the field; the static amplitude must
    // win instead.
    let drive = FieldSchedule::sinusoidal(0.1, 0.0);
    for step in [0, 1, 500] {
        assert_eq!(drive.at(step), 0.1);
    }
    assert_eq!(drive.omega(), 0.0);
}

#[test]
fn sinusoidal_tracks_the_sine() {
    let drive = FieldSchedule::sinusoidal(0.1, 0.05);
    for step in [0usize, 1, 17, 400] {
        let expected = 0.1 * (0.05 * step as f64).sin();
        assert!((drive.at(step) - expected).abs() < 1e-15);
    }
}

#[test]
fn phase_continues_across_an_offset() {
    // Offsetting the step index by the thermalization count keeps the drive
    // on the same trajectory instead of restarting at phase zero.
    let drive = FieldSchedule::sinusoidal(0.1, 0.02);
    let thermalization = 5_000;
    for k in [0usize, 3, 99] {
        let expected = 0.1 * (0.02 * (thermalization + k) as f64).sin();
        assert!((drive.at(thermalization + k) - expected).abs() < 1e-15);
    }
}

#[test]
fn period_form_matches_angular_frequency() {
    let drive = FieldSchedule::with_period(0.1, 50.0);
    assert!((drive.omega() - TAU / 50.0).abs() < 1e-15);
    // Half a period lands on sin(π) ≈ 0.
    assert!(drive.at(25).abs() < 1e-12);
}

#[test]
fn measurement_steps_cover_whole_periods() {
    // Period 628: 5000 requested steps hold only 7 full periods, so the
    // 10-period floor kicks in.
    assert_eq!(FieldSchedule::sinusoidal(0.1, 0.01).measurement_steps(5_000), 6_280);
    // Period 125 divides 5000 exactly into 40 periods.
    assert_eq!(FieldSchedule::sinusoidal(0.1, 0.05).measurement_steps(5_000), 5_000);
    // Static drives keep the requested count.
    assert_eq!(FieldSchedule::constant(0.1).measurement_steps(5_000), 5_000);
    assert_eq!(FieldSchedule::sinusoidal(0.1, 0.0).measurement_steps(5_000), 5_000);
}
