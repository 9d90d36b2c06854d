//! Welford accumulator against direct two-pass computation.

use ising_scan::stats::{OnlineStats, RunningMean};

#[test]
fn welford_matches_two_pass() {
    let data = [1.2, 3.4, 2.2, 5.0, 4.1];
    let mut stats = OnlineStats::default();
    for &x in &data {
        stats.push(x);
    }

    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let var = data.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / n;

    assert!((stats.mean() - mean).abs() < 1e-12);
    assert!((stats.var() - var).abs() < 1e-12);
    assert!((stats.std() - var.sqrt()).abs() < 1e-12);
}

#[test]
fn variance_uses_the_population_denominator() {
    let mut stats = OnlineStats::default();
    for x in [1.0, 2.0, 3.0, 4.0] {
        stats.push(x);
    }
    assert!((stats.mean() - 2.5).abs() < 1e-12);
    assert!((stats.var() - 1.25).abs() < 1e-12);
}

#[test]
fn empty_and_single_sample_edge_cases() {
    let empty = OnlineStats::default();
    assert!(empty.is_empty());
    assert_eq!(empty.len(), 0);
    assert_eq!(empty.var(), 0.0);
    assert_eq!(empty.std(), 0.0);

    let mut single = OnlineStats::default();
    single.push(7.5);
    assert_eq!(single.mean(), 7.5);
    assert_eq!(single.std(), 0.0, "one sample has no spread");
}

#[test]
fn running_mean_tracks_sum_and_count() {
    let mut run = RunningMean::default();
    assert_eq!(run.mean(), 0.0);
    assert_eq!(run.count(), 0);

    for x in [2.0, 4.0, 9.0] {
        run.push(x);
    }
    assert_eq!(run.count(), 3);
    assert!((run.mean() - 5.0).abs() < 1e-12);
}
