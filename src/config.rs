use crate::lattice::SpinInit;
use anyhow::{ensure, Result};

/// Which observables a scan samples. Both are O(N²) per sample; the flag
/// exists so a driver interested in one curve can skip the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observable {
    Energy,
    Magnetization,
    Both,
}

impl Observable {
    pub fn wants_energy(self) -> bool {
        matches!(self, Observable::Energy | Observable::Both)
    }

    pub fn wants_magnetization(self) -> bool {
        matches!(self, Observable::Magnetization | Observable::Both)
    }
}

/// Run-time configuration of the (frequency, temperature) grid scan
/// (single source of truth).
#[derive(Debug, Clone)]
pub struct GridConfig {
    /// Lattice edge length N.
    pub n: usize,
    /// Ferromagnetic coupling J > 0.
    pub coupling: f64,
    /// Drive amplitude H_amp.
    pub amplitude: f64,
    /// Angular frequencies ω of the drive; ω = 0 means a static field.
    pub frequencies: Vec<f64>,
    pub temperatures: Vec<f64>,
    /// Sweeps discarded before measuring.
    pub thermalization: usize,
    /// Measurement sweeps (rounded to whole drive periods when ω > 0).
    pub measurement: usize,
    /// Independent replicates per grid cell.
    pub replicates: usize,
    pub init: SpinInit,
    pub observable: Observable,
    /// Sample |M| (the order parameter) instead of the signed sum.
    pub abs_magnetization: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            n: 50,
            coupling: 1.0,
            amplitude: 0.1,
            frequencies: vec![0.0, 0.01, 0.02, 0.05],
            temperatures: segmented_temperatures(),
            thermalization: 5_000,
            measurement: 5_000,
            replicates: 5,
            init: SpinInit::Ordered,
            observable: Observable::Both,
            abs_magnetization: true,
        }
    }
}

impl GridConfig {
    /// Fail fast on malformed parameters, before any sweep starts.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.n > 0, "lattice size must be positive");
        ensure!(self.coupling > 0.0, "coupling J must be ferromagnetic (J > 0)");
        ensure!(!self.temperatures.is_empty(), "temperature set is empty");
        ensure!(!self.frequencies.is_empty(), "frequency set is empty");
        ensure!(self.replicates > 0, "need at least one replicate per cell");
        ensure!(self.measurement > 0, "need at least one measurement sweep");
        ensure!(
            self.temperatures.iter().all(|t| t.is_finite() && *t >= 0.0),
            "temperatures must be finite and non-negative"
        );
        ensure!(
            self.frequencies.iter().all(|w| w.is_finite() && *w >= 0.0),
            "frequencies must be finite and non-negative"
        );
        Ok(())
    }
}

/// Run-time configuration of a monotonic cooling/heating schedule.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    pub n: usize,
    pub coupling: f64,
    /// Static field values, one independent schedule run per value.
    pub fields: Vec<f64>,
    /// Monotonic temperature sequence; the lattice persists across points.
    pub temperatures: Vec<f64>,
    /// Raw single-site trials per temperature point (not whole sweeps).
    pub steps_per_temp: usize,
    pub init: SpinInit,
}

impl ScheduleConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.n > 0, "lattice size must be positive");
        ensure!(self.coupling > 0.0, "coupling J must be ferromagnetic (J > 0)");
        ensure!(!self.fields.is_empty(), "field set is empty");
        ensure!(!self.temperatures.is_empty(), "temperature sequence is empty");
        ensure!(self.steps_per_temp > 0, "need at least one trial per point");
        ensure!(
            self.temperatures.iter().all(|t| t.is_finite() && *t >= 0.0),
            "temperatures must be finite and non-negative"
        );
        let up = self.temperatures.windows(2).all(|w| w[1] >= w[0]);
        let down = self.temperatures.windows(2).all(|w| w[1] <= w[0]);
        ensure!(up || down, "schedule temperatures must be monotonic");
        Ok(())
    }
}

/// Evenly spaced points including both endpoints.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Production temperature grid: coarse at the cold end, dense through the
/// critical region, sorted with the shared segment endpoints deduplicated.
/// Includes T = 0 so the closed-form ground-state path is exercised.
pub fn segmented_temperatures() -> Vec<f64> {
    let mut t = Vec::new();
    t.extend(linspace(0.0, 0.5, 5));
    t.extend(linspace(0.5, 2.0, 15));
    t.extend(linspace(2.0, 4.0, 20));
    t.sort_by(|a, b| a.partial_cmp(b).unwrap());
    t.dedup();
    t
}
