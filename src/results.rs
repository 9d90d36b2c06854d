use crate::config::GridConfig;
use crate::lattice;
use crate::sweep::{CellResult, SchedulePoint};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Scalar parameter block echoed into every record.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Parameters {
    #[serde(rename = "N")]
    pub n: usize,
    #[serde(rename = "J")]
    pub j: f64,
    #[serde(rename = "H_amp")]
    pub h_amp: f64,
    #[serde(rename = "Tc")]
    pub tc: f64,
}

/// The document handed to the external plotting process: per-frequency rows
/// of per-temperature means and replicate spreads, plus the analytic
/// reference constants. Observables the scan did not sample are omitted.
#[derive(Debug, Clone, Serialize)]
pub struct ScanRecord {
    pub temperatures: Vec<f64>,
    pub frequencies: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energies: Option<Vec<Vec<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_stds: Option<Vec<Vec<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnetizations: Option<Vec<Vec<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnetization_stds: Option<Vec<Vec<f64>>>,
    pub ground_state_energy: f64,
    pub ground_state_magnetization: f64,
    pub parameters: Parameters,
}

impl ScanRecord {
    /// Arrange sorted grid cells into the [frequency][temperature] matrices
    /// of the record. Cell drive/temperature values are taken verbatim from
    /// the configuration vectors, so index lookup by equality is exact.
    pub fn from_cells(cfg: &GridConfig, cells: &[CellResult]) -> Self {
        let nf = cfg.frequencies.len();
        let nt = cfg.temperatures.len();
        let wants_e = cfg.observable.wants_energy();
        let wants_m = cfg.observable.wants_magnetization();

        let matrix = || vec![vec![0.0; nt]; nf];
        let mut energies = matrix();
        let mut energy_stds = matrix();
        let mut magnetizations = matrix();
        let mut magnetization_stds = matrix();

        for cell in cells {
            let w = cfg
                .frequencies
                .iter()
                .position(|&w| w == cell.drive)
                .expect("cell drive missing from configuration");
            let t = cfg
                .temperatures
                .iter()
                .position(|&t| t == cell.temperature)
                .expect("cell temperature missing from configuration");
            if let Some(e) = cell.energy {
                energies[w][t] = e.mean;
                energy_stds[w][t] = e.std;
            }
            if let Some(m) = cell.magnetization {
                magnetizations[w][t] = m.mean;
                magnetization_stds[w][t] = m.std;
            }
        }

        Self {
            temperatures: cfg.temperatures.clone(),
            frequencies: cfg.frequencies.clone(),
            energies: wants_e.then_some(energies),
            energy_stds: wants_e.then_some(energy_stds),
            magnetizations: wants_m.then_some(magnetizations),
            magnetization_stds: wants_m.then_some(magnetization_stds),
            ground_state_energy: lattice::ground_state_energy(cfg.n, cfg.coupling, cfg.amplitude),
            ground_state_magnetization: lattice::ground_state_magnetization(cfg.n),
            parameters: Parameters {
                n: cfg.n,
                j: cfg.coupling,
                h_amp: cfg.amplitude,
                tc: lattice::CRITICAL_TEMPERATURE,
            },
        }
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        serde_json::to_writer(BufWriter::new(file), self)
            .with_context(|| format!("cannot serialize record to {}", path.display()))?;
        Ok(())
    }
}

/// Flat CSV dump of grid cells, one row per (frequency, temperature).
/// Unsampled observables leave their columns empty.
pub fn write_cells_csv(cells: &[CellResult], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = csv::WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("cannot create {}", path.display()))?;
    wtr.write_record(["frequency", "temperature", "mean_e", "std_e", "mean_m", "std_m"])?;
    for cell in cells {
        let (mean_e, std_e) = cell
            .energy
            .map(|s| (s.mean.to_string(), s.std.to_string()))
            .unwrap_or_default();
        let (mean_m, std_m) = cell
            .magnetization
            .map(|s| (s.mean.to_string(), s.std.to_string()))
            .unwrap_or_default();
        wtr.write_record(&[
            cell.drive.to_string(),
            cell.temperature.to_string(),
            mean_e,
            std_e,
            mean_m,
            std_m,
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// One field value's curve along the shared monotonic temperature sequence.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleSeries {
    pub field: f64,
    pub energy_per_spin: Vec<f64>,
    pub magnetization_per_spin: Vec<f64>,
}

/// Record of a cooling/heating run: one series per static field value.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleRecord {
    pub temperatures: Vec<f64>,
    pub series: Vec<ScheduleSeries>,
    #[serde(rename = "N")]
    pub n: usize,
    #[serde(rename = "J")]
    pub j: f64,
    pub steps_per_temp: usize,
    #[serde(rename = "Tc")]
    pub tc: f64,
}

impl ScheduleRecord {
    pub fn new(n: usize, j: f64, steps_per_temp: usize, temperatures: Vec<f64>) -> Self {
        Self {
            temperatures,
            series: Vec::new(),
            n,
            j,
            steps_per_temp,
            tc: lattice::CRITICAL_TEMPERATURE,
        }
    }

    pub fn push_series(&mut self, field: f64, points: &[SchedulePoint]) {
        self.series.push(ScheduleSeries {
            field,
            energy_per_spin: points.iter().map(|p| p.energy_per_spin).collect(),
            magnetization_per_spin: points.iter().map(|p| p.magnetization_per_spin).collect(),
        });
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        serde_json::to_writer(BufWriter::new(file), self)
            .with_context(|| format!("cannot serialize record to {}", path.display()))?;
        Ok(())
    }

    /// Flat CSV dump, one row per (field, temperature).
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut wtr = csv::WriterBuilder::new()
            .from_path(path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        wtr.write_record(["field", "temperature", "energy_per_spin", "magnetization_per_spin"])?;
        for series in &self.series {
            for (idx, &t) in self.temperatures.iter().enumerate() {
                wtr.write_record(&[
                    series.field.to_string(),
                    t.to_string(),
                    series.energy_per_spin[idx].to_string(),
                    series.magnetization_per_spin[idx].to_string(),
                ])?;
            }
        }
        wtr.flush()?;
        Ok(())
    }
}
