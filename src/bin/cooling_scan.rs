//! Monotonic cooling schedule: one lattice per field value, carried from
//! T = 10 down to T = 0.1, sampling the end state at every temperature.

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use ising_scan::config::{linspace, ScheduleConfig};
use ising_scan::lattice::SpinInit;
use ising_scan::results::ScheduleRecord;
use ising_scan::sweep::{lane_rng, run_schedule, Sampling};
use std::path::PathBuf;

#[derive(Parser)]
struct Cli {
    /// JSON document consumed by the plotting pipeline
    #[arg(long, default_value = "cooling_results.json")]
    json: PathBuf,
    /// Flat CSV row dump of the same curves
    #[arg(long, default_value = "cooling_results.csv")]
    csv: PathBuf,
    /// Master seed for the per-field RNG streams
    #[arg(long, default_value_t = 0xC001_0FF)]
    seed: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = ScheduleConfig {
        n: 20,
        coupling: 1.0,
        fields: vec![0.0, 0.1, -0.1],
        temperatures: linspace(10.0, 0.1, 100),
        steps_per_temp: 100_000,
        init: SpinInit::Random,
    };
    cfg.validate()?;

    let bar = ProgressBar::new((cfg.fields.len() * cfg.temperatures.len()) as u64);
    bar.set_style(ProgressStyle::with_template(
        " {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}]",
    )?);

    let mut record = ScheduleRecord::new(
        cfg.n,
        cfg.coupling,
        cfg.steps_per_temp,
        cfg.temperatures.clone(),
    );
    for (idx, &field) in cfg.fields.iter().enumerate() {
        let mut rng = lane_rng(cli.seed, idx as u64);
        let points = run_schedule(&cfg, Sampling::EndState, field, &mut rng, || bar.inc(1));
        record.push_series(field, &points);
    }
    bar.finish();

    record.write_json(&cli.json)?;
    record.write_csv(&cli.csv)?;
    println!(
        "Cooling run complete → {} / {}",
        cli.json.display(),
        cli.csv.display()
    );
    Ok(())
}
