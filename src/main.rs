//! Temperature × drive-frequency scan of the field-driven 2D Ising lattice
//! (see `GridConfig` for all run parameters).

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use ising_scan::config::GridConfig;
use ising_scan::results::{write_cells_csv, ScanRecord};
use ising_scan::sweep::run_grid;
use std::path::PathBuf;

/// Small CLI helper; everything physical lives in `GridConfig`.
#[derive(Parser)]
struct Cli {
    /// JSON document consumed by the plotting pipeline
    #[arg(long, default_value = "ising_scan_data.json")]
    json: PathBuf,
    /// Flat CSV row dump of the same cells
    #[arg(long, default_value = "ising_scan_results.csv")]
    csv: PathBuf,
    /// Master seed for the per-cell RNG streams
    #[arg(long, default_value_t = 0x5EED_1513)]
    seed: u64,
    /// Lattice edge length override
    #[arg(long)]
    size: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = GridConfig::default();
    if let Some(n) = cli.size {
        cfg.n = n;
    }
    cfg.validate()?;
    println!("Configuration:\n{cfg:#?}");

    let total_cells = cfg.frequencies.len() * cfg.temperatures.len();
    let bar = ProgressBar::new(total_cells as u64);
    bar.set_style(ProgressStyle::with_template(
        " {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}]",
    )?);

    let cells = run_grid(&cfg, cli.seed, || bar.inc(1));
    bar.finish();

    let record = ScanRecord::from_cells(&cfg, &cells);
    record.write_json(&cli.json)?;
    write_cells_csv(&cells, &cli.csv)?;

    println!(
        "Scan complete → {} / {}",
        cli.json.display(),
        cli.csv.display()
    );
    Ok(())
}
