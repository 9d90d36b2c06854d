use crate::config::{GridConfig, ScheduleConfig};
use crate::field::FieldSchedule;
use crate::lattice::{self, Lattice};
use crate::metropolis;
use crate::stats::{OnlineStats, RunningMean};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use std::sync::Mutex;

/// Mean and replicate spread of one observable.
#[derive(Debug, Clone, Copy)]
pub struct Stat {
    pub mean: f64,
    pub std: f64,
}

/// Aggregated observables for one (drive, temperature) grid cell.
/// Energy and magnetization are extensive (whole-lattice) values.
#[derive(Debug, Clone, Copy)]
pub struct CellResult {
    pub drive: f64,
    pub temperature: f64,
    pub energy: Option<Stat>,
    pub magnetization: Option<Stat>,
}

/// Deterministic per-lane RNG derived from the master seed via a splitmix
/// round, so parallel units never share a stream.
pub fn lane_rng(master: u64, lane: u64) -> ChaCha20Rng {
    let mut x = master ^ lane.wrapping_mul(0x9E3779B97F4A7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D049BB133111EB);
    ChaCha20Rng::seed_from_u64(x ^ (x >> 31))
}

/// One (ω, T) cell: `replicates` independent runs of thermalize-then-measure,
/// aggregated into mean and spread per observable.
///
/// Every replicate starts from a fresh lattice. During thermalization the
/// drive is evaluated at the raw step index; during measurement the index is
/// offset by the thermalization count so the drive phase continues across
/// the boundary instead of resetting. Sampling happens every 10th sweep via
/// full recomputation.
///
/// T = 0 skips the dynamics entirely: spin flips freeze and the sampled
/// values are the closed-form ground-state constants (`−2N²J − N²H` and
/// `N²` for a settled drive; `−2N²J` when the drive oscillates forever).
pub fn run_cell(cfg: &GridConfig, omega: f64, t: f64, rng: &mut ChaCha20Rng) -> CellResult {
    let field = FieldSchedule::sinusoidal(cfg.amplitude, omega);
    let mut e_stats = OnlineStats::default();
    let mut m_stats = OnlineStats::default();

    for _ in 0..cfg.replicates {
        if t == 0.0 {
            let e = if omega == 0.0 {
                lattice::ground_state_energy(cfg.n, cfg.coupling, cfg.amplitude)
            } else {
                lattice::ground_state_energy(cfg.n, cfg.coupling, 0.0)
            };
            e_stats.push(e);
            m_stats.push(lattice::ground_state_magnetization(cfg.n));
            continue;
        }

        let mut lat = Lattice::new_with(rng, cfg.n, cfg.init);

        for step in 0..cfg.thermalization {
            let h = field.at(step);
            metropolis::sweep(&mut lat, t, cfg.coupling, h, rng);
        }

        let steps = field.measurement_steps(cfg.measurement);
        let mut e_run = RunningMean::default();
        let mut m_run = RunningMean::default();
        for step in 0..steps {
            let h = field.at(step + cfg.thermalization);
            metropolis::sweep(&mut lat, t, cfg.coupling, h, rng);
            if step % 10 == 0 {
                if cfg.observable.wants_energy() {
                    e_run.push(lat.total_energy(cfg.coupling, h));
                }
                if cfg.observable.wants_magnetization() {
                    let m = if cfg.abs_magnetization {
                        lat.abs_magnetization()
                    } else {
                        lat.magnetization()
                    };
                    m_run.push(m);
                }
            }
        }

        if cfg.observable.wants_energy() {
            e_stats.push(e_run.mean());
        }
        if cfg.observable.wants_magnetization() {
            m_stats.push(m_run.mean());
        }
    }

    CellResult {
        drive: omega,
        temperature: t,
        energy: cfg.observable.wants_energy().then(|| Stat {
            mean: e_stats.mean(),
            std: e_stats.std(),
        }),
        magnetization: cfg.observable.wants_magnetization().then(|| Stat {
            mean: m_stats.mean(),
            std: m_stats.std(),
        }),
    }
}

/// Full (ω, T) grid scan, parallel over frequencies. Cells are independent
/// (each owns its lattice and its RNG stream), so no locking beyond the
/// result sink is needed. `progress` fires once per finished cell.
pub fn run_grid<F>(cfg: &GridConfig, master_seed: u64, progress: F) -> Vec<CellResult>
where
    F: Fn() + Sync,
{
    let results: Mutex<Vec<CellResult>> =
        Mutex::new(Vec::with_capacity(cfg.frequencies.len() * cfg.temperatures.len()));

    cfg.frequencies.par_iter().enumerate().for_each(|(w_idx, &omega)| {
        for (t_idx, &t) in cfg.temperatures.iter().enumerate() {
            let lane = ((w_idx as u64) << 32) | t_idx as u64;
            let mut rng = lane_rng(master_seed, lane);
            let cell = run_cell(cfg, omega, t, &mut rng);
            results.lock().unwrap().push(cell);
            progress();
        }
    });

    // Sort for deterministic record order.
    let mut cells = results.into_inner().unwrap();
    cells.sort_by(|a, b| {
        a.drive
            .partial_cmp(&b.drive)
            .unwrap()
            .then(a.temperature.partial_cmp(&b.temperature).unwrap())
    });
    cells
}

/// How a monotonic schedule samples each temperature point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sampling {
    /// Observe the lattice once after the point's trials (cooling curves).
    EndState,
    /// Time-average the incrementally tracked running totals over every
    /// trial of the point (heating curves).
    TimeAverage,
}

/// One point of a monotonic schedule run, per-spin (intensive) values.
#[derive(Debug, Clone, Copy)]
pub struct SchedulePoint {
    pub temperature: f64,
    pub energy_per_spin: f64,
    pub magnetization_per_spin: f64,
}

/// Monotonic cooling/heating continuation at one static field value: a
/// single lattice persists across the whole temperature sequence, with
/// `steps_per_temp` raw single-site trials at each point.
///
/// The time-averaged mode seeds its running totals from one full
/// recomputation and then tracks the engine's per-trial deltas, so its
/// output doubles as a production check of the incremental bookkeeping.
pub fn run_schedule<F>(
    cfg: &ScheduleConfig,
    sampling: Sampling,
    h: f64,
    rng: &mut ChaCha20Rng,
    progress: F,
) -> Vec<SchedulePoint>
where
    F: Fn(),
{
    let sites = (cfg.n * cfg.n) as f64;
    let mut lat = Lattice::new_with(rng, cfg.n, cfg.init);
    let mut points = Vec::with_capacity(cfg.temperatures.len());

    match sampling {
        Sampling::EndState => {
            for &t in &cfg.temperatures {
                for _ in 0..cfg.steps_per_temp {
                    metropolis::attempt_flip(&mut lat, t, cfg.coupling, h, rng);
                }
                points.push(SchedulePoint {
                    temperature: t,
                    energy_per_spin: lat.energy_per_spin(cfg.coupling, h),
                    magnetization_per_spin: lat.magnetization_per_spin(),
                });
                progress();
            }
        }
        Sampling::TimeAverage => {
            let mut energy = lat.total_energy(cfg.coupling, h);
            let mut mag = lat.magnetization();
            for &t in &cfg.temperatures {
                let mut e_total = 0.0;
                let mut m_total = 0.0;
                for _ in 0..cfg.steps_per_temp {
                    let info = metropolis::attempt_flip(&mut lat, t, cfg.coupling, h, rng);
                    energy += info.delta_e;
                    mag += info.delta_m;
                    e_total += energy;
                    m_total += mag;
                }
                let denom = cfg.steps_per_temp as f64 * sites;
                points.push(SchedulePoint {
                    temperature: t,
                    energy_per_spin: e_total / denom,
                    magnetization_per_spin: m_total / denom,
                });
                progress();
            }
        }
    }

    points
}
