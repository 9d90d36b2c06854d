use crate::lattice::Lattice;
use rand::Rng;

/// Boltzmann constant in rescaled units.
const K_B: f64 = 1.0;

/// Returned by [`attempt_flip`], allows O(1) book-keeping in the driver.
///
/// On rejection both deltas are zero.
#[derive(Debug, Clone, Copy)]
pub struct StepInfo {
    pub accepted: bool,
    pub delta_e: f64,
    pub delta_m: f64,
}

/// One Metropolis-Hastings trial: pick a site uniformly at random, compute
/// the energy change of flipping it, and accept or reject.
///
/// `ΔE = 2·J·s·Σ_nbr + 2·H·s`. The generic rule accepts on `ΔE ≤ 0` and
/// otherwise with probability `exp(-ΔE / k_B T)` against one uniform draw.
/// At `t == 0` the rule is strict `ΔE < 0`: degenerate moves must not flip,
/// so an ordered ground state stays a fixed point.
pub fn attempt_flip(
    lattice: &mut Lattice,
    t: f64,
    j: f64,
    h: f64,
    rng: &mut impl Rng,
) -> StepInfo {
    let n = lattice.n();
    let x = rng.gen_range(0..n);
    let y = rng.gen_range(0..n);

    let spin = lattice.spin(x, y) as f64;
    let neighbors = lattice.neighbor_sum(x, y) as f64;
    let delta_e = 2.0 * j * spin * neighbors + 2.0 * h * spin;

    let accept = if t == 0.0 {
        delta_e < 0.0
    } else if delta_e <= 0.0 {
        true
    } else {
        // ΔE > 0 here, so the argument is strictly negative; the cap keeps
        // any parameter combination from reaching exp overflow.
        let arg = (-delta_e / (K_B * t)).min(0.0);
        rng.gen::<f64>() < arg.exp()
    };

    if accept {
        lattice.flip(x, y);
        StepInfo {
            accepted: true,
            delta_e,
            delta_m: -2.0 * spin,
        }
    } else {
        StepInfo {
            accepted: false,
            delta_e: 0.0,
            delta_m: 0.0,
        }
    }
}

/// One lattice sweep: N² independent trials, each with a freshly drawn
/// random site (sites may repeat or be skipped within a sweep). Returns the
/// accumulated (ΔE, ΔM) over the sweep.
pub fn sweep(lattice: &mut Lattice, t: f64, j: f64, h: f64, rng: &mut impl Rng) -> (f64, f64) {
    let trials = lattice.sites();
    let mut delta_e = 0.0;
    let mut delta_m = 0.0;
    for _ in 0..trials {
        let info = attempt_flip(lattice, t, j, h, rng);
        delta_e += info.delta_e;
        delta_m += info.delta_m;
    }
    (delta_e, delta_m)
}
