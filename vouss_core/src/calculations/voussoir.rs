//! # Voussoir Beam Solver
//!
//! Solves one bed thickness: finds the equilibrium thrust arch that carries the
//! bed with the lowest peak compressive stress and derives its safety factors.
//!
//! ## Procedure
//!
//! For each deflection-ratio parameter `n` on the grid `n_step, 2·n_step, ..., 1`:
//!
//! 1. Compute the crown rise `zo` and the arch length `L`.
//! 2. Starting from `dl = 0`, iterate clearance → rise → `fm` → `fav` → `dl`
//!    until `dl` changes by no more than the tolerance.
//! 3. If the clearance drops to zero or below, the trial snaps through and is
//!    recorded as [`TrialState::Unstable`]. If the iteration cap is reached it is
//!    recorded as [`TrialState::NonConverged`].
//!
//! The admissible trial with the smallest `fm` wins; on a tie the smaller `n`
//! wins. When no trial is admissible the first trial is reported with
//! `fm = ∞`, which gives `fs_crush = 0` and `fs_sliding = ∞`.
//!
//! ## Example
//!
//! ```rust
//! use vouss_core::calculations::{solve, VoussoirConfig, VoussoirInput};
//!
//! let config = VoussoirConfig::from_input(&VoussoirInput::reference()).unwrap();
//! let result = solve(&config, 0.75).unwrap();
//!
//! assert!((result.n() - 0.70).abs() < 1e-9);
//! assert_eq!(result.buck_limit, 2);
//! println!("FS crushing: {:.2}", result.fs_crush);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::calculations::config::VoussoirConfig;
use crate::equations::{
    arc_length, arch_clearance, arch_rise, average_stress, crown_rise, crushing_safety_factor,
    elastic_shortening, midspan_deflection, peak_stress, sliding_safety_factor,
};
use crate::errors::VoussoirResult;
use crate::loads::effective_unit_weight;
use crate::units::MnPerM3;

/// Outcome of one `n` trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state")]
pub enum TrialState {
    /// Converged arch
    Valid {
        n: f64,
        zo: f64,
        z_chk: f64,
        z: f64,
        fm: f64,
        fav: f64,
        iterations: usize,
    },
    /// Clearance went non-positive (snap-through). `z` and `fav` are the last
    /// values computed before it happened.
    Unstable {
        n: f64,
        zo: f64,
        z_chk: f64,
        z: f64,
        fav: f64,
    },
    /// Iteration cap reached before the shortening settled
    NonConverged {
        n: f64,
        zo: f64,
        z_chk: f64,
        z: f64,
        fav: f64,
    },
}

impl TrialState {
    pub fn n(&self) -> f64 {
        match *self {
            TrialState::Valid { n, .. }
            | TrialState::Unstable { n, .. }
            | TrialState::NonConverged { n, .. } => n,
        }
    }

    pub fn zo(&self) -> f64 {
        match *self {
            TrialState::Valid { zo, .. }
            | TrialState::Unstable { zo, .. }
            | TrialState::NonConverged { zo, .. } => zo,
        }
    }

    pub fn z_chk(&self) -> f64 {
        match *self {
            TrialState::Valid { z_chk, .. }
            | TrialState::Unstable { z_chk, .. }
            | TrialState::NonConverged { z_chk, .. } => z_chk,
        }
    }

    pub fn z(&self) -> f64 {
        match *self {
            TrialState::Valid { z, .. }
            | TrialState::Unstable { z, .. }
            | TrialState::NonConverged { z, .. } => z,
        }
    }

    pub fn fav(&self) -> f64 {
        match *self {
            TrialState::Valid { fav, .. }
            | TrialState::Unstable { fav, .. }
            | TrialState::NonConverged { fav, .. } => fav,
        }
    }

    /// Peak stress factor; infinite for a trial that did not converge to an arch.
    pub fn fm(&self) -> f64 {
        match *self {
            TrialState::Valid { fm, .. } => fm,
            TrialState::Unstable { .. } | TrialState::NonConverged { .. } => f64::INFINITY,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, TrialState::Valid { .. })
    }

    /// Counts toward the buckling limit
    pub fn is_failed(&self) -> bool {
        !self.is_valid()
    }
}

/// Result of solving one bed thickness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    /// Bed thickness solved (m)
    pub thickness_m: f64,

    /// Effective unit weight γe (MN/m³)
    pub effective_unit_weight: MnPerM3,

    /// Trial with the minimum peak stress
    pub winner: TrialState,

    /// 1 + number of unstable or non-converged trials
    pub buck_limit: usize,

    /// Safety factor against crushing, (σc/2)/fm
    pub fs_crush: f64,

    /// Safety factor against abutment sliding
    pub fs_sliding: f64,

    /// Mid-span deflection zo − z (m)
    pub deflection: f64,

    /// Trials stopped by the iteration cap
    pub non_converged: usize,

    /// No admissible arch exists at this thickness
    pub total_instability: bool,

    /// Every trial, ascending in n
    #[serde(skip)]
    pub trials: Vec<TrialState>,
}

impl SolveResult {
    pub fn n(&self) -> f64 {
        self.winner.n()
    }

    pub fn fm(&self) -> f64 {
        self.winner.fm()
    }

    /// The lower of the crushing and sliding safety factors
    pub fn governing_safety_factor(&self) -> f64 {
        self.fs_crush.min(self.fs_sliding)
    }

    /// Name of the check with the lower safety factor
    pub fn governing_condition(&self) -> &'static str {
        if self.total_instability {
            "Buckling"
        } else if self.fs_crush <= self.fs_sliding {
            "Crushing"
        } else {
            "Sliding"
        }
    }
}

/// Run one `n` trial.
fn run_trial(config: &VoussoirConfig, t: f64, gamma_e: f64, n: f64) -> TrialState {
    let s = config.span_m();
    let e = config.rock().young_modulus_mpa;
    let settings = config.solver();

    let zo = crown_rise(t, n);
    let l = arc_length(s, zo);

    let mut dl = 0.0;
    let mut z_chk = arch_clearance(s, zo, dl);
    let mut z = 0.0;
    let mut fav = 0.0;

    for iteration in 1..=settings.max_iterations {
        z_chk = arch_clearance(s, zo, dl);
        // z = 0 would put a zero in the denominator of fm
        if z_chk <= 0.0 || z_chk.is_nan() {
            return TrialState::Unstable { n, zo, z_chk, z, fav };
        }

        z = arch_rise(s, z_chk);
        let fm = peak_stress(gamma_e, s, n, z);
        fav = average_stress(fm, n);
        let dl_next = elastic_shortening(fav, e, l);
        let inc = dl_next - dl;
        dl = dl_next;

        if inc.abs() <= settings.tolerance {
            return TrialState::Valid { n, zo, z_chk, z, fm, fav, iterations: iteration };
        }
    }

    trace!(n, zo, dl, "trial hit the iteration cap");
    TrialState::NonConverged { n, zo, z_chk, z, fav }
}

/// Index of the admissible trial with the smallest fm, first one on ties.
/// Falls back to the first trial when none is admissible.
fn select_winner(trials: &[TrialState]) -> usize {
    let mut best: Option<(usize, f64)> = None;
    for (i, trial) in trials.iter().enumerate() {
        if let TrialState::Valid { fm, .. } = *trial {
            match best {
                Some((_, best_fm)) if fm >= best_fm => {}
                _ => best = Some((i, fm)),
            }
        }
    }
    best.map_or(0, |(i, _)| i)
}

/// Solve the voussoir beam for one bed thickness.
///
/// # Errors
///
/// `InvalidInput` if `thickness_m` is not a positive finite number. Buckled or
/// non-converging trials are never errors; they show up in `buck_limit`.
pub fn solve(config: &VoussoirConfig, thickness_m: f64) -> VoussoirResult<SolveResult> {
    let gamma_e = effective_unit_weight(config.rock(), config.overburden(), thickness_m)?;
    let settings = config.solver();
    let count = settings.n_count();

    let mut trials = Vec::with_capacity(count);
    for i in 0..count {
        trials.push(run_trial(config, thickness_m, gamma_e.0, settings.n_at(i)));
    }

    let failed = trials.iter().filter(|t| t.is_failed()).count();
    let non_converged = trials
        .iter()
        .filter(|t| matches!(t, TrialState::NonConverged { .. }))
        .count();
    let buck_limit = 1 + failed;

    // n_count() >= 1 once the settings are validated
    let winner = trials.get(select_winner(&trials)).copied().unwrap_or(TrialState::Unstable {
        n: settings.n_step,
        zo: crown_rise(thickness_m, settings.n_step),
        z_chk: f64::NAN,
        z: 0.0,
        fav: 0.0,
    });
    let total_instability = !winner.is_valid();

    let fm = winner.fm();
    let fs_crush = crushing_safety_factor(config.rock().ucs_mpa, fm);
    let fs_sliding = sliding_safety_factor(
        fm,
        winner.n(),
        config.rock().friction_coefficient(),
        gamma_e.0,
        config.span_m(),
    );
    let deflection = midspan_deflection(winner.zo(), winner.z());

    if total_instability {
        warn!(
            thickness_m,
            span_m = config.span_m(),
            "no admissible thrust arch: every trial buckled or failed to converge"
        );
    } else {
        debug!(
            thickness_m,
            n = winner.n(),
            fm,
            buck_limit,
            fs_crush,
            fs_sliding,
            "solved thickness"
        );
    }
    if non_converged > 0 {
        debug!(thickness_m, non_converged, "trials stopped at the iteration cap");
    }

    Ok(SolveResult {
        thickness_m,
        effective_unit_weight: gamma_e,
        winner,
        buck_limit,
        fs_crush,
        fs_sliding,
        deflection,
        non_converged,
        total_instability,
        trials,
    })
}
