//! # Thickness Sensitivity Sweep
//!
//! Solves the voussoir beam over 50 evenly spaced bed thicknesses, from the base
//! thickness up to `thickness_factor × base`, and collects one row per thickness.
//!
//! Rows are independent, so with the `parallel` feature (on by default) they are
//! solved on the rayon pool. Results are collected in grid order either way, so
//! the table is identical to a sequential run.
//!
//! ## Example
//!
//! ```rust
//! use vouss_core::calculations::{sweep, VoussoirConfig, VoussoirInput};
//!
//! let config = VoussoirConfig::from_input(&VoussoirInput::reference()).unwrap();
//! let table = sweep(&config).unwrap();
//!
//! assert_eq!(table.rows.len(), 50);
//! assert_eq!(table.rows[0].thickness, 0.5);
//! assert_eq!(table.rows[49].thickness, 0.75);
//! ```

use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calculations::config::VoussoirConfig;
use crate::calculations::voussoir::{solve, SolveResult};
use crate::errors::{VoussoirError, VoussoirResult};

/// Number of thickness points in a sweep
pub const GRID_POINTS: usize = 50;

/// Column names of a sweep table, in export order
pub const COLUMNS: [&str; 11] = [
    "thickness",
    "n",
    "zo",
    "z_chk",
    "z",
    "fm",
    "fav",
    "buck_limit",
    "fs_crush",
    "fs_sliding",
    "deflection",
];

/// One thickness of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    /// Bed thickness (m)
    pub thickness: f64,
    pub n: f64,
    /// Crown rise (m)
    pub zo: f64,
    /// Arch clearance at the last iteration (m)
    pub z_chk: f64,
    /// Arch rise (m)
    pub z: f64,
    /// Peak stress (MPa), infinite when no arch exists
    pub fm: f64,
    /// Average arch stress (MPa)
    pub fav: f64,
    pub buck_limit: usize,
    pub fs_crush: f64,
    pub fs_sliding: f64,
    /// Mid-span deflection (m)
    pub deflection: f64,
}

impl SweepRow {
    /// Row values in [`COLUMNS`] order
    pub fn values(&self) -> [f64; 11] {
        [
            self.thickness,
            self.n,
            self.zo,
            self.z_chk,
            self.z,
            self.fm,
            self.fav,
            self.buck_limit as f64,
            self.fs_crush,
            self.fs_sliding,
            self.deflection,
        ]
    }

    pub fn is_stable(&self) -> bool {
        self.fm.is_finite()
    }
}

impl From<&SolveResult> for SweepRow {
    fn from(result: &SolveResult) -> Self {
        SweepRow {
            thickness: result.thickness_m,
            n: result.winner.n(),
            zo: result.winner.zo(),
            z_chk: result.winner.z_chk(),
            z: result.winner.z(),
            fm: result.winner.fm(),
            fav: result.winner.fav(),
            buck_limit: result.buck_limit,
            fs_crush: result.fs_crush,
            fs_sliding: result.fs_sliding,
            deflection: result.deflection,
        }
    }
}

/// Sensitivity table, ascending in thickness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepTable {
    /// Label of the analysis that produced the table
    pub label: String,
    pub rows: Vec<SweepRow>,
}

impl SweepTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Thinnest bed whose governing safety factor reaches `target`
    pub fn first_thickness_with_safety(&self, target: f64) -> Option<f64> {
        self.rows
            .iter()
            .find(|r| r.is_stable() && r.fs_crush.min(r.fs_sliding) >= target)
            .map(|r| r.thickness)
    }
}

/// Evenly spaced thicknesses from `base` to `factor × base`, both included.
///
/// The last point is set exactly to `factor × base`.
pub fn thickness_grid(base: f64, factor: f64) -> VoussoirResult<Vec<f64>> {
    if !base.is_finite() || base <= 0.0 {
        return Err(VoussoirError::invalid_input(
            "thickness_m",
            base.to_string(),
            "Base thickness must be positive",
        ));
    }
    if !factor.is_finite() || factor <= 1.0 {
        return Err(VoussoirError::invalid_input(
            "thickness_factor",
            factor.to_string(),
            "Thickness factor must be greater than 1",
        ));
    }

    let stop = factor * base;
    let step = (stop - base) / (GRID_POINTS - 1) as f64;

    let mut grid = Vec::with_capacity(GRID_POINTS);
    for i in 0..GRID_POINTS {
        grid.push(base + i as f64 * step);
    }
    grid[GRID_POINTS - 1] = stop;
    Ok(grid)
}

/// Run the sweep described by `config`.
pub fn sweep(config: &VoussoirConfig) -> VoussoirResult<SweepTable> {
    let start = Instant::now();
    let grid = thickness_grid(config.base_thickness_m(), config.thickness_factor())?;

    #[cfg(feature = "parallel")]
    let solved: Vec<VoussoirResult<SweepRow>> = grid
        .par_iter()
        .map(|&t| solve(config, t).map(|r| SweepRow::from(&r)))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let solved: Vec<VoussoirResult<SweepRow>> = grid
        .iter()
        .map(|&t| solve(config, t).map(|r| SweepRow::from(&r)))
        .collect();

    let table = collect_table(config, solved)?;
    log_summary(&table, start);
    Ok(table)
}

/// Run the sweep on the calling thread only.
pub fn sweep_sequential(config: &VoussoirConfig) -> VoussoirResult<SweepTable> {
    let start = Instant::now();
    let grid = thickness_grid(config.base_thickness_m(), config.thickness_factor())?;

    let solved: Vec<VoussoirResult<SweepRow>> = grid
        .iter()
        .map(|&t| solve(config, t).map(|r| SweepRow::from(&r)))
        .collect();

    let table = collect_table(config, solved)?;
    log_summary(&table, start);
    Ok(table)
}

fn collect_table(
    config: &VoussoirConfig,
    solved: Vec<VoussoirResult<SweepRow>>,
) -> VoussoirResult<SweepTable> {
    let mut rows = Vec::with_capacity(solved.len());
    for row in solved {
        rows.push(row?);
    }
    Ok(SweepTable {
        label: config.label().to_string(),
        rows,
    })
}

fn log_summary(table: &SweepTable, start: Instant) {
    let unstable = table.rows.iter().filter(|r| !r.is_stable()).count();
    info!(
        label = %table.label,
        rows = table.len(),
        unstable,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "thickness sweep complete"
    );
}
