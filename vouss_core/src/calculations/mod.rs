//! # Roof Stability Calculations
//!
//! Every analysis follows the same pattern:
//!
//! - [`VoussoirInput`] - Input parameters (JSON-serializable)
//! - [`VoussoirConfig`] - Validated, immutable form of the input
//! - [`solve`] - One bed thickness → [`SolveResult`]
//! - [`sweep`] - The thickness range → [`SweepTable`]
//!
//! ## Modules
//!
//! - [`config`] - Input types, validation and solver settings
//! - [`voussoir`] - Per-thickness voussoir beam solver
//! - [`sensitivity`] - Thickness sweep driver

pub mod config;
pub mod sensitivity;
pub mod voussoir;

pub use config::{SolverSettings, VoussoirConfig, VoussoirInput};
pub use sensitivity::{sweep, sweep_sequential, thickness_grid, SweepRow, SweepTable, COLUMNS};
pub use voussoir::{solve, SolveResult, TrialState};
