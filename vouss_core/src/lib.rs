//! # vouss_core - Voussoir Roof Stability Engine
//!
//! `vouss_core` evaluates the stability of a bedded rock roof over an excavation
//! with the voussoir beam analogue (Diederichs & Kaiser, 1999): a jointed bed that
//! carries itself by arching between the abutments. For a given span, rock mass
//! and overburden it finds the equilibrium thrust arch, reports the peak
//! compressive stress and the safety factors against crushing, sliding and
//! buckling, and repeats the analysis over a range of bed thicknesses.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take a validated config and return results
//! - **JSON-First**: Inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Auditable**: Every formula lives in [`equations`] with registry metadata
//!
//! ## Quick Start
//!
//! ```rust
//! use vouss_core::calculations::{solve, sweep, VoussoirConfig, VoussoirInput};
//!
//! let config = VoussoirConfig::from_input(&VoussoirInput::reference()).unwrap();
//!
//! let single = solve(&config, 0.5).unwrap();
//! println!("fm = {:.2} MPa, FS crushing = {:.2}", single.fm(), single.fs_crush);
//!
//! let table = sweep(&config).unwrap();
//! assert_eq!(table.rows.len(), 50);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Configuration, per-thickness solver and thickness sweep
//! - [`equations`] - Voussoir formulas and the equation registry
//! - [`loads`] - Effective unit weight from self-weight and surcharge
//! - [`materials`] - Rock mass and overburden properties
//! - [`project`] - Project container and metadata
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Atomic project saves and table export

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod loads;
pub mod materials;
pub mod project;
pub mod units;

pub use calculations::{solve, sweep, SolveResult, SweepTable, VoussoirConfig, VoussoirInput};
pub use errors::{VoussoirError, VoussoirResult};
pub use file_io::{export_table_csv, export_table_json, load_project, save_project};
pub use project::{Project, ProjectMetadata};
