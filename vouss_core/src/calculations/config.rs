//! # Analysis Configuration
//!
//! [`VoussoirInput`] is the user-facing, JSON-serializable description of one
//! roof analysis. [`VoussoirConfig`] is the validated, immutable form that the
//! solver and the sweep read from. Angles are converted to radians exactly once,
//! in [`VoussoirConfig::from_input`].
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "label": "Stope 3 hangingwall",
//!   "span_m": 14.0,
//!   "thickness_m": 0.5,
//!   "young_modulus_mpa": 19900.0,
//!   "density_kn_m3": 28.9,
//!   "ucs_mpa": 95.0,
//!   "inclination": { "deg": 18.0 },
//!   "friction_angle": { "deg": 36.0 },
//!   "upper_density_kn_m3": 25.9,
//!   "upper_thickness_m": 1.0,
//!   "thickness_factor": 1.5
//! }
//! ```
//!
//! `solver` may be omitted; it defaults to [`SolverSettings::default`].

use serde::{Deserialize, Serialize};

use crate::errors::{VoussoirError, VoussoirResult};
use crate::materials::{Overburden, RockMass};
use crate::units::{Angle, KnPerM3};

/// Numerical settings of the per-thickness solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Increment of the deflection-ratio parameter n; the grid runs from
    /// `n_step` up to 1.0, so `1 / n_step` must be a whole number
    pub n_step: f64,

    /// Convergence tolerance on the change in elastic shortening (m)
    pub tolerance: f64,

    /// Cap on fixed-point iterations per trial
    pub max_iterations: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings {
            n_step: 0.01,
            tolerance: 1e-7,
            max_iterations: 10_000,
        }
    }
}

/// Smallest accepted n step (10 000 trials per thickness).
pub const MIN_N_STEP: f64 = 1e-4;

impl SolverSettings {
    pub fn validate(&self) -> VoussoirResult<()> {
        if !self.n_step.is_finite() || self.n_step < MIN_N_STEP || self.n_step > 1.0 {
            return Err(VoussoirError::invalid_input(
                "solver.n_step",
                self.n_step.to_string(),
                format!("n step must be in [{}, 1]", MIN_N_STEP),
            ));
        }
        let trials = 1.0 / self.n_step;
        if (trials - trials.round()).abs() > 1e-6 * trials {
            return Err(VoussoirError::invalid_input(
                "solver.n_step",
                self.n_step.to_string(),
                "n step must divide 1 so the grid ends at n = 1",
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(VoussoirError::invalid_input(
                "solver.tolerance",
                self.tolerance.to_string(),
                "Tolerance must be positive",
            ));
        }
        if self.max_iterations == 0 {
            return Err(VoussoirError::invalid_input(
                "solver.max_iterations",
                "0",
                "At least one iteration is required",
            ));
        }
        Ok(())
    }

    /// Number of trials in the n grid.
    pub fn n_count(&self) -> usize {
        (1.0 / self.n_step).round() as usize
    }

    /// The n value of trial `i`: `n_step + i·n_step`.
    pub fn n_at(&self, i: usize) -> f64 {
        self.n_step + i as f64 * self.n_step
    }
}

/// Input parameters for a voussoir roof analysis.
///
/// All lengths in metres, moduli and strengths in MPa, unit weights in kN/m³.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoussoirInput {
    /// User-defined label (e.g., "Drift 4 back")
    pub label: String,

    /// Excavation span (m)
    pub span_m: f64,

    /// Base bed thickness, first point of the sweep (m)
    pub thickness_m: f64,

    /// Young's modulus of the rock mass (MPa)
    pub young_modulus_mpa: f64,

    /// Unit weight of the bed (kN/m³)
    pub density_kn_m3: f64,

    /// Uniaxial compressive strength (MPa)
    pub ucs_mpa: f64,

    /// Bedding dip from horizontal
    pub inclination: Angle,

    /// Friction angle of the abutment joints
    pub friction_angle: Angle,

    /// Unit weight of the overlying layer (kN/m³)
    #[serde(default)]
    pub upper_density_kn_m3: f64,

    /// Thickness of the overlying layer (m)
    #[serde(default)]
    pub upper_thickness_m: f64,

    /// The sweep ends at `thickness_factor × thickness_m`
    pub thickness_factor: f64,

    #[serde(default)]
    pub solver: SolverSettings,
}

impl VoussoirInput {
    /// The classic worked example: a 0.5 m bed over a 14 m span with 1 m of
    /// cover, swept up to 0.75 m.
    pub fn reference() -> Self {
        VoussoirInput {
            label: "Reference".to_string(),
            span_m: 14.0,
            thickness_m: 0.5,
            young_modulus_mpa: 19_900.0,
            density_kn_m3: 28.9,
            ucs_mpa: 95.0,
            inclination: Angle::Deg(18.0),
            friction_angle: Angle::Deg(36.0),
            upper_density_kn_m3: 25.9,
            upper_thickness_m: 1.0,
            thickness_factor: 1.5,
            solver: SolverSettings::default(),
        }
    }

    /// Check every field. The first offending field is reported.
    pub fn validate(&self) -> VoussoirResult<()> {
        positive("span_m", self.span_m, "Span must be positive")?;
        positive("thickness_m", self.thickness_m, "Thickness must be positive")?;
        positive("young_modulus_mpa", self.young_modulus_mpa, "Modulus must be positive")?;
        positive("density_kn_m3", self.density_kn_m3, "Unit weight must be positive")?;
        positive("ucs_mpa", self.ucs_mpa, "UCS must be positive")?;
        non_negative(
            "upper_density_kn_m3",
            self.upper_density_kn_m3,
            "Overburden unit weight cannot be negative",
        )?;
        non_negative(
            "upper_thickness_m",
            self.upper_thickness_m,
            "Overburden thickness cannot be negative",
        )?;

        if !self.thickness_factor.is_finite() || self.thickness_factor <= 1.0 {
            return Err(VoussoirError::invalid_input(
                "thickness_factor",
                self.thickness_factor.to_string(),
                "Thickness factor must be greater than 1",
            ));
        }
        if !(self.thickness_factor * self.thickness_m).is_finite() {
            return Err(VoussoirError::invalid_input(
                "thickness_factor",
                self.thickness_factor.to_string(),
                "Upper thickness bound overflows",
            ));
        }

        let dip = self.inclination.to_degrees().0;
        if !dip.is_finite() || !(0.0..90.0).contains(&dip) {
            return Err(VoussoirError::invalid_input(
                "inclination",
                format!("{}°", dip),
                "Inclination must be in [0°, 90°)",
            ));
        }
        let phi = self.friction_angle.to_degrees().0;
        if !phi.is_finite() || phi <= 0.0 || phi >= 90.0 {
            return Err(VoussoirError::invalid_input(
                "friction_angle",
                format!("{}°", phi),
                "Friction angle must be in (0°, 90°)",
            ));
        }

        self.solver.validate()
    }
}

impl Default for VoussoirInput {
    fn default() -> Self {
        VoussoirInput::reference()
    }
}

fn positive(field: &str, value: f64, reason: &str) -> VoussoirResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(VoussoirError::invalid_input(field, value.to_string(), reason));
    }
    Ok(())
}

fn non_negative(field: &str, value: f64, reason: &str) -> VoussoirResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(VoussoirError::invalid_input(field, value.to_string(), reason));
    }
    Ok(())
}

/// Validated, immutable analysis configuration.
///
/// Built once per run and shared by reference across every solve in a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct VoussoirConfig {
    label: String,
    span_m: f64,
    base_thickness_m: f64,
    thickness_factor: f64,
    rock: RockMass,
    overburden: Overburden,
    solver: SolverSettings,
}

impl VoussoirConfig {
    /// Validate an input and freeze it into a configuration.
    ///
    /// ```rust
    /// use vouss_core::calculations::{VoussoirConfig, VoussoirInput};
    ///
    /// let config = VoussoirConfig::from_input(&VoussoirInput::reference()).unwrap();
    /// assert_eq!(config.span_m(), 14.0);
    /// assert!((config.rock().inclination.0 - 18.0_f64.to_radians()).abs() < 1e-15);
    /// ```
    pub fn from_input(input: &VoussoirInput) -> VoussoirResult<Self> {
        input.validate()?;

        Ok(VoussoirConfig {
            label: input.label.clone(),
            span_m: input.span_m,
            base_thickness_m: input.thickness_m,
            thickness_factor: input.thickness_factor,
            rock: RockMass {
                young_modulus_mpa: input.young_modulus_mpa,
                density: KnPerM3(input.density_kn_m3),
                ucs_mpa: input.ucs_mpa,
                friction_angle: input.friction_angle.to_radians(),
                inclination: input.inclination.to_radians(),
            },
            overburden: Overburden {
                density: KnPerM3(input.upper_density_kn_m3),
                thickness_m: input.upper_thickness_m,
            },
            solver: input.solver,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn span_m(&self) -> f64 {
        self.span_m
    }

    pub fn base_thickness_m(&self) -> f64 {
        self.base_thickness_m
    }

    pub fn thickness_factor(&self) -> f64 {
        self.thickness_factor
    }

    pub fn rock(&self) -> &RockMass {
        &self.rock
    }

    pub fn overburden(&self) -> &Overburden {
        &self.overburden
    }

    pub fn solver(&self) -> &SolverSettings {
        &self.solver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_is_valid() {
        assert!(VoussoirInput::reference().validate().is_ok());
    }

    #[test]
    fn test_n_grid_endpoints() {
        let solver = SolverSettings::default();
        assert_eq!(solver.n_count(), 100);
        assert_eq!(solver.n_at(0), 0.01);
        assert!((solver.n_at(99) - 1.0).abs() < 1e-12);

        let coarse = SolverSettings { n_step: 0.25, ..SolverSettings::default() };
        assert_eq!(coarse.n_count(), 4);
        assert_eq!(coarse.n_at(3), 1.0);

        // 1/0.2 and 1/0.1 are not exact in binary
        for n_step in [0.2, 0.1, 0.05, MIN_N_STEP] {
            let solver = SolverSettings { n_step, ..SolverSettings::default() };
            assert!(solver.validate().is_ok(), "n_step {} rejected", n_step);
            let last = solver.n_at(solver.n_count() - 1);
            assert!((last - 1.0).abs() < 1e-9, "n_step {} ends at {}", n_step, last);
        }
    }

    #[test]
    fn test_rejects_bad_geometry() {
        let input = VoussoirInput { span_m: 0.0, ..VoussoirInput::reference() };
        let err = input.validate().unwrap_err();
        assert!(matches!(err, VoussoirError::InvalidInput { ref field, .. } if field == "span_m"));

        let input = VoussoirInput { thickness_m: f64::NAN, ..VoussoirInput::reference() };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_rejects_factor_not_above_one() {
        for factor in [1.0, 0.8, f64::INFINITY] {
            let input = VoussoirInput { thickness_factor: factor, ..VoussoirInput::reference() };
            let err = input.validate().unwrap_err();
            assert!(
                matches!(
                    err,
                    VoussoirError::InvalidInput { ref field, .. } if field == "thickness_factor"
                ),
                "factor {} gave {:?}",
                factor,
                err
            );
        }
    }

    #[test]
    fn test_rejects_bad_angles() {
        let input = VoussoirInput { inclination: Angle::Deg(90.0), ..VoussoirInput::reference() };
        assert!(input.validate().is_err());

        let input = VoussoirInput { inclination: Angle::Deg(-1.0), ..VoussoirInput::reference() };
        assert!(input.validate().is_err());

        let input = VoussoirInput { friction_angle: Angle::Deg(0.0), ..VoussoirInput::reference() };
        assert!(input.validate().is_err());

        // Radians are checked after conversion
        let input = VoussoirInput { friction_angle: Angle::Rad(1.6), ..VoussoirInput::reference() };
        assert!(input.validate().is_err());

        let input = VoussoirInput { inclination: Angle::Rad(0.0), ..VoussoirInput::reference() };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_rejects_negative_overburden() {
        let input = VoussoirInput { upper_thickness_m: -1.0, ..VoussoirInput::reference() };
        assert!(input.validate().is_err());

        let input = VoussoirInput {
            upper_density_kn_m3: 0.0,
            upper_thickness_m: 0.0,
            ..VoussoirInput::reference()
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_solver_settings() {
        let mut input = VoussoirInput::reference();
        input.solver.n_step = 0.0;
        assert!(input.validate().is_err());

        let mut input = VoussoirInput::reference();
        input.solver.tolerance = -1e-7;
        assert!(input.validate().is_err());

        let mut input = VoussoirInput::reference();
        input.solver.max_iterations = 0;
        let err = input.validate().unwrap_err();
        assert!(err.to_string().contains("solver.max_iterations"));
    }

    #[test]
    fn test_rejects_tiny_n_step() {
        for n_step in [1e-300, 1e-5, f64::MIN_POSITIVE] {
            let mut input = VoussoirInput::reference();
            input.solver.n_step = n_step;
            let err = VoussoirConfig::from_input(&input).unwrap_err();
            assert!(
                matches!(
                    err,
                    VoussoirError::InvalidInput { ref field, .. } if field == "solver.n_step"
                ),
                "n_step {} gave {:?}",
                n_step,
                err
            );
        }
    }

    #[test]
    fn test_rejects_n_step_that_misses_one() {
        for n_step in [0.03, 0.3, 0.7] {
            let mut input = VoussoirInput::reference();
            input.solver.n_step = n_step;
            let err = input.validate().unwrap_err();
            assert!(err.to_string().contains("solver.n_step"), "n_step {} gave {}", n_step, err);
        }
    }

    #[test]
    fn test_config_converts_angles_once() {
        let config = VoussoirConfig::from_input(&VoussoirInput::reference()).unwrap();
        assert_eq!(config.rock().inclination.0, 18.0 * std::f64::consts::PI / 180.0);
        assert_eq!(config.rock().friction_angle.0, 36.0 * std::f64::consts::PI / 180.0);
        assert_eq!(config.overburden().thickness_m, 1.0);
        assert_eq!(config.base_thickness_m(), 0.5);
        assert_eq!(config.label(), "Reference");
    }

    #[test]
    fn test_input_json_defaults_solver() {
        let json = r#"{
            "label": "B-1",
            "span_m": 10.0,
            "thickness_m": 1.0,
            "young_modulus_mpa": 20000.0,
            "density_kn_m3": 26.0,
            "ucs_mpa": 80.0,
            "inclination": { "rad": 0.0 },
            "friction_angle": { "deg": 35.0 },
            "thickness_factor": 2.0
        }"#;
        let input: VoussoirInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.solver, SolverSettings::default());
        assert_eq!(input.upper_thickness_m, 0.0);
        assert!(input.validate().is_ok());
    }
}
