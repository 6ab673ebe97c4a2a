//! # Rock Mass and Overburden Properties
//!
//! Validated, immutable material parameters for one analysis run. These are
//! built by [`VoussoirConfig::from_input`](crate::calculations::VoussoirConfig::from_input)
//! and never change while a sweep is running.
//!
//! ## Example
//!
//! ```rust
//! use vouss_core::materials::{Overburden, RockMass};
//! use vouss_core::units::{Degrees, KnPerM3};
//!
//! let rock = RockMass {
//!     young_modulus_mpa: 19_900.0,
//!     density: KnPerM3(28.9),
//!     ucs_mpa: 95.0,
//!     friction_angle: Degrees(36.0).into(),
//!     inclination: Degrees(18.0).into(),
//! };
//! assert!((rock.friction_coefficient() - 0.7265).abs() < 1e-4);
//!
//! let cover = Overburden { density: KnPerM3(25.9), thickness_m: 1.0 };
//! assert_ne!(cover, Overburden::none());
//! ```

use serde::{Deserialize, Serialize};

use crate::units::{KnPerM3, Radians};

/// Rock mass forming the analyzed roof bed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RockMass {
    /// Young's modulus of the rock mass (MPa)
    pub young_modulus_mpa: f64,

    /// Unit weight of the bed (kN/m³)
    pub density: KnPerM3,

    /// Uniaxial compressive strength (MPa)
    pub ucs_mpa: f64,

    /// Friction angle of the abutment joints
    pub friction_angle: Radians,

    /// Bedding dip measured from horizontal
    pub inclination: Radians,
}

impl RockMass {
    /// tan(φ) of the abutment joints
    pub fn friction_coefficient(&self) -> f64 {
        self.friction_angle.tan()
    }
}

/// Surcharge layer resting on the analyzed bed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Overburden {
    /// Unit weight of the overlying layer (kN/m³)
    pub density: KnPerM3,

    /// Thickness of the overlying layer (m)
    pub thickness_m: f64,
}

impl Overburden {
    /// No surcharge
    pub fn none() -> Self {
        Overburden::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Degrees;

    #[test]
    fn test_friction_coefficient() {
        let rock = RockMass {
            young_modulus_mpa: 10_000.0,
            density: KnPerM3(26.0),
            ucs_mpa: 80.0,
            friction_angle: Degrees(45.0).into(),
            inclination: Radians(0.0),
        };
        assert!((rock.friction_coefficient() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_overburden_none() {
        let none = Overburden::none();
        assert_eq!(none.density, KnPerM3(0.0));
        assert_eq!(none.thickness_m, 0.0);
    }
}
