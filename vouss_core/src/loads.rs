//! # Charge Model
//!
//! Converts the self-weight of the bed and the surcharge of the overlying layer
//! into the single effective unit weight the voussoir solver works with.
//!
//! The surcharge is assumed to act with a parabolic distribution across the
//! span, which is equivalent to adding `(7/9)·γu·hu/t` to the unit weight of
//! the bed. Only the component normal to the bedding loads the beam.
//!
//! ## Example
//!
//! ```rust
//! use vouss_core::loads::effective_unit_weight;
//! use vouss_core::materials::{Overburden, RockMass};
//! use vouss_core::units::{Degrees, KnPerM3, Radians};
//!
//! let rock = RockMass {
//!     young_modulus_mpa: 19_900.0,
//!     density: KnPerM3(28.9),
//!     ucs_mpa: 95.0,
//!     friction_angle: Degrees(36.0).into(),
//!     inclination: Radians(0.0),
//! };
//!
//! // No surcharge on a flat bed: γe is just γ in MN/m³
//! let ge = effective_unit_weight(&rock, &Overburden::none(), 0.5).unwrap();
//! assert!((ge.0 - 0.0289).abs() < 1e-15);
//! ```

use crate::equations::{inclined_unit_weight, parabolic_surcharge};
use crate::errors::{VoussoirError, VoussoirResult};
use crate::materials::{Overburden, RockMass};
use crate::units::{KnPerM3, MnPerM3};

/// Equivalent surcharge unit weight of the overlying layer on a bed of
/// thickness `layer_thickness_m`.
pub fn surcharge(overburden: &Overburden, layer_thickness_m: f64) -> VoussoirResult<KnPerM3> {
    check_layer_thickness(layer_thickness_m)?;
    Ok(KnPerM3(parabolic_surcharge(
        overburden.density.0,
        overburden.thickness_m,
        layer_thickness_m,
    )))
}

/// Effective unit weight γe = (γ + q)·cos(α) / 1000, in MN/m³.
///
/// # Errors
///
/// `InvalidInput` if `layer_thickness_m` is not a positive finite number.
pub fn effective_unit_weight(
    rock: &RockMass,
    overburden: &Overburden,
    layer_thickness_m: f64,
) -> VoussoirResult<MnPerM3> {
    let q = surcharge(overburden, layer_thickness_m)?;
    let normal = inclined_unit_weight(rock.density.0, q.0, rock.inclination.0);
    Ok(KnPerM3(normal).into())
}

fn check_layer_thickness(t: f64) -> VoussoirResult<()> {
    if !t.is_finite() || t <= 0.0 {
        return Err(VoussoirError::invalid_input(
            "thickness_m",
            t.to_string(),
            "Layer thickness must be a positive finite number",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Degrees;

    fn reference_rock() -> RockMass {
        RockMass {
            young_modulus_mpa: 19_900.0,
            density: KnPerM3(28.9),
            ucs_mpa: 95.0,
            friction_angle: Degrees(36.0).into(),
            inclination: Degrees(18.0).into(),
        }
    }

    fn reference_cover() -> Overburden {
        Overburden { density: KnPerM3(25.9), thickness_m: 1.0 }
    }

    #[test]
    fn test_reference_effective_unit_weight() {
        let ge = effective_unit_weight(&reference_rock(), &reference_cover(), 0.5).unwrap();
        assert!((ge.0 - 0.06580254363299912).abs() < 1e-15, "ge = {}", ge.0);

        let ge = effective_unit_weight(&reference_rock(), &reference_cover(), 0.75).unwrap();
        assert!((ge.0 - 0.05303020686230939).abs() < 1e-15, "ge = {}", ge.0);
    }

    #[test]
    fn test_thicker_cover_is_heavier() {
        let light = effective_unit_weight(&reference_rock(), &reference_cover(), 0.5).unwrap();
        let heavy_cover = Overburden { thickness_m: 2.0, ..reference_cover() };
        let heavy = effective_unit_weight(&reference_rock(), &heavy_cover, 0.5).unwrap();
        assert!(heavy.0 > light.0);
    }

    #[test]
    fn test_rejects_bad_thickness() {
        for t in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let err = effective_unit_weight(&reference_rock(), &reference_cover(), t).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT", "t = {}", t);
        }
    }

    #[test]
    fn test_surcharge_scales_inversely_with_thickness() {
        let q1 = surcharge(&reference_cover(), 0.5).unwrap();
        let q2 = surcharge(&reference_cover(), 1.0).unwrap();
        assert!((q1.0 - 2.0 * q2.0).abs() < 1e-12);
    }
}
