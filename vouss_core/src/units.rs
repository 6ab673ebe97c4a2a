//! # Unit Types
//!
//! Type-safe wrappers for the units used by the voussoir analysis. These are
//! plain f64 newtypes: JSON stays clean (just numbers) and runtime overhead is nil.
//!
//! ## SI Units
//!
//! - Length: metres (m)
//! - Stress and modulus: megapascals (MPa)
//! - Unit weight: kilonewtons per cubic metre (kN/m³), converted to MN/m³ for stress work
//! - Angles: entered in degrees or radians, always stored as [`Radians`] after validation
//!
//! ## Angles
//!
//! Bedding inclination and joint friction are the only angles in the model. An
//! input carries an explicit unit tag ([`Angle`]) and is converted exactly once,
//! when the input is validated into a configuration. Everything downstream of
//! that point only ever sees [`Radians`], so a value cannot be converted twice.
//!
//! ## Example
//!
//! ```rust
//! use vouss_core::units::{Angle, Degrees, Radians};
//!
//! let dip = Angle::Deg(18.0);
//! let rad: Radians = dip.to_radians();
//! assert!((rad.0 - 18.0_f64.to_radians()).abs() < 1e-15);
//!
//! let back: Degrees = rad.into();
//! assert!((back.0 - 18.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Angle Units
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Radians(deg.0 * std::f64::consts::PI / 180.0)
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Degrees(rad.0.to_degrees())
    }
}

impl Radians {
    pub fn cos(self) -> f64 {
        self.0.cos()
    }

    pub fn tan(self) -> f64 {
        self.0.tan()
    }
}

/// An angle as supplied by the user, tagged with its unit.
///
/// Serializes as `{"deg": 18.0}` or `{"rad": 0.314}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Angle {
    Deg(f64),
    Rad(f64),
}

impl Angle {
    /// Convert to radians. This is the single conversion point for input angles.
    pub fn to_radians(self) -> Radians {
        match self {
            Angle::Deg(d) => Degrees(d).into(),
            Angle::Rad(r) => Radians(r),
        }
    }

    /// Value in degrees, for messages and reports
    pub fn to_degrees(self) -> Degrees {
        match self {
            Angle::Deg(d) => Degrees(d),
            Angle::Rad(r) => Radians(r).into(),
        }
    }
}

impl Default for Angle {
    fn default() -> Self {
        Angle::Deg(0.0)
    }
}

// ============================================================================
// Unit Weight
// ============================================================================

/// Unit weight in kilonewtons per cubic metre (kN/m³)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnPerM3(pub f64);

/// Unit weight in meganewtons per cubic metre (MN/m³, i.e. MPa per metre)
///
/// Multiplying by a length in metres gives a stress in MPa, which is the unit
/// the voussoir stress factors are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MnPerM3(pub f64);

impl From<KnPerM3> for MnPerM3 {
    fn from(kn: KnPerM3) -> Self {
        MnPerM3(kn.0 / 1000.0)
    }
}

impl From<MnPerM3> for KnPerM3 {
    fn from(mn: MnPerM3) -> Self {
        KnPerM3(mn.0 * 1000.0)
    }
}

// ============================================================================
// Arithmetic Implementations
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Degrees);
impl_arithmetic!(Radians);
impl_arithmetic!(KnPerM3);
impl_arithmetic!(MnPerM3);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrees_to_radians() {
        let rad: Radians = Degrees(180.0).into();
        assert!((rad.0 - std::f64::consts::PI).abs() < 1e-15);
    }

    #[test]
    fn test_angle_tag_conversion() {
        assert_eq!(Angle::Rad(0.5).to_radians(), Radians(0.5));
        assert!((Angle::Deg(36.0).to_radians().tan() - 36.0_f64.to_radians().tan()).abs() < 1e-15);
        assert!((Angle::Rad(std::f64::consts::FRAC_PI_2).to_degrees().0 - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_unit_weight_conversion() {
        let mn: MnPerM3 = KnPerM3(28.9).into();
        assert!((mn.0 - 0.0289).abs() < 1e-15);
        let kn: KnPerM3 = mn.into();
        assert!((kn.0 - 28.9).abs() < 1e-12);
    }

    #[test]
    fn test_arithmetic() {
        let a = KnPerM3(20.0);
        let b = KnPerM3(5.0);
        assert_eq!((a + b).0, 25.0);
        assert_eq!((a - b).0, 15.0);
        assert_eq!((a * 2.0).0, 40.0);
        assert_eq!((a / 2.0).value(), 10.0);
    }

    #[test]
    fn test_angle_serialization() {
        let json = serde_json::to_string(&Angle::Deg(18.0)).unwrap();
        assert_eq!(json, r#"{"deg":18.0}"#);

        let roundtrip: Angle = serde_json::from_str(r#"{"rad":0.25}"#).unwrap();
        assert_eq!(roundtrip, Angle::Rad(0.25));

        let rad = Radians(0.5);
        assert_eq!(serde_json::to_string(&rad).unwrap(), "0.5");
    }
}
