//! # Voussoir Beam Formulas
//!
//! Closed-form relations of the voussoir (jointed, self-arching) beam analogue for a
//! roof bed of span `s` and thickness `t`, after Diederichs & Kaiser (1999).
//!
//! ## Notation
//!
//! - `s` = Span between abutments (m)
//! - `t` = Bed thickness (m)
//! - `n` = Deflection-ratio parameter: depth of the compression zone as a fraction of `t`
//! - `zo` = Crown rise: initial lever arm of the internal thrust line (m)
//! - `L` = Length of the parabolic thrust arch (m)
//! - `dl` = Elastic shortening of the arch (m)
//! - `z` = Arch rise after shortening (m)
//! - `γe` = Effective unit weight (MN/m³)
//! - `fm` = Peak compressive stress at abutment and crown (MPa)
//! - `fav` = Average stress along the arch (MPa)
//! - `E` = Rock mass modulus (MPa)
//!
//! ## Units
//!
//! Lengths are in metres and stresses in MPa, so unit weights enter in MN/m³.
//! The formulas are written in the same operation order as the classic
//! spreadsheet formulation so results reproduce published tables bit for bit.
//!
//! ## References
//!
//! - Diederichs, M.S. & Kaiser, P.K. (1999). Stability of large excavations in
//!   laminated hard rock masses: the voussoir analogue revisited. IJRMMS 36, 97-117.

// =============================================================================
// LOADING
// =============================================================================

/// Equivalent unit weight added to the bed by a surcharge layer with a
/// parabolic pressure distribution.
///
/// # Formula
/// - q = (7/9)·γu·hu / t
///
/// The surcharge is spread over the bed thickness, so thinner beds carry a
/// larger equivalent unit weight.
///
/// # Arguments
/// * `upper_density` - Unit weight of the overlying layer γu (kN/m³)
/// * `upper_thickness` - Thickness of the overlying layer hu (m)
/// * `t` - Bed thickness (m), must be positive
#[inline]
pub fn parabolic_surcharge(upper_density: f64, upper_thickness: f64, t: f64) -> f64 {
    7.0 / 9.0 * upper_density * upper_thickness / t
}

/// Unit weight component normal to an inclined bed, in kN/m³.
///
/// # Formula
/// - γn = (γ + q)·cos(α)
#[inline]
pub fn inclined_unit_weight(base_density: f64, surcharge: f64, inclination_rad: f64) -> f64 {
    (base_density + surcharge) * inclination_rad.cos()
}

// =============================================================================
// ARCH GEOMETRY
// =============================================================================

/// Initial crown rise of the thrust line.
///
/// # Formula
/// - zo = t·(1 − 2n/3)
///
/// Ranges from t (n → 0) down to t/3 (n = 1), so it is always positive.
#[inline]
pub fn crown_rise(t: f64, n: f64) -> f64 {
    t * (1.0 - 2.0 / 3.0 * n)
}

/// Rise term (8/(3s))·zo² shared by the arc length and clearance relations.
#[inline]
fn rise_term(s: f64, zo: f64) -> f64 {
    8.0 / (3.0 * s) * (zo * zo)
}

/// Length of the parabolic thrust arch.
///
/// # Formula
/// - L = s + (8/(3s))·zo²
///
/// Always at least the span.
#[inline]
pub fn arc_length(s: f64, zo: f64) -> f64 {
    s + rise_term(s, zo)
}

/// Clearance left in the arch after elastic shortening `dl`.
///
/// # Formula
/// - z_chk = (8/(3s))·zo² − dl
///
/// A negative value means the shortening has consumed the whole rise: the arch
/// snaps through (buckling).
#[inline]
pub fn arch_clearance(s: f64, zo: f64, dl: f64) -> f64 {
    rise_term(s, zo) - dl
}

/// Arch rise recovered from the clearance.
///
/// # Formula
/// - z = √((3s/8)·z_chk)
///
/// At `dl = 0` this returns exactly `zo`.
#[inline]
pub fn arch_rise(s: f64, z_chk: f64) -> f64 {
    (3.0 * s / 8.0 * z_chk).sqrt()
}

/// Mid-span deflection: loss of rise between the initial and converged arch.
///
/// # Formula
/// - δ = zo − z
#[inline]
pub fn midspan_deflection(zo: f64, z: f64) -> f64 {
    zo - z
}

// =============================================================================
// STRESSES
// =============================================================================

/// Peak compressive stress carried at the abutments and crown.
///
/// # Formula
/// - fm = γe·s² / (4·n·z)
///
/// # Arguments
/// * `gamma_e` - Effective unit weight (MN/m³)
/// * `s` - Span (m)
/// * `n` - Deflection-ratio parameter, must be positive
/// * `z` - Arch rise (m), must be positive
#[inline]
pub fn peak_stress(gamma_e: f64, s: f64, n: f64, z: f64) -> f64 {
    gamma_e * (s * s) / (4.0 * n * z)
}

/// Average stress along the thrust arch for a triangular compression block.
///
/// # Formula
/// - fav = (fm/3)·(2/3 + n)
#[inline]
pub fn average_stress(fm: f64, n: f64) -> f64 {
    fm / 3.0 * (2.0 / 3.0 + n)
}

/// Elastic shortening of the arch under its average stress.
///
/// # Formula
/// - dl = (fav/E)·L
#[inline]
pub fn elastic_shortening(fav: f64, e: f64, l: f64) -> f64 {
    fav / e * l
}

// =============================================================================
// SAFETY FACTORS
// =============================================================================

/// Safety factor against crushing at the abutments or crown.
///
/// # Formula
/// - FS_crush = (σc/2) / fm
///
/// Returns 0 when `fm` is infinite (no admissible arch).
#[inline]
pub fn crushing_safety_factor(ucs: f64, fm: f64) -> f64 {
    (ucs / 2.0) / fm
}

/// Safety factor against shear sliding at the abutments.
///
/// # Formula
/// - FS_slide = fm·n·tan(φ) / (γe·s)
///
/// Thrust on the abutment (fm·n·t) times tan φ, over the half-weight of the
/// beam carried in shear (γe·s·t); `t` cancels.
#[inline]
pub fn sliding_safety_factor(fm: f64, n: f64, tan_phi: f64, gamma_e: f64, s: f64) -> f64 {
    fm * n * tan_phi / (gamma_e * s)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON || (a - b).abs() / b.abs().max(1.0) < 1e-9
    }

    #[test]
    fn test_parabolic_surcharge() {
        // 7/9 * 25.9 * 1.0 / 0.5 = 40.2888...
        let q = parabolic_surcharge(25.9, 1.0, 0.5);
        assert!(approx_eq(q, 7.0 / 9.0 * 25.9 * 2.0), "q = {}", q);
        // Doubling thickness halves the surcharge
        assert!(approx_eq(parabolic_surcharge(25.9, 1.0, 1.0), q / 2.0));
    }

    #[test]
    fn test_inclined_unit_weight_flat_bed() {
        assert!(approx_eq(inclined_unit_weight(28.9, 10.0, 0.0), 38.9));
        assert!(inclined_unit_weight(28.9, 0.0, std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_crown_rise_bounds() {
        assert!(approx_eq(crown_rise(0.9, 0.0), 0.9));
        assert!(approx_eq(crown_rise(0.9, 1.0), 0.3));
        assert!(approx_eq(crown_rise(0.5, 0.55), 0.5 * (1.0 - 2.0 / 3.0 * 0.55)));
    }

    #[test]
    fn test_arc_length_exceeds_span() {
        let l = arc_length(14.0, 0.3);
        // 14 + 8/42 * 0.09 = 14.017142...
        assert!(approx_eq(l, 14.0 + 8.0 / 42.0 * 0.09), "L = {}", l);
        assert!(l > 14.0);
    }

    #[test]
    fn test_arch_rise_without_shortening_equals_crown_rise() {
        let s = 14.0;
        let zo = 0.31666666666666665;
        let z = arch_rise(s, arch_clearance(s, zo, 0.0));
        assert!((z - zo).abs() < 1e-12, "z = {}, zo = {}", z, zo);
        assert!(approx_eq(midspan_deflection(zo, z), 0.0));
    }

    #[test]
    fn test_clearance_goes_negative() {
        let s = 14.0;
        let zo = 0.2;
        let rise = 8.0 / (3.0 * s) * zo * zo;
        assert!(arch_clearance(s, zo, rise * 0.5) > 0.0);
        assert!(arch_clearance(s, zo, rise * 1.5) < 0.0);
    }

    #[test]
    fn test_stress_chain() {
        // fm = 0.1 * 196 / (4 * 0.5 * 0.4) = 24.5
        let fm = peak_stress(0.1, 14.0, 0.5, 0.4);
        assert!(approx_eq(fm, 24.5), "fm = {}", fm);

        // fav = 24.5/3 * (2/3 + 0.5) = 9.5277...
        let fav = average_stress(fm, 0.5);
        assert!(approx_eq(fav, 24.5 / 3.0 * (2.0 / 3.0 + 0.5)), "fav = {}", fav);

        // dl = fav / E * L
        let dl = elastic_shortening(fav, 20_000.0, 14.02);
        assert!(approx_eq(dl, fav / 20_000.0 * 14.02));
    }

    #[test]
    fn test_safety_factors() {
        assert!(approx_eq(crushing_safety_factor(95.0, 23.75), 2.0));
        assert_eq!(crushing_safety_factor(95.0, f64::INFINITY), 0.0);

        // fm*n*tan / (γe*s) = 20 * 0.5 * 1 / (0.05 * 10) = 20
        assert!(approx_eq(sliding_safety_factor(20.0, 0.5, 1.0, 0.05, 10.0), 20.0));
    }
}
