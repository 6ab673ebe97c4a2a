//! # Equation Registry
//!
//! Central registry of every formula used in a voussoir analysis. Each equation
//! carries its plain-text formula, variables, reference and the function that
//! implements it, so an engineer can audit the calculation chain.
//!
//! ## Usage
//!
//! ```rust
//! use vouss_core::equations::registry::{Equation, EquationCategory};
//!
//! let meta = Equation::PeakStress.metadata();
//! assert_eq!(meta.category, EquationCategory::Stresses);
//! println!("Formula: {}", meta.formula_plain);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// References
// ============================================================================

/// Source of an equation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reference {
    /// Diederichs & Kaiser (1999), The voussoir analogue revisited
    DiederichsKaiser { section: &'static str },
    /// Fundamental mechanics (no specific reference needed)
    Mechanics,
}

impl Reference {
    /// Format the reference for display
    pub fn citation(&self) -> String {
        match self {
            Reference::DiederichsKaiser { section } => {
                format!("Diederichs & Kaiser (1999), {}", section)
            }
            Reference::Mechanics => "Fundamental Mechanics".to_string(),
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for organizing equations in the reference document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Self-weight and surcharge
    Loading,
    /// Thrust-line geometry (crown rise, arc length, clearance)
    ArchGeometry,
    /// Stress factors and elastic shortening
    Stresses,
    /// Deflection of the converged arch
    Deflections,
    /// Crushing and sliding checks
    SafetyFactors,
}

impl EquationCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::Loading => "Loading",
            EquationCategory::ArchGeometry => "Arch Geometry",
            EquationCategory::Stresses => "Stresses",
            EquationCategory::Deflections => "Deflections",
            EquationCategory::SafetyFactors => "Safety Factors",
        }
    }

    /// Sort order in the reference document (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::Loading => 1,
            EquationCategory::ArchGeometry => 2,
            EquationCategory::Stresses => 3,
            EquationCategory::Deflections => 4,
            EquationCategory::SafetyFactors => 5,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    pub symbol: &'static str,
    pub description: &'static str,
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for one equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// What the equation calculates
    pub description: &'static str,
    /// Formula in plain text
    pub formula_plain: &'static str,
    pub reference: Reference,
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All equations used by the voussoir solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    /// q = (7/9)·γu·hu / t
    ParabolicSurcharge,
    /// γe = (γ + q)·cos(α) / 1000
    EffectiveUnitWeight,
    /// zo = t(1 − 2n/3)
    CrownRise,
    /// L = s + 8zo²/(3s)
    ArcLength,
    /// z_chk = 8zo²/(3s) − dl
    ArchClearance,
    /// z = √(3s·z_chk/8)
    ArchRise,
    /// fm = γe·s²/(4nz)
    PeakStress,
    /// fav = fm/3·(2/3 + n)
    AverageStress,
    /// dl = fav·L/E
    ElasticShortening,
    /// δ = zo − z
    MidspanDeflection,
    /// FS = (σc/2)/fm
    CrushingSafetyFactor,
    /// FS = fm·n·tanφ/(γe·s)
    SlidingSafetyFactor,
}

const D_K_LOADING: Reference = Reference::DiederichsKaiser { section: "Sec. 3" };
const D_K_GEOMETRY: Reference = Reference::DiederichsKaiser { section: "Sec. 3, Eq. 3-6" };
const D_K_ITERATION: Reference = Reference::DiederichsKaiser { section: "Sec. 3, Eq. 7-9" };
const D_K_FAILURE: Reference = Reference::DiederichsKaiser { section: "Sec. 4" };

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::ParabolicSurcharge => EquationMetadata {
                name: "Parabolic Surcharge",
                description: "Equivalent unit weight added to the bed by an overlying layer \
                              with parabolic pressure distribution",
                formula_plain: "q = (7/9) * gamma_u * h_u / t",
                reference: D_K_LOADING,
                variables: vec![
                    Variable::new("gamma_u", "Unit weight of the overlying layer", "kN/m3"),
                    Variable::new("h_u", "Thickness of the overlying layer", "m"),
                    Variable::new("t", "Bed thickness", "m"),
                    Variable::new("q", "Equivalent surcharge unit weight", "kN/m3"),
                ],
                assumptions: vec![
                    "Overlying layer rests on the bed without arching itself",
                    "t > 0",
                ],
                category: EquationCategory::Loading,
                source_module: "equations/voussoir.rs",
                source_function: "parabolic_surcharge",
            },

            Equation::EffectiveUnitWeight => EquationMetadata {
                name: "Effective Unit Weight",
                description: "Load normal to the inclined bed, converted to stress units",
                formula_plain: "gamma_e = (gamma + q) * cos(alpha) / 1000",
                reference: D_K_GEOMETRY,
                variables: vec![
                    Variable::new("gamma", "Unit weight of the bed", "kN/m3"),
                    Variable::new("alpha", "Bedding inclination", "rad"),
                    Variable::new("gamma_e", "Effective unit weight", "MN/m3"),
                ],
                assumptions: vec!["Only the component normal to bedding loads the beam"],
                category: EquationCategory::Loading,
                source_module: "loads.rs",
                source_function: "effective_unit_weight",
            },

            Equation::CrownRise => EquationMetadata {
                name: "Initial Crown Rise",
                description: "Lever arm of the thrust line before elastic shortening",
                formula_plain: "zo = t * (1 - 2n/3)",
                reference: D_K_GEOMETRY,
                variables: vec![
                    Variable::new("n", "Compression zone depth ratio", "-"),
                    Variable::new("zo", "Initial crown rise", "m"),
                ],
                assumptions: vec!["Triangular compression block at abutments and crown"],
                category: EquationCategory::ArchGeometry,
                source_module: "equations/voussoir.rs",
                source_function: "crown_rise",
            },

            Equation::ArcLength => EquationMetadata {
                name: "Thrust Arch Length",
                description: "Length of the parabolic thrust line between abutments",
                formula_plain: "L = s + 8 * zo^2 / (3s)",
                reference: D_K_GEOMETRY,
                variables: vec![
                    Variable::new("s", "Span", "m"),
                    Variable::new("L", "Arch length", "m"),
                ],
                assumptions: vec!["Shallow parabolic arch (zo << s)"],
                category: EquationCategory::ArchGeometry,
                source_module: "equations/voussoir.rs",
                source_function: "arc_length",
            },

            Equation::ArchClearance => EquationMetadata {
                name: "Arch Clearance",
                description: "Rise term left after elastic shortening; negative means snap-through",
                formula_plain: "z_chk = 8 * zo^2 / (3s) - dl",
                reference: D_K_ITERATION,
                variables: vec![
                    Variable::new("dl", "Elastic shortening of the arch", "m"),
                    Variable::new("z_chk", "Clearance", "m"),
                ],
                assumptions: vec!["z_chk <= 0 is treated as buckling of the trial"],
                category: EquationCategory::ArchGeometry,
                source_module: "equations/voussoir.rs",
                source_function: "arch_clearance",
            },

            Equation::ArchRise => EquationMetadata {
                name: "Arch Rise",
                description: "Lever arm of the thrust line after elastic shortening",
                formula_plain: "z = sqrt(3s * z_chk / 8)",
                reference: D_K_ITERATION,
                variables: vec![
                    Variable::new("z", "Arch rise", "m"),
                ],
                assumptions: vec!["z_chk >= 0"],
                category: EquationCategory::ArchGeometry,
                source_module: "equations/voussoir.rs",
                source_function: "arch_rise",
            },

            Equation::PeakStress => EquationMetadata {
                name: "Peak Compressive Stress",
                description: "Maximum stress at abutments and crown from moment equilibrium \
                              of the half-beam",
                formula_plain: "fm = gamma_e * s^2 / (4 n z)",
                reference: D_K_GEOMETRY,
                variables: vec![
                    Variable::new("fm", "Peak compressive stress", "MPa"),
                ],
                assumptions: vec!["n > 0", "z > 0"],
                category: EquationCategory::Stresses,
                source_module: "equations/voussoir.rs",
                source_function: "peak_stress",
            },

            Equation::AverageStress => EquationMetadata {
                name: "Average Arch Stress",
                description: "Mean stress along the thrust arch",
                formula_plain: "fav = fm / 3 * (2/3 + n)",
                reference: D_K_ITERATION,
                variables: vec![
                    Variable::new("fav", "Average stress", "MPa"),
                ],
                assumptions: vec!["Linear stress distribution over the compression zone"],
                category: EquationCategory::Stresses,
                source_module: "equations/voussoir.rs",
                source_function: "average_stress",
            },

            Equation::ElasticShortening => EquationMetadata {
                name: "Elastic Arch Shortening",
                description: "Shortening of the arch under its average stress",
                formula_plain: "dl = fav / E * L",
                reference: D_K_ITERATION,
                variables: vec![
                    Variable::new("E", "Rock mass modulus", "MPa"),
                    Variable::new("dl", "Shortening", "m"),
                ],
                assumptions: vec!["Linear elastic rock mass", "Iterated to |ddl| <= 1e-7 m"],
                category: EquationCategory::Stresses,
                source_module: "equations/voussoir.rs",
                source_function: "elastic_shortening",
            },

            Equation::MidspanDeflection => EquationMetadata {
                name: "Midspan Deflection",
                description: "Loss of rise between the initial and the converged arch",
                formula_plain: "delta = zo - z",
                reference: Reference::Mechanics,
                variables: vec![
                    Variable::new("delta", "Midspan deflection", "m"),
                ],
                assumptions: vec!["Evaluated for the trial with minimum fm"],
                category: EquationCategory::Deflections,
                source_module: "equations/voussoir.rs",
                source_function: "midspan_deflection",
            },

            Equation::CrushingSafetyFactor => EquationMetadata {
                name: "Crushing Safety Factor",
                description: "Available compressive strength over peak arch stress",
                formula_plain: "FS_crush = (sigma_c / 2) / fm",
                reference: D_K_FAILURE,
                variables: vec![
                    Variable::new("sigma_c", "Uniaxial compressive strength", "MPa"),
                ],
                assumptions: vec!["Half the UCS is mobilised in the compression zone"],
                category: EquationCategory::SafetyFactors,
                source_module: "equations/voussoir.rs",
                source_function: "crushing_safety_factor",
            },

            Equation::SlidingSafetyFactor => EquationMetadata {
                name: "Sliding Safety Factor",
                description: "Frictional resistance of the abutment joints over the shear demand",
                formula_plain: "FS_slide = fm * n * tan(phi) / (gamma_e * s)",
                reference: D_K_FAILURE,
                variables: vec![
                    Variable::new("phi", "Joint friction angle", "rad"),
                ],
                assumptions: vec!["Vertical abutment joints", "No cohesion"],
                category: EquationCategory::SafetyFactors,
                source_module: "equations/voussoir.rs",
                source_function: "sliding_safety_factor",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories, sorted
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![Loading, ArchGeometry, Stresses, Deflections, SafetyFactors];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::ParabolicSurcharge,
    Equation::EffectiveUnitWeight,
    Equation::CrownRise,
    Equation::ArcLength,
    Equation::ArchClearance,
    Equation::ArchRise,
    Equation::PeakStress,
    Equation::AverageStress,
    Equation::ElasticShortening,
    Equation::MidspanDeflection,
    Equation::CrushingSafetyFactor,
    Equation::SlidingSafetyFactor,
];

// ============================================================================
// Markdown Generation for EQUATIONS.md
// ============================================================================

/// Generate a complete EQUATIONS.md document.
///
/// ```rust
/// use vouss_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Voussoir Equations Reference"));
/// assert!(markdown.contains("Arch Geometry"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(12_000);

    output.push_str(r#"# Voussoir Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

This document lists every formula used by the voussoir roof solver, with its
reference, source location and assumptions.

## Solution Procedure

For each bed thickness t:

1. Compute the effective unit weight gamma_e.
2. For n = 0.01, 0.02, ..., 1.00:
   - compute zo and L;
   - starting from dl = 0, iterate z_chk -> z -> fm -> fav -> dl until the change
     in dl is at most the solver tolerance (1e-7 m by default);
   - if z_chk <= 0 at any step the trial buckles and is excluded.
3. Keep the trial with the smallest fm (first one wins ties) and derive the safety factors.

---

"#);

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!(
                        "| {} | {} | {} |\n",
                        var.symbol, var.description, var.units
                    ));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_equations_have_metadata() {
        assert_eq!(ALL_EQUATIONS.len(), 12);

        for eq in ALL_EQUATIONS {
            let meta = eq.metadata();
            assert!(!meta.name.is_empty(), "Equation {:?} has no name", eq);
            assert!(!meta.formula_plain.is_empty(), "Equation {:?} has no formula", eq);
            assert!(!meta.variables.is_empty(), "Equation {:?} has no variables", eq);
            assert!(!meta.source_function.is_empty(), "Equation {:?} missing source_function", eq);
        }

        let peak = Equation::PeakStress.metadata();
        assert!(peak.formula_plain.contains("4 n z"), "Peak stress formula wrong");
    }

    #[test]
    fn test_reference_citation() {
        let dk = Reference::DiederichsKaiser { section: "Sec. 4" };
        assert_eq!(dk.citation(), "Diederichs & Kaiser (1999), Sec. 4");
        assert_eq!(Reference::Mechanics.citation(), "Fundamental Mechanics");
    }

    #[test]
    fn test_surcharge_cites_diederichs_kaiser() {
        let surcharge = Equation::ParabolicSurcharge.metadata();
        assert_eq!(surcharge.reference.citation(), "Diederichs & Kaiser (1999), Sec. 3");
        assert!(generate_equations_markdown().contains("Diederichs & Kaiser (1999), Sec. 3"));
    }

    #[test]
    fn test_every_category_populated() {
        for cat in Equation::all_categories() {
            assert!(!Equation::in_category(cat).is_empty(), "{:?} is empty", cat);
        }
    }

    #[test]
    fn test_categories_sorted() {
        let cats = Equation::all_categories();
        let orders: Vec<u8> = cats.iter().map(|c| c.sort_order()).collect();
        let mut sorted = orders.clone();
        sorted.sort();
        assert_eq!(orders, sorted);
    }

    #[test]
    fn test_generate_equations_markdown() {
        let markdown = generate_equations_markdown();

        assert!(markdown.contains("# Voussoir Equations Reference"));
        assert!(markdown.contains("## Solution Procedure"));
        assert!(markdown.contains("## Loading"));
        assert!(markdown.contains("## Safety Factors"));
        assert!(markdown.contains("`zo = t * (1 - 2n/3)`"));
        assert!(markdown.contains("Diederichs & Kaiser (1999)"));
        assert!(markdown.contains("equations/voussoir.rs"));
        assert!(markdown.contains("**Total Equations:** 12"));
        assert!(markdown.contains("**Categories:** 5"));
    }
}
