//! # Voussoir Equations
//!
//! All closed-form relations used by the solver live here, in one place, so they
//! can be checked against the reference paper and documented automatically.
//!
//! ## Modules
//!
//! - [`voussoir`] - Loading, arch geometry, stresses and safety factors
//! - [`registry`] - Equation metadata for the generated EQUATIONS.md
//!
//! ## Conventions
//!
//! - **Loads**: positive downward, normal to bedding
//! - **Stresses**: positive in compression (MPa)
//! - **Deflection**: positive downward (m)

pub mod registry;
pub mod voussoir;

pub use voussoir::{
    arc_length,
    arch_clearance,
    arch_rise,
    average_stress,
    crown_rise,
    crushing_safety_factor,
    elastic_shortening,
    inclined_unit_weight,
    midspan_deflection,
    parabolic_surcharge,
    peak_stress,
    sliding_safety_factor,
};

pub use registry::{
    Equation,
    EquationCategory,
    EquationMetadata,
    Reference,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
