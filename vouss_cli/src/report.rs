//! Plain-text rendering of solve results and sweep tables.

use vouss_core::calculations::{SolveResult, SweepTable, VoussoirInput};
use vouss_core::units::Angle;

/// Safety factor the sweep summary looks for.
pub const TARGET_SAFETY: f64 = 2.0;

/// Format a value for the console, spelling out infinities.
pub fn fmt_value(value: f64, precision: usize) -> String {
    if value.is_infinite() {
        if value > 0.0 { "inf".to_string() } else { "-inf".to_string() }
    } else if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.*}", precision, value)
    }
}

fn fmt_angle(angle: Angle) -> String {
    match angle {
        Angle::Deg(d) => format!("{}°", d),
        Angle::Rad(r) => format!("{} rad", r),
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}

/// Summary of the inputs of one analysis.
pub fn input_summary(input: &VoussoirInput) -> String {
    let mut out = String::new();
    out.push_str(&format!("Analysis: {}\n", input.label));
    out.push_str(&format!("  Span:         {} m\n", input.span_m));
    out.push_str(&format!(
        "  Thickness:    {} m to {} m\n",
        input.thickness_m,
        input.thickness_m * input.thickness_factor
    ));
    out.push_str(&format!(
        "  Rock:         E = {} MPa, γ = {} kN/m³, UCS = {} MPa\n",
        input.young_modulus_mpa, input.density_kn_m3, input.ucs_mpa
    ));
    out.push_str(&format!(
        "  Angles:       dip {}, friction {}\n",
        fmt_angle(input.inclination),
        fmt_angle(input.friction_angle)
    ));
    out.push_str(&format!(
        "  Overburden:   {} m at {} kN/m³\n",
        input.upper_thickness_m, input.upper_density_kn_m3
    ));
    out
}

/// Report for a single thickness.
pub fn solve_report(result: &SolveResult) -> String {
    let mut out = String::new();
    let w = &result.winner;

    out.push_str("═══════════════════════════════════════\n");
    out.push_str(&format!("  VOUSSOIR SOLUTION  t = {} m\n", result.thickness_m));
    out.push_str("═══════════════════════════════════════\n\n");

    out.push_str("Arch:\n");
    out.push_str(&format!("  γe    = {} MN/m³\n", fmt_value(result.effective_unit_weight.0, 6)));
    out.push_str(&format!("  n     = {}\n", fmt_value(w.n(), 2)));
    out.push_str(&format!("  zo    = {} m\n", fmt_value(w.zo(), 4)));
    out.push_str(&format!("  z     = {} m\n", fmt_value(w.z(), 4)));
    out.push_str(&format!("  fm    = {} MPa\n", fmt_value(w.fm(), 3)));
    out.push_str(&format!("  fav   = {} MPa\n", fmt_value(w.fav(), 3)));
    out.push_str(&format!("  δ     = {} m\n\n", fmt_value(result.deflection, 4)));

    out.push_str("Checks:\n");
    out.push_str(&format!(
        "  Crushing:  FS = {} {}\n",
        fmt_value(result.fs_crush, 2),
        status_icon(result.fs_crush >= 1.0)
    ));
    out.push_str(&format!(
        "  Sliding:   FS = {} {}\n",
        fmt_value(result.fs_sliding, 2),
        status_icon(result.fs_sliding >= 1.0)
    ));
    out.push_str(&format!(
        "  Buckling:  limit = {} {}\n",
        result.buck_limit,
        status_icon(!result.total_instability)
    ));
    if result.non_converged > 0 {
        out.push_str(&format!("  ({} trials hit the iteration cap)\n", result.non_converged));
    }

    out.push_str("\n═══════════════════════════════════════\n");
    out.push_str(&format!(
        "  GOVERNS: {} (FS = {})\n",
        result.governing_condition(),
        fmt_value(result.governing_safety_factor(), 2)
    ));
    out.push_str("═══════════════════════════════════════\n");
    out
}

/// Fixed-width table of a sweep.
pub fn sweep_table(table: &SweepTable) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>8} {:>5} {:>8} {:>8} {:>9} {:>5} {:>8} {:>8} {:>9}\n",
        "t (m)", "n", "z (m)", "fm", "fav", "buck", "FS_cr", "FS_sl", "δ (m)"
    ));
    for row in &table.rows {
        out.push_str(&format!(
            "{:>8} {:>5} {:>8} {:>8} {:>9} {:>5} {:>8} {:>8} {:>9}\n",
            fmt_value(row.thickness, 4),
            fmt_value(row.n, 2),
            fmt_value(row.z, 4),
            fmt_value(row.fm, 3),
            fmt_value(row.fav, 3),
            row.buck_limit,
            fmt_value(row.fs_crush, 2),
            fmt_value(row.fs_sliding, 2),
            fmt_value(row.deflection, 5),
        ));
    }

    match table.first_thickness_with_safety(TARGET_SAFETY) {
        Some(t) => out.push_str(&format!(
            "\nThinnest bed with FS >= {}: {} m\n",
            TARGET_SAFETY,
            fmt_value(t, 4)
        )),
        None => out.push_str(&format!("\nNo bed in range reaches FS >= {}\n", TARGET_SAFETY)),
    }

    let unstable = table.rows.iter().filter(|r| !r.is_stable()).count();
    if unstable > 0 {
        out.push_str(&format!(
            "{} of {} thicknesses have no admissible arch\n",
            unstable,
            table.len()
        ));
    }
    out
}
