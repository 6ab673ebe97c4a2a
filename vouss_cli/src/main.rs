//! # Voussoir CLI
//!
//! Command-line front end for the voussoir roof stability engine.
//!
//! ```text
//! vouss_cli run --span 12 --thickness 0.4 --csv roof.csv
//! vouss_cli run --project mine.vsp --item "Drift 4"
//! vouss_cli solve --thickness 0.6 --json
//! vouss_cli init mine.vsp --engineer "A. Geotech"
//! vouss_cli equations
//! ```

mod logging;
mod report;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{bail, WrapErr};
use tracing::info;

use vouss_core::calculations::{solve, sweep, SolverSettings, VoussoirConfig, VoussoirInput};
use vouss_core::equations::generate_equations_markdown;
use vouss_core::file_io::{export_table_csv, export_table_json, load_project, save_project};
use vouss_core::project::Project;
use vouss_core::units::Angle;

#[derive(Parser, Debug)]
#[command(name = "vouss_cli", version)]
#[command(about = "Voussoir beam roof stability for bedded rock excavations")]
struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG overrides
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sweep the bed thickness and print the sensitivity table
    Run {
        #[command(flatten)]
        source: SourceArgs,

        /// Also write the table as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Also write the table as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Solve a single thickness
    Solve {
        #[command(flatten)]
        source: SourceArgs,

        /// Thickness to solve (m); defaults to the base thickness
        #[arg(long = "at")]
        at_thickness: Option<f64>,

        /// Print the result as JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Create a project file holding the reference analysis
    Init {
        /// Project file to create (.vsp)
        path: PathBuf,

        #[arg(long, default_value = "")]
        engineer: String,

        #[arg(long, default_value = "")]
        job_id: String,

        #[arg(long, default_value = "")]
        site: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the equation reference as markdown
    Equations {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AngleUnit {
    Deg,
    Rad,
}

impl AngleUnit {
    fn tag(self, value: f64) -> Angle {
        match self {
            AngleUnit::Deg => Angle::Deg(value),
            AngleUnit::Rad => Angle::Rad(value),
        }
    }
}

/// Where the analysis comes from: a project file, or flags.
///
/// The analysis flags are rejected alongside `--project`.
#[derive(Args, Debug)]
struct SourceArgs {
    /// Read analyses from a project file
    #[arg(long)]
    project: Option<PathBuf>,

    /// Label of the analysis in the project (default: all)
    #[arg(long, requires = "project")]
    item: Option<String>,

    #[arg(long, default_value = "Reference", conflicts_with = "project")]
    label: String,

    /// Excavation span (m)
    #[arg(long, default_value_t = 14.0, conflicts_with = "project")]
    span: f64,

    /// Base bed thickness (m)
    #[arg(long, default_value_t = 0.5, conflicts_with = "project")]
    thickness: f64,

    /// Sweep up to factor × thickness
    #[arg(long, default_value_t = 1.5, conflicts_with = "project")]
    factor: f64,

    /// Young's modulus (MPa)
    #[arg(long, default_value_t = 19_900.0, conflicts_with = "project")]
    modulus: f64,

    /// Bed unit weight (kN/m³)
    #[arg(long, default_value_t = 28.9, conflicts_with = "project")]
    density: f64,

    /// Uniaxial compressive strength (MPa)
    #[arg(long, default_value_t = 95.0, conflicts_with = "project")]
    ucs: f64,

    /// Bedding dip
    #[arg(long, default_value_t = 18.0, allow_negative_numbers = true, conflicts_with = "project")]
    inclination: f64,

    /// Joint friction angle
    #[arg(long, default_value_t = 36.0, conflicts_with = "project")]
    friction: f64,

    /// Unit of --inclination and --friction
    #[arg(long, value_enum, default_value_t = AngleUnit::Deg, conflicts_with = "project")]
    angle_unit: AngleUnit,

    /// Overburden unit weight (kN/m³)
    #[arg(long, default_value_t = 25.9, conflicts_with = "project")]
    upper_density: f64,

    /// Overburden thickness (m)
    #[arg(long, default_value_t = 1.0, conflicts_with = "project")]
    upper_thickness: f64,

    /// Iteration cap per trial
    #[arg(long, default_value_t = 10_000, conflicts_with = "project")]
    max_iterations: usize,

    /// Convergence tolerance on the arch shortening (m)
    #[arg(long, default_value_t = 1e-7, conflicts_with = "project")]
    tolerance: f64,
}

impl SourceArgs {
    fn to_input(&self) -> VoussoirInput {
        VoussoirInput {
            label: self.label.clone(),
            span_m: self.span,
            thickness_m: self.thickness,
            young_modulus_mpa: self.modulus,
            density_kn_m3: self.density,
            ucs_mpa: self.ucs,
            inclination: self.angle_unit.tag(self.inclination),
            friction_angle: self.angle_unit.tag(self.friction),
            upper_density_kn_m3: self.upper_density,
            upper_thickness_m: self.upper_thickness,
            thickness_factor: self.factor,
            solver: SolverSettings {
                tolerance: self.tolerance,
                max_iterations: self.max_iterations,
                ..SolverSettings::default()
            },
        }
    }

    /// Resolve the analyses to run.
    fn inputs(&self) -> color_eyre::Result<Vec<VoussoirInput>> {
        let Some(path) = &self.project else {
            return Ok(vec![self.to_input()]);
        };

        let project = load_project(path)
            .wrap_err_with(|| format!("failed to load project {}", path.display()))?;

        if let Some(label) = &self.item {
            let (_, input) = project.find_by_label(label)?;
            return Ok(vec![input.clone()]);
        }

        let inputs: Vec<VoussoirInput> =
            project.sorted_items().into_iter().map(|(_, input)| input.clone()).collect();
        if inputs.is_empty() {
            bail!("project {} has no analyses", path.display());
        }
        Ok(inputs)
    }
}

/// `roof.csv` for a single analysis, `roof_<label>.csv` when there are several.
fn export_path(base: &Path, label: &str, many: bool) -> PathBuf {
    if !many {
        return base.to_path_buf();
    }
    let stem = base.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let slug: String = label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let mut name = format!("{}_{}", stem, slug);
    if let Some(ext) = base.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    base.with_file_name(name)
}

fn cmd_run(
    source: &SourceArgs,
    csv: Option<&Path>,
    json: Option<&Path>,
) -> color_eyre::Result<()> {
    let inputs = source.inputs()?;
    let many = inputs.len() > 1;

    for input in &inputs {
        let config = VoussoirConfig::from_input(input)
            .wrap_err_with(|| format!("invalid analysis '{}'", input.label))?;
        let table = sweep(&config)?;

        println!("{}", report::input_summary(input));
        println!("{}", report::sweep_table(&table));

        if let Some(base) = csv {
            let path = export_path(base, &input.label, many);
            export_table_csv(&table, &path)?;
            println!("CSV written to {}", path.display());
        }
        if let Some(base) = json {
            let path = export_path(base, &input.label, many);
            export_table_json(&table, &path)?;
            println!("JSON written to {}", path.display());
        }
    }
    Ok(())
}

fn cmd_solve(
    source: &SourceArgs,
    at_thickness: Option<f64>,
    as_json: bool,
) -> color_eyre::Result<()> {
    let inputs = source.inputs()?;
    if inputs.len() > 1 {
        bail!("project holds {} analyses; pick one with --item", inputs.len());
    }
    let Some(input) = inputs.first() else {
        bail!("no analysis to solve");
    };

    let config = VoussoirConfig::from_input(input)
        .wrap_err_with(|| format!("invalid analysis '{}'", input.label))?;
    let thickness = at_thickness.unwrap_or(config.base_thickness_m());
    let result = solve(&config, thickness)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", report::input_summary(input));
        print!("{}", report::solve_report(&result));
    }
    Ok(())
}

fn cmd_init(
    path: &Path,
    engineer: &str,
    job_id: &str,
    site: &str,
    force: bool,
) -> color_eyre::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let mut project = Project::new(engineer, job_id, site);
    project.add_item(VoussoirInput::reference());
    save_project(&project, path)?;
    info!(path = %path.display(), "created project");
    println!("Created {}", path.display());
    Ok(())
}

fn cmd_equations(output: Option<&Path>) -> color_eyre::Result<()> {
    let markdown = generate_equations_markdown();
    match output {
        Some(path) => {
            std::fs::write(path, &markdown)
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", markdown),
    }
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init_logging(&cli.log_level)?;

    match &cli.command {
        Command::Run { source, csv, json } => cmd_run(source, csv.as_deref(), json.as_deref()),
        Command::Solve { source, at_thickness, json } => cmd_solve(source, *at_thickness, *json),
        Command::Init { path, engineer, job_id, site, force } => {
            cmd_init(path, engineer, job_id, site, *force)
        }
        Command::Equations { output } => cmd_equations(output.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flag_defaults_match_reference() {
        let cli = Cli::parse_from(["vouss_cli", "run"]);
        let Command::Run { source, .. } = cli.command else {
            panic!("expected run");
        };
        assert_eq!(source.to_input(), VoussoirInput::reference());
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn test_radian_flags() {
        let cli = Cli::parse_from([
            "vouss_cli",
            "solve",
            "--angle-unit",
            "rad",
            "--inclination",
            "0.1",
            "--friction",
            "0.6",
            "--at",
            "0.7",
        ]);
        let Command::Solve { source, at_thickness, .. } = cli.command else {
            panic!("expected solve");
        };
        let input = source.to_input();
        assert_eq!(input.inclination, Angle::Rad(0.1));
        assert_eq!(input.friction_angle, Angle::Rad(0.6));
        assert_eq!(at_thickness, Some(0.7));
    }

    #[test]
    fn test_item_requires_project() {
        assert!(Cli::try_parse_from(["vouss_cli", "run", "--item", "Drift 4"]).is_err());
    }

    #[test]
    fn test_analysis_flags_conflict_with_project() {
        let with_project = ["vouss_cli", "run", "--project", "mine.vsp"];
        assert!(Cli::try_parse_from(with_project).is_ok());
        let with_item = ["vouss_cli", "run", "--project", "mine.vsp", "--item", "A"];
        assert!(Cli::try_parse_from(with_item).is_ok());

        let flags = [
            ["--span", "12"],
            ["--thickness", "0.4"],
            ["--tolerance", "1e-6"],
            ["--label", "B"],
        ];
        for flag in flags {
            let args = with_project.iter().chain(flag.iter());
            let err = Cli::try_parse_from(args).unwrap_err();
            assert_eq!(
                err.kind(),
                clap::error::ErrorKind::ArgumentConflict,
                "{} accepted",
                flag[0]
            );
        }

        let args = [
            "vouss_cli",
            "solve",
            "--project",
            "mine.vsp",
            "--at",
            "0.6",
            "--angle-unit",
            "rad",
        ];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_export_path() {
        let base = Path::new("/tmp/roof.csv");
        assert_eq!(export_path(base, "Drift 4", false), PathBuf::from("/tmp/roof.csv"));
        assert_eq!(export_path(base, "Drift 4", true), PathBuf::from("/tmp/roof_Drift_4.csv"));
    }
}
