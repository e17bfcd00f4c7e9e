use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shotplan::config::{FileConfig, Overlap};
use shotplan::coverage::compass_direction;
use shotplan::domain::{BuildingLimit, PackageConfig};
use shotplan::export::{write_geojson, write_plan_json};
use shotplan::planner::{FlightPath, plan_coverage, validate_flight_path};
use shotplan::survey::parse_survey;

/// Plan drone photo coverage for a surveyed property
///
/// Examples:
///   # Plan the standard package for a surveyed lot
///   shotplan lot.json
///
///   # Premium package with GeoJSON for the map view
///   shotplan lot.json -p premium --geojson lot.geojson
///
///   # Tighter overlap at a fixed altitude
///   shotplan lot.json --front-overlap 80 --side-overlap 70 --altitude 45
///
///   # Show the available packages
///   shotplan --list-packages
#[derive(Parser, Debug)]
#[command(name = "shotplan")]
#[command(version, about, long_about = None)]
struct Args {
    /// Survey JSON file with the property boundary, structures and points of interest
    #[arg(required_unless_present = "list_packages")]
    survey: Option<PathBuf>,

    /// Path to config file (optional, auto-searches shotplan.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Package id to plan for (defaults to "standard")
    #[arg(short = 'p', long)]
    package: Option<String>,

    /// Forward overlap between consecutive photos, in percent
    #[arg(long)]
    front_overlap: Option<f64>,

    /// Side overlap between neighbouring flight lines, in percent
    #[arg(long)]
    side_overlap: Option<f64>,

    /// Flight altitude in meters before the package multiplier
    #[arg(long)]
    altitude: Option<f64>,

    /// Output plan JSON path (defaults to {survey}.plan.json)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Also write the plan as GeoJSON
    #[arg(long)]
    geojson: Option<PathBuf>,

    /// List available packages and exit
    #[arg(long)]
    list_packages: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    // Warnings raised while searching for a config file still reach stderr
    let bootstrap = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let file_config = tracing::subscriber::with_default(bootstrap, || load_config(&args))?;

    let verbose = verbose_enabled(&args, &file_config);
    init_tracing(verbose)?;

    if args.list_packages {
        print_packages(&file_config.packages());
        return Ok(());
    }

    let Some(survey_path) = args.survey.clone() else {
        bail!("A survey file is required");
    };

    let package_id = args
        .package
        .clone()
        .or_else(|| file_config.package.clone())
        .unwrap_or_else(|| "standard".to_string());
    let Some(package) = file_config.find_package(&package_id) else {
        let known: Vec<String> = file_config.packages().into_iter().map(|p| p.id).collect();
        bail!(
            "Unknown package \"{}\". Available: {}",
            package_id,
            known.join(", ")
        );
    };

    let file_overlap = file_config.overlap();
    let overlap = Overlap::new(
        args.front_overlap.unwrap_or(file_overlap.front_pct),
        args.side_overlap.unwrap_or(file_overlap.side_pct),
    );
    if !(0.0..100.0).contains(&overlap.front_pct) || !(0.0..100.0).contains(&overlap.side_pct) {
        bail!(
            "Overlap must be between 0 and 100 percent (got {} / {})",
            overlap.front_pct,
            overlap.side_pct
        );
    }

    let mut drone = file_config.drone.clone().unwrap_or_default();
    if let Some(altitude) = args.altitude {
        if !(altitude > 0.0) {
            bail!("--altitude must be positive");
        }
        if altitude < drone.min_altitude_m || altitude > drone.max_altitude_m {
            tracing::warn!(
                altitude,
                min = drone.min_altitude_m,
                max = drone.max_altitude_m,
                "altitude outside the drone envelope, it will be clamped"
            );
        }
        drone.default_altitude_m = altitude;
    }
    let settings = file_config.planner.unwrap_or_default();

    let output_path = args
        .output
        .clone()
        .or_else(|| file_config.output.clone())
        .unwrap_or_else(|| survey_path.with_extension("plan.json"));
    let geojson_path = args.geojson.clone().or_else(|| file_config.geojson.clone());

    println!("shotplan - Drone Photo Coverage Planner");
    println!("=======================================");
    println!();

    if verbose {
        println!("Configuration:");
        println!("  Survey: {}", survey_path.display());
        println!("  Package: {} ({})", package.display_name(), package.id);
        println!(
            "  Overlap: {}% front / {}% side",
            overlap.front_pct, overlap.side_pct
        );
        println!(
            "  Camera: {}x{}mm sensor, {}mm lens, {}x{}px",
            drone.sensor_width_mm,
            drone.sensor_height_mm,
            drone.focal_length_mm,
            drone.image_width_px,
            drone.image_height_px
        );
        println!(
            "  Altitude: {}m (allowed {}-{}m)",
            drone.default_altitude_m, drone.min_altitude_m, drone.max_altitude_m
        );
        println!("  Orbit standoff: {}m", settings.orbit_standoff_m);
        println!("  Output: {}", output_path.display());
        println!();
    }

    let spinner = create_spinner("Reading survey...");
    let start = Instant::now();
    let contents = std::fs::read_to_string(&survey_path)
        .with_context(|| format!("Failed to read survey file: {}", survey_path.display()))?;
    let survey = parse_survey(&contents)
        .with_context(|| format!("Invalid survey file: {}", survey_path.display()))?;
    spinner.finish_with_message(format!(
        "{} boundary with {} vertices, {} structures, {} points of interest [{:.1}s]",
        survey.boundary.shape_name(),
        survey.ring.len(),
        survey.obstacles.len(),
        survey.points_of_interest.len(),
        start.elapsed().as_secs_f32()
    ));

    let spinner = create_spinner("Planning coverage...");
    let start = Instant::now();
    let plan = plan_coverage(
        &survey.ring,
        &survey.obstacles,
        &drone,
        &overlap,
        &package,
        &settings,
    )
    .context("No flight plan fits this property (check the boundary, camera and overlap)")?;
    let plan = plan.with_points_of_interest(&survey.points_of_interest, &drone, &settings);
    spinner.finish_with_message(format!(
        "Planned {} photos [{:.1}s]",
        plan.photo_counts.total,
        start.elapsed().as_secs_f32()
    ));

    let validation = validate_flight_path(&plan);
    if validation.has_issues() {
        println!("  {}", validation.summary());
        for warning in &validation.warnings {
            tracing::warn!("{}", warning);
        }
    }
    if !validation.is_valid() {
        bail!("Flight plan failed validation");
    }

    let spinner = create_spinner("Writing plan...");
    let start = Instant::now();
    write_plan_json(&output_path, &plan).context("Failed to write plan")?;
    if let Some(ref path) = geojson_path {
        write_geojson(path, &plan, &survey.ring).context("Failed to write GeoJSON")?;
    }
    spinner.finish_with_message(format!(
        "Wrote {} [{:.1}s]",
        output_path.display(),
        start.elapsed().as_secs_f32()
    ));

    println!();
    print_summary(&plan, verbose);
    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );
    println!();
    println!("Output: {}", output_path.display());
    if let Some(path) = geojson_path {
        println!("GeoJSON: {}", path.display());
    }

    Ok(())
}

fn load_config(args: &Args) -> Result<FileConfig> {
    if let Some(ref config_path) = args.config {
        if !config_path.exists() {
            bail!("Config file not found: {:?}", config_path);
        }
        let contents = std::fs::read_to_string(config_path)
            .context(format!("Failed to read config file: {:?}", config_path))?;
        Ok(toml::from_str(&contents).context("Failed to parse config file")?)
    } else {
        Ok(FileConfig::load().unwrap_or_default())
    }
}

/// Either the flag or `verbose = true` in the config file turns on debug output
fn verbose_enabled(args: &Args, file_config: &FileConfig) -> bool {
    args.verbose || file_config.verbose
}

fn log_directive(verbose: bool) -> &'static str {
    if verbose { "shotplan=debug" } else { "warn" }
}

fn init_tracing(verbose: bool) -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(log_directive(verbose).parse()?),
        )
        .init();
    Ok(())
}

fn print_summary(plan: &FlightPath, verbose: bool) {
    let counts = &plan.photo_counts;
    println!("Property:");
    println!(
        "  Area: {:.0} sq ft ({:.2} acres, {:.2} ha)",
        plan.area.sq_feet, plan.area.acres, plan.area.hectares
    );
    println!(
        "  Perimeter: {:.0}m ({:.0} ft)",
        plan.perimeter.meters, plan.perimeter.feet
    );
    println!();
    println!("Camera:");
    println!("  Altitude: {:.0}m", plan.altitude_m);
    println!("  GSD: {:.2} cm/px", plan.gsd_cm_per_px);
    println!(
        "  Footprint: {:.1}m x {:.1}m",
        plan.footprint.width, plan.footprint.height
    );
    println!(
        "  Spacing: {:.1}m front x {:.1}m side",
        plan.spacing.front, plan.spacing.side
    );
    println!(
        "  Full coverage would need {} photos ({} recommended)",
        plan.photo_estimate.minimum, plan.photo_estimate.recommended
    );
    println!();
    println!("Photos: {}", counts.total);
    println!("  Top-down: {}", counts.top_down);
    println!("  Angled: {}", counts.angled);
    println!("  Buildings: {}", counts.building);
    if counts.point_of_interest > 0 {
        println!("  Points of interest: {}", counts.point_of_interest);
    }
    if !plan.grid_reached_target {
        println!(
            "  Note: only {} top-down positions fit after {} grid attempts",
            counts.top_down, plan.grid_attempts
        );
    }
    println!();
    println!(
        "Flight: {:.0}m ({:.2} mi), about {}",
        plan.total_distance.meters, plan.total_distance.miles, plan.flight_time.formatted
    );

    if verbose {
        for orbit in &plan.building_orbits {
            println!();
            println!(
                "{} ({}): {} shots at {:.0}m radius",
                orbit.name,
                orbit.kind.label(),
                orbit.shots.len(),
                orbit.radius_m
            );
            for shot in &orbit.shots {
                let bearing = shot.compass_bearing.unwrap_or(0.0);
                println!(
                    "  facing {:>3} ({:>5.1}°), {:.0}° below horizon, {}",
                    compass_direction(bearing),
                    bearing,
                    shot.camera.degrees_from_horizontal,
                    if shot.target_visible == Some(true) {
                        "facade in frame"
                    } else {
                        "mostly roof"
                    }
                );
            }
        }
    }
}

fn print_packages(packages: &[PackageConfig]) {
    println!("Available packages:");
    for package in packages {
        let buildings = match package.included_buildings {
            BuildingLimit::Limited(n) => n.to_string(),
            BuildingLimit::Unlimited => "all".to_string(),
        };
        println!(
            "  {:<10} {:<16} {:>3} photos, {:>3} top-down, buildings: {}, spacing x{}, altitude x{}",
            package.id,
            package.display_name(),
            package.total_photos,
            package.top_down_shots,
            buildings,
            package.spacing_multiplier,
            package.altitude_multiplier
        );
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_enables_debug_logging() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("shotplan.toml");
        std::fs::write(&config_path, "verbose = true\n").unwrap();

        let args = Args::try_parse_from([
            "shotplan",
            "lot.json",
            "--config",
            config_path.to_str().unwrap(),
        ])
        .unwrap();
        let file_config = load_config(&args).unwrap();
        assert!(verbose_enabled(&args, &file_config));
        assert_eq!(log_directive(verbose_enabled(&args, &file_config)), "shotplan=debug");
    }

    #[test]
    fn test_quiet_by_default() {
        let args = Args::try_parse_from(["shotplan", "lot.json"]).unwrap();
        assert!(!verbose_enabled(&args, &FileConfig::default()));
        assert_eq!(log_directive(false), "warn");

        let args = Args::try_parse_from(["shotplan", "lot.json", "-v"]).unwrap();
        assert!(verbose_enabled(&args, &FileConfig::default()));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args =
            Args::try_parse_from(["shotplan", "lot.json", "--config", "/nonexistent/shotplan.toml"])
                .unwrap();
        assert!(load_config(&args).is_err());
    }
}
