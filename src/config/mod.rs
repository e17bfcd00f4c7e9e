use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::{BuildingLimit, DroneSpecs, ObstacleKind, PackageConfig, PackageTier};

fn default_front_overlap() -> f64 {
    70.0
}
fn default_side_overlap() -> f64 {
    60.0
}
fn default_orbit_standoff_m() -> f64 {
    10.0
}
fn default_seconds_per_photo() -> f64 {
    2.0
}
fn default_verbose() -> bool {
    false
}

/// Forward/side overlap between consecutive frames, in percent
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Overlap {
    #[serde(default = "default_front_overlap")]
    pub front_pct: f64,
    #[serde(default = "default_side_overlap")]
    pub side_pct: f64,
}

impl Default for Overlap {
    fn default() -> Self {
        Self {
            front_pct: default_front_overlap(),
            side_pct: default_side_overlap(),
        }
    }
}

impl Overlap {
    pub fn new(front_pct: f64, side_pct: f64) -> Self {
        Self {
            front_pct,
            side_pct,
        }
    }
}

/// Orbit shape used for one kind of structure
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BuildingProfile {
    /// Base number of shots around the structure
    pub shots: u32,
    /// Orbit radius in meters
    pub radius_m: f64,
    /// Assumed structure height in meters, used to aim the camera
    pub height_m: f64,
}

impl BuildingProfile {
    pub const fn new(shots: u32, radius_m: f64, height_m: f64) -> Self {
        Self {
            shots,
            radius_m,
            height_m,
        }
    }
}

/// Per-kind building profiles
///
/// Any kind missing from a config file keeps its built-in profile.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BuildingProfiles {
    pub house: BuildingProfile,
    pub garage: BuildingProfile,
    pub shed: BuildingProfile,
    pub barn: BuildingProfile,
    pub dock: BuildingProfile,
    pub other: BuildingProfile,
}

impl Default for BuildingProfiles {
    fn default() -> Self {
        Self {
            house: BuildingProfile::new(4, 15.0, 6.0),
            garage: BuildingProfile::new(4, 10.0, 3.0),
            shed: BuildingProfile::new(4, 8.0, 2.5),
            barn: BuildingProfile::new(4, 18.0, 5.0),
            dock: BuildingProfile::new(4, 10.0, 1.0),
            other: BuildingProfile::new(4, 12.0, 4.0),
        }
    }
}

impl BuildingProfiles {
    pub fn get(&self, kind: ObstacleKind) -> &BuildingProfile {
        match kind {
            ObstacleKind::House => &self.house,
            ObstacleKind::Garage => &self.garage,
            ObstacleKind::Shed => &self.shed,
            ObstacleKind::Barn => &self.barn,
            ObstacleKind::Dock => &self.dock,
            ObstacleKind::Other => &self.other,
        }
    }
}

/// Tunables for one planning call
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PlannerSettings {
    /// Outward distance of the property orbit from the boundary
    #[serde(default = "default_orbit_standoff_m")]
    pub orbit_standoff_m: f64,
    #[serde(default = "default_seconds_per_photo")]
    pub seconds_per_photo: f64,
    #[serde(default)]
    pub buildings: BuildingProfiles,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            orbit_standoff_m: default_orbit_standoff_m(),
            seconds_per_photo: default_seconds_per_photo(),
            buildings: BuildingProfiles::default(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub front_overlap: Option<f64>,
    #[serde(default)]
    pub side_overlap: Option<f64>,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub geojson: Option<PathBuf>,
    #[serde(default)]
    pub drone: Option<DroneSpecs>,
    #[serde(default)]
    pub planner: Option<PlannerSettings>,
    #[serde(default)]
    pub packages: Vec<PackageConfig>,
}

impl FileConfig {
    /// First config file on the search path that parses
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Some(config) = Self::load_from(&path)
            {
                return Some(config);
            }
        }
        None
    }

    pub fn load_from(path: &Path) -> Option<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read config file");
                return None;
            }
        };
        match toml::from_str(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to parse config file");
                None
            }
        }
    }

    /// Overlap from the file, falling back to defaults per field
    pub fn overlap(&self) -> Overlap {
        let defaults = Overlap::default();
        Overlap::new(
            self.front_overlap.unwrap_or(defaults.front_pct),
            self.side_overlap.unwrap_or(defaults.side_pct),
        )
    }

    /// Built-in presets with file entries replacing or extending them by id
    pub fn packages(&self) -> Vec<PackageConfig> {
        let mut packages = builtin_packages();
        for custom in &self.packages {
            match packages.iter_mut().find(|p| p.id == custom.id) {
                Some(existing) => *existing = custom.clone(),
                None => packages.push(custom.clone()),
            }
        }
        packages
    }

    pub fn find_package(&self, id: &str) -> Option<PackageConfig> {
        self.packages()
            .into_iter()
            .find(|p| p.id.eq_ignore_ascii_case(id))
    }
}

/// Presets offered when no config file defines its own packages
pub fn builtin_packages() -> Vec<PackageConfig> {
    vec![
        PackageConfig::new("economy", "Economy", PackageTier::Economy, 15, 5)
            .with_spacing_multiplier(1.5)
            .with_altitude_multiplier(1.2)
            .with_included_buildings(BuildingLimit::Limited(1)),
        PackageConfig::new("standard", "Standard", PackageTier::Standard, 30, 10)
            .with_included_buildings(BuildingLimit::Limited(3)),
        PackageConfig::new("premium", "Premium", PackageTier::Premium, 60, 25)
            .with_spacing_multiplier(0.8)
            .with_included_buildings(BuildingLimit::Unlimited),
    ]
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("shotplan.toml"));
    paths.push(PathBuf::from(".shotplan.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("shotplan").join("config.toml"));
        paths.push(config_dir.join("shotplan.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".shotplan.toml"));
        paths.push(home.join(".config").join("shotplan").join("config.toml"));
    }

    paths
}
