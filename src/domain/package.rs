use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PackageError {
    #[error("invalid building limit \"{0}\", expected a count or \"unlimited\"")]
    InvalidBuildingLimit(String),
}

/// Package class; economy packages photograph structures before land
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageTier {
    Economy,
    #[default]
    Standard,
    Premium,
    Custom,
}

/// How many marked structures a package photographs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawBuildingLimit", into = "RawBuildingLimit")]
pub enum BuildingLimit {
    Limited(u32),
    #[default]
    Unlimited,
}

impl BuildingLimit {
    /// Number of structures kept out of `available`
    pub fn cap(&self, available: usize) -> usize {
        match self {
            BuildingLimit::Limited(n) => available.min(*n as usize),
            BuildingLimit::Unlimited => available,
        }
    }
}

/// TOML/JSON form: `included_buildings = 2` or `included_buildings = "unlimited"`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawBuildingLimit {
    Count(u32),
    Keyword(String),
}

impl TryFrom<RawBuildingLimit> for BuildingLimit {
    type Error = PackageError;

    fn try_from(raw: RawBuildingLimit) -> Result<Self, Self::Error> {
        match raw {
            RawBuildingLimit::Count(n) => Ok(BuildingLimit::Limited(n)),
            RawBuildingLimit::Keyword(word) => match word.trim().to_ascii_lowercase().as_str() {
                "unlimited" | "all" => Ok(BuildingLimit::Unlimited),
                _ => Err(PackageError::InvalidBuildingLimit(word)),
            },
        }
    }
}

impl From<BuildingLimit> for RawBuildingLimit {
    fn from(limit: BuildingLimit) -> Self {
        match limit {
            BuildingLimit::Limited(n) => RawBuildingLimit::Count(n),
            BuildingLimit::Unlimited => RawBuildingLimit::Keyword("unlimited".to_string()),
        }
    }
}

fn default_multiplier() -> f64 {
    1.0
}

/// A sellable photo package
///
/// Supplied per planning call and never modified by the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageConfig {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tier: PackageTier,
    /// Total photo budget shared by land and structures
    pub total_photos: u32,
    /// Minimum number of nadir shots
    #[serde(default)]
    pub top_down_shots: u32,
    /// Multiplier on overlap-derived spacing (0 leaves spacing unchanged)
    #[serde(default = "default_multiplier")]
    pub spacing_multiplier: f64,
    /// Multiplier on the drone's default altitude
    #[serde(default = "default_multiplier")]
    pub altitude_multiplier: f64,
    #[serde(default)]
    pub included_buildings: BuildingLimit,
}

impl PackageConfig {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        tier: PackageTier,
        total_photos: u32,
        top_down_shots: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tier,
            total_photos,
            top_down_shots,
            spacing_multiplier: default_multiplier(),
            altitude_multiplier: default_multiplier(),
            included_buildings: BuildingLimit::default(),
        }
    }

    pub fn with_spacing_multiplier(mut self, multiplier: f64) -> Self {
        self.spacing_multiplier = multiplier;
        self
    }

    pub fn with_altitude_multiplier(mut self, multiplier: f64) -> Self {
        self.altitude_multiplier = multiplier;
        self
    }

    pub fn with_included_buildings(mut self, limit: BuildingLimit) -> Self {
        self.included_buildings = limit;
        self
    }

    pub fn is_economy(&self) -> bool {
        self.tier == PackageTier::Economy || self.id.eq_ignore_ascii_case("economy")
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { &self.id } else { &self.name }
    }
}
