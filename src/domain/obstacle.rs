use serde::{Deserialize, Serialize};

use crate::geometry::LatLng;

/// Structure type marked on a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    House,
    Garage,
    Shed,
    Barn,
    Dock,
    #[serde(other)]
    Other,
}

impl ObstacleKind {
    /// Classify a free-form type tag; unknown tags become `Other`
    pub fn from_tag(tag: &str) -> ObstacleKind {
        match tag.trim().to_ascii_lowercase().as_str() {
            "house" | "home" => ObstacleKind::House,
            "garage" => ObstacleKind::Garage,
            "shed" => ObstacleKind::Shed,
            "barn" => ObstacleKind::Barn,
            "dock" => ObstacleKind::Dock,
            _ => ObstacleKind::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ObstacleKind::House => "House",
            ObstacleKind::Garage => "Garage",
            ObstacleKind::Shed => "Shed",
            ObstacleKind::Barn => "Barn",
            ObstacleKind::Dock => "Dock",
            ObstacleKind::Other => "Building",
        }
    }
}

/// A structure on the property that gets its own orbit of shots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ObstacleKind,
    pub name: String,
    pub position: LatLng,
}

impl Obstacle {
    pub fn new(
        id: impl Into<String>,
        kind: ObstacleKind,
        name: impl Into<String>,
        position: LatLng,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_tag() {
        assert_eq!(ObstacleKind::from_tag("house"), ObstacleKind::House);
        assert_eq!(ObstacleKind::from_tag(" Garage "), ObstacleKind::Garage);
        assert_eq!(ObstacleKind::from_tag("BARN"), ObstacleKind::Barn);
        assert_eq!(ObstacleKind::from_tag("silo"), ObstacleKind::Other);
    }

    #[test]
    fn test_unknown_kind_deserializes_as_other() {
        let kind: ObstacleKind = serde_json::from_str("\"greenhouse\"").unwrap();
        assert_eq!(kind, ObstacleKind::Other);
        let kind: ObstacleKind = serde_json::from_str("\"dock\"").unwrap();
        assert_eq!(kind, ObstacleKind::Dock);
    }
}
