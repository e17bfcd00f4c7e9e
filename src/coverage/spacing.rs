use serde::Serialize;

use super::Footprint;

/// Extra 10% on the minimum photo count for turns and edges, as a ratio
const RECOMMENDED_BUFFER: (u64, u64) = (11, 10);

/// Distance between neighbouring photo positions in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Spacing {
    /// Along a flight line
    pub front: f64,
    /// Between flight lines
    pub side: f64,
}

impl Spacing {
    pub fn is_valid(&self) -> bool {
        self.front.is_finite() && self.side.is_finite() && self.front > 0.0 && self.side > 0.0
    }

    /// Scale both axes; non-positive or non-finite multipliers leave spacing unchanged
    pub fn scaled(self, multiplier: f64) -> Self {
        if multiplier > 0.0 && multiplier.is_finite() {
            Self {
                front: self.front * multiplier,
                side: self.side * multiplier,
            }
        } else {
            self
        }
    }
}

/// Photo spacing for the requested overlap
///
/// spacing = footprint * (1 - overlap / 100), per axis
///
/// # Returns
/// * `None` when either axis comes out non-positive (overlap >= 100%,
///   empty footprint), which callers treat as an invalid plan
pub fn photo_spacing(
    footprint: &Footprint,
    front_overlap_pct: f64,
    side_overlap_pct: f64,
) -> Option<Spacing> {
    let spacing = Spacing {
        front: footprint.height * (1.0 - front_overlap_pct / 100.0),
        side: footprint.width * (1.0 - side_overlap_pct / 100.0),
    };
    spacing.is_valid().then_some(spacing)
}

/// Rough photo count for an area, before any flight path is laid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhotoEstimate {
    pub minimum: u32,
    pub recommended: u32,
}

/// Estimate how many photos cover `area_sq_meters` at the given spacing
pub fn estimate_photos_needed(area_sq_meters: f64, spacing: &Spacing) -> PhotoEstimate {
    let per_photo = spacing.front * spacing.side;
    if !spacing.is_valid() || !per_photo.is_finite() || !(area_sq_meters > 0.0) {
        return PhotoEstimate::default();
    }

    let minimum = (area_sq_meters / per_photo).ceil().min(u32::MAX as f64) as u64;
    let (num, den) = RECOMMENDED_BUFFER;
    let recommended = (minimum * num).div_ceil(den).min(u32::MAX as u64);

    PhotoEstimate {
        minimum: minimum as u32,
        recommended: recommended as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::ground_footprint;

    fn reference_footprint() -> Footprint {
        ground_footprint(60.0, 24.0, 15.7, 10.5, 3000.0, 2000.0)
    }

    #[test]
    fn test_spacing_reference() {
        let spacing = photo_spacing(&reference_footprint(), 70.0, 60.0).unwrap();
        assert!((spacing.front - 7.875).abs() < 1e-9);
        assert!((spacing.side - 15.7).abs() < 1e-9);
    }

    #[test]
    fn test_zero_overlap_is_raw_footprint() {
        let fp = reference_footprint();
        let spacing = photo_spacing(&fp, 0.0, 0.0).unwrap();
        assert_eq!(spacing.front, fp.height);
        assert_eq!(spacing.side, fp.width);
    }

    #[test]
    fn test_spacing_decreases_with_overlap() {
        let fp = reference_footprint();
        let mut previous = photo_spacing(&fp, 0.0, 0.0).unwrap();
        for overlap in [10.0, 35.0, 60.0, 80.0, 95.0, 99.5] {
            let spacing = photo_spacing(&fp, overlap, overlap).unwrap();
            assert!(spacing.front < previous.front);
            assert!(spacing.side < previous.side);
            previous = spacing;
        }
    }

    #[test]
    fn test_invalid_spacing() {
        let fp = reference_footprint();
        assert!(photo_spacing(&fp, 100.0, 60.0).is_none());
        assert!(photo_spacing(&fp, 70.0, 120.0).is_none());
        assert!(photo_spacing(&Footprint::default(), 70.0, 60.0).is_none());
    }

    #[test]
    fn test_scaled() {
        let spacing = Spacing {
            front: 8.0,
            side: 10.0,
        };
        assert_eq!(spacing.scaled(1.5), Spacing { front: 12.0, side: 15.0 });
        assert_eq!(spacing.scaled(0.0), spacing);
        assert_eq!(spacing.scaled(f64::NAN), spacing);
    }

    #[test]
    fn test_estimate_photos_needed() {
        let spacing = Spacing {
            front: 10.0,
            side: 10.0,
        };
        let estimate = estimate_photos_needed(10_000.0, &spacing);
        assert_eq!(estimate.minimum, 100);
        assert_eq!(estimate.recommended, 110);

        let invalid = Spacing {
            front: 0.0,
            side: 10.0,
        };
        assert_eq!(estimate_photos_needed(10_000.0, &invalid), PhotoEstimate::default());
    }
}
