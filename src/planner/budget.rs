use serde::Serialize;

/// Inputs to [`allocate_photo_budget`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetRequest {
    /// Package total `T`
    pub total: u32,
    /// Minimum nadir shots `D`
    pub top_down_target: u32,
    /// Land photos wanted with no structures competing
    pub land_demand: u32,
    /// Shots the selected structures would take unconstrained
    pub building_demand: u32,
    /// Economy packages fill structures before land
    pub economy: bool,
}

/// Photo quota per shot category; `land + building == total`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhotoBudget {
    pub total: u32,
    pub land: u32,
    pub top_down: u32,
    pub angled: u32,
    pub building: u32,
}

/// Split a package's photo budget between land and structures
///
/// Economy packages take structure shots first, up to the whole budget.
/// Other packages split proportionally to demand. Either way, shots move
/// back from structures to land when land cannot meet the top-down target.
pub fn allocate_photo_budget(request: BudgetRequest) -> PhotoBudget {
    let total = request.total;
    if total == 0 {
        return PhotoBudget::default();
    }
    let demand = request.building_demand;

    let mut building = if demand == 0 {
        0
    } else if request.economy {
        demand.min(total)
    } else {
        let combined = request.land_demand as f64 + demand as f64;
        let share = (total as f64 * demand as f64 / combined).round() as u32;
        share.min(demand).min(total)
    };

    let mut land = total - building;
    if request.top_down_target > land {
        let shift = (request.top_down_target - land).min(building);
        building -= shift;
        land += shift;
    }

    let top_down = request.top_down_target.min(land);
    PhotoBudget {
        total,
        land,
        top_down,
        angled: land - top_down,
        building,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(total: u32, top_down: u32, building: u32, economy: bool) -> BudgetRequest {
        BudgetRequest {
            total,
            top_down_target: top_down,
            land_demand: total,
            building_demand: building,
            economy,
        }
    }

    #[test]
    fn test_zero_total() {
        assert_eq!(
            allocate_photo_budget(request(0, 10, 8, false)),
            PhotoBudget::default()
        );
    }

    #[test]
    fn test_no_structures() {
        let budget = allocate_photo_budget(request(30, 10, 0, false));
        assert_eq!(budget.building, 0);
        assert_eq!(budget.land, 30);
        assert_eq!(budget.top_down, 10);
        assert_eq!(budget.angled, 20);
    }

    #[test]
    fn test_proportional_split() {
        // 30 * 12 / 42 = 8.57
        let budget = allocate_photo_budget(request(30, 10, 12, false));
        assert_eq!(budget.building, 9);
        assert_eq!(budget.land, 21);
        assert_eq!(budget.top_down, 10);
        assert_eq!(budget.angled, 11);
    }

    #[test]
    fn test_economy_takes_structures_first() {
        let budget = allocate_photo_budget(request(15, 0, 4, true));
        assert_eq!(budget.building, 4);
        assert_eq!(budget.land, 11);

        let budget = allocate_photo_budget(request(3, 0, 4, true));
        assert_eq!(budget.building, 3);
        assert_eq!(budget.land, 0);
    }

    #[test]
    fn test_top_down_target_pulls_from_structures() {
        let budget = allocate_photo_budget(request(10, 8, 8, true));
        assert_eq!(budget.building, 2);
        assert_eq!(budget.land, 8);
        assert_eq!(budget.top_down, 8);
        assert_eq!(budget.angled, 0);

        // target larger than the package itself
        let budget = allocate_photo_budget(request(10, 25, 4, false));
        assert_eq!(budget.building, 0);
        assert_eq!(budget.top_down, 10);
    }

    #[test]
    fn test_totals_always_match() {
        for total in 0..40 {
            for demand in [0, 1, 4, 12, 50] {
                for economy in [false, true] {
                    let b = allocate_photo_budget(request(total, 7, demand, economy));
                    assert_eq!(b.land + b.building, b.total);
                    assert_eq!(b.top_down + b.angled, b.land);
                    assert!(b.building <= demand);
                }
            }
        }
    }
}
