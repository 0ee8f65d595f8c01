//! Plan statistics

use serde::Serialize;
use shared::{BuildingCategory, PlacedObject};

use crate::catalog::Catalog;

/// Base power per occupied cell for one category
fn category_power(category: BuildingCategory) -> f64 {
    match category {
        BuildingCategory::Headquarters => 100.0,
        BuildingCategory::Defense => 50.0,
        BuildingCategory::Production => 20.0,
        BuildingCategory::Seasonal => 30.0,
        BuildingCategory::Special => 10.0,
    }
}

/// Rough strength estimate of a layout.
///
/// Each object contributes `base × (1 + level × 0.1) × width × height`.
/// Objects of unknown type contribute nothing.
pub fn defense_power(objects: &[PlacedObject], catalog: &dyn Catalog) -> u64 {
    let total: f64 = objects
        .iter()
        .filter_map(|o| catalog.get_type(&o.type_id).map(|t| (o, t)))
        .map(|(o, t)| {
            let level_multiplier = 1.0 + f64::from(o.level) * 0.1;
            let size = f64::from(t.width) * f64::from(t.height);
            category_power(t.category) * level_multiplier * size
        })
        .sum();
    total.round() as u64
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: BuildingCategory,
    pub count: usize,
}

/// Objects per category, in palette order. Categories with no objects are
/// included with a zero count.
pub fn category_counts(objects: &[PlacedObject], catalog: &dyn Catalog) -> Vec<CategoryCount> {
    BuildingCategory::all()
        .iter()
        .map(|&category| CategoryCount {
            category,
            count: objects
                .iter()
                .filter(|o| {
                    catalog
                        .get_type(&o.type_id)
                        .is_some_and(|t| t.category == category)
                })
                .count(),
        })
        .collect()
}

/// Summary shown next to the plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanStats {
    pub object_count: usize,
    /// Grid cells covered by known objects
    pub occupied_cells: u64,
    pub defense_power: u64,
    pub categories: Vec<CategoryCount>,
}

impl PlanStats {
    pub fn compute(objects: &[PlacedObject], catalog: &dyn Catalog) -> Self {
        let occupied_cells = objects
            .iter()
            .filter_map(|o| catalog.get_type(&o.type_id))
            .map(|t| u64::from(t.width) * u64::from(t.height))
            .sum();
        Self {
            object_count: objects.len(),
            occupied_cells,
            defense_power: defense_power(objects, catalog),
            categories: category_counts(objects, catalog),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BuildingCatalog;
    use crate::fixtures::object;

    #[test]
    fn test_defense_power_formula() {
        let catalog = BuildingCatalog::hive_defaults();
        // hq 2x2 level 1: 100 * 1.1 * 4 = 440
        let hq = object("a", "hq", 0, 0);
        assert_eq!(defense_power(&[hq.clone()], &catalog), 440);

        // wall 1x1 level 1: 50 * 1.1 = 55
        let wall = object("b", "wall", 5, 5);
        assert_eq!(defense_power(&[hq, wall], &catalog), 495);
    }

    #[test]
    fn test_defense_power_scales_with_level() {
        let catalog = BuildingCatalog::hive_defaults();
        let mut tower = object("a", "tower-antiair", 0, 0);
        tower.level = 20;
        // 50 * 3.0 * 4
        assert_eq!(defense_power(&[tower], &catalog), 600);
    }

    #[test]
    fn test_unknown_types_skipped() {
        let catalog = BuildingCatalog::hive_defaults();
        assert_eq!(defense_power(&[object("a", "mystery", 0, 0)], &catalog), 0);
        let stats = PlanStats::compute(&[object("a", "mystery", 0, 0)], &catalog);
        assert_eq!(stats.object_count, 1);
        assert_eq!(stats.occupied_cells, 0);
        assert!(stats.categories.iter().all(|c| c.count == 0));
    }

    #[test]
    fn test_category_counts() {
        let catalog = BuildingCatalog::hive_defaults();
        let objects = [
            object("a", "hq", 0, 0),
            object("b", "wall", 3, 0),
            object("c", "wall", 4, 0),
            object("d", "saloon", 6, 0),
        ];
        let counts = category_counts(&objects, &catalog);
        assert_eq!(counts.len(), 5);
        assert_eq!(counts[0], CategoryCount { category: BuildingCategory::Headquarters, count: 1 });
        assert_eq!(counts[1].count, 2);
        assert_eq!(counts[2].count, 0);
        assert_eq!(counts[3].count, 1);

        let stats = PlanStats::compute(&objects, &catalog);
        assert_eq!(stats.occupied_cells, 4 + 1 + 1 + 4);
    }
}
