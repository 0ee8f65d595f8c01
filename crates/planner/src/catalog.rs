//! Building type catalog.
//!
//! The editor never reaches for a global list of types: a [`Catalog`] is
//! injected into every plan, so tests can run against their own types.

use shared::{BuildingCategory, BuildingType};

/// Read-only lookup of building types by id.
pub trait Catalog: Send + Sync {
    /// Resolve a type id to its unrotated dimensions and level ceiling.
    fn get_type(&self, type_id: &str) -> Option<&BuildingType>;
}

/// In-memory catalog, ordered as listed.
#[derive(Debug, Clone, Default)]
pub struct BuildingCatalog {
    types: Vec<BuildingType>,
}

impl BuildingCatalog {
    pub fn new(types: Vec<BuildingType>) -> Self {
        Self { types }
    }

    /// The standard hive building set.
    pub fn hive_defaults() -> Self {
        use BuildingCategory::*;

        Self::new(vec![
            // Headquarters
            building("hq", "Headquarters", Headquarters, 2, 2, "#3B82F6", "🏰", 30,
                "Player main base - the core of any hive formation"),
            building("hq-marshal", "Marshal HQ", Headquarters, 3, 3, "#8B5CF6", "👑", 30,
                "Alliance leader/officer headquarters"),
            building("hq-r4", "R4 HQ", Headquarters, 2, 2, "#EC4899", "⭐", 30,
                "R4 officer headquarters"),
            // Defense
            building("wall", "Wall", Defense, 1, 1, "#6B7280", "🧱", 1,
                "Basic wall segment for perimeter defense"),
            building("tower-antiair", "Anti-Air Tower", Defense, 2, 2, "#EF4444", "🗼", 20,
                "Defends against aerial attacks"),
            building("tower-artillery", "Artillery Tower", Defense, 2, 2, "#F97316", "💥", 20,
                "Long-range ground defense"),
            building("bunker", "Bunker", Defense, 2, 2, "#84CC16", "🛡️", 20,
                "Reinforced defensive structure"),
            // Production
            building("barracks", "Barracks", Production, 2, 2, "#22C55E", "🎖️", 25,
                "Troop training facility"),
            building("factory", "Vehicle Factory", Production, 2, 2, "#14B8A6", "🏭", 25,
                "Vehicle production"),
            building("airfield", "Airfield", Production, 3, 2, "#06B6D4", "✈️", 25,
                "Aircraft production and landing"),
            building("hospital", "Hospital", Production, 2, 2, "#F43F5E", "🏥", 25,
                "Troop healing facility"),
            // Seasonal
            building("saloon", "Saloon", Seasonal, 2, 2, "#D97706", "🍺", 10,
                "S5 Wild West - Saloon building"),
            building("sheriffs-office", "Sheriff's Office", Seasonal, 2, 2, "#CA8A04", "🤠", 10,
                "S5 Wild West - Law enforcement"),
            building("gold-mine", "Gold Mine", Seasonal, 2, 2, "#FBBF24", "⛏️", 10,
                "S5 Wild West - Resource extraction"),
            building("train-station", "Train Station", Seasonal, 3, 2, "#78716C", "🚂", 10,
                "S5 Wild West - Transportation hub"),
            // Special
            building("rally-point", "Rally Point", Special, 1, 1, "#A855F7", "📍", 1,
                "Troop gathering point marker"),
            building("resource-tile", "Resource Tile", Special, 1, 1, "#10B981", "💎", 1,
                "Mark resource locations on map"),
            building("danger-zone", "Danger Zone", Special, 2, 2, "#DC2626", "⚠️", 1,
                "Mark dangerous/enemy areas"),
            building("empty-slot", "Empty Slot", Special, 1, 1, "#374151", "⬜", 1,
                "Reserved empty position"),
        ])
    }

    pub fn types(&self) -> &[BuildingType] {
        &self.types
    }

    /// Types of one category, in catalog order.
    pub fn by_category(&self, category: BuildingCategory) -> Vec<&BuildingType> {
        self.types.iter().filter(|t| t.category == category).collect()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Catalog for BuildingCatalog {
    fn get_type(&self, type_id: &str) -> Option<&BuildingType> {
        self.types.iter().find(|t| t.id == type_id)
    }
}

#[allow(clippy::too_many_arguments)]
fn building(
    id: &str,
    name: &str,
    category: BuildingCategory,
    width: u32,
    height: u32,
    color: &str,
    icon: &str,
    max_level: u32,
    description: &str,
) -> BuildingType {
    BuildingType {
        id: id.to_string(),
        name: name.to_string(),
        category,
        width,
        height,
        color: color.to_string(),
        icon: icon.to_string(),
        max_level,
        description: description.to_string(),
    }
}
