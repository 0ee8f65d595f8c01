//! Built-in hive formations.
//!
//! Every template is laid out for the default 50x50 grid and the default
//! building catalog. Applying one copies its objects under fresh ids.

use serde::{Deserialize, Serialize};
use shared::{PlacedObject, PlanSnapshot};

/// Template grouping shown in the template browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateCategory {
    Capitol,
    Seasonal,
    Defense,
    Farm,
    Community,
}

/// A ready-made formation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiveTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: TemplateCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub objects: PlanSnapshot,
}

/// All built-in templates
pub fn builtin_templates() -> Vec<HiveTemplate> {
    vec![
        diamond_defense(),
        anti_air_fortress(),
        compact_farm(),
        line_formation(),
    ]
}

/// Look up a built-in template by id
pub fn find_template(id: &str) -> Option<HiveTemplate> {
    builtin_templates().into_iter().find(|t| t.id == id)
}

fn slot(
    id: &str,
    type_id: &str,
    grid_x: i32,
    grid_y: i32,
    level: u32,
    label: Option<&str>,
) -> PlacedObject {
    PlacedObject {
        level,
        label: label.map(str::to_string),
        ..PlacedObject::new(id, type_id, grid_x, grid_y)
    }
}

fn diamond_defense() -> HiveTemplate {
    HiveTemplate {
        id: "diamond-defense".into(),
        name: "Diamond Defense".into(),
        description: "Classic diamond formation - Marshal at center, R4s on corners. Great for S5/S6 wars."
            .into(),
        category: TemplateCategory::Defense,
        author: Some("Community".into()),
        objects: vec![
            slot("t1-1", "hq-marshal", 23, 23, 30, Some("R5 Marshal")),
            slot("t1-2", "hq-r4", 23, 18, 25, Some("R4 North")),
            slot("t1-3", "hq-r4", 28, 23, 25, Some("R4 East")),
            slot("t1-4", "hq-r4", 23, 28, 25, Some("R4 South")),
            slot("t1-5", "hq-r4", 18, 23, 25, Some("R4 West")),
            slot("t1-6", "hq", 20, 15, 20, Some("Member 1")),
            slot("t1-7", "hq", 26, 15, 20, Some("Member 2")),
            slot("t1-8", "hq", 31, 20, 20, Some("Member 3")),
            slot("t1-9", "hq", 31, 26, 20, Some("Member 4")),
            slot("t1-10", "hq", 26, 31, 20, Some("Member 5")),
            slot("t1-11", "hq", 20, 31, 20, Some("Member 6")),
            slot("t1-12", "hq", 15, 26, 20, Some("Member 7")),
            slot("t1-13", "hq", 15, 20, 20, Some("Member 8")),
            slot("t1-14", "tower-antiair", 21, 21, 15, None),
            slot("t1-15", "tower-antiair", 26, 21, 15, None),
            slot("t1-16", "tower-antiair", 21, 26, 15, None),
            slot("t1-17", "tower-antiair", 26, 26, 15, None),
        ],
    }
}

fn anti_air_fortress() -> HiveTemplate {
    HiveTemplate {
        id: "anti-air-fortress".into(),
        name: "Anti-Air Fortress".into(),
        description: "Maximizes anti-air coverage. Perfect for defending against air raids.".into(),
        category: TemplateCategory::Defense,
        author: Some("Community".into()),
        objects: vec![
            slot("t4-1", "hq-marshal", 23, 23, 30, Some("R5")),
            slot("t4-2", "tower-antiair", 20, 20, 20, None),
            slot("t4-3", "tower-antiair", 26, 20, 20, None),
            slot("t4-4", "tower-antiair", 20, 26, 20, None),
            slot("t4-5", "tower-antiair", 26, 26, 20, None),
            slot("t4-6", "tower-antiair", 23, 18, 20, None),
            slot("t4-7", "tower-antiair", 23, 28, 20, None),
            slot("t4-8", "tower-antiair", 17, 23, 20, None),
            slot("t4-9", "tower-antiair", 29, 23, 20, None),
            slot("t4-10", "bunker", 18, 18, 15, None),
            slot("t4-11", "bunker", 28, 18, 15, None),
            slot("t4-12", "bunker", 18, 28, 15, None),
            slot("t4-13", "bunker", 28, 28, 15, None),
        ],
    }
}

fn compact_farm() -> HiveTemplate {
    HiveTemplate {
        id: "compact-farm".into(),
        name: "Farm Hive".into(),
        description: "Resource gathering formation for peaceful farming. Hospitals and factories."
            .into(),
        category: TemplateCategory::Farm,
        author: Some("Community".into()),
        objects: vec![
            slot("t5-1", "hq-marshal", 23, 23, 30, Some("R5")),
            slot("t5-2", "hospital", 20, 21, 20, None),
            slot("t5-3", "hospital", 26, 21, 20, None),
            slot("t5-4", "factory", 20, 26, 20, None),
            slot("t5-5", "factory", 26, 26, 20, None),
            slot("t5-6", "barracks", 17, 23, 20, None),
            slot("t5-7", "barracks", 29, 23, 20, None),
            slot("t5-8", "resource-tile", 15, 20, 1, None),
            slot("t5-9", "resource-tile", 33, 20, 1, None),
            slot("t5-10", "resource-tile", 15, 28, 1, None),
            slot("t5-11", "resource-tile", 33, 28, 1, None),
        ],
    }
}

fn line_formation() -> HiveTemplate {
    HiveTemplate {
        id: "line-formation".into(),
        name: "Battle Line".into(),
        description: "Linear formation for coordinated attacks. Easy to deploy and manage.".into(),
        category: TemplateCategory::Defense,
        author: Some("Community".into()),
        objects: vec![
            slot("t6-1", "hq-marshal", 24, 20, 30, Some("R5")),
            slot("t6-2", "hq-r4", 20, 20, 25, Some("R4-L")),
            slot("t6-3", "hq-r4", 28, 20, 25, Some("R4-R")),
            slot("t6-4", "hq", 16, 23, 20, Some("M1")),
            slot("t6-5", "hq", 20, 23, 20, Some("M2")),
            slot("t6-6", "hq", 24, 23, 20, Some("M3")),
            slot("t6-7", "hq", 28, 23, 20, Some("M4")),
            slot("t6-8", "hq", 32, 23, 20, Some("M5")),
            slot("t6-9", "hq", 18, 26, 18, Some("M6")),
            slot("t6-10", "hq", 22, 26, 18, Some("M7")),
            slot("t6-11", "hq", 26, 26, 18, Some("M8")),
            slot("t6-12", "hq", 30, 26, 18, Some("M9")),
            slot("t6-13", "tower-artillery", 22, 29, 15, None),
            slot("t6-14", "tower-artillery", 26, 29, 15, None),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BuildingCatalog;
    use crate::validation::PlacementValidator;

    #[test]
    fn test_builtin_templates_are_valid_on_default_grid() {
        let catalog = BuildingCatalog::hive_defaults();
        for template in builtin_templates() {
            let v = PlacementValidator::new(&catalog, &template.objects, 50, 50);
            let errors = v.validate_all();
            assert!(errors.is_empty(), "{}: {:?}", template.id, errors);
        }
    }

    #[test]
    fn test_find_template() {
        let t = find_template("diamond-defense").unwrap();
        assert_eq!(t.name, "Diamond Defense");
        assert_eq!(t.objects.len(), 17);
        assert!(find_template("nope").is_none());
    }

    #[test]
    fn test_template_ids_unique() {
        let templates = builtin_templates();
        for (i, t) in templates.iter().enumerate() {
            assert!(templates[..i].iter().all(|other| other.id != t.id));
        }
    }
}
