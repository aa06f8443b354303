//! Flat JSON dump of the catalog for the offline client copy.
//!
//! Format: one object keyed by canonical name, in catalog order:
//!
//! ```json
//! { "kabab": { "calories": 320, "protein": 28.0, "carbs": 4.5, "fat": 21.0,
//!              "portion_g": 150.0, "portion_desc": "1 skewer" } }
//! ```
//!
//! Values are written unrounded; serde_json prints the shortest
//! representation that parses back to the same `f64`.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::catalog::{Catalog, CatalogEntry};
use crate::models::{NutritionFact, Origin};

#[derive(Debug, Serialize, Deserialize)]
struct ExportRecord {
    calories: u32,
    protein: f64,
    carbs: f64,
    fat: f64,
    portion_g: f64,
    portion_desc: String,
}

impl From<&NutritionFact> for ExportRecord {
    fn from(fact: &NutritionFact) -> Self {
        Self {
            calories: fact.calories,
            protein: fact.protein_g,
            carbs: fact.carbs_g,
            fat: fact.fat_g,
            portion_g: fact.portion_grams,
            portion_desc: fact.portion_description.clone(),
        }
    }
}

/// Serializes entries as a map without collecting them first, so key order
/// follows the catalog.
struct ExportMap<'a> {
    entries: Vec<&'a CatalogEntry>,
}

impl Serialize for ExportMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.fact.name, &ExportRecord::from(&entry.fact))?;
        }
        map.end()
    }
}

fn export_map(catalog: &Catalog, origin: Option<Origin>) -> ExportMap<'_> {
    ExportMap {
        entries: catalog
            .entries()
            .iter()
            .filter(|e| origin.map_or(true, |o| e.origin == o))
            .collect(),
    }
}

/// Compact JSON export of the whole catalog.
pub fn to_json(catalog: &Catalog) -> Result<String> {
    to_json_filtered(catalog, None, false)
}

/// Indented JSON export of the whole catalog.
pub fn to_json_pretty(catalog: &Catalog) -> Result<String> {
    to_json_filtered(catalog, None, true)
}

/// JSON export restricted to one origin when `origin` is set.
pub fn to_json_filtered(catalog: &Catalog, origin: Option<Origin>, pretty: bool) -> Result<String> {
    let map = export_map(catalog, origin);
    let json = if pretty {
        serde_json::to_string_pretty(&map)
    } else {
        serde_json::to_string(&map)
    };
    json.context("Failed to serialize catalog export")
}

/// Parse an export back into facts keyed by name.
pub fn parse(json: &str) -> Result<BTreeMap<String, NutritionFact>> {
    let records: BTreeMap<String, ExportRecord> =
        serde_json::from_str(json).context("Failed to parse catalog export")?;

    Ok(records
        .into_iter()
        .map(|(name, r)| {
            let fact = NutritionFact {
                name: name.clone(),
                calories: r.calories,
                protein_g: r.protein,
                carbs_g: r.carbs,
                fat_g: r.fat,
                portion_grams: r.portion_g,
                portion_description: r.portion_desc,
            };
            (name, fact)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tricky_catalog() -> Catalog {
        Catalog::from_facts(vec![
            (
                Origin::International,
                NutritionFact {
                    name: "zucchini".to_string(),
                    calories: 17,
                    protein_g: 0.1 + 0.2,
                    carbs_g: 3.109_999_999_999_999_7,
                    fat_g: 1e-7,
                    portion_grams: 123.456_789_012_345_67,
                    portion_description: "1 \"small\" squash".to_string(),
                },
            ),
            (
                Origin::Regional,
                NutritionFact {
                    name: "aush".to_string(),
                    calories: 310,
                    protein_g: 14.0,
                    carbs_g: 42.0,
                    fat_g: 9.5,
                    portion_grams: 400.0,
                    portion_description: "1 medium bowl".to_string(),
                },
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_round_trip_keeps_precision() {
        let catalog = tricky_catalog();
        let parsed = parse(&to_json(&catalog).unwrap()).unwrap();
        assert_eq!(parsed.len(), catalog.len());
        for entry in catalog.entries() {
            assert_eq!(parsed[&entry.fact.name], entry.fact);
        }
    }

    #[test]
    fn test_keys_follow_catalog_order() {
        let json = to_json(&tricky_catalog()).unwrap();
        let zucchini = json.find("\"zucchini\"").unwrap();
        let aush = json.find("\"aush\"").unwrap();
        assert!(zucchini < aush);
    }

    #[test]
    fn test_field_names() {
        let json = to_json(&tricky_catalog()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let aush = &value["aush"];
        assert_eq!(aush["calories"], 310);
        assert_eq!(aush["protein"], 14.0);
        assert_eq!(aush["carbs"], 42.0);
        assert_eq!(aush["fat"], 9.5);
        assert_eq!(aush["portion_g"], 400.0);
        assert_eq!(aush["portion_desc"], "1 medium bowl");
    }

    #[test]
    fn test_filtered_export() {
        let catalog = tricky_catalog();
        let regional = parse(&to_json_filtered(&catalog, Some(Origin::Regional), true).unwrap())
            .unwrap();
        assert_eq!(regional.keys().collect::<Vec<_>>(), vec!["aush"]);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("[1, 2, 3]").is_err());
        assert!(parse(r#"{"kabab": {"calories": -5}}"#).is_err());
    }
}
