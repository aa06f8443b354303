//! Static nutrition catalog.
//!
//! Entries come from two embedded JSON tables (regional and international
//! dishes) and keep the order they appear in, regional first. The process
//! catalog is parsed once on first use and only read afterwards.

use std::collections::HashMap;
use std::sync::LazyLock;

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::models::{NutritionFact, Origin};
use crate::normalize::normalize;

static REGIONAL_JSON: &str = include_str!("data/regional.json");
static INTERNATIONAL_JSON: &str = include_str!("data/international.json");

static CATALOG: LazyLock<Catalog> = LazyLock::new(|| {
    let catalog = Catalog::from_sources(&[
        (Origin::Regional, REGIONAL_JSON),
        (Origin::International, INTERNATIONAL_JSON),
    ])
    .expect("embedded nutrition tables should be valid");
    info!(entries = catalog.len(), "nutrition catalog loaded");
    catalog
});

/// Row format of the embedded data files.
#[derive(Deserialize)]
struct RawFact {
    name: String,
    calories: u32,
    protein_g: f64,
    carbs_g: f64,
    fat_g: f64,
    portion_grams: f64,
    portion_description: String,
}

/// A catalog food and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub fact: NutritionFact,
    pub origin: Origin,
}

/// Read-only, insertion-ordered set of nutrition facts keyed by canonical name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// The process-wide catalog built from the embedded tables.
    pub fn global() -> &'static Catalog {
        &CATALOG
    }

    /// Build a catalog from JSON arrays of facts, one per origin, in order.
    pub fn from_sources(sources: &[(Origin, &str)]) -> Result<Self> {
        let mut facts = Vec::new();
        for (origin, json) in sources {
            let rows: Vec<RawFact> = serde_json::from_str(json)
                .with_context(|| format!("Failed to parse {} nutrition table", origin))?;
            facts.extend(rows.into_iter().map(|row| {
                (
                    *origin,
                    NutritionFact {
                        name: row.name,
                        calories: row.calories,
                        protein_g: row.protein_g,
                        carbs_g: row.carbs_g,
                        fat_g: row.fat_g,
                        portion_grams: row.portion_grams,
                        portion_description: row.portion_description,
                    },
                )
            }));
        }
        Self::from_facts(facts)
    }

    /// Build a catalog from facts in the given order.
    ///
    /// Names are normalized before indexing. Fails on duplicate names, empty
    /// names, negative or non-finite macros, and non-positive portions.
    pub fn from_facts(facts: Vec<(Origin, NutritionFact)>) -> Result<Self> {
        let mut entries = Vec::with_capacity(facts.len());
        let mut index = HashMap::with_capacity(facts.len());

        for (origin, mut fact) in facts {
            let name = normalize(&fact.name);
            if name.is_empty() {
                bail!("Catalog entry {:?} has an empty name", fact.name);
            }
            validate(&name, &fact)?;
            if index.contains_key(&name) {
                return Err(anyhow!("Duplicate catalog entry: {}", name));
            }
            fact.name = name.clone();
            index.insert(name, entries.len());
            entries.push(CatalogEntry { fact, origin });
        }

        Ok(Self { entries, index })
    }

    /// All entries in catalog order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact lookup by name (normalized first).
    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.index
            .get(&normalize(name))
            .map(|&idx| &self.entries[idx])
    }

    /// Entries of a single origin, in catalog order.
    pub fn by_origin(&self, origin: Origin) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(move |e| e.origin == origin)
    }

    /// Number of entries per origin.
    pub fn count_by_origin(&self, origin: Origin) -> usize {
        self.by_origin(origin).count()
    }
}

fn validate(name: &str, fact: &NutritionFact) -> Result<()> {
    let grams = [
        ("protein_g", fact.protein_g),
        ("carbs_g", fact.carbs_g),
        ("fat_g", fact.fat_g),
    ];
    for (field, value) in grams {
        if !value.is_finite() || value < 0.0 {
            bail!("{}: {} must be a non-negative number, got {}", name, field, value);
        }
    }
    if !fact.portion_grams.is_finite() || fact.portion_grams <= 0.0 {
        bail!(
            "{}: portion_grams must be positive, got {}",
            name,
            fact.portion_grams
        );
    }
    Ok(())
}
