use serde::{Deserialize, Serialize};

/// Which part of the catalog an entry came from.
///
/// Only used for reporting and export; matching ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Regional,
    International,
}

impl Origin {
    pub const ALL: [Origin; 2] = [Origin::Regional, Origin::International];

    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Regional => "regional",
            Origin::International => "international",
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Origin {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "regional" => Ok(Origin::Regional),
            "international" => Ok(Origin::International),
            other => Err(anyhow::anyhow!("Unknown origin: {}", other)),
        }
    }
}

/// Nutrition facts for one reference portion of a catalog food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionFact {
    /// Canonical (normalized) food name
    pub name: String,
    /// Calories (kcal)
    pub calories: u32,
    /// Protein (g)
    pub protein_g: f64,
    /// Carbs (g)
    pub carbs_g: f64,
    /// Fat (g)
    pub fat_g: f64,
    /// Mass of the reference portion in grams
    pub portion_grams: f64,
    /// e.g. "1 medium bowl"
    pub portion_description: String,
}

impl NutritionFact {
    /// Calories implied by the macros (4/4/9 kcal per gram).
    ///
    /// Source data does not always agree with `calories`; the stored figure
    /// stays authoritative and this is only for reporting.
    pub fn macro_calories(&self) -> f64 {
        4.0 * self.protein_g + 4.0 * self.carbs_g + 9.0 * self.fat_g
    }
}

/// Outcome of a single fuzzy lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// Normalized query the catalog was searched with
    pub query: String,
    pub matched_name: Option<String>,
    /// Best similarity seen, even when it fell below the threshold
    pub similarity: f64,
    pub fact: Option<NutritionFact>,
    pub origin: Option<Origin>,
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        self.fact.is_some()
    }
}

/// Nutrition values for a matched food, scaled to the requested portion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionEstimate {
    pub query: String,
    pub matched_name: String,
    /// Similarity of the match, used as a confidence score
    pub similarity: f64,
    pub origin: Origin,
    /// Multiplier actually applied (after clamping)
    pub portion_multiplier: f64,
    /// Calories (kcal)
    pub calories: f64,
    /// Protein (g)
    pub protein_g: f64,
    /// Carbs (g)
    pub carbs_g: f64,
    /// Fat (g)
    pub fat_g: f64,
    /// Total grams eaten (reference portion times multiplier)
    pub portion_grams: f64,
    /// Description of the reference portion
    pub portion_description: String,
}

/// Returned when no catalog entry was similar enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnknownFood {
    pub query: String,
    /// Best similarity seen across the catalog
    pub similarity: f64,
}

/// Result of estimating a free-text food name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Estimate {
    Found(NutritionEstimate),
    Unknown(UnknownFood),
}

impl Estimate {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Estimate::Unknown(_))
    }

    pub fn nutrition(&self) -> Option<&NutritionEstimate> {
        match self {
            Estimate::Found(n) => Some(n),
            Estimate::Unknown(_) => None,
        }
    }

    pub fn query(&self) -> &str {
        match self {
            Estimate::Found(n) => &n.query,
            Estimate::Unknown(u) => &u.query,
        }
    }

    pub fn similarity(&self) -> f64 {
        match self {
            Estimate::Found(n) => n.similarity,
            Estimate::Unknown(u) => u.similarity,
        }
    }
}

/// One line of a logged meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealItem {
    /// Free-text food name as entered
    pub name: String,
    /// Number of reference portions
    #[serde(default = "default_multiplier")]
    pub portion_multiplier: f64,
}

fn default_multiplier() -> f64 {
    1.0
}

impl MealItem {
    pub fn new(name: impl Into<String>, portion_multiplier: f64) -> Self {
        Self {
            name: name.into(),
            portion_multiplier,
        }
    }
}

/// Summed macros over the recognized items of a meal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTotals {
    /// Calories (kcal)
    pub calories: f64,
    /// Protein (g)
    pub protein_g: f64,
    /// Carbs (g)
    pub carbs_g: f64,
    /// Fat (g)
    pub fat_g: f64,
}

impl MacroTotals {
    pub fn add(&mut self, estimate: &NutritionEstimate) {
        self.calories += estimate.calories;
        self.protein_g += estimate.protein_g;
        self.carbs_g += estimate.carbs_g;
        self.fat_g += estimate.fat_g;
    }
}

/// Estimates for every item of a meal plus their totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealEstimate {
    pub items: Vec<Estimate>,
    pub totals: MacroTotals,
    /// Names (as entered) that matched nothing
    pub unknown: Vec<String>,
}
