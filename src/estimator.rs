use tracing::warn;

use crate::catalog::Catalog;
use crate::config::MatchPolicy;
use crate::matcher::find_best_match;
use crate::models::*;

/// Turns free-text food names into nutrition estimates.
///
/// Holds nothing but a catalog reference and the match policy, so it is
/// cheap to copy into every request handler or thread.
#[derive(Debug, Clone, Copy)]
pub struct Estimator<'a> {
    catalog: &'a Catalog,
    policy: MatchPolicy,
}

impl Default for Estimator<'static> {
    fn default() -> Self {
        Self::new(Catalog::global())
    }
}

impl<'a> Estimator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self::with_policy(catalog, MatchPolicy::default())
    }

    pub fn with_policy(catalog: &'a Catalog, policy: MatchPolicy) -> Self {
        Self { catalog, policy }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Estimate nutrition for `raw_name` eaten in `portion_multiplier`
    /// reference portions.
    ///
    /// A multiplier that is not a positive finite number is replaced by 1.0.
    /// Foods that match nothing come back as [`Estimate::Unknown`] with no
    /// nutrition values.
    pub fn estimate(&self, raw_name: &str, portion_multiplier: f64) -> Estimate {
        let multiplier = clamp_multiplier(raw_name, portion_multiplier);
        let result = find_best_match(raw_name, self.catalog, self.policy.min_similarity);

        let (Some(fact), Some(origin)) = (result.fact, result.origin) else {
            return Estimate::Unknown(UnknownFood {
                query: result.query,
                similarity: result.similarity,
            });
        };

        Estimate::Found(NutritionEstimate {
            query: result.query,
            matched_name: fact.name,
            similarity: result.similarity,
            origin,
            portion_multiplier: multiplier,
            calories: f64::from(fact.calories) * multiplier,
            protein_g: fact.protein_g * multiplier,
            carbs_g: fact.carbs_g * multiplier,
            fat_g: fact.fat_g * multiplier,
            portion_grams: fact.portion_grams * multiplier,
            portion_description: fact.portion_description,
        })
    }

    /// Estimate every item of a meal and total the recognized ones.
    pub fn estimate_meal(&self, items: &[MealItem]) -> MealEstimate {
        let mut totals = MacroTotals::default();
        let mut unknown = Vec::new();

        let estimates = items
            .iter()
            .map(|item| {
                let estimate = self.estimate(&item.name, item.portion_multiplier);
                match &estimate {
                    Estimate::Found(n) => totals.add(n),
                    Estimate::Unknown(_) => unknown.push(item.name.clone()),
                }
                estimate
            })
            .collect();

        MealEstimate {
            items: estimates,
            totals,
            unknown,
        }
    }
}

fn clamp_multiplier(raw_name: &str, multiplier: f64) -> f64 {
    if multiplier.is_finite() && multiplier > 0.0 {
        multiplier
    } else {
        warn!(
            food = raw_name,
            multiplier, "invalid portion multiplier, using 1.0"
        );
        1.0
    }
}

/// Estimate against the process catalog with the default policy.
pub fn estimate(raw_name: &str, portion_multiplier: f64) -> Estimate {
    Estimator::default().estimate(raw_name, portion_multiplier)
}
