//! Fuzzy food-name matching.
//!
//! Similarity is the classic sequence-matcher ratio: find the longest common
//! contiguous block, recurse on what lies left and right of it, and score
//! `2 * matched / (len(a) + len(b))`. Every catalog name is scored; there is
//! no index, the catalog is small.

use tracing::debug;

use crate::catalog::Catalog;
use crate::models::MatchResult;
use crate::normalize::normalize;

/// Minimum similarity for a match to be accepted by default.
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.6;

/// Similarity ratio between two strings in `[0, 1]`.
///
/// Compares Unicode scalar values, not bytes. Two empty strings are
/// identical (1.0); one empty string against a non-empty one scores 0.0.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

/// Total size of all matching blocks between `a` and `b`.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    // Explicit stack of (alo, ahi, blo, bhi) windows still to align.
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        matched += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Returns `(i, j, size)`. Among equally long blocks the one ending first in
/// `a` wins, then the one ending first in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

    // run[j - blo] = length of the common suffix of a[..=i] and b[..=j]
    let width = bhi - blo;
    let mut prev = vec![0usize; width];
    let mut curr = vec![0usize; width];

    for i in alo..ahi {
        for j in blo..bhi {
            let k = j - blo;
            curr[k] = if a[i] == b[j] {
                let run = if k > 0 { prev[k - 1] + 1 } else { 1 };
                if run > best_size {
                    best_i = i + 1 - run;
                    best_j = j + 1 - run;
                    best_size = run;
                }
                run
            } else {
                0
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    (best_i, best_j, best_size)
}

/// Find the catalog entry most similar to `query`.
///
/// The query is normalized first. The highest ratio wins and ties keep the
/// entry that comes first in catalog order. A best ratio strictly below
/// `min_similarity` yields a result with no name and no fact; that is the
/// normal "unknown food" outcome, not an error.
pub fn find_best_match(query: &str, catalog: &Catalog, min_similarity: f64) -> MatchResult {
    let query = normalize(query);

    let mut best: Option<(usize, f64)> = None;
    for (idx, entry) in catalog.entries().iter().enumerate() {
        let score = similarity_ratio(&query, &entry.fact.name);
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((idx, score));
        }
    }

    let similarity = best.map(|(_, score)| score).unwrap_or(0.0);
    match best {
        Some((idx, score)) if score >= min_similarity => {
            let entry = &catalog.entries()[idx];
            debug!(
                query = %query,
                matched = %entry.fact.name,
                similarity = score,
                "food matched"
            );
            MatchResult {
                query,
                matched_name: Some(entry.fact.name.clone()),
                similarity,
                fact: Some(entry.fact.clone()),
                origin: Some(entry.origin),
            }
        }
        _ => {
            debug!(query = %query, similarity, min_similarity, "no food above threshold");
            MatchResult {
                query,
                matched_name: None,
                similarity,
                fact: None,
                origin: None,
            }
        }
    }
}

/// Up to `limit` entries scoring at least `min_similarity`, best first.
///
/// Equal scores keep catalog order. Useful for "did you mean" suggestions
/// when `find_best_match` comes back empty or ambiguous.
pub fn rank_matches(
    query: &str,
    catalog: &Catalog,
    min_similarity: f64,
    limit: usize,
) -> Vec<MatchResult> {
    let query = normalize(query);

    let mut scored: Vec<(usize, f64)> = catalog
        .entries()
        .iter()
        .enumerate()
        .map(|(idx, entry)| (idx, similarity_ratio(&query, &entry.fact.name)))
        .filter(|(_, score)| *score >= min_similarity)
        .collect();

    // sort_by is stable, so equal scores stay in catalog order
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(limit);

    scored
        .into_iter()
        .map(|(idx, score)| {
            let entry = &catalog.entries()[idx];
            MatchResult {
                query: query.clone(),
                matched_name: Some(entry.fact.name.clone()),
                similarity: score,
                fact: Some(entry.fact.clone()),
                origin: Some(entry.origin),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NutritionFact, Origin};

    fn fact(name: &str, calories: u32) -> NutritionFact {
        NutritionFact {
            name: name.to_string(),
            calories,
            protein_g: 1.0,
            carbs_g: 2.0,
            fat_g: 3.0,
            portion_grams: 100.0,
            portion_description: "1 serving".to_string(),
        }
    }

    fn small_catalog() -> Catalog {
        Catalog::from_facts(vec![
            (Origin::Regional, fact("kabab", 320)),
            (Origin::Regional, fact("kebab", 300)),
            (Origin::International, fact("chicken breast", 165)),
        ])
        .unwrap()
    }

    #[test]
    fn test_ratio_reference_values() {
        assert_eq!(similarity_ratio("abcd", "bcde"), 0.75);
        assert_eq!(similarity_ratio("kabab", "kabab"), 1.0);
        assert_eq!(similarity_ratio("", ""), 1.0);
        assert_eq!(similarity_ratio("", "kabab"), 0.0);
        assert_eq!(similarity_ratio("abc", "xyz"), 0.0);
        // one extra letter: 2 * 5 / 11
        assert!((similarity_ratio("kababb", "kabab") - 10.0 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_ratio_recurses_both_sides() {
        // blocks "ab" and "cd" around the inserted "x"
        assert!((similarity_ratio("abxcd", "abcd") - 8.0 / 9.0).abs() < 1e-12);
        // "qa" sits on opposite sides of "dal", so only "dal" counts
        assert!((similarity_ratio("qadal", "dalqa") - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_ratio_is_unicode_aware() {
        assert_eq!(similarity_ratio("çay", "çay"), 1.0);
        assert!((similarity_ratio("çay", "cay") - 2.0 * 2.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_exact_match() {
        let catalog = small_catalog();
        let result = find_best_match("chicken breast", &catalog, DEFAULT_MIN_SIMILARITY);
        assert_eq!(result.matched_name.as_deref(), Some("chicken breast"));
        assert_eq!(result.similarity, 1.0);
        assert_eq!(result.origin, Some(Origin::International));
        assert!(result.is_match());
    }

    #[test]
    fn test_query_is_normalized() {
        let catalog = small_catalog();
        let result = find_best_match("  Chicken_BREAST ", &catalog, DEFAULT_MIN_SIMILARITY);
        assert_eq!(result.query, "chicken breast");
        assert_eq!(result.similarity, 1.0);
    }

    #[test]
    fn test_tie_keeps_first_entry() {
        let catalog = small_catalog();
        // "kxbab" is 0.8 against both "kabab" and "kebab"
        let result = find_best_match("kxbab", &catalog, DEFAULT_MIN_SIMILARITY);
        assert_eq!(result.matched_name.as_deref(), Some("kabab"));
        assert!((result.similarity - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let catalog = small_catalog();
        let result = find_best_match("kxbab", &catalog, 0.8);
        assert!(result.is_match());

        let result = find_best_match("kxbab", &catalog, 0.81);
        assert!(!result.is_match());
        assert!(result.matched_name.is_none());
        assert!((result.similarity - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_empty_query_does_not_match() {
        let catalog = small_catalog();
        let result = find_best_match("", &catalog, DEFAULT_MIN_SIMILARITY);
        assert!(!result.is_match());
        assert_eq!(result.similarity, 0.0);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::from_facts(Vec::new()).unwrap();
        let result = find_best_match("kabab", &catalog, DEFAULT_MIN_SIMILARITY);
        assert!(!result.is_match());
        assert_eq!(result.similarity, 0.0);
    }

    #[test]
    fn test_rank_matches() {
        let catalog = small_catalog();
        let ranked = rank_matches("kabab", &catalog, 0.5, 5);
        let names: Vec<_> = ranked
            .iter()
            .filter_map(|m| m.matched_name.as_deref())
            .collect();
        assert_eq!(names, vec!["kabab", "kebab"]);
        assert!(ranked[0].similarity >= ranked[1].similarity);

        let ranked = rank_matches("kabab", &catalog, 0.5, 1);
        assert_eq!(ranked.len(), 1);

        assert!(rank_matches("zzzz", &catalog, 0.5, 5).is_empty());
    }
}
