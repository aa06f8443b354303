//! Food-name normalization applied to both catalog keys and queries.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize a free-text food name for lookup.
///
/// Lowercases, strips diacritics, drops apostrophes, turns every other
/// punctuation or symbol (underscores included) into a space, then collapses
/// whitespace runs and trims. Total and idempotent.
///
/// `"Qabuli_Palaw"` and `"  qabuli   pálaw "` both become `"qabuli palaw"`.
pub fn normalize(raw: &str) -> String {
    let spaced: String = raw
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c) && !matches!(*c, '\'' | '’' | '`'))
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}
