//! Offline food-name lookup against a static nutrition catalog.
//!
//! A free-text name is normalized, matched against every catalog entry with a
//! sequence-matcher similarity ratio and, when a match clears the threshold,
//! scaled into a nutrition estimate:
//!
//! ```
//! use nutrition_lookup::{estimate, Estimate};
//!
//! match estimate("Chicken Breast", 1.5) {
//!     Estimate::Found(n) => println!("{} kcal ({})", n.calories, n.matched_name),
//!     Estimate::Unknown(u) => println!("no match for {}", u.query),
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod estimator;
pub mod export;
pub mod matcher;
pub mod models;
pub mod normalize;

pub use catalog::{Catalog, CatalogEntry};
pub use config::MatchPolicy;
pub use estimator::{estimate, Estimator};
pub use matcher::{find_best_match, rank_matches, similarity_ratio, DEFAULT_MIN_SIMILARITY};
pub use models::*;
pub use normalize::normalize;
