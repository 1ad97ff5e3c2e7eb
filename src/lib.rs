//! Village suitability ranking for small-business (UMKM) categories.
//!
//! Raw attributes are binned into quartile potential classes, combined with a
//! vector-normalized weighted sum (SAW) and classified into four
//! recommendation tiers relative to the scored set.

pub mod aggregator;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod error;
pub mod labeler;
pub mod loader;
pub mod logging;
pub mod pipeline;
pub mod quartile;
pub mod schema;
pub mod visualization;

#[cfg(feature = "python")]
mod python;

pub use catalog::{Category, CriteriaSet};
pub use classifier::{Recommendation, TIER_COLORS};
pub use error::{Result, SuitabilityError};
pub use labeler::PotentialClass;
pub use pipeline::{recommendations, tier_counts, SuitabilityPipeline, VillageRecommendation};
