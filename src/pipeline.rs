use std::collections::BTreeMap;

use polars::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::aggregator::with_total_score;
use crate::catalog::{self, CriteriaSet};
use crate::classifier::{with_recommendation, Recommendation};
use crate::error::{Result, SuitabilityError};
use crate::labeler::{column_as_f64, label_potential};
use crate::schema::derived::{RECOMMENDATION, TOTAL_SCORE};
use crate::schema::{geometry, identity};

/// Scores village tables against the built-in criteria catalog.
///
/// Every call works on the table it is handed; quartile boundaries are never
/// shared between calls.
#[derive(Debug, Clone)]
pub struct SuitabilityPipeline {
    // constructed only through `new`
    _validated: (),
}

impl SuitabilityPipeline {
    /// Validate the catalog once up front.
    pub fn new() -> Result<Self> {
        catalog::validate_catalog()?;
        Ok(Self { _validated: () })
    }

    /// Score `raw` for `category`.
    ///
    /// An unrecognized category yields an empty table; use [`Self::try_run`]
    /// to tell that case apart from empty input.
    pub fn run(&self, category: &str, raw: &DataFrame) -> Result<DataFrame> {
        match self.try_run(category, raw) {
            Err(SuitabilityError::UnknownCategory(key)) => {
                warn!(category = %key, "unrecognized UMKM category, returning empty result");
                Ok(DataFrame::empty())
            }
            other => other,
        }
    }

    pub fn try_run(&self, category: &str, raw: &DataFrame) -> Result<DataFrame> {
        let (category, criteria) = catalog::lookup(category)?;
        debug!(category = category.key(), rows = raw.height(), "scoring villages");
        self.run_with_criteria(criteria, raw)
    }

    /// Score `raw` against an explicit criteria set.
    pub fn run_with_criteria(&self, criteria: &CriteriaSet, raw: &DataFrame) -> Result<DataFrame> {
        let filtered = select_relevant(raw, criteria)?;
        let labelled = label_potential(&filtered)?;
        let scored = with_total_score(&labelled, criteria.weights)?;
        let classified = with_recommendation(&scored)?;

        let counts = tier_counts(&classified)?;
        info!(rows = classified.height(), tiers = ?counts, "pipeline finished");
        Ok(classified)
    }
}

/// Identifiers, criteria columns (as `Float64`) and geometry, in that order.
fn select_relevant(raw: &DataFrame, criteria: &CriteriaSet) -> Result<DataFrame> {
    let mut wanted: Vec<&str> = identity::ALL.to_vec();
    wanted.extend_from_slice(criteria.columns);
    wanted.push(geometry::GEOMETRY);
    require_columns(raw, &wanted)?;

    let casts: Vec<Expr> = criteria
        .columns
        .iter()
        .map(|&name| match raw.column(name).map(|c| c.dtype()) {
            Ok(DataType::String) => col(name)
                .str()
                .strip_chars(lit(" \t\r\n"))
                .cast(DataType::Float64),
            _ => col(name).cast(DataType::Float64),
        })
        .collect();

    let df = raw.select(wanted)?.lazy().with_columns(casts).collect()?;

    for &name in criteria.columns {
        if df.column(name)?.null_count() > 0 {
            return Err(SuitabilityError::InvalidData(format!(
                "Column '{name}' has missing or non-numeric values"
            )));
        }
    }
    Ok(df)
}

fn require_columns(df: &DataFrame, required: &[&str]) -> Result<()> {
    for &col_name in required {
        if df.column(col_name).is_err() {
            return Err(SuitabilityError::MissingColumn(col_name.to_string()));
        }
    }
    Ok(())
}

/// One row of the recommendation listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VillageRecommendation {
    pub province: String,
    pub regency: String,
    pub district: String,
    pub village: String,
    pub total_score: f64,
    pub recommendation: String,
}

/// Extract the per-village listing from a pipeline result.
pub fn recommendations(df: &DataFrame) -> Result<Vec<VillageRecommendation>> {
    if df.height() == 0 {
        return Ok(Vec::new());
    }
    let province = df.column(identity::PROVINCE)?.str()?;
    let regency = df.column(identity::REGENCY)?.str()?;
    let district = df.column(identity::DISTRICT)?.str()?;
    let village = df.column(identity::VILLAGE)?.str()?;
    let labels = df.column(RECOMMENDATION)?.str()?;
    let scores = column_as_f64(df, TOTAL_SCORE)?;

    let text = |ca: &StringChunked, i: usize| ca.get(i).unwrap_or("").to_string();

    Ok(scores
        .into_iter()
        .enumerate()
        .map(|(i, total_score)| VillageRecommendation {
            province: text(province, i),
            regency: text(regency, i),
            district: text(district, i),
            village: text(village, i),
            total_score,
            recommendation: text(labels, i),
        })
        .collect())
}

/// Number of villages per tier, every tier present (possibly zero).
pub fn tier_counts(df: &DataFrame) -> Result<BTreeMap<Recommendation, usize>> {
    let mut counts: BTreeMap<Recommendation, usize> =
        Recommendation::ALL.into_iter().map(|r| (r, 0)).collect();
    if df.height() == 0 {
        return Ok(counts);
    }
    for label in df.column(RECOMMENDATION)?.str()?.into_iter().flatten() {
        let tier = Recommendation::from_label(label).ok_or_else(|| {
            SuitabilityError::InvalidData(format!("Unknown recommendation label: {label}"))
        })?;
        *counts.entry(tier).or_default() += 1;
    }
    Ok(counts)
}
