use polars::prelude::*;

use crate::error::{Result, SuitabilityError};
use crate::labeler::column_as_f64;
use crate::quartile::label_by_quartile;
use crate::schema::derived::{RECOMMENDATION, TOTAL_SCORE};

/// Recommendation tier, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Recommendation {
    NotRecommended,
    Marginal,
    Moderate,
    Recommended,
}

/// Fixed display color for each tier label, one-to-one.
pub const TIER_COLORS: [(&str, &str); 4] = [
    ("TIDAK REKOMENDASI", "red"),
    ("KURANG REKOMENDASI", "yellow"),
    ("CUKUP REKOMENDASI", "green"),
    ("DIREKOMENDASIKAN", "darkgreen"),
];

impl Recommendation {
    pub const ALL: [Recommendation; 4] = [
        Recommendation::NotRecommended,
        Recommendation::Marginal,
        Recommendation::Moderate,
        Recommendation::Recommended,
    ];

    /// 1-based tier index.
    pub fn tier(self) -> u8 {
        self as u8 + 1
    }

    pub fn label(self) -> &'static str {
        TIER_COLORS[self as usize].0
    }

    pub fn color(self) -> &'static str {
        TIER_COLORS[self as usize].1
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::NotRecommended => "not recommended",
            Self::Marginal => "marginally recommended",
            Self::Moderate => "moderately recommended",
            Self::Recommended => "recommended",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.label() == label)
    }
}

/// Tier per score, using the quartiles of `scores` itself.
pub fn classify(scores: &[f64]) -> Result<Vec<Recommendation>> {
    label_by_quartile(scores, &Recommendation::ALL)
}

/// Append the `REKOMENDASI` column computed from `Total_Score`.
pub fn with_recommendation(df: &DataFrame) -> Result<DataFrame> {
    if df.height() == 0 {
        return Err(SuitabilityError::EmptyInput(
            "cannot classify scores of a table with zero records".into(),
        ));
    }
    let scores = column_as_f64(df, TOTAL_SCORE)?;
    let labels: Vec<&str> = classify(&scores)?
        .into_iter()
        .map(Recommendation::label)
        .collect();

    let mut out = df.clone();
    out.with_column(Series::new(RECOMMENDATION.into(), labels))?;
    Ok(out)
}
