use polars::prelude::*;
use tracing::debug;

use crate::error::{Result, SuitabilityError};
use crate::labeler::column_as_f64;
use crate::schema::derived::TOTAL_SCORE;

/// Divide every value by the column's Euclidean norm.
///
/// An all-zero column normalizes to all zeros.
pub fn vector_normalize(values: &[f64]) -> Vec<f64> {
    let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm == 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| v / norm).collect()
}

/// Weighted sum of the vector-normalized criteria columns, one score per row.
///
/// Every weight-table column must be present; a missing one is reported by
/// name instead of being skipped.
pub fn aggregate_scores(df: &DataFrame, weights: &[(&str, f64)]) -> Result<Vec<f64>> {
    let mut totals = vec![0.0f64; df.height()];

    for &(name, weight) in weights {
        if df.column(name).is_err() {
            return Err(SuitabilityError::MissingColumn(name.to_string()));
        }
        let normalized = vector_normalize(&column_as_f64(df, name)?);
        for (total, value) in totals.iter_mut().zip(normalized) {
            *total += value * weight;
        }
        debug!(column = name, weight, "applied criterion");
    }

    Ok(totals)
}

/// Append the `Total_Score` column.
pub fn with_total_score(df: &DataFrame, weights: &[(&str, f64)]) -> Result<DataFrame> {
    let scores = aggregate_scores(df, weights)?;
    let mut out = df.clone();
    out.with_column(Series::new(TOTAL_SCORE.into(), scores))?;
    Ok(out)
}
