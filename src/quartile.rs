//! Set-relative quartile boundaries and the shared bucket rule used for both
//! attribute potential classes and recommendation tiers.

use crate::error::{Result, SuitabilityError};

/// Q1, Q2 (median) and Q3 of one value set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
}

impl Quartiles {
    /// Linear-interpolation quartiles: the p-th percentile sits at position
    /// `p * (n - 1)` of the sorted values.
    pub fn compute(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(SuitabilityError::EmptyInput(
                "quartiles are undefined for zero values".into(),
            ));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(SuitabilityError::InvalidData(format!(
                "quartiles require finite values, found {bad}"
            )));
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        Ok(Self {
            q1: percentile(&sorted, 0.25),
            q2: percentile(&sorted, 0.5),
            q3: percentile(&sorted, 0.75),
        })
    }

    /// Zero-based bucket index. Boundary values fall into the lower bucket.
    pub fn bucket(&self, x: f64) -> usize {
        if x <= self.q1 {
            0
        } else if x <= self.q2 {
            1
        } else if x <= self.q3 {
            2
        } else {
            3
        }
    }
}

// `sorted` is non-empty and ascending.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Label every value by its quartile bucket within `values` itself.
pub fn label_by_quartile<T: Clone>(values: &[f64], labels: &[T; 4]) -> Result<Vec<T>> {
    let quartiles = Quartiles::compute(values)?;
    Ok(values
        .iter()
        .map(|&x| labels[quartiles.bucket(x)].clone())
        .collect())
}
