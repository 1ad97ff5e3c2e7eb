use polars::prelude::*;
use tracing::debug;

use crate::error::{Result, SuitabilityError};
use crate::quartile::label_by_quartile;
use crate::schema::derived::criterion_column;

/// Ordinal potential of one attribute value relative to its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PotentialClass {
    Low = 1,
    Moderate = 2,
    High = 3,
    VeryHigh = 4,
}

impl PotentialClass {
    pub const ALL: [PotentialClass; 4] = [
        PotentialClass::Low,
        PotentialClass::Moderate,
        PotentialClass::High,
        PotentialClass::VeryHigh,
    ];

    /// Text stored in the derived column, `"1"` through `"4"`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "1",
            Self::Moderate => "2",
            Self::High => "3",
            Self::VeryHigh => "4",
        }
    }
}

/// Names of the integer and floating point columns of `df`, in frame order.
pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|c| c.dtype().is_integer() || c.dtype().is_float())
        .map(|c| c.name().to_string())
        .collect()
}

/// Read a column as `f64` values. Nulls are rejected rather than skipped.
pub(crate) fn column_as_f64(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let column = df
        .column(name)
        .map_err(|_| SuitabilityError::MissingColumn(name.to_string()))?;
    let cast = column.cast(&DataType::Float64)?;
    cast.f64()?
        .into_iter()
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(|| {
            SuitabilityError::InvalidData(format!("Column '{name}' contains null values"))
        })
}

/// Potential classes for one value set.
pub fn potential_classes(values: &[f64]) -> Result<Vec<PotentialClass>> {
    label_by_quartile(values, &PotentialClass::ALL)
}

/// Add a `BOBOT_<col>` potential-class column for every numeric column.
///
/// Classes are stored as strings so derived columns never count as numeric
/// attributes themselves.
pub fn label_potential(df: &DataFrame) -> Result<DataFrame> {
    if df.height() == 0 {
        return Err(SuitabilityError::EmptyInput(
            "cannot label potential classes of a table with zero records".into(),
        ));
    }

    let mut out = df.clone();
    for name in numeric_columns(df) {
        let values = column_as_f64(df, &name)?;
        let classes: Vec<&str> = potential_classes(&values)
            .map_err(|e| match e {
                SuitabilityError::InvalidData(msg) => {
                    SuitabilityError::InvalidData(format!("column '{name}': {msg}"))
                }
                other => other,
            })?
            .into_iter()
            .map(PotentialClass::label)
            .collect();

        let derived = criterion_column(&name);
        debug!(column = %name, derived = %derived, "labelled potential classes");
        out.with_column(Series::new(derived.as_str().into(), classes))?;
    }
    Ok(out)
}
