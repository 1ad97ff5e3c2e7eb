use std::collections::HashSet;

use crate::error::{Result, SuitabilityError};
use crate::schema::attribute::*;
use crate::schema::derived::{criterion_column, CRITERION_PREFIX};

/// Business categories the catalog knows how to score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Staple-goods retail.
    Sembako,
    /// Non-halal-sensitive food service.
    KulinerNonis,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Sembako, Category::KulinerNonis];

    pub fn key(self) -> &'static str {
        match self {
            Self::Sembako => "sembako",
            Self::KulinerNonis => "kuliner_nonis",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Sembako => "staple-goods retail",
            Self::KulinerNonis => "non-halal-sensitive food service",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    pub fn criteria(self) -> &'static CriteriaSet {
        match self {
            Self::Sembako => &SEMBAKO,
            Self::KulinerNonis => &KULINER_NONIS,
        }
    }
}

/// Attribute columns relevant to a category plus the weight table applied to
/// their derived potential-class columns.
#[derive(Debug, Clone, Copy)]
pub struct CriteriaSet {
    pub columns: &'static [&'static str],
    /// Derived column name (`BOBOT_*`) → weight.
    pub weights: &'static [(&'static str, f64)],
}

impl CriteriaSet {
    pub fn weight_columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.weights.iter().map(|(name, _)| *name)
    }
}

static SEMBAKO: CriteriaSet = CriteriaSet {
    columns: &[POPULATION, PRIMARY_GRADUATES, HOUSEHOLDS, DENSITY],
    weights: &[
        ("BOBOT_JUMLAH_PENDUDUK", 0.3),
        ("BOBOT_TAMAT_SD", 0.2),
        ("BOBOT_JUMLAH_KK", 0.25),
        ("BOBOT_KEPADATAN", 0.25),
    ],
};

static KULINER_NONIS: CriteriaSet = CriteriaSet {
    columns: &[
        POPULATION, DENSITY, CHRISTIAN, CATHOLIC, HINDU, BUDDHIST, CONFUCIAN,
    ],
    weights: &[
        ("BOBOT_JUMLAH_PENDUDUK", 0.1),
        ("BOBOT_KEPADATAN", 0.1),
        ("BOBOT_KRISTEN", 0.2),
        ("BOBOT_KATOLIK", 0.2),
        ("BOBOT_HINDU", 0.2),
        ("BOBOT_BUDHA", 0.1),
        ("BOBOT_KONGHUCU", 0.1),
    ],
};

/// Resolve a category key to its criteria.
pub fn lookup(key: &str) -> Result<(Category, &'static CriteriaSet)> {
    Category::from_key(key)
        .map(|category| (category, category.criteria()))
        .ok_or_else(|| SuitabilityError::UnknownCategory(key.to_string()))
}

/// Check that columns are unique, that every weight key is derivable from
/// the listed columns, and that weights are finite and non-negative.
pub fn validate_criteria(criteria: &CriteriaSet) -> Result<()> {
    let mut seen_columns = HashSet::new();
    for &column in criteria.columns {
        if !seen_columns.insert(column) {
            return Err(SuitabilityError::Config(format!(
                "Criteria column '{column}' listed more than once"
            )));
        }
    }

    let derivable: HashSet<String> = criteria
        .columns
        .iter()
        .map(|c| criterion_column(c))
        .collect();

    let mut seen = HashSet::new();
    for &(name, weight) in criteria.weights {
        if !name.starts_with(CRITERION_PREFIX) || !derivable.contains(name) {
            return Err(SuitabilityError::Config(format!(
                "Weight column '{name}' is not derived from any criteria column"
            )));
        }
        if !seen.insert(name) {
            return Err(SuitabilityError::Config(format!(
                "Weight column '{name}' listed more than once"
            )));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(SuitabilityError::Config(format!(
                "Weight for '{name}' must be a non-negative number, got {weight}"
            )));
        }
    }
    Ok(())
}

pub fn validate_catalog() -> Result<()> {
    for category in Category::ALL {
        validate_criteria(category.criteria()).map_err(|e| {
            SuitabilityError::Config(format!("category '{}': {e}", category.key()))
        })?;
    }
    Ok(())
}
