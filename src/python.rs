use pyo3::prelude::*;
use pyo3::types::{PyDict, PyModule};
use pyo3_polars::PyDataFrame;

use crate::catalog::Category;
use crate::classifier::TIER_COLORS;
use crate::config::MapConfig;
use crate::pipeline::{self, SuitabilityPipeline};
use crate::schema;
use crate::visualization;

/// Score a village DataFrame for a category key.
/// An unrecognized key returns an empty DataFrame.
#[pyfunction]
fn run_pipeline(category: &str, df: PyDataFrame) -> PyResult<PyDataFrame> {
    let pipeline = SuitabilityPipeline::new()?;
    Ok(PyDataFrame(pipeline.run(category, &df.0)?))
}

/// Per-village listing as a list of dicts.
#[pyfunction]
fn recommendations<'py>(py: Python<'py>, df: PyDataFrame) -> PyResult<Vec<Bound<'py, PyDict>>> {
    pipeline::recommendations(&df.0)?
        .into_iter()
        .map(|row| {
            let dict = PyDict::new(py);
            dict.set_item(schema::identity::PROVINCE, row.province)?;
            dict.set_item(schema::identity::REGENCY, row.regency)?;
            dict.set_item(schema::identity::DISTRICT, row.district)?;
            dict.set_item(schema::identity::VILLAGE, row.village)?;
            dict.set_item(schema::derived::TOTAL_SCORE, row.total_score)?;
            dict.set_item(schema::derived::RECOMMENDATION, row.recommendation)?;
            Ok(dict)
        })
        .collect()
}

/// Render the recommendation report as an HTML fragment.
#[pyfunction]
#[pyo3(signature = (df, title=None))]
fn render_map(df: PyDataFrame, title: Option<String>) -> PyResult<String> {
    let mut config = MapConfig::default();
    if let Some(title) = title {
        config.title = title;
    }
    Ok(visualization::generate_recommendation_html(&df.0, &config)?)
}

/// (key, description) for every known category.
#[pyfunction]
fn categories() -> Vec<(&'static str, &'static str)> {
    Category::ALL
        .into_iter()
        .map(|c| (c.key(), c.description()))
        .collect()
}

#[pyfunction]
fn tier_colors() -> Vec<(&'static str, &'static str)> {
    TIER_COLORS.to_vec()
}

/// Export schema constants as a Python submodule
fn add_schema_exports(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let schema_mod = PyModule::new(m.py(), "schema")?;
    schema_mod.add("PROVINCE", schema::identity::PROVINCE)?;
    schema_mod.add("REGENCY", schema::identity::REGENCY)?;
    schema_mod.add("DISTRICT", schema::identity::DISTRICT)?;
    schema_mod.add("VILLAGE", schema::identity::VILLAGE)?;
    schema_mod.add("GEOMETRY", schema::geometry::GEOMETRY)?;
    schema_mod.add("CRITERION_PREFIX", schema::derived::CRITERION_PREFIX)?;
    schema_mod.add("TOTAL_SCORE", schema::derived::TOTAL_SCORE)?;
    schema_mod.add("RECOMMENDATION", schema::derived::RECOMMENDATION)?;
    m.add_submodule(&schema_mod)?;
    Ok(())
}

#[pymodule]
fn umkm_saw(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(run_pipeline, m)?)?;
    m.add_function(wrap_pyfunction!(recommendations, m)?)?;
    m.add_function(wrap_pyfunction!(render_map, m)?)?;
    m.add_function(wrap_pyfunction!(categories, m)?)?;
    m.add_function(wrap_pyfunction!(tier_colors, m)?)?;
    add_schema_exports(m)?;
    Ok(())
}
