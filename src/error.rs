use thiserror::Error;

#[derive(Error, Debug)]
pub enum SuitabilityError {
    #[error("Unknown UMKM category: {0}")]
    UnknownCategory(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("InvalidData: {0}")]
    InvalidData(String),

    #[error("Config: {0}")]
    Config(String),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SuitabilityError>;

#[cfg(feature = "python")]
impl From<SuitabilityError> for pyo3::PyErr {
    fn from(err: SuitabilityError) -> pyo3::PyErr {
        match err {
            SuitabilityError::UnknownCategory(_) => {
                pyo3::exceptions::PyValueError::new_err(err.to_string())
            }
            _ => pyo3::exceptions::PyRuntimeError::new_err(err.to_string()),
        }
    }
}
