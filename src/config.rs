use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, SuitabilityError};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub output: OutputConfig,
    pub map: MapConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Merged village CSV with identifiers, attributes and WKT geometry.
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/data_merged.csv"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub csv: Option<PathBuf>,
    pub html: Option<PathBuf>,
}

/// Settings handed to the choropleth renderer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub title: String,
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            title: "Peta Rekomendasi UMKM".to_string(),
            center_lat: -7.5,
            center_lon: 108.3,
            zoom: 10,
        }
    }
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SuitabilityError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.map.center_lat) {
            return Err(SuitabilityError::Config(format!(
                "map.center_lat out of range: {}",
                self.map.center_lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.map.center_lon) {
            return Err(SuitabilityError::Config(format!(
                "map.center_lon out of range: {}",
                self.map.center_lon
            )));
        }
        Ok(())
    }
}
