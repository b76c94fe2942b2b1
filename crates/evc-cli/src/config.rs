//! Atlas configuration file

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use evc_catalog::CatalogConfig;
use evc_logging::{AtlasSubscriberBuilder, FileConfig, JsonlConfig, LogConfig};
use evc_map::WmsConfig;

/// Settings read from the optional TOML file
///
/// ```toml
/// log_level = "info"
///
/// [catalog]
/// max_plants = 30
///
/// [wms]
/// endpoint = "https://maps.example.org/geoserver/wms"
/// layer = "evc:nv1750"
///
/// [log_file]
/// directory = "./logs"
/// rotation = "daily"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    pub catalog: CatalogConfig,
    pub wms: Option<WmsConfig>,
    pub log_level: String,
    /// JSONL log file output; console only when absent
    pub log_file: Option<FileConfig>,
    pub log_format: JsonlConfig,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            wms: None,
            log_level: "warn".to_string(),
            log_file: None,
            log_format: JsonlConfig::default(),
        }
    }
}

impl AtlasConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid atlas configuration")
    }

    /// Load the file at `path`, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents).with_context(|| format!("In {}", path.display()))
    }

    /// Subscriber builder for these settings
    pub fn logging(&self, pretty: bool) -> AtlasSubscriberBuilder {
        let builder = AtlasSubscriberBuilder::new().with_config(LogConfig {
            jsonl: self.log_format.clone(),
            ..LogConfig::cli(self.log_level.clone(), pretty)
        });
        match &self.log_file {
            Some(file) => builder.with_file_output(file.clone()),
            None => builder,
        }
    }
}
