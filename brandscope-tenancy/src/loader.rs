// Brand configuration file loaders

use crate::brand::BrandConfig;
use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }
}

/// On-disk document: `{ "brands": [...] }` or `[[brands]]`
#[derive(Debug, Deserialize)]
struct BrandDocument {
    #[serde(default)]
    brands: Vec<BrandConfig>,
}

/// Brand configuration file loader
pub struct BrandConfigLoader {
    format: FileFormat,
}

impl BrandConfigLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Auto-detect format from file extension
    pub fn auto(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::LoadError("No file extension found".to_string()))?;

        let format = FileFormat::from_extension(ext)
            .ok_or_else(|| ConfigError::LoadError(format!("Unsupported format: {}", ext)))?;

        Ok(Self::new(format))
    }

    /// Load brand configurations from file
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Vec<BrandConfig>> {
        let content = fs::read_to_string(path)?;
        self.parse(&content)
    }

    /// Parse and validate brand configurations
    pub fn parse(&self, content: &str) -> Result<Vec<BrandConfig>> {
        let document: BrandDocument = match self.format {
            FileFormat::Json => serde_json::from_str(content)
                .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e)))?,
            FileFormat::Toml => toml::from_str(content)
                .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?,
        };

        validate(&document.brands)?;
        Ok(document.brands)
    }
}

fn validate(brands: &[BrandConfig]) -> Result<()> {
    let mut seen = HashSet::new();
    for brand in brands {
        if brand.id.as_str().trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "brand '{}' has an empty id",
                brand.name
            )));
        }
        if !seen.insert(brand.id.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate brand id: {}",
                brand.id
            )));
        }
    }
    Ok(())
}
