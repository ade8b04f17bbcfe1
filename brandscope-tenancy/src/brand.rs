//! Brand Configuration
//!
//! The per-brand configuration object resolved on every scope access.

use brandscope_core::BrandId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

fn default_active() -> bool {
    true
}

/// Brand configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrandConfig {
    /// Unique brand identifier
    pub id: BrandId,

    /// Brand name/slug
    pub name: String,

    /// Human readable name
    #[serde(default)]
    pub display_name: Option<String>,

    /// Inactive brands are not served
    #[serde(default = "default_active")]
    pub active: bool,

    /// Free-form brand settings
    #[serde(default)]
    pub settings: HashMap<String, String>,
}

impl BrandConfig {
    /// Create a new brand configuration
    ///
    /// # Examples
    ///
    /// ```
    /// use brandscope_tenancy::BrandConfig;
    ///
    /// let config = BrandConfig::new("brand-1", "acme")
    ///     .with_setting("currency", "EUR");
    /// assert_eq!(config.setting("currency"), Some("EUR"));
    /// ```
    pub fn new(id: impl Into<BrandId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            display_name: None,
            active: true,
            settings: HashMap::new(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Look up a single setting
    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }
}
