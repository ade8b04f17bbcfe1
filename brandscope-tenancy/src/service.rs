//! Brand Configuration Service
//!
//! Resolves a brand id to its configuration.

use crate::brand::BrandConfig;
use crate::error::Result;
use crate::loader::BrandConfigLoader;
use brandscope_core::BrandId;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Brand configuration service trait
///
/// Implement this with your configuration source. Returning `None` means
/// the brand is not recognised; the brand scope rejects such brands.
pub trait BrandConfigService: Send + Sync {
    /// Find the configuration of a brand
    fn brand_config(&self, brand_id: &str) -> Option<Arc<BrandConfig>>;
}

/// In-memory brand configuration service
///
/// Inactive brands are stored but reported as unknown.
#[derive(Default)]
pub struct InMemoryBrandConfigService {
    brands: RwLock<HashMap<BrandId, Arc<BrandConfig>>>,
}

impl InMemoryBrandConfigService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service from a list of configurations
    ///
    /// # Examples
    ///
    /// ```
    /// use brandscope_tenancy::{BrandConfig, BrandConfigService, InMemoryBrandConfigService};
    ///
    /// let service = InMemoryBrandConfigService::from_configs([
    ///     BrandConfig::new("brand-1", "acme"),
    ///     BrandConfig::new("brand-2", "globex").with_active(false),
    /// ]);
    ///
    /// assert!(service.brand_config("brand-1").is_some());
    /// assert!(service.brand_config("brand-2").is_none());
    /// ```
    pub fn from_configs(configs: impl IntoIterator<Item = BrandConfig>) -> Self {
        let service = Self::new();
        for config in configs {
            service.insert(config);
        }
        service
    }

    /// Load configurations from a JSON or TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let configs = BrandConfigLoader::auto(path)?.load_file(path)?;
        Ok(Self::from_configs(configs))
    }

    /// Add or replace a brand configuration
    pub fn insert(&self, config: BrandConfig) -> Option<Arc<BrandConfig>> {
        self.brands
            .write()
            .insert(config.id.clone(), Arc::new(config))
    }

    /// Remove a brand configuration
    pub fn remove(&self, brand_id: &str) -> Option<Arc<BrandConfig>> {
        self.brands.write().remove(brand_id)
    }

    pub fn len(&self) -> usize {
        self.brands.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.brands.read().is_empty()
    }
}

impl BrandConfigService for InMemoryBrandConfigService {
    fn brand_config(&self, brand_id: &str) -> Option<Arc<BrandConfig>> {
        self.brands
            .read()
            .get(brand_id)
            .filter(|config| config.active)
            .cloned()
    }
}
