//! Bean construction policy for the brand scope.

use crate::brand::BrandConfig;
use crate::error::{ConfigError, Result};
use brandscope_core::{Bean, ObjectFactory};
use std::sync::Arc;

/// Names ending with this suffix resolve to the brand's configuration.
///
/// The first character of the suffix matches in either ASCII case and the
/// rest must match exactly: `ticketingbrandConfig` and `xBrandConfig` match,
/// `subbrandconfig` and `BRANDCONFIG` do not.
pub const BRAND_CONFIG_SUFFIX: &str = "brandConfig";

/// Builds a bean that is missing from a brand's bucket
///
/// Called at most once per (brand, name) until the bean is removed.
pub trait BeanLoader: Send + Sync {
    fn load_bean(&self, name: &str, factory: ObjectFactory<'_>, config: &Arc<BrandConfig>) -> Bean;
}

/// Default loader
///
/// Beans whose name ends with the configuration suffix are the brand
/// configuration itself and never reach the factory. Everything else is
/// built by calling the factory once.
#[derive(Debug, Clone)]
pub struct DefaultBeanLoader {
    config_suffix: String,
}

impl DefaultBeanLoader {
    pub fn new() -> Self {
        Self {
            config_suffix: BRAND_CONFIG_SUFFIX.to_string(),
        }
    }

    /// Use a different suffix for configuration beans
    ///
    /// An empty suffix is rejected, since it would turn every bean into the
    /// brand configuration.
    pub fn with_suffix(suffix: impl Into<String>) -> Result<Self> {
        let config_suffix = suffix.into();
        if config_suffix.is_empty() {
            return Err(ConfigError::ValidationError(
                "configuration bean suffix must not be empty".to_string(),
            ));
        }
        Ok(Self { config_suffix })
    }

    pub fn config_suffix(&self) -> &str {
        &self.config_suffix
    }

    /// Whether `name` refers to the brand configuration
    ///
    /// See [`BRAND_CONFIG_SUFFIX`] for the matching rule.
    pub fn is_config_bean(&self, name: &str) -> bool {
        let (name, suffix) = (name.as_bytes(), self.config_suffix.as_bytes());
        let Some((first, rest)) = suffix.split_first() else {
            return false;
        };
        if name.len() < suffix.len() {
            return false;
        }

        let tail = &name[name.len() - suffix.len()..];
        tail[0].eq_ignore_ascii_case(first) && &tail[1..] == rest
    }
}

impl Default for DefaultBeanLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl BeanLoader for DefaultBeanLoader {
    fn load_bean(&self, name: &str, factory: ObjectFactory<'_>, config: &Arc<BrandConfig>) -> Bean {
        if self.is_config_bean(name) {
            return config.clone();
        }
        factory()
    }
}
