//! Brand Scope for brandscope
//!
//! Multi-brand (multi-tenant) singletons: every brand gets its own lazily
//! created instance of each brand-scoped bean, and a brand's configuration
//! can itself be injected like any other bean.
//!
//! # Features
//!
//! - **Brand Scope** - two-level lazy cache, brand -> (bean name -> instance)
//! - **Race-free creation** - at most one factory call per brand and bean name
//! - **Brand Configuration** - injectable as a bean (`...brandConfig` names)
//!   or through [`BrandScope::brand_config`]
//! - **File Loading** - brand configurations from JSON or TOML
//! - **Interceptor** - builds the brand context for each unit of work
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use brandscope_core::{BrandContext, Container};
//! use brandscope_tenancy::*;
//!
//! // Brand configurations
//! let service: Arc<dyn BrandConfigService> =
//!     Arc::new(InMemoryBrandConfigService::from_file("brands.toml")?);
//!
//! // Register the scope and brand-scoped beans
//! let container = Container::new();
//! container.register_scope(BRAND_SCOPE_NAME, Arc::new(BrandScope::new(service.clone())));
//! container.register_bean("ticketService", BRAND_SCOPE_NAME, TicketService::default);
//! container.register_bean("brandConfig", BRAND_SCOPE_NAME, || ());
//!
//! // Per request
//! let interceptor = BrandInterceptor::new(service);
//! let tickets = interceptor.intercept(Some("brand-1"), |ctx| {
//!     container.get::<TicketService>(ctx, "ticketService")
//! })??;
//! ```

pub mod bean_loader;
pub mod brand;
pub mod error;
pub mod interceptor;
pub mod loader;
pub mod scope;
pub mod service;

pub use bean_loader::{BRAND_CONFIG_SUFFIX, BeanLoader, DefaultBeanLoader};
pub use brand::BrandConfig;
pub use error::ConfigError;
pub use interceptor::BrandInterceptor;
pub use loader::{BrandConfigLoader, FileFormat};
pub use scope::{BRAND_SCOPE_NAME, BrandScope};
pub use service::{BrandConfigService, InMemoryBrandConfigService};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bean_loader::{BeanLoader, DefaultBeanLoader};
    pub use crate::brand::BrandConfig;
    pub use crate::interceptor::BrandInterceptor;
    pub use crate::scope::{BRAND_SCOPE_NAME, BrandScope};
    pub use crate::service::{BrandConfigService, InMemoryBrandConfigService};
}
