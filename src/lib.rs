// brandscope - brand-scoped beans for dependency-injection containers
//
// This crate re-exports the core context/scope/container types and the
// brand scope implementation.

// Re-export core functionality
pub use brandscope_core::*;

// Re-export the brand scope
pub use brandscope_tenancy::{
    BRAND_CONFIG_SUFFIX, BRAND_SCOPE_NAME, BeanLoader, BrandConfig, BrandConfigLoader,
    BrandConfigService, BrandInterceptor, BrandScope, ConfigError, DefaultBeanLoader, FileFormat,
    InMemoryBrandConfigService,
};

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Bean, BrandConfig, BrandConfigService, BrandContext, BrandId, BrandInterceptor,
        BrandScope, Container, InMemoryBrandConfigService, Scope, ScopeError,
    };
}
