//! Brand Interceptor
//!
//! Establishes the brand of a unit of work before it touches brand-scoped
//! beans.

use crate::service::BrandConfigService;
use brandscope_core::logging::{debug, warn};
use brandscope_core::{BrandContext, Result, ScopeError};
use std::sync::Arc;

/// Brand interceptor
///
/// Builds the [`BrandContext`] for a unit of work from the brand id the
/// caller extracted (header, path segment, method argument...).
pub struct BrandInterceptor {
    service: Arc<dyn BrandConfigService>,
    optional: bool,
}

impl BrandInterceptor {
    /// Create a new brand interceptor
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use brandscope_tenancy::BrandInterceptor;
    ///
    /// let interceptor = BrandInterceptor::new(service);
    /// let greeting = interceptor.intercept(Some("brand-1"), |ctx| {
    ///     scope.get_typed(ctx, "greeter", Greeter::default)
    /// })??;
    /// ```
    pub fn new(service: Arc<dyn BrandConfigService>) -> Self {
        Self {
            service,
            optional: false,
        }
    }

    /// Make brand resolution optional
    ///
    /// If false (the default), an unknown or missing brand is rejected before
    /// the work runs. If true, the work runs with whatever id was supplied and
    /// brand-scoped lookups fail later instead.
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Build the context for a unit of work
    pub fn enter(&self, brand_id: Option<&str>) -> Result<BrandContext> {
        let mut ctx = BrandContext::new();
        ctx.set_brand(brand_id.map(Into::into));

        let known = brand_id.is_some_and(|id| self.service.brand_config(id).is_some());
        if known || self.optional {
            debug!(
                brand = brand_id.unwrap_or("<none>"),
                request_id = %ctx.request_id(),
                "Entering brand context"
            );
            return Ok(ctx);
        }

        warn!(
            brand = brand_id.unwrap_or("<none>"),
            request_id = %ctx.request_id(),
            "Brand resolution failed"
        );
        Err(ScopeError::unsupported_brand(brand_id))
    }

    /// Run `work` inside a freshly built brand context
    pub fn intercept<R, F>(&self, brand_id: Option<&str>, work: F) -> Result<R>
    where
        F: FnOnce(&BrandContext) -> R,
    {
        let ctx = self.enter(brand_id)?;
        Ok(work(&ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::BrandConfig;
    use crate::service::InMemoryBrandConfigService;

    fn service() -> Arc<dyn BrandConfigService> {
        Arc::new(InMemoryBrandConfigService::from_configs([BrandConfig::new(
            "brand-1", "acme",
        )]))
    }

    #[test]
    fn test_intercept_with_known_brand() {
        let interceptor = BrandInterceptor::new(service());

        let seen = interceptor
            .intercept(Some("brand-1"), |ctx| {
                ctx.brand_id().map(|id| id.to_string())
            })
            .unwrap();

        assert_eq!(seen.as_deref(), Some("brand-1"));
    }

    #[test]
    fn test_unknown_brand_required() {
        let interceptor = BrandInterceptor::new(service());
        let mut ran = false;

        let result = interceptor.intercept(Some("brand-9"), |_| ran = true);

        assert_eq!(
            result.unwrap_err(),
            ScopeError::unsupported_brand(Some("brand-9"))
        );
        assert!(!ran);
    }

    #[test]
    fn test_missing_brand_required() {
        let interceptor = BrandInterceptor::new(service());
        assert!(interceptor.enter(None).is_err());
    }

    #[test]
    fn test_optional_passes_through() {
        let interceptor = BrandInterceptor::new(service()).with_optional(true);

        let ctx = interceptor.enter(None).unwrap();
        assert!(!ctx.has_brand());

        let ctx = interceptor.enter(Some("brand-9")).unwrap();
        assert_eq!(ctx.brand_id().map(|id| id.as_str()), Some("brand-9"));
    }

    #[test]
    fn test_each_unit_of_work_gets_own_context() {
        let interceptor = BrandInterceptor::new(service());

        let first = interceptor.enter(Some("brand-1")).unwrap();
        let second = interceptor.enter(Some("brand-1")).unwrap();

        assert_ne!(first.request_id(), second.request_id());
    }
}
