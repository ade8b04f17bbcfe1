//! Brand Scope
//!
//! Caches one instance of each bean per brand. The cache has two levels:
//! brand id to bucket, and bean name to instance within a bucket. Buckets
//! are created on first access and live as long as the scope; instances
//! are created on first request and leave only through [`Scope::remove`].
//!
//! # Concurrency
//!
//! - A bucket is created exactly once per brand, even under a race.
//! - Each bean name owns its own slot. Concurrent requests for the same
//!   name wait on that slot and all receive the single instance built by
//!   the winner; requests for other names or other brands do not wait.
//! - The slot is cloned out of the bucket map before the factory runs, so a
//!   factory may resolve other beans of the same brand. A factory that
//!   requests its own name deadlocks.
//! - Removal only takes built beans. A slot still under construction stays
//!   in the bucket, so the bean being built is cached and no second
//!   construction of the same name can start.
//! - A panicking factory leaves its slot empty but in place; the next `get`
//!   of that name builds into the same slot.

use crate::bean_loader::{BeanLoader, DefaultBeanLoader};
use crate::brand::BrandConfig;
use crate::service::BrandConfigService;
use brandscope_core::logging::{debug, trace, warn};
use brandscope_core::{
    Bean, BrandContext, BrandId, DestructionCallback, ObjectFactory, Result, Scope, ScopeError,
    downcast_bean,
};
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::any::Any;
use std::sync::Arc;

/// Name under which the scope is usually registered in a container.
pub const BRAND_SCOPE_NAME: &str = "brand";

type Slot = Arc<OnceCell<Bean>>;

/// Beans of a single brand
#[derive(Default)]
struct BeanBucket {
    slots: DashMap<String, Slot>,
}

impl BeanBucket {
    fn slot(&self, name: &str) -> Slot {
        if let Some(slot) = self.slots.get(name) {
            return slot.clone();
        }
        self.slots.entry(name.to_string()).or_default().clone()
    }

    fn remove(&self, name: &str) -> Option<Bean> {
        let (_, slot) = self
            .slots
            .remove_if(name, |_, slot| slot.get().is_some())?;
        slot.get().cloned()
    }

    fn contains(&self, name: &str) -> bool {
        self.slots
            .get(name)
            .is_some_and(|slot| slot.value().get().is_some())
    }

    fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.value().get().is_some())
            .count()
    }
}

/// Brand-scoped bean cache
pub struct BrandScope {
    service: Arc<dyn BrandConfigService>,
    loader: Arc<dyn BeanLoader>,
    brands: DashMap<BrandId, Arc<BeanBucket>>,
}

impl BrandScope {
    /// Create a brand scope with the default bean loader
    ///
    /// # Examples
    ///
    /// ```
    /// use brandscope_core::{Bean, BrandContext, Scope};
    /// use brandscope_tenancy::{BrandConfig, BrandScope, InMemoryBrandConfigService};
    /// use std::sync::Arc;
    ///
    /// let service = InMemoryBrandConfigService::from_configs([BrandConfig::new("brand-1", "acme")]);
    /// let scope = BrandScope::new(Arc::new(service));
    ///
    /// let ctx = BrandContext::with_brand("brand-1");
    /// let bean = scope.get(&ctx, "greeting", &mut || Arc::new("hello") as Bean).unwrap();
    /// assert_eq!(*bean.downcast::<&str>().unwrap(), "hello");
    /// ```
    pub fn new(service: Arc<dyn BrandConfigService>) -> Self {
        Self::with_loader(service, Arc::new(DefaultBeanLoader::new()))
    }

    /// Create a brand scope with a custom bean construction policy
    pub fn with_loader(service: Arc<dyn BrandConfigService>, loader: Arc<dyn BeanLoader>) -> Self {
        debug!("Creating brand scope");
        Self {
            service,
            loader,
            brands: DashMap::new(),
        }
    }

    /// Resolve the configuration of the context's brand
    ///
    /// Fails with `UnsupportedBrand` when no brand is set or the
    /// configuration service does not know it. Nothing is cached; every
    /// call asks the service.
    pub fn brand_config(&self, ctx: &BrandContext) -> Result<Arc<BrandConfig>> {
        self.resolve(ctx).map(|(_, config)| config)
    }

    fn resolve<'a>(&self, ctx: &'a BrandContext) -> Result<(&'a BrandId, Arc<BrandConfig>)> {
        let resolved = ctx
            .brand_id()
            .and_then(|id| self.service.brand_config(id.as_str()).map(|config| (id, config)));

        resolved.ok_or_else(|| {
            let brand_id = ctx.brand_id().map(BrandId::as_str);
            warn!(
                brand = brand_id.unwrap_or("<none>"),
                request_id = %ctx.request_id(),
                "Rejected access for unsupported brand"
            );
            ScopeError::unsupported_brand(brand_id)
        })
    }

    /// Get or create the bucket of a brand
    fn bucket(&self, brand_id: &BrandId) -> Arc<BeanBucket> {
        if let Some(bucket) = self.brands.get(brand_id) {
            return bucket.clone();
        }

        self.brands
            .entry(brand_id.clone())
            .or_insert_with(|| {
                debug!(brand = %brand_id, "Creating bean bucket");
                Arc::new(BeanBucket::default())
            })
            .clone()
    }

    /// Typed variant of [`Scope::get`]
    pub fn get_typed<T, F>(&self, ctx: &BrandContext, name: &str, mut factory: F) -> Result<Arc<T>>
    where
        T: Any + Send + Sync,
        F: FnMut() -> T,
    {
        let bean = self.get(ctx, name, &mut || Arc::new(factory()) as Bean)?;
        downcast_bean(name, bean)
    }

    /// Whether the context's brand holds a built instance under `name`
    pub fn contains(&self, ctx: &BrandContext, name: &str) -> bool {
        ctx.brand_id()
            .and_then(|id| self.brands.get(id))
            .is_some_and(|bucket| bucket.contains(name))
    }

    /// Number of brands with a bucket
    pub fn brand_count(&self) -> usize {
        self.brands.len()
    }

    /// Whether a bucket exists for the brand
    pub fn has_bucket(&self, brand_id: &str) -> bool {
        self.brands.contains_key(brand_id)
    }

    /// Number of built beans cached for the brand
    pub fn bean_count(&self, brand_id: &str) -> usize {
        self.brands
            .get(brand_id)
            .map(|bucket| bucket.value().len())
            .unwrap_or(0)
    }
}

impl Scope for BrandScope {
    fn get(&self, ctx: &BrandContext, name: &str, factory: ObjectFactory<'_>) -> Result<Bean> {
        let (brand_id, config) = self.resolve(ctx)?;

        // The slot is cloned out of the bucket, so no map lock is held
        // while the loader runs.
        let slot = self.bucket(brand_id).slot(name);

        if let Some(bean) = slot.get() {
            trace!(brand = %brand_id, bean = name, "Brand bean cache hit");
            return Ok(bean.clone());
        }

        let bean = slot.get_or_init(|| {
            debug!(
                brand = %brand_id,
                bean = name,
                request_id = %ctx.request_id(),
                "Creating brand bean"
            );
            self.loader.load_bean(name, factory, &config)
        });

        Ok(bean.clone())
    }

    fn remove(&self, ctx: &BrandContext, name: &str) -> Option<Bean> {
        let brand_id = ctx.brand_id()?;
        let bucket = self.brands.get(brand_id)?.clone();

        let removed = bucket.remove(name);
        debug!(
            brand = %brand_id,
            bean = name,
            removed = removed.is_some(),
            "Removed brand bean"
        );
        removed
    }

    fn conversation_id<'a>(&self, ctx: &'a BrandContext) -> Option<&'a str> {
        ctx.brand_id().map(BrandId::as_str)
    }

    fn register_destruction_callback(&self, name: &str, callback: DestructionCallback) {
        // Brand beans live as long as the scope; the callback never runs.
        trace!(bean = name, "Ignoring destruction callback for brand bean");
        drop(callback);
    }

    fn resolve_contextual_object(&self, _ctx: &BrandContext, key: &str) -> Result<Bean> {
        Err(ScopeError::UnsupportedOperation(format!(
            "resolve_contextual_object is not implemented by BrandScope. Key: {}",
            key
        )))
    }
}
