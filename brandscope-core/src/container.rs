// Dependency injection container with named scopes

use crate::context::BrandContext;
use crate::error::{Result, ScopeError};
use crate::logging::{debug, trace};
use crate::scope::{Bean, DestructionCallback, Scope, downcast_bean};
use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

type BeanFactory = Arc<dyn Fn() -> Bean + Send + Sync>;

/// Registered bean definition
#[derive(Clone)]
struct BeanDefinition {
    scope: String,
    factory: BeanFactory,
}

/// The dependency injection container
///
/// Beans are registered by name together with the name of the scope that
/// caches them. Resolution always goes through that scope, so the scope
/// alone decides whether a new instance is built.
#[derive(Clone)]
pub struct Container {
    scopes: Arc<RwLock<HashMap<String, Arc<dyn Scope>>>>,
    definitions: Arc<RwLock<HashMap<String, BeanDefinition>>>,
}

impl Container {
    pub fn new() -> Self {
        debug!("Creating new DI container");
        Self {
            scopes: Arc::new(RwLock::new(HashMap::new())),
            definitions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a scope under a name, replacing any previous one
    pub fn register_scope(&self, name: impl Into<String>, scope: Arc<dyn Scope>) {
        let name = name.into();
        self.scopes.write().insert(name.clone(), scope);

        debug!(scope = %name, "Scope registered in DI container");
    }

    /// Register a bean definition
    ///
    /// The factory is not called here; the bean's scope calls it on demand.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// container.register_bean("mailer", "brand", || Mailer::default());
    /// ```
    pub fn register_bean<T, F>(&self, name: impl Into<String>, scope: impl Into<String>, factory: F)
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let factory: BeanFactory = Arc::new(move || Arc::new(factory()) as Bean);
        self.register_bean_factory(name, scope, factory);
    }

    /// Register a bean definition whose factory already yields a [`Bean`]
    pub fn register_bean_factory(
        &self,
        name: impl Into<String>,
        scope: impl Into<String>,
        factory: Arc<dyn Fn() -> Bean + Send + Sync>,
    ) {
        let name = name.into();
        let scope = scope.into();

        debug!(bean = %name, scope = %scope, "Bean definition registered");
        self.definitions
            .write()
            .insert(name, BeanDefinition { scope, factory });
    }

    fn definition(&self, name: &str) -> Result<(BeanDefinition, Arc<dyn Scope>)> {
        let definition = self
            .definitions
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| ScopeError::BeanNotFound(name.to_string()))?;

        let scope = self
            .scopes
            .read()
            .get(&definition.scope)
            .cloned()
            .ok_or_else(|| ScopeError::ScopeNotFound(definition.scope.clone()))?;

        Ok((definition, scope))
    }

    /// Resolve a bean by name through its scope
    pub fn get_bean(&self, ctx: &BrandContext, name: &str) -> Result<Bean> {
        // Locks are released before the scope runs the factory, so factories
        // may resolve other beans from this container.
        let (definition, scope) = self.definition(name)?;

        trace!(bean = name, scope = %definition.scope, "Resolving bean");
        let factory = definition.factory;
        scope.get(ctx, name, &mut || factory())
    }

    /// Resolve a bean by name and downcast it
    pub fn get<T: Any + Send + Sync>(&self, ctx: &BrandContext, name: &str) -> Result<Arc<T>> {
        let bean = self.get_bean(ctx, name)?;
        downcast_bean(name, bean)
    }

    /// Remove the cached instance of a bean from its scope
    pub fn remove_bean(&self, ctx: &BrandContext, name: &str) -> Result<Option<Bean>> {
        let (_, scope) = self.definition(name)?;
        Ok(scope.remove(ctx, name))
    }

    /// Forward a destruction callback to the bean's scope
    pub fn register_destruction_callback(
        &self,
        name: &str,
        callback: DestructionCallback,
    ) -> Result<()> {
        let (_, scope) = self.definition(name)?;
        scope.register_destruction_callback(name, callback);
        Ok(())
    }

    /// Check if a bean definition is registered
    pub fn has_bean(&self, name: &str) -> bool {
        let exists = self.definitions.read().contains_key(name);

        trace!(bean = name, exists = exists, "Checked bean definition existence");
        exists
    }

    /// Clear all scopes and bean definitions
    pub fn clear(&self) {
        let count = {
            let mut definitions = self.definitions.write();
            let count = definitions.len();
            definitions.clear();
            count
        };
        self.scopes.write().clear();

        debug!(definition_count = count, "Cleared DI container");
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Caches one instance per (brand, name); no brand means no caching.
    #[derive(Default)]
    struct MapScope {
        beans: Mutex<HashMap<(String, String), Bean>>,
    }

    impl Scope for MapScope {
        fn get(
            &self,
            ctx: &BrandContext,
            name: &str,
            factory: crate::ObjectFactory<'_>,
        ) -> Result<Bean> {
            let brand = ctx
                .brand_id()
                .ok_or_else(|| ScopeError::unsupported_brand(None))?;
            let key = (brand.to_string(), name.to_string());
            let mut beans = self.beans.lock();
            Ok(beans.entry(key).or_insert_with(|| factory()).clone())
        }

        fn remove(&self, ctx: &BrandContext, name: &str) -> Option<Bean> {
            let brand = ctx.brand_id()?;
            self.beans
                .lock()
                .remove(&(brand.to_string(), name.to_string()))
        }

        fn conversation_id<'a>(&self, ctx: &'a BrandContext) -> Option<&'a str> {
            ctx.brand_id().map(|id| id.as_str())
        }

        fn register_destruction_callback(&self, _name: &str, callback: DestructionCallback) {
            callback();
        }

        fn resolve_contextual_object(&self, _ctx: &BrandContext, key: &str) -> Result<Bean> {
            Err(ScopeError::UnsupportedOperation(key.to_string()))
        }
    }

    fn container_with_counter() -> (Container, Arc<AtomicUsize>) {
        let container = Container::new();
        container.register_scope("map", Arc::new(MapScope::default()));

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        container.register_bean("counter", "map", move || {
            counter.fetch_add(1, Ordering::SeqCst) + 1
        });

        (container, calls)
    }

    #[test]
    fn test_get_goes_through_scope() {
        let (container, calls) = container_with_counter();
        let ctx = BrandContext::with_brand("acme");

        let first = container.get::<usize>(&ctx, "counter").unwrap();
        let second = container.get::<usize>(&ctx, "counter").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unknown_bean() {
        let container = Container::new();
        let ctx = BrandContext::with_brand("acme");

        let err = container.get_bean(&ctx, "missing").unwrap_err();
        assert_eq!(err, ScopeError::BeanNotFound("missing".to_string()));
        assert!(!container.has_bean("missing"));
    }

    #[test]
    fn test_unknown_scope() {
        let container = Container::new();
        container.register_bean("orphan", "nowhere", || 1u8);
        let ctx = BrandContext::with_brand("acme");

        let err = container.get_bean(&ctx, "orphan").unwrap_err();
        assert_eq!(err, ScopeError::ScopeNotFound("nowhere".to_string()));
    }

    #[test]
    fn test_type_mismatch() {
        let (container, _) = container_with_counter();
        let ctx = BrandContext::with_brand("acme");

        let err = container.get::<String>(&ctx, "counter").unwrap_err();
        assert!(matches!(err, ScopeError::TypeMismatch { .. }));
    }

    #[test]
    fn test_remove_bean_forces_rebuild() {
        let (container, calls) = container_with_counter();
        let ctx = BrandContext::with_brand("acme");

        container.get_bean(&ctx, "counter").unwrap();
        assert!(container.remove_bean(&ctx, "counter").unwrap().is_some());

        let rebuilt = container.get::<usize>(&ctx, "counter").unwrap();
        assert_eq!(*rebuilt, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_destruction_callback_forwarded() {
        let (container, _) = container_with_counter();
        let fired = Arc::new(AtomicUsize::new(0));
        let flag = fired.clone();

        container
            .register_destruction_callback(
                "counter",
                Box::new(move || {
                    flag.fetch_add(1, Ordering::SeqCst);
                }),
            )
            .unwrap();

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clear() {
        let (container, _) = container_with_counter();
        assert!(container.has_bean("counter"));

        container.clear();
        assert!(!container.has_bean("counter"));
    }
}
