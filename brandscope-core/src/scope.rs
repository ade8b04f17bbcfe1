//! Bean Scopes
//!
//! A scope decides how long a bean instance lives and who shares it. The
//! [`Container`](crate::Container) owns bean definitions; each definition
//! names the scope its instances are cached in.

use crate::context::BrandContext;
use crate::error::{Result, ScopeError};
use std::any::Any;
use std::sync::Arc;

/// A type-erased bean instance.
pub type Bean = Arc<dyn Any + Send + Sync>;

/// Factory handed to [`Scope::get`]; called only when the scope has no
/// instance for the requested name yet.
pub type ObjectFactory<'a> = &'a mut dyn FnMut() -> Bean;

/// Teardown hook offered to a scope when a bean is created.
pub type DestructionCallback = Box<dyn FnOnce() + Send>;

/// Downcast a bean to a concrete type
///
/// # Examples
///
/// ```
/// use brandscope_core::{Bean, downcast_bean};
/// use std::sync::Arc;
///
/// let bean: Bean = Arc::new(42u32);
/// let value = downcast_bean::<u32>("answer", bean).unwrap();
/// assert_eq!(*value, 42);
/// ```
pub fn downcast_bean<T: Any + Send + Sync>(name: &str, bean: Bean) -> Result<Arc<T>> {
    bean.downcast::<T>().map_err(|_| ScopeError::TypeMismatch {
        name: name.to_string(),
        expected: std::any::type_name::<T>(),
    })
}

/// Scope trait
///
/// Implement this trait to provide a custom bean lifecycle. All operations
/// are synchronous and run on the calling thread.
pub trait Scope: Send + Sync {
    /// Return the bean cached under `name`, creating it through `factory`
    /// if it does not exist yet. Never returns an empty value on success.
    fn get(&self, ctx: &BrandContext, name: &str, factory: ObjectFactory<'_>) -> Result<Bean>;

    /// Remove the bean cached under `name`, returning it if present
    fn remove(&self, ctx: &BrandContext, name: &str) -> Option<Bean>;

    /// Identifier of the current conversation, if the scope has one
    fn conversation_id<'a>(&self, ctx: &'a BrandContext) -> Option<&'a str>;

    /// Register a callback to run when the bean named `name` is destroyed
    fn register_destruction_callback(&self, name: &str, callback: DestructionCallback);

    /// Resolve an auxiliary object by key
    fn resolve_contextual_object(&self, ctx: &BrandContext, key: &str) -> Result<Bean>;
}
