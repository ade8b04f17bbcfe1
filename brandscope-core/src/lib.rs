// Core library for brandscope
// Request context, the scope contract, the bean container and logging setup

pub mod container;
pub mod context;
pub mod error;
pub mod logging;
pub mod scope;

pub use container::Container;
pub use context::{BrandContext, BrandId};
pub use error::{Result, ScopeError};
pub use scope::{Bean, DestructionCallback, ObjectFactory, Scope, downcast_bean};
