//! Brand Context
//!
//! Carries the identity of the brand a unit of work runs for.
//!
//! A [`BrandContext`] is created once per unit of work (typically one per
//! incoming request), filled in by whoever knows the brand (see the
//! interceptor in `brandscope-tenancy`), and then passed by reference into
//! every scope operation. Nothing here is global or bound to a thread.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Opaque brand identifier.
///
/// Cheap to clone; the string is shared.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrandId(Arc<str>);

impl BrandId {
    /// Create a brand identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use brandscope_core::BrandId;
    ///
    /// let id = BrandId::new("acme");
    /// assert_eq!(id.as_str(), "acme");
    /// ```
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BrandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for BrandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for BrandId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for BrandId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BrandId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for BrandId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// Request-scoped brand context
///
/// Holds the current brand id (if any) and a request id used to correlate
/// log events of the same unit of work.
#[derive(Debug, Clone)]
pub struct BrandContext {
    brand_id: Option<BrandId>,
    request_id: Uuid,
}

impl BrandContext {
    /// Create a context with no brand set
    pub fn new() -> Self {
        Self {
            brand_id: None,
            request_id: Uuid::new_v4(),
        }
    }

    /// Create a context for the given brand
    ///
    /// # Examples
    ///
    /// ```
    /// use brandscope_core::BrandContext;
    ///
    /// let ctx = BrandContext::with_brand("acme");
    /// assert_eq!(ctx.brand_id().map(|id| id.as_str()), Some("acme"));
    /// ```
    pub fn with_brand(brand_id: impl Into<BrandId>) -> Self {
        Self {
            brand_id: Some(brand_id.into()),
            request_id: Uuid::new_v4(),
        }
    }

    /// Replace the current brand, or clear it with `None`
    ///
    /// No validation is performed; an unknown brand is only rejected when
    /// a scope tries to resolve its configuration.
    pub fn set_brand(&mut self, brand_id: Option<BrandId>) {
        self.brand_id = brand_id;
    }

    /// Set the current brand
    pub fn set_brand_id(&mut self, brand_id: impl Into<BrandId>) {
        self.brand_id = Some(brand_id.into());
    }

    /// Clear the current brand
    pub fn clear_brand(&mut self) {
        self.brand_id = None;
    }

    /// Get the current brand id
    pub fn brand_id(&self) -> Option<&BrandId> {
        self.brand_id.as_ref()
    }

    /// Check if a brand is set
    pub fn has_brand(&self) -> bool {
        self.brand_id.is_some()
    }

    /// Correlation id of this unit of work
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }
}

impl Default for BrandContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_brand_id_conversions() {
        let from_str = BrandId::from("acme");
        let from_string = BrandId::from("acme".to_string());

        assert_eq!(from_str, from_string);
        assert_eq!(from_str.to_string(), "acme");
        assert_eq!(format!("{:?}", from_str), "acme");
    }

    #[test]
    fn test_brand_id_borrow_lookup() {
        let mut map = HashMap::new();
        map.insert(BrandId::new("acme"), 1);

        assert_eq!(map.get("acme"), Some(&1));
        assert_eq!(map.get("globex"), None);
    }

    #[test]
    fn test_brand_id_serde_transparent() {
        let id = BrandId::new("acme");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"acme\"");

        let back: BrandId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_context_starts_empty() {
        let ctx = BrandContext::new();
        assert!(!ctx.has_brand());
        assert!(ctx.brand_id().is_none());
    }

    #[test]
    fn test_context_set_overwrites_and_clears() {
        let mut ctx = BrandContext::new();

        ctx.set_brand_id("acme");
        assert_eq!(ctx.brand_id().map(BrandId::as_str), Some("acme"));

        ctx.set_brand(Some(BrandId::new("globex")));
        assert_eq!(ctx.brand_id().map(BrandId::as_str), Some("globex"));

        ctx.clear_brand();
        assert!(!ctx.has_brand());

        ctx.set_brand_id("acme");
        ctx.set_brand(None);
        assert!(ctx.brand_id().is_none());
    }

    #[test]
    fn test_contexts_are_independent() {
        let mut first = BrandContext::with_brand("acme");
        let second = first.clone();

        first.set_brand_id("globex");

        assert_eq!(second.brand_id().map(BrandId::as_str), Some("acme"));
        assert_ne!(
            BrandContext::new().request_id(),
            BrandContext::new().request_id()
        );
    }
}
