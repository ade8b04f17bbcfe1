// Error types for brand-scoped bean resolution

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    /// No brand set on the context, or the brand has no configuration.
    #[error(
        "The requested brand is not supported. Brand id: {}",
        .brand_id.as_deref().unwrap_or("<none>")
    )]
    UnsupportedBrand { brand_id: Option<String> },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Bean not found: {0}")]
    BeanNotFound(String),

    #[error("Scope not registered: {0}")]
    ScopeNotFound(String),

    #[error("Bean '{name}' is not of type {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
    },
}

impl ScopeError {
    /// Build an `UnsupportedBrand` error from an optional brand id
    pub fn unsupported_brand(brand_id: Option<&str>) -> Self {
        ScopeError::UnsupportedBrand {
            brand_id: brand_id.map(str::to_owned),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScopeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_brand_message() {
        let err = ScopeError::unsupported_brand(Some("acme"));
        assert_eq!(
            err.to_string(),
            "The requested brand is not supported. Brand id: acme"
        );

        let err = ScopeError::unsupported_brand(None);
        assert_eq!(
            err.to_string(),
            "The requested brand is not supported. Brand id: <none>"
        );
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = ScopeError::TypeMismatch {
            name: "mailer".to_string(),
            expected: "u32",
        };
        assert_eq!(err.to_string(), "Bean 'mailer' is not of type u32");
    }
}
