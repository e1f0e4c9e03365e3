//! Reflector trait and error types.
//!
//! Provides the [`Reflector`] trait abstracting source discovery and element
//! reflection, along with [`ReflectError`] for unified error handling across
//! backends.
//!
//! # Name Convention
//!
//! All names passed to and returned from a reflector are fully qualified,
//! use `\` as the namespace separator and carry no leading separator:
//! - `"Acme"` - namespace
//! - `"Acme\\Billing\\Invoice"` - class
//! - `"Acme\\Billing\\format_amount"` - function

use crate::model::{ReflectedClass, ReflectedFunction};

/// Reflection backend error.
#[derive(Debug, thiserror::Error)]
pub enum ReflectError {
    /// Namespace has no readable source.
    #[error("Namespace not found: {0}")]
    NamespaceNotFound(String),
    /// Class could not be reflected.
    #[error("Class not found: {0}")]
    ClassNotFound(String),
    /// Function could not be reflected.
    #[error("Function not found: {0}")]
    FunctionNotFound(String),
    /// Backend-specific failure.
    #[error("Reflection error: {0}")]
    Other(String),
}

/// Source discovery and reflection abstraction.
///
/// Discovery returns names in the order the backend found them. Names may
/// repeat (e.g. a class reachable through two autoload roots); consumers
/// deduplicate.
pub trait Reflector {
    /// Fully-qualified names of every class-like element under `namespace`,
    /// recursively.
    ///
    /// # Errors
    ///
    /// Returns [`ReflectError`] if the namespace sources cannot be read.
    fn discover_classes(&self, namespace: &str) -> Result<Vec<String>, ReflectError>;

    /// Fully-qualified names of every standalone function under `namespace`,
    /// recursively.
    ///
    /// # Errors
    ///
    /// Returns [`ReflectError`] if the namespace sources cannot be read.
    fn discover_functions(&self, namespace: &str) -> Result<Vec<String>, ReflectError>;

    /// Reflect one class, including inherited members.
    ///
    /// # Errors
    ///
    /// Returns [`ReflectError::ClassNotFound`] for unknown names.
    fn reflect_class(&self, name: &str) -> Result<ReflectedClass, ReflectError>;

    /// Reflect one standalone function.
    ///
    /// # Errors
    ///
    /// Returns [`ReflectError::FunctionNotFound`] for unknown names.
    fn reflect_function(&self, name: &str) -> Result<ReflectedFunction, ReflectError>;
}

/// Whether `name` lies in `namespace` (at a `\` boundary) or below it.
///
/// An empty namespace contains every name.
#[must_use]
pub fn is_in_namespace(name: &str, namespace: &str) -> bool {
    let name = name.trim_start_matches('\\');
    let namespace = namespace.trim_matches('\\');
    if namespace.is_empty() {
        return true;
    }
    name.as_bytes().get(namespace.len()) == Some(&b'\\')
        && name
            .get(..namespace.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(namespace))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_in_namespace_direct_child() {
        assert!(is_in_namespace("Acme\\Invoice", "Acme"));
    }

    #[test]
    fn test_is_in_namespace_nested() {
        assert!(is_in_namespace("\\Acme\\Billing\\Invoice", "Acme\\"));
    }

    #[test]
    fn test_is_in_namespace_requires_separator_boundary() {
        assert!(!is_in_namespace("AcmeCorp\\Invoice", "Acme"));
        assert!(!is_in_namespace("Acme", "Acme"));
    }

    #[test]
    fn test_is_in_namespace_empty_namespace_matches_all() {
        assert!(is_in_namespace("Exception", ""));
    }

    #[test]
    fn test_error_display() {
        let err = ReflectError::ClassNotFound("Acme\\Missing".to_owned());

        assert_eq!(err.to_string(), "Class not found: Acme\\Missing");
    }
}
