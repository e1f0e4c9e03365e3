//! Mock reflector implementation for testing.
//!
//! Provides [`MockReflector`] for unit testing without scanning sources.

use std::collections::HashSet;

use crate::model::{ReflectedClass, ReflectedFunction};
use crate::reflector::{ReflectError, Reflector, is_in_namespace};

/// Mock reflector for testing.
///
/// Stores reflected records in memory, in insertion order. Use the builder
/// methods to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use refdoc_reflect::{ClassKind, MockReflector, ReflectedClass, Reflector};
///
/// let reflector = MockReflector::new()
///     .with_class(ReflectedClass::new("Acme\\Invoice", ClassKind::Class));
///
/// let names = reflector.discover_classes("Acme").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockReflector {
    classes: Vec<ReflectedClass>,
    functions: Vec<ReflectedFunction>,
    /// Class names reported twice by discovery.
    duplicated: Vec<String>,
    missing_namespaces: HashSet<String>,
}

impl MockReflector {
    /// Create a new empty mock reflector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reflected class.
    ///
    /// The class is discoverable when its name lies in the requested
    /// namespace. Classes outside every documented namespace (base classes,
    /// vendor classes) are still reflectable by name.
    #[must_use]
    pub fn with_class(mut self, class: ReflectedClass) -> Self {
        self.classes.push(class);
        self
    }

    /// Add a reflected standalone function.
    #[must_use]
    pub fn with_function(mut self, function: ReflectedFunction) -> Self {
        self.functions.push(function);
        self
    }

    /// Report `name` a second time at the end of class discovery.
    #[must_use]
    pub fn with_duplicate_discovery(mut self, name: impl Into<String>) -> Self {
        self.duplicated.push(name.into());
        self
    }

    /// Make discovery of `namespace` fail with [`ReflectError::NamespaceNotFound`].
    #[must_use]
    pub fn with_missing_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.missing_namespaces.insert(namespace.into());
        self
    }

    fn check_namespace(&self, namespace: &str) -> Result<(), ReflectError> {
        if self.missing_namespaces.contains(namespace) {
            return Err(ReflectError::NamespaceNotFound(namespace.to_owned()));
        }
        Ok(())
    }
}

impl Reflector for MockReflector {
    fn discover_classes(&self, namespace: &str) -> Result<Vec<String>, ReflectError> {
        self.check_namespace(namespace)?;
        let mut names: Vec<String> = self
            .classes
            .iter()
            .filter(|c| is_in_namespace(&c.name, namespace))
            .map(|c| c.name.clone())
            .collect();
        names.extend(
            self.duplicated
                .iter()
                .filter(|name| is_in_namespace(name, namespace))
                .cloned(),
        );
        Ok(names)
    }

    fn discover_functions(&self, namespace: &str) -> Result<Vec<String>, ReflectError> {
        self.check_namespace(namespace)?;
        Ok(self
            .functions
            .iter()
            .filter(|f| is_in_namespace(&f.name, namespace))
            .map(|f| f.name.clone())
            .collect())
    }

    fn reflect_class(&self, name: &str) -> Result<ReflectedClass, ReflectError> {
        let name = name.trim_start_matches('\\');
        self.classes
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| ReflectError::ClassNotFound(name.to_owned()))
    }

    fn reflect_function(&self, name: &str) -> Result<ReflectedFunction, ReflectError> {
        let name = name.trim_start_matches('\\');
        self.functions
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| ReflectError::FunctionNotFound(name.to_owned()))
    }
}
