//! Page paths of generated documentation.
//!
//! Layout below the base path:
//!
//! ```text
//! {base}/api.md                          summary
//! {base}/Acme/Billing/index.md           namespace Acme\Billing
//! {base}/Acme/Billing/Invoice/Invoice.md class Acme\Billing\Invoice
//! {base}/Acme/Billing/Invoice/methods/total.md
//! {base}/Acme/Billing/Invoice/properties/lines.md
//! {base}/Acme/Billing/functions/format.md
//! ```
//!
//! Constants are documented on their class page.

use std::fmt;

use refdoc_config::Config;
use refdoc_index::{ElementKind, ElementRef, IndexError, ReflectionWrapper, short_name};
use serde::Serialize;

use crate::linker::normalize_dir;

/// Kind of generated page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Summary,
    Namespace,
    Class,
    Method,
    Property,
    Function,
}

impl PageKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Namespace => "namespace",
            Self::Class => "class",
            Self::Method => "method",
            Self::Property => "property",
            Self::Function => "function",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One page handed to the file-writing collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Page path, always rooted at `/`.
    pub path: String,
    /// Directory containing the page.
    pub directory: String,
    pub kind: PageKind,
    /// Qualified name of the documented element (namespace for namespace
    /// pages, root namespace for the summary).
    pub element: String,
}

impl Page {
    fn new(path: String, kind: PageKind, element: impl Into<String>) -> Self {
        Self {
            directory: page_directory(&path),
            path,
            kind,
            element: element.into(),
        }
    }
}

/// Directory part of a page path (`/` for top-level pages).
#[must_use]
pub fn page_directory(path: &str) -> String {
    match path.trim_end_matches('/').rsplit_once('/') {
        Some((dir, _)) => normalize_dir(dir),
        None => "/".to_owned(),
    }
}

/// Maps elements to page paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageLayout {
    base_path: String,
    namespace_index: String,
    summary_page: String,
}

impl PageLayout {
    /// Create a layout rooted at `base_path`.
    #[must_use]
    pub fn new(
        base_path: &str,
        namespace_index: impl Into<String>,
        summary_page: impl Into<String>,
    ) -> Self {
        Self {
            base_path: normalize_dir(base_path),
            namespace_index: namespace_index.into(),
            summary_page: summary_page.into(),
        }
    }

    /// Layout configured by the `[output]` section.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.output.base_path,
            config.output.namespace_index.clone(),
            config.output.summary_page.clone(),
        )
    }

    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// `{base}/seg/seg/...`
    fn join<'s>(&self, segments: impl IntoIterator<Item = &'s str>) -> String {
        let mut path = self.base_path.trim_end_matches('/').to_owned();
        for segment in segments.into_iter().filter(|s| !s.is_empty()) {
            path.push('/');
            path.push_str(segment);
        }
        if path.is_empty() {
            path.push('/');
        }
        path
    }

    #[must_use]
    pub fn summary_path(&self) -> String {
        self.join([self.summary_page.as_str()])
    }

    #[must_use]
    pub fn namespace_directory(&self, namespace: &str) -> String {
        self.join(namespace.split('\\'))
    }

    #[must_use]
    pub fn namespace_path(&self, namespace: &str) -> String {
        self.join(namespace.split('\\').chain([self.namespace_index.as_str()]))
    }

    #[must_use]
    pub fn class_directory(&self, class: &str) -> String {
        self.join(class.split('\\'))
    }

    #[must_use]
    pub fn class_path(&self, class: &str) -> String {
        format!("{}/{}.md", self.class_directory(class), short_name(class))
    }

    #[must_use]
    pub fn method_path(&self, class: &str, method: &str) -> String {
        format!("{}/methods/{method}.md", self.class_directory(class))
    }

    #[must_use]
    pub fn property_path(&self, class: &str, property: &str) -> String {
        let property = property.trim_start_matches('$');
        format!("{}/properties/{property}.md", self.class_directory(class))
    }

    #[must_use]
    pub fn function_path(&self, function: &str) -> String {
        let namespace = refdoc_index::namespace_of(function);
        format!(
            "{}/functions/{}.md",
            self.namespace_directory(namespace),
            short_name(function)
        )
    }

    /// Page documenting `element`.
    ///
    /// Constants resolve to their class page.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::UnsupportedOperation`] for parameters, which have
    /// no page of their own.
    pub fn page_path(&self, element: ElementRef<'_>) -> Result<String, IndexError> {
        match element {
            ElementRef::Namespace(ns) => Ok(self.namespace_path(ns.namespace())),
            ElementRef::Class(class) | ElementRef::Constant { class, .. } => {
                Ok(self.class_path(class.name()))
            }
            ElementRef::Method { class, method } => {
                Ok(self.method_path(class.name(), method.name()))
            }
            ElementRef::Property { class, property } => {
                Ok(self.property_path(class.name(), property.name()))
            }
            ElementRef::Function(function) => Ok(self.function_path(function.name())),
            ElementRef::Parameter(_) => {
                Err(IndexError::unsupported("page_path", ElementKind::Parameter))
            }
        }
    }

    /// Directory of the page documenting `element`.
    ///
    /// # Errors
    ///
    /// Same as [`page_path`](Self::page_path).
    pub fn page_directory(&self, element: ElementRef<'_>) -> Result<String, IndexError> {
        self.page_path(element).map(|path| page_directory(&path))
    }

    /// Page descriptor for `element`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::UnsupportedOperation`] for elements without a
    /// page of their own (parameters and constants).
    pub fn page(&self, element: ElementRef<'_>) -> Result<Page, IndexError> {
        let kind = match element.kind() {
            ElementKind::Namespace => PageKind::Namespace,
            ElementKind::Class(_) => PageKind::Class,
            ElementKind::Method => PageKind::Method,
            ElementKind::Property => PageKind::Property,
            ElementKind::Function => PageKind::Function,
            kind @ (ElementKind::Constant | ElementKind::Parameter) => {
                return Err(IndexError::unsupported("page", kind));
            }
        };
        Ok(Page::new(
            self.page_path(element)?,
            kind,
            element.qualified_name(),
        ))
    }

    /// Descriptor of the API summary page.
    #[must_use]
    pub fn summary_page(&self, namespace: &str) -> Page {
        Page::new(self.summary_path(), PageKind::Summary, namespace)
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::new("/ref", "index.md", "api.md")
    }
}

#[cfg(test)]
mod tests {
    use refdoc_index::{CodeIndex, HasParameters, HasTagApi};
    use refdoc_reflect::{
        ClassKind, MockReflector, ReflectedClass, ReflectedConstant, ReflectedFunction,
        ReflectedMethod, ReflectedParameter, ReflectedProperty,
    };

    use super::*;

    fn index() -> CodeIndex {
        let reflector = MockReflector::new()
            .with_class(
                ReflectedClass::new("Acme\\Billing\\Invoice", ClassKind::Class)
                    .with_constant(ReflectedConstant::new("MAX", "Acme\\Billing\\Invoice"))
                    .with_property(ReflectedProperty::new("lines", "Acme\\Billing\\Invoice"))
                    .with_method(
                        ReflectedMethod::new("total", "Acme\\Billing\\Invoice")
                            .with_parameter(ReflectedParameter::new("currency", 0)),
                    ),
            )
            .with_function(ReflectedFunction::new("Acme\\Billing\\format"));
        CodeIndex::build(&reflector, "Acme", &HasTagApi).unwrap()
    }

    #[test]
    fn test_element_paths() {
        let index = index();
        let layout = PageLayout::default();
        let class = index.get_class_wrapper("Acme\\Billing\\Invoice").unwrap();

        assert_eq!(
            layout.page_path(ElementRef::Class(class)).unwrap(),
            "/ref/Acme/Billing/Invoice/Invoice.md"
        );
        assert_eq!(
            layout
                .page_path(index.get_element("Acme\\Billing\\Invoice::total()").unwrap())
                .unwrap(),
            "/ref/Acme/Billing/Invoice/methods/total.md"
        );
        assert_eq!(
            layout
                .page_path(index.get_element("Acme\\Billing\\Invoice::$lines").unwrap())
                .unwrap(),
            "/ref/Acme/Billing/Invoice/properties/lines.md"
        );
        assert_eq!(
            layout
                .page_path(index.get_element("Acme\\Billing\\Invoice::MAX").unwrap())
                .unwrap(),
            "/ref/Acme/Billing/Invoice/Invoice.md"
        );
        assert_eq!(
            layout
                .page_path(ElementRef::Function(index.get_function("Acme\\Billing\\format").unwrap()))
                .unwrap(),
            "/ref/Acme/Billing/functions/format.md"
        );
        assert_eq!(
            layout
                .page_path(ElementRef::Namespace(index.get_namespace("Acme\\Billing").unwrap()))
                .unwrap(),
            "/ref/Acme/Billing/index.md"
        );
        assert_eq!(layout.summary_path(), "/ref/api.md");
    }

    #[test]
    fn test_parameter_has_no_page() {
        let index = index();
        let layout = PageLayout::default();
        let class = index.get_class_wrapper("Acme\\Billing\\Invoice").unwrap();
        let parameter = &class.method("total").unwrap().parameters()[0];

        let err = layout.page_path(ElementRef::Parameter(parameter)).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Operation `page_path` is not supported by parameter wrappers"
        );
    }

    #[test]
    fn test_constant_has_no_page_descriptor() {
        let index = index();
        let layout = PageLayout::default();

        let err = layout
            .page(index.get_element("Acme\\Billing\\Invoice::MAX").unwrap())
            .unwrap_err();

        assert!(matches!(
            err,
            IndexError::UnsupportedOperation {
                operation: "page",
                kind: ElementKind::Constant
            }
        ));
    }

    #[test]
    fn test_page_descriptor() {
        let index = index();
        let layout = PageLayout::default();
        let class = index.get_class_wrapper("Acme\\Billing\\Invoice").unwrap();

        let page = layout.page(ElementRef::Class(class)).unwrap();

        assert_eq!(page.kind, PageKind::Class);
        assert_eq!(page.directory, "/ref/Acme/Billing/Invoice");
        assert_eq!(page.element, "Acme\\Billing\\Invoice");
    }

    #[test]
    fn test_root_base_path() {
        let layout = PageLayout::new("/", "index.md", "api.md");

        assert_eq!(layout.summary_path(), "/api.md");
        assert_eq!(layout.namespace_path("Acme"), "/Acme/index.md");
        assert_eq!(page_directory("/api.md"), "/");
    }

    #[test]
    fn test_page_directory() {
        assert_eq!(page_directory("/ref/Acme/index.md"), "/ref/Acme");
        assert_eq!(page_directory("api.md"), "/");
    }
}
