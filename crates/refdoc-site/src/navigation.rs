//! Breadcrumb trails through the namespace hierarchy.

use refdoc_index::{
    CodeIndex, ElementKind, ElementRef, HierarchySegment, IndexError, ReflectionWrapper,
};
use serde::Serialize;

use crate::layout::PageLayout;
use crate::linker::UrlLinker;

/// Token joining breadcrumb segments.
pub const BREADCRUMB_SEPARATOR: &str = " / ";

/// Breadcrumb navigation item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    /// Display title.
    pub title: String,
    /// Link relative to the current page directory, `None` when unlinked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Segment naming the current page itself.
    pub current: bool,
}

impl BreadcrumbItem {
    fn render(&self) -> String {
        match (&self.path, self.current) {
            (Some(path), _) => format!("[{}]({path})", self.title),
            (None, true) => format!("**{}**", self.title),
            (None, false) => self.title.clone(),
        }
    }
}

/// Builds breadcrumbs for pages of one index.
#[derive(Clone, Copy, Debug)]
pub struct Navigation<'a> {
    index: &'a CodeIndex,
    layout: &'a PageLayout,
}

impl<'a> Navigation<'a> {
    #[must_use]
    pub fn new(index: &'a CodeIndex, layout: &'a PageLayout) -> Self {
        Self { index, layout }
    }

    /// Breadcrumb items for `element`, root first.
    ///
    /// Ancestor namespaces inside the indexed root are linked. A class member
    /// bottoms out at a link to its class, any other element at its own
    /// short name.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::UnsupportedOperation`] for parameters.
    pub fn breadcrumb_items(
        &self,
        element: ElementRef<'_>,
        current_dir: &str,
    ) -> Result<Vec<BreadcrumbItem>, IndexError> {
        let linker = UrlLinker::new(current_dir);
        let (namespace, include_self) = match element {
            ElementRef::Namespace(ns) => (ns.namespace(), false),
            ElementRef::Class(class) => (class.namespace(), true),
            ElementRef::Function(function) => (function.namespace(), true),
            ElementRef::Method { class, .. }
            | ElementRef::Property { class, .. }
            | ElementRef::Constant { class, .. } => (class.namespace(), true),
            ElementRef::Parameter(_) => {
                return Err(IndexError::unsupported("breadcrumb", ElementKind::Parameter));
            }
        };

        let mut segments = self.hierarchy(namespace);
        if !include_self {
            segments.pop();
        }

        let mut items: Vec<BreadcrumbItem> = segments
            .iter()
            .map(|segment| match segment {
                HierarchySegment::Namespace(full) => BreadcrumbItem {
                    title: segment.title().to_owned(),
                    path: Some(linker.to(&self.layout.namespace_path(full))),
                    current: false,
                },
                HierarchySegment::Plain(title) => BreadcrumbItem {
                    title: title.clone(),
                    path: None,
                    current: false,
                },
            })
            .collect();

        items.push(match element.class() {
            Some(class) if element.kind().is_class_member() => BreadcrumbItem {
                title: refdoc_index::short_name(class.name()).to_owned(),
                path: Some(linker.to(&self.layout.class_path(class.name()))),
                current: false,
            },
            _ => BreadcrumbItem {
                title: element.short_name().to_owned(),
                path: None,
                current: true,
            },
        });

        Ok(items)
    }

    /// Markdown breadcrumb for `element` as seen from `current_dir`.
    ///
    /// # Errors
    ///
    /// Same as [`breadcrumb_items`](Self::breadcrumb_items).
    pub fn breadcrumb(
        &self,
        element: ElementRef<'_>,
        current_dir: &str,
    ) -> Result<String, IndexError> {
        let items = self.breadcrumb_items(element, current_dir)?;
        Ok(items
            .iter()
            .map(BreadcrumbItem::render)
            .collect::<Vec<_>>()
            .join(BREADCRUMB_SEPARATOR))
    }

    /// Namespace path of `namespace`, inclusive of itself.
    fn hierarchy(&self, namespace: &str) -> Vec<HierarchySegment> {
        if let Some(ns) = self.index.get_namespace(namespace) {
            return ns.hierarchy().to_vec();
        }
        // Elements are always inside an indexed namespace; this covers the
        // global namespace.
        namespace
            .split('\\')
            .filter(|s| !s.is_empty())
            .map(|s| HierarchySegment::Plain(s.to_owned()))
            .collect()
    }
}
