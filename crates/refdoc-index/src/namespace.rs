//! Namespace hierarchy.

use std::collections::{BTreeMap, HashMap};

use refdoc_reflect::{DocBlock, is_in_namespace};

use crate::wrapper::{ElementKind, ReflectionWrapper, namespace_of};

/// One ancestor step of a namespace path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HierarchySegment {
    /// Indexed namespace, by full name.
    Namespace(String),
    /// Segment above the indexed root, rendered without a link.
    Plain(String),
}

impl HierarchySegment {
    /// Display text (last segment of the path).
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Namespace(full) => crate::wrapper::short_name(full),
            Self::Plain(segment) => segment,
        }
    }
}

/// Namespace with the elements declared directly in it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamespaceWrapper {
    namespace: String,
    classes: Vec<String>,
    functions: Vec<String>,
    children: Vec<String>,
    hierarchy: Vec<HierarchySegment>,
}

impl NamespaceWrapper {
    fn new(namespace: &str, root: &str) -> Self {
        let mut hierarchy = Vec::new();
        let mut path = String::new();
        for segment in namespace.split('\\').filter(|s| !s.is_empty()) {
            if !path.is_empty() {
                path.push('\\');
            }
            path.push_str(segment);
            if is_indexed(&path, root) {
                hierarchy.push(HierarchySegment::Namespace(path.clone()));
            } else {
                hierarchy.push(HierarchySegment::Plain(segment.to_owned()));
            }
        }
        Self {
            namespace: namespace.to_owned(),
            classes: Vec::new(),
            functions: Vec::new(),
            children: Vec::new(),
            hierarchy,
        }
    }

    /// Full namespace path.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Classes declared directly in this namespace, in discovery order.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Functions declared directly in this namespace, in discovery order.
    #[must_use]
    pub fn functions(&self) -> &[String] {
        &self.functions
    }

    /// Direct sub-namespaces, sorted.
    #[must_use]
    pub fn children(&self) -> &[String] {
        &self.children
    }

    /// Path from the top segment down to this namespace (inclusive).
    #[must_use]
    pub fn hierarchy(&self) -> &[HierarchySegment] {
        &self.hierarchy
    }

    /// Enclosing namespace, empty for top-level namespaces.
    #[must_use]
    pub fn parent(&self) -> &str {
        namespace_of(&self.namespace)
    }
}

impl ReflectionWrapper for NamespaceWrapper {
    fn name(&self) -> &str {
        &self.namespace
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Namespace
    }

    fn doc_block(&self) -> Option<&DocBlock> {
        None
    }
}

/// Whether `namespace` is the root or lies below it.
fn is_indexed(namespace: &str, root: &str) -> bool {
    namespace.eq_ignore_ascii_case(root) || is_in_namespace(namespace, root)
}

/// Builds the namespace map of one index.
pub(crate) struct NamespaceTree {
    root: String,
    namespaces: BTreeMap<String, NamespaceWrapper>,
    /// Lowercased namespace to its registered spelling.
    spellings: HashMap<String, String>,
}

impl NamespaceTree {
    pub(crate) fn new(root: &str) -> Self {
        let mut tree = Self {
            root: root.to_owned(),
            namespaces: BTreeMap::new(),
            spellings: HashMap::new(),
        };
        tree.ensure(root);
        tree
    }

    /// Register `namespace` and every indexed ancestor.
    fn ensure(&mut self, namespace: &str) {
        if self.namespaces.contains_key(namespace) {
            return;
        }
        self.namespaces.insert(
            namespace.to_owned(),
            NamespaceWrapper::new(namespace, &self.root),
        );
        self.spellings
            .insert(namespace.to_ascii_lowercase(), namespace.to_owned());

        let parent = namespace_of(namespace);
        if namespace.eq_ignore_ascii_case(&self.root) || !is_indexed(parent, &self.root) {
            return;
        }
        self.ensure(parent);
        if let Some(wrapper) = self.namespaces.get_mut(parent) {
            wrapper.children.push(namespace.to_owned());
            wrapper.children.sort();
        }
    }

    pub(crate) fn add_class(&mut self, name: &str) {
        let namespace = self.namespace_for(name);
        self.ensure(&namespace);
        if let Some(wrapper) = self.namespaces.get_mut(&namespace) {
            wrapper.classes.push(name.to_owned());
        }
    }

    pub(crate) fn add_function(&mut self, name: &str) {
        let namespace = self.namespace_for(name);
        self.ensure(&namespace);
        if let Some(wrapper) = self.namespaces.get_mut(&namespace) {
            wrapper.functions.push(name.to_owned());
        }
    }

    /// Namespace of `name`, each ancestor spelled like its registered entry.
    fn namespace_for(&self, name: &str) -> String {
        let mut path = String::new();
        for segment in namespace_of(name).split('\\').filter(|s| !s.is_empty()) {
            if !path.is_empty() {
                path.push('\\');
            }
            path.push_str(segment);
            if let Some(spelling) = self.spellings.get(&path.to_ascii_lowercase()) {
                path.clone_from(spelling);
            }
        }
        path
    }

    pub(crate) fn finish(self) -> BTreeMap<String, NamespaceWrapper> {
        self.namespaces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_registers_intermediate_namespaces() {
        let mut tree = NamespaceTree::new("Acme");
        tree.add_class("Acme\\Billing\\Tax\\Rate");

        let namespaces = tree.finish();

        let keys: Vec<&str> = namespaces.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Acme", "Acme\\Billing", "Acme\\Billing\\Tax"]);
        assert_eq!(namespaces["Acme"].children(), ["Acme\\Billing".to_owned()]);
        assert_eq!(
            namespaces["Acme\\Billing\\Tax"].classes(),
            ["Acme\\Billing\\Tax\\Rate".to_owned()]
        );
    }

    #[test]
    fn test_hierarchy_marks_segments_above_root_plain() {
        let mut tree = NamespaceTree::new("Acme\\Billing");
        tree.add_function("Acme\\Billing\\Tax\\rate_for");

        let namespaces = tree.finish();
        let tax = &namespaces["Acme\\Billing\\Tax"];

        assert_eq!(
            tax.hierarchy(),
            [
                HierarchySegment::Plain("Acme".to_owned()),
                HierarchySegment::Namespace("Acme\\Billing".to_owned()),
                HierarchySegment::Namespace("Acme\\Billing\\Tax".to_owned()),
            ]
        );
        assert_eq!(tax.functions(), ["Acme\\Billing\\Tax\\rate_for".to_owned()]);
        assert_eq!(tax.short_name(), "Tax");
        assert_eq!(tax.parent(), "Acme\\Billing");
    }

    #[test]
    fn test_namespace_spelling_follows_first_registration() {
        let mut tree = NamespaceTree::new("Acme");
        tree.add_class("Acme\\Util\\A");
        tree.add_class("Acme\\UTIL\\B");

        let namespaces = tree.finish();

        assert_eq!(namespaces["Acme\\Util"].classes().len(), 2);
        assert!(!namespaces.contains_key("Acme\\UTIL"));
    }

    #[test]
    fn test_ancestor_spelling_follows_first_registration() {
        let mut tree = NamespaceTree::new("Acme");
        tree.add_class("Acme\\Util\\A");
        tree.add_class("acme\\UTIL\\Sub\\C");

        let namespaces = tree.finish();

        let keys: Vec<&str> = namespaces.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Acme", "Acme\\Util", "Acme\\Util\\Sub"]);
        assert_eq!(namespaces["Acme\\Util"].children(), ["Acme\\Util\\Sub".to_owned()]);
        assert_eq!(
            namespaces["Acme\\Util\\Sub"].classes(),
            ["acme\\UTIL\\Sub\\C".to_owned()]
        );
    }

    #[test]
    fn test_segment_title() {
        assert_eq!(HierarchySegment::Namespace("Acme\\Billing".to_owned()).title(), "Billing");
        assert_eq!(HierarchySegment::Plain("Acme".to_owned()).title(), "Acme");
    }
}
