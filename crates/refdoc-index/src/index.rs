//! Code index for one documented namespace.
//!
//! # Architecture
//!
//! Classes are stored in a flat `Vec<ClassWrapper>` in discovery order with a
//! lowercased-name `HashMap` for O(1) lookups (class names are
//! case-insensitive). Functions use the same layout. Namespaces are kept in a
//! `BTreeMap` so that iteration is ordered.
//!
//! The index is immutable once built; every public API decision is taken
//! during [`CodeIndex::build`].

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use refdoc_reflect::{DocBlock, ReflectedClass, Reflector, is_in_namespace};

use crate::api::{ApiElement, PublicApiDefinition};
use crate::error::{IndexError, UnresolvableReason};
use crate::namespace::{NamespaceTree, NamespaceWrapper};
use crate::wrapper::{
    ClassElementWrapper, ClassWrapper, ConstantWrapper, ElementKind, FunctionWrapper,
    MethodWrapper, ParameterWrapper, PropertyWrapper, ReflectionWrapper,
};

/// Borrowed reference to any indexed element.
#[derive(Clone, Copy, Debug)]
pub enum ElementRef<'a> {
    Namespace(&'a NamespaceWrapper),
    Class(&'a ClassWrapper),
    Method {
        class: &'a ClassWrapper,
        method: &'a MethodWrapper,
    },
    Property {
        class: &'a ClassWrapper,
        property: &'a PropertyWrapper,
    },
    Constant {
        class: &'a ClassWrapper,
        constant: &'a ConstantWrapper,
    },
    Function(&'a FunctionWrapper),
    Parameter(&'a ParameterWrapper),
}

impl<'a> ElementRef<'a> {
    /// Underlying wrapper.
    #[must_use]
    pub fn wrapper(&self) -> &'a dyn ReflectionWrapper {
        match *self {
            Self::Namespace(w) => w,
            Self::Class(w) => w,
            Self::Method { method, .. } => method,
            Self::Property { property, .. } => property,
            Self::Constant { constant, .. } => constant,
            Self::Function(w) => w,
            Self::Parameter(w) => w,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        self.wrapper().name()
    }

    #[must_use]
    pub fn short_name(&self) -> &'a str {
        crate::wrapper::short_name(self.name())
    }

    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.wrapper().kind()
    }

    /// Class a member is attached to, or the class itself.
    #[must_use]
    pub fn class(&self) -> Option<&'a ClassWrapper> {
        match *self {
            Self::Class(class)
            | Self::Method { class, .. }
            | Self::Property { class, .. }
            | Self::Constant { class, .. } => Some(class),
            Self::Namespace(_) | Self::Function(_) | Self::Parameter(_) => None,
        }
    }

    /// Identifier used in diagnostics, e.g. `Acme\Invoice::total()`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match *self {
            Self::Method { method, .. } => method.qualified_name(),
            Self::Property { property, .. } => property.qualified_name(),
            Self::Constant { constant, .. } => constant.qualified_name(),
            Self::Function(function) => format!("{}()", function.name()),
            Self::Parameter(parameter) => {
                format!("{} ${}", parameter.owner(), parameter.name)
            }
            Self::Namespace(w) => w.namespace().to_owned(),
            Self::Class(w) => w.name().to_owned(),
        }
    }

    /// Whether the element is part of the public API.
    ///
    /// Namespaces and parameters follow their container and report `true`.
    #[must_use]
    pub fn will_be_in_public_api(&self) -> bool {
        match *self {
            Self::Class(class) => class.will_be_in_public_api(),
            Self::Method { method, .. } => method.will_be_in_public_api(),
            Self::Property { property, .. } => property.will_be_in_public_api(),
            Self::Constant { constant, .. } => constant.will_be_in_public_api(),
            Self::Function(function) => function.will_be_in_public_api(),
            Self::Namespace(_) | Self::Parameter(_) => true,
        }
    }
}

/// Index of every class and function of one namespace.
#[derive(Debug)]
pub struct CodeIndex {
    namespace: String,
    policy: &'static str,
    classes: Vec<ClassWrapper>,
    class_index: HashMap<String, usize>,
    functions: Vec<FunctionWrapper>,
    function_index: HashMap<String, usize>,
    namespaces: BTreeMap<String, NamespaceWrapper>,
}

fn lookup_key(name: &str) -> String {
    name.trim().trim_start_matches('\\').to_lowercase()
}

impl CodeIndex {
    /// Discover, reflect and classify everything under `namespace`.
    ///
    /// Names discovered twice are wrapped once (first occurrence wins).
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Reflect`] when discovery or reflection fails and
    /// [`IndexError::EmptyNamespace`] when nothing was discovered.
    pub fn build(
        reflector: &dyn Reflector,
        namespace: &str,
        policy: &dyn PublicApiDefinition,
    ) -> Result<Self, IndexError> {
        let namespace = namespace.trim().trim_matches('\\');

        let class_names = reflector.discover_classes(namespace)?;
        let function_names = reflector.discover_functions(namespace)?;
        tracing::debug!(
            namespace = %namespace,
            classes = class_names.len(),
            functions = function_names.len(),
            "Discovered elements"
        );
        if class_names.is_empty() && function_names.is_empty() {
            return Err(IndexError::EmptyNamespace(namespace.to_owned()));
        }

        let mut seen = HashSet::new();
        let mut reflected: Vec<ReflectedClass> = Vec::with_capacity(class_names.len());
        for name in &class_names {
            if !seen.insert(lookup_key(name)) {
                tracing::debug!(class = %name, "Skipping duplicate class");
                continue;
            }
            reflected.push(reflector.reflect_class(name)?);
        }

        let known: HashMap<String, bool> = reflected
            .iter()
            .map(|c| (lookup_key(&c.name), c.is_user_defined))
            .collect();
        let ancestors: RefCell<HashMap<String, bool>> = RefCell::new(HashMap::new());
        let declaring_is_user_defined = |declaring: &str| -> bool {
            let key = lookup_key(declaring);
            if let Some(&flag) = known.get(&key) {
                return flag;
            }
            let cached = ancestors.borrow().get(&key).copied();
            if let Some(flag) = cached {
                return flag;
            }
            let flag = match reflector.reflect_class(declaring) {
                Ok(class) => class.is_user_defined,
                Err(err) => {
                    tracing::debug!(class = %declaring, error = %err, "Declaring class not reflectable");
                    false
                }
            };
            ancestors.borrow_mut().insert(key, flag);
            flag
        };

        let mut tree = NamespaceTree::new(namespace);
        let mut classes = Vec::with_capacity(reflected.len());
        let mut class_index = HashMap::with_capacity(reflected.len());
        for class in reflected {
            let mut wrapper = ClassWrapper::with_declaring_lookup(class, &declaring_is_user_defined);
            wrapper.apply_policy(policy);
            tree.add_class(wrapper.name());
            class_index.insert(lookup_key(wrapper.name()), classes.len());
            classes.push(wrapper);
        }

        let mut functions = Vec::with_capacity(function_names.len());
        let mut function_index = HashMap::with_capacity(function_names.len());
        for name in &function_names {
            let key = lookup_key(name);
            if function_index.contains_key(&key) {
                tracing::debug!(function = %name, "Skipping duplicate function");
                continue;
            }
            let mut wrapper = FunctionWrapper::from_reflection(reflector.reflect_function(name)?);
            let api = policy.is_part_of_public_api(ApiElement::Function(&wrapper));
            wrapper.set_in_public_api(api);
            tree.add_function(wrapper.name());
            function_index.insert(key, functions.len());
            functions.push(wrapper);
        }

        let index = Self {
            namespace: namespace.to_owned(),
            policy: policy.name(),
            classes,
            class_index,
            functions,
            function_index,
            namespaces: tree.finish(),
        };
        tracing::info!(
            namespace = %index.namespace,
            policy = index.policy,
            classes = index.classes.len(),
            api_classes = index.api_classes().len(),
            functions = index.functions.len(),
            "Built code index"
        );
        Ok(index)
    }

    /// Documented root namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Name of the policy used at build time.
    #[must_use]
    pub fn policy_name(&self) -> &'static str {
        self.policy
    }

    /// Whether `name` is the root namespace or lies below it.
    #[must_use]
    pub fn is_within_root(&self, name: &str) -> bool {
        let name = name.trim_start_matches('\\');
        name.eq_ignore_ascii_case(&self.namespace) || is_in_namespace(name, &self.namespace)
    }

    /// Class by qualified name. `None` for names outside this index.
    #[must_use]
    pub fn get_class_wrapper(&self, name: &str) -> Option<&ClassWrapper> {
        self.class_index
            .get(&lookup_key(name))
            .and_then(|&idx| self.classes.get(idx))
    }

    /// Function by qualified name (trailing `()` ignored).
    #[must_use]
    pub fn get_function(&self, name: &str) -> Option<&FunctionWrapper> {
        let name = name.trim();
        let name = name.strip_suffix("()").unwrap_or(name);
        self.function_index
            .get(&lookup_key(name))
            .and_then(|&idx| self.functions.get(idx))
    }

    /// Resolve a `Class::member` path.
    ///
    /// Member syntax: `method()`, `$property`, or a bare name tried as
    /// constant, then property, then method.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::UnresolvableReference`] for a malformed path, an
    /// unknown class or an unknown member.
    pub fn get_element(&self, path: &str) -> Result<ElementRef<'_>, IndexError> {
        let path = path.trim();
        let Some((class_part, member)) = path.split_once("::") else {
            return Err(IndexError::unresolvable(path, UnresolvableReason::MalformedPath));
        };
        if class_part.trim_start_matches('\\').is_empty() || member.is_empty() {
            return Err(IndexError::unresolvable(path, UnresolvableReason::MalformedPath));
        }
        let class = self
            .get_class_wrapper(class_part)
            .ok_or_else(|| IndexError::unresolvable(path, UnresolvableReason::UnknownClass))?;
        Self::member(class, member)
            .ok_or_else(|| IndexError::unresolvable(path, UnresolvableReason::UnknownMember))
    }

    /// Member of `class` using `get_element` member syntax.
    #[must_use]
    pub fn member<'a>(class: &'a ClassWrapper, member: &str) -> Option<ElementRef<'a>> {
        let member = member.trim();
        let method = |name: &str| {
            class
                .method(name)
                .map(|method| ElementRef::Method { class, method })
        };
        let property = |name: &str| {
            class
                .property(name)
                .map(|property| ElementRef::Property { class, property })
        };

        if let Some(name) = member.strip_suffix("()") {
            return method(name);
        }
        if member.starts_with('$') {
            return property(member);
        }
        class
            .constant(member)
            .map(|constant| ElementRef::Constant { class, constant })
            .or_else(|| property(member))
            .or_else(|| method(member))
    }

    /// Every indexed class in discovery order.
    #[must_use]
    pub fn elements(&self) -> &[ClassWrapper] {
        &self.classes
    }

    /// Classes that are part of the public API, in discovery order.
    #[must_use]
    pub fn api_classes(&self) -> Vec<&ClassWrapper> {
        self.classes
            .iter()
            .filter(|c| c.will_be_in_public_api())
            .collect()
    }

    /// Alias of [`api_classes`](Self::api_classes).
    #[must_use]
    pub fn public_classes(&self) -> Vec<&ClassWrapper> {
        self.api_classes()
    }

    #[must_use]
    pub fn functions(&self) -> &[FunctionWrapper] {
        &self.functions
    }

    #[must_use]
    pub fn api_functions(&self) -> Vec<&FunctionWrapper> {
        self.functions
            .iter()
            .filter(|f| f.will_be_in_public_api())
            .collect()
    }

    /// Namespaces ordered by name.
    pub fn namespaces(&self) -> impl Iterator<Item = &NamespaceWrapper> {
        self.namespaces.values()
    }

    /// Namespace by full name (case-insensitive).
    #[must_use]
    pub fn get_namespace(&self, namespace: &str) -> Option<&NamespaceWrapper> {
        let namespace = namespace.trim().trim_matches('\\');
        self.namespaces.get(namespace).or_else(|| {
            self.namespaces
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(namespace))
                .map(|(_, v)| v)
        })
    }

    #[must_use]
    pub fn root_namespace(&self) -> Option<&NamespaceWrapper> {
        self.get_namespace(&self.namespace)
    }

    /// Ancestors of `class` present in the index: parent chain and
    /// interfaces, nearest first.
    #[must_use]
    pub fn ancestors(&self, class: &ClassWrapper) -> Vec<&ClassWrapper> {
        let mut visited = HashSet::from([lookup_key(class.name())]);
        let mut queue: VecDeque<&str> = VecDeque::new();
        queue.extend(class.parent());
        queue.extend(class.interfaces().iter().map(String::as_str));

        let mut ancestors = Vec::new();
        while let Some(name) = queue.pop_front() {
            if !visited.insert(lookup_key(name)) {
                continue;
            }
            let Some(ancestor) = self.get_class_wrapper(name) else {
                continue;
            };
            queue.extend(ancestor.parent());
            queue.extend(ancestor.interfaces().iter().map(String::as_str));
            ancestors.push(ancestor);
        }
        ancestors
    }

    /// Documentation of `method` as declared on the nearest indexed ancestor
    /// of `class` that documents it without deferring further.
    #[must_use]
    pub fn inherited_doc_block(&self, class: &ClassWrapper, method: &str) -> Option<&DocBlock> {
        self.ancestors(class).into_iter().find_map(|ancestor| {
            ancestor
                .method(method)
                .and_then(ReflectionWrapper::doc_block)
                .filter(|doc| !doc.inherits_doc() && !doc.is_empty())
        })
    }
}
