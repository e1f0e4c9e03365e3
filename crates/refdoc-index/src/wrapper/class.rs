//! Class wrapper.

use std::collections::HashMap;

use refdoc_reflect::{ClassKind, DocBlock, ReflectedClass, UseImport};

use super::{
    ClassElementWrapper, ConstantWrapper, ElementKind, MemberFilter, MethodWrapper,
    PropertyWrapper, ReflectionWrapper, namespace_of, parse_doc,
};
use crate::api::{ApiElement, PublicApiDefinition};
use crate::signature;

/// Class, interface, trait or enum with its members.
///
/// Member wrappers are built once when the class is wrapped and keep the
/// reflection order. The public API flags are written once by
/// [`ClassWrapper::apply_policy`] during index build.
#[derive(Clone, Debug)]
pub struct ClassWrapper {
    name: String,
    kind: ClassKind,
    is_final: bool,
    is_abstract: bool,
    is_user_defined: bool,
    parent: Option<String>,
    interfaces: Vec<String>,
    imports: Vec<UseImport>,
    doc: Option<DocBlock>,
    methods: Vec<MethodWrapper>,
    properties: Vec<PropertyWrapper>,
    constants: Vec<ConstantWrapper>,
    /// Lowercased method name to position in `methods`.
    method_index: HashMap<String, usize>,
    in_public_api: bool,
}

impl ClassWrapper {
    /// Wrap a reflected class.
    ///
    /// Inherited properties and constants are treated as user defined when
    /// the wrapped class is.
    #[must_use]
    pub fn from_reflection(reflected: ReflectedClass) -> Self {
        let user_defined = reflected.is_user_defined;
        Self::with_declaring_lookup(reflected, |_| user_defined)
    }

    /// Wrap a reflected class, asking `declaring_is_user_defined` for the
    /// user-defined flag of each ancestor declaring an inherited property or
    /// constant.
    pub(crate) fn with_declaring_lookup(
        reflected: ReflectedClass,
        declaring_is_user_defined: impl Fn(&str) -> bool,
    ) -> Self {
        let ReflectedClass {
            name,
            kind,
            is_final,
            is_abstract,
            is_user_defined,
            parent,
            interfaces,
            doc_comment,
            imports,
            constants,
            properties,
            methods,
        } = reflected;

        let user_defined_for = |declaring: &str| {
            if declaring
                .trim_start_matches('\\')
                .eq_ignore_ascii_case(&name)
            {
                is_user_defined
            } else {
                declaring_is_user_defined(declaring)
            }
        };

        let constants: Vec<ConstantWrapper> = constants
            .into_iter()
            .map(|c| {
                let user_defined = user_defined_for(&c.declaring_class);
                ConstantWrapper::new(&name, c, user_defined)
            })
            .collect();
        let properties: Vec<PropertyWrapper> = properties
            .into_iter()
            .map(|p| {
                let user_defined = user_defined_for(&p.declaring_class);
                PropertyWrapper::new(&name, p, user_defined)
            })
            .collect();
        let methods: Vec<MethodWrapper> = methods
            .into_iter()
            .map(|m| MethodWrapper::new(&name, m))
            .collect();

        let mut method_index = HashMap::with_capacity(methods.len());
        for (idx, method) in methods.iter().enumerate() {
            method_index
                .entry(method.name().to_lowercase())
                .or_insert(idx);
        }

        Self {
            doc: parse_doc(doc_comment.as_deref()),
            name,
            kind,
            is_final,
            is_abstract,
            is_user_defined,
            parent,
            interfaces,
            imports,
            methods,
            properties,
            constants,
            method_index,
            in_public_api: false,
        }
    }

    /// Record the policy decision for the class and every member.
    ///
    /// Members are only part of the public API when the class is.
    pub(crate) fn apply_policy(&mut self, policy: &dyn PublicApiDefinition) {
        let class_api = policy.is_part_of_public_api(ApiElement::Class(self));

        let methods: Vec<bool> = self
            .methods
            .iter()
            .map(|m| class_api && policy.is_part_of_public_api(ApiElement::Method(m)))
            .collect();
        let properties: Vec<bool> = self
            .properties
            .iter()
            .map(|p| class_api && policy.is_part_of_public_api(ApiElement::Property(p)))
            .collect();
        let constants: Vec<bool> = self
            .constants
            .iter()
            .map(|c| class_api && policy.is_part_of_public_api(ApiElement::Constant(c)))
            .collect();

        self.in_public_api = class_api;
        for (method, api) in self.methods.iter_mut().zip(methods) {
            method.set_in_public_api(api);
        }
        for (property, api) in self.properties.iter_mut().zip(properties) {
            property.set_in_public_api(api);
        }
        for (constant, api) in self.constants.iter_mut().zip(constants) {
            constant.set_in_public_api(api);
        }
    }

    #[must_use]
    pub fn class_kind(&self) -> ClassKind {
        self.kind
    }

    /// Namespace part of the name (empty for global classes).
    #[must_use]
    pub fn namespace(&self) -> &str {
        namespace_of(&self.name)
    }

    #[must_use]
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    #[must_use]
    pub fn is_user_defined(&self) -> bool {
        self.is_user_defined
    }

    /// Qualified parent class name.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Qualified interface names in declaration order.
    #[must_use]
    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    /// `use` imports of the declaring file.
    #[must_use]
    pub fn imports(&self) -> &[UseImport] {
        &self.imports
    }

    /// Policy decision taken at index build.
    #[must_use]
    pub fn will_be_in_public_api(&self) -> bool {
        self.in_public_api
    }

    #[must_use]
    pub fn methods(&self) -> &[MethodWrapper] {
        &self.methods
    }

    #[must_use]
    pub fn properties(&self) -> &[PropertyWrapper] {
        &self.properties
    }

    #[must_use]
    pub fn constants(&self) -> &[ConstantWrapper] {
        &self.constants
    }

    /// Method by name (case-insensitive, trailing `()` ignored).
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodWrapper> {
        let name = name.strip_suffix("()").unwrap_or(name);
        self.method_index
            .get(&name.to_lowercase())
            .and_then(|&idx| self.methods.get(idx))
    }

    /// Property by name (leading `$` ignored).
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyWrapper> {
        let name = name.strip_prefix('$').unwrap_or(name);
        self.properties.iter().find(|p| p.name() == name)
    }

    #[must_use]
    pub fn constant(&self, name: &str) -> Option<&ConstantWrapper> {
        self.constants.iter().find(|c| c.name() == name)
    }

    /// Members of `members` matching `filter`, sorted case-insensitively by name.
    pub fn filter_reflection<'a, T: ClassElementWrapper>(
        &self,
        members: &'a [T],
        filter: MemberFilter,
    ) -> Vec<&'a T> {
        let mut matched: Vec<&T> = members
            .iter()
            .filter(|m| filter.matches(*m, &self.name))
            .collect();
        matched.sort_by_cached_key(|m| m.name().to_lowercase());
        matched
    }

    /// Like [`filter_reflection`](Self::filter_reflection), keeping only
    /// public API members. Empty when the class itself is not public API.
    pub fn filter_api_reflection<'a, T: ClassElementWrapper>(
        &self,
        members: &'a [T],
        filter: MemberFilter,
    ) -> Vec<&'a T> {
        if !self.in_public_api {
            return Vec::new();
        }
        let mut matched = self.filter_reflection(members, filter);
        matched.retain(|m| m.will_be_in_public_api());
        matched
    }

    #[must_use]
    pub fn all_user_defined_methods(&self, filter: MemberFilter) -> Vec<&MethodWrapper> {
        user_defined(self.filter_reflection(&self.methods, filter))
    }

    #[must_use]
    pub fn all_user_defined_properties(&self, filter: MemberFilter) -> Vec<&PropertyWrapper> {
        user_defined(self.filter_reflection(&self.properties, filter))
    }

    #[must_use]
    pub fn all_user_defined_constants(&self, filter: MemberFilter) -> Vec<&ConstantWrapper> {
        user_defined(self.filter_reflection(&self.constants, filter))
    }

    #[must_use]
    pub fn all_api_methods(&self) -> Vec<&MethodWrapper> {
        self.filter_api_reflection(&self.methods, MemberFilter::PUBLIC)
    }

    #[must_use]
    pub fn all_api_properties(&self) -> Vec<&PropertyWrapper> {
        self.filter_api_reflection(&self.properties, MemberFilter::PUBLIC)
    }

    #[must_use]
    pub fn all_api_constants(&self) -> Vec<&ConstantWrapper> {
        self.filter_api_reflection(&self.constants, MemberFilter::PUBLIC)
    }

    /// Declaration-style outline of the class.
    ///
    /// With `only_api` the public API members are listed, otherwise every
    /// public and protected user-defined member.
    #[must_use]
    pub fn signature(&self, only_api: bool) -> String {
        signature::class(self, only_api)
    }
}

fn user_defined<T: ClassElementWrapper>(members: Vec<&T>) -> Vec<&T> {
    members.into_iter().filter(|m| m.is_user_defined()).collect()
}

impl ReflectionWrapper for ClassWrapper {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Class(self.kind)
    }

    fn doc_block(&self) -> Option<&DocBlock> {
        self.doc.as_ref()
    }
}
