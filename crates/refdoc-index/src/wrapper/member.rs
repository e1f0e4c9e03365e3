//! Method, property and constant wrappers.

use refdoc_reflect::{
    DocBlock, ReflectedConstant, ReflectedMethod, ReflectedProperty, Visibility,
};

use super::{
    CallableRef, CanThrow, ClassElementWrapper, ElementKind, HasParameters, HasReturnType,
    HasType, ParameterWrapper, ReflectionWrapper, parse_doc,
};

/// Method as visible on one class.
#[derive(Clone, Debug)]
pub struct MethodWrapper {
    reflected: ReflectedMethod,
    class_name: String,
    doc: Option<DocBlock>,
    parameters: Vec<ParameterWrapper>,
    in_public_api: bool,
}

impl MethodWrapper {
    pub(crate) fn new(class_name: &str, reflected: ReflectedMethod) -> Self {
        let doc = parse_doc(reflected.doc_comment.as_deref());
        let owner = CallableRef::Method {
            class: class_name.to_owned(),
            method: reflected.name.clone(),
        };
        let parameters = reflected
            .parameters
            .iter()
            .map(|p| ParameterWrapper::new(owner.clone(), p, doc.as_ref()))
            .collect();
        Self {
            reflected,
            class_name: class_name.to_owned(),
            doc,
            parameters,
            in_public_api: false,
        }
    }

    pub(crate) fn set_in_public_api(&mut self, value: bool) {
        self.in_public_api = value;
    }

    #[must_use]
    pub fn reflected(&self) -> &ReflectedMethod {
        &self.reflected
    }

    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.reflected.is_abstract
    }

    #[must_use]
    pub fn is_final(&self) -> bool {
        self.reflected.is_final
    }

    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.reflected.name.eq_ignore_ascii_case("__construct")
    }

    /// Reference used as the back link of this method's parameters.
    #[must_use]
    pub fn callable_ref(&self) -> CallableRef {
        CallableRef::Method {
            class: self.class_name.clone(),
            method: self.reflected.name.clone(),
        }
    }
}

impl ReflectionWrapper for MethodWrapper {
    fn name(&self) -> &str {
        &self.reflected.name
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Method
    }

    fn doc_block(&self) -> Option<&DocBlock> {
        self.doc.as_ref()
    }
}

impl ClassElementWrapper for MethodWrapper {
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn declaring_class(&self) -> &str {
        &self.reflected.declaring_class
    }

    fn visibility(&self) -> Visibility {
        self.reflected.visibility
    }

    fn is_static(&self) -> bool {
        self.reflected.is_static
    }

    fn is_user_defined(&self) -> bool {
        self.reflected.is_user_defined
    }

    fn will_be_in_public_api(&self) -> bool {
        self.in_public_api
    }

    fn qualified_name(&self) -> String {
        format!("{}::{}()", self.class_name, self.reflected.name)
    }
}

impl HasParameters for MethodWrapper {
    fn parameters(&self) -> &[ParameterWrapper] {
        &self.parameters
    }
}

impl HasReturnType for MethodWrapper {
    fn declared_return_type(&self) -> Option<&str> {
        self.reflected.return_type.as_deref()
    }
}

impl CanThrow for MethodWrapper {}

/// Property as visible on one class.
#[derive(Clone, Debug)]
pub struct PropertyWrapper {
    reflected: ReflectedProperty,
    class_name: String,
    doc: Option<DocBlock>,
    is_user_defined: bool,
    in_public_api: bool,
}

impl PropertyWrapper {
    /// `is_user_defined` comes from the declaring class.
    pub(crate) fn new(class_name: &str, reflected: ReflectedProperty, is_user_defined: bool) -> Self {
        Self {
            doc: parse_doc(reflected.doc_comment.as_deref()),
            reflected,
            class_name: class_name.to_owned(),
            is_user_defined,
            in_public_api: false,
        }
    }

    pub(crate) fn set_in_public_api(&mut self, value: bool) {
        self.in_public_api = value;
    }

    #[must_use]
    pub fn reflected(&self) -> &ReflectedProperty {
        &self.reflected
    }

    #[must_use]
    pub fn is_readonly(&self) -> bool {
        self.reflected.is_readonly
    }

    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.reflected.default_value.as_deref()
    }
}

impl ReflectionWrapper for PropertyWrapper {
    fn name(&self) -> &str {
        &self.reflected.name
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Property
    }

    fn doc_block(&self) -> Option<&DocBlock> {
        self.doc.as_ref()
    }
}

impl ClassElementWrapper for PropertyWrapper {
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn declaring_class(&self) -> &str {
        &self.reflected.declaring_class
    }

    fn visibility(&self) -> Visibility {
        self.reflected.visibility
    }

    fn is_static(&self) -> bool {
        self.reflected.is_static
    }

    fn is_user_defined(&self) -> bool {
        self.is_user_defined
    }

    fn will_be_in_public_api(&self) -> bool {
        self.in_public_api
    }

    fn qualified_name(&self) -> String {
        format!("{}::${}", self.class_name, self.reflected.name)
    }
}

impl HasType for PropertyWrapper {
    fn declared_type(&self) -> Option<&str> {
        self.reflected.type_hint.as_deref()
    }
}

/// Class constant as visible on one class.
///
/// Constants are class-level, so they count as static members for filtering.
#[derive(Clone, Debug)]
pub struct ConstantWrapper {
    reflected: ReflectedConstant,
    class_name: String,
    doc: Option<DocBlock>,
    is_user_defined: bool,
    in_public_api: bool,
}

impl ConstantWrapper {
    /// `is_user_defined` comes from the declaring class.
    pub(crate) fn new(class_name: &str, reflected: ReflectedConstant, is_user_defined: bool) -> Self {
        Self {
            doc: parse_doc(reflected.doc_comment.as_deref()),
            reflected,
            class_name: class_name.to_owned(),
            is_user_defined,
            in_public_api: false,
        }
    }

    pub(crate) fn set_in_public_api(&mut self, value: bool) {
        self.in_public_api = value;
    }

    #[must_use]
    pub fn reflected(&self) -> &ReflectedConstant {
        &self.reflected
    }

    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.reflected.value.as_deref()
    }
}

impl ReflectionWrapper for ConstantWrapper {
    fn name(&self) -> &str {
        &self.reflected.name
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Constant
    }

    fn doc_block(&self) -> Option<&DocBlock> {
        self.doc.as_ref()
    }
}

impl ClassElementWrapper for ConstantWrapper {
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn declaring_class(&self) -> &str {
        &self.reflected.declaring_class
    }

    fn visibility(&self) -> Visibility {
        self.reflected.visibility
    }

    fn is_static(&self) -> bool {
        true
    }

    fn is_user_defined(&self) -> bool {
        self.is_user_defined
    }

    fn will_be_in_public_api(&self) -> bool {
        self.in_public_api
    }

    fn qualified_name(&self) -> String {
        format!("{}::{}", self.class_name, self.reflected.name)
    }
}

impl HasType for ConstantWrapper {
    fn declared_type(&self) -> Option<&str> {
        None
    }
}
