//! Standalone function and parameter wrappers.

use std::fmt;

use refdoc_reflect::{DocBlock, DocTag, ReflectedFunction, ReflectedParameter, UseImport};

use super::{
    CanThrow, ElementKind, HasParameters, HasReturnType, ReflectionWrapper, namespace_of,
    parse_doc,
};
use crate::signature;

/// Non-owning reference from a parameter to its callable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CallableRef {
    /// Method `method` as attached to `class`.
    Method { class: String, method: String },
    /// Standalone function by qualified name.
    Function { name: String },
}

impl CallableRef {
    /// `Class::method()` or `Namespace\function()`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match self {
            Self::Method { class, method } => format!("{class}::{method}()"),
            Self::Function { name } => format!("{name}()"),
        }
    }
}

impl fmt::Display for CallableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

/// One parameter of a method or function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterWrapper {
    pub name: String,
    /// Declared type expression.
    pub type_hint: Option<String>,
    /// Default value as source text.
    pub default_value: Option<String>,
    pub is_variadic: bool,
    pub is_by_reference: bool,
    pub position: usize,
    owner: CallableRef,
    /// Matching `@param` tag of the owner's doc block.
    param_tag: Option<DocTag>,
}

impl ParameterWrapper {
    pub(crate) fn new(
        owner: CallableRef,
        reflected: &ReflectedParameter,
        owner_doc: Option<&DocBlock>,
    ) -> Self {
        Self {
            name: reflected.name.clone(),
            type_hint: reflected.type_hint.clone(),
            default_value: reflected.default_value.clone(),
            is_variadic: reflected.is_variadic,
            is_by_reference: reflected.is_by_reference,
            position: reflected.position,
            owner,
            param_tag: owner_doc.and_then(|d| d.param(&reflected.name)).cloned(),
        }
    }

    /// Callable declaring this parameter.
    #[must_use]
    pub fn owner(&self) -> &CallableRef {
        &self.owner
    }

    #[must_use]
    pub fn has_default(&self) -> bool {
        self.default_value.is_some()
    }

    /// Declared type, falling back to the owner's `@param` tag.
    #[must_use]
    pub fn documented_type(&self) -> Option<&str> {
        self.type_hint
            .as_deref()
            .or_else(|| self.param_tag.as_ref().and_then(DocTag::type_ref))
    }

    /// Description from the owner's `@param` tag.
    #[must_use]
    pub fn description(&self) -> &str {
        self.param_tag.as_ref().map_or("", DocTag::description)
    }

    /// Declaration text, e.g. `?int &...$values = null`.
    #[must_use]
    pub fn declaration(&self) -> String {
        signature::parameter(self)
    }
}

impl ReflectionWrapper for ParameterWrapper {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Parameter
    }

    fn doc_block(&self) -> Option<&DocBlock> {
        None
    }
}

/// Standalone function.
#[derive(Clone, Debug)]
pub struct FunctionWrapper {
    reflected: ReflectedFunction,
    doc: Option<DocBlock>,
    parameters: Vec<ParameterWrapper>,
    in_public_api: bool,
}

impl FunctionWrapper {
    /// Wrap a reflected function.
    #[must_use]
    pub fn from_reflection(reflected: ReflectedFunction) -> Self {
        let doc = parse_doc(reflected.doc_comment.as_deref());
        let owner = CallableRef::Function {
            name: reflected.name.clone(),
        };
        let parameters = reflected
            .parameters
            .iter()
            .map(|p| ParameterWrapper::new(owner.clone(), p, doc.as_ref()))
            .collect();
        Self {
            reflected,
            doc,
            parameters,
            in_public_api: false,
        }
    }

    pub(crate) fn set_in_public_api(&mut self, value: bool) {
        self.in_public_api = value;
    }

    #[must_use]
    pub fn reflected(&self) -> &ReflectedFunction {
        &self.reflected
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        namespace_of(&self.reflected.name)
    }

    #[must_use]
    pub fn imports(&self) -> &[UseImport] {
        &self.reflected.imports
    }

    #[must_use]
    pub fn is_user_defined(&self) -> bool {
        self.reflected.is_user_defined
    }

    /// Policy decision taken at index build.
    #[must_use]
    pub fn will_be_in_public_api(&self) -> bool {
        self.in_public_api
    }

    /// Declaration line, e.g. `function format(int $cents): string`.
    #[must_use]
    pub fn signature(&self) -> String {
        signature::function(self)
    }
}

impl ReflectionWrapper for FunctionWrapper {
    fn name(&self) -> &str {
        &self.reflected.name
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Function
    }

    fn doc_block(&self) -> Option<&DocBlock> {
        self.doc.as_ref()
    }
}

impl HasParameters for FunctionWrapper {
    fn parameters(&self) -> &[ParameterWrapper] {
        &self.parameters
    }
}

impl HasReturnType for FunctionWrapper {
    fn declared_return_type(&self) -> Option<&str> {
        self.reflected.return_type.as_deref()
    }
}

impl CanThrow for FunctionWrapper {}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_amount() -> FunctionWrapper {
        FunctionWrapper::from_reflection(
            ReflectedFunction::new("\\Acme\\Money\\format_amount")
                .with_parameter(ReflectedParameter::new("cents", 0))
                .with_parameter(
                    ReflectedParameter::new("currency", 1)
                        .with_type("string")
                        .with_default("'EUR'"),
                )
                .with_return_type("string")
                .with_doc("/**\n * Formats cents.\n *\n * @param int $cents Amount in cents\n */"),
        )
    }

    #[test]
    fn test_function_names() {
        let function = format_amount();

        assert_eq!(function.name(), "Acme\\Money\\format_amount");
        assert_eq!(function.short_name(), "format_amount");
        assert_eq!(function.namespace(), "Acme\\Money");
        assert_eq!(function.summary(), "Formats cents.");
    }

    #[test]
    fn test_parameter_documented_type_from_param_tag() {
        let function = format_amount();

        let cents = function.parameter("cents").unwrap();

        assert_eq!(cents.type_hint, None);
        assert_eq!(cents.documented_type(), Some("int"));
        assert_eq!(cents.description(), "Amount in cents");
        assert_eq!(cents.owner().qualified_name(), "Acme\\Money\\format_amount()");
    }

    #[test]
    fn test_parameter_has_no_doc_block() {
        let function = format_amount();

        let currency = function.parameter("currency").unwrap();

        assert!(currency.doc_block().is_none());
        assert!(currency.has_default());
        assert_eq!(currency.kind(), ElementKind::Parameter);
    }

    #[test]
    fn test_function_signature() {
        let function = format_amount();

        assert_eq!(
            function.signature(),
            "function format_amount($cents, string $currency = 'EUR'): string"
        );
    }
}
