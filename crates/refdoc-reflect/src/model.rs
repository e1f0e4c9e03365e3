//! Raw reflected element records.
//!
//! These are the plain data records a reflection backend produces for each
//! discovered class, member, parameter and function. Names are fully
//! qualified with `\` as the namespace separator.

use std::fmt;

use serde::Serialize;

/// Declaration type of a class-like element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    Class,
    Interface,
    Trait,
    Enum,
}

impl ClassKind {
    /// Declaration keyword.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Trait => "trait",
            Self::Enum => "enum",
        }
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Member visibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    /// Declaration keyword.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One `use` import of the file declaring an element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UseImport {
    /// Local alias (last segment of `target` unless renamed with `as`).
    pub alias: String,
    /// Fully-qualified imported name.
    pub target: String,
}

impl UseImport {
    /// Import `target` under its last segment.
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        let target: String = target.into();
        let target = target.trim_start_matches('\\').to_owned();
        let alias = target.rsplit('\\').next().unwrap_or(&target).to_owned();
        Self { alias, target }
    }

    /// Import `target` under an explicit alias.
    #[must_use]
    pub fn aliased(target: impl Into<String>, alias: impl Into<String>) -> Self {
        let target: String = target.into();
        Self {
            alias: alias.into(),
            target: target.trim_start_matches('\\').to_owned(),
        }
    }
}

/// Reflected function or method parameter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReflectedParameter {
    pub name: String,
    pub type_hint: Option<String>,
    /// Default value as source text.
    pub default_value: Option<String>,
    pub is_variadic: bool,
    pub is_by_reference: bool,
    /// Zero-based position in the parameter list.
    pub position: usize,
}

impl ReflectedParameter {
    /// Create a parameter without type or default.
    #[must_use]
    pub fn new(name: impl Into<String>, position: usize) -> Self {
        Self {
            name: name.into(),
            position,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_type(mut self, type_hint: impl Into<String>) -> Self {
        self.type_hint = Some(type_hint.into());
        self
    }

    #[must_use]
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    #[must_use]
    pub fn variadic(mut self) -> Self {
        self.is_variadic = true;
        self
    }

    #[must_use]
    pub fn by_reference(mut self) -> Self {
        self.is_by_reference = true;
        self
    }
}

/// Reflected method as visible on one class.
///
/// Inherited methods are reported on the inheriting class with
/// `declaring_class` naming the ancestor that declares them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReflectedMethod {
    pub name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_final: bool,
    pub is_user_defined: bool,
    pub parameters: Vec<ReflectedParameter>,
    pub return_type: Option<String>,
    pub doc_comment: Option<String>,
    pub declaring_class: String,
}

impl ReflectedMethod {
    /// Create a public, user-defined instance method.
    #[must_use]
    pub fn new(name: impl Into<String>, declaring_class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            is_static: false,
            is_abstract: false,
            is_final: false,
            is_user_defined: true,
            parameters: Vec::new(),
            return_type: None,
            doc_comment: None,
            declaring_class: declaring_class.into(),
        }
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn with_doc(mut self, doc_comment: impl Into<String>) -> Self {
        self.doc_comment = Some(doc_comment.into());
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: ReflectedParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    #[must_use]
    pub fn static_method(mut self) -> Self {
        self.is_static = true;
        self
    }

    #[must_use]
    pub fn abstract_method(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    #[must_use]
    pub fn builtin(mut self) -> Self {
        self.is_user_defined = false;
        self
    }
}

/// Reflected property as visible on one class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReflectedProperty {
    pub name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_readonly: bool,
    pub type_hint: Option<String>,
    pub default_value: Option<String>,
    pub doc_comment: Option<String>,
    pub declaring_class: String,
}

impl ReflectedProperty {
    /// Create a public instance property.
    #[must_use]
    pub fn new(name: impl Into<String>, declaring_class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            is_static: false,
            is_readonly: false,
            type_hint: None,
            default_value: None,
            doc_comment: None,
            declaring_class: declaring_class.into(),
        }
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn with_type(mut self, type_hint: impl Into<String>) -> Self {
        self.type_hint = Some(type_hint.into());
        self
    }

    #[must_use]
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    #[must_use]
    pub fn with_doc(mut self, doc_comment: impl Into<String>) -> Self {
        self.doc_comment = Some(doc_comment.into());
        self
    }

    #[must_use]
    pub fn static_property(mut self) -> Self {
        self.is_static = true;
        self
    }

    #[must_use]
    pub fn readonly(mut self) -> Self {
        self.is_readonly = true;
        self
    }
}

/// Reflected class constant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReflectedConstant {
    pub name: String,
    pub visibility: Visibility,
    /// Value as source text.
    pub value: Option<String>,
    pub doc_comment: Option<String>,
    pub declaring_class: String,
}

impl ReflectedConstant {
    /// Create a public constant.
    #[must_use]
    pub fn new(name: impl Into<String>, declaring_class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            value: None,
            doc_comment: None,
            declaring_class: declaring_class.into(),
        }
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_doc(mut self, doc_comment: impl Into<String>) -> Self {
        self.doc_comment = Some(doc_comment.into());
        self
    }
}

/// Reflected class, interface, trait or enum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReflectedClass {
    pub name: String,
    pub kind: ClassKind,
    pub is_final: bool,
    pub is_abstract: bool,
    /// False for built-in and vendor classes.
    pub is_user_defined: bool,
    pub parent: Option<String>,
    /// Implemented (or, for interfaces, extended) interfaces in declaration order.
    pub interfaces: Vec<String>,
    pub doc_comment: Option<String>,
    pub imports: Vec<UseImport>,
    pub constants: Vec<ReflectedConstant>,
    pub properties: Vec<ReflectedProperty>,
    pub methods: Vec<ReflectedMethod>,
}

impl ReflectedClass {
    /// Create an empty user-defined class-like element.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        let name: String = name.into();
        Self {
            name: name.trim_start_matches('\\').to_owned(),
            kind,
            is_final: false,
            is_abstract: false,
            is_user_defined: true,
            parent: None,
            interfaces: Vec::new(),
            doc_comment: None,
            imports: Vec::new(),
            constants: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_doc(mut self, doc_comment: impl Into<String>) -> Self {
        self.doc_comment = Some(doc_comment.into());
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        let parent: String = parent.into();
        self.parent = Some(parent.trim_start_matches('\\').to_owned());
        self
    }

    #[must_use]
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        let interface: String = interface.into();
        self.interfaces
            .push(interface.trim_start_matches('\\').to_owned());
        self
    }

    #[must_use]
    pub fn with_import(mut self, import: UseImport) -> Self {
        self.imports.push(import);
        self
    }

    #[must_use]
    pub fn with_constant(mut self, constant: ReflectedConstant) -> Self {
        self.constants.push(constant);
        self
    }

    #[must_use]
    pub fn with_property(mut self, property: ReflectedProperty) -> Self {
        self.properties.push(property);
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: ReflectedMethod) -> Self {
        self.methods.push(method);
        self
    }

    #[must_use]
    pub fn final_class(mut self) -> Self {
        self.is_final = true;
        self
    }

    #[must_use]
    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    #[must_use]
    pub fn builtin(mut self) -> Self {
        self.is_user_defined = false;
        self
    }
}

/// Reflected standalone function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReflectedFunction {
    pub name: String,
    pub is_user_defined: bool,
    pub parameters: Vec<ReflectedParameter>,
    pub return_type: Option<String>,
    pub doc_comment: Option<String>,
    pub imports: Vec<UseImport>,
}

impl ReflectedFunction {
    /// Create a user-defined function without parameters.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self {
            name: name.trim_start_matches('\\').to_owned(),
            is_user_defined: true,
            parameters: Vec::new(),
            return_type: None,
            doc_comment: None,
            imports: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: ReflectedParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    #[must_use]
    pub fn with_doc(mut self, doc_comment: impl Into<String>) -> Self {
        self.doc_comment = Some(doc_comment.into());
        self
    }

    #[must_use]
    pub fn with_import(mut self, import: UseImport) -> Self {
        self.imports.push(import);
        self
    }
}
