//! Wrappers around reflected program elements.
//!
//! Each wrapper pairs one raw reflected record with its parsed doc block and
//! the public API decision taken at index-build time. Wrappers are immutable
//! once the [`CodeIndex`](crate::CodeIndex) is built.
//!
//! # Ownership
//!
//! The index owns every [`ClassWrapper`]; a class owns its member wrappers.
//! Upward relations (member to attached class, parameter to callable) are
//! stored as qualified names and resolved through the index on demand, so
//! there are no reference cycles.

mod class;
mod function;
mod member;

use std::fmt;

use refdoc_reflect::{ClassKind, DocBlock, DocTag, Visibility};

pub use class::ClassWrapper;
pub use function::{CallableRef, FunctionWrapper, ParameterWrapper};
pub use member::{ConstantWrapper, MethodWrapper, PropertyWrapper};

/// Variant of a wrapped element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Namespace,
    Class(ClassKind),
    Method,
    Property,
    Constant,
    Function,
    Parameter,
}

impl ElementKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Namespace => "namespace",
            Self::Class(kind) => kind.keyword(),
            Self::Method => "method",
            Self::Property => "property",
            Self::Constant => "constant",
            Self::Function => "function",
            Self::Parameter => "parameter",
        }
    }

    /// Whether the element lives inside a class.
    #[must_use]
    pub fn is_class_member(self) -> bool {
        matches!(self, Self::Method | Self::Property | Self::Constant)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common surface of every wrapped element.
pub trait ReflectionWrapper {
    /// Element name (fully qualified for classes and functions).
    fn name(&self) -> &str;

    /// Last segment of the name.
    fn short_name(&self) -> &str {
        short_name(self.name())
    }

    fn kind(&self) -> ElementKind;

    /// Parsed doc comment, if the element has one.
    fn doc_block(&self) -> Option<&DocBlock>;

    fn has_api_tag(&self) -> bool {
        self.doc_block().is_some_and(DocBlock::has_api_tag)
    }

    fn has_internal_tag(&self) -> bool {
        self.doc_block().is_some_and(DocBlock::has_internal_tag)
    }

    /// Doc summary, empty when undocumented.
    fn summary(&self) -> &str {
        self.doc_block().map_or("", |d| d.summary.as_str())
    }
}

/// Method, property or constant as attached to one class.
pub trait ClassElementWrapper: ReflectionWrapper {
    /// Class the element is viewed on (non-owning).
    fn class_name(&self) -> &str;

    /// Class where the element is declared.
    fn declaring_class(&self) -> &str;

    fn visibility(&self) -> Visibility;

    fn is_static(&self) -> bool;

    /// Whether the declaring code is user code (not built-in or vendor).
    fn is_user_defined(&self) -> bool;

    /// Final public API decision, including the attached class's status.
    fn will_be_in_public_api(&self) -> bool;

    /// `Class::name` path identifying the element.
    fn qualified_name(&self) -> String;

    /// Whether the element is declared directly on `class`.
    fn is_local_to(&self, class: &str) -> bool {
        self.declaring_class()
            .trim_start_matches('\\')
            .eq_ignore_ascii_case(class.trim_start_matches('\\'))
    }

    /// Whether the element comes from an ancestor, interface or trait.
    fn is_inherited(&self) -> bool {
        !self.is_local_to(self.class_name())
    }
}

/// Elements with a parameter list.
pub trait HasParameters {
    fn parameters(&self) -> &[ParameterWrapper];

    fn parameter(&self, name: &str) -> Option<&ParameterWrapper> {
        self.parameters().iter().find(|p| p.name == name)
    }
}

/// Elements with a declared or documented return type.
pub trait HasReturnType: ReflectionWrapper {
    fn declared_return_type(&self) -> Option<&str>;

    /// Declared return type, falling back to the `@return` tag.
    fn return_type(&self) -> Option<&str> {
        self.declared_return_type().or_else(|| {
            self.doc_block()
                .and_then(|d| d.first_tag("return"))
                .and_then(DocTag::type_ref)
        })
    }

    /// Description of the `@return` tag.
    fn return_description(&self) -> &str {
        self.doc_block()
            .and_then(|d| d.first_tag("return"))
            .map_or("", DocTag::description)
    }
}

/// Elements that may document thrown exceptions.
pub trait CanThrow: ReflectionWrapper {
    fn throws_tags(&self) -> Vec<&DocTag> {
        self.doc_block()
            .map(|d| d.tags_named("throws").collect())
            .unwrap_or_default()
    }
}

/// Elements with a declared or documented value type.
pub trait HasType: ReflectionWrapper {
    fn declared_type(&self) -> Option<&str>;

    /// Declared type, falling back to the `@var` tag.
    fn type_hint(&self) -> Option<&str> {
        self.declared_type().or_else(|| {
            self.doc_block()
                .and_then(|d| d.first_tag("var"))
                .and_then(DocTag::type_ref)
        })
    }
}

/// Visibility and locality switches for member filtering.
///
/// Every flag is an inclusion switch: a member matches when its visibility,
/// its static-ness and its locality are all enabled. Disabling both flags of
/// a pair matches nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemberFilter {
    pub public: bool,
    pub protected: bool,
    pub private: bool,
    pub static_members: bool,
    pub instance_members: bool,
    /// Declared on the viewed class.
    pub local: bool,
    /// Inherited from an ancestor, interface or trait.
    pub inherited: bool,
}

impl Default for MemberFilter {
    fn default() -> Self {
        Self::ALL
    }
}

impl MemberFilter {
    /// Every member.
    pub const ALL: Self = Self {
        public: true,
        protected: true,
        private: true,
        static_members: true,
        instance_members: true,
        local: true,
        inherited: true,
    };

    /// Public members only.
    pub const PUBLIC: Self = Self {
        protected: false,
        private: false,
        ..Self::ALL
    };

    /// Restrict to the public visibility, keeping the other switches.
    #[must_use]
    pub fn public_only(self) -> Self {
        Self {
            protected: false,
            private: false,
            ..self
        }
    }

    /// Whether `member` matches when viewed on `class`.
    #[must_use]
    pub fn matches<T: ClassElementWrapper + ?Sized>(&self, member: &T, class: &str) -> bool {
        let visibility = match member.visibility() {
            Visibility::Public => self.public,
            Visibility::Protected => self.protected,
            Visibility::Private => self.private,
        };
        let staticness = if member.is_static() {
            self.static_members
        } else {
            self.instance_members
        };
        let locality = if member.is_local_to(class) {
            self.local
        } else {
            self.inherited
        };
        visibility && staticness && locality
    }
}

/// Last `\` segment of a qualified name.
#[must_use]
pub fn short_name(name: &str) -> &str {
    let name = name.trim_end_matches('\\');
    name.rsplit('\\').next().unwrap_or(name)
}

/// Namespace part of a qualified name (empty for global names).
#[must_use]
pub fn namespace_of(name: &str) -> &str {
    name.trim_start_matches('\\')
        .rsplit_once('\\')
        .map_or("", |(ns, _)| ns)
}

/// Parse an optional raw comment.
pub(crate) fn parse_doc(raw: Option<&str>) -> Option<DocBlock> {
    raw.map(DocBlock::parse)
}
