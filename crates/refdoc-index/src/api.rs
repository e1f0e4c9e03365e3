//! Public API classification policies.
//!
//! A [`PublicApiDefinition`] decides, per element, whether the element is
//! meant for external consumers. The decision is taken once per element
//! while the [`CodeIndex`](crate::CodeIndex) is built.

use refdoc_config::PublicApiKind;
use refdoc_reflect::Visibility;

use crate::wrapper::{
    ClassElementWrapper, ClassWrapper, ConstantWrapper, FunctionWrapper, MethodWrapper,
    PropertyWrapper, ReflectionWrapper,
};

/// Element handed to a policy.
#[derive(Clone, Copy, Debug)]
pub enum ApiElement<'a> {
    Class(&'a ClassWrapper),
    Method(&'a MethodWrapper),
    Property(&'a PropertyWrapper),
    Constant(&'a ConstantWrapper),
    Function(&'a FunctionWrapper),
}

impl ApiElement<'_> {
    fn wrapper(&self) -> &dyn ReflectionWrapper {
        match *self {
            Self::Class(w) => w,
            Self::Method(w) => w,
            Self::Property(w) => w,
            Self::Constant(w) => w,
            Self::Function(w) => w,
        }
    }

    #[must_use]
    pub fn has_api_tag(&self) -> bool {
        self.wrapper().has_api_tag()
    }

    #[must_use]
    pub fn has_internal_tag(&self) -> bool {
        self.wrapper().has_internal_tag()
    }

    /// User-defined flag; properties and constants report their declaring
    /// class's flag.
    #[must_use]
    pub fn is_user_defined(&self) -> bool {
        match *self {
            Self::Class(w) => w.is_user_defined(),
            Self::Method(w) => w.is_user_defined(),
            Self::Property(w) => w.is_user_defined(),
            Self::Constant(w) => w.is_user_defined(),
            Self::Function(w) => w.is_user_defined(),
        }
    }

    /// Member visibility; classes and functions are public.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        match *self {
            Self::Class(_) | Self::Function(_) => Visibility::Public,
            Self::Method(w) => w.visibility(),
            Self::Property(w) => w.visibility(),
            Self::Constant(w) => w.visibility(),
        }
    }
}

/// Policy deciding public API membership.
pub trait PublicApiDefinition {
    /// Configuration name of the policy.
    fn name(&self) -> &'static str;

    /// Whether `element` is part of the public API on its own.
    ///
    /// For members this ignores the attached class; the index combines both.
    fn is_part_of_public_api(&self, element: ApiElement<'_>) -> bool;
}

/// Checks shared by every policy.
///
/// Internal-tagged elements are always rejected, as are built-in and vendor
/// classes, methods and functions.
#[must_use]
pub fn base_exclusion(element: ApiElement<'_>) -> bool {
    if element.has_internal_tag() {
        return true;
    }
    match element {
        ApiElement::Class(_) | ApiElement::Method(_) | ApiElement::Function(_) => {
            !element.is_user_defined()
        }
        ApiElement::Property(_) | ApiElement::Constant(_) => false,
    }
}

/// Elements explicitly marked with `@api`.
///
/// A class without the tag is still public API when any of its own public,
/// user-defined, non-internal members carries `@api`. Inherited members do
/// not count.
#[derive(Clone, Copy, Debug, Default)]
pub struct HasTagApi;

impl HasTagApi {
    fn is_api_member<T: ClassElementWrapper>(class: &ClassWrapper, member: &T) -> bool {
        member.is_local_to(class.name())
            && member.visibility() == Visibility::Public
            && member.is_user_defined()
            && member.has_api_tag()
            && !member.has_internal_tag()
    }
}

impl PublicApiDefinition for HasTagApi {
    fn name(&self) -> &'static str {
        PublicApiKind::HasTagApi.as_str()
    }

    fn is_part_of_public_api(&self, element: ApiElement<'_>) -> bool {
        if base_exclusion(element) || !element.is_user_defined() {
            return false;
        }
        if element.has_api_tag() {
            return true;
        }
        match element {
            ApiElement::Class(class) => {
                class.constants().iter().any(|c| Self::is_api_member(class, c))
                    || class.properties().iter().any(|p| Self::is_api_member(class, p))
                    || class.methods().iter().any(|m| Self::is_api_member(class, m))
            }
            _ => false,
        }
    }
}

/// Every user-defined element reachable from outside.
#[derive(Clone, Copy, Debug, Default)]
pub struct IsPubliclyAccessible;

impl PublicApiDefinition for IsPubliclyAccessible {
    fn name(&self) -> &'static str {
        PublicApiKind::IsPubliclyAccessible.as_str()
    }

    fn is_part_of_public_api(&self, element: ApiElement<'_>) -> bool {
        if base_exclusion(element) || !element.is_user_defined() {
            return false;
        }
        element.visibility() == Visibility::Public
    }
}

/// Policy implementation for a configured kind.
#[must_use]
pub fn definition_for(kind: PublicApiKind) -> Box<dyn PublicApiDefinition> {
    match kind {
        PublicApiKind::HasTagApi => Box::new(HasTagApi),
        PublicApiKind::IsPubliclyAccessible => Box::new(IsPubliclyAccessible),
    }
}
