//! Code index and cross-reference resolution for refdoc.
//!
//! This crate provides:
//! - [`CodeIndex`]: every class and function of one namespace, classified
//!   by a [`PublicApiDefinition`]
//! - Element wrappers ([`ClassWrapper`], [`MethodWrapper`], ...) with member
//!   filtering and class signatures
//! - [`Resolver`]: `@see`, `@throws` and type reference resolution
//! - [`ErrorCollector`]: non-fatal diagnostics of one run
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use refdoc_index::{CodeIndex, ErrorCollector, HasTagApi, Resolver, Scope};
//! use refdoc_reflect::{ClassKind, MockReflector, ReflectedClass};
//!
//! let reflector = MockReflector::new().with_class(
//!     ReflectedClass::new("Acme\\Invoice", ClassKind::Class).with_doc("/** @api */"),
//! );
//! let index = CodeIndex::build(&reflector, "Acme", &HasTagApi)?;
//!
//! let errors = ErrorCollector::new();
//! let resolver = Resolver::new(&index, &errors);
//! let resolution = resolver.resolve("Invoice", &Scope::for_namespace("Acme"), "example");
//! assert!(resolution.destination().is_some());
//! # Ok(())
//! # }
//! ```

mod api;
mod diagnostics;
mod error;
mod index;
mod namespace;
mod resolver;
mod signature;
mod wrapper;

pub use api::{
    ApiElement, HasTagApi, IsPubliclyAccessible, PublicApiDefinition, base_exclusion,
    definition_for,
};
pub use diagnostics::{CollectedError, ErrorCollector, Severity};
pub use error::{IndexError, UnresolvableReason};
pub use index::{CodeIndex, ElementRef};
pub use namespace::{HierarchySegment, NamespaceWrapper};
pub use resolver::{Resolution, Resolver, Scope, TypeSegment, is_builtin_type};
pub use signature::{
    class_header, constant as constant_signature, method as method_signature,
    property as property_signature,
};
pub use wrapper::{
    CallableRef, CanThrow, ClassElementWrapper, ClassWrapper, ConstantWrapper, ElementKind,
    FunctionWrapper, HasParameters, HasReturnType, HasType, MemberFilter, MethodWrapper,
    ParameterWrapper, PropertyWrapper, ReflectionWrapper, namespace_of, short_name,
};
