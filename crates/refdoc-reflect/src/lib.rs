//! Reflection contracts for the refdoc documentation engine.
//!
//! This crate describes what the documentation core consumes from its
//! surroundings, so that indexing and resolution can be tested without
//! scanning real sources:
//!
//! - [`Reflector`] trait for namespace discovery and element reflection
//! - Raw element records ([`ReflectedClass`], [`ReflectedMethod`], ...)
//! - [`DocBlock`] parser for structured documentation comments
//! - [`MockReflector`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```
//! use refdoc_reflect::DocBlock;
//!
//! let block = DocBlock::parse("/**\n * Adds two numbers.\n *\n * @api\n */");
//! assert_eq!(block.summary, "Adds two numbers.");
//! assert!(block.has_api_tag());
//! ```

mod docblock;
#[cfg(feature = "mock")]
mod mock;
mod model;
mod reflector;

pub use docblock::{DocBlock, DocTag};
#[cfg(feature = "mock")]
pub use mock::MockReflector;
pub use model::{
    ClassKind, ReflectedClass, ReflectedConstant, ReflectedFunction, ReflectedMethod,
    ReflectedParameter, ReflectedProperty, UseImport, Visibility,
};
pub use reflector::{ReflectError, Reflector, is_in_namespace};
