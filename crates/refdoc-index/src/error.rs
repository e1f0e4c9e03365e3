//! Index error types.

use std::fmt;

use refdoc_reflect::ReflectError;

use crate::wrapper::ElementKind;

/// Why an element path could not be resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnresolvableReason {
    /// Path has no `::` separator or an empty class part.
    MalformedPath,
    /// Class part is not in the index.
    UnknownClass,
    /// Class exists but has no such member.
    UnknownMember,
}

impl fmt::Display for UnresolvableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MalformedPath => "expected `Class::member`",
            Self::UnknownClass => "class not found in index",
            Self::UnknownMember => "member not found on class",
        })
    }
}

/// Error returned by index construction and element lookups.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// Reflection backend failed.
    #[error(transparent)]
    Reflect(#[from] ReflectError),
    /// Discovery found nothing to document.
    #[error("No classes or functions found in namespace {0}")]
    EmptyNamespace(String),
    /// Explicit lookup of an element that does not exist.
    #[error("Unresolvable reference `{reference}`: {reason}")]
    UnresolvableReference {
        /// Offending reference string.
        reference: String,
        reason: UnresolvableReason,
    },
    /// Operation invoked on a wrapper variant that cannot support it.
    #[error("Operation `{operation}` is not supported by {kind} wrappers")]
    UnsupportedOperation {
        operation: &'static str,
        kind: ElementKind,
    },
}

impl IndexError {
    pub(crate) fn unresolvable(reference: impl Into<String>, reason: UnresolvableReason) -> Self {
        Self::UnresolvableReference {
            reference: reference.into(),
            reason,
        }
    }

    /// Create an unsupported operation error.
    #[must_use]
    pub fn unsupported(operation: &'static str, kind: ElementKind) -> Self {
        Self::UnsupportedOperation { operation, kind }
    }
}
