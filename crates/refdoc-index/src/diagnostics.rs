//! Collected non-fatal diagnostics.
//!
//! Broken cross-references and missing documentation never abort a run.
//! They are appended to an [`ErrorCollector`] which is handed explicitly to
//! the components that report them, and summarized at the end of the run.
//!
//! The collector uses interior mutability so that it can be shared by
//! reference within one single-threaded run. It is deliberately not `Sync`.

use std::cell::RefCell;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Diagnostic severity, least severe first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Notice,
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Notice => "notice",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One collected diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CollectedError {
    pub message: String,
    pub severity: Severity,
    /// What was being processed (e.g. `@throws`, `signature`).
    pub context: Option<String>,
    /// Qualified name of the originating element.
    pub element: Option<String>,
    /// Rendered source error, if the diagnostic wraps one.
    pub source: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl CollectedError {
    /// Create a diagnostic stamped with the current time.
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
            context: None,
            element: None,
            source: None,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    #[must_use]
    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.element = Some(element.into());
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: &dyn std::error::Error) -> Self {
        self.source = Some(source.to_string());
        self
    }
}

impl fmt::Display for CollectedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.message
        )?;
        if let Some(element) = &self.element {
            write!(f, " (element: {element})")?;
        }
        if let Some(context) = &self.context {
            write!(f, " (context: {context})")?;
        }
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

/// Append-only diagnostic log for one documentation run.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: RefCell<Vec<CollectedError>>,
}

impl ErrorCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a diagnostic.
    ///
    /// Warnings and errors are also logged.
    pub fn add(&self, error: CollectedError) {
        if error.severity >= Severity::Warning {
            tracing::warn!(
                severity = %error.severity,
                element = error.element.as_deref().unwrap_or(""),
                "{}",
                error.message
            );
        }
        self.errors.borrow_mut().push(error);
    }

    pub fn notice(&self, message: impl Into<String>, element: Option<&str>) {
        self.add(with_optional_element(
            CollectedError::new(Severity::Notice, message),
            element,
        ));
    }

    pub fn warning(&self, message: impl Into<String>, element: Option<&str>) {
        self.add(with_optional_element(
            CollectedError::new(Severity::Warning, message),
            element,
        ));
    }

    pub fn error(&self, message: impl Into<String>, element: Option<&str>) {
        self.add(with_optional_element(
            CollectedError::new(Severity::Error, message),
            element,
        ));
    }

    /// Snapshot of all diagnostics in insertion order.
    #[must_use]
    pub fn errors(&self) -> Vec<CollectedError> {
        self.errors.borrow().clone()
    }

    /// Number of diagnostics with exactly `severity`.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.errors
            .borrow()
            .iter()
            .filter(|e| e.severity == severity)
            .count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.borrow().is_empty()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    /// Remove all diagnostics (between runs).
    pub fn clear(&self) {
        self.errors.borrow_mut().clear();
    }

    /// Diagnostics grouped by severity, most severe first.
    ///
    /// Severities without diagnostics are omitted.
    #[must_use]
    pub fn grouped(&self) -> Vec<(Severity, Vec<CollectedError>)> {
        let errors = self.errors.borrow();
        [Severity::Error, Severity::Warning, Severity::Notice]
            .into_iter()
            .filter_map(|severity| {
                let group: Vec<CollectedError> = errors
                    .iter()
                    .filter(|e| e.severity == severity)
                    .cloned()
                    .collect();
                (!group.is_empty()).then_some((severity, group))
            })
            .collect()
    }

    /// Text report grouped by severity.
    #[must_use]
    pub fn report(&self) -> String {
        let mut out = String::new();
        for (severity, group) in self.grouped() {
            out.push_str(&format!(
                "{} ({})\n",
                severity.as_str().to_uppercase(),
                group.len()
            ));
            for error in group {
                out.push_str(&format!("  {error}\n"));
            }
        }
        out
    }
}

fn with_optional_element(error: CollectedError, element: Option<&str>) -> CollectedError {
    match element {
        Some(element) => error.with_element(element),
        None => error,
    }
}
