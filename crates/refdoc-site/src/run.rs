//! Documentation run: index a namespace, plan pages, render and write them.
//!
//! The template mechanism and the file system are collaborators behind the
//! [`Renderer`] and [`PageWriter`] traits. A render failure is collected as an
//! `ERROR` diagnostic and the page is skipped; a write failure aborts the run.

use std::collections::{BTreeMap, HashSet};
use std::io;

use refdoc_config::{Config, ConfigError, PublicApiKind};
use refdoc_index::{
    ClassWrapper, CodeIndex, CollectedError, ElementKind, ElementRef, ErrorCollector,
    FunctionWrapper, IndexError, MemberFilter, Severity, definition_for,
};
use refdoc_reflect::Reflector;

use crate::formatter::{Formatter, PageView};
use crate::layout::{Page, PageLayout};

/// Template rendering failure for one page.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct RenderFailure {
    message: String,
}

impl RenderFailure {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Template collaborator turning a page view into page content.
pub trait Renderer {
    /// Render `view` for `page`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderFailure`] when the view cannot be rendered.
    fn render(&self, page: &Page, view: &PageView) -> Result<String, RenderFailure>;
}

/// Renders every view as pretty-printed JSON.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, _page: &Page, view: &PageView) -> Result<String, RenderFailure> {
        serde_json::to_string_pretty(view).map_err(|e| RenderFailure::new(e.to_string()))
    }
}

/// File-writing collaborator.
pub trait PageWriter {
    /// Persist `content` at `page.path`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn write(&mut self, page: &Page, content: &str) -> io::Result<()>;
}

/// Keeps written pages in memory, keyed by path.
#[derive(Debug, Default)]
pub struct MemoryWriter {
    pages: BTreeMap<String, String>,
}

impl MemoryWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Content written at `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.pages.get(path).map(String::as_str)
    }

    /// Written page paths, sorted.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl PageWriter for MemoryWriter {
    fn write(&mut self, page: &Page, content: &str) -> io::Result<()> {
        self.pages.insert(page.path.clone(), content.to_owned());
        Ok(())
    }
}

/// Error aborting a documentation run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Index(#[from] IndexError),
    /// Page writer failed.
    #[error("Failed to write page {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Outcome of a completed run.
#[derive(Debug)]
pub struct RunSummary {
    pub pages_written: usize,
    /// Written pages in write order.
    pub pages: Vec<Page>,
    /// Diagnostics collected during the run.
    pub diagnostics: Vec<CollectedError>,
}

impl RunSummary {
    /// Number of diagnostics with exactly `severity`.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }
}

/// One planned page; the summary has no element.
struct PlannedPage<'a> {
    page: Page,
    element: Option<ElementRef<'a>>,
}

/// Documentation generation for one configured namespace.
pub struct DocumentationRun {
    namespace: String,
    definition: String,
    all_classes: bool,
    layout: PageLayout,
    errors: ErrorCollector,
}

impl DocumentationRun {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            namespace: config.namespace.clone(),
            definition: config.api.definition.clone(),
            all_classes: config.api.all_classes,
            layout: PageLayout::from_config(config),
            errors: ErrorCollector::new(),
        }
    }

    /// Diagnostics of the last run.
    #[must_use]
    pub fn errors(&self) -> &ErrorCollector {
        &self.errors
    }

    #[must_use]
    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Run the full pipeline.
    ///
    /// Diagnostics of a previous run are cleared first.
    ///
    /// # Errors
    ///
    /// - [`RunError::Config`] for an unknown public API definition
    /// - [`RunError::Index`] when the namespace cannot be indexed
    /// - [`RunError::Write`] when the writer fails
    pub fn run(
        &self,
        reflector: &dyn Reflector,
        renderer: &dyn Renderer,
        writer: &mut dyn PageWriter,
    ) -> Result<RunSummary, RunError> {
        self.errors.clear();

        let kind: PublicApiKind = self.definition.parse()?;
        let policy = definition_for(kind);
        let index = CodeIndex::build(reflector, &self.namespace, policy.as_ref())?;

        let plan = self.plan(&index)?;
        tracing::debug!(namespace = %self.namespace, pages = plan.len(), "Planned pages");

        let formatter = Formatter::new(
            &index,
            &self.errors,
            &self.layout,
            plan.iter().map(|p| p.page.path.clone()),
        );

        let mut pages = Vec::with_capacity(plan.len());
        for PlannedPage { page, element } in plan {
            let view = match element {
                Some(element) => formatter.view(element)?,
                None => PageView::Summary(formatter.summary_view()),
            };
            if let Some(element) = element
                && element.kind() != ElementKind::Namespace
                && view.summary().is_empty()
            {
                self.errors.add(
                    CollectedError::new(Severity::Notice, "Missing summary")
                        .with_element(element.qualified_name())
                        .with_context("summary"),
                );
            }

            match renderer.render(&page, &view) {
                Ok(content) => {
                    writer
                        .write(&page, &content)
                        .map_err(|source| RunError::Write {
                            path: page.path.clone(),
                            source,
                        })?;
                    pages.push(page);
                }
                Err(failure) => {
                    self.errors.add(
                        CollectedError::new(
                            Severity::Error,
                            format!("Failed to render page {}", page.path),
                        )
                        .with_element(page.element.clone())
                        .with_context("render")
                        .with_source(&failure),
                    );
                }
            }
        }

        tracing::info!(
            namespace = %self.namespace,
            policy = index.policy_name(),
            pages = pages.len(),
            diagnostics = self.errors.len(),
            "Documentation run complete"
        );

        Ok(RunSummary {
            pages_written: pages.len(),
            pages,
            diagnostics: self.errors.errors(),
        })
    }

    /// Summary, namespaces, classes with their members, then functions.
    fn plan<'i>(&self, index: &'i CodeIndex) -> Result<Vec<PlannedPage<'i>>, IndexError> {
        let mut plan = vec![PlannedPage {
            page: self.layout.summary_page(index.namespace()),
            element: None,
        }];
        let mut seen = HashSet::new();
        seen.insert(plan[0].page.path.to_ascii_lowercase());

        let mut push = |element: ElementRef<'i>| -> Result<(), IndexError> {
            let page = self.layout.page(element)?;
            if seen.insert(page.path.to_ascii_lowercase()) {
                plan.push(PlannedPage {
                    page,
                    element: Some(element),
                });
            } else {
                tracing::debug!(path = %page.path, "Skipping duplicate page");
            }
            Ok(())
        };

        for ns in index.namespaces() {
            push(ElementRef::Namespace(ns))?;
        }

        let classes: Vec<&ClassWrapper> = if self.all_classes {
            index.elements().iter().collect()
        } else {
            index.api_classes()
        };
        for class in classes {
            push(ElementRef::Class(class))?;
            let (methods, properties) = if self.all_classes {
                (
                    class.all_user_defined_methods(MemberFilter::PUBLIC),
                    class.all_user_defined_properties(MemberFilter::PUBLIC),
                )
            } else {
                (class.all_api_methods(), class.all_api_properties())
            };
            for method in methods {
                push(ElementRef::Method { class, method })?;
            }
            for property in properties {
                push(ElementRef::Property { class, property })?;
            }
        }

        let functions: Vec<&FunctionWrapper> = if self.all_classes {
            index.functions().iter().filter(|f| f.is_user_defined()).collect()
        } else {
            index.api_functions()
        };
        for function in functions {
            push(ElementRef::Function(function))?;
        }

        Ok(plan)
    }
}
