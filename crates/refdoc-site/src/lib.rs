//! Documentation pages for refdoc.
//!
//! This crate provides:
//! - [`PageLayout`]: page path of every documented element
//! - [`UrlLinker`]: relative links between pages
//! - [`Navigation`]: breadcrumbs through the namespace hierarchy
//! - [`Formatter`]: serializable page views for the template collaborator
//! - [`DocumentationRun`]: index, plan, render and write in one pass
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use refdoc_config::Config;
//! use refdoc_reflect::{ClassKind, MockReflector, ReflectedClass};
//! use refdoc_site::{DocumentationRun, JsonRenderer, MemoryWriter};
//!
//! let reflector = MockReflector::new().with_class(
//!     ReflectedClass::new("Acme\\Invoice", ClassKind::Class).with_doc("/** @api */"),
//! );
//! let run = DocumentationRun::new(&Config::for_namespace("Acme"));
//! let mut writer = MemoryWriter::new();
//!
//! let summary = run.run(&reflector, &JsonRenderer, &mut writer)?;
//! assert!(writer.get("/ref/Acme/Invoice/Invoice.md").is_some());
//! assert_eq!(summary.pages_written, writer.len());
//! # Ok(())
//! # }
//! ```

mod formatter;
mod layout;
mod linker;
mod navigation;
mod run;

pub use formatter::{
    ClassView, FormattedMember, FormattedParameter, FormattedReference, Formatter, FunctionView,
    LinkRenderer, MemberView, NamespaceView, PageView, SummaryView,
};
pub use layout::{Page, PageKind, PageLayout, page_directory};
pub use linker::{UrlLinker, normalize_dir};
pub use navigation::{BREADCRUMB_SEPARATOR, BreadcrumbItem, Navigation};
pub use run::{
    DocumentationRun, JsonRenderer, MemoryWriter, PageWriter, RenderFailure, Renderer, RunError,
    RunSummary,
};
