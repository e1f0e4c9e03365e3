//! End-to-end documentation runs against in-memory fixtures.

use std::io;

use pretty_assertions::assert_eq;
use refdoc_config::Config;
use refdoc_index::{IndexError, Severity};
use refdoc_reflect::{
    ClassKind, MockReflector, ReflectError, ReflectedClass, ReflectedFunction, ReflectedMethod,
    ReflectedParameter, ReflectedProperty,
};
use refdoc_site::{
    DocumentationRun, JsonRenderer, MemoryWriter, Page, PageKind, PageView, PageWriter,
    RenderFailure, Renderer, RunError,
};

const INVOICE: &str = "Acme\\Billing\\Invoice";

fn reflector() -> MockReflector {
    MockReflector::new()
        .with_class(
            ReflectedClass::new(INVOICE, ClassKind::Class)
                .with_doc("/**\n * An invoice.\n *\n * @api\n * @see Missing\\Thing\n */")
                .with_property(
                    ReflectedProperty::new("lines", INVOICE)
                        .with_type("array")
                        .with_doc("/**\n * Invoice lines.\n *\n * @api\n */"),
                )
                .with_method(
                    ReflectedMethod::new("total", INVOICE)
                        .with_return_type("Money")
                        .with_doc("/**\n * Total amount.\n *\n * @api\n */"),
                )
                .with_method(ReflectedMethod::new("recalculate", INVOICE)),
        )
        .with_class(
            ReflectedClass::new("Acme\\Billing\\Money", ClassKind::Class)
                .with_doc("/**\n * Money value.\n *\n * @api\n */"),
        )
        .with_class(
            ReflectedClass::new("Acme\\Billing\\Ledger", ClassKind::Class)
                .with_doc("/**\n * Ledger.\n *\n * @internal\n * @api\n */"),
        )
        .with_class(
            ReflectedClass::new("Acme\\Support\\Cache", ClassKind::Class)
                .with_method(ReflectedMethod::new("flush", "Acme\\Support\\Cache")),
        )
        .with_function(
            ReflectedFunction::new("Acme\\Billing\\format_amount")
                .with_parameter(ReflectedParameter::new("cents", 0).with_type("int"))
                .with_return_type("string")
                .with_doc("/**\n * Format cents.\n *\n * @api\n */"),
        )
}

/// Renders breadcrumbs and signatures, JSON for everything else.
struct OutlineRenderer;

impl Renderer for OutlineRenderer {
    fn render(&self, page: &Page, view: &PageView) -> Result<String, RenderFailure> {
        Ok(match view {
            PageView::Class(class) => format!("{}\n\n{}", class.breadcrumb, class.api_signature),
            PageView::Method(method) => format!(
                "{}\n\n{}\n\nReturns {}",
                method.breadcrumb,
                method.signature,
                method.return_type.as_deref().unwrap_or("nothing")
            ),
            other => JsonRenderer.render(page, other)?,
        })
    }
}

/// Fails on class pages.
struct FailingClassRenderer;

impl Renderer for FailingClassRenderer {
    fn render(&self, page: &Page, view: &PageView) -> Result<String, RenderFailure> {
        if page.kind == PageKind::Class {
            return Err(RenderFailure::new("template missing"));
        }
        JsonRenderer.render(page, view)
    }
}

struct BrokenWriter;

impl PageWriter for BrokenWriter {
    fn write(&mut self, _page: &Page, _content: &str) -> io::Result<()> {
        Err(io::Error::other("disk full"))
    }
}

#[test]
fn test_run_writes_one_page_per_api_element() {
    let run = DocumentationRun::new(&Config::for_namespace("Acme"));
    let mut writer = MemoryWriter::new();

    let summary = run.run(&reflector(), &JsonRenderer, &mut writer).unwrap();

    let paths: Vec<&str> = writer.paths().collect();
    assert_eq!(
        paths,
        vec![
            "/ref/Acme/Billing/Invoice/Invoice.md",
            "/ref/Acme/Billing/Invoice/methods/total.md",
            "/ref/Acme/Billing/Invoice/properties/lines.md",
            "/ref/Acme/Billing/Money/Money.md",
            "/ref/Acme/Billing/functions/format_amount.md",
            "/ref/Acme/Billing/index.md",
            "/ref/Acme/Support/index.md",
            "/ref/Acme/index.md",
            "/ref/api.md",
        ]
    );
    assert_eq!(summary.pages_written, 9);
    assert_eq!(summary.pages[0].kind, PageKind::Summary);
    assert_eq!(summary.count(Severity::Notice), 0);
}

#[test]
fn test_rendered_pages_link_relative_to_their_directory() {
    let run = DocumentationRun::new(&Config::for_namespace("Acme"));
    let mut writer = MemoryWriter::new();

    run.run(&reflector(), &OutlineRenderer, &mut writer).unwrap();

    assert_eq!(
        writer.get("/ref/Acme/Billing/Invoice/methods/total.md").unwrap(),
        "[Acme](../../../index.md) / [Billing](../../index.md) / [Invoice](../Invoice.md)\n\n\
         public function total(): Money\n\n\
         Returns [Money](../../Money/Money.md)"
    );
    assert_eq!(
        writer.get("/ref/Acme/Billing/Invoice/Invoice.md").unwrap(),
        "[Acme](../../index.md) / [Billing](../index.md) / **Invoice**\n\n\
         class Invoice\n{\n    public array $lines;\n\n    public function total(): Money;\n}"
    );
}

#[test]
fn test_summary_page_lists_api_classes() {
    let run = DocumentationRun::new(&Config::for_namespace("Acme"));
    let mut writer = MemoryWriter::new();

    run.run(&reflector(), &JsonRenderer, &mut writer).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(writer.get("/ref/api.md").unwrap()).unwrap();
    let classes: Vec<&str> = json["classes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["text"].as_str().unwrap())
        .collect();
    assert_eq!(classes, vec!["Acme\\Billing\\Invoice", "Acme\\Billing\\Money"]);
    assert_eq!(json["functions"][0]["link"], "Acme/Billing/functions/format_amount.md");
}

#[test]
fn test_dangling_see_is_collected_not_fatal() {
    let run = DocumentationRun::new(&Config::for_namespace("Acme"));
    let mut writer = MemoryWriter::new();

    let summary = run.run(&reflector(), &JsonRenderer, &mut writer).unwrap();

    let warnings: Vec<_> = summary
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].message,
        "Unresolved reference `Acme\\Billing\\Missing\\Thing`"
    );
    assert_eq!(warnings[0].element.as_deref(), Some(INVOICE));
    assert_eq!(warnings[0].context.as_deref(), Some("@see"));
    assert!(!summary.has_errors());
}

#[test]
fn test_external_parent_and_exception_raise_no_warnings() {
    let reflector = MockReflector::new().with_class(
        ReflectedClass::new("Acme\\Failure", ClassKind::Class)
            .with_doc("/**\n * Domain failure.\n *\n * @api\n */")
            .with_parent("Exception")
            .with_method(
                ReflectedMethod::new("describe", "Acme\\Failure")
                    .with_return_type("string")
                    .with_doc(
                        "/**\n * Human readable reason.\n *\n * @api\n * @throws \\LogicException When unset\n */",
                    ),
            )
            .with_method(ReflectedMethod::new("getMessage", "Exception").builtin()),
    );
    let run = DocumentationRun::new(&Config::for_namespace("Acme"));
    let mut writer = MemoryWriter::new();

    let summary = run.run(&reflector, &JsonRenderer, &mut writer).unwrap();

    assert!(summary.diagnostics.is_empty());
    let class: serde_json::Value =
        serde_json::from_str(writer.get("/ref/Acme/Failure/Failure.md").unwrap()).unwrap();
    assert_eq!(class["parent"]["markdown"], "`Exception`");
    let method: serde_json::Value =
        serde_json::from_str(writer.get("/ref/Acme/Failure/methods/describe.md").unwrap())
            .unwrap();
    assert_eq!(method["throws"][0]["markdown"], "`\\LogicException`");
    assert_eq!(method["throws"][0]["description"], "When unset");
    assert!(writer.get("/ref/Acme/Failure/methods/getMessage.md").is_none());
}

#[test]
fn test_diagnostics_are_cleared_between_runs() {
    let run = DocumentationRun::new(&Config::for_namespace("Acme"));

    run.run(&reflector(), &JsonRenderer, &mut MemoryWriter::new())
        .unwrap();
    let second = run
        .run(&reflector(), &JsonRenderer, &mut MemoryWriter::new())
        .unwrap();

    assert_eq!(second.count(Severity::Warning), 1);
    assert_eq!(run.errors().len(), second.diagnostics.len());
}

#[test]
fn test_unknown_definition_fails_before_writing() {
    let mut config = Config::for_namespace("Acme");
    config.api.definition = "everything".to_owned();
    let run = DocumentationRun::new(&config);
    let mut writer = MemoryWriter::new();

    let err = run.run(&reflector(), &JsonRenderer, &mut writer).unwrap_err();

    assert!(matches!(err, RunError::Config(_)));
    assert!(writer.is_empty());
}

#[test]
fn test_empty_namespace_halts_run() {
    let run = DocumentationRun::new(&Config::for_namespace("Nowhere"));

    let err = run
        .run(&reflector(), &JsonRenderer, &mut MemoryWriter::new())
        .unwrap_err();

    assert!(matches!(err, RunError::Index(IndexError::EmptyNamespace(ns)) if ns == "Nowhere"));
}

#[test]
fn test_unreadable_namespace_halts_run() {
    let reflector = reflector().with_missing_namespace("Acme");
    let run = DocumentationRun::new(&Config::for_namespace("Acme"));

    let err = run
        .run(&reflector, &JsonRenderer, &mut MemoryWriter::new())
        .unwrap_err();

    assert!(matches!(
        err,
        RunError::Index(IndexError::Reflect(ReflectError::NamespaceNotFound(_)))
    ));
}

#[test]
fn test_render_failure_skips_page_and_collects_error() {
    let run = DocumentationRun::new(&Config::for_namespace("Acme"));
    let mut writer = MemoryWriter::new();

    let summary = run
        .run(&reflector(), &FailingClassRenderer, &mut writer)
        .unwrap();

    assert!(writer.get("/ref/Acme/Billing/Invoice/Invoice.md").is_none());
    assert!(writer.get("/ref/Acme/Billing/Invoice/methods/total.md").is_some());
    assert_eq!(summary.count(Severity::Error), 2);
    let error = summary
        .diagnostics
        .iter()
        .find(|d| d.severity == Severity::Error)
        .unwrap();
    assert_eq!(error.source.as_deref(), Some("template missing"));
    assert_eq!(error.context.as_deref(), Some("render"));
}

#[test]
fn test_writer_failure_aborts_run() {
    let run = DocumentationRun::new(&Config::for_namespace("Acme"));

    let err = run
        .run(&reflector(), &JsonRenderer, &mut BrokenWriter)
        .unwrap_err();

    assert_eq!(err.to_string(), "Failed to write page /ref/api.md: disk full");
}

#[test]
fn test_all_classes_documents_non_api_classes() {
    let mut config = Config::for_namespace("Acme");
    config.api.all_classes = true;
    let run = DocumentationRun::new(&config);
    let mut writer = MemoryWriter::new();

    let summary = run.run(&reflector(), &JsonRenderer, &mut writer).unwrap();

    assert!(writer.get("/ref/Acme/Support/Cache/Cache.md").is_some());
    assert!(writer.get("/ref/Acme/Support/Cache/methods/flush.md").is_some());
    assert!(writer.get("/ref/Acme/Billing/Ledger/Ledger.md").is_some());
    let missing: Vec<&str> = summary
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Notice)
        .filter_map(|d| d.element.as_deref())
        .collect();
    assert_eq!(
        missing,
        vec![
            "Acme\\Billing\\Invoice::recalculate()",
            "Acme\\Support\\Cache",
            "Acme\\Support\\Cache::flush()",
        ]
    );
}

#[test]
fn test_publicly_accessible_definition() {
    let mut config = Config::for_namespace("Acme");
    config.api.definition = "is_publicly_accessible".to_owned();
    let run = DocumentationRun::new(&config);
    let mut writer = MemoryWriter::new();

    run.run(&reflector(), &JsonRenderer, &mut writer).unwrap();

    assert!(writer.get("/ref/Acme/Support/Cache/Cache.md").is_some());
    assert!(writer.get("/ref/Acme/Billing/Invoice/methods/recalculate.md").is_some());
    // Internal wins regardless of the definition.
    assert!(writer.get("/ref/Acme/Billing/Ledger/Ledger.md").is_none());
}
