//! Cross-reference resolution.
//!
//! Turns textual references from doc tags (`@see`, `@throws`) and type
//! expressions into indexed elements. A reference ends up in one of three
//! states:
//!
//! - **Internal**: found in the index.
//! - **Dangling**: not found although it names something inside the indexed
//!   root namespace (or a missing member of an indexed class). A `WARNING`
//!   diagnostic is collected.
//! - **External**: outside the indexed namespace (built-in types, vendor
//!   classes). No diagnostic.
//!
//! Resolution never fails.

use std::cell::RefCell;
use std::collections::HashSet;

use refdoc_reflect::{DocBlock, DocTag, UseImport};

use crate::diagnostics::{CollectedError, ErrorCollector, Severity};
use crate::index::{CodeIndex, ElementRef};
use crate::wrapper::{ClassWrapper, FunctionWrapper, MethodWrapper, ReflectionWrapper};

/// Types that never name a class.
const BUILTIN_TYPES: &[&str] = &[
    "array",
    "array-key",
    "bool",
    "boolean",
    "callable",
    "callable-string",
    "class-string",
    "double",
    "false",
    "float",
    "int",
    "integer",
    "iterable",
    "list",
    "mixed",
    "never",
    "non-empty-array",
    "non-empty-list",
    "non-empty-string",
    "null",
    "numeric",
    "numeric-string",
    "object",
    "positive-int",
    "negative-int",
    "resource",
    "scalar",
    "string",
    "true",
    "void",
];

/// Whether `name` is a scalar or pseudo type.
#[must_use]
pub fn is_builtin_type(name: &str) -> bool {
    BUILTIN_TYPES.iter().any(|t| t.eq_ignore_ascii_case(name))
}

fn is_url(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

/// Naming context a reference is written in.
#[derive(Clone, Copy, Debug, Default)]
pub struct Scope<'a> {
    /// Namespace of the documented element.
    pub namespace: &'a str,
    /// Class for `self`, `static`, `$this` and class-less member references.
    pub class: Option<&'a str>,
    /// Parent class for `parent`.
    pub parent: Option<&'a str>,
    /// `use` imports of the declaring file.
    pub imports: &'a [UseImport],
}

impl<'a> Scope<'a> {
    #[must_use]
    pub fn for_class(class: &'a ClassWrapper) -> Self {
        Self {
            namespace: class.namespace(),
            class: Some(class.name()),
            parent: class.parent(),
            imports: class.imports(),
        }
    }

    #[must_use]
    pub fn for_function(function: &'a FunctionWrapper) -> Self {
        Self {
            namespace: function.namespace(),
            class: None,
            parent: None,
            imports: function.imports(),
        }
    }

    #[must_use]
    pub fn for_namespace(namespace: &'a str) -> Self {
        Self {
            namespace,
            ..Self::default()
        }
    }
}

/// Outcome of resolving one reference.
#[derive(Clone, Debug)]
pub enum Resolution<'a> {
    Internal(ElementRef<'a>),
    /// Qualified name that should exist in the index but does not.
    Dangling(String),
    /// Reference outside the index, as written.
    External(String),
    Url(String),
}

impl<'a> Resolution<'a> {
    /// Indexed destination, if any.
    #[must_use]
    pub fn destination(&self) -> Option<ElementRef<'a>> {
        match self {
            Self::Internal(element) => Some(*element),
            Self::Dangling(_) | Self::External(_) | Self::Url(_) => None,
        }
    }

    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }

    #[must_use]
    pub fn is_dangling(&self) -> bool {
        matches!(self, Self::Dangling(_))
    }
}

/// One piece of a resolved type expression.
#[derive(Clone, Debug)]
pub enum TypeSegment<'a> {
    /// Separators, parentheses and spacing, as written.
    Text(String),
    /// One type with its decorations.
    Type {
        /// `?` nullable marker.
        prefix: String,
        /// Name that was resolved.
        name: String,
        /// `[]`, generics or array shapes following the name.
        suffix: String,
        resolution: Resolution<'a>,
    },
}

impl TypeSegment<'_> {
    /// Source text of the segment.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Type {
                prefix,
                name,
                suffix,
                ..
            } => format!("{prefix}{name}{suffix}"),
        }
    }
}

/// Split a type expression at top-level `|`, `&` and parentheses.
///
/// Joining the returned pieces yields the input. Pieces flagged `true` are
/// type names, `false` are separators and spacing.
fn split_type_expression(expr: &str) -> Vec<(bool, String)> {
    fn flush(current: &mut String, pieces: &mut Vec<(bool, String)>) {
        if current.is_empty() {
            return;
        }
        let trimmed_start = current.trim_start();
        let leading = &current[..current.len() - trimmed_start.len()];
        let core = trimmed_start.trim_end();
        let trailing = &trimmed_start[core.len()..];
        push_text(pieces, leading);
        if !core.is_empty() {
            pieces.push((true, core.to_owned()));
        }
        push_text(pieces, trailing);
        current.clear();
    }

    let mut pieces: Vec<(bool, String)> = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for c in expr.chars() {
        match c {
            '<' | '{' | '[' => {
                depth += 1;
                current.push(c);
            }
            '>' | '}' | ']' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            '|' | '&' | '(' | ')' if depth == 0 => {
                flush(&mut current, &mut pieces);
                push_text(&mut pieces, &c.to_string());
            }
            _ => current.push(c),
        }
    }
    flush(&mut current, &mut pieces);
    pieces
}

fn push_text(pieces: &mut Vec<(bool, String)>, text: &str) {
    if text.is_empty() {
        return;
    }
    match pieces.last_mut() {
        Some((false, last)) => last.push_str(text),
        _ => pieces.push((false, text.to_owned())),
    }
}

/// Split `?Name[]` into prefix, name and suffix.
fn split_decorations(piece: &str) -> (&str, &str, &str) {
    let (prefix, rest) = match piece.strip_prefix('?') {
        Some(rest) => ("?", rest),
        None => ("", piece),
    };
    let end = rest.find(['<', '{', '[']).unwrap_or(rest.len());
    (prefix, &rest[..end], &rest[end..])
}

/// Resolves references against one index, collecting dangling ones.
///
/// A dangling reference is reported once per origin and context, however
/// often it is resolved.
pub struct Resolver<'a> {
    index: &'a CodeIndex,
    errors: &'a ErrorCollector,
    reported: RefCell<HashSet<(String, String, String)>>,
}

impl<'a> Resolver<'a> {
    #[must_use]
    pub fn new(index: &'a CodeIndex, errors: &'a ErrorCollector) -> Self {
        Self {
            index,
            errors,
            reported: RefCell::new(HashSet::new()),
        }
    }

    #[must_use]
    pub fn index(&self) -> &'a CodeIndex {
        self.index
    }

    /// Fully-qualify a class or function name written in `scope`.
    ///
    /// Leading `\` marks an already qualified name. `self`, `static` and
    /// `$this` name the scope class, `parent` its parent. Other names resolve
    /// their first segment against the imports, then fall back to the scope
    /// namespace. Built-in types are returned unchanged.
    #[must_use]
    pub fn qualify(&self, reference: &str, scope: &Scope<'_>) -> String {
        qualify(reference, scope)
    }

    /// Resolve a class, function or `Class::member` reference.
    pub fn resolve(&self, reference: &str, scope: &Scope<'_>, origin: &str) -> Resolution<'a> {
        self.resolve_in(reference, scope, origin, "reference")
    }

    /// Resolve the target of a `@see` tag.
    ///
    /// Returns `None` when the tag names nothing.
    pub fn resolve_see(
        &self,
        tag: &DocTag,
        scope: &Scope<'_>,
        origin: &str,
    ) -> Option<Resolution<'a>> {
        let reference = tag.type_ref()?;
        Some(self.resolve_in(reference, scope, origin, "@see"))
    }

    /// Resolve the exception classes of a `@throws` tag.
    ///
    /// Unions such as `A|B` yield one [`TypeSegment::Type`] per class.
    pub fn resolve_throws(
        &self,
        tag: &DocTag,
        scope: &Scope<'_>,
        origin: &str,
    ) -> Option<Vec<TypeSegment<'a>>> {
        let reference = tag.type_ref()?;
        Some(self.resolve_types_in(reference, scope, origin, "@throws"))
    }

    /// Resolve each type of a union or intersection expression.
    ///
    /// Separators and their spacing are kept as [`TypeSegment::Text`].
    pub fn resolve_type_expression(
        &self,
        expr: &str,
        scope: &Scope<'_>,
        origin: &str,
    ) -> Vec<TypeSegment<'a>> {
        self.resolve_types_in(expr, scope, origin, "type")
    }

    fn resolve_types_in(
        &self,
        expr: &str,
        scope: &Scope<'_>,
        origin: &str,
        context: &str,
    ) -> Vec<TypeSegment<'a>> {
        split_type_expression(expr)
            .into_iter()
            .map(|(is_type, piece)| {
                if !is_type {
                    return TypeSegment::Text(piece);
                }
                let (prefix, name, suffix) = split_decorations(&piece);
                if name.is_empty() {
                    return TypeSegment::Text(piece);
                }
                let resolution = self.resolve_type_name(name, scope, origin, context);
                TypeSegment::Type {
                    prefix: prefix.to_owned(),
                    name: name.to_owned(),
                    suffix: suffix.to_owned(),
                    resolution,
                }
            })
            .collect()
    }

    /// Effective documentation of `method` on `class`.
    ///
    /// Undocumented methods and methods deferring with `{@inheritDoc}` take
    /// the documentation of the nearest indexed ancestor declaring the same
    /// method.
    #[must_use]
    pub fn resolve_inherited_doc(
        &self,
        class: &'a ClassWrapper,
        method: &'a MethodWrapper,
    ) -> Option<&'a DocBlock> {
        match method.doc_block() {
            Some(doc) if !doc.inherits_doc() && !doc.is_empty() => Some(doc),
            own => self
                .index
                .inherited_doc_block(class, method.name())
                .or(own),
        }
    }

    /// Type names carry no member part.
    fn resolve_type_name(
        &self,
        name: &str,
        scope: &Scope<'_>,
        origin: &str,
        context: &str,
    ) -> Resolution<'a> {
        if is_builtin_type(name) {
            return Resolution::External(name.to_owned());
        }
        let qualified = qualify(name, scope);
        if let Some(class) = self.index.get_class_wrapper(&qualified) {
            return Resolution::Internal(ElementRef::Class(class));
        }
        if self.index.is_within_root(&qualified) {
            self.report_dangling(&qualified, origin, context);
            return Resolution::Dangling(qualified);
        }
        Resolution::External(name.to_owned())
    }

    fn resolve_in(
        &self,
        reference: &str,
        scope: &Scope<'_>,
        origin: &str,
        context: &str,
    ) -> Resolution<'a> {
        let reference = reference.trim();
        if is_url(reference) {
            return Resolution::Url(reference.to_owned());
        }

        let (class_part, member) = match reference.split_once("::") {
            Some((class_part, member)) => (class_part, Some(member)),
            None if is_member_syntax(reference) && scope.class.is_some() => ("", Some(reference)),
            None => (reference, None),
        };

        if member.is_none() && is_builtin_type(class_part) {
            return Resolution::External(reference.to_owned());
        }

        let qualified = if class_part.is_empty() {
            scope.class.unwrap_or_default().to_owned()
        } else {
            qualify(class_part, scope)
        };

        if let Some(class) = self.index.get_class_wrapper(&qualified) {
            let Some(member) = member else {
                return Resolution::Internal(ElementRef::Class(class));
            };
            if let Some(element) = CodeIndex::member(class, member) {
                return Resolution::Internal(element);
            }
            // `name()` without class part may also name a function.
            if class_part.is_empty()
                && let Some(function) = self.index.get_function(&qualify(member, scope))
            {
                return Resolution::Internal(ElementRef::Function(function));
            }
            let missing = format!("{}::{member}", class.name());
            self.report_dangling(&missing, origin, context);
            return Resolution::Dangling(missing);
        }

        if member.is_none()
            && let Some(function) = self.index.get_function(&qualified)
        {
            return Resolution::Internal(ElementRef::Function(function));
        }

        if self.index.is_within_root(&qualified) {
            let missing = match member {
                Some(member) => format!("{qualified}::{member}"),
                None => qualified,
            };
            self.report_dangling(&missing, origin, context);
            return Resolution::Dangling(missing);
        }
        Resolution::External(reference.to_owned())
    }

    fn report_dangling(&self, missing: &str, origin: &str, context: &str) {
        let key = (missing.to_owned(), origin.to_owned(), context.to_owned());
        if !self.reported.borrow_mut().insert(key) {
            return;
        }
        self.errors.add(
            CollectedError::new(Severity::Warning, format!("Unresolved reference `{missing}`"))
                .with_element(origin)
                .with_context(context),
        );
    }
}

/// `m()` or `$p` written without a class part.
fn is_member_syntax(reference: &str) -> bool {
    reference.starts_with('$') || (reference.ends_with("()") && !reference.contains('\\'))
}

fn qualify(reference: &str, scope: &Scope<'_>) -> String {
    let reference = reference.trim();
    if let Some(qualified) = reference.strip_prefix('\\') {
        return qualified.to_owned();
    }
    if is_builtin_type(reference) {
        return reference.to_owned();
    }

    let lower = reference.to_ascii_lowercase();
    match lower.as_str() {
        "self" | "static" | "$this" => {
            return scope.class.unwrap_or(reference).to_owned();
        }
        "parent" => return scope.parent.unwrap_or(reference).to_owned(),
        _ => {}
    }

    let (first, rest) = match reference.split_once('\\') {
        Some((first, rest)) => (first, Some(rest)),
        None => (reference, None),
    };
    if let Some(import) = scope
        .imports
        .iter()
        .find(|i| i.alias.eq_ignore_ascii_case(first))
    {
        return match rest {
            Some(rest) => format!("{}\\{rest}", import.target),
            None => import.target.clone(),
        };
    }

    if scope.namespace.is_empty() {
        reference.to_owned()
    } else {
        format!("{}\\{reference}", scope.namespace)
    }
}

#[cfg(test)]
mod tests {
    use refdoc_reflect::{
        ClassKind, MockReflector, ReflectedClass, ReflectedConstant, ReflectedFunction,
        ReflectedMethod, ReflectedProperty,
    };

    use super::*;
    use crate::api::HasTagApi;
    use crate::wrapper::ElementKind;

    fn index() -> CodeIndex {
        let reflector = MockReflector::new()
            .with_class(
                ReflectedClass::new("Acme\\Billing\\Invoice", ClassKind::Class)
                    .with_parent("Acme\\Billing\\Document")
                    .with_import(UseImport::new("Acme\\Shared\\Money"))
                    .with_import(UseImport::aliased("Acme\\Shared", "Common"))
                    .with_constant(ReflectedConstant::new("STATUS", "Acme\\Billing\\Invoice"))
                    .with_property(ReflectedProperty::new("lines", "Acme\\Billing\\Invoice"))
                    .with_method(
                        ReflectedMethod::new("total", "Acme\\Billing\\Invoice")
                            .with_doc("/** {@inheritDoc} */"),
                    )
                    .with_method(ReflectedMethod::new("undocumented", "Acme\\Billing\\Invoice")),
            )
            .with_class(
                ReflectedClass::new("Acme\\Billing\\Document", ClassKind::Class)
                    .abstract_class()
                    .with_interface("Acme\\Shared\\Totalable")
                    .with_method(
                        ReflectedMethod::new("total", "Acme\\Billing\\Document")
                            .with_doc("/** {@inheritDoc} */"),
                    ),
            )
            .with_class(
                ReflectedClass::new("Acme\\Shared\\Totalable", ClassKind::Interface)
                    .with_method(
                        ReflectedMethod::new("total", "Acme\\Shared\\Totalable")
                            .abstract_method()
                            .with_doc("/** Total amount in cents. */"),
                    )
                    .with_method(
                        ReflectedMethod::new("undocumented", "Acme\\Shared\\Totalable")
                            .with_doc("/** Declared on the interface. */"),
                    ),
            )
            .with_class(ReflectedClass::new("Acme\\Shared\\Money", ClassKind::Class))
            .with_class(ReflectedClass::new("Acme\\Shared\\Currency", ClassKind::Enum))
            .with_function(ReflectedFunction::new("Acme\\Billing\\format"));
        CodeIndex::build(&reflector, "Acme", &HasTagApi).unwrap()
    }

    fn invoice_scope(index: &CodeIndex) -> Scope<'_> {
        Scope::for_class(index.get_class_wrapper("Acme\\Billing\\Invoice").unwrap())
    }

    #[test]
    fn test_qualify_rules() {
        let index = index();
        let errors = ErrorCollector::new();
        let resolver = Resolver::new(&index, &errors);
        let scope = invoice_scope(&index);

        assert_eq!(resolver.qualify("\\RuntimeException", &scope), "RuntimeException");
        assert_eq!(resolver.qualify("Money", &scope), "Acme\\Shared\\Money");
        assert_eq!(resolver.qualify("Common\\Currency", &scope), "Acme\\Shared\\Currency");
        assert_eq!(resolver.qualify("Document", &scope), "Acme\\Billing\\Document");
        assert_eq!(resolver.qualify("self", &scope), "Acme\\Billing\\Invoice");
        assert_eq!(resolver.qualify("$this", &scope), "Acme\\Billing\\Invoice");
        assert_eq!(resolver.qualify("parent", &scope), "Acme\\Billing\\Document");
        assert_eq!(resolver.qualify("int", &scope), "int");
    }

    #[test]
    fn test_resolve_internal_class_and_members() {
        let index = index();
        let errors = ErrorCollector::new();
        let resolver = Resolver::new(&index, &errors);
        let scope = invoice_scope(&index);

        let class = resolver.resolve("Money", &scope, "origin");
        let method = resolver.resolve("Invoice::total()", &scope, "origin");
        let property = resolver.resolve("self::$lines", &scope, "origin");
        let constant = resolver.resolve("Invoice::STATUS", &scope, "origin");
        let function = resolver.resolve("format()", &Scope::for_namespace("Acme\\Billing"), "origin");

        assert_eq!(class.destination().unwrap().name(), "Acme\\Shared\\Money");
        assert_eq!(method.destination().unwrap().kind(), ElementKind::Method);
        assert_eq!(property.destination().unwrap().kind(), ElementKind::Property);
        assert_eq!(constant.destination().unwrap().kind(), ElementKind::Constant);
        assert_eq!(function.destination().unwrap().kind(), ElementKind::Function);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_resolve_see_member_of_context_class() {
        let index = index();
        let errors = ErrorCollector::new();
        let resolver = Resolver::new(&index, &errors);
        let scope = invoice_scope(&index);
        let tag = DocTag::new("see", "total() The computed sum");

        let resolution = resolver.resolve_see(&tag, &scope, "origin").unwrap();

        let destination = resolution.destination().unwrap();
        assert_eq!(destination.qualified_name(), "Acme\\Billing\\Invoice::total()");
    }

    #[test]
    fn test_resolve_see_url() {
        let index = index();
        let errors = ErrorCollector::new();
        let resolver = Resolver::new(&index, &errors);
        let tag = DocTag::new("see", "https://example.com/docs Guide");

        let resolution = resolver
            .resolve_see(&tag, &Scope::for_namespace("Acme"), "origin")
            .unwrap();

        assert!(matches!(resolution, Resolution::Url(url) if url == "https://example.com/docs"));
        assert!(errors.is_empty());
    }

    fn resolutions<'s, 'a>(segments: &'s [TypeSegment<'a>]) -> Vec<&'s Resolution<'a>> {
        segments
            .iter()
            .filter_map(|segment| match segment {
                TypeSegment::Type { resolution, .. } => Some(resolution),
                TypeSegment::Text(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_resolve_throws_external_no_warning() {
        let index = index();
        let errors = ErrorCollector::new();
        let resolver = Resolver::new(&index, &errors);
        let scope = invoice_scope(&index);
        let tag = DocTag::new("throws", "\\InvalidArgumentException When negative");

        let segments = resolver.resolve_throws(&tag, &scope, "origin").unwrap();

        let resolved = resolutions(&segments);
        assert_eq!(resolved.len(), 1);
        assert!(
            matches!(resolved[0], Resolution::External(text) if text == "\\InvalidArgumentException")
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_resolve_throws_dangling_warns_once() {
        let index = index();
        let errors = ErrorCollector::new();
        let resolver = Resolver::new(&index, &errors);
        let scope = invoice_scope(&index);
        let tag = DocTag::new("throws", "\\Acme\\Billing\\MissingException");

        let segments = resolver
            .resolve_throws(&tag, &scope, "Acme\\Billing\\Invoice::total()")
            .unwrap();

        assert!(resolutions(&segments)[0].is_dangling());
        let collected = errors.errors();
        assert_eq!(collected.len(), 1);
        assert_eq!(collected[0].severity, Severity::Warning);
        assert!(collected[0].message.contains("Acme\\Billing\\MissingException"));
        assert_eq!(
            collected[0].element.as_deref(),
            Some("Acme\\Billing\\Invoice::total()")
        );
        assert_eq!(collected[0].context.as_deref(), Some("@throws"));
    }

    #[test]
    fn test_resolve_throws_union_resolves_each_class() {
        let index = index();
        let errors = ErrorCollector::new();
        let resolver = Resolver::new(&index, &errors);
        let tag = DocTag::new("throws", "Money|MissingException When broken");

        let segments = resolver
            .resolve_throws(&tag, &Scope::for_namespace("Acme\\Shared"), "origin")
            .unwrap();

        let text: String = segments.iter().map(TypeSegment::text).collect();
        assert_eq!(text, "Money|MissingException");
        let resolved = resolutions(&segments);
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].destination().unwrap().name(), "Acme\\Shared\\Money");
        assert!(resolved[1].is_dangling());
        let collected = errors.errors();
        assert_eq!(collected.len(), 1);
        assert_eq!(
            collected[0].message,
            "Unresolved reference `Acme\\Shared\\MissingException`"
        );
        assert_eq!(collected[0].context.as_deref(), Some("@throws"));
    }

    #[test]
    fn test_repeated_dangling_reference_reported_once_per_origin() {
        let index = index();
        let errors = ErrorCollector::new();
        let resolver = Resolver::new(&index, &errors);
        let scope = invoice_scope(&index);

        resolver.resolve_type_expression("Ghost|null", &scope, "Acme\\Billing\\Invoice::$lines");
        resolver.resolve_type_expression("Ghost", &scope, "Acme\\Billing\\Invoice::$lines");
        resolver.resolve_type_expression("Ghost", &scope, "Acme\\Billing\\Invoice::total()");

        assert_eq!(errors.count(Severity::Warning), 2);
    }

    #[test]
    fn test_resolve_missing_member_of_indexed_class_is_dangling() {
        let index = index();
        let errors = ErrorCollector::new();
        let resolver = Resolver::new(&index, &errors);
        let tag = DocTag::new("see", "\\Acme\\Shared\\Money::convert()");

        let resolution = resolver
            .resolve_see(&tag, &Scope::for_namespace("Acme"), "origin")
            .unwrap();

        assert!(resolution.is_dangling());
        assert_eq!(errors.count(Severity::Warning), 1);
        assert!(errors.errors()[0].message.contains("Acme\\Shared\\Money::convert()"));
    }

    #[test]
    fn test_resolve_untyped_tag_returns_none() {
        let index = index();
        let errors = ErrorCollector::new();
        let resolver = Resolver::new(&index, &errors);

        assert!(
            resolver
                .resolve_see(&DocTag::new("see", ""), &Scope::default(), "origin")
                .is_none()
        );
    }

    #[test]
    fn test_type_expression_keeps_separators_and_spacing() {
        let index = index();
        let errors = ErrorCollector::new();
        let resolver = Resolver::new(&index, &errors);
        let scope = invoice_scope(&index);

        let segments = resolver.resolve_type_expression("Money | \\Countable", &scope, "origin");

        let text: String = segments.iter().map(TypeSegment::text).collect();
        assert_eq!(text, "Money | \\Countable");
        assert_eq!(segments.len(), 3);
        assert!(matches!(&segments[1], TypeSegment::Text(t) if t == " | "));
        match (&segments[0], &segments[2]) {
            (
                TypeSegment::Type {
                    resolution: first, ..
                },
                TypeSegment::Type {
                    resolution: second, ..
                },
            ) => {
                assert!(first.is_internal());
                assert!(second.destination().is_none());
            }
            other => panic!("unexpected segments: {other:?}"),
        }
        assert!(errors.is_empty());
    }

    #[test]
    fn test_type_expression_decorations_and_dnf() {
        let index = index();
        let errors = ErrorCollector::new();
        let resolver = Resolver::new(&index, &errors);
        let scope = invoice_scope(&index);

        let segments =
            resolver.resolve_type_expression("(Money&Totalable)|?Document[]|null", &scope, "origin");

        let text: String = segments.iter().map(TypeSegment::text).collect();
        assert_eq!(text, "(Money&Totalable)|?Document[]|null");
        let names: Vec<&str> = segments
            .iter()
            .filter_map(|s| match s {
                TypeSegment::Type { name, .. } => Some(name.as_str()),
                TypeSegment::Text(_) => None,
            })
            .collect();
        assert_eq!(names, vec!["Money", "Totalable", "Document", "null"]);
        // `Totalable` is not imported into Acme\Billing.
        assert_eq!(errors.count(Severity::Warning), 1);
    }

    #[test]
    fn test_type_expression_generic_suffix() {
        let index = index();
        let errors = ErrorCollector::new();
        let resolver = Resolver::new(&index, &errors);

        let segments = resolver.resolve_type_expression(
            "array<int, Money>",
            &Scope::for_namespace("Acme"),
            "origin",
        );

        assert_eq!(segments.len(), 1);
        assert!(matches!(
            &segments[0],
            TypeSegment::Type { name, suffix, .. } if name == "array" && suffix == "<int, Money>"
        ));
    }

    #[test]
    fn test_resolve_inherited_doc_walks_ancestors() {
        let index = index();
        let errors = ErrorCollector::new();
        let resolver = Resolver::new(&index, &errors);
        let invoice = index.get_class_wrapper("Acme\\Billing\\Invoice").unwrap();

        let total = resolver
            .resolve_inherited_doc(invoice, invoice.method("total").unwrap())
            .unwrap();
        let undocumented = resolver
            .resolve_inherited_doc(invoice, invoice.method("undocumented").unwrap())
            .unwrap();

        assert_eq!(total.summary, "Total amount in cents.");
        assert_eq!(undocumented.summary, "Declared on the interface.");
    }

    #[test]
    fn test_builtin_detection_is_case_insensitive() {
        assert!(is_builtin_type("String"));
        assert!(is_builtin_type("non-empty-string"));
        assert!(!is_builtin_type("Money"));
    }
}
