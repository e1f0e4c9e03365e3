//! Page views for the template collaborator.
//!
//! [`Formatter`] turns indexed elements into [`PageView`]s: member tables,
//! resolved `@see` and `@throws` lists, linked types and breadcrumbs. Links
//! are only emitted towards pages that the run will write; anything else is
//! rendered as inline code.

mod views;

use std::collections::HashSet;

use refdoc_index::{
    CanThrow, ClassElementWrapper, ClassWrapper, CodeIndex, ConstantWrapper, ElementRef,
    ErrorCollector, FunctionWrapper, HasParameters, HasReturnType, HasType, IndexError,
    MemberFilter, MethodWrapper, NamespaceWrapper, ParameterWrapper, PropertyWrapper,
    ReflectionWrapper, Resolution, Resolver, Scope, TypeSegment, constant_signature,
    method_signature, property_signature,
};
use refdoc_reflect::{DocBlock, DocTag};

pub use views::{
    ClassView, FormattedMember, FormattedParameter, FormattedReference, FunctionView,
    MemberView, NamespaceView, PageView, SummaryView,
};

use crate::layout::{PageLayout, page_directory};
use crate::linker::UrlLinker;
use crate::navigation::Navigation;

/// Renders links from one page directory.
pub struct LinkRenderer<'a> {
    layout: &'a PageLayout,
    planned: &'a HashSet<String>,
    linker: UrlLinker,
}

impl<'a> LinkRenderer<'a> {
    /// `planned` holds the paths of every page that will be written.
    #[must_use]
    pub fn new(layout: &'a PageLayout, planned: &'a HashSet<String>, current_dir: &str) -> Self {
        Self {
            layout,
            planned,
            linker: UrlLinker::new(current_dir),
        }
    }

    /// Relative link to the page documenting `element`, if it is written.
    #[must_use]
    pub fn element_link(&self, element: ElementRef<'_>) -> Option<String> {
        let path = self.layout.page_path(element).ok()?;
        self.planned.contains(&path).then(|| self.linker.to(&path))
    }

    /// Link target of a resolved reference.
    #[must_use]
    pub fn resolution_link(&self, resolution: &Resolution<'_>) -> Option<String> {
        match resolution {
            Resolution::Internal(element) => self.element_link(*element),
            Resolution::Url(url) => Some(url.clone()),
            Resolution::Dangling(_) | Resolution::External(_) => None,
        }
    }

    /// `[text](relative)` for published targets, `` `text` `` otherwise.
    #[must_use]
    pub fn reference(
        &self,
        text: &str,
        resolution: &Resolution<'_>,
        description: &str,
    ) -> FormattedReference {
        FormattedReference::new(text, self.resolution_link(resolution), description)
    }

    /// Reference over a resolved type expression, as in `@throws A|B`.
    ///
    /// The link is only set when the expression names a single type; the
    /// markdown links every type on its own.
    #[must_use]
    pub fn type_reference(
        &self,
        text: &str,
        segments: &[TypeSegment<'_>],
        description: &str,
    ) -> FormattedReference {
        let mut resolutions = segments.iter().filter_map(|segment| match segment {
            TypeSegment::Type { resolution, .. } => Some(resolution),
            TypeSegment::Text(_) => None,
        });
        let link = match (resolutions.next(), resolutions.next()) {
            (Some(only), None) => self.resolution_link(only),
            _ => None,
        };
        FormattedReference::new(text, link, description).with_markdown(self.type_text(segments))
    }

    /// Markdown for a resolved type expression.
    ///
    /// Separators are kept verbatim; each type is linked or code-formatted
    /// together with its decorations.
    #[must_use]
    pub fn type_text(&self, segments: &[TypeSegment<'_>]) -> String {
        segments
            .iter()
            .map(|segment| match segment {
                TypeSegment::Text(text) => text.clone(),
                TypeSegment::Type {
                    prefix,
                    name,
                    suffix,
                    resolution,
                } => match self.resolution_link(resolution) {
                    Some(link) => format!("{prefix}[{name}]({link}){suffix}"),
                    None => format!("`{prefix}{name}{suffix}`"),
                },
            })
            .collect()
    }
}

/// Builds page views over one index.
pub struct Formatter<'a> {
    index: &'a CodeIndex,
    resolver: Resolver<'a>,
    layout: &'a PageLayout,
    navigation: Navigation<'a>,
    planned: HashSet<String>,
}

impl<'a> Formatter<'a> {
    /// Create a formatter linking only to the `planned` page paths.
    #[must_use]
    pub fn new(
        index: &'a CodeIndex,
        errors: &'a ErrorCollector,
        layout: &'a PageLayout,
        planned: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            index,
            resolver: Resolver::new(index, errors),
            layout,
            navigation: Navigation::new(index, layout),
            planned: planned.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn resolver(&self) -> &Resolver<'a> {
        &self.resolver
    }

    fn links(&self, current_dir: &str) -> LinkRenderer<'_> {
        LinkRenderer::new(self.layout, &self.planned, current_dir)
    }

    /// View of the page documenting `element`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::UnsupportedOperation`] for constants and
    /// parameters, which have no page of their own.
    pub fn view(&self, element: ElementRef<'a>) -> Result<PageView, IndexError> {
        match element {
            ElementRef::Namespace(ns) => self.namespace_view(ns).map(PageView::Namespace),
            ElementRef::Class(class) => self.class_view(class).map(PageView::Class),
            ElementRef::Method { class, method } => {
                self.method_view(class, method).map(PageView::Method)
            }
            ElementRef::Property { class, property } => {
                self.property_view(class, property).map(PageView::Property)
            }
            ElementRef::Function(function) => self.function_view(function).map(PageView::Function),
            ElementRef::Constant { .. } | ElementRef::Parameter(_) => {
                Err(IndexError::unsupported("view", element.kind()))
            }
        }
    }

    /// # Errors
    ///
    /// Propagates breadcrumb failures.
    pub fn class_view(&self, class: &'a ClassWrapper) -> Result<ClassView, IndexError> {
        let element = ElementRef::Class(class);
        let dir = self.layout.page_directory(element)?;
        let links = self.links(&dir);
        let scope = Scope::for_class(class);
        let origin = class.name();

        let heritage = |name: &str| {
            let resolution = self.resolver.resolve(&format!("\\{name}"), &scope, origin);
            links.reference(name, &resolution, "")
        };

        let table = MemberFilter {
            private: false,
            ..MemberFilter::ALL
        };

        Ok(ClassView {
            name: class.name().to_owned(),
            short_name: class.short_name().to_owned(),
            kind: class.class_kind().keyword(),
            namespace: class.namespace().to_owned(),
            summary: class.summary().to_owned(),
            description: description(class.doc_block()),
            breadcrumb: self.navigation.breadcrumb(element, &dir)?,
            signature: class.signature(false),
            api_signature: class.signature(true),
            is_api: class.will_be_in_public_api(),
            parent: class.parent().map(&heritage),
            interfaces: class.interfaces().iter().map(|i| heritage(i)).collect(),
            see: self.see_references(class.doc_block(), &scope, origin, &links),
            all_constants: class
                .all_user_defined_constants(table)
                .into_iter()
                .map(|c| self.constant_row(class, c, &links))
                .collect(),
            all_properties: class
                .all_user_defined_properties(table)
                .into_iter()
                .map(|p| self.property_row(class, p, &links))
                .collect(),
            all_methods: class
                .all_user_defined_methods(table)
                .into_iter()
                .map(|m| self.method_row(class, m, &links))
                .collect(),
            api_constants: class
                .all_api_constants()
                .into_iter()
                .map(|c| self.constant_row(class, c, &links))
                .collect(),
            api_properties: class
                .all_api_properties()
                .into_iter()
                .map(|p| self.property_row(class, p, &links))
                .collect(),
            api_methods: class
                .all_api_methods()
                .into_iter()
                .map(|m| self.method_row(class, m, &links))
                .collect(),
        })
    }

    /// # Errors
    ///
    /// Propagates breadcrumb failures.
    pub fn method_view(
        &self,
        class: &'a ClassWrapper,
        method: &'a MethodWrapper,
    ) -> Result<MemberView, IndexError> {
        let element = ElementRef::Method { class, method };
        let dir = self.layout.page_directory(element)?;
        let links = self.links(&dir);
        let scope = self.member_scope(class, method);
        let origin = method.qualified_name();
        let doc = self.resolver.resolve_inherited_doc(class, method);

        Ok(MemberView {
            name: method.name().to_owned(),
            qualified_name: origin.clone(),
            kind: element.kind().as_str(),
            class: self.class_reference(class, &links),
            declaring_class: method.declaring_class().to_owned(),
            summary: doc.map_or_else(String::new, |d| d.summary.clone()),
            description: description(doc),
            breadcrumb: self.navigation.breadcrumb(element, &dir)?,
            signature: method_signature(method),
            is_static: method.is_static(),
            is_inherited: method.is_inherited(),
            parameters: self.parameters(method.parameters(), &scope, &origin, &links),
            return_type: self.type_markdown(method.return_type(), &scope, &origin, &links),
            return_description: method.return_description().to_owned(),
            type_text: None,
            default_value: None,
            throws: self.throws_references(method.throws_tags(), &scope, &origin, &links),
            see: self.see_references(doc, &scope, &origin, &links),
        })
    }

    /// # Errors
    ///
    /// Propagates breadcrumb failures.
    pub fn property_view(
        &self,
        class: &'a ClassWrapper,
        property: &'a PropertyWrapper,
    ) -> Result<MemberView, IndexError> {
        let element = ElementRef::Property { class, property };
        let dir = self.layout.page_directory(element)?;
        let links = self.links(&dir);
        let scope = self.member_scope(class, property);
        let origin = property.qualified_name();

        Ok(MemberView {
            name: property.name().to_owned(),
            qualified_name: origin.clone(),
            kind: element.kind().as_str(),
            class: self.class_reference(class, &links),
            declaring_class: property.declaring_class().to_owned(),
            summary: property.summary().to_owned(),
            description: description(property.doc_block()),
            breadcrumb: self.navigation.breadcrumb(element, &dir)?,
            signature: property_signature(property),
            is_static: property.is_static(),
            is_inherited: property.is_inherited(),
            parameters: Vec::new(),
            return_type: None,
            return_description: String::new(),
            type_text: self.type_markdown(property.type_hint(), &scope, &origin, &links),
            default_value: property.default_value().map(str::to_owned),
            throws: Vec::new(),
            see: self.see_references(property.doc_block(), &scope, &origin, &links),
        })
    }

    /// # Errors
    ///
    /// Propagates breadcrumb failures.
    pub fn function_view(&self, function: &'a FunctionWrapper) -> Result<FunctionView, IndexError> {
        let element = ElementRef::Function(function);
        let dir = self.layout.page_directory(element)?;
        let links = self.links(&dir);
        let scope = Scope::for_function(function);
        let origin = element.qualified_name();

        Ok(FunctionView {
            name: function.name().to_owned(),
            short_name: function.short_name().to_owned(),
            namespace: function.namespace().to_owned(),
            summary: function.summary().to_owned(),
            description: description(function.doc_block()),
            breadcrumb: self.navigation.breadcrumb(element, &dir)?,
            signature: function.signature(),
            parameters: self.parameters(function.parameters(), &scope, &origin, &links),
            return_type: self.type_markdown(function.return_type(), &scope, &origin, &links),
            return_description: function.return_description().to_owned(),
            throws: self.throws_references(function.throws_tags(), &scope, &origin, &links),
            see: self.see_references(function.doc_block(), &scope, &origin, &links),
        })
    }

    /// # Errors
    ///
    /// Propagates breadcrumb failures.
    pub fn namespace_view(&self, ns: &'a NamespaceWrapper) -> Result<NamespaceView, IndexError> {
        let element = ElementRef::Namespace(ns);
        let dir = self.layout.page_directory(element)?;
        let links = self.links(&dir);

        Ok(NamespaceView {
            namespace: ns.namespace().to_owned(),
            short_name: ns.short_name().to_owned(),
            breadcrumb: self.navigation.breadcrumb(element, &dir)?,
            children: ns
                .children()
                .iter()
                .filter_map(|child| self.index.get_namespace(child))
                .map(|child| self.namespace_entry(child, &links))
                .collect(),
            classes: ns
                .classes()
                .iter()
                .filter_map(|name| self.index.get_class_wrapper(name))
                .map(|class| self.class_entry(class, &links))
                .collect(),
            functions: ns
                .functions()
                .iter()
                .filter_map(|name| self.index.get_function(name))
                .map(|function| self.function_entry(function, &links))
                .collect(),
        })
    }

    /// View of the top-level API summary: every published namespace, class
    /// and function.
    #[must_use]
    pub fn summary_view(&self) -> SummaryView {
        let links = self.links(&page_directory(&self.layout.summary_path()));

        let mut classes: Vec<&ClassWrapper> = self
            .index
            .elements()
            .iter()
            .filter(|class| links.element_link(ElementRef::Class(class)).is_some())
            .collect();
        classes.sort_by_cached_key(|class| class.name().to_ascii_lowercase());

        let mut functions: Vec<&FunctionWrapper> = self
            .index
            .functions()
            .iter()
            .filter(|function| links.element_link(ElementRef::Function(function)).is_some())
            .collect();
        functions.sort_by_cached_key(|function| function.name().to_ascii_lowercase());

        SummaryView {
            namespace: self.index.namespace().to_owned(),
            definition: self.index.policy_name(),
            namespaces: self
                .index
                .namespaces()
                .map(|ns| self.namespace_entry(ns, &links))
                .collect(),
            classes: classes
                .into_iter()
                .map(|class| self.class_entry(class, &links))
                .collect(),
            functions: functions
                .into_iter()
                .map(|function| self.function_entry(function, &links))
                .collect(),
        }
    }

    /// Scope of the declaring class for inherited members, when indexed.
    fn member_scope<M: ClassElementWrapper>(
        &self,
        class: &'a ClassWrapper,
        member: &M,
    ) -> Scope<'a> {
        if member.is_inherited()
            && let Some(declaring) = self.index.get_class_wrapper(member.declaring_class())
        {
            return Scope::for_class(declaring);
        }
        Scope::for_class(class)
    }

    fn class_reference(&self, class: &ClassWrapper, links: &LinkRenderer<'_>) -> FormattedReference {
        FormattedReference::new(
            class.short_name(),
            links.element_link(ElementRef::Class(class)),
            class.summary(),
        )
    }

    fn class_entry(&self, class: &ClassWrapper, links: &LinkRenderer<'_>) -> FormattedReference {
        FormattedReference::new(
            class.name(),
            links.element_link(ElementRef::Class(class)),
            class.summary(),
        )
    }

    fn function_entry(
        &self,
        function: &FunctionWrapper,
        links: &LinkRenderer<'_>,
    ) -> FormattedReference {
        FormattedReference::new(
            function.name(),
            links.element_link(ElementRef::Function(function)),
            function.summary(),
        )
    }

    fn namespace_entry(
        &self,
        ns: &NamespaceWrapper,
        links: &LinkRenderer<'_>,
    ) -> FormattedReference {
        FormattedReference::new(
            ns.namespace(),
            links.element_link(ElementRef::Namespace(ns)),
            "",
        )
    }

    fn method_row(
        &self,
        class: &'a ClassWrapper,
        method: &'a MethodWrapper,
        links: &LinkRenderer<'_>,
    ) -> FormattedMember {
        let scope = self.member_scope(class, method);
        let origin = method.qualified_name();
        let summary = self
            .resolver
            .resolve_inherited_doc(class, method)
            .map_or_else(String::new, |d| d.summary.clone());
        FormattedMember {
            name: method.name().to_owned(),
            kind: method.kind().as_str(),
            type_text: None,
            default_value: None,
            return_type: self.type_markdown(method.return_type(), &scope, &origin, links),
            link: links.element_link(ElementRef::Method { class, method }),
            summary,
            signature: method_signature(method),
            declaring_class: method.declaring_class().to_owned(),
            is_static: method.is_static(),
            is_inherited: method.is_inherited(),
        }
    }

    fn property_row(
        &self,
        class: &'a ClassWrapper,
        property: &'a PropertyWrapper,
        links: &LinkRenderer<'_>,
    ) -> FormattedMember {
        let scope = self.member_scope(class, property);
        let origin = property.qualified_name();
        FormattedMember {
            name: property.name().to_owned(),
            kind: property.kind().as_str(),
            type_text: self.type_markdown(property.type_hint(), &scope, &origin, links),
            default_value: property.default_value().map(str::to_owned),
            return_type: None,
            link: links.element_link(ElementRef::Property { class, property }),
            summary: property.summary().to_owned(),
            signature: property_signature(property),
            declaring_class: property.declaring_class().to_owned(),
            is_static: property.is_static(),
            is_inherited: property.is_inherited(),
        }
    }

    fn constant_row(
        &self,
        class: &'a ClassWrapper,
        constant: &'a ConstantWrapper,
        links: &LinkRenderer<'_>,
    ) -> FormattedMember {
        let scope = self.member_scope(class, constant);
        let origin = constant.qualified_name();
        FormattedMember {
            name: constant.name().to_owned(),
            kind: constant.kind().as_str(),
            type_text: self.type_markdown(constant.type_hint(), &scope, &origin, links),
            default_value: constant.value().map(str::to_owned),
            return_type: None,
            link: None,
            summary: constant.summary().to_owned(),
            signature: constant_signature(constant),
            declaring_class: constant.declaring_class().to_owned(),
            is_static: constant.is_static(),
            is_inherited: constant.is_inherited(),
        }
    }

    fn parameters(
        &self,
        parameters: &[ParameterWrapper],
        scope: &Scope<'_>,
        origin: &str,
        links: &LinkRenderer<'_>,
    ) -> Vec<FormattedParameter> {
        parameters
            .iter()
            .map(|param| FormattedParameter {
                name: param.name.clone(),
                position: param.position,
                type_text: self.type_markdown(param.documented_type(), scope, origin, links),
                default_value: param.default_value.clone(),
                is_variadic: param.is_variadic,
                is_by_reference: param.is_by_reference,
                description: param.description().to_owned(),
                declaration: param.declaration(),
            })
            .collect()
    }

    fn type_markdown(
        &self,
        expr: Option<&str>,
        scope: &Scope<'_>,
        origin: &str,
        links: &LinkRenderer<'_>,
    ) -> Option<String> {
        let expr = expr?;
        let segments = self.resolver.resolve_type_expression(expr, scope, origin);
        Some(links.type_text(&segments))
    }

    fn see_references(
        &self,
        doc: Option<&DocBlock>,
        scope: &Scope<'_>,
        origin: &str,
        links: &LinkRenderer<'_>,
    ) -> Vec<FormattedReference> {
        let Some(doc) = doc else {
            return Vec::new();
        };
        tag_references(doc.tags_named("see").collect(), links, |tag| {
            self.resolver.resolve_see(tag, scope, origin)
        })
    }

    fn throws_references(
        &self,
        tags: Vec<&DocTag>,
        scope: &Scope<'_>,
        origin: &str,
        links: &LinkRenderer<'_>,
    ) -> Vec<FormattedReference> {
        tags.into_iter()
            .filter_map(|tag| {
                let text = tag.type_ref()?;
                let segments = self.resolver.resolve_throws(tag, scope, origin)?;
                Some(links.type_reference(text, &segments, tag.description()))
            })
            .collect()
    }
}

/// Resolve each tag, keeping the tag text as link text.
fn tag_references<'r>(
    tags: Vec<&DocTag>,
    links: &LinkRenderer<'_>,
    resolve: impl Fn(&DocTag) -> Option<Resolution<'r>>,
) -> Vec<FormattedReference> {
    tags.into_iter()
        .filter_map(|tag| {
            let text = tag.type_ref()?;
            let resolution = resolve(tag)?;
            Some(links.reference(text, &resolution, tag.description()))
        })
        .collect()
}

/// Long description of a doc block, empty when undocumented.
fn description(doc: Option<&DocBlock>) -> String {
    doc.map_or_else(String::new, |d| d.description.clone())
}
