//! Serializable page views handed to the template collaborator.
//!
//! Every link is relative to the directory of the page the view belongs to.
//! Type and reference texts marked `markdown` are ready to embed.

use serde::Serialize;

/// Resolved cross-reference (`@see`, `@throws`, heritage, index entries).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FormattedReference {
    /// Reference text as written, or the element name for index entries.
    pub text: String,
    /// Relative page link or URL. `None` for dangling, external and
    /// unpublished targets.
    pub link: Option<String>,
    /// Tag description or element summary.
    pub description: String,
    /// `[text](link)`, or `` `text` `` when unlinked.
    pub markdown: String,
}

impl FormattedReference {
    #[must_use]
    pub fn new(text: impl Into<String>, link: Option<String>, description: impl Into<String>) -> Self {
        let text = text.into();
        let markdown = match &link {
            Some(link) => format!("[{text}]({link})"),
            None => format!("`{text}`"),
        };
        Self {
            text,
            link,
            description: description.into(),
            markdown,
        }
    }

    /// Replace the rendered markdown, keeping text and link.
    #[must_use]
    pub(crate) fn with_markdown(mut self, markdown: String) -> Self {
        self.markdown = markdown;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FormattedParameter {
    pub name: String,
    pub position: usize,
    /// Linked declared or documented type.
    pub type_text: Option<String>,
    pub default_value: Option<String>,
    pub is_variadic: bool,
    pub is_by_reference: bool,
    pub description: String,
    /// Declaration as it appears in the signature.
    pub declaration: String,
}

/// One row of a member table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FormattedMember {
    pub name: String,
    /// `method`, `property` or `constant`.
    pub kind: &'static str,
    /// Linked property or constant type.
    pub type_text: Option<String>,
    pub default_value: Option<String>,
    /// Linked method return type.
    pub return_type: Option<String>,
    /// Link to the member page, when one is generated.
    pub link: Option<String>,
    pub summary: String,
    pub signature: String,
    pub declaring_class: String,
    pub is_static: bool,
    pub is_inherited: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClassView {
    pub name: String,
    pub short_name: String,
    /// `class`, `interface`, `trait` or `enum`.
    pub kind: &'static str,
    pub namespace: String,
    pub summary: String,
    pub description: String,
    pub breadcrumb: String,
    pub signature: String,
    pub api_signature: String,
    pub is_api: bool,
    pub parent: Option<FormattedReference>,
    pub interfaces: Vec<FormattedReference>,
    pub see: Vec<FormattedReference>,
    pub all_constants: Vec<FormattedMember>,
    pub all_properties: Vec<FormattedMember>,
    pub all_methods: Vec<FormattedMember>,
    pub api_constants: Vec<FormattedMember>,
    pub api_properties: Vec<FormattedMember>,
    pub api_methods: Vec<FormattedMember>,
}

/// Method or property page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MemberView {
    pub name: String,
    /// `Class::name()` or `Class::$name`.
    pub qualified_name: String,
    pub kind: &'static str,
    /// Class the member is documented on.
    pub class: FormattedReference,
    pub declaring_class: String,
    pub summary: String,
    pub description: String,
    pub breadcrumb: String,
    pub signature: String,
    pub is_static: bool,
    pub is_inherited: bool,
    pub parameters: Vec<FormattedParameter>,
    pub return_type: Option<String>,
    pub return_description: String,
    /// Linked property type.
    pub type_text: Option<String>,
    pub default_value: Option<String>,
    pub throws: Vec<FormattedReference>,
    pub see: Vec<FormattedReference>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FunctionView {
    pub name: String,
    pub short_name: String,
    pub namespace: String,
    pub summary: String,
    pub description: String,
    pub breadcrumb: String,
    pub signature: String,
    pub parameters: Vec<FormattedParameter>,
    pub return_type: Option<String>,
    pub return_description: String,
    pub throws: Vec<FormattedReference>,
    pub see: Vec<FormattedReference>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NamespaceView {
    pub namespace: String,
    pub short_name: String,
    pub breadcrumb: String,
    pub children: Vec<FormattedReference>,
    pub classes: Vec<FormattedReference>,
    pub functions: Vec<FormattedReference>,
}

/// Top-level API summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SummaryView {
    pub namespace: String,
    /// Active public API definition.
    pub definition: &'static str,
    pub namespaces: Vec<FormattedReference>,
    pub classes: Vec<FormattedReference>,
    pub functions: Vec<FormattedReference>,
}

/// View of one page, tagged by page kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "page", rename_all = "lowercase")]
pub enum PageView {
    Summary(SummaryView),
    Namespace(NamespaceView),
    Class(ClassView),
    Method(MemberView),
    Property(MemberView),
    Function(FunctionView),
}

impl PageView {
    /// Summary line of the documented element, empty for index pages.
    #[must_use]
    pub fn summary(&self) -> &str {
        match self {
            Self::Class(view) => &view.summary,
            Self::Method(view) | Self::Property(view) => &view.summary,
            Self::Function(view) => &view.summary,
            Self::Summary(_) | Self::Namespace(_) => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_markdown() {
        let linked = FormattedReference::new("Invoice", Some("Invoice/Invoice.md".to_owned()), "");
        let unlinked = FormattedReference::new("\\RuntimeException", None, "On failure");

        assert_eq!(linked.markdown, "[Invoice](Invoice/Invoice.md)");
        assert_eq!(unlinked.markdown, "`\\RuntimeException`");
        assert_eq!(unlinked.description, "On failure");
    }

    #[test]
    fn test_page_view_is_tagged() {
        let view = PageView::Summary(SummaryView {
            namespace: "Acme".to_owned(),
            definition: "has_tag_api",
            namespaces: Vec::new(),
            classes: Vec::new(),
            functions: Vec::new(),
        });

        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["page"], "summary");
        assert_eq!(json["namespace"], "Acme");
        assert_eq!(json["definition"], "has_tag_api");
    }
}
