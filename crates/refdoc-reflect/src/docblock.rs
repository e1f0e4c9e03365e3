//! Structured documentation comment parser.
//!
//! Splits a `/** ... */` comment into summary, description and tags:
//!
//! ```text
//! /**
//!  * Summary paragraph.
//!  *
//!  * Longer description.
//!  *
//!  * @param string $name Name to greet
//!  * @throws \InvalidArgumentException When empty
//!  * @api
//!  */
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static RE_TAG_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([A-Za-z][\w-]*)(?:\s+(.*))?$").unwrap());

static RE_INHERIT_DOC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\{@inheritdoc\}").unwrap());

/// Tags whose payload begins with a type expression.
const TYPED_TAGS: &[&str] = &["param", "return", "throws", "var", "see", "property", "uses"];

/// One `@name payload` tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocTag {
    /// Tag name without `@`.
    pub name: String,
    /// Raw payload text (continuation lines joined with `\n`).
    pub body: String,
}

impl DocTag {
    #[must_use]
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }

    /// Type or reference token at the start of the payload.
    ///
    /// Only typed tags (`param`, `return`, `throws`, `var`, `see`, ...) carry
    /// one; a `@param $name` without type returns `None`.
    #[must_use]
    pub fn type_ref(&self) -> Option<&str> {
        if !TYPED_TAGS.contains(&self.name.as_str()) {
            return None;
        }
        let (token, _) = split_type_token(&self.body);
        token.filter(|t| !t.starts_with('$') && !t.starts_with("...$"))
    }

    /// `$name` token of `param`, `var` and `property` tags, without the `$`.
    #[must_use]
    pub fn variable(&self) -> Option<&str> {
        if !matches!(self.name.as_str(), "param" | "var" | "property") {
            return None;
        }
        let rest = match self.type_ref() {
            Some(_) => split_type_token(&self.body).1,
            None => self.body.as_str(),
        };
        let token = rest.split_whitespace().next()?;
        let token = token.trim_start_matches("...").trim_start_matches('&');
        token.strip_prefix('$')
    }

    /// Free text following the type and variable tokens.
    #[must_use]
    pub fn description(&self) -> &str {
        let mut rest = self.body.as_str();
        if self.type_ref().is_some() {
            rest = split_type_token(rest).1;
        }
        if self.variable().is_some() {
            let trimmed = rest.trim_start();
            rest = trimmed
                .find(char::is_whitespace)
                .map_or("", |i| &trimmed[i..]);
        }
        rest.trim()
    }
}

/// Split the leading type expression off `body`.
///
/// Whitespace inside `<>`, `()`, `{}` or `[]` does not end the token, so
/// `array<int, string> $map` yields `array<int, string>`.
fn split_type_token(body: &str) -> (Option<&str>, &str) {
    let body = body.trim_start();
    let mut depth = 0usize;
    for (i, c) in body.char_indices() {
        match c {
            '<' | '(' | '{' | '[' => depth += 1,
            '>' | ')' | '}' | ']' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                return (Some(&body[..i]), &body[i..]);
            }
            _ => {}
        }
    }
    if body.is_empty() {
        (None, body)
    } else {
        (Some(body), "")
    }
}

/// Parsed documentation comment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DocBlock {
    /// First paragraph.
    pub summary: String,
    /// Remaining prose before the first tag.
    pub description: String,
    /// Tags in source order.
    pub tags: Vec<DocTag>,
}

impl DocBlock {
    /// Parse raw comment text.
    ///
    /// Never fails: text that is not a doc comment at all becomes the summary.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut block = Self::default();
        let mut prose: Vec<&str> = Vec::new();
        let mut current_tag: Option<DocTag> = None;

        for line in comment_lines(raw) {
            if let Some(caps) = RE_TAG_LINE.captures(line) {
                if let Some(tag) = current_tag.take() {
                    block.tags.push(tag);
                }
                current_tag = Some(DocTag::new(
                    &caps[1],
                    caps.get(2).map_or("", |m| m.as_str().trim()),
                ));
            } else if let Some(tag) = current_tag.as_mut() {
                if !line.is_empty() {
                    if !tag.body.is_empty() {
                        tag.body.push('\n');
                    }
                    tag.body.push_str(line.trim());
                }
            } else {
                prose.push(line);
            }
        }
        if let Some(tag) = current_tag.take() {
            block.tags.push(tag);
        }

        let (summary, description) = split_summary(&prose);
        block.summary = summary;
        block.description = description;
        block
    }

    /// Whether any tag named `name` is present.
    #[must_use]
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    /// All tags named `name`, in source order.
    pub fn tags_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DocTag> + 'a {
        self.tags.iter().filter(move |t| t.name == name)
    }

    /// First tag named `name`.
    #[must_use]
    pub fn first_tag(&self, name: &str) -> Option<&DocTag> {
        self.tags.iter().find(|t| t.name == name)
    }

    #[must_use]
    pub fn has_api_tag(&self) -> bool {
        self.has_tag("api")
    }

    #[must_use]
    pub fn has_internal_tag(&self) -> bool {
        self.has_tag("internal")
    }

    /// Whether the block defers to the overridden element's documentation.
    ///
    /// True for `{@inheritDoc}` in the prose or a standalone `@inheritDoc` tag.
    #[must_use]
    pub fn inherits_doc(&self) -> bool {
        self.tags
            .iter()
            .any(|t| t.name.eq_ignore_ascii_case("inheritdoc"))
            || RE_INHERIT_DOC.is_match(&self.summary)
            || RE_INHERIT_DOC.is_match(&self.description)
    }

    /// `@param` tag describing parameter `name` (without `$`).
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&DocTag> {
        self.tags_named("param").find(|t| t.variable() == Some(name))
    }

    /// Whether the block has no prose and no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty() && self.description.is_empty() && self.tags.is_empty()
    }
}

/// Strip comment delimiters and leading `*` from each line.
fn comment_lines(raw: &str) -> impl Iterator<Item = &str> {
    let text = raw.trim();
    let text = text
        .strip_prefix("/**")
        .or_else(|| text.strip_prefix("/*"))
        .unwrap_or(text);
    let text = text.strip_suffix("*/").unwrap_or(text);

    text.lines().map(|line| {
        let line = line.trim_start();
        let line = line.strip_prefix('*').unwrap_or(line);
        line.strip_prefix(' ').unwrap_or(line).trim_end()
    })
}

/// Split prose lines into the first paragraph and the rest.
fn split_summary(prose: &[&str]) -> (String, String) {
    let mut lines = prose.iter().skip_while(|l| l.is_empty()).peekable();

    let mut summary = Vec::new();
    while let Some(line) = lines.next_if(|l| !l.is_empty()) {
        summary.push(line.trim());
    }

    let description: Vec<&str> = lines.copied().collect();
    (
        summary.join(" "),
        description.join("\n").trim().to_owned(),
    )
}
