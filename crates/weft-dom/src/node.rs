//! Vocabulary shared by every tree implementation: namespaces, attributes,
//! document modes and source locations.

use serde::Serialize;
use strum_macros::{Display, IntoStaticStr};

/// [§ 2.1.8 Namespaces](https://infra.spec.whatwg.org/#namespaces)
///
/// The namespaces the HTML parser can put elements and attributes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, Serialize)]
pub enum Namespace {
    /// "The HTML namespace is "http://www.w3.org/1999/xhtml"."
    #[strum(serialize = "http://www.w3.org/1999/xhtml")]
    #[serde(rename = "http://www.w3.org/1999/xhtml")]
    Html,
    /// "The MathML namespace is "http://www.w3.org/1998/Math/MathML"."
    #[strum(serialize = "http://www.w3.org/1998/Math/MathML")]
    #[serde(rename = "http://www.w3.org/1998/Math/MathML")]
    MathMl,
    /// "The SVG namespace is "http://www.w3.org/2000/svg"."
    #[strum(serialize = "http://www.w3.org/2000/svg")]
    #[serde(rename = "http://www.w3.org/2000/svg")]
    Svg,
    /// "The XLink namespace is "http://www.w3.org/1999/xlink"."
    #[strum(serialize = "http://www.w3.org/1999/xlink")]
    #[serde(rename = "http://www.w3.org/1999/xlink")]
    XLink,
    /// "The XML namespace is "http://www.w3.org/XML/1998/namespace"."
    #[strum(serialize = "http://www.w3.org/XML/1998/namespace")]
    #[serde(rename = "http://www.w3.org/XML/1998/namespace")]
    Xml,
    /// "The XMLNS namespace is "http://www.w3.org/2000/xmlns/"."
    #[strum(serialize = "http://www.w3.org/2000/xmlns/")]
    #[serde(rename = "http://www.w3.org/2000/xmlns/")]
    Xmlns,
}

impl Namespace {
    /// The namespace URL.
    #[must_use]
    pub fn url(self) -> &'static str {
        self.into()
    }

    /// Short name used by tree dumps (`svg`, `math`, `xlink`, ...).
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::MathMl => "math",
            Self::Svg => "svg",
            Self::XLink => "xlink",
            Self::Xml => "xml",
            Self::Xmlns => "xmlns",
        }
    }
}

/// An attribute on a start tag token or an element.
///
/// `prefix` and `namespace` are only ever set by the foreign attribute
/// adjustment (`xlink:href`, `xml:lang`, `xmlns:xlink`, ...); ordinary
/// attributes are in no namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// The attribute's local name, lowercased by the tokenizer.
    pub name: String,
    /// The attribute's value with character references decoded.
    pub value: String,
    /// Namespace prefix, e.g. `xlink`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Attribute namespace, e.g. [`Namespace::XLink`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<Namespace>,
}

impl Attribute {
    /// Create a new un-namespaced attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self {
            name,
            value,
            prefix: None,
            namespace: None,
        }
    }

    /// The qualified name (`prefix:name`, or just `name`).
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#concept-document-mode)
///
/// "Each document has an associated ... mode ("no-quirks", "quirks", or
/// "limited-quirks")."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum QuirksMode {
    /// Standards mode.
    #[default]
    NoQuirks,
    /// Full quirks mode.
    Quirks,
    /// Almost-standards mode.
    LimitedQuirks,
}

/// A half-open span of the input, in UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Location {
    /// Offset of the first code unit.
    pub start: usize,
    /// Offset just past the last code unit.
    pub end: usize,
}

impl Location {
    /// Create a span from `start` to `end`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Source span of a node, recorded when location tracking is enabled.
///
/// For elements `start_tag` covers the start tag token and `end_tag` the
/// matching end tag, if the element was closed explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct NodeLocation {
    /// Offset where the node starts.
    pub start: usize,
    /// Offset where the node ends.
    pub end: usize,
    /// The element's start tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_tag: Option<Location>,
    /// The element's end tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_tag: Option<Location>,
}

impl From<Location> for NodeLocation {
    fn from(span: Location) -> Self {
        Self {
            start: span.start,
            end: span.end,
            start_tag: None,
            end_tag: None,
        }
    }
}
