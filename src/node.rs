//! Content nodes.
//!
//! A [`Node`] is one top-level unit of already-parsed content. The segmenter
//! only ever looks at a node's [`Tag`]; everything else (inner HTML,
//! attributes) is payload that passes through untouched.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

/// Structural identity of an element node, named after the HTML element it
/// renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Thematic break (`---`).
    Hr,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    P,
    /// Neutral inline wrapper. Section headings are demoted to this.
    Span,
    Ul,
    Ol,
    Blockquote,
    Pre,
}

impl Tag {
    /// Heading tag for a level in `1..=6`.
    pub const fn heading(level: u8) -> Option<Tag> {
        match level {
            1 => Some(Tag::H1),
            2 => Some(Tag::H2),
            3 => Some(Tag::H3),
            4 => Some(Tag::H4),
            5 => Some(Tag::H5),
            6 => Some(Tag::H6),
            _ => None,
        }
    }

    /// Heading level, or `None` if this is not a heading tag.
    pub const fn heading_level(self) -> Option<u8> {
        match self {
            Tag::H1 => Some(1),
            Tag::H2 => Some(2),
            Tag::H3 => Some(3),
            Tag::H4 => Some(4),
            Tag::H5 => Some(5),
            Tag::H6 => Some(6),
            _ => None,
        }
    }

    /// Element name (`"hr"`, `"h1"`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Tag::Hr => "hr",
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::H4 => "h4",
            Tag::H5 => "h5",
            Tag::H6 => "h6",
            Tag::P => "p",
            Tag::Span => "span",
            Tag::Ul => "ul",
            Tag::Ol => "ol",
            Tag::Blockquote => "blockquote",
            Tag::Pre => "pre",
        }
    }

    /// Void elements have no closing tag and no content.
    #[inline]
    const fn is_void(self) -> bool {
        matches!(self, Tag::Hr)
    }

    /// Containers put their children on separate lines.
    #[inline]
    const fn is_container(self) -> bool {
        matches!(self, Tag::Ul | Tag::Ol | Tag::Blockquote)
    }

    #[inline]
    const fn is_inline(self) -> bool {
        matches!(self, Tag::Span)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known [`Tag`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown element tag `{0}`")]
pub struct UnknownTag(pub String);

impl FromStr for Tag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = match s.trim().to_ascii_lowercase().as_str() {
            "hr" => Tag::Hr,
            "h1" => Tag::H1,
            "h2" => Tag::H2,
            "h3" => Tag::H3,
            "h4" => Tag::H4,
            "h5" => Tag::H5,
            "h6" => Tag::H6,
            "p" => Tag::P,
            "span" => Tag::Span,
            "ul" => Tag::Ul,
            "ol" => Tag::Ol,
            "blockquote" => Tag::Blockquote,
            "pre" => Tag::Pre,
            _ => return Err(UnknownTag(s.to_string())),
        };
        Ok(tag)
    }
}

/// Element attributes. Almost every element has none, a few (`ol start`)
/// have one.
pub type Attrs = SmallVec<[(&'static str, String); 1]>;

/// An element node: a tag, its attributes and pre-rendered inner HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: Tag,
    attrs: Attrs,
    inner: String,
}

impl Element {
    pub fn new(tag: Tag, inner: impl Into<String>) -> Self {
        Self {
            tag,
            attrs: Attrs::new(),
            inner: inner.into(),
        }
    }

    #[inline]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    #[inline]
    pub fn attrs(&self) -> &[(&'static str, String)] {
        &self.attrs
    }

    /// Inner HTML, already escaped.
    #[inline]
    pub fn inner_html(&self) -> &str {
        &self.inner
    }
}

/// One unit of parsed content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Content that renders as a known element.
    Element(Element),
    /// HTML with no structural identity (raw HTML, tables, nested widgets).
    /// Never matches a marker.
    Raw(String),
}

impl Node {
    pub fn element(tag: Tag, inner: impl Into<String>) -> Self {
        Node::Element(Element::new(tag, inner))
    }

    /// A thematic break.
    pub fn hr() -> Self {
        Node::element(Tag::Hr, String::new())
    }

    /// A heading. Levels outside `1..=6` are clamped.
    pub fn heading(level: u8, inner: impl Into<String>) -> Self {
        let tag = Tag::heading(level.clamp(1, 6)).unwrap_or(Tag::H6);
        Node::element(tag, inner)
    }

    pub fn paragraph(inner: impl Into<String>) -> Self {
        Node::element(Tag::P, inner)
    }

    pub fn raw(html: impl Into<String>) -> Self {
        Node::Raw(html.into())
    }

    /// Add an attribute. No effect on raw nodes.
    pub fn with_attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        if let Node::Element(el) = &mut self {
            el.attrs.push((name, value.into()));
        }
        self
    }

    /// Structural identity, if any.
    #[inline]
    pub fn tag(&self) -> Option<Tag> {
        match self {
            Node::Element(el) => Some(el.tag),
            Node::Raw(_) => None,
        }
    }

    /// Inner HTML of an element, or the whole HTML of a raw node.
    pub fn inner_html(&self) -> &str {
        match self {
            Node::Element(el) => &el.inner,
            Node::Raw(html) => html,
        }
    }

    /// A new node with the same content and attributes rendered as `tag`.
    ///
    /// Raw nodes have no role to change and are returned as a plain copy.
    pub fn retag(&self, tag: Tag) -> Node {
        match self {
            Node::Element(el) => Node::Element(Element {
                tag,
                attrs: el.attrs.clone(),
                inner: el.inner.clone(),
            }),
            Node::Raw(html) => Node::Raw(html.clone()),
        }
    }

    /// Append this node's HTML to `out`.
    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Raw(html) => out.push_str(html),
            Node::Element(el) => {
                out.push('<');
                out.push_str(el.tag.as_str());
                for (name, value) in &el.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    html_escape::encode_double_quoted_attribute_to_string(value, out);
                    out.push('"');
                }
                if el.tag.is_void() {
                    out.push_str(" />\n");
                    return;
                }
                out.push('>');
                if el.tag.is_container() && !el.inner.starts_with('\n') {
                    out.push('\n');
                }
                out.push_str(&el.inner);
                out.push_str("</");
                out.push_str(el.tag.as_str());
                out.push('>');
                if !el.tag.is_inline() {
                    out.push('\n');
                }
            }
        }
    }

    /// This node rendered as HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(self.inner_html().len() + 16);
        self.write_html(&mut out);
        out
    }
}
