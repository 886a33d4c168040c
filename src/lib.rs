//! mdxui: Markdown/MDX structure → interactive widgets
//!
//! Authors write plain Markdown inside a component tag; this crate decides
//! which part of it is the label and which is the body, and renders the
//! widget as HTML.
//!
//! ```text
//! <MdxAccordion>
//! **What is this?**
//!
//! ---
//!
//! Everything after the `---` is hidden until the accordion is opened.
//! </MdxAccordion>
//! ```
//!
//! # Layers
//! - [`node`]: the tagged content node the segmenter works on
//! - [`classify`]: tag predicates ("is this a thematic break?")
//! - [`segment`]: two-region and multi-region splits
//! - [`policy`]: the per-widget policy table
//! - [`markdown`]: Markdown → nodes, via `pulldown-cmark`
//! - [`widget`]: HTML markup for each widget
//! - `mdx` (feature `mdx`): finds widget tags in MDX documents
//!
//! # Design Principles
//! - Segmentation is pure: same nodes, same policy, same result
//! - Segments borrow the input; only demoted headings are copied
//! - Invalid widget input never aborts a document: it becomes a diagnostic
//!   and a visible placeholder

pub mod classify;
pub mod limits;
pub mod markdown;
#[cfg(feature = "mdx")]
pub mod mdx;
pub mod node;
pub mod policy;
pub mod registry;
pub mod render;
pub mod segment;
pub mod widget;

// Re-export primary types
pub use classify::{Marker, is_tag, matches_tag};
pub use node::{Element, Node, Tag};
pub use policy::{EmptyLabel, Fallback, Layout, Policy, SegmentError, Segmentation, WidgetKind};
pub use registry::Registry;
pub use render::HtmlWriter;
pub use segment::{Section, Sentinels, Split, split_multi_region, split_two_region};
pub use widget::{Diagnostic, WidgetProps, render_widget};

/// Colour scheme of the rendered document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    Dark,
    /// Follow the reader's `prefers-color-scheme`.
    #[default]
    System,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    /// Value for the root's `style` attribute.
    pub const fn color_scheme(self) -> &'static str {
        match self {
            Theme::Light => "color-scheme: light",
            Theme::Dark => "color-scheme: dark",
            Theme::System => "color-scheme: light dark",
        }
    }
}

/// A theme name other than `light`, `dark` or `system`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme `{0}` (expected light, dark or system)")]
pub struct UnknownTheme(pub String);

impl std::str::FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// Parsing/rendering options.
#[derive(Debug, Clone)]
pub struct Options {
    /// Allow raw inline and block HTML. When off, HTML is shown as text.
    pub allow_html: bool,
    /// Enable GFM tables.
    pub tables: bool,
    /// Enable GFM strikethrough (`~~text~~`).
    pub strikethrough: bool,
    /// Enable GFM task list items (`- [ ]`).
    pub tasklists: bool,
    /// Enable footnotes (`[^1]`).
    pub footnotes: bool,
    /// Enable `{#id .class}` heading attributes.
    pub heading_attributes: bool,
    /// Extract a leading `---`/`+++` front matter block from MDX documents.
    /// Off by default: a leading `---` is a thematic break.
    pub front_matter: bool,
    /// What a popover does when its children have no `---`.
    pub popover_fallback: Fallback,
    /// Wrap MDX output in a themed root element.
    pub theme: Option<Theme>,
    /// Component names recognised as widgets.
    pub registry: Registry,
}

impl Options {
    /// The policy `kind` segments with under these options.
    pub fn policy_for(&self, kind: WidgetKind) -> Policy {
        let policy = kind.policy();
        match kind {
            WidgetKind::Popover => policy.with_fallback(self.popover_fallback),
            _ => policy,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            allow_html: true,
            tables: true,
            strikethrough: true,
            tasklists: true,
            footnotes: false,
            heading_attributes: false,
            front_matter: false,
            popover_fallback: Fallback::FirstNode,
            theme: None,
            registry: Registry::default(),
        }
    }
}

/// Parse Markdown into top-level content nodes.
///
/// # Example
/// ```
/// use mdxui::{Node, Tag};
///
/// let nodes = mdxui::parse("# Hello\n\n---\n\nWorld");
/// assert_eq!(nodes[0].tag(), Some(Tag::H1));
/// assert_eq!(nodes[1], Node::hr());
/// assert_eq!(nodes[2], Node::paragraph("World"));
/// ```
pub fn parse(input: &str) -> Vec<Node> {
    markdown::parse(input, &Options::default())
}

/// Convert an MDX document to HTML, rendering every widget it contains.
///
/// # Example
/// ```
/// let html = mdxui::to_html("<MdxInfo>\nHeads up\n\n---\n\nDetails.\n</MdxInfo>\n");
/// assert!(html.contains("<div class=\"mdxui-alert-title\">\n<p>Heads up</p>"));
/// assert!(html.contains("<p>Details.</p>"));
/// ```
#[cfg(feature = "mdx")]
pub fn to_html(input: &str) -> String {
    mdx::render(input).body
}

/// Convert an MDX document to HTML with options.
#[cfg(feature = "mdx")]
pub fn to_html_with_options(input: &str, options: &Options) -> String {
    mdx::render_with_options(input, options).body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policies_match_widget_table() {
        let options = Options::default();
        for kind in WidgetKind::ALL {
            assert_eq!(options.policy_for(kind), kind.policy());
        }
    }

    #[test]
    fn popover_fallback_override() {
        let options = Options {
            popover_fallback: Fallback::Reject,
            ..Options::default()
        };
        assert_eq!(options.policy_for(WidgetKind::Popover).fallback, Fallback::Reject);
        assert_eq!(options.policy_for(WidgetKind::Accordion).fallback, Fallback::FirstNode);
    }

    #[test]
    fn options_never_change_a_layout() {
        let strict = Options {
            popover_fallback: Fallback::Reject,
            ..Options::default()
        };
        for options in [Options::default(), strict] {
            for kind in WidgetKind::ALL {
                assert_eq!(options.policy_for(kind).layout, kind.policy().layout, "{kind}");
            }
        }
    }

    #[test]
    fn front_matter_is_opt_in() {
        assert!(!Options::default().front_matter);
    }

    #[test]
    fn theme_parsing() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
        assert_eq!(
            "solarized".parse::<Theme>(),
            Err(UnknownTheme("solarized".to_string()))
        );
        assert_eq!(
            UnknownTheme("x".to_string()).to_string(),
            "unknown theme `x` (expected light, dark or system)"
        );
        assert_eq!(Theme::default(), Theme::System);
    }

    #[test]
    fn parse_uses_default_extensions() {
        let nodes = parse("~~gone~~\n");
        assert_eq!(nodes, vec![Node::paragraph("<del>gone</del>")]);
    }

    #[cfg(feature = "mdx")]
    #[test]
    fn to_html_plain_markdown_passes_through() {
        assert_eq!(to_html("# Hi\n\nthere\n"), "<h1>Hi</h1>\n<p>there</p>\n");
    }
}
