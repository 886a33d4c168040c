//! HTML output writer for widget markup.
//!
//! Widgets write their wrappers through this writer and splice segmented
//! nodes in with [`HtmlWriter::write_nodes`]. Node payloads are already HTML;
//! only text and attribute values written here get escaped.

use crate::Theme;
use crate::node::Node;

/// HTML output writer with a pre-allocated buffer and a per-document id
/// counter for elements that need to reference each other.
///
/// # Example
/// ```
/// use mdxui::HtmlWriter;
///
/// let mut writer = HtmlWriter::with_capacity_for(100);
/// writer.open_div("note");
/// writer.write_escaped_text("Hello <World>");
/// writer.close_div();
///
/// assert_eq!(writer.into_string(), "<div class=\"note\">\nHello &lt;World&gt;</div>\n");
/// ```
#[derive(Debug, Default)]
pub struct HtmlWriter {
    out: String,
    next_id: u32,
}

impl HtmlWriter {
    /// Create a new writer with default capacity.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Create with pre-allocated capacity based on expected input size.
    ///
    /// Widget markup adds wrappers around every region; reserve half again
    /// the input size.
    #[inline]
    pub fn with_capacity_for(input_len: usize) -> Self {
        Self::with_capacity(input_len + input_len / 2)
    }

    /// Create with explicit capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            out: String::with_capacity(capacity),
            next_id: 0,
        }
    }

    /// An empty writer that continues this writer's id numbering. Nested
    /// widgets are rendered into their own writer; hand it back with
    /// [`resume_ids`](Self::resume_ids) to keep ids unique across the whole
    /// document.
    #[inline]
    pub(crate) fn nested(&self) -> Self {
        Self {
            out: String::new(),
            next_id: self.next_id,
        }
    }

    /// Continue numbering after the ids `nested` allocated.
    #[inline]
    pub(crate) fn resume_ids(&mut self, nested: &HtmlWriter) {
        self.next_id = self.next_id.max(nested.next_id);
    }

    /// Allocate a document-unique id: `{prefix}-{n}`.
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    /// Write a static string (compile-time known).
    #[inline]
    pub fn write_str(&mut self, s: &'static str) {
        self.out.push_str(s);
    }

    /// Write a dynamic string without escaping.
    #[inline]
    pub fn write_string(&mut self, s: &str) {
        self.out.push_str(s);
    }

    /// Write text with HTML escaping.
    #[inline]
    pub fn write_escaped_text(&mut self, text: &str) {
        html_escape::encode_text_to_string(text, &mut self.out);
    }

    /// Write a double-quoted attribute value with escaping.
    #[inline]
    pub fn write_escaped_attr(&mut self, value: &str) {
        html_escape::encode_double_quoted_attribute_to_string(value, &mut self.out);
    }

    /// Write ` name="value"`.
    #[inline]
    pub fn attr(&mut self, name: &'static str, value: &str) {
        self.out.push(' ');
        self.out.push_str(name);
        self.out.push_str("=\"");
        self.write_escaped_attr(value);
        self.out.push('"');
    }

    /// Write a newline.
    #[inline]
    pub fn newline(&mut self) {
        self.out.push('\n');
    }

    /// Write a newline unless the output is empty or already ends in one.
    #[inline]
    pub fn ensure_newline(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.newline();
        }
    }

    /// Append the HTML of every node.
    pub fn write_nodes<'n>(&mut self, nodes: impl IntoIterator<Item = &'n Node>) {
        for node in nodes {
            node.write_html(&mut self.out);
        }
    }

    /// Current output length.
    #[inline]
    pub fn len(&self) -> usize {
        self.out.len()
    }

    /// Check if output is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Get output as str.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Take ownership as String.
    #[inline]
    pub fn into_string(self) -> String {
        self.out
    }

    // --- HTML Tag Helpers ---

    /// Write `<div class="...">\n`.
    #[inline]
    pub fn open_div(&mut self, class: &str) {
        self.open_tag_with_class("div", class);
        self.newline();
    }

    /// Write `</div>\n`.
    #[inline]
    pub fn close_div(&mut self) {
        self.close_tag_nl("div");
    }

    /// Write `<tag class="..."` and leave the tag open for more attributes.
    #[inline]
    pub fn start_tag(&mut self, tag: &'static str, class: &str) {
        self.out.push('<');
        self.out.push_str(tag);
        self.attr("class", class);
    }

    /// Finish a tag opened with [`start_tag`](Self::start_tag).
    #[inline]
    pub fn end_start_tag(&mut self) {
        self.out.push('>');
    }

    /// Write `<tag class="...">`.
    #[inline]
    pub fn open_tag_with_class(&mut self, tag: &'static str, class: &str) {
        self.start_tag(tag, class);
        self.end_start_tag();
    }

    /// Write closing tag: `</tagname>`
    #[inline]
    pub fn close_tag(&mut self, tag: &'static str) {
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push('>');
    }

    /// Write closing tag with newline: `</tagname>\n`
    #[inline]
    pub fn close_tag_nl(&mut self, tag: &'static str) {
        self.close_tag(tag);
        self.newline();
    }

    /// The visible stand-in for a widget whose input was invalid.
    pub fn error_placeholder(&mut self, message: &str) {
        self.start_tag("p", "mdxui-error");
        self.attr("role", "alert");
        self.end_start_tag();
        self.write_escaped_text(message);
        self.close_tag_nl("p");
    }

    /// Open the document root for `theme`.
    pub fn theme_start(&mut self, theme: Theme) {
        self.start_tag("div", "mdxui");
        self.attr("data-theme", theme.as_str());
        self.attr("style", theme.color_scheme());
        self.end_start_tag();
        self.newline();
    }

    /// Close the document root.
    #[inline]
    pub fn theme_end(&mut self) {
        self.close_div();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escaping() {
        let mut w = HtmlWriter::new();
        w.write_escaped_text("a < b & c");
        w.attr("title", "\"quoted\"");
        assert_eq!(w.as_str(), "a &lt; b &amp; c title=\"&quot;quoted&quot;\"");
    }

    #[test]
    fn ids_are_unique_and_carry_over() {
        let mut w = HtmlWriter::new();
        assert_eq!(w.next_id("mdxui-tabs"), "mdxui-tabs-1");
        assert_eq!(w.next_id("mdxui-popover"), "mdxui-popover-2");

        let mut inner = w.nested();
        assert_eq!(inner.next_id("mdxui-tabs"), "mdxui-tabs-3");
        w.resume_ids(&inner);
        assert_eq!(w.next_id("mdxui-tabs"), "mdxui-tabs-4");
    }

    #[test]
    fn ensure_newline() {
        let mut w = HtmlWriter::new();
        w.ensure_newline();
        assert!(w.is_empty());
        w.write_str("x");
        w.ensure_newline();
        w.ensure_newline();
        assert_eq!(w.as_str(), "x\n");
    }

    #[test]
    fn placeholder() {
        let mut w = HtmlWriter::new();
        w.error_placeholder("MdxTabs requires at least one section");
        assert_eq!(
            w.into_string(),
            "<p class=\"mdxui-error\" role=\"alert\">MdxTabs requires at least one section</p>\n"
        );
    }

    #[test]
    fn themed_root() {
        let mut w = HtmlWriter::new();
        w.theme_start(Theme::Dark);
        w.theme_end();
        assert_eq!(
            w.into_string(),
            "<div class=\"mdxui\" data-theme=\"dark\" style=\"color-scheme: dark\">\n</div>\n"
        );
    }

    #[test]
    fn write_nodes() {
        let mut w = HtmlWriter::new();
        w.write_nodes(&[Node::paragraph("a"), Node::hr()]);
        assert_eq!(w.as_str(), "<p>a</p>\n<hr />\n");
    }
}
