//! MDX documents: finds widget components and renders them.
//!
//! Instead of parsing full MDX, the input is split into typed blocks. Markdown
//! goes through the Markdown compiler; registered widget components are
//! segmented and rendered; everything else (ESM, unknown JSX, expressions) is
//! passed through unchanged.
//!
//! This module is gated behind the `mdx` Cargo feature.
//!
//! # Example
//! ```
//! use mdxui::mdx::{segment, Segment};
//!
//! let input = "import A from 'a'\n\n# Hello\n\n<MdxInfo>\nWorld\n</MdxInfo>\n";
//! let segments = segment(input);
//! assert_eq!(segments[0], Segment::Esm("import A from 'a'\n"));
//! assert_eq!(segments[2], Segment::JsxBlockOpen("<MdxInfo>\n"));
//! ```
//!
//! # Limits of the block splitter
//!
//! - Block-level only. JSX and expressions are detected at the start of a
//!   line; inline JSX (`text <em>x</em> here`) stays in Markdown.
//! - No JavaScript validation. ESM is `import`/`export` at column 0, ended by
//!   a blank line or `;`; expressions are brace-matched.
//! - No container awareness. `> <MdxInfo>` is a blockquote, not a widget.
//! - Invalid JSX silently falls back to Markdown.

pub mod expr;
pub mod front_matter;
pub mod jsx_tag;
pub mod render;
mod splitter;
pub mod tree;

/// A typed segment of an MDX document.
///
/// All variants are zero-copy slices of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// `import` / `export` statement.
    Esm(&'a str),
    Markdown(&'a str),
    /// Block opening tag, e.g. `<MdxTabs>`.
    JsxBlockOpen(&'a str),
    /// Block closing tag, e.g. `</MdxTabs>`.
    JsxBlockClose(&'a str),
    /// Self-closing block tag, e.g. `<MdxCard />`.
    JsxBlockSelfClose(&'a str),
    /// Block expression, e.g. `{new Date().getFullYear()}`.
    Expression(&'a str),
}

impl<'a> Segment<'a> {
    /// The source text of the segment.
    pub fn as_str(&self) -> &'a str {
        match *self {
            Segment::Esm(s)
            | Segment::Markdown(s)
            | Segment::JsxBlockOpen(s)
            | Segment::JsxBlockClose(s)
            | Segment::JsxBlockSelfClose(s)
            | Segment::Expression(s) => s,
        }
    }
}

/// Segment an MDX document into typed blocks.
///
/// The returned segments cover the entire input; no bytes are dropped.
pub fn segment(input: &str) -> Vec<Segment<'_>> {
    splitter::split(input)
}

pub use render::{MdxOutput, render, render_with_options};
pub use tree::{Block, Tree, Widget};
