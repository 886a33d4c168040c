use crate::{Options, Registry};
use crate::markdown;
use crate::node::Node;
use crate::render::HtmlWriter;
use crate::widget::{self, Diagnostic};

use super::tree::{self, Block, Widget};
use super::jsx_tag::parse_jsx_tag;
use super::{front_matter, segment};

/// Rendered MDX output with extracted metadata.
#[derive(Debug)]
pub struct MdxOutput<'a> {
    /// Rendered body: Markdown and widgets as HTML, other JSX and
    /// expressions passed through.
    pub body: String,
    /// ESM statements (`import`/`export`), in document order.
    pub esm: Vec<&'a str>,
    /// Front matter content, when the document starts with a block.
    pub front_matter: Option<&'a str>,
    /// One entry per widget that was replaced by a placeholder, ordered by
    /// source line.
    pub diagnostics: Vec<Diagnostic>,
}

/// Render MDX to HTML with default options.
pub fn render(input: &str) -> MdxOutput<'_> {
    render_with_options(input, &Options::default())
}

/// Render MDX to HTML with custom options.
pub fn render_with_options<'a>(input: &'a str, options: &Options) -> MdxOutput<'a> {
    let (front_matter, source, first_line) = match options
        .front_matter
        .then(|| front_matter::extract(input))
        .flatten()
        .filter(|fm| !opens_widget(fm.content, &options.registry))
    {
        Some(fm) => (Some(fm.content), fm.rest, fm.lines + 1),
        None => (None, input, 1),
    };

    let tree = tree::build(&segment(source), first_line, &options.registry);

    let mut renderer = Renderer {
        options,
        diagnostics: Vec::new(),
    };
    let mut w = HtmlWriter::with_capacity_for(input.len());
    if let Some(theme) = options.theme {
        w.theme_start(theme);
    }
    renderer.write_blocks(&tree.blocks, &mut w);
    if options.theme.is_some() {
        w.theme_end();
    }

    let mut diagnostics = renderer.diagnostics;
    diagnostics.sort_by_key(|d| d.line);

    MdxOutput {
        body: w.into_string(),
        esm: tree.esm,
        front_matter,
        diagnostics,
    }
}

/// Whether a line of `content` is a registered widget tag. Such a block is
/// a thematic break followed by content, not front matter.
fn opens_widget(content: &str, registry: &Registry) -> bool {
    content.lines().any(|line| {
        let line = line.trim_start();
        line.starts_with('<')
            && parse_jsx_tag(line.as_bytes()).is_some_and(|tag| registry.lookup(tag.name).is_some())
    })
}

struct Renderer<'o> {
    options: &'o Options,
    diagnostics: Vec<Diagnostic>,
}

impl Renderer<'_> {
    fn write_blocks(&mut self, blocks: &[Block<'_>], w: &mut HtmlWriter) {
        for block in blocks {
            match block {
                Block::Markdown(s) => w.write_nodes(&markdown::parse(s, self.options)),
                Block::Passthrough(s) => {
                    w.write_string(s.trim());
                    w.newline();
                }
                Block::Widget(widget) => self.write_widget(widget, w),
            }
        }
    }

    fn write_widget(&mut self, widget: &Widget<'_>, w: &mut HtmlWriter) {
        let nodes = self.child_nodes(&widget.children, w);
        let diagnostic = widget::render_or_placeholder(
            widget.kind,
            widget.props,
            &nodes,
            self.options,
            w,
            Some(widget.line),
        );
        self.diagnostics.extend(diagnostic);
    }

    /// Flatten a widget's children into nodes. Nested widgets are rendered
    /// first and become one raw node each.
    fn child_nodes(&mut self, children: &[Block<'_>], w: &mut HtmlWriter) -> Vec<Node> {
        let mut nodes = Vec::new();
        for child in children {
            match child {
                Block::Markdown(s) => nodes.extend(markdown::parse(s, self.options)),
                Block::Passthrough(s) => nodes.push(Node::raw(format!("{}\n", s.trim()))),
                Block::Widget(inner) => {
                    let mut nested = w.nested();
                    self.write_widget(inner, &mut nested);
                    w.resume_ids(&nested);
                    nodes.push(Node::raw(nested.into_string()));
                }
            }
        }
        nodes
    }
}
