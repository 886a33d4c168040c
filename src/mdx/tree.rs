//! Pairs widget tags into a block tree.
//!
//! Only components the [`Registry`] knows become [`Widget`]s. Any other JSX,
//! and every expression, is passed through verbatim. A widget left open at the
//! end of the document (or when an enclosing widget closes) is closed
//! implicitly.

use crate::limits::MAX_WIDGET_NESTING;
use crate::policy::WidgetKind;
use crate::registry::Registry;
use crate::widget::WidgetProps;

use super::Segment;
use super::jsx_tag::{TagInfo, parse_jsx_tag};

/// A block of an MDX document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<'a> {
    /// Markdown source.
    Markdown(&'a str),
    /// JSX or an expression the renderer does not interpret.
    Passthrough(&'a str),
    Widget(Widget<'a>),
}

/// A recognised widget and its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget<'a> {
    pub kind: WidgetKind,
    /// Component name as written.
    pub name: &'a str,
    pub props: WidgetProps,
    /// 1-based line of the opening tag.
    pub line: usize,
    pub children: Vec<Block<'a>>,
}

/// A document split into ESM and a block tree.
#[derive(Debug, Default)]
pub struct Tree<'a> {
    pub esm: Vec<&'a str>,
    pub blocks: Vec<Block<'a>>,
}

/// Build the block tree for `segments`. `first_line` is the source line the
/// first segment starts on.
pub fn build<'a>(segments: &[Segment<'a>], first_line: usize, registry: &Registry) -> Tree<'a> {
    let mut builder = Builder {
        tree: Tree::default(),
        open: Vec::new(),
        overflow: Vec::new(),
    };
    let mut line = first_line;

    for segment in segments {
        builder.push(*segment, line, registry);
        line += memchr::memchr_iter(b'\n', segment.as_str().as_bytes()).count();
    }
    while let Some(widget) = builder.open.pop() {
        log::debug!("<{}> opened on line {} was never closed", widget.name, widget.line);
        builder.attach(widget);
    }
    builder.tree
}

struct Builder<'a> {
    tree: Tree<'a>,
    open: Vec<Widget<'a>>,
    /// Names of widget tags nested too deep to render, innermost last.
    overflow: Vec<&'a str>,
}

impl<'a> Builder<'a> {
    fn push(&mut self, segment: Segment<'a>, line: usize, registry: &Registry) {
        match segment {
            Segment::Esm(s) => self.tree.esm.push(s),
            Segment::Markdown(s) => self.children().push(Block::Markdown(s)),
            Segment::Expression(s) => self.children().push(Block::Passthrough(s)),
            Segment::JsxBlockOpen(s) | Segment::JsxBlockSelfClose(s) => {
                let self_closing = matches!(segment, Segment::JsxBlockSelfClose(_));
                match widget_tag(s, registry) {
                    Some((_, tag)) if self.open.len() >= MAX_WIDGET_NESTING => {
                        log::debug!("<{}> on line {line} nested too deep; passed through", tag.name);
                        if !self_closing {
                            self.overflow.push(tag.name);
                        }
                        self.children().push(Block::Passthrough(s));
                    }
                    Some((kind, tag)) => {
                        let widget = Widget {
                            kind,
                            name: tag.name,
                            props: props(&tag),
                            line,
                            children: Vec::new(),
                        };
                        if self_closing {
                            self.attach(widget);
                        } else {
                            self.open.push(widget);
                        }
                    }
                    None => self.children().push(Block::Passthrough(s)),
                }
            }
            Segment::JsxBlockClose(s) => self.close(s),
        }
    }

    fn close(&mut self, s: &'a str) {
        let Some(tag) = parse_jsx_tag(s.trim_start().as_bytes()) else {
            self.children().push(Block::Passthrough(s));
            return;
        };
        if self.overflow.last() == Some(&tag.name) {
            self.overflow.pop();
            self.children().push(Block::Passthrough(s));
            return;
        }
        let Some(depth) = self.open.iter().rposition(|w| w.name == tag.name) else {
            self.children().push(Block::Passthrough(s));
            return;
        };
        while self.open.len() > depth + 1 {
            if let Some(inner) = self.open.pop() {
                log::debug!(
                    "<{}> opened on line {} closed implicitly by </{}>",
                    inner.name,
                    inner.line,
                    tag.name
                );
                self.attach(inner);
            }
        }
        if let Some(widget) = self.open.pop() {
            self.attach(widget);
        }
    }

    fn attach(&mut self, widget: Widget<'a>) {
        self.children().push(Block::Widget(widget));
    }

    fn children(&mut self) -> &mut Vec<Block<'a>> {
        match self.open.last_mut() {
            Some(widget) => &mut widget.children,
            None => &mut self.tree.blocks,
        }
    }
}

fn widget_tag<'a>(s: &'a str, registry: &Registry) -> Option<(WidgetKind, TagInfo<'a>)> {
    let tag = parse_jsx_tag(s.trim_start().as_bytes())?;
    let kind = registry.lookup(tag.name)?;
    Some((kind, tag))
}

fn props(tag: &TagInfo<'_>) -> WidgetProps {
    WidgetProps {
        default_open: tag.attr("defaultOpen").is_some_and(|attr| attr.is_true()),
    }
}
