//! Markdown → [`Node`] boundary.
//!
//! Markdown is parsed by `pulldown-cmark`. Each top-level block becomes one
//! node: paragraphs, headings, thematic breaks, lists, block quotes and code
//! blocks keep their tag identity, everything else (tables, raw HTML blocks,
//! footnote definitions) becomes [`Node::Raw`].

use pulldown_cmark::{
    CodeBlockKind, Event, HeadingLevel, Options as CmarkOptions, Parser, Tag as CmarkTag,
    html,
};

use crate::Options;
use crate::node::{Node, Tag};

/// Parse Markdown into top-level nodes, in document order.
pub fn parse(input: &str, options: &Options) -> Vec<Node> {
    let mut events = Parser::new_ext(input, cmark_options(options)).map(|event| {
        if options.allow_html {
            event
        } else {
            escape_raw_html(event)
        }
    });

    let mut nodes = Vec::new();
    while let Some(event) = events.next() {
        match event {
            Event::Start(tag) => {
                let (inner, end) = collect_block(&mut events);
                nodes.push(block_node(tag, inner, end));
            }
            Event::Rule => nodes.push(Node::hr()),
            other => {
                let html = render([other]);
                if !html.trim().is_empty() {
                    nodes.push(Node::raw(html));
                }
            }
        }
    }
    nodes
}

/// Render a node sequence back to HTML.
pub fn write_nodes(nodes: &[Node], out: &mut String) {
    for node in nodes {
        node.write_html(out);
    }
}

fn cmark_options(options: &Options) -> CmarkOptions {
    let mut opts = CmarkOptions::empty();
    if options.tables {
        opts.insert(CmarkOptions::ENABLE_TABLES);
    }
    if options.strikethrough {
        opts.insert(CmarkOptions::ENABLE_STRIKETHROUGH);
    }
    if options.tasklists {
        opts.insert(CmarkOptions::ENABLE_TASKLISTS);
    }
    if options.footnotes {
        opts.insert(CmarkOptions::ENABLE_FOOTNOTES);
    }
    if options.heading_attributes {
        opts.insert(CmarkOptions::ENABLE_HEADING_ATTRIBUTES);
    }
    opts
}

/// With raw HTML disabled, HTML is shown as text.
fn escape_raw_html(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(text) | Event::InlineHtml(text) => Event::Text(text),
        other => other,
    }
}

/// Collect the events of the block whose `Start` was just consumed, up to
/// (not including) its matching `End`, which is returned separately.
fn collect_block<'a>(
    events: &mut impl Iterator<Item = Event<'a>>,
) -> (Vec<Event<'a>>, Option<Event<'a>>) {
    let mut inner = Vec::new();
    let mut depth = 1usize;
    for event in events.by_ref() {
        match &event {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return (inner, Some(event));
                }
            }
            _ => {}
        }
        inner.push(event);
    }
    (inner, None)
}

fn block_node<'a>(tag: CmarkTag<'a>, inner: Vec<Event<'a>>, end: Option<Event<'a>>) -> Node {
    match tag {
        CmarkTag::Paragraph => Node::paragraph(render(inner)),
        CmarkTag::Heading { level, id, .. } => {
            let node = Node::heading(heading_level(level), render(inner));
            match id {
                Some(id) => node.with_attr("id", id.into_string()),
                None => node,
            }
        }
        CmarkTag::BlockQuote(_) => Node::element(Tag::Blockquote, render(inner)),
        CmarkTag::List(Some(start)) => {
            let node = Node::element(Tag::Ol, render(inner));
            if start == 1 {
                node
            } else {
                node.with_attr("start", start.to_string())
            }
        }
        CmarkTag::List(None) => Node::element(Tag::Ul, render(inner)),
        CmarkTag::CodeBlock(kind) => Node::element(Tag::Pre, code_html(&kind, &inner)),
        other => {
            let events = std::iter::once(Event::Start(other))
                .chain(inner)
                .chain(end);
            Node::raw(render(events))
        }
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// `<code>` element for a code block, with a `language-*` class for fenced
/// blocks that name one.
fn code_html(kind: &CodeBlockKind<'_>, inner: &[Event<'_>]) -> String {
    let mut out = String::from("<code");
    if let CodeBlockKind::Fenced(info) = kind {
        if let Some(lang) = info.split_whitespace().next() {
            out.push_str(" class=\"language-");
            html_escape::encode_double_quoted_attribute_to_string(lang, &mut out);
            out.push('"');
        }
    }
    out.push('>');
    for event in inner {
        if let Event::Text(text) = event {
            html_escape::encode_text_to_string(&**text, &mut out);
        }
    }
    out.push_str("</code>");
    out
}

fn render<'a>(events: impl IntoIterator<Item = Event<'a>>) -> String {
    let mut out = String::new();
    html::push_html(&mut out, events.into_iter());
    out
}
