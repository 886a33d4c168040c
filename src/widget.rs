//! Widget markup.
//!
//! Each widget segments its children with its [`Policy`] and wraps the
//! regions in self-contained HTML: `<details>` for accordions, the
//! `popover` attribute for popovers, radio inputs for tabs. Segmentation
//! runs to completion before anything is written, so a widget is either
//! rendered whole or replaced by a placeholder.
//!
//! [`Policy`]: crate::policy::Policy

use crate::Options;
use crate::node::Node;
use crate::policy::{SegmentError, Segmentation, WidgetKind};
use crate::render::HtmlWriter;
use crate::segment::{Section, Split};

/// Widget attributes taken from the component tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WidgetProps {
    /// `defaultOpen`: accordions start expanded, popovers start shown.
    pub default_open: bool,
}

/// A widget that could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based source line of the component's opening tag, when known.
    pub line: Option<usize>,
    pub error: SegmentError,
}

impl Diagnostic {
    pub fn kind(&self) -> WidgetKind {
        self.error.kind()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.error),
            None => write!(f, "{}", self.error),
        }
    }
}

/// Render `kind` over `nodes`, or return why the input is invalid.
///
/// Nothing is written on error.
pub fn render(
    kind: WidgetKind,
    props: WidgetProps,
    nodes: &[Node],
    options: &Options,
    w: &mut HtmlWriter,
) -> Result<(), SegmentError> {
    match (kind, options.policy_for(kind).segment(nodes)?) {
        (WidgetKind::Accordion, Segmentation::TwoRegion(split)) => accordion(&split, props, w),
        (WidgetKind::Info | WidgetKind::Warning, Segmentation::TwoRegion(split)) => {
            alert(kind, &split, w)
        }
        (WidgetKind::Card, Segmentation::TwoRegion(split)) => card(&split, w),
        (WidgetKind::Popover, Segmentation::TwoRegion(split)) => popover(&split, props, w),
        (WidgetKind::Tabs, Segmentation::MultiRegion(list)) => tabs(&list, w),
        (WidgetKind::CardSet, Segmentation::MultiRegion(list)) => card_set(&list, w),
        (WidgetKind::Carousel, Segmentation::MultiRegion(list)) => carousel(&list, w),
        // `Options::policy_for` never changes a kind's layout.
        (kind, segmentation) => unreachable!("{kind} segmented as {segmentation:?}"),
    }
    Ok(())
}

/// Render `kind`, or on invalid input log one diagnostic and write the
/// error placeholder instead.
pub fn render_or_placeholder(
    kind: WidgetKind,
    props: WidgetProps,
    nodes: &[Node],
    options: &Options,
    w: &mut HtmlWriter,
    line: Option<usize>,
) -> Option<Diagnostic> {
    match render(kind, props, nodes, options, w) {
        Ok(()) => None,
        Err(error) => {
            let diagnostic = Diagnostic { line, error };
            log::warn!("{diagnostic}");
            w.error_placeholder(&diagnostic.error.to_string());
            Some(diagnostic)
        }
    }
}

/// Render a widget from Markdown children.
///
/// ```
/// use mdxui::{Options, WidgetKind, WidgetProps, render_widget};
///
/// let html = render_widget(
///     WidgetKind::Accordion,
///     "**Details**\n\n---\n\nHidden until opened.\n",
///     WidgetProps::default(),
///     &Options::default(),
/// )
/// .unwrap();
/// assert!(html.contains("<summary class=\"mdxui-accordion-trigger\"><p><strong>Details</strong></p>"));
/// ```
pub fn render_widget(
    kind: WidgetKind,
    markdown: &str,
    props: WidgetProps,
    options: &Options,
) -> Result<String, SegmentError> {
    let nodes = crate::markdown::parse(markdown, options);
    let mut w = HtmlWriter::with_capacity_for(markdown.len());
    render(kind, props, &nodes, options, &mut w)?;
    Ok(w.into_string())
}

fn accordion(split: &Split<'_>, props: WidgetProps, w: &mut HtmlWriter) {
    w.start_tag("details", "mdxui-accordion");
    if props.default_open {
        w.write_str(" open");
    }
    w.end_start_tag();
    w.newline();

    w.open_tag_with_class("summary", "mdxui-accordion-trigger");
    w.write_nodes(split.label);
    w.close_tag_nl("summary");

    w.open_div("mdxui-accordion-content");
    w.write_nodes(split.body);
    w.close_div();

    w.close_tag_nl("details");
}

fn alert(kind: WidgetKind, split: &Split<'_>, w: &mut HtmlWriter) {
    let (class, icon) = match kind {
        WidgetKind::Warning => ("mdxui-alert mdxui-alert-warning", "\u{26A0}"),
        _ => ("mdxui-alert mdxui-alert-info", "\u{2139}"),
    };
    w.start_tag("div", class);
    w.attr("role", "alert");
    w.end_start_tag();
    w.newline();

    w.start_tag("span", "mdxui-alert-icon");
    w.attr("aria-hidden", "true");
    w.end_start_tag();
    w.write_str(icon);
    w.close_tag_nl("span");

    if !split.label.is_empty() {
        w.open_div("mdxui-alert-title");
        w.write_nodes(split.label);
        w.close_div();
    }
    if !split.body.is_empty() {
        w.open_div("mdxui-alert-description");
        w.write_nodes(split.body);
        w.close_div();
    }

    w.close_div();
}

fn card(split: &Split<'_>, w: &mut HtmlWriter) {
    w.open_div("mdxui-card");
    if let Some((title, description)) = split.label.split_first() {
        w.open_div("mdxui-card-header");
        w.open_div("mdxui-card-title");
        w.write_nodes([title]);
        w.close_div();
        if !description.is_empty() {
            w.open_div("mdxui-card-description");
            w.write_nodes(description);
            w.close_div();
        }
        w.close_div();
    }
    if !split.body.is_empty() {
        w.open_div("mdxui-card-content");
        w.write_nodes(split.body);
        w.close_div();
    }
    w.close_div();
}

fn popover(split: &Split<'_>, props: WidgetProps, w: &mut HtmlWriter) {
    let id = w.next_id("mdxui-popover");

    w.open_div("mdxui-popover");

    w.start_tag("button", "mdxui-popover-trigger");
    w.attr("type", "button");
    w.attr("popovertarget", &id);
    w.end_start_tag();
    w.write_nodes(split.label);
    w.close_tag_nl("button");

    w.start_tag("div", "mdxui-popover-content");
    w.attr("id", &id);
    w.write_str(" popover");
    if props.default_open {
        w.write_str(" data-default-open");
    }
    w.end_start_tag();
    w.newline();
    w.write_nodes(split.body);
    w.close_div();

    w.close_div();
}

fn tabs(list: &[Section<'_>], w: &mut HtmlWriter) {
    let group = w.next_id("mdxui-tabs");

    w.open_div("mdxui-tabs");

    w.start_tag("div", "mdxui-tabs-list");
    w.attr("role", "tablist");
    w.end_start_tag();
    w.newline();
    for (i, section) in list.iter().enumerate() {
        let tab_id = format!("{group}-{i}");
        w.start_tag("input", "mdxui-tabs-input");
        w.attr("type", "radio");
        w.attr("name", &group);
        w.attr("id", &tab_id);
        if i == 0 {
            w.write_str(" checked");
        }
        w.write_str(" />");
        w.newline();

        w.start_tag("label", "mdxui-tabs-trigger");
        w.attr("for", &tab_id);
        w.attr("role", "tab");
        w.end_start_tag();
        w.write_nodes([&*section.label]);
        w.close_tag_nl("label");
    }
    w.close_div();

    for (i, section) in list.iter().enumerate() {
        w.start_tag("div", "mdxui-tabs-content");
        w.attr("role", "tabpanel");
        w.attr("data-tab", &format!("{group}-{i}"));
        w.end_start_tag();
        w.newline();
        w.write_nodes(section.body);
        w.close_div();
    }

    w.close_div();
}

fn card_set(list: &[Section<'_>], w: &mut HtmlWriter) {
    w.open_div("mdxui-card-set");
    for section in list {
        w.open_div("mdxui-card");
        w.open_div("mdxui-card-header");
        w.open_div("mdxui-card-title");
        w.write_nodes([&*section.label]);
        w.close_div();
        w.close_div();
        if !section.body.is_empty() {
            w.open_div("mdxui-card-content");
            w.write_nodes(section.body);
            w.close_div();
        }
        w.close_div();
    }
    w.close_div();
}

fn carousel(list: &[Section<'_>], w: &mut HtmlWriter) {
    w.start_tag("div", "mdxui-carousel");
    w.attr("role", "region");
    w.attr("aria-roledescription", "carousel");
    w.end_start_tag();
    w.newline();

    w.open_div("mdxui-carousel-content");
    for (i, section) in list.iter().enumerate() {
        w.start_tag("div", "mdxui-carousel-item");
        w.attr("role", "group");
        w.attr("aria-roledescription", "slide");
        w.attr("aria-label", &format!("{} of {}", i + 1, list.len()));
        w.end_start_tag();
        w.newline();

        w.open_div("mdxui-card");
        w.open_div("mdxui-card-content");
        w.write_nodes([&*section.label]);
        w.write_nodes(section.body);
        w.close_div();
        w.close_div();

        w.close_div();
    }
    w.close_div();

    w.start_tag("button", "mdxui-carousel-previous");
    w.attr("type", "button");
    w.attr("aria-label", "Previous slide");
    w.end_start_tag();
    w.close_tag_nl("button");
    w.start_tag("button", "mdxui-carousel-next");
    w.attr("type", "button");
    w.attr("aria-label", "Next slide");
    w.end_start_tag();
    w.close_tag_nl("button");

    w.close_div();
}
