//! The segmenter: partitions a node sequence into label/body regions.
//!
//! Two shapes are supported:
//!
//! - **Two-region** ([`split_two_region`]): the first sentinel divides the
//!   label from the body. Without a sentinel, the first node is the label.
//! - **Multi-region** ([`split_multi_region`]): hard breaks and section
//!   headings cut the sequence into sections, each with its own label and
//!   body.
//!
//! Both are pure functions over borrowed nodes. Regions are slices of the
//! input; sentinels are dropped and nothing is reordered.

use std::borrow::Cow;

use smallvec::SmallVec;

use crate::classify::Marker;
use crate::node::{Node, Tag};

/// Result of a two-region split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    /// Nodes before the sentinel (or the first node, on fallback).
    pub label: &'a [Node],
    /// Nodes after the sentinel (or all but the first node, on fallback).
    pub body: &'a [Node],
    /// No sentinel was found and the first-node default was applied.
    pub used_fallback: bool,
}

impl Split<'_> {
    /// Number of sentinel nodes consumed (0 or 1).
    #[inline]
    pub fn consumed(&self) -> usize {
        usize::from(!self.used_fallback)
    }
}

/// Split `nodes` at the first node matching `sentinel`.
///
/// The sentinel itself belongs to neither region. A sentinel at index 0
/// gives an empty label; that is not a fallback.
///
/// ```
/// use mdxui::{Node, classify::Marker, segment::split_two_region};
///
/// let nodes = [Node::paragraph("label"), Node::hr(), Node::paragraph("body")];
/// let split = split_two_region(&nodes, Marker::HR);
/// assert_eq!(split.label, &nodes[..1]);
/// assert_eq!(split.body, &nodes[2..]);
/// assert!(!split.used_fallback);
/// ```
pub fn split_two_region(nodes: &[Node], sentinel: Marker) -> Split<'_> {
    match sentinel.find(nodes) {
        Some(at) => Split {
            label: &nodes[..at],
            body: &nodes[at + 1..],
            used_fallback: false,
        },
        None => {
            let (label, body) = nodes.split_at(nodes.len().min(1));
            Split {
                label,
                body,
                used_fallback: true,
            }
        }
    }
}

/// Sentinels for a multi-region split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentinels {
    /// Closes the current section and is dropped.
    pub hard_break: Marker,
    /// Opens a new section and becomes its label.
    pub section_heading: Marker,
}

impl Sentinels {
    pub const fn new(hard_break: Marker, section_heading: Marker) -> Self {
        Self {
            hard_break,
            section_heading,
        }
    }
}

/// One section of a multi-region split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    /// First node of the section. Owned when it is a demoted section
    /// heading, borrowed otherwise.
    pub label: Cow<'a, Node>,
    /// The remaining nodes of the section.
    pub body: &'a [Node],
}

/// Section boundaries found by the walk, before empty ones are dropped.
///
/// `heading` is the index of the section heading that opened it, if any;
/// the other nodes are `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bounds {
    heading: Option<usize>,
    start: usize,
    end: usize,
}

impl Bounds {
    #[inline]
    fn open(heading: Option<usize>, start: usize) -> Self {
        Self {
            heading,
            start,
            end: start,
        }
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.heading.is_none() && self.start == self.end
    }
}

/// Walk `nodes` once, cutting at every sentinel. Always yields at least one
/// (possibly empty) section.
fn partition(nodes: &[Node], sentinels: Sentinels) -> SmallVec<[Bounds; 8]> {
    let mut sections = SmallVec::new();
    let mut current = Bounds::open(None, 0);

    for (i, node) in nodes.iter().enumerate() {
        if sentinels.hard_break.matches(node) {
            sections.push(current);
            current = Bounds::open(None, i + 1);
        } else if sentinels.section_heading.matches(node) {
            sections.push(current);
            current = Bounds::open(Some(i), i + 1);
        } else {
            current.end = i + 1;
        }
    }
    sections.push(current);
    sections
}

/// Cut `nodes` into labelled sections.
///
/// Hard breaks close the current section. Section headings open a new one
/// and become its label, demoted to a [`Tag::Span`] so they no longer render
/// as document headings. Sections left empty (back-to-back breaks, or the
/// implicit section before a leading heading) are dropped.
///
/// ```
/// use mdxui::{Node, Tag, classify::Marker, segment::{Sentinels, split_multi_region}};
///
/// let nodes = [
///     Node::heading(1, "Tab A"),
///     Node::paragraph("a"),
///     Node::heading(1, "Tab B"),
///     Node::paragraph("b"),
/// ];
/// let sentinels = Sentinels::new(Marker::HR, Marker(Tag::H1));
/// let sections = split_multi_region(&nodes, sentinels);
/// assert_eq!(sections.len(), 2);
/// assert_eq!(sections[0].label.tag(), Some(Tag::Span));
/// assert_eq!(sections[1].body, &nodes[3..]);
/// ```
pub fn split_multi_region(nodes: &[Node], sentinels: Sentinels) -> Vec<Section<'_>> {
    partition(nodes, sentinels)
        .into_iter()
        .filter(|bounds| !bounds.is_empty())
        .map(|bounds| match bounds.heading {
            Some(heading) => Section {
                label: Cow::Owned(nodes[heading].retag(Tag::Span)),
                body: &nodes[bounds.start..bounds.end],
            },
            None => Section {
                label: Cow::Borrowed(&nodes[bounds.start]),
                body: &nodes[bounds.start + 1..bounds.end],
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(text: &str) -> Node {
        Node::paragraph(text)
    }

    const TABS: Sentinels = Sentinels::new(Marker::HR, Marker(Tag::H1));

    #[test]
    fn two_region_sentinel_in_middle() {
        let nodes = [p("a"), p("b"), Node::hr(), p("c")];
        let split = split_two_region(&nodes, Marker::HR);
        assert_eq!(split.label, &nodes[..2]);
        assert_eq!(split.body, &nodes[3..]);
        assert_eq!(split.consumed(), 1);
    }

    #[test]
    fn two_region_only_first_sentinel_counts() {
        let nodes = [p("a"), Node::hr(), p("b"), Node::hr(), p("c")];
        let split = split_two_region(&nodes, Marker::HR);
        assert_eq!(split.label, &nodes[..1]);
        assert_eq!(split.body, &nodes[2..]);
        assert!(split.body.contains(&Node::hr()));
    }

    #[test]
    fn two_region_trailing_sentinel() {
        let nodes = [p("a"), Node::hr()];
        let split = split_two_region(&nodes, Marker::HR);
        assert_eq!(split.label, &nodes[..1]);
        assert!(split.body.is_empty());
        assert!(!split.used_fallback);
    }

    #[test]
    fn two_region_heading_sentinel() {
        let h5 = Marker::heading(5).unwrap();
        let nodes = [p("a"), Node::heading(5, "open"), p("b")];
        let split = split_two_region(&nodes, h5);
        assert_eq!(split.label, &nodes[..1]);
        assert_eq!(split.body, &nodes[2..]);
    }

    #[test]
    fn two_region_empty() {
        let split = split_two_region(&[], Marker::HR);
        assert!(split.label.is_empty());
        assert!(split.body.is_empty());
        assert!(split.used_fallback);
        assert_eq!(split.consumed(), 0);
    }

    #[test]
    fn partition_counts_hard_breaks() {
        // k = 3 non-adjacent breaks, no headings: k + 1 raw sections
        let nodes = [p("a"), Node::hr(), p("b"), Node::hr(), p("c"), Node::hr(), p("d")];
        assert_eq!(partition(&nodes, TABS).len(), 4);
        assert_eq!(split_multi_region(&nodes, TABS).len(), 4);
    }

    #[test]
    fn partition_keeps_empty_sections_until_filtered() {
        let nodes = [Node::hr(), Node::hr(), p("a"), Node::hr()];
        let raw = partition(&nodes, TABS);
        assert_eq!(raw.len(), 4);
        assert_eq!(raw.iter().filter(|b| b.is_empty()).count(), 3);
        assert_eq!(split_multi_region(&nodes, TABS).len(), 1);
    }

    #[test]
    fn multi_region_heading_without_body() {
        let nodes = [Node::heading(1, "Only")];
        let sections = split_multi_region(&nodes, TABS);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].label.as_ref(), &Node::element(Tag::Span, "Only"));
        assert!(sections[0].body.is_empty());
    }

    #[test]
    fn multi_region_borrowed_label_after_break() {
        let nodes = [p("first"), p("x"), Node::hr(), p("second")];
        let sections = split_multi_region(&nodes, TABS);
        assert_eq!(sections.len(), 2);
        assert!(matches!(sections[0].label, Cow::Borrowed(_)));
        assert_eq!(sections[0].label.as_ref(), &p("first"));
        assert_eq!(sections[0].body, &nodes[1..2]);
        assert_eq!(sections[1].label.as_ref(), &p("second"));
        assert!(sections[1].body.is_empty());
    }

    #[test]
    fn multi_region_heading_after_content_opens_new_section() {
        let nodes = [p("intro"), Node::heading(1, "Next"), p("body")];
        let sections = split_multi_region(&nodes, TABS);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].label.as_ref(), &p("intro"));
        assert!(sections[0].body.is_empty());
        assert_eq!(sections[1].label.tag(), Some(Tag::Span));
        assert_eq!(sections[1].body, &nodes[2..]);
    }

    #[test]
    fn multi_region_other_headings_are_content() {
        let nodes = [Node::heading(1, "Tab"), Node::heading(2, "Sub"), p("x")];
        let sections = split_multi_region(&nodes, TABS);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].body, &nodes[1..]);
    }
}
