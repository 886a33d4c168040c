//! Per-widget segmentation policies.
//!
//! Every widget kind binds one fixed [`Policy`] to a segmenter variant. The
//! policy decides which nodes are sentinels, whether the first-node fallback
//! is acceptable and what counts as invalid input. Widgets never carry their
//! own copy of the segmentation logic.

use std::fmt;

use crate::classify::Marker;
use crate::node::{Node, Tag};
use crate::segment::{Section, Sentinels, Split, split_multi_region, split_two_region};

/// The fixed set of widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Accordion,
    Info,
    Warning,
    Card,
    Popover,
    Tabs,
    CardSet,
    Carousel,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 8] = [
        WidgetKind::Accordion,
        WidgetKind::Info,
        WidgetKind::Warning,
        WidgetKind::Card,
        WidgetKind::Popover,
        WidgetKind::Tabs,
        WidgetKind::CardSet,
        WidgetKind::Carousel,
    ];

    /// The MDX component name for this widget.
    pub const fn component_name(self) -> &'static str {
        match self {
            WidgetKind::Accordion => "MdxAccordion",
            WidgetKind::Info => "MdxInfo",
            WidgetKind::Warning => "MdxWarning",
            WidgetKind::Card => "MdxCard",
            WidgetKind::Popover => "MdxPopover",
            WidgetKind::Tabs => "MdxTabs",
            WidgetKind::CardSet => "MdxCardSet",
            WidgetKind::Carousel => "MdxCarousel",
        }
    }

    /// The policy this widget segments its children with.
    pub const fn policy(self) -> Policy {
        match self {
            WidgetKind::Accordion
            | WidgetKind::Info
            | WidgetKind::Warning
            | WidgetKind::Card => Policy::two_region(self, Marker::HR),
            WidgetKind::Popover => {
                Policy::two_region(self, Marker::HR).with_empty_label(EmptyLabel::Reject)
            }
            WidgetKind::Tabs | WidgetKind::CardSet => {
                Policy::multi_region(self, Sentinels::new(Marker::HR, Marker(Tag::H1)))
            }
            WidgetKind::Carousel => {
                Policy::multi_region(self, Sentinels::new(Marker::HR, Marker(Tag::H3)))
                    .with_fallback(Fallback::Reject)
            }
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.component_name())
    }
}

/// Which segmenter a policy drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Label/body split at the first `sentinel`.
    TwoRegion { sentinel: Marker },
    /// Repeated label/body sections.
    MultiRegion(Sentinels),
}

/// What to do when the input has no sentinel where one is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fallback {
    /// Use the first node as the label.
    ///
    /// This is an implicit, lossy default: content meant for the body ends
    /// up in the label when the author forgets the `---`.
    #[default]
    FirstNode,
    /// Report the input as invalid.
    ///
    /// Two-region: no sentinel found. Multi-region: the first node is not a
    /// section heading.
    Reject,
}

/// Whether a two-region widget may end up with no label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyLabel {
    /// Render without a label.
    #[default]
    Allow,
    /// Report the input as invalid.
    Reject,
}

/// Immutable segmentation parameters for one widget kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    pub kind: WidgetKind,
    pub layout: Layout,
    pub fallback: Fallback,
    /// Minimum number of non-empty segments: sections for multi-region,
    /// label and body regions for two-region.
    pub min_segments: usize,
    /// Two-region only.
    pub empty_label: EmptyLabel,
}

impl Policy {
    /// Two-region policy with the first-node fallback and no minimum.
    pub const fn two_region(kind: WidgetKind, sentinel: Marker) -> Self {
        Self {
            kind,
            layout: Layout::TwoRegion { sentinel },
            fallback: Fallback::FirstNode,
            min_segments: 0,
            empty_label: EmptyLabel::Allow,
        }
    }

    /// Multi-region policy requiring at least one section.
    pub const fn multi_region(kind: WidgetKind, sentinels: Sentinels) -> Self {
        Self {
            kind,
            layout: Layout::MultiRegion(sentinels),
            fallback: Fallback::FirstNode,
            min_segments: 1,
            empty_label: EmptyLabel::Allow,
        }
    }

    pub const fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    pub const fn with_empty_label(mut self, empty_label: EmptyLabel) -> Self {
        self.empty_label = empty_label;
        self
    }

    pub const fn with_min_segments(mut self, min_segments: usize) -> Self {
        self.min_segments = min_segments;
        self
    }

    /// Segment `nodes` under this policy.
    pub fn segment<'a>(&self, nodes: &'a [Node]) -> Result<Segmentation<'a>, SegmentError> {
        match self.layout {
            Layout::TwoRegion { sentinel } => self.segment_two_region(nodes, sentinel),
            Layout::MultiRegion(sentinels) => self.segment_multi_region(nodes, sentinels),
        }
    }

    fn segment_two_region<'a>(
        &self,
        nodes: &'a [Node],
        sentinel: Marker,
    ) -> Result<Segmentation<'a>, SegmentError> {
        let split = split_two_region(nodes, sentinel);

        if split.used_fallback && !nodes.is_empty() && self.fallback == Fallback::Reject {
            return Err(SegmentError::MissingSentinelWithNoFallback {
                kind: self.kind,
                expected: sentinel.tag(),
                context: "to separate the label from the content",
            });
        }
        if split.label.is_empty() && self.empty_label == EmptyLabel::Reject {
            return Err(SegmentError::EmptyResult {
                kind: self.kind,
                what: "node to use as its label",
            });
        }
        let found = usize::from(!split.label.is_empty()) + usize::from(!split.body.is_empty());
        if found < self.min_segments {
            return Err(SegmentError::EmptyResult {
                kind: self.kind,
                what: "child",
            });
        }

        Ok(Segmentation::TwoRegion(split))
    }

    fn segment_multi_region<'a>(
        &self,
        nodes: &'a [Node],
        sentinels: Sentinels,
    ) -> Result<Segmentation<'a>, SegmentError> {
        if self.fallback == Fallback::Reject {
            if let Some(first) = nodes.first() {
                if !sentinels.section_heading.matches(first) {
                    return Err(SegmentError::MissingSentinelWithNoFallback {
                        kind: self.kind,
                        expected: sentinels.section_heading.tag(),
                        context: "as its first child",
                    });
                }
            }
        }

        let sections = split_multi_region(nodes, sentinels);
        if sections.len() < self.min_segments {
            return Err(SegmentError::EmptyResult {
                kind: self.kind,
                what: "section",
            });
        }

        Ok(Segmentation::MultiRegion(sections))
    }
}

/// Successful output of [`Policy::segment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segmentation<'a> {
    TwoRegion(Split<'a>),
    MultiRegion(Vec<Section<'a>>),
}

impl<'a> Segmentation<'a> {
    pub fn as_split(&self) -> Option<&Split<'a>> {
        match self {
            Segmentation::TwoRegion(split) => Some(split),
            Segmentation::MultiRegion(_) => None,
        }
    }

    pub fn as_sections(&self) -> Option<&[Section<'a>]> {
        match self {
            Segmentation::TwoRegion(_) => None,
            Segmentation::MultiRegion(sections) => Some(sections),
        }
    }
}

/// Invalid widget input.
///
/// These never abort rendering: the caller logs one diagnostic and renders
/// a placeholder in place of the widget.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SegmentError {
    /// A sentinel is required and there is no fallback.
    #[error("{kind} requires an <{expected}> {context}")]
    MissingSentinelWithNoFallback {
        kind: WidgetKind,
        expected: Tag,
        context: &'static str,
    },
    /// Too few usable segments.
    #[error("{kind} requires at least one {what}")]
    EmptyResult { kind: WidgetKind, what: &'static str },
}

impl SegmentError {
    pub fn kind(&self) -> WidgetKind {
        match self {
            SegmentError::MissingSentinelWithNoFallback { kind, .. }
            | SegmentError::EmptyResult { kind, .. } => *kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(text: &str) -> Node {
        Node::paragraph(text)
    }

    #[test]
    fn component_names_are_unique() {
        let mut names: Vec<_> = WidgetKind::ALL.iter().map(|k| k.component_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), WidgetKind::ALL.len());
    }

    #[test]
    fn policy_kind_matches_widget() {
        for kind in WidgetKind::ALL {
            assert_eq!(kind.policy().kind, kind);
        }
    }

    #[test]
    fn accordion_tolerates_empty_input() {
        let seg = WidgetKind::Accordion.policy().segment(&[]).unwrap();
        let split = seg.as_split().unwrap();
        assert!(split.label.is_empty());
        assert!(split.body.is_empty());
        assert!(split.used_fallback);
    }

    #[test]
    fn alert_leading_break_has_empty_title() {
        let nodes = [Node::hr(), p("x")];
        let seg = WidgetKind::Info.policy().segment(&nodes).unwrap();
        let split = seg.as_split().unwrap();
        assert!(split.label.is_empty());
        assert_eq!(split.body, &nodes[1..]);
    }

    #[test]
    fn popover_first_node_fallback() {
        let nodes = [p("Open me"), p("content")];
        let seg = WidgetKind::Popover.policy().segment(&nodes).unwrap();
        let split = seg.as_split().unwrap();
        assert_eq!(split.label, &nodes[..1]);
        assert!(split.used_fallback);
    }

    #[test]
    fn popover_empty_input_is_rejected() {
        let err = WidgetKind::Popover.policy().segment(&[]).unwrap_err();
        assert!(matches!(err, SegmentError::EmptyResult { kind: WidgetKind::Popover, .. }));
    }

    #[test]
    fn popover_leading_break_is_rejected() {
        let nodes = [Node::hr(), p("content")];
        let err = WidgetKind::Popover.policy().segment(&nodes).unwrap_err();
        assert_eq!(err.kind(), WidgetKind::Popover);
    }

    #[test]
    fn popover_lenient_empty_label_branch() {
        let policy = WidgetKind::Popover.policy().with_empty_label(EmptyLabel::Allow);
        let seg = policy.segment(&[]).unwrap();
        let split = seg.as_split().unwrap();
        assert!(split.label.is_empty());
        assert!(split.body.is_empty());
    }

    #[test]
    fn popover_strict_fallback_branch() {
        let policy = WidgetKind::Popover.policy().with_fallback(Fallback::Reject);
        let err = policy.segment(&[p("no break here")]).unwrap_err();
        assert_eq!(
            err,
            SegmentError::MissingSentinelWithNoFallback {
                kind: WidgetKind::Popover,
                expected: Tag::Hr,
                context: "to separate the label from the content",
            }
        );
        assert!(policy.segment(&[p("a"), Node::hr(), p("b")]).is_ok());
    }

    #[test]
    fn carousel_requires_leading_h3() {
        let policy = WidgetKind::Carousel.policy();
        let err = policy.segment(&[p("x"), Node::heading(3, "Slide")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "MdxCarousel requires an <h3> as its first child"
        );
        let nodes = [Node::heading(3, "One"), p("a"), Node::heading(3, "Two")];
        let seg = policy.segment(&nodes).unwrap();
        assert_eq!(seg.as_sections().unwrap().len(), 2);
    }

    #[test]
    fn carousel_empty_is_empty_result() {
        let err = WidgetKind::Carousel.policy().segment(&[]).unwrap_err();
        assert!(matches!(err, SegmentError::EmptyResult { .. }));
    }

    #[test]
    fn tabs_zero_sections() {
        let err = WidgetKind::Tabs.policy().segment(&[Node::hr(), Node::hr()]).unwrap_err();
        assert_eq!(err.to_string(), "MdxTabs requires at least one section");
    }

    #[test]
    fn tabs_free_form_first_node() {
        let nodes = [p("Label"), p("body"), Node::hr(), Node::heading(1, "Two")];
        let seg = WidgetKind::Tabs.policy().segment(&nodes).unwrap();
        let sections = seg.as_sections().unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].label.as_ref(), &p("Label"));
    }

    #[test]
    fn min_segments_applies_to_two_region() {
        let policy = WidgetKind::Card.policy().with_min_segments(2);
        assert!(policy.segment(&[p("only label")]).is_err());
        assert!(policy.segment(&[p("title"), p("content")]).is_ok());
    }
}
