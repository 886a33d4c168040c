//! Node classification.
//!
//! Classification is a match on the node's tag: total, and never fails.
//! Nodes without a tag (raw HTML, nested widgets) simply do not match.

use crate::node::{Node, Tag};

/// Whether `node` renders as `tag`.
#[inline]
pub fn matches_tag(node: &Node, tag: Tag) -> bool {
    node.tag() == Some(tag)
}

/// A reusable predicate for `tag`.
///
/// ```
/// use mdxui::{Node, Tag, classify::is_tag};
///
/// let is_hr = is_tag(Tag::Hr);
/// let nodes = [Node::paragraph("a"), Node::hr(), Node::paragraph("b")];
/// assert_eq!(nodes.iter().position(is_hr), Some(1));
/// ```
#[inline]
pub fn is_tag(tag: Tag) -> impl Fn(&Node) -> bool + Copy {
    move |node| matches_tag(node, tag)
}

/// A structural sentinel: a node whose tag marks a segment boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marker(pub Tag);

impl Marker {
    /// Thematic break (`---`).
    pub const HR: Marker = Marker(Tag::Hr);

    /// Heading of `level`. Returns `None` outside `1..=6`.
    pub const fn heading(level: u8) -> Option<Marker> {
        match Tag::heading(level) {
            Some(tag) => Some(Marker(tag)),
            None => None,
        }
    }

    #[inline]
    pub fn tag(self) -> Tag {
        self.0
    }

    #[inline]
    pub fn matches(self, node: &Node) -> bool {
        matches_tag(node, self.0)
    }

    /// Index of the first node in `nodes` that matches.
    #[inline]
    pub fn find(self, nodes: &[Node]) -> Option<usize> {
        nodes.iter().position(is_tag(self.0))
    }
}

impl From<Tag> for Marker {
    fn from(tag: Tag) -> Self {
        Marker(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_by_tag_identity() {
        assert!(matches_tag(&Node::hr(), Tag::Hr));
        assert!(matches_tag(&Node::heading(5, "Open"), Tag::H5));
        assert!(!matches_tag(&Node::heading(5, "Open"), Tag::H6));
        assert!(!matches_tag(&Node::paragraph("---"), Tag::Hr));
    }

    #[test]
    fn content_is_ignored() {
        let a = Node::heading(1, "One");
        let b = Node::heading(1, "Completely <em>different</em>");
        assert!(matches_tag(&a, Tag::H1));
        assert!(matches_tag(&b, Tag::H1));
    }

    #[test]
    fn raw_nodes_never_match() {
        let raw = Node::raw("<hr />");
        for tag in [Tag::Hr, Tag::H1, Tag::P, Tag::Span] {
            assert!(!matches_tag(&raw, tag));
        }
    }

    #[test]
    fn classification_is_deterministic() {
        let node = Node::heading(3, "Slide");
        let first = matches_tag(&node, Tag::H3);
        for _ in 0..8 {
            assert_eq!(matches_tag(&node, Tag::H3), first);
        }
    }

    #[test]
    fn marker_find() {
        let nodes = [Node::heading(5, "a"), Node::paragraph("b"), Node::hr(), Node::hr()];
        assert_eq!(Marker::HR.find(&nodes), Some(2));
        assert_eq!(Marker::heading(5).and_then(|m| m.find(&nodes)), Some(0));
        assert_eq!(Marker::heading(1).and_then(|m| m.find(&nodes)), None);
        assert_eq!(Marker::heading(9), None);
    }
}
