use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::editing::{EditorError, Node, NodeContent, NodeId};

/// Which side of a line-wrap boundary a text caret prefers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Affinity {
    Upstream,
    #[default]
    Downstream,
}

/// The two caret positions of an atomic node: before and after its content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Edge {
    Upstream,
    Downstream,
}

/// Caret inside a text node.
///
/// Equality, hashing and ordering only look at `offset`; the affinity is a
/// placement hint and two carets at the same offset are the same caret.
#[derive(Debug, Clone, Copy)]
pub struct TextPosition {
    pub offset: usize,
    pub affinity: Affinity,
}

impl TextPosition {
    pub fn new(offset: usize) -> Self {
        Self {
            offset,
            affinity: Affinity::Downstream,
        }
    }

    pub fn with_affinity(offset: usize, affinity: Affinity) -> Self {
        Self { offset, affinity }
    }
}

impl PartialEq for TextPosition {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
    }
}

impl Eq for TextPosition {}

impl Hash for TextPosition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.offset.hash(state);
    }
}

impl PartialOrd for TextPosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TextPosition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.offset.cmp(&other.offset)
    }
}

/// A position inside one node, shaped by the node's kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodePosition {
    Text(TextPosition),
    Atomic(Edge),
}

impl NodePosition {
    pub fn text(offset: usize) -> Self {
        Self::Text(TextPosition::new(offset))
    }

    pub fn upstream() -> Self {
        Self::Atomic(Edge::Upstream)
    }

    pub fn downstream() -> Self {
        Self::Atomic(Edge::Downstream)
    }

    pub fn text_offset(&self) -> Option<usize> {
        match self {
            NodePosition::Text(pos) => Some(pos.offset),
            NodePosition::Atomic(_) => None,
        }
    }

    /// Order two positions of the same node. Positions of different kinds
    /// cannot share a node and compare as `None`.
    pub fn compare(&self, other: &NodePosition) -> Option<Ordering> {
        match (self, other) {
            (NodePosition::Text(a), NodePosition::Text(b)) => Some(a.cmp(b)),
            (NodePosition::Atomic(a), NodePosition::Atomic(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Check that this position can address `node`
    pub fn validate_for(&self, node: &Node) -> Result<(), EditorError> {
        match (self, &node.content) {
            (NodePosition::Text(pos), NodeContent::Text(text)) => {
                if pos.offset > text.len() {
                    return Err(EditorError::OffsetOutOfBounds {
                        node_id: node.id.clone(),
                        offset: pos.offset,
                        len: text.len(),
                    });
                }
                if !text.is_grapheme_boundary(pos.offset) {
                    return Err(EditorError::NotGraphemeBoundary {
                        node_id: node.id.clone(),
                        offset: pos.offset,
                    });
                }
                Ok(())
            }
            (NodePosition::Atomic(_), NodeContent::Atomic(_)) => Ok(()),
            _ => Err(EditorError::PositionMismatch {
                node_id: node.id.clone(),
                node_kind: node.kind_name(),
                position: *self,
            }),
        }
    }
}

/// A node reference paired with a position inside that node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPosition {
    pub node_id: NodeId,
    pub position: NodePosition,
}

impl DocumentPosition {
    pub fn new(node_id: impl Into<NodeId>, position: NodePosition) -> Self {
        Self {
            node_id: node_id.into(),
            position,
        }
    }

    pub fn text(node_id: impl Into<NodeId>, offset: usize) -> Self {
        Self::new(node_id, NodePosition::text(offset))
    }

    pub fn upstream(node_id: impl Into<NodeId>) -> Self {
        Self::new(node_id, NodePosition::upstream())
    }

    pub fn downstream(node_id: impl Into<NodeId>) -> Self {
        Self::new(node_id, NodePosition::downstream())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affinity_does_not_affect_equality() {
        let upstream = TextPosition::with_affinity(4, Affinity::Upstream);
        let downstream = TextPosition::with_affinity(4, Affinity::Downstream);

        assert_eq!(upstream, downstream);
        assert_eq!(
            DocumentPosition::new("1", NodePosition::Text(upstream)),
            DocumentPosition::new("1", NodePosition::Text(downstream))
        );
    }

    #[test]
    fn test_compare_within_node() {
        assert_eq!(
            NodePosition::text(1).compare(&NodePosition::text(5)),
            Some(Ordering::Less)
        );
        assert_eq!(
            NodePosition::downstream().compare(&NodePosition::upstream()),
            Some(Ordering::Greater)
        );
        assert_eq!(NodePosition::text(0).compare(&NodePosition::upstream()), None);
    }

    #[test]
    fn test_validate_rejects_mismatched_kinds() {
        let rule = Node::horizontal_rule("hr");
        let err = NodePosition::text(0).validate_for(&rule).unwrap_err();
        assert!(matches!(err, EditorError::PositionMismatch { .. }));

        let paragraph = Node::paragraph("p", "abc");
        let err = NodePosition::upstream().validate_for(&paragraph).unwrap_err();
        assert!(matches!(err, EditorError::PositionMismatch { .. }));
    }

    #[test]
    fn test_validate_rejects_out_of_bounds_offsets() {
        let paragraph = Node::paragraph("p", "abc");

        assert!(NodePosition::text(3).validate_for(&paragraph).is_ok());
        assert_eq!(
            NodePosition::text(4).validate_for(&paragraph),
            Err(EditorError::OffsetOutOfBounds {
                node_id: NodeId::new("p"),
                offset: 4,
                len: 3,
            })
        );
    }
}
