use crate::editing::{LocalTap, NodeId, NodePosition};

/// Faults raised by the editing core.
///
/// These are caller bugs (stale ids, positions paired with the wrong kind of
/// node), never user-visible outcomes: a rejected caret move or a tap on an
/// unselectable node is reported through the normal return value instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditorError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Duplicate node id: {0}")]
    DuplicateNodeId(NodeId),

    #[error("Position {position:?} cannot address {node_kind} node {node_id}")]
    PositionMismatch {
        node_id: NodeId,
        node_kind: &'static str,
        position: NodePosition,
    },

    #[error("Offset {offset} is out of bounds for node {node_id} (length {len})")]
    OffsetOutOfBounds {
        node_id: NodeId,
        offset: usize,
        len: usize,
    },

    #[error("Offset {offset} in node {node_id} is not on a grapheme boundary")]
    NotGraphemeBoundary { node_id: NodeId, offset: usize },

    #[error("Tap {tap:?} cannot target {node_kind} node {node_id}")]
    TapMismatch {
        node_id: NodeId,
        node_kind: &'static str,
        tap: LocalTap,
    },
}
