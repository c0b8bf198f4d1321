use crate::editing::{
    Document, DocumentPosition, Edge, EditorError, NodeBehaviors, NodeContent, NodeId,
    NodePosition, Selection, TextPosition,
};

/// Where inside a node a tap landed, already mapped from pixels by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocalTap {
    /// Text offset under the pointer (text nodes)
    Offset(usize),
    /// Horizontal fraction `0.0..=1.0` of the node's rendered width (atomic nodes)
    Fraction(f32),
}

/// Resolve a tap on `node_id` to a collapsed selection.
///
/// Tapping an unselectable node yields `Ok(None)`: the caller must drop any
/// previous selection rather than keep it.
pub fn resolve_tap(
    doc: &Document,
    node_id: &NodeId,
    tap: LocalTap,
    behaviors: &NodeBehaviors,
) -> Result<Option<Selection>, EditorError> {
    let (_, node) = doc.require(node_id)?;

    let position = match (&node.content, tap) {
        (NodeContent::Text(text), LocalTap::Offset(offset)) => {
            NodePosition::Text(TextPosition::new(text.floor_boundary(offset)))
        }
        (NodeContent::Atomic(_), LocalTap::Fraction(fraction)) if fraction < 0.5 => {
            NodePosition::Atomic(Edge::Upstream)
        }
        (NodeContent::Atomic(_), LocalTap::Fraction(_)) => NodePosition::Atomic(Edge::Downstream),
        _ => {
            return Err(EditorError::TapMismatch {
                node_id: node.id.clone(),
                node_kind: node.kind_name(),
                tap,
            });
        }
    };

    if !behaviors.is_selectable(node) {
        log::debug!("tap on unselectable {} node {} ignored", node.kind_name(), node.id);
        return Ok(None);
    }

    Ok(Some(Selection::collapsed(DocumentPosition::new(
        node.id.clone(),
        position,
    ))))
}
