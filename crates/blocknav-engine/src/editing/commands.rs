use std::ops::Range;

use crate::editing::{Document, EditorError, Node, NodeContent, NodeId, NodePosition, Patch};

/// Commands that can be applied to the document
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Insert `node` before the node currently at `index` (clamped to the end)
    InsertNode { index: usize, node: Node },
    RemoveNode { id: NodeId },
    /// Replace a byte range of a text node; an empty `text` deletes
    ReplaceText {
        id: NodeId,
        range: Range<usize>,
        text: String,
    },
}

/// Apply a command to the document's node list
pub(crate) fn apply_command(doc: &mut Document, cmd: Cmd) -> Result<Patch, EditorError> {
    match cmd {
        Cmd::InsertNode { index, node } => {
            if doc.index_of(&node.id).is_some() {
                return Err(EditorError::DuplicateNodeId(node.id));
            }
            let index = index.min(doc.nodes.len());
            let id = node.id.clone();
            doc.nodes.insert(index, node);
            Ok(Patch {
                changed: vec![id],
                ..Patch::default()
            })
        }
        Cmd::RemoveNode { id } => {
            let (index, _) = doc.require(&id)?;
            doc.nodes.remove(index);
            Ok(Patch {
                removed: vec![id],
                ..Patch::default()
            })
        }
        Cmd::ReplaceText { id, range, text } => {
            let (index, node) = doc.require(&id)?;
            let NodeContent::Text(content) = &node.content else {
                return Err(EditorError::PositionMismatch {
                    node_id: id,
                    node_kind: node.kind_name(),
                    position: NodePosition::text(range.start),
                });
            };

            for offset in [range.start, range.end] {
                if offset > content.len() {
                    return Err(EditorError::OffsetOutOfBounds {
                        node_id: id,
                        offset,
                        len: content.len(),
                    });
                }
                if !content.is_grapheme_boundary(offset) {
                    return Err(EditorError::NotGraphemeBoundary {
                        node_id: id,
                        offset,
                    });
                }
            }

            let range = range.start..range.end.max(range.start);
            let replaced = content.splice(range, &text);
            doc.nodes[index].content = NodeContent::Text(replaced);
            Ok(Patch {
                changed: vec![id],
                ..Patch::default()
            })
        }
    }
}
