//! Deletion and insertion around node boundaries.
//!
//! Every function here is pure: it takes the current document and selection
//! and returns a new document, a new selection and the patch describing what
//! changed. Text nodes are never merged.

use crate::editing::{
    Cmd, Document, DocumentPosition, Edge, EditorError, Node, NodeBehaviors, NodeContent, NodeId,
    NodePosition, Patch, Selection,
};

/// Document and selection after an edit
#[derive(Debug, Clone, PartialEq)]
pub struct EditResult {
    pub document: Document,
    pub selection: Selection,
    pub patch: Patch,
}

impl EditResult {
    fn unchanged(doc: &Document, selection: Selection) -> Self {
        Self {
            document: doc.clone(),
            selection,
            patch: Patch::unchanged(doc.version()),
        }
    }

    fn apply(doc: &Document, cmds: Vec<Cmd>, caret: DocumentPosition) -> Result<Self, EditorError> {
        let mut document = doc.clone();
        let patch = document.apply_all(cmds)?;
        Ok(Self {
            document,
            selection: Selection::collapsed(caret),
            patch,
        })
    }
}

/// Delete key: remove what follows the caret, or the selected range.
///
/// At the end of a text node followed by an atomic node, a selectable node is
/// selected first (caret moves to its upstream edge, nothing is removed) and
/// an unselectable node is removed outright, leaving the caret in place.
pub fn delete_forward(
    doc: &Document,
    selection: &Selection,
    behaviors: &NodeBehaviors,
) -> Result<EditResult, EditorError> {
    delete(doc, selection, true, behaviors)
}

/// Backspace: the mirror image of [`delete_forward`]
pub fn delete_backward(
    doc: &Document,
    selection: &Selection,
    behaviors: &NodeBehaviors,
) -> Result<EditResult, EditorError> {
    delete(doc, selection, false, behaviors)
}

fn delete(
    doc: &Document,
    selection: &Selection,
    forward: bool,
    behaviors: &NodeBehaviors,
) -> Result<EditResult, EditorError> {
    selection.validate(doc)?;
    if !selection.is_collapsed() {
        return delete_range(doc, selection, behaviors);
    }

    let caret = &selection.extent;
    let (index, node) = doc.require(&caret.node_id)?;
    match (&node.content, caret.position) {
        (NodeContent::Text(text), NodePosition::Text(pos)) => {
            let grapheme = if forward {
                text.next_grapheme(pos.offset).map(|end| pos.offset..end)
            } else {
                text.prev_grapheme(pos.offset).map(|start| start..pos.offset)
            };
            match grapheme {
                Some(range) => {
                    let caret = DocumentPosition::text(node.id.clone(), range.start);
                    let cmd = Cmd::ReplaceText {
                        id: node.id.clone(),
                        range,
                        text: String::new(),
                    };
                    EditResult::apply(doc, vec![cmd], caret)
                }
                None => delete_across_boundary(doc, selection, forward, behaviors),
            }
        }
        (NodeContent::Atomic(_), NodePosition::Atomic(edge)) => {
            remove_atomic(doc, index, edge, behaviors)
        }
        (_, position) => Err(EditorError::PositionMismatch {
            node_id: node.id.clone(),
            node_kind: node.kind_name(),
            position,
        }),
    }
}

/// The caret sits at the start/end of a text node and the deletion reaches
/// into the neighbouring node
fn delete_across_boundary(
    doc: &Document,
    selection: &Selection,
    forward: bool,
    behaviors: &NodeBehaviors,
) -> Result<EditResult, EditorError> {
    let node_id = &selection.extent.node_id;
    let neighbour = if forward {
        doc.node_after(node_id)
    } else {
        doc.node_before(node_id)
    };
    let Some(neighbour) = neighbour else {
        return Ok(EditResult::unchanged(doc, selection.clone()));
    };

    match &neighbour.content {
        NodeContent::Atomic(_) if behaviors.is_selectable(neighbour) => {
            let edge = if forward {
                Edge::Upstream
            } else {
                Edge::Downstream
            };
            log::debug!("selecting {} node {} before deleting it", neighbour.kind_name(), neighbour.id);
            let caret = DocumentPosition::new(neighbour.id.clone(), NodePosition::Atomic(edge));
            Ok(EditResult::unchanged(doc, Selection::collapsed(caret)))
        }
        NodeContent::Atomic(_) => {
            log::debug!("removing unselectable {} node {}", neighbour.kind_name(), neighbour.id);
            let mut document = doc.clone();
            let patch = document.apply(Cmd::RemoveNode {
                id: neighbour.id.clone(),
            })?;
            Ok(EditResult {
                document,
                selection: selection.clone(),
                patch,
            })
        }
        NodeContent::Text(_) => {
            log::debug!("not merging text nodes {} and {}", selection.extent.node_id, neighbour.id);
            Ok(EditResult::unchanged(doc, selection.clone()))
        }
    }
}

/// Remove the atomic node holding the caret. The caret returns to the side it
/// came from: an upstream caret prefers the previous node's end, a downstream
/// caret the next node's start.
fn remove_atomic(
    doc: &Document,
    index: usize,
    edge: Edge,
    behaviors: &NodeBehaviors,
) -> Result<EditResult, EditorError> {
    let node = &doc.nodes()[index];
    log::debug!("removing {} node {}", node.kind_name(), node.id);

    let landing = landing_around(doc, index, index, edge == Edge::Upstream, behaviors);
    let mut cmds = vec![Cmd::RemoveNode {
        id: node.id.clone(),
    }];
    let caret = landing.unwrap_or_else(|| placeholder_paragraph(&mut cmds, index));
    EditResult::apply(doc, cmds, caret)
}

/// Delete everything between the normalized selection endpoints
fn delete_range(
    doc: &Document,
    selection: &Selection,
    behaviors: &NodeBehaviors,
) -> Result<EditResult, EditorError> {
    let (start, end) = selection.normalized(doc)?;
    let first = doc.validate_position(&start)?;
    let last = doc.validate_position(&end)?;
    let nodes = doc.nodes();

    if first == last {
        return match (start.position, end.position) {
            (NodePosition::Text(from), NodePosition::Text(to)) => {
                let id = nodes[first].id.clone();
                let cmd = Cmd::ReplaceText {
                    id: id.clone(),
                    range: from.offset..to.offset,
                    text: String::new(),
                };
                EditResult::apply(doc, vec![cmd], DocumentPosition::text(id, from.offset))
            }
            _ => remove_atomic(doc, first, Edge::Upstream, behaviors),
        };
    }

    let mut cmds = Vec::new();

    let first_node = &nodes[first];
    let first_kept = match (&first_node.content, start.position) {
        (NodeContent::Text(text), NodePosition::Text(pos)) => {
            if pos.offset < text.len() {
                cmds.push(Cmd::ReplaceText {
                    id: first_node.id.clone(),
                    range: pos.offset..text.len(),
                    text: String::new(),
                });
            }
            true
        }
        (NodeContent::Atomic(_), NodePosition::Atomic(Edge::Downstream)) => true,
        _ => {
            cmds.push(Cmd::RemoveNode {
                id: first_node.id.clone(),
            });
            false
        }
    };

    for node in &nodes[first + 1..last] {
        cmds.push(Cmd::RemoveNode {
            id: node.id.clone(),
        });
    }

    let last_node = &nodes[last];
    let last_kept = match (&last_node.content, end.position) {
        (NodeContent::Text(_), NodePosition::Text(pos)) => {
            if pos.offset > 0 {
                cmds.push(Cmd::ReplaceText {
                    id: last_node.id.clone(),
                    range: 0..pos.offset,
                    text: String::new(),
                });
            }
            true
        }
        (NodeContent::Atomic(_), NodePosition::Atomic(Edge::Upstream)) => true,
        _ => {
            cmds.push(Cmd::RemoveNode {
                id: last_node.id.clone(),
            });
            false
        }
    };

    let caret = if first_kept {
        start
    } else if last_kept {
        DocumentPosition::new(last_node.id.clone(), last_node.start_position())
    } else {
        match landing_around(doc, first, last, true, behaviors) {
            Some(caret) => caret,
            None => placeholder_paragraph(&mut cmds, first),
        }
    };
    EditResult::apply(doc, cmds, caret)
}

/// A caret position just outside the nodes `first..=last`: the end of the
/// previous selectable node or the start of the next one
fn landing_around(
    doc: &Document,
    first: usize,
    last: usize,
    prefer_previous: bool,
    behaviors: &NodeBehaviors,
) -> Option<DocumentPosition> {
    let previous = behaviors
        .next_selectable(doc, first, false)
        .and_then(|i| doc.node_at(i))
        .map(|node| DocumentPosition::new(node.id.clone(), node.end_position()));
    let next = behaviors
        .next_selectable(doc, last, true)
        .and_then(|i| doc.node_at(i))
        .map(|node| DocumentPosition::new(node.id.clone(), node.start_position()));

    if prefer_previous {
        previous.or(next)
    } else {
        next.or(previous)
    }
}

/// Queue an empty paragraph at `index` so the caret has somewhere to go
fn placeholder_paragraph(cmds: &mut Vec<Cmd>, index: usize) -> DocumentPosition {
    let id = NodeId::generate();
    cmds.push(Cmd::InsertNode {
        index,
        node: Node::paragraph(id.clone(), ""),
    });
    DocumentPosition::text(id, 0)
}

/// Validate the selection and clear an expanded range, returning the document
/// and caret to continue editing from
fn collapse_for_insert(
    doc: &Document,
    selection: &Selection,
    behaviors: &NodeBehaviors,
) -> Result<EditResult, EditorError> {
    selection.validate(doc)?;
    if selection.is_collapsed() {
        Ok(EditResult::unchanged(doc, selection.clone()))
    } else {
        delete_range(doc, selection, behaviors)
    }
}

/// Type `text` at the caret, replacing an expanded selection first.
///
/// Each newline in `text` splits the paragraph as Enter would.
///
/// With the caret on an atomic node the text goes into a new paragraph after
/// (downstream edge) or before (upstream edge) that node.
pub fn insert_text(
    doc: &Document,
    selection: &Selection,
    text: &str,
    behaviors: &NodeBehaviors,
) -> Result<EditResult, EditorError> {
    if let Some((line, rest)) = text.split_once('\n') {
        let head = insert_text(doc, selection, line.trim_end_matches('\r'), behaviors)?;
        let split = split_paragraph(&head.document, &head.selection, behaviors)?;
        let tail = insert_text(&split.document, &split.selection, rest, behaviors)?;
        return Ok(EditResult {
            patch: head.patch.merge(split.patch).merge(tail.patch),
            ..tail
        });
    }

    let cleared = collapse_for_insert(doc, selection, behaviors)?;
    if text.is_empty() {
        return Ok(cleared);
    }

    let caret = cleared.selection.extent.clone();
    let (index, node) = cleared.document.require(&caret.node_id)?;
    let (cmds, caret) = match (&node.content, caret.position) {
        (NodeContent::Text(content), NodePosition::Text(pos)) => {
            let cmd = Cmd::ReplaceText {
                id: node.id.clone(),
                range: pos.offset..pos.offset,
                text: text.to_string(),
            };
            // Typed text can merge with a following combining mark
            let offset = content
                .splice(pos.offset..pos.offset, text)
                .ceil_boundary(pos.offset + text.len());
            (vec![cmd], DocumentPosition::text(node.id.clone(), offset))
        }
        (_, NodePosition::Atomic(edge)) => {
            let id = NodeId::generate();
            let at = if edge == Edge::Downstream { index + 1 } else { index };
            let cmd = Cmd::InsertNode {
                index: at,
                node: Node::paragraph(id.clone(), text),
            };
            (vec![cmd], DocumentPosition::text(id, text.len()))
        }
        (_, position) => {
            return Err(EditorError::PositionMismatch {
                node_id: node.id.clone(),
                node_kind: node.kind_name(),
                position,
            });
        }
    };

    let next = EditResult::apply(&cleared.document, cmds, caret)?;
    Ok(EditResult {
        patch: cleared.patch.merge(next.patch),
        ..next
    })
}

/// Enter: split the text node at the caret into two nodes.
///
/// On an atomic node an empty paragraph is inserted after it (caret moves
/// into the paragraph) or before it (caret stays on the node).
pub fn split_paragraph(
    doc: &Document,
    selection: &Selection,
    behaviors: &NodeBehaviors,
) -> Result<EditResult, EditorError> {
    let cleared = collapse_for_insert(doc, selection, behaviors)?;

    let caret = cleared.selection.extent.clone();
    let (index, node) = cleared.document.require(&caret.node_id)?;
    let new_id = NodeId::generate();
    let (cmds, caret) = match (&node.content, caret.position) {
        (NodeContent::Text(content), NodePosition::Text(pos)) => {
            let tail = content.slice(pos.offset..content.len()).into_owned();
            let mut cmds = Vec::new();
            if !tail.is_empty() {
                cmds.push(Cmd::ReplaceText {
                    id: node.id.clone(),
                    range: pos.offset..content.len(),
                    text: String::new(),
                });
            }
            cmds.push(Cmd::InsertNode {
                index: index + 1,
                node: Node::paragraph(new_id.clone(), &tail),
            });
            (cmds, DocumentPosition::text(new_id, 0))
        }
        (_, NodePosition::Atomic(Edge::Downstream)) => {
            let cmd = Cmd::InsertNode {
                index: index + 1,
                node: Node::paragraph(new_id.clone(), ""),
            };
            (vec![cmd], DocumentPosition::text(new_id, 0))
        }
        (_, NodePosition::Atomic(Edge::Upstream)) => {
            let cmd = Cmd::InsertNode {
                index,
                node: Node::paragraph(new_id, ""),
            };
            (vec![cmd], caret)
        }
        (_, position) => {
            return Err(EditorError::PositionMismatch {
                node_id: node.id.clone(),
                node_kind: node.kind_name(),
                position,
            });
        }
    };

    let next = EditResult::apply(&cleared.document, cmds, caret)?;
    Ok(EditResult {
        patch: cleared.patch.merge(next.patch),
        ..next
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIRST: &str = "This is the first paragraph of text.";

    fn doc(selectable_rule: bool) -> Document {
        let rule = if selectable_rule {
            Node::horizontal_rule("2")
        } else {
            Node::horizontal_rule("2").unselectable()
        };
        Document::new(vec![
            Node::paragraph("1", FIRST),
            rule,
            Node::paragraph("3", "Third."),
        ])
        .unwrap()
    }

    fn caret(position: DocumentPosition) -> Selection {
        Selection::collapsed(position)
    }

    // ============ Boundary deletes next to atomic nodes ============

    #[test]
    fn test_delete_forward_selects_selectable_rule_first() {
        let doc = doc(true);
        let at_end = caret(DocumentPosition::text("1", FIRST.len()));

        let result = delete_forward(&doc, &at_end, &NodeBehaviors::new()).unwrap();

        assert_eq!(result.document.len(), 3);
        assert_eq!(result.document, doc);
        assert!(result.patch.is_empty());
        assert_eq!(result.selection, caret(DocumentPosition::upstream("2")));
    }

    #[test]
    fn test_delete_forward_removes_unselectable_rule() {
        let doc = doc(false);
        let at_end = caret(DocumentPosition::text("1", FIRST.len()));

        let result = delete_forward(&doc, &at_end, &NodeBehaviors::new()).unwrap();

        assert_eq!(result.document.len(), 2);
        assert_eq!(result.document.to_markdown(), format!("{FIRST}\n\nThird."));
        assert_eq!(result.selection, at_end);
        assert_eq!(result.patch.removed, vec![NodeId::new("2")]);
    }

    #[test]
    fn test_delete_backward_selects_selectable_rule_first() {
        let doc = doc(true);
        let at_start = caret(DocumentPosition::text("3", 0));

        let result = delete_backward(&doc, &at_start, &NodeBehaviors::new()).unwrap();

        assert_eq!(result.document.len(), 3);
        assert_eq!(result.selection, caret(DocumentPosition::downstream("2")));
    }

    #[test]
    fn test_delete_backward_removes_unselectable_rule() {
        let doc = doc(false);
        let at_start = caret(DocumentPosition::text("3", 0));

        let result = delete_backward(&doc, &at_start, &NodeBehaviors::new()).unwrap();

        assert_eq!(result.document.len(), 2);
        assert_eq!(result.selection, at_start);
        assert!(result.document.node(&"3".into()).is_some());
    }

    #[test]
    fn test_policy_override_decides_boundary_delete() {
        let doc = doc(true);
        let behaviors = NodeBehaviors::new().horizontal_rules_selectable(false);
        let at_end = caret(DocumentPosition::text("1", FIRST.len()));

        let result = delete_forward(&doc, &at_end, &behaviors).unwrap();

        assert_eq!(result.document.len(), 2);
    }

    #[test]
    fn test_boundary_between_text_nodes_is_a_no_op() {
        let doc = Document::new(vec![Node::paragraph("a", "one"), Node::paragraph("b", "two")]).unwrap();

        let forward = delete_forward(&doc, &caret(DocumentPosition::text("a", 3)), &NodeBehaviors::new())
            .unwrap();
        assert_eq!(forward.document, doc);
        assert_eq!(forward.selection, caret(DocumentPosition::text("a", 3)));

        let backward = delete_backward(&doc, &caret(DocumentPosition::text("b", 0)), &NodeBehaviors::new())
            .unwrap();
        assert_eq!(backward.document, doc);
    }

    #[test]
    fn test_document_edges_are_no_ops() {
        let doc = doc(true);

        let start = caret(DocumentPosition::text("1", 0));
        let result = delete_backward(&doc, &start, &NodeBehaviors::new()).unwrap();
        assert_eq!(result.selection, start);
        assert_eq!(result.document, doc);

        let end = caret(DocumentPosition::text("3", 6));
        let result = delete_forward(&doc, &end, &NodeBehaviors::new()).unwrap();
        assert_eq!(result.selection, end);
        assert_eq!(result.document, doc);
    }

    // ============ Deleting a selected atomic node ============

    #[test]
    fn test_second_delete_forward_removes_selected_rule() {
        let doc = doc(true);
        let behaviors = NodeBehaviors::new();
        let at_end = caret(DocumentPosition::text("1", FIRST.len()));

        let first = delete_forward(&doc, &at_end, &behaviors).unwrap();
        let second = delete_forward(&first.document, &first.selection, &behaviors).unwrap();

        assert_eq!(second.document.len(), 2);
        assert_eq!(second.selection, at_end);
    }

    #[test]
    fn test_second_backspace_removes_selected_rule() {
        let doc = doc(true);
        let behaviors = NodeBehaviors::new();
        let at_start = caret(DocumentPosition::text("3", 0));

        let first = delete_backward(&doc, &at_start, &behaviors).unwrap();
        let second = delete_backward(&first.document, &first.selection, &behaviors).unwrap();

        assert_eq!(second.document.len(), 2);
        assert_eq!(second.selection, at_start);
    }

    #[test]
    fn test_removing_last_node_leaves_empty_paragraph() {
        let doc = Document::new(vec![Node::horizontal_rule("only")]).unwrap();

        let result = delete_forward(&doc, &caret(DocumentPosition::upstream("only")), &NodeBehaviors::new())
            .unwrap();

        assert_eq!(result.document.len(), 1);
        let node = &result.document.nodes()[0];
        assert!(node.is_text());
        assert_eq!(result.selection, caret(DocumentPosition::text(node.id.clone(), 0)));
    }

    // ============ Deleting text ============

    #[test]
    fn test_delete_inside_text() {
        let doc = doc(true);

        let forward = delete_forward(&doc, &caret(DocumentPosition::text("3", 0)), &NodeBehaviors::new())
            .unwrap();
        assert_eq!(forward.document.to_markdown(), format!("{FIRST}\n\n---\n\nhird."));
        assert_eq!(forward.selection, caret(DocumentPosition::text("3", 0)));

        let backward = delete_backward(&doc, &caret(DocumentPosition::text("3", 6)), &NodeBehaviors::new())
            .unwrap();
        assert_eq!(backward.document.to_markdown(), format!("{FIRST}\n\n---\n\nThird"));
        assert_eq!(backward.selection, caret(DocumentPosition::text("3", 5)));
    }

    #[test]
    fn test_backspace_removes_whole_grapheme() {
        let doc = Document::new(vec![Node::paragraph("1", "cafe\u{301}!")]).unwrap();

        let result = delete_backward(&doc, &caret(DocumentPosition::text("1", 6)), &NodeBehaviors::new())
            .unwrap();

        assert_eq!(result.document.to_markdown(), "caf!");
        assert_eq!(result.selection, caret(DocumentPosition::text("1", 3)));
    }

    #[test]
    fn test_delete_range_across_rule() {
        let doc = doc(true);
        let range = Selection::new(DocumentPosition::text("3", 3), DocumentPosition::text("1", 8));

        let result = delete_backward(&doc, &range, &NodeBehaviors::new()).unwrap();

        assert_eq!(result.document.to_markdown(), "This is \n\nrd.");
        assert_eq!(result.selection, caret(DocumentPosition::text("1", 8)));
        assert_eq!(result.patch.removed, vec![NodeId::new("2")]);
    }

    #[test]
    fn test_delete_range_within_text() {
        let doc = doc(true);
        let range = Selection::new(DocumentPosition::text("1", 4), DocumentPosition::text("1", 7));

        let result = delete_forward(&doc, &range, &NodeBehaviors::new()).unwrap();

        assert!(result.document.to_markdown().starts_with("This the first"));
        assert_eq!(result.selection, caret(DocumentPosition::text("1", 4)));
    }

    #[test]
    fn test_delete_range_covering_rule_only() {
        let doc = doc(true);
        let range = Selection::new(DocumentPosition::upstream("2"), DocumentPosition::downstream("2"));

        let result = delete_forward(&doc, &range, &NodeBehaviors::new()).unwrap();

        assert_eq!(result.document.len(), 2);
        assert_eq!(result.selection, caret(DocumentPosition::text("1", FIRST.len())));
    }

    #[test]
    fn test_delete_range_starting_on_rule() {
        let doc = doc(true);
        let range = Selection::new(DocumentPosition::upstream("2"), DocumentPosition::text("3", 2));

        let result = delete_forward(&doc, &range, &NodeBehaviors::new()).unwrap();

        assert_eq!(result.document.to_markdown(), format!("{FIRST}\n\nird."));
        assert_eq!(result.selection, caret(DocumentPosition::text("3", 0)));
    }

    // ============ Inserting ============

    #[test]
    fn test_insert_text_at_caret() {
        let doc = doc(true);

        let result = insert_text(&doc, &caret(DocumentPosition::text("3", 0)), "The ", &NodeBehaviors::new())
            .unwrap();

        assert_eq!(result.document.to_markdown(), format!("{FIRST}\n\n---\n\nThe Third."));
        assert_eq!(result.selection, caret(DocumentPosition::text("3", 4)));
    }

    #[test]
    fn test_insert_text_replaces_range() {
        let doc = doc(true);
        let range = Selection::new(DocumentPosition::text("3", 0), DocumentPosition::text("3", 5));

        let result = insert_text(&doc, &range, "Last", &NodeBehaviors::new()).unwrap();

        assert_eq!(result.document.to_markdown(), format!("{FIRST}\n\n---\n\nLast."));
        assert_eq!(result.patch.changed, vec![NodeId::new("3")]);
        assert_eq!(result.patch.version, 2);
    }

    #[test]
    fn test_insert_text_on_rule_creates_paragraph() {
        let doc = doc(true);

        let after = insert_text(&doc, &caret(DocumentPosition::downstream("2")), "x", &NodeBehaviors::new())
            .unwrap();
        assert_eq!(after.document.to_markdown(), format!("{FIRST}\n\n---\n\nx\n\nThird."));
        assert_eq!(after.selection.extent.node_id, after.document.nodes()[2].id);

        let before = insert_text(&doc, &caret(DocumentPosition::upstream("2")), "x", &NodeBehaviors::new())
            .unwrap();
        assert_eq!(before.document.to_markdown(), format!("{FIRST}\n\nx\n\n---\n\nThird."));
    }

    #[test]
    fn test_insert_before_combining_mark_keeps_caret_on_boundary() {
        let doc = Document::new(vec![Node::paragraph("1", "\u{301}x")]).unwrap();

        let result = insert_text(&doc, &caret(DocumentPosition::text("1", 0)), "e", &NodeBehaviors::new())
            .unwrap();

        assert_eq!(result.document.to_markdown(), "e\u{301}x");
        assert_eq!(result.selection, caret(DocumentPosition::text("1", 3)));
        result.selection.validate(&result.document).unwrap();

        let erased = delete_backward(&result.document, &result.selection, &NodeBehaviors::new())
            .unwrap();
        assert_eq!(erased.document.to_markdown(), "x");
        assert_eq!(erased.selection, caret(DocumentPosition::text("1", 0)));
    }

    #[test]
    fn test_insert_text_with_newlines_splits_paragraphs() {
        let doc = doc(true);

        let result = insert_text(
            &doc,
            &caret(DocumentPosition::text("3", 0)),
            "One\r\nTwo\n",
            &NodeBehaviors::new(),
        )
        .unwrap();

        let texts: Vec<_> = result
            .document
            .nodes()
            .iter()
            .skip(2)
            .filter_map(|node| node.as_text().map(|text| text.text()))
            .collect();
        assert_eq!(texts, vec!["One", "Two", "Third."]);
        assert!(result.document.nodes().iter().all(|node| {
            node.as_text().is_none_or(|text| !text.text().contains('\n'))
        }));
        let last = &result.document.nodes()[4];
        assert_eq!(result.selection, caret(DocumentPosition::text(last.id.clone(), 0)));
        assert_eq!(result.patch.version, result.document.version());
    }

    #[test]
    fn test_split_paragraph() {
        let doc = doc(true);

        let result = split_paragraph(&doc, &caret(DocumentPosition::text("3", 2)), &NodeBehaviors::new())
            .unwrap();

        assert_eq!(result.document.to_markdown(), format!("{FIRST}\n\n---\n\nTh\n\nird."));
        let new_node = &result.document.nodes()[3];
        assert_eq!(result.selection, caret(DocumentPosition::text(new_node.id.clone(), 0)));
    }

    #[test]
    fn test_split_on_rule_upstream_keeps_caret() {
        let doc = doc(true);
        let on_rule = caret(DocumentPosition::upstream("2"));

        let result = split_paragraph(&doc, &on_rule, &NodeBehaviors::new()).unwrap();

        assert_eq!(result.document.len(), 4);
        assert!(result.document.nodes()[1].is_text());
        assert_eq!(result.selection, on_rule);
    }

    // ============ Faults ============

    #[test]
    fn test_stale_selection_is_a_fault() {
        let doc = doc(true);

        let result = delete_forward(&doc, &caret(DocumentPosition::text("9", 0)), &NodeBehaviors::new());

        assert_eq!(result, Err(EditorError::NodeNotFound(NodeId::new("9"))));
    }
}
