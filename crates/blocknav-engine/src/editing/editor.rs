use crate::editing::{
    Document, EditResult, EditorError, LocalTap, Movement, NodeBehaviors, NodeId, Patch,
    Selection, delete_backward, delete_forward, insert_text, move_caret, resolve_tap, select_all,
    split_paragraph,
};

/// A user action, already decoded from whatever input device produced it
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Move(Movement),
    Tap { node_id: NodeId, tap: LocalTap },
    DeleteForward,
    DeleteBackward,
    InsertText(String),
    SplitParagraph,
    SelectAll,
}

/// Owns a document, the current selection and the selectability policy, and
/// turns [`Intent`]s into new state.
#[derive(Debug)]
pub struct Editor {
    document: Document,
    selection: Option<Selection>,
    behaviors: NodeBehaviors,
}

impl Editor {
    pub fn new(document: Document, behaviors: NodeBehaviors) -> Self {
        Self {
            document,
            selection: None,
            behaviors,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn behaviors(&self) -> &NodeBehaviors {
        &self.behaviors
    }

    /// Replace the selection; positions are checked against the document
    pub fn set_selection(&mut self, selection: Option<Selection>) -> Result<(), EditorError> {
        if let Some(selection) = &selection {
            selection.validate(&self.document)?;
        }
        self.selection = selection;
        Ok(())
    }

    /// Apply one intent. Returns the patch when the document changed.
    ///
    /// Edits without a selection are ignored.
    pub fn handle(&mut self, intent: Intent) -> Result<Option<Patch>, EditorError> {
        log::debug!("handling {intent:?}");
        match intent {
            Intent::Move(movement) => {
                self.selection =
                    move_caret(&self.document, self.selection.as_ref(), movement, &self.behaviors)?;
                Ok(None)
            }
            Intent::Tap { node_id, tap } => {
                self.selection = resolve_tap(&self.document, &node_id, tap, &self.behaviors)?;
                Ok(None)
            }
            Intent::SelectAll => {
                self.selection = select_all(&self.document, &self.behaviors);
                Ok(None)
            }
            Intent::DeleteForward => self.edit(|doc, selection, behaviors| {
                delete_forward(doc, selection, behaviors)
            }),
            Intent::DeleteBackward => self.edit(|doc, selection, behaviors| {
                delete_backward(doc, selection, behaviors)
            }),
            Intent::InsertText(text) => self.edit(|doc, selection, behaviors| {
                insert_text(doc, selection, &text, behaviors)
            }),
            Intent::SplitParagraph => self.edit(split_paragraph),
        }
    }

    fn edit(
        &mut self,
        op: impl FnOnce(&Document, &Selection, &NodeBehaviors) -> Result<EditResult, EditorError>,
    ) -> Result<Option<Patch>, EditorError> {
        let Some(selection) = &self.selection else {
            log::debug!("no selection, edit ignored");
            return Ok(None);
        };
        let result = op(&self.document, selection, &self.behaviors)?;
        self.document = result.document;
        self.selection = Some(result.selection);
        if result.patch.is_empty() {
            Ok(None)
        } else {
            Ok(Some(result.patch))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{Direction, DocumentPosition, Node};
    use pretty_assertions::assert_eq;

    fn editor() -> Editor {
        let doc = Document::new(vec![
            Node::paragraph("1", "Hello"),
            Node::horizontal_rule("2"),
            Node::paragraph("3", "World"),
        ])
        .unwrap();
        Editor::new(doc, NodeBehaviors::new())
    }

    #[test]
    fn test_edits_without_selection_are_ignored() {
        let mut editor = editor();

        assert_eq!(editor.handle(Intent::DeleteForward).unwrap(), None);
        assert_eq!(editor.handle(Intent::InsertText("x".into())).unwrap(), None);
        assert_eq!(editor.document().to_markdown(), "Hello\n\n---\n\nWorld");
        assert_eq!(editor.selection(), None);
    }

    #[test]
    fn test_tap_then_move_then_delete() {
        let mut editor = editor();

        editor
            .handle(Intent::Tap {
                node_id: "1".into(),
                tap: LocalTap::Offset(5),
            })
            .unwrap();
        editor
            .handle(Intent::Move(Movement::new(Direction::Right)))
            .unwrap();
        assert_eq!(
            editor.selection(),
            Some(&Selection::collapsed(DocumentPosition::upstream("2")))
        );

        let patch = editor.handle(Intent::DeleteForward).unwrap().unwrap();

        assert_eq!(patch.removed, vec![NodeId::new("2")]);
        assert_eq!(editor.document().to_markdown(), "Hello\n\nWorld");
        assert_eq!(
            editor.selection(),
            Some(&Selection::collapsed(DocumentPosition::text("1", 5)))
        );
    }

    #[test]
    fn test_tap_on_unselectable_node_clears_selection() {
        let doc = Document::new(vec![
            Node::paragraph("1", "Hello"),
            Node::horizontal_rule("2").unselectable(),
        ])
        .unwrap();
        let mut editor = Editor::new(doc, NodeBehaviors::new());
        editor
            .set_selection(Some(Selection::collapsed(DocumentPosition::text("1", 0))))
            .unwrap();

        editor
            .handle(Intent::Tap {
                node_id: "2".into(),
                tap: LocalTap::Fraction(0.9),
            })
            .unwrap();

        assert_eq!(editor.selection(), None);
    }

    #[test]
    fn test_typing_updates_caret() {
        let mut editor = editor();
        editor
            .set_selection(Some(Selection::collapsed(DocumentPosition::text("3", 0))))
            .unwrap();

        let patch = editor.handle(Intent::InsertText("Big ".into())).unwrap();

        assert_eq!(patch.map(|patch| patch.changed), Some(vec![NodeId::new("3")]));
        assert_eq!(editor.document().to_markdown(), "Hello\n\n---\n\nBig World");
        assert_eq!(
            editor.selection(),
            Some(&Selection::collapsed(DocumentPosition::text("3", 4)))
        );
    }

    #[test]
    fn test_set_selection_rejects_stale_position() {
        let mut editor = editor();

        let result = editor.set_selection(Some(Selection::collapsed(DocumentPosition::text("2", 0))));

        assert!(matches!(result, Err(EditorError::PositionMismatch { .. })));
        assert_eq!(editor.selection(), None);
    }

    #[test]
    fn test_select_all() {
        let mut editor = editor();

        editor.handle(Intent::SelectAll).unwrap();

        assert_eq!(
            editor.selection(),
            Some(&Selection::new(
                DocumentPosition::text("1", 0),
                DocumentPosition::text("3", 5)
            ))
        );
    }
}
