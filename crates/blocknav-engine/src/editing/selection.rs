use std::cmp::Ordering;
use std::ops::Range;

use crate::editing::{Document, DocumentPosition, EditorError, NodeContent, NodeId, NodePosition};

/// A base/extent pair of document positions.
///
/// The base is where the selection started and the extent is the end that
/// moves. Base may come after extent in document order; use
/// [`Selection::normalized`] for a start/end pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub base: DocumentPosition,
    pub extent: DocumentPosition,
}

/// The part of one node covered by a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectedSpan {
    /// Byte range within a text node (empty for a caret)
    Text(Range<usize>),
    /// An atomic node that is selected or holds the caret
    Atomic,
}

impl Selection {
    pub fn new(base: DocumentPosition, extent: DocumentPosition) -> Self {
        Self { base, extent }
    }

    pub fn collapsed(position: DocumentPosition) -> Self {
        Self {
            base: position.clone(),
            extent: position,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.base == self.extent
    }

    /// Both endpoints must address existing nodes with matching position kinds
    pub fn validate(&self, doc: &Document) -> Result<(), EditorError> {
        doc.validate_position(&self.base)?;
        doc.validate_position(&self.extent)?;
        Ok(())
    }

    /// True when base comes before or equals extent in document order
    pub fn is_downstream(&self, doc: &Document) -> Result<bool, EditorError> {
        Ok(compare_positions(doc, &self.base, &self.extent)? != Ordering::Greater)
    }

    /// The selection's endpoints in document order
    pub fn normalized(
        &self,
        doc: &Document,
    ) -> Result<(DocumentPosition, DocumentPosition), EditorError> {
        if self.is_downstream(doc)? {
            Ok((self.base.clone(), self.extent.clone()))
        } else {
            Ok((self.extent.clone(), self.base.clone()))
        }
    }

    /// How much of `node_id` this selection covers, if any.
    ///
    /// An atomic node at the outer edge of a range (the range starts at its
    /// downstream edge or ends at its upstream edge) is not covered.
    pub fn span_in(
        &self,
        doc: &Document,
        node_id: &NodeId,
    ) -> Result<Option<SelectedSpan>, EditorError> {
        let (start, end) = self.normalized(doc)?;
        let first = doc.validate_position(&start)?;
        let last = doc.validate_position(&end)?;
        let (index, node) = doc.require(node_id)?;

        if index < first || index > last {
            return Ok(None);
        }

        let span = match &node.content {
            NodeContent::Text(text) => {
                let from = if index == first {
                    start.position.text_offset().unwrap_or(0)
                } else {
                    0
                };
                let to = if index == last {
                    end.position.text_offset().unwrap_or(text.len())
                } else {
                    text.len()
                };
                Some(SelectedSpan::Text(from..to))
            }
            NodeContent::Atomic(_) => {
                let starts_after = index == first
                    && index != last
                    && start.position == NodePosition::downstream();
                let ends_before =
                    index == last && index != first && end.position == NodePosition::upstream();
                if starts_after || ends_before {
                    None
                } else {
                    Some(SelectedSpan::Atomic)
                }
            }
        };
        Ok(span)
    }
}

/// Order two positions by node order, then by position within the node
pub fn compare_positions(
    doc: &Document,
    a: &DocumentPosition,
    b: &DocumentPosition,
) -> Result<Ordering, EditorError> {
    let a_index = doc.validate_position(a)?;
    let b_index = doc.validate_position(b)?;
    match a_index.cmp(&b_index) {
        Ordering::Equal => Ok(a.position.compare(&b.position).unwrap_or(Ordering::Equal)),
        other => Ok(other),
    }
}
