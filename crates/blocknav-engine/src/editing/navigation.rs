//! Caret and extent movement across node boundaries.
//!
//! Movement never lands on an unselectable node: those are skipped as if
//! absent. When nothing selectable lies in the direction of travel the
//! selection is returned unchanged.

use crate::editing::{
    Affinity, Document, DocumentPosition, Edge, EditorError, Node, NodeBehaviors, NodeContent,
    NodePosition, Selection, TextPosition,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    /// Backward
    Left,
    /// Forward
    Right,
}

impl Direction {
    pub fn is_forward(self) -> bool {
        matches!(self, Direction::Down | Direction::Right)
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

/// How far a horizontal move travels inside a text node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveUnit {
    #[default]
    Character,
    Word,
    /// Start or end of the node's text
    LineEdge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movement {
    pub direction: Direction,
    pub unit: MoveUnit,
    /// Keep the base and move only the extent
    pub extend: bool,
}

impl Movement {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            unit: MoveUnit::Character,
            extend: false,
        }
    }

    pub fn by(mut self, unit: MoveUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn extending(mut self) -> Self {
        self.extend = true;
        self
    }
}

/// Move the caret, or the extent of a range, one step.
///
/// Returns `Ok(None)` only when there is no current selection. A move that
/// finds nothing to land on returns the current selection unchanged.
pub fn move_caret(
    doc: &Document,
    current: Option<&Selection>,
    movement: Movement,
    behaviors: &NodeBehaviors,
) -> Result<Option<Selection>, EditorError> {
    let Some(current) = current else {
        return Ok(None);
    };
    current.validate(doc)?;

    let forward = movement.direction.is_forward();

    // A plain horizontal move out of a range collapses onto the range edge
    if !movement.extend && !current.is_collapsed() && !movement.direction.is_vertical() {
        let (start, end) = current.normalized(doc)?;
        let edge = if forward { end } else { start };
        return Ok(Some(Selection::collapsed(edge)));
    }

    let Some(next) = step(doc, &current.extent, movement, behaviors)? else {
        log::debug!(
            "no selectable position {:?} of {}, selection unchanged",
            movement.direction,
            current.extent.node_id
        );
        return Ok(Some(current.clone()));
    };

    let selection = if movement.extend {
        Selection::new(current.base.clone(), next)
    } else {
        Selection::collapsed(next)
    };
    Ok(Some(selection))
}

/// Compute the position one step from `from`, or `None` if movement is blocked
fn step(
    doc: &Document,
    from: &DocumentPosition,
    movement: Movement,
    behaviors: &NodeBehaviors,
) -> Result<Option<DocumentPosition>, EditorError> {
    let (index, node) = doc.require(&from.node_id)?;
    from.position.validate_for(node)?;

    let forward = movement.direction.is_forward();
    if movement.direction.is_vertical() {
        return Ok(step_vertical(doc, index, &from.position, forward, behaviors));
    }

    if let Some(position) = step_within(node, &from.position, forward, movement.unit) {
        return Ok(Some(DocumentPosition::new(node.id.clone(), position)));
    }
    if movement.unit == MoveUnit::LineEdge {
        return Ok(None);
    }
    Ok(enter_adjacent(doc, index, forward, behaviors))
}

/// Horizontal movement that stays inside the current node
fn step_within(
    node: &Node,
    position: &NodePosition,
    forward: bool,
    unit: MoveUnit,
) -> Option<NodePosition> {
    match (&node.content, position) {
        (NodeContent::Text(text), NodePosition::Text(pos)) => {
            let len = text.len();
            let offset = match (forward, unit) {
                (true, MoveUnit::Character) => text.next_grapheme(pos.offset),
                (false, MoveUnit::Character) => text.prev_grapheme(pos.offset),
                (true, MoveUnit::Word) => (pos.offset < len).then(|| text.word_end(pos.offset)),
                (false, MoveUnit::Word) => (pos.offset > 0).then(|| text.word_start(pos.offset)),
                (true, MoveUnit::LineEdge) => (pos.offset < len).then_some(len),
                (false, MoveUnit::LineEdge) => (pos.offset > 0).then_some(0),
            }?;
            let affinity = if forward && offset == len {
                Affinity::Upstream
            } else {
                Affinity::Downstream
            };
            Some(NodePosition::Text(TextPosition::with_affinity(offset, affinity)))
        }
        // Crossing an atomic node goes through both of its edges
        (NodeContent::Atomic(_), NodePosition::Atomic(Edge::Upstream)) if forward => {
            Some(NodePosition::Atomic(Edge::Downstream))
        }
        (NodeContent::Atomic(_), NodePosition::Atomic(Edge::Downstream)) if !forward => {
            Some(NodePosition::Atomic(Edge::Upstream))
        }
        _ => None,
    }
}

/// Land in the nearest selectable node beyond `index`, at the edge facing
/// the direction of travel
fn enter_adjacent(
    doc: &Document,
    index: usize,
    forward: bool,
    behaviors: &NodeBehaviors,
) -> Option<DocumentPosition> {
    let target = doc.node_at(behaviors.next_selectable(doc, index, forward)?)?;
    let position = if forward {
        target.start_position()
    } else {
        target.end_position()
    };
    Some(DocumentPosition::new(target.id.clone(), position))
}

/// Up/Down without layout: carry the text offset into the adjacent node.
/// Going down onto an atomic node lands on its downstream edge, going up
/// lands on its upstream edge.
fn step_vertical(
    doc: &Document,
    index: usize,
    from: &NodePosition,
    forward: bool,
    behaviors: &NodeBehaviors,
) -> Option<DocumentPosition> {
    let target = doc.node_at(behaviors.next_selectable(doc, index, forward)?)?;

    let position = match &target.content {
        NodeContent::Text(text) => {
            let offset = match from {
                NodePosition::Text(pos) => text.floor_boundary(pos.offset),
                NodePosition::Atomic(_) if forward => 0,
                NodePosition::Atomic(_) => text.len(),
            };
            let affinity = if offset == text.len() && offset > 0 {
                Affinity::Upstream
            } else {
                Affinity::Downstream
            };
            NodePosition::Text(TextPosition::with_affinity(offset, affinity))
        }
        NodeContent::Atomic(_) if forward => NodePosition::Atomic(Edge::Downstream),
        NodeContent::Atomic(_) => NodePosition::Atomic(Edge::Upstream),
    };
    Some(DocumentPosition::new(target.id.clone(), position))
}

/// Select from the first to the last selectable position
pub fn select_all(doc: &Document, behaviors: &NodeBehaviors) -> Option<Selection> {
    let first = doc.node_at(behaviors.edge_selectable(doc, true)?)?;
    let last = doc.node_at(behaviors.edge_selectable(doc, false)?)?;
    Some(Selection::new(
        DocumentPosition::new(first.id.clone(), first.start_position()),
        DocumentPosition::new(last.id.clone(), last.end_position()),
    ))
}
