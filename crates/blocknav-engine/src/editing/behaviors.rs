use std::fmt;

use crate::editing::{AtomicKind, Document, Node, NodeContent};

type Predicate = Box<dyn Fn(&Node) -> bool + Send + Sync>;

struct Override {
    label: String,
    applies: Predicate,
    selectable: bool,
}

/// Per-node selectability policy.
///
/// Overrides are consulted in the order they were added and the first one
/// whose predicate matches decides. Without a match, text nodes are
/// selectable and atomic nodes use their own `selectable` flag.
///
/// Unselectable nodes never anchor a selection: navigation and taps treat
/// them as transparent.
#[derive(Default)]
pub struct NodeBehaviors {
    overrides: Vec<Override>,
}

impl NodeBehaviors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an override for every node matching `applies`
    pub fn with_override(
        mut self,
        label: impl Into<String>,
        applies: impl Fn(&Node) -> bool + Send + Sync + 'static,
        selectable: bool,
    ) -> Self {
        self.overrides.push(Override {
            label: label.into(),
            applies: Box::new(applies),
            selectable,
        });
        self
    }

    pub fn horizontal_rules_selectable(self, selectable: bool) -> Self {
        self.with_override(
            "horizontal rules",
            |node| {
                matches!(
                    node.as_atomic().map(|atomic| &atomic.kind),
                    Some(AtomicKind::HorizontalRule)
                )
            },
            selectable,
        )
    }

    pub fn images_selectable(self, selectable: bool) -> Self {
        self.with_override(
            "images",
            |node| {
                matches!(
                    node.as_atomic().map(|atomic| &atomic.kind),
                    Some(AtomicKind::Image { .. })
                )
            },
            selectable,
        )
    }

    pub fn is_selectable(&self, node: &Node) -> bool {
        if let Some(rule) = self.overrides.iter().find(|rule| (rule.applies)(node)) {
            return rule.selectable;
        }
        match &node.content {
            NodeContent::Text(_) => true,
            NodeContent::Atomic(atomic) => atomic.selectable,
        }
    }

    /// Index of the nearest selectable node after (`forward`) or before
    /// `index`, skipping unselectable ones
    pub fn next_selectable(&self, doc: &Document, index: usize, forward: bool) -> Option<usize> {
        let mut candidate = index;
        loop {
            candidate = if forward {
                candidate.checked_add(1).filter(|&i| i < doc.len())?
            } else {
                candidate.checked_sub(1)?
            };
            let node = doc.node_at(candidate)?;
            if self.is_selectable(node) {
                return Some(candidate);
            }
            log::debug!("skipping unselectable {} node {}", node.kind_name(), node.id);
        }
    }

    /// Index of the first (or with `forward = false`, the last) selectable node
    pub fn edge_selectable(&self, doc: &Document, forward: bool) -> Option<usize> {
        if forward {
            doc.nodes().iter().position(|node| self.is_selectable(node))
        } else {
            doc.nodes().iter().rposition(|node| self.is_selectable(node))
        }
    }
}

impl fmt::Debug for NodeBehaviors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let overrides: Vec<_> = self
            .overrides
            .iter()
            .map(|rule| (rule.label.as_str(), rule.selectable))
            .collect();
        f.debug_struct("NodeBehaviors")
            .field("overrides", &overrides)
            .finish()
    }
}
