use std::collections::HashSet;

use crate::editing::{Cmd, DocumentPosition, EditorError, Node, NodeId, Patch};

/// An ordered sequence of top-level nodes.
///
/// Node order is the only structure: "next" and "previous" are neighbours in
/// the sequence, there is no nesting. The node list changes only through
/// [`Cmd`]s applied with [`Document::apply`], which also bumps the version.
///
/// ```rust
/// # use blocknav_engine::editing::{Cmd, Document, Node};
/// let mut doc = Document::new(vec![
///     Node::paragraph("1", "Hello"),
///     Node::horizontal_rule("2"),
/// ])
/// .unwrap();
///
/// let patch = doc.apply(Cmd::RemoveNode { id: "2".into() }).unwrap();
/// assert_eq!(doc.len(), 1);
/// assert_eq!(patch.version, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub(crate) nodes: Vec<Node>,
    /// Incremented on each applied command
    pub(crate) version: u64,
}

impl Document {
    /// Create a document, rejecting duplicate node ids
    pub fn new(nodes: Vec<Node>) -> Result<Self, EditorError> {
        let mut seen = HashSet::new();
        for node in &nodes {
            if !seen.insert(&node.id) {
                return Err(EditorError::DuplicateNodeId(node.id.clone()));
            }
        }
        Ok(Self { nodes, version: 0 })
    }

    /// Create a document from markdown bytes
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(crate::markdown::from_markdown(text))
    }

    /// Serialize to markdown, one block per node
    pub fn to_markdown(&self) -> String {
        crate::markdown::to_markdown(self)
    }

    /// Apply a command to the document
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EditorError> {
        let mut patch = crate::editing::commands::apply_command(self, cmd)?;
        self.version += 1;
        patch.version = self.version;
        Ok(patch)
    }

    /// Apply several commands in order, folding their patches.
    /// Stops at the first failing command.
    pub fn apply_all(&mut self, cmds: Vec<Cmd>) -> Result<Patch, EditorError> {
        let mut patch = Patch::unchanged(self.version);
        for cmd in cmds {
            patch = patch.merge(self.apply(cmd)?);
        }
        Ok(patch)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    pub fn node_at(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.nodes.iter().position(|node| &node.id == id)
    }

    /// Look up a node that must exist
    pub fn require(&self, id: &NodeId) -> Result<(usize, &Node), EditorError> {
        self.nodes
            .iter()
            .enumerate()
            .find(|(_, node)| &node.id == id)
            .ok_or_else(|| EditorError::NodeNotFound(id.clone()))
    }

    pub fn node_before(&self, id: &NodeId) -> Option<&Node> {
        let index = self.index_of(id)?;
        index.checked_sub(1).and_then(|i| self.nodes.get(i))
    }

    pub fn node_after(&self, id: &NodeId) -> Option<&Node> {
        let index = self.index_of(id)?;
        self.nodes.get(index + 1)
    }

    /// Check that `position` addresses an existing node with a matching
    /// position kind, returning the node's index
    pub fn validate_position(&self, position: &DocumentPosition) -> Result<usize, EditorError> {
        let (index, node) = self.require(&position.node_id)?;
        position.position.validate_for(node)?;
        Ok(index)
    }
}
