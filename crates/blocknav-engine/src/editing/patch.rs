use crate::editing::NodeId;

/// Result of applying one or more commands to a document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Patch {
    /// Nodes inserted or whose text changed
    pub changed: Vec<NodeId>,
    /// Nodes removed from the document
    pub removed: Vec<NodeId>,
    pub version: u64,
}

impl Patch {
    /// A patch describing no change at `version`
    pub fn unchanged(version: u64) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.removed.is_empty()
    }

    /// Fold a later patch into this one
    pub fn merge(mut self, later: Patch) -> Self {
        for id in later.changed {
            if !self.changed.contains(&id) {
                self.changed.push(id);
            }
        }
        for id in later.removed {
            self.changed.retain(|changed| changed != &id);
            if !self.removed.contains(&id) {
                self.removed.push(id);
            }
        }
        self.version = self.version.max(later.version);
        self
    }
}
