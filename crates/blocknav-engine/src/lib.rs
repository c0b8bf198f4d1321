pub mod editing;
pub mod io;
pub mod markdown;

// Re-export key types for easier usage
pub use editing::{
    Direction, Document, DocumentPosition, Editor, EditorError, Intent, LocalTap, Movement,
    Node, NodeBehaviors, NodeId, Selection,
};
pub use io::*;
