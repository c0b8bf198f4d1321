/*!
 * # Editing Core Module
 *
 * Caret navigation, selection and boundary edits over a flat sequence of
 * block nodes.
 *
 * ## Model
 *
 * ### 1. Nodes
 * - A **`Document`** is an ordered list of **`Node`**s with unique `NodeId`s
 * - **Text** nodes hold a paragraph in an **`xi_rope::Rope`**; offsets are UTF-8
 *   byte offsets on grapheme boundaries
 * - **Atomic** nodes (horizontal rules, images) have no interior: the caret can
 *   only sit at their **upstream** or **downstream** edge
 *
 * ### 2. Positions and Selections
 * - A **`DocumentPosition`** pairs a node id with a **`NodePosition`**
 * - A **`Selection`** has a **base** (where it started) and an **extent** (the
 *   end that moves); collapsed when both are equal
 *
 * ### 3. Selectability
 * - **`NodeBehaviors`** decides per node whether it can hold the caret
 * - Unselectable nodes are skipped by movement, ignored by taps and removed
 *   outright by a delete that reaches them
 *
 * ### 4. Commands
 * - Every mutation is a **`Cmd`** applied through `Document::apply`, which bumps
 *   the document version and returns a **`Patch`**
 * - Navigation, hit resolution and edits are pure functions over
 *   `(&Document, &Selection)`
 *
 * ## Module Structure
 *
 * - **`node`** / **`position`**: node content and caret positions
 * - **`document`** / **`commands`** / **`patch`**: storage and mutation
 * - **`selection`**: base/extent pairs and document ordering
 * - **`behaviors`**: selectability policy
 * - **`navigation`**: arrow-key movement
 * - **`hit`**: tap resolution
 * - **`edits`**: delete, insert and split
 * - **`editor`**: stateful facade dispatching `Intent`s
 *
 * ## Usage Pattern
 *
 * ```rust
 * use blocknav_engine::editing::*;
 *
 * let doc = Document::new(vec![
 *     Node::paragraph("1", "Hello"),
 *     Node::horizontal_rule("2"),
 * ])
 * .unwrap();
 * let mut editor = Editor::new(doc, NodeBehaviors::new());
 *
 * editor
 *     .handle(Intent::Tap { node_id: "1".into(), tap: LocalTap::Offset(5) })
 *     .unwrap();
 * editor.handle(Intent::Move(Movement::new(Direction::Right))).unwrap();
 * assert_eq!(
 *     editor.selection(),
 *     Some(&Selection::collapsed(DocumentPosition::upstream("2")))
 * );
 * ```
 */

pub mod behaviors;
pub mod commands;
pub mod document;
pub mod editor;
pub mod edits;
pub mod error;
pub mod hit;
pub mod navigation;
pub mod node;
pub mod patch;
pub mod position;
pub mod selection;

pub use behaviors::NodeBehaviors;
pub use commands::Cmd;
pub use document::Document;
pub use editor::{Editor, Intent};
pub use edits::{EditResult, delete_backward, delete_forward, insert_text, split_paragraph};
pub use error::EditorError;
pub use hit::{LocalTap, resolve_tap};
pub use navigation::{Direction, MoveUnit, Movement, move_caret, select_all};
pub use node::{AtomicContent, AtomicKind, Node, NodeContent, NodeId, TextContent};
pub use patch::Patch;
pub use position::{Affinity, DocumentPosition, Edge, NodePosition, TextPosition};
pub use selection::{SelectedSpan, Selection, compare_positions};
