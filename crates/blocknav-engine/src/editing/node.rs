use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

use xi_rope::delta::Builder;
use xi_rope::Rope;

use crate::editing::{Affinity, Edge, NodePosition, TextPosition};

/// Stable identifier of a node, unique within a document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier for nodes created by edits
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Paragraph text stored in an xi-rope buffer.
///
/// Offsets are UTF-8 byte offsets. Caret movement steps over grapheme
/// clusters, so valid caret offsets are grapheme boundaries in `0..=len`.
#[derive(Clone, Default)]
pub struct TextContent {
    rope: Rope,
}

impl TextContent {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from(text),
        }
    }

    pub fn len(&self) -> usize {
        self.rope.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len() == 0
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn slice(&self, range: Range<usize>) -> Cow<'_, str> {
        let len = self.rope.len();
        let start = range.start.min(len);
        let end = range.end.min(len).max(start);
        self.rope.slice_to_cow(start..end)
    }

    /// Offset of the grapheme boundary after `offset`, if any
    pub fn next_grapheme(&self, offset: usize) -> Option<usize> {
        if offset >= self.len() {
            return None;
        }
        self.rope.next_grapheme_offset(offset)
    }

    /// Offset of the grapheme boundary before `offset`, if any
    pub fn prev_grapheme(&self, offset: usize) -> Option<usize> {
        if offset == 0 || offset > self.len() {
            return None;
        }
        self.rope.prev_grapheme_offset(offset)
    }

    pub fn is_grapheme_boundary(&self, offset: usize) -> bool {
        if offset == 0 || offset == self.len() {
            return true;
        }
        if offset > self.len() || !self.text().is_char_boundary(offset) {
            return false;
        }
        self.prev_grapheme(offset)
            .and_then(|prev| self.next_grapheme(prev))
            == Some(offset)
    }

    /// Clamp `offset` into the text and snap it back to a grapheme boundary
    pub fn floor_boundary(&self, offset: usize) -> usize {
        let text = self.text();
        let mut offset = offset.min(text.len());
        while !text.is_char_boundary(offset) {
            offset -= 1;
        }
        if self.is_grapheme_boundary(offset) {
            offset
        } else {
            self.prev_grapheme(offset).unwrap_or(0)
        }
    }

    /// Clamp `offset` into the text and push it forward to a grapheme boundary
    pub fn ceil_boundary(&self, offset: usize) -> usize {
        let text = self.text();
        let mut offset = offset.min(text.len());
        while !text.is_char_boundary(offset) {
            offset += 1;
        }
        if self.is_grapheme_boundary(offset) {
            offset
        } else {
            self.next_grapheme(offset).unwrap_or(text.len())
        }
    }

    /// End of the word at or after `offset`: skips whitespace/punctuation,
    /// then a run of word characters.
    pub fn word_end(&self, offset: usize) -> usize {
        let text = self.text();
        let mut chars = text[offset.min(text.len())..].char_indices().peekable();
        let mut end = offset;

        while let Some((_, c)) = chars.peek() {
            if is_word_char(*c) {
                break;
            }
            end = offset + chars.next().map_or(0, |(i, c)| i + c.len_utf8());
        }
        while let Some((_, c)) = chars.peek() {
            if !is_word_char(*c) {
                break;
            }
            end = offset + chars.next().map_or(0, |(i, c)| i + c.len_utf8());
        }

        self.floor_boundary(end.max(offset))
    }

    /// Start of the word at or before `offset`, the mirror of [`Self::word_end`]
    pub fn word_start(&self, offset: usize) -> usize {
        let text = self.text();
        let head = &text[..offset.min(text.len())];
        let mut chars = head.char_indices().rev().peekable();
        let mut start = head.len();

        while let Some((_, c)) = chars.peek() {
            if is_word_char(*c) {
                break;
            }
            start = chars.next().map_or(start, |(i, _)| i);
        }
        while let Some((_, c)) = chars.peek() {
            if !is_word_char(*c) {
                break;
            }
            start = chars.next().map_or(start, |(i, _)| i);
        }

        self.floor_boundary(start)
    }

    /// Replace `range` with `text`, returning the new content
    pub fn splice(&self, range: Range<usize>, text: &str) -> Self {
        let mut builder = Builder::new(self.rope.len());
        if text.is_empty() {
            builder.delete(range);
        } else {
            builder.replace(range, Rope::from(text));
        }
        let delta = builder.build();
        Self {
            rope: delta.apply(&self.rope),
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl fmt::Debug for TextContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextContent").field(&self.text()).finish()
    }
}

impl PartialEq for TextContent {
    fn eq(&self, other: &Self) -> bool {
        // Rope has no structural equality, compare the text itself
        self.rope.len() == other.rope.len() && self.text() == other.text()
    }
}

impl Eq for TextContent {}

impl From<&str> for TextContent {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Kinds of content without addressable offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtomicKind {
    HorizontalRule,
    Image { url: String, alt: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomicContent {
    pub kind: AtomicKind,
    /// Per-instance selectability, consulted when no behaviour override matches
    pub selectable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeContent {
    Text(TextContent),
    Atomic(AtomicContent),
}

/// A top-level block of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub content: NodeContent,
}

impl Node {
    pub fn paragraph(id: impl Into<NodeId>, text: &str) -> Self {
        Self {
            id: id.into(),
            content: NodeContent::Text(TextContent::new(text)),
        }
    }

    pub fn horizontal_rule(id: impl Into<NodeId>) -> Self {
        Self::atomic(id, AtomicKind::HorizontalRule)
    }

    pub fn image(id: impl Into<NodeId>, url: &str, alt: &str) -> Self {
        Self::atomic(
            id,
            AtomicKind::Image {
                url: url.to_string(),
                alt: alt.to_string(),
            },
        )
    }

    fn atomic(id: impl Into<NodeId>, kind: AtomicKind) -> Self {
        Self {
            id: id.into(),
            content: NodeContent::Atomic(AtomicContent {
                kind,
                selectable: true,
            }),
        }
    }

    /// Mark an atomic node as unselectable. Text nodes are always selectable.
    pub fn unselectable(mut self) -> Self {
        if let NodeContent::Atomic(atomic) = &mut self.content {
            atomic.selectable = false;
        }
        self
    }

    /// Human readable name of the node's kind, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match &self.content {
            NodeContent::Text(_) => "text",
            NodeContent::Atomic(AtomicContent {
                kind: AtomicKind::HorizontalRule,
                ..
            }) => "horizontal rule",
            NodeContent::Atomic(AtomicContent {
                kind: AtomicKind::Image { .. },
                ..
            }) => "image",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.content, NodeContent::Text(_))
    }

    pub fn as_text(&self) -> Option<&TextContent> {
        match &self.content {
            NodeContent::Text(text) => Some(text),
            NodeContent::Atomic(_) => None,
        }
    }

    pub fn as_atomic(&self) -> Option<&AtomicContent> {
        match &self.content {
            NodeContent::Atomic(atomic) => Some(atomic),
            NodeContent::Text(_) => None,
        }
    }

    /// First caret position inside this node
    pub fn start_position(&self) -> NodePosition {
        match &self.content {
            NodeContent::Text(_) => NodePosition::Text(TextPosition::new(0)),
            NodeContent::Atomic(_) => NodePosition::Atomic(Edge::Upstream),
        }
    }

    /// Last caret position inside this node
    pub fn end_position(&self) -> NodePosition {
        match &self.content {
            NodeContent::Text(text) => NodePosition::Text(TextPosition::with_affinity(
                text.len(),
                Affinity::Upstream,
            )),
            NodeContent::Atomic(_) => NodePosition::Atomic(Edge::Downstream),
        }
    }
}
