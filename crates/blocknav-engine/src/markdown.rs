//! Markdown import and export.
//!
//! Import flattens the markdown block structure into top-level nodes: every
//! leaf text block (paragraph, heading, list item, code block) becomes a text
//! node, thematic breaks become horizontal rules and a paragraph holding a
//! single image becomes an image node. Inline formatting is dropped.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

use crate::editing::{AtomicKind, Document, Node, NodeContent, NodeId};

/// Parse markdown into a document with ids `"1"`, `"2"`, ... in order
pub fn from_markdown(content: &str) -> Document {
    let mut blocks = BlockCollector::default();

    for event in Parser::new(content) {
        match event {
            Event::Start(
                Tag::Paragraph | Tag::Heading { .. } | Tag::CodeBlock(_) | Tag::Item,
            ) => {
                blocks.flush();
                blocks.depth += 1;
            }
            Event::End(
                TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::CodeBlock | TagEnd::Item,
            ) => {
                blocks.flush();
                blocks.depth = blocks.depth.saturating_sub(1);
            }
            Event::Start(Tag::Image { dest_url, .. }) if blocks.depth > 0 => {
                blocks.images.push((dest_url.to_string(), String::new()));
                blocks.in_image = true;
            }
            Event::End(TagEnd::Image) => blocks.in_image = false,
            Event::Text(text) | Event::Code(text) => blocks.push_text(&text),
            Event::SoftBreak | Event::HardBreak => blocks.push_text(" "),
            Event::Rule => {
                blocks.flush();
                blocks.emit(Node::horizontal_rule);
            }
            _ => {}
        }
    }
    blocks.flush();

    log::debug!("imported {} nodes from markdown", blocks.nodes.len());
    Document {
        nodes: blocks.nodes,
        version: 0,
    }
}

/// Serialize a document: one block per node, separated by blank lines.
///
/// Paragraph text is escaped so that it reads back as the same paragraph,
/// and an empty paragraph is written as a lone `&nbsp;`.
pub fn to_markdown(doc: &Document) -> String {
    doc.nodes()
        .iter()
        .map(|node| match &node.content {
            NodeContent::Text(text) => paragraph_markdown(&text.text()),
            NodeContent::Atomic(atomic) => match &atomic.kind {
                AtomicKind::HorizontalRule => "---".to_string(),
                AtomicKind::Image { url, alt } => format!("![{}]({url})", escape_inline(alt)),
            },
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

const EMPTY_PARAGRAPH: &str = "&nbsp;";

fn paragraph_markdown(text: &str) -> String {
    if text.trim().is_empty() {
        return EMPTY_PARAGRAPH.to_string();
    }

    let escaped = escape_inline(text);
    let body = escaped.trim_start();
    let indent = &escaped[..escaped.len() - body.len()];
    let digits = body.chars().take_while(char::is_ascii_digit).count();
    let marker = body[digits..].chars().next();
    match marker {
        // Ordered list marker: `1.` or `1)`
        Some(marker @ ('.' | ')')) if digits > 0 => {
            format!("{indent}{}\\{marker}{}", &body[..digits], &body[digits + 1..])
        }
        Some('#' | '-' | '+' | '=' | '|') if digits == 0 => format!("{indent}\\{body}"),
        _ => escaped,
    }
}

/// Backslash-escape characters that would start inline markup
fn escape_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '&' | '~') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[derive(Default)]
struct BlockCollector {
    nodes: Vec<Node>,
    depth: usize,
    text: String,
    /// `(url, alt)` of images seen in the current block
    images: Vec<(String, String)>,
    in_image: bool,
    has_plain_text: bool,
    /// Any text event at all, including a lone `&nbsp;`
    has_text: bool,
}

impl BlockCollector {
    fn push_text(&mut self, text: &str) {
        if self.depth == 0 {
            return;
        }
        self.has_text = true;
        if self.in_image
            && let Some((_, alt)) = self.images.last_mut()
        {
            alt.push_str(text);
        } else if !text.trim().is_empty() {
            self.has_plain_text = true;
        }
        self.text.push_str(text);
    }

    fn emit(&mut self, build: impl FnOnce(NodeId) -> Node) {
        let id = NodeId::new((self.nodes.len() + 1).to_string());
        self.nodes.push(build(id));
    }

    fn flush(&mut self) {
        let text = std::mem::take(&mut self.text);
        let images = std::mem::take(&mut self.images);
        let has_plain_text = std::mem::replace(&mut self.has_plain_text, false);
        let has_text = std::mem::replace(&mut self.has_text, false);

        if let [(url, alt)] = images.as_slice()
            && !has_plain_text
        {
            self.emit(|id| Node::image(id, url, alt));
            return;
        }

        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if has_text {
            self.emit(|id| Node::paragraph(id, &text));
        }
    }
}
