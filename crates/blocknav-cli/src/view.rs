//! Rendering nodes to terminal lines and mapping mouse clicks back to nodes.
//!
//! One node per row, no wrapping. The content area has a one-cell border.

use blocknav_engine::editing::{
    AtomicKind, Edge, Editor, Intent, LocalTap, Node, NodeContent, NodePosition, SelectedSpan,
};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthChar;

fn highlight() -> Style {
    Style::default().bg(Color::Yellow).fg(Color::Black)
}

fn caret_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

pub fn document_lines(editor: &Editor, width: u16) -> Vec<Line<'static>> {
    let doc = editor.document();
    let selection = editor.selection();

    doc.nodes()
        .iter()
        .map(|node| {
            let span = selection.and_then(|selection| {
                selection.span_in(doc, &node.id).ok().flatten()
            });
            let caret = selection
                .filter(|selection| selection.extent.node_id == node.id)
                .map(|selection| selection.extent.position);
            node_line(node, span, caret, editor.behaviors().is_selectable(node), width)
        })
        .collect()
}

pub fn node_line(
    node: &Node,
    span: Option<SelectedSpan>,
    caret: Option<NodePosition>,
    selectable: bool,
    width: u16,
) -> Line<'static> {
    match &node.content {
        NodeContent::Text(text) => text_line(&text.text(), span, caret),
        NodeContent::Atomic(atomic) => {
            let label = match &atomic.kind {
                AtomicKind::HorizontalRule => "─".repeat(width.saturating_sub(2) as usize),
                AtomicKind::Image { url, alt } => format!("[image: {alt}] ({url})"),
            };
            let style = match (span.is_some(), selectable) {
                (true, _) => highlight(),
                (false, true) => Style::default(),
                (false, false) => Style::default().fg(Color::DarkGray),
            };
            let (before, after) = match caret {
                Some(NodePosition::Atomic(Edge::Upstream)) => ("▏", " "),
                Some(NodePosition::Atomic(Edge::Downstream)) => (" ", "▕"),
                _ => (" ", " "),
            };
            Line::from(vec![
                Span::raw(before),
                Span::styled(label, style),
                Span::raw(after),
            ])
        }
    }
}

fn text_line(text: &str, span: Option<SelectedSpan>, caret: Option<NodePosition>) -> Line<'static> {
    let range = match span {
        Some(SelectedSpan::Text(range)) => range,
        _ => 0..0,
    };
    let caret = caret.and_then(|position| position.text_offset());
    let caret_end = caret.map(|offset| {
        text[offset..]
            .chars()
            .next()
            .map_or(offset, |c| offset + c.len_utf8())
    });

    let mut cuts = vec![0, range.start, range.end, text.len()];
    cuts.extend(caret);
    cuts.extend(caret_end);
    cuts.sort_unstable();
    cuts.dedup();

    let mut spans = Vec::new();
    for window in cuts.windows(2) {
        let (from, to) = (window[0], window[1]);
        let style = if caret == Some(from) {
            caret_style()
        } else if from >= range.start && to <= range.end {
            highlight()
        } else {
            Style::default()
        };
        spans.push(Span::styled(text[from..to].to_string(), style));
    }
    if caret == Some(text.len()) {
        spans.push(Span::styled(" ", caret_style()));
    }
    Line::from(spans)
}

/// Translate a left click inside the bordered `area` into a tap intent
pub fn tap_at(editor: &Editor, area: Rect, column: u16, row: u16) -> Option<Intent> {
    let inner = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };
    if column < inner.x
        || row < inner.y
        || column >= inner.x + inner.width
        || row >= inner.y + inner.height
    {
        return None;
    }

    let node = editor.document().node_at((row - inner.y) as usize)?;
    let local = (column - inner.x) as usize;
    let tap = match &node.content {
        NodeContent::Text(text) => LocalTap::Offset(column_to_offset(&text.text(), local)),
        NodeContent::Atomic(_) => LocalTap::Fraction(local as f32 / inner.width.max(1) as f32),
    };
    Some(Intent::Tap {
        node_id: node.id.clone(),
        tap,
    })
}

/// Byte offset of the character drawn in terminal cell `column`.
///
/// Wide characters cover two cells and zero-width marks cover none.
pub fn column_to_offset(text: &str, column: usize) -> usize {
    let mut cells = 0;
    for (offset, c) in text.char_indices() {
        let width = c.width().unwrap_or(0);
        if width > 0 && column < cells + width {
            return offset;
        }
        cells += width;
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use blocknav_engine::editing::{Document, DocumentPosition, NodeBehaviors, Selection};
    use pretty_assertions::assert_eq;

    fn editor() -> Editor {
        let doc = Document::new(vec![
            Node::paragraph("1", "Hello"),
            Node::horizontal_rule("2"),
            Node::paragraph("3", "héllo"),
        ])
        .unwrap();
        Editor::new(doc, NodeBehaviors::new())
    }

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_caret_at_text_end_adds_cell() {
        let line = text_line("Hi", None, Some(NodePosition::text(2)));

        assert_eq!(plain(&line), "Hi ");
        assert_eq!(line.spans.last().map(|span| span.style), Some(caret_style()));
    }

    #[test]
    fn test_range_highlight_splits_spans() {
        let line = text_line(
            "Hello world",
            Some(SelectedSpan::Text(6..11)),
            Some(NodePosition::text(6)),
        );

        let pieces: Vec<_> = line
            .spans
            .iter()
            .map(|span| (span.content.to_string(), span.style))
            .collect();
        assert_eq!(
            pieces,
            vec![
                ("Hello ".to_string(), Style::default()),
                ("w".to_string(), caret_style()),
                ("orld".to_string(), highlight()),
            ]
        );
    }

    #[test]
    fn test_rule_shows_caret_edge() {
        let rule = Node::horizontal_rule("r");

        let line = node_line(
            &rule,
            Some(SelectedSpan::Atomic),
            Some(NodePosition::downstream()),
            true,
            6,
        );

        assert_eq!(plain(&line), " ────▕");
    }

    #[test]
    fn test_document_lines_highlight_selected_rule() {
        let mut editor = editor();
        editor
            .set_selection(Some(Selection::collapsed(DocumentPosition::upstream("2"))))
            .unwrap();

        let lines = document_lines(&editor, 10);

        assert_eq!(lines.len(), 3);
        assert_eq!(plain(&lines[1]), "▏──────── ");
        assert_eq!(lines[1].spans[1].style, highlight());
    }

    #[test]
    fn test_column_to_offset_counts_chars() {
        assert_eq!(column_to_offset("héllo", 2), 3);
        assert_eq!(column_to_offset("héllo", 50), 6);
    }

    #[test]
    fn test_column_to_offset_uses_display_width() {
        // Each CJK character fills two cells
        assert_eq!(column_to_offset("日本語", 2), 3);
        assert_eq!(column_to_offset("日本語", 3), 3);
        assert_eq!(column_to_offset("日本語", 4), 6);
        // A combining mark shares the cell of the letter before it
        assert_eq!(column_to_offset("e\u{301}x", 1), 3);
    }

    #[test]
    fn test_tap_at_maps_rows_to_nodes() {
        let editor = editor();
        let area = Rect::new(0, 0, 22, 10);

        assert_eq!(
            tap_at(&editor, area, 3, 3),
            Some(Intent::Tap {
                node_id: "3".into(),
                tap: LocalTap::Offset(3),
            })
        );
        assert_eq!(
            tap_at(&editor, area, 16, 2),
            Some(Intent::Tap {
                node_id: "2".into(),
                tap: LocalTap::Fraction(0.75),
            })
        );
    }

    #[test]
    fn test_tap_outside_content_is_ignored() {
        let editor = editor();
        let area = Rect::new(0, 0, 22, 10);

        assert_eq!(tap_at(&editor, area, 0, 1), None);
        assert_eq!(tap_at(&editor, area, 5, 6), None);
    }
}
