//! Byte offset → line/column translation for display.

use serde::Serialize;
use xi_rope::Rope;

use crate::ast::Node;

/// Zero-based line and column. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct LineColumn {
    pub line: usize,
    pub column: usize,
}

/// Line and character lookups owned by a text buffer.
///
/// Offsets are byte offsets. Offsets past the end clamp to the end of the
/// text; offsets inside a multi-byte character resolve to that character.
pub trait LineIndex {
    fn offset_to_line_column(&self, offset: usize) -> LineColumn;

    /// Byte offset where the character at `index` starts.
    fn char_to_offset(&self, index: usize) -> usize;

    /// Number of characters that start before byte `offset`.
    fn offset_to_char(&self, offset: usize) -> usize;
}

impl LineIndex for Rope {
    fn offset_to_line_column(&self, offset: usize) -> LineColumn {
        let offset = floor_boundary(self, offset);
        let line = self.line_of_offset(offset);
        let line_start = self.offset_of_line(line);
        let within = offset - line_start;

        let column = self
            .lines_raw(line_start..)
            .next()
            .map(|text| {
                text.char_indices()
                    .take_while(|(index, c)| index + c.len_utf8() <= within)
                    .count()
            })
            .unwrap_or(0);

        LineColumn { line, column }
    }

    fn char_to_offset(&self, index: usize) -> usize {
        let mut remaining = index;
        let mut offset = 0;
        for chunk in self.iter_chunks(..) {
            let count = chunk.chars().count();
            if remaining < count {
                return offset
                    + chunk
                        .char_indices()
                        .nth(remaining)
                        .map_or(chunk.len(), |(byte, _)| byte);
            }
            remaining -= count;
            offset += chunk.len();
        }
        offset
    }

    fn offset_to_char(&self, offset: usize) -> usize {
        let offset = floor_boundary(self, offset);
        self.iter_chunks(..offset).map(|chunk| chunk.chars().count()).sum()
    }
}

/// Clamp to the text and step back onto a character boundary; xi-rope
/// asserts on offsets that split a character.
fn floor_boundary(rope: &Rope, offset: usize) -> usize {
    let offset = offset.min(rope.len());
    rope.at_or_prev_codepoint_boundary(offset).unwrap_or(0)
}

/// Start and end position of a node. Both ends are `None` when there is no
/// node, so "nothing selected" renders like any other range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineRange {
    pub from: Option<LineColumn>,
    pub to: Option<LineColumn>,
}

impl LineRange {
    pub const NONE: LineRange = LineRange {
        from: None,
        to: None,
    };
}

pub fn to_line_column(node: Option<&Node>, index: &impl LineIndex) -> LineRange {
    match node {
        Some(node) => LineRange {
            from: Some(index.offset_to_line_column(node.span.start)),
            to: Some(index.offset_to_line_column(node.span.end)),
        },
        None => LineRange::NONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{NodeKind, Span};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn at(line: usize, column: usize) -> LineColumn {
        LineColumn { line, column }
    }

    #[rstest]
    #[case(0, at(0, 0))]
    #[case(4, at(0, 4))]
    #[case(5, at(0, 5))]
    #[case(6, at(1, 0))]
    #[case(13, at(1, 7))]
    #[case(21, at(2, 0))]
    #[case(999, at(2, 0))]
    fn ascii_offsets(#[case] offset: usize, #[case] expected: LineColumn) {
        let rope = Rope::from("this:\n  str: example\n");
        assert_eq!(rope.offset_to_line_column(offset), expected);
    }

    #[test]
    fn columns_count_characters() {
        // `é` is two bytes
        let rope = Rope::from("k: é!\nnext");
        assert_eq!(rope.offset_to_line_column(3), at(0, 3));
        assert_eq!(rope.offset_to_line_column(4), at(0, 3));
        assert_eq!(rope.offset_to_line_column(5), at(0, 4));
        assert_eq!(rope.offset_to_line_column(7), at(1, 0));
    }

    #[test]
    fn offsets_inside_a_character_floor_to_its_start() {
        // `€` is three bytes at 3..6
        let rope = Rope::from("k: €\n€x");
        assert_eq!(rope.offset_to_line_column(4), at(0, 3));
        assert_eq!(rope.offset_to_line_column(5), at(0, 3));
        assert_eq!(rope.offset_to_line_column(8), at(1, 0));
        assert_eq!(rope.offset_to_char(5), 3);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(3, 3)]
    #[case(4, 5)]
    #[case(5, 6)]
    #[case(7, 8)]
    #[case(99, 11)]
    fn char_indices_to_offsets(#[case] index: usize, #[case] offset: usize) {
        let rope = Rope::from("k: é!\nnext");
        assert_eq!(rope.char_to_offset(index), offset);
    }

    #[test]
    fn offsets_to_char_indices() {
        let rope = Rope::from("k: é!\nnext");
        assert_eq!(rope.offset_to_char(3), 3);
        assert_eq!(rope.offset_to_char(4), 3);
        assert_eq!(rope.offset_to_char(5), 4);
        assert_eq!(rope.offset_to_char(99), 10);
    }

    #[test]
    fn crlf_line_endings() {
        let rope = Rope::from("a: 1\r\nb: 2\r\n");
        assert_eq!(rope.offset_to_line_column(6), at(1, 0));
        assert_eq!(rope.offset_to_line_column(9), at(1, 3));
    }

    #[test]
    fn node_range() {
        let rope = Rope::from("this:\n  str: example\n");
        let node = Node {
            kind: NodeKind::Scalar {
                value: "example".to_string(),
            },
            span: Span::new(13, 20),
            parent: None,
        };
        assert_eq!(
            to_line_column(Some(&node), &rope),
            LineRange {
                from: Some(at(1, 7)),
                to: Some(at(1, 14)),
            }
        );
    }

    #[test]
    fn absent_node_is_the_sentinel() {
        let rope = Rope::from("a: 1\n");
        assert_eq!(to_line_column(None, &rope), LineRange::NONE);
    }
}
