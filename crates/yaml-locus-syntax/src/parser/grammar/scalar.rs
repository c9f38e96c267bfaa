//! Scalars and node properties.

use crate::parser::{CompletedMarker, Marker, Parser};
use crate::syntax_kind::SyntaxKind;

use super::{bump_n, is_block_end, is_mapping_key_at, is_separator, is_sequence_entry_at};

/// Where a plain scalar sits, which decides what ends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Context {
    /// Block value; may continue on deeper lines.
    Block { parent_indent: isize },
    /// Implicit key in a block mapping; single line.
    Key,
    /// Inside `[...]` or `{...}`; also ends at `,` `]` `}`.
    Flow,
}

/// Anchors and tags in front of a node, with the whitespace after each.
pub(super) fn properties(p: &mut Parser<'_, '_>) -> bool {
    let mut any = false;
    while p.current().is_property() {
        p.bump();
        p.eat(SyntaxKind::WHITESPACE);
        any = true;
    }
    any
}

pub(super) fn quoted(p: &mut Parser<'_, '_>, m: Marker) -> CompletedMarker {
    if p.at(SyntaxKind::UNTERMINATED_QUOTED) {
        p.error("unterminated quoted scalar");
    }
    p.bump();
    m.complete(p, SyntaxKind::SCALAR)
}

/// Plain scalar. Trailing whitespace is left outside the node.
pub(super) fn plain(p: &mut Parser<'_, '_>, m: Marker, context: Context) -> CompletedMarker {
    loop {
        while !ends_plain(p, 0, context) {
            if p.at(SyntaxKind::WHITESPACE) && ends_plain(p, 1, context) {
                break;
            }
            p.bump();
        }

        let Context::Block { parent_indent } = context else {
            break;
        };
        if !p.at(SyntaxKind::NEWLINE) {
            break;
        }
        match continuation(p, parent_indent) {
            Some(n) => bump_n(p, n),
            None => break,
        }
    }
    m.complete(p, SyntaxKind::SCALAR)
}

fn ends_plain(p: &Parser<'_, '_>, n: usize, context: Context) -> bool {
    let flow = context == Context::Flow;
    match p.nth(n) {
        SyntaxKind::NEWLINE | SyntaxKind::EOF | SyntaxKind::COMMENT => true,
        SyntaxKind::COLON => {
            let next = p.nth(n + 1);
            is_separator(next)
                || next == SyntaxKind::COMMENT
                || (flow
                    && matches!(
                        next,
                        SyntaxKind::COMMA | SyntaxKind::RBRACKET | SyntaxKind::RBRACE
                    ))
        }
        SyntaxKind::COMMA | SyntaxKind::RBRACKET | SyntaxKind::RBRACE => flow,
        _ => false,
    }
}

/// Lookahead to the first token of the next line if a multi-line plain
/// scalar continues there.
fn continuation(p: &Parser<'_, '_>, parent_indent: isize) -> Option<usize> {
    let mut n = 0;
    while matches!(p.nth(n), SyntaxKind::NEWLINE | SyntaxKind::WHITESPACE) {
        n += 1;
    }
    if is_block_end(p, n)
        || p.nth(n) == SyntaxKind::COMMENT
        || p.nth_column(n) as isize <= parent_indent
        || is_sequence_entry_at(p, n)
        || is_mapping_key_at(p, n)
    {
        return None;
    }
    Some(n)
}

/// `|` or `>` header plus every following line that is blank or indented
/// past `parent_indent`. Trailing blank lines are left outside the node.
pub(super) fn block_scalar(
    p: &mut Parser<'_, '_>,
    m: Marker,
    parent_indent: isize,
) -> CompletedMarker {
    while !p.at(SyntaxKind::NEWLINE) && !p.at_end() {
        p.bump();
    }

    loop {
        let mut n = 0;
        while matches!(p.nth(n), SyntaxKind::NEWLINE | SyntaxKind::WHITESPACE) {
            n += 1;
        }
        if is_block_end(p, n) || p.nth_column(n) as isize <= parent_indent {
            break;
        }
        bump_n(p, n);
        while !p.at(SyntaxKind::NEWLINE) && !p.at_end() {
            p.bump();
        }
    }

    m.complete(p, SyntaxKind::BLOCK_SCALAR)
}
