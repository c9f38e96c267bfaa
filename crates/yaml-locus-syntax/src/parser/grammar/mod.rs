//! # Grammar Rules
//!
//! This module contains the grammar rules that drive parsing. Each function
//! takes a `&mut Parser` and uses its methods to inspect tokens, consume
//! them, and build tree structure through markers.
//!
//! ## Module Structure
//!
//! - [`block`] - Indentation-based mappings and sequences
//! - [`flow`] - Bracketed `[...]` and `{...}` collections
//! - [`scalar`] - Plain, quoted and block scalars plus node properties
//!
//! ## Line Discipline
//!
//! Every block-level rule stops *before* the line break that ends its last
//! line. Whoever owns the enclosing collection peeks past the trivia with
//! [`next_significant`], compares the column of the next real token against
//! its own indentation, and only then bumps the trivia and continues. Trailing
//! blank lines and comments therefore end up in the outermost node that
//! continues past them (usually `ROOT`), never inside a scalar.
//!
//! ## Error Recovery
//!
//! Rules never fail. Unexpected input is recorded with `p.error(..)` and
//! wrapped in an `ERROR` node; the rest of the line is swallowed so the next
//! line starts clean.

mod block;
mod flow;
mod scalar;

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse the root document.
///
/// Only the first document of a stream is structured. A second `---`
/// marker is reported and everything after it is kept as one ERROR node.
pub fn root(p: &mut Parser<'_, '_>) {
    let m = p.start();

    document_prefix(p);
    if !p.at_end() && !is_document_marker_at(p, 0) {
        block::block_node(p, -1);
    }

    loop {
        skip_trivia(p);
        if p.at_end() {
            break;
        }
        if is_document_marker_at(p, 0) && p.at(SyntaxKind::DOC_END) {
            p.bump();
            continue;
        }
        if is_document_marker_at(p, 0) {
            p.error("multiple documents are not supported");
            let rest = p.start();
            while !p.at_end() {
                p.bump();
            }
            rest.complete(p, SyntaxKind::ERROR);
            break;
        }
        error_line(p, "unexpected content after document root");
    }

    m.complete(p, SyntaxKind::ROOT);
}

/// Directives, leading comments and an optional `---` marker.
fn document_prefix(p: &mut Parser<'_, '_>) {
    loop {
        skip_trivia(p);
        if !p.eat(SyntaxKind::DIRECTIVE) {
            break;
        }
    }
    if is_document_marker_at(p, 0) && p.at(SyntaxKind::DOC_START) {
        p.bump();
        p.eat(SyntaxKind::WHITESPACE);
        p.eat(SyntaxKind::COMMENT);
        if p.at(SyntaxKind::NEWLINE) {
            skip_trivia(p);
        }
    }
}

/// Kinds that may follow a structural indicator (`-`, `?`, `:`).
pub(super) fn is_separator(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::EOF
    )
}

/// Lookahead distance to the first token that is not trivia.
pub(super) fn next_significant(p: &Parser<'_, '_>) -> usize {
    let mut n = 0;
    while p.nth(n).is_trivia() {
        n += 1;
    }
    n
}

pub(super) fn skip_trivia(p: &mut Parser<'_, '_>) {
    while p.current().is_trivia() {
        p.bump();
    }
}

/// Bump the `n` trivia tokens that lead up to the next block line. The
/// indentation right before its content must not contain tabs.
pub(super) fn bump_to_line(p: &mut Parser<'_, '_>, n: usize) {
    for i in 0..n {
        if i + 1 == n
            && p.at(SyntaxKind::WHITESPACE)
            && p.nth_column(0) == 0
            && p.current_text().contains('\t')
        {
            p.error("tabs are not allowed in indentation");
        }
        p.bump();
    }
}

pub(super) fn bump_n(p: &mut Parser<'_, '_>, n: usize) {
    for _ in 0..n {
        p.bump();
    }
}

/// `---` or `...` at column 0 followed by a separator.
pub(super) fn is_document_marker_at(p: &Parser<'_, '_>, n: usize) -> bool {
    matches!(p.nth(n), SyntaxKind::DOC_START | SyntaxKind::DOC_END)
        && p.nth_column(n) == 0
        && (is_separator(p.nth(n + 1)) || p.nth(n + 1) == SyntaxKind::COMMENT)
}

/// True when the token at `n` ends the node that precedes it.
pub(super) fn is_block_end(p: &Parser<'_, '_>, n: usize) -> bool {
    p.nth(n) == SyntaxKind::EOF || is_document_marker_at(p, n)
}

/// `- ` at lookahead `n`.
pub(super) fn is_sequence_entry_at(p: &Parser<'_, '_>, n: usize) -> bool {
    p.nth(n) == SyntaxKind::DASH && is_separator(p.nth(n + 1))
}

/// Does the line starting at lookahead `start` hold an implicit mapping key?
///
/// Scans to the end of the line for a `:` outside brackets that is followed
/// by a separator. `? ` explicit keys count as well.
pub(super) fn is_mapping_key_at(p: &Parser<'_, '_>, start: usize) -> bool {
    if p.nth(start) == SyntaxKind::QUESTION && is_separator(p.nth(start + 1)) {
        return true;
    }

    let mut depth = 0usize;
    let mut n = start;
    loop {
        match p.nth(n) {
            SyntaxKind::NEWLINE | SyntaxKind::EOF | SyntaxKind::COMMENT => return false,
            SyntaxKind::LBRACKET | SyntaxKind::LBRACE => depth += 1,
            SyntaxKind::RBRACKET | SyntaxKind::RBRACE => depth = depth.saturating_sub(1),
            SyntaxKind::COLON if depth == 0 => {
                let next = p.nth(n + 1);
                if is_separator(next) || next == SyntaxKind::COMMENT {
                    return true;
                }
            }
            _ => {}
        }
        n += 1;
    }
}

/// Record `message` and wrap the rest of the current line in an ERROR node.
pub(super) fn error_line(p: &mut Parser<'_, '_>, message: &str) {
    p.error(message);
    let m = p.start();
    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) {
        p.bump();
    }
    m.complete(p, SyntaxKind::ERROR);
}

/// Allow trailing whitespace and a comment; anything else on the line is an error.
pub(super) fn finish_line(p: &mut Parser<'_, '_>) {
    p.eat(SyntaxKind::WHITESPACE);
    p.eat(SyntaxKind::COMMENT);
    if !p.at_end() && !p.at(SyntaxKind::NEWLINE) {
        error_line(p, "unexpected content after value");
    }
}
