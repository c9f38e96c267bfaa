//! Block-level grammar rules.
//!
//! `parent_indent` is the column of the collection that owns the node being
//! parsed (`-1` at the document root). Content belongs to that node only
//! while it stays strictly deeper than `parent_indent`.

use crate::parser::{Marker, Parser};
use crate::syntax_kind::SyntaxKind;

use super::{
    bump_to_line, error_line, finish_line, flow, is_block_end, is_mapping_key_at,
    is_sequence_entry_at, next_significant, scalar,
};

/// Parse whatever block node starts at the current token.
pub(super) fn block_node(p: &mut Parser<'_, '_>, parent_indent: isize) {
    let m = p.start();
    block_node_with(p, m, parent_indent);
}

fn block_node_with(p: &mut Parser<'_, '_>, m: Marker, parent_indent: isize) {
    let column = p.nth_column(0) as isize;
    if is_sequence_entry_at(p, 0) {
        block_sequence(p, m, column);
    } else if is_mapping_key_at(p, 0) {
        block_mapping(p, m, column);
    } else {
        inline_node(p, m, parent_indent);
    }
}

/// A node that starts on the current line: properties, then a flow
/// collection, block scalar, alias or scalar.
///
/// Properties alone on a line (`key: &anchor` followed by an indented
/// mapping) attach to the block node on the following lines.
fn inline_node(p: &mut Parser<'_, '_>, m: Marker, parent_indent: isize) {
    if scalar::properties(p) {
        p.eat(SyntaxKind::COMMENT);
        if p.at(SyntaxKind::NEWLINE) || p.at_end() {
            let n = next_significant(p);
            if !is_block_end(p, n) && p.nth_column(n) as isize > parent_indent {
                bump_to_line(p, n);
                block_node_with(p, m, parent_indent);
            } else {
                m.complete(p, SyntaxKind::SCALAR);
            }
            return;
        }
    }

    match p.current() {
        SyntaxKind::LBRACKET => {
            flow::flow_sequence(p, m, parent_indent);
        }
        SyntaxKind::LBRACE => {
            flow::flow_mapping(p, m, parent_indent);
        }
        SyntaxKind::PIPE | SyntaxKind::GT => {
            scalar::block_scalar(p, m, parent_indent);
        }
        SyntaxKind::ALIAS => {
            p.bump();
            m.complete(p, SyntaxKind::ALIAS_REF);
        }
        kind if kind.is_quoted() => {
            scalar::quoted(p, m);
        }
        _ => {
            scalar::plain(p, m, scalar::Context::Block { parent_indent });
        }
    }
}

/// Key content on the current line.
fn key_node(p: &mut Parser<'_, '_>, column: isize) {
    let m = p.start();
    scalar::properties(p);
    match p.current() {
        SyntaxKind::LBRACKET => {
            flow::flow_sequence(p, m, column);
        }
        SyntaxKind::LBRACE => {
            flow::flow_mapping(p, m, column);
        }
        SyntaxKind::ALIAS => {
            p.bump();
            m.complete(p, SyntaxKind::ALIAS_REF);
        }
        kind if kind.is_quoted() => {
            scalar::quoted(p, m);
        }
        _ => {
            scalar::plain(p, m, scalar::Context::Key);
        }
    }
}

/// Entries sharing one column.
fn block_mapping(p: &mut Parser<'_, '_>, m: Marker, column: isize) {
    loop {
        if is_mapping_key_at(p, 0) {
            map_entry(p, column);
        } else {
            error_line(p, "expected a mapping key");
        }

        loop {
            let n = next_significant(p);
            if is_block_end(p, n) {
                m.complete(p, SyntaxKind::BLOCK_MAP);
                return;
            }
            let next_column = p.nth_column(n) as isize;
            if next_column < column {
                m.complete(p, SyntaxKind::BLOCK_MAP);
                return;
            }
            bump_to_line(p, n);
            if next_column == column {
                break;
            }
            error_line(p, "unexpected indentation");
        }
    }
}

fn map_entry(p: &mut Parser<'_, '_>, column: isize) {
    let m = p.start();
    let explicit = p.at(SyntaxKind::QUESTION);

    let key = p.start();
    if explicit {
        p.bump();
        p.eat(SyntaxKind::WHITESPACE);
        if !matches!(
            p.current(),
            SyntaxKind::NEWLINE | SyntaxKind::COMMENT | SyntaxKind::EOF
        ) {
            key_node(p, column);
        }
    } else if !p.at(SyntaxKind::COLON) {
        key_node(p, column);
    }
    key.complete(p, SyntaxKind::KEY);
    p.eat(SyntaxKind::WHITESPACE);

    if explicit && !p.at(SyntaxKind::COLON) {
        // `? key` with its `: value` on the next line, same column
        p.eat(SyntaxKind::COMMENT);
        let n = next_significant(p);
        if p.nth(n) == SyntaxKind::COLON && p.nth_column(n) as isize == column {
            bump_to_line(p, n);
        }
    }

    if p.eat(SyntaxKind::COLON) {
        entry_value(p, column);
    } else if !explicit {
        p.error("expected ':' after mapping key");
    }
    finish_line(p);

    m.complete(p, SyntaxKind::MAP_ENTRY);
}

/// Value after `:`. Either inline on the same line, or a block node on the
/// following lines. A sequence may sit at the key's own column.
fn entry_value(p: &mut Parser<'_, '_>, column: isize) {
    p.eat(SyntaxKind::WHITESPACE);
    p.eat(SyntaxKind::COMMENT);

    if !p.at(SyntaxKind::NEWLINE) && !p.at_end() {
        let value = p.start();
        let m = p.start();
        inline_node(p, m, column);
        value.complete(p, SyntaxKind::VALUE);
        return;
    }

    let n = next_significant(p);
    if is_block_end(p, n) {
        return;
    }
    let next_column = p.nth_column(n) as isize;
    if next_column > column {
        bump_to_line(p, n);
        let value = p.start();
        block_node(p, column);
        value.complete(p, SyntaxKind::VALUE);
    } else if next_column == column && is_sequence_entry_at(p, n) {
        bump_to_line(p, n);
        let value = p.start();
        let m = p.start();
        block_sequence(p, m, column);
        value.complete(p, SyntaxKind::VALUE);
    }
}

/// `- ` items sharing one column.
fn block_sequence(p: &mut Parser<'_, '_>, m: Marker, column: isize) {
    loop {
        sequence_item(p, column);

        loop {
            let n = next_significant(p);
            if is_block_end(p, n) {
                m.complete(p, SyntaxKind::BLOCK_SEQ);
                return;
            }
            let next_column = p.nth_column(n) as isize;
            if next_column < column || (next_column == column && !is_sequence_entry_at(p, n)) {
                m.complete(p, SyntaxKind::BLOCK_SEQ);
                return;
            }
            bump_to_line(p, n);
            if next_column == column {
                break;
            }
            error_line(p, "unexpected indentation");
        }
    }
}

fn sequence_item(p: &mut Parser<'_, '_>, column: isize) {
    let m = p.start();
    p.bump();
    p.eat(SyntaxKind::WHITESPACE);
    p.eat(SyntaxKind::COMMENT);

    if !p.at(SyntaxKind::NEWLINE) && !p.at_end() {
        // Compact form: `- a: 1` or `- - x` on the dash's line
        block_node(p, column);
        finish_line(p);
    } else {
        let n = next_significant(p);
        if !is_block_end(p, n) && p.nth_column(n) as isize > column {
            bump_to_line(p, n);
            block_node(p, column);
        }
    }

    m.complete(p, SyntaxKind::SEQ_ITEM);
}
