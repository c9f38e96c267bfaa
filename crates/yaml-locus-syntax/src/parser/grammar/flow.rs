//! Flow collections: `[a, b]` and `{a: b}`.
//!
//! Flow collections may span lines, but a line that dedents back to the
//! enclosing block indentation ends an unclosed collection. That keeps one
//! missing `]` from swallowing the rest of the document.

use crate::parser::{CompletedMarker, Marker, Parser};
use crate::syntax_kind::SyntaxKind;

use super::{bump_n, is_block_end, next_significant, scalar};

pub(super) fn flow_sequence(
    p: &mut Parser<'_, '_>,
    m: Marker,
    parent_indent: isize,
) -> CompletedMarker {
    collection(p, parent_indent, Kind::Sequence);
    m.complete(p, SyntaxKind::FLOW_SEQ)
}

pub(super) fn flow_mapping(
    p: &mut Parser<'_, '_>,
    m: Marker,
    parent_indent: isize,
) -> CompletedMarker {
    collection(p, parent_indent, Kind::Mapping);
    m.complete(p, SyntaxKind::FLOW_MAP)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Sequence,
    Mapping,
}

impl Kind {
    fn close(self) -> SyntaxKind {
        match self {
            Kind::Sequence => SyntaxKind::RBRACKET,
            Kind::Mapping => SyntaxKind::RBRACE,
        }
    }

    fn unclosed(self) -> &'static str {
        match self {
            Kind::Sequence => "unclosed flow sequence",
            Kind::Mapping => "unclosed flow mapping",
        }
    }

    fn expected_separator(self) -> &'static str {
        match self {
            Kind::Sequence => "expected ',' or ']'",
            Kind::Mapping => "expected ',' or '}'",
        }
    }
}

fn collection(p: &mut Parser<'_, '_>, parent_indent: isize, kind: Kind) {
    p.bump();

    loop {
        if !trivia(p, parent_indent) {
            p.error(kind.unclosed());
            return;
        }
        match p.current() {
            close if close == kind.close() => {
                p.bump();
                return;
            }
            SyntaxKind::COMMA => {
                p.error("unexpected ','");
                stray(p);
                continue;
            }
            SyntaxKind::RBRACKET | SyntaxKind::RBRACE => {
                p.error("mismatched closing bracket");
                stray(p);
                continue;
            }
            _ => {}
        }

        entry(p, parent_indent, kind);

        if !trivia(p, parent_indent) {
            p.error(kind.unclosed());
            return;
        }
        if !p.eat(SyntaxKind::COMMA) && !p.at(kind.close()) {
            p.error(kind.expected_separator());
        }
    }
}

/// Wrap the current token in an ERROR node.
fn stray(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.bump();
    m.complete(p, SyntaxKind::ERROR);
}

/// Skip whitespace, comments and line breaks between flow tokens.
///
/// Returns false if the collection cannot continue: end of input, a
/// document marker, or a line at or left of `parent_indent` that does not
/// start with a closing bracket.
fn trivia(p: &mut Parser<'_, '_>, parent_indent: isize) -> bool {
    loop {
        match p.current() {
            SyntaxKind::WHITESPACE | SyntaxKind::COMMENT => p.bump(),
            SyntaxKind::NEWLINE => {
                let n = next_significant(p);
                if is_block_end(p, n) {
                    return false;
                }
                let closes = matches!(p.nth(n), SyntaxKind::RBRACKET | SyntaxKind::RBRACE);
                if p.nth_column(n) as isize <= parent_indent && !closes {
                    return false;
                }
                bump_n(p, n);
            }
            SyntaxKind::EOF => return false,
            _ => return true,
        }
    }
}

/// One entry. In a mapping this is always a FLOW_ENTRY; in a sequence a
/// `key: value` entry becomes a FLOW_PAIR and anything else stays a bare node.
fn entry(p: &mut Parser<'_, '_>, parent_indent: isize, kind: Kind) {
    let key = if p.at(SyntaxKind::COLON) {
        None
    } else {
        Some(node(p, parent_indent))
    };

    let has_colon = p.at(SyntaxKind::COLON)
        || (p.at(SyntaxKind::WHITESPACE) && p.nth(1) == SyntaxKind::COLON);
    if !has_colon && kind == Kind::Sequence {
        return;
    }

    let pair = match key {
        Some(done) => {
            let key = done.precede(p).complete(p, SyntaxKind::KEY);
            key.precede(p)
        }
        None => p.start(),
    };

    p.eat(SyntaxKind::WHITESPACE);
    if p.eat(SyntaxKind::COLON)
        && trivia(p, parent_indent)
        && !matches!(
            p.current(),
            SyntaxKind::COMMA | SyntaxKind::RBRACKET | SyntaxKind::RBRACE
        )
    {
        let value = p.start();
        node(p, parent_indent);
        value.complete(p, SyntaxKind::VALUE);
    }

    let pair_kind = match kind {
        Kind::Sequence => SyntaxKind::FLOW_PAIR,
        Kind::Mapping => SyntaxKind::FLOW_ENTRY,
    };
    pair.complete(p, pair_kind);
}

fn node(p: &mut Parser<'_, '_>, parent_indent: isize) -> CompletedMarker {
    let m = p.start();
    scalar::properties(p);
    match p.current() {
        SyntaxKind::LBRACKET => flow_sequence(p, m, parent_indent),
        SyntaxKind::LBRACE => flow_mapping(p, m, parent_indent),
        SyntaxKind::ALIAS => {
            p.bump();
            m.complete(p, SyntaxKind::ALIAS_REF)
        }
        kind if kind.is_quoted() => scalar::quoted(p, m),
        _ => scalar::plain(p, m, scalar::Context::Flow),
    }
}
