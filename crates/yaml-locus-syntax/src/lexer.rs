//! # Lexer - Tokenizing YAML Source
//!
//! This module provides the first stage of parsing: breaking source text into
//! tokens using the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! Every byte in the input appears in exactly one token. Nothing is skipped,
//! which is what makes round-tripping and byte-exact spans possible:
//!
//! ```
//! use yaml_locus_syntax::lexer::lex;
//!
//! let input = "key: [1, 2] # nums\n";
//! let tokens = lex(input);
//!
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Token Design
//!
//! Tokens are context-free. The lexer does not know whether a `:` separates
//! a key from its value or is part of a URL, or whether `-` starts a sequence
//! entry or a negative number; the grammar decides. Quoted scalars are the
//! exception: they are lexed whole so that `#` or `:` inside quotes never
//! leak out as structure. A quote left open at the end of a line becomes an
//! `UNTERMINATED_QUOTED` token so the parser can report it.
//!
//! Plain text is grouped into runs (`TEXT`), never split per character.
//!
//! ## Public API
//!
//! - [`lex`] - Tokenize input, returning `Vec<Token>`
//! - [`lex_with_spans`] - Tokenize with byte offset spans
//! - [`Token`] - A token with its kind and text slice

use logos::Logos;

use crate::syntax_kind::SyntaxKind;

/// Token kinds produced by the Logos lexer.
///
/// Exists separately from [`SyntaxKind`] because Logos needs to derive on
/// it. Each variant maps to a `SyntaxKind` token.
///
/// [`SyntaxKind`]: crate::syntax_kind::SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"")]
pub enum TokenKind {
    #[regex(r"[ \t]+")]
    Whitespace,

    #[regex(r"\r?\n")]
    Newline,

    #[regex(r"#[^\r\n]*")]
    Comment,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token("-")]
    Dash,

    #[token("?")]
    Question,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("|")]
    Pipe,

    #[token(">")]
    Gt,

    #[regex(r"&[^\s,\[\]{}]*")]
    Anchor,

    #[regex(r"\*[^\s,\[\]{}]*")]
    Alias,

    #[regex(r"![^\s,\[\]{}]*")]
    Tag,

    #[regex(r#""([^"\\\r\n]|\\[^\r\n])*""#)]
    DoubleQuoted,

    #[regex(r"'([^'\r\n]|'')*'")]
    SingleQuoted,

    /// Opening quote with no closing quote before the end of the line
    #[regex(r#""([^"\\\r\n]|\\[^\r\n])*"#)]
    #[regex(r"'([^'\r\n]|'')*")]
    UnterminatedQuoted,

    #[token("---")]
    DocStart,

    #[token("...")]
    DocEnd,

    #[regex(r"%[^\r\n]*")]
    Directive,

    /// Plain text - anything that does not start with an indicator
    #[regex(r#"[^\s:,\[\]{}#&*!|>'"%?-][^\s:,\[\]{}]*"#)]
    Text,
}

impl TokenKind {
    /// Convert to SyntaxKind.
    pub fn to_syntax_kind(self) -> SyntaxKind {
        match self {
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Newline => SyntaxKind::NEWLINE,
            TokenKind::Comment => SyntaxKind::COMMENT,
            TokenKind::Colon => SyntaxKind::COLON,
            TokenKind::Comma => SyntaxKind::COMMA,
            TokenKind::Dash => SyntaxKind::DASH,
            TokenKind::Question => SyntaxKind::QUESTION,
            TokenKind::LBracket => SyntaxKind::LBRACKET,
            TokenKind::RBracket => SyntaxKind::RBRACKET,
            TokenKind::LBrace => SyntaxKind::LBRACE,
            TokenKind::RBrace => SyntaxKind::RBRACE,
            TokenKind::Pipe => SyntaxKind::PIPE,
            TokenKind::Gt => SyntaxKind::GT,
            TokenKind::Anchor => SyntaxKind::ANCHOR,
            TokenKind::Alias => SyntaxKind::ALIAS,
            TokenKind::Tag => SyntaxKind::TAG,
            TokenKind::DoubleQuoted => SyntaxKind::DOUBLE_QUOTED,
            TokenKind::SingleQuoted => SyntaxKind::SINGLE_QUOTED,
            TokenKind::UnterminatedQuoted => SyntaxKind::UNTERMINATED_QUOTED,
            TokenKind::DocStart => SyntaxKind::DOC_START,
            TokenKind::DocEnd => SyntaxKind::DOC_END,
            TokenKind::Directive => SyntaxKind::DIRECTIVE,
            TokenKind::Text => SyntaxKind::TEXT,
        }
    }
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    lex_with_spans(input)
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

/// Lex and return tokens along with their byte spans.
pub fn lex_with_spans(input: &str) -> Vec<(Token<'_>, std::ops::Range<usize>)> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();
        let kind = match result {
            Ok(token_kind) => token_kind.to_syntax_kind(),
            // Unrecognized input (a lone backslash, stray control bytes) stays text
            Err(()) => SyntaxKind::TEXT,
        };
        tokens.push((Token { kind, text }, span));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn token(kind: SyntaxKind, text: &str) -> Token<'_> {
        Token { kind, text }
    }

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        lex(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lex_empty_input() {
        assert_eq!(lex(""), vec![]);
    }

    #[test]
    fn lex_simple_entry() {
        assert_eq!(
            lex("key: value\n"),
            vec![
                token(SyntaxKind::TEXT, "key"),
                token(SyntaxKind::COLON, ":"),
                token(SyntaxKind::WHITESPACE, " "),
                token(SyntaxKind::TEXT, "value"),
                token(SyntaxKind::NEWLINE, "\n"),
            ]
        );
    }

    #[test]
    fn lex_newline_crlf() {
        assert_eq!(lex("\r\n"), vec![token(SyntaxKind::NEWLINE, "\r\n")]);
    }

    #[test]
    fn lex_sequence_entry() {
        assert_eq!(
            kinds("- a\n- b"),
            vec![
                SyntaxKind::DASH,
                SyntaxKind::WHITESPACE,
                SyntaxKind::TEXT,
                SyntaxKind::NEWLINE,
                SyntaxKind::DASH,
                SyntaxKind::WHITESPACE,
                SyntaxKind::TEXT,
            ]
        );
    }

    #[test]
    fn lex_flow_collections() {
        assert_eq!(
            kinds("[a, {b: c}]"),
            vec![
                SyntaxKind::LBRACKET,
                SyntaxKind::TEXT,
                SyntaxKind::COMMA,
                SyntaxKind::WHITESPACE,
                SyntaxKind::LBRACE,
                SyntaxKind::TEXT,
                SyntaxKind::COLON,
                SyntaxKind::WHITESPACE,
                SyntaxKind::TEXT,
                SyntaxKind::RBRACE,
                SyntaxKind::RBRACKET,
            ]
        );
    }

    #[test]
    fn colon_inside_text_splits_into_tokens() {
        // Grammar decides whether `:` is an indicator; the lexer always splits.
        assert_eq!(
            lex("http://x"),
            vec![
                token(SyntaxKind::TEXT, "http"),
                token(SyntaxKind::COLON, ":"),
                token(SyntaxKind::TEXT, "//x"),
            ]
        );
    }

    #[test]
    fn hash_inside_text_is_not_a_comment() {
        assert_eq!(lex("a#b"), vec![token(SyntaxKind::TEXT, "a#b")]);
        assert_eq!(
            kinds("a #b"),
            vec![
                SyntaxKind::TEXT,
                SyntaxKind::WHITESPACE,
                SyntaxKind::COMMENT
            ]
        );
    }

    #[rstest]
    #[case("\"a: #b\"", SyntaxKind::DOUBLE_QUOTED)]
    #[case("\"esc \\\" quote\"", SyntaxKind::DOUBLE_QUOTED)]
    #[case("'it''s'", SyntaxKind::SINGLE_QUOTED)]
    #[case("\"open", SyntaxKind::UNTERMINATED_QUOTED)]
    #[case("'open", SyntaxKind::UNTERMINATED_QUOTED)]
    #[case("&anchor", SyntaxKind::ANCHOR)]
    #[case("*alias", SyntaxKind::ALIAS)]
    #[case("!include", SyntaxKind::TAG)]
    #[case("!!str", SyntaxKind::TAG)]
    #[case("---", SyntaxKind::DOC_START)]
    #[case("...", SyntaxKind::DOC_END)]
    #[case("%YAML 1.2", SyntaxKind::DIRECTIVE)]
    #[case("# note", SyntaxKind::COMMENT)]
    fn lex_single_token(#[case] input: &str, #[case] expected: SyntaxKind) {
        assert_eq!(lex(input), vec![token(expected, input)]);
    }

    #[test]
    fn unterminated_quote_stops_at_line_end() {
        assert_eq!(
            lex("\"open\nnext"),
            vec![
                token(SyntaxKind::UNTERMINATED_QUOTED, "\"open"),
                token(SyntaxKind::NEWLINE, "\n"),
                token(SyntaxKind::TEXT, "next"),
            ]
        );
    }

    #[test]
    fn block_scalar_indicators() {
        assert_eq!(
            kinds("|-\n>+"),
            vec![
                SyntaxKind::PIPE,
                SyntaxKind::DASH,
                SyntaxKind::NEWLINE,
                SyntaxKind::GT,
                SyntaxKind::TEXT,
            ]
        );
    }

    #[test]
    fn lex_with_spans_reports_byte_ranges() {
        let spans: Vec<_> = lex_with_spans("é: ü")
            .into_iter()
            .map(|(t, span)| (t.kind, span))
            .collect();
        assert_eq!(
            spans,
            vec![
                (SyntaxKind::TEXT, 0..2),
                (SyntaxKind::COLON, 2..3),
                (SyntaxKind::WHITESPACE, 3..4),
                (SyntaxKind::TEXT, 4..6),
            ]
        );
    }

    #[test]
    fn all_bytes_preserved_complex() {
        let input = "%YAML 1.2\n---\nroot: &r\n  list: [1, 'two', \"three\"]\n  text: |\n    line\n  ref: *r # c\n...\n";
        let tokens = lex(input);
        let reconstructed: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(input, reconstructed);
    }
}
