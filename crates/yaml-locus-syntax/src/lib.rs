//! # yaml-locus-syntax
//!
//! A lossless YAML syntax tree using [Rowan] + [Logos], following the
//! [rust-analyzer] architecture model.
//!
//! [Rowan]: https://docs.rs/rowan
//! [Logos]: https://docs.rs/logos
//! [rust-analyzer]: https://rust-analyzer.github.io/book/contributing/syntax.html
//!
//! ## What is a Lossless CST?
//!
//! A Concrete Syntax Tree preserves **every byte** of the original source:
//! whitespace, comments, quoting style, indentation. Every node knows its
//! exact byte range, which is what an editor needs to map a cursor position
//! back to the YAML structure under it.
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Events → Sink → Rowan Tree
//!               (Logos)          (Grammar)        (GreenNodeBuilder)
//! ```
//!
//! ### 1. Lexer ([`lexer`] module)
//!
//! Tokenizes input into a flat sequence of context-free tokens.
//!
//! ```text
//! "key: [1, 2]\n" → [TEXT, COLON, WHITESPACE, LBRACKET, TEXT, COMMA,
//!                    WHITESPACE, TEXT, RBRACKET, NEWLINE]
//! ```
//!
//! ### 2. Parser ([`parser`] module)
//!
//! Consumes tokens and emits **events** (Start, Token, Finish). Block
//! structure is decided from token columns. Grammar rules live in
//! `parser::grammar`.
//!
//! ### 3. Sink ([`parser::sink`] module)
//!
//! Consumes events and builds a Rowan green tree with `GreenNodeBuilder`.
//!
//! ## Supported YAML
//!
//! Block mappings (including `? key` entries), block sequences (including
//! compact `- a: 1` items and sequences at their key's column), flow
//! collections, plain/quoted/block scalars, anchors, tags and aliases,
//! comments, directives and `---`/`...` markers. Only the first document of
//! a stream is structured.
//!
//! Malformed input still produces a tree. Problems are collected as
//! [`SyntaxError`]s and the offending tokens are wrapped in `ERROR` nodes.
//!
//! ## Quick Start
//!
//! ```
//! use yaml_locus_syntax::{parse, SyntaxKind};
//!
//! let parse = parse("name: demo\n");
//! let tree = parse.syntax();
//!
//! assert_eq!(tree.text().to_string(), "name: demo\n");
//! assert_eq!(tree.kind(), SyntaxKind::ROOT);
//! assert_eq!(tree.first_child().unwrap().kind(), SyntaxKind::BLOCK_MAP);
//! assert!(parse.errors().is_empty());
//! ```

pub mod lexer;
pub mod parser;
pub mod syntax_kind;

pub use parser::{Parse, SyntaxError, parse};
pub use syntax_kind::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, YamlLang};

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    /// Render a syntax tree one element per line for snapshot testing.
    fn format_tree(node: &SyntaxNode, indent: usize) -> String {
        let mut result = String::new();
        let prefix = "  ".repeat(indent);

        result.push_str(&format!(
            "{}{:?}@{:?}\n",
            prefix,
            node.kind(),
            node.text_range()
        ));

        for child in node.children_with_tokens() {
            match child {
                rowan::NodeOrToken::Node(n) => {
                    result.push_str(&format_tree(&n, indent + 1));
                }
                rowan::NodeOrToken::Token(t) => {
                    result.push_str(&format!(
                        "{}  {:?}@{:?} {:?}\n",
                        prefix,
                        t.kind(),
                        t.text_range(),
                        t.text()
                    ));
                }
            }
        }

        result
    }

    /// Fixtures prefixed `malformed_` must report errors; all others must
    /// parse cleanly. Both must round-trip byte for byte.
    fn fixture_test(name: &str) {
        let path = format!("{}/src/fixtures/{name}.yaml", env!("CARGO_MANIFEST_DIR"));
        let input = std::fs::read_to_string(&path).unwrap();
        let parse = parse(&input);

        assert_eq!(parse.syntax().text().to_string(), input);
        if name.starts_with("malformed_") {
            assert!(!parse.errors().is_empty(), "expected errors in {name}");
        } else {
            assert_eq!(parse.errors(), &[], "unexpected errors in {name}");
        }
    }

    include!(concat!(env!("OUT_DIR"), "/fixture_tests.rs"));

    #[test]
    fn snapshot_simple_entry() {
        let tree = parse("a: b\n").syntax();
        assert_snapshot!(format_tree(&tree, 0), @r#"
        ROOT@0..5
          BLOCK_MAP@0..4
            MAP_ENTRY@0..4
              KEY@0..1
                SCALAR@0..1
                  TEXT@0..1 "a"
              COLON@1..2 ":"
              WHITESPACE@2..3 " "
              VALUE@3..4
                SCALAR@3..4
                  TEXT@3..4 "b"
          NEWLINE@4..5 "\n"
        "#);
    }

    #[test]
    fn snapshot_flow_pair_in_sequence() {
        let tree = parse("- [a, b: c]\n").syntax();
        assert_snapshot!(format_tree(&tree, 0), @r#"
        ROOT@0..12
          BLOCK_SEQ@0..11
            SEQ_ITEM@0..11
              DASH@0..1 "-"
              WHITESPACE@1..2 " "
              FLOW_SEQ@2..11
                LBRACKET@2..3 "["
                SCALAR@3..4
                  TEXT@3..4 "a"
                COMMA@4..5 ","
                WHITESPACE@5..6 " "
                FLOW_PAIR@6..10
                  KEY@6..7
                    SCALAR@6..7
                      TEXT@6..7 "b"
                  COLON@7..8 ":"
                  WHITESPACE@8..9 " "
                  VALUE@9..10
                    SCALAR@9..10
                      TEXT@9..10 "c"
                RBRACKET@10..11 "]"
          NEWLINE@11..12 "\n"
        "#);
    }

    #[test]
    fn messy_input_keeps_every_byte() {
        let input = "a: [1, {b: \n  - c\n: : d\n\t\"open\n---\nx: y\n";
        let parse = parse(input);
        assert_eq!(parse.syntax().text().to_string(), input);
        assert!(!parse.errors().is_empty());
    }

    #[test]
    fn roundtrip_preserves_text() {
        let inputs = [
            "a: b\n",
            "- a\n- b\n",
            "a:\n  b:\n    c: d\n",
            "s: [1, 2, 3]\n",
            "m: {a: 1}\n",
            "t: |\n  text\n",
            "r: *ref\n",
            "q: 'single' # c\n",
            "crlf: 1\r\nnext: 2\r\n",
            "",
            "\n\n",
        ];

        for input in inputs {
            let parse = parse(input);
            assert_eq!(
                parse.syntax().text().to_string(),
                input,
                "Roundtrip failed for: {:?}",
                input
            );
            assert!(parse.errors().is_empty(), "errors for {:?}", input);
        }
    }
}
