//! # Parsing
//!
//! Turns document text into the arena [`Tree`]. The lossless CST comes from
//! `yaml-locus-syntax`; [`lower`] walks it once and allocates one AST node per
//! scalar, mapping, map or sequence it finds.
//!
//! Parsing never fails. Fragments the parser could not make sense of become
//! absent child slots, and the diagnostics are returned next to the tree.

mod decode;
mod lower;

use yaml_locus_syntax::SyntaxError;

use crate::ast::Tree;

/// Result of parsing one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedYaml {
    pub tree: Tree,
    pub errors: Vec<SyntaxError>,
}

impl ParsedYaml {
    /// True when the whole text parsed without diagnostics.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse `text` into an AST plus diagnostics.
///
/// Blank text yields an empty tree with no root.
pub fn parse_yaml(text: &str) -> ParsedYaml {
    if text.trim().is_empty() {
        return ParsedYaml::default();
    }

    let parse = yaml_locus_syntax::parse(text);
    let tree = lower::lower(&parse.syntax(), text);
    ParsedYaml {
        tree,
        errors: parse.errors().to_vec(),
    }
}
