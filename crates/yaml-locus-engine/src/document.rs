use thiserror::Error;
use xi_rope::Rope;

use crate::address::{AddressCodec, KeyPathCodec};
use crate::ast::{Node, NodeId, Span, Tree};
use crate::lines::{LineColumn, LineIndex, LineRange, to_line_column};
use crate::parsing::{ParsedYaml, parse_yaml};
use crate::resolve;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// One YAML document being edited.
///
/// Holds the text in an `xi_rope::Rope` and the tree parsed from it. The
/// tree is never patched: every edit calls [`regenerate`](Self::regenerate)
/// with the full new text, which parses first and then swaps buffer and
/// tree together, so lookups always see a matching pair.
///
/// Positions passed in and out of the document are character indices, as
/// an editor cursor reports them. The tree itself stores byte spans; use
/// [`char_span`](Self::char_span) to read a node's range in characters.
///
/// ```rust
/// use yaml_locus_engine::YamlDocument;
///
/// let mut doc = YamlDocument::new("this:\n  str: example\n");
/// let mapping = doc.node_at_address("this:str").unwrap();
/// assert_eq!(doc.address_of(mapping), "this:str");
///
/// doc.regenerate("this:\n  str: changed\n");
/// assert_eq!(doc.version(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct YamlDocument<C: AddressCodec = KeyPathCodec> {
    buffer: Rope,
    parsed: ParsedYaml,
    version: u64,
    codec: C,
    /// Character indices equal byte offsets.
    ascii: bool,
}

impl YamlDocument {
    pub fn new(text: &str) -> Self {
        Self::with_codec(text, KeyPathCodec::default())
    }

    /// Create a document from raw bytes, which must be UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::new(text))
    }
}

impl<C: AddressCodec> YamlDocument<C> {
    pub fn with_codec(text: &str, codec: C) -> Self {
        Self {
            buffer: Rope::from(text),
            parsed: parse(text),
            version: 0,
            codec,
            ascii: text.is_ascii(),
        }
    }

    /// Replace the whole text and re-derive the tree.
    pub fn regenerate(&mut self, text: &str) {
        let parsed = parse(text);
        self.buffer = Rope::from(text);
        self.parsed = parsed;
        self.ascii = text.is_ascii();
        self.version += 1;
    }

    pub fn tree(&self) -> &Tree {
        &self.parsed.tree
    }

    pub fn errors(&self) -> &[yaml_locus_syntax::SyntaxError] {
        &self.parsed.errors
    }

    /// True when the last parse reported no syntax errors.
    pub fn is_complete(&self) -> bool {
        self.parsed.is_complete()
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Bumped by every [`regenerate`](Self::regenerate).
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.parsed.tree.node(id)
    }

    /// The node under the character at `index`.
    pub fn node_at_offset(&self, index: usize) -> Option<NodeId> {
        resolve::node_at_offset(&self.parsed.tree, self.byte_offset(index))
    }

    /// A node's range in characters.
    pub fn char_span(&self, id: NodeId) -> Option<Span> {
        self.node(id).map(|node| self.to_char_span(node.span))
    }

    /// Convert a byte span from the tree or a syntax error into characters.
    pub fn to_char_span(&self, span: Span) -> Span {
        if self.ascii {
            return span;
        }
        Span::new(
            self.buffer.offset_to_char(span.start),
            self.buffer.offset_to_char(span.end),
        )
    }

    pub fn node_at_address(&self, address: &str) -> Option<NodeId> {
        let keys = self.codec.decode(address);
        resolve::node_at_key_path(&self.parsed.tree, &keys)
    }

    pub fn key_path_of(&self, id: NodeId) -> Vec<String> {
        resolve::key_path_of(&self.parsed.tree, id)
    }

    pub fn address_of(&self, id: NodeId) -> String {
        self.codec.encode(&self.key_path_of(id))
    }

    /// Line/column range of a node, or [`LineRange::NONE`] for a miss.
    pub fn to_line_column(&self, id: Option<NodeId>) -> LineRange {
        to_line_column(id.and_then(|id| self.node(id)), &self.buffer)
    }

    pub fn offset_to_line_column(&self, index: usize) -> LineColumn {
        self.buffer.offset_to_line_column(self.byte_offset(index))
    }

    fn byte_offset(&self, index: usize) -> usize {
        if self.ascii {
            index
        } else {
            self.buffer.char_to_offset(index)
        }
    }
}

fn parse(text: &str) -> ParsedYaml {
    let parsed = parse_yaml(text);
    log::debug!(
        "parsed {} bytes into {} nodes with {} syntax errors",
        text.len(),
        parsed.tree.len(),
        parsed.errors.len()
    );
    for error in &parsed.errors {
        log::trace!("syntax error: {error}");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn address_lookup_and_back() {
        let doc = YamlDocument::new("this:\n  str: example\n");
        let id = doc.node_at_address("this:str").unwrap();
        let mapping = doc.node(id).unwrap();
        assert_eq!(mapping.kind.name(), "mapping");
        assert_eq!(doc.address_of(id), "this:str");
        assert_eq!(doc.address_of(doc.tree().root().unwrap()), "");
    }

    #[test]
    fn regenerate_replaces_everything() {
        let mut doc = YamlDocument::new("a: 1\n");
        let before = doc.node_at_address("a").unwrap();
        doc.regenerate("b:\n  c: 2\n");
        assert_eq!(doc.version(), 1);
        assert_eq!(doc.text(), "b:\n  c: 2\n");
        assert_eq!(doc.node_at_address("a"), None);
        assert!(doc.node_at_address("b:c").is_some());
        assert_ne!(doc.node_at_address("b:c"), Some(before));
    }

    #[test]
    fn regenerate_same_text_is_structurally_equal() {
        let text = "a:\n  - x\n  - {y: 1}\n";
        let mut doc = YamlDocument::new(text);
        let first = doc.tree().clone();
        doc.regenerate(text);
        assert_eq!(doc.tree(), &first);
        assert_eq!(doc.version(), 1);
    }

    #[test]
    fn empty_document() {
        let doc = YamlDocument::new("");
        assert_eq!(doc.tree().root(), None);
        assert_eq!(doc.node_at_offset(0), None);
        assert_eq!(doc.node_at_address("anything"), None);
        assert!(doc.is_complete());
    }

    #[test]
    fn malformed_document_stays_usable() {
        let doc = YamlDocument::new("a:\n  b: [1, 2\n");
        assert!(!doc.is_complete());
        assert_eq!(doc.errors().len(), 1);
        let id = doc.node_at_offset(9).unwrap();
        assert_eq!(doc.node(id).unwrap().scalar_value(), Some("1"));
        assert!(doc.node_at_address("a:b").is_some());
    }

    #[test]
    fn line_columns() {
        let doc = YamlDocument::new("this:\n  str: example\n");
        let id = doc.node_at_offset(15);
        let range = doc.to_line_column(id);
        assert_eq!(range.from, Some(LineColumn { line: 1, column: 7 }));
        assert_eq!(range.to, Some(LineColumn { line: 1, column: 14 }));
        assert_eq!(doc.to_line_column(None), LineRange::NONE);
        assert_eq!(
            doc.offset_to_line_column(2),
            LineColumn { line: 0, column: 2 }
        );
    }

    #[test]
    fn positions_count_characters() {
        let text = "name: café\nnext: ü\n";
        let doc = YamlDocument::new(text);

        // `ü` is character 17 but byte 18
        let id = doc.node_at_offset(17).unwrap();
        assert_eq!(doc.node(id).unwrap().scalar_value(), Some("ü"));
        assert_eq!(doc.char_span(id), Some(Span::new(17, 18)));
        assert_eq!(doc.node(id).unwrap().span, Span::new(18, 20));

        let cafe = doc.node_at_offset(8).unwrap();
        assert_eq!(doc.node(cafe).unwrap().scalar_value(), Some("café"));
        assert_eq!(doc.char_span(cafe), Some(Span::new(6, 10)));

        assert_eq!(
            doc.offset_to_line_column(17),
            LineColumn { line: 1, column: 6 }
        );
        let range = doc.to_line_column(Some(id));
        assert_eq!(range.from, Some(LineColumn { line: 1, column: 6 }));
        assert_eq!(range.to, Some(LineColumn { line: 1, column: 7 }));
    }

    #[test]
    fn custom_codec() {
        let codec = KeyPathCodec::new('.').unwrap();
        let doc = YamlDocument::with_codec("a:\n  b:c: 1\n", codec);
        let id = doc.node_at_address("a.b:c").unwrap();
        assert_eq!(doc.address_of(id), "a.b:c");
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        assert!(matches!(
            YamlDocument::from_bytes(&[b'a', b':', b' ', 0xff]),
            Err(DocumentError::InvalidUtf8(_))
        ));
        assert!(YamlDocument::from_bytes(b"a: 1\n").is_ok());
    }
}
