//! SyntaxKind enum for all tokens and nodes in the YAML CST.
//!
//! Following the rust-analyzer model, all tokens and nodes share a single enum.
//! Every byte in the source must appear as a token in the tree.

/// All syntax kinds for the YAML CST.
///
/// This enum represents both tokens (lexer output) and composite nodes (parser output).
/// The `repr(u16)` ensures efficient storage in rowan's green tree.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Tokens (lexer output) ===
    /// Horizontal whitespace (spaces, tabs)
    WHITESPACE,
    /// Line ending
    NEWLINE,
    /// `# ...` up to the end of the line
    COMMENT,
    /// `:` mapping value indicator
    COLON,
    /// `,` flow entry separator
    COMMA,
    /// `-` sequence entry indicator
    DASH,
    /// `?` explicit key indicator
    QUESTION,
    /// `[` flow sequence start
    LBRACKET,
    /// `]` flow sequence end
    RBRACKET,
    /// `{` flow mapping start
    LBRACE,
    /// `}` flow mapping end
    RBRACE,
    /// `|` literal block scalar indicator
    PIPE,
    /// `>` folded block scalar indicator
    GT,
    /// `&name` anchor property
    ANCHOR,
    /// `*name` alias
    ALIAS,
    /// `!tag` tag property
    TAG,
    /// `"..."` double-quoted scalar
    DOUBLE_QUOTED,
    /// `'...'` single-quoted scalar
    SINGLE_QUOTED,
    /// A quoted scalar missing its closing quote on the same line
    UNTERMINATED_QUOTED,
    /// `---` document start marker
    DOC_START,
    /// `...` document end marker
    DOC_END,
    /// `%YAML ...` or `%TAG ...` directive line
    DIRECTIVE,
    /// Plain text run
    TEXT,
    /// End of file marker
    EOF,

    // === Composite Nodes (parser output) ===
    /// Root document node
    ROOT,
    /// Indentation-based mapping
    BLOCK_MAP,
    /// `key: value` entry inside a block mapping
    MAP_ENTRY,
    /// Key half of an entry or pair
    KEY,
    /// Value half of an entry or pair
    VALUE,
    /// Indentation-based sequence
    BLOCK_SEQ,
    /// `- item` entry inside a block sequence
    SEQ_ITEM,
    /// `[a, b]`
    FLOW_SEQ,
    /// `{a: b}`
    FLOW_MAP,
    /// Entry of a flow mapping
    FLOW_ENTRY,
    /// Single-pair mapping written inside a flow sequence (`[a: b]`)
    FLOW_PAIR,
    /// Plain or quoted scalar
    SCALAR,
    /// `|` or `>` scalar with its content lines
    BLOCK_SCALAR,
    /// `*name` in value position
    ALIAS_REF,

    /// Error recovery node
    ERROR,
}

impl SyntaxKind {
    /// Returns true if this kind represents a token (lexer output).
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::EOF as u16)
    }

    /// Returns true if this kind represents a composite node.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns true if this kind is trivia (whitespace, newlines, comments).
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::NEWLINE | Self::COMMENT)
    }

    /// Returns true for node properties that may precede any content.
    pub fn is_property(self) -> bool {
        matches!(self, Self::ANCHOR | Self::TAG)
    }

    /// Returns true for the three quoted scalar token kinds.
    pub fn is_quoted(self) -> bool {
        matches!(
            self,
            Self::DOUBLE_QUOTED | Self::SINGLE_QUOTED | Self::UNTERMINATED_QUOTED
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum YamlLang {}

impl rowan::Language for YamlLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::ERROR as u16);
        // SAFETY: We check bounds above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<YamlLang>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<YamlLang>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<YamlLang>;

#[cfg(test)]
mod tests {
    use super::*;
    use rowan::Language;

    #[test]
    fn token_kinds_are_tokens() {
        assert!(SyntaxKind::WHITESPACE.is_token());
        assert!(SyntaxKind::TEXT.is_token());
        assert!(SyntaxKind::EOF.is_token());
    }

    #[test]
    fn node_kinds_are_nodes() {
        assert!(SyntaxKind::ROOT.is_node());
        assert!(SyntaxKind::BLOCK_MAP.is_node());
        assert!(SyntaxKind::ALIAS_REF.is_node());
        assert!(SyntaxKind::ERROR.is_node());
    }

    #[test]
    fn trivia_detection() {
        assert!(SyntaxKind::WHITESPACE.is_trivia());
        assert!(SyntaxKind::NEWLINE.is_trivia());
        assert!(SyntaxKind::COMMENT.is_trivia());
        assert!(!SyntaxKind::TEXT.is_trivia());
        assert!(!SyntaxKind::COLON.is_trivia());
    }

    #[test]
    fn property_detection() {
        assert!(SyntaxKind::ANCHOR.is_property());
        assert!(SyntaxKind::TAG.is_property());
        assert!(!SyntaxKind::ALIAS.is_property());
    }

    #[test]
    fn rowan_conversion_roundtrip() {
        let kind = SyntaxKind::MAP_ENTRY;
        let raw: rowan::SyntaxKind = kind.into();
        let back = YamlLang::kind_from_raw(raw);
        assert_eq!(kind, back);
    }
}
