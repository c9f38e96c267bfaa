//! Lowering from the lossless CST to the arena AST.

use yaml_locus_syntax::{SyntaxKind, SyntaxNode};

use super::decode;
use crate::ast::{NodeId, NodeKind, Span, Tree, UnsupportedKind};

const INCLUDE_TAG: &str = "!include";

/// Lower the document content under `root`. Trailing ERROR nodes at the
/// root level (extra documents, stray lines) do not take part.
pub(crate) fn lower(root: &SyntaxNode, source: &str) -> Tree {
    let mut lowerer = Lowerer {
        source,
        tree: Tree::empty(),
    };
    let root_id = root
        .children()
        .find(|child| child.kind() != SyntaxKind::ERROR)
        .and_then(|content| lowerer.node(&content, None));
    lowerer.tree.set_root(root_id);
    lowerer.tree
}

struct Lowerer<'s> {
    source: &'s str,
    tree: Tree,
}

impl Lowerer<'_> {
    fn node(&mut self, syntax: &SyntaxNode, parent: Option<NodeId>) -> Option<NodeId> {
        match syntax.kind() {
            SyntaxKind::BLOCK_MAP | SyntaxKind::FLOW_MAP => Some(self.map_container(syntax, parent)),
            SyntaxKind::BLOCK_SEQ | SyntaxKind::FLOW_SEQ => Some(self.sequence(syntax, parent)),
            SyntaxKind::SCALAR | SyntaxKind::BLOCK_SCALAR => Some(self.scalar(syntax, parent)),
            SyntaxKind::ALIAS_REF => Some(self.alias(syntax, parent)),
            _ => None,
        }
    }

    fn map_container(&mut self, syntax: &SyntaxNode, parent: Option<NodeId>) -> NodeId {
        let id = self.tree.alloc(
            NodeKind::MapContainer {
                mappings: Vec::new(),
            },
            content_span(syntax),
            parent,
        );

        let mut mappings = Vec::new();
        for child in syntax.children() {
            match child.kind() {
                SyntaxKind::MAP_ENTRY | SyntaxKind::FLOW_ENTRY => {
                    mappings.push(Some(self.mapping(&child, id)));
                }
                SyntaxKind::ERROR => mappings.push(None),
                _ => {}
            }
        }

        self.tree.set_kind(id, NodeKind::MapContainer { mappings });
        id
    }

    fn mapping(&mut self, syntax: &SyntaxNode, parent: NodeId) -> NodeId {
        let span = content_span(syntax);
        let id = self.tree.alloc(
            NodeKind::Mapping {
                key: None,
                value: None,
            },
            span,
            Some(parent),
        );

        let key = child_of_kind(syntax, SyntaxKind::KEY)
            .and_then(|key| content_child(&key))
            .and_then(|key| self.node(&key, Some(id)));
        let value = match child_of_kind(syntax, SyntaxKind::VALUE).and_then(|v| content_child(&v)) {
            Some(value) => self.node(&value, Some(id)),
            None => Some(self.empty_scalar(span.end, id)),
        };

        self.tree.set_kind(id, NodeKind::Mapping { key, value });
        id
    }

    fn sequence(&mut self, syntax: &SyntaxNode, parent: Option<NodeId>) -> NodeId {
        let id = self.tree.alloc(
            NodeKind::Sequence { items: Vec::new() },
            content_span(syntax),
            parent,
        );

        let mut items = Vec::new();
        for child in syntax.children() {
            let item = match child.kind() {
                SyntaxKind::SEQ_ITEM => match content_child(&child) {
                    Some(content) => self.node(&content, Some(id)),
                    None => Some(self.empty_scalar(content_span(&child).end, id)),
                },
                SyntaxKind::FLOW_PAIR => Some(self.flow_pair(&child, id)),
                SyntaxKind::ERROR => None,
                _ => self.node(&child, Some(id)),
            };
            items.push(item);
        }

        self.tree.set_kind(id, NodeKind::Sequence { items });
        id
    }

    /// `[a: b]` holds a single-entry mapping.
    fn flow_pair(&mut self, syntax: &SyntaxNode, parent: NodeId) -> NodeId {
        let id = self.tree.alloc(
            NodeKind::MapContainer {
                mappings: Vec::new(),
            },
            content_span(syntax),
            Some(parent),
        );
        let mapping = self.mapping(syntax, id);
        self.tree.set_kind(id, NodeKind::MapContainer {
            mappings: vec![Some(mapping)],
        });
        id
    }

    fn scalar(&mut self, syntax: &SyntaxNode, parent: Option<NodeId>) -> NodeId {
        let span = content_span(syntax);
        let end: usize = syntax.text_range().end().into();
        let text = self.source.get(span.start..end).unwrap_or("");

        let value = if syntax.kind() == SyntaxKind::BLOCK_SCALAR {
            decode::block(text)
        } else {
            match first_content_token(syntax) {
                Some(SyntaxKind::DOUBLE_QUOTED) => decode::double_quoted(text),
                Some(SyntaxKind::SINGLE_QUOTED) => decode::single_quoted(text),
                Some(SyntaxKind::UNTERMINATED_QUOTED) if text.starts_with('"') => {
                    decode::double_quoted(text)
                }
                Some(SyntaxKind::UNTERMINATED_QUOTED) => decode::single_quoted(text),
                Some(_) => decode::plain(text),
                None => String::new(),
            }
        };

        let kind = if leading_tags(syntax).any(|tag| tag == INCLUDE_TAG) {
            NodeKind::Unsupported(UnsupportedKind::Include { target: value })
        } else {
            NodeKind::Scalar { value }
        };
        self.tree.alloc(kind, span, parent)
    }

    fn alias(&mut self, syntax: &SyntaxNode, parent: Option<NodeId>) -> NodeId {
        let span = content_span(syntax);
        let text = self.source.get(span.start..span.end).unwrap_or("");
        let name = text.trim_start_matches('*').to_string();
        self.tree.alloc(
            NodeKind::Unsupported(UnsupportedKind::AnchorRef { name }),
            span,
            parent,
        )
    }

    /// Implicit null: `key:` or a bare `-`.
    fn empty_scalar(&mut self, offset: usize, parent: NodeId) -> NodeId {
        self.tree.alloc(
            NodeKind::Scalar {
                value: String::new(),
            },
            Span::empty(offset),
            Some(parent),
        )
    }
}

fn child_of_kind(syntax: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    syntax.children().find(|child| child.kind() == kind)
}

fn content_child(syntax: &SyntaxNode) -> Option<SyntaxNode> {
    syntax
        .children()
        .find(|child| child.kind() != SyntaxKind::ERROR)
}

fn is_content(kind: SyntaxKind) -> bool {
    !kind.is_trivia() && !kind.is_property()
}

fn first_content_token(syntax: &SyntaxNode) -> Option<SyntaxKind> {
    syntax
        .descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .map(|token| token.kind())
        .find(|kind| is_content(*kind))
}

/// Tags that precede the content of `syntax`.
fn leading_tags(syntax: &SyntaxNode) -> impl Iterator<Item = String> {
    syntax
        .descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .take_while(|token| !is_content(token.kind()))
        .filter(|token| token.kind() == SyntaxKind::TAG)
        .map(|token| token.text().to_string())
}

/// From the first content token to the last non-trivia token. Leading
/// properties and surrounding whitespace/comments are excluded. A node with
/// only properties gets a zero-width span right after its last property.
fn content_span(syntax: &SyntaxNode) -> Span {
    let significant: Vec<_> = syntax
        .descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| !token.kind().is_trivia())
        .collect();

    let Some(last) = significant.last() else {
        return Span::empty(syntax.text_range().start().into());
    };
    match significant.iter().find(|token| is_content(token.kind())) {
        Some(first) => Span::new(first.text_range().start().into(), last.text_range().end().into()),
        None => Span::empty(last.text_range().end().into()),
    }
}
