//! # Parser - Event-Based Tree Construction
//!
//! This module implements the core parsing logic, transforming a token stream
//! into a syntax tree using the **event-based** architecture from rust-analyzer.
//!
//! ## Why Event-Based Parsing?
//!
//! Building the tree directly during recursive descent makes recovery awkward
//! once partially-built nodes exist. Instead, we emit a flat list of
//! **events** ([`Event`]) that describe the tree structure. The [`Sink`]
//! then builds the actual Rowan tree from events.
//!
//! ## The Marker System
//!
//! `parser.start()` hands out a [`Marker`] which **must** be either
//! completed (`marker.complete(parser, KIND)`) or abandoned
//! (`marker.abandon(parser)`). Dropping it otherwise panics.
//!
//! ```ignore
//! let m = parser.start();
//! parser.bump();
//! m.complete(parser, SyntaxKind::SCALAR);
//! ```
//!
//! ## Indentation
//!
//! YAML block structure is decided by columns, so the parser precomputes the
//! column of every token (in characters from the start of its line). Grammar
//! rules compare [`Parser::nth_column`] against the indentation of the
//! enclosing collection instead of tracking INDENT/DEDENT tokens.
//!
//! ## Errors
//!
//! The parser never fails. Problems are recorded as [`SyntaxError`]s next to
//! the tree and the offending tokens end up inside `ERROR` nodes.
//!
//! ## Public API
//!
//! The main entry point is [`parse`]:
//!
//! ```
//! use yaml_locus_syntax::parse;
//!
//! let parse = parse("name: demo\n");
//! assert!(parse.errors().is_empty());
//! println!("{:#?}", parse.syntax());
//! ```

pub mod event;
pub mod sink;

mod grammar;

use rowan::{GreenNode, TextRange, TextSize};

use crate::lexer::{Token, lex};
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use event::Event;
use sink::Sink;

/// A problem found while parsing, anchored to a byte range of the source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {range:?}")]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

/// The result of parsing: a lossless green tree plus any syntax errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    green: GreenNode,
    errors: Vec<SyntaxError>,
}

impl Parse {
    /// The root of the concrete syntax tree.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

}

/// The parser state machine.
///
/// Holds the token stream, current position, and accumulated events.
/// Grammar functions receive `&mut Parser` and use its methods to:
///
/// - Inspect tokens: `current()`, `nth()`, `at()`, `at_end()`, `nth_column()`
/// - Consume tokens: `bump()`, `eat()`
/// - Build structure: `start()` → `Marker` → `complete()`/`abandon()`
/// - Report problems: `error()`
pub struct Parser<'t, 'input> {
    tokens: &'t [Token<'input>],
    offsets: Vec<usize>,
    columns: Vec<usize>,
    text_len: usize,
    pos: usize,
    events: Vec<Event>,
    errors: Vec<SyntaxError>,
}

impl<'t, 'input> Parser<'t, 'input> {
    /// Create a new parser from a slice of tokens.
    pub fn new(tokens: &'t [Token<'input>]) -> Self {
        let mut offsets = Vec::with_capacity(tokens.len());
        let mut columns = Vec::with_capacity(tokens.len());
        let mut offset = 0;
        let mut column = 0;

        for token in tokens {
            offsets.push(offset);
            columns.push(column);
            offset += token.text.len();
            match token.text.rfind('\n') {
                Some(idx) => column = token.text[idx + 1..].chars().count(),
                None => column += token.text.chars().count(),
            }
        }

        Self {
            tokens,
            offsets,
            columns,
            text_len: offset,
            pos: 0,
            events: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Parse the tokens and return the tree with its errors.
    pub fn parse(mut self) -> Parse {
        grammar::root(&mut self);
        let sink = Sink::new(self.tokens, self.events);
        Parse {
            green: sink.finish(),
            errors: self.errors,
        }
    }

    /// Start a new node and return a marker.
    pub fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            completed: false,
        }
    }

    /// Current token kind, or EOF if past end.
    pub fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Look ahead n tokens.
    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    /// Column of the token n positions ahead, counted in characters from
    /// the start of its line. Past the end this is 0.
    pub fn nth_column(&self, n: usize) -> usize {
        self.columns.get(self.pos + n).copied().unwrap_or(0)
    }

    /// Check if at end of input.
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Check if current token is of given kind.
    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token unconditionally.
    pub fn bump(&mut self) {
        if !self.at_end() {
            let kind = self.current();
            self.events.push(Event::token(kind));
            self.pos += 1;
        }
    }

    /// Get the text of the current token.
    pub fn current_text(&self) -> &'input str {
        self.tokens.get(self.pos).map(|t| t.text).unwrap_or("")
    }

    /// Record an error covering the current token (or an empty range at EOF).
    pub fn error(&mut self, message: impl Into<String>) {
        let range = self.current_range();
        self.errors.push(SyntaxError {
            message: message.into(),
            range,
        });
    }

    fn current_range(&self) -> TextRange {
        match (self.tokens.get(self.pos), self.offsets.get(self.pos)) {
            (Some(token), Some(&offset)) => {
                TextRange::at(text_size(offset), TextSize::of(token.text))
            }
            _ => TextRange::empty(text_size(self.text_len)),
        }
    }
}

fn text_size(offset: usize) -> TextSize {
    TextSize::from(u32::try_from(offset).unwrap_or(u32::MAX))
}

/// A marker for a node being constructed.
///
/// When you call `parser.start()`, a `Placeholder` event is pushed and you
/// get a `Marker` pointing to it. Every marker must be completed or
/// abandoned; dropping one otherwise panics.
#[must_use = "Markers must be completed or abandoned, dropping them is a bug"]
pub struct Marker {
    /// Position in the events vector where our Placeholder lives
    pos: usize,
    /// Tracks whether complete() or abandon() was called
    completed: bool,
}

impl Marker {
    /// Complete this marker, creating a node of the given kind.
    pub fn complete(mut self, p: &mut Parser<'_, '_>, kind: SyntaxKind) -> CompletedMarker {
        self.completed = true;
        let event_at_pos = &mut p.events[self.pos];
        assert!(matches!(event_at_pos, Event::Placeholder));
        *event_at_pos = Event::Start {
            kind,
            forward_parent: None,
        };
        p.events.push(Event::Finish);
        CompletedMarker { pos: self.pos }
    }

    /// Abandon this marker without creating a node.
    ///
    /// Only removes the placeholder if it's the last event; otherwise it
    /// stays inert and the Sink skips it.
    pub fn abandon(mut self, p: &mut Parser<'_, '_>) {
        self.completed = true;
        if self.pos == p.events.len() - 1 {
            match p.events.pop() {
                Some(Event::Placeholder) => {}
                _ => unreachable!(),
            }
        }
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.completed && !std::thread::panicking() {
            panic!("Marker must be either completed or abandoned");
        }
    }
}

/// A marker for a node that has been completed.
///
/// The only thing you can do with a `CompletedMarker` is call `precede()`
/// to wrap the completed node in a new parent:
///
/// ```ignore
/// let key = flow_node(p);            // parsed `a` in `[a: b]`
/// if p.at(SyntaxKind::COLON) {
///     let key = key.precede(p).complete(p, SyntaxKind::KEY);
///     let pair = key.precede(p);
///     p.bump();
///     // ... value ...
///     pair.complete(p, SyntaxKind::FLOW_PAIR);
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CompletedMarker {
    /// Position of the Start event for this completed node
    pos: usize,
}

impl CompletedMarker {
    /// Create a new parent node that will contain this node.
    pub fn precede(self, p: &mut Parser<'_, '_>) -> Marker {
        let new_pos = p.events.len();
        p.events.push(Event::Placeholder);

        if let Event::Start { forward_parent, .. } = &mut p.events[self.pos] {
            *forward_parent = Some(new_pos);
        }

        Marker {
            pos: new_pos,
            completed: false,
        }
    }
}

/// Parse YAML source into a syntax tree plus errors.
pub fn parse(source: &str) -> Parse {
    let tokens = lex(source);
    let parser = Parser::new(&tokens);
    parser.parse()
}
