//! # Parser Events
//!
//! Events are the intermediate representation between parsing and tree building.
//! Instead of building the tree directly, the parser emits a **flat sequence**
//! of events that describe the tree structure.
//!
//! ## Event Types
//!
//! ```text
//! Start(MAP_ENTRY)     ← Begin a MAP_ENTRY node
//!   Start(KEY)
//!     Start(SCALAR)
//!       Token(TEXT)
//!     Finish
//!   Finish
//!   Token(COLON)
//!   ...
//! Finish               ← End the MAP_ENTRY node
//! ```
//!
//! The Sink processes these in order, maintaining a stack of open nodes.
//! Start pushes, Finish pops.
//!
//! ## Forward Parent Links
//!
//! The `forward_parent` field in `Start` handles cases where we need to wrap
//! an already-parsed node. Flow pairs use this: `[a: b]` parses `a` as a plain
//! entry and only wraps it in `KEY` and `FLOW_PAIR` once the `:` shows up.
//! The Sink resolves the links by opening the outermost node first.

use crate::syntax_kind::SyntaxKind;

/// An event emitted by the parser during tree construction.
///
/// Events form a flat representation of the tree that the [`Sink`](super::sink::Sink)
/// converts into an actual Rowan tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Begin a new composite node.
    ///
    /// If `forward_parent` is set it points at another `Start` event that
    /// becomes this node's parent.
    Start {
        kind: SyntaxKind,
        forward_parent: Option<usize>,
    },

    /// Add `n_raw_tokens` lexer tokens to the current node as one token of `kind`.
    Token { kind: SyntaxKind, n_raw_tokens: u8 },

    /// Finish the current node.
    Finish,

    /// Reserved slot from `parser.start()`, replaced on completion and
    /// ignored by the Sink if abandoned.
    Placeholder,
}

impl Event {
    /// Create a start event with no forward parent.
    pub fn start(kind: SyntaxKind) -> Self {
        Event::Start {
            kind,
            forward_parent: None,
        }
    }

    /// Create a token event for a single raw token.
    pub fn token(kind: SyntaxKind) -> Self {
        Event::Token {
            kind,
            n_raw_tokens: 1,
        }
    }
}
