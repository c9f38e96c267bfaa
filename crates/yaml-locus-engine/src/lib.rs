//! # yaml-locus-engine
//!
//! Indexes a live YAML document two ways: by text offset and by key path.
//!
//! Text is parsed with `yaml-locus-syntax` and lowered to an arena
//! [`Tree`]. [`YamlDocument`] owns the text and the tree and answers:
//!
//! - which node sits under a cursor offset ([`YamlDocument::node_at_offset`])
//! - which node an address such as `"layers:water:draw"` names
//!   ([`YamlDocument::node_at_address`])
//! - what the address of a node is ([`YamlDocument::address_of`])
//! - where a node is in line/column terms ([`YamlDocument::to_line_column`])
//!
//! Every lookup is total. Blank documents, malformed input and unknown
//! addresses produce `None` rather than errors.

pub mod address;
pub mod ast;
pub mod document;
pub mod io;
pub mod lines;
pub mod parsing;
pub mod resolve;

pub use address::{AddressCodec, AddressError, KeyPathCodec};
pub use ast::{Node, NodeId, NodeKind, Span, Tree, UnsupportedKind};
pub use document::{DocumentError, YamlDocument};
pub use io::*;
pub use lines::{LineColumn, LineIndex, LineRange, to_line_column};
pub use parsing::{ParsedYaml, parse_yaml};
pub use resolve::{key_path_of, node_at_key_path, node_at_offset};
pub use yaml_locus_syntax::SyntaxError;
