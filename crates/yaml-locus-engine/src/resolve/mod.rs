//! # Resolvers
//!
//! Pure lookups over a [`Tree`](crate::ast::Tree) snapshot:
//!
//! - [`node_at_offset`]: text offset → node under it
//! - [`node_at_key_path`]: key path → node it names
//! - [`key_path_of`]: node → key path
//!
//! None of them mutate the tree. A miss is `None`; absent child slots left
//! by malformed input are misses too.

mod key_path;
mod position;

pub use key_path::{key_path_of, node_at_key_path};
pub use position::node_at_offset;
