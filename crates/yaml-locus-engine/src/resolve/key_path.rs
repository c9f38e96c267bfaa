use crate::ast::{NodeId, NodeKind, Tree};

/// The node a key path names.
///
/// A full match returns the mapping whose key is the last path entry. Paths
/// that run into a scalar or a sequence before they are used up return the
/// mapping that owns that value; sequences are not addressed by index. The
/// first matching key wins at each level. An empty path names the root.
pub fn node_at_key_path<S: AsRef<str>>(tree: &Tree, keys: &[S]) -> Option<NodeId> {
    if keys.is_empty() {
        return tree.root();
    }
    search(tree, tree.root(), keys)
}

fn search<S: AsRef<str>>(tree: &Tree, id: Option<NodeId>, keys: &[S]) -> Option<NodeId> {
    let id = id?;
    let node = tree.node(id)?;

    match &node.kind {
        NodeKind::Scalar { .. } | NodeKind::Sequence { .. } => node.parent,
        NodeKind::Mapping { value, .. } => search(tree, *value, keys),
        NodeKind::MapContainer { mappings } => {
            let (wanted, rest) = keys.split_first()?;
            for mapping in mappings {
                let mapping = (*mapping)?;
                if tree.key_literal(mapping) == Some(wanted.as_ref()) {
                    if rest.is_empty() {
                        return Some(mapping);
                    }
                    return search(tree, tree.mapping_value(mapping), rest);
                }
            }
            None
        }
        NodeKind::Unsupported(_) => None,
    }
}

/// Keys of every scalar-keyed mapping from the root down to `id`, including
/// `id` itself when it is such a mapping.
pub fn key_path_of(tree: &Tree, id: NodeId) -> Vec<String> {
    if tree.node(id).is_none() {
        return Vec::new();
    }

    let mut keys: Vec<String> = std::iter::once(id)
        .chain(tree.ancestors(id))
        .filter_map(|current| tree.key_literal(current))
        .map(str::to_string)
        .collect();
    keys.reverse();
    keys
}
