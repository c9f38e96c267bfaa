use crate::ast::{NodeId, NodeKind, Tree};

/// The node under byte `offset`.
///
/// Descends from the root. Offsets that fall in the gap around a node
/// (indentation, the space after `:`, trailing delimiters) resolve to the
/// enclosing node. The root has nothing to fall back to, so an offset
/// outside it still runs the root's own rule: a scalar or sequence root
/// answers for itself and a mapping root misses.
pub fn node_at_offset(tree: &Tree, offset: usize) -> Option<NodeId> {
    search(tree, tree.root(), offset)
}

fn search(tree: &Tree, id: Option<NodeId>, offset: usize) -> Option<NodeId> {
    let id = id?;
    let node = tree.node(id)?;

    if !node.span.contains_inclusive(offset)
        && let Some(parent) = node.parent
    {
        return Some(parent);
    }

    match &node.kind {
        NodeKind::Scalar { .. } => Some(id),
        NodeKind::Mapping { value, .. } => search(tree, *value, offset),
        NodeKind::MapContainer { mappings } => {
            for mapping in mappings {
                // Stop at the first hole rather than skipping it
                let mapping = (*mapping)?;
                if tree.node(mapping)?.span.contains_inclusive(offset) {
                    return search(tree, tree.mapping_value(mapping), offset);
                }
            }
            None
        }
        NodeKind::Sequence { items } => {
            for item in items {
                let item = (*item)?;
                if tree.node(item)?.span.contains_inclusive(offset) {
                    return search(tree, Some(item), offset);
                }
            }
            Some(id)
        }
        NodeKind::Unsupported(_) if offset == node.span.start => Some(id),
        NodeKind::Unsupported(_) => node.parent,
    }
}
