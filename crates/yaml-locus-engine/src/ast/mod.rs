//! # AST node model
//!
//! The lowered tree every lookup runs over. Nodes live in a flat arena and
//! refer to each other by [`NodeId`]; a node's parent is stored as an index
//! into the same arena, so ownership stays root-to-leaf while walking upward
//! is a single lookup per hop.
//!
//! Children of containers are `Option<NodeId>`. A `None` slot marks a
//! fragment that failed to parse; traversals treat it as a lookup miss.

mod span;

pub use span::Span;

/// Index of a node inside its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Kinds the adapter recognizes but the resolvers do not interpret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsupportedKind {
    /// `*name`
    AnchorRef { name: String },
    /// `!include target`
    Include { target: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Scalar {
        value: String,
    },
    /// One `key: value` pair. Both halves are present for anything the
    /// parser produced; `None` only appears for hand-built trees.
    Mapping {
        key: Option<NodeId>,
        value: Option<NodeId>,
    },
    MapContainer {
        mappings: Vec<Option<NodeId>>,
    },
    Sequence {
        items: Vec<Option<NodeId>>,
    },
    Unsupported(UnsupportedKind),
}

impl NodeKind {
    /// Short lowercase name used in CLI output and log lines.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Scalar { .. } => "scalar",
            NodeKind::Mapping { .. } => "mapping",
            NodeKind::MapContainer { .. } => "map",
            NodeKind::Sequence { .. } => "sequence",
            NodeKind::Unsupported(UnsupportedKind::AnchorRef { .. }) => "anchor-ref",
            NodeKind::Unsupported(UnsupportedKind::Include { .. }) => "include",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub parent: Option<NodeId>,
}

impl Node {
    /// The literal of a scalar node.
    pub fn scalar_value(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Scalar { value } => Some(value),
            _ => None,
        }
    }

    /// Present children in document order. Absent slots are skipped.
    pub fn children(&self) -> Vec<NodeId> {
        match &self.kind {
            NodeKind::Mapping { key, value } => key.iter().chain(value.iter()).copied().collect(),
            NodeKind::MapContainer { mappings } => mappings.iter().flatten().copied().collect(),
            NodeKind::Sequence { items } => items.iter().flatten().copied().collect(),
            NodeKind::Scalar { .. } | NodeKind::Unsupported(_) => Vec::new(),
        }
    }
}

/// Arena of nodes with an optional root.
///
/// An empty tree (`root() == None`) stands for a blank document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Tree {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Look up a node. Ids from another tree may miss.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    /// Strict ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// Number of parent hops from `id` to the root.
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// Literal of a mapping's key when that key is a scalar.
    pub fn key_literal(&self, mapping: NodeId) -> Option<&str> {
        match &self.node(mapping)?.kind {
            NodeKind::Mapping { key: Some(key), .. } => self.node(*key)?.scalar_value(),
            _ => None,
        }
    }

    pub fn mapping_value(&self, mapping: NodeId) -> Option<NodeId> {
        match &self.node(mapping)?.kind {
            NodeKind::Mapping { value, .. } => *value,
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in allocation order; parents come before their children.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    pub(crate) fn alloc(&mut self, kind: NodeKind, span: Span, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { kind, span, parent });
        id
    }

    /// Replace the payload of a node allocated before its children.
    pub(crate) fn set_kind(&mut self, id: NodeId, kind: NodeKind) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.kind = kind;
        }
    }

    pub(crate) fn set_root(&mut self, root: Option<NodeId>) {
        self.root = root;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// `{a: [x]}` built by hand, with one absent sequence slot.
    pub(crate) fn small_tree() -> Tree {
        let mut tree = Tree::empty();
        let map = tree.alloc(NodeKind::MapContainer { mappings: vec![] }, Span::new(0, 10), None);
        let mapping = tree.alloc(
            NodeKind::Mapping {
                key: None,
                value: None,
            },
            Span::new(1, 9),
            Some(map),
        );
        let key = tree.alloc(
            NodeKind::Scalar {
                value: "a".to_string(),
            },
            Span::new(1, 2),
            Some(mapping),
        );
        let seq = tree.alloc(NodeKind::Sequence { items: vec![] }, Span::new(4, 9), Some(mapping));
        let item = tree.alloc(
            NodeKind::Scalar {
                value: "x".to_string(),
            },
            Span::new(5, 6),
            Some(seq),
        );
        tree.set_kind(seq, NodeKind::Sequence {
            items: vec![Some(item), None],
        });
        tree.set_kind(mapping, NodeKind::Mapping {
            key: Some(key),
            value: Some(seq),
        });
        tree.set_kind(map, NodeKind::MapContainer {
            mappings: vec![Some(mapping)],
        });
        tree.set_root(Some(map));
        tree
    }

    #[test]
    fn empty_tree_has_no_root() {
        let tree = Tree::empty();
        assert_eq!(tree.root(), None);
        assert!(tree.is_empty());
    }

    #[test]
    fn parent_chain_and_depth() {
        let tree = small_tree();
        let item = NodeId(4);
        assert_eq!(
            tree.ancestors(item).collect::<Vec<_>>(),
            vec![NodeId(3), NodeId(1), NodeId(0)]
        );
        assert_eq!(tree.depth(item), 3);
        assert_eq!(tree.depth(NodeId(0)), 0);
    }

    #[test]
    fn key_literal_and_value() {
        let tree = small_tree();
        assert_eq!(tree.key_literal(NodeId(1)), Some("a"));
        assert_eq!(tree.mapping_value(NodeId(1)), Some(NodeId(3)));
        assert_eq!(tree.key_literal(NodeId(0)), None);
    }

    #[test]
    fn children_skip_absent_slots() {
        let tree = small_tree();
        assert_eq!(tree.node(NodeId(3)).unwrap().children(), vec![NodeId(4)]);
        assert_eq!(
            tree.node(NodeId(1)).unwrap().children(),
            vec![NodeId(2), NodeId(3)]
        );
    }

    #[test]
    fn unknown_id_misses() {
        let tree = small_tree();
        assert_eq!(tree.node(NodeId(99)), None);
        assert_eq!(tree.parent(NodeId(99)), None);
        assert_eq!(tree.depth(NodeId(99)), 0);
    }

    #[test]
    fn kind_names() {
        let tree = small_tree();
        let names: Vec<_> = tree.iter().map(|(_, node)| node.kind.name()).collect();
        assert_eq!(names, vec!["map", "mapping", "scalar", "sequence", "scalar"]);
    }
}
