use crate::types::{CodeGraph, EdgeKind, NodeType};
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction;

impl CodeGraph {
    /// Targets of outgoing edges of the given kind.
    #[must_use]
    pub fn targets_by_kind(&self, node: NodeIndex, kind: EdgeKind) -> Vec<NodeIndex> {
        self.graph
            .edges(node)
            .filter(|e| e.weight().kind == kind)
            .map(|e| e.target())
            .collect()
    }

    /// Methods this method calls (outgoing `Calls` edges).
    #[must_use]
    pub fn callees(&self, node: NodeIndex) -> Vec<NodeIndex> {
        self.targets_by_kind(node, EdgeKind::Calls)
    }

    /// Methods calling this one (incoming `Calls` edges).
    #[must_use]
    pub fn callers(&self, node: NodeIndex) -> Vec<NodeIndex> {
        self.graph
            .edges_directed(node, Direction::Incoming)
            .filter(|e| e.weight().kind == EdgeKind::Calls)
            .map(|e| e.source())
            .collect()
    }

    /// Files importing this file or external module.
    #[must_use]
    pub fn importers(&self, node: NodeIndex) -> Vec<NodeIndex> {
        self.graph
            .edges_directed(node, Direction::Incoming)
            .filter(|e| {
                matches!(e.weight().kind, EdgeKind::ImportsInt | EdgeKind::ImportsExt)
            })
            .map(|e| e.source())
            .collect()
    }

    /// The containment parent: the node owning this one via
    /// `Contains`, `ContainsFunc` or `HasMethod`.
    #[must_use]
    pub fn containment_parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .edges_directed(node, Direction::Incoming)
            .find(|e| {
                matches!(
                    e.weight().kind,
                    EdgeKind::Contains | EdgeKind::ContainsFunc | EdgeKind::HasMethod
                )
            })
            .map(|e| e.source())
    }

    /// The file node reached by walking containment upward. Every
    /// non-external node must resolve to exactly one file.
    #[must_use]
    pub fn owning_file(&self, node: NodeIndex) -> Option<NodeIndex> {
        let mut current = node;
        // Containment is a tree of depth ≤ 2 (file → entity → method);
        // the bound guards against a malformed cycle.
        for _ in 0..4 {
            if self.get_node(current)?.node_type == NodeType::File {
                return Some(current);
            }
            current = self.containment_parent(current)?;
        }
        None
    }

    /// (node count, edge count)
    #[must_use]
    pub fn stats(&self) -> (usize, usize) {
        (self.graph.node_count(), self.graph.edge_count())
    }
}
