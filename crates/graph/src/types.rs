use crate::error::{GraphError, Result};
use astmap_extractor::EntityKind;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Node category in the output property graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeType {
    File,
    Class,
    Interface,
    Function,
    Variable,
    Method,
    External,
}

impl NodeType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "File",
            Self::Class => "Class",
            Self::Interface => "Interface",
            Self::Function => "Function",
            Self::Variable => "Variable",
            Self::Method => "Method",
            Self::External => "External",
        }
    }
}

impl From<EntityKind> for NodeType {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Class => Self::Class,
            EntityKind::Interface => Self::Interface,
            EntityKind::Function => Self::Function,
            EntityKind::Variable => Self::Variable,
        }
    }
}

/// Relationship category of a graph edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum EdgeKind {
    /// File → entity declared in it.
    Contains,
    /// File → method without an owning entity.
    ContainsFunc,
    /// Entity → its method.
    HasMethod,
    /// File → resolved internal import target file.
    ImportsInt,
    /// File → shared external module node.
    ImportsExt,
    /// Entity → entity resolved from a constructor dependency.
    Injects,
    /// Method → resolved target method.
    Calls,
    /// Method → external module node.
    CallsExt,
}

impl EdgeKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contains => "CONTAINS",
            Self::ContainsFunc => "CONTAINS_FUNC",
            Self::HasMethod => "HAS_METHOD",
            Self::ImportsInt => "IMPORTS_INT",
            Self::ImportsExt => "IMPORTS_EXT",
            Self::Injects => "INJECTS",
            Self::Calls => "CALLS",
            Self::CallsExt => "CALLS_EXT",
        }
    }
}

/// One node of the output graph, with display metadata for renderers.
#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub node_type: NodeType,
    pub label: String,
    /// Hover text.
    pub title: String,
    pub attributes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphEdge {
    pub kind: EdgeKind,
    pub label: String,
}

/// The resolved code graph: a petgraph digraph plus a string-id index.
///
/// Built fresh on each run by the assembler and never mutated in
/// place afterwards.
#[derive(Debug, Default)]
pub struct CodeGraph {
    pub graph: DiGraph<GraphNode, GraphEdge>,
    id_index: HashMap<String, NodeIndex>,
}

impl CodeGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node; a duplicate id is an invariant violation the
    /// graph cannot reconcile.
    pub fn add_node(&mut self, node: GraphNode) -> Result<NodeIndex> {
        if self.id_index.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.id_index.insert(id, idx);
        Ok(idx)
    }

    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, edge: GraphEdge) {
        self.graph.add_edge(from, to, edge);
    }

    #[must_use]
    pub fn find_node(&self, id: &str) -> Option<NodeIndex> {
        self.id_index.get(id).copied()
    }

    #[must_use]
    pub fn get_node(&self, idx: NodeIndex) -> Option<&GraphNode> {
        self.graph.node_weight(idx)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &GraphNode)> {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph.node_weight(idx).map(|node| (idx, node)))
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
