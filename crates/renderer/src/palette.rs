//! Display palette for the rendered graph.

use astmap_graph::{EdgeKind, NodeType};
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const DEFAULT_NODE_COLOR: &str = "#607D8B";
pub const DEFAULT_EDGE_COLOR: &str = "#9E9E9E";

pub static NODE_COLORS: Lazy<HashMap<NodeType, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (NodeType::File, "#CCCCCC"),
        (NodeType::Class, "#4CAF50"),
        (NodeType::Interface, "#2196F3"),
        (NodeType::Function, "#FFC107"),
        (NodeType::Method, "#FF9800"),
        (NodeType::Variable, "#9C27B0"),
        (NodeType::External, "#F44336"),
    ])
});

pub static EDGE_COLORS: Lazy<HashMap<EdgeKind, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (EdgeKind::Contains, "#E0E0E0"),
        (EdgeKind::ContainsFunc, "#E0E0E0"),
        (EdgeKind::ImportsInt, "#BDBDBD"),
        (EdgeKind::ImportsExt, "#F48FB1"),
        (EdgeKind::HasMethod, "#C8E6C9"),
        (EdgeKind::Injects, "#FFCCBC"),
        (EdgeKind::Calls, "#BBDEFB"),
        (EdgeKind::CallsExt, "#FFCDD2"),
    ])
});

#[must_use]
pub fn node_color(node_type: NodeType) -> &'static str {
    NODE_COLORS.get(&node_type).copied().unwrap_or(DEFAULT_NODE_COLOR)
}

#[must_use]
pub fn node_size(node_type: NodeType) -> u32 {
    match node_type {
        NodeType::File => 25,
        NodeType::Class => 20,
        NodeType::External => 18,
        _ => 15,
    }
}

#[must_use]
pub fn edge_color(kind: EdgeKind) -> &'static str {
    EDGE_COLORS.get(&kind).copied().unwrap_or(DEFAULT_EDGE_COLOR)
}

/// (width, dashed)
#[must_use]
pub fn edge_style(kind: EdgeKind) -> (f32, bool) {
    match kind {
        EdgeKind::ImportsInt | EdgeKind::ImportsExt => (0.5, false),
        EdgeKind::Calls => (1.5, false),
        EdgeKind::Injects => (1.5, true),
        _ => (1.0, false),
    }
}
