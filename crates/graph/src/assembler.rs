//! Graph assembly.
//!
//! A pure function of the record set, the resolver's decisions, and
//! optional enrichment summaries: no resolution logic lives here, it
//! only materializes nodes and edges with display metadata. Running
//! it twice over the same inputs yields an identical graph.

use crate::error::{GraphError, Result};
use crate::types::{CodeGraph, GraphEdge, GraphNode, NodeType};
use crate::Resolution;
use astmap_extractor::FileRecord;
use std::collections::BTreeMap;

/// Enrichment produced by the external summarization collaborator.
/// Absent entries simply leave the corresponding attributes off.
#[derive(Debug, Clone, Default)]
pub struct Summaries {
    /// entity_id → description
    pub entity_descriptions: BTreeMap<String, String>,
    /// method_id → summary
    pub method_summaries: BTreeMap<String, String>,
}

/// Materialize the resolved graph: one node per file, entity, method
/// and distinct external module, then every resolved edge.
pub fn assemble(
    records: &BTreeMap<String, FileRecord>,
    resolution: &Resolution,
    summaries: Option<&Summaries>,
) -> Result<CodeGraph> {
    let mut graph = CodeGraph::new();

    for record in records.values() {
        add_file_nodes(&mut graph, record, summaries)?;
    }

    for source in &resolution.external_modules {
        graph.add_node(GraphNode {
            id: source.clone(),
            node_type: NodeType::External,
            label: source.clone(),
            title: format!("External Library: {source}"),
            attributes: BTreeMap::new(),
        })?;
    }

    for edge in &resolution.edges {
        let from = graph.find_node(&edge.from);
        let to = graph.find_node(&edge.to);
        let (Some(from), Some(to)) = (from, to) else {
            // The resolver only emits verified endpoints; a miss here
            // means the snapshot and the resolution disagree.
            return Err(GraphError::MissingEndpoint {
                from: edge.from.clone(),
                to: edge.to.clone(),
            });
        };
        graph.add_edge(
            from,
            to,
            GraphEdge {
                kind: edge.kind,
                label: edge.label.clone(),
            },
        );
    }

    log::info!(
        "assembled graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    Ok(graph)
}

fn add_file_nodes(
    graph: &mut CodeGraph,
    record: &FileRecord,
    summaries: Option<&Summaries>,
) -> Result<()> {
    let file_id = &record.file_id;
    let file_label = file_id.rsplit('/').next().unwrap_or(file_id).to_string();

    let mut attributes = BTreeMap::new();
    attributes.insert("path".to_string(), file_id.clone());
    graph.add_node(GraphNode {
        id: file_id.clone(),
        node_type: NodeType::File,
        label: file_label,
        title: file_id.clone(),
        attributes,
    })?;

    for (entity_id, entity) in &record.entities {
        let mut title = format!("Kind: {}\nFile: {file_id}", entity.kind.as_str());
        let mut attributes = BTreeMap::new();
        attributes.insert("file_id".to_string(), file_id.clone());
        if let Some(detail) = &entity.kind_detail {
            attributes.insert("kind_detail".to_string(), detail.clone());
        }
        if let Some(super_class) = &entity.super_class {
            attributes.insert("super_class".to_string(), super_class.clone());
        }
        if let Some(description) =
            summaries.and_then(|s| s.entity_descriptions.get(entity_id))
        {
            title.push_str(&format!("\nDesc: {description}"));
            attributes.insert("description".to_string(), description.clone());
        }

        graph.add_node(GraphNode {
            id: entity_id.clone(),
            node_type: entity.kind.into(),
            label: entity.name.clone(),
            title,
            attributes,
        })?;
    }

    for (method_id, method) in &record.methods {
        let mut title = format!(
            "Method: {}\nKind: {}\nEntity: {}\nFile: {file_id}",
            method.name,
            method.kind.as_str(),
            method.entity_id
        );
        let mut attributes = BTreeMap::new();
        attributes.insert("file_id".to_string(), file_id.clone());
        attributes.insert("entity_id".to_string(), method.entity_id.clone());
        if let Some(summary) = summaries.and_then(|s| s.method_summaries.get(method_id)) {
            title.push_str(&format!("\nSummary: {summary}"));
            attributes.insert("summary".to_string(), summary.clone());
        }

        graph.add_node(GraphNode {
            id: method_id.clone(),
            node_type: NodeType::Method,
            label: format!("{}()", method.name),
            title,
            attributes,
        })?;
    }

    Ok(())
}
