//! Self-contained vis-network page generation.

use crate::error::Result;
use crate::palette;
use astmap_graph::CodeGraph;
use petgraph::visit::EdgeRef;
use serde_json::{json, Value};

/// Presentation knobs, all with usable defaults.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub heading: String,
    pub height: String,
    pub width: String,
    /// Raw vis-network options JSON passed through from config.
    /// Invalid JSON is logged and ignored.
    pub vis_options: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            heading: "Codebase Graph".to_string(),
            height: "90vh".to_string(),
            width: "100%".to_string(),
            vis_options: None,
        }
    }
}

/// Render the graph as one standalone HTML page.
pub fn render_html(graph: &CodeGraph, options: &RenderOptions) -> Result<String> {
    let nodes: Vec<Value> = graph
        .nodes()
        .map(|(idx, node)| {
            json!({
                "id": idx.index(),
                "label": node.label,
                "title": node.title,
                "color": palette::node_color(node.node_type),
                "size": palette::node_size(node.node_type),
                "shape": "dot",
            })
        })
        .collect();

    let edges: Vec<Value> = graph
        .graph
        .edge_references()
        .map(|edge| {
            let kind = edge.weight().kind;
            let (width, dashes) = palette::edge_style(kind);
            json!({
                "from": edge.source().index(),
                "to": edge.target().index(),
                "label": edge.weight().label,
                "title": kind.as_str(),
                "color": palette::edge_color(kind),
                "width": width,
                "dashes": dashes,
                "arrows": "to",
            })
        })
        .collect();

    let vis_options = parse_vis_options(options.vis_options.as_deref());

    let nodes_json = embed_json(&serde_json::to_string(&nodes)?);
    let edges_json = embed_json(&serde_json::to_string(&edges)?);
    let options_json = embed_json(&serde_json::to_string(&vis_options)?);

    log::info!(
        "rendering {} nodes and {} edges to HTML",
        nodes.len(),
        edges.len()
    );

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{heading}</title>
<script src="https://unpkg.com/vis-network/standalone/umd/vis-network.min.js"></script>
<style>
  body {{ margin: 0; font-family: sans-serif; }}
  h1 {{ margin: 8px 16px; font-size: 1.2em; }}
  #graph {{ width: {width}; height: {height}; border-top: 1px solid #ddd; }}
</style>
</head>
<body>
<h1>{heading}</h1>
<div id="graph"></div>
<script>
  const nodes = new vis.DataSet({nodes_json});
  const edges = new vis.DataSet({edges_json});
  const container = document.getElementById("graph");
  const options = {options_json};
  new vis.Network(container, {{ nodes, edges }}, options);
</script>
</body>
</html>
"#,
        heading = escape_html(&options.heading),
        width = options.width,
        height = options.height,
    ))
}

fn parse_vis_options(raw: Option<&str>) -> Value {
    let Some(raw) = raw else {
        return json!({});
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(value) if value.is_object() => value,
        Ok(_) => {
            log::warn!("vis_options must be a JSON object; ignoring");
            json!({})
        }
        Err(err) => {
            log::warn!("could not parse vis_options from config: {err}");
            json!({})
        }
    }
}

/// Keep embedded JSON from terminating the surrounding script tag.
fn embed_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use astmap_graph::{EdgeKind, GraphEdge, GraphNode, NodeType};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn node(id: &str, node_type: NodeType) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            node_type,
            label: id.to_string(),
            title: id.to_string(),
            attributes: BTreeMap::new(),
        }
    }

    fn two_node_graph() -> CodeGraph {
        let mut graph = CodeGraph::new();
        let file = graph.add_node(node("src/a.ts", NodeType::File)).unwrap();
        let class = graph.add_node(node("src/a.ts::A", NodeType::Class)).unwrap();
        graph.add_edge(
            file,
            class,
            GraphEdge {
                kind: EdgeKind::Contains,
                label: String::new(),
            },
        );
        graph
    }

    #[test]
    fn page_embeds_nodes_edges_and_palette() {
        let html = render_html(&two_node_graph(), &RenderOptions::default()).unwrap();
        assert!(html.contains("vis.Network"));
        assert!(html.contains("#CCCCCC"));
        assert!(html.contains("#4CAF50"));
        assert!(html.contains("\"title\":\"CONTAINS\""));
        assert!(html.contains("Codebase Graph"));
    }

    #[test]
    fn script_closing_tags_in_labels_are_neutralized() {
        let mut graph = CodeGraph::new();
        let mut sneaky = node("src/x.ts", NodeType::File);
        sneaky.title = "</script><b>".to_string();
        graph.add_node(sneaky).unwrap();

        let html = render_html(&graph, &RenderOptions::default()).unwrap();
        assert!(!html.contains("</script><b>"));
        assert!(html.contains("<\\/script>"));
    }

    #[test]
    fn invalid_vis_options_fall_back_to_empty_object() {
        let options = RenderOptions {
            vis_options: Some("{not json".to_string()),
            ..RenderOptions::default()
        };
        let html = render_html(&two_node_graph(), &options).unwrap();
        assert!(html.contains("const options = {};"));
    }

    #[test]
    fn heading_is_html_escaped() {
        let options = RenderOptions {
            heading: "A < B & C".to_string(),
            ..RenderOptions::default()
        };
        let html = render_html(&two_node_graph(), &options).unwrap();
        assert!(html.contains("A &lt; B &amp; C"));
    }

    #[test]
    fn vis_options_object_passes_through() {
        let options = RenderOptions {
            vis_options: Some(r#"{"physics": {"enabled": false}}"#.to_string()),
            ..RenderOptions::default()
        };
        let html = render_html(&two_node_graph(), &options).unwrap();
        assert!(html.contains(r#""physics":{"enabled":false}"#));
    }

    #[test]
    fn default_options_render_empty_object() {
        assert_eq!(parse_vis_options(None), serde_json::json!({}));
    }
}
