//! End-to-end: decode → extract → resolve → assemble.

use astmap_extractor::{extract, ExtractOptions, FileRecord};
use astmap_graph::{assemble, resolve, CodeGraph, EdgeKind, NodeType, Summaries};
use astmap_syntax::read_document;
use petgraph::visit::EdgeRef;
use std::collections::BTreeMap;

fn identifier(name: &str) -> serde_json::Value {
    serde_json::json!({"type": "Identifier", "name": name})
}

fn typed_identifier(name: &str, type_name: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "Identifier",
        "name": name,
        "typeAnnotation": {
            "type": "TSTypeAnnotation",
            "typeAnnotation": {"type": "TSTypeReference", "typeName": identifier(type_name)}
        }
    })
}

/// `this.<field>.<method>()` — the base collapses to the field name,
/// which is then matched against injected dependencies.
fn this_field_call(field: &str, method: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "ExpressionStatement",
        "expression": {
            "type": "CallExpression",
            "callee": {
                "type": "MemberExpression",
                "object": {
                    "type": "MemberExpression",
                    "object": {"type": "ThisExpression"},
                    "property": identifier(field)
                },
                "property": identifier(method)
            },
            "arguments": []
        }
    })
}

fn extract_record(file_id: &str, doc: serde_json::Value) -> FileRecord {
    let root = read_document(&doc.to_string()).expect("valid document");
    extract(file_id, &root, &ExtractOptions::default())
}

/// `a.ts` imports `./b`, declares class `A` with parameter-property
/// `b: B`, and `A.useB` calls `this.b.go()` — the canonical
/// import/inject/call chain.
fn scenario_records() -> BTreeMap<String, FileRecord> {
    let a = extract_record(
        "src/a.ts",
        serde_json::json!({
            "type": "Program",
            "body": [
                {
                    "type": "ImportDeclaration",
                    "source": {"type": "Literal", "value": "./b"},
                    "specifiers": [
                        {"type": "ImportSpecifier", "imported": identifier("B"), "local": identifier("B")}
                    ]
                },
                {
                    "type": "ClassDeclaration",
                    "id": identifier("A"),
                    "body": {
                        "type": "ClassBody",
                        "body": [
                            {
                                "type": "MethodDefinition",
                                "kind": "constructor",
                                "key": identifier("constructor"),
                                "value": {
                                    "type": "FunctionExpression",
                                    "params": [{
                                        "type": "TSParameterProperty",
                                        "accessibility": "private",
                                        "parameter": typed_identifier("b", "B")
                                    }],
                                    "body": {"type": "BlockStatement", "body": []}
                                }
                            },
                            {
                                "type": "MethodDefinition",
                                "kind": "method",
                                "key": identifier("useB"),
                                "value": {
                                    "type": "FunctionExpression",
                                    "params": [],
                                    "body": {
                                        "type": "BlockStatement",
                                        "body": [this_field_call("b", "go")]
                                    }
                                }
                            }
                        ]
                    }
                }
            ]
        }),
    );

    let b = extract_record(
        "src/b.ts",
        serde_json::json!({
            "type": "Program",
            "body": [{
                "type": "ClassDeclaration",
                "id": identifier("B"),
                "body": {
                    "type": "ClassBody",
                    "body": [{
                        "type": "MethodDefinition",
                        "kind": "method",
                        "key": identifier("go"),
                        "value": {
                            "type": "FunctionExpression",
                            "params": [],
                            "body": {"type": "BlockStatement", "body": []}
                        }
                    }]
                }
            }]
        }),
    );

    let mut records = BTreeMap::new();
    records.insert(a.file_id.clone(), a);
    records.insert(b.file_id.clone(), b);
    records
}

fn build(records: &BTreeMap<String, FileRecord>) -> CodeGraph {
    let resolution = resolve(records);
    assemble(records, &resolution, None).expect("consistent graph")
}

fn edge_triples(graph: &CodeGraph) -> Vec<(String, String, EdgeKind, String)> {
    let mut triples: Vec<_> = graph
        .graph
        .edge_references()
        .map(|e| {
            (
                graph.get_node(e.source()).unwrap().id.clone(),
                graph.get_node(e.target()).unwrap().id.clone(),
                e.weight().kind,
                e.weight().label.clone(),
            )
        })
        .collect();
    triples.sort();
    triples
}

#[test]
fn inject_and_call_chain_resolves_across_files() {
    let records = scenario_records();
    let graph = build(&records);

    let triples = edge_triples(&graph);
    let has = |from: &str, to: &str, kind: EdgeKind| {
        triples
            .iter()
            .any(|(f, t, k, _)| f == from && t == to && *k == kind)
    };

    assert!(has("src/a.ts", "src/b.ts", EdgeKind::ImportsInt));
    assert!(has("src/a.ts::A", "src/b.ts::B", EdgeKind::Injects));
    assert!(has(
        "src/a.ts::A::useB",
        "src/b.ts::B::go",
        EdgeKind::Calls
    ));
}

#[test]
fn same_named_entities_in_different_files_stay_distinct() {
    let class_foo = serde_json::json!({
        "type": "Program",
        "body": [{
            "type": "ClassDeclaration",
            "id": identifier("Foo"),
            "body": {"type": "ClassBody", "body": []}
        }]
    });

    let mut records = BTreeMap::new();
    for file_id in ["src/one.ts", "src/two.ts"] {
        let record = extract_record(file_id, class_foo.clone());
        records.insert(record.file_id.clone(), record);
    }

    let graph = build(&records);
    assert!(graph.find_node("src/one.ts::Foo").is_some());
    assert!(graph.find_node("src/two.ts::Foo").is_some());
}

#[test]
fn external_imports_share_one_node() {
    let importer = |file_id: &str| {
        extract_record(
            file_id,
            serde_json::json!({
                "type": "Program",
                "body": [{
                    "type": "ImportDeclaration",
                    "source": {"type": "Literal", "value": "lodash"},
                    "specifiers": [
                        {"type": "ImportDefaultSpecifier", "local": identifier("_")}
                    ]
                }]
            }),
        )
    };

    let mut records = BTreeMap::new();
    for file_id in ["src/x.ts", "src/y.ts", "src/z.ts"] {
        let record = importer(file_id);
        records.insert(record.file_id.clone(), record);
    }

    let graph = build(&records);
    let externals: Vec<_> = graph
        .nodes()
        .filter(|(_, n)| n.node_type == NodeType::External)
        .collect();
    assert_eq!(externals.len(), 1);
    assert_eq!(externals[0].1.id, "lodash");

    let lodash = graph.find_node("lodash").unwrap();
    assert_eq!(graph.importers(lodash).len(), 3);
}

#[test]
fn pipeline_is_idempotent() {
    let records = scenario_records();
    let first = build(&records);
    let second = build(&records);

    let node_ids = |g: &CodeGraph| {
        let mut ids: Vec<String> = g.nodes().map(|(_, n)| n.id.clone()).collect();
        ids.sort();
        ids
    };
    assert_eq!(node_ids(&first), node_ids(&second));
    assert_eq!(edge_triples(&first), edge_triples(&second));
}

#[test]
fn no_orphan_nodes_outside_externals() {
    let records = scenario_records();
    let graph = build(&records);

    for (idx, node) in graph.nodes() {
        if node.node_type == NodeType::External {
            continue;
        }
        let file = graph
            .owning_file(idx)
            .unwrap_or_else(|| panic!("orphan node {}", node.id));
        assert_eq!(
            graph.get_node(file).unwrap().node_type,
            NodeType::File,
            "containment of {} must end at a file",
            node.id
        );
    }
}

#[test]
fn summaries_enrich_titles_when_present() {
    let records = scenario_records();
    let resolution = resolve(&records);

    let mut summaries = Summaries::default();
    summaries
        .entity_descriptions
        .insert("src/a.ts::A".to_string(), "Coordinates B".to_string());
    summaries
        .method_summaries
        .insert("src/b.ts::B::go".to_string(), "Does the work".to_string());

    let graph = assemble(&records, &resolution, Some(&summaries)).unwrap();

    let a = graph.get_node(graph.find_node("src/a.ts::A").unwrap()).unwrap();
    assert!(a.title.contains("Desc: Coordinates B"));
    assert_eq!(a.attributes.get("description").unwrap(), "Coordinates B");

    let go = graph
        .get_node(graph.find_node("src/b.ts::B::go").unwrap())
        .unwrap();
    assert!(go.title.contains("Summary: Does the work"));

    // Without summaries the same assembly simply lacks the fields.
    let plain = assemble(&records, &resolution, None).unwrap();
    let a_plain = plain
        .get_node(plain.find_node("src/a.ts::A").unwrap())
        .unwrap();
    assert!(!a_plain.attributes.contains_key("description"));
}
