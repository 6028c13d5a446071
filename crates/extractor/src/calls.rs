//! Call-site scanning.
//!
//! A full recursive walk over a method body: every nested node and
//! list field is visited, skipping only position metadata and
//! decorator subtrees. The parent's kind tag is threaded down as an
//! explicit argument — `is_await` holds iff the call expression's
//! immediate syntactic parent is an await expression, and the tree
//! itself is never mutated, so scans from parallel extractions cannot
//! interfere.

use crate::record::Call;
use astmap_syntax::{Field, SyntaxNode};

/// Fields never descended into during the call scan.
const SKIPPED_FIELDS: [&str; 3] = ["range", "loc", "decorators"];

/// Collect every call expression reachable from `body`.
#[must_use]
pub fn scan_calls(body: &SyntaxNode) -> Vec<Call> {
    let mut calls = Vec::new();
    walk(body, None, &mut calls);
    calls
}

fn walk(node: &SyntaxNode, parent_kind: Option<&str>, calls: &mut Vec<Call>) {
    if node.kind() == "CallExpression" {
        if let Some(call) = classify_call(node, parent_kind) {
            calls.push(call);
        }
    }

    for (name, field) in node.fields() {
        if SKIPPED_FIELDS.contains(&name) {
            continue;
        }
        match field {
            Field::Node(child) => walk(child, Some(node.kind()), calls),
            Field::List(children) => {
                for child in children {
                    walk(child, Some(node.kind()), calls);
                }
            }
            Field::Scalar(_) => {}
        }
    }
}

/// Split a callee into base expression and method name. Member
/// accesses keep their base (`this` recognized specially), bare
/// identifiers and `super` calls carry no base. Calls whose callee
/// yields no name are not recorded.
fn classify_call(node: &SyntaxNode, parent_kind: Option<&str>) -> Option<Call> {
    let callee = node.child("callee")?;

    let (base_expression, called_method_name) = match callee.kind() {
        "MemberExpression" => {
            let base = callee.child("object").map(|object| {
                if object.kind() == "ThisExpression" {
                    "this".to_string()
                } else {
                    object.name().unwrap_or_else(|| "unknown_base".to_string())
                }
            });
            (base, callee.child("property").and_then(SyntaxNode::name)?)
        }
        "Identifier" => (None, callee.name()?),
        "Super" => (None, "super".to_string()),
        _ => return None,
    };

    Some(Call {
        base_expression,
        called_method_name,
        arguments_str: format_arguments(node.children("arguments")),
        is_await: parent_kind == Some("AwaitExpression"),
    })
}

/// Render call or decorator arguments as a readable `(a, b)` string.
/// Identifiers and member paths by name, literals by value, object and
/// array literals collapsed, anything else by its node kind.
#[must_use]
pub fn format_arguments(arguments: &[SyntaxNode]) -> String {
    if arguments.is_empty() {
        return "()".to_string();
    }

    let rendered: Vec<String> = arguments
        .iter()
        .map(|argument| {
            if let Some(name) = argument.name() {
                return name;
            }
            match argument.kind() {
                "Literal" => argument
                    .scalar("value")
                    .map_or_else(|| "Literal".to_string(), ToString::to_string),
                "ObjectExpression" => "{...}".to_string(),
                "ArrayExpression" => "[...]".to_string(),
                other => other.to_string(),
            }
        })
        .collect();

    format!("({})", rendered.join(", "))
}
