use crate::error::{Result, SyntaxError};
use serde_json::Value;
use std::collections::BTreeMap;

/// One node of a decoded syntax tree: a kind tag plus arbitrary child
/// fields. Field names are kept sorted so traversal order is stable.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    kind: String,
    fields: BTreeMap<String, Field>,
}

/// A child field of a [`SyntaxNode`].
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Node(Box<SyntaxNode>),
    List(Vec<SyntaxNode>),
    Scalar(Value),
}

/// Decode one syntax-tree document. The root must itself be a tagged
/// node (conventionally kind `Program`).
pub fn read_document(json: &str) -> Result<SyntaxNode> {
    let value: Value = serde_json::from_str(json)?;
    SyntaxNode::from_value(&value).ok_or_else(|| {
        let head: String = json.chars().take(64).collect();
        SyntaxError::InvalidRoot(head)
    })
}

impl SyntaxNode {
    /// Convert a JSON value into a node. Only objects carrying a string
    /// `type` tag qualify; everything else is a scalar to its parent.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        let kind = map.get("type")?.as_str()?.to_string();

        let mut fields = BTreeMap::new();
        for (name, child) in map {
            if name == "type" {
                continue;
            }
            fields.insert(name.clone(), Field::from_value(child));
        }

        Some(Self { kind, fields })
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Single child node under `name`, if the field holds one.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&SyntaxNode> {
        match self.fields.get(name) {
            Some(Field::Node(node)) => Some(node),
            _ => None,
        }
    }

    /// Child node list under `name`; empty when absent or not a list.
    #[must_use]
    pub fn children(&self, name: &str) -> &[SyntaxNode] {
        match self.fields.get(name) {
            Some(Field::List(nodes)) => nodes,
            _ => &[],
        }
    }

    /// Scalar field under `name`.
    #[must_use]
    pub fn scalar(&self, name: &str) -> Option<&Value> {
        match self.fields.get(name) {
            Some(Field::Scalar(value)) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.scalar(name).and_then(Value::as_str)
    }

    #[must_use]
    pub fn bool_field(&self, name: &str) -> bool {
        self.scalar(name).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Whether a field named `name` exists at all.
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// All fields in sorted name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Best-effort declared/referenced name for identifier-ish nodes.
    ///
    /// Declarations resolve through their `id`, method definitions
    /// through their `key`, member expressions join as `object.property`
    /// and literals stringify their value.
    #[must_use]
    pub fn name(&self) -> Option<String> {
        match self.kind.as_str() {
            "Identifier" | "PrivateName" => self.str_field("name").map(str::to_string),
            "ClassDeclaration"
            | "TSInterfaceDeclaration"
            | "FunctionDeclaration"
            | "VariableDeclarator" => self.child("id").and_then(SyntaxNode::name),
            "MethodDefinition" => self.child("key").and_then(SyntaxNode::name),
            "MemberExpression" => {
                let object = self.child("object").and_then(SyntaxNode::name);
                let property = self.child("property").and_then(SyntaxNode::name);
                match (object, property) {
                    (Some(obj), Some(prop)) => Some(format!("{obj}.{prop}")),
                    (None, prop) => prop,
                    (Some(_), None) => None,
                }
            }
            "Literal" => self.scalar("value").map(scalar_to_string),
            _ => None,
        }
    }
}

impl Field {
    fn from_value(value: &Value) -> Self {
        if let Some(node) = SyntaxNode::from_value(value) {
            return Self::Node(Box::new(node));
        }
        if let Some(items) = value.as_array() {
            let nodes: Vec<SyntaxNode> = items.iter().filter_map(SyntaxNode::from_value).collect();
            // Position arrays like `range: [0, 10]` stay scalar.
            if !nodes.is_empty() && nodes.len() == items.len() {
                return Self::List(nodes);
            }
        }
        Self::Scalar(value.clone())
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node(json: &str) -> SyntaxNode {
        read_document(json).unwrap()
    }

    #[test]
    fn decodes_nested_nodes_and_lists() {
        let root = node(
            r#"{
                "type": "Program",
                "body": [
                    {"type": "ClassDeclaration", "id": {"type": "Identifier", "name": "Foo"}}
                ],
                "range": [0, 42]
            }"#,
        );

        assert_eq!(root.kind(), "Program");
        assert_eq!(root.children("body").len(), 1);
        assert_eq!(root.children("body")[0].kind(), "ClassDeclaration");
        // range is a scalar array, not a node list
        assert!(root.scalar("range").is_some());
        assert!(root.children("range").is_empty());
    }

    #[test]
    fn rejects_untagged_root() {
        assert!(read_document(r#"{"body": []}"#).is_err());
        assert!(read_document("[1, 2]").is_err());
    }

    #[test]
    fn name_resolution_covers_declarations() {
        let class = node(r#"{"type": "ClassDeclaration", "id": {"type": "Identifier", "name": "Svc"}}"#);
        assert_eq!(class.name().as_deref(), Some("Svc"));

        let method = node(r#"{"type": "MethodDefinition", "key": {"type": "Identifier", "name": "run"}}"#);
        assert_eq!(method.name().as_deref(), Some("run"));

        let member = node(
            r#"{"type": "MemberExpression",
                "object": {"type": "Identifier", "name": "this_logger"},
                "property": {"type": "Identifier", "name": "warn"}}"#,
        );
        assert_eq!(member.name().as_deref(), Some("this_logger.warn"));

        let literal = node(r#"{"type": "Literal", "value": 42}"#);
        assert_eq!(literal.name().as_deref(), Some("42"));
    }

    #[test]
    fn member_expression_falls_back_to_property() {
        let member = node(
            r#"{"type": "MemberExpression",
                "object": {"type": "CallExpression"},
                "property": {"type": "Identifier", "name": "then"}}"#,
        );
        assert_eq!(member.name().as_deref(), Some("then"));
    }
}
