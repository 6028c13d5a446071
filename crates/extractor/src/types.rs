//! Type-string reconstruction over annotation nodes.
//!
//! A small recursive grammar: keywords map to lowercase names,
//! reference types recurse into their generic arguments, unions and
//! intersections join member strings, arrays append `[]`, tuples
//! render as bracketed lists. The grammar is total: every input
//! yields a string. A missing annotation is `any`; an unrecognized
//! annotation shape (object literal types and the like) collapses to
//! the `{...}` placeholder.

use astmap_syntax::SyntaxNode;

/// Placeholder for annotation shapes the grammar does not model.
pub const TYPE_PLACEHOLDER: &str = "{...}";

/// Render the type carried by an annotation wrapper node (the
/// `typeAnnotation`/`returnType` holder). `None` means unannotated.
#[must_use]
pub fn annotation_str(wrapper: Option<&SyntaxNode>) -> String {
    match wrapper.and_then(|w| w.child("typeAnnotation")) {
        Some(ty) => render_type(ty),
        None => "any".to_string(),
    }
}

fn render_type(ty: &SyntaxNode) -> String {
    match ty.kind() {
        "TSTypeReference" => {
            let name = ty
                .child("typeName")
                .and_then(SyntaxNode::name)
                .unwrap_or_else(|| "unknown".to_string());
            let args = ty
                .child("typeArguments")
                .map(|a| a.children("params"))
                .unwrap_or(&[]);
            if args.is_empty() {
                name
            } else {
                let rendered: Vec<String> = args.iter().map(render_type).collect();
                format!("{name}<{}>", rendered.join(", "))
            }
        }
        "TSStringKeyword" => "string".to_string(),
        "TSNumberKeyword" => "number".to_string(),
        "TSBooleanKeyword" => "boolean".to_string(),
        "TSVoidKeyword" => "void".to_string(),
        "TSAnyKeyword" => "any".to_string(),
        "TSNullKeyword" => "null".to_string(),
        "TSUndefinedKeyword" => "undefined".to_string(),
        "TSNeverKeyword" => "never".to_string(),
        "TSUnknownKeyword" => "unknown".to_string(),
        "TSSymbolKeyword" => "symbol".to_string(),
        "TSObjectKeyword" => "object".to_string(),
        "TSUnionType" => join_members(ty, " | "),
        "TSIntersectionType" => join_members(ty, " & "),
        "TSArrayType" => {
            let element = ty
                .child("elementType")
                .map(render_type)
                .unwrap_or_else(|| "any".to_string());
            format!("{element}[]")
        }
        "TSTupleType" => {
            let elements: Vec<String> =
                ty.children("elementTypes").iter().map(render_type).collect();
            format!("[{}]", elements.join(", "))
        }
        _ => TYPE_PLACEHOLDER.to_string(),
    }
}

fn join_members(ty: &SyntaxNode, separator: &str) -> String {
    let members: Vec<String> = ty.children("types").iter().map(render_type).collect();
    members.join(separator)
}
