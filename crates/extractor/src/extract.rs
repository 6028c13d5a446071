use crate::calls::{format_arguments, scan_calls};
use crate::record::{
    Decorator, Dependency, Entity, EntityKind, ExportRecord, FileRecord, ImportRecord, Method,
    MethodKind, Parameter,
};
use crate::types::annotation_str;
use astmap_syntax::SyntaxNode;

/// Extraction configuration consumed, not owned, by this crate.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Import sources starting with this prefix are internal, in
    /// addition to `.`- and `/`-prefixed sources.
    pub source_root_prefix: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            source_root_prefix: "src/".to_string(),
        }
    }
}

/// Closed dispatch set for top-level statements. Unknown kind tags
/// land in `Ignored` instead of silently vanishing mid-match.
enum Statement<'a> {
    Import(&'a SyntaxNode),
    ExportNamed(&'a SyntaxNode),
    ExportDefault(&'a SyntaxNode),
    Class(&'a SyntaxNode),
    Interface(&'a SyntaxNode),
    Function(&'a SyntaxNode),
    Variable(&'a SyntaxNode),
    Ignored,
}

impl<'a> Statement<'a> {
    fn classify(node: &'a SyntaxNode) -> Self {
        match node.kind() {
            "ImportDeclaration" => Self::Import(node),
            "ExportNamedDeclaration" => Self::ExportNamed(node),
            "ExportDefaultDeclaration" => Self::ExportDefault(node),
            "ClassDeclaration" => Self::Class(node),
            "TSInterfaceDeclaration" => Self::Interface(node),
            "FunctionDeclaration" => Self::Function(node),
            "VariableDeclaration" => Self::Variable(node),
            _ => Self::Ignored,
        }
    }
}

/// Walk one file's tree into a [`FileRecord`]. Total: a missing or
/// empty top-level body is logged and yields an empty record rather
/// than aborting the batch.
#[must_use]
pub fn extract(file_id: &str, root: &SyntaxNode, options: &ExtractOptions) -> FileRecord {
    let mut record = FileRecord::empty(file_id);

    let body = root.children("body");
    if body.is_empty() {
        log::warn!("syntax tree body is absent or empty for {file_id}");
        return record;
    }

    for node in body {
        match Statement::classify(node) {
            Statement::Import(node) => extract_import(node, options, &mut record),
            Statement::ExportNamed(node) => extract_named_export(node, &mut record),
            Statement::ExportDefault(node) => extract_default_export(node, &mut record),
            Statement::Class(node) => extract_entity(node, EntityKind::Class, &mut record),
            Statement::Interface(node) => extract_entity(node, EntityKind::Interface, &mut record),
            Statement::Function(node) => extract_entity(node, EntityKind::Function, &mut record),
            Statement::Variable(node) => extract_variables(node, &mut record),
            Statement::Ignored => {}
        }
    }

    record
}

fn extract_import(node: &SyntaxNode, options: &ExtractOptions, record: &mut FileRecord) {
    let Some(source) = node.child("source").and_then(|s| s.str_field("value")) else {
        return;
    };

    let is_external = !(source.starts_with('.')
        || source.starts_with('/')
        || source.starts_with(&options.source_root_prefix));

    let mut specifiers = Vec::new();
    for specifier in node.children("specifiers") {
        let local = specifier.child("local").and_then(SyntaxNode::name);
        if specifier.kind() == "ImportDefaultSpecifier" {
            // Mark default imports distinctly so they are never
            // conflated with named imports of the same identifier.
            if let Some(local) = local {
                specifiers.push(format!("default({local})"));
            }
            continue;
        }
        let name = specifier
            .child("imported")
            .and_then(SyntaxNode::name)
            .or(local);
        if let Some(name) = name {
            specifiers.push(name);
        }
    }

    record.imports.push(ImportRecord {
        source: source.to_string(),
        specifiers,
        is_external,
    });
}

fn extract_named_export(node: &SyntaxNode, record: &mut FileRecord) {
    if let Some(declaration) = node.child("declaration") {
        // `export class Bar {}` and friends: kind comes from the
        // declaration tag. Declarations without a direct name (e.g.
        // variable statements) are not recorded here.
        if let Some(name) = declaration.name() {
            record.exports.push(ExportRecord {
                name,
                kind: declared_kind(declaration.kind()),
            });
        }
        return;
    }

    // `export { foo, bar }`: re-exports of bare identifiers; the kind
    // would need back-resolution, which is out of scope here.
    for specifier in node.children("specifiers") {
        if let Some(name) = specifier.child("exported").and_then(SyntaxNode::name) {
            record.exports.push(ExportRecord {
                name,
                kind: "Unknown".to_string(),
            });
        }
    }
}

fn extract_default_export(node: &SyntaxNode, record: &mut FileRecord) {
    let declaration = node.child("declaration");
    let name = declaration.and_then(SyntaxNode::name);

    let (name, kind) = match (name, declaration) {
        (Some(name), Some(declaration)) => (name, declared_kind(declaration.kind())),
        // Often anonymous: `export default () => ...`
        _ => ("default".to_string(), "Unknown".to_string()),
    };

    record.exports.push(ExportRecord { name, kind });
}

fn declared_kind(tag: &str) -> String {
    tag.strip_suffix("Declaration").unwrap_or(tag).to_string()
}

fn extract_entity(node: &SyntaxNode, kind: EntityKind, record: &mut FileRecord) {
    // No entity without a name: anonymous declarations are skipped.
    let Some(name) = node.name() else { return };

    let entity_id = format!("{}::{name}", record.file_id);
    attach_decorators(&entity_id, node, record);

    let mut entity = Entity {
        entity_id: entity_id.clone(),
        name,
        kind,
        file_id: record.file_id.clone(),
        super_class: None,
        implements: Vec::new(),
        kind_detail: None,
        var_kind: None,
    };

    if kind == EntityKind::Class {
        entity.super_class = node.child("superClass").and_then(SyntaxNode::name);
        entity.implements = node
            .children("implements")
            .iter()
            .filter_map(|clause| clause.child("expression").and_then(SyntaxNode::name))
            .collect();

        let members = node.child("body").map(|b| b.children("body")).unwrap_or(&[]);
        for member in members {
            if member.kind() == "MethodDefinition" {
                extract_method(&entity_id, member, record);
            }
        }
    }

    // Single namespace per file: a later declaration with the same
    // name overwrites an earlier one.
    record.entities.insert(entity_id, entity);
}

fn extract_method(entity_id: &str, member: &SyntaxNode, record: &mut FileRecord) {
    let Some(name) = member.name() else { return };
    let method_id = format!("{entity_id}::{name}");

    let value = member.child("value");
    let is_async = value.is_some_and(|v| v.bool_field("async"));
    let params = value.map(|v| v.children("params")).unwrap_or(&[]);
    let (parameters, dependencies) = extract_parameters(params);
    let return_type_str = annotation_str(value.and_then(|v| v.child("returnType")));

    attach_decorators(&method_id, member, record);

    let kind = MethodKind::from_tag(member.str_field("kind"));
    if kind == MethodKind::Constructor && !dependencies.is_empty() {
        record
            .dependencies
            .insert(entity_id.to_string(), dependencies);
    }

    if let Some(body) = value.and_then(|v| v.child("body")) {
        let calls = scan_calls(body);
        if !calls.is_empty() {
            record.calls.insert(method_id.clone(), calls);
        }
    }

    record.methods.insert(
        method_id.clone(),
        Method {
            method_id,
            name,
            kind,
            entity_id: entity_id.to_string(),
            is_async,
            parameters,
            return_type_str,
        },
    );
}

/// Split constructor parameters into ordinary parameters and injected
/// dependencies (parameter-properties). A parameter-property is never
/// counted twice.
fn extract_parameters(params: &[SyntaxNode]) -> (Vec<Parameter>, Vec<Dependency>) {
    let mut parameters = Vec::new();
    let mut dependencies = Vec::new();

    for param in params {
        match param.kind() {
            "Identifier" => parameters.push(Parameter {
                name: param.name().unwrap_or_else(|| "unknown".to_string()),
                type_str: annotation_str(param.child("typeAnnotation")),
                has_default: false,
            }),
            "TSParameterProperty" => {
                let inner = param.child("parameter");
                if let Some(inner) = inner.filter(|p| p.kind() == "Identifier") {
                    dependencies.push(Dependency {
                        name: inner.name().unwrap_or_else(|| "unknown".to_string()),
                        type_str: annotation_str(inner.child("typeAnnotation")),
                        accessibility: param
                            .str_field("accessibility")
                            .map(str::to_string),
                        readonly: param.bool_field("readonly"),
                    });
                }
            }
            "AssignmentPattern" => {
                let left = param.child("left");
                if let Some(left) = left.filter(|l| l.kind() == "Identifier") {
                    parameters.push(Parameter {
                        name: left.name().unwrap_or_else(|| "unknown".to_string()),
                        type_str: annotation_str(left.child("typeAnnotation")),
                        has_default: true,
                    });
                }
            }
            // Rest elements, destructuring patterns and the like keep
            // their slot but carry no usable name or type.
            _ => parameters.push(Parameter {
                name: "unknown".to_string(),
                type_str: "any".to_string(),
                has_default: false,
            }),
        }
    }

    (parameters, dependencies)
}

fn extract_variables(node: &SyntaxNode, record: &mut FileRecord) {
    let var_kind = node.str_field("kind").map(str::to_string);

    for declarator in node.children("declarations") {
        if declarator.kind() != "VariableDeclarator" {
            continue;
        }
        let Some(name) = declarator.name() else { continue };

        let entity_id = format!("{}::{name}", record.file_id);
        let kind_detail = declarator
            .child("init")
            .map(|init| init.kind().to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        record.entities.insert(
            entity_id.clone(),
            Entity {
                entity_id,
                name,
                kind: EntityKind::Variable,
                file_id: record.file_id.clone(),
                super_class: None,
                implements: Vec::new(),
                kind_detail: Some(kind_detail),
                var_kind: var_kind.clone(),
            },
        );
    }
}

fn attach_decorators(target_id: &str, node: &SyntaxNode, record: &mut FileRecord) {
    let decorators = extract_decorators(node.children("decorators"));
    if !decorators.is_empty() {
        record.decorators.insert(target_id.to_string(), decorators);
    }
}

fn extract_decorators(nodes: &[SyntaxNode]) -> Vec<Decorator> {
    let mut decorators = Vec::new();

    for decorator in nodes {
        let Some(expression) = decorator.child("expression") else {
            continue;
        };

        let (name, arguments_str) = match expression.kind() {
            "CallExpression" => (
                expression.child("callee").and_then(SyntaxNode::name),
                format_arguments(expression.children("arguments")),
            ),
            // Bare `@Name` decorator: no call, empty arguments.
            "Identifier" => (expression.name(), "()".to_string()),
            _ => (None, "()".to_string()),
        };

        if let Some(name) = name {
            decorators.push(Decorator {
                name,
                arguments_str,
            });
        }
    }

    decorators
}
