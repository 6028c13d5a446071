use serde::Serialize;
use std::collections::BTreeMap;

/// Everything extracted from one file's syntax tree.
///
/// Owned exclusively by the extractor invocation that built it and
/// read-only afterward; the resolver sees the full set of records as
/// an immutable snapshot. Maps are `BTreeMap` so iteration order, and
/// with it all downstream tie-breaking, is deterministic.
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    pub file_id: String,
    pub imports: Vec<ImportRecord>,
    pub exports: Vec<ExportRecord>,
    /// entity_id → entity
    pub entities: BTreeMap<String, Entity>,
    /// method_id → method
    pub methods: BTreeMap<String, Method>,
    /// method_id → calls made inside that method body
    pub calls: BTreeMap<String, Vec<Call>>,
    /// entity_id → constructor-injected dependencies
    pub dependencies: BTreeMap<String, Vec<Dependency>>,
    /// entity_id or method_id → decorators
    pub decorators: BTreeMap<String, Vec<Decorator>>,
}

impl FileRecord {
    #[must_use]
    pub fn empty(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            imports: Vec::new(),
            exports: Vec::new(),
            entities: BTreeMap::new(),
            methods: BTreeMap::new(),
            calls: BTreeMap::new(),
            dependencies: BTreeMap::new(),
            decorators: BTreeMap::new(),
        }
    }
}

/// A top-level declaration within a file.
#[derive(Debug, Clone, Serialize)]
pub struct Entity {
    pub entity_id: String,
    pub name: String,
    pub kind: EntityKind,
    pub file_id: String,
    pub super_class: Option<String>,
    pub implements: Vec<String>,
    /// For variables: the initializer's node kind (e.g.
    /// `ArrowFunctionExpression`, `Literal`).
    pub kind_detail: Option<String>,
    /// For variables: the declaration keyword (`const`, `let`, `var`).
    pub var_kind: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    Class,
    Interface,
    Function,
    Variable,
}

impl EntityKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Class => "Class",
            Self::Interface => "Interface",
            Self::Function => "Function",
            Self::Variable => "Variable",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Method {
    pub method_id: String,
    pub name: String,
    pub kind: MethodKind,
    pub entity_id: String,
    pub is_async: bool,
    pub parameters: Vec<Parameter>,
    pub return_type_str: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

impl MethodKind {
    /// Member `kind` tags as emitted by the syntax exporter; anything
    /// unrecognized is an ordinary method.
    #[must_use]
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("constructor") => Self::Constructor,
            Some("get") => Self::Get,
            Some("set") => Self::Set,
            _ => Self::Method,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Constructor => "constructor",
            Self::Method => "method",
            Self::Get => "get",
            Self::Set => "set",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Parameter {
    pub name: String,
    pub type_str: String,
    pub has_default: bool,
}

/// A constructor parameter-property: an injected collaborator,
/// distinct from the ordinary parameters of the same constructor.
#[derive(Debug, Clone, Serialize)]
pub struct Dependency {
    pub name: String,
    pub type_str: String,
    pub accessibility: Option<String>,
    pub readonly: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Call {
    /// `this`, an identifier/member-path string, or `None` for a bare
    /// function call.
    pub base_expression: Option<String>,
    pub called_method_name: String,
    pub arguments_str: String,
    pub is_await: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decorator {
    pub name: String,
    pub arguments_str: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportRecord {
    pub source: String,
    pub specifiers: Vec<String>,
    pub is_external: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRecord {
    pub name: String,
    /// Declared kind (`Class`, `Function`, ...) or `Unknown` for bare
    /// re-exports that would need back-resolution.
    pub kind: String,
}
