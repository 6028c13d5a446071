//! Cross-file resolution.
//!
//! Turns the complete `file_id → FileRecord` snapshot into edge
//! triples. Resolution is heuristic where the symbol space is
//! ambiguous: dependency types and call bases are matched by declared
//! name, owning file first, then every other file in lexicographic
//! `file_id` order so output is reproducible when names collide.
//! References that cannot be matched are dropped with a diagnostic,
//! never guessed.

use crate::types::EdgeKind;
use astmap_extractor::FileRecord;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Extension probe order for internal import targets.
const IMPORT_EXTENSIONS: [&str; 4] = ["ts", "tsx", "js", "jsx"];

/// An edge decided by the resolver, keyed by node id strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEdge {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    UnresolvedImport,
    UnresolvedDependency,
    UnresolvedCall,
}

/// A non-fatal unresolved reference: the corresponding edge was
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub file_id: String,
    pub detail: String,
}

/// Everything the assembler needs: decided edges, the deduplicated
/// external module set, and the unresolved-reference diagnostics.
#[derive(Debug, Default)]
pub struct Resolution {
    pub edges: Vec<ResolvedEdge>,
    pub external_modules: BTreeSet<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    fn edge(&mut self, from: &str, to: &str, kind: EdgeKind, label: impl Into<String>) {
        self.edges.push(ResolvedEdge {
            from: from.to_string(),
            to: to.to_string(),
            kind,
            label: label.into(),
        });
    }

    fn diagnostic(&mut self, kind: DiagnosticKind, file_id: &str, detail: String) {
        log::debug!("{kind:?} in {file_id}: {detail}");
        self.diagnostics.push(Diagnostic {
            kind,
            file_id: file_id.to_string(),
            detail,
        });
    }
}

/// Resolve the full record set. Read-only over its input; two runs on
/// the same snapshot produce identical output.
#[must_use]
pub fn resolve(records: &BTreeMap<String, FileRecord>) -> Resolution {
    let mut resolution = Resolution::default();

    for record in records.values() {
        resolve_containment(record, &mut resolution);
    }
    for record in records.values() {
        resolve_imports(record, records, &mut resolution);
    }
    for record in records.values() {
        resolve_dependencies(record, records, &mut resolution);
    }
    // External module nodes are known by now; call resolution may
    // fall back to them.
    for record in records.values() {
        resolve_calls(record, records, &mut resolution);
    }

    resolution
}

fn resolve_containment(record: &FileRecord, resolution: &mut Resolution) {
    for entity_id in record.entities.keys() {
        resolution.edge(&record.file_id, entity_id, EdgeKind::Contains, "");
    }
    for (method_id, method) in &record.methods {
        if record.entities.contains_key(&method.entity_id) {
            resolution.edge(&method.entity_id, method_id, EdgeKind::HasMethod, "");
        } else {
            resolution.edge(&record.file_id, method_id, EdgeKind::ContainsFunc, "");
        }
    }
}

fn resolve_imports(
    record: &FileRecord,
    records: &BTreeMap<String, FileRecord>,
    resolution: &mut Resolution,
) {
    for import in &record.imports {
        if import.is_external {
            resolution.external_modules.insert(import.source.clone());
            resolution.edge(
                &record.file_id,
                &import.source,
                EdgeKind::ImportsExt,
                import.specifiers.join(", "),
            );
        } else if let Some(target) = resolve_internal_path(&record.file_id, &import.source, records)
        {
            resolution.edge(
                &record.file_id,
                &target,
                EdgeKind::ImportsInt,
                last_segment(&import.source),
            );
        } else {
            resolution.diagnostic(
                DiagnosticKind::UnresolvedImport,
                &record.file_id,
                format!("cannot resolve internal import '{}'", import.source),
            );
        }
    }
}

/// Best-effort internal import resolution: join the importing file's
/// directory with the specifier, then probe direct files with each
/// known extension and, for extensionless specifiers, directory index
/// files. Intentionally not a full module-resolution algorithm.
fn resolve_internal_path(
    importer: &str,
    source: &str,
    records: &BTreeMap<String, FileRecord>,
) -> Option<String> {
    let base = match importer.rsplit_once('/') {
        Some((dir, _)) => format!("{dir}/{source}"),
        None => source.to_string(),
    };
    let joined = normalize_path(&base);

    for ext in IMPORT_EXTENSIONS {
        let candidate = with_extension(&joined, ext);
        if records.contains_key(&candidate) {
            return Some(candidate);
        }
    }

    if !has_extension(&joined) {
        for ext in IMPORT_EXTENSIONS {
            let candidate = format!("{joined}/index.{ext}");
            if records.contains_key(&candidate) {
                return Some(candidate);
            }
        }
    }

    None
}

fn resolve_dependencies(
    record: &FileRecord,
    records: &BTreeMap<String, FileRecord>,
    resolution: &mut Resolution,
) {
    for (entity_id, dependencies) in &record.dependencies {
        for dependency in dependencies {
            match find_entity_by_name(&dependency.type_str, record, records) {
                Some(target) => resolution.edge(
                    entity_id,
                    &target,
                    EdgeKind::Injects,
                    format!("as {}", dependency.name),
                ),
                None => resolution.diagnostic(
                    DiagnosticKind::UnresolvedDependency,
                    &record.file_id,
                    format!(
                        "cannot resolve dependency type '{}' for '{entity_id}'",
                        dependency.type_str
                    ),
                ),
            }
        }
    }
}

/// Name-match entity lookup: the owning file first, then every other
/// file in lexicographic order. A documented heuristic, not sound
/// type resolution — first match wins.
fn find_entity_by_name(
    name: &str,
    own: &FileRecord,
    records: &BTreeMap<String, FileRecord>,
) -> Option<String> {
    let local = own
        .entities
        .values()
        .find(|entity| entity.name == name)
        .map(|entity| entity.entity_id.clone());
    if local.is_some() {
        return local;
    }

    records
        .values()
        .filter(|record| record.file_id != own.file_id)
        .flat_map(|record| record.entities.values())
        .find(|entity| entity.name == name)
        .map(|entity| entity.entity_id.clone())
}

fn resolve_calls(
    record: &FileRecord,
    records: &BTreeMap<String, FileRecord>,
    resolution: &mut Resolution,
) {
    for (method_id, calls) in &record.calls {
        let Some(caller) = record.methods.get(method_id) else {
            continue;
        };

        for call in calls {
            let name = &call.called_method_name;
            let await_label = if call.is_await { "await" } else { "" };

            match call.base_expression.as_deref() {
                Some("this") => {
                    let target = format!("{}::{name}", caller.entity_id);
                    if record.methods.contains_key(&target) {
                        resolution.edge(method_id, &target, EdgeKind::Calls, await_label);
                    } else {
                        resolution.diagnostic(
                            DiagnosticKind::UnresolvedCall,
                            &record.file_id,
                            format!("no method '{name}' on '{}' for this.{name}()", caller.entity_id),
                        );
                    }
                }
                Some(base) => {
                    let target = resolve_dependency_call(base, name, &caller.entity_id, record, records);
                    if let Some(target) = target {
                        resolution.edge(method_id, &target, EdgeKind::Calls, await_label);
                    } else if resolution.external_modules.contains(base) {
                        resolution.edge(method_id, base, EdgeKind::CallsExt, name.clone());
                    } else {
                        resolution.diagnostic(
                            DiagnosticKind::UnresolvedCall,
                            &record.file_id,
                            format!("cannot resolve target for {base}.{name}() from '{method_id}'"),
                        );
                    }
                }
                // Bare calls stay unresolved: free functions and
                // same-file helpers are not traced.
                None => resolution.diagnostic(
                    DiagnosticKind::UnresolvedCall,
                    &record.file_id,
                    format!("cannot resolve target for bare call {name}() from '{method_id}'"),
                ),
            }
        }
    }
}

/// Base matched against the caller entity's declared dependencies;
/// the dependency's type resolves like any injection, and the target
/// method must actually exist on the resolved entity.
fn resolve_dependency_call(
    base: &str,
    method_name: &str,
    caller_entity_id: &str,
    record: &FileRecord,
    records: &BTreeMap<String, FileRecord>,
) -> Option<String> {
    let dependency = record
        .dependencies
        .get(caller_entity_id)?
        .iter()
        .find(|dep| dep.name == base)?;

    let entity_id = find_entity_by_name(&dependency.type_str, record, records)?;
    let target = format!("{entity_id}::{method_name}");

    records
        .values()
        .any(|r| r.methods.contains_key(&target))
        .then_some(target)
}

fn last_segment(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}

/// Collapse `.` and `..` segments of a `/`-separated relative path.
fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|s| *s != "..") {
                    segments.pop();
                } else {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

fn has_extension(path: &str) -> bool {
    last_segment(path).rfind('.').is_some_and(|pos| pos > 0)
}

/// Replace an existing extension or append one, mirroring
/// `Path::with_extension`.
fn with_extension(path: &str, ext: &str) -> String {
    let segment = last_segment(path);
    let stem = match segment.rfind('.') {
        Some(pos) if pos > 0 => &segment[..pos],
        _ => segment.as_str(),
    };
    match path.rsplit_once('/') {
        Some((dir, _)) => format!("{dir}/{stem}.{ext}"),
        None => format!("{stem}.{ext}"),
    }
}
