//! # astmap Graph
//!
//! Cross-file resolution and assembly of the structural code graph.
//!
//! ## Architecture
//!
//! ```text
//! map(file_id → FileRecord)          (read-only snapshot, post-barrier)
//!     │
//!     ├──> Resolver (heuristic)
//!     │      ├─ Import path probing (extensions, index files)
//!     │      ├─ Dependency type → entity (name match, deterministic order)
//!     │      ├─ Call target → method (this / dependency / external)
//!     │      └─ Diagnostics for everything unresolved
//!     │
//!     └──> Assembler (pure)
//!            ├─ Nodes: files, entities, methods, external modules
//!            └─ Edges: everything the resolver decided
//! ```
//!
//! The resolver never fabricates a best-guess edge: an unresolvable
//! reference is dropped and diagnosed. The assembler holds no policy;
//! a structural inconsistency there (duplicate id, dangling endpoint)
//! is fatal.

mod assembler;
mod error;
mod queries;
mod resolver;
mod types;

pub use assembler::{assemble, Summaries};
pub use error::{GraphError, Result};
pub use resolver::{resolve, Diagnostic, DiagnosticKind, ResolvedEdge, Resolution};
pub use types::{CodeGraph, EdgeKind, GraphEdge, GraphNode, NodeType};
