//! # astmap Extractor
//!
//! Walks one file's decoded syntax tree into a structured [`FileRecord`].
//!
//! ## Pipeline position
//!
//! ```text
//! SyntaxNode (per file)
//!     │
//!     ├──> Statement dispatch (closed kind set)
//!     │      ├─ Imports / exports
//!     │      ├─ Class / interface / function entities
//!     │      └─ Top-level variables
//!     │
//!     ├──> Class member scan
//!     │      ├─ Methods (params, return types, decorators)
//!     │      └─ Constructor parameter-properties → dependencies
//!     │
//!     └──> Call-site scan (full tree walk, parent-context threaded)
//! ```
//!
//! Extraction is total and shares no state across files: each
//! invocation reads one tree and produces one record, so files may be
//! processed on any worker pool with no synchronization. A malformed
//! or empty top-level body degrades to an empty-but-valid record.

mod calls;
mod extract;
mod record;
mod types;

pub use calls::{format_arguments, scan_calls};
pub use extract::{extract, ExtractOptions};
pub use record::{
    Call, Decorator, Dependency, Entity, EntityKind, ExportRecord, FileRecord, ImportRecord,
    Method, MethodKind, Parameter,
};
pub use types::annotation_str;
