//! # astmap Syntax
//!
//! Decodes per-file syntax-tree exports into an in-memory tagged tree.
//!
//! One exported document describes one source file: a tree of nodes,
//! each a mapping with a `type` tag and arbitrary additional fields.
//! A field holds either a single child node, a list of child nodes, or
//! a scalar. The root carries a `body` list of top-level statements.
//!
//! The reader is language-agnostic: any two source languages producing
//! this shape are accepted uniformly. Interpretation of node kinds
//! lives in `astmap-extractor`.

mod error;
mod node;

pub use error::{Result, SyntaxError};
pub use node::{read_document, Field, SyntaxNode};
