//! HTML rendering of the resolved code graph.
//!
//! Emits one self-contained vis-network page: nodes and edges are
//! serialized to JSON and embedded in a script tag, styled by a fixed
//! per-type palette. The renderer reads the graph and never mutates
//! it.

mod error;
mod html;
mod palette;

pub use error::{RenderError, Result};
pub use html::{render_html, RenderOptions};
pub use palette::{DEFAULT_EDGE_COLOR, DEFAULT_NODE_COLOR, EDGE_COLORS, NODE_COLORS};
