//! Optional natural-language enrichment for the code graph.
//!
//! ```text
//! records ──► enrich ──► prompts ──► Summarize (HTTP) ──► Summaries
//! ```
//!
//! The pipeline treats this crate as a best-effort collaborator: any
//! failure degrades to a fixed sentinel value and the graph is built
//! without descriptions.

mod client;
mod config;
mod enrich;
mod error;

pub use client::{HttpSummarizer, Summarize, SummaryOutcome};
pub use config::SummarizerConfig;
pub use enrich::{enrich, SUMMARY_UNAVAILABLE};
pub use error::{Result, SummarizerError};
