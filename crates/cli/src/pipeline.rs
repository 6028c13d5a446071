//! Staged pipeline: discover, extract, enrich, resolve, render.
//!
//! Extraction failures are per-file and never fatal; summarization is
//! best-effort; resolution and rendering failures abort the run.

use crate::config::Config;
use crate::scan::{self, AstFile};
use anyhow::{bail, Context, Result};
use astmap_extractor::{extract, ExtractOptions, FileRecord};
use astmap_graph::{assemble, resolve, Summaries};
use astmap_renderer::{render_html, RenderOptions};
use astmap_summarizer::{enrich, HttpSummarizer};
use astmap_syntax::read_document;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;

const MAX_CONCURRENT: usize = 16;

pub async fn run(config: &Config) -> Result<()> {
    let files = scan::discover(&config.ast_input_directory);
    if files.is_empty() {
        bail!(
            "no *.json exports found under {}",
            config.ast_input_directory.display()
        );
    }
    log::info!("discovered {} syntax-tree exports", files.len());

    let options = ExtractOptions {
        source_root_prefix: config.source_code_root_prefix.clone(),
    };
    let records = extract_all(files, &options).await;
    if records.is_empty() {
        bail!("every export failed to parse; nothing to resolve");
    }

    let summaries = summarize(config, &records).await;

    let resolution = resolve(&records);
    if !resolution.diagnostics.is_empty() {
        log::info!(
            "{} references stayed unresolved (run with RUST_LOG=debug for details)",
            resolution.diagnostics.len()
        );
    }
    let graph = assemble(&records, &resolution, summaries.as_ref())
        .context("graph assembly failed")?;

    let html = render_html(
        &graph,
        &RenderOptions {
            heading: config.graph.heading.clone(),
            vis_options: config.graph.vis_options.clone(),
            ..RenderOptions::default()
        },
    )
    .context("rendering failed")?;

    std::fs::create_dir_all(&config.output_directory).with_context(|| {
        format!(
            "failed to create output directory {}",
            config.output_directory.display()
        )
    })?;
    let output_path = config.output_directory.join(&config.graph.output_filename);
    std::fs::write(&output_path, html)
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    let (nodes, edges) = graph.stats();
    log::info!(
        "wrote {} ({nodes} nodes, {edges} edges)",
        output_path.display()
    );
    Ok(())
}

/// Extraction stage: bounded batches of tokio tasks, one per export.
/// A file that fails to read or parse is logged and skipped.
async fn extract_all(
    files: Vec<AstFile>,
    options: &ExtractOptions,
) -> BTreeMap<String, FileRecord> {
    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{msg} [{bar:30}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    progress.set_message("extracting");

    let mut records = BTreeMap::new();
    for batch in files.chunks(MAX_CONCURRENT) {
        let mut tasks = Vec::with_capacity(batch.len());
        for file in batch {
            let file = file.clone();
            let options = options.clone();
            tasks.push(tokio::spawn(
                async move { extract_one(file, &options).await },
            ));
        }

        for task in tasks {
            match task.await {
                Ok(Ok(record)) => {
                    records.insert(record.file_id.clone(), record);
                }
                Ok(Err((file_id, err))) => {
                    log::warn!("skipping {file_id}: {err}");
                }
                Err(err) => {
                    log::warn!("extraction task failed: {err}");
                }
            }
            progress.inc(1);
        }
    }
    progress.finish_with_message("extraction done");

    log::info!("extracted {} files", records.len());
    records
}

async fn extract_one(
    file: AstFile,
    options: &ExtractOptions,
) -> std::result::Result<FileRecord, (String, anyhow::Error)> {
    let json = tokio::fs::read_to_string(&file.path)
        .await
        .map_err(|e| (file.file_id.clone(), e.into()))?;
    let root = read_document(&json).map_err(|e| (file.file_id.clone(), e.into()))?;
    Ok(extract(&file.file_id, &root, options))
}

/// Summarization stage. Disabled or failing enrichment degrades to a
/// graph without descriptions.
async fn summarize(
    config: &Config,
    records: &BTreeMap<String, FileRecord>,
) -> Option<Summaries> {
    if !config.summarizer.enabled {
        log::info!("summarization disabled in config");
        return None;
    }
    match HttpSummarizer::new(&config.summarizer) {
        Ok(summarizer) => Some(enrich(records, &summarizer).await),
        Err(err) => {
            log::error!("summarizer unavailable, continuing without it: {err}");
            None
        }
    }
}
