//! TOML configuration for the pipeline.

use anyhow::{Context, Result};
use astmap_summarizer::SummarizerConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the per-file `*.json` syntax-tree exports.
    pub ast_input_directory: PathBuf,
    pub output_directory: PathBuf,
    /// Prefix of in-repo import paths, used to tell internal imports
    /// from external packages.
    pub source_code_root_prefix: String,
    pub summarizer: SummarizerConfig,
    pub graph: GraphConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ast_input_directory: PathBuf::from("ast_output"),
            output_directory: PathBuf::from("graph_output"),
            source_code_root_prefix: "src/".to_string(),
            summarizer: SummarizerConfig::default(),
            graph: GraphConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub output_filename: String,
    /// Output format; only `html` is currently implemented.
    pub renderer: String,
    pub heading: String,
    /// Raw vis-network options JSON, passed through to the page.
    pub vis_options: Option<String>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            output_filename: "code_graph.html".to_string(),
            renderer: "html".to_string(),
            heading: "Codebase Graph".to_string(),
            vis_options: None,
        }
    }
}

impl Config {
    /// Load from a TOML file; a missing file yields the defaults so a
    /// bare `astmap` run works out of the box.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let config = Config::load(Path::new("/nonexistent/astmap.toml")).unwrap();
        assert_eq!(config.source_code_root_prefix, "src/");
        assert_eq!(config.graph.output_filename, "code_graph.html");
        assert!(!config.summarizer.enabled);
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
ast_input_directory = "exports"
source_code_root_prefix = "lib/"

[summarizer]
enabled = true
endpoint = "http://localhost:9000/summarize"

[graph]
output_filename = "map.html"
vis_options = '{{"physics": {{"enabled": false}}}}'
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.ast_input_directory, PathBuf::from("exports"));
        assert_eq!(config.source_code_root_prefix, "lib/");
        assert_eq!(config.output_directory, PathBuf::from("graph_output"));
        assert!(config.summarizer.enabled);
        assert_eq!(config.summarizer.max_retries, 3);
        assert_eq!(config.graph.output_filename, "map.html");
        assert!(config.graph.vis_options.is_some());
    }
}
