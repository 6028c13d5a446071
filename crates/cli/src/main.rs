//! `astmap`: turn per-file syntax-tree exports into a cross-referenced
//! code graph and render it as an interactive HTML page.

mod config;
mod pipeline;
mod scan;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "astmap", version, about = "Build a code graph from syntax-tree exports")]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "astmap.toml")]
    config: PathBuf,

    /// Override the input directory of `*.json` exports.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Override the output directory.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = config::Config::load(&cli.config)?;
    if let Some(input) = cli.input {
        config.ast_input_directory = input;
    }
    if let Some(output) = cli.output {
        config.output_directory = output;
    }

    pipeline::run(&config).await
}
