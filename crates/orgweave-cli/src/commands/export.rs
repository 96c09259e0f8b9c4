//! `export` - re-serialise a graph as canonical JSON, per-type shards,
//! or GraphML.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use orgweave::{export, Config};

use crate::output::print_success;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ExportFormat {
    /// Canonical `{entities, relationships, statistics}` JSON
    #[default]
    Canonical,
    /// One JSON array per observed type under entities/ and relationships/
    Shards,
    /// Write-only GraphML for visualisers
    Graphml,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Graph file to re-serialise (defaults to GRAPH_DEFAULT_PATH)
    #[arg(long, short)]
    pub graph: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ExportFormat::Canonical)]
    pub format: ExportFormat,

    /// Output file (canonical, graphml) or directory (shards)
    #[arg(long, short)]
    pub output: PathBuf,
}

pub fn run(args: ExportArgs) -> Result<()> {
    let config = Config::from_env();
    let path = args
        .graph
        .or(config.default_path)
        .context("no graph to export (set GRAPH_DEFAULT_PATH or pass --graph)")?;
    let engine = export::load_graph_file(&path, config.strict)
        .with_context(|| format!("loading {}", path.display()))?;

    match args.format {
        ExportFormat::Canonical => {
            export::write_graph_file(engine.as_ref(), &args.output)
                .with_context(|| format!("writing {}", args.output.display()))?;
        }
        ExportFormat::Shards => {
            export::split_shards(engine.as_ref(), &args.output)
                .with_context(|| format!("splitting into {}", args.output.display()))?;
        }
        ExportFormat::Graphml => {
            let xml = export::export_graphml(engine.as_ref())?;
            std::fs::write(&args.output, xml)
                .with_context(|| format!("writing {}", args.output.display()))?;
        }
    }
    print_success(&format!(
        "exported {} as {:?} to {}",
        path.display(),
        args.format,
        args.output.display()
    ));
    Ok(())
}
