//! `inspect` - load a graph file and print its statistics.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use orgweave::{export, Config};

use crate::output::{print_statistics, print_warning};

#[derive(Args)]
pub struct InspectArgs {
    /// Graph file to inspect (defaults to GRAPH_DEFAULT_PATH)
    #[arg(long, short)]
    pub graph: Option<PathBuf>,

    /// Reject unknown entity fields
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: InspectArgs) -> Result<()> {
    let config = Config::from_env();
    let Some(path) = args.graph.or(config.default_path) else {
        // A pure read with nothing to read prints an empty result and
        // exits zero.
        print_warning("no graph loaded (set GRAPH_DEFAULT_PATH or pass --graph)");
        return Ok(());
    };
    let strict = args.strict || config.strict;
    let engine = export::load_graph_file(&path, strict)
        .with_context(|| format!("loading {}", path.display()))?;
    println!("{}", path.display());
    print_statistics(&engine.statistics());
    Ok(())
}
