//! `import` - validate a canonical file or shard directory and write a
//! fresh canonical graph.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use orgweave::{export, Config};

use crate::output::print_success;

#[derive(Args)]
pub struct ImportArgs {
    /// Canonical JSON file, or a shard root when --shards is set
    #[arg(long, short)]
    pub input: PathBuf,

    /// Treat the input as a per-type shard directory
    #[arg(long)]
    pub shards: bool,

    /// Reject unknown entity fields
    #[arg(long)]
    pub strict: bool,

    /// Output path for the validated canonical graph
    #[arg(long, short, default_value = "graph.json")]
    pub output: PathBuf,
}

pub fn run(args: ImportArgs) -> Result<()> {
    let strict = args.strict || Config::from_env().strict;
    let engine = if args.shards {
        export::build_from_shards(&args.input, strict)
            .with_context(|| format!("merging shards under {}", args.input.display()))?
    } else {
        export::load_graph_file(&args.input, strict)
            .with_context(|| format!("loading {}", args.input.display()))?
    };
    let stats = engine.statistics();
    export::write_graph_file(engine.as_ref(), &args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    print_success(&format!(
        "imported {} entities and {} relationships into {}",
        stats.entity_count,
        stats.relationship_count,
        args.output.display()
    ));
    Ok(())
}
