// Allow clippy warnings for CLI application
#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(clippy::needless_pass_by_value, clippy::redundant_clone)]

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{benchmark, demo, export, generate, import, inspect, serve};

/// orgweave CLI - synthesise, inspect, and serve enterprise digital-twin
/// graphs.
///
/// **Synthesis**: demo, generate, benchmark
///
/// **Files**: inspect, import, export
///
/// **Serving**: serve (ATP stdio pipe or REST)
#[derive(Parser)]
#[command(name = "orgweave")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Enterprise digital-twin graph toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a small demo organisation and print its highlights
    Demo(demo::DemoArgs),

    /// Run the full synthetic pipeline for an organisation profile
    Generate(generate::GenerateArgs),

    /// Load a graph file and print its statistics
    Inspect(inspect::InspectArgs),

    /// Validate and ingest a canonical file or shard directory
    Import(import::ImportArgs),

    /// Re-serialise a graph as canonical JSON, shards, or GraphML
    Export(export::ExportArgs),

    /// Serve the graph over the ATP stdio pipe or REST
    Serve(serve::ServeArgs),

    /// Drive the pipeline at multiple scales and print timings
    Benchmark(benchmark::BenchmarkArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("orgweave=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Demo(args) => demo::run(args),
        Commands::Generate(args) => generate::run(args),
        Commands::Inspect(args) => inspect::run(args),
        Commands::Import(args) => import::run(args),
        Commands::Export(args) => export::run(args),
        Commands::Serve(args) => serve::run(args).await,
        Commands::Benchmark(args) => benchmark::run(args),
    }
}
