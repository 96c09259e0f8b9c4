//! `serve` - expose the graph over the ATP stdio pipe or REST.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use orgweave::{Config, GraphState};
use orgweave_server::{serve_stdio, RestConfig, RestServer};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum Transport {
    /// Line-delimited JSON tool calls on stdin/stdout
    #[default]
    Atp,
    /// HTTP adapter mapping every tool onto a route
    Rest,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Graph file to serve (defaults to GRAPH_DEFAULT_PATH; serving with
    /// no graph is allowed, tools reply no_graph_loaded until one is
    /// loaded)
    #[arg(long, short)]
    pub graph: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Transport::Atp)]
    pub transport: Transport,

    /// REST listen port
    #[arg(long, default_value_t = 7430)]
    pub port: u16,
}

pub async fn run(args: ServeArgs) -> Result<()> {
    orgweave::engine::register_default_backends();
    let config = Config::from_env();
    let state = GraphState::from_config(&config);
    if let Some(path) = &args.graph {
        let (entities, relationships) = state
            .load(path)
            .with_context(|| format!("loading {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            entities,
            relationships,
            "serving graph"
        );
    }
    let state = Arc::new(state);

    match args.transport {
        Transport::Atp => serve_stdio(state).await.context("ATP pipe failed"),
        Transport::Rest => {
            let server = RestServer::new(state, RestConfig::default().with_port(args.port));
            server.run().await.context("REST server failed")
        }
    }
}
