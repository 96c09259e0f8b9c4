//! `benchmark` - drive the pipeline at multiple scales and print a
//! Markdown timing table.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use orgweave::scaling::{Industry, OrgProfile};
use orgweave::Orchestrator;

use crate::output::format_duration;

#[derive(Args)]
pub struct BenchmarkArgs {
    /// Employee counts to drive, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = [100_u32, 1000, 5000])]
    pub sizes: Vec<u32>,

    /// RNG seed shared by every run
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

pub fn run(args: BenchmarkArgs) -> Result<()> {
    println!("| Employees | Entities | Relationships | Quality | Wall time |");
    println!("|-----------|----------|---------------|---------|-----------|");
    for employees in args.sizes {
        let profile = OrgProfile::new("Benchmark Corp", Industry::Technology, employees)
            .with_seed(args.seed);
        let start = Instant::now();
        let outcome = Orchestrator::new()
            .generate(profile)
            .with_context(|| format!("benchmark run at {employees} employees"))?;
        let elapsed = start.elapsed();
        let stats = outcome.engine.statistics();
        println!(
            "| {} | {} | {} | {:.3} | {} |",
            employees,
            stats.entity_count,
            stats.relationship_count,
            outcome.quality.overall,
            format_duration(elapsed)
        );
    }
    Ok(())
}
