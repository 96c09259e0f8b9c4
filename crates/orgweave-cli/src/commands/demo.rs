//! `demo` - generate a small organisation and print its highlights.

use anyhow::{Context, Result};
use clap::Args;
use orgweave::scaling::{Industry, OrgProfile};
use orgweave::Orchestrator;

use crate::output::{create_table, print_statistics, print_success};

#[derive(Args)]
pub struct DemoArgs {
    /// Employee count for the demo organisation
    #[arg(long, default_value_t = 250)]
    pub employees: u32,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

pub fn run(args: DemoArgs) -> Result<()> {
    let profile = OrgProfile::new("Meridian Demo Corp", Industry::Technology, args.employees)
        .with_seed(args.seed);
    let outcome = Orchestrator::new()
        .generate(profile)
        .context("demo generation failed")?;

    let stats = outcome.engine.statistics();
    print_success(&format!(
        "demo organisation ready (quality {:.3})",
        outcome.quality.overall
    ));
    print_statistics(&stats);

    let mut table = create_table();
    table.set_header(vec!["Most connected", "Degree"]);
    for (id, degree) in outcome.engine.most_connected(5) {
        let name = outcome
            .engine
            .get_entity(&id)
            .map(|e| e.name.clone())
            .unwrap_or(id);
        table.add_row(vec![name, degree.to_string()]);
    }
    println!("{table}");
    Ok(())
}
