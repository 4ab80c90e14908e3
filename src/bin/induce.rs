//! Induces word senses from a nearest-neighbor token graph.

use clap::Parser;
use std::path::PathBuf;
use tracing::{Level, error, info};

use sensegraph::core::error::Result;
use sensegraph::core::io::load_token_graph;
use sensegraph::induction::{InductionParams, induce_all};

/// Cluster every token's ego network with Chinese Whispers and stream the
/// sense clusters to a binary output file.
#[derive(Parser, Debug)]
#[command(name = "induce", version)]
struct Args {
    /// Input binary edge file
    #[arg(long)]
    graph: PathBuf,

    /// Output cluster file
    #[arg(long)]
    output: PathBuf,

    /// Neighbors of each base token admitted into its ego network
    #[arg(long, default_value_t = 200)]
    max_edges: usize,

    /// Second-hop edges examined per admitted neighbor
    #[arg(long, default_value_t = 200)]
    max_connectivity: usize,

    /// Propagation sweeps before a token's clustering is cut off
    #[arg(long, default_value_t = 100)]
    max_iterations: usize,

    /// Smallest member count a cluster needs to be emitted
    #[arg(long, default_value_t = 5)]
    min_cluster: usize,

    /// Worker threads running the clustering
    #[arg(long, default_value_t = 4)]
    num_workers: usize,
}

fn run(args: &Args) -> Result<()> {
    let graph = load_token_graph(&args.graph)?;
    info!(nodes = graph.len(), "token graph loaded");
    let params = InductionParams {
        max_edges: args.max_edges,
        max_connectivity: args.max_connectivity,
        max_iterations: args.max_iterations,
        min_cluster: args.min_cluster,
    };
    let summary = induce_all(&graph, &params, args.num_workers, &args.output)?;
    info!(
        tokens = summary.tokens,
        clusters = summary.clusters,
        output = %args.output.display(),
        "sense induction finished"
    );
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .try_init()
        .ok();
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // Renders clap's usage or help text.
            err.print().ok();
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };
    if let Err(err) = run(&args) {
        error!(%err, "sense induction failed");
        std::process::exit(1);
    }
}
