//! Builds the nearest-neighbor token graph from an embedding matrix.

use clap::Parser;
use std::path::PathBuf;
use tracing::{Level, error, info};

use sensegraph::core::error::Result;
use sensegraph::core::io::write_edge_file;
use sensegraph::similarity::{nearest_neighbor_edges, normalize_rows, read_vector_file};

/// Compute the top-n cosine-similarity edges of every token vector and
/// write them to a binary edge file.
#[derive(Parser, Debug)]
#[command(name = "nn_graph", version)]
struct Args {
    /// Token-vector matrix: [rows: i32][cols: i32] header followed by
    /// row-major f32 values, all little-endian
    vectors: PathBuf,

    /// Output edge file
    output: PathBuf,

    /// Nearest neighbors kept per token
    #[arg(long, default_value_t = 200)]
    neighbors: usize,

    /// Tokens per similarity batch
    #[arg(long, default_value_t = 500)]
    batch_size: usize,

    /// L2-normalize the rows before computing similarities
    #[arg(long)]
    normalize: bool,
}

fn run(args: &Args) -> Result<()> {
    let mut vectors = read_vector_file(&args.vectors)?;
    info!(
        tokens = vectors.nrows(),
        dims = vectors.ncols(),
        "vector matrix loaded"
    );
    if args.normalize {
        normalize_rows(&mut vectors);
    }
    let edges = nearest_neighbor_edges(&vectors, args.neighbors, args.batch_size)?;
    write_edge_file(&args.output, &edges)?;
    info!(edges = edges.len(), output = %args.output.display(), "edge file written");
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
        error!(%err, "nearest-neighbor graph construction failed");
        std::process::exit(1);
    }
}
