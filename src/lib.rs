/*!
# Sensegraph

Word-sense induction from learned token embeddings.

The pipeline has two stages. The first builds a symmetric weighted graph
whose edges are the top-n nearest neighbors of every token under cosine
similarity, computed with blocked dense matrix products and written to a
compact binary edge file. The second loads that graph and, for every token,
clusters its ego network with the randomized Chinese Whispers algorithm,
streaming the resulting sense clusters to a binary output file from a pool
of worker threads.

The `nn_graph` and `induce` binaries drive the two stages from the command
line; the library exposes every building block for embedding into larger
systems.
*/

pub mod core;
pub mod induction;
#[cfg(feature = "logging")]
mod settings;
pub mod similarity;
