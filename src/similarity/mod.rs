/*!
# Nearest-Neighbor Similarity Extension

This extension computes, for every token vector in a dense embedding matrix,
its top-n nearest neighbors under cosine similarity. The computation is
blocked into batches of rows, each batch multiplied against the whole matrix
with a dense GEMM, and the batches run in parallel under Rayon.
*/

pub mod knn;
pub mod topk;

// Re-export main functions for convenience
pub use knn::{nearest_neighbor_edges, normalize_rows, read_vector_file, write_vector_file};
pub use topk::partition_smallest;
