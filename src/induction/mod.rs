/*!
# Sense Induction Extension

Per-token sense induction over a loaded nearest-neighbor token graph: ego
network construction, Chinese Whispers label propagation, and the worker-pool
pipeline that streams the resulting sense clusters to a binary output file.
*/

pub mod chinese_whispers;
pub mod pipeline;

// Re-export main functions for convenience
pub use chinese_whispers::{InductionParams, SenseCluster, induce_token_senses};
pub use pipeline::{InductionSummary, induce_all};
