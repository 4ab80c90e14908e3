/*!
# Chinese Whispers Sense Induction

Per-token clustering of the nearest-neighbor graph. For a base token, an ego
network is built from a bounded slice of its neighborhood, Chinese Whispers
label propagation runs over that private graph, and the surviving label
classes become the token's senses.

The algorithm is randomized and order-dependent; two runs over the same
graph legitimately produce different partitions. Tests must target
invariants, not exact outputs.
*/

use rand::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use std::collections::HashMap;

use crate::core::graph::TokenGraph;

/// Label sums start from this floor, so an edge weight below it can never
/// win a propagation round. Cosine weights lie in [-1, 1] and are unaffected.
const SUM_FLOOR: f32 = -10000.0;

/// Tuning parameters for per-token sense induction.
#[derive(Debug, Clone)]
pub struct InductionParams {
    /// Neighbors of the base token admitted into the ego network.
    pub max_edges: usize,
    /// Second-hop edges examined per admitted neighbor.
    pub max_connectivity: usize,
    /// Propagation sweeps before the algorithm is cut off.
    pub max_iterations: usize,
    /// Smallest member count a cluster needs to be emitted.
    pub min_cluster: usize,
}

impl Default for InductionParams {
    fn default() -> Self {
        Self {
            max_edges: 200,
            max_connectivity: 200,
            max_iterations: 100,
            min_cluster: 5,
        }
    }
}

/// One induced sense: the base token, a per-token sense id, and the member
/// tokens with their edge weights to the base token.
#[derive(Debug, Clone, PartialEq)]
pub struct SenseCluster {
    pub base_node: i32,
    pub sense_id: i32,
    pub members: Vec<(i32, f32)>,
}

/// Private helper: Create a seeded RNG from an optional seed.
fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::seed_from_u64(rand::random::<u64>()),
    }
}

/// Induces the senses of `base` from `graph`.
///
/// Every call draws its own RNG from `seed`; pass `None` for a fresh random
/// partition per call.
pub fn induce_token_senses(
    graph: &TokenGraph,
    base: i32,
    params: &InductionParams,
    seed: Option<u64>,
) -> Vec<SenseCluster> {
    let mut rng = create_rng(seed);
    induce_token_senses_with(graph, base, params, &mut rng)
}

/// [`induce_token_senses`] with a caller-owned RNG, for callers that reuse
/// one generator across many base tokens.
pub fn induce_token_senses_with(
    graph: &TokenGraph,
    base: i32,
    params: &InductionParams,
    rng: &mut StdRng,
) -> Vec<SenseCluster> {
    let (mut ego, members) = ego_network(graph, base, params.max_edges, params.max_connectivity);
    propagate(&mut ego, params.max_iterations, rng);
    extract_senses(&ego, graph, base, &members, params.min_cluster)
}

/// Builds the ego network of `base`: its first `max_edges` neighbors as
/// nodes, connected by the edges among them found within the first
/// `max_connectivity` entries of each neighbor's adjacency list.
///
/// Ego nodes use local ids `0..members.len()`; the returned vector maps a
/// local id back to the neighbor's global id.
fn ego_network(
    graph: &TokenGraph,
    base: i32,
    max_edges: usize,
    max_connectivity: usize,
) -> (TokenGraph, Vec<i32>) {
    let neighborhood = graph.neighbors(base);
    let members: Vec<i32> = neighborhood[..neighborhood.len().min(max_edges)].to_vec();
    let local: HashMap<i32, i32> = members
        .iter()
        .enumerate()
        .map(|(i, &global)| (global, i as i32))
        .collect();

    let mut ego = TokenGraph::with_capacity(members.len(), 0);
    // Isolated neighbors still take part in propagation, so add every node
    // up front.
    for i in 0..members.len() {
        ego.add_node(i as i32);
    }
    for (u, &global_u) in members.iter().enumerate() {
        for (global_w, weight) in graph.edges(global_u).take(max_connectivity) {
            if global_w == base {
                continue;
            }
            if let Some(&w) = local.get(&global_w) {
                ego.add_edge(u as i32, w, weight);
            }
        }
    }
    (ego, members)
}

/// Runs Chinese Whispers label propagation over `ego`.
///
/// Nodes start in singleton classes labeled `1, 2, 3, …` in node order
/// (label `0` stays reserved for "unassigned"). Each sweep visits the nodes
/// in a fresh random permutation and moves every node to the label with the
/// highest incident weight sum. Sweeps stop early when none of them changes
/// a label, and are capped at `max_iterations`.
///
/// When two labels tie on their weight sum, the one reached first in the
/// tally's iteration order wins; labels are arbitrary identifiers, so the
/// partition's meaning does not depend on the choice.
fn propagate(ego: &mut TokenGraph, max_iterations: usize, rng: &mut StdRng) {
    let mut order: Vec<i32> = ego.nodes().to_vec();
    for (i, &node) in order.iter().enumerate() {
        ego.set_label(node, (i + 1) as i32);
    }

    for _ in 0..max_iterations {
        order.shuffle(rng);
        let mut changed = false;
        for &node in &order {
            let mut sums: HashMap<i32, f32> = HashMap::new();
            for (neighbor, weight) in ego.edges(node) {
                *sums.entry(ego.label(neighbor)).or_insert(0.0) += weight;
            }
            let mut best = None;
            let mut max = SUM_FLOOR;
            for (&label, &sum) in &sums {
                if sum > max {
                    max = sum;
                    best = Some(label);
                }
            }
            if let Some(winner) = best {
                if winner != ego.label(node) {
                    ego.set_label(node, winner);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
}

/// Partitions the propagated ego network into sense clusters.
///
/// Remaining nodes are grouped by the label of the first one still standing;
/// groups below `min_cluster` are dropped without consuming a sense id, so
/// emitted ids are dense and start at 1. Member weights come from the base
/// graph's edge to the base token, not from the ego network.
fn extract_senses(
    ego: &TokenGraph,
    graph: &TokenGraph,
    base: i32,
    members: &[i32],
    min_cluster: usize,
) -> Vec<SenseCluster> {
    let mut remaining: Vec<i32> = ego.nodes().to_vec();
    let mut clusters = Vec::new();
    let mut sense_id = 0;
    while let Some(&first) = remaining.first() {
        let current = ego.label(first);
        let (cluster, rest): (Vec<i32>, Vec<i32>) = remaining
            .iter()
            .copied()
            .partition(|&node| ego.label(node) == current);
        remaining = rest;
        if cluster.len() >= min_cluster {
            sense_id += 1;
            let weighted: Vec<(i32, f32)> = cluster
                .iter()
                .map(|&local| {
                    let global = members[local as usize];
                    (global, graph.edge_weight(base, global))
                })
                .collect();
            clusters.push(SenseCluster {
                base_node: base,
                sense_id,
                members: weighted,
            });
        }
    }
    clusters
}
