/*!
# Token Graph

This module defines the undirected weighted graph the induction pipeline
runs on. Nodes are dense non-negative integer ids (the same ids index the
token-vector matrix), and each node carries flat primitive adjacency
storage: a neighbor id list, a parallel weight list, and a membership set
for O(1) edge lookups. Every node also carries an integer label used by the
label-propagation engine; label `0` means "not yet assigned".

Capacity grows geometrically when a node id exceeds the current backing
storage, so ids can be added in any order.
*/

use rayon::prelude::*;
use std::collections::HashSet;

/// Undirected weighted graph over dense non-negative integer node ids.
#[derive(Debug, Clone, Default)]
pub struct TokenGraph {
    present: Vec<bool>,
    /// Node ids in insertion order.
    order: Vec<i32>,
    adjacency: Vec<Vec<i32>>,
    weights: Vec<Vec<f32>>,
    edge_sets: Vec<HashSet<i32>>,
    labels: Vec<i32>,
    edge_reserve: usize,
    id_bound: i32,
}

impl TokenGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with backing storage for `nodes` ids and
    /// `edge_reserve` slots pre-reserved in every new adjacency list.
    pub fn with_capacity(nodes: usize, edge_reserve: usize) -> Self {
        let mut graph = Self {
            edge_reserve,
            ..Self::default()
        };
        graph.grow_to(nodes);
        graph
    }

    fn grow_to(&mut self, capacity: usize) {
        if capacity <= self.present.len() {
            return;
        }
        self.present.resize(capacity, false);
        self.adjacency.resize_with(capacity, Vec::new);
        self.weights.resize_with(capacity, Vec::new);
        self.edge_sets.resize_with(capacity, HashSet::new);
        self.labels.resize(capacity, 0);
    }

    fn ensure_id(&mut self, node: i32) {
        assert!(node >= 0, "node ids are non-negative");
        let id = node as usize;
        if id >= self.present.len() {
            let mut capacity = self.present.len().max(1);
            while capacity <= id {
                capacity *= 2;
            }
            self.grow_to(capacity);
        }
    }

    /// Marks `node` as present, initializing empty adjacency storage.
    /// Adding a node twice is a no-op.
    pub fn add_node(&mut self, node: i32) {
        self.ensure_id(node);
        let id = node as usize;
        if !self.present[id] {
            self.present[id] = true;
            self.order.push(node);
            if self.edge_reserve > 0 {
                self.adjacency[id].reserve(self.edge_reserve);
                self.weights[id].reserve(self.edge_reserve);
            }
            self.id_bound = self.id_bound.max(node + 1);
        }
    }

    /// Inserts the undirected edge `(u, v)` with weight `weight`.
    ///
    /// Self-loops are ignored. Both endpoints are created if absent and the
    /// edge is appended to both adjacency lists. Re-inserting an existing
    /// edge is a no-op; the first weight wins and is never updated.
    pub fn add_edge(&mut self, u: i32, v: i32, weight: f32) {
        if u == v {
            return;
        }
        self.add_node(u);
        self.add_node(v);
        let (ui, vi) = (u as usize, v as usize);
        if self.edge_sets[ui].contains(&v) {
            return;
        }
        self.adjacency[ui].push(v);
        self.weights[ui].push(weight);
        self.edge_sets[ui].insert(v);
        self.adjacency[vi].push(u);
        self.weights[vi].push(weight);
        self.edge_sets[vi].insert(u);
    }

    /// Returns true if `node` is present.
    pub fn contains(&self, node: i32) -> bool {
        node >= 0 && (node as usize) < self.present.len() && self.present[node as usize]
    }

    /// Returns true if the edge `(u, v)` exists.
    pub fn contains_edge(&self, u: i32, v: i32) -> bool {
        self.contains(u) && self.edge_sets[u as usize].contains(&v)
    }

    /// Neighbor ids of `node`, in adjacency order. Empty for absent nodes.
    pub fn neighbors(&self, node: i32) -> &[i32] {
        if self.contains(node) {
            &self.adjacency[node as usize]
        } else {
            &[]
        }
    }

    /// Edge weights of `node`, parallel to [`TokenGraph::neighbors`].
    pub fn weights(&self, node: i32) -> &[f32] {
        if self.contains(node) {
            &self.weights[node as usize]
        } else {
            &[]
        }
    }

    /// `(neighbor, weight)` pairs of `node`, in adjacency order.
    pub fn edges(&self, node: i32) -> impl Iterator<Item = (i32, f32)> + '_ {
        self.neighbors(node)
            .iter()
            .copied()
            .zip(self.weights(node).iter().copied())
    }

    /// Weight of the edge `(u, v)` by linear scan; `0.0` if absent.
    pub fn edge_weight(&self, u: i32, v: i32) -> f32 {
        let adjacency = self.neighbors(u);
        let weights = self.weights(u);
        for (i, &neighbor) in adjacency.iter().enumerate() {
            if neighbor == v {
                return weights[i];
            }
        }
        0.0
    }

    /// Number of present nodes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// One past the largest present node id; `0` for an empty graph.
    pub fn node_id_bound(&self) -> i32 {
        self.id_bound
    }

    /// Present node ids in insertion order.
    pub fn nodes(&self) -> &[i32] {
        &self.order
    }

    /// Reorders every adjacency list and its weight list in tandem by
    /// ascending weight.
    pub fn sort_edges(&mut self) {
        self.adjacency
            .par_iter_mut()
            .zip(self.weights.par_iter_mut())
            .for_each(|(adjacency, weights)| {
                if adjacency.len() < 2 {
                    return;
                }
                let mut pairs: Vec<(i32, f32)> = adjacency
                    .iter()
                    .copied()
                    .zip(weights.iter().copied())
                    .collect();
                pairs.sort_by(|a, b| a.1.total_cmp(&b.1));
                for (i, (neighbor, weight)) in pairs.into_iter().enumerate() {
                    adjacency[i] = neighbor;
                    weights[i] = weight;
                }
            });
    }

    /// Label of `node`; `0` when unassigned or absent.
    pub fn label(&self, node: i32) -> i32 {
        if self.contains(node) {
            self.labels[node as usize]
        } else {
            0
        }
    }

    /// Assigns `label` to a present `node`; no-op for absent nodes.
    pub fn set_label(&mut self, node: i32, label: i32) {
        if self.contains(node) {
            self.labels[node as usize] = label;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_is_symmetric() {
        let mut g = TokenGraph::new();
        g.add_edge(1, 2, 0.5);
        g.add_edge(2, 3, 0.8);

        assert_eq!(g.neighbors(1), &[2]);
        assert_eq!(g.neighbors(2), &[1, 3]);
        assert_eq!(g.neighbors(3), &[2]);
        assert_eq!(g.edge_weight(3, 2), 0.8);
        assert_eq!(g.edge_weight(2, 3), 0.8);
    }

    #[test]
    fn test_self_loops_are_ignored() {
        let mut g = TokenGraph::new();
        g.add_edge(4, 4, 1.0);
        assert!(g.is_empty());
        assert!(g.neighbors(4).is_empty());
    }

    #[test]
    fn test_duplicate_edge_keeps_first_weight() {
        let mut g = TokenGraph::new();
        g.add_edge(1, 2, 0.5);
        g.add_edge(1, 2, 0.9);
        g.add_edge(2, 1, 0.7);

        assert_eq!(g.neighbors(1).len(), 1);
        assert_eq!(g.edge_weight(1, 2), 0.5);
        assert_eq!(g.edge_weight(2, 1), 0.5);
    }

    #[test]
    fn test_sort_edges_orders_weights_ascending() {
        let mut g = TokenGraph::new();
        g.add_edge(0, 1, 0.9);
        g.add_edge(0, 2, 0.1);
        g.add_edge(0, 3, 0.5);
        g.sort_edges();

        assert_eq!(g.neighbors(0), &[2, 3, 1]);
        assert_eq!(g.weights(0), &[0.1, 0.5, 0.9]);
        // Membership survives the reorder.
        assert!(g.contains_edge(0, 1));
        assert_eq!(g.edge_weight(0, 1), 0.9);
    }

    #[test]
    fn test_capacity_grows_geometrically() {
        let mut g = TokenGraph::with_capacity(4, 0);
        g.add_edge(0, 1000, 1.0);
        assert_eq!(g.len(), 2);
        assert_eq!(g.node_id_bound(), 1001);
        assert_eq!(g.edge_weight(1000, 0), 1.0);
    }

    #[test]
    fn test_labels_default_to_zero() {
        let mut g = TokenGraph::new();
        g.add_node(7);
        assert_eq!(g.label(7), 0);
        g.set_label(7, 3);
        assert_eq!(g.label(7), 3);
        // Absent nodes stay unlabeled.
        g.set_label(8, 5);
        assert_eq!(g.label(8), 0);
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut g = TokenGraph::new();
        g.add_edge(5, 2, 1.0);
        g.add_edge(2, 9, 1.0);
        assert_eq!(g.nodes(), &[5, 2, 9]);
    }
}
