//! Prim's algorithm over a connected NetworkGraph
//!
//! Algorithm: O(E log E) with a binary-heap frontier
//! 1. Start from node 0 (first inserted label)
//! 2. Push every edge leaving the tree onto the frontier
//! 3. Pop the cheapest edge whose far endpoint is outside the tree; add it
//! 4. Stop after |V| - 1 edges
//!
//! Tie-break among equal weights: far endpoint inserted earlier, then edge
//! inserted earlier. Ties only change which edges are picked, never the cost.

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::network::NetworkGraph;
use crate::errors::{EngineError, Result};

/// Candidate edge crossing the cut
#[derive(Debug, Clone, Copy)]
struct Frontier {
    weight: f64,
    far: NodeIndex,
    position: usize,
}

impl Frontier {
    fn rank(&self) -> (usize, usize) {
        (self.far.index(), self.position)
    }
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.rank().cmp(&other.rank()))
    }
}

/// Positions (into the snapshot edge list) of the selected tree edges, in
/// selection order
pub(crate) fn prim(network: &NetworkGraph) -> Result<Vec<usize>> {
    let n = network.node_count();
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut in_tree = vec![false; n];
    let mut heap: BinaryHeap<Reverse<Frontier>> = BinaryHeap::new();
    let mut selected = Vec::with_capacity(n - 1);

    push_frontier(network, NodeIndex::new(0), &mut in_tree, &mut heap);

    while selected.len() < n - 1 {
        let Some(Reverse(candidate)) = heap.pop() else {
            return Err(EngineError::internal(format!(
                "frontier exhausted after {} of {} tree edges",
                selected.len(),
                n - 1
            )));
        };

        // Stale entry: far endpoint joined the tree through a cheaper edge
        if in_tree[candidate.far.index()] {
            continue;
        }

        selected.push(candidate.position);
        push_frontier(network, candidate.far, &mut in_tree, &mut heap);
    }

    Ok(selected)
}

/// Mark `node` as in the tree and push its edges to outside nodes
fn push_frontier(
    network: &NetworkGraph,
    node: NodeIndex,
    in_tree: &mut [bool],
    heap: &mut BinaryHeap<Reverse<Frontier>>,
) {
    in_tree[node.index()] = true;
    for edge in network.graph.edges(node) {
        let far = if edge.source() == node {
            edge.target()
        } else {
            edge.source()
        };
        if !in_tree[far.index()] {
            heap.push(Reverse(Frontier {
                weight: edge.weight().weight,
                far,
                position: edge.weight().position,
            }));
        }
    }
}
