//! Minimum Spanning Tree Module
//!
//! Validates connectivity and computes the MST of a topology snapshot.
//!
//! Key features:
//! - petgraph-backed connectivity check (component count + unreachable list)
//! - Prim's algorithm with a deterministic tie-break
//! - Cost aggregation and full-network vs. tree cost summary
//!
//! Contract:
//! - zero nodes → empty tree, cost 0 (not an error)
//! - disconnected → `EngineError::DisconnectedGraph`, never a partial forest
//! - connected → exactly |V| - 1 edges

mod connectivity;
mod network;
mod prim;
mod summary;

pub use connectivity::is_connected;
pub use summary::NetworkSummary;

use lanmst_storage::{Edge, GraphSnapshot};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::errors::Result;
use network::NetworkGraph;

/// Selected tree edges + aggregate cost
///
/// Derived on every request, never cached across mutations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MstResult {
    /// Tree edges in selection order, with their stored orientation
    pub edges: Vec<Edge>,
    /// Sum of the selected weights
    pub total_cost: f64,
}

impl MstResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// True if the tree contains the edge `a -- b` (either orientation)
    pub fn contains(&self, a: &str, b: &str) -> bool {
        self.edges.iter().any(|e| e.connects(a, b))
    }
}

/// Read-only spanning-tree engine
///
/// Stateless: safe to share and to call concurrently on stable snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct MstEngine;

impl MstEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute the minimum spanning tree of `snapshot`
    pub fn compute(&self, snapshot: &GraphSnapshot) -> Result<MstResult> {
        if snapshot.is_empty() {
            debug!("empty graph: returning empty spanning tree");
            return Ok(MstResult::empty());
        }

        let started = Instant::now();
        let network = NetworkGraph::from_snapshot(snapshot);

        if let Err(err) = connectivity::ensure_connected(&network) {
            warn!(nodes = snapshot.node_count(), %err, "spanning tree refused");
            return Err(err);
        }

        let positions = prim::prim(&network)?;
        let edges: Vec<Edge> = positions
            .into_iter()
            .map(|p| snapshot.edges()[p].clone())
            .collect();
        let total_cost: f64 = edges.iter().map(|e| e.weight).sum();

        info!(
            nodes = snapshot.node_count(),
            edges = snapshot.edge_count(),
            tree_edges = edges.len(),
            total_cost,
            elapsed_us = started.elapsed().as_micros() as u64,
            "spanning tree computed"
        );

        Ok(MstResult { edges, total_cost })
    }

    /// Tree plus full-network cost comparison
    pub fn summarize(&self, snapshot: &GraphSnapshot) -> Result<NetworkSummary> {
        let mst = self.compute(snapshot)?;
        Ok(NetworkSummary::new(snapshot, &mst))
    }
}

/// Shorthand for `MstEngine::new().compute(snapshot)`
pub fn minimum_spanning_tree(snapshot: &GraphSnapshot) -> Result<MstResult> {
    MstEngine::new().compute(snapshot)
}
