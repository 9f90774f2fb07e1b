//! Full network vs. spanning tree cost comparison

use lanmst_storage::GraphSnapshot;
use serde::{Deserialize, Serialize};

use super::MstResult;

/// Cost summary of a network and its spanning tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub node_count: usize,
    pub edge_count: usize,
    /// Sum of every cable run in the network
    pub total_network_cost: f64,
    /// Sum of the spanning-tree edges
    pub mst_cost: f64,
    /// `total_network_cost - mst_cost`
    pub savings: f64,
    pub mst_edge_count: usize,
}

impl NetworkSummary {
    pub fn new(snapshot: &GraphSnapshot, mst: &MstResult) -> Self {
        let total_network_cost = snapshot.total_weight();
        Self {
            node_count: snapshot.node_count(),
            edge_count: snapshot.edge_count(),
            total_network_cost,
            mst_cost: mst.total_cost,
            savings: total_network_cost - mst.total_cost,
            mst_edge_count: mst.len(),
        }
    }

    /// Share of the full network cost avoided by the tree, `None` when the
    /// network costs nothing
    pub fn savings_ratio(&self) -> Option<f64> {
        (self.total_network_cost != 0.0).then(|| self.savings / self.total_network_cost)
    }
}
