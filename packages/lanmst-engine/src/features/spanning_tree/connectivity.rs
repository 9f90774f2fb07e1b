//! Connectivity validation
//!
//! Component count comes from petgraph's union-find `connected_components`;
//! the unreachable list comes from a BFS out of the first inserted node.

use lanmst_storage::GraphSnapshot;
use petgraph::algo::connected_components;
use petgraph::graph::NodeIndex;
use petgraph::visit::Bfs;

use super::network::NetworkGraph;
use crate::errors::{EngineError, Result};

/// True when every node is reachable from every other node
///
/// An empty graph counts as connected (its spanning tree is empty).
pub fn is_connected(snapshot: &GraphSnapshot) -> bool {
    ensure_connected(&NetworkGraph::from_snapshot(snapshot)).is_ok()
}

pub(crate) fn ensure_connected(network: &NetworkGraph) -> Result<()> {
    if network.node_count() == 0 {
        return Ok(());
    }

    let components = connected_components(&network.graph);
    if components == 1 {
        return Ok(());
    }

    let start = NodeIndex::new(0);
    let mut reached = vec![false; network.node_count()];
    let mut bfs = Bfs::new(&network.graph, start);
    while let Some(idx) = bfs.next(&network.graph) {
        reached[idx.index()] = true;
    }

    let unreachable = network
        .graph
        .node_indices()
        .filter(|idx| !reached[idx.index()])
        .map(|idx| network.label(idx).to_string())
        .collect();

    Err(EngineError::DisconnectedGraph {
        components,
        start: network.label(start).to_string(),
        unreachable,
    })
}
