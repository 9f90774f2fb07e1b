//! Snapshot → petgraph conversion
//!
//! Undirected graph where:
//! - Node `i` is the i-th inserted label (NodeIndex order == insertion order)
//! - Edge weight carries the weight plus the edge's position in the snapshot
//!
//! Self-loops are not added: they never belong to a spanning tree and do not
//! change connectivity.

use lanmst_storage::GraphSnapshot;
use petgraph::graph::{NodeIndex, UnGraph};

/// Edge payload: weight + position in `GraphSnapshot::edges()`
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Link {
    pub weight: f64,
    pub position: usize,
}

/// Undirected petgraph view of a snapshot
pub(crate) struct NetworkGraph {
    pub graph: UnGraph<String, Link>,
}

impl NetworkGraph {
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> Self {
        let mut graph =
            UnGraph::with_capacity(snapshot.node_count(), snapshot.edge_count());

        for label in snapshot.nodes() {
            graph.add_node(label.clone());
        }

        for (position, edge) in snapshot.edges().iter().enumerate() {
            if edge.is_self_loop() {
                continue;
            }
            // Snapshot edges only reference existing labels
            let (Some(a), Some(b)) = (
                snapshot.node_index(&edge.source),
                snapshot.node_index(&edge.target),
            ) else {
                continue;
            };
            graph.add_edge(
                NodeIndex::new(a),
                NodeIndex::new(b),
                Link {
                    weight: edge.weight,
                    position,
                },
            );
        }

        Self { graph }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn label(&self, idx: NodeIndex) -> &str {
        &self.graph[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lanmst_storage::Edge;

    #[test]
    fn test_node_indices_follow_insertion_order() {
        let snapshot = GraphSnapshot::from_parts(
            vec!["C".into(), "A".into(), "B".into()],
            vec![Edge::new("A", "B", 1.0)],
        )
        .unwrap();

        let network = NetworkGraph::from_snapshot(&snapshot);
        assert_eq!(network.node_count(), 3);
        assert_eq!(network.label(NodeIndex::new(0)), "C");
        assert_eq!(network.label(NodeIndex::new(2)), "B");
    }

    #[test]
    fn test_self_loops_skipped() {
        let snapshot = GraphSnapshot::from_parts(
            vec!["A".into(), "B".into()],
            vec![Edge::new("A", "A", 1.0), Edge::new("A", "B", 2.0)],
        )
        .unwrap();

        let network = NetworkGraph::from_snapshot(&snapshot);
        assert_eq!(network.graph.edge_count(), 1);

        let link = network.graph.edge_weights().next().unwrap();
        assert_eq!(link.position, 1);
        assert_eq!(link.weight, 2.0);
    }
}
