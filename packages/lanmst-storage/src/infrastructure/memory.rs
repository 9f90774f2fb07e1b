//! In-memory adapter for TopologyStore
//!
//! All state sits behind one `parking_lot::RwLock`: mutations hold the write
//! lock across check-and-insert, snapshots hold the read lock while cloning.
//! A reader therefore never sees an edge whose endpoint is not yet visible.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::domain::{
    AddEdgeOutcome, AddNodeOutcome, Edge, EdgeKey, GraphSnapshot, SelfLoopPolicy, TopologyStore,
};
use crate::{Result, StorageError};

#[derive(Debug, Default)]
struct GraphState {
    nodes: Vec<String>,
    node_index: FxHashMap<String, usize>,
    edges: Vec<Edge>,
    edge_index: FxHashMap<EdgeKey, usize>,
}

impl GraphState {
    fn missing_endpoints(&self, u: &str, v: &str) -> Vec<String> {
        let mut missing = Vec::new();
        if !self.node_index.contains_key(u) {
            missing.push(u.to_string());
        }
        if v != u && !self.node_index.contains_key(v) {
            missing.push(v.to_string());
        }
        missing
    }
}

/// Process-wide topology store
///
/// Created empty, mutated in place, dropped at shutdown. Share it through an
/// `Arc`; every method takes `&self`.
#[derive(Debug, Default)]
pub struct InMemoryTopologyStore {
    state: RwLock<GraphState>,
    self_loops: SelfLoopPolicy,
}

impl InMemoryTopologyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_self_loop_policy(policy: SelfLoopPolicy) -> Self {
        Self {
            state: RwLock::new(GraphState::default()),
            self_loops: policy,
        }
    }

    /// Seed a store from a validated snapshot
    pub fn from_snapshot(snapshot: &GraphSnapshot, policy: SelfLoopPolicy) -> Result<Self> {
        let store = Self::with_self_loop_policy(policy);
        for label in snapshot.nodes() {
            store.add_node(label);
        }
        for edge in snapshot.edges() {
            if !store.add_edge(&edge.source, &edge.target, edge.weight).is_added() {
                return Err(StorageError::invalid_snapshot(format!(
                    "edge {} was declined by the store",
                    edge
                )));
            }
        }
        Ok(store)
    }
}

impl TopologyStore for InMemoryTopologyStore {
    fn add_node(&self, label: &str) -> AddNodeOutcome {
        let mut state = self.state.write();

        if label.is_empty() || state.node_index.contains_key(label) {
            debug!(label, "node declined: empty or already present");
            return AddNodeOutcome {
                added: false,
                nodes: state.nodes.clone(),
            };
        }

        let position = state.nodes.len();
        state.nodes.push(label.to_string());
        state.node_index.insert(label.to_string(), position);
        debug!(label, total = state.nodes.len(), "node added");

        AddNodeOutcome {
            added: true,
            nodes: state.nodes.clone(),
        }
    }

    fn add_edge(&self, u: &str, v: &str, weight: f64) -> AddEdgeOutcome {
        let mut state = self.state.write();

        let missing = state.missing_endpoints(u, v);
        if !missing.is_empty() {
            debug!(u, v, ?missing, "edge declined: endpoints not found");
            return AddEdgeOutcome::NodesNotFound { missing };
        }

        if !weight.is_finite() {
            debug!(u, v, weight, "edge declined: non-finite weight");
            return AddEdgeOutcome::InvalidWeight { weight };
        }

        if u == v && self.self_loops == SelfLoopPolicy::Reject {
            debug!(node = u, "edge declined: self-loop");
            return AddEdgeOutcome::SelfLoopRejected {
                node: u.to_string(),
            };
        }

        let key = EdgeKey::new(u, v);
        let replaced = match state.edge_index.get(&key).copied() {
            Some(position) => {
                let previous = state.edges[position].weight;
                state.edges[position].weight = weight;
                debug!(u, v, previous, weight, "edge weight replaced");
                Some(previous)
            }
            None => {
                let position = state.edges.len();
                state.edges.push(Edge::new(u, v, weight));
                state.edge_index.insert(key, position);
                debug!(u, v, weight, "edge added");
                None
            }
        };

        AddEdgeOutcome::Added {
            edges: state.edges.clone(),
            replaced,
        }
    }

    fn list_nodes(&self) -> Vec<String> {
        self.state.read().nodes.clone()
    }

    fn list_edges(&self) -> Vec<Edge> {
        self.state.read().edges.clone()
    }

    fn snapshot(&self) -> GraphSnapshot {
        let state = self.state.read();
        GraphSnapshot::from_store(
            state.nodes.clone(),
            state.edges.clone(),
            state.node_index.clone(),
        )
    }

    fn contains_node(&self, label: &str) -> bool {
        self.state.read().node_index.contains_key(label)
    }

    fn edge_weight(&self, u: &str, v: &str) -> Result<f64> {
        let state = self.state.read();
        if let Some(label) = state.missing_endpoints(u, v).into_iter().next() {
            return Err(StorageError::node_not_found(label));
        }
        state
            .edge_index
            .get(&EdgeKey::new(u, v))
            .map(|&position| state.edges[position].weight)
            .ok_or_else(|| StorageError::edge_not_found(u, v))
    }

    fn self_loop_policy(&self) -> SelfLoopPolicy {
        self.self_loops
    }

    fn node_count(&self) -> usize {
        self.state.read().nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.state.read().edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn store_with(nodes: &[&str]) -> InMemoryTopologyStore {
        let store = InMemoryTopologyStore::new();
        for n in nodes {
            store.add_node(n);
        }
        store
    }

    #[test]
    fn test_add_node() {
        let store = InMemoryTopologyStore::new();
        let outcome = store.add_node("A");

        assert!(outcome.added);
        assert_eq!(outcome.nodes, vec!["A".to_string()]);
    }

    #[test]
    fn test_add_duplicate_node_is_noop() {
        let store = store_with(&["A", "B"]);
        let outcome = store.add_node("A");

        assert!(!outcome.added);
        assert_eq!(outcome.nodes, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_add_empty_label_is_noop() {
        let store = InMemoryTopologyStore::new();
        let outcome = store.add_node("");

        assert!(!outcome.added);
        assert!(outcome.nodes.is_empty());
        assert_eq!(store.node_count(), 0);
    }

    #[test]
    fn test_add_edge_between_existing_nodes() {
        let store = store_with(&["A", "B"]);
        let outcome = store.add_edge("A", "B", 10.0);

        assert_eq!(
            outcome,
            AddEdgeOutcome::Added {
                edges: vec![Edge::new("A", "B", 10.0)],
                replaced: None,
            }
        );
    }

    #[test]
    fn test_add_edge_missing_nodes_leaves_state_unchanged() {
        let store = store_with(&["A"]);
        let outcome = store.add_edge("A", "B", 1.0);

        assert_eq!(
            outcome,
            AddEdgeOutcome::NodesNotFound {
                missing: vec!["B".to_string()]
            }
        );
        assert_eq!(store.edge_count(), 0);
        assert!(!store.contains_node("B"));
    }

    #[test]
    fn test_add_edge_reports_both_missing() {
        let store = InMemoryTopologyStore::new();
        match store.add_edge("X", "Y", 1.0) {
            AddEdgeOutcome::NodesNotFound { missing } => assert_eq!(missing, vec!["X", "Y"]),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_repeated_pair_last_write_wins() {
        let store = store_with(&["A", "B"]);
        store.add_edge("A", "B", 4.0);
        let outcome = store.add_edge("B", "A", 7.5);

        assert_eq!(
            outcome,
            AddEdgeOutcome::Added {
                edges: vec![Edge::new("A", "B", 7.5)],
                replaced: Some(4.0),
            }
        );
        assert_eq!(store.edge_weight("A", "B").unwrap(), 7.5);
        assert_eq!(store.edge_count(), 1);
    }

    #[test]
    fn test_negative_weight_accepted() {
        let store = store_with(&["A", "B"]);
        assert!(store.add_edge("A", "B", -3.0).is_added());
        assert_eq!(store.edge_weight("B", "A").unwrap(), -3.0);
    }

    #[test]
    fn test_non_finite_weight_declined() {
        let store = store_with(&["A", "B"]);

        assert!(matches!(
            store.add_edge("A", "B", f64::NAN),
            AddEdgeOutcome::InvalidWeight { .. }
        ));
        assert!(matches!(
            store.add_edge("A", "B", f64::INFINITY),
            AddEdgeOutcome::InvalidWeight { .. }
        ));
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn test_self_loop_rejected_by_default() {
        let store = store_with(&["A"]);
        assert_eq!(
            store.add_edge("A", "A", 1.0),
            AddEdgeOutcome::SelfLoopRejected {
                node: "A".to_string()
            }
        );
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn test_self_loop_allowed_by_policy() {
        let store = InMemoryTopologyStore::with_self_loop_policy(SelfLoopPolicy::Allow);
        store.add_node("A");

        assert!(store.add_edge("A", "A", 1.0).is_added());
        assert_eq!(store.self_loop_policy(), SelfLoopPolicy::Allow);
        assert_eq!(store.snapshot().degree("A").unwrap(), 2);
    }

    #[test]
    fn test_edge_weight_errors() {
        let store = store_with(&["A", "B"]);

        let err = store.edge_weight("A", "B").unwrap_err();
        assert_eq!(err.kind, ErrorKind::EdgeNotFound);

        let err = store.edge_weight("A", "Z").unwrap_err();
        assert_eq!(err.kind, ErrorKind::NodeNotFound);
    }

    #[test]
    fn test_snapshot_preserves_insertion_order() {
        let store = store_with(&["C", "A", "B"]);
        store.add_edge("B", "C", 2.0);
        store.add_edge("A", "B", 4.0);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.nodes(), &["C", "A", "B"]);
        assert_eq!(snapshot.edges()[0], Edge::new("B", "C", 2.0));
        assert_eq!(snapshot.node_index("A"), Some(1));
    }

    #[test]
    fn test_from_snapshot() {
        let original = store_with(&["A", "B", "C"]);
        original.add_edge("A", "B", 1.0);
        original.add_edge("B", "C", 2.0);

        let copy =
            InMemoryTopologyStore::from_snapshot(&original.snapshot(), SelfLoopPolicy::Reject)
                .unwrap();
        assert_eq!(copy.snapshot(), original.snapshot());
    }

    #[test]
    fn test_from_snapshot_rejects_loop_under_reject_policy() {
        let snapshot = GraphSnapshot::from_parts(
            vec!["A".to_string()],
            vec![Edge::new("A", "A", 1.0)],
        )
        .unwrap();

        let err = InMemoryTopologyStore::from_snapshot(&snapshot, SelfLoopPolicy::Reject)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidSnapshot);
    }

    #[test]
    fn test_concurrent_writers_never_duplicate() {
        let store = Arc::new(InMemoryTopologyStore::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        store.add_node(&format!("host-{}", (i + t) % 40));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = store.snapshot();
        assert_eq!(snapshot.node_count(), 40);
    }
}
