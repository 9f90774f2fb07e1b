//! Domain layer for TopologyStore
//!
//! # Core Principles
//!
//! 1. **Explicit nodes**: a node label is created only by `add_node`, never by `add_edge`
//! 2. **Simple graph**: at most one edge per unordered pair; re-adding replaces the weight
//! 3. **Snapshots**: readers get an immutable `GraphSnapshot`, never the live containers
//!
//! # Domain Models
//!
//! - `Edge`: weighted undirected connection between two existing nodes
//! - `EdgeKey`: canonical unordered pair used for deduplication
//! - `GraphSnapshot`: consistent copy of nodes + edges, in insertion order
//! - `AddNodeOutcome` / `AddEdgeOutcome`: result of a mutation (declined is not an error)
//!
//! # Port Trait
//!
//! - `TopologyStore`: primary storage abstraction

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Result, StorageError};

// ═══════════════════════════════════════════════════════════════════════════
// Domain Models
// ═══════════════════════════════════════════════════════════════════════════

/// Weighted undirected edge (cable run)
///
/// `source`/`target` keep the orientation of the first `add_edge` call for
/// display; equality of connections goes through [`EdgeKey`].
///
/// # Examples
///
/// ```rust
/// use lanmst_storage::Edge;
///
/// let edge = Edge::new("A", "B", 4.0);
/// assert!(edge.connects("B", "A"));
/// assert_eq!(edge.other("A"), Some("B"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(&self.source, &self.target)
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// True if this edge joins `a` and `b` in either orientation
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }

    /// Opposite endpoint of `label`, if `label` is an endpoint
    pub fn other(&self, label: &str) -> Option<&str> {
        if self.source == label {
            Some(&self.target)
        } else if self.target == label {
            Some(&self.source)
        } else {
            None
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -- {} [{}]", self.source, self.target, self.weight)
    }
}

/// Canonical unordered node pair
///
/// `EdgeKey::new("B", "A") == EdgeKey::new("A", "B")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    low: String,
    high: String,
}

impl EdgeKey {
    pub fn new(a: &str, b: &str) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self {
            low: low.to_string(),
            high: high.to_string(),
        }
    }

    pub fn endpoints(&self) -> (&str, &str) {
        (&self.low, &self.high)
    }
}

/// How `add_edge` treats `u == v`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfLoopPolicy {
    /// Decline the edge with `AddEdgeOutcome::SelfLoopRejected`
    #[default]
    Reject,
    /// Store the loop; spanning-tree computation never selects it
    Allow,
}

/// Result of `add_node`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddNodeOutcome {
    /// False when the label was empty or already present
    pub added: bool,
    /// All node labels after the call, in insertion order
    pub nodes: Vec<String>,
}

/// Result of `add_edge`
///
/// Only `Added` mutates the store.
#[derive(Debug, Clone, PartialEq)]
pub enum AddEdgeOutcome {
    Added {
        edges: Vec<Edge>,
        /// Previous weight when an existing pair was overwritten
        replaced: Option<f64>,
    },
    NodesNotFound {
        missing: Vec<String>,
    },
    InvalidWeight {
        weight: f64,
    },
    SelfLoopRejected {
        node: String,
    },
}

impl AddEdgeOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, AddEdgeOutcome::Added { .. })
    }

    pub fn edges(&self) -> Option<&[Edge]> {
        match self {
            AddEdgeOutcome::Added { edges, .. } => Some(edges),
            _ => None,
        }
    }
}

/// Consistent, immutable view of the graph
///
/// Node order is insertion order; edge order is the order in which each
/// pair was first added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSnapshot")]
pub struct GraphSnapshot {
    nodes: Vec<String>,
    edges: Vec<Edge>,
    #[serde(skip)]
    index: FxHashMap<String, usize>,
}

#[derive(Deserialize)]
struct RawSnapshot {
    nodes: Vec<String>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl TryFrom<RawSnapshot> for GraphSnapshot {
    type Error = StorageError;

    fn try_from(raw: RawSnapshot) -> Result<Self> {
        GraphSnapshot::from_parts(raw.nodes, raw.edges)
    }
}

impl GraphSnapshot {
    /// Build a snapshot, checking the store invariants
    ///
    /// Rejects duplicate or empty labels, edges with unknown endpoints,
    /// non-finite weights and repeated pairs.
    pub fn from_parts(nodes: Vec<String>, edges: Vec<Edge>) -> Result<Self> {
        let mut index = FxHashMap::default();
        for (i, label) in nodes.iter().enumerate() {
            if label.is_empty() {
                return Err(StorageError::invalid_snapshot("empty node label"));
            }
            if index.insert(label.clone(), i).is_some() {
                return Err(StorageError::invalid_snapshot(format!(
                    "duplicate node label: {}",
                    label
                )));
            }
        }

        let mut seen = rustc_hash::FxHashSet::default();
        for edge in &edges {
            for endpoint in [&edge.source, &edge.target] {
                if !index.contains_key(endpoint) {
                    return Err(StorageError::invalid_snapshot(format!(
                        "edge {} references unknown node {}",
                        edge, endpoint
                    )));
                }
            }
            if !edge.weight.is_finite() {
                return Err(StorageError::invalid_snapshot(format!(
                    "edge {} has a non-finite weight",
                    edge
                )));
            }
            if !seen.insert(edge.key()) {
                return Err(StorageError::invalid_snapshot(format!(
                    "duplicate edge {} -- {}",
                    edge.source, edge.target
                )));
            }
        }

        Ok(Self {
            nodes,
            edges,
            index,
        })
    }

    /// Invariants already enforced by the store under its lock
    pub(crate) fn from_store(
        nodes: Vec<String>,
        edges: Vec<Edge>,
        index: FxHashMap<String, usize>,
    ) -> Self {
        Self {
            nodes,
            edges,
            index,
        }
    }

    /// Parse a snapshot from JSON (`{"nodes": [...], "edges": [...]}`)
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Zero nodes. An empty graph is a valid state, not a failure.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains_node(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Insertion position of `label`
    pub fn node_index(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Number of edges touching `label` (a self-loop counts twice)
    pub fn degree(&self, label: &str) -> Result<usize> {
        if !self.contains_node(label) {
            return Err(StorageError::node_not_found(label));
        }
        Ok(self
            .edges
            .iter()
            .map(|e| (e.source == label) as usize + (e.target == label) as usize)
            .sum())
    }

    /// Sum of every edge weight in the network
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Port Trait: TopologyStore
// ═══════════════════════════════════════════════════════════════════════════

/// Authoritative mutable state of nodes and edges
///
/// Implementations must make each mutation atomic with respect to other
/// mutations and to `snapshot()`.
pub trait TopologyStore: Send + Sync {
    // ═══════════════════════════════════════════════════════════════════════
    // Mutations
    // ═══════════════════════════════════════════════════════════════════════

    fn add_node(&self, label: &str) -> AddNodeOutcome;

    fn add_edge(&self, u: &str, v: &str, weight: f64) -> AddEdgeOutcome;

    // ═══════════════════════════════════════════════════════════════════════
    // Reads
    // ═══════════════════════════════════════════════════════════════════════

    fn list_nodes(&self) -> Vec<String>;

    fn list_edges(&self) -> Vec<Edge>;

    fn snapshot(&self) -> GraphSnapshot;

    fn contains_node(&self, label: &str) -> bool;

    fn edge_weight(&self, u: &str, v: &str) -> Result<f64>;

    fn self_loop_policy(&self) -> SelfLoopPolicy;

    fn node_count(&self) -> usize {
        self.list_nodes().len()
    }

    fn edge_count(&self) -> usize {
        self.list_edges().len()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Edge Tests
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_edge_key_is_unordered() {
        assert_eq!(EdgeKey::new("A", "B"), EdgeKey::new("B", "A"));
        assert_ne!(EdgeKey::new("A", "B"), EdgeKey::new("A", "C"));
        assert_eq!(EdgeKey::new("B", "A").endpoints(), ("A", "B"));
    }

    #[test]
    fn test_edge_other_endpoint() {
        let edge = Edge::new("A", "B", 4.0);
        assert_eq!(edge.other("A"), Some("B"));
        assert_eq!(edge.other("B"), Some("A"));
        assert_eq!(edge.other("C"), None);
    }

    #[test]
    fn test_edge_self_loop() {
        assert!(Edge::new("A", "A", 1.0).is_self_loop());
        assert!(!Edge::new("A", "B", 1.0).is_self_loop());
    }

    #[test]
    fn test_edge_display() {
        assert_eq!(Edge::new("A", "B", 2.5).to_string(), "A -- B [2.5]");
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Snapshot Tests
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_snapshot_default_is_empty() {
        let snapshot = GraphSnapshot::default();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.edge_count(), 0);
        assert_eq!(snapshot.total_weight(), 0.0);
    }

    #[test]
    fn test_snapshot_from_parts() {
        let snapshot = GraphSnapshot::from_parts(
            labels(&["A", "B", "C"]),
            vec![Edge::new("A", "B", 4.0), Edge::new("B", "C", 2.0)],
        )
        .unwrap();

        assert_eq!(snapshot.node_index("C"), Some(2));
        assert_eq!(snapshot.degree("B").unwrap(), 2);
        assert_eq!(snapshot.total_weight(), 6.0);
    }

    #[test]
    fn test_snapshot_rejects_unknown_endpoint() {
        let err = GraphSnapshot::from_parts(labels(&["A"]), vec![Edge::new("A", "Z", 1.0)])
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidSnapshot);
        assert!(err.message.contains("Z"));
    }

    #[test]
    fn test_snapshot_rejects_duplicate_pair() {
        let err = GraphSnapshot::from_parts(
            labels(&["A", "B"]),
            vec![Edge::new("A", "B", 1.0), Edge::new("B", "A", 2.0)],
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidSnapshot);
    }

    #[test]
    fn test_snapshot_rejects_duplicate_label() {
        assert!(GraphSnapshot::from_parts(labels(&["A", "A"]), vec![]).is_err());
        assert!(GraphSnapshot::from_parts(labels(&[""]), vec![]).is_err());
    }

    #[test]
    fn test_degree_unknown_node() {
        let snapshot = GraphSnapshot::default();
        let err = snapshot.degree("ghost").unwrap_err();
        assert_eq!(err.kind, ErrorKind::NodeNotFound);
    }

    #[test]
    fn test_snapshot_json() {
        let snapshot = GraphSnapshot::from_parts(
            labels(&["A", "B"]),
            vec![Edge::new("A", "B", 10.0)],
        )
        .unwrap();

        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"nodes\":[\"A\",\"B\"]"));

        let parsed = GraphSnapshot::from_json(&json).unwrap();
        assert_eq!(parsed, snapshot);
        assert!(parsed.contains_node("B"));
    }

    #[test]
    fn test_snapshot_json_validates() {
        let err = GraphSnapshot::from_json(
            r#"{"nodes": ["A"], "edges": [{"source": "A", "target": "B", "weight": 1.0}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Serialization);
        assert!(err.message.contains("unknown node"));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Outcome Tests
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_add_edge_outcome_accessors() {
        let added = AddEdgeOutcome::Added {
            edges: vec![Edge::new("A", "B", 1.0)],
            replaced: None,
        };
        assert!(added.is_added());
        assert_eq!(added.edges().map(|e| e.len()), Some(1));

        let missing = AddEdgeOutcome::NodesNotFound {
            missing: labels(&["C"]),
        };
        assert!(!missing.is_added());
        assert!(missing.edges().is_none());
    }

    #[test]
    fn test_self_loop_policy_serde() {
        assert_eq!(SelfLoopPolicy::default(), SelfLoopPolicy::Reject);
        let policy: SelfLoopPolicy = serde_json::from_str("\"allow\"").unwrap();
        assert_eq!(policy, SelfLoopPolicy::Allow);
    }
}
