//! TopologyStore - in-memory graph store for LAN topologies
//!
//! > "stations and cable runs go in, a consistent snapshot comes out."
//!
//! ## Core Principles
//!
//! 1. **Explicit nodes**: a station exists only after `add_node`; edges never create nodes
//! 2. **Simple graph**: one edge per unordered pair, last write wins
//! 3. **Declined is not failed**: duplicates and missing endpoints are outcomes, not errors
//!
//! ## Usage
//!
//! ```rust
//! use lanmst_storage::{InMemoryTopologyStore, TopologyStore};
//!
//! let store = InMemoryTopologyStore::new();
//! store.add_node("A");
//! store.add_node("B");
//! store.add_edge("A", "B", 10.0);
//!
//! let snapshot = store.snapshot();
//! assert_eq!(snapshot.node_count(), 2);
//! assert_eq!(snapshot.edges()[0].weight, 10.0);
//! ```

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::{ErrorKind, Result, StorageError};

pub use domain::{
    AddEdgeOutcome, AddNodeOutcome, Edge, EdgeKey, GraphSnapshot, SelfLoopPolicy, TopologyStore,
};
pub use infrastructure::InMemoryTopologyStore;
