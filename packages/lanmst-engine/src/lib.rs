/*
 * LAN MST Engine
 *
 * Read-only computations over a topology snapshot:
 * - features/spanning_tree : connectivity check, Prim's MST, cost summary
 * - features/export        : node-link JSON, plain-text edge list, Graphviz DOT
 *
 * The engine never mutates the store; every call works on a GraphSnapshot.
 */

pub mod errors;
pub mod features;

pub use errors::{EngineError, Result};
pub use features::export::{
    from_node_link_json, to_dot, to_edge_list_text, to_node_link_json, ExportConfig, ExportError,
    Exporter,
};
pub use features::spanning_tree::{
    is_connected, minimum_spanning_tree, MstEngine, MstResult, NetworkSummary,
};

pub use lanmst_storage::{Edge, GraphSnapshot};
