//! Node-link JSON document
//!
//! Layout: `{directed, multigraph, graph, nodes: [{id}], links: [{weight, source, target}]}`,
//! pretty-printed with four-space indentation. The same document loads back
//! into a `GraphSnapshot`.

use lanmst_storage::{Edge, GraphSnapshot};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use super::{ExportError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct NodeLinkDocument {
    directed: bool,
    multigraph: bool,
    #[serde(default)]
    graph: Map<String, Value>,
    nodes: Vec<NodeEntry>,
    #[serde(default)]
    links: Vec<LinkEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct NodeEntry {
    id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct LinkEntry {
    weight: f64,
    source: String,
    target: String,
}

/// Serialize a snapshot as a node-link document
pub fn to_node_link_json(snapshot: &GraphSnapshot) -> Result<String> {
    let document = NodeLinkDocument {
        directed: false,
        multigraph: false,
        graph: Map::new(),
        nodes: snapshot
            .nodes()
            .iter()
            .map(|id| NodeEntry { id: id.clone() })
            .collect(),
        links: snapshot
            .edges()
            .iter()
            .map(|e| LinkEntry {
                weight: e.weight,
                source: e.source.clone(),
                target: e.target.clone(),
            })
            .collect(),
    };

    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    document.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| ExportError::Format(e.to_string()))
}

/// Parse a node-link document back into a validated snapshot
///
/// Directed and multigraph documents are refused.
pub fn from_node_link_json(json: &str) -> Result<GraphSnapshot> {
    let document: NodeLinkDocument = serde_json::from_str(json)?;
    if document.directed || document.multigraph {
        return Err(ExportError::Format(
            "only undirected simple graphs can be loaded".to_string(),
        ));
    }

    let nodes = document.nodes.into_iter().map(|n| n.id).collect();
    let edges = document
        .links
        .into_iter()
        .map(|l| Edge::new(l.source, l.target, l.weight))
        .collect();

    Ok(GraphSnapshot::from_parts(nodes, edges)?)
}
