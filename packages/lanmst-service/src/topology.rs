//! Topology files
//!
//! Accepted layouts:
//! - YAML or JSON `{nodes: [..], edges: [{from, to, weight}]}`
//! - node-link JSON as written by the JSON export (detected by its `links` key)

use lanmst_engine::from_node_link_json;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::api::{AddEdgeRequest, WeightInput};
use crate::error::{Result, ServiceError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TopologyFile {
    #[serde(default)]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub edges: Vec<AddEdgeRequest>,
}

impl TopologyFile {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(ServiceError::parse)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content).map_err(ServiceError::parse)?;
        if value.get("links").is_some() {
            let snapshot = from_node_link_json(content).map_err(ServiceError::parse)?;
            return Ok(Self {
                nodes: snapshot.nodes().to_vec(),
                edges: snapshot
                    .edges()
                    .iter()
                    .map(|e| AddEdgeRequest {
                        from: e.source.clone(),
                        to: e.target.clone(),
                        weight: WeightInput::Number(e.weight),
                    })
                    .collect(),
            });
        }
        serde_json::from_value(value).map_err(ServiceError::parse)
    }
}

/// What happened when a topology file was applied to the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadReport {
    pub nodes_added: usize,
    pub nodes_declined: Vec<String>,
    pub edges_added: usize,
    /// `(from, to, status)` for every declined edge
    pub edges_declined: Vec<(String, String, String)>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.nodes_declined.is_empty() && self.edges_declined.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_yaml_topology() {
        let file = TopologyFile::from_yaml_str(
            r#"
nodes: [A, B]
edges:
  - { from: A, to: B, weight: 10 }
"#,
        )
        .unwrap();
        assert_eq!(file.nodes, vec!["A", "B"]);
        assert_eq!(file.edges, vec![AddEdgeRequest::new("A", "B", 10.0)]);
    }

    #[test]
    fn test_json_topology_from_path() {
        let mut tmp = Builder::new().suffix(".json").tempfile().unwrap();
        tmp.write_all(br#"{"nodes": ["A"], "edges": []}"#).unwrap();

        let file = TopologyFile::from_path(tmp.path()).unwrap();
        assert_eq!(file.nodes, vec!["A"]);
    }

    #[test]
    fn test_node_link_topology() {
        let file = TopologyFile::from_json_str(
            r#"{"directed": false, "multigraph": false, "graph": {},
                "nodes": [{"id": "A"}, {"id": "B"}],
                "links": [{"weight": 2.5, "source": "A", "target": "B"}]}"#,
        )
        .unwrap();
        assert_eq!(file.edges, vec![AddEdgeRequest::new("A", "B", 2.5)]);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = TopologyFile::from_yaml_str("hosts: [A]\n").unwrap_err();
        assert!(matches!(err, ServiceError::Parse(_)));
    }
}
