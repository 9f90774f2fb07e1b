//! Export Module
//!
//! Text formats handed to the export and rendering collaborators:
//! - node-link JSON (`lan_network.json`)
//! - plain-text edge list (`pt_topology.txt`)
//! - Graphviz DOT with the spanning tree highlighted (`mst_graph.dot`)
//!
//! Formatting functions are pure; `Exporter` writes them into a directory.

mod dot;
mod edge_list;
mod node_link;

pub use dot::to_dot;
pub use edge_list::{format_weight, to_edge_list_text, EDGE_LIST_HEADER};
pub use node_link::{from_node_link_json, to_node_link_json};

use lanmst_storage::{GraphSnapshot, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::features::spanning_tree::MstResult;

/// Export error type
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, ExportError>;

/// Where and how exports are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ExportConfig {
    /// Output directory, created on first write
    pub dir: PathBuf,
    pub json_file: String,
    pub txt_file: String,
    pub dot_file: String,
    /// Suffix appended to weights in the text edge list
    pub weight_unit: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("static"),
            json_file: "lan_network.json".to_string(),
            txt_file: "pt_topology.txt".to_string(),
            dot_file: "mst_graph.dot".to_string(),
            weight_unit: "m".to_string(),
        }
    }
}

impl ExportConfig {
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }
}

/// Writes export documents into `ExportConfig::dir`
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Write the node-link JSON document, returning its path
    pub fn write_json(&self, snapshot: &GraphSnapshot) -> Result<PathBuf> {
        let body = to_node_link_json(snapshot)?;
        self.write(&self.config.json_file, &body)
    }

    /// Write the plain-text edge list, returning its path
    pub fn write_txt(&self, snapshot: &GraphSnapshot) -> Result<PathBuf> {
        let body = to_edge_list_text(snapshot, &self.config.weight_unit);
        self.write(&self.config.txt_file, &body)
    }

    /// Write the DOT graph, returning its path
    pub fn write_dot(&self, snapshot: &GraphSnapshot, mst: Option<&MstResult>) -> Result<PathBuf> {
        let body = to_dot(snapshot, mst);
        self.write(&self.config.dot_file, &body)
    }

    fn write(&self, file_name: &str, body: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.config.dir)?;
        let path = self.target(file_name);
        fs::write(&path, body)?;
        info!(path = %path.display(), bytes = body.len(), "export written");
        Ok(path)
    }

    fn target(&self, file_name: &str) -> PathBuf {
        Path::new(&self.config.dir).join(file_name)
    }
}
