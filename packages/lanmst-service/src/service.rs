//! TopologyService: the one entry point front ends talk to
//!
//! Owns the store behind an `Arc<dyn TopologyStore>` so several handlers can
//! share it. Reads go through a snapshot, so a computation never observes a
//! half-applied mutation.

use lanmst_engine::{Exporter, MstEngine, MstResult, NetworkSummary};
use lanmst_storage::{AddEdgeOutcome, InMemoryTopologyStore, TopologyStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::{
    edge_views, AddEdgeRequest, AddEdgeResponse, AddNodeRequest, AddNodeResponse, EdgeView,
    ErrorResponse, ExportResponse, MstResponse, Request, Response, EDGE_ADDED, INVALID_WEIGHT,
    NODES_NOT_FOUND, NODE_ADDED, NODE_DECLINED, SELF_LOOP_REJECTED,
};
use crate::config::LanMstConfig;
use crate::error::{Result, ServiceError};
use crate::topology::{LoadReport, TopologyFile};

#[derive(Clone)]
pub struct TopologyService {
    store: Arc<dyn TopologyStore>,
    engine: MstEngine,
    exporter: Exporter,
}

impl TopologyService {
    pub fn new(config: &LanMstConfig) -> Self {
        let store = InMemoryTopologyStore::with_self_loop_policy(config.store.self_loops);
        Self::with_store(Arc::new(store), Exporter::new(config.export.clone()))
    }

    pub fn with_store(store: Arc<dyn TopologyStore>, exporter: Exporter) -> Self {
        Self {
            store,
            engine: MstEngine::new(),
            exporter,
        }
    }

    pub fn store(&self) -> &Arc<dyn TopologyStore> {
        &self.store
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Mutations
    // ═══════════════════════════════════════════════════════════════════════

    pub fn add_node(&self, request: &AddNodeRequest) -> AddNodeResponse {
        let outcome = self.store.add_node(&request.node);
        let status = if outcome.added {
            NODE_ADDED
        } else {
            NODE_DECLINED
        };
        AddNodeResponse {
            status: status.to_string(),
            nodes: outcome.nodes,
        }
    }

    /// Declined edges come back as a status; only an unparsable weight is an error
    pub fn add_edge(&self, request: &AddEdgeRequest) -> Result<AddEdgeResponse> {
        let weight = request.weight.to_f64()?;
        let outcome = self.store.add_edge(&request.from, &request.to, weight);

        let response = match outcome {
            AddEdgeOutcome::Added { edges, replaced } => {
                if let Some(previous) = replaced {
                    debug!(from = %request.from, to = %request.to, previous, weight, "edge weight replaced");
                }
                AddEdgeResponse {
                    status: EDGE_ADDED.to_string(),
                    edges: Some(edge_views(&edges)),
                }
            }
            AddEdgeOutcome::NodesNotFound { .. } => declined(NODES_NOT_FOUND),
            AddEdgeOutcome::InvalidWeight { .. } => declined(INVALID_WEIGHT),
            AddEdgeOutcome::SelfLoopRejected { .. } => declined(SELF_LOOP_REJECTED),
        };
        Ok(response)
    }

    /// Apply a topology file in order: nodes first, then edges
    pub fn load_topology(&self, file: &TopologyFile) -> LoadReport {
        let mut report = LoadReport::default();

        for node in &file.nodes {
            if self.add_node(&AddNodeRequest::new(node.clone())).status == NODE_ADDED {
                report.nodes_added += 1;
            } else {
                report.nodes_declined.push(node.clone());
            }
        }

        for edge in &file.edges {
            let status = match self.add_edge(edge) {
                Ok(resp) if resp.is_added() => {
                    report.edges_added += 1;
                    continue;
                }
                Ok(resp) => resp.status,
                Err(err) => err.to_string(),
            };
            report
                .edges_declined
                .push((edge.from.clone(), edge.to.clone(), status));
        }

        info!(
            nodes_added = report.nodes_added,
            nodes_declined = report.nodes_declined.len(),
            edges_added = report.edges_added,
            edges_declined = report.edges_declined.len(),
            "topology loaded"
        );
        report
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Queries
    // ═══════════════════════════════════════════════════════════════════════

    pub fn list_nodes(&self) -> Vec<String> {
        self.store.list_nodes()
    }

    pub fn list_edges(&self) -> Vec<EdgeView> {
        edge_views(&self.store.list_edges())
    }

    pub fn compute_mst(&self) -> Result<MstResult> {
        Ok(self.engine.compute(&self.store.snapshot())?)
    }

    /// MST as the JSON front end answers it; a disconnected graph is a body, not an error
    pub fn mst_response(&self) -> Result<MstResponse> {
        match self.compute_mst() {
            Ok(mst) => Ok(MstResponse::from(&mst)),
            Err(ServiceError::Disconnected(_)) => Ok(MstResponse::disconnected()),
            Err(err) => Err(err),
        }
    }

    pub fn summary(&self) -> Result<NetworkSummary> {
        Ok(self.engine.summarize(&self.store.snapshot())?)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Export
    // ═══════════════════════════════════════════════════════════════════════

    pub fn export_json(&self) -> Result<PathBuf> {
        Ok(self.exporter.write_json(&self.store.snapshot())?)
    }

    pub fn export_txt(&self) -> Result<PathBuf> {
        Ok(self.exporter.write_txt(&self.store.snapshot())?)
    }

    /// DOT rendering with the tree highlighted; refused for a disconnected graph
    pub fn export_dot(&self) -> Result<PathBuf> {
        let snapshot = self.store.snapshot();
        let mst = self.engine.compute(&snapshot)?;
        Ok(self.exporter.write_dot(&snapshot, Some(&mst))?)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Dispatch
    // ═══════════════════════════════════════════════════════════════════════

    /// Run one request; failures become `Response::Error`
    pub fn handle(&self, request: Request) -> Response {
        let result = match request {
            Request::GetNodes => Ok(Response::Nodes(self.list_nodes())),
            Request::GetEdges => Ok(Response::Edges(self.list_edges())),
            Request::AddNode(req) => Ok(Response::AddNode(self.add_node(&req))),
            Request::AddEdge(req) => self.add_edge(&req).map(Response::AddEdge),
            Request::CalculateMst => self.mst_response().map(Response::Mst),
            Request::Summary => self.summary().map(Response::Summary),
            Request::ExportJson => self.export_json().map(exported),
            Request::ExportTxt => self.export_txt().map(exported),
            Request::ExportDot => self.export_dot().map(exported),
        };

        result.unwrap_or_else(|err| {
            warn!(category = %err.category(), %err, "request failed");
            Response::Error(ErrorResponse::from(&err))
        })
    }
}

impl std::fmt::Debug for TopologyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopologyService")
            .field("nodes", &self.store.node_count())
            .field("edges", &self.store.edge_count())
            .field("exporter", &self.exporter)
            .finish()
    }
}

fn declined(status: &str) -> AddEdgeResponse {
    AddEdgeResponse {
        status: status.to_string(),
        edges: None,
    }
}

fn exported(path: PathBuf) -> Response {
    Response::Exported(ExportResponse { path })
}
