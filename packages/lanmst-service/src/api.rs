//! Typed request/response structures
//!
//! Payloads are parsed into these types before touching the store, so the
//! core never sees an untyped map. Field names follow the JSON front end
//! (`node`, `from`, `to`, `weight`, `mst`, `total_cost`).

use lanmst_engine::{MstResult, NetworkSummary};
use lanmst_storage::Edge;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, ServiceError};

pub const NODE_ADDED: &str = "Node added";
pub const NODE_DECLINED: &str = "Node already exists or is invalid";
pub const EDGE_ADDED: &str = "Edge added";
pub const NODES_NOT_FOUND: &str = "One or both nodes not found";
pub const INVALID_WEIGHT: &str = "Weight must be a finite number";
pub const SELF_LOOP_REJECTED: &str = "Self-loops are not allowed";
pub const GRAPH_NOT_CONNECTED: &str = "Graph is not connected";

// ═══════════════════════════════════════════════════════════════════════════
// Requests
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddNodeRequest {
    pub node: String,
}

impl AddNodeRequest {
    pub fn new(node: impl Into<String>) -> Self {
        Self { node: node.into() }
    }
}

/// Weight as sent by clients: a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeightInput {
    Number(f64),
    Text(String),
}

impl WeightInput {
    pub fn to_f64(&self) -> Result<f64> {
        match self {
            WeightInput::Number(w) => Ok(*w),
            WeightInput::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                ServiceError::invalid_request(format!("weight is not a number: {:?}", s))
            }),
        }
    }
}

impl From<f64> for WeightInput {
    fn from(weight: f64) -> Self {
        WeightInput::Number(weight)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddEdgeRequest {
    pub from: String,
    pub to: String,
    pub weight: WeightInput,
}

impl AddEdgeRequest {
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight: WeightInput::Number(weight),
        }
    }
}

/// One operation of a replay script (`{"op": "add_node", "node": "A"}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    GetNodes,
    GetEdges,
    AddNode(AddNodeRequest),
    AddEdge(AddEdgeRequest),
    CalculateMst,
    Summary,
    ExportJson,
    ExportTxt,
    ExportDot,
}

// ═══════════════════════════════════════════════════════════════════════════
// Responses
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    pub weight: f64,
}

/// Edge as `[u, v, {"weight": w}]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeView(pub String, pub String, pub EdgeData);

impl From<&Edge> for EdgeView {
    fn from(edge: &Edge) -> Self {
        EdgeView(
            edge.source.clone(),
            edge.target.clone(),
            EdgeData {
                weight: edge.weight,
            },
        )
    }
}

pub fn edge_views(edges: &[Edge]) -> Vec<EdgeView> {
    edges.iter().map(EdgeView::from).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddNodeResponse {
    pub status: String,
    pub nodes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddEdgeResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<EdgeView>>,
}

impl AddEdgeResponse {
    pub fn is_added(&self) -> bool {
        self.status == EDGE_ADDED
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MstResponse {
    pub mst: Vec<EdgeView>,
    pub total_cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MstResponse {
    /// Empty tree with an error message; never a partial forest
    pub fn disconnected() -> Self {
        Self {
            mst: Vec::new(),
            total_cost: 0.0,
            error: Some(GRAPH_NOT_CONNECTED.to_string()),
        }
    }
}

impl From<&MstResult> for MstResponse {
    fn from(result: &MstResult) -> Self {
        Self {
            mst: edge_views(&result.edges),
            total_cost: result.total_cost,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub category: String,
}

impl From<&ServiceError> for ErrorResponse {
    fn from(err: &ServiceError) -> Self {
        Self {
            error: err.to_string(),
            category: err.category().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportResponse {
    pub path: PathBuf,
}

/// Response body for one `Request`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Nodes(Vec<String>),
    Edges(Vec<EdgeView>),
    AddNode(AddNodeResponse),
    AddEdge(AddEdgeResponse),
    Mst(MstResponse),
    Summary(NetworkSummary),
    Exported(ExportResponse),
    Error(ErrorResponse),
}

impl Response {
    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error(_))
            || matches!(self, Response::Mst(MstResponse { error: Some(_), .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_add_edge_request_numeric_string_weight() {
        let req: AddEdgeRequest =
            serde_json::from_value(json!({"from": "A", "to": "B", "weight": "12.5"})).unwrap();
        assert_eq!(req.weight.to_f64().unwrap(), 12.5);

        let req: AddEdgeRequest =
            serde_json::from_value(json!({"from": "A", "to": "B", "weight": 3})).unwrap();
        assert_eq!(req.weight.to_f64().unwrap(), 3.0);
    }

    #[test]
    fn test_bad_weight_is_invalid_request() {
        let req: AddEdgeRequest =
            serde_json::from_value(json!({"from": "A", "to": "B", "weight": "ten"})).unwrap();
        assert!(matches!(
            req.weight.to_f64(),
            Err(ServiceError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_missing_field_rejected() {
        let parsed = serde_json::from_value::<AddEdgeRequest>(json!({"from": "A", "weight": 1}));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_request_tagging() {
        let req: Request = serde_json::from_str(r#"{"op": "add_node", "node": "A"}"#).unwrap();
        assert_eq!(req, Request::AddNode(AddNodeRequest::new("A")));

        let req: Request = serde_json::from_str(r#"{"op": "calculate_mst"}"#).unwrap();
        assert_eq!(req, Request::CalculateMst);
    }

    #[test]
    fn test_edge_view_is_triple() {
        let view = EdgeView::from(&Edge::new("A", "B", 4.0));
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!(["A", "B", {"weight": 4.0}])
        );
    }

    #[test]
    fn test_mst_response_shapes() {
        let ok = MstResponse::from(&MstResult {
            edges: vec![Edge::new("A", "B", 10.0)],
            total_cost: 10.0,
        });
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"mst": [["A", "B", {"weight": 10.0}]], "total_cost": 10.0})
        );

        let err = MstResponse::disconnected();
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"mst": [], "total_cost": 0.0, "error": "Graph is not connected"})
        );
        assert!(Response::Mst(err).is_error());
    }

    #[test]
    fn test_add_edge_response_omits_missing_edges() {
        let resp = AddEdgeResponse {
            status: NODES_NOT_FOUND.to_string(),
            edges: None,
        };
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({"status": "One or both nodes not found"})
        );
        assert!(!resp.is_added());
    }
}
