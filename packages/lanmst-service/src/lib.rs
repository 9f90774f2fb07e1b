/*
 * LAN MST Service
 *
 * Typed boundary over the topology store and the MST engine:
 * - api       : validated request/response structures
 * - service   : TopologyService facade (store + engine + exporter)
 * - topology  : YAML/JSON topology files
 * - config    : versioned YAML configuration
 * - telemetry : tracing subscriber setup
 */

pub mod api;
pub mod config;
pub mod error;
pub mod service;
pub mod telemetry;
pub mod topology;

pub use api::{
    AddEdgeRequest, AddEdgeResponse, AddNodeRequest, AddNodeResponse, EdgeData, EdgeView,
    ErrorResponse, ExportResponse, MstResponse, Request, Response, WeightInput,
};
pub use config::{ConfigError, LanMstConfig};
pub use error::{ErrorCategory, Result, ServiceError};
pub use service::TopologyService;
pub use topology::{LoadReport, TopologyFile};
