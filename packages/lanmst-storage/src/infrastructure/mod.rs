//! Infrastructure layer - Storage adapters
//!
//! Only the in-memory adapter exists: topology state lives for the process
//! lifetime and is never persisted.

pub mod memory;

pub use memory::InMemoryTopologyStore;
