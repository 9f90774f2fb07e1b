//! Feature modules
//!
//! - spanning_tree/ - connectivity validation + minimum spanning tree
//! - export/        - file formats consumed by export/rendering collaborators

pub mod export;
pub mod spanning_tree;
