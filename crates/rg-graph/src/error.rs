//! Graph-construction error type.
//!
//! Building from in-memory notifications never fails; only reading an
//! extract from disk can.

use thiserror::Error;

/// Errors produced by `rg-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "osm")]
    #[error("OSM PBF decode error: {0}")]
    Pbf(#[from] osmpbf::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;
