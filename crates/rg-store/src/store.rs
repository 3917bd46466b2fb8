//! The `GraphStore` trait implemented by all backends.

use rg_core::{Edge, Node};

use crate::StoreResult;

/// Destination with a `nodes` and an `edges` collection.
///
/// Every method is one unit of work: it either takes full effect and is
/// durable when it returns `Ok`, or leaves the store as it was.
pub trait GraphStore {
    /// Remove every edge, then every node.
    fn clear(&mut self) -> StoreResult<()>;

    /// Append one batch of node rows.
    fn insert_nodes(&mut self, rows: &[Node]) -> StoreResult<()>;

    /// Append one batch of edge rows.
    fn insert_edges(&mut self, rows: &[Edge]) -> StoreResult<()>;
}
