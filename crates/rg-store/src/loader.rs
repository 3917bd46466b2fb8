//! Batched bulk load of a node table and edge list into a [`GraphStore`].
//!
//! # Commit model
//!
//! 1. Clear: edges, then nodes, as one unit.
//! 2. Nodes, `batch_size` rows per unit.
//! 3. Edges, `batch_size` rows per unit, only after every node batch.
//!
//! The load is atomic per batch, not per file.  When a batch fails the load
//! stops and returns the error; batches committed before it stay committed.
//! A full-file transaction would hold locks and journal space proportional to
//! the whole extract.

use log::{info, trace};

use rg_core::{Edge, Node};

use crate::{GraphStore, StoreError, StoreResult};

/// Rows per committed batch unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 5_000;

/// Tuning for [`BulkLoader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadConfig {
    /// Maximum rows per committed batch.  Must be > 0.
    pub batch_size: usize,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self { batch_size: DEFAULT_BATCH_SIZE }
    }
}

impl LoadConfig {
    /// Reject settings a load cannot run with.  Callers that construct the
    /// store with side effects should check before doing so.
    ///
    /// # Errors
    ///
    /// [`StoreError::Config`] if `batch_size` is zero.
    pub fn validate(&self) -> StoreResult<()> {
        if self.batch_size == 0 {
            return Err(StoreError::Config("batch_size must be at least 1".into()));
        }
        Ok(())
    }
}

/// What a successful [`BulkLoader::load`] wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub nodes:        usize,
    pub edges:        usize,
    pub node_batches: usize,
    pub edge_batches: usize,
}

/// Replaces a store's contents with a graph, batch by batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct BulkLoader {
    config: LoadConfig,
}

impl BulkLoader {
    pub fn new(config: LoadConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> LoadConfig {
        self.config
    }

    /// Clear `store`, then write `nodes` followed by `edges`.
    ///
    /// # Errors
    ///
    /// [`StoreError::Config`] if [`LoadConfig::validate`] fails (the store
    /// is not touched); otherwise the first error returned by the store.
    pub fn load<S: GraphStore + ?Sized>(
        &self,
        store: &mut S,
        nodes: &[Node],
        edges: &[Edge],
    ) -> StoreResult<LoadSummary> {
        self.config.validate()?;
        let batch_size = self.config.batch_size;

        info!("clearing edges and nodes");
        store.clear()?;

        info!("inserting {} nodes", nodes.len());
        let node_batches = write_batched("nodes", nodes, batch_size, |chunk| store.insert_nodes(chunk))?;

        info!("inserting {} edges", edges.len());
        let edge_batches = write_batched("edges", edges, batch_size, |chunk| store.insert_edges(chunk))?;

        Ok(LoadSummary {
            nodes: nodes.len(),
            edges: edges.len(),
            node_batches,
            edge_batches,
        })
    }
}

/// Submit `rows` in chunks of at most `batch_size`; returns the chunk count.
fn write_batched<T>(
    table: &str,
    rows: &[T],
    batch_size: usize,
    mut submit: impl FnMut(&[T]) -> StoreResult<()>,
) -> StoreResult<usize> {
    let mut batches = 0;
    let mut written = 0;
    for chunk in rows.chunks(batch_size) {
        submit(chunk)?;
        batches += 1;
        written += chunk.len();
        trace!("{table}: committed batch {batches} ({written}/{})", rows.len());
    }
    Ok(batches)
}
