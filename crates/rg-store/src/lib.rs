//! `rg-store` — persist a road graph as two tables, in bounded batches.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Destination                                   |
//! |-----------|---------|-----------------------------------------------|
//! | *(none)*  | CSV     | `nodes.csv`, `edges.csv` in a directory       |
//! | `sqlite`  | SQLite  | `nodes` and `edges` tables in a database file |
//!
//! Both implement [`GraphStore`] and are driven by [`BulkLoader`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use rg_store::{BulkLoader, LoadConfig, SqliteStore};
//!
//! let mut store = SqliteStore::open(Path::new("routing.db"))?;
//! let summary = BulkLoader::new(LoadConfig::default())
//!     .load(&mut store, &graph.node_rows(), &graph.edges)?;
//! ```

pub mod csv;
pub mod error;
pub mod loader;
pub mod store;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use crate::csv::CsvStore;
pub use error::{StoreError, StoreResult};
pub use loader::{BulkLoader, DEFAULT_BATCH_SIZE, LoadConfig, LoadSummary};
pub use store::GraphStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
