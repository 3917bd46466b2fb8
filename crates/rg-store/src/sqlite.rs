//! SQLite backend (feature `sqlite`).
//!
//! Opens (or creates) a database file with the two routing tables:
//!
//! ```sql
//! nodes(node_id INTEGER UNIQUE, lat DOUBLE, lon DOUBLE)
//! edges(src_node INTEGER, dst_node INTEGER, distance_m INTEGER,
//!       speed_kmph INTEGER, closed BOOLEAN DEFAULT false)
//! ```
//!
//! Each [`GraphStore`] call runs in its own transaction.  The connection is
//! owned by the store and closed when it is dropped.

use std::path::Path;

use rusqlite::{Connection, params};

use rg_core::{Edge, Node, OsmNodeId};

use crate::StoreResult;
use crate::store::GraphStore;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS nodes (
        node_id INTEGER UNIQUE,
        lat     DOUBLE,
        lon     DOUBLE
    );
    CREATE TABLE IF NOT EXISTS edges (
        src_node   INTEGER,
        dst_node   INTEGER,
        distance_m INTEGER,
        speed_kmph INTEGER,
        closed     BOOLEAN DEFAULT false
    );";

/// Writes the road graph into an SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub fn open(path: &Path) -> StoreResult<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Wrap an already open connection and ensure the schema exists.
    pub fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    pub fn node_count(&self) -> StoreResult<u64> {
        let n: i64 = self.conn.query_row("SELECT COUNT(*) FROM nodes", [], |r| r.get(0))?;
        Ok(n as u64)
    }

    pub fn edge_count(&self) -> StoreResult<u64> {
        let n: i64 = self.conn.query_row("SELECT COUNT(*) FROM edges", [], |r| r.get(0))?;
        Ok(n as u64)
    }

    /// Open (not closed) edges leaving `src`, in storage order.
    pub fn outgoing(&self, src: OsmNodeId) -> StoreResult<Vec<Edge>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT dst_node, distance_m, speed_kmph, closed FROM edges WHERE src_node = ?1",
        )?;
        let rows = stmt.query_map(params![src.0], |r| {
            Ok(Edge {
                src,
                dst:        OsmNodeId(r.get(0)?),
                distance_m: r.get(1)?,
                speed_kmph: r.get(2)?,
                closed:     r.get(3)?,
            })
        })?;

        let mut edges = Vec::with_capacity(8);
        for edge in rows {
            let edge = edge?;
            if !edge.closed {
                edges.push(edge);
            }
        }
        Ok(edges)
    }

    /// Borrow the underlying connection, e.g. for ad-hoc queries.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl GraphStore for SqliteStore {
    fn clear(&mut self) -> StoreResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM edges", [])?;
        tx.execute("DELETE FROM nodes", [])?;
        tx.commit()?;
        Ok(())
    }

    fn insert_nodes(&mut self, rows: &[Node]) -> StoreResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO nodes (node_id, lat, lon) VALUES (?1, ?2, ?3)",
            )?;
            for row in rows {
                stmt.execute(params![row.id.0, row.pos.lat, row.pos.lon])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn insert_edges(&mut self, rows: &[Edge]) -> StoreResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO edges (src_node, dst_node, distance_m, speed_kmph, closed) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(params![
                    row.src.0,
                    row.dst.0,
                    row.distance_m,
                    row.speed_kmph,
                    row.closed,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}
