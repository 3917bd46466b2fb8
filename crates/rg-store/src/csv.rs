//! CSV backend.
//!
//! Keeps two files in the configured directory:
//! - `nodes.csv` — `node_id,lat,lon`
//! - `edges.csv` — `src_node,dst_node,distance_m,speed_kmph,closed`
//!
//! Opening a store touches nothing but the directory.  `clear` writes empty
//! header-only files under temporary names and renames them over `edges.csv`
//! and then `nodes.csv`; if a temporary file cannot be created, or the edges
//! rename fails, both tables keep their previous contents.  Inserts append to
//! whatever the files hold, writing the header first if a file is new.  Every
//! batch is flushed before the call returns, which is as close to a commit as
//! plain files get.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use csv::{Writer, WriterBuilder};
use serde::Serialize;

use rg_core::{Edge, Node};

use crate::StoreResult;
use crate::store::GraphStore;

const NODE_HEADER: [&str; 3] = ["node_id", "lat", "lon"];
const EDGE_HEADER: [&str; 5] = ["src_node", "dst_node", "distance_m", "speed_kmph", "closed"];

#[derive(Serialize)]
struct NodeRecord {
    node_id: i64,
    lat:     f64,
    lon:     f64,
}

#[derive(Serialize)]
struct EdgeRecord {
    src_node:   i64,
    dst_node:   i64,
    distance_m: u32,
    speed_kmph: u32,
    closed:     u8,
}

/// Writes the road graph to `nodes.csv` and `edges.csv`.
pub struct CsvStore {
    dir:   PathBuf,
    nodes: Option<Writer<File>>,
    edges: Option<Writer<File>>,
}

impl CsvStore {
    /// Use `dir` (created if missing) as the destination.  Existing CSV
    /// files are left alone until [`clear`](GraphStore::clear) runs.
    pub fn new(dir: &Path) -> StoreResult<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self { dir: dir.to_path_buf(), nodes: None, edges: None })
    }

    pub fn nodes_path(&self) -> PathBuf {
        self.dir.join("nodes.csv")
    }

    pub fn edges_path(&self) -> PathBuf {
        self.dir.join("edges.csv")
    }
}

/// `<path>.tmp`, next to `path` so the rename stays on one filesystem.
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Create (or truncate) `path` holding only `header`.
fn write_header_only(path: &Path, header: &[&str]) -> StoreResult<()> {
    let mut w = WriterBuilder::new().has_headers(false).from_path(path)?;
    w.write_record(header)?;
    w.flush()?;
    Ok(())
}

/// Append writer on `path`; a new or empty file gets `header` first.
fn append_writer(path: &Path, header: &[&str]) -> StoreResult<Writer<File>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let empty = file.metadata()?.len() == 0;
    let mut w = WriterBuilder::new().has_headers(false).from_writer(file);
    if empty {
        w.write_record(header)?;
    }
    Ok(w)
}

/// The writer in `slot`, opened on first use.
fn writer<'a>(
    slot: &'a mut Option<Writer<File>>,
    path: &Path,
    header: &[&str],
) -> StoreResult<&'a mut Writer<File>> {
    let w = match slot.take() {
        Some(w) => w,
        None => append_writer(path, header)?,
    };
    Ok(slot.insert(w))
}

impl GraphStore for CsvStore {
    fn clear(&mut self) -> StoreResult<()> {
        // Pending rows were flushed per batch; the handles are reopened lazily.
        self.nodes = None;
        self.edges = None;

        let (edges, nodes) = (self.edges_path(), self.nodes_path());
        let (edges_tmp, nodes_tmp) = (tmp_path(&edges), tmp_path(&nodes));

        let swapped = write_header_only(&edges_tmp, &EDGE_HEADER)
            .and_then(|()| write_header_only(&nodes_tmp, &NODE_HEADER))
            .and_then(|()| Ok(fs::rename(&edges_tmp, &edges)?))
            .and_then(|()| Ok(fs::rename(&nodes_tmp, &nodes)?));

        if swapped.is_err() {
            // Whichever temporaries are still there; a missing one is fine.
            let _ = fs::remove_file(&edges_tmp);
            let _ = fs::remove_file(&nodes_tmp);
        }
        swapped
    }

    fn insert_nodes(&mut self, rows: &[Node]) -> StoreResult<()> {
        let path = self.nodes_path();
        let w = writer(&mut self.nodes, &path, &NODE_HEADER)?;
        for row in rows {
            w.serialize(NodeRecord {
                node_id: row.id.0,
                lat:     row.pos.lat,
                lon:     row.pos.lon,
            })?;
        }
        w.flush()?;
        Ok(())
    }

    fn insert_edges(&mut self, rows: &[Edge]) -> StoreResult<()> {
        let path = self.edges_path();
        let w = writer(&mut self.edges, &path, &EDGE_HEADER)?;
        for row in rows {
            w.serialize(EdgeRecord {
                src_node:   row.src.0,
                dst_node:   row.dst.0,
                distance_m: row.distance_m,
                speed_kmph: row.speed_kmph,
                closed:     row.closed as u8,
            })?;
        }
        w.flush()?;
        Ok(())
    }
}
