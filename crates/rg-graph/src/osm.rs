//! OSM PBF source — enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use rg_graph::osm::build_from_pbf;
//!
//! let graph = build_from_pbf(Path::new("monaco-latest.osm.pbf"))?;
//! ```
//!
//! # Two phases
//!
//! PBF files normally store nodes before ways, but nothing guarantees it.
//! The reader therefore feeds every node straight into the [`GraphBuilder`]
//! while buffering ways that carry a `highway` tag, and only replays the
//! buffered ways once the whole file has been read.  Every way is resolved
//! against the complete node table regardless of entity order.
//!
//! # Memory note
//!
//! All nodes of the extract are kept, not only road nodes, because they are
//! all written to the `nodes` table.  Buffered ways keep just the tags the
//! builder reads.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{debug, info};
use osmpbf::{Element, ElementReader};

use rg_core::{Coordinate, OsmNodeId};

use crate::buffer::WayBuffer;
use crate::builder::{GraphBuilder, RoadGraph};
use crate::GraphResult;

// ── Public entry point ────────────────────────────────────────────────────────

/// Read an OSM PBF extract and build its road graph.
///
/// # Errors
///
/// Returns [`GraphError::Io`](crate::GraphError::Io) if the file cannot be
/// opened and [`GraphError::Pbf`](crate::GraphError::Pbf) on decode errors.
pub fn build_from_pbf(path: &Path) -> GraphResult<RoadGraph> {
    let file = File::open(path)?;
    let reader = ElementReader::new(BufReader::new(file));

    // ── Phase 1: nodes into the builder, road ways into the buffer ────────
    let mut builder = GraphBuilder::new();
    let mut ways = WayBuffer::new();

    reader.for_each(|elem| match elem {
        Element::Node(n) => {
            builder.on_node(OsmNodeId(n.id()), Coordinate::new(n.lat(), n.lon()));
        }
        Element::DenseNode(n) => {
            builder.on_node(OsmNodeId(n.id()), Coordinate::new(n.lat(), n.lon()));
        }
        Element::Way(w) => ways.push(w.refs().map(OsmNodeId), w.tags()),
        _ => {}
    })?;

    info!(
        "read {} nodes, {} road ways from {}",
        builder.node_count(),
        ways.len(),
        path.display(),
    );
    debug!("ignored {} ways without a highway tag", ways.skipped());

    // ── Phase 2: resolve ways against the complete node table ─────────────
    ways.replay(&mut builder);

    Ok(builder.finish())
}
