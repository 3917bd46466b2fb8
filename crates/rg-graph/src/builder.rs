//! Directed road-graph construction from node and way notifications.
//!
//! # Ordering
//!
//! A way is resolved against the node table as it stands when
//! [`GraphBuilder::on_way`] is called; segments whose endpoints are not yet
//! known are dropped and never revisited.  Deliver every node before the
//! ways that reference it.  [`crate::osm::build_from_pbf`] buffers ways until
//! the whole file has been read, so it does not depend on the file's order.
//!
//! # Anomalies
//!
//! Map extracts are cut along a bounding box and contain plenty of
//! non-road ways, so nothing here is an error:
//!
//! | Input                                    | Result                    |
//! |------------------------------------------|---------------------------|
//! | way without `highway`                    | whole way skipped         |
//! | way with fewer than two node refs        | whole way skipped         |
//! | segment touching an unknown node id      | that segment dropped      |
//! | node id seen twice                       | last coordinate wins      |

use log::debug;
use rustc_hash::FxHashMap;

use rg_core::{Coordinate, Edge, Node, OsmNodeId, distance_m};

use crate::{Tags, infer_speed};

// ── BuildStats ────────────────────────────────────────────────────────────────

/// Counters describing what the builder saw and what it discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Node notifications received, duplicates included.
    pub nodes_seen:       u64,
    /// Way notifications received.
    pub ways_seen:        u64,
    /// Ways that produced segments (had `highway` and ≥ 2 refs).
    pub road_ways:        u64,
    /// Ways skipped for lacking a `highway` tag.
    pub non_road_ways:    u64,
    /// Road ways skipped for having fewer than two refs.
    pub short_ways:       u64,
    /// Segments dropped because an endpoint was not in the node table.
    pub dropped_segments: u64,
}

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// The finished node table and edge list.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    /// Node table keyed by external id.
    pub nodes: FxHashMap<OsmNodeId, Coordinate>,
    /// Directed edges in the order they were produced.
    pub edges: Vec<Edge>,
    pub stats: BuildStats,
}

impl RoadGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn coordinate(&self, id: OsmNodeId) -> Option<Coordinate> {
        self.nodes.get(&id).copied()
    }

    /// Node rows sorted by ascending id, so repeated loads of the same
    /// extract produce identical batches.
    pub fn node_rows(&self) -> Vec<Node> {
        let mut rows: Vec<Node> = self
            .nodes
            .iter()
            .map(|(&id, &pos)| Node::new(id, pos))
            .collect();
        rows.sort_unstable_by_key(|n| n.id);
        rows
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Accumulate nodes and ways, then call [`finish`](Self::finish).
///
/// # Example
///
/// ```
/// use rg_core::{Coordinate, OsmNodeId};
/// use rg_graph::GraphBuilder;
///
/// let mut b = GraphBuilder::new();
/// b.on_node(OsmNodeId(1), Coordinate::new(0.0, 0.0));
/// b.on_node(OsmNodeId(2), Coordinate::new(0.0, 0.01));
/// b.on_way(&[OsmNodeId(1), OsmNodeId(2)], &[("highway", "residential")]);
/// let graph = b.finish();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 2); // two-way by default
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: FxHashMap<OsmNodeId, Coordinate>,
    edges: Vec<Edge>,
    stats: BuildStats,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for the expected number of nodes and edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: FxHashMap::with_capacity_and_hasher(nodes, Default::default()),
            edges: Vec::with_capacity(edges),
            stats: BuildStats::default(),
        }
    }

    /// Record a node.  A repeated id overwrites the earlier coordinate.
    pub fn on_node(&mut self, id: OsmNodeId, pos: Coordinate) {
        self.stats.nodes_seen += 1;
        self.nodes.insert(id, pos);
    }

    /// Turn one way into directed edges between consecutive node refs.
    ///
    /// The speed is inferred once and shared by every segment of the way.
    /// A reverse edge is added unless the way carries `oneway` with any
    /// value other than `"no"`.
    pub fn on_way<T: Tags + ?Sized>(&mut self, refs: &[OsmNodeId], tags: &T) {
        self.stats.ways_seen += 1;

        if !tags.has_tag("highway") {
            self.stats.non_road_ways += 1;
            return;
        }
        if refs.len() < 2 {
            self.stats.short_ways += 1;
            return;
        }
        self.stats.road_ways += 1;

        let speed_kmph = infer_speed(tags);
        let two_way = tags.tag("oneway").unwrap_or("no") == "no";

        for pair in refs.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let Some(edge) = self.segment(a, b, speed_kmph) else {
                self.stats.dropped_segments += 1;
                continue;
            };
            self.edges.push(edge);
            if two_way {
                self.edges.push(edge.reversed());
            }
        }
    }

    /// Record `n` ways that were filtered out before reaching [`on_way`](Self::on_way)
    /// because they have no `highway` tag.
    pub fn count_non_road_ways(&mut self, n: u64) {
        self.stats.ways_seen += n;
        self.stats.non_road_ways += n;
    }

    /// Forward edge `a → b`, or `None` if either endpoint is unknown.
    #[inline]
    fn segment(&self, a: OsmNodeId, b: OsmNodeId, speed_kmph: u32) -> Option<Edge> {
        let pa = self.nodes.get(&a)?;
        let pb = self.nodes.get(&b)?;
        Some(Edge::open(a, b, distance_m(*pa, *pb), speed_kmph))
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.edges.len() }
    pub fn stats(&self) -> &BuildStats { &self.stats }

    /// Consume the builder and hand over the node table and edge list.
    pub fn finish(self) -> RoadGraph {
        let s = &self.stats;
        debug!(
            "graph built: {} nodes, {} edges; {} road ways, {} non-road, {} too short, {} segments dropped",
            self.nodes.len(),
            self.edges.len(),
            s.road_ways,
            s.non_road_ways,
            s.short_ways,
            s.dropped_segments,
        );
        RoadGraph { nodes: self.nodes, edges: self.edges, stats: self.stats }
    }
}
