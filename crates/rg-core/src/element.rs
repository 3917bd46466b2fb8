//! Plain data types a road graph is made of.
//!
//! These are also the row shapes of the two destination tables, so backends
//! write them field by field without any intermediate type.

use crate::{Coordinate, OsmNodeId};

/// A graph vertex: one row of `nodes(node_id, lat, lon)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id:  OsmNodeId,
    pub pos: Coordinate,
}

impl Node {
    #[inline]
    pub fn new(id: OsmNodeId, pos: Coordinate) -> Self {
        Self { id, pos }
    }
}

/// A directed graph edge: one row of
/// `edges(src_node, dst_node, distance_m, speed_kmph, closed)`.
///
/// A two-way road is stored as two edges with swapped endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub src:        OsmNodeId,
    pub dst:        OsmNodeId,
    /// Great-circle length in whole metres.
    pub distance_m: u32,
    /// Speed limit in km/h; always > 0.
    pub speed_kmph: u32,
    /// Closed to traffic.  Never set by the importer; other tools flip it.
    pub closed:     bool,
}

impl Edge {
    /// An open edge from `src` to `dst`.
    #[inline]
    pub fn open(src: OsmNodeId, dst: OsmNodeId, distance_m: u32, speed_kmph: u32) -> Self {
        Self { src, dst, distance_m, speed_kmph, closed: false }
    }

    /// The same road segment travelled the other way.
    #[inline]
    pub fn reversed(self) -> Self {
        Self { src: self.dst, dst: self.src, ..self }
    }
}
