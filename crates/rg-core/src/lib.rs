//! `rg-core` — foundational types for the `roadgraph` OSM importer.
//!
//! This crate is a dependency of every other `rg-*` crate and has no
//! external dependencies of its own.
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`ids`]     | `OsmNodeId`                                           |
//! | [`geo`]     | `Coordinate`, haversine distance                      |
//! | [`element`] | `Node`, `Edge` — the rows a road graph is made of     |

pub mod element;
pub mod geo;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use element::{Edge, Node};
pub use geo::{Coordinate, EARTH_RADIUS_M, distance_m};
pub use ids::OsmNodeId;
