//! `rg-graph` — turn OSM nodes and ways into a directed, weighted road graph.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`tags`]    | `Tags` lookup trait over the usual tag containers            |
//! | [`buffer`]  | `WayBuffer`: road ways held until all nodes are read         |
//! | [`speed`]   | `infer_speed`, `RoadClass`                                   |
//! | [`builder`] | `GraphBuilder`, `RoadGraph`, `BuildStats`                    |
//! | [`osm`]     | `build_from_pbf` (feature = `"osm"` only)                    |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag  | Effect                                                         |
//! |-------|----------------------------------------------------------------|
//! | `osm` | Enables OSM PBF decoding via the `osmpbf` crate.              |

pub mod buffer;
pub mod builder;
pub mod error;
pub mod speed;
pub mod tags;

#[cfg(feature = "osm")]
pub mod osm;


pub use buffer::WayBuffer;
pub use builder::{BuildStats, GraphBuilder, RoadGraph};
pub use error::{GraphError, GraphResult};
pub use speed::{RoadClass, infer_speed};
pub use tags::Tags;
