// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Shortest-path road routing over a tiled [OpenStreetMap](https://www.openstreetmap.org/)
//! derived dataset.
//!
//! A persisted dataset of nodes and road segments is loaded into a weighted
//! directed [Graph], where one-way streets and car access restrictions
//! decide which directions of a segment become edges. Nodes are bucketed by
//! map tile for nearest-node lookups, and routes are found with either
//! [Dijkstra's algorithm](search::dijkstra) or [A*](search::astar).
//!
//! All positions are expressed as [offsets](OffsetPoint) from the top-left
//! corner of the map area, in degrees.
//!
//! # Example
//!
//! ```no_run
//! let options = tileroute::MapOptions::new(0.01);
//! let map = tileroute::RoadMap::new(options);
//! map.load("path/to/map.db").expect("failed to load map.db");
//!
//! let route = map
//!     .find_shortest_path(
//!         tileroute::OffsetPoint::new(0.012, 0.034),
//!         tileroute::OffsetPoint::new(0.051, 0.022),
//!         tileroute::Algorithm::AStar,
//!         &tileroute::CancelToken::new(),
//!     )
//!     .expect("failed to find route");
//!
//! println!("Route: {:?}", route.edges());
//! ```

mod distance;
mod error;
mod graph;
mod grid;
mod loader;
mod map;
mod options;
mod route;

pub mod dataset;
pub mod search;

pub use distance::{
    degrees_to_meters, meters_to_degrees, offset_distance, straight_line_meters,
    METERS_PER_DEGREE,
};
pub use error::{Error, Result};
pub use graph::Graph;
pub use grid::{SpatialGrid, TileCoord};
pub use loader::GraphBuilder;
pub use map::{LoadState, RoadMap};
pub use options::{GeoOrigin, MapOptions};
pub use route::{find_shortest_path, trace_route, Algorithm};
pub use search::{CancelToken, Route, SearchError, SearchOutcome};

/// Position on the map, as an offset in degrees from the top-left corner of the map area.
///
/// `lon` grows eastwards and `lat` grows southwards, so that both are
/// non-negative for every point inside the map.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OffsetPoint {
    pub lon: f64,
    pub lat: f64,
}

impl OffsetPoint {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Represents an element of the [Graph].
///
/// Nodes are addressed by their index in the graph; `source_id`
/// is only kept to relate the node back to the persisted dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub source_id: i64,
    pub position: OffsetPoint,

    /// Indices of all [GraphEdges](GraphEdge) leaving this node.
    pub out_edges: Vec<usize>,
}

/// Represents an outgoing (one-way) connection from a specific [GraphNode].
///
/// A single persisted road segment produces up to two edges: a primary one
/// following the segment's own direction, and a reverse one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphEdge {
    /// Identifier of the persisted road segment, used to recover its geometry.
    pub source_id: i64,

    /// Index of the node this edge leads to.
    pub to: usize,

    /// Length of the segment in meters, truncated.
    pub weight: u32,

    pub is_primary: bool,
}
