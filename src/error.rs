// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::search::SearchError;
use crate::TileCoord;

/// Convenient result alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error conditions which may occur while loading or querying a road map.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// An edge refers to a node absent from the dataset. The dataset is inconsistent
    /// and can't be loaded.
    #[error("edge {edge_id} references unknown node {node_id}")]
    MissingNode { edge_id: i64, node_id: i64 },

    #[error("node {node_id} has an invalid tile key: {key:?}")]
    InvalidTileKey { node_id: i64, key: String },

    #[error("edge {edge_id} has an invalid length: {length}")]
    InvalidEdgeLength { edge_id: i64, length: f64 },

    #[error("invalid path descriptor: {0}")]
    InvalidPathDescriptor(String),

    #[error("edge {edge_id} has malformed geometry")]
    InvalidGeometry { edge_id: i64 },

    /// A node lies outside of the tile named by its key, which happens
    /// when a dataset is loaded with a different tile size than it was built with.
    #[error("node {node_id} lies outside of its tile {tile}")]
    TileMismatch { node_id: i64, tile: TileCoord },

    #[error("tile size must be a positive number of degrees, got {0}")]
    InvalidTileSize(f64),

    /// No nodes were indexed in (or around) the tile of a query point.
    #[error("no roads near tile ({row}, {col})")]
    EmptyTile { row: i64, col: i64 },

    #[error("query point ({lon}, {lat}) is not finite")]
    InvalidPoint { lon: f64, lat: f64 },

    #[error("graph has no nodes")]
    EmptyGraph,

    #[error("map data is not loaded")]
    NotLoaded,

    #[error("map data is still loading")]
    LoadInProgress,

    #[error(transparent)]
    Search(#[from] SearchError),
}
