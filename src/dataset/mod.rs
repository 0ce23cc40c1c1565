// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Access to persisted road network data.
//!
//! The [GraphBuilder](crate::GraphBuilder) only needs to iterate over node
//! and edge records, in any order; the physical format is up to the [Dataset]
//! implementation. [SqliteDataset] reads the map database, while
//! [MemoryDataset] keeps records in memory.

mod memory;
mod model;
mod sqlite;

pub use memory::MemoryDataset;
pub use model::{EdgeRecord, NodeRecord, PathDescriptor};
pub use sqlite::SqliteDataset;

use crate::{OffsetPoint, Result};

/// Source of persisted node and edge records.
///
/// Visitors may abort the iteration by returning an error,
/// which must be passed back to the caller unchanged.
pub trait Dataset {
    /// Calls `visit` with every node record.
    fn visit_nodes(&self, visit: &mut dyn FnMut(NodeRecord) -> Result<()>) -> Result<()>;

    /// Calls `visit` with every edge record.
    fn visit_edges(&self, visit: &mut dyn FnMut(EdgeRecord) -> Result<()>) -> Result<()>;

    /// Returns the geometry of an edge, from its source to its target node,
    /// or `None` if the edge is unknown.
    fn edge_geometry(&self, edge_id: i64) -> Result<Option<Vec<OffsetPoint>>>;
}
