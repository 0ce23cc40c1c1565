// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::{GraphEdge, GraphNode, OffsetPoint, Result, SpatialGrid, TileCoord};

/// Represents a road network as a set of [Nodes](GraphNode)
/// and directed [Edges](GraphEdge) between them.
///
/// Nodes and edges are stored in contiguous arrays and addressed by index.
/// A graph is built once by a [GraphBuilder](crate::GraphBuilder) and is
/// immutable afterwards, so it can be shared between threads running searches.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Graph {
    pub(crate) nodes: Vec<GraphNode>,
    pub(crate) edges: Vec<GraphEdge>,
    pub(crate) node_ids: HashMap<i64, usize>,
    pub(crate) grid: SpatialGrid,
}

impl Graph {
    /// Returns the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of directed edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns an iterator over all [Nodes](GraphNode) in the graph, in index order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter()
    }

    /// Returns an iterator over all [Edges](GraphEdge) in the graph, in index order.
    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter()
    }

    /// Retrieves a [GraphNode] by its index.
    pub fn get_node(&self, index: usize) -> Option<&GraphNode> {
        self.nodes.get(index)
    }

    /// Retrieves a [GraphEdge] by its index.
    pub fn get_edge(&self, index: usize) -> Option<&GraphEdge> {
        self.edges.get(index)
    }

    /// Gets the indices of all edges leaving the node at `index`.
    pub fn out_edges(&self, index: usize) -> &[usize] {
        self.nodes
            .get(index)
            .map(|n| n.out_edges.as_slice())
            .unwrap_or_default()
    }

    /// Finds the index of the node the edge at `index` leaves from.
    /// Edges only store their target, so this scans all nodes.
    pub fn edge_source(&self, index: usize) -> Option<usize> {
        self.nodes.iter().position(|n| n.out_edges.contains(&index))
    }

    /// Resolves a persisted node identifier to its index in the graph.
    pub fn node_index(&self, source_id: i64) -> Option<usize> {
        self.node_ids.get(&source_id).copied()
    }

    /// Returns the [SpatialGrid] indexing all nodes by their tile.
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Finds the node closest to `p` among nodes in `tile`.
    /// See [SpatialGrid::find_nearest_node].
    pub fn find_nearest_node(&self, tile: TileCoord, p: OffsetPoint) -> Result<usize> {
        self.grid.find_nearest_node(&self.nodes, tile, p)
    }

    /// Finds the node closest to `p` among nodes in and around `tile`.
    /// See [SpatialGrid::find_nearest_node_around].
    pub fn find_nearest_node_around(
        &self,
        tile: TileCoord,
        p: OffsetPoint,
        radius: u32,
    ) -> Result<usize> {
        self.grid.find_nearest_node_around(&self.nodes, tile, p, radius)
    }

    /// Sums the weights of the edges at the provided indices.
    /// Unknown indices are ignored.
    pub fn path_weight(&self, edges: &[usize]) -> u64 {
        edges
            .iter()
            .filter_map(|&e| self.edges.get(e))
            .map(|e| e.weight as u64)
            .sum()
    }
}
