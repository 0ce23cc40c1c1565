// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::hash_map::Entry;

use log::{debug, info, warn};

use crate::dataset::{Dataset, EdgeRecord, NodeRecord};
use crate::{Error, Graph, GraphEdge, GraphNode, MapOptions, Result, TileCoord};

/// Helper object used for converting persisted [records](crate::dataset) into a [Graph].
///
/// All nodes must be added before any edge referencing them.
#[derive(Debug)]
pub struct GraphBuilder {
    g: Graph,
    tile_size: f64,
    restricted_segments: usize,
}

impl GraphBuilder {
    /// Create a new, empty graph builder for nodes bucketed with the provided options.
    pub fn new(options: &MapOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            g: Graph::default(),
            tile_size: options.tile_size,
            restricted_segments: 0,
        })
    }

    /// Reads all nodes, then all edges from the provided [Dataset] and builds a [Graph].
    pub fn build<D: Dataset + ?Sized>(dataset: &D, options: &MapOptions) -> Result<Graph> {
        let mut builder = Self::new(options)?;
        dataset.visit_nodes(&mut |n| builder.add_node(n))?;
        dataset.visit_edges(&mut |e| builder.add_edge(e))?;
        Ok(builder.finish())
    }

    /// Adds a node, indexing it in the tile named by its tile key.
    ///
    /// Fails with [Error::TileMismatch] if the node's position doesn't fall
    /// into that tile for the builder's tile size.
    pub fn add_node(&mut self, n: NodeRecord) -> Result<()> {
        let tile = TileCoord::parse_key(&n.tile_key)
            .filter(|t| t.row >= 0 && t.col >= 0)
            .ok_or_else(|| Error::InvalidTileKey {
                node_id: n.id,
                key: n.tile_key.clone(),
            })?;
        if !tile.contains(n.position(), self.tile_size) {
            return Err(Error::TileMismatch {
                node_id: n.id,
                tile,
            });
        }

        let index = self.g.nodes.len();
        match self.g.node_ids.entry(n.id) {
            Entry::Occupied(_) => {
                warn!("duplicate node {} - keeping the first occurrence", n.id);
                return Ok(());
            }
            Entry::Vacant(e) => {
                e.insert(index);
            }
        }

        self.g.nodes.push(GraphNode {
            source_id: n.id,
            position: n.position(),
            out_edges: Vec::default(),
        });
        self.g.grid.insert(tile, index);
        Ok(())
    }

    /// Adds up to two directed edges for a persisted road segment, one for each
    /// direction in which car travel isn't forbidden.
    ///
    /// Fails with [Error::MissingNode] if either endpoint wasn't added before.
    pub fn add_edge(&mut self, e: EdgeRecord) -> Result<()> {
        let weight = Self::edge_weight(&e)?;
        let source = self.resolve(e.id, e.source_node_id)?;
        let target = self.resolve(e.id, e.target_node_id)?;

        let forward = e.car_forward.allows_travel();
        let backward = e.car_backward.allows_travel();

        if forward {
            self.push_edge(source, target, e.id, weight, true);
        }
        if backward {
            self.push_edge(target, source, e.id, weight, false);
        }
        if !forward && !backward {
            debug!("edge {} is closed to cars in both directions", e.id);
            self.restricted_segments += 1;
        }
        Ok(())
    }

    /// Returns the built [Graph].
    pub fn finish(self) -> Graph {
        info!(
            "built graph with {} nodes and {} edges ({} segments closed to cars)",
            self.g.nodes.len(),
            self.g.edges.len(),
            self.restricted_segments,
        );
        self.g
    }

    /// Converts the segment length into a weight. Lengths are truncated to whole meters.
    fn edge_weight(e: &EdgeRecord) -> Result<u32> {
        let length = e.path_length_meters;
        if length.is_finite() && length >= 0.0 && length <= u32::MAX as f64 {
            Ok(length.trunc() as u32)
        } else {
            Err(Error::InvalidEdgeLength {
                edge_id: e.id,
                length,
            })
        }
    }

    fn resolve(&self, edge_id: i64, node_id: i64) -> Result<usize> {
        self.g
            .node_index(node_id)
            .ok_or(Error::MissingNode { edge_id, node_id })
    }

    fn push_edge(&mut self, from: usize, to: usize, source_id: i64, weight: u32, is_primary: bool) {
        let index = self.g.edges.len();
        self.g.edges.push(GraphEdge {
            source_id,
            to,
            weight,
            is_primary,
        });
        self.g.nodes[from].out_edges.push(index);
    }
}
