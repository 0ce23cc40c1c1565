// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use super::{Dataset, EdgeRecord, NodeRecord};
use crate::{OffsetPoint, Result};

/// [Dataset] keeping all records in memory.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemoryDataset {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
    pub geometries: HashMap<i64, Vec<OffsetPoint>>,
}

impl MemoryDataset {
    pub fn push_node(&mut self, node: NodeRecord) -> &mut Self {
        self.nodes.push(node);
        self
    }

    pub fn push_edge(&mut self, edge: EdgeRecord) -> &mut Self {
        self.edges.push(edge);
        self
    }

    /// Attaches geometry to an edge. Edges without explicit geometry
    /// are traced as a straight line between their nodes.
    pub fn set_geometry(&mut self, edge_id: i64, points: Vec<OffsetPoint>) -> &mut Self {
        self.geometries.insert(edge_id, points);
        self
    }

    fn node_position(&self, id: i64) -> Option<OffsetPoint> {
        self.nodes.iter().find(|n| n.id == id).map(NodeRecord::position)
    }
}

impl Dataset for MemoryDataset {
    fn visit_nodes(&self, visit: &mut dyn FnMut(NodeRecord) -> Result<()>) -> Result<()> {
        self.nodes.iter().cloned().try_for_each(visit)
    }

    fn visit_edges(&self, visit: &mut dyn FnMut(EdgeRecord) -> Result<()>) -> Result<()> {
        self.edges.iter().cloned().try_for_each(visit)
    }

    fn edge_geometry(&self, edge_id: i64) -> Result<Option<Vec<OffsetPoint>>> {
        if let Some(points) = self.geometries.get(&edge_id) {
            return Ok(Some(points.clone()));
        }

        Ok(self
            .edges
            .iter()
            .find(|e| e.id == edge_id)
            .and_then(|e| {
                Some(vec![
                    self.node_position(e.source_node_id)?,
                    self.node_position(e.target_node_id)?,
                ])
            }))
    }
}
