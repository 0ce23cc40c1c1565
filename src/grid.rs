// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{offset_distance, Error, GraphNode, OffsetPoint, Result};

/// Grid position of a map tile. Row 0, column 0 is the top-left tile.
///
/// Coordinates are signed, as query points may lie outside of the map area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub row: i64,
    pub col: i64,
}

impl TileCoord {
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// Returns the tile containing the provided position. Both offsets are divided
    /// by `tile_size` and truncated toward zero.
    pub fn of(p: OffsetPoint, tile_size: f64) -> Self {
        Self {
            row: (p.lat / tile_size).trunc() as i64,
            col: (p.lon / tile_size).trunc() as i64,
        }
    }

    /// Checks whether `p` lies in this tile, allowing for rounding at tile edges.
    ///
    /// Tiles in row or column 0 also cover small negative offsets,
    /// as [TileCoord::of] truncates toward zero.
    pub fn contains(&self, p: OffsetPoint, tile_size: f64) -> bool {
        let slack = tile_size * 1e-6;
        let within = |offset: f64, index: i64| {
            let start = if index == 0 {
                -tile_size
            } else {
                index as f64 * tile_size
            };
            offset >= start - slack && offset < (index + 1) as f64 * tile_size + slack
        };
        within(p.lat, self.row) && within(p.lon, self.col)
    }

    /// Parses a `"row,col"` composite tile key.
    pub fn parse_key(key: &str) -> Option<Self> {
        let (row, col) = key.split_once(',')?;
        Some(Self {
            row: row.trim().parse().ok()?,
            col: col.trim().parse().ok()?,
        })
    }

    fn as_indices(&self) -> Option<(usize, usize)> {
        Some((usize::try_from(self.row).ok()?, usize::try_from(self.col).ok()?))
    }
}

impl std::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// SpatialGrid buckets node indices by the map tile they fall in,
/// which narrows nearest-node lookups down to a handful of candidates.
///
/// The structure is jagged: each row only grows as far as its rightmost
/// non-empty tile.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SpatialGrid {
    rows: Vec<Vec<Vec<usize>>>,
    len: usize,
}

impl SpatialGrid {
    /// Returns the number of indexed nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds a node index to the bucket of the provided tile, growing the grid as needed.
    ///
    /// Returns `false` (and does nothing) for tiles with negative coordinates.
    pub fn insert(&mut self, tile: TileCoord, node_index: usize) -> bool {
        let Some((row, col)) = tile.as_indices() else {
            return false;
        };

        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::default);
        }
        let cols = &mut self.rows[row];
        if cols.len() <= col {
            cols.resize_with(col + 1, Vec::default);
        }

        cols[col].push(node_index);
        self.len += 1;
        true
    }

    /// Returns node indices bucketed into the provided tile, in insertion order.
    pub fn bucket(&self, tile: TileCoord) -> &[usize] {
        tile.as_indices()
            .and_then(|(row, col)| self.rows.get(row)?.get(col))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Finds the node closest to `p` among the nodes bucketed into `tile`.
    ///
    /// Neighboring tiles are never examined, so a node just across a tile boundary
    /// may be closer than the returned one. Ties are resolved in favor of the
    /// node inserted first. Fails with [Error::EmptyTile] if the tile has no nodes.
    pub fn find_nearest_node(
        &self,
        nodes: &[GraphNode],
        tile: TileCoord,
        p: OffsetPoint,
    ) -> Result<usize> {
        self.find_nearest_node_around(nodes, tile, p, 0)
    }

    /// Finds the node closest to `p` among nodes bucketed into `tile` and the
    /// `radius` rings of tiles around it (`radius = 1` scans a 3×3 neighborhood).
    ///
    /// The home tile is scanned first, so ties favor it over its neighbors.
    /// Fails with [Error::EmptyTile] if all scanned tiles are empty.
    pub fn find_nearest_node_around(
        &self,
        nodes: &[GraphNode],
        tile: TileCoord,
        p: OffsetPoint,
        radius: u32,
    ) -> Result<usize> {
        // Tiles beyond the grid are empty, so the scan is clamped to its extent.
        let r = i64::from(radius);
        let last_row = self.rows.len() as i64 - 1;
        let rows = tile.row.saturating_sub(r).max(0)..=tile.row.saturating_add(r).min(last_row);
        let neighbors = rows
            .flat_map(move |row| {
                let last_col = self.rows.get(row as usize).map_or(0, Vec::len) as i64 - 1;
                (tile.col.saturating_sub(r).max(0)..=tile.col.saturating_add(r).min(last_col))
                    .map(move |col| TileCoord::new(row, col))
            })
            .filter(|&t| t != tile);

        let mut best: Option<(usize, f64)> = None;
        for t in std::iter::once(tile).chain(neighbors) {
            for (idx, node) in self
                .bucket(t)
                .iter()
                .filter_map(|&idx| Some((idx, nodes.get(idx)?)))
            {
                let dist = offset_distance(p, node.position);
                if best.map_or(true, |(_, best_dist)| dist < best_dist) {
                    best = Some((idx, dist));
                }
            }
        }

        best.map(|(idx, _)| idx).ok_or(Error::EmptyTile {
            row: tile.row,
            col: tile.col,
        })
    }
}
