// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Shortest path search over a [Graph](crate::Graph).
//!
//! Both algorithms only read the graph and keep all of their state locally,
//! so any number of searches may run concurrently over a shared graph.

mod astar;
mod cancel;
mod dijkstra;
mod error;
mod frontier;
mod outcome;

pub use astar::astar;
pub use cancel::CancelToken;
pub use dijkstra::dijkstra;
pub use error::SearchError;
pub use outcome::{Route, SearchOutcome};

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::dataset::{EdgeRecord, MemoryDataset, NodeRecord, PathDescriptor};
    use crate::{straight_line_meters, Graph, GraphBuilder, MapOptions, OffsetPoint};

    pub const TILE: f64 = 0.01;
    pub const ISLAND_NODE_ID: i64 = 10_000;

    fn node(id: i64, lon: f64, lat: f64) -> NodeRecord {
        NodeRecord::at(id, OffsetPoint::new(lon, lat), TILE)
    }

    fn one_way(id: i64, from: i64, to: i64, length: f64) -> EdgeRecord {
        EdgeRecord {
            id,
            source_node_id: from,
            target_node_id: to,
            path_length_meters: length,
            car_forward: PathDescriptor::Allowed,
            car_backward: PathDescriptor::Forbidden,
        }
    }

    fn two_way(id: i64, from: i64, to: i64, length: f64) -> EdgeRecord {
        EdgeRecord {
            car_backward: PathDescriptor::Residential,
            ..one_way(id, from, to, length)
        }
    }

    /// A -10-> B -10-> C, A -30-> C, and an isolated D.
    pub fn scenario_dataset() -> MemoryDataset {
        let mut ds = MemoryDataset::default();
        ds.push_node(node(1, 0.0, 0.0))
            .push_node(node(2, 0.00005, 0.0))
            .push_node(node(3, 0.0001, 0.0))
            .push_node(node(4, 0.0002, 0.0002))
            .push_edge(one_way(100, 1, 2, 10.0))
            .push_edge(one_way(101, 2, 3, 10.0))
            .push_edge(one_way(102, 1, 3, 30.0));
        ds
    }

    pub fn scenario_graph() -> Graph {
        GraphBuilder::build(&scenario_dataset(), &MapOptions::new(TILE)).unwrap()
    }

    pub fn scenario_nodes(g: &Graph) -> (usize, usize, usize, usize) {
        (
            g.node_index(1).unwrap(),
            g.node_index(2).unwrap(),
            g.node_index(3).unwrap(),
            g.node_index(4).unwrap(),
        )
    }

    /// Builds an `n`×`n` lattice of two-way roads with uneven lengths and some
    /// one-way diagonal shortcuts, plus a two-node island in another tile.
    ///
    /// Lattice node `(row, col)` has index `row * n + col`. Every segment is at least
    /// as long as the straight line between its nodes.
    pub fn lattice_graph(n: usize) -> Graph {
        const SPACING: f64 = 0.001;

        let mut ds = MemoryDataset::default();
        let id = |row: usize, col: usize| (row * n + col) as i64 + 1;
        let pos = |row: usize, col: usize| OffsetPoint::new(col as f64 * SPACING, row as f64 * SPACING);
        let length = |a: OffsetPoint, b: OffsetPoint, factor: f64| straight_line_meters(a, b) * factor + 1.0;

        for row in 0..n {
            for col in 0..n {
                let p = pos(row, col);
                ds.push_node(node(id(row, col), p.lon, p.lat));
            }
        }

        let mut edge_id = 0;
        for row in 0..n {
            for col in 0..n {
                let factor = 1.0 + ((row * 7 + col * 3) % 5) as f64 / 10.0;

                if col + 1 < n {
                    edge_id += 1;
                    let len = length(pos(row, col), pos(row, col + 1), factor);
                    ds.push_edge(two_way(edge_id, id(row, col), id(row, col + 1), len));
                }
                if row + 1 < n {
                    edge_id += 1;
                    let len = length(pos(row, col), pos(row + 1, col), 2.5 - factor);
                    ds.push_edge(two_way(edge_id, id(row, col), id(row + 1, col), len));
                }
                if row + 1 < n && col + 1 < n && (row + col) % 3 == 0 {
                    edge_id += 1;
                    let len = length(pos(row, col), pos(row + 1, col + 1), 1.05);
                    ds.push_edge(one_way(edge_id, id(row, col), id(row + 1, col + 1), len));
                }
            }
        }

        ds.push_node(node(ISLAND_NODE_ID, 0.02, 0.02))
            .push_node(node(ISLAND_NODE_ID + 1, 0.021, 0.02))
            .push_edge(two_way(edge_id + 1, ISLAND_NODE_ID, ISLAND_NODE_ID + 1, 120.0));

        GraphBuilder::build(&ds, &MapOptions::new(TILE)).unwrap()
    }

    /// Asserts that `edges` form a connected walk from `from` to `to`.
    pub fn assert_valid_walk(g: &Graph, from: usize, to: usize, edges: &[usize]) {
        let mut at = from;
        for &e in edges {
            assert!(
                g.out_edges(at).contains(&e),
                "edge {e} doesn't leave node {at}"
            );
            at = g.get_edge(e).unwrap().to;
        }
        assert_eq!(at, to, "walk ends at {at}, expected {to}");
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn concurrent_searches_share_graph() {
        let g = lattice_graph(6);

        let results: Vec<(u64, u64)> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let g = &g;
                    s.spawn(move || {
                        let token = CancelToken::new();
                        let d = dijkstra(g, i, 35 - i, &token).unwrap();
                        let a = astar(g, i, 35 - i, &token).unwrap();
                        (d.route().unwrap().weight, a.route().unwrap().weight)
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for (d, a) in results {
            assert_eq!(d, a);
        }
    }
}
