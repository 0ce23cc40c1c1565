// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::str::FromStr;

use log::debug;

use crate::dataset::Dataset;
use crate::search::{astar, dijkstra};
use crate::{
    CancelToken, Error, Graph, MapOptions, OffsetPoint, Result, SearchOutcome, TileCoord,
};

/// Shortest path algorithm used to answer a route request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    #[default]
    Dijkstra,
    AStar,
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dijkstra => write!(f, "dijkstra"),
            Self::AStar => write!(f, "astar"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(Self::Dijkstra),
            "astar" | "a*" => Ok(Self::AStar),
            _ => Err(format!("unknown algorithm: {s} (expected dijkstra or astar)")),
        }
    }
}

/// Finds the shortest route between the nodes closest to `origin` and `destination`.
///
/// Each point is resolved to the nearest node in its tile (and in
/// [MapOptions::search_radius] rings of tiles around it), then the
/// selected [Algorithm] runs between the two nodes.
///
/// Fails with [Error::EmptyGraph] if the graph has no nodes at all, with
/// [Error::InvalidPoint] for NaN or infinite coordinates, and with
/// [Error::EmptyTile] if there are no nodes around one of the points.
/// Not finding a route is not an error, but [SearchOutcome::Unreachable].
pub fn find_shortest_path(
    g: &Graph,
    options: &MapOptions,
    origin: OffsetPoint,
    destination: OffsetPoint,
    algorithm: Algorithm,
    cancel: &CancelToken,
) -> Result<SearchOutcome> {
    if g.is_empty() {
        return Err(Error::EmptyGraph);
    }

    let from = resolve_node(g, options, origin)?;
    let to = resolve_node(g, options, destination)?;
    debug!("running {} from node {} to node {}", algorithm, from, to);

    let outcome = match algorithm {
        Algorithm::Dijkstra => dijkstra(g, from, to, cancel)?,
        Algorithm::AStar => astar(g, from, to, cancel)?,
    };
    Ok(outcome)
}

fn resolve_node(g: &Graph, options: &MapOptions, p: OffsetPoint) -> Result<usize> {
    options.validate()?;
    if !p.lon.is_finite() || !p.lat.is_finite() {
        return Err(Error::InvalidPoint {
            lon: p.lon,
            lat: p.lat,
        });
    }
    let tile = TileCoord::of(p, options.tile_size);
    g.find_nearest_node_around(tile, p, options.search_radius)
}

/// Joins the geometries of the provided edges into a single polyline.
///
/// Geometry of non-primary edges is reversed, as it's persisted in the
/// direction of the underlying road segment. Edges with missing or empty
/// geometry are traced as a straight line between their nodes, and unknown
/// edge indices are skipped.
pub fn trace_route<D: Dataset + ?Sized>(
    g: &Graph,
    dataset: &D,
    edges: &[usize],
) -> Result<Vec<OffsetPoint>> {
    let mut points = Vec::default();
    let mut at: Option<usize> = None;

    for &edge_index in edges {
        let Some(edge) = g.get_edge(edge_index) else {
            continue;
        };

        let mut segment = match dataset.edge_geometry(edge.source_id)? {
            Some(mut segment) if !segment.is_empty() => {
                if !edge.is_primary {
                    segment.reverse();
                }
                segment
            }
            _ => {
                let from = at.or_else(|| g.edge_source(edge_index));
                from.into_iter()
                    .chain(std::iter::once(edge.to))
                    .filter_map(|idx| g.get_node(idx))
                    .map(|n| n.position)
                    .collect()
            }
        };

        // Consecutive segments share their joining point
        if points.last().is_some() && points.last() == segment.first() {
            segment.remove(0);
        }
        points.extend(segment);
        at = Some(edge.to);
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{EdgeRecord, MemoryDataset, NodeRecord, PathDescriptor};
    use crate::search::fixtures::*;
    use crate::GraphBuilder;

    #[test]
    fn algorithm_names() {
        assert_eq!("dijkstra".parse::<Algorithm>().unwrap(), Algorithm::Dijkstra);
        assert_eq!("AStar".parse::<Algorithm>().unwrap(), Algorithm::AStar);
        assert_eq!("a*".parse::<Algorithm>().unwrap(), Algorithm::AStar);
        assert!("bfs".parse::<Algorithm>().is_err());
        assert_eq!(Algorithm::AStar.to_string(), "astar");
    }

    #[test]
    fn resolves_points_and_routes() {
        let g = scenario_graph();
        let (a, _, c, _) = scenario_nodes(&g);
        let options = MapOptions::new(TILE);

        for algorithm in [Algorithm::Dijkstra, Algorithm::AStar] {
            let outcome = find_shortest_path(
                &g,
                &options,
                OffsetPoint::new(-0.000001, 0.000001),
                OffsetPoint::new(0.00012, 0.00001),
                algorithm,
                &CancelToken::new(),
            )
            .unwrap();

            let route = outcome.route().unwrap();
            assert_eq!(route.weight, 20);
            assert_valid_walk(&g, a, c, &route.edges);
        }
    }

    #[test]
    fn unreachable_destination_is_not_an_error() {
        let g = scenario_graph();
        let outcome = find_shortest_path(
            &g,
            &MapOptions::new(TILE),
            OffsetPoint::new(0.0, 0.0),
            OffsetPoint::new(0.0002, 0.0002),
            Algorithm::Dijkstra,
            &CancelToken::new(),
        )
        .unwrap();
        assert_eq!(outcome, SearchOutcome::Unreachable);
    }

    #[test]
    fn empty_tile_and_empty_graph() {
        let g = scenario_graph();
        let err = find_shortest_path(
            &g,
            &MapOptions::new(TILE),
            OffsetPoint::new(0.0, 0.0),
            OffsetPoint::new(0.055, 0.031),
            Algorithm::AStar,
            &CancelToken::new(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::EmptyTile { row: 3, col: 5 }));

        let err = find_shortest_path(
            &Graph::default(),
            &MapOptions::new(TILE),
            OffsetPoint::new(0.0, 0.0),
            OffsetPoint::new(0.0, 0.0),
            Algorithm::AStar,
            &CancelToken::new(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::EmptyGraph));
    }

    #[test]
    fn search_radius_reaches_neighboring_tiles() {
        let g = scenario_graph();
        let (a, _, _, _) = scenario_nodes(&g);
        // Just north of the map area, right above C.
        let p = OffsetPoint::new(0.0001, -0.0105);

        let narrow = find_shortest_path(
            &g,
            &MapOptions::new(TILE),
            p,
            p,
            Algorithm::Dijkstra,
            &CancelToken::new(),
        );
        assert!(matches!(narrow, Err(Error::EmptyTile { row: -1, col: 0 })));

        let wide = find_shortest_path(
            &g,
            &MapOptions::new(TILE).with_search_radius(1),
            OffsetPoint::new(0.0, 0.0),
            p,
            Algorithm::Dijkstra,
            &CancelToken::new(),
        )
        .unwrap();
        // The closest node to `p` is C, reached from A over B.
        assert_eq!(wide.route().unwrap().weight, 20);
        assert!(g.out_edges(a).contains(&wide.edges()[0]));
    }

    #[test]
    fn trace_reverses_secondary_edges() {
        let mut ds = MemoryDataset::default();
        ds.push_node(NodeRecord::at(1, OffsetPoint::new(0.0, 0.0), TILE))
            .push_node(NodeRecord::at(2, OffsetPoint::new(0.002, 0.0), TILE))
            .push_node(NodeRecord::at(3, OffsetPoint::new(0.002, 0.002), TILE))
            .push_edge(EdgeRecord {
                id: 1,
                source_node_id: 1,
                target_node_id: 2,
                path_length_meters: 250.0,
                car_forward: PathDescriptor::Residential,
                car_backward: PathDescriptor::Residential,
            })
            .push_edge(EdgeRecord {
                id: 2,
                source_node_id: 3,
                target_node_id: 2,
                path_length_meters: 250.0,
                car_forward: PathDescriptor::Forbidden,
                car_backward: PathDescriptor::Residential,
            })
            .set_geometry(
                1,
                vec![
                    OffsetPoint::new(0.0, 0.0),
                    OffsetPoint::new(0.001, 0.0001),
                    OffsetPoint::new(0.002, 0.0),
                ],
            );

        let g = GraphBuilder::build(&ds, &MapOptions::new(TILE)).unwrap();
        let outcome = find_shortest_path(
            &g,
            &MapOptions::new(TILE),
            OffsetPoint::new(0.0, 0.0),
            OffsetPoint::new(0.002, 0.002),
            Algorithm::AStar,
            &CancelToken::new(),
        )
        .unwrap();

        let edges = outcome.edges();
        assert_eq!(edges.len(), 2);
        assert!(g.get_edge(edges[0]).unwrap().is_primary);
        assert!(!g.get_edge(edges[1]).unwrap().is_primary);

        let points = trace_route(&g, &ds, edges).unwrap();
        assert_eq!(
            points,
            vec![
                OffsetPoint::new(0.0, 0.0),
                OffsetPoint::new(0.001, 0.0001),
                OffsetPoint::new(0.002, 0.0),
                OffsetPoint::new(0.002, 0.002),
            ]
        );
    }

    fn straight_pair() -> MemoryDataset {
        let mut ds = MemoryDataset::default();
        ds.push_node(NodeRecord::at(1, OffsetPoint::new(0.0, 0.0), TILE))
            .push_node(NodeRecord::at(2, OffsetPoint::new(0.002, 0.0), TILE))
            .push_node(NodeRecord::at(3, OffsetPoint::new(0.004, 0.0), TILE))
            .push_edge(EdgeRecord {
                id: 1,
                source_node_id: 1,
                target_node_id: 2,
                path_length_meters: 230.0,
                car_forward: PathDescriptor::Residential,
                car_backward: PathDescriptor::Forbidden,
            })
            .push_edge(EdgeRecord {
                id: 2,
                source_node_id: 3,
                target_node_id: 2,
                path_length_meters: 230.0,
                car_forward: PathDescriptor::Forbidden,
                car_backward: PathDescriptor::Residential,
            });
        ds
    }

    #[test]
    fn trace_without_geometry_uses_nodes() {
        let ds = straight_pair();
        let g = GraphBuilder::build(&ds, &MapOptions::new(TILE)).unwrap();
        let outcome = find_shortest_path(
            &g,
            &MapOptions::new(TILE),
            OffsetPoint::new(0.0, 0.0),
            OffsetPoint::new(0.004, 0.0),
            Algorithm::Dijkstra,
            &CancelToken::new(),
        )
        .unwrap();
        assert_eq!(outcome.edges().len(), 2);

        let expected = vec![
            OffsetPoint::new(0.0, 0.0),
            OffsetPoint::new(0.002, 0.0),
            OffsetPoint::new(0.004, 0.0),
        ];

        // No records at all: every edge geometry is unknown.
        let unknown = MemoryDataset::default();
        assert_eq!(trace_route(&g, &unknown, outcome.edges()).unwrap(), expected);

        // Records with stored, but empty geometry.
        let mut empty = straight_pair();
        empty.set_geometry(1, Vec::default()).set_geometry(2, Vec::default());
        assert_eq!(trace_route(&g, &empty, outcome.edges()).unwrap(), expected);
    }

    #[test]
    fn invalid_points_are_rejected() {
        let g = scenario_graph();
        for p in [
            OffsetPoint::new(f64::NAN, 0.0),
            OffsetPoint::new(0.0, f64::INFINITY),
        ] {
            let err = find_shortest_path(
                &g,
                &MapOptions::new(TILE),
                p,
                OffsetPoint::new(0.0001, 0.0),
                Algorithm::Dijkstra,
                &CancelToken::new(),
            )
            .unwrap_err();
            assert!(matches!(err, Error::InvalidPoint { .. }), "p={p:?}");
        }
    }
}
