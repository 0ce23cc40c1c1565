// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::{frontier, CancelToken, SearchError, SearchOutcome};
use crate::{straight_line_meters, Graph};

/// Uses the [A* algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm)
/// to find the shortest route between two nodes in the provided graph.
///
/// The frontier is ordered by the distance travelled so far plus the
/// straight-line distance to `to`, converted to meters with
/// [METERS_PER_DEGREE](crate::METERS_PER_DEGREE). Relaxation still uses the
/// travelled distance alone, so the result has the same weight as the one
/// returned by [dijkstra](super::dijkstra), as long as no edge is shorter
/// than the straight line between its nodes.
///
/// Returns [SearchOutcome::Unreachable] if there is no route between the two nodes,
/// and a route without any edges if `from == to`.
pub fn astar(
    g: &Graph,
    from: usize,
    to: usize,
    cancel: &CancelToken,
) -> Result<SearchOutcome, SearchError> {
    let goal = g
        .get_node(to)
        .ok_or(SearchError::InvalidReference(to))?
        .position;

    frontier::search(g, from, to, cancel, |idx| {
        g.get_node(idx)
            .map_or(0.0, |n| straight_line_meters(n.position, goal))
    })
}
