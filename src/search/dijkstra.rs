// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::{frontier, CancelToken, SearchError, SearchOutcome};
use crate::Graph;

/// Uses [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
/// to find the shortest route between two nodes in the provided graph.
///
/// Nodes are expanded in order of their distance from `from`, and the search
/// stops as soon as `to` is taken off the frontier.
///
/// Returns [SearchOutcome::Unreachable] after expanding every node reachable from `from`
/// if there's no route, and a route without any edges if `from == to`.
pub fn dijkstra(
    g: &Graph,
    from: usize,
    to: usize,
    cancel: &CancelToken,
) -> Result<SearchOutcome, SearchError> {
    frontier::search(g, from, to, cancel, |_| 0.0)
}
