// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Error conditions which may occur during [dijkstra](crate::search::dijkstra) or
/// [astar](crate::search::astar).
///
/// Not finding a route is not an error, see [SearchOutcome](crate::SearchOutcome).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The start or end node index doesn't exist in a graph.
    InvalidReference(usize),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidReference(index) => write!(f, "invalid node index: {}", index),
        }
    }
}

impl std::error::Error for SearchError {}
