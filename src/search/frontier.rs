// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::BinaryHeap;

use log::debug;

use super::{CancelToken, Route, SearchError, SearchOutcome};
use crate::Graph;

#[derive(Debug, Clone, Copy)]
struct QueueItem {
    at: usize,
    cost: u64,
    score: f64,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // NOTE: We revert the order of comparison,
        // as lower scores (and lower node indices on ties) are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.at.cmp(&self.at))
    }
}

/// Predecessor of a reached node: the node it was reached from, and through which edge.
type CameFrom = Option<(usize, usize)>;

fn reconstruct_path(came_from: &[CameFrom], mut last: usize) -> Vec<usize> {
    let mut path = Vec::default();

    while let Some((before, edge)) = came_from[last] {
        path.push(edge);
        last = before;
    }

    path.reverse();
    path
}

/// Label-correcting shortest path search shared by Dijkstra and A*.
///
/// The frontier is ordered by `cost + heuristic(node)`, but nodes are relaxed
/// by `cost` alone, so a zero heuristic gives plain Dijkstra. The first time
/// `to` is popped its cost is final, provided the heuristic never overestimates
/// the remaining distance.
pub(super) fn search<H: Fn(usize) -> f64>(
    g: &Graph,
    from: usize,
    to: usize,
    cancel: &CancelToken,
    heuristic: H,
) -> Result<SearchOutcome, SearchError> {
    if from >= g.node_count() {
        return Err(SearchError::InvalidReference(from));
    }
    if to >= g.node_count() {
        return Err(SearchError::InvalidReference(to));
    }
    if from == to {
        return Ok(SearchOutcome::Found(Route::default()));
    }

    let mut queue: BinaryHeap<QueueItem> = BinaryHeap::default();
    let mut came_from: Vec<CameFrom> = vec![None; g.node_count()];
    let mut known_costs: Vec<u64> = vec![u64::MAX; g.node_count()];
    let mut expanded: usize = 0;

    queue.push(QueueItem {
        at: from,
        cost: 0,
        score: heuristic(from),
    });
    known_costs[from] = 0;

    while let Some(item) = queue.pop() {
        if cancel.is_cancelled() {
            debug!("search {} -> {} cancelled after {} expansions", from, to, expanded);
            return Ok(SearchOutcome::Cancelled);
        }

        if item.at == to {
            return Ok(SearchOutcome::Found(Route {
                edges: reconstruct_path(&came_from, to),
                weight: item.cost,
            }));
        }

        // The queue may hold multiple items for the same node; only the cheapest one is expanded.
        if item.cost > known_costs[item.at] {
            continue;
        }
        expanded += 1;

        for &edge_index in g.out_edges(item.at) {
            let Some(edge) = g.get_edge(edge_index) else {
                continue;
            };

            // Check if this is the cheapest way to the neighbor
            let neighbor_cost = item.cost + edge.weight as u64;
            if neighbor_cost >= known_costs[edge.to] {
                continue;
            }

            // Push the new item into the queue
            came_from[edge.to] = Some((item.at, edge_index));
            known_costs[edge.to] = neighbor_cost;
            queue.push(QueueItem {
                at: edge.to,
                cost: neighbor_cost,
                score: neighbor_cost as f64 + heuristic(edge.to),
            });
        }
    }

    debug!("no route {} -> {} after {} expansions", from, to, expanded);
    Ok(SearchOutcome::Unreachable)
}
