// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::BinaryHeap;

use log::debug;

use super::{CostFunction, Edge, Route, RouteError, SingleRoute};
use crate::graph::{Graph, NodeId};

/// Marks nodes which have already been expanded.
const CLOSED: f32 = f32::NEG_INFINITY;

#[derive(Debug, Clone, Copy)]
struct QueueItem {
    node_id: NodeId,
    score: f32,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.score.total_cmp(&other.score).is_eq()
    }
}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for QueueItem {}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // NOTE: The order is reversed, as lower scores are better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other.score.total_cmp(&self.score)
    }
}

/// Finds cheapest routes in a [Graph], weighing edge lengths with a [CostFunction].
///
/// The computer holds no per-search state, so a single instance
/// may answer queries from many threads at once.
#[derive(Debug, Clone)]
pub struct RouteComputer<'g, C> {
    graph: &'g Graph,
    cost_function: C,
}

impl<'g, C: CostFunction> RouteComputer<'g, C> {
    pub fn new(graph: &'g Graph, cost_function: C) -> Self {
        Self {
            graph,
            cost_function,
        }
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn cost_function(&self) -> &C {
        &self.cost_function
    }

    /// Uses the [A* algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm)
    /// to find the cheapest route from `start` to `end`. The cost of an edge is its
    /// length multiplied by its [cost factor](CostFunction::cost_factor).
    ///
    /// Returns `Ok(None)` if `end` can't be reached from `start`.
    ///
    /// The straight-line distance to `end` is used as the heuristic. It never overestimates
    /// the remaining cost only if all cost factors are exactly 1; with larger factors the search
    /// still terminates, but the returned route is not guaranteed to be the cheapest one.
    ///
    /// If a node can be reached from its predecessor through several edges,
    /// the route uses the first of them (in out-edge order).
    pub fn best_route_between(&self, start: NodeId, end: NodeId) -> Result<Option<Route>, RouteError> {
        if start == end {
            return Err(RouteError::SameEndpoints(start));
        }
        for node_id in [start, end] {
            if !self.graph.contains_node(node_id) {
                return Err(RouteError::InvalidReference(node_id));
            }
        }

        let end_point = self.graph.node_point(end);
        let node_count = self.graph.node_count();
        let mut distances = vec![f32::INFINITY; node_count];
        let mut previous = vec![start; node_count];
        let mut queue = BinaryHeap::new();
        let mut expanded: usize = 0;

        distances[start as usize] = 0.0;
        queue.push(QueueItem {
            node_id: start,
            score: self.graph.node_point(start).distance_to(&end_point) as f32,
        });

        while let Some(QueueItem { node_id, .. }) = queue.pop() {
            let distance = distances[node_id as usize];

            // Nodes might be queued multiple times, but are expanded only once.
            if distance == CLOSED {
                continue;
            }

            if node_id == end {
                debug!("route {start} -> {end}: found after expanding {expanded} nodes");
                return Ok(Some(self.reconstruct_route(&previous, start, end)));
            }

            distances[node_id as usize] = CLOSED;
            expanded += 1;

            for edge_id in self.graph.node_out_edges(node_id) {
                let target = self.graph.edge_target_node_id(edge_id);
                let edge_cost = self.graph.edge_length(edge_id)
                    * self.cost_function.cost_factor(node_id, edge_id);
                let candidate = (distance as f64 + edge_cost) as f32;

                if candidate < distances[target as usize] {
                    distances[target as usize] = candidate;
                    previous[target as usize] = node_id;
                    queue.push(QueueItem {
                        node_id: target,
                        score: candidate
                            + self.graph.node_point(target).distance_to(&end_point) as f32,
                    });
                }
            }
        }

        debug!("route {start} -> {end}: not found after expanding {expanded} nodes");
        Ok(None)
    }

    fn reconstruct_route(&self, previous: &[NodeId], start: NodeId, end: NodeId) -> Route {
        let mut edges = Vec::new();
        let mut to = end;

        while to != start {
            let from = previous[to as usize];
            let edge_id = self
                .graph
                .node_out_edges(from)
                .find(|&e| self.graph.edge_target_node_id(e) == to)
                .expect("every node on the path is linked to its predecessor");
            edges.push(Edge::of(self.graph, edge_id, from, to));
            to = from;
        }

        edges.reverse();
        Route::Single(SingleRoute::new_unchecked(edges))
    }
}
