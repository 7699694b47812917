// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::{Edge, RoutePoint};
use crate::error::{check_argument, Error};
use crate::graph::NodeId;
use crate::math;
use crate::point::Point;

/// Route made of consecutive edges, without intermediate stops.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleRoute {
    edges: Vec<Edge>,

    /// `positions[i]` is the position of the start of `edges[i]`,
    /// the last element is the length of the whole route.
    positions: Vec<f64>,

    points: Vec<Point>,
}

impl SingleRoute {
    /// Creates a route from a non-empty sequence of edges. Consecutive edges are
    /// expected to share the node between them.
    pub fn new(edges: Vec<Edge>) -> Result<Self, Error> {
        check_argument(!edges.is_empty(), "a route needs at least one edge")?;
        Ok(Self::new_unchecked(edges))
    }

    pub(crate) fn new_unchecked(edges: Vec<Edge>) -> Self {
        debug_assert!(!edges.is_empty());

        let mut positions = Vec::with_capacity(edges.len() + 1);
        let mut position = 0.0;
        positions.push(position);
        for edge in &edges {
            position += edge.length;
            positions.push(position);
        }

        let mut points = Vec::with_capacity(edges.len() + 1);
        points.extend(edges.iter().map(|e| e.from_point));
        points.extend(edges.last().map(|e| e.to_point));

        Self {
            edges,
            positions,
            points,
        }
    }

    pub fn length(&self) -> f64 {
        self.positions[self.positions.len() - 1]
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Points at the start of every edge, followed by the end of the last edge.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// A single route is one segment, so this is always 0.
    pub fn index_of_segment_at(&self, _position: f64) -> usize {
        0
    }

    /// Finds the edge containing the (clamped) position, and the position within that edge.
    /// A position exactly at a shared node belongs to the end of the earlier edge.
    fn locate(&self, position: f64) -> (&Edge, f64) {
        let position = math::clamp_f64(0.0, position, self.length());
        let index = self
            .positions
            .partition_point(|&p| p < position)
            .max(1)
            .min(self.edges.len())
            - 1;
        (&self.edges[index], position - self.positions[index])
    }

    pub fn point_at(&self, position: f64) -> Point {
        let (edge, offset) = self.locate(position);
        edge.point_at(offset)
    }

    /// Elevation at the given position, `NaN` where the underlying edge has no profile.
    pub fn elevation_at(&self, position: f64) -> f64 {
        let (edge, offset) = self.locate(position);
        edge.elevation_at(offset)
    }

    /// Node of the route nearest to the given position: the start of the containing edge
    /// for positions in its first half (inclusive), the end of it otherwise.
    pub fn node_closest_to(&self, position: f64) -> NodeId {
        let (edge, offset) = self.locate(position);
        if offset <= edge.length / 2.0 {
            edge.from_node_id
        } else {
            edge.to_node_id
        }
    }

    pub fn point_closest_to(&self, point: &Point) -> RoutePoint {
        let mut closest = RoutePoint::NONE;
        for (edge, &start) in self.edges.iter().zip(&self.positions) {
            let offset = math::clamp_f64(0.0, edge.position_closest_to(point), edge.length);
            let candidate = edge.point_at(offset);
            closest = closest.min_with(candidate, start + offset, candidate.distance_to(point));
        }
        closest
    }
}
