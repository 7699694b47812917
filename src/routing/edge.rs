// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::function::ElevationFunction;
use crate::graph::{EdgeId, Graph, NodeId};
use crate::math;
use crate::point::Point;

/// A traversed graph edge, with everything needed to place points
/// and elevations along it without going back to the [Graph].
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from_node_id: NodeId,
    pub to_node_id: NodeId,
    pub from_point: Point,
    pub to_point: Point,
    pub length: f64,
    pub profile: ElevationFunction,
}

impl Edge {
    /// Creates an edge from the graph edge `edge_id`, going from `from_node_id` to `to_node_id`.
    pub fn of(graph: &Graph, edge_id: EdgeId, from_node_id: NodeId, to_node_id: NodeId) -> Self {
        Self {
            from_node_id,
            to_node_id,
            from_point: graph.node_point(from_node_id),
            to_point: graph.node_point(to_node_id),
            length: graph.edge_length(edge_id),
            profile: graph.edge_profile(edge_id),
        }
    }

    /// Position along the edge (in meters) of the projection of `point`
    /// onto the line through the edge's endpoints.
    ///
    /// The result is not clamped; it is negative for points "before" the edge
    /// and greater than the edge's length for points "after" it.
    pub fn position_closest_to(&self, point: &Point) -> f64 {
        if self.from_point == self.to_point {
            return 0.0;
        }
        math::projection_length(
            self.from_point.e(),
            self.from_point.n(),
            self.to_point.e(),
            self.to_point.n(),
            point.e(),
            point.n(),
        )
    }

    /// Point at the given position along the edge, interpolated linearly between the endpoints.
    /// Positions outside of `[0, length]` must not leave the region.
    pub fn point_at(&self, position: f64) -> Point {
        if self.length == 0.0 {
            return self.from_point;
        }
        let ratio = position / self.length;
        Point::new_unchecked(
            math::interpolate(self.from_point.e(), self.to_point.e(), ratio),
            math::interpolate(self.from_point.n(), self.to_point.n(), ratio),
        )
    }

    /// Elevation at the given position, `NaN` if the edge has no profile.
    pub fn elevation_at(&self, position: f64) -> f64 {
        self.profile.apply(position)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const E0: f64 = 2_600_000.0;
    pub(crate) const N0: f64 = 1_200_000.0;

    pub(crate) fn point(de: f64, dn: f64) -> Point {
        Point::new(E0 + de, N0 + dn).unwrap()
    }

    /// Straight edge between two offsets from (E0, N0), with a constant elevation.
    pub(crate) fn edge(
        from: NodeId,
        to: NodeId,
        from_offset: (f64, f64),
        to_offset: (f64, f64),
        elevation: f64,
    ) -> Edge {
        let from_point = point(from_offset.0, from_offset.1);
        let to_point = point(to_offset.0, to_offset.1);
        Edge {
            from_node_id: from,
            to_node_id: to,
            from_point,
            to_point,
            length: from_point.distance_to(&to_point),
            profile: ElevationFunction::Constant(elevation),
        }
    }

    #[test]
    fn position_closest_to() {
        let e = edge(0, 1, (0.0, 0.0), (30.0, 40.0), 0.0);
        assert_eq!(e.length, 50.0);
        assert_eq!(e.position_closest_to(&point(30.0, 40.0)), 50.0);
        assert_eq!(e.position_closest_to(&point(-40.0, 30.0)), 0.0);
        assert_eq!(e.position_closest_to(&point(60.0, 80.0)), 100.0);
        assert_eq!(e.position_closest_to(&point(-3.0, -4.0)), -5.0);
    }

    #[test]
    fn point_at() {
        let e = edge(0, 1, (0.0, 0.0), (30.0, 40.0), 0.0);
        assert_eq!(e.point_at(0.0), point(0.0, 0.0));
        assert_eq!(e.point_at(25.0), point(15.0, 20.0));
        assert_eq!(e.point_at(50.0), point(30.0, 40.0));
    }

    #[test]
    fn degenerate_edge() {
        let e = edge(0, 1, (5.0, 5.0), (5.0, 5.0), 0.0);
        assert_eq!(e.position_closest_to(&point(100.0, 0.0)), 0.0);
        assert_eq!(e.point_at(3.0), point(5.0, 5.0));
    }

    #[test]
    fn elevation_at() {
        let mut e = edge(0, 1, (0.0, 0.0), (10.0, 0.0), 0.0);
        e.profile = ElevationFunction::sampled(vec![100.0f32, 110.0], 10.0).unwrap();
        assert_eq!(e.elevation_at(5.0), 105.0);
        e.profile = ElevationFunction::Constant(f64::NAN);
        assert!(e.elevation_at(5.0).is_nan());
    }
}
