// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::{Edge, Route, RoutePoint};
use crate::error::{check_argument, Error};
use crate::graph::NodeId;
use crate::math;
use crate::point::Point;

/// Route made of consecutive segments, each being a [Route] on its own.
///
/// Segments are expected to connect: the end of one is the start of the next.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiRoute {
    segments: Vec<Route>,
    length: f64,
}

impl MultiRoute {
    pub fn new(segments: Vec<Route>) -> Result<Self, Error> {
        check_argument(!segments.is_empty(), "a route needs at least one segment")?;
        Ok(Self::new_unchecked(segments))
    }

    pub(crate) fn new_unchecked(segments: Vec<Route>) -> Self {
        debug_assert!(!segments.is_empty());
        let length = segments.iter().map(Route::length).sum();
        Self { segments, length }
    }

    pub fn segments(&self) -> &[Route] {
        &self.segments
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn edges(&self) -> Vec<Edge> {
        self.segments
            .iter()
            .flat_map(|s| s.edges().into_owned())
            .collect()
    }

    /// Points of all segments, with the point shared by consecutive segments listed once.
    pub fn points(&self) -> Vec<Point> {
        let mut points: Vec<Point> = Vec::new();
        for segment in &self.segments {
            let segment_points = segment.points();
            let skip = match (points.last(), segment_points.first()) {
                (Some(last), Some(first)) if last == first => 1,
                _ => 0,
            };
            points.extend_from_slice(&segment_points[skip..]);
        }
        points
    }

    /// Number of [single](super::SingleRoute) routes this route is ultimately made of.
    pub(crate) fn leaf_count(&self) -> usize {
        self.segments.iter().map(Route::leaf_count).sum()
    }

    /// Index of the single route containing the given position, counting single routes
    /// across all nesting levels. A position shared by two segments belongs to the earlier one.
    pub fn index_of_segment_at(&self, position: f64) -> usize {
        let mut position = math::clamp_f64(0.0, position, self.length);
        let mut index = 0;
        for segment in &self.segments {
            let length = segment.length();
            if position <= length {
                return index + segment.index_of_segment_at(position);
            }
            position -= length;
            index += segment.leaf_count();
        }
        self.leaf_count() - 1
    }

    /// Finds the segment containing the given position, and the position within that segment.
    /// Positions past the end map to the end of the last segment.
    fn locate(&self, mut position: f64) -> (&Route, f64) {
        for segment in &self.segments {
            let length = segment.length();
            if position > length {
                position -= length;
            } else {
                return (segment, position);
            }
        }
        let last = &self.segments[self.segments.len() - 1];
        (last, last.length())
    }

    pub fn point_at(&self, position: f64) -> Point {
        let (segment, position) = self.locate(position);
        segment.point_at(position)
    }

    pub fn elevation_at(&self, position: f64) -> f64 {
        let (segment, position) = self.locate(position);
        segment.elevation_at(position)
    }

    pub fn node_closest_to(&self, position: f64) -> NodeId {
        let (segment, position) = self.locate(position);
        segment.node_closest_to(position)
    }

    pub fn point_closest_to(&self, point: &Point) -> RoutePoint {
        let mut closest = RoutePoint::NONE;
        let mut offset = 0.0;
        for segment in &self.segments {
            closest = closest.min(segment.point_closest_to(point).with_position_shifted_by(offset));
            offset += segment.length();
        }
        closest
    }
}

#[cfg(test)]
mod tests {
    use super::super::edge::tests::{edge, point};
    use super::super::SingleRoute;
    use super::*;

    fn single(edges: Vec<Edge>) -> Route {
        Route::Single(SingleRoute::new(edges).unwrap())
    }

    /// 0 -(10)-> 1 -(20)-> 2 | 2 -(30)-> 3 | 3 -(40)-> 4, all along the E axis,
    /// with the last two legs nested in their own multi route.
    fn route() -> MultiRoute {
        let first = single(vec![
            edge(0, 1, (0.0, 0.0), (10.0, 0.0), 1.0),
            edge(1, 2, (10.0, 0.0), (30.0, 0.0), 2.0),
        ]);
        let second = single(vec![edge(2, 3, (30.0, 0.0), (60.0, 0.0), 3.0)]);
        let third = single(vec![edge(3, 4, (60.0, 0.0), (100.0, 0.0), 4.0)]);
        let nested = Route::Multi(MultiRoute::new(vec![second, third]).unwrap());
        MultiRoute::new(vec![first, nested]).unwrap()
    }

    #[test]
    fn rejects_empty() {
        assert!(MultiRoute::new(Vec::new()).is_err());
    }

    #[test]
    fn length_edges_and_points() {
        let r = route();
        assert_eq!(r.length(), 100.0);
        assert_eq!(r.edges().len(), 4);
        assert_eq!(r.edges()[2].from_node_id, 2);
        assert_eq!(
            r.points(),
            vec![
                point(0.0, 0.0),
                point(10.0, 0.0),
                point(30.0, 0.0),
                point(60.0, 0.0),
                point(100.0, 0.0),
            ]
        );
    }

    #[test]
    fn index_of_segment_at() {
        let r = route();
        assert_eq!(r.index_of_segment_at(-5.0), 0);
        assert_eq!(r.index_of_segment_at(15.0), 0);
        assert_eq!(r.index_of_segment_at(30.0), 0);
        assert_eq!(r.index_of_segment_at(45.0), 1);
        assert_eq!(r.index_of_segment_at(60.0), 1);
        assert_eq!(r.index_of_segment_at(75.0), 2);
        assert_eq!(r.index_of_segment_at(500.0), 2);
    }

    #[test]
    fn point_and_elevation_at() {
        let r = route();
        assert_eq!(r.point_at(-10.0), point(0.0, 0.0));
        assert_eq!(r.point_at(45.0), point(45.0, 0.0));
        assert_eq!(r.point_at(90.0), point(90.0, 0.0));
        assert_eq!(r.point_at(200.0), point(100.0, 0.0));

        assert_eq!(r.elevation_at(5.0), 1.0);
        assert_eq!(r.elevation_at(30.0), 2.0);
        assert_eq!(r.elevation_at(31.0), 3.0);
        assert_eq!(r.elevation_at(61.0), 4.0);
        assert_eq!(r.elevation_at(1000.0), 4.0);
    }

    #[test]
    fn node_closest_to() {
        let r = route();
        assert_eq!(r.node_closest_to(0.0), 0);
        assert_eq!(r.node_closest_to(44.0), 2);
        assert_eq!(r.node_closest_to(46.0), 3);
        assert_eq!(r.node_closest_to(79.0), 3);
        assert_eq!(r.node_closest_to(81.0), 4);
        assert_eq!(r.node_closest_to(1000.0), 4);
    }

    #[test]
    fn point_closest_to_shifts_positions() {
        let r = route();

        let p = r.point_closest_to(&point(70.0, 3.0));
        assert_eq!(p.point, Some(point(70.0, 0.0)));
        assert_eq!(p.position, 70.0);
        assert_eq!(p.distance_to_reference, 3.0);

        let p = r.point_closest_to(&point(20.0, -1.0));
        assert_eq!(p.position, 20.0);
        assert_eq!(p.distance_to_reference, 1.0);

        let p = r.point_closest_to(&point(130.0, 40.0));
        assert_eq!(p.point, Some(point(100.0, 0.0)));
        assert_eq!(p.position, 100.0);
        assert_eq!(p.distance_to_reference, 50.0);
    }
}
