// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::borrow::Cow;

use super::{Edge, MultiRoute, RoutePoint, SingleRoute};
use crate::graph::NodeId;
use crate::point::Point;

/// An itinerary between two points, either a plain sequence of edges
/// or a concatenation of other routes.
///
/// Positions along a route are given in meters from its start.
/// All position-taking methods accept any value: positions before the start
/// or past the end are treated as the start or the end, respectively.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Single(SingleRoute),
    Multi(MultiRoute),
}

impl Route {
    /// Total length of the route, in meters.
    pub fn length(&self) -> f64 {
        match self {
            Self::Single(r) => r.length(),
            Self::Multi(r) => r.length(),
        }
    }

    /// Every edge of the route, in traversal order.
    pub fn edges(&self) -> Cow<'_, [Edge]> {
        match self {
            Self::Single(r) => Cow::Borrowed(r.edges()),
            Self::Multi(r) => Cow::Owned(r.edges()),
        }
    }

    /// Nodes' coordinates along the route, without repeating the points
    /// shared between consecutive segments.
    pub fn points(&self) -> Cow<'_, [Point]> {
        match self {
            Self::Single(r) => Cow::Borrowed(r.points()),
            Self::Multi(r) => Cow::Owned(r.points()),
        }
    }

    /// Index of the single route segment containing the given position.
    pub fn index_of_segment_at(&self, position: f64) -> usize {
        match self {
            Self::Single(r) => r.index_of_segment_at(position),
            Self::Multi(r) => r.index_of_segment_at(position),
        }
    }

    pub fn point_at(&self, position: f64) -> Point {
        match self {
            Self::Single(r) => r.point_at(position),
            Self::Multi(r) => r.point_at(position),
        }
    }

    /// Elevation at the given position, `NaN` if it is unknown there.
    pub fn elevation_at(&self, position: f64) -> f64 {
        match self {
            Self::Single(r) => r.elevation_at(position),
            Self::Multi(r) => r.elevation_at(position),
        }
    }

    /// Id of the route's node nearest to the given position.
    pub fn node_closest_to(&self, position: f64) -> NodeId {
        match self {
            Self::Single(r) => r.node_closest_to(position),
            Self::Multi(r) => r.node_closest_to(position),
        }
    }

    /// Point of the route closest to `point`. Never [RoutePoint::NONE].
    pub fn point_closest_to(&self, point: &Point) -> RoutePoint {
        match self {
            Self::Single(r) => r.point_closest_to(point),
            Self::Multi(r) => r.point_closest_to(point),
        }
    }

    pub(crate) fn leaf_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multi(r) => r.leaf_count(),
        }
    }
}

impl From<SingleRoute> for Route {
    fn from(r: SingleRoute) -> Self {
        Self::Single(r)
    }
}

impl From<MultiRoute> for Route {
    fn from(r: MultiRoute) -> Self {
        Self::Multi(r)
    }
}
