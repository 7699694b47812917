// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Routes through several waypoints, reusing recently computed legs.

use std::num::NonZeroUsize;

use log::{debug, trace};
use lru::LruCache;

use crate::graph::{Graph, NodeId};
use crate::point::Point;
use crate::routing::{
    elevation_profile, CostFunction, ElevationProfile, MultiRoute, Route, RouteComputer,
    RouteError,
};

/// Number of legs remembered by [Planner::new].
pub const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(n) => n,
    None => unreachable!(),
};

/// Largest distance between samples of profiles from [Planner::plan_with_profile], in meters.
pub const PROFILE_MAX_STEP_LENGTH: f64 = 5.0;

/// A point chosen by the user, together with the graph node it was snapped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub point: Point,
    pub node_id: NodeId,
}

impl Waypoint {
    /// Snaps `point` to the closest node of the graph no further than
    /// `search_distance` meters away. Returns `None` if there is no such node.
    pub fn snap(graph: &Graph, point: Point, search_distance: f64) -> Option<Self> {
        graph
            .node_closest_to(&point, search_distance)
            .map(|node_id| Self { point, node_id })
    }
}

/// A planned route with its elevation profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub route: Route,

    /// `None` only if the route has zero length.
    pub profile: Option<ElevationProfile>,
}

/// Computes routes through ordered lists of waypoints.
///
/// Every leg between two consecutive waypoints is computed separately,
/// and the most recently used legs are cached, so that moving one waypoint
/// only requires recomputing the legs adjacent to it.
pub struct Planner<'g, C> {
    computer: RouteComputer<'g, C>,
    legs: LruCache<(NodeId, NodeId), Route>,
}

impl<'g, C: CostFunction> Planner<'g, C> {
    pub fn new(computer: RouteComputer<'g, C>) -> Self {
        Self::with_capacity(computer, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(computer: RouteComputer<'g, C>, capacity: NonZeroUsize) -> Self {
        Self {
            computer,
            legs: LruCache::new(capacity),
        }
    }

    pub fn computer(&self) -> &RouteComputer<'g, C> {
        &self.computer
    }

    /// Number of legs currently in the cache.
    pub fn cached_legs(&self) -> usize {
        self.legs.len()
    }

    /// Computes the route visiting all waypoints in order.
    ///
    /// Consecutive repetitions of a waypoint are ignored. Returns `Ok(None)` if fewer than
    /// two distinct waypoints remain, or if any leg of the route can't be computed.
    /// The result is always a [Route::Multi] with one segment per leg.
    pub fn plan(&mut self, waypoints: &[NodeId]) -> Result<Option<Route>, RouteError> {
        let mut stops = waypoints.to_vec();
        stops.dedup();
        if stops.len() < 2 {
            return Ok(None);
        }

        let mut legs = Vec::with_capacity(stops.len() - 1);
        for pair in stops.windows(2) {
            match self.leg(pair[0], pair[1])? {
                Some(leg) => legs.push(leg),
                None => {
                    debug!("no route between waypoints {} and {}", pair[0], pair[1]);
                    return Ok(None);
                }
            }
        }

        Ok(Some(Route::Multi(MultiRoute::new_unchecked(legs))))
    }

    /// Like [Planner::plan], but also computes the elevation profile of the route,
    /// with samples at most [PROFILE_MAX_STEP_LENGTH] meters apart.
    pub fn plan_with_profile(
        &mut self,
        waypoints: &[NodeId],
    ) -> Result<Option<Itinerary>, RouteError> {
        Ok(self.plan(waypoints)?.map(|route| {
            let profile = elevation_profile(&route, PROFILE_MAX_STEP_LENGTH).ok();
            Itinerary { route, profile }
        }))
    }

    fn leg(&mut self, start: NodeId, end: NodeId) -> Result<Option<Route>, RouteError> {
        if let Some(route) = self.legs.get(&(start, end)) {
            trace!("leg {start} -> {end}: cached");
            return Ok(Some(route.clone()));
        }

        let route = self.computer.best_route_between(start, end)?;
        if let Some(route) = &route {
            self.legs.put((start, end), route.clone());
        }
        Ok(route)
    }
}
