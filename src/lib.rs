// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Bicycle routing over a compact road graph, stored in memory-mapped binary tables.
//!
//! Coordinates are given in a projected plane (east and north, in meters),
//! limited to the rectangle described by [point::bounds]. A [Graph] is loaded
//! from a directory of binary tables, a [RouteComputer] finds the cheapest
//! [Route] between two nodes according to a [CostFunction], and
//! [elevation_profile] turns a route into an evenly sampled [ElevationProfile].
//!
//! # Example
//!
//! ```no_run
//! use veloroute::{CityBikeCostFunction, Graph, Point, RouteComputer};
//!
//! let g = Graph::load_from("path/to/graph").expect("failed to load the graph");
//! let start = g.node_closest_to(&Point::new(2_532_697.0, 1_152_350.0).unwrap(), 500.0).unwrap();
//! let end = g.node_closest_to(&Point::new(2_538_659.0, 1_154_350.0).unwrap(), 500.0).unwrap();
//!
//! let computer = RouteComputer::new(&g, CityBikeCostFunction::new(&g));
//! let route = computer
//!     .best_route_between(start, end)
//!     .expect("invalid nodes")
//!     .expect("no route between the nodes");
//! let profile = veloroute::elevation_profile(&route, 5.0).unwrap();
//!
//! println!("{:.0} m, {:.0} m of ascent", route.length(), profile.total_ascent());
//! ```

pub mod bits;
mod error;
pub mod function;
pub mod graph;
pub mod itinerary;
pub mod math;
pub mod point;
pub mod q28_4;
pub mod routing;

pub use error::Error;
pub use graph::{Attribute, AttributeSet, EdgeId, Graph, LoadError, NodeId};
pub use itinerary::{Itinerary, Planner, Waypoint};
pub use point::Point;
pub use routing::{
    elevation_profile, CityBikeCostFunction, CostFunction, Edge, ElevationProfile, MultiRoute,
    Route, RouteComputer, RouteError, RoutePoint, SingleRoute,
};
