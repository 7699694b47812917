// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Route search over a [Graph](crate::Graph) and the resulting [Route]s.

mod computer;
mod cost;
mod edge;
mod elevation;
mod error;
mod multi;
mod route;
mod route_point;
mod single;

pub use computer::RouteComputer;
pub use cost::{
    Access, CityBikeCostFunction, CostFunction, CostProfile, Penalty, CITY_BIKE_PROFILE,
};
pub use edge::Edge;
pub use elevation::{elevation_profile, ElevationProfile};
pub use error::RouteError;
pub use multi::MultiRoute;
pub use route::Route;
pub use route_point::RoutePoint;
pub use single::SingleRoute;
