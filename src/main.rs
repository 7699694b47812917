// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::info;
use veloroute::{
    elevation_profile, CityBikeCostFunction, CostFunction, EdgeId, Graph, NodeId, Planner, Point,
    Route, RouteComputer, Waypoint,
};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid {0} point: {1}")]
    InvalidPoint(&'static str, #[source] veloroute::Error),

    #[error("no node within {1} m of the {0} point")]
    NoNearbyNode(&'static str, f64),

    #[error("no route between the start and end points")]
    NoRoute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Profile {
    /// Prefer cycle infrastructure and quiet roads
    CityBike,

    /// Shortest route over any edge
    Flat,
}

#[derive(Parser)]
struct Cli {
    /// The directory with graph files
    graph_dir: PathBuf,

    /// East coordinate of the start point
    start_e: f64,

    /// North coordinate of the start point
    start_n: f64,

    /// East coordinate of the end point
    end_e: f64,

    /// North coordinate of the end point
    end_n: f64,

    /// Maximum distance between a point and its closest node, in meters
    #[arg(long, default_value_t = 500.0)]
    search_distance: f64,

    /// Maximum distance between elevation profile samples, in meters
    #[arg(long, default_value_t = 5.0)]
    max_step: f64,

    /// Cost profile used to weigh edges
    #[arg(long, value_enum, default_value_t = Profile::CityBike)]
    profile: Profile,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    let g = Graph::load_from(&cli.graph_dir)?;
    info!(
        "loaded {} nodes and {} edges from {}",
        g.node_count(),
        g.edge_count(),
        cli.graph_dir.display()
    );

    let start = snap(&g, "start", cli.start_e, cli.start_n, cli.search_distance)?;
    let end = snap(&g, "end", cli.end_e, cli.end_n, cli.search_distance)?;

    let route = match cli.profile {
        Profile::CityBike => plan(&g, CityBikeCostFunction::new(&g), start, end)?,
        Profile::Flat => plan(&g, |_: NodeId, _: EdgeId| 1.0, start, end)?,
    };
    let profile = elevation_profile(&route, cli.max_step)?;

    println!("{{");
    println!("  \"type\": \"FeatureCollection\",");
    println!("  \"features\": [");
    println!("    {{");
    println!("      \"type\": \"Feature\",");
    println!("      \"properties\": {{");
    println!("        \"length\": {:.2},", route.length());
    println!("        \"min_elevation\": {:.2},", profile.min_elevation());
    println!("        \"max_elevation\": {:.2},", profile.max_elevation());
    println!("        \"total_ascent\": {:.2},", profile.total_ascent());
    println!("        \"total_descent\": {:.2}", profile.total_descent());
    println!("      }},");

    println!("      \"geometry\": {{");
    println!("        \"type\": \"LineString\",");
    println!("        \"coordinates\": [");

    let points = route.points();
    let mut points = points.iter().peekable();
    while let Some(point) = points.next() {
        let suffix = if points.peek().is_some() { "," } else { "" };
        println!("          [{:.2}, {:.2}]{}", point.e(), point.n(), suffix);
    }

    println!("        ]");
    println!("      }}");
    println!("    }}");
    println!("  ]");
    println!("}}");

    Ok(())
}

fn snap(
    g: &Graph,
    name: &'static str,
    e: f64,
    n: f64,
    search_distance: f64,
) -> Result<Waypoint, CliError> {
    let point = Point::new(e, n).map_err(|err| CliError::InvalidPoint(name, err))?;
    Waypoint::snap(g, point, search_distance).ok_or(CliError::NoNearbyNode(name, search_distance))
}

fn plan<C: CostFunction>(
    g: &Graph,
    cost_function: C,
    start: Waypoint,
    end: Waypoint,
) -> Result<Route, Box<dyn Error>> {
    let mut planner = Planner::new(RouteComputer::new(g, cost_function));
    let route = planner.plan(&[start.node_id, end.node_id])?;
    Ok(route.ok_or(CliError::NoRoute)?)
}
