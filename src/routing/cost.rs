// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::graph::{Attribute, AttributeSet, EdgeId, Graph, NodeId};

/// Preference of a traveller for graph edges, used by the
/// [RouteComputer](super::RouteComputer) to weigh edge lengths.
pub trait CostFunction: Send + Sync {
    /// Multiplier applied to the length of `edge_id` when leaving `node_id` through it.
    ///
    /// Must not be less than 1. [f64::INFINITY] means the edge is never used.
    fn cost_factor(&self, node_id: NodeId, edge_id: EdgeId) -> f64;
}

impl<F> CostFunction for F
where
    F: Fn(NodeId, EdgeId) -> f64 + Send + Sync,
{
    fn cost_factor(&self, node_id: NodeId, edge_id: EdgeId) -> f64 {
        self(node_id, edge_id)
    }
}

/// Describes how attribute sets of edges translate into cost factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostProfile<'a> {
    /// Human readable name of the profile.
    pub name: &'a str,

    /// Ways with any of these attributes are never used, regardless of access.
    pub forbidden: &'a [Attribute],

    /// Access levels, in order from least to most specific. The most specific level
    /// which says anything about a way decides whether it can be used.
    pub access: &'a [Access<'a>],

    /// Ways with any of these attributes are only used if explicitly
    /// granted by one of the [CostProfile::access] levels.
    pub restricted: &'a [Attribute],

    /// An edge is matched against all penalties in order, and the first
    /// penalty whose attribute the edge has determines its cost factor.
    pub penalties: &'a [Penalty],

    /// Cost factor of usable edges not matching any [Penalty].
    pub default_penalty: f64,
}

/// Attributes of a single access key (e.g. "access" or "bicycle")
/// which deny or grant usage of a way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Access<'a> {
    pub denied: &'a [Attribute],
    pub granted: &'a [Attribute],
}

/// Cost factor for edges with a specific attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penalty {
    pub attribute: Attribute,

    /// Must be not less than one and finite.
    pub penalty: f64,
}

fn any_of(attributes: AttributeSet, of: &[Attribute]) -> bool {
    of.iter().any(|&a| attributes.contains(a))
}

impl CostProfile<'_> {
    /// Returns the cost factor of an edge with the given attributes,
    /// [f64::INFINITY] if such an edge must not be used.
    pub fn penalty(&self, attributes: AttributeSet) -> f64 {
        if !self.is_allowed(attributes) {
            return f64::INFINITY;
        }

        self.penalties
            .iter()
            .find(|p| attributes.contains(p.attribute))
            .map_or(self.default_penalty, |p| p.penalty)
    }

    /// Checks if an edge with the given attributes may be used at all, by considering
    /// [CostProfile::forbidden], [CostProfile::access] and [CostProfile::restricted].
    pub fn is_allowed(&self, attributes: AttributeSet) -> bool {
        if any_of(attributes, self.forbidden) {
            return false;
        }

        let decision = self.access.iter().rev().find_map(|level| {
            if any_of(attributes, level.denied) {
                Some(false)
            } else if any_of(attributes, level.granted) {
                Some(true)
            } else {
                None
            }
        });

        match decision {
            Some(allowed) => allowed,
            None => !any_of(attributes, self.restricted),
        }
    }
}

/// Cost profile for city bikes: prefers cycle infrastructure and quiet roads,
/// avoids busy roads and rough tracks, and never uses motorways or stairs.
pub const CITY_BIKE_PROFILE: CostProfile = CostProfile {
    name: "city-bike",
    forbidden: &[
        Attribute::HighwayMotorway,
        Attribute::MotorroadYes,
        Attribute::BicycleUseSidepath,
    ],
    access: &[
        Access {
            denied: &[Attribute::AccessNo, Attribute::AccessPrivate],
            granted: &[Attribute::AccessYes, Attribute::AccessPermissive],
        },
        Access {
            denied: &[Attribute::VehicleNo, Attribute::VehiclePrivate],
            granted: &[],
        },
        Access {
            denied: &[Attribute::BicycleNo, Attribute::BicyclePrivate],
            granted: &[
                Attribute::BicycleYes,
                Attribute::BicycleDesignated,
                Attribute::BicyclePermissive,
                Attribute::BicycleDismount,
            ],
        },
    ],
    restricted: &[Attribute::HighwaySteps],
    penalties: &[
        Penalty {
            attribute: Attribute::BicycleDismount,
            penalty: 4.0,
        },
        Penalty {
            attribute: Attribute::BicycleDesignated,
            penalty: 1.0,
        },
        Penalty {
            attribute: Attribute::HighwayCycleway,
            penalty: 1.0,
        },
        Penalty {
            attribute: Attribute::IcnYes,
            penalty: 1.0,
        },
        Penalty {
            attribute: Attribute::NcnYes,
            penalty: 1.0,
        },
        Penalty {
            attribute: Attribute::RcnYes,
            penalty: 1.0,
        },
        Penalty {
            attribute: Attribute::LcnYes,
            penalty: 1.0,
        },
        Penalty {
            attribute: Attribute::HighwayTrunk,
            penalty: 50.0,
        },
        Penalty {
            attribute: Attribute::HighwayTrunkLink,
            penalty: 50.0,
        },
        Penalty {
            attribute: Attribute::HighwayPrimary,
            penalty: 10.0,
        },
        Penalty {
            attribute: Attribute::HighwayPrimaryLink,
            penalty: 10.0,
        },
        Penalty {
            attribute: Attribute::HighwaySecondary,
            penalty: 3.0,
        },
        Penalty {
            attribute: Attribute::HighwaySecondaryLink,
            penalty: 3.0,
        },
        Penalty {
            attribute: Attribute::HighwayTertiary,
            penalty: 2.5,
        },
        Penalty {
            attribute: Attribute::HighwayTertiaryLink,
            penalty: 2.5,
        },
        Penalty {
            attribute: Attribute::HighwayUnclassified,
            penalty: 2.5,
        },
        Penalty {
            attribute: Attribute::HighwayResidential,
            penalty: 1.0,
        },
        Penalty {
            attribute: Attribute::HighwayLivingStreet,
            penalty: 1.5,
        },
        Penalty {
            attribute: Attribute::HighwayService,
            penalty: 2.0,
        },
        Penalty {
            attribute: Attribute::TracktypeGrade1,
            penalty: 1.0,
        },
        Penalty {
            attribute: Attribute::TracktypeGrade2,
            penalty: 1.5,
        },
        Penalty {
            attribute: Attribute::TracktypeGrade3,
            penalty: 2.5,
        },
        Penalty {
            attribute: Attribute::TracktypeGrade4,
            penalty: 3.0,
        },
        Penalty {
            attribute: Attribute::TracktypeGrade5,
            penalty: 4.0,
        },
        Penalty {
            attribute: Attribute::HighwayTrack,
            penalty: 2.0,
        },
        Penalty {
            attribute: Attribute::HighwayPath,
            penalty: 2.0,
        },
        Penalty {
            attribute: Attribute::HighwayBridleway,
            penalty: 3.0,
        },
        Penalty {
            attribute: Attribute::HighwayFootway,
            penalty: 3.0,
        },
        Penalty {
            attribute: Attribute::HighwayPedestrian,
            penalty: 3.0,
        },
        Penalty {
            attribute: Attribute::HighwaySteps,
            penalty: 5.0,
        },
    ],
    default_penalty: 2.0,
};

/// [CostFunction] following the [CITY_BIKE_PROFILE], based on attributes of graph edges.
#[derive(Debug, Clone)]
pub struct CityBikeCostFunction {
    graph: Graph,
}

impl CityBikeCostFunction {
    pub fn new(graph: &Graph) -> Self {
        Self {
            graph: graph.clone(),
        }
    }
}

impl CostFunction for CityBikeCostFunction {
    fn cost_factor(&self, _node_id: NodeId, edge_id: EdgeId) -> f64 {
        CITY_BIKE_PROFILE.penalty(self.graph.edge_attributes(edge_id))
    }
}
