// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fmt;

use crate::error::{check_argument, Error};

macro_rules! attributes {
    ($( $variant:ident => $key:literal = $value:literal ),+ $(,)?) => {
        /// OpenStreetMap tag (key and value) which may be attached to an edge.
        ///
        /// The discriminant of every variant is its bit index in an [AttributeSet].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum Attribute {
            $( $variant ),+
        }

        impl Attribute {
            /// All attributes, in bit order.
            pub const ALL: &'static [Attribute] = &[ $( Attribute::$variant ),+ ];

            pub fn key(self) -> &'static str {
                match self {
                    $( Attribute::$variant => $key ),+
                }
            }

            pub fn value(self) -> &'static str {
                match self {
                    $( Attribute::$variant => $value ),+
                }
            }
        }
    };
}

attributes! {
    HighwayService => "highway" = "service",
    HighwayTrack => "highway" = "track",
    HighwayResidential => "highway" = "residential",
    HighwayFootway => "highway" = "footway",
    HighwayPath => "highway" = "path",
    HighwayUnclassified => "highway" = "unclassified",
    HighwayTertiary => "highway" = "tertiary",
    HighwaySecondary => "highway" = "secondary",
    HighwayPrimary => "highway" = "primary",
    HighwayCycleway => "highway" = "cycleway",
    HighwayLivingStreet => "highway" = "living_street",
    HighwayTrunk => "highway" = "trunk",
    HighwayPedestrian => "highway" = "pedestrian",
    HighwayTertiaryLink => "highway" = "tertiary_link",
    HighwaySecondaryLink => "highway" = "secondary_link",
    HighwayPrimaryLink => "highway" = "primary_link",
    HighwayTrunkLink => "highway" = "trunk_link",
    HighwayBridleway => "highway" = "bridleway",
    HighwaySteps => "highway" = "steps",
    HighwayMotorway => "highway" = "motorway",

    TracktypeGrade1 => "tracktype" = "grade1",
    TracktypeGrade2 => "tracktype" = "grade2",
    TracktypeGrade3 => "tracktype" = "grade3",
    TracktypeGrade4 => "tracktype" = "grade4",
    TracktypeGrade5 => "tracktype" = "grade5",

    SurfaceAsphalt => "surface" = "asphalt",
    SurfaceUnpaved => "surface" = "unpaved",
    SurfaceGravel => "surface" = "gravel",
    SurfacePaved => "surface" = "paved",
    SurfaceGround => "surface" = "ground",
    SurfaceConcrete => "surface" = "concrete",
    SurfacePavingStones => "surface" = "paving_stones",
    SurfaceGrass => "surface" = "grass",
    SurfaceCompacted => "surface" = "compacted",
    SurfaceFineGravel => "surface" = "fine_gravel",
    SurfaceDirt => "surface" = "dirt",
    SurfacePebblestone => "surface" = "pebblestone",
    SurfaceSett => "surface" = "sett",
    SurfaceCobblestone => "surface" = "cobblestone",

    VehicleNo => "vehicle" = "no",
    VehiclePrivate => "vehicle" = "private",

    AccessYes => "access" = "yes",
    AccessNo => "access" = "no",
    AccessPrivate => "access" = "private",
    AccessPermissive => "access" = "permissive",

    MotorVehicleNo => "motor_vehicle" = "no",
    MotorVehiclePrivate => "motor_vehicle" = "private",
    MotorroadYes => "motorroad" = "yes",

    BicycleYes => "bicycle" = "yes",
    BicycleNo => "bicycle" = "no",
    BicycleDesignated => "bicycle" = "designated",
    BicycleDismount => "bicycle" = "dismount",
    BicycleUseSidepath => "bicycle" = "use_sidepath",
    BicyclePermissive => "bicycle" = "permissive",
    BicyclePrivate => "bicycle" = "private",

    CyclewayOpposite => "cycleway" = "opposite",
    CyclewayOppositeLane => "cycleway" = "opposite_lane",
    CyclewayOppositeTrack => "cycleway" = "opposite_track",

    LcnYes => "lcn" = "yes",
    RcnYes => "rcn" = "yes",
    NcnYes => "ncn" = "yes",
    IcnYes => "icn" = "yes",
}

impl Attribute {
    pub const COUNT: usize = Self::ALL.len();

    /// Returns the attribute as a `key=value` string.
    pub fn key_value(self) -> String {
        format!("{}={}", self.key(), self.value())
    }

    #[inline]
    fn mask(self) -> u64 {
        1 << (self as u8)
    }
}

/// Set of [Attributes](Attribute), stored as a 64-bit mask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AttributeSet(u64);

impl AttributeSet {
    pub const EMPTY: Self = Self(0);

    /// Creates a set from its raw bits. Bits past [Attribute::COUNT] must not be set.
    pub fn new(bits: u64) -> Result<Self, Error> {
        check_argument(
            bits >> Attribute::COUNT == 0,
            "attribute set has bits beyond the known attributes",
        )?;
        Ok(Self(bits))
    }

    pub fn of(attributes: &[Attribute]) -> Self {
        Self(attributes.iter().fold(0, |bits, a| bits | a.mask()))
    }

    #[inline]
    pub fn bits(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn contains(self, attribute: Attribute) -> bool {
        self.0 & attribute.mask() != 0
    }

    /// Checks whether the two sets have at least one attribute in common.
    #[inline]
    pub fn intersects(self, other: AttributeSet) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns an iterator over attributes in the set, in bit order.
    pub fn iter(self) -> impl Iterator<Item = Attribute> {
        Attribute::ALL.iter().copied().filter(move |&a| self.contains(a))
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, attribute) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}={}", attribute.key(), attribute.value())?;
        }
        f.write_str("}")
    }
}
