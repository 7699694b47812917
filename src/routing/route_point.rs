// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::point::Point;

/// Point of a route closest to some reference point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutePoint {
    /// The point on the route, `None` only for [RoutePoint::NONE].
    pub point: Option<Point>,

    /// Position of the point along the route, in meters.
    pub position: f64,

    /// Distance between the point and the reference point, in meters.
    pub distance_to_reference: f64,
}

impl RoutePoint {
    /// Placeholder for "no point yet", further than any actual [RoutePoint].
    pub const NONE: Self = Self {
        point: None,
        position: f64::NAN,
        distance_to_reference: f64::INFINITY,
    };

    pub fn is_none(&self) -> bool {
        self.point.is_none()
    }

    pub fn with_position_shifted_by(self, difference: f64) -> Self {
        if difference == 0.0 {
            self
        } else {
            Self {
                position: self.position + difference,
                ..self
            }
        }
    }

    /// Returns the point closer to its reference, preferring `self` on ties.
    pub fn min(self, other: RoutePoint) -> Self {
        if self.distance_to_reference <= other.distance_to_reference {
            self
        } else {
            other
        }
    }

    /// Like [RoutePoint::min], but only builds the other point if it is strictly closer.
    pub fn min_with(self, point: Point, position: f64, distance_to_reference: f64) -> Self {
        if self.distance_to_reference <= distance_to_reference {
            self
        } else {
            Self {
                point: Some(point),
                position,
                distance_to_reference,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rp(position: f64, distance: f64) -> RoutePoint {
        RoutePoint {
            point: Some(Point::new(2_600_000.0 + position, 1_200_000.0).unwrap()),
            position,
            distance_to_reference: distance,
        }
    }

    #[test]
    fn none_is_identity_of_min() {
        let p = rp(10.0, 3.0);
        assert_eq!(RoutePoint::NONE.min(p), p);
        assert_eq!(p.min(RoutePoint::NONE), p);
        assert!(RoutePoint::NONE.min(RoutePoint::NONE).is_none());
    }

    #[test]
    fn min_keeps_first_on_ties() {
        let a = rp(10.0, 3.0);
        let b = rp(20.0, 3.0);
        assert_eq!(a.min(b), a);
        assert_eq!(b.min(a), b);
        assert_eq!(a.min(rp(5.0, 1.0)).position, 5.0);
    }

    #[test]
    fn min_with() {
        let a = rp(10.0, 3.0);
        let q = Point::new(2_600_050.0, 1_200_000.0).unwrap();
        assert_eq!(a.min_with(q, 50.0, 3.0), a);
        assert_eq!(a.min_with(q, 50.0, 2.0).position, 50.0);
        assert_eq!(RoutePoint::NONE.min_with(q, 1.0, 1e9).point, Some(q));
    }

    #[test]
    fn shifted() {
        let a = rp(10.0, 3.0);
        assert_eq!(a.with_position_shifted_by(0.0), a);
        assert_eq!(a.with_position_shifted_by(15.0).position, 25.0);
        assert_eq!(a.with_position_shifted_by(15.0).point, a.point);
    }
}
