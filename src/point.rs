// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::error::{check_argument, Error};
use crate::math;

/// The rectangle covered by the road network, in projected plane coordinates (meters).
pub mod bounds {
    pub const MIN_E: f64 = 2_485_000.0;
    pub const MAX_E: f64 = 2_834_000.0;
    pub const MIN_N: f64 = 1_075_000.0;
    pub const MAX_N: f64 = 1_296_000.0;
    pub const WIDTH: f64 = MAX_E - MIN_E;
    pub const HEIGHT: f64 = MAX_N - MIN_N;

    /// Checks whether the given coordinates lie within the region (edges included).
    pub fn contains(e: f64, n: f64) -> bool {
        (MIN_E..=MAX_E).contains(&e) && (MIN_N..=MAX_N).contains(&n)
    }
}

/// A location in the region's projected plane, `e` (east) and `n` (north) in meters.
///
/// Conversions to and from geographic coordinates are left to callers;
/// inside the crate points are only compared by their euclidean distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    e: f64,
    n: f64,
}

impl Point {
    /// Creates a new point, checking that it lies within the [region bounds](bounds).
    pub fn new(e: f64, n: f64) -> Result<Self, Error> {
        check_argument(bounds::contains(e, n), "point outside of the region bounds")?;
        Ok(Self { e, n })
    }

    /// Creates a point from coordinates known to be within the region,
    /// e.g. decoded from the graph or interpolated between two valid points.
    #[inline]
    pub(crate) fn new_unchecked(e: f64, n: f64) -> Self {
        debug_assert!(bounds::contains(e, n), "point ({e}, {n}) outside of the region");
        Self { e, n }
    }

    /// East coordinate, in meters.
    #[inline]
    pub fn e(&self) -> f64 {
        self.e
    }

    /// North coordinate, in meters.
    #[inline]
    pub fn n(&self) -> f64 {
        self.n
    }

    /// Square of the euclidean distance to `other`, in square meters.
    pub fn squared_distance_to(&self, other: &Point) -> f64 {
        math::squared_norm(other.e - self.e, other.n - self.n)
    }

    /// Euclidean distance to `other`, in meters.
    pub fn distance_to(&self, other: &Point) -> f64 {
        math::norm(other.e - self.e, other.n - self.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_points_outside_region() {
        assert!(Point::new(2_600_000.0, 1_200_000.0).is_ok());
        assert!(Point::new(bounds::MIN_E, bounds::MAX_N).is_ok());
        assert_eq!(
            Point::new(bounds::MIN_E - 1.0, 1_200_000.0),
            Err(Error::InvalidArgument("point outside of the region bounds"))
        );
        assert!(Point::new(2_600_000.0, bounds::MAX_N + 0.5).is_err());
        assert!(Point::new(f64::NAN, 1_200_000.0).is_err());
    }

    #[test]
    fn distances() {
        let a = Point::new(2_600_000.0, 1_200_000.0).unwrap();
        let b = Point::new(2_600_003.0, 1_200_004.0).unwrap();
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(a.squared_distance_to(&b), 25.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }
}
