// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Small numerical helpers shared by the graph and routing code.

/// Integer division of `x` by `y`, rounded towards positive infinity.
///
/// # Panics
///
/// Panics if `x < 0` or `y <= 0`.
pub fn ceil_div(x: i32, y: i32) -> i32 {
    assert!(x >= 0 && y > 0, "ceil_div requires x >= 0 and y > 0");
    (x + y - 1) / y
}

/// Value at `x` of the line passing through `(0, y0)` and `(1, y1)`.
#[inline]
pub fn interpolate(y0: f64, y1: f64, x: f64) -> f64 {
    (y1 - y0).mul_add(x, y0)
}

/// Limits `v` to `[min, max]`.
///
/// # Panics
///
/// Panics if `min > max`.
pub fn clamp(min: i32, v: i32, max: i32) -> i32 {
    assert!(min <= max, "clamp requires min <= max ({min} > {max})");
    v.max(min).min(max)
}

/// Limits `v` to `[min, max]`.
///
/// # Panics
///
/// Panics if `min > max`.
pub fn clamp_f64(min: f64, v: f64, max: f64) -> f64 {
    assert!(min <= max, "clamp requires min <= max ({min} > {max})");
    if v < min {
        min
    } else if v > max {
        max
    } else {
        v
    }
}

#[inline]
pub fn dot_product(u_x: f64, u_y: f64, v_x: f64, v_y: f64) -> f64 {
    u_x.mul_add(v_x, u_y * v_y)
}

#[inline]
pub fn squared_norm(u_x: f64, u_y: f64) -> f64 {
    dot_product(u_x, u_y, u_x, u_y)
}

#[inline]
pub fn norm(u_x: f64, u_y: f64) -> f64 {
    squared_norm(u_x, u_y).sqrt()
}

/// Signed length of the projection of the vector AP onto the vector AB.
pub fn projection_length(a_x: f64, a_y: f64, b_x: f64, b_y: f64, p_x: f64, p_y: f64) -> f64 {
    let (u_x, u_y) = (p_x - a_x, p_y - a_y);
    let (v_x, v_y) = (b_x - a_x, b_y - a_y);
    dot_product(u_x, u_y, v_x, v_y) / norm(v_x, v_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_div() {
        assert_eq!(ceil_div(0, 32), 0);
        assert_eq!(ceil_div(1, 32), 1);
        assert_eq!(ceil_div(32, 32), 1);
        assert_eq!(ceil_div(33, 32), 2);
    }

    #[test]
    fn test_interpolate() {
        assert_eq!(interpolate(10.0, 20.0, 0.0), 10.0);
        assert_eq!(interpolate(10.0, 20.0, 0.5), 15.0);
        assert_eq!(interpolate(10.0, 20.0, 2.0), 30.0);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(0, -3, 127), 0);
        assert_eq!(clamp(0, 300, 127), 127);
        assert_eq!(clamp(0, 42, 127), 42);
        assert_eq!(clamp_f64(0.0, 1.5, 1.0), 1.0);
        assert_eq!(clamp_f64(0.0, -0.5, 1.0), 0.0);
    }

    #[test]
    #[should_panic]
    fn clamp_rejects_inverted_bounds() {
        clamp(5, 4, 3);
    }

    #[test]
    #[should_panic]
    fn clamp_f64_rejects_inverted_bounds() {
        clamp_f64(5.0, 4.0, 3.0);
    }

    #[test]
    fn test_projection_length() {
        assert_eq!(projection_length(0.0, 0.0, 10.0, 0.0, 3.0, 7.0), 3.0);
        assert_eq!(projection_length(0.0, 0.0, 10.0, 0.0, -2.0, 1.0), -2.0);
        assert_eq!(norm(3.0, 4.0), 5.0);
    }
}
