// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use log::trace;

use super::Route;
use crate::error::{check_argument, Error};
use crate::function::ElevationFunction;
use crate::math;

/// Elevation along a route, sampled at evenly spaced positions,
/// together with a handful of statistics about it.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationProfile {
    length: f64,
    function: ElevationFunction,
    min_elevation: f64,
    max_elevation: f64,
    total_ascent: f64,
    total_descent: f64,
}

impl ElevationProfile {
    /// Creates a profile of a route of the given length from samples evenly spaced
    /// from its start to its end. The length must be positive, and at least
    /// two samples are required.
    pub fn new(length: f64, samples: impl Into<Arc<[f32]>>) -> Result<Self, Error> {
        let samples: Arc<[f32]> = samples.into();
        check_argument(length > 0.0, "elevation profile requires a positive length")?;
        check_argument(samples.len() >= 2, "elevation profile requires at least 2 samples")?;

        let mut min_elevation = f64::INFINITY;
        let mut max_elevation = f64::NEG_INFINITY;
        for &s in samples.iter() {
            min_elevation = min_elevation.min(s as f64);
            max_elevation = max_elevation.max(s as f64);
        }

        let mut total_ascent = 0.0;
        let mut total_descent = 0.0;
        for pair in samples.windows(2) {
            let difference = pair[1] as f64 - pair[0] as f64;
            if difference > 0.0 {
                total_ascent += difference;
            } else {
                total_descent -= difference;
            }
        }

        Ok(Self {
            length,
            function: ElevationFunction::sampled(samples, length)?,
            min_elevation,
            max_elevation,
            total_ascent,
            total_descent,
        })
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn min_elevation(&self) -> f64 {
        self.min_elevation
    }

    pub fn max_elevation(&self) -> f64 {
        self.max_elevation
    }

    /// Sum of all elevation increases between consecutive samples, in meters.
    pub fn total_ascent(&self) -> f64 {
        self.total_ascent
    }

    /// Sum of all elevation decreases between consecutive samples, as a positive number.
    pub fn total_descent(&self) -> f64 {
        self.total_descent
    }

    /// Elevation at the given position, clamped to the ends of the profile.
    pub fn elevation_at(&self, position: f64) -> f64 {
        self.function.apply(position)
    }

    pub fn samples(&self) -> &[f32] {
        match &self.function {
            ElevationFunction::Sampled { samples, .. } => samples,
            ElevationFunction::Constant(_) => &[],
        }
    }
}

/// Samples the elevation along `route`, with samples no further apart than `max_step_length`.
///
/// Stretches without elevation data are filled in: gaps at either end take the nearest
/// known elevation, gaps in the middle are interpolated linearly, and a route without
/// any elevation data at all gets a flat profile at 0 m.
///
/// Fails if the route has zero length or `max_step_length` is not positive.
pub fn elevation_profile(route: &Route, max_step_length: f64) -> Result<ElevationProfile, Error> {
    check_argument(max_step_length > 0.0, "max_step_length must be positive")?;
    let length = route.length();
    check_argument(length > 0.0, "elevation profile requires a positive length")?;

    let sample_count = (length / max_step_length).ceil() as usize + 1;
    let step = length / (sample_count - 1) as f64;
    let mut samples: Vec<f32> = (0..sample_count)
        .map(|i| route.elevation_at(i as f64 * step) as f32)
        .collect();
    fill_gaps(&mut samples);

    trace!("sampled route of {length:.1} m into {sample_count} elevations");
    ElevationProfile::new(length, samples)
}

/// Replaces every `NaN` sample with a value derived from the known samples.
fn fill_gaps(samples: &mut [f32]) {
    let Some(first) = samples.iter().position(|s| !s.is_nan()) else {
        samples.fill(0.0);
        return;
    };
    let last = samples.iter().rposition(|s| !s.is_nan()).unwrap_or(first);

    let (first_value, last_value) = (samples[first], samples[last]);
    samples[..first].fill(first_value);
    samples[last + 1..].fill(last_value);

    let mut known = first;
    for i in first + 1..=last {
        if samples[i].is_nan() {
            continue;
        }
        let gap = i - known;
        if gap > 1 {
            let (y0, y1) = (samples[known] as f64, samples[i] as f64);
            for j in 1..gap {
                samples[known + j] = math::interpolate(y0, y1, j as f64 / gap as f64) as f32;
            }
        }
        known = i;
    }
}
