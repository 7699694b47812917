// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::error::{check_argument, Error};
use crate::math;

/// A real function of the position along an edge or a route, used to describe elevation.
#[derive(Debug, Clone, PartialEq)]
pub enum ElevationFunction {
    /// Same value everywhere. `Constant(f64::NAN)` describes a missing profile.
    Constant(f64),

    /// Linear interpolation between evenly spaced samples covering `[0, x_max]`.
    /// Outside of that range, the first or last sample is returned.
    Sampled { samples: Arc<[f32]>, x_max: f64 },
}

impl ElevationFunction {
    /// Creates a [ElevationFunction::Sampled] function.
    /// At least two samples and a positive `x_max` are required.
    pub fn sampled(samples: impl Into<Arc<[f32]>>, x_max: f64) -> Result<Self, Error> {
        let samples = samples.into();
        check_argument(samples.len() >= 2, "sampled function requires at least 2 samples")?;
        check_argument(x_max > 0.0, "sampled function requires a positive x_max")?;
        Ok(Self::Sampled { samples, x_max })
    }

    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Self::Constant(y) => *y,
            Self::Sampled { samples, x_max } => {
                let last = samples.len() - 1;
                if x <= 0.0 {
                    return samples[0] as f64;
                }
                if x >= *x_max {
                    return samples[last] as f64;
                }

                let scaled = x / (x_max / last as f64);
                let i = (scaled as usize).min(last - 1);
                math::interpolate(samples[i] as f64, samples[i + 1] as f64, scaled - i as f64)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant() {
        let f = ElevationFunction::Constant(4.5);
        assert_eq!(f.apply(-10.0), 4.5);
        assert_eq!(f.apply(1e9), 4.5);
        assert!(ElevationFunction::Constant(f64::NAN).apply(0.0).is_nan());
    }

    #[test]
    fn sampled_interpolates_and_clamps() {
        let f = ElevationFunction::sampled(vec![0.0f32, 10.0, 5.0], 20.0).unwrap();
        assert_eq!(f.apply(-1.0), 0.0);
        assert_eq!(f.apply(0.0), 0.0);
        assert_eq!(f.apply(5.0), 5.0);
        assert_eq!(f.apply(10.0), 10.0);
        assert_eq!(f.apply(15.0), 7.5);
        assert_eq!(f.apply(20.0), 5.0);
        assert_eq!(f.apply(25.0), 5.0);
    }

    #[test]
    fn sampled_validates_arguments() {
        assert!(ElevationFunction::sampled(vec![1.0f32], 1.0).is_err());
        assert!(ElevationFunction::sampled(vec![1.0f32, 2.0], 0.0).is_err());
    }
}
