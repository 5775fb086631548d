use serde::Serialize;

use crate::error::{FuzzyError, FuzzyResult};
use crate::linspace::Linspace;

// Keeps 0..=1 step 0.01 at 101 points despite (1.0 - 0.0) / 0.01 == 99.99999999999999
const STEP_TOLERANCE: f64 = 1e-9;

/// Upper bound on the number of grid points in one universe
pub(crate) const MAX_POINTS: usize = 1 << 24;

/// A discretized, closed numeric range with a fixed step.
///
/// The points double as the sampling grid for membership functions and the
/// integration grid for defuzzification.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Universe {
    points: Vec<f64>,
    step: f64,
}

impl Universe {
    /// Samples `min, min + step, ...` up to and including `max` when `max` lies on the grid.
    /// Grids of more than `MAX_POINTS` points are rejected.
    pub fn new(min: f64, max: f64, step: f64) -> FuzzyResult<Self> {
        if !min.is_finite() || !max.is_finite() || !step.is_finite() || step <= 0. || max < min {
            return Err(FuzzyError::InvalidUniverse { min, max, step });
        }

        let intervals = ((max - min) / step + STEP_TOLERANCE).floor();

        if !intervals.is_finite() || intervals >= MAX_POINTS as f64 {
            return Err(FuzzyError::InvalidUniverse { min, max, step });
        }

        let num = (intervals as usize)
            .checked_add(1)
            .ok_or(FuzzyError::InvalidUniverse { min, max, step })?;
        let mut points: Vec<f64> = Linspace::with_step(min, step, num).collect();

        // min + i * step can round past max on the last point
        if let Some(last) = points.last_mut() {
            *last = last.min(max);
        }

        Ok(Self { points, step })
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    // Never true, construction always yields at least one point
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn min(&self) -> f64 {
        self.points[0]
    }

    pub fn max(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    /// Clamps `x` onto the universe bounds. NaN is passed through.
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min(), self.max())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universe_grid() {
        let altitude = Universe::new(0., 40000., 1000.).unwrap();
        assert_eq!(altitude.len(), 41);
        assert_eq!(altitude.min(), 0.);
        assert_eq!(altitude.max(), 40000.);

        let throttle = Universe::new(0., 1., 0.01).unwrap();
        assert_eq!(throttle.len(), 101);
        assert!((throttle.max() - 1.).abs() < 1e-12);
        assert!(throttle.points().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_universe_off_grid_max() {
        // The last point stays inside the closed interval
        let u = Universe::new(0., 10., 3.).unwrap();
        assert_eq!(u.points(), &[0., 3., 6., 9.]);
    }

    #[test]
    fn test_single_point_universe() {
        let u = Universe::new(2., 2., 0.5).unwrap();
        assert_eq!(u.points(), &[2.]);
        assert_eq!(u.clamp(100.), 2.);
    }

    #[test]
    fn test_invalid_universe() {
        assert!(matches!(Universe::new(0., 1., 0.), Err(FuzzyError::InvalidUniverse { .. })));
        assert!(matches!(Universe::new(0., 1., -0.1), Err(FuzzyError::InvalidUniverse { .. })));
        assert!(matches!(Universe::new(1., 0., 0.1), Err(FuzzyError::InvalidUniverse { .. })));
        assert!(matches!(Universe::new(f64::NAN, 1., 0.1), Err(FuzzyError::InvalidUniverse { .. })));
    }

    #[test]
    fn test_oversized_universe() {
        // max - min overflows to infinity
        assert!(matches!(
            Universe::new(-f64::MAX, f64::MAX, 1.),
            Err(FuzzyError::InvalidUniverse { .. })
        ));
        assert!(matches!(Universe::new(0., 1e12, 1e-6), Err(FuzzyError::InvalidUniverse { .. })));
        assert!(Universe::new(0., MAX_POINTS as f64, 1.).is_err());
    }

    #[test]
    fn test_last_point_within_max() {
        let u = Universe::new(0., 0.3, 0.1).unwrap();
        assert_eq!(u.len(), 4);
        assert_eq!(u.max(), 0.3);

        let throttle = Universe::new(0., 1.09, 0.01).unwrap();
        assert_eq!(throttle.len(), 110);
        assert!(throttle.max() <= 1.09);
        assert!(throttle.points().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_clamp() {
        let pitch = Universe::new(-10., 15., 1.).unwrap();
        assert_eq!(pitch.clamp(-40.), -10.);
        assert_eq!(pitch.clamp(3.5), 3.5);
        assert_eq!(pitch.clamp(99.), 15.);
    }
}
