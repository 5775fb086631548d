//! Membership functions mapping a crisp point to a degree in [0, 1].

use crate::error::{FuzzyError, FuzzyResult};
use crate::linspace::Linspace;
use crate::math::interp;
use crate::universe::Universe;

/// The shape of a fuzzy set.
///
/// Variants may be built directly, but the checked constructors (and
/// `Variables::add_set`, which re-validates) reject malformed breakpoints.
#[derive(Clone, Debug, PartialEq)]
pub enum Membership {
    /// Rises from 0 at `a` to 1 at `b`, falls back to 0 at `c`.
    /// `a == b` or `b == c` give a ramp with a vertical edge.
    Triangular { a: f64, b: f64, c: f64 },
    /// Rises on `[a, b]`, holds 1 on `[b, c]`, falls on `[c, d]`
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
    /// Linear interpolation through `(x, degree)` points sorted by x
    Piecewise(Vec<(f64, f64)>),
}

impl Membership {
    pub fn triangular(a: f64, b: f64, c: f64) -> FuzzyResult<Self> {
        let mf = Membership::Triangular { a, b, c };
        mf.validate()?;
        Ok(mf)
    }

    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> FuzzyResult<Self> {
        let mf = Membership::Trapezoidal { a, b, c, d };
        mf.validate()?;
        Ok(mf)
    }

    pub fn piecewise(points: impl IntoIterator<Item = (f64, f64)>) -> FuzzyResult<Self> {
        let mf = Membership::Piecewise(points.into_iter().collect());
        mf.validate()?;
        Ok(mf)
    }

    pub fn validate(&self) -> FuzzyResult<()> {
        let invalid = |msg: String| Err(FuzzyError::InvalidMembershipFunction(msg));

        match self {
            Membership::Triangular { a, b, c } => {
                if ![a, b, c].iter().all(|p| p.is_finite()) {
                    return invalid(format!("non-finite triangle [{a}, {b}, {c}]"));
                }
                if !(a <= b && b <= c) {
                    return invalid(format!("triangle [{a}, {b}, {c}] requires a <= b <= c"));
                }
            },
            Membership::Trapezoidal { a, b, c, d } => {
                if ![a, b, c, d].iter().all(|p| p.is_finite()) {
                    return invalid(format!("non-finite trapezoid [{a}, {b}, {c}, {d}]"));
                }
                if !(a <= b && b <= c && c <= d) {
                    return invalid(format!("trapezoid [{a}, {b}, {c}, {d}] requires a <= b <= c <= d"));
                }
            },
            Membership::Piecewise(points) => {
                if points.is_empty() {
                    return invalid("piecewise function without points".into());
                }
                for &(x, y) in points {
                    if !x.is_finite() || !(0. ..=1.).contains(&y) {
                        return invalid(format!("piecewise point ({x}, {y}) out of range"));
                    }
                }
                if points.windows(2).any(|w| w[1].0 < w[0].0) {
                    return invalid("piecewise points must be sorted by x".into());
                }
            },
        }

        Ok(())
    }

    /// Degree of membership of `x`. NaN maps to 0.
    pub fn evaluate(&self, x: f64) -> f64 {
        if x.is_nan() {
            return 0.;
        }

        match *self {
            Membership::Triangular { a, b, c } => {
                if x == b {
                    1.
                } else if x < b {
                    // a == b never reaches the division: x < b implies x <= a
                    if x <= a { 0. } else { (x - a) / (b - a) }
                } else if x >= c {
                    0.
                } else {
                    (c - x) / (c - b)
                }
            },
            Membership::Trapezoidal { a, b, c, d } => {
                if b <= x && x <= c {
                    1.
                } else if x < b {
                    if x <= a { 0. } else { (x - a) / (b - a) }
                } else if x >= d {
                    0.
                } else {
                    (d - x) / (d - c)
                }
            },
            Membership::Piecewise(ref points) => interp(x, points),
        }
    }

    /// The function evaluated at every point of `universe`
    pub fn sample(&self, universe: &Universe) -> Vec<f64> {
        universe.points().iter().map(|x| self.evaluate(*x)).collect()
    }
}

/// Evenly spaced triangles covering `universe`, one per label.
///
/// Adjacent sets cross at 0.5 and degrees sum to 1 at every point; the outer
/// sets are ramps pinned to the universe bounds. A single label covers the
/// whole universe with degree 1.
pub fn auto_partition<S: AsRef<str>>(universe: &Universe, labels: &[S]) -> FuzzyResult<Vec<(String, Membership)>> {
    let (min, max) = (universe.min(), universe.max());
    let n = labels.len();

    match n {
        0 => Err(FuzzyError::EmptyPartition),
        1 => Ok(vec![(labels[0].as_ref().to_owned(), Membership::Trapezoidal {
            a: min,
            b: min,
            c: max,
            d: max,
        })]),
        _ => {
            let half_width = (max - min) / (n - 1) as f64;

            Ok(labels
                .iter()
                .zip(Linspace::new(min, max, n))
                .enumerate()
                .map(|(i, (label, center))| {
                    let a = if i == 0 { min } else { center - half_width };
                    let c = if i == n - 1 { max } else { center + half_width };

                    (label.as_ref().to_owned(), Membership::Triangular { a, b: center, c })
                })
                .collect())
        },
    }
}
