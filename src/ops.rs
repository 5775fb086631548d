use std::iter::Sum;

use num::Float;
use serde::{Deserialize, Serialize};

use crate::math::interp;

/// And operator method for combining the propositions of a rule premise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AndOp {
    #[default]
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
}

impl AndOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
            Self::BoundedProd => F::max(F::zero(), u + v - F::one()),
            Self::DrasticProd => {
                if u == F::one() {
                    v
                } else if v == F::one() {
                    u
                } else {
                    F::zero()
                }
            },
        }
    }
}

/// Or operator method for combining the propositions of a rule premise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl OrOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
            Self::DrasticSum => {
                if u == F::zero() {
                    v
                } else if v == F::zero() {
                    u
                } else {
                    F::one()
                }
            },
        }
    }
}

/// Method for reducing an aggregated membership function to a crisp value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefuzzificationOp {
    /// Center of gravity
    #[default]
    Centroid,
    /// Point splitting the area under the curve in two halves
    Bisector,
    /// Mean of the values for which the membership function is maximum
    MeanOfMaximum,
    /// Smallest value for which the membership function is maximum
    SmallestOfMaximum,
    /// Largest value for which the membership function is maximum
    LargestOfMaximum,
}

impl DefuzzificationOp {
    /// `membership` must be sampled on `universe` and must not be all zero;
    /// callers check for that and report it as an error.
    pub(crate) fn call<F: Float + Sum>(self, universe: &[F], membership: &[F]) -> F {
        debug_assert_eq!(universe.len(), membership.len());

        if universe.len() == 1 {
            return universe[0];
        }

        let two = F::one() + F::one();

        match self {
            Self::Centroid => {
                // Each segment is a rectangle under the lower sample plus a
                // right triangle up to the higher one.
                let three = two + F::one();
                let (num, den) = universe
                    .windows(2)
                    .zip(membership.windows(2))
                    .map(|(u, m)| {
                        let base = u[1] - u[0];
                        let area_rect = F::min(m[0], m[1]) * base;
                        let center_rect = u[0] + base / two;
                        let area_tri = base * F::abs(m[1] - m[0]) / two;
                        let center_tri = if m[1] > m[0] {
                            u[0] + two / three * base
                        } else {
                            u[0] + base / three
                        };

                        (area_rect * center_rect + area_tri * center_tri, area_rect + area_tri)
                    })
                    .fold((F::zero(), F::zero()), |(num, den), (moment, area)| {
                        (num + moment, den + area)
                    });

                num / den
            },
            Self::Bisector => {
                let areas: Vec<F> = universe
                    .windows(2)
                    .zip(membership.windows(2))
                    .map(|(u, m)| (m[0] + m[1]) * (u[1] - u[0]) / two)
                    .collect();
                let target = areas.iter().copied().sum::<F>() / two;
                let mut cum_area = F::zero();

                for (i, area) in areas.iter().copied().enumerate() {
                    let prev = cum_area;
                    cum_area = cum_area + area;

                    if cum_area >= target && area > F::zero() {
                        return interp(target, &[(prev, universe[i]), (cum_area, universe[i + 1])]);
                    }
                }

                universe[universe.len() - 1]
            },
            Self::MeanOfMaximum => {
                let (len, sum) = maxima(universe, membership).fold((0usize, F::zero()), |(len, sum), u| (len + 1, sum + u));

                sum / F::from(len).unwrap_or_else(F::one)
            },
            Self::SmallestOfMaximum => maxima(universe, membership).fold(F::infinity(), F::min),
            Self::LargestOfMaximum => maxima(universe, membership).fold(F::neg_infinity(), F::max),
        }
    }
}

/// Universe points at which `membership` peaks
fn maxima<'a, F: Float>(universe: &'a [F], membership: &'a [F]) -> impl Iterator<Item = F> + 'a {
    let maximum = membership.iter().copied().fold(F::neg_infinity(), F::max);

    universe
        .iter()
        .copied()
        .zip(membership.iter().copied())
        .filter_map(move |(u, m)| if m == maximum { Some(u) } else { None })
}
