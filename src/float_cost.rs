//! Real-valued costs.
//!
//! Floats are not `Ord`, so they get wrapped in an [`OrderedFloat`] before
//! they can rank frontier entries.

use std::cmp::Eq;
use std::fmt::Debug;

use derive_more::Display;
use num_traits::One;
use num_traits::SaturatingAdd;
use num_traits::Zero;
use num_traits::bounds::UpperBounded;
use ordered_float::FloatCore;
use ordered_float::OrderedFloat;

use crate::cost::Cost;

#[derive(Copy, Clone, Default, Debug, Display)]
#[repr(transparent)]
#[display("{_0}")]
pub struct FloatCost<F: FloatCore>(pub OrderedFloat<F>);

impl<F> Cost for FloatCost<F>
where
    FloatCost<F>: Debug + std::ops::AddAssign + Ord + Eq + UpperBounded,
    F: FloatCore + std::fmt::Display,
{
}

impl<F> FloatCost<F>
where
    F: FloatCore,
{
    pub fn new(f: F) -> Self {
        Self(OrderedFloat(f))
    }

    /// The upper-bound sentinel. Not a valid path cost.
    #[inline(always)]
    pub fn infinity() -> Self {
        Self(OrderedFloat(F::infinity()))
    }
}

impl<F: FloatCore> From<F> for FloatCost<F> {
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

impl<F> std::ops::Add for FloatCost<F>
where
    F: FloatCore,
{
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}
impl<F> std::ops::Sub for FloatCost<F>
where
    F: FloatCore,
{
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}
impl<F> std::ops::Mul for FloatCost<F>
where
    F: FloatCore,
{
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}
impl<F> std::ops::AddAssign for FloatCost<F>
where
    F: FloatCore,
{
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0 + rhs.0;
    }
}
/// Float addition already saturates at infinity.
impl<F> SaturatingAdd for FloatCost<F>
where
    F: FloatCore,
{
    fn saturating_add(&self, rhs: &Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl<F> Zero for FloatCost<F>
where
    F: FloatCore,
{
    #[inline(always)]
    fn is_zero(&self) -> bool {
        self.0 == OrderedFloat(F::zero())
    }
    #[inline(always)]
    fn zero() -> Self {
        Self(OrderedFloat(F::zero()))
    }
}
impl<F> One for FloatCost<F>
where
    F: FloatCore,
{
    #[inline(always)]
    fn one() -> Self {
        Self(OrderedFloat(F::one()))
    }
}
impl<F> UpperBounded for FloatCost<F>
where
    F: FloatCore,
{
    fn max_value() -> Self {
        Self::infinity()
    }
}

impl<F> PartialOrd for FloatCost<F>
where
    F: FloatCore,
{
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<F> Ord for FloatCost<F>
where
    F: FloatCore,
{
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // `Ord` is forwarded to `OrderedFloat`
        self.0.cmp(&other.0)
    }
}
impl<F> PartialEq for FloatCost<F>
where
    F: FloatCore,
{
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}
impl<F> Eq for FloatCost<F> where F: FloatCore {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero() {
        assert!(FloatCost::new(0.0f32).is_zero());
        assert!(FloatCost::<f64>::zero().is_zero());
        assert!(!FloatCost::new(0.5f64).is_zero());
    }

    #[test]
    fn order() {
        assert!(FloatCost::new(0.0f32) <= FloatCost::new(0.0f32));
        assert!(FloatCost::new(0.0f32) == FloatCost::new(0.0f32));
        assert!(FloatCost::new(0.25f64) < FloatCost::new(0.5f64));
        assert!(FloatCost::new(1e9f64) < FloatCost::infinity());
    }

    #[test]
    fn sum() {
        let mut f = FloatCost::new(0.0f32);
        f += FloatCost::new(1.0f32);
        f += FloatCost::new(1.5f32);
        assert_eq!(f, FloatCost::new(2.5f32));
        assert!(f.valid());
        f += FloatCost::infinity();
        assert_eq!(f, FloatCost::max_value());
        assert!(!f.valid());
    }

    #[test]
    fn one() {
        let two = FloatCost::new(2.0f64);
        assert_eq!(FloatCost::<f64>::one() * two, two);
        assert_eq!(two * FloatCost::new(1.5), FloatCost::new(3.0));
    }

    #[test]
    fn display_shows_the_number() {
        assert_eq!(FloatCost::new(1.5f64).to_string(), "1.5");
    }
}
