/// Step and path costs.
///
/// Path costs are sums of step costs, so a `Cost` has to be addable and
/// totally ordered. Path costs saturate at the upper bound, which is then no
/// longer [`valid`](Cost::valid). Signed costs are accepted, but negative step costs void
/// the least-cost guarantee of uniform-cost search. Nothing checks for them.
pub trait Cost:
    Copy
    + std::fmt::Debug
    + std::fmt::Display
    + PartialEq
    + core::cmp::Eq
    + PartialOrd
    + Ord
    + num_traits::SaturatingAdd
    + num_traits::bounds::UpperBounded
    + num_traits::Zero
    + num_traits::One
    + std::ops::Add<Self, Output = Self>
    + std::ops::Sub<Self, Output = Self>
    + std::ops::AddAssign
{
    /// Whether this is a usable cost rather than the upper-bound sentinel.
    #[inline(always)]
    fn valid(&self) -> bool {
        *self != num_traits::bounds::UpperBounded::max_value()
    }
}

macro_rules! impl_cost {
    ($($t:ty),*) => {
        $(impl Cost for $t {})*
    };
}

impl_cost!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
