//! Capabilities required from the values a search moves around.
//!
//! Searches never look inside states or actions. States are cloned into the
//! search tree, hashed into the explored set and compared for duplicate
//! detection. Actions are cloned into solutions.

use std::fmt::Debug;
use std::hash::Hash;

pub use crate::cost::Cost;

/// A point in the search space.
pub trait State: Clone + Debug + PartialEq + Eq + Hash {}

/// A label for a transition between states.
pub trait Action: Clone + Debug + PartialEq {}

macro_rules! impl_state_and_action {
    ($($t:ty),*) => {
        $(
            impl State for $t {}
            impl Action for $t {}
        )*
    };
}

impl_state_and_action!(
    &'static str,
    String,
    char,
    bool,
    u8,
    u16,
    u32,
    u64,
    usize,
    i8,
    i16,
    i32,
    i64,
    isize
);

impl<X: State, Y: State> State for (X, Y) {}
impl<X: Action, Y: Action> Action for (X, Y) {}
