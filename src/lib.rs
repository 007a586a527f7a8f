//! Uninformed state-space search.
//!
//! Describe a search problem through [`problem::Problem`] (or build one from
//! closures with [`problem::ProblemDescriptor`]) and solve it with one of the
//! strategies in [`algorithms`].

use shadow_rs::shadow;

shadow!(build);

// Internals
// ---------
pub mod data_structures;
pub mod heap_primitives;

// Search space and problems
// -------------------------
pub mod cost;
pub mod error;
pub mod float_cost;
pub mod problem;
pub mod search;
pub mod solution;
pub mod space;
pub mod stats;

// Problems
// --------
pub mod problems;

// Algorithms
// ----------
pub mod algorithms;
