//! Sample problems.
//!
//! Small but complete problem domains used to exercise the strategies, from
//! the command line, tests and benchmarks alike.

pub mod graph;
pub mod maze_2d;
