//! Implementation of search algorithms.
//!
//! These algorithms can do path-finding on generic search problems. All of
//! them are uninformed: the only guidance they get is the step cost.
//!
//! | Strategy | Frontier | Explored set | Goal test | Finds |
//! |---|---|---|---|---|
//! | [`TreeSearch`] | FIFO | none | on pop | some path, may loop forever |
//! | [`GraphSearch`] | FIFO | yes | on pop | some path |
//! | [`BreadthFirstSearch`] | FIFO | yes | on generation | fewest actions |
//! | [`UniformCostSearch`] | by path cost | yes | on pop | least cost |

use derive_more::Display;
use thiserror::Error;

use crate::error::SearchError;
use crate::problem::Problem;
use crate::solution::Solution;
use crate::stats::SearchStats;

pub mod breadth_first;
pub mod graph_search;
pub mod tree_search;
pub mod uniform_cost;

pub use breadth_first::BreadthFirstSearch;
pub use breadth_first::breadth_first_search;
pub use graph_search::GraphSearch;
pub use graph_search::graph_search;
pub use tree_search::TreeSearch;
pub use tree_search::tree_search;
pub use uniform_cost::UniformCostSearch;
pub use uniform_cost::uniform_cost_search;

/// The solution type of a problem.
pub type ProblemSolution<P> =
    Solution<<P as Problem>::State, <P as Problem>::Action, <P as Problem>::Cost>;

/// What every search returns: a solution, or proof that the frontier ran dry.
pub type SearchResult<P> = Result<ProblemSolution<P>, SearchError>;

/// A search strategy, for choosing one at runtime.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Tree search. Does not terminate on spaces with cycles.
    #[display("tree")]
    Tree,
    /// Graph search. Never expands a state twice.
    #[display("graph")]
    Graph,
    /// Breadth-first search. Finds a solution with the fewest actions.
    #[display("bfs")]
    BreadthFirst,
    /// Uniform-cost search. Finds a least-cost solution.
    #[display("ucs")]
    UniformCost,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Tree,
        Strategy::Graph,
        Strategy::BreadthFirst,
        Strategy::UniformCost,
    ];

    /// A human readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Tree => "Tree search",
            Strategy::Graph => "Graph search",
            Strategy::BreadthFirst => "Breadth-first search",
            Strategy::UniformCost => "Uniform-cost search",
        }
    }

    /// Whether the strategy is guaranteed to stop on finite spaces with cycles.
    pub fn terminates_on_cycles(&self) -> bool {
        !matches!(self, Strategy::Tree)
    }

    pub fn solve<P: Problem>(&self, problem: &P) -> SearchResult<P> {
        self.solve_with_stats(problem).0
    }

    /// Solves `problem`, also returning what it took.
    pub fn solve_with_stats<P: Problem>(&self, problem: &P) -> (SearchResult<P>, SearchStats) {
        match self {
            Strategy::Tree => {
                let mut search = TreeSearch::new(problem);
                (search.run(), search.stats())
            }
            Strategy::Graph => {
                let mut search = GraphSearch::new(problem);
                (search.run(), search.stats())
            }
            Strategy::BreadthFirst => {
                let mut search = BreadthFirstSearch::new(problem);
                (search.run(), search.stats())
            }
            Strategy::UniformCost => {
                let mut search = UniformCostSearch::new(problem);
                (search.run(), search.stats())
            }
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown strategy '{0}'. Expected one of: tree, graph, bfs, ucs")]
pub struct UnknownStrategy(pub String);

impl std::str::FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}
