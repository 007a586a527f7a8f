//! Graph search.
//!
//! Tree search plus an explored set: states are expanded at most once.

use crate::algorithms::SearchResult;
use crate::data_structures::ExploredSet;
use crate::data_structures::FifoFrontier;
use crate::error::SearchError;
use crate::problem::Problem;
use crate::search::SearchTree;
use crate::search::SearchTreeIndex;
use crate::search::child_node;
use crate::stats::SearchStats;

/// Graph search over a problem.
///
/// Every child is queued, but nodes whose state was already expanded are
/// dropped when popped. Terminates on finite spaces, yet the solution found is
/// neither the cheapest nor the shortest in general.
#[derive(Debug)]
pub struct GraphSearch<'p, P: Problem> {
    problem: &'p P,
    search_tree: SearchTree<P::State, P::Action, P::Cost>,
    open: FifoFrontier<P::State>,
    explored: ExploredSet<P::State>,
    stats: SearchStats,
}

impl<'p, P: Problem> GraphSearch<'p, P> {
    #[must_use]
    pub fn new(problem: &'p P) -> Self {
        let mut search_tree = SearchTree::new();
        let mut open = FifoFrontier::plain();

        let s = problem.initial_state().clone();
        let root = search_tree.push_root(s.clone());
        open.push_back(s, root);

        Self {
            problem,
            search_tree,
            open,
            explored: ExploredSet::new(),
            stats: SearchStats::default(),
        }
    }

    /// Runs until a goal is popped or the frontier is exhausted.
    pub fn run(&mut self) -> SearchResult<P> {
        log::debug!("Graph search from {:?}", self.problem.initial_state());

        while let Some((s, node)) = self.open.pop_front() {
            if self.explored.contains(&s) {
                self.stats.duplicates += 1;
                continue;
            }
            if self.problem.goal_test(&s) {
                log::debug!(
                    "Graph search reached {s:?} after expanding {} nodes",
                    self.stats.expanded
                );
                self.open.clear();
                return Ok(self.search_tree.path(node));
            }
            self.explored.mark(s.clone());
            self.expand(&s, node);
        }

        log::debug!(
            "Graph search exhausted {} states",
            self.explored.len()
        );
        Err(SearchError::NoSolution {
            expanded: self.stats.expanded,
        })
    }

    fn expand(&mut self, s: &P::State, node: SearchTreeIndex) {
        log::trace!("Expanding {s:?}");
        self.stats.expanded += 1;

        for a in self.problem.actions(s) {
            let child = child_node(self.problem, &self.search_tree, node, a);
            self.stats.generated += 1;
            let child_state = child.state().clone();
            let child_index = self.search_tree.push(child);
            self.open.push_back(child_state, child_index);
        }
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            frontier_high_water: self.open.high_water(),
            tree_bytes: self.search_tree.size_in_bytes(),
            frontier_bytes: self.open.size_in_bytes(),
            explored_bytes: self.explored.size_in_bytes(),
            ..self.stats
        }
    }
}

/// Runs a [`GraphSearch`] on `problem`.
pub fn graph_search<P: Problem>(problem: &P) -> SearchResult<P> {
    GraphSearch::new(problem).run()
}
