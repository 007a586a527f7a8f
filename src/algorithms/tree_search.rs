//! Tree search.
//!
//! Expands nodes first-in first-out and never remembers which states were
//! already seen, so the same state may be expanded over and over through
//! different paths.

use crate::algorithms::SearchResult;
use crate::data_structures::FifoFrontier;
use crate::error::SearchError;
use crate::problem::Problem;
use crate::search::SearchTree;
use crate::search::SearchTreeIndex;
use crate::search::child_node;
use crate::stats::SearchStats;

/// Tree search over a problem.
///
/// May not terminate on spaces with cycles, since it keeps expanding them
/// for as long as no goal is popped. Use
/// [`GraphSearch`](crate::algorithms::GraphSearch) for those.
#[derive(Debug)]
pub struct TreeSearch<'p, P: Problem> {
    problem: &'p P,
    search_tree: SearchTree<P::State, P::Action, P::Cost>,
    open: FifoFrontier<P::State>,
    stats: SearchStats,
}

impl<'p, P: Problem> TreeSearch<'p, P> {
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
            stats: SearchStats::default(),
        }
    }

    /// Runs until a goal is popped or the frontier is exhausted.
    ///
    /// The search is spent after this returns, running it again yields
    /// [`SearchError::NoSolution`].
    pub fn run(&mut self) -> SearchResult<P> {
        log::debug!("Tree search from {:?}", self.problem.initial_state());

        while let Some((s, node)) = self.open.pop_front() {
            if self.problem.goal_test(&s) {
                log::debug!(
                    "Tree search reached {s:?} after expanding {} nodes",
                    self.stats.expanded
                );
                self.open.clear();
                return Ok(self.search_tree.path(node));
            }
            self.expand(&s, node);
        }

        log::debug!(
            "Tree search exhausted after expanding {} nodes",
            self.stats.expanded
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

    /// Counters so far, with memory estimates taken now.
    pub fn stats(&self) -> SearchStats {
        SearchStats {
            frontier_high_water: self.open.high_water(),
            tree_bytes: self.search_tree.size_in_bytes(),
            frontier_bytes: self.open.size_in_bytes(),
            explored_bytes: 0,
            ..self.stats
        }
    }
}

/// Runs a [`TreeSearch`] on `problem`.
pub fn tree_search<P: Problem>(problem: &P) -> SearchResult<P> {
    TreeSearch::new(problem).run()
}
