//! Uniform-cost search.
//!
//! Expands nodes in order of path cost, keeping a single frontier entry per
//! state. When a cheaper path to a queued state shows up, the entry is
//! re-ranked in place and pointed at the new node.
//!
//! The first goal popped is a least-cost solution as long as step costs are
//! non-negative. Negative costs are accepted but void that guarantee, since a
//! state may already be explored when a cheaper path to it is generated.

use crate::algorithms::SearchResult;
use crate::data_structures::ExploredSet;
use crate::data_structures::PriorityFrontier;
use crate::error::SearchError;
use crate::problem::Problem;
use crate::search::SearchTree;
use crate::search::SearchTreeIndex;
use crate::search::child_node;
use crate::stats::SearchStats;

/// Uniform-cost search over a problem.
#[derive(Debug)]
pub struct UniformCostSearch<'p, P: Problem> {
    problem: &'p P,
    search_tree: SearchTree<P::State, P::Action, P::Cost>,
    open: PriorityFrontier<P::State, P::Cost>,
    explored: ExploredSet<P::State>,
    stats: SearchStats,
}

impl<'p, P: Problem> UniformCostSearch<'p, P> {
    #[must_use]
    pub fn new(problem: &'p P) -> Self {
        let mut search_tree = SearchTree::new();
        let mut open = PriorityFrontier::new();

        let s = problem.initial_state().clone();
        let root = search_tree.push_root(s.clone());
        let g = search_tree[root].path_cost();
        open.push(s, root, g);

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
        log::debug!("UCS from {:?}", self.problem.initial_state());

        while let Some(entry) = self.open.pop_min() {
            if self.problem.goal_test(&entry.state) {
                log::debug!(
                    "UCS reached {:?} at cost {} after expanding {} nodes",
                    entry.state,
                    entry.g(),
                    self.stats.expanded
                );
                self.open.clear();
                return Ok(self.search_tree.path(entry.node));
            }
            self.explored.mark(entry.state.clone());
            self.expand(&entry.state, entry.node);
        }

        log::debug!("UCS exhausted {} states", self.explored.len());
        Err(SearchError::NoSolution {
            expanded: self.stats.expanded,
        })
    }

    fn expand(&mut self, s: &P::State, node: SearchTreeIndex) {
        log::trace!("Expanding {s:?} at g={}", self.search_tree[node].path_cost());
        self.stats.expanded += 1;

        for a in self.problem.actions(s) {
            let child = child_node(self.problem, &self.search_tree, node, a);
            self.stats.generated += 1;

            if self.explored.contains(child.state()) {
                self.stats.duplicates += 1;
                continue;
            }

            let child_g = child.path_cost();
            match self.open.find_by_state(child.state()) {
                None => {
                    let child_state = child.state().clone();
                    let child_index = self.search_tree.push(child);
                    self.open.push(child_state, child_index, child_g);
                }
                Some(slot) if child_g < self.open[slot].g() => {
                    let child_index = self.search_tree.push(child);
                    self.open.decrease_priority(slot, child_index, child_g);
                    self.stats.decreased_keys += 1;
                }
                Some(_) => {
                    self.stats.duplicates += 1;
                }
            }
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

/// Runs a [`UniformCostSearch`] on `problem`.
pub fn uniform_cost_search<P: Problem>(problem: &P) -> SearchResult<P> {
    UniformCostSearch::new(problem).run()
}
