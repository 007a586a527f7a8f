//! Breadth-first search.

use crate::algorithms::SearchResult;
use crate::data_structures::ExploredSet;
use crate::data_structures::FifoFrontier;
use crate::error::SearchError;
use crate::problem::Problem;
use crate::search::SearchTree;
use crate::search::SearchTreeIndex;
use crate::search::child_node;
use crate::stats::SearchStats;

/// Breadth-first search over a problem.
///
/// Goals are tested when nodes are generated instead of when they are popped,
/// which saves expanding a whole layer. The solution found has the fewest
/// actions possible, but not necessarily the least cost.
///
/// A state is queued at most once: children are dropped when their state was
/// already expanded or is still waiting in the frontier.
#[derive(Debug)]
pub struct BreadthFirstSearch<'p, P: Problem> {
    problem: &'p P,
    search_tree: SearchTree<P::State, P::Action, P::Cost>,
    open: FifoFrontier<P::State>,
    explored: ExploredSet<P::State>,
    stats: SearchStats,
}

impl<'p, P: Problem> BreadthFirstSearch<'p, P> {
    #[must_use]
    pub fn new(problem: &'p P) -> Self {
        let mut search_tree = SearchTree::new();
        let mut open = FifoFrontier::tracked();

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

    /// Runs until a goal is generated or the frontier is exhausted.
    pub fn run(&mut self) -> SearchResult<P> {
        log::debug!("BFS from {:?}", self.problem.initial_state());

        // Only the root is goal-tested outside of generation.
        if self.search_tree.len() == 1 && self.problem.goal_test(self.problem.initial_state()) {
            if let Some((_, root)) = self.open.pop_front() {
                log::debug!("BFS started on a goal");
                return Ok(self.search_tree.path(root));
            }
        }

        while let Some((s, node)) = self.open.pop_front() {
            self.explored.mark(s.clone());
            if let Some(goal) = self.expand(&s, node) {
                log::debug!(
                    "BFS generated a goal after expanding {} nodes",
                    self.stats.expanded
                );
                self.open.clear();
                return Ok(self.search_tree.path(goal));
            }
        }

        log::debug!("BFS exhausted {} states", self.explored.len());
        Err(SearchError::NoSolution {
            expanded: self.stats.expanded,
        })
    }

    /// Generates the children of `node`, returning the first one on a goal.
    fn expand(&mut self, s: &P::State, node: SearchTreeIndex) -> Option<SearchTreeIndex> {
        log::trace!("Expanding {s:?}");
        self.stats.expanded += 1;

        for a in self.problem.actions(s) {
            let child = child_node(self.problem, &self.search_tree, node, a);
            self.stats.generated += 1;

            if self.explored.contains(child.state()) || self.open.contains(child.state()) {
                self.stats.duplicates += 1;
                continue;
            }

            let is_goal = self.problem.goal_test(child.state());
            let child_state = child.state().clone();
            let child_index = self.search_tree.push(child);
            if is_goal {
                return Some(child_index);
            }
            self.open.push_back(child_state, child_index);
        }
        None
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

/// Runs a [`BreadthFirstSearch`] on `problem`.
pub fn breadth_first_search<P: Problem>(problem: &P) -> SearchResult<P> {
    BreadthFirstSearch::new(problem).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::ProblemDescriptor;

    /// States `0..=20`. `j` jumps +4 at cost 10, `s` steps +1 at cost 1.
    fn jumps() -> impl Problem<State = u8, Action = char, Cost = u32> {
        ProblemDescriptor::new(
            0u8,
            |s: &u8| {
                let mut actions = vec![];
                if *s < 20 {
                    actions.push('s');
                }
                if *s <= 16 {
                    actions.push('j');
                }
                actions
            },
            |s: &u8, a: &char| if *a == 'j' { s + 4 } else { s + 1 },
            |s: &u8| *s == 12,
            |_from: &u8, a: &char, _to: &u8| if *a == 'j' { 10 } else { 1 },
        )
    }

    #[test]
    fn finds_fewest_actions() {
        let p = jumps();
        let solution = breadth_first_search(&p).unwrap();

        assert_eq!(solution.actions, vec!['j', 'j', 'j']);
        assert_eq!(solution.cost, 30);
        assert!(p.is_valid_solution(&solution));
    }

    #[test]
    fn root_goal_is_trivial() {
        let p = ProblemDescriptor::new(
            12u8,
            |_s: &u8| vec!['s'],
            |s: &u8, _a: &char| s + 1,
            |s: &u8| *s == 12,
            |_from: &u8, _a: &char, _to: &u8| 1u32,
        );
        let mut search = BreadthFirstSearch::new(&p);
        let solution = search.run().unwrap();

        assert!(solution.is_empty());
        assert_eq!(solution.start, 12);
        assert_eq!(search.stats().expanded, 0);
    }

    #[test]
    fn queues_each_state_once() {
        let p = jumps();
        let mut search = BreadthFirstSearch::new(&p);
        let _ = search.run().unwrap();
        let stats = search.stats();

        // Every state in the tree is distinct.
        assert_eq!(stats.generated - stats.duplicates + 1, search.search_tree.len());
        assert!(stats.duplicates > 0);
    }
}
