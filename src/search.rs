//! The search tree.
//!
//! Nodes are stored in an arena owned by a single search run and refer to
//! their parents through [`SearchTreeIndex`]. A parent therefore outlives
//! every child pointing at it, no matter which stack frame created it.

use std::fmt::Debug;

use num_traits::SaturatingAdd;

use crate::problem::Problem;
use crate::solution::Solution;
use crate::space::Action;
use crate::space::Cost;
use crate::space::State;

/// A reference to a `SearchTreeNode<St, A, C>` within its `SearchTree`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SearchTreeIndex {
    index: usize,
}

impl SearchTreeIndex {
    #[inline(always)]
    fn new(index: usize) -> Self {
        Self { index }
    }
}

#[derive(Debug)]
#[cfg_attr(feature = "inspect", derive(Clone))]
pub struct SearchTreeNode<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    /// The parent and the action that led here. `None` only at the root.
    pub(crate) parent: Option<(SearchTreeIndex, A)>,
    pub(crate) state: St,
    /// Cumulative cost from the root.
    pub(crate) g: C,
    pub(crate) depth: usize,
}

impl<St, A, C> SearchTreeNode<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub fn new_root(s: St) -> Self {
        Self {
            parent: None,
            state: s,
            g: C::zero(),
            depth: 0,
        }
    }

    #[inline(always)]
    pub fn state(&self) -> &St {
        &self.state
    }
    #[inline(always)]
    pub fn path_cost(&self) -> C {
        self.g
    }
    #[inline(always)]
    pub fn depth(&self) -> usize {
        self.depth
    }
    /// The action taken from the parent. `None` at the root.
    #[inline(always)]
    pub fn action(&self) -> Option<&A> {
        self.parent.as_ref().map(|(_, a)| a)
    }
    #[inline(always)]
    pub fn parent(&self) -> Option<SearchTreeIndex> {
        self.parent.as_ref().map(|(p, _)| *p)
    }
    #[inline(always)]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Builds the node reached by applying `action` on the node at `parent`.
///
/// The child is not added to the tree; push it once the search decides to
/// keep it.
pub fn child_node<P>(
    problem: &P,
    tree: &SearchTree<P::State, P::Action, P::Cost>,
    parent: SearchTreeIndex,
    action: P::Action,
) -> SearchTreeNode<P::State, P::Action, P::Cost>
where
    P: Problem,
{
    let p = &tree[parent];
    let state = problem.result(&p.state, &action);
    let step = problem.cost(&p.state, &action, &state);
    debug_assert!(step.valid(), "Step costs must be finite");

    SearchTreeNode {
        g: p.g.saturating_add(&step),
        depth: p.depth + 1,
        parent: Some((parent, action)),
        state,
    }
}

/// All the Search Nodes created by a search run.
///
/// The collection only grows, so indices handed out stay valid until the
/// whole tree is dropped.
pub struct SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    nodes: Vec<SearchTreeNode<St, A, C>>,
}

impl<St, A, C> SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: vec![] }
    }

    #[inline(always)]
    pub fn push(&mut self, node: SearchTreeNode<St, A, C>) -> SearchTreeIndex {
        debug_assert!(
            node.parent().is_none_or(|p| p.index < self.nodes.len()),
            "Parents must be in the tree before their children"
        );
        let index = SearchTreeIndex::new(self.nodes.len());
        self.nodes.push(node);
        index
    }

    #[inline(always)]
    pub fn push_root(&mut self, s: St) -> SearchTreeIndex {
        self.push(SearchTreeNode::new_root(s))
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Reconstructs the path from the root to `node_index`.
    ///
    /// Follows parent links up to the root collecting actions, then reverses
    /// them. The root itself yields an empty solution.
    #[must_use]
    pub fn path(&self, mut node_index: SearchTreeIndex) -> Solution<St, A, C> {
        let end = &self[node_index];
        let cost = end.g;
        let end_state = end.state.clone();
        let mut actions = Vec::with_capacity(end.depth);

        while let Some((parent_index, a)) = &self[node_index].parent {
            actions.push(a.clone());
            debug_assert!(node_index != *parent_index);
            node_index = *parent_index;
        }
        debug_assert!(self[node_index].is_root());
        actions.reverse();

        Solution {
            start: self[node_index].state.clone(),
            end: end_state,
            cost,
            actions,
        }
    }

    /// Approximate memory held by the nodes.
    pub fn size_in_bytes(&self) -> usize {
        self.nodes.capacity() * std::mem::size_of::<SearchTreeNode<St, A, C>>()
    }
}

impl<St, A, C> Default for SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<St, A, C> std::ops::Index<SearchTreeIndex> for SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    type Output = SearchTreeNode<St, A, C>;

    #[inline(always)]
    fn index(&self, index: SearchTreeIndex) -> &Self::Output {
        &self.nodes[index.index]
    }
}

impl<St, A, C> Debug for SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "SearchTree{{({} nodes)}}", self.len())
    }
}
