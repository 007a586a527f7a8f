use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::search::SearchTreeIndex;
use crate::space::State;

/// First-in first-out frontier.
///
/// Keeps each node's state next to its tree index so membership can be
/// answered without going through the search tree.
///
/// A [`plain`](FifoFrontier::plain) frontier answers [`contains`](FifoFrontier::contains)
/// with a linear scan. A [`tracked`](FifoFrontier::tracked) one also counts how
/// many queued nodes hold each state, making membership O(1) at the price of
/// hashing every push and pop.
#[derive(Debug)]
pub struct FifoFrontier<St: State> {
    queue: VecDeque<(St, SearchTreeIndex)>,
    members: Option<FxHashMap<St, usize>>,
    high_water: usize,
}

impl<St: State> FifoFrontier<St> {
    #[must_use]
    pub fn plain() -> Self {
        Self {
            queue: VecDeque::new(),
            members: None,
            high_water: 0,
        }
    }

    #[must_use]
    pub fn tracked() -> Self {
        Self {
            queue: VecDeque::new(),
            members: Some(FxHashMap::default()),
            high_water: 0,
        }
    }

    pub fn push_back(&mut self, s: St, node: SearchTreeIndex) {
        if let Some(members) = &mut self.members {
            *members.entry(s.clone()).or_default() += 1;
        }
        self.queue.push_back((s, node));
        self.high_water = std::cmp::max(self.high_water, self.queue.len());
    }

    /// Removes the oldest node. `None` once the frontier is exhausted.
    pub fn pop_front(&mut self) -> Option<(St, SearchTreeIndex)> {
        let (s, node) = self.queue.pop_front()?;
        if let Some(members) = &mut self.members {
            let remaining = match members.get_mut(&s) {
                Some(count) => {
                    *count -= 1;
                    *count
                }
                None => unreachable!("Queued state {s:?} was not tracked"),
            };
            if remaining == 0 {
                members.remove(&s);
            }
        }
        Some((s, node))
    }

    /// Drops every queued node, keeping the allocation.
    pub fn clear(&mut self) {
        self.queue.clear();
        if let Some(members) = &mut self.members {
            members.clear();
        }
    }

    #[must_use]
    pub fn contains(&self, s: &St) -> bool {
        match &self.members {
            Some(members) => members.contains_key(s),
            None => self.queue.iter().any(|(queued, _)| queued == s),
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Approximate memory held by the queue and its membership counts.
    pub fn size_in_bytes(&self) -> usize {
        let members = self
            .members
            .as_ref()
            .map_or(0, |m| m.capacity() * std::mem::size_of::<(St, usize)>());
        self.queue.capacity() * std::mem::size_of::<(St, SearchTreeIndex)>() + members
    }

    /// The most nodes that were ever queued at once.
    #[inline(always)]
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchTree;

    fn indices(n: u8) -> Vec<SearchTreeIndex> {
        let mut tree = SearchTree::<u8, u8, u32>::new();
        (0..n).map(|s| tree.push_root(s)).collect()
    }

    #[test]
    fn pops_in_insertion_order() {
        for mut frontier in [FifoFrontier::plain(), FifoFrontier::tracked()] {
            let nodes = indices(3);
            frontier.push_back('c', nodes[0]);
            frontier.push_back('a', nodes[1]);
            frontier.push_back('b', nodes[2]);
            assert_eq!(frontier.len(), 3);

            assert_eq!(frontier.pop_front(), Some(('c', nodes[0])));
            assert_eq!(frontier.pop_front(), Some(('a', nodes[1])));
            assert_eq!(frontier.pop_front(), Some(('b', nodes[2])));
            assert_eq!(frontier.pop_front(), None);
            assert!(frontier.is_empty());
            assert_eq!(frontier.high_water(), 3);
        }
    }

    #[test]
    fn membership_follows_the_queue() {
        for mut frontier in [FifoFrontier::plain(), FifoFrontier::tracked()] {
            let nodes = indices(3);
            assert!(!frontier.contains(&"A"));

            frontier.push_back("A", nodes[0]);
            frontier.push_back("B", nodes[1]);
            frontier.push_back("A", nodes[2]);
            assert!(frontier.contains(&"A"));
            assert!(frontier.contains(&"B"));

            // One copy of "A" is still queued.
            let _ = frontier.pop_front();
            assert!(frontier.contains(&"A"));

            let _ = frontier.pop_front();
            assert!(!frontier.contains(&"B"));

            let _ = frontier.pop_front();
            assert!(!frontier.contains(&"A"));
        }
    }
}
