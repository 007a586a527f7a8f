use rustc_hash::FxHashSet;

use crate::space::State;

/// States that were already expanded.
///
/// Only grows. Refusing to expand a state twice is what makes searches
/// terminate on finite spaces with cycles.
#[derive(Debug)]
pub struct ExploredSet<St: State> {
    states: FxHashSet<St>,
}

impl<St: State> ExploredSet<St> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            states: FxHashSet::default(),
        }
    }

    /// Marks `s` as explored. Returns whether it was new.
    #[inline(always)]
    pub fn mark(&mut self, s: St) -> bool {
        self.states.insert(s)
    }

    #[inline(always)]
    #[must_use]
    pub fn contains(&self, s: &St) -> bool {
        self.states.contains(s)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Approximate memory held by the set, ignoring the table's control bytes.
    pub fn size_in_bytes(&self) -> usize {
        self.states.capacity() * std::mem::size_of::<St>()
    }
}

impl<St: State> Default for ExploredSet<St> {
    fn default() -> Self {
        Self::new()
    }
}
