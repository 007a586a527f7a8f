//! A min-heap frontier ranked by path cost, with decrease-key.
//!
//! Besides the heap itself, the frontier keeps a `state -> heap position`
//! index that is updated on every swap. Finding the entry of a state is then a
//! hash lookup and decreasing its key costs a single sift up, instead of a
//! linear scan over the heap.

use std::fmt::Debug;

use rustc_hash::FxHashMap;

use crate::heap_primitives::index_children;
use crate::heap_primitives::index_parent;
use crate::search::SearchTreeIndex;
use crate::space::Cost;
use crate::space::State;

const HEAP_ARITY: usize = 2usize;

#[inline(always)]
#[must_use]
fn up(i: usize) -> usize {
    index_parent::<HEAP_ARITY>(i)
}

/// The ranking value for uniform-cost search
///
/// We prefer better g-values.
///
/// ```
/// use statespace::data_structures::UniformCostRank;
///
/// assert!(UniformCostRank::new(1u32) < UniformCostRank::new(2u32));
/// assert!(UniformCostRank::new(2u32) == UniformCostRank::new(2u32));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct UniformCostRank<C: Cost> {
    g: C,
}
impl<C> UniformCostRank<C>
where
    C: Cost,
{
    pub fn new(g: C) -> Self {
        Self { g }
    }
    pub fn g(&self) -> C {
        self.g
    }
    /// Improves `g`
    pub fn improve_g(&mut self, new_g: C) {
        debug_assert!(self.g > new_g);
        self.g = new_g;
    }
}

/// A heap entry
///
/// Entries carry just ranking information, the state used to index them, and
/// a reference to the actual search node.
#[derive(Debug)]
#[cfg_attr(feature = "inspect", derive(Clone))]
pub struct FrontierEntry<St, C>
where
    St: State,
    C: Cost,
{
    /// The rank of this entry. The only thing compared when ordering.
    pub rank: UniformCostRank<C>,
    pub state: St,
    pub node: SearchTreeIndex,
}

impl<St: State, C: Cost> FrontierEntry<St, C> {
    #[inline(always)]
    pub fn g(&self) -> C {
        self.rank.g()
    }
}

/// PartialEq is forwarded to self.rank's PartialEq
impl<St: State, C: Cost> PartialEq for FrontierEntry<St, C> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.rank.eq(&other.rank)
    }
}
impl<St: State, C: Cost> Eq for FrontierEntry<St, C> {}

/// PartialOrd is forwarded to Ord::cmp
impl<St: State, C: Cost> PartialOrd for FrontierEntry<St, C> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
/// Ord is forwarded to self.rank's Ord
impl<St: State, C: Cost> Ord for FrontierEntry<St, C> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank.cmp(&other.rank)
    }
}

/// Where an entry currently sits in the heap.
///
/// Only valid until the frontier is modified again.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrontierSlot {
    heap_index: usize,
}

impl FrontierSlot {
    #[inline(always)]
    pub fn heap_index(&self) -> usize {
        self.heap_index
    }
}

/// Frontier for uniform-cost search.
///
/// Entries with the same cost leave in an unspecified order.
pub struct PriorityFrontier<St, C>
where
    St: State,
    C: Cost,
{
    /// A binary min-heap of entries.
    ///
    /// ```pseudocode
    /// for (i, e) in self.heap.enumerate():
    ///   assert_eq(self.positions[e.state], i)
    /// ```
    heap: Vec<FrontierEntry<St, C>>,
    /// Heap position of every queued state.
    positions: FxHashMap<St, usize>,
    high_water: usize,
}

impl<St, C> PriorityFrontier<St, C>
where
    St: State,
    C: Cost,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: vec![],
            positions: FxHashMap::default(),
            high_water: 0,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The most entries that were ever queued at once.
    #[inline(always)]
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Adds a state that is not yet in the frontier.
    pub fn push(&mut self, s: St, node: SearchTreeIndex, g: C) -> FrontierSlot {
        self.verify_heap();
        debug_assert!(
            !self.positions.contains_key(&s),
            "{s:?} is already queued. Use decrease_priority instead."
        );

        let heap_index = self.heap.len(); // Future heap_index
        self.positions.insert(s.clone(), heap_index);
        self.heap.push(FrontierEntry {
            rank: UniformCostRank::new(g),
            state: s,
            node,
        });
        let heap_index = self._unsafe_sift_up(heap_index);
        self.high_water = std::cmp::max(self.high_water, self.heap.len());

        self.verify_heap();
        FrontierSlot { heap_index }
    }

    /// Removes the cheapest entry. `None` once the frontier is exhausted.
    pub fn pop_min(&mut self) -> Option<FrontierEntry<St, C>> {
        self.verify_heap();

        let last = self.heap.len().checked_sub(1)?;
        if last != 0 {
            self.heap.swap(0, last);
            self.sync_position(0);
        }
        let top = self.heap.pop()?;
        self.positions.remove(&top.state);
        if !self.heap.is_empty() {
            self._unsafe_sift_down(0);
        }

        self.verify_heap();
        Some(top)
    }

    /// Drops every entry, keeping the allocation.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.positions.clear();
    }

    #[inline(always)]
    #[must_use]
    pub fn contains(&self, s: &St) -> bool {
        self.positions.contains_key(s)
    }

    /// Finds the entry queued for `s`, if any.
    #[inline(always)]
    #[must_use]
    pub fn find_by_state(&self, s: &St) -> Option<FrontierSlot> {
        self.positions
            .get(s)
            .map(|&heap_index| FrontierSlot { heap_index })
    }

    /// Replaces the node and cost of an entry with a cheaper one.
    ///
    /// Returns the entry's new slot. Raising a cost through here would break
    /// the heap order, so `new_g` must be strictly lower than the current one.
    pub fn decrease_priority(
        &mut self,
        slot: FrontierSlot,
        new_node: SearchTreeIndex,
        new_g: C,
    ) -> FrontierSlot {
        self.verify_heap();
        let i = slot.heap_index;
        debug_assert!(i < self.heap.len(), "Stale slot {slot:?}");

        let entry = &mut self.heap[i];
        entry.rank.improve_g(new_g);
        entry.node = new_node;
        let heap_index = self._unsafe_sift_up(i);

        self.verify_heap();
        FrontierSlot { heap_index }
    }

    /// Approximate memory held by the heap and its index.
    pub fn size_in_bytes(&self) -> usize {
        self.heap.capacity() * std::mem::size_of::<FrontierEntry<St, C>>()
            + self.positions.capacity() * std::mem::size_of::<(St, usize)>()
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    pub(crate) fn verify_heap(&self) {
        // All good... (hopefully)
    }

    #[inline(always)]
    #[cfg(feature = "verify")]
    pub(crate) fn verify_heap(&self) {
        assert_eq!(self.heap.len(), self.positions.len());
        // Every entry,
        for (i, e) in self.heap.iter().enumerate() {
            // - Has its position indexed.
            assert_eq!(self.positions.get(&e.state), Some(&i));

            // - Goes after its parent entry, if any.
            if i == 0 {
                continue;
            }
            let p = up(i);
            assert!(
                self.heap[p] <= self.heap[i],
                "Entry[{p}]={:?} !<= child [{i}]={:?}. Out of heap of len={}",
                self.heap[p],
                self.heap[i],
                self.heap.len(),
            );
        }
    }

    // Implementation details

    /// Points the index of the state at `i` back to `i`.
    #[inline(always)]
    fn sync_position(&mut self, i: usize) {
        match self.positions.get_mut(&self.heap[i].state) {
            Some(position) => *position = i,
            None => unreachable!("Queued state {:?} is not indexed", self.heap[i].state),
        }
    }

    /// Raises an entry
    /// Returns its new index
    #[inline(always)]
    fn _unsafe_sift_up(&mut self, index: usize) -> usize {
        debug_assert!(
            index < self.heap.len(),
            "Entry is way out of sync. Index out of bounds..."
        );

        let mut pos = index;
        while pos != 0 {
            let parent = up(pos);
            if self.heap[parent] <= self.heap[pos] {
                break;
            }
            self._unsafe_swap(parent, pos);
            pos = parent;
        }
        pos
    }

    /// Lowers an entry
    /// Returns its new index
    #[inline(always)]
    fn _unsafe_sift_down(&mut self, mut index: usize) -> usize {
        let len = self.heap.len();
        debug_assert!(
            index < len,
            "Entry is way out of sync. Index out of bounds..."
        );

        loop {
            // Find the best child
            let Some(child) = index_children::<HEAP_ARITY>(index, len)
                .min_by(|&l, &r| self.heap[l].cmp(&self.heap[r]))
            else {
                break;
            };

            if self.heap[index] <= self.heap[child] {
                break;
            }

            self._unsafe_swap(index, child);
            index = child;
        }
        index
    }

    /// Swaps two entries in the heap.
    ///
    /// For consistency in calling code `l < r` is checked.
    ///
    /// Keeps the position index in sync.
    #[inline(always)]
    fn _unsafe_swap(&mut self, l: usize, r: usize) {
        debug_assert!(l < r, "Swap({l}, {r}) uses wrong argument order");

        let len = self.heap.len();
        debug_assert!(l < len, "Left  swap index {l} is OUT OF BOUNDS({len})");
        debug_assert!(r < len, "Right swap index {r} is OUT OF BOUNDS({len})");
        self.heap.swap(l, r);
        self.sync_position(l);
        self.sync_position(r);
        debug_assert!(
            self.heap[l] <= self.heap[r],
            "Swaps must locally restore the heap invariant."
        );
    }
}

impl<St, C> Default for PriorityFrontier<St, C>
where
    St: State,
    C: Cost,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<St, C> std::ops::Index<FrontierSlot> for PriorityFrontier<St, C>
where
    St: State,
    C: Cost,
{
    type Output = FrontierEntry<St, C>;

    fn index(&self, slot: FrontierSlot) -> &Self::Output {
        &self.heap[slot.heap_index]
    }
}

impl<St, C> Debug for PriorityFrontier<St, C>
where
    St: State,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "PriorityFrontier{{({} entries)}}", self.len())
    }
}
