// Index arithmetic for implicit heaps.
//
// A heap is a tree-like structure where every subtree's root ranks better than
// all the other nodes in the subtree. Stored in an array, a binary heap lays its
// levels out one after the other:
//
// ```text
//                           0
//              1                         2
//       3            4            5             6
//   7      8      9     10    11     12     13     14
// 15 16  17 18  19 20  21 22 23 24  25
// ```
//
// The last level will often be incomplete.
//
// With arity `A` (2 for a binary heap),
//   - Up:          `(i-1)/A`
//   - First child: `A*i + 1`
//   - Last child:  `A*(i+1)`

/// The parent node
///
/// ```
/// use statespace::heap_primitives::index_parent;
/// assert_eq!(index_parent::<2>(1), 0);
/// assert_eq!(index_parent::<2>(2), 0);
/// assert_eq!(index_parent::<2>(3), 1);
/// assert_eq!(index_parent::<2>(4), 1);
/// assert_eq!(index_parent::<2>(6), 2);
/// assert_eq!(index_parent::<2>(25), 12);
/// assert_eq!(index_parent::<4>(4), 0);
/// assert_eq!(index_parent::<4>(5), 1);
/// ```
#[inline(always)]
#[must_use]
pub fn index_parent<const A: usize>(i: usize) -> usize {
    debug_assert!(i != 0, "The root has no parent");
    (i - 1) / A
}

/// The first (left-most) child
///
/// ```
/// use statespace::heap_primitives::index_first_child;
/// assert_eq!(index_first_child::<2>(0), 1);
/// assert_eq!(index_first_child::<2>(1), 3);
/// assert_eq!(index_first_child::<2>(3), 7);
/// assert_eq!(index_first_child::<2>(11), 23);
/// ```
#[inline(always)]
#[must_use]
pub fn index_first_child<const A: usize>(i: usize) -> usize {
    (A * i) + 1
}

/// The last (right-most) child
///
/// ```
/// use statespace::heap_primitives::index_last_child;
/// assert_eq!(index_last_child::<2>(0), 2);
/// assert_eq!(index_last_child::<2>(1), 4);
/// assert_eq!(index_last_child::<2>(4), 10);
/// assert_eq!(index_last_child::<2>(6), 14);
/// ```
#[inline(always)]
#[must_use]
pub fn index_last_child<const A: usize>(i: usize) -> usize {
    A * (i + 1)
}

/// The children of `i` that exist in a heap of `len` elements.
///
/// ```
/// use statespace::heap_primitives::index_children;
/// assert_eq!(index_children::<2>(0, 3), 1..3);
/// assert_eq!(index_children::<2>(1, 4), 3..4);
/// assert!(index_children::<2>(2, 4).is_empty());
/// ```
#[inline(always)]
#[must_use]
pub fn index_children<const A: usize>(i: usize, len: usize) -> std::ops::Range<usize> {
    let first = index_first_child::<A>(i);
    let end = std::cmp::min(index_last_child::<A>(i) + 1, len);
    first..std::cmp::max(first, end)
}
