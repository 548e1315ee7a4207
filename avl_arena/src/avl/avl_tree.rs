use core::{
    borrow::Borrow,
    fmt,
    ops::{Index, IndexMut},
};

use crate::{Arena, OrdComparator, Ptr};

/// Internal tree node for an [AvlArena]
#[derive(Clone)]
pub(crate) struct Node<P: Ptr, T> {
    pub t: T,
    /// Pointer back to the parent. `None` for the root.
    pub p_back: Option<P::Inx>,
    /// Left subtree. A `None` edge is an empty fringe position of height 0.
    pub p_tree0: Option<P::Inx>,
    /// Right subtree
    pub p_tree1: Option<P::Inx>,
    /// Height of the right subtree minus height of the left subtree. Stays
    /// in [-1, 1] between operations; ±2 occurs only transiently inside a
    /// mutation and is resolved by a rotation before it returns.
    pub balance: i8,
}

/// An AVL tree stored on a generation-counted [Arena], ordered by a
/// pluggable three-way comparator. `P: Ptr` gives single indirection access
/// to elements, `T` is the element type, and `C` is the comparator stored at
/// construction time (defaulting to [OrdComparator] for `T: Ord`).
/// Insertions, finds, and removals are `O(log n)`; accesses through a kept
/// `P` are `O(1)`.
///
/// The comparator can also be supplied per call through the `_with` methods,
/// which is what enables orderings that depend on external, mutable, or
/// interactively obtained context. A comparator is invoked exactly once per
/// node a descent visits, and may return [Decision::Skip](crate::Decision)
/// to abort the operation without structural change.
///
/// Equal elements are rejected: inserting an element the comparator judges
/// equal to a stored one returns the element and a `P` to the existing
/// entry.
///
/// `Ptr`s are never invalidated by rotations; only removing an entry
/// invalidates the `Ptr`s to that entry. Expired `Ptr`s resolve to `None`
/// everywhere and remain ordinary comparable values.
///
/// ```
/// use avl_arena::{ptr_struct, AvlArena};
///
/// ptr_struct!(P0);
/// let mut a: AvlArena<P0, u64> = AvlArena::new();
///
/// let p50 = a.insert(50).unwrap();
/// a.insert(30).unwrap();
/// let p70 = a.insert(70).unwrap();
///
/// // `O(1)` access through a kept `Ptr`
/// assert_eq!(a[p50], 50);
/// assert_eq!(a.find(&70), Some(p70));
/// // duplicates are rejected with ownership returned
/// assert_eq!(a.insert(50).unwrap_err().into_element(), 50);
///
/// // in-order, bidirectional iteration
/// let fwd: Vec<u64> = a.vals().copied().collect();
/// assert_eq!(fwd, [30, 50, 70]);
/// let rev: Vec<u64> = a.iter().rev().map(|(_, t)| *t).collect();
/// assert_eq!(rev, [70, 50, 30]);
///
/// assert_eq!(a.remove(p50).unwrap(), 50);
/// // `p50` is expired now, other `Ptr`s are untouched
/// assert!(a.get(p50).is_none());
/// assert_eq!(a[p70], 70);
/// ```
pub struct AvlArena<P: Ptr, T, C = OrdComparator> {
    pub(crate) root: Option<P::Inx>,
    /// Leftmost node, for `O(1)` `min`
    pub(crate) first: Option<P::Inx>,
    /// Rightmost node, for `O(1)` `max`
    pub(crate) last: Option<P::Inx>,
    /// Overall height, refreshed at the end of every structural operation.
    /// An arena cannot hold enough nodes for this to overflow.
    pub(crate) height: u8,
    pub(crate) a: Arena<P, Node<P, T>>,
    pub(crate) cmp: C,
}

impl<P: Ptr, T, C> AvlArena<P, T, C> {
    /// Creates a tree ordered by `cmp`, which stays the default comparator
    /// for every operation not given a call-site one
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            root: None,
            first: None,
            last: None,
            height: 0,
            a: Arena::new(),
            cmp,
        }
    }

    /// Creates a tree ordered by the default value of `C`
    pub fn new() -> Self
    where
        C: Default,
    {
        Self::with_comparator(C::default())
    }

    /// Returns a reference to the stored default comparator
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns the number of elements in the tree
    pub fn len(&self) -> usize {
        self.a.len()
    }

    /// Returns if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    /// Returns the slot capacity of the backing arena
    pub fn capacity(&self) -> usize {
        self.a.capacity()
    }

    /// Follows [Arena::gen]
    pub fn gen(&self) -> P::Gen {
        self.a.gen()
    }

    /// Follows [Arena::reserve]
    pub fn reserve(&mut self, additional: usize) {
        self.a.reserve(additional);
    }

    /// Returns the height of the tree in `O(1)`: 0 when empty, 1 for a
    /// single element, and so on
    pub fn height(&self) -> usize {
        usize::from(self.height)
    }

    /// Returns the `Ptr` to the least element in `O(1)` time, or `None` if
    /// `self.is_empty()`
    #[must_use]
    pub fn min(&self) -> Option<P> {
        self.first.map(|inx| {
            let gen = self.a.get_ignore_gen(inx).unwrap().0;
            Ptr::_from_raw(inx, gen)
        })
    }

    /// Returns the `Ptr` to the greatest element in `O(1)` time, or `None`
    /// if `self.is_empty()`
    #[must_use]
    pub fn max(&self) -> Option<P> {
        self.last.map(|inx| {
            let gen = self.a.get_ignore_gen(inx).unwrap().0;
            Ptr::_from_raw(inx, gen)
        })
    }

    /// Returns if `p` is a valid `Ptr`
    pub fn contains(&self, p: P) -> bool {
        self.a.contains(p)
    }

    /// Returns a reference to the element pointed to by `p`, or `None` if
    /// `p` is invalid
    #[must_use]
    pub fn get(&self, p: P) -> Option<&T> {
        self.a.get(p).map(|node| &node.t)
    }

    /// Returns a mutable reference to the element pointed to by `p`, or
    /// `None` if `p` is invalid. It is a logic error to change the element
    /// such that its order relative to other elements changes.
    #[must_use]
    pub fn get_mut(&mut self, p: P) -> Option<&mut T> {
        self.a.get_mut(p).map(|node| &mut node.t)
    }

    /// Drops all elements from the tree and invalidates all pointers
    /// previously created from it. Keeps the slot capacity.
    pub fn clear(&mut self) {
        self.a.clear();
        self.root = None;
        self.first = None;
        self.last = None;
        self.height = 0;
    }

    /// Performs an [AvlArena::clear] and resets capacity to 0
    pub fn clear_and_shrink(&mut self) {
        self.a.clear_and_shrink();
        self.root = None;
        self.first = None;
        self.last = None;
        self.height = 0;
    }
}

impl<P: Ptr, T, C: Default> Default for AvlArena<P, T, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Implemented if `T: Clone` and `C: Clone`.
impl<P: Ptr, T: Clone, C: Clone> Clone for AvlArena<P, T, C> {
    /// Has the `Ptr` preserving properties of [Arena::clone]
    fn clone(&self) -> Self {
        Self {
            root: self.root,
            first: self.first,
            last: self.last,
            height: self.height,
            a: self.a.clone(),
            cmp: self.cmp.clone(),
        }
    }
}

impl<P: Ptr, T, C, B: Borrow<P>> Index<B> for AvlArena<P, T, C> {
    type Output = T;

    fn index(&self, inx: B) -> &T {
        let p: P = *inx.borrow();
        self.get(p)
            .expect("indexed `AvlArena` with invalidated `Ptr`")
    }
}

impl<P: Ptr, T, C, B: Borrow<P>> IndexMut<B> for AvlArena<P, T, C> {
    fn index_mut(&mut self, inx: B) -> &mut T {
        let p: P = *inx.borrow();
        self.get_mut(p)
            .expect("indexed `AvlArena` with invalidated `Ptr`")
    }
}

impl<P: Ptr, T: fmt::Debug, C> fmt::Debug for AvlArena<P, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
