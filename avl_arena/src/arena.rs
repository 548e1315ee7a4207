use alloc::vec::Vec;
use core::{
    borrow::Borrow,
    fmt, mem,
    ops::{Index, IndexMut},
};

use crate::{entry::Slot, Ptr, PtrGen, PtrInx};

/// A slab of generation-counted slots supporting non-Clone `T` and deletion.
/// This is the node store under [AvlArena](crate::AvlArena), usable on its
/// own for plain unordered storage.
///
/// `P` is a struct implementing [Ptr], which carries the index and
/// generation types. When using multiple arenas, use a different `P` per
/// arena so the type system catches pointers used on the wrong arena. If `P`
/// has a generation counter, `Ptr`s to removed entries are guaranteed to
/// never resolve again.
///
/// ```
/// use avl_arena::{ptr_struct, Arena};
///
/// ptr_struct!(P0);
///
/// let mut a: Arena<P0, &str> = Arena::new();
/// let p = a.insert("lodestone");
/// assert_eq!(a[p], "lodestone");
///
/// assert_eq!(a.remove(p).unwrap(), "lodestone");
/// // the slot is reused but `p` never works again
/// let _ = a.insert("magnetite");
/// assert!(a.get(p).is_none());
/// ```
///
/// # Invariants
///
/// - The generation starts at 2 in a new arena so that [Ptr::invalid]
///   (generation 1) can never match an allocation
/// - All vacant slots form a single freelist starting at `free_head` and
///   ending at a slot that links to itself; `free_head` is `None` exactly
///   when no slot is vacant
/// - Every invalidating operation increments the arena generation, and newer
///   allocations use the new value
pub struct Arena<P: Ptr, T> {
    slots: Vec<Slot<P, T>>,
    /// Number of occupied slots. Kept separately because `P::Inx` may be
    /// smaller than `usize`.
    len: usize,
    free_head: Option<P::Inx>,
    gen: P::Gen,
}

impl<P: Ptr, T> Arena<P, T> {
    /// Used by tests
    #[doc(hidden)]
    pub fn _check_invariants(this: &Self) -> Result<(), &'static str> {
        if this.gen() < PtrGen::two() {
            return Err("bad generation")
        }
        let mut n_occupied = 0;
        for slot in &this.slots {
            n_occupied += matches!(slot, Slot::Occupied(..)) as usize;
        }
        if this.len() != n_occupied {
            return Err("len != number of occupied slots")
        }
        let n_vacant = this.slots.len() - n_occupied;
        let mut freelist_len = 0;
        if let Some(head) = this.free_head {
            let mut i = head;
            loop {
                match this.slots.get(PtrInx::get(i)) {
                    Some(Slot::Vacant(next)) => {
                        freelist_len += 1;
                        if *next == i {
                            // last slot points to itself
                            break
                        }
                        i = *next;
                    }
                    _ => return Err("bad freelist link"),
                }
                if freelist_len > this.slots.len() {
                    return Err("endless freelist loop")
                }
            }
        }
        if freelist_len != n_vacant {
            return Err("freelist is discontinuous")
        }
        Ok(())
    }

    /// Creates a new arena of `T`, which are pointed to by `P`s
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            len: 0,
            free_head: None,
            gen: PtrGen::two(),
        }
    }

    /// Returns the number of `T` in the arena
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns if the arena is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the total number of slots, vacant or occupied
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the arena generation counter (unless `P::Gen` is `()` in
    /// which case there is no generation counting), which equals the number
    /// of invalidation operations performed on this arena plus 2
    #[inline]
    pub fn gen(&self) -> P::Gen {
        self.gen
    }

    #[inline]
    pub(crate) fn inc_gen(&mut self) {
        self.gen = PtrGen::increment(self.gen);
    }

    #[must_use]
    pub(crate) fn slot(&self, inx: P::Inx) -> Option<&Slot<P, T>> {
        self.slots.get(PtrInx::get(inx))
    }

    #[must_use]
    pub(crate) fn slot_mut(&mut self, inx: P::Inx) -> Option<&mut Slot<P, T>> {
        self.slots.get_mut(PtrInx::get(inx))
    }

    /// Adds vacant slots for at least `additional` more `T`, except the
    /// slot count is capped at `P::Inx::max() + 1`
    pub fn reserve(&mut self, additional: usize) {
        let end = self.slots.len();
        let target = end.checked_add(additional).unwrap_or(usize::MAX).clamp(
            0,
            <P::Inx as PtrInx>::max().checked_add(1).unwrap_or(usize::MAX),
        );
        let remaining = target.wrapping_sub(end);
        if remaining > 0 {
            self.slots.reserve(remaining);
            let old_head = self.free_head;
            // the new slots chain from `end` upward, the last one links to
            // the old head or to itself
            self.free_head = Some(PtrInx::new(end));
            for i in 1..remaining {
                self.slots.push(Slot::Vacant(PtrInx::new(end.wrapping_add(i))));
            }
            match old_head {
                Some(old_head) => self.slots.push(Slot::Vacant(old_head)),
                None => self
                    .slots
                    .push(Slot::Vacant(PtrInx::new(target.wrapping_sub(1)))),
            }
        }
    }

    /// Fills the vacant slot at `inx`, panicking if it is not vacant
    #[inline]
    fn fill_vacant(&mut self, inx: P::Inx, t: T) {
        let gen = self.gen();
        let next = self.slot_mut(inx).unwrap().fill(gen, t).unwrap();
        if next == inx {
            // was the end of the freelist
            self.free_head = None;
        } else {
            self.free_head = Some(next);
        }
    }

    /// Tries to insert `t` into the arena without adding slots.
    ///
    /// # Errors
    ///
    /// Returns ownership of `t` if there are no vacant slots.
    pub fn try_insert(&mut self, t: T) -> Result<P, T> {
        match self.free_head {
            Some(inx) => {
                self.fill_vacant(inx, t);
                self.len += 1;
                Ok(Ptr::_from_raw(inx, self.gen()))
            }
            None => Err(t),
        }
    }

    /// Inserts `t` into the arena and returns a `Ptr` to it, adding slots if
    /// all are occupied.
    ///
    /// # Panics
    ///
    /// If the arena is at the maximum length of `P::Inx::max() + 1`.
    pub fn insert(&mut self, t: T) -> P {
        match self.try_insert(t) {
            Ok(p) => p,
            Err(t) => {
                // double the slot count
                let mut additional = self.slots.len();
                if additional == 0 {
                    additional = 1;
                }
                self.reserve(additional);
                match self.try_insert(t) {
                    Ok(p) => p,
                    // can't `unwrap` unless `T: Debug`
                    Err(_) => panic!(
                        "called `insert` on an `Arena<P, T>` with maximum length `P::Inx::max() + \
                         1`"
                    ),
                }
            }
        }
    }

    /// Returns if `p` is a valid `Ptr`
    pub fn contains(&self, p: P) -> bool {
        match self.slot(p.inx()) {
            Some(Slot::Occupied(gen, _)) => *gen == p.gen(),
            _ => false,
        }
    }

    /// Returns a reference to the `T` pointed to by `p`, or `None` if `p` is
    /// invalid
    #[must_use]
    pub fn get(&self, p: P) -> Option<&T> {
        match self.slot(p.inx()) {
            Some(Slot::Occupied(gen, t)) if *gen == p.gen() => Some(t),
            _ => None,
        }
    }

    /// Returns a mutable reference to the `T` pointed to by `p`, or `None`
    /// if `p` is invalid
    #[must_use]
    pub fn get_mut(&mut self, p: P) -> Option<&mut T> {
        match self.slot_mut(p.inx()) {
            Some(Slot::Occupied(gen, t)) if *gen == p.gen() => Some(t),
            _ => None,
        }
    }

    /// Like [Arena::get], except generation counters are ignored and the
    /// existing generation is returned
    #[doc(hidden)]
    #[must_use]
    pub fn get_ignore_gen(&self, inx: P::Inx) -> Option<(P::Gen, &T)> {
        match self.slot(inx) {
            Some(Slot::Occupied(gen, t)) => Some((*gen, t)),
            _ => None,
        }
    }

    /// Like [Arena::get_mut], except generation counters are ignored and the
    /// existing generation is returned
    #[doc(hidden)]
    #[must_use]
    pub fn get_ignore_gen_mut(&mut self, inx: P::Inx) -> Option<(P::Gen, &mut T)> {
        match self.slot_mut(inx) {
            Some(Slot::Occupied(gen, t)) => Some((*gen, t)),
            _ => None,
        }
    }

    /// Like [Arena::get], except generation counters are ignored and the
    /// result is unwrapped internally
    #[doc(hidden)]
    #[track_caller]
    pub fn get_inx_unwrap(&self, inx: P::Inx) -> &T {
        match self.slot(inx) {
            Some(Slot::Occupied(_, t)) => t,
            _ => panic!("get_inx_unwrap on vacant slot"),
        }
    }

    /// Like [Arena::get_mut], except generation counters are ignored and the
    /// result is unwrapped internally
    #[doc(hidden)]
    #[track_caller]
    pub fn get_inx_mut_unwrap(&mut self, inx: P::Inx) -> &mut T {
        match self.slot_mut(inx) {
            Some(Slot::Occupied(_, t)) => t,
            _ => panic!("get_inx_mut_unwrap on vacant slot"),
        }
    }

    /// Removes the `T` pointed to by `p`, returns it, and invalidates old
    /// `Ptr`s to it. Does no invalidation and returns `None` if `p` is
    /// invalid.
    #[must_use]
    pub fn remove(&mut self, p: P) -> Option<T> {
        let inx = p.inx();
        let freelist_link = match self.free_head {
            // points to previous head
            Some(free) => free,
            // points to itself
            None => inx,
        };
        let slot = self.slot_mut(inx)?;
        let old = mem::replace(slot, Slot::Vacant(freelist_link));
        match old {
            Slot::Vacant(link) => {
                // undo
                *slot = Slot::Vacant(link);
                None
            }
            Slot::Occupied(gen, t) => {
                if gen != p.gen() {
                    // undo
                    *slot = Slot::Occupied(gen, t);
                    None
                } else {
                    self.free_head = Some(inx);
                    self.len -= 1;
                    self.inc_gen();
                    Some(t)
                }
            }
        }
    }

    /// Drops all `T` from the arena and invalidates all pointers previously
    /// created from it. Keeps the slot count.
    pub fn clear(&mut self) {
        let count = self.slots.len();
        for i in 1..count {
            *self.slots.get_mut(i.wrapping_sub(1)).unwrap() = Slot::Vacant(PtrInx::new(i));
        }
        if count > 0 {
            // the last slot links to itself
            *self.slots.get_mut(count.wrapping_sub(1)).unwrap() =
                Slot::Vacant(PtrInx::new(count.wrapping_sub(1)));
            self.free_head = Some(PtrInx::new(0));
        } else {
            self.free_head = None;
        }
        self.inc_gen();
        self.len = 0;
    }

    /// Performs an [Arena::clear] and drops all slots
    pub fn clear_and_shrink(&mut self) {
        self.slots.clear();
        self.slots.shrink_to_fit();
        self.free_head = None;
        self.inc_gen();
        self.len = 0;
    }

    /// Compresses the arena by moving entries into the lowest slots and
    /// dropping all vacant ones. All entries remain but all `Ptr`s are
    /// invalidated; new `Ptr`s can be found again through iteration.
    pub fn compress_and_shrink(&mut self) {
        self.compress_and_shrink_with(|_, _, _| ())
    }

    /// The same as [Arena::compress_and_shrink] except that `map` is run on
    /// every `(P, &mut T, P)` with the first `P` being the old `Ptr` and the
    /// last `P` being the new `Ptr`
    pub fn compress_and_shrink_with<F: FnMut(P, &mut T, P)>(&mut self, mut map: F) {
        self.inc_gen();
        let gen = self.gen();
        let mut compressed = Vec::with_capacity(self.len);
        let mut j = 0;
        for i in 0..self.slots.len() {
            let slot = mem::replace(
                self.slots.get_mut(i).unwrap(),
                Slot::Vacant(PtrInx::new(0)),
            );
            if let Slot::Occupied(old_gen, mut t) = slot {
                map(
                    Ptr::_from_raw(PtrInx::new(i), old_gen),
                    &mut t,
                    Ptr::_from_raw(PtrInx::new(j), gen),
                );
                compressed.push(Slot::Occupied(gen, t));
                j = j.wrapping_add(1);
            }
        }
        self.slots = compressed;
        self.free_head = None;
    }

    /// Overwrites `self` (dropping all preexisting `T` and overwriting the
    /// generation counter) with the `Ptr` mapping of `source`, running `map`
    /// on every `U` to generate the corresponding `T`. A `P` valid for a `U`
    /// in `source` is valid for its `T` in `self`, until invalidations
    /// diverge the two arenas again.
    pub fn clone_from_with<U, F: FnMut(P, &U) -> T>(&mut self, source: &Arena<P, U>, mut map: F) {
        self.gen = source.gen;
        self.len = source.len;
        self.free_head = source.free_head;
        self.slots.clear();
        self.slots.reserve(source.slots.len());
        for i in 0..source.slots.len() {
            self.slots.push(match source.slots.get(i).unwrap() {
                // copy the freelist of `source`
                Slot::Vacant(next) => Slot::Vacant(*next),
                Slot::Occupied(gen, u) => {
                    Slot::Occupied(*gen, map(Ptr::_from_raw(PtrInx::new(i), *gen), u))
                }
            });
        }
    }
}

impl<P: Ptr, T> Default for Arena<P, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Implemented if `T: Clone`.
impl<P: Ptr, T: Clone> Clone for Arena<P, T> {
    /// The `P`s valid for the original arena are initially valid for the
    /// clone; invalidations continue independently afterwards.
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            len: self.len,
            free_head: self.free_head,
            gen: self.gen,
        }
    }

    /// Has the validity cloning property of arena cloning, but reuses the
    /// slot allocation of `self`. Treat `self` as an entirely new arena
    /// afterwards; its old `Ptr`s must not be reused on it.
    fn clone_from(&mut self, source: &Self) {
        self.clone_from_with(source, |_, u| u.clone())
    }
}

impl<P: Ptr, T, B: Borrow<P>> Index<B> for Arena<P, T> {
    type Output = T;

    fn index(&self, inx: B) -> &T {
        let p: P = *inx.borrow();
        self.get(p).expect("indexed arena with invalidated `Ptr`")
    }
}

impl<P: Ptr, T, B: Borrow<P>> IndexMut<B> for Arena<P, T> {
    fn index_mut(&mut self, inx: B) -> &mut T {
        let p: P = *inx.borrow();
        self.get_mut(p)
            .expect("indexed arena with invalidated `Ptr`")
    }
}

impl<P: Ptr, T: fmt::Debug> fmt::Debug for Arena<P, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
