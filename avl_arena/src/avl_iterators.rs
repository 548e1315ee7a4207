//! Iterators and advancers for [AvlArena]. Everything here iterates in
//! comparator order from the least element to the greatest unless stated
//! otherwise.

use alloc::vec::Vec;
use core::marker::PhantomData;

use recasting::{Recast, Recaster};

use crate::{Advancer, Arena, AvlArena, OrdComparator, Ptr, PtrInx};

/// An advancer over the valid `P`s of an [AvlArena] in comparator order.
/// Invalidating the item just returned is supported mid-loop; invalidating
/// the next greater entry is _not_.
pub struct PtrAdvancer<P: Ptr, T, C> {
    ptr: Option<P::Inx>,
    _boo: PhantomData<fn() -> (T, C)>,
}

impl<P: Ptr, T, C> Advancer for PtrAdvancer<P, T, C> {
    type Collection = AvlArena<P, T, C>;
    type Item = P;

    fn advance(&mut self, collection: &Self::Collection) -> Option<Self::Item> {
        let inx = self.ptr?;
        match collection.a.get_ignore_gen(inx) {
            Some((gen, _)) => {
                // the successor is resolved before the caller can touch the
                // current entry
                self.ptr = collection.next_inx(inx);
                Some(Ptr::_from_raw(inx, gen))
            }
            None => {
                // unreachable under the supported mutations
                self.ptr = None;
                None
            }
        }
    }
}

/// An iterator over the valid `P`s of an [AvlArena]
pub struct Ptrs<'a, P: Ptr, T, C> {
    arena: &'a AvlArena<P, T, C>,
    adv: PtrAdvancer<P, T, C>,
}

impl<'a, P: Ptr, T, C> Iterator for Ptrs<'a, P, T, C> {
    type Item = P;

    fn next(&mut self) -> Option<Self::Item> {
        self.adv.advance(self.arena)
    }
}

/// An iterator over `&T` in an [AvlArena]
pub struct Vals<'a, P: Ptr, T, C> {
    arena: &'a AvlArena<P, T, C>,
    adv: PtrAdvancer<P, T, C>,
}

impl<'a, P: Ptr, T, C> Iterator for Vals<'a, P, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.adv
            .advance(self.arena)
            .map(|p| self.arena.get(p).unwrap())
    }
}

/// A double-ended iterator over `(P, &T)` tuples in an [AvlArena]: forward
/// iteration goes from the least element up, and
/// [rev](core::iter::Iterator::rev)ersed iteration from the greatest element
/// down, meeting in the middle
pub struct Iter<'a, P: Ptr, T, C> {
    arena: &'a AvlArena<P, T, C>,
    front: Option<P::Inx>,
    back: Option<P::Inx>,
    exhausted: bool,
}

impl<'a, P: Ptr, T, C> Iter<'a, P, T, C> {
    fn item(&self, inx: P::Inx) -> (P, &'a T) {
        let (gen, node) = self.arena.a.get_ignore_gen(inx).unwrap();
        (Ptr::_from_raw(inx, gen), &node.t)
    }
}

impl<'a, P: Ptr, T, C> Iterator for Iter<'a, P, T, C> {
    type Item = (P, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None
        }
        let inx = self.front?;
        if self.back == Some(inx) {
            // the ends met
            self.exhausted = true;
        } else {
            self.front = self.arena.next_inx(inx);
        }
        Some(self.item(inx))
    }
}

impl<'a, P: Ptr, T, C> DoubleEndedIterator for Iter<'a, P, T, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None
        }
        let inx = self.back?;
        if self.front == Some(inx) {
            self.exhausted = true;
        } else {
            self.back = self.arena.prev_inx(inx);
        }
        Some(self.item(inx))
    }
}

/// A by-value iterator over `(P, T)` tuples, least element first. Consumes
/// the tree.
pub struct IntoIter<P: Ptr, T, C> {
    tree: AvlArena<P, T, C>,
}

impl<P: Ptr, T, C> Iterator for IntoIter<P, T, C> {
    type Item = (P, T);

    fn next(&mut self) -> Option<Self::Item> {
        let p = self.tree.min()?;
        let t = self.tree.remove(p).unwrap();
        Some((p, t))
    }
}

impl<P: Ptr, T, C> IntoIterator for AvlArena<P, T, C> {
    type IntoIter = IntoIter<P, T, C>;
    type Item = (P, T);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { tree: self }
    }
}

impl<'a, P: Ptr, T, C> IntoIterator for &'a AvlArena<P, T, C> {
    type IntoIter = Iter<'a, P, T, C>;
    type Item = (P, &'a T);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<P: Ptr, T: Ord> FromIterator<T> for AvlArena<P, T, OrdComparator> {
    /// Uses [AvlArena::insert] and drops duplicate elements
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut a = AvlArena::new();
        for t in iter {
            let _ = a.insert(t);
        }
        a
    }
}

impl<P: Ptr, T, C> AvlArena<P, T, C> {
    /// Advances over every valid `Ptr` in `self` in comparator order. See
    /// [PtrAdvancer] for the supported mid-loop mutations.
    pub fn advancer(&self) -> PtrAdvancer<P, T, C> {
        PtrAdvancer {
            ptr: self.first,
            _boo: PhantomData,
        }
    }

    /// Advances over valid `Ptr`s in `self` starting from `p_start`. If
    /// `p_start` is invalid the advancer will only return `None`s.
    pub fn advancer_starting_from(&self, p_start: P) -> PtrAdvancer<P, T, C> {
        PtrAdvancer {
            ptr: if self.contains(p_start) {
                Some(p_start.inx())
            } else {
                None
            },
            _boo: PhantomData,
        }
    }

    /// Iteration over all valid `P` in the tree
    pub fn ptrs(&self) -> Ptrs<P, T, C> {
        Ptrs {
            arena: self,
            adv: self.advancer(),
        }
    }

    /// Iteration over `&T`
    pub fn vals(&self) -> Vals<P, T, C> {
        Vals {
            arena: self,
            adv: self.advancer(),
        }
    }

    /// Double-ended iteration over `(P, &T)` tuples
    pub fn iter(&self) -> Iter<P, T, C> {
        Iter {
            arena: self,
            front: self.first,
            back: self.last,
            exhausted: false,
        }
    }

    /// Compresses the backing arena by moving entries into the lowest slots
    /// and dropping all vacant ones, relinking the tree structure to match.
    /// All elements and their ordering remain but all `Ptr`s are
    /// invalidated; new `Ptr`s can be found again through iteration.
    pub fn compress_and_shrink(&mut self) {
        self.compress_and_shrink_with(|_, _, _| ())
    }

    /// The same as [AvlArena::compress_and_shrink] except that `map` is run
    /// on every `(P, &mut T, P)` with the first `P` being the old `Ptr` and
    /// the last `P` being the new `Ptr`
    pub fn compress_and_shrink_with<F: FnMut(P, &mut T, P)>(&mut self, mut map: F) {
        let mut remap: Vec<Option<P::Inx>> = Vec::new();
        remap.resize(self.a.capacity(), None);
        self.a.compress_and_shrink_with(|p, node, q| {
            remap[PtrInx::get(p.inx())] = Some(q.inx());
            map(p, &mut node.t, q);
        });
        // every tree link predates the compression and must go through the
        // remap table
        for i in 0..self.a.capacity() {
            if let Some((_, node)) = self.a.get_ignore_gen_mut(PtrInx::new(i)) {
                if let Some(old) = node.p_back {
                    node.p_back = remap[PtrInx::get(old)];
                }
                if let Some(old) = node.p_tree0 {
                    node.p_tree0 = remap[PtrInx::get(old)];
                }
                if let Some(old) = node.p_tree1 {
                    node.p_tree1 = remap[PtrInx::get(old)];
                }
            }
        }
        if let Some(old) = self.root {
            self.root = remap[PtrInx::get(old)];
        }
        if let Some(old) = self.first {
            self.first = remap[PtrInx::get(old)];
        }
        if let Some(old) = self.last {
            self.last = remap[PtrInx::get(old)];
        }
    }

    /// Performs [AvlArena::compress_and_shrink] and returns an `Arena<P, P>`
    /// that can be used for [Recast]ing
    pub fn compress_and_shrink_recaster(&mut self) -> Arena<P, P> {
        let mut res = Arena::<P, P>::new();
        res.clone_from_with(&self.a, |_, _| P::invalid());
        self.compress_and_shrink_with(|p, _, q| *res.get_mut(p).unwrap() = q);
        res
    }
}

impl<P: Ptr, I, T: Recast<I>, C> Recast<I> for AvlArena<P, T, C> {
    fn recast<R: Recaster<Item = I>>(&mut self, recaster: &R) -> Result<(), <R as Recaster>::Item> {
        for i in 0..self.a.capacity() {
            if let Some((_, node)) = self.a.get_ignore_gen_mut(PtrInx::new(i)) {
                node.t.recast(recaster)?;
            }
        }
        Ok(())
    }
}
