//! Iterators and advancers for [Arena]

use core::marker::PhantomData;

use recasting::{Recast, Recaster};

use crate::{Advancer, Arena, Ptr, PtrInx};

/// An advancer over the valid `P`s of an [Arena]. Supports any mutation of
/// the arena mid-loop, including invalidating the item just returned.
pub struct PtrAdvancer<P: Ptr, T> {
    inx: usize,
    _boo: PhantomData<fn() -> (P, T)>,
}

impl<P: Ptr, T> Advancer for PtrAdvancer<P, T> {
    type Collection = Arena<P, T>;
    type Item = P;

    fn advance(&mut self, collection: &Self::Collection) -> Option<Self::Item> {
        // rechecks the bound every step in case of slot count changes
        while self.inx < collection.capacity() {
            let i = self.inx;
            self.inx = self.inx.wrapping_add(1);
            if let Some((gen, _)) = collection.get_ignore_gen(PtrInx::new(i)) {
                return Some(Ptr::_from_raw(PtrInx::new(i), gen))
            }
        }
        None
    }
}

/// An iterator over the valid `P`s of an [Arena]
pub struct Ptrs<'a, P: Ptr, T> {
    arena: &'a Arena<P, T>,
    adv: PtrAdvancer<P, T>,
}

impl<'a, P: Ptr, T> Iterator for Ptrs<'a, P, T> {
    type Item = P;

    fn next(&mut self) -> Option<Self::Item> {
        self.adv.advance(self.arena)
    }
}

/// An iterator over `&T` in an [Arena]
pub struct Vals<'a, P: Ptr, T> {
    arena: &'a Arena<P, T>,
    adv: PtrAdvancer<P, T>,
}

impl<'a, P: Ptr, T> Iterator for Vals<'a, P, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.adv
            .advance(self.arena)
            .map(|p| self.arena.get(p).unwrap())
    }
}

/// An iterator over `(P, &T)` tuples in an [Arena]
pub struct Iter<'a, P: Ptr, T> {
    arena: &'a Arena<P, T>,
    adv: PtrAdvancer<P, T>,
}

impl<'a, P: Ptr, T> Iterator for Iter<'a, P, T> {
    type Item = (P, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        self.adv
            .advance(self.arena)
            .map(|p| (p, self.arena.get(p).unwrap()))
    }
}

impl<'a, P: Ptr, T> IntoIterator for &'a Arena<P, T> {
    type IntoIter = Iter<'a, P, T>;
    type Item = (P, &'a T);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<P: Ptr, T> Arena<P, T> {
    /// Advances over every valid `Ptr` in `self`, in ascending slot order
    pub fn advancer(&self) -> PtrAdvancer<P, T> {
        PtrAdvancer {
            inx: 0,
            _boo: PhantomData,
        }
    }

    /// Iteration over all valid `P` in the arena
    pub fn ptrs(&self) -> Ptrs<P, T> {
        Ptrs {
            arena: self,
            adv: self.advancer(),
        }
    }

    /// Iteration over `&T`
    pub fn vals(&self) -> Vals<P, T> {
        Vals {
            arena: self,
            adv: self.advancer(),
        }
    }

    /// Iteration over `(P, &T)` tuples
    pub fn iter(&self) -> Iter<P, T> {
        Iter {
            arena: self,
            adv: self.advancer(),
        }
    }

    /// Performs [Arena::compress_and_shrink] and returns an `Arena<P, P>`
    /// that can be used for [Recast]ing
    pub fn compress_and_shrink_recaster(&mut self) -> Arena<P, P> {
        let mut res = Arena::<P, P>::new();
        res.clone_from_with(self, |_, _| P::invalid());
        self.compress_and_shrink_with(|p, _, q| *res.get_mut(p).unwrap() = q);
        res
    }
}

impl<P: Ptr> Recaster for Arena<P, P> {
    type Item = P;

    fn recast_item(&self, item: &mut Self::Item) -> Result<(), Self::Item> {
        if let Some(res) = self.get(*item) {
            *item = *res;
            Ok(())
        } else {
            Err(*item)
        }
    }
}

impl<P: Ptr, I, T: Recast<I>> Recast<I> for Arena<P, T> {
    fn recast<R: Recaster<Item = I>>(&mut self, recaster: &R) -> Result<(), <R as Recaster>::Item> {
        for i in 0..self.capacity() {
            if let Some((_, t)) = self.get_ignore_gen_mut(PtrInx::new(i)) {
                t.recast(recaster)?;
            }
        }
        Ok(())
    }
}
