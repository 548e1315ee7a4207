use alloc::vec::Vec;
use core::cmp::Ordering;

use super::insert::{locate, Descent};
use crate::{Advancer, Arena, AvlArena, Comparator, Ptr, PtrInx};

impl<P: Ptr, T, C> AvlArena<P, T, C> {
    /// Used by tests
    #[doc(hidden)]
    pub fn _check_invariants(this: &Self) -> Result<(), &'static str>
    where
        T: Ord,
    {
        Arena::_check_invariants(&this.a)?;
        if this.a.is_empty() {
            if this.root.is_some() || this.first.is_some() || this.last.is_some() {
                return Err("empty tree has stale cached pointers")
            }
            if this.height != 0 {
                return Err("empty tree has nonzero height")
            }
            return Ok(())
        }
        // check the root
        let root = match this.root {
            Some(root) => root,
            None => return Err("nonempty tree has no root"),
        };
        match this.a.get_ignore_gen(root) {
            Some((_, node)) => {
                if node.p_back.is_some() {
                    return Err("root node has a back pointer")
                }
            }
            None => return Err("this.root is broken"),
        }
        // check link symmetry
        let mut adv = this.a.advancer();
        while let Some(p) = adv.advance(&this.a) {
            let node = this.a.get(p).unwrap();
            if let Some(p_back) = node.p_back {
                match this.a.get_ignore_gen(p_back) {
                    Some((_, parent)) => {
                        if (parent.p_tree0 != Some(p.inx())) && (parent.p_tree1 != Some(p.inx())) {
                            return Err("broken tree")
                        }
                    }
                    None => return Err("broken tree"),
                }
            } else if p.inx() != root {
                return Err("more than one root node")
            }
            if let Some(p_tree0) = node.p_tree0 {
                // prevent cases that the balance checks would not catch
                if Some(p_tree0) == node.p_tree1 {
                    return Err("`p_tree0` and `p_tree1` are the same")
                }
                match this.a.get_ignore_gen(p_tree0) {
                    Some((_, child)) => {
                        if child.p_back != Some(p.inx()) {
                            return Err("broken tree")
                        }
                    }
                    None => return Err("broken tree"),
                }
            }
            if let Some(p_tree1) = node.p_tree1 {
                match this.a.get_ignore_gen(p_tree1) {
                    Some((_, child)) => {
                        if child.p_back != Some(p.inx()) {
                            return Err("broken tree")
                        }
                    }
                    None => return Err("broken tree"),
                }
            }
        }
        // recompute every subtree height with an explicit post-order stack
        // and check the balance factors against them
        let mut heights: Vec<u8> = Vec::new();
        heights.resize(this.a.capacity(), 0);
        let mut stack: Vec<(P::Inx, bool)> = Vec::new();
        stack.push((root, false));
        while let Some((inx, expanded)) = stack.pop() {
            let node = match this.a.get_ignore_gen(inx) {
                Some((_, node)) => node,
                None => return Err("broken tree"),
            };
            if expanded {
                let h0 = match node.p_tree0 {
                    Some(c) => heights[PtrInx::get(c)],
                    None => 0,
                };
                let h1 = match node.p_tree1 {
                    Some(c) => heights[PtrInx::get(c)],
                    None => 0,
                };
                heights[PtrInx::get(inx)] = core::cmp::max(h0, h1).wrapping_add(1);
                if i16::from(node.balance) != i16::from(h1).wrapping_sub(i16::from(h0)) {
                    return Err("balance factor does not match subtree heights")
                }
                if node.balance < -1 || node.balance > 1 {
                    return Err("balance factor out of [-1, 1]")
                }
            } else {
                stack.push((inx, true));
                if let Some(c) = node.p_tree0 {
                    stack.push((c, false));
                }
                if let Some(c) = node.p_tree1 {
                    stack.push((c, false));
                }
                if stack.len() > this.a.len().wrapping_mul(2).wrapping_add(2) {
                    return Err("cycle")
                }
            }
        }
        if this.height != heights[PtrInx::get(root)] {
            return Err("cached height is stale")
        }
        // walk the in-order chain, checking ordering, count, and extremes
        let mut leftmost = root;
        while let Some(l) = this.a.get_ignore_gen(leftmost).unwrap().1.p_tree0 {
            leftmost = l;
        }
        if this.first != Some(leftmost) {
            return Err("this.first is not the leftmost node")
        }
        let mut count = 1;
        let mut prev = leftmost;
        while let Some(next) = this.next_inx(prev) {
            count += 1;
            if count > this.a.len() {
                return Err("in-order walk does not terminate")
            }
            let a = &this.a.get_ignore_gen(prev).unwrap().1.t;
            let b = &this.a.get_ignore_gen(next).unwrap().1.t;
            if Ord::cmp(a, b) != Ordering::Less {
                return Err("incorrect ordering")
            }
            prev = next;
        }
        if count != this.a.len() {
            return Err("in-order walk misses nodes")
        }
        if this.last != Some(prev) {
            return Err("this.last is not the rightmost node")
        }
        Ok(())
    }

    /// Finds the element the call-site comparator `cmp` judges equal to `t`,
    /// descending from the root in `O(log n)` with exactly one comparator
    /// call per visited node and no rebalancing. Returns `None` when no
    /// element compares equal or when the comparator skips.
    #[must_use]
    pub fn find_with<F: Comparator<T>>(&self, cmp: &mut F, t: &T) -> Option<P> {
        match locate(&self.a, self.root, cmp, t) {
            Descent::Hit(inx) => {
                let gen = self.a.get_ignore_gen(inx).unwrap().0;
                Some(Ptr::_from_raw(inx, gen))
            }
            _ => None,
        }
    }

    /// [AvlArena::find_with] with the stored comparator. Takes `&mut self`
    /// because comparing through the stored comparator may have side
    /// effects.
    #[must_use]
    pub fn find(&mut self, t: &T) -> Option<P>
    where
        C: Comparator<T>,
    {
        let root = self.root;
        let Self {
            ref a, ref mut cmp, ..
        } = *self;
        match locate(a, root, cmp, t) {
            Descent::Hit(inx) => {
                let gen = a.get_ignore_gen(inx).unwrap().0;
                Some(Ptr::_from_raw(inx, gen))
            }
            _ => None,
        }
    }

    /// In-order successor of the node at `inx`: the leftmost node of the
    /// right subtree if there is one, otherwise the nearest ancestor reached
    /// through a left-child edge
    pub(crate) fn next_inx(&self, inx: P::Inx) -> Option<P::Inx> {
        if let Some(mut p) = self.a.get_inx_unwrap(inx).p_tree1 {
            while let Some(l) = self.a.get_inx_unwrap(p).p_tree0 {
                p = l;
            }
            Some(p)
        } else {
            let mut child = inx;
            loop {
                let parent = self.a.get_inx_unwrap(child).p_back?;
                if self.a.get_inx_unwrap(parent).p_tree0 == Some(child) {
                    break Some(parent)
                }
                child = parent;
            }
        }
    }

    /// Mirror image of [AvlArena::next_inx]
    pub(crate) fn prev_inx(&self, inx: P::Inx) -> Option<P::Inx> {
        if let Some(mut p) = self.a.get_inx_unwrap(inx).p_tree0 {
            while let Some(r) = self.a.get_inx_unwrap(p).p_tree1 {
                p = r;
            }
            Some(p)
        } else {
            let mut child = inx;
            loop {
                let parent = self.a.get_inx_unwrap(child).p_back?;
                if self.a.get_inx_unwrap(parent).p_tree1 == Some(child) {
                    break Some(parent)
                }
                child = parent;
            }
        }
    }

    /// Returns the `Ptr` to the next greater element, or `None` if `p` is
    /// invalid or points to the greatest element
    #[must_use]
    pub fn next(&self, p: P) -> Option<P> {
        if !self.a.contains(p) {
            return None
        }
        let inx = self.next_inx(p.inx())?;
        let gen = self.a.get_ignore_gen(inx).unwrap().0;
        Some(Ptr::_from_raw(inx, gen))
    }

    /// Returns the `Ptr` to the next lesser element, or `None` if `p` is
    /// invalid or points to the least element
    #[must_use]
    pub fn prev(&self, p: P) -> Option<P> {
        if !self.a.contains(p) {
            return None
        }
        let inx = self.prev_inx(p.inx())?;
        let gen = self.a.get_ignore_gen(inx).unwrap().0;
        Some(Ptr::_from_raw(inx, gen))
    }
}
