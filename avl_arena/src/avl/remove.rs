use super::insert::{locate, Descent};
use crate::{AvlArena, Comparator, Ptr};

impl<P: Ptr, T, C> AvlArena<P, T, C> {
    /// Removes the element pointed to by `p`, returns it, and invalidates
    /// old `Ptr`s to it. `Ptr`s to every other element stay valid, including
    /// across any rotations this performs. Does nothing and returns `None`
    /// if `p` is invalid.
    #[must_use]
    pub fn remove(&mut self, p: P) -> Option<T> {
        if !self.a.contains(p) {
            return None
        }
        let inx = p.inx();
        // step the cached extremes inward while the structure is intact
        if self.first == Some(inx) {
            self.first = self.next_inx(inx);
        }
        if self.last == Some(inx) {
            self.last = self.prev_inx(inx);
        }
        let (p_back, p_tree0, p_tree1, balance) = {
            let node = self.a.get_inx_unwrap(inx);
            (node.p_back, node.p_tree0, node.p_tree1, node.balance)
        };
        let retrace = match (p_tree0, p_tree1) {
            (Some(left), Some(right)) => {
                // Interior node. The in-order predecessor (rightmost of the
                // left subtree, which has no right child) is relinked into
                // the target's position; its slot never moves, so `Ptr`s and
                // cursors on it survive the displacement.
                let mut pred = left;
                while let Some(r) = self.a.get_inx_unwrap(pred).p_tree1 {
                    pred = r;
                }
                let start = if pred == left {
                    // direct left child: it keeps its own left subtree, and
                    // the one-level shrink lands on its left side
                    (pred, false)
                } else {
                    // unlink the predecessor, splicing its left child up
                    let pred_parent = self.a.get_inx_unwrap(pred).p_back.unwrap();
                    let pred_left = self.a.get_inx_unwrap(pred).p_tree0;
                    self.a.get_inx_mut_unwrap(pred_parent).p_tree1 = pred_left;
                    if let Some(l) = pred_left {
                        self.a.get_inx_mut_unwrap(l).p_back = Some(pred_parent);
                    }
                    // it inherits the target's left subtree
                    self.a.get_inx_mut_unwrap(pred).p_tree0 = Some(left);
                    self.a.get_inx_mut_unwrap(left).p_back = Some(pred);
                    (pred_parent, true)
                };
                // install at the target's position with its links and factor
                {
                    let node = self.a.get_inx_mut_unwrap(pred);
                    node.p_back = p_back;
                    node.p_tree1 = Some(right);
                    node.balance = balance;
                }
                self.a.get_inx_mut_unwrap(right).p_back = Some(pred);
                self.replace_child(p_back, inx, pred);
                Some(start)
            }
            _ => {
                // leaf or single child: splice the child subtree (possibly
                // an empty fringe) into the target's position
                let child = p_tree0.or(p_tree1);
                if let Some(c) = child {
                    self.a.get_inx_mut_unwrap(c).p_back = p_back;
                }
                match p_back {
                    Some(parent) => {
                        let from_right = {
                            let node = self.a.get_inx_mut_unwrap(parent);
                            if node.p_tree1 == Some(inx) {
                                node.p_tree1 = child;
                                true
                            } else {
                                node.p_tree0 = child;
                                false
                            }
                        };
                        Some((parent, from_right))
                    }
                    None => {
                        self.root = child;
                        None
                    }
                }
            }
        };
        if let Some((parent, from_right)) = retrace {
            self.retrace_shrink(parent, from_right);
        }
        self.height = self.subtree_height(self.root);
        self.a.remove(p).map(|node| node.t)
    }

    /// Finds the element the stored comparator judges equal to `t`, removes
    /// it, and returns it. Returns `None` without modifying the tree when no
    /// element compares equal or when the comparator skips.
    #[must_use]
    pub fn remove_val(&mut self, t: &T) -> Option<T>
    where
        C: Comparator<T>,
    {
        let root = self.root;
        let target = {
            let Self {
                ref a, ref mut cmp, ..
            } = *self;
            locate(a, root, cmp, t)
        };
        self.remove_located(target)
    }

    /// [AvlArena::remove_val] with a call-site comparator instead of the
    /// stored one
    #[must_use]
    pub fn remove_val_with<F: Comparator<T>>(&mut self, cmp: &mut F, t: &T) -> Option<T> {
        let target = locate(&self.a, self.root, cmp, t);
        self.remove_located(target)
    }

    fn remove_located(&mut self, target: Descent<P::Inx>) -> Option<T> {
        match target {
            Descent::Hit(inx) => {
                let gen = self.a.get_ignore_gen(inx).unwrap().0;
                self.remove(Ptr::_from_raw(inx, gen))
            }
            _ => None,
        }
    }

    /// Propagates a one-level height shrink that happened below `parent` on
    /// the given side. Unlike insertion, a rotation here does not end the
    /// ascent on its own: whether the rotated subtree kept or lost height is
    /// measured directly from the structure instead of being inferred from
    /// propagated balance factors.
    fn retrace_shrink(&mut self, mut parent: P::Inx, mut from_right: bool) {
        loop {
            let node = self.a.get_inx_mut_unwrap(parent);
            node.balance = node.balance.wrapping_add(if from_right { -1 } else { 1 });
            let bal = node.balance;
            let sub = match bal {
                // the shorter side caught up, subtree height is unchanged
                -1 | 1 => break,
                // this subtree shrank, keep ascending
                0 => parent,
                _ => {
                    // ±2: the pre-rotation height here is one more than the
                    // heavy side, whose factors are all still valid
                    let heavy = {
                        let node = self.a.get_inx_unwrap(parent);
                        if bal > 0 {
                            node.p_tree1
                        } else {
                            node.p_tree0
                        }
                    };
                    let h_before = self.subtree_height(heavy).wrapping_add(1);
                    let new_sub = self.rebalance(parent);
                    if self.subtree_height(Some(new_sub)) == h_before {
                        break
                    }
                    new_sub
                }
            };
            match self.a.get_inx_unwrap(sub).p_back {
                Some(next) => {
                    from_right = self.a.get_inx_unwrap(next).p_tree1 == Some(sub);
                    parent = next;
                }
                None => break,
            }
        }
    }
}
