//! The rotation engine. Rotations relink parent and child pointers only;
//! elements never move between slots, which is what keeps `Ptr`s and
//! cursors valid across rebalancing.

use crate::{AvlArena, Ptr};

impl<P: Ptr, T, C> AvlArena<P, T, C> {
    /// Measures the height of the subtree rooted at `p` by descending the
    /// heavier side according to balance factors: `None` is 0, a leaf is 1.
    /// `O(height)`, and correct whenever the balance invariant holds for the
    /// proper descendants of `p` (the factor of `p` itself may be ±2).
    pub(crate) fn subtree_height(&self, mut p: Option<P::Inx>) -> u8 {
        let mut h = 0u8;
        while let Some(inx) = p {
            h = h.wrapping_add(1);
            let node = self.a.get_inx_unwrap(inx);
            p = if node.balance >= 0 {
                node.p_tree1
            } else {
                node.p_tree0
            };
        }
        h
    }

    /// Recomputes the balance factor of the node at `inx` from the measured
    /// heights of its child subtrees
    fn fix_balance(&mut self, inx: P::Inx) {
        let (p_tree0, p_tree1) = {
            let node = self.a.get_inx_unwrap(inx);
            (node.p_tree0, node.p_tree1)
        };
        let h0 = self.subtree_height(p_tree0);
        let h1 = self.subtree_height(p_tree1);
        self.a.get_inx_mut_unwrap(inx).balance = (h1 as i8).wrapping_sub(h0 as i8);
    }

    /// Repoints the child link of `parent` (or the root when `parent` is
    /// `None`) from `old` to `new`
    pub(crate) fn replace_child(&mut self, parent: Option<P::Inx>, old: P::Inx, new: P::Inx) {
        match parent {
            Some(inx) => {
                let node = self.a.get_inx_mut_unwrap(inx);
                if node.p_tree1 == Some(old) {
                    node.p_tree1 = Some(new);
                } else {
                    node.p_tree0 = Some(new);
                }
            }
            None => self.root = Some(new),
        }
    }

    /// Single left rotation pivoting at `g`, which must have a right child.
    /// Promotes that child into `g`'s position, demotes `g` to its left
    /// child, and reattaches the displaced grandchild subtree at the vacated
    /// link. Returns the index now occupying `g`'s old position.
    fn rotate_left(&mut self, g: P::Inx) -> P::Inx {
        let (p_parent, c) = {
            let node = self.a.get_inx_unwrap(g);
            (node.p_back, node.p_tree1.unwrap())
        };
        let displaced = self.a.get_inx_unwrap(c).p_tree0;
        {
            let node = self.a.get_inx_mut_unwrap(g);
            node.p_tree1 = displaced;
            node.p_back = Some(c);
        }
        if let Some(inx) = displaced {
            self.a.get_inx_mut_unwrap(inx).p_back = Some(g);
        }
        {
            let node = self.a.get_inx_mut_unwrap(c);
            node.p_tree0 = Some(g);
            node.p_back = p_parent;
        }
        self.replace_child(p_parent, g, c);
        // demoted node first, so the promoted node measures through already
        // corrected factors
        self.fix_balance(g);
        self.fix_balance(c);
        c
    }

    /// Mirror image of [AvlArena::rotate_left]; `g` must have a left child
    fn rotate_right(&mut self, g: P::Inx) -> P::Inx {
        let (p_parent, c) = {
            let node = self.a.get_inx_unwrap(g);
            (node.p_back, node.p_tree0.unwrap())
        };
        let displaced = self.a.get_inx_unwrap(c).p_tree1;
        {
            let node = self.a.get_inx_mut_unwrap(g);
            node.p_tree0 = displaced;
            node.p_back = Some(c);
        }
        if let Some(inx) = displaced {
            self.a.get_inx_mut_unwrap(inx).p_back = Some(g);
        }
        {
            let node = self.a.get_inx_mut_unwrap(c);
            node.p_tree1 = Some(g);
            node.p_back = p_parent;
        }
        self.replace_child(p_parent, g, c);
        self.fix_balance(g);
        self.fix_balance(c);
        c
    }

    /// Restores the balance invariant at `g`, whose balance factor has
    /// reached ±2. If the child on the heavy side leans the same direction
    /// (or is level, which only arises during removal) a single rotation
    /// suffices; if it leans the opposite direction that child is rotated in
    /// the opposite sense first. The two or three nodes whose subtree
    /// composition changed get their balance factors recomputed from
    /// measured heights; no other factor is touched. Returns the index now
    /// occupying `g`'s old position.
    pub(crate) fn rebalance(&mut self, g: P::Inx) -> P::Inx {
        if self.a.get_inx_unwrap(g).balance > 0 {
            let c = self.a.get_inx_unwrap(g).p_tree1.unwrap();
            if self.a.get_inx_unwrap(c).balance < 0 {
                self.rotate_right(c);
            }
            self.rotate_left(g)
        } else {
            let c = self.a.get_inx_unwrap(g).p_tree0.unwrap();
            if self.a.get_inx_unwrap(c).balance > 0 {
                self.rotate_left(c);
            }
            self.rotate_right(g)
        }
    }
}
