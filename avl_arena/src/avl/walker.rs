use core::{fmt, ptr};

use crate::{AvlArena, Ptr};

/// A raw structural cursor over the nodes of an [AvlArena], navigating
/// parent/left-child/right-child edges directly instead of in-order. Useful
/// for callers that need to inspect the tree shape itself, e.g. external
/// balancing diagnostics.
///
/// The walker holds a `P` to its current node. A walker whose node has been
/// removed (or that was created from an already invalid `P`) is *empty*: it
/// resolves to no element, refuses to move, and stays a well defined,
/// comparable value. Two walkers are equal when they are over the same tree
/// and hold equal `P`s, so two empty walkers on the same tree made from the
/// same expired `P` compare equal, while walkers over different trees never
/// do.
pub struct NodeWalker<'a, P: Ptr, T, C> {
    tree: &'a AvlArena<P, T, C>,
    p: P,
}

impl<'a, P: Ptr, T, C> NodeWalker<'a, P, T, C> {
    /// The `P` of the current node. May be expired or [Ptr::invalid].
    pub fn ptr(&self) -> P {
        self.p
    }

    /// Returns a reference to the current element, or `None` if the walker
    /// is empty
    #[must_use]
    pub fn get(&self) -> Option<&'a T> {
        self.tree.get(self.p)
    }

    /// Returns if the walker currently resolves to no element
    pub fn is_empty(&self) -> bool {
        !self.tree.contains(self.p)
    }

    /// Returns the balance factor of the current node, or `None` if the
    /// walker is empty
    #[must_use]
    pub fn balance(&self) -> Option<i8> {
        self.tree.a.get(self.p).map(|node| node.balance)
    }

    /// Returns the height of the subtree under the current node (1 for a
    /// leaf), or 0 if the walker is empty
    pub fn subtree_height(&self) -> usize {
        if self.tree.contains(self.p) {
            usize::from(self.tree.subtree_height(Some(self.p.inx())))
        } else {
            0
        }
    }

    /// Returns if the current node has a parent
    pub fn has_parent(&self) -> bool {
        match self.tree.a.get(self.p) {
            Some(node) => node.p_back.is_some(),
            None => false,
        }
    }

    /// Returns if the current node has a left child
    pub fn has_left(&self) -> bool {
        match self.tree.a.get(self.p) {
            Some(node) => node.p_tree0.is_some(),
            None => false,
        }
    }

    /// Returns if the current node has a right child
    pub fn has_right(&self) -> bool {
        match self.tree.a.get(self.p) {
            Some(node) => node.p_tree1.is_some(),
            None => false,
        }
    }

    /// Returns if the current node is the left child of its parent, derived
    /// from the parent's stored child links
    pub fn is_left_child(&self) -> bool {
        match self.tree.a.get(self.p) {
            Some(node) => match node.p_back {
                Some(parent) => {
                    self.tree.a.get_inx_unwrap(parent).p_tree0 == Some(self.p.inx())
                }
                None => false,
            },
            None => false,
        }
    }

    /// Mirror image of [NodeWalker::is_left_child]
    pub fn is_right_child(&self) -> bool {
        match self.tree.a.get(self.p) {
            Some(node) => match node.p_back {
                Some(parent) => {
                    self.tree.a.get_inx_unwrap(parent).p_tree1 == Some(self.p.inx())
                }
                None => false,
            },
            None => false,
        }
    }

    fn reposition(&mut self, inx: Option<P::Inx>) -> bool {
        match inx {
            Some(inx) => {
                let gen = self.tree.a.get_ignore_gen(inx).unwrap().0;
                self.p = Ptr::_from_raw(inx, gen);
                true
            }
            None => false,
        }
    }

    /// Moves to the parent of the current node. Returns whether the move
    /// happened; an empty walker or one at the root does not move.
    pub fn ascend(&mut self) -> bool {
        match self.tree.a.get(self.p) {
            Some(node) => self.reposition(node.p_back),
            None => false,
        }
    }

    /// Moves to the left child of the current node. Returns whether the move
    /// happened; an empty walker or one at an empty left fringe does not
    /// move.
    pub fn descend_left(&mut self) -> bool {
        match self.tree.a.get(self.p) {
            Some(node) => self.reposition(node.p_tree0),
            None => false,
        }
    }

    /// Mirror image of [NodeWalker::descend_left]
    pub fn descend_right(&mut self) -> bool {
        match self.tree.a.get(self.p) {
            Some(node) => self.reposition(node.p_tree1),
            None => false,
        }
    }
}

impl<'a, P: Ptr, T, C> Clone for NodeWalker<'a, P, T, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, P: Ptr, T, C> Copy for NodeWalker<'a, P, T, C> {}

impl<'a, P: Ptr, T, C> PartialEq for NodeWalker<'a, P, T, C> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && (self.p == other.p)
    }
}

impl<'a, P: Ptr, T, C> Eq for NodeWalker<'a, P, T, C> {}

impl<'a, P: Ptr, T, C> fmt::Debug for NodeWalker<'a, P, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeWalker").field("p", &self.p).finish()
    }
}

impl<P: Ptr, T, C> AvlArena<P, T, C> {
    /// Returns a [NodeWalker] positioned at the root of `self`, or an empty
    /// one if `self.is_empty()`
    pub fn walker(&self) -> NodeWalker<'_, P, T, C> {
        let p = match self.root {
            Some(inx) => {
                let gen = self.a.get_ignore_gen(inx).unwrap().0;
                Ptr::_from_raw(inx, gen)
            }
            None => P::invalid(),
        };
        NodeWalker { tree: self, p }
    }

    /// Returns a [NodeWalker] positioned at `p`, which may be any `P`
    /// previously obtained from `self` (an invalid `p` gives an empty
    /// walker)
    pub fn walker_at(&self, p: P) -> NodeWalker<'_, P, T, C> {
        NodeWalker { tree: self, p }
    }
}
