use super::Node;
use crate::{Arena, AvlArena, Comparator, Decision, Ptr};

/// Why an insertion left the tree unchanged. Ownership of the element is
/// handed back in both cases.
#[derive(Debug)]
pub enum InsertError<P: Ptr, T> {
    /// The comparator judged the element equal to the one at `existing`
    Duplicate { existing: P, element: T },
    /// The comparator returned [Decision::Skip]
    Skipped(T),
}

impl<P: Ptr, T> InsertError<P, T> {
    /// Takes back ownership of the rejected element
    pub fn into_element(self) -> T {
        match self {
            InsertError::Duplicate { element, .. } => element,
            InsertError::Skipped(element) => element,
        }
    }

    /// The `Ptr` to the equal preexisting element, if the rejection was a
    /// duplicate
    #[must_use]
    pub fn existing(&self) -> Option<P> {
        match self {
            InsertError::Duplicate { existing, .. } => Some(*existing),
            InsertError::Skipped(_) => None,
        }
    }
}

/// Where a comparator-guided descent from the root ended up
pub(crate) enum Descent<Inx> {
    /// An element comparing equal sits at this index
    Hit(Inx),
    /// Fell off the tree at the empty fringe below `parent` on the given
    /// side; `parent` is `None` when the tree is empty
    Fringe { parent: Option<Inx>, right: bool },
    /// The comparator skipped
    Bailed,
}

/// Descends from `root`, invoking `cmp` exactly once per visited node with
/// `t` as the probe
pub(crate) fn locate<P: Ptr, T, F: Comparator<T>>(
    a: &Arena<P, Node<P, T>>,
    root: Option<P::Inx>,
    cmp: &mut F,
    t: &T,
) -> Descent<P::Inx> {
    let mut p = match root {
        Some(p) => p,
        None => {
            return Descent::Fringe {
                parent: None,
                right: false,
            }
        }
    };
    loop {
        let node = a.get_inx_unwrap(p);
        match cmp.compare(t, &node.t) {
            Decision::Less => match node.p_tree0 {
                Some(next) => p = next,
                None => {
                    break Descent::Fringe {
                        parent: Some(p),
                        right: false,
                    }
                }
            },
            Decision::Equal => break Descent::Hit(p),
            Decision::Greater => match node.p_tree1 {
                Some(next) => p = next,
                None => {
                    break Descent::Fringe {
                        parent: Some(p),
                        right: true,
                    }
                }
            },
            Decision::Skip => break Descent::Bailed,
        }
    }
}

impl<P: Ptr, T, C> AvlArena<P, T, C> {
    /// Inserts `t` into `self` ordered by the stored comparator and returns
    /// a `Ptr` to it. The descent invokes the comparator exactly once per
    /// visited node, with `t` as the left operand.
    ///
    /// # Errors
    ///
    /// Returns ownership of `t` without modifying the tree if the comparator
    /// judges it equal to a stored element ([InsertError::Duplicate], which
    /// carries the `Ptr` to that element), or if the comparator skips
    /// ([InsertError::Skipped]).
    pub fn insert(&mut self, t: T) -> Result<P, InsertError<P, T>>
    where
        C: Comparator<T>,
    {
        let root = self.root;
        let target = {
            let Self {
                ref a, ref mut cmp, ..
            } = *self;
            locate(a, root, cmp, &t)
        };
        self.insert_at(target, t)
    }

    /// [AvlArena::insert] with a call-site comparator instead of the stored
    /// one
    pub fn insert_with<F: Comparator<T>>(
        &mut self,
        cmp: &mut F,
        t: T,
    ) -> Result<P, InsertError<P, T>> {
        let target = locate(&self.a, self.root, cmp, &t);
        self.insert_at(target, t)
    }

    fn insert_at(&mut self, target: Descent<P::Inx>, t: T) -> Result<P, InsertError<P, T>> {
        match target {
            Descent::Hit(inx) => {
                let gen = self.a.get_ignore_gen(inx).unwrap().0;
                Err(InsertError::Duplicate {
                    existing: Ptr::_from_raw(inx, gen),
                    element: t,
                })
            }
            Descent::Bailed => Err(InsertError::Skipped(t)),
            Descent::Fringe { parent: None, .. } => {
                let p_new = self.a.insert(Node {
                    t,
                    p_back: None,
                    p_tree0: None,
                    p_tree1: None,
                    balance: 0,
                });
                self.root = Some(p_new.inx());
                self.first = Some(p_new.inx());
                self.last = Some(p_new.inx());
                self.height = 1;
                Ok(p_new)
            }
            Descent::Fringe {
                parent: Some(parent),
                right,
            } => {
                let p_new = self.a.insert(Node {
                    t,
                    p_back: Some(parent),
                    p_tree0: None,
                    p_tree1: None,
                    balance: 0,
                });
                let inx = p_new.inx();
                {
                    let node = self.a.get_inx_mut_unwrap(parent);
                    if right {
                        node.p_tree1 = Some(inx);
                    } else {
                        node.p_tree0 = Some(inx);
                    }
                }
                // a new extreme can only attach to the old extreme
                if right {
                    if self.last == Some(parent) {
                        self.last = Some(inx);
                    }
                } else if self.first == Some(parent) {
                    self.first = Some(inx);
                }
                self.retrace_grow(inx);
                self.height = self.subtree_height(self.root);
                Ok(p_new)
            }
        }
    }

    /// Propagates the height growth of a freshly attached leaf toward the
    /// root: each ancestor's balance factor moves one step toward the side
    /// that grew. An ancestor landing on 0 absorbed the growth, so the
    /// ascent stops there. An ancestor landing on ±2 gets one rebalance,
    /// which restores its pre-insertion subtree height, so the ascent also
    /// stops there.
    fn retrace_grow(&mut self, p: P::Inx) {
        let mut child = p;
        loop {
            let parent = match self.a.get_inx_unwrap(child).p_back {
                Some(parent) => parent,
                None => break,
            };
            let from_right = self.a.get_inx_unwrap(parent).p_tree1 == Some(child);
            let node = self.a.get_inx_mut_unwrap(parent);
            node.balance = node.balance.wrapping_add(if from_right { 1 } else { -1 });
            match node.balance {
                0 => break,
                -1 | 1 => child = parent,
                _ => {
                    self.rebalance(parent);
                    break
                }
            }
        }
    }
}
