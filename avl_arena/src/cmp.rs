use core::cmp::Ordering;

/// Outcome of a three-way comparison that is allowed to decline answering.
///
/// `Less`/`Equal`/`Greater` have their usual meanings. `Skip` means the
/// comparator cannot or will not order the operands right now; the operation
/// that asked aborts without structural change (see
/// [AvlArena::insert](crate::AvlArena::insert)). This exists for comparators
/// that are boundaries to an external decision maker, where "put this one
/// aside and come back to it later" is an answer a user can give.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    Less,
    Equal,
    Greater,
    Skip,
}

impl From<Ordering> for Decision {
    #[inline]
    fn from(o: Ordering) -> Self {
        match o {
            Ordering::Less => Decision::Less,
            Ordering::Equal => Decision::Equal,
            Ordering::Greater => Decision::Greater,
        }
    }
}

/// A three-way comparison over `T` that may carry state or side effects.
///
/// `compare` takes `&mut self` because a comparator may be an interactive
/// boundary (e.g. prompting a human for each pairwise decision). Callers in
/// this crate uphold that `compare` is invoked at most once per comparison
/// point a descent actually needs, and never speculatively, since each
/// invocation may be user-visible and irreversible.
///
/// Returning [Decision::Equal] from an insertion descent rejects the new
/// element as a duplicate. It is a logic error for the relative order of
/// elements already in a tree to change between calls; the structure stays
/// memory-safe but ordered operations may return arbitrary results.
pub trait Comparator<T> {
    /// Orders `lhs` relative to `rhs`, where `lhs` is the probe element of
    /// the surrounding operation and `rhs` is an element already stored.
    fn compare(&mut self, lhs: &T, rhs: &T) -> Decision;
}

impl<T, F: FnMut(&T, &T) -> Decision> Comparator<T> for F {
    #[inline]
    fn compare(&mut self, lhs: &T, rhs: &T) -> Decision {
        self(lhs, rhs)
    }
}

/// The default comparator: defers to [Ord] and never skips
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrdComparator;

impl<T: Ord> Comparator<T> for OrdComparator {
    #[inline]
    fn compare(&mut self, lhs: &T, rhs: &T) -> Decision {
        Decision::from(Ord::cmp(lhs, rhs))
    }
}
