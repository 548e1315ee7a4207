/// A different kind of iterator that does not borrow the collection.
///
/// Rust's external iterators are not "external" enough for arenas: iterating
/// while doing arbitrary mutations on the arena would otherwise require
/// collecting all the `Ptr`s up front. This trait allows the analogue of the
/// classic index loop over a `Vec`:
///
/// ```text
/// let mut adv = arena.advancer();
/// while let Some(p) = adv.advance(&arena) {
///     // `arena` is not borrowed in between calls, any mutating method can
///     // be used here, including ones that invalidate `p` itself
/// }
/// ```
///
/// Implementations guarantee that any `Some(..)` item was valid at the start
/// of that advancement, and that the same item is never returned twice.
/// Check each implementation for what mutations are supported mid-loop; it
/// is _not_ guaranteed that `advance` keeps returning `None` after the first
/// `None`.
pub trait Advancer {
    type Collection;
    type Item;

    fn advance(&mut self, collection: &Self::Collection) -> Option<Self::Item>;
}
