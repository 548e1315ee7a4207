use core::{
    fmt::Debug,
    hash::Hash,
    num::{NonZeroU128, NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU8},
};

/// Index type of a [Ptr](crate::Ptr).
///
/// Users should never have to implement this, it is implemented only for
/// Rust's unsigned integers.
pub trait PtrInx:
    Debug + Hash + Clone + Copy + PartialEq + Eq + PartialOrd + Ord + Send + Sync + Unpin
{
    /// Note: this is a truncating cast, higher level functions handle the
    /// fallible cases
    fn new(inx: usize) -> Self;
    fn get(this: Self) -> usize;
    /// The maximum representable value, truncated down to `usize::MAX` if
    /// necessary
    fn max() -> usize;
}

// trivial functions are aggressively inlined in case of cross compilation
// unit problems

macro_rules! impl_ptr_inx {
    ($($x:ident)*) => {
        $(
            impl PtrInx for $x {
                #[inline]
                fn new(inx: usize) -> Self {
                    inx as $x
                }

                #[inline]
                fn get(this: Self) -> usize {
                    this as usize
                }

                #[inline]
                fn max() -> usize {
                    $x::MAX as usize
                }
            }
        )*
    };
}

impl_ptr_inx!(usize u8 u16 u32 u64);

/// Generation counter type of a [Ptr](crate::Ptr).
///
/// Users should never have to implement this, it is implemented only for the
/// `NonZeroU...` types and for `()`.
pub trait PtrGen:
    Debug + Hash + Clone + Copy + PartialEq + Eq + PartialOrd + Ord + Send + Sync + Unpin
{
    /// Arenas with generation counters always start at generation 2, so that
    /// generation 1 can be used by [Ptr::invalid](crate::Ptr::invalid) and be
    /// guaranteed to never match an allocation.
    fn one() -> Self;
    /// The value of 2
    fn two() -> Self;
    /// Returns `this` incremented by one, panicking on overflow.
    fn increment(this: Self) -> Self;
}

macro_rules! impl_ptr_gen {
    ($($x:ident)*) => {
        $(
            impl PtrGen for $x {
                #[inline]
                fn one() -> Self {
                    Self::new(1).unwrap()
                }

                #[inline]
                fn two() -> Self {
                    Self::new(2).unwrap()
                }

                #[inline]
                fn increment(this: Self) -> Self {
                    match Self::new(this.get().wrapping_add(1)) {
                        Some(x) => x,
                        None => panic!("generation overflow"),
                    }
                }
            }
        )*
    };
}

impl_ptr_gen!(NonZeroU8 NonZeroU16 NonZeroU32 NonZeroU64 NonZeroU128);

/// The generationless case. Arenas with `Gen = ()` do not detect use of
/// invalidated `Ptr`s.
impl PtrGen for () {
    #[inline]
    fn one() -> Self {}

    #[inline]
    fn two() -> Self {}

    #[inline]
    fn increment(_this: Self) -> Self {}
}

/// A generation-tagged arena slot handle: an index paired with the
/// generation counter value the slot had when the handle was created.
///
/// Users should never have to manually implement this; the [ptr_struct]
/// macro generates implementing structs. Using a different implementing
/// struct per arena makes the type system guard against mixing up handles
/// from different arenas, which also serves as tree identity for the
/// cursors of [AvlArena](crate::AvlArena).
///
/// A `Ptr` is a plain `Copy` value and stays a well defined, comparable
/// value after the entry it pointed to is removed; it merely stops
/// resolving. The `PartialEq`/`Eq` implementations differentiate between
/// pointers at the same index but different generations, so an expired
/// handle never equals a live one.
pub trait Ptr:
    Debug + Hash + Clone + Copy + PartialEq + Eq + PartialOrd + Ord + Send + Sync + Unpin
{
    /// The recommended general purpose type for this is `usize`
    type Inx: PtrInx;

    /// The recommended general purpose type for this is `NonZeroU64` if
    /// generation tracking is wanted, otherwise `()`
    type Gen: PtrGen;

    /// Returns a `Ptr` with generation 1 and the maximum index. Arenas start
    /// at generation 2, so this is guaranteed invalid when generation
    /// counters are used.
    fn invalid() -> Self;

    /// The raw index of this `Ptr`
    fn inx(self) -> Self::Inx;

    /// The generation of this `Ptr`
    fn gen(self) -> Self::Gen;

    /// Do not use this unless you are manually managing internal details
    fn _from_raw(inx: Self::Inx, gen: Self::Gen) -> Self;
}

/// Convenience macro for making new structs that implement [Ptr](crate::Ptr).
/// By default, `usize` is used for the index type and `NonZeroU64` for the
/// generation type. The struct name can be followed by square brackets
/// containing the index type (`u8` through `u64` or `usize`), and then by
/// parenthesis containing the generation type (`NonZeroU8` through
/// `NonZeroU128`). Empty parenthesis turn generation counting off entirely.
/// Multiple structs can be made with semicolon separators.
///
/// ```
/// use core::num::NonZeroU16;
///
/// use avl_arena::ptr_struct;
///
/// // the default, equivalent to `P0[usize](NonZeroU64)`
/// ptr_struct!(P0);
///
/// // smaller index and generation types
/// ptr_struct!(P1[u16](NonZeroU16));
///
/// // no generation counter
/// ptr_struct!(P2());
///
/// // several at once
/// ptr_struct!(Q0; Q1[u32]; R0());
/// ```
#[macro_export]
macro_rules! ptr_struct {
    ($($name:ident[$inx:path]($gen:path)),* $(; $($rest:tt)*)?) => {
        $(
            #[derive(
                core::hash::Hash,
                core::clone::Clone,
                core::marker::Copy,
                core::cmp::PartialEq,
                core::cmp::Eq,
                core::cmp::PartialOrd,
                core::cmp::Ord
            )]
            pub struct $name {
                // note: in this order `PartialOrd` orders primarily off of
                // the index
                #[doc(hidden)]
                _internal_inx: $inx,
                #[doc(hidden)]
                _internal_gen: $gen,
            }

            impl $crate::Ptr for $name {
                type Inx = $inx;
                type Gen = $gen;

                #[inline]
                fn invalid() -> Self {
                    Self {
                        _internal_inx: $crate::PtrInx::new(
                            <$inx as $crate::PtrInx>::max()
                        ),
                        _internal_gen: $crate::PtrGen::one(),
                    }
                }

                #[inline]
                fn inx(self) -> Self::Inx {
                    self._internal_inx
                }

                #[inline]
                fn gen(self) -> Self::Gen {
                    self._internal_gen
                }

                #[inline]
                #[doc(hidden)]
                fn _from_raw(_internal_inx: Self::Inx, _internal_gen: Self::Gen) -> Self {
                    Self {
                        _internal_inx,
                        _internal_gen,
                    }
                }
            }

            impl core::default::Default for $name {
                #[inline]
                fn default() -> Self {
                    $crate::Ptr::invalid()
                }
            }

            // manually implemented so that it is inline and has no newlines,
            // which makes the `Debug` implementation on arenas look much
            // nicer
            impl core::fmt::Debug for $name {
                fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                    f.write_fmt(format_args!(
                        "{}[{:?}]({:?})",
                        stringify!($name),
                        $crate::PtrInx::get($crate::Ptr::inx(*self)),
                        $crate::Ptr::gen(*self),
                    ))
                }
            }

            impl core::fmt::Display for $name {
                fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                    core::fmt::Debug::fmt(self, f)
                }
            }
        )*
        $($crate::ptr_struct!($($rest)*);)?
    };
    ($($name:ident[$inx:path]()),* $(; $($rest:tt)*)?) => {
        $(
            #[derive(
                core::hash::Hash,
                core::clone::Clone,
                core::marker::Copy,
                core::cmp::PartialEq,
                core::cmp::Eq,
                core::cmp::PartialOrd,
                core::cmp::Ord
            )]
            pub struct $name {
                #[doc(hidden)]
                _internal_inx: $inx,
            }

            impl $crate::Ptr for $name {
                type Inx = $inx;
                type Gen = ();

                #[inline]
                fn invalid() -> Self {
                    Self {
                        _internal_inx: $crate::PtrInx::new(
                            <$inx as $crate::PtrInx>::max()
                        ),
                    }
                }

                #[inline]
                fn inx(self) -> Self::Inx {
                    self._internal_inx
                }

                #[inline]
                fn gen(self) -> Self::Gen {}

                #[inline]
                #[doc(hidden)]
                fn _from_raw(_internal_inx: Self::Inx, _internal_gen: Self::Gen) -> Self {
                    let () = _internal_gen;
                    Self { _internal_inx }
                }
            }

            impl core::default::Default for $name {
                #[inline]
                fn default() -> Self {
                    $crate::Ptr::invalid()
                }
            }

            impl core::fmt::Debug for $name {
                fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                    f.write_fmt(format_args!(
                        "{}[{:?}]",
                        stringify!($name),
                        $crate::PtrInx::get($crate::Ptr::inx(*self)),
                    ))
                }
            }

            impl core::fmt::Display for $name {
                fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                    core::fmt::Debug::fmt(self, f)
                }
            }
        )*
        $($crate::ptr_struct!($($rest)*);)?
    };
    ($($name:ident[$inx:path]),* $(; $($rest:tt)*)?) => {
        $(
            $crate::ptr_struct!($name[$inx](core::num::NonZeroU64));
        )*
        $($crate::ptr_struct!($($rest)*);)?
    };
    ($($name:ident()),* $(; $($rest:tt)*)?) => {
        $(
            $crate::ptr_struct!($name[usize]());
        )*
        $($crate::ptr_struct!($($rest)*);)?
    };
    ($($name:ident),* $(; $($rest:tt)*)?) => {
        $(
            $crate::ptr_struct!($name[usize](core::num::NonZeroU64));
        )*
        $($crate::ptr_struct!($($rest)*);)?
    };
    () => {};
}
