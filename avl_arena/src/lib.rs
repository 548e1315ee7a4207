#![no_std]
// `Ptr` validity is tracked with generation counters and the type system, so
// no unsafe code is needed
#![deny(unsafe_code)]

mod arena;
mod avl;
pub mod avl_iterators;
mod cmp;
mod entry;
pub mod iterators;
mod ptr;
mod traits;

extern crate alloc;

pub use arena::Arena;
pub use avl::{AvlArena, InsertError, NodeWalker};
pub use cmp::{Comparator, Decision, OrdComparator};
pub use ptr::{Ptr, PtrGen, PtrInx};
pub use recasting::{Recast, Recaster};
pub use traits::Advancer;
