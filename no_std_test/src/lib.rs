//! insures that the crate is `no_std`

#![no_std]

use avl_arena::{ptr_struct, Arena, AvlArena};

ptr_struct!(P0);
ptr_struct!(P1());

pub fn arena_get(a: &Arena<P0, u64>, p: P0) -> Option<&u64> {
    a.get(p)
}

pub fn tree_find(a: &mut AvlArena<P0, u64>, k: u64) -> Option<P0> {
    a.find(&k)
}

pub fn tree_height_nogen(a: &AvlArena<P1, u64>) -> usize {
    a.height()
}
