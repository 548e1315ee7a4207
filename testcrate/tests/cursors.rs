use avl_arena::{Advancer, AvlArena, Ptr};
use testcrate::{P0, P1};

#[test]
fn iter_directions() {
    let mut a: AvlArena<P0, u64> = AvlArena::new();
    for k in [5, 2, 8, 1, 3, 7, 9, 0, 4, 6] {
        a.insert(k).unwrap();
    }
    let fwd: Vec<u64> = a.iter().map(|(_, t)| *t).collect();
    assert_eq!(fwd, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    let rev: Vec<u64> = a.iter().rev().map(|(_, t)| *t).collect();
    assert_eq!(rev, [9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);

    // both ends meet in the middle without overlap
    let mut iter = a.iter();
    let mut from_front = vec![];
    let mut from_back = vec![];
    loop {
        match iter.next() {
            Some((_, t)) => from_front.push(*t),
            None => break,
        }
        match iter.next_back() {
            Some((_, t)) => from_back.push(*t),
            None => break,
        }
    }
    assert_eq!(from_front, [0, 1, 2, 3, 4]);
    assert_eq!(from_back, [9, 8, 7, 6, 5]);

    // `ptrs` and `vals` agree with `iter`
    let by_ptr: Vec<u64> = a.ptrs().map(|p| a[p]).collect();
    assert_eq!(by_ptr, fwd);
    let by_val: Vec<u64> = a.vals().copied().collect();
    assert_eq!(by_val, fwd);
}

#[test]
fn neighbor_navigation() {
    let mut a: AvlArena<P0, u64> = AvlArena::new();
    for k in 0..10 {
        a.insert(k).unwrap();
    }
    // chase `next` from the minimum and `prev` from the maximum
    let mut p = a.min().unwrap();
    let mut chain = vec![a[p]];
    while let Some(next) = a.next(p) {
        chain.push(a[next]);
        p = next;
    }
    assert_eq!(chain, (0..10).collect::<Vec<u64>>());
    let mut p = a.max().unwrap();
    let mut chain = vec![a[p]];
    while let Some(prev) = a.prev(p) {
        chain.push(a[prev]);
        p = prev;
    }
    assert_eq!(chain, (0..10).rev().collect::<Vec<u64>>());
}

#[test]
fn advancer_with_mutation() {
    let mut a: AvlArena<P0, u64> = AvlArena::new();
    for k in 0..16 {
        a.insert(k).unwrap();
    }
    // removing the current entry mid-loop is supported
    let mut adv = a.advancer();
    while let Some(p) = adv.advance(&a) {
        if a[p] % 2 == 1 {
            a.remove(p).unwrap();
        }
    }
    let remaining: Vec<u64> = a.vals().copied().collect();
    assert_eq!(remaining, [0, 2, 4, 6, 8, 10, 12, 14]);
    if let Err(e) = AvlArena::_check_invariants(&a) {
        panic!("{e}");
    }

    // inserting mid-loop is also fine; the advancer had already resolved the
    // successor of 8, so the new 9 goes unseen
    let p8 = a.find(&8).unwrap();
    let mut adv = a.advancer_starting_from(p8);
    let mut seen = vec![];
    while let Some(p) = adv.advance(&a) {
        seen.push(a[p]);
        if a[p] == 8 {
            a.insert(9).unwrap();
        }
    }
    assert_eq!(seen, [8, 10, 12, 14]);
}

#[test]
fn expired_ptrs() {
    let mut a: AvlArena<P0, u64> = AvlArena::new();
    let p1 = a.insert(1).unwrap();
    let p2 = a.insert(2).unwrap();
    let p3 = a.insert(3).unwrap();

    assert_eq!(a.remove(p2), Some(2));
    // only `Ptr`s to the removed element expired
    assert!(!a.contains(p2));
    assert!(a.get(p2).is_none());
    assert!(a.next(p2).is_none());
    assert!(a.prev(p2).is_none());
    assert!(a.remove(p2).is_none());
    assert_eq!(a[p1], 1);
    assert_eq!(a[p3], 3);
    assert_eq!(a.next(p1), Some(p3));

    // an expired `Ptr` is still a plain comparable value
    let p2_copy = p2;
    assert_eq!(p2, p2_copy);
    assert_ne!(p2, P0::invalid());

    // reinserting the same element gives a fresh generation, the old `Ptr`
    // stays expired
    let p2_new = a.insert(2).unwrap();
    assert_ne!(p2, p2_new);
    assert_eq!(p2.inx(), p2_new.inx());
    assert!(a.get(p2).is_none());
    assert_eq!(a[p2_new], 2);
}

#[test]
fn ptrs_survive_rotations() {
    let mut a: AvlArena<P0, u64> = AvlArena::new();
    let mut ptrs = vec![];
    for k in 0..64 {
        ptrs.push((a.insert(k).unwrap(), k));
        // every earlier `Ptr` stays valid across all the rebalancing
        for (p, v) in &ptrs {
            assert_eq!(a[p], *v);
        }
    }
}

#[test]
fn walker_navigation() {
    let mut a: AvlArena<P0, u64> = AvlArena::new();
    for k in 1..=7 {
        a.insert(k).unwrap();
    }
    // the sequential fill settles into the perfectly balanced shape
    //         4
    //       /   \
    //      2     6
    //     / \   / \
    //    1   3 5   7
    let mut w = a.walker();
    assert_eq!(w.get(), Some(&4));
    assert_eq!(w.subtree_height(), 3);
    assert_eq!(w.balance(), Some(0));
    assert!(!w.has_parent());
    assert!(w.has_left() && w.has_right());

    assert!(w.descend_left());
    assert_eq!(w.get(), Some(&2));
    assert!(w.is_left_child());
    assert!(!w.is_right_child());
    assert_eq!(w.subtree_height(), 2);

    assert!(w.descend_right());
    assert_eq!(w.get(), Some(&3));
    assert!(!w.has_left() && !w.has_right());
    assert!(!w.descend_left());
    assert_eq!(w.get(), Some(&3));

    assert!(w.ascend());
    assert!(w.ascend());
    assert_eq!(w.get(), Some(&4));
    assert!(!w.ascend());

    // a walker can be made from any iterator-obtained `Ptr`
    let p6 = a.find(&6).unwrap();
    let mut w6 = a.walker_at(p6);
    assert!(w6.is_right_child());
    assert!(w6.descend_left());
    assert_eq!(w6.get(), Some(&5));
}

#[test]
fn walker_equality_and_expiry() {
    let mut a: AvlArena<P0, u64> = AvlArena::new();
    let mut b: AvlArena<P0, u64> = AvlArena::new();
    let pa = a.insert(1).unwrap();
    let _ = b.insert(1).unwrap();

    // same tree and position compare equal
    assert_eq!(a.walker(), a.walker_at(pa));
    // same position on a different tree does not
    assert_ne!(a.walker(), b.walker());

    let p2 = a.insert(2).unwrap();
    assert_eq!(a.remove(p2), Some(2));
    let mut expired = a.walker_at(p2);
    assert!(expired.is_empty());
    assert!(expired.get().is_none());
    assert!(expired.balance().is_none());
    assert_eq!(expired.subtree_height(), 0);
    assert!(!expired.ascend());
    assert!(!expired.descend_left());
    assert!(!expired.descend_right());
    assert!(!expired.has_parent());
    // two expired walkers from the same `Ptr` on the same tree are equal
    assert_eq!(expired, a.walker_at(p2));
    assert_ne!(expired, a.walker());

    // an empty tree gives an empty walker
    let empty: AvlArena<P1, u64> = AvlArena::new();
    assert!(empty.walker().is_empty());
}
