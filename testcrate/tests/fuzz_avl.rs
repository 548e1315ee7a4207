use std::{collections::BTreeSet, ops::Bound};

use avl_arena::{AvlArena, InsertError, Ptr};
use rand_xoshiro::{
    rand_core::{RngCore, SeedableRng},
    Xoshiro128StarStar,
};
use testcrate::P0;

macro_rules! next_inx {
    ($rng:ident, $len:ident) => {
        $rng.next_u32() as usize % $len
    };
}

#[test]
fn fuzz_avl() {
    let mut rng = Xoshiro128StarStar::seed_from_u64(0);

    // keys are drawn from a bounded range so that duplicate rejections occur
    const MAX_KEY: u64 = 1024;
    let mut key_rng = Xoshiro128StarStar::seed_from_u64(0);
    let mut new_k = || key_rng.next_u64() % MAX_KEY;

    let mut a: AvlArena<P0, u64> = AvlArena::new();
    // the model: a membership set plus the `Ptr` each contained key got
    let mut list: Vec<(P0, u64)> = vec![];
    let mut b: BTreeSet<u64> = BTreeSet::new();
    let mut gen = 2u64;

    for _ in 0..30_000 {
        assert_eq!(a.len(), list.len());
        assert_eq!(a.len(), b.len());
        assert_eq!(a.is_empty(), b.is_empty());
        assert_eq!(a.gen().get(), gen);
        if let Err(e) = AvlArena::_check_invariants(&a) {
            panic!("{e}");
        }
        // the AVL worst case height bound
        assert!((a.height() as f64) <= 1.44 * (((a.len() + 2) as f64).log2()));
        let len = list.len();

        match rng.next_u32() % 1000 {
            0..=299 => {
                // insert, with duplicate rejection
                let k = new_k();
                match a.insert(k) {
                    Ok(p) => {
                        assert!(b.insert(k));
                        assert_eq!(a[p], k);
                        list.push((p, k));
                    }
                    Err(InsertError::Duplicate { existing, element }) => {
                        assert!(b.contains(&k));
                        assert_eq!(element, k);
                        assert_eq!(a[existing], k);
                    }
                    Err(InsertError::Skipped(_)) => unreachable!(),
                }
            }
            300..=449 => {
                // remove by `Ptr`
                if len != 0 {
                    let (p, k) = list.swap_remove(next_inx!(rng, len));
                    assert_eq!(a.remove(p).unwrap(), k);
                    assert!(a.get(p).is_none());
                    assert!(b.remove(&k));
                    gen += 1;
                } else {
                    assert!(a.remove(P0::invalid()).is_none());
                }
            }
            450..=499 => {
                // remove by value, sometimes of an absent key
                let k = new_k();
                if b.contains(&k) {
                    assert_eq!(a.remove_val(&k).unwrap(), k);
                    assert!(b.remove(&k));
                    let i = list.iter().position(|t| t.1 == k).unwrap();
                    list.swap_remove(i);
                    gen += 1;
                } else {
                    assert!(a.remove_val(&k).is_none());
                }
            }
            500..=599 => {
                // find and find_with
                let k = new_k();
                if b.contains(&k) {
                    let p = a.find(&k).unwrap();
                    assert_eq!(a[p], k);
                    assert_eq!(a.find_with(&mut avl_arena::OrdComparator, &k), Some(p));
                } else {
                    assert!(a.find(&k).is_none());
                }
            }
            600..=649 => {
                // min and max against the model
                assert_eq!(a.min().map(|p| a[p]), b.first().copied());
                assert_eq!(a.max().map(|p| a[p]), b.last().copied());
            }
            650..=699 => {
                // in-order neighbors against the model
                if len != 0 {
                    let (p, k) = list[next_inx!(rng, len)];
                    let next = b
                        .range((Bound::Excluded(k), Bound::Unbounded))
                        .next()
                        .copied();
                    let prev = b
                        .range((Bound::Unbounded, Bound::Excluded(k)))
                        .next_back()
                        .copied();
                    assert_eq!(a.next(p).map(|q| a[q]), next);
                    assert_eq!(a.prev(p).map(|q| a[q]), prev);
                } else {
                    assert!(a.next(P0::invalid()).is_none());
                    assert!(a.prev(P0::invalid()).is_none());
                }
            }
            700..=996 => {
                // plain find hammering
                let k = new_k();
                assert_eq!(a.find(&k).is_some(), b.contains(&k));
            }
            997 => {
                // full iteration in both directions
                let fwd: Vec<u64> = a.vals().copied().collect();
                let expected: Vec<u64> = b.iter().copied().collect();
                assert_eq!(fwd, expected);
                let rev: Vec<u64> = a.iter().rev().map(|(_, t)| *t).collect();
                let expected_rev: Vec<u64> = b.iter().rev().copied().collect();
                assert_eq!(rev, expected_rev);
            }
            998 => {
                a.clear();
                b.clear();
                list.clear();
                gen += 1;
            }
            999 => {
                a.clear_and_shrink();
                assert_eq!(a.capacity(), 0);
                b.clear();
                list.clear();
                gen += 1;
            }
            _ => unreachable!(),
        }
    }
}
