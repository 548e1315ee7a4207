use std::{cmp::Ordering, collections::VecDeque};

use avl_arena::{Arena, AvlArena, Comparator, Decision, InsertError, Ptr, Recast, Recaster};
use testcrate::{P0, P2};

/// Plays back prerecorded decisions, standing in for a human answering
/// pairwise prompts
struct Scripted {
    answers: VecDeque<Decision>,
    calls: u64,
}

impl Scripted {
    fn new(answers: &[Decision]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            calls: 0,
        }
    }
}

impl Comparator<u64> for Scripted {
    fn compare(&mut self, _lhs: &u64, _rhs: &u64) -> Decision {
        self.calls += 1;
        self.answers.pop_front().expect("asked for more decisions than scripted")
    }
}

fn balanced_1_to_7() -> AvlArena<P0, u64> {
    let mut a = AvlArena::new();
    for k in 1..=7 {
        a.insert(k).unwrap();
    }
    // settles into 4 over (2 over 1, 3) and (6 over 5, 7)
    a
}

#[test]
fn one_comparison_per_visited_node() {
    let mut a = balanced_1_to_7();

    // the descent visits 4, 6, 5 and attaches to the right of 5; the
    // retrace and rotations afterwards must not invoke the comparator again
    let mut script = Scripted::new(&[Decision::Greater, Decision::Less, Decision::Greater]);
    a.insert_with(&mut script, 100).unwrap();
    assert_eq!(script.calls, 3);
    assert!(script.answers.is_empty());
    let order: Vec<u64> = a.vals().copied().collect();
    assert_eq!(order, [1, 2, 3, 4, 5, 100, 6, 7]);

    // finds also make exactly one call per visited node
    let mut script = Scripted::new(&[Decision::Greater, Decision::Less, Decision::Equal]);
    let p = a.find_with(&mut script, &0).unwrap();
    assert_eq!(a[p], 5);
    assert_eq!(script.calls, 3);
}

#[test]
fn skip_aborts_without_change() {
    let mut a = balanced_1_to_7();
    let height = a.height();

    let mut script = Scripted::new(&[Decision::Greater, Decision::Skip]);
    match a.insert_with(&mut script, 100) {
        Err(InsertError::Skipped(element)) => assert_eq!(element, 100),
        _ => unreachable!(),
    }
    assert_eq!(script.calls, 2);
    assert_eq!(a.len(), 7);
    assert_eq!(a.height(), height);
    let order: Vec<u64> = a.vals().copied().collect();
    assert_eq!(order, [1, 2, 3, 4, 5, 6, 7]);

    let mut script = Scripted::new(&[Decision::Skip]);
    assert!(a.find_with(&mut script, &5).is_none());
    let mut script = Scripted::new(&[Decision::Less, Decision::Skip]);
    assert!(a.remove_val_with(&mut script, &1).is_none());
    assert_eq!(a.len(), 7);
    if let Err(e) = AvlArena::_check_invariants(&a) {
        panic!("{e}");
    }
}

#[test]
fn closure_comparators() {
    // order by the last digit instead of the value, used consistently for
    // building and searching
    let mut by_last_digit =
        |lhs: &u64, rhs: &u64| Decision::from(Ord::cmp(&(lhs % 10), &(rhs % 10)));
    let mut a: AvlArena<P0, u64> = AvlArena::new();
    for k in [2, 9, 11, 20] {
        a.insert_with(&mut by_last_digit, k).unwrap();
    }
    let order: Vec<u64> = a.vals().copied().collect();
    assert_eq!(order, [20, 11, 2, 9]);
    // 11 is the only element with last digit 1
    let p = a.find_with(&mut by_last_digit, &31).unwrap();
    assert_eq!(a[p], 11);
    assert_eq!(a.remove_val_with(&mut by_last_digit, &40), Some(20));
}

/// Orders `u64`s the wrong way around
#[derive(Debug, Default, Clone, Copy)]
struct Reversed;

impl Comparator<u64> for Reversed {
    fn compare(&mut self, lhs: &u64, rhs: &u64) -> Decision {
        Decision::from(Ord::cmp(rhs, lhs))
    }
}

#[test]
fn stored_comparator() {
    let mut a: AvlArena<P0, u64, Reversed> = AvlArena::new();
    for k in 0..10 {
        a.insert(k).unwrap();
    }
    let order: Vec<u64> = a.vals().copied().collect();
    assert_eq!(order, [9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
    assert_eq!(a.min().map(|p| a[p]), Some(9));
    assert_eq!(a.max().map(|p| a[p]), Some(0));
    let p = a.find(&4).unwrap();
    assert_eq!(a[p], 4);
    assert_eq!(a.remove_val(&0), Some(0));
    assert_eq!(a.max().map(|p| a[p]), Some(1));
}

/// An element that points at another element of the same tree
#[derive(Debug)]
struct Entry {
    k: u64,
    friend: P0,
}

impl Entry {
    fn new(k: u64) -> Self {
        Self {
            k,
            friend: P0::invalid(),
        }
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.k == other.k
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(Ord::cmp(self, other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(&self.k, &other.k)
    }
}

impl Recast<P0> for Entry {
    fn recast<R: Recaster<Item = P0>>(&mut self, recaster: &R) -> Result<(), P0> {
        recaster.recast_item(&mut self.friend)
    }
}

#[test]
fn compress_and_recast() {
    let mut a: AvlArena<P0, Entry> = AvlArena::new();
    let mut ptrs = vec![];
    for k in 0..8 {
        ptrs.push(a.insert(Entry::new(k)).unwrap());
    }
    // each even entry points at the next even entry
    for k in (0..8).step_by(2) {
        let friend = ptrs[(k + 2) % 8];
        a.get_mut(ptrs[k]).unwrap().friend = friend;
    }
    for k in (1..8).step_by(2) {
        let _ = a.remove(ptrs[k]).unwrap();
    }

    let old_even = ptrs[2];
    let recaster = a.compress_and_shrink_recaster();
    assert_eq!(a.capacity(), a.len());
    // every old `Ptr` is invalidated by the compression
    assert!(a.get(old_even).is_none());
    if let Err(e) = AvlArena::_check_invariants(&a) {
        panic!("{e}");
    }

    // the payload-held `Ptr`s are stale until recast through the mapping
    a.recast(&recaster).unwrap();
    for p in a.ptrs().collect::<Vec<P0>>() {
        let (k, friend) = {
            let entry = &a[p];
            (entry.k, entry.friend)
        };
        assert_eq!(a[friend].k, (k + 2) % 8);
    }
    let order: Vec<u64> = a.vals().map(|entry| entry.k).collect();
    assert_eq!(order, [0, 2, 4, 6]);

    // the tree stays fully usable after compression
    a.insert(Entry::new(5)).unwrap();
    assert_eq!(a.len(), 5);
}

#[test]
fn base_arena() {
    let mut a: Arena<P0, &str> = Arena::new();
    let p_test = a.insert("test");
    let p_hello = a.insert("hello");
    assert_eq!(
        format!("{a:?}"),
        "{P0[0](2): \"test\", P0[1](2): \"hello\"}"
    );
    assert_eq!(a[p_hello], "hello");
    assert_eq!(a.remove(p_test).unwrap(), "test");
    assert!(a.get(p_test).is_none());
    assert_eq!(a.len(), 1);
    if let Err(e) = Arena::_check_invariants(&a) {
        panic!("{e}");
    }

    // the freed slot is reused under a newer generation
    let p_next = a.insert("next");
    assert_eq!(p_next.inx(), p_test.inx());
    assert_ne!(p_next, p_test);

    let collected: Vec<&str> = a.vals().copied().collect();
    assert_eq!(collected, ["next", "hello"]);

    a.clear();
    assert!(a.is_empty());
    assert!(a.get(p_hello).is_none());
    if let Err(e) = Arena::_check_invariants(&a) {
        panic!("{e}");
    }
}

#[test]
fn generationless_ptrs() {
    // without generation counters, slot reuse is not detected; this is the
    // documented tradeoff for the smaller `Ptr`
    let mut a: Arena<P2, u64> = Arena::new();
    let p = a.insert(5);
    assert_eq!(a.remove(p).unwrap(), 5);
    let q = a.insert(7);
    assert_eq!(p, q);
    assert_eq!(a[p], 7);

    let mut tree: AvlArena<P2, u64> = AvlArena::new();
    for k in 0..10 {
        tree.insert(k).unwrap();
    }
    assert_eq!(tree.height(), 4);
    assert_eq!(tree.remove_val(&3), Some(3));
    assert_eq!(tree.len(), 9);
}

#[test]
fn collection_plumbing() {
    let a: AvlArena<P0, u64> = [3, 1, 2, 3, 1].into_iter().collect();
    assert_eq!(a.len(), 3);
    let pairs: Vec<(P0, u64)> = a.into_iter().collect();
    let vals: Vec<u64> = pairs.iter().map(|(_, t)| *t).collect();
    assert_eq!(vals, [1, 2, 3]);

    let mut b: AvlArena<P0, u64> = AvlArena::new();
    assert_eq!(b.capacity(), 0);
    b.reserve(10);
    assert_eq!(b.capacity(), 10);
    for k in 0..5 {
        b.insert(k).unwrap();
    }
    assert_eq!(b.capacity(), 10);
    assert_eq!(b.gen().get(), 2);
    b.clear();
    assert_eq!(b.capacity(), 10);
    assert_eq!(b.gen().get(), 3);
    b.clear_and_shrink();
    assert_eq!(b.capacity(), 0);

    let mut c = balanced_1_to_7();
    let cloned = c.clone();
    assert_eq!(c.remove_val(&4), Some(4));
    assert_eq!(cloned.len(), 7);
    let order: Vec<u64> = cloned.vals().copied().collect();
    assert_eq!(order, [1, 2, 3, 4, 5, 6, 7]);
}
