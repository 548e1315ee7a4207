use avl_arena::AvlArena;
use testcrate::P0;

fn check<T: Ord>(a: &AvlArena<P0, T>) {
    if let Err(e) = AvlArena::_check_invariants(a) {
        panic!("{e}");
    }
}

fn contents(a: &AvlArena<P0, u64>) -> Vec<u64> {
    a.vals().copied().collect()
}

#[test]
fn empty() {
    let mut a: AvlArena<P0, u64> = AvlArena::new();
    check(&a);
    assert_eq!(a.height(), 0);
    assert_eq!(a.len(), 0);
    assert!(a.min().is_none());
    assert!(a.max().is_none());
    assert!(a.remove_val(&5).is_none());
    assert!(a.find(&5).is_none());
    assert!(contents(&a).is_empty());
    check(&a);
}

#[test]
fn duplicate_insert() {
    let mut a: AvlArena<P0, u64> = AvlArena::new();
    let p5 = a.insert(5).unwrap();
    assert_eq!(a.height(), 1);
    let e = a.insert(5).unwrap_err();
    assert_eq!(e.existing(), Some(p5));
    assert_eq!(e.into_element(), 5);
    // the failed insert left everything unchanged
    assert_eq!(a.height(), 1);
    assert_eq!(a.len(), 1);
    assert_eq!(contents(&a), [5]);
    check(&a);
}

#[test]
fn single_rotation() {
    // 1 ->  1  ->   2
    //        \     / \
    //         2   1   3
    //          \
    //           3
    let mut a: AvlArena<P0, u64> = AvlArena::new();
    a.insert(1).unwrap();
    a.insert(2).unwrap();
    assert_eq!(a.height(), 2);
    a.insert(3).unwrap();
    check(&a);
    assert_eq!(a.height(), 2);
    assert_eq!(contents(&a), [1, 2, 3]);
}

#[test]
fn sequential_heights() {
    let mut a: AvlArena<P0, u64> = AvlArena::new();
    let expected = [1, 2, 2, 3, 3, 3, 3, 4];
    for (i, h) in expected.into_iter().enumerate() {
        a.insert(i as u64 + 1).unwrap();
        check(&a);
        assert_eq!(a.height(), h);
    }
    assert_eq!(contents(&a), [1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn mixed_insert_and_remove() {
    let mut a: AvlArena<P0, u64> = AvlArena::new();
    for k in [1, 2, 4, 8, 0, 3, 5, 7, 9, 6] {
        a.insert(k).unwrap();
        check(&a);
    }
    assert_eq!(a.height(), 4);
    assert_eq!(contents(&a), [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);

    assert_eq!(a.remove_val(&3), Some(3));
    check(&a);
    assert_eq!(a.height(), 4);
    assert_eq!(contents(&a), [0, 1, 2, 4, 5, 6, 7, 8, 9]);

    // 12 was never inserted
    assert!(a.remove_val(&12).is_none());
    check(&a);
    assert_eq!(a.height(), 4);
    assert_eq!(a.len(), 9);
    assert_eq!(contents(&a), [0, 1, 2, 4, 5, 6, 7, 8, 9]);
}

#[test]
fn letters() {
    let mut a: AvlArena<P0, char> = AvlArena::new();
    for c in ['M', 'N', 'O', 'L', 'K', 'Q', 'P', 'H', 'I', 'A'] {
        a.insert(c).unwrap();
        check(&a);
    }
    assert_eq!(a.height(), 4);
    let in_order: Vec<char> = a.vals().copied().collect();
    assert_eq!(in_order, ['A', 'H', 'I', 'K', 'L', 'M', 'N', 'O', 'P', 'Q']);
}

#[test]
fn insert_remove_round_trip() {
    // 1..=7 settles into the perfectly balanced shape of height 3
    let mut a: AvlArena<P0, u64> = AvlArena::new();
    for k in 1..=7 {
        a.insert(k).unwrap();
    }
    check(&a);
    assert_eq!(a.height(), 3);
    let before = contents(&a);

    let p = a.insert(8).unwrap();
    assert_eq!(a.height(), 4);
    assert_eq!(a.remove(p), Some(8));
    check(&a);
    // the insertion was fully undone
    assert_eq!(a.height(), 3);
    assert_eq!(contents(&a), before);
}

#[test]
fn remove_until_empty() {
    let mut a: AvlArena<P0, u64> = AvlArena::new();
    for k in 0..32 {
        a.insert(k).unwrap();
    }
    assert_eq!(a.height(), 6);
    // alternate removing from the middle and the extremes
    for k in [15, 0, 31, 16, 1, 30, 14, 17] {
        assert_eq!(a.remove_val(&k), Some(k));
        check(&a);
    }
    let mut remaining: Vec<u64> = (0..32)
        .filter(|k| ![15, 0, 31, 16, 1, 30, 14, 17].contains(k))
        .collect();
    assert_eq!(contents(&a), remaining);
    // drain the rest in a scrambled order
    while !remaining.is_empty() {
        let k = remaining.swap_remove(remaining.len() / 2);
        assert_eq!(a.remove_val(&k), Some(k));
        check(&a);
    }
    assert_eq!(a.height(), 0);
    assert!(a.is_empty());
    assert!(a.min().is_none());
    assert!(a.max().is_none());
}
