use rstest::rstest;
use setkit::{AvlTreeSet, ChainedHashSet, Set};

fn balanced_tree() -> Box<dyn Set<i32>> {
    Box::new(AvlTreeSet::new())
}

fn unbalanced_tree() -> Box<dyn Set<i32>> {
    Box::new(AvlTreeSet::with_balancing(false))
}

fn hash_table() -> Box<dyn Set<i32>> {
    Box::new(ChainedHashSet::new())
}

fn identity_hash_table() -> Box<dyn Set<i32>> {
    Box::new(ChainedHashSet::with_hasher(|x: &i32| *x as u64))
}

fn constant_hash_table() -> Box<dyn Set<i32>> {
    Box::new(ChainedHashSet::with_hasher(|_: &i32| 0u64))
}

#[rstest]
#[case::balanced_tree(balanced_tree())]
#[case::unbalanced_tree(unbalanced_tree())]
#[case::hash_table(hash_table())]
#[case::identity_hash_table(identity_hash_table())]
#[case::constant_hash_table(constant_hash_table())]
fn starts_empty(#[case] set: Box<dyn Set<i32>>) {
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);
    assert!(!set.contains(&0));
}

#[rstest]
#[case::balanced_tree(balanced_tree())]
#[case::unbalanced_tree(unbalanced_tree())]
#[case::hash_table(hash_table())]
#[case::identity_hash_table(identity_hash_table())]
#[case::constant_hash_table(constant_hash_table())]
fn reinserting_is_a_noop(#[case] set: Box<dyn Set<i32>>) {
    let mut set = set;
    for value in [5, 3, 8, 1, 4] {
        assert!(set.insert(value));
    }
    for value in [5, 3, 8, 1, 4] {
        assert!(!set.insert(value));
    }
    assert_eq!(set.len(), 5);
    assert!([1, 3, 4, 5, 8].iter().all(|value| set.contains(value)));
    assert!(![0, 2, 6, 7, 9].iter().any(|value| set.contains(value)));
}

#[rstest]
#[case::balanced_tree(balanced_tree())]
#[case::unbalanced_tree(unbalanced_tree())]
#[case::hash_table(hash_table())]
#[case::identity_hash_table(identity_hash_table())]
#[case::constant_hash_table(constant_hash_table())]
fn keeps_every_inserted_element(#[case] set: Box<dyn Set<i32>>) {
    let mut set = set;
    for value in (0..500).rev().step_by(3) {
        set.insert(value);
    }
    for value in 0..500 {
        assert_eq!(set.contains(&value), (499 - value) % 3 == 0);
    }
}

#[rstest]
#[case::mixed(true, &[5, 3, 8, 1, 4], 2)]
#[case::ascending_balanced(true, &[1, 2, 3, 4, 5, 6, 7], 2)]
#[case::ascending_unbalanced(false, &[1, 2, 3, 4, 5, 6, 7], 6)]
#[case::descending_unbalanced(false, &[7, 6, 5, 4, 3, 2, 1], 6)]
#[case::single(true, &[42], 0)]
#[case::empty(false, &[], -1)]
fn tree_height(#[case] balancing: bool, #[case] values: &[i32], #[case] expected: isize) {
    let mut set: AvlTreeSet<i32> = AvlTreeSet::with_balancing(balancing);
    set.extend(values);
    assert_eq!(set.height(), expected);

    let mut sorted = values.to_vec();
    sorted.sort();
    let mut inorder = Vec::new();
    set.inorder(|value| inorder.push(*value));
    assert_eq!(inorder, sorted);
}

#[rstest]
#[case::balanced(true, 15)]
#[case::unbalanced(false, 999)]
fn tree_height_after_ascending_range(#[case] balancing: bool, #[case] max_height: isize) {
    let mut set = AvlTreeSet::with_balancing(balancing);
    for value in 1..=1000 {
        set.insert(value);
    }
    assert!(set.height() <= max_height);
    if !balancing {
        assert_eq!(set.height(), 999);
    }
}

#[rstest]
#[case::one_short_of_growth(8, 10)]
#[case::first_growth(9, 21)]
#[case::one_short_of_second_growth(16, 21)]
#[case::second_growth(17, 43)]
fn hash_table_capacity(#[case] num_elements: u32, #[case] expected: usize) {
    let mut set = ChainedHashSet::with_hasher(|x: &u32| u64::from(*x));
    set.extend(0..num_elements);
    assert_eq!(set.len(), num_elements as usize);
    assert_eq!(set.capacity(), expected);
    assert!((0..num_elements).all(|value| set.is_element_at_index(&value, value as usize % expected)));
}

#[test]
fn copies_are_independent() {
    let mut tree: AvlTreeSet<String> = ["alpha", "beta"].iter().map(|s| s.to_string()).collect();
    let mut tree_copy = tree.clone();
    tree_copy.insert("gamma".to_string());
    tree.insert("delta".to_string());
    assert!(!tree.contains(&"gamma".to_string()));
    assert!(!tree_copy.contains(&"delta".to_string()));

    let mut table: ChainedHashSet<String> = ["alpha", "beta"].iter().map(|s| s.to_string()).collect();
    let mut table_copy = table.clone();
    table_copy.insert("gamma".to_string());
    table.insert("delta".to_string());
    assert!(!table.contains(&"gamma".to_string()));
    assert!(!table_copy.contains(&"delta".to_string()));
}

#[test]
fn moving_out_leaves_source_empty() {
    let mut tree: AvlTreeSet<i32> = (0..100).collect();
    let moved_tree = std::mem::take(&mut tree);
    assert_eq!(tree.len(), 0);
    assert!((0..100).all(|value| !tree.contains(&value) && moved_tree.contains(&value)));

    let mut table: ChainedHashSet<i32> = (0..100).collect();
    let moved_table = std::mem::take(&mut table);
    assert_eq!(table.len(), 0);
    assert!((0..100).all(|value| !table.contains(&value) && moved_table.contains(&value)));
}
