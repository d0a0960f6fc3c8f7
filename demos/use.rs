use setkit::{AvlTreeSet, ChainedHashSet, Set};

fn add_words<S: Set<&'static str>>(set: &mut S) {
    for word in ["hello", "help", "helm", "hello", "yellow"] {
        set.insert(word);
    }
}

fn main() {
    let mut tree = AvlTreeSet::new();
    add_words(&mut tree);
    assert_eq!(tree.len(), 4);
    assert!(tree.contains(&"helm"));
    assert!(!tree.contains(&"hell"));

    print!("{{ ");
    for word in &tree {
        print!("{word}, ");
    }
    println!("}}");

    let mut table = ChainedHashSet::with_hasher(|word: &&str| word.len() as u64);
    add_words(&mut table);
    assert_eq!(table.len(), 4);
    assert!(table.contains(&"yellow"));

    for index in 0..table.capacity() {
        let count = table.elements_at_index(index);
        if count > 0 {
            println!("bucket {index}: {count} element(s)");
        }
    }
}
