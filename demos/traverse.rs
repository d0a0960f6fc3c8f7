use setkit::AvlTreeSet;

fn show(name: &str, set: &AvlTreeSet<i32>) {
    let mut preorder = Vec::new();
    let mut inorder = Vec::new();
    let mut postorder = Vec::new();
    set.preorder(|value| preorder.push(*value));
    set.inorder(|value| inorder.push(*value));
    set.postorder(|value| postorder.push(*value));

    println!("{name} (height {}):", set.height());
    println!("  preorder:  {preorder:?}");
    println!("  inorder:   {inorder:?}");
    println!("  postorder: {postorder:?}");
}

fn main() {
    let mut balanced = AvlTreeSet::new();
    let mut unbalanced = AvlTreeSet::with_balancing(false);
    for value in 1..=7 {
        balanced.insert(value);
        unbalanced.insert(value);
    }

    show("balanced", &balanced);
    show("unbalanced", &unbalanced);
}
