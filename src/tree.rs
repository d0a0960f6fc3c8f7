//! An ordered set implemented with an AVL tree.

use std::cmp::{self, Ordering};
use std::fmt;
use std::iter::FromIterator;

use crate::set::Set;

/// An ordered set implemented with an AVL tree.
///
/// Balancing can be switched off at construction, in which case the set
/// behaves like a plain binary search tree and degenerates into a chain
/// when elements arrive in sorted order.
///
/// ```
/// use setkit::AvlTreeSet;
/// let mut set = AvlTreeSet::new();
/// set.insert(5);
/// set.insert(3);
/// set.insert(8);
/// assert!(set.contains(&3));
/// assert!(!set.insert(3));
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.height(), 1);
/// ```
pub struct AvlTreeSet<T> {
    root: Link<T>,
    num_nodes: usize,
    balancing: bool,
}

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
    height: usize,
}

#[allow(clippy::enum_variant_names)]
enum Direction {
    FromParent,
    FromLeft,
    FromRight,
}

/// An iterator over the values of a set, in ascending order.
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<T: Ord> AvlTreeSet<T> {
    /// Creates an empty set that keeps itself balanced.
    /// No memory is allocated until the first item is inserted.
    pub fn new() -> Self {
        Self::with_balancing(true)
    }

    /// Creates an empty set with balancing switched on or off.
    /// The choice is fixed for the lifetime of the set.
    pub fn with_balancing(balancing: bool) -> Self {
        Self {
            root: None,
            num_nodes: 0,
            balancing,
        }
    }

    /// Returns a reference to the value in the set that is equal to the given value.
    pub fn get(&self, value: &T) -> Option<&T> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match value.cmp(&node.value) {
                Ordering::Equal => return Some(&node.value),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    /// Returns true if the set contains a value.
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// Inserts a value into the set.
    /// Returns whether the value was newly inserted; an equal value already
    /// in the set is left untouched.
    pub fn insert(&mut self, value: T) -> bool {
        let inserted = if self.balancing {
            Self::insert_at(&mut self.root, value)
        } else {
            self.insert_unbalanced(value)
        };
        if inserted {
            self.num_nodes += 1;
        }
        inserted
    }

    /// Moves all values from other into self, leaving other empty.
    pub fn append(&mut self, other: &mut Self) {
        let mut pending: Vec<Box<Node<T>>> = other.root.take().into_iter().collect();
        other.num_nodes = 0;
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
            self.insert(node.value);
        }
    }

    /// Asserts that the internal tree structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        let mut num_nodes = 0;
        let mut previous: Option<&T> = None;
        self.traverse(
            |node| {
                let left_height = Node::link_height(&node.left);
                let right_height = Node::link_height(&node.right);

                // Check ordering against direct children
                if let Some(left) = node.left.as_deref() {
                    assert!(left.value < node.value);
                }
                if let Some(right) = node.right.as_deref() {
                    assert!(right.value > node.value);
                }

                // Check cached height
                assert_eq!(node.height, cmp::max(left_height, right_height));

                // Check AVL condition (nearly balance)
                if self.balancing {
                    assert!(left_height <= right_height + 1);
                    assert!(right_height <= left_height + 1);
                }

                num_nodes += 1;
            },
            |node| {
                // Check ordering across the whole tree
                if let Some(previous) = previous {
                    assert!(*previous < node.value);
                }
                previous = Some(&node.value);
            },
            |_| {},
        );

        // Check number of nodes
        assert_eq!(num_nodes, self.num_nodes);
    }

    // Recursion depth is bounded by the height of a balanced tree.
    fn insert_at(link: &mut Link<T>, value: T) -> bool {
        match link {
            None => {
                *link = Some(Node::create(value));
                true
            }
            Some(node) => {
                let inserted = match value.cmp(&node.value) {
                    Ordering::Equal => return false,
                    Ordering::Less => Self::insert_at(&mut node.left, value),
                    Ordering::Greater => Self::insert_at(&mut node.right, value),
                };
                if inserted {
                    node.adjust_height();
                    if let Some(node) = link.take() {
                        *link = Some(Self::rebalance_node(node));
                    }
                }
                inserted
            }
        }
    }

    /// Inserts without rebalancing, in two iterative passes over the path:
    /// the first finds the depth of the new leaf, the second raises the
    /// cached height of every ancestor to its distance from that leaf.
    fn insert_unbalanced(&mut self, value: T) -> bool {
        let mut depth = 0;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match value.cmp(&node.value) {
                Ordering::Equal => return false,
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
            depth += 1;
        }

        let mut link = &mut self.root;
        while let Some(node) = link {
            node.height = cmp::max(node.height, depth);
            depth -= 1;
            link = if value < node.value {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *link = Some(Node::create(value));
        true
    }

    /// Restores AVL condition (balance) at given node if necessary.
    /// The rotation case is derived from the heights of the subtrees only.
    /// Returns the new root of the subtree.
    fn rebalance_node(node: Box<Node<T>>) -> Box<Node<T>> {
        let left_height = Node::link_height(&node.left);
        let right_height = Node::link_height(&node.right);
        if left_height > right_height + 1 {
            // Rebalance right
            let mut node = node;
            let left_is_right_heavy = node
                .left
                .as_deref()
                .is_some_and(|left| left.right_height() > left.left_height());
            if left_is_right_heavy {
                log::trace!("rebalancing subtree of height {}: LR rotation", node.height);
                node.left = node.left.take().map(Self::rotate_left);
            } else {
                log::trace!("rebalancing subtree of height {}: LL rotation", node.height);
            }
            Self::rotate_right(node)
        } else if right_height > left_height + 1 {
            // Rebalance left
            let mut node = node;
            let right_is_left_heavy = node
                .right
                .as_deref()
                .is_some_and(|right| right.left_height() > right.right_height());
            if right_is_left_heavy {
                log::trace!("rebalancing subtree of height {}: RL rotation", node.height);
                node.right = node.right.take().map(Self::rotate_right);
            } else {
                log::trace!("rebalancing subtree of height {}: RR rotation", node.height);
            }
            Self::rotate_left(node)
        } else {
            node
        }
    }

    //   node          right
    //   /  \          /   \
    //  a   right  ->  node  c
    //      /  \      /  \
    //     b    c    a    b
    fn rotate_left(mut node: Box<Node<T>>) -> Box<Node<T>> {
        match node.right.take() {
            Some(mut right) => {
                node.right = right.left.take();
                node.adjust_height();
                right.left = Some(node);
                right.adjust_height();
                right
            }
            None => node,
        }
    }

    //      node      left
    //      /  \      /  \
    //   left   c -> a   node
    //   /  \            /  \
    //  a    b          b    c
    fn rotate_right(mut node: Box<Node<T>>) -> Box<Node<T>> {
        match node.left.take() {
            Some(mut left) => {
                node.left = left.right.take();
                node.adjust_height();
                left.right = Some(node);
                left.adjust_height();
                left
            }
            None => node,
        }
    }
}

impl<T> AvlTreeSet<T> {
    /// Returns true if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns whether the set rebalances itself on insertion.
    pub fn is_balancing(&self) -> bool {
        self.balancing
    }

    /// Returns the height of the tree.
    /// The height of an empty tree is -1, the height of a single node is 0.
    pub fn height(&self) -> isize {
        match self.root.as_deref() {
            None => -1,
            Some(root) => root.height as isize,
        }
    }

    /// Clears the set, deallocating all memory.
    /// The balancing mode is kept.
    pub fn clear(&mut self) {
        // Children are detached before their parent is dropped,
        // so dropping never recurses.
        let mut pending: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
        self.num_nodes = 0;
    }

    /// Calls `visit` for each value, in preorder (node, left, right).
    pub fn preorder<F: FnMut(&T)>(&self, mut visit: F) {
        self.traverse(|node| visit(&node.value), |_| {}, |_| {});
    }

    /// Calls `visit` for each value, in inorder (left, node, right),
    /// i.e. in ascending order.
    pub fn inorder<F: FnMut(&T)>(&self, mut visit: F) {
        self.traverse(|_| {}, |node| visit(&node.value), |_| {});
    }

    /// Calls `visit` for each value, in postorder (left, right, node).
    pub fn postorder<F: FnMut(&T)>(&self, mut visit: F) {
        self.traverse(|_| {}, |_| {}, |node| visit(&node.value));
    }

    /// Gets an iterator over the values of the set in sorted order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref(), self.num_nodes)
    }

    fn traverse<'a, Pre, In, Post>(&'a self, mut preorder: Pre, mut inorder: In, mut postorder: Post)
    where
        Pre: FnMut(&'a Node<T>),
        In: FnMut(&'a Node<T>),
        Post: FnMut(&'a Node<T>),
    {
        let mut stack: Vec<(&'a Node<T>, Direction)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, Direction::FromParent));
        }
        while let Some((node, dir)) = stack.pop() {
            match dir {
                Direction::FromParent => {
                    preorder(node);
                    stack.push((node, Direction::FromLeft));
                    if let Some(left) = node.left.as_deref() {
                        stack.push((left, Direction::FromParent));
                    }
                }
                Direction::FromLeft => {
                    inorder(node);
                    stack.push((node, Direction::FromRight));
                    if let Some(right) = node.right.as_deref() {
                        stack.push((right, Direction::FromParent));
                    }
                }
                Direction::FromRight => postorder(node),
            }
        }
    }
}

impl<T: Clone> Clone for AvlTreeSet<T> {
    /// Copies the tree node by node, keeping its exact shape.
    fn clone(&self) -> Self {
        let mut root = None;
        let mut pending: Vec<(&Node<T>, &mut Link<T>)> = Vec::new();
        if let Some(source) = self.root.as_deref() {
            pending.push((source, &mut root));
        }
        while let Some((source, target)) = pending.pop() {
            let node: &mut Node<T> = target.insert(Box::new(Node {
                value: source.value.clone(),
                left: None,
                right: None,
                height: source.height,
            }));
            if let Some(left) = source.left.as_deref() {
                pending.push((left, &mut node.left));
            }
            if let Some(right) = source.right.as_deref() {
                pending.push((right, &mut node.right));
            }
        }
        Self {
            root,
            num_nodes: self.num_nodes,
            balancing: self.balancing,
        }
    }
}

impl<T> Drop for AvlTreeSet<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Ord> Default for AvlTreeSet<T> {
    /// Creates an empty, balancing set.
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Set<T> for AvlTreeSet<T> {
    fn insert(&mut self, element: T) -> bool {
        AvlTreeSet::insert(self, element)
    }

    fn contains(&self, element: &T) -> bool {
        AvlTreeSet::contains(self, element)
    }

    fn len(&self) -> usize {
        AvlTreeSet::len(self)
    }
}

impl<T: PartialEq> PartialEq for AvlTreeSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for AvlTreeSet<T> {}

impl<T: Ord> FromIterator<T> for AvlTreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for AvlTreeSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> Extend<&'a T> for AvlTreeSet<T>
where
    T: Ord + Copy + 'a,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlTreeSet<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a AvlTreeSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> Iter<'a, T> {
    fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.descend_left(root);
        iter
    }

    fn descend_left(&mut self, mut current: Option<&'a Node<T>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

// Auto derived clone seems to have an invalid type bound of T: Clone
impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend_left(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> Node<T> {
    fn create(value: T) -> Box<Self> {
        Box::new(Node {
            value,
            left: None,
            right: None,
            height: 0,
        })
    }

    /// Height of the subtree behind a link, plus one; 0 for an empty link.
    fn link_height(link: &Link<T>) -> usize {
        match link.as_deref() {
            None => 0,
            Some(node) => node.height + 1,
        }
    }

    fn left_height(&self) -> usize {
        Self::link_height(&self.left)
    }

    fn right_height(&self) -> usize {
        Self::link_height(&self.right)
    }

    fn adjust_height(&mut self) {
        self.height = cmp::max(self.left_height(), self.right_height());
    }
}
