//! The capability contract shared by every set in this crate.

/// A collection of unique elements supporting insertion and membership tests.
///
/// Both [`AvlTreeSet`] and [`ChainedHashSet`] implement this trait, so code
/// that only needs to add and look up elements can be written once:
///
/// ```
/// use setkit::{AvlTreeSet, ChainedHashSet, Set};
///
/// fn fill<S: Set<u32>>(set: &mut S) {
///     for x in [3, 1, 2, 3] {
///         set.insert(x);
///     }
/// }
///
/// let mut tree = AvlTreeSet::new();
/// let mut table = ChainedHashSet::new();
/// fill(&mut tree);
/// fill(&mut table);
/// assert_eq!(tree.len(), 3);
/// assert_eq!(table.len(), 3);
/// assert!(tree.contains(&2) && table.contains(&2));
/// ```
///
/// [`AvlTreeSet`]: crate::AvlTreeSet
/// [`ChainedHashSet`]: crate::ChainedHashSet
pub trait Set<T> {
    /// Adds an element to the set.
    /// Has no effect if an equal element is already present.
    /// Returns whether the element was newly inserted.
    fn insert(&mut self, element: T) -> bool;

    /// Returns true if the set contains an element equal to the given one.
    fn contains(&self, element: &T) -> bool;

    /// Returns the number of elements in the set.
    fn len(&self) -> usize;

    /// Returns true if the set contains no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
