//! An unordered set implemented with a separately chained hash table.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::{self, FromIterator};
use std::mem;
use std::slice;

use crate::set::Set;

/// Number of buckets of a table created without an explicit capacity.
pub const DEFAULT_CAPACITY: usize = 10;

/// The table grows as soon as `len / capacity` exceeds
/// `MAX_LOAD_NUMERATOR / MAX_LOAD_DENOMINATOR`.
pub const MAX_LOAD_NUMERATOR: usize = 4;
pub const MAX_LOAD_DENOMINATOR: usize = 5;

/// Maps an element to an unsigned integer used to pick its bucket.
///
/// Implemented for every `Fn(&T) -> u64`, so plain functions and closures
/// can be passed where a hash function is expected.
/// The table never inspects the distribution of the returned values;
/// a poor hash function only makes chains longer.
pub trait HashFunction<T: ?Sized> {
    fn hash_element(&self, element: &T) -> u64;
}

impl<T: ?Sized, F> HashFunction<T> for F
where
    F: Fn(&T) -> u64,
{
    fn hash_element(&self, element: &T) -> u64 {
        self(element)
    }
}

/// Hashes elements through their [`Hash`] implementation.
///
/// The underlying hasher is created with fixed keys, so the same element
/// always lands in the same bucket for a given capacity.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultHashFunction;

impl<T: Hash + ?Sized> HashFunction<T> for DefaultHashFunction {
    fn hash_element(&self, element: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        element.hash(&mut hasher);
        hasher.finish()
    }
}

/// An unordered set implemented with a separately chained hash table.
///
/// Each bucket heads a singly linked chain of entries. After an insertion
/// pushes the load factor above 0.8 the bucket array is replaced by one of
/// `capacity * 2 + 1` buckets and every entry is relinked into it.
///
/// ```
/// use setkit::ChainedHashSet;
/// let mut set = ChainedHashSet::with_hasher(|x: &u32| u64::from(*x));
/// for x in 0u32..9 {
///     set.insert(x);
/// }
/// assert_eq!(set.len(), 9);
/// assert_eq!(set.capacity(), 21);
/// assert_eq!(set.elements_at_index(3), 1);
/// assert!(set.is_element_at_index(&3, 3));
/// assert!(!set.is_element_at_index(&3, 100));
/// ```
pub struct ChainedHashSet<T, H = DefaultHashFunction> {
    buckets: Box<[Chain<T>]>,
    num_elements: usize,
    hash_fn: H,
}

type Chain<T> = Option<Box<Entry<T>>>;

struct Entry<T> {
    value: T,
    next: Chain<T>,
}

/// An iterator over the values of a set, in bucket order.
pub struct Iter<'a, T> {
    buckets: slice::Iter<'a, Chain<T>>,
    entry: Option<&'a Entry<T>>,
    remaining: usize,
}

impl<T: Hash + Eq> ChainedHashSet<T> {
    /// Creates an empty set with the default capacity, hashing elements
    /// through their `Hash` implementation.
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashFunction)
    }

    /// Creates an empty set with the given number of buckets (at least one),
    /// hashing elements through their `Hash` implementation.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashFunction)
    }
}

impl<T, H> ChainedHashSet<T, H> {
    pub const DEFAULT_CAPACITY: usize = DEFAULT_CAPACITY;

    /// Creates an empty set with the default capacity that uses the given
    /// hash function whenever it needs to hash an element.
    pub fn with_hasher(hash_fn: H) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hash_fn)
    }

    /// Creates an empty set with the given number of buckets (at least one)
    /// and hash function.
    pub fn with_capacity_and_hasher(capacity: usize, hash_fn: H) -> Self {
        Self {
            buckets: empty_buckets(capacity.max(1)),
            num_elements: 0,
            hash_fn,
        }
    }

    /// Returns true if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.num_elements == 0
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.num_elements
    }

    /// Returns the number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the hash function of the set.
    pub fn hasher(&self) -> &H {
        &self.hash_fn
    }

    /// Returns the number of elements stored in the bucket at `index`,
    /// or 0 if `index` is out of bounds.
    pub fn elements_at_index(&self, index: usize) -> usize {
        self.buckets
            .get(index)
            .map_or(0, |chain| chain_values(chain).count())
    }

    /// Clears the set, deallocating all entries.
    /// Capacity and hash function are kept.
    pub fn clear(&mut self) {
        for chain in self.buckets.iter_mut() {
            let mut link = chain.take();
            while let Some(mut entry) = link {
                link = entry.next.take();
            }
        }
        self.num_elements = 0;
    }

    /// Gets an iterator over the values of the set.
    /// The order is unspecified and changes when the table grows.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            buckets: self.buckets.iter(),
            entry: None,
            remaining: self.num_elements,
        }
    }

    fn push_back(chain: &mut Chain<T>, entry: Box<Entry<T>>) {
        let mut link = chain;
        while let Some(current) = link {
            link = &mut current.next;
        }
        *link = Some(entry);
    }
}

impl<T: PartialEq, H> ChainedHashSet<T, H> {
    /// Returns true if the given value is stored in the bucket at `index`,
    /// false otherwise or if `index` is out of bounds.
    pub fn is_element_at_index(&self, value: &T, index: usize) -> bool {
        self.buckets
            .get(index)
            .is_some_and(|chain| chain_values(chain).any(|stored| stored == value))
    }
}

impl<T: Eq, H: HashFunction<T>> ChainedHashSet<T, H> {
    /// Returns a reference to the value in the set that is equal to the given value.
    pub fn get(&self, value: &T) -> Option<&T> {
        let index = self.index_of(value);
        chain_values(&self.buckets[index]).find(|stored| *stored == value)
    }

    /// Returns true if the set contains a value.
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// Inserts a value into the set.
    /// Returns whether the value was newly inserted; an equal value already
    /// in the set is left untouched and no growth check takes place.
    pub fn insert(&mut self, value: T) -> bool {
        if self.contains(&value) {
            return false;
        }
        let index = self.index_of(&value);
        Self::push_back(&mut self.buckets[index], Entry::create(value));
        self.num_elements += 1;
        if self.is_overloaded() {
            self.grow();
        }
        debug_assert!(!self.is_overloaded());
        true
    }

    /// Moves all values from other into self, leaving other empty.
    pub fn append(&mut self, other: &mut Self) {
        for chain in other.buckets.iter_mut() {
            let mut link = chain.take();
            while let Some(mut entry) = link {
                link = entry.next.take();
                self.insert(entry.value);
            }
        }
        other.num_elements = 0;
    }

    /// Asserts that the internal table structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        let capacity = self.buckets.len();
        assert!(capacity >= 1);

        let mut num_elements = 0;
        for (index, chain) in self.buckets.iter().enumerate() {
            for value in chain_values(chain) {
                // Check bucket placement
                assert_eq!(bucket_index(&self.hash_fn, value, capacity), index);

                // Check uniqueness, equal values always share a chain
                assert_eq!(chain_values(chain).filter(|other| *other == value).count(), 1);

                num_elements += 1;
            }
        }

        // Check number of elements and load factor
        assert_eq!(num_elements, self.num_elements);
        assert!(!self.is_overloaded());
    }

    fn index_of(&self, value: &T) -> usize {
        bucket_index(&self.hash_fn, value, self.buckets.len())
    }

    fn is_overloaded(&self) -> bool {
        self.num_elements * MAX_LOAD_DENOMINATOR > self.buckets.len() * MAX_LOAD_NUMERATOR
    }

    /// Replaces the bucket array by one of `capacity * 2 + 1` buckets and
    /// relinks every entry into the bucket its hash selects there.
    fn grow(&mut self) {
        let old_capacity = self.buckets.len();
        let new_capacity = old_capacity * 2 + 1;
        log::debug!(
            "growing hash table from {} to {} buckets ({} elements)",
            old_capacity,
            new_capacity,
            self.num_elements
        );

        let old_buckets = mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        let mut entries = Vec::with_capacity(self.num_elements);
        for mut link in old_buckets.into_vec() {
            while let Some(mut entry) = link {
                link = entry.next.take();
                entries.push(entry);
            }
        }

        // Prepending in reverse order keeps the relative order within each chain
        for mut entry in entries.into_iter().rev() {
            let index = bucket_index(&self.hash_fn, &entry.value, new_capacity);
            entry.next = self.buckets[index].take();
            self.buckets[index] = Some(entry);
        }
    }
}

impl<T, H> Drop for ChainedHashSet<T, H> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Hash + Eq> Default for ChainedHashSet<T> {
    /// Creates an empty set with the default capacity.
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, H: Clone> Clone for ChainedHashSet<T, H> {
    /// Copies every chain entry by entry; the copy has the same capacity
    /// and bucket layout as the original.
    fn clone(&self) -> Self {
        let mut buckets = empty_buckets(self.buckets.len());
        for (target, chain) in buckets.iter_mut().zip(self.buckets.iter()) {
            let mut link = target;
            for value in chain_values(chain) {
                link = &mut link.insert(Entry::create(value.clone())).next;
            }
        }
        Self {
            buckets,
            num_elements: self.num_elements,
            hash_fn: self.hash_fn.clone(),
        }
    }
}

impl<T: Eq, H: HashFunction<T>> Set<T> for ChainedHashSet<T, H> {
    fn insert(&mut self, element: T) -> bool {
        ChainedHashSet::insert(self, element)
    }

    fn contains(&self, element: &T) -> bool {
        ChainedHashSet::contains(self, element)
    }

    fn len(&self) -> usize {
        ChainedHashSet::len(self)
    }
}

impl<T, H> FromIterator<T> for ChainedHashSet<T, H>
where
    T: Eq,
    H: HashFunction<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::with_hasher(H::default());
        set.extend(iter);
        set
    }
}

impl<T: Eq, H: HashFunction<T>> Extend<T> for ChainedHashSet<T, H> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: fmt::Debug, H> fmt::Debug for ChainedHashSet<T, H> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T, H> IntoIterator for &'a ChainedHashSet<T, H> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Auto derived clone seems to have an invalid type bound of T: Clone
impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            entry: self.entry,
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
        loop {
            if let Some(entry) = self.entry {
                self.entry = entry.next.as_deref();
                self.remaining -= 1;
                return Some(&entry.value);
            }
            self.entry = self.buckets.next()?.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> Entry<T> {
    fn create(value: T) -> Box<Self> {
        Box::new(Entry { value, next: None })
    }
}

fn empty_buckets<T>(capacity: usize) -> Box<[Chain<T>]> {
    iter::repeat_with(|| None).take(capacity).collect()
}

fn chain_values<T>(chain: &Chain<T>) -> impl Iterator<Item = &T> {
    iter::successors(chain.as_deref(), |entry| entry.next.as_deref()).map(|entry| &entry.value)
}

fn bucket_index<T, H: HashFunction<T>>(hash_fn: &H, value: &T, capacity: usize) -> usize {
    (hash_fn.hash_element(value) % capacity as u64) as usize
}
