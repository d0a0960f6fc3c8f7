//! Two interchangeable set implementations behind one contract:
//! an ordered set backed by an AVL tree and an unordered set backed by
//! a separately chained hash table with dynamic growth.
//!
//! ```
//! use setkit::{AvlTreeSet, ChainedHashSet, Set};
//!
//! fn knows<S: Set<&'static str>>(words: &S, word: &'static str) -> bool {
//!     words.contains(&word)
//! }
//!
//! let tree: AvlTreeSet<_> = ["wool", "wood", "word"].into_iter().collect();
//! let table: ChainedHashSet<_> = ["wool", "wood", "word"].into_iter().collect();
//! assert!(knows(&tree, "wood"));
//! assert!(!knows(&table, "worm"));
//! ```
#![forbid(unsafe_code)]

pub mod hash;
pub mod set;
pub mod tree;

pub use hash::{ChainedHashSet, DefaultHashFunction, HashFunction};
pub use set::Set;
pub use tree::AvlTreeSet;
