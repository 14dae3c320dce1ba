//! A rank indexed skip list.
//!
//! [SkipList](skiplist::SkipList) keeps its elements sorted by a caller
//! supplied [Precedes](skiplist::Precedes) relation and counts how many
//! elements each link jumps over, so that both "what rank is this element"
//! and "which element has this rank" take O(log n) expected time.
//! [SortedSet](collections::sorted_set::SortedSet) layers a key index on top,
//! the building block of leaderboards and other top-N views.
//!
//! ```
//! use skippy_rank::{skiplist::Descending, SortedSet};
//!
//! let mut board = SortedSet::new();
//! board.set("ann", Descending(10));
//! board.set("bob", Descending(30));
//! board.set("cid", Descending(20));
//!
//! assert_eq!(board.get_rank("cid"), Some(2));
//! assert_eq!(board.select(1), Some((&"bob", &Descending(30))));
//! ```
//!
//! Nothing in here is synchronized. Share a list between threads behind a
//! lock, or keep it owned by a single task.
#![warn(
    // missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod collections;
pub mod error;
mod internal;
pub mod skiplist;

pub use collections::sorted_set::SortedSet;
pub use error::{Error, Result};
pub use skiplist::{Handle, Precedes, SkipList};
