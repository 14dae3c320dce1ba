//! Collections built on top of the [SkipList](crate::skiplist::SkipList).

pub mod sorted_set;
