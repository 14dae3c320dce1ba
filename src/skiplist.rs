//! The rank indexed skip list and the ordering it is built on.

pub use crate::internal::skiplist::{iter::Iter, Handle, SkipList};
pub use crate::internal::utils::{GeneratesHeight, RandomHeight, BRANCHING, HEIGHT};

/// The ordering relation of a [`SkipList`].
///
/// `a.precedes(b)` means `a` sorts before `b`. The relation has to be a
/// consistent preorder but need not be strict: whether equal elements precede
/// each other decides where a new element lands among its ties.
pub trait Precedes {
    fn precedes(&self, other: &Self) -> bool;
}

/// Orders smaller values first. Ties precede each other, so the earliest
/// inserted of a run of equal values ranks first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ascending<T>(pub T);

impl<T: PartialOrd> Precedes for Ascending<T> {
    fn precedes(&self, other: &Self) -> bool {
        self.0 <= other.0
    }
}

/// Orders larger values first, as a leaderboard does. Ties precede each other,
/// so the earliest inserted of a run of equal scores ranks first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Descending<T>(pub T);

impl<T: PartialOrd> Precedes for Descending<T> {
    fn precedes(&self, other: &Self) -> bool {
        self.0 >= other.0
    }
}

impl<T: Precedes + ?Sized> Precedes for &T {
    fn precedes(&self, other: &Self) -> bool {
        (**self).precedes(*other)
    }
}
