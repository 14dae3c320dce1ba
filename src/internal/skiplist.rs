use core::fmt;

use rand::rngs::StdRng;

use crate::error::{Error, Result};
use crate::internal::utils::{
    Arena, GeneratesHeight, Link, ListState, RandomHeight, HEAD, HEIGHT, TAIL,
};
use crate::skiplist::Precedes;

/// Opaque reference to an element of a [`SkipList`].
///
/// A handle stays valid until its element is removed or the list is cleared.
/// After that it is rejected by every operation, even if its slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    list: u64,
    inx: usize,
    gen: u64,
}

/// A skip list whose links know how many elements they jump over, giving
/// O(log n) expected rank and select queries on top of the usual ordered
/// insert and remove.
///
/// Ordering comes from [`Precedes`]. A new element is placed right before the
/// first element that does not precede it.
pub struct SkipList<T, G = RandomHeight<StdRng>> {
    nodes: Arena<T>,
    state: ListState,
    heights: G,
}

impl<T> SkipList<T> {
    /// Creates an empty list with tower heights seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_height_source(RandomHeight::from_entropy())
    }

    /// Creates an empty list whose layout is reproducible for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_height_source(RandomHeight::seeded(seed))
    }
}

impl<T> Default for SkipList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, G> SkipList<T, G> {
    pub fn with_height_source(heights: G) -> Self {
        SkipList {
            nodes: Arena::new(),
            state: ListState::new(),
            heights,
        }
    }

    pub fn len(&self) -> usize {
        self.state.len
    }

    pub fn is_empty(&self) -> bool {
        self.state.len < 1
    }

    /// Number of levels currently in use.
    pub fn level(&self) -> usize {
        self.state.level
    }

    /// Removes every element. All outstanding handles become invalid.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.state.len = 0;
        self.state.level = 1;
    }

    fn handle_of(&self, inx: usize) -> Handle {
        Handle {
            list: self.state.id,
            inx,
            gen: self.nodes[inx].gen,
        }
    }

    fn resolve(&self, handle: Handle) -> Result<usize> {
        if handle.list != self.state.id {
            return Err(Error::ForeignHandle);
        }

        if !self.nodes.contains(handle.inx, handle.gen) {
            return Err(Error::StaleHandle);
        }

        Ok(handle.inx)
    }

    /// The node after `inx` at `level` together with the span of the link,
    /// or `None` if the link ends in the tail.
    fn step(&self, inx: usize, level: usize) -> Option<(usize, usize)> {
        let Link { next, skip, .. } = self.nodes[inx].levels[level];
        (next != TAIL).then_some((next, skip))
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        let inx = self.resolve(handle).ok()?;
        self.nodes.val(inx)
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.resolve(handle).is_ok()
    }

    /// Unlinks the element behind `handle` and returns it.
    ///
    /// Fails without touching the list if the handle was issued by another
    /// list or its element is already gone.
    pub fn remove(&mut self, handle: Handle) -> Result<T> {
        let target = self.resolve(handle).map_err(|err| {
            tracing::debug!(?handle, %err, "rejected handle on remove");
            err
        })?;

        let height = self.nodes[target].height();

        for level in 0..height {
            let Link { next, prev, skip } = self.nodes[target].levels[level];

            let link = &mut self.nodes[prev].levels[level];
            link.next = next;
            link.skip = link.skip + skip - 1;

            self.nodes[next].levels[level].prev = prev;
        }

        // every level above the tower has exactly one link spanning the
        // removed position, owned by the closest taller node on the left
        let mut spanning = self.nodes[target].levels[height - 1].prev;
        for level in height..self.state.level {
            while self.nodes[spanning].height() <= level {
                let top = self.nodes[spanning].height() - 1;
                spanning = self.nodes[spanning].levels[top].prev;
            }

            self.nodes[spanning].levels[level].skip -= 1;
        }

        let level = self.state.level;
        while self.state.level > 1 && self.step(HEAD, self.state.level - 1).is_none() {
            self.state.level -= 1;
        }
        if level != self.state.level {
            tracing::trace!(from = level, to = self.state.level, "lowered list level");
        }

        self.state.len -= 1;

        self.nodes.dealloc(target).ok_or(Error::StaleHandle)
    }

    /// The 1-based rank of the element behind `handle`, found by walking back
    /// to the head along the tallest available links.
    pub fn rank(&self, handle: Handle) -> Option<usize> {
        let mut curr = self.resolve(handle).ok()?;
        let mut rank = 0;

        while curr != HEAD {
            let top = self.nodes[curr].height() - 1;
            let prev = self.nodes[curr].levels[top].prev;

            rank += self.nodes[prev].levels[top].skip;
            curr = prev;
        }

        Some(rank)
    }

    /// The element at the 1-based `rank`, or `None` outside `1..=len`.
    pub fn select(&self, rank: usize) -> Option<Handle> {
        if rank == 0 || rank > self.state.len {
            return None;
        }

        let mut curr = HEAD;
        let mut traversed = 0;

        for level in (0..self.state.level).rev() {
            while let Some((next, skip)) = self.step(curr, level) {
                if traversed + skip > rank {
                    break;
                }

                traversed += skip;
                curr = next;
            }

            if traversed == rank {
                return Some(self.handle_of(curr));
            }
        }

        None
    }

    /// Returns one more than the length of the longest prefix, capped at
    /// `limit` elements, for which `predicate` holds.
    ///
    /// `predicate` has to be monotonic over the list: true for some prefix and
    /// false afterwards. Otherwise the result is unspecified.
    pub fn search<F>(&self, limit: usize, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let mut curr = HEAD;
        let mut traversed = 0;

        for level in (0..self.state.level).rev() {
            while let Some((next, skip)) = self.step(curr, level) {
                if traversed + skip > limit {
                    break;
                }

                match self.nodes.val(next) {
                    Some(val) if predicate(val) => {
                        traversed += skip;
                        curr = next;
                    }
                    _ => break,
                }
            }
        }

        traversed + 1
    }

    pub fn front(&self) -> Option<Handle> {
        self.step(HEAD, 0).map(|(first, _)| self.handle_of(first))
    }

    pub fn back(&self) -> Option<Handle> {
        let last = self.nodes[TAIL].levels[0].prev;
        (last != HEAD).then(|| self.handle_of(last))
    }

    pub fn next(&self, handle: Handle) -> Option<Handle> {
        let inx = self.resolve(handle).ok()?;
        self.step(inx, 0).map(|(next, _)| self.handle_of(next))
    }

    pub fn prev(&self, handle: Handle) -> Option<Handle> {
        let inx = self.resolve(handle).ok()?;
        let prev = self.nodes[inx].levels[0].prev;
        (prev != HEAD).then(|| self.handle_of(prev))
    }

    pub fn iter(&self) -> iter::Iter<'_, T, G> {
        iter::Iter::from_list(self)
    }
}

impl<T, G> SkipList<T, G>
where
    T: Precedes,
    G: GeneratesHeight,
{
    /// Inserts `val` and returns its handle together with its 1-based rank.
    ///
    /// With a non-strict predicate an element tied with existing ones goes
    /// after all of them.
    pub fn insert(&mut self, val: T) -> (Handle, usize) {
        let mut update = [HEAD; HEIGHT];
        let mut rank = [0; HEIGHT];
        let mut curr = HEAD;

        for level in (0..self.state.level).rev() {
            if level + 1 < self.state.level {
                rank[level] = rank[level + 1];
            }

            while let Some((next, skip)) = self.step(curr, level) {
                match self.nodes.val(next) {
                    Some(other) if other.precedes(&val) => {
                        rank[level] += skip;
                        curr = next;
                    }
                    _ => break,
                }
            }

            update[level] = curr;
        }

        let height = self.heights.gen_height().clamp(1, HEIGHT);

        if height > self.state.level {
            for level in self.state.level..height {
                rank[level] = 0;
                update[level] = HEAD;
                self.nodes[HEAD].levels[level].skip = self.state.len;
            }

            tracing::trace!(from = self.state.level, to = height, "raised list level");
            self.state.level = height;
        }

        let new = self.nodes.alloc(val, height);

        for level in 0..height {
            let prev = update[level];
            let crossed = rank[0] - rank[level];
            let Link { next, skip, .. } = self.nodes[prev].levels[level];

            self.nodes[new].levels[level] = Link {
                next,
                prev,
                skip: skip - crossed,
            };

            let link = &mut self.nodes[prev].levels[level];
            link.next = new;
            link.skip = crossed + 1;

            self.nodes[next].levels[level].prev = new;
        }

        for level in height..self.state.level {
            self.nodes[update[level]].levels[level].skip += 1;
        }

        self.state.len += 1;

        (self.handle_of(new), rank[0] + 1)
    }

    /// The rank `val` would get if it were inserted now.
    pub fn would_be_inserted(&self, val: &T) -> usize {
        self.search(self.state.len, |other| other.precedes(val))
    }
}

impl<T, G> fmt::Debug for SkipList<T, G>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(|(_, val)| val)).finish()
    }
}

pub(crate) mod iter {
    use super::{Handle, SkipList};
    use crate::internal::utils::{HEAD, TAIL};
    use core::iter::{DoubleEndedIterator, ExactSizeIterator, FusedIterator, Iterator};

    /// Walks a [`SkipList`] in rank order, yielding handles with their elements.
    pub struct Iter<'a, T, G> {
        list: &'a SkipList<T, G>,
        front: usize,
        back: usize,
        remaining: usize,
    }

    impl<'a, T, G> Iter<'a, T, G> {
        pub(crate) fn from_list(list: &'a SkipList<T, G>) -> Self {
            Iter {
                list,
                front: list.nodes[HEAD].levels[0].next,
                back: list.nodes[TAIL].levels[0].prev,
                remaining: list.len(),
            }
        }
    }

    impl<'a, T, G> Iterator for Iter<'a, T, G> {
        type Item = (Handle, &'a T);

        fn next(&mut self) -> Option<Self::Item> {
            if self.remaining == 0 {
                return None;
            }

            let inx = self.front;
            let val = self.list.nodes.val(inx)?;

            self.front = self.list.nodes[inx].levels[0].next;
            self.remaining -= 1;

            Some((self.list.handle_of(inx), val))
        }

        fn size_hint(&self) -> (usize, Option<usize>) {
            (self.remaining, Some(self.remaining))
        }
    }

    impl<'a, T, G> DoubleEndedIterator for Iter<'a, T, G> {
        fn next_back(&mut self) -> Option<Self::Item> {
            if self.remaining == 0 {
                return None;
            }

            let inx = self.back;
            let val = self.list.nodes.val(inx)?;

            self.back = self.list.nodes[inx].levels[0].prev;
            self.remaining -= 1;

            Some((self.list.handle_of(inx), val))
        }
    }

    impl<'a, T, G> ExactSizeIterator for Iter<'a, T, G> {}

    impl<'a, T, G> FusedIterator for Iter<'a, T, G> {}

    impl<'a, T, G> IntoIterator for &'a SkipList<T, G> {
        type Item = (Handle, &'a T);
        type IntoIter = Iter<'a, T, G>;

        fn into_iter(self) -> Self::IntoIter {
            self.iter()
        }
    }
}

#[cfg(test)]
impl<T, G> SkipList<T, G>
where
    T: Precedes + fmt::Debug,
{
    /// Walks every level and checks ordering, back links and spans against
    /// the positions found at level 0.
    pub(crate) fn check_invariants(&self) {
        use std::collections::HashMap;

        let mut position = HashMap::new();
        position.insert(HEAD, 0);

        let mut curr = HEAD;
        let mut count = 0;
        while let Some((next, _)) = self.step(curr, 0) {
            count += 1;
            position.insert(next, count);

            if curr != HEAD {
                let a = self.nodes.val(curr).unwrap();
                let b = self.nodes.val(next).unwrap();
                assert!(
                    a.precedes(b) || !b.precedes(a),
                    "{:?} is placed before {:?}",
                    a,
                    b
                );
            }

            curr = next;
        }
        position.insert(TAIL, count);

        assert_eq!(count, self.state.len, "level 0 does not match len");
        assert_eq!(self.nodes[TAIL].levels[0].prev, curr);

        for level in 0..self.state.level {
            let mut curr = HEAD;
            loop {
                let Link { next, skip, .. } = self.nodes[curr].levels[level];
                assert_eq!(self.nodes[next].levels[level].prev, curr);
                assert_eq!(
                    skip,
                    position[&next] - position[&curr],
                    "bad span at level {} leaving {}",
                    level,
                    curr
                );

                if next == TAIL {
                    break;
                }
                curr = next;
            }
        }

        for level in self.state.level..HEIGHT {
            assert_eq!(self.nodes[HEAD].levels[level].next, TAIL);
        }

        if self.state.level > 1 {
            assert_ne!(self.nodes[HEAD].levels[self.state.level - 1].next, TAIL);
        }

        for (handle, _) in self.iter() {
            assert!(self.nodes[handle.inx].height() <= self.state.level);
        }
    }
}
