use core::{borrow::Borrow, fmt, hash::Hash, ops::ControlFlow};
use std::collections::HashMap;

use rand::rngs::StdRng;

use crate::skiplist::{GeneratesHeight, Handle, Precedes, RandomHeight, SkipList};

/// What the list stores for every key. Only `value` takes part in ordering.
#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V: Precedes> Precedes for Entry<K, V> {
    fn precedes(&self, other: &Self) -> bool {
        self.value.precedes(&other.value)
    }
}

/// A map from keys to ranked values, Redis `ZSET` style.
///
/// [SortedSet](SortedSet) keeps each key's value in a [SkipList](crate::skiplist::SkipList)
/// and remembers the handle of that value, so a key can be re-scored, dropped,
/// or ranked without searching. Ordering is decided by `V`'s [`Precedes`]
/// alone; keys are never compared.
pub struct SortedSet<K, V, G = RandomHeight<StdRng>> {
    list: SkipList<Entry<K, V>, G>,
    index: HashMap<K, Handle>,
}

impl<K, V> SortedSet<K, V> {
    pub fn new() -> Self {
        SortedSet {
            list: SkipList::new(),
            index: HashMap::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        SortedSet {
            list: SkipList::with_seed(seed),
            index: HashMap::new(),
        }
    }
}

impl<K, V> Default for SortedSet<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, G> SortedSet<K, V, G> {
    pub fn with_height_source(heights: G) -> Self {
        SortedSet {
            list: SkipList::with_height_source(heights),
            index: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }

    /// The key and value at the 1-based `rank`.
    pub fn select(&self, rank: usize) -> Option<(&K, &V)> {
        self.entry(self.list.select(rank)?)
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        self.entry(self.list.front()?)
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        self.entry(self.list.back()?)
    }

    /// Visits ranks `start..=end` in order, stopping early when `visit` breaks.
    ///
    /// An `end` past the last rank is cut short at the end of the set.
    pub fn range<F>(&self, start: usize, end: usize, mut visit: F)
    where
        F: FnMut(usize, &K, &V) -> ControlFlow<()>,
    {
        let start = start.max(1);
        if start > end {
            return;
        }

        let mut rank = start;
        let mut curr = self.list.select(start);

        while let Some(handle) = curr {
            let Some((key, value)) = self.entry(handle) else {
                break;
            };

            if visit(rank, key, value).is_break() || rank == end {
                break;
            }

            rank += 1;
            curr = self.list.next(handle);
        }
    }

    /// Visits ranks `end..=start` from the bottom up, stopping early when
    /// `visit` breaks.
    ///
    /// An `end` past the last rank starts the walk at the last element.
    pub fn reverse_range<F>(&self, start: usize, end: usize, mut visit: F)
    where
        F: FnMut(usize, &K, &V) -> ControlFlow<()>,
    {
        let start = start.max(1);
        let end = end.min(self.len());
        if start > end {
            return;
        }

        let mut rank = end;
        let mut curr = self.list.select(end);

        while let Some(handle) = curr {
            let Some((key, value)) = self.entry(handle) else {
                break;
            };

            if visit(rank, key, value).is_break() || rank == start {
                break;
            }

            rank -= 1;
            curr = self.list.prev(handle);
        }
    }

    /// Forwards to [`SkipList::search`] with `predicate` looking at values.
    pub fn search<F>(&self, limit: usize, mut predicate: F) -> usize
    where
        F: FnMut(&V) -> bool,
    {
        self.list.search(limit, |entry| predicate(&entry.value))
    }

    pub fn iter(&self) -> Iter<'_, K, V, G> {
        Iter {
            inner: self.list.iter(),
        }
    }

    fn entry(&self, handle: Handle) -> Option<(&K, &V)> {
        self.list
            .get(handle)
            .map(|entry| (&entry.key, &entry.value))
    }
}

impl<K, V, G> SortedSet<K, V, G>
where
    K: Hash + Eq,
{
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    pub fn get_value<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = *self.index.get(key)?;
        self.list.get(handle).map(|entry| &entry.value)
    }

    /// The 1-based rank of `key`, or `None` if the key is absent.
    pub fn get_rank<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = *self.index.get(key)?;
        self.list.rank(handle)
    }

    /// Removes `key` and returns its value.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.index.remove(key)?;
        Some(self.detach(handle).value)
    }

    fn detach(&mut self, handle: Handle) -> Entry<K, V> {
        match self.list.remove(handle) {
            Ok(entry) => entry,
            Err(err) => panic!("key index out of sync with the list: {}", err),
        }
    }
}

impl<K, V, G> SortedSet<K, V, G>
where
    K: Hash + Eq + Clone,
    V: Precedes,
    G: GeneratesHeight,
{
    /// Stores `value` under `key` and returns its rank.
    ///
    /// An existing key is moved rather than updated in place: its old entry is
    /// removed and the new one lands wherever `value` sorts, behind any values
    /// it ties with.
    pub fn set(&mut self, key: K, value: V) -> usize {
        if let Some(handle) = self.index.remove(&key) {
            tracing::trace!(old_rank = ?self.list.rank(handle), "moving existing key");
            self.detach(handle);
        }

        let (handle, rank) = self.list.insert(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, handle);

        rank
    }
}

impl<K, V, G> SortedSet<K, V, G>
where
    V: Precedes,
{
    /// The rank `value` would get if it were set under a new key now.
    pub fn would_be_inserted(&self, value: &V) -> usize {
        self.list
            .search(self.len(), |entry| entry.value.precedes(value))
    }
}

impl<K, V, G> fmt::Debug for SortedSet<K, V, G>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Walks a [`SortedSet`] in rank order.
pub struct Iter<'a, K, V, G> {
    inner: crate::skiplist::Iter<'a, Entry<K, V>, G>,
}

impl<'a, K, V, G> Iterator for Iter<'a, K, V, G> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(_, entry)| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V, G> DoubleEndedIterator for Iter<'a, K, V, G> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner
            .next_back()
            .map(|(_, entry)| (&entry.key, &entry.value))
    }
}

impl<'a, K, V, G> ExactSizeIterator for Iter<'a, K, V, G> {}

impl<'a, K, V, G> IntoIterator for &'a SortedSet<K, V, G> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, G>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
