use core::{
    fmt::{self, Debug, Display},
    ops::{Index, IndexMut},
};

/// One level of a pointer tower.
///
/// `next` and `prev` are arena indices. `skip` is the number of level 0 steps
/// from the owning node to `next`. Links that end in the tail count the tail
/// as sitting at rank `len`, so the last element's level 0 link spans 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Link {
    pub(crate) next: usize,
    pub(crate) prev: usize,
    pub(crate) skip: usize,
}

#[derive(Default, PartialEq, Eq)]
pub(crate) struct Levels {
    pub(crate) links: Vec<Link>,
}

impl Levels {
    pub(crate) fn new(height: usize) -> Self {
        assert!(height <= super::HEIGHT && height > 0);

        Levels {
            links: vec![Link::default(); height],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.links.len()
    }
}

impl Index<usize> for Levels {
    type Output = Link;

    fn index(&self, index: usize) -> &Self::Output {
        &self.links[index]
    }
}

impl IndexMut<usize> for Levels {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.links[index]
    }
}

impl Debug for Levels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.links
                    .iter()
                    .map(|link| (link.prev, link.next, link.skip)),
            )
            .finish()
    }
}

/// An arena slot. Real nodes carry `Some(val)`; sentinels and freed slots
/// carry `None`. Freed slots also drop their tower.
pub(crate) struct Node<T> {
    pub(crate) val: Option<T>,
    pub(crate) gen: u64,
    pub(crate) levels: Levels,
}

impl<T> Node<T> {
    pub(crate) fn new(val: T, height: usize, gen: u64) -> Self {
        Node {
            val: Some(val),
            gen,
            levels: Levels::new(height),
        }
    }

    pub(crate) fn sentinel(gen: u64) -> Self {
        Node {
            val: None,
            gen,
            levels: Levels::new(super::HEIGHT),
        }
    }

    pub(crate) fn height(&self) -> usize {
        self.levels.len()
    }

    pub(crate) fn is_occupied(&self) -> bool {
        self.val.is_some()
    }

    /// Takes the value out and drops the tower, turning this into a free slot.
    pub(crate) fn vacate(&mut self) -> Option<T> {
        self.levels.links = Vec::new();
        self.val.take()
    }
}

impl<T> PartialEq for Node<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.val == other.val && self.levels == other.levels
    }
}

impl<T> Debug for Node<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("val", &self.val)
            .field("gen", &self.gen)
            .field("height", &self.height())
            .field("levels", &self.levels)
            .finish()
    }
}

impl<T> Display for Node<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (0..self.height()).try_for_each(|level| {
            writeln!(
                f,
                "[val: {:?}, level: {}, skip: {}]",
                self.val, level, self.levels[level].skip,
            )
        })
    }
}
