use core::ops::{Index, IndexMut};

use super::{Link, Node, HEIGHT};

/// Arena index of the head sentinel.
pub(crate) const HEAD: usize = 0;
/// Arena index of the tail sentinel.
pub(crate) const TAIL: usize = 1;

/// Slot storage for the nodes of one list.
///
/// The arena keeps a single generation counter. Every allocation is stamped
/// with the current generation and every invalidation bumps it, so a stale
/// `(inx, gen)` pair can never match a node that later reuses the slot.
pub(crate) struct Arena<T> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    gen: u64,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        let mut arena = Arena {
            nodes: Vec::with_capacity(2),
            free: Vec::new(),
            gen: 1,
        };

        arena.nodes.push(Node::sentinel(0));
        arena.nodes.push(Node::sentinel(0));
        arena.link_sentinels();

        arena
    }

    fn link_sentinels(&mut self) {
        for level in 0..HEIGHT {
            self.nodes[HEAD].levels[level] = Link {
                next: TAIL,
                prev: HEAD,
                skip: 0,
            };
            self.nodes[TAIL].levels[level] = Link {
                next: TAIL,
                prev: HEAD,
                skip: 0,
            };
        }
    }

    /// Places `val` in a free slot, or a new one, with an unlinked tower of
    /// `height` levels.
    pub(crate) fn alloc(&mut self, val: T, height: usize) -> usize {
        let node = Node::new(val, height, self.gen);

        match self.free.pop() {
            Some(inx) => {
                self.nodes[inx] = node;
                inx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Frees the slot at `inx`, returning its value. Sentinels and already
    /// free slots yield `None` and are left untouched.
    pub(crate) fn dealloc(&mut self, inx: usize) -> Option<T> {
        let node = self.nodes.get_mut(inx)?;
        if !node.is_occupied() {
            return None;
        }

        let val = node.vacate();
        self.gen += 1;
        self.free.push(inx);

        val
    }

    /// Whether `inx` currently holds a real node allocated under `gen`.
    pub(crate) fn contains(&self, inx: usize, gen: u64) -> bool {
        self.nodes
            .get(inx)
            .is_some_and(|node| node.is_occupied() && node.gen == gen)
    }

    pub(crate) fn val(&self, inx: usize) -> Option<&T> {
        self.nodes.get(inx).and_then(|node| node.val.as_ref())
    }

    /// Drops every real node and relinks the sentinels. Handles issued before
    /// the call stay invalid forever.
    pub(crate) fn clear(&mut self) {
        self.nodes.truncate(2);
        self.free.clear();
        self.gen += 1;
        self.link_sentinels();
    }

    /// Number of slots, sentinels and free slots included.
    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.len()
    }
}

impl<T> Index<usize> for Arena<T> {
    type Output = Node<T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.nodes[index]
    }
}

impl<T> IndexMut<usize> for Arena<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.nodes[index]
    }
}

#[cfg(test)]
mod arena_test {
    use super::*;

    #[test]
    fn test_sentinels() {
        let arena: Arena<u8> = Arena::new();

        assert_eq!(arena.capacity(), 2);
        assert_eq!(arena[HEAD].levels[0].next, TAIL);
        assert_eq!(arena[TAIL].levels[HEIGHT - 1].prev, HEAD);
        assert!(!arena.contains(HEAD, 0));
        assert!(!arena.contains(TAIL, 0));
    }

    #[test]
    fn test_sentinels_cannot_be_freed() {
        let mut arena: Arena<u8> = Arena::new();

        assert_eq!(arena.dealloc(HEAD), None);
        assert_eq!(arena.dealloc(TAIL), None);
        assert_eq!(arena.dealloc(17), None);
        assert_eq!(arena[HEAD].height(), HEIGHT);
    }

    #[test]
    fn test_slot_reuse_invalidates_old_generation() {
        let mut arena = Arena::new();

        let inx = arena.alloc("first", 2);
        let gen = arena[inx].gen;
        assert!(arena.contains(inx, gen));

        assert_eq!(arena.dealloc(inx), Some("first"));
        assert!(!arena.contains(inx, gen));
        assert_eq!(arena.dealloc(inx), None);

        let reused = arena.alloc("second", 1);
        assert_eq!(reused, inx);
        assert!(!arena.contains(inx, gen));
        assert!(arena.contains(inx, arena[inx].gen));
        assert_eq!(arena.val(inx), Some(&"second"));
    }

    #[test]
    fn test_clear() {
        let mut arena = Arena::new();

        let inx = arena.alloc(1, 3);
        let gen = arena[inx].gen;
        arena.clear();

        assert_eq!(arena.capacity(), 2);
        let again = arena.alloc(2, 1);
        assert_eq!(again, inx);
        assert!(!arena.contains(inx, gen));
    }
}
