use core::sync::atomic::{AtomicU64, Ordering};

use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

mod arena;
mod node;

pub(crate) use arena::{Arena, HEAD, TAIL};
pub(crate) use node::{Link, Node};

pub(crate) const HEIGHT_BITS: usize = 5;

/// The maximum height of a pointer tower. Both sentinels are always this tall.
pub const HEIGHT: usize = 1 << HEIGHT_BITS;

/// A tower grows one level with a chance of one in `BRANCHING`.
pub const BRANCHING: u32 = 4;

/// Source of tower heights for newly inserted nodes.
///
/// The list clamps whatever is returned into `1..=HEIGHT`, so an
/// implementation only has to decide the shape of the distribution. Tests and
/// benchmarks can plug in fixed sequences to build a particular layout.
pub trait GeneratesHeight {
    fn gen_height(&mut self) -> usize;
}

/// The default height source: a geometric distribution with `p = 1/BRANCHING`,
/// driven by any [`RngCore`].
#[derive(Debug, Clone)]
pub struct RandomHeight<R> {
    rng: R,
}

impl<R: RngCore> RandomHeight<R> {
    pub fn new(rng: R) -> Self {
        RandomHeight { rng }
    }
}

impl RandomHeight<StdRng> {
    pub fn from_entropy() -> Self {
        RandomHeight::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        RandomHeight::new(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomHeight<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: RngCore> GeneratesHeight for RandomHeight<R> {
    fn gen_height(&mut self) -> usize {
        let mut height = 1;

        while height < HEIGHT && self.rng.gen_ratio(1, BRANCHING) {
            height += 1;
        }

        height
    }
}

static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) struct ListState {
    pub(crate) len: usize,
    /// Number of levels currently in use, at least 1.
    pub(crate) level: usize,
    /// Stamped into every handle so handles of other lists are rejected.
    pub(crate) id: u64,
}

impl ListState {
    pub(crate) fn new() -> Self {
        ListState {
            len: 0,
            level: 1,
            id: NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed),
        }
    }
}
