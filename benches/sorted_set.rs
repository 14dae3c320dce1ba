#![feature(test)]
use skippy_rank::skiplist::Descending;
use skippy_rank::SortedSet;
use std::collections::{BTreeSet, HashMap};
use std::ops::ControlFlow;

extern crate test;

use test::Bencher;

#[bench]
fn bench_rescore_skippy(b: &mut Bencher) {
    let n = test::black_box(1_000);
    let mut seed: u32 = rand::random();
    let mut board = SortedSet::new();

    b.iter(|| {
        for _ in 0..n {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 7;

            board.set(seed % 256, Descending(seed));
        }
    });

    println!("skippy len: {}", board.len());
}

#[bench]
fn bench_rescore_btree(b: &mut Bencher) {
    let n = test::black_box(1_000);
    let mut seed: u32 = rand::random();
    let mut scores = HashMap::new();
    let mut board = BTreeSet::new();

    b.iter(|| {
        for _ in 0..n {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 7;

            let key = seed % 256;
            if let Some(old) = scores.insert(key, seed) {
                board.remove(&(u32::MAX - old, key));
            }
            board.insert((u32::MAX - seed, key));
        }
    });

    println!("btree len: {}", board.len());
}

#[bench]
fn bench_top_ten_skippy(b: &mut Bencher) {
    let mut board = SortedSet::new();
    for key in 0..10_000u32 {
        board.set(key, Descending(rand::random::<u32>()));
    }

    b.iter(|| {
        let mut total = 0u64;
        board.range(1, 10, |_, _, score| {
            total += score.0 as u64;
            ControlFlow::Continue(())
        });
        total
    });
}

#[bench]
fn bench_get_rank_skippy(b: &mut Bencher) {
    let mut board = SortedSet::new();
    for key in 0..10_000u32 {
        board.set(key, Descending(rand::random::<u32>()));
    }

    b.iter(|| {
        (0..10_000u32)
            .step_by(97)
            .filter_map(|key| board.get_rank(&key))
            .sum::<usize>()
    });
}
