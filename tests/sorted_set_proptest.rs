use proptest::prelude::*;
use skippy_rank::skiplist::Descending;
use skippy_rank::SortedSet;
use std::ops::ControlFlow;

#[derive(Debug, Clone)]
enum Operation {
    Set(u8, u8),
    Delete(u8),
}

const KEYS: u8 = 24;

fn key() -> impl Strategy<Value = u8> {
    0..KEYS
}

proptest! {
    #[test]
    fn test_sorted_set_matches_vec(
        seed in any::<u64>(),
        ops in proptest::collection::vec(
            prop_oneof![
                3 => (key(), any::<u8>()).prop_map(|(k, s)| Operation::Set(k, s)),
                1 => key().prop_map(Operation::Delete),
            ],
            1..300
        )
    ) {
        let mut set = SortedSet::with_seed(seed);
        // (key, score) in rank order
        let mut model: Vec<(u8, u8)> = Vec::new();

        for op in ops {
            match op {
                Operation::Set(k, score) => {
                    model.retain(|&(other, _)| other != k);
                    let position = model.iter().take_while(|(_, s)| *s >= score).count();
                    model.insert(position, (k, score));

                    prop_assert_eq!(set.set(k, Descending(score)), position + 1, "Set rank mismatch for key {}", k);
                }
                Operation::Delete(k) => {
                    let expected = model
                        .iter()
                        .position(|&(other, _)| other == k)
                        .map(|i| Descending(model.remove(i).1));

                    prop_assert_eq!(set.delete(&k), expected, "Delete result mismatch for key {}", k);
                }
            }

            prop_assert_eq!(set.len(), model.len(), "Length mismatch");
        }

        for (i, &(k, score)) in model.iter().enumerate() {
            prop_assert_eq!(set.get_rank(&k), Some(i + 1));
            prop_assert_eq!(set.get_value(&k), Some(&Descending(score)));
            prop_assert_eq!(set.select(i + 1), Some((&k, &Descending(score))));
        }

        for k in 0..KEYS {
            let present = model.iter().any(|&(other, _)| other == k);
            prop_assert_eq!(set.contains_key(&k), present);
        }

        let mut forward = Vec::new();
        set.range(1, model.len() + 5, |rank, k, v| {
            forward.push((rank, *k, v.0));
            ControlFlow::Continue(())
        });
        let expected: Vec<_> = model
            .iter()
            .enumerate()
            .map(|(i, &(k, s))| (i + 1, k, s))
            .collect();
        prop_assert_eq!(&forward, &expected);

        let mut backward = Vec::new();
        set.reverse_range(1, model.len() + 5, |rank, k, v| {
            backward.push((rank, *k, v.0));
            ControlFlow::Continue(())
        });
        backward.reverse();
        prop_assert_eq!(&backward, &expected);
    }
}
