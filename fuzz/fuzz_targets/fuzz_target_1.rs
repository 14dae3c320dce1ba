#![no_main]

use libfuzzer_sys::fuzz_target;
use skippy_rank::skiplist::Descending;
use skippy_rank::SortedSet;

fuzz_target!(|data: &[u8]| {
    let mut set = SortedSet::with_seed(data.len() as u64);
    // (key, score) in rank order
    let mut model: Vec<(u8, u8)> = Vec::new();

    for op in data.chunks_exact(3) {
        let (kind, key, score) = (op[0], op[1] % 32, op[2]);

        if kind % 4 == 0 {
            let expected = model
                .iter()
                .position(|&(other, _)| other == key)
                .map(|i| Descending(model.remove(i).1));

            assert_eq!(set.delete(&key), expected);
        } else {
            model.retain(|&(other, _)| other != key);
            let position = model.iter().take_while(|(_, s)| *s >= score).count();
            model.insert(position, (key, score));

            assert_eq!(set.set(key, Descending(score)), position + 1);
        }

        assert_eq!(set.len(), model.len());
    }

    for (i, (key, score)) in model.iter().enumerate() {
        assert_eq!(set.get_rank(key), Some(i + 1));
        assert_eq!(set.select(i + 1), Some((key, &Descending(*score))));
    }
});
