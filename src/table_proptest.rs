#![cfg(test)]

// Property tests for Table and its cursors, kept inside the crate so they can
// look at cursor internals and chain placement.

use crate::error::TableError;
use crate::hasher;
use crate::table::Table;
use proptest::prelude::*;
use std::collections::HashMap;
use std::num::NonZeroUsize;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Lookup(usize),
    Get(usize),
    Contains(Vec<u8>),
    Traverse,
}

// Short keys over a tiny alphabet that includes bytes invalid as UTF-8.
fn arb_key() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(proptest::sample::select(vec![b'a', b'b', b'c', 0xfe, 0xff]), 0..5)
}

fn arb_scenario() -> impl Strategy<Value = (Vec<Vec<u8>>, Vec<OpI>)> {
    proptest::collection::vec(arb_key(), 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => idx.clone().prop_map(OpI::Lookup),
            1 => idx.clone().prop_map(OpI::Get),
            1 => arb_key().prop_map(OpI::Contains),
            1 => Just(OpI::Traverse),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

/// Reference model: counts plus first-insertion order.
#[derive(Default)]
struct Model {
    counts: HashMap<Vec<u8>, u64>,
    order: Vec<Vec<u8>>,
}

impl Model {
    fn lookup(&mut self, k: &[u8]) -> u64 {
        let c = self.counts.entry(k.to_vec()).or_insert(0);
        if *c == 0 {
            self.order.push(k.to_vec());
        }
        *c += 1;
        *c
    }

    /// Keys in the order a table of `size` buckets must visit them.
    fn expected_traversal(&self, size: usize) -> Vec<(Vec<u8>, u64)> {
        let size = NonZeroUsize::new(size).unwrap();
        let mut keyed: Vec<(usize, usize, &Vec<u8>)> = self
            .order
            .iter()
            .enumerate()
            .map(|(i, k)| (hasher::hash(k, size), i, k))
            .collect();
        keyed.sort();
        keyed
            .into_iter()
            .map(|(_, _, k)| (k.clone(), self.counts[k]))
            .collect()
    }
}

fn run_scenario(size: usize, pool: &[Vec<u8>], ops: Vec<OpI>) -> Result<(), TestCaseError> {
    let mut sut = Table::new(size).map_err(|e| TestCaseError::fail(e.to_string()))?;
    let mut model = Model::default();

    for op in ops {
        match op {
            OpI::Lookup(i) => {
                let k = &pool[i];
                let expected = model.lookup(k);
                let e = sut.lookup_or_insert(k).map_err(|e| TestCaseError::fail(e.to_string()))?;
                prop_assert_eq!(e.key(), k.as_slice());
                prop_assert_eq!(e.count(), expected);
            }
            OpI::Get(i) => {
                let k = &pool[i];
                let got = sut.get(k).map(|e| e.count());
                prop_assert_eq!(got, model.counts.get(k).copied());
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(&s), model.counts.contains_key(&s));
            }
            OpI::Traverse => {
                // Cursor walk: non-decreasing buckets, insertion order within
                // a bucket, one step per entry.
                let mut steps = 0usize;
                let mut last_bucket = 0usize;
                let mut walked = Vec::new();
                let mut c = sut.begin();
                while c != sut.end() {
                    prop_assert!(c.bucket() >= last_bucket);
                    last_bucket = c.bucket();
                    let e = sut.entry(c);
                    prop_assert_eq!(sut.bucket_of(e.key()), c.bucket());
                    walked.push((e.key().to_vec(), e.count()));
                    c = sut.next(c);
                    steps += 1;
                }
                prop_assert_eq!(steps, sut.len());
                prop_assert_eq!(&walked, &model.expected_traversal(size));

                let via_iter: Vec<(Vec<u8>, u64)> =
                    sut.iter().map(|e| (e.key().to_vec(), e.count())).collect();
                prop_assert_eq!(via_iter, walked);
            }
        }

        // Post-conditions after each op: uniqueness and size parity.
        prop_assert_eq!(sut.len(), model.counts.len());
        prop_assert_eq!(sut.is_empty(), model.counts.is_empty());
    }

    // Count correctness over the whole run.
    for (k, &n) in &model.counts {
        prop_assert_eq!(sut.get(k).map(|e| e.count()), Some(n));
    }
    Ok(())
}

// Property: State-machine equivalence against a HashMap model.
// Invariants exercised across random operation sequences:
// - One entry per distinct key; `len` equals the number of distinct keys.
// - Each count equals the number of lookups of that key.
// - Traversal visits buckets in ascending order and chains in insertion
//   order, taking exactly `len` steps from begin to end.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), size in 1usize..=16) {
        run_scenario(size, &pool, ops)?;
    }
}

// Property: Same invariants with a single bucket, where every key collides
// and traversal order degrades to pure insertion order.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_scenario(1, &pool, ops)?;
    }
}

proptest! {
    #[test]
    fn prop_bucket_in_range(key in ".{0,40}", size in 1usize..5000) {
        let b = hasher::hash(key.as_bytes(), NonZeroUsize::new(size).unwrap());
        prop_assert!(b < size);
        prop_assert_eq!(b, hasher::hash(key.as_bytes(), NonZeroUsize::new(size).unwrap()));
    }
}

#[test]
fn zero_size_never_constructs() {
    assert!(matches!(Table::new(0), Err(TableError::ZeroSize)));
}
