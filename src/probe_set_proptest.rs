#![cfg(test)]

// Property tests for ProbeSet kept inside the crate so they can inspect
// the raw table after every step.

use crate::ops::HashEq;
use crate::set::ProbeSet;
use crate::table::SlotKey;
use hashbrown::HashSet;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::hash::{BuildHasher, Hasher};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize),
    Remove(usize),
    Discard(usize),
    Contains(String),
    Clear,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => idx.clone().prop_map(OpI::Insert),
            2 => idx.clone().prop_map(OpI::Remove),
            1 => idx.clone().prop_map(OpI::Discard),
            2 => prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            1 => Just(OpI::Clear),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Structural invariants of the raw table after any operation:
// - at least one empty slot, so absent-key probes terminate;
// - every live key is reachable from its own hash before an empty slot.
fn check_table<S: BuildHasher>(sut: &ProbeSet<String, HashEq<S>>) -> Result<(), TestCaseError> {
    let table = sut.raw_table();
    let empties = (0..table.size()).filter(|&i| table.slot(i).is_empty()).count();
    prop_assert!(empties > 0, "table has no empty slot");
    for i in 0..table.size() {
        let slot = table.slot(i);
        if let SlotKey::Live(_) = slot.key {
            let mut reached = false;
            // Enough steps for the perturbation to drain and every cluster
            // start to come round once.
            let bound = (table.size() + 14) * (table.linear_probes() + 1);
            for j in table.probe_seq(slot.hash).take(bound) {
                if j == i {
                    reached = true;
                    break;
                }
                prop_assert!(!table.slot(j).is_empty(), "empty slot before live key");
            }
            prop_assert!(reached, "live key unreachable from its hash");
        }
    }
    Ok(())
}

fn run_state_machine<S: BuildHasher>(
    sut: ProbeSet<String, HashEq<S>>,
    pool: Vec<String>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashSet<String> = HashSet::new();
    for op in ops {
        match op {
            OpI::Insert(i) => {
                let k = pool[i].clone();
                let added = sut.insert(k.clone()).unwrap();
                prop_assert_eq!(added, model.insert(k));
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                let removed = sut.remove(k).unwrap();
                prop_assert_eq!(removed.is_some(), model.remove(k));
                if let Some(r) = removed {
                    prop_assert_eq!(&*r, k);
                }
            }
            OpI::Discard(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.discard(k).unwrap(), model.remove(k));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains(&s).unwrap(), model.contains(&s));
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
            }
            OpI::Iterate => {
                let s_keys: BTreeSet<String> = sut.keys().map(|k| (*k).clone()).collect();
                let m_keys: BTreeSet<String> = model.iter().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        check_table(&sut)?;
    }
    for k in &model {
        prop_assert!(sut.contains(k).unwrap());
    }
    Ok(())
}

// Property: State-machine equivalence against hashbrown::HashSet.
// Invariants exercised across random operation sequences:
// - insert reports whether the key was new; duplicates are not stored twice.
// - remove/discard report presence and return the stored key.
// - contains parity for pool keys and arbitrary strings.
// - keys() yields each live key exactly once.
// - The table always keeps an empty slot and every live key reachable.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(ProbeSet::new(), pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress equality resolution.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Property: Same state-machine invariants as above, under worst-case
// collision behavior (constant hasher). Every key shares one probe
// sequence, so removals leave dummies in the middle of it.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_state_machine(ProbeSet::with_ops(HashEq::with_hasher(ConstBuildHasher)), pool, ops)?;
    }
}
