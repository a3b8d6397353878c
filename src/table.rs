//! RawTable: structural layer of the open-addressed set.
//!
//! Slots hold a generational key into `keys` plus the cached hash. Nothing
//! in this module calls user code: rebuilding reuses cached hashes, and
//! removed keys are handed back to the caller to drop once the table is
//! consistent again.

use crate::probe::ProbeSeq;
use slotmap::{DefaultKey, SlotMap};
use std::rc::Rc;

/// Live keys above which a rebuild only doubles instead of quadrupling.
const GROWTH_DAMPING_THRESHOLD: usize = 50_000;

/// Hash stored in a dummy slot. Never compared.
const DUMMY_HASH: u64 = u64::MAX;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum SlotKey {
    Empty,
    /// Tombstone left by a removal. Skipped by lookups, reused by inserts.
    Dummy,
    Live(DefaultKey),
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct Slot {
    pub key: SlotKey,
    pub hash: u64,
}

impl Slot {
    const EMPTY: Slot = Slot {
        key: SlotKey::Empty,
        hash: 0,
    };

    /// The (no key, zero hash) sentinel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.key == SlotKey::Empty && self.hash == 0
    }
}

pub(crate) struct RawTable<K> {
    slots: Vec<Slot>,
    keys: SlotMap<DefaultKey, Rc<K>>,
    // live + dummy slots
    fill: usize,
    linear_probes: usize,
}

impl<K> RawTable<K> {
    pub fn with_size(size: usize, linear_probes: usize) -> Self {
        debug_assert!(size.is_power_of_two());
        Self {
            slots: vec![Slot::EMPTY; size],
            keys: SlotMap::with_key(),
            fill: 0,
            linear_probes,
        }
    }

    #[inline]
    pub fn mask(&self) -> usize {
        self.slots.len() - 1
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// Live keys.
    #[inline]
    pub fn used(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn fill(&self) -> usize {
        self.fill
    }

    #[inline]
    pub fn linear_probes(&self) -> usize {
        self.linear_probes
    }

    #[inline]
    pub fn slot(&self, index: usize) -> Slot {
        self.slots[index]
    }

    #[inline]
    pub fn key(&self, handle: DefaultKey) -> Option<&Rc<K>> {
        self.keys.get(handle)
    }

    pub fn probe_seq(&self, hash: u64) -> ProbeSeq {
        ProbeSeq::new(hash, self.mask(), self.linear_probes)
    }

    /// First dummy or empty slot on the probe sequence of `hash`.
    pub fn find_insert_slot(&self, hash: u64) -> usize {
        self.probe_seq(hash)
            .find(|&i| !matches!(self.slots[i].key, SlotKey::Live(_)))
            .unwrap_or_default()
    }

    /// Store `key` in the slot returned by `find_insert_slot`.
    pub fn insert_at(&mut self, index: usize, hash: u64, key: Rc<K>) {
        let slot = &mut self.slots[index];
        debug_assert!(!matches!(slot.key, SlotKey::Live(_)));
        if slot.key == SlotKey::Empty {
            self.fill += 1;
        }
        let handle = self.keys.insert(key);
        *slot = Slot {
            key: SlotKey::Live(handle),
            hash,
        };
    }

    /// Turn a live slot into a dummy and return its key.
    pub fn remove_at(&mut self, index: usize) -> Option<Rc<K>> {
        let slot = &mut self.slots[index];
        let SlotKey::Live(handle) = slot.key else {
            return None;
        };
        *slot = Slot {
            key: SlotKey::Dummy,
            hash: DUMMY_HASH,
        };
        self.keys.remove(handle)
    }

    /// True once live plus dummy slots reach 60% of the mask.
    #[inline]
    pub fn needs_grow(&self) -> bool {
        self.fill * 5 >= self.mask() * 3
    }

    /// Size a rebuild should target for the current live count.
    pub fn grow_target(&self, min_size: usize) -> usize {
        let used = self.used();
        let wanted = if used > GROWTH_DAMPING_THRESHOLD {
            used * 2
        } else {
            used * 4
        };
        let mut size = min_size;
        while size <= wanted {
            size <<= 1;
        }
        size
    }

    /// Rebuild into `new_size` slots, dropping all dummies. Uses cached
    /// hashes only.
    pub fn rebuild(&mut self, new_size: usize) {
        debug_assert!(new_size.is_power_of_two() && new_size > self.used());
        let old = core::mem::replace(&mut self.slots, vec![Slot::EMPTY; new_size]);
        for slot in old {
            if let SlotKey::Live(_) = slot.key {
                let idx = self
                    .probe_seq(slot.hash)
                    .find(|&i| self.slots[i].is_empty())
                    .unwrap_or_default();
                self.slots[idx] = slot;
            }
        }
        self.fill = self.used();
    }

    /// Live keys in slot order.
    pub fn live_keys(&self) -> Vec<Rc<K>> {
        self.slots
            .iter()
            .filter_map(|s| match s.key {
                SlotKey::Live(h) => self.keys.get(h).cloned(),
                _ => None,
            })
            .collect()
    }
}
