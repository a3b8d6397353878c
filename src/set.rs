//! ProbeSet: public open-addressed set with pluggable, fallible key ops.

use crate::config::SetConfig;
use crate::error::LookupError;
use crate::ops::{HashEq, KeyOps};
use crate::table::{RawTable, SlotKey};
use crate::version::MutationVersion;
use core::cell::RefCell;
use core::fmt;
use core::hash::Hash;
use std::rc::Rc;

/// Open-addressed hash set.
///
/// Every method takes `&self`: the equality callback of `O` is allowed to
/// insert into or remove from this same set while a probe is running.
/// The table is never borrowed while user code runs, and a probe that
/// sees the mutation version move during a comparison starts over.
pub struct ProbeSet<K, O = HashEq> {
    ops: O,
    config: SetConfig,
    table: RefCell<RawTable<K>>,
    version: MutationVersion,
}

impl<K> ProbeSet<K>
where
    K: Hash + Eq,
{
    pub fn new() -> Self {
        Self::with_ops(HashEq::default())
    }
}

impl<K> Default for ProbeSet<K>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot iterator over the keys of a `ProbeSet`, in table order.
pub struct Keys<K> {
    it: std::vec::IntoIter<Rc<K>>,
}

impl<K> Iterator for Keys<K> {
    type Item = Rc<K>;
    #[inline]
    fn next(&mut self) -> Option<Rc<K>> {
        self.it.next()
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<K> ExactSizeIterator for Keys<K> {}

impl<K, O> ProbeSet<K, O>
where
    O: KeyOps<K>,
{
    pub fn with_ops(ops: O) -> Self {
        Self::with_config(ops, SetConfig::default())
    }

    pub fn with_config(ops: O, config: SetConfig) -> Self {
        Self {
            ops,
            table: RefCell::new(RawTable::with_size(
                config.initial_size(),
                config.linear_probes(),
            )),
            config,
            version: MutationVersion::new(),
        }
    }

    pub fn ops(&self) -> &O {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.table.borrow().used()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots in the table.
    pub fn capacity(&self) -> usize {
        self.table.borrow().size()
    }

    #[cfg(test)]
    pub(crate) fn raw_table(&self) -> core::cell::Ref<'_, RawTable<K>> {
        self.table.borrow()
    }

    /// Current mutation version. Moves on every structural change.
    pub fn version(&self) -> u64 {
        self.version.get()
    }

    fn hash_of(&self, key: &K) -> Result<u64, LookupError<O::Error>> {
        self.ops.hash(key).map_err(LookupError::Hash)
    }

    /// Slot index holding `key`, or `None` if absent.
    pub fn probe(&self, key: &K) -> Result<Option<usize>, LookupError<O::Error>> {
        let hash = self.hash_of(key)?;
        self.lookup(key, hash)
    }

    pub fn contains(&self, key: &K) -> Result<bool, LookupError<O::Error>> {
        Ok(self.probe(key)?.is_some())
    }

    fn lookup(&self, key: &K, hash: u64) -> Result<Option<usize>, LookupError<O::Error>> {
        'restart: loop {
            let snap = self.version.snapshot();
            let mut seq = self.table.borrow().probe_seq(hash);
            loop {
                let idx = seq.next_index();
                let stored = {
                    let table = self.table.borrow();
                    let slot = table.slot(idx);
                    if slot.is_empty() {
                        return Ok(None);
                    }
                    match slot.key {
                        SlotKey::Live(h) if slot.hash == hash => match table.key(h) {
                            Some(k) => Rc::clone(k),
                            None => {
                                debug_assert!(false, "live slot without key");
                                continue;
                            }
                        },
                        _ => continue,
                    }
                };

                if core::ptr::eq(&*stored, key) {
                    return Ok(Some(idx));
                }
                if let (Some(a), Some(b)) = (self.ops.exact_str(&stored), self.ops.exact_str(key)) {
                    if a.eq_exact(b) {
                        return Ok(Some(idx));
                    }
                    continue;
                }

                let cmp = self.ops.eq(&stored, key);
                // May be the last reference if `eq` removed it.
                drop(stored);
                let equal = cmp.map_err(LookupError::Compare)?;
                if self.version.changed_since(snap) {
                    log::trace!("set mutated during key comparison; restarting probe");
                    continue 'restart;
                }
                if equal {
                    return Ok(Some(idx));
                }
            }
        }
    }

    /// Insert `key`. Returns `false` if an equal key was already present;
    /// the stored key is kept.
    pub fn insert(&self, key: K) -> Result<bool, LookupError<O::Error>> {
        self.insert_rc(Rc::new(key))
    }

    /// Insert a shared key. A later probe with a reference to this same
    /// allocation matches by identity without calling `eq`.
    pub fn insert_rc(&self, key: Rc<K>) -> Result<bool, LookupError<O::Error>> {
        let hash = self.hash_of(&key)?;
        if self.lookup(&key, hash)?.is_some() {
            return Ok(false);
        }
        // No user code runs between the lookup above and this write.
        let mut table = self.table.borrow_mut();
        let idx = table.find_insert_slot(hash);
        table.insert_at(idx, hash, key);
        self.version.bump();
        if table.needs_grow() {
            let from = table.size();
            let to = table.grow_target(self.config.initial_size());
            table.rebuild(to);
            self.version.bump();
            log::debug!("grew set table from {} to {} slots ({} keys)", from, to, table.used());
        }
        Ok(true)
    }

    /// Remove `key`, returning the stored key if it was present.
    pub fn remove(&self, key: &K) -> Result<Option<Rc<K>>, LookupError<O::Error>> {
        let hash = self.hash_of(key)?;
        let Some(idx) = self.lookup(key, hash)? else {
            return Ok(None);
        };
        let removed = self.table.borrow_mut().remove_at(idx);
        debug_assert!(removed.is_some());
        self.version.bump();
        Ok(removed)
    }

    /// Remove `key` if present. Returns whether it was.
    pub fn discard(&self, key: &K) -> Result<bool, LookupError<O::Error>> {
        Ok(self.remove(key)?.is_some())
    }

    /// Remove every key and shrink back to the configured initial size.
    pub fn clear(&self) {
        let fresh = RawTable::with_size(self.config.initial_size(), self.config.linear_probes());
        let old = self.table.replace(fresh);
        self.version.bump();
        log::debug!("cleared set of {} keys", old.used());
        // Keys drop here, after the new table is in place.
        drop(old);
    }

    /// Snapshot of the current keys. Later mutation does not affect it.
    pub fn keys(&self) -> Keys<K> {
        let keys = self.table.borrow().live_keys();
        Keys {
            it: keys.into_iter(),
        }
    }
}

impl<K, O> fmt::Debug for ProbeSet<K, O>
where
    K: fmt::Debug,
    O: KeyOps<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}
