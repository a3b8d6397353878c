//! Pluggable hash and equality for set keys.

use crate::widestr::WideStr;
use core::convert::Infallible;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;

/// Hash and equality policy of a `ProbeSet`.
///
/// Both callbacks may fail, and `eq` may run arbitrary code, including
/// inserting into or removing from the very set being probed. The set
/// holds no borrow of its table while `eq` runs and restarts the probe if
/// the table changed underneath it.
pub trait KeyOps<K> {
    type Error;

    fn hash(&self, key: &K) -> Result<u64, Self::Error>;

    /// Full equality between a stored key and the probed key.
    fn eq(&self, stored: &K, probe: &K) -> Result<bool, Self::Error>;

    /// Exact string view of `key`, if it is one. When both keys of a
    /// comparison expose one, their byte equality decides the comparison
    /// and `eq` is not called.
    fn exact_str<'k>(&self, _key: &'k K) -> Option<&'k WideStr> {
        None
    }
}

/// Ordinary `Hash + Eq` keys hashed with a `BuildHasher`.
#[derive(Clone, Debug, Default)]
pub struct HashEq<S = RandomState> {
    hasher: S,
}

impl<S> HashEq<S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self { hasher }
    }
}

impl<K, S> KeyOps<K> for HashEq<S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Error = Infallible;

    #[inline]
    fn hash(&self, key: &K) -> Result<u64, Infallible> {
        Ok(self.hasher.hash_one(key))
    }

    #[inline]
    fn eq(&self, stored: &K, probe: &K) -> Result<bool, Infallible> {
        Ok(stored == probe)
    }
}

/// `WideStr` keys: cached string hash and exact-string comparison.
#[derive(Copy, Clone, Debug, Default)]
pub struct WideStrOps;

impl KeyOps<WideStr> for WideStrOps {
    type Error = Infallible;

    #[inline]
    fn hash(&self, key: &WideStr) -> Result<u64, Infallible> {
        Ok(key.hash_code())
    }

    #[inline]
    fn eq(&self, stored: &WideStr, probe: &WideStr) -> Result<bool, Infallible> {
        Ok(stored.eq_exact(probe))
    }

    #[inline]
    fn exact_str<'k>(&self, key: &'k WideStr) -> Option<&'k WideStr> {
        Some(key)
    }
}
