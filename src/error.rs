//! Error types.
//!
//! Only user callbacks can fail: hashing a key and comparing two keys.
//! Both abort the operation immediately and surface the callback's own
//! error. Configuration validation is the only other failure.

use thiserror::Error;

/// Failure of a set operation, carrying the `KeyOps::Error` raised by the
/// hash or equality callback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError<E> {
    /// The hash callback failed for the probed key. Never retried.
    #[error("hashing the key failed: {0}")]
    Hash(#[source] E),

    /// The equality callback failed while comparing a candidate slot.
    #[error("comparing keys failed: {0}")]
    Compare(#[source] E),
}

impl<E> LookupError<E> {
    /// The callback error, regardless of which callback raised it.
    pub fn into_inner(self) -> E {
        match self {
            LookupError::Hash(e) | LookupError::Compare(e) => e,
        }
    }
}

/// Invalid `SetConfig`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("initial size must be a power of two >= {min}, got {size}")]
    InitialSize { size: usize, min: usize },

    #[error("linear probe window must be in 1..{size}, got {probes}")]
    LinearProbes { probes: usize, size: usize },
}
