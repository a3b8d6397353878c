//! probe-strip: open-addressed set lookup that tolerates re-entrant
//! mutation, and bloom-filtered string stripping.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the two hot algorithms (set membership probe and
//!   character strip) as plain, generic components, independent of any
//!   host object layout.
//! - Layers:
//!   - RawTable<K>: structural table. Power-of-two slot array holding a
//!     generational key and the cached hash; never calls user code.
//!   - ProbeSet<K, O>: public set. Hashes and compares through
//!     `O: KeyOps<K>`, which may fail and may mutate the set.
//!   - Strip engine: `strip_bounds` over any `CodeUnits` sequence, with a
//!     word-sized bloom mask in front of an exact search.
//!   - Splitting: quote-aware `split`/`split_once`/`Cursor` built on the
//!     strip engine and exact search.
//!
//! Probe sequence
//! - Start at `hash & mask`, scan up to `LINEAR_PROBES` extra slots when
//!   the cluster fits before the table end, then jump to
//!   `(i * 5 + 1 + perturb) & mask` with `perturb >>= 5`.
//! - Empty slot ends the probe; dummies (tombstones) are skipped.
//! - Candidates with equal cached hash are tested by identity, then by
//!   exact string equality when both keys are `WideStr`s, then by the
//!   user equality callback.
//!
//! Re-entrancy policy
//! - Every `ProbeSet` method takes `&self`. The table lives in a `RefCell`
//!   but no borrow is held while user code runs.
//! - A `MutationVersion` moves on every insert, removal, clear and rebuild.
//!   A probe snapshots it before each equality callback; if it moved, the
//!   probe restarts from scratch rather than trusting a stale slot.
//! - Callback errors abort the operation and are returned as
//!   `LookupError`; they are never turned into "not found".
//!
//! Width tiers
//! - `WideStr` stores text at 1, 2 or 4 bytes per code point, always the
//!   narrowest that fits, so equal strings have equal bytes.
//! - Exact search on long buffers uses `memchr`, over raw bytes with
//!   element-boundary confirmation for the wider tiers.
//!
//! Constraints
//! - Single-threaded: `!Send`/`!Sync` (keys are `Rc`).
//! - Rebuilding reuses cached hashes; `KeyOps::hash` is called once per
//!   operation on the probed key only.

mod bloom;
mod config;
mod error;
mod ops;
mod probe;
mod probe_set_proptest;
mod search;
mod set;
mod split;
mod strip;
mod table;
mod units;
mod version;
mod widestr;

// Public surface
pub use bloom::BloomMask;
pub use config::{SetConfig, MIN_SIZE};
pub use error::{ConfigError, LookupError};
pub use ops::{HashEq, KeyOps, WideStrOps};
pub use probe::{ProbeSeq, LINEAR_PROBES, PERTURB_SHIFT};
pub use search::{find_char_slice, find_u16, find_u32, find_u8, MEMCHR_CUT_OFF};
pub use set::{Keys, ProbeSet};
pub use split::{split, split_once, split_once_raw, Cursor};
pub use strip::{strip_bounds, strip_str, StripMode};
pub use units::{CodeUnits, Width};
pub use version::{MutationVersion, Snapshot};
pub use widestr::WideStr;
