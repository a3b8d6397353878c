//! Word-sized bloom mask over a set of characters.
//!
//! Bit `ch & (usize::BITS - 1)` is set for every added character. A clear
//! bit proves absence; a set bit only means "maybe", so callers confirm
//! with an exact search.

use crate::units::CodeUnits;

const BLOOM_BITS: u32 = usize::BITS;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct BloomMask(usize);

impl BloomMask {
    pub const fn empty() -> Self {
        BloomMask(0)
    }

    /// Fold every code point of `chars` into a mask, in one pass.
    pub fn from_units<S: CodeUnits + ?Sized>(chars: &S) -> Self {
        (0..chars.units_len()).map(|i| chars.code_at(i)).collect()
    }

    #[inline]
    pub fn add(&mut self, ch: u32) {
        self.0 |= 1usize << (ch & (BLOOM_BITS - 1));
    }

    /// False means `ch` was never added.
    #[inline]
    pub fn may_contain(&self, ch: u32) -> bool {
        self.0 & (1usize << (ch & (BLOOM_BITS - 1))) != 0
    }

    pub fn bits(&self) -> usize {
        self.0
    }
}

impl FromIterator<u32> for BloomMask {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut mask = BloomMask::empty();
        for ch in iter {
            mask.add(ch);
        }
        mask
    }
}
