//! Indexable code-point sequences.

use crate::search;

/// Element width tier of a code-point buffer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Width {
    /// Every code point is below U+0100.
    One,
    /// Every code point is below U+10000.
    Two,
    Four,
}

impl Width {
    /// Narrowest tier able to hold `ch`.
    #[inline]
    pub fn of(ch: u32) -> Self {
        if ch < 0x100 {
            Width::One
        } else if ch < 0x1_0000 {
            Width::Two
        } else {
            Width::Four
        }
    }

    pub fn bytes(self) -> usize {
        match self {
            Width::One => 1,
            Width::Two => 2,
            Width::Four => 4,
        }
    }
}

/// A sequence of code points with random access and exact search. The
/// strip engine and the splitting helpers are generic over this trait.
pub trait CodeUnits {
    fn units_len(&self) -> usize;

    /// Code point at `index`. Panics if out of bounds.
    fn code_at(&self, index: usize) -> u32;

    /// Index of the first occurrence of `ch`.
    fn find_char(&self, ch: u32) -> Option<usize>;

    fn contains_char(&self, ch: u32) -> bool {
        self.find_char(ch).is_some()
    }
}

impl CodeUnits for [u8] {
    #[inline]
    fn units_len(&self) -> usize {
        self.len()
    }
    #[inline]
    fn code_at(&self, index: usize) -> u32 {
        self[index] as u32
    }
    fn find_char(&self, ch: u32) -> Option<usize> {
        search::find_u8(self, ch)
    }
}

impl CodeUnits for [u16] {
    #[inline]
    fn units_len(&self) -> usize {
        self.len()
    }
    #[inline]
    fn code_at(&self, index: usize) -> u32 {
        self[index] as u32
    }
    fn find_char(&self, ch: u32) -> Option<usize> {
        search::find_u16(self, ch)
    }
}

impl CodeUnits for [u32] {
    #[inline]
    fn units_len(&self) -> usize {
        self.len()
    }
    #[inline]
    fn code_at(&self, index: usize) -> u32 {
        self[index]
    }
    fn find_char(&self, ch: u32) -> Option<usize> {
        search::find_u32(self, ch)
    }
}

impl CodeUnits for [char] {
    #[inline]
    fn units_len(&self) -> usize {
        self.len()
    }
    #[inline]
    fn code_at(&self, index: usize) -> u32 {
        self[index] as u32
    }
    fn find_char(&self, ch: u32) -> Option<usize> {
        search::find_char_slice(self, ch)
    }
}
