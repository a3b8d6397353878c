//! Exact single-character search, specialised by element width.
//!
//! Short haystacks are scanned linearly. Longer 1-byte haystacks go to
//! `memchr`. Longer 2- and 4-byte haystacks run `memchr` over their raw
//! bytes looking for the low byte of the target, round every hit down to
//! the element containing it and confirm the whole element, so a byte of
//! some other code point can never produce a match.

use core::mem::size_of;

/// Haystacks up to this many elements are scanned linearly.
pub const MEMCHR_CUT_OFF: usize = 15;

/// Fixed-width element of a code-point buffer wider than one byte.
pub(crate) trait WideUnit: Copy + Eq {
    fn low_byte(self) -> u8;
    fn as_bytes(units: &[Self]) -> &[u8];
}

impl WideUnit for u16 {
    #[inline]
    fn low_byte(self) -> u8 {
        (self & 0xff) as u8
    }

    #[inline]
    fn as_bytes(units: &[Self]) -> &[u8] {
        // SAFETY: u16 has no padding and every byte pattern is a valid u8;
        // the byte slice covers exactly the same allocation.
        unsafe {
            core::slice::from_raw_parts(units.as_ptr().cast::<u8>(), units.len() * size_of::<u16>())
        }
    }
}

impl WideUnit for u32 {
    #[inline]
    fn low_byte(self) -> u8 {
        (self & 0xff) as u8
    }

    #[inline]
    fn as_bytes(units: &[Self]) -> &[u8] {
        // SAFETY: as for u16.
        unsafe {
            core::slice::from_raw_parts(units.as_ptr().cast::<u8>(), units.len() * size_of::<u32>())
        }
    }
}

#[inline]
fn find_linear<T: Copy + Eq>(hay: &[T], target: T) -> Option<usize> {
    hay.iter().position(|&u| u == target)
}

fn find_wide_bytes<T: WideUnit>(hay: &[T], target: T) -> Option<usize> {
    let width = size_of::<T>();
    let bytes = T::as_bytes(hay);
    let needle = target.low_byte();
    let mut pos = 0;
    while pos < bytes.len() {
        let hit = pos + memchr::memchr(needle, &bytes[pos..])?;
        let idx = hit / width;
        if hay[idx] == target {
            return Some(idx);
        }
        pos = (idx + 1) * width;
    }
    None
}

/// Index of the first `ch` in a 1-byte buffer.
pub fn find_u8(hay: &[u8], ch: u32) -> Option<usize> {
    let target = u8::try_from(ch).ok()?;
    if hay.len() > MEMCHR_CUT_OFF {
        memchr::memchr(target, hay)
    } else {
        find_linear(hay, target)
    }
}

/// Index of the first `ch` in a 2-byte buffer.
pub fn find_u16(hay: &[u16], ch: u32) -> Option<usize> {
    let target = u16::try_from(ch).ok()?;
    if hay.len() > MEMCHR_CUT_OFF && target.low_byte() != 0 {
        find_wide_bytes(hay, target)
    } else {
        find_linear(hay, target)
    }
}

/// Index of the first `ch` in a 4-byte buffer.
pub fn find_u32(hay: &[u32], ch: u32) -> Option<usize> {
    if hay.len() > MEMCHR_CUT_OFF && ch.low_byte() != 0 {
        find_wide_bytes(hay, ch)
    } else {
        find_linear(hay, ch)
    }
}

/// Index of the first `ch` in a `char` buffer, searched as 4-byte units.
pub fn find_char_slice(hay: &[char], ch: u32) -> Option<usize> {
    // SAFETY: `char` has the size and alignment of `u32` and every `char`
    // is a valid `u32`.
    let units = unsafe { core::slice::from_raw_parts(hay.as_ptr().cast::<u32>(), hay.len()) };
    find_u32(units, ch)
}
