//! WideStr: immutable code-point string stored at its narrowest width.
//!
//! The buffer is always canonical: a string whose widest code point is
//! below U+0100 is stored as bytes, below U+10000 as `u16`, otherwise as
//! `u32`. Two equal strings therefore have the same width, length and raw
//! bytes, which is what makes `eq_exact` a complete equality test.

use crate::search;
use crate::strip::{strip_bounds, StripMode};
use crate::units::{CodeUnits, Width};
use core::cell::OnceCell;
use core::fmt;
use core::hash::{BuildHasher, Hash, Hasher};
use core::ops::Range;

// Fixed seeds so a string hashes the same in every set and every run.
static STR_HASHER: ahash::RandomState = ahash::RandomState::with_seeds(
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
);

#[derive(Clone)]
enum Units {
    One(Box<[u8]>),
    Two(Box<[u16]>),
    Four(Box<[u32]>),
}

#[derive(Clone)]
pub struct WideStr {
    units: Units,
    hash: OnceCell<u64>,
}

impl WideStr {
    fn from_units(units: Units) -> Self {
        Self {
            units,
            hash: OnceCell::new(),
        }
    }

    /// Build from code points. Returns `None` if any value is above
    /// U+10FFFF. Lone surrogates are accepted.
    pub fn from_code_points(points: &[u32]) -> Option<Self> {
        let mut width = Width::One;
        for &cp in points {
            if cp > char::MAX as u32 {
                return None;
            }
            width = width.max(Width::of(cp));
        }
        let units = match width {
            Width::One => Units::One(points.iter().map(|&c| c as u8).collect()),
            Width::Two => Units::Two(points.iter().map(|&c| c as u16).collect()),
            Width::Four => Units::Four(points.into()),
        };
        Some(Self::from_units(units))
    }

    pub fn from_chars(chars: &[char]) -> Self {
        let width = chars
            .iter()
            .map(|&c| Width::of(c as u32))
            .max()
            .unwrap_or(Width::One);
        let units = match width {
            Width::One => Units::One(chars.iter().map(|&c| c as u8).collect()),
            Width::Two => Units::Two(chars.iter().map(|&c| c as u16).collect()),
            Width::Four => Units::Four(chars.iter().map(|&c| c as u32).collect()),
        };
        Self::from_units(units)
    }

    pub fn width(&self) -> Width {
        match &self.units {
            Units::One(_) => Width::One,
            Units::Two(_) => Width::Two,
            Units::Four(_) => Width::Four,
        }
    }

    pub fn len(&self) -> usize {
        match &self.units {
            Units::One(u) => u.len(),
            Units::Two(u) => u.len(),
            Units::Four(u) => u.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw element bytes in native byte order.
    pub fn as_bytes(&self) -> &[u8] {
        use crate::search::WideUnit;
        match &self.units {
            Units::One(u) => &u[..],
            Units::Two(u) => u16::as_bytes(u),
            Units::Four(u) => u32::as_bytes(u),
        }
    }

    /// Width, length and byte equality. Complete because storage is
    /// canonical; runs no user code.
    #[inline]
    pub fn eq_exact(&self, other: &WideStr) -> bool {
        self.width() == other.width()
            && self.len() == other.len()
            && self.as_bytes() == other.as_bytes()
    }

    /// Hash of the string, computed once and cached.
    pub fn hash_code(&self) -> u64 {
        *self
            .hash
            .get_or_init(|| STR_HASHER.hash_one((self.width().bytes(), self.as_bytes())))
    }

    /// Sub-string over a range of code-point indices, re-narrowed.
    pub fn slice(&self, range: Range<usize>) -> WideStr {
        match &self.units {
            Units::One(u) => Self::from_units(Units::One(Box::from(&u[range]))),
            Units::Two(u) => narrow_u16(&u[range]),
            Units::Four(u) => {
                let points = &u[range];
                // Sub-slices of valid strings are valid.
                Self::from_code_points(points).unwrap_or_else(|| WideStr::from(""))
            }
        }
    }

    /// Trim separator characters from one or both ends.
    pub fn strip(&self, mode: StripMode, separators: &WideStr) -> WideStr {
        let bounds = strip_bounds(self, mode, separators);
        if bounds.start == 0 && bounds.end == self.len() {
            return self.clone();
        }
        self.slice(bounds)
    }

    /// Code points as `char`s, with lone surrogates replaced by U+FFFD.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        (0..self.len()).map(move |i| char::from_u32(self.code_at(i)).unwrap_or('\u{fffd}'))
    }
}

fn narrow_u16(units: &[u16]) -> WideStr {
    if units.iter().all(|&u| u < 0x100) {
        WideStr::from_units(Units::One(units.iter().map(|&u| u as u8).collect()))
    } else {
        WideStr::from_units(Units::Two(units.into()))
    }
}

impl CodeUnits for WideStr {
    #[inline]
    fn units_len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn code_at(&self, index: usize) -> u32 {
        match &self.units {
            Units::One(u) => u[index] as u32,
            Units::Two(u) => u[index] as u32,
            Units::Four(u) => u[index],
        }
    }

    fn find_char(&self, ch: u32) -> Option<usize> {
        match &self.units {
            Units::One(u) => search::find_u8(u, ch),
            Units::Two(u) => search::find_u16(u, ch),
            Units::Four(u) => search::find_u32(u, ch),
        }
    }
}

impl From<&str> for WideStr {
    fn from(s: &str) -> Self {
        let chars: Vec<char> = s.chars().collect();
        Self::from_chars(&chars)
    }
}

impl PartialEq for WideStr {
    fn eq(&self, other: &Self) -> bool {
        self.eq_exact(other)
    }
}

impl Eq for WideStr {}

impl Hash for WideStr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl fmt::Display for WideStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        for c in self.chars() {
            f.write_char(c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for WideStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WideStr({:?}, {:?})", self.to_string(), self.width())
    }
}
