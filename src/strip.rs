//! Strip engine: trim separator characters from the ends of a sequence.
//!
//! Each candidate character first goes through the separators' bloom mask
//! and only then through an exact search of the separators, so aliased
//! mask bits never strip a non-separator.

use crate::bloom::BloomMask;
use crate::units::CodeUnits;
use crate::widestr::WideStr;
use core::ops::Range;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum StripMode {
    Left,
    Right,
    Both,
}

impl StripMode {
    #[inline]
    fn left(self) -> bool {
        matches!(self, StripMode::Left | StripMode::Both)
    }

    #[inline]
    fn right(self) -> bool {
        matches!(self, StripMode::Right | StripMode::Both)
    }
}

#[inline]
fn is_separator<P: CodeUnits + ?Sized>(mask: BloomMask, separators: &P, ch: u32) -> bool {
    mask.may_contain(ch) && separators.contains_char(ch)
}

/// Bounds of `source` after trimming `separators` per `mode`.
pub fn strip_bounds<S, P>(source: &S, mode: StripMode, separators: &P) -> Range<usize>
where
    S: CodeUnits + ?Sized,
    P: CodeUnits + ?Sized,
{
    let mask = BloomMask::from_units(separators);
    let mut start = 0;
    let mut end = source.units_len();

    if mode.left() {
        while start < end && is_separator(mask, separators, source.code_at(start)) {
            start += 1;
        }
    }
    if mode.right() {
        while end > start && is_separator(mask, separators, source.code_at(end - 1)) {
            end -= 1;
        }
    }
    start..end
}

/// `strip_bounds` for UTF-8 text; returns the trimmed sub-slice.
pub fn strip_str<'a>(text: &'a str, mode: StripMode, separators: &str) -> &'a str {
    let seps = WideStr::from(separators);
    let mask = BloomMask::from_units(&seps);
    let mut start = 0;
    let mut end = text.len();

    if mode.left() {
        start = text
            .char_indices()
            .find(|&(_, c)| !is_separator(mask, &seps, c as u32))
            .map_or(end, |(i, _)| i);
    }
    if mode.right() {
        end = text[start..]
            .char_indices()
            .rev()
            .find(|&(_, c)| !is_separator(mask, &seps, c as u32))
            .map_or(start, |(i, c)| start + i + c.len_utf8());
    }
    &text[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn both_ends_spaces() {
        let src = chars("  ab  ");
        let seps = chars(" ");
        assert_eq!(strip_bounds(&src[..], StripMode::Both, &seps[..]), 2..4);
    }

    #[test]
    fn left_only_multiple_separators() {
        let src = chars("xyxab");
        let seps = chars("xy");
        assert_eq!(strip_bounds(&src[..], StripMode::Left, &seps[..]), 3..5);
    }

    #[test]
    fn right_only_keeps_left() {
        let src = chars("..a..");
        let seps = chars(".");
        assert_eq!(strip_bounds(&src[..], StripMode::Right, &seps[..]), 0..3);
    }

    /// Invariant: the right cursor never crosses the left one.
    #[test]
    fn all_separators_collapses_to_empty() {
        let src = chars("    ");
        let seps = chars(" ");
        let r = strip_bounds(&src[..], StripMode::Both, &seps[..]);
        assert!(r.is_empty());
        assert_eq!(r.start, 4);
        let r = strip_bounds(&src[..], StripMode::Right, &seps[..]);
        assert_eq!(r, 0..0);
    }

    /// Invariant: a character sharing the separator's mask bit is kept.
    #[test]
    fn aliased_bit_is_not_stripped() {
        let alias = char::from_u32(' ' as u32 + usize::BITS).unwrap();
        let src: Vec<char> = vec![alias, 'a', alias];
        let seps = chars(" ");
        assert_eq!(strip_bounds(&src[..], StripMode::Both, &seps[..]), 0..3);
    }

    #[test]
    fn empty_separators_strip_nothing() {
        let src = chars(" a ");
        let seps: Vec<char> = Vec::new();
        assert_eq!(strip_bounds(&src[..], StripMode::Both, &seps[..]), 0..3);
    }

    #[test]
    fn strip_str_multibyte() {
        assert_eq!(strip_str("  ab  ", StripMode::Both, " "), "ab");
        assert_eq!(strip_str("xyxab", StripMode::Left, "xy"), "ab");
        assert_eq!(strip_str("ΩΩhéΩ", StripMode::Both, "Ω"), "hé");
        assert_eq!(strip_str("ΩΩ", StripMode::Right, "Ω"), "");
        assert_eq!(strip_str("ab\r\n", StripMode::Right, "\n\r"), "ab");
        assert_eq!(strip_str("", StripMode::Both, " "), "");
    }
}
