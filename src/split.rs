//! Quote-aware splitting on top of the strip and search engine.
//!
//! Separators are given as a string of characters; `\n` and `\r` are added
//! unless `crlf` is false. Text between matching `'` or `"` quotes is kept
//! together. A backslash right before a quote makes that quote literal and
//! is removed; any other backslash is kept as is.

use crate::strip::{strip_bounds, StripMode};
use crate::units::CodeUnits;
use crate::widestr::WideStr;

const CRLF: &str = "\n\r";

fn separator_set(separator: &str, crlf: bool) -> WideStr {
    if crlf {
        let mut all = String::with_capacity(separator.len() + CRLF.len());
        all.push_str(separator);
        all.push_str(CRLF);
        WideStr::from(all.as_str())
    } else {
        WideStr::from(separator)
    }
}

#[inline]
fn is_sep(seps: &WideStr, ch: char) -> bool {
    seps.contains_char(ch as u32)
}

#[inline]
fn is_quote(ch: char) -> bool {
    matches!(ch, '\'' | '"')
}

/// True if the character two positions before the 1-based `index` is a
/// separator, i.e. the character preceding the current one.
#[inline]
fn follows_sep(text: &[char], index: usize, seps: &WideStr) -> bool {
    index >= 2 && is_sep(seps, text[index - 2])
}

// Unicode whitespace plus the ASCII information separators.
fn is_space(ch: char) -> bool {
    ch.is_whitespace() || ('\x1c'..='\x1f').contains(&ch)
}

fn trim_start_space(chars: &[char]) -> &[char] {
    let start = chars.iter().position(|&c| !is_space(c)).unwrap_or(chars.len());
    &chars[start..]
}

fn string_of(chars: &[char]) -> String {
    chars.iter().collect()
}

/// Split off the first token, resolving quotes and escapes in it.
///
/// Leading whitespace is ignored. The remainder starts after the run of
/// separators that ended the token. If a quote is left open, the token
/// ends at the first separator seen inside it.
///
/// ```
/// use probe_strip::split_once;
/// let (head, rest) = split_once("'rrr b' bbbb", " ", true);
/// assert_eq!(head, "rrr b");
/// assert_eq!(rest, "bbbb");
/// ```
pub fn split_once(text: &str, separator: &str, crlf: bool) -> (String, String) {
    let seps = separator_set(separator, crlf);
    let chars: Vec<char> = text.chars().collect();
    let text = trim_start_space(&chars);

    let mut index = 0usize;
    let mut out = String::new();
    let mut quotation: Option<char> = None;
    let mut escape = false;
    let mut sep = false;
    let mut first_quoted_sep: Option<usize> = None;
    let mut last_quote = 0usize;

    for &ch in text {
        index += 1;
        if is_sep(&seps, ch) {
            if quotation.is_none() {
                sep = true;
                continue;
            }
            if first_quoted_sep.is_none() {
                first_quoted_sep = Some(index);
            }
        }
        if sep {
            index -= 1;
            break;
        }
        if is_quote(ch) {
            if index == 1 + escape as usize + last_quote && quotation.is_none() {
                quotation = Some(ch);
            } else if !follows_sep(text, index, &seps) && quotation == Some(ch) {
                last_quote = index;
                quotation = None;
                first_quoted_sep = None;
            } else {
                out.push(ch);
            }
            if escape {
                out.pop();
                out.push(ch);
            }
        } else {
            out.push(ch);
        }
        escape = ch == '\\';
    }

    if index == text.len() {
        return match first_quoted_sep {
            None if last_quote > 0 => (out, String::new()),
            None => (
                string_of(&text[strip_bounds(text, StripMode::Right, &seps)]),
                String::new(),
            ),
            Some(i) => (string_of(&text[..i - 1]), string_of(&text[i..])),
        };
    }
    (out, string_of(&text[index..]))
}

/// Like `split_once`, but without escape handling: both halves are raw
/// slices of the input, quotes included.
pub fn split_once_raw(text: &str, separator: &str, crlf: bool) -> (String, String) {
    let seps = separator_set(separator, crlf);
    let chars: Vec<char> = text.chars().collect();
    let text = trim_start_space(&chars);

    let mut index = 0usize;
    let mut quotation: Option<char> = None;
    let mut first_quoted_sep: Option<usize> = None;
    let mut last_quote = 0usize;

    for &ch in text {
        index += 1;
        if is_sep(&seps, ch) {
            if quotation.is_none() {
                break;
            }
            if first_quoted_sep.is_none() {
                first_quoted_sep = Some(index);
            }
        }
        if is_quote(ch) {
            if index == 1 + last_quote && quotation.is_none() {
                quotation = Some(ch);
            } else if !follows_sep(text, index, &seps) && quotation == Some(ch) {
                last_quote = index;
                quotation = None;
                first_quoted_sep = None;
            }
        }
    }

    if index == text.len() {
        return match first_quoted_sep {
            None if last_quote > 0 => (string_of(&text[..last_quote]), String::new()),
            None => (
                string_of(&text[strip_bounds(text, StripMode::Right, &seps)]),
                String::new(),
            ),
            Some(i) => (string_of(&text[..i - 1]), string_of(&text[i..])),
        };
    }
    (string_of(&text[..index - 1]), string_of(&text[index..]))
}

/// Split the whole text on unquoted separator runs, resolving quotes and
/// escapes. Separators at both ends are stripped first.
///
/// An unterminated quote does not fail: the opening quote is dropped and
/// the rest of the text is split as usual.
pub fn split(text: &str, separator: &str, crlf: bool) -> Vec<String> {
    let seps = separator_set(separator, crlf);
    let all: Vec<char> = text.chars().collect();
    let text = &all[strip_bounds(&all[..], StripMode::Both, &seps)];

    // '\0' marks token boundaries in `result`.
    let mut result: Vec<char> = Vec::with_capacity(text.len());
    let mut quotation: Option<char> = None;
    let mut escape = false;
    let mut quoted_seps: Vec<usize> = Vec::new();
    let mut last_sep = 0usize;
    let mut last_quote = 0usize;
    let mut index = 0usize;

    for &ch in text {
        index += 1;
        if is_quote(ch) {
            if index == 1 + escape as usize + last_sep.max(last_quote) && quotation.is_none() {
                quotation = Some(ch);
            } else if result.last().map_or(true, |&c| !is_sep(&seps, c)) && quotation == Some(ch) {
                quotation = None;
                last_quote = index;
            } else {
                result.push(ch);
            }
            if escape {
                if let Some(last) = result.last_mut() {
                    *last = ch;
                }
            }
        } else if is_sep(&seps, ch) {
            if quotation.is_some() {
                quoted_seps.push(result.len() + 1);
                result.push(ch);
            } else {
                last_sep = index;
                if result.last().is_some_and(|&c| c != '\0') {
                    result.push('\0');
                }
            }
        } else {
            result.push(ch);
        }
        escape = ch == '\\';
    }

    if result.is_empty() {
        return Vec::new();
    }
    if quotation.is_some() && !quoted_seps.is_empty() {
        // Re-split the unterminated quoted run on its separators.
        let from = if last_quote > 0 { last_quote } else { last_sep };
        if let Some(&c) = text.get(from) {
            result.insert(last_sep.min(result.len()), c);
        }
        for i in quoted_seps {
            if let Some(slot) = result.get_mut(i) {
                *slot = '\0';
            }
        }
    }
    string_of(&result)
        .split('\0')
        .map(str::to_owned)
        .collect()
}

/// Index-only scan for the token starting at `offset`. Returns the index
/// the next token starts at and how many separators precede it.
fn scan_token(text: &[char], seps: &WideStr, offset: usize) -> (usize, usize) {
    let mut index = offset;
    let mut quotation: Option<char> = None;
    let mut sep = 0usize;
    let mut first_quoted_sep: Option<usize> = None;
    let mut last_quote = offset;

    for &ch in &text[offset..] {
        index += 1;
        if is_sep(seps, ch) {
            if quotation.is_none() {
                sep += 1;
                continue;
            }
            if first_quoted_sep.is_none() {
                first_quoted_sep = Some(index);
            }
        }
        if sep > 0 {
            index -= 1;
            break;
        }
        if is_quote(ch) {
            if index == 1 + last_quote && quotation.is_none() {
                quotation = Some(ch);
            } else if !follows_sep(text, index, seps) && quotation == Some(ch) {
                last_quote = index;
                quotation = None;
                first_quoted_sep = None;
            }
        }
    }

    match first_quoted_sep {
        Some(i) if index == text.len() => (i, 1),
        _ => (index, sep),
    }
}

/// Incremental tokenizer over a text.
///
/// `step` locates the next token from the current left edge without
/// consuming it; `value` returns it with quotes kept; `apply` moves the
/// left edge past it.
#[derive(Clone, Debug)]
pub struct Cursor {
    chars: Vec<char>,
    left: usize,
    right: usize,
    next: usize,
}

impl Cursor {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            left: 0,
            right: 0,
            next: 0,
        }
    }

    pub fn step(&mut self, separator: &str, crlf: bool) {
        let seps = separator_set(separator, crlf);
        let (next, sep) = scan_token(&self.chars, &seps, self.left);
        self.next = next;
        self.right = next.saturating_sub(sep).max(self.left);
    }

    pub fn value(&self) -> String {
        string_of(&self.chars[self.left..self.right])
    }

    pub fn apply(&mut self) {
        self.left = self.next;
        self.right = self.chars.len();
    }

    pub fn is_complete(&self) -> bool {
        self.left == self.chars.len()
    }

    pub fn left(&self) -> usize {
        self.left
    }

    pub fn right(&self) -> usize {
        self.right
    }

    pub fn next_index(&self) -> usize {
        self.next
    }
}
