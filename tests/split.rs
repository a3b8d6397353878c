// Splitting through the public API: the one-shot, whole-text and
// incremental forms must agree on plain (unquoted) text.
use probe_strip::{split, split_once, split_once_raw, Cursor};
use proptest::prelude::*;

fn cursor_tokens(text: &str, separator: &str) -> Vec<String> {
    let mut cursor = Cursor::new(text);
    let mut out = Vec::new();
    while !cursor.is_complete() {
        cursor.step(separator, true);
        out.push(cursor.value());
        cursor.apply();
    }
    out
}

#[test]
fn cursor_tracks_edges() {
    let mut c = Cursor::new("a bb  ccc");
    c.step(" ", true);
    assert_eq!((c.left(), c.right(), c.next_index()), (0, 1, 2));
    c.apply();
    c.step(" ", true);
    assert_eq!((c.left(), c.right(), c.next_index()), (2, 4, 6));
    assert_eq!(c.value(), "bb");
    c.apply();
    c.step(" ", true);
    assert_eq!(c.value(), "ccc");
    c.apply();
    assert!(c.is_complete());
}

#[test]
fn line_breaks_follow_crlf_flag() {
    assert_eq!(split("a\r\nb", " ", true), ["a", "b"]);
    assert_eq!(split("a\r\nb", " ", false), ["a\r\nb"]);
    assert_eq!(split_once_raw("a\nb c", " ", false), ("a\nb".to_string(), "c".to_string()));
}

#[test]
fn non_ascii_separators() {
    assert_eq!(split("α·β··γ", "·", true), ["α", "β", "γ"]);
    let (head, rest) = split_once("α·β··γ", "·", true);
    assert_eq!(head, "α");
    assert_eq!(rest, "β··γ");
    assert_eq!(cursor_tokens("α·β", "·"), ["α", "β"]);
}

#[test]
fn quoted_separators_survive() {
    assert_eq!(split("x 'a b' \"c d\"", " ", true), ["x", "a b", "c d"]);
    assert_eq!(cursor_tokens("x 'a b'", " "), ["x", "'a b'"]);
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    // Property: on unquoted text, every splitter yields the same tokens.
    #[test]
    fn prop_splitters_agree(
        tokens in proptest::collection::vec("[a-z]{1,4}", 1..6),
        gaps in proptest::collection::vec(1usize..4, 5),
    ) {
        let mut text = String::new();
        for (i, t) in tokens.iter().enumerate() {
            if i > 0 {
                text.push_str(&" ".repeat(gaps[i - 1]));
            }
            text.push_str(t);
        }

        prop_assert_eq!(&split(&text, " ", true), &tokens);
        prop_assert_eq!(&cursor_tokens(&text, " "), &tokens);

        let (head, rest) = split_once(&text, " ", true);
        prop_assert_eq!(&head, &tokens[0]);
        prop_assert_eq!(split(&rest, " ", true), tokens[1..].to_vec());
        prop_assert_eq!(split_once_raw(&text, " ", true).0, head);
    }
}
