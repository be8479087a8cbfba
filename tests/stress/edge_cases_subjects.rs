//! Edge cases for subject containment and token classification.

use import_trust::{subject_covers, Subject, TokenRef};

#[test]
fn edge_empty_subjects() {
    assert!(!subject_covers("", "orders"));
    assert!(!subject_covers("orders", ""));
    assert!(!subject_covers(">", ""));
    assert!(Subject::new("").is_empty());
}

#[test]
fn edge_full_wildcard_needs_a_token() {
    assert!(subject_covers(">", "a"));
    assert!(subject_covers(">", "a.b.c.d.e"));
    assert!(subject_covers("a.>", "a.b"));
    assert!(!subject_covers("a.>", "a"));
    assert!(subject_covers("a.>", "a.*"));
    assert!(subject_covers("a.>", "a.>"));
}

#[test]
fn edge_single_wildcard_matches_exactly_one_token() {
    assert!(subject_covers("*", "a"));
    assert!(!subject_covers("*", "a.b"));
    assert!(subject_covers("a.*.c", "a.b.c"));
    assert!(subject_covers("a.*.c", "a.*.c"));
    assert!(!subject_covers("a.*.c", "a.>"));
    assert!(!subject_covers("a.*", "a.>"));
    assert!(subject_covers("*.*", "*.b"));
}

#[test]
fn edge_literal_grant_never_covers_wildcard_request() {
    assert!(!subject_covers("a.b", "a.*"));
    assert!(!subject_covers("a.b", "a.>"));
    assert!(!subject_covers("a", ">"));
    assert!(subject_covers("a.b", "a.b"));
}

#[test]
fn edge_suffix_is_not_containment() {
    assert!(!subject_covers("two", "one.two"));
    assert!(!subject_covers("one.two", "two"));
    assert!(!subject_covers("a.b", "a.b.c"));
    assert!(!subject_covers("a.b.c", "a.b"));
}

#[test]
fn edge_tokens_are_compared_whole() {
    assert!(!subject_covers("ord", "orders"));
    assert!(!subject_covers("orders*", "orders1"));
    assert!(!subject_covers("a.b>", "a.bc"));
}

#[test]
fn edge_containment_is_transitive_for_chains() {
    let chain = [">", "a.>", "a.*.>", "a.*.c", "a.b.c"];
    for (i, wide) in chain.iter().enumerate() {
        for narrow in &chain[i..] {
            assert!(
                subject_covers(wide, narrow),
                "{wide} should cover {narrow}"
            );
        }
    }
}

#[test]
fn edge_token_references() {
    assert_eq!(TokenRef::parse("   "), TokenRef::Empty);
    assert!(matches!(TokenRef::parse("aaa.bbb.ccc"), TokenRef::Inline(_)));
    assert!(matches!(
        TokenRef::parse(" https://tokens.example.com/a.jwt "),
        TokenRef::Remote(_)
    ));
    assert!(matches!(TokenRef::parse("file:///tmp/a"), TokenRef::Malformed(_)));
    assert!(matches!(TokenRef::parse("http://"), TokenRef::Malformed(_)));
}
