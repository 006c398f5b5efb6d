//! End-to-end translation tests
//!
//! Each case runs the whole pipeline (tokenize, parse, render, strip) and
//! checks the exact English output, malformed queries included.

use boolq::query::fields::FieldLabels;
use boolq::{boolean_to_english, boolean_to_english_with, Translator};
use rstest::rstest;

fn coin_fields() -> FieldLabels {
    FieldLabels::from_pairs([("type", "coin type"), ("date", "date")])
}

#[rstest]
#[case::single_term("gold", r#""gold""#)]
#[case::implicit_sequence("gold silver", r#""gold" "silver""#)]
#[case::and("a AND b", r#""a" and "b""#)]
#[case::or("a OR b", r#""a" or "b""#)]
#[case::lowercase_keywords("a and b or c", r#""a" and "b" or "c""#)]
#[case::group("a AND (b OR c)", r#""a" and ("b" or "c")"#)]
#[case::leading_group("(b OR c) AND a", r#"("b" or "c") and "a""#)]
#[case::textual_strip("(b OR c) (d OR e)", r#""b" or "c") ("d" or "e""#)]
#[case::not("NOT a", r#"excluding "a""#)]
#[case::not_group("NOT (a OR b)", r#"excluding ("a" or "b")"#)]
#[case::not_runs_to_end("a AND NOT b OR c", r#""a" and excluding ("b" or "c")"#)]
#[case::not_inside_group("(NOT a) OR b", r#"excluding "a" or "b""#)]
#[case::redundant_parens("((a))", r#""a""#)]
#[case::colon_is_text("type:denarius", r#""type:denarius""#)]
#[case::punctuation_dropped("\"roman\", gold!", r#""roman" "gold""#)]
#[case::hyphen_splits("100-200", r#""100" "200""#)]
fn test_plain_translation(#[case] query: &str, #[case] expected: &str) {
    assert_eq!(boolean_to_english(query), expected);
}

#[rstest]
#[case::empty("", "")]
#[case::only_punctuation("?!,;", "")]
#[case::lone_operator("AND", "")]
#[case::dangling_operator("a AND", r#""a" and"#)]
#[case::operators_only("AND OR", "and or")]
#[case::lone_not("NOT", "excluding ")]
#[case::empty_group("()", "")]
#[case::empty_group_between_terms("a () b", r#""a"  "b""#)]
#[case::unclosed_group("a AND (b OR c", r#""a" and ("b" or "c")"#)]
#[case::stray_close_paren("a ) b", r#""a""#)]
#[case::extra_close_paren("(a OR b)) AND c", r#""a" or "b""#)]
fn test_malformed_translation(#[case] query: &str, #[case] expected: &str) {
    assert_eq!(boolean_to_english(query), expected);
}

#[rstest]
#[case::labelled_fields(
    "type:denarius AND date:100-200",
    r#"coin type "denarius" and date "100-200""#
)]
#[case::unknown_field("mint:rome", r#"mint "rome""#)]
#[case::bare_term_among_fields("type:aureus gold", r#"coin type "aureus" "gold""#)]
#[case::first_colon_splits("type:a:b", r#"coin type "a:b""#)]
#[case::empty_field(":rome", r#""rome""#)]
#[case::empty_value("type: gold", r#" "gold""#)]
#[case::negated_field("NOT type:follis", r#"excluding coin type "follis""#)]
#[case::group_of_fields(
    "(type:denarius OR type:aureus) date:100-200",
    r#"(coin type "denarius" or coin type "aureus") date "100-200""#
)]
fn test_fielded_translation(#[case] query: &str, #[case] expected: &str) {
    assert_eq!(boolean_to_english_with(query, &coin_fields()), expected);
}

#[test]
fn test_translator_matches_free_functions() {
    let query = "type:denarius AND NOT (date:100-200 OR silver)";
    assert_eq!(Translator::plain().translate(query), boolean_to_english(query));
    assert_eq!(
        Translator::fielded(coin_fields()).translate(query),
        boolean_to_english_with(query, &coin_fields())
    );
}

#[test]
fn test_builtin_fields() {
    let translator = Translator::fielded(FieldLabels::builtin().unwrap());
    assert_eq!(
        translator.translate("type:denarius AND date:100-200"),
        r#"coin type "denarius" and date "100-200""#
    );
}

#[test]
fn test_deeply_nested_queries() {
    let depth = 100_000;

    let groups = format!("{}a", "(".repeat(depth));
    assert_eq!(boolean_to_english(&groups), r#""a""#);

    let negations = format!("{}a", "NOT ".repeat(depth));
    assert_eq!(
        boolean_to_english(&negations),
        format!("{}\"a\"", "excluding ".repeat(depth))
    );

    let fielded = format!("{}type:aureus", "(NOT ".repeat(depth));
    assert_eq!(
        boolean_to_english_with(&fielded, &coin_fields()),
        format!("{}coin type \"aureus\"", "excluding ".repeat(depth))
    );
}
