//! Property-based tests for naming helpers
//!
//! Prefix stripping must be idempotent and case-insensitive, and event names
//! must come out as lowercase, underscore-delimited identifiers.

use apiwrap_core::naming::{camel_to_snake, compute_event_name, strip_leading_prefix};
use proptest::prelude::*;

// Strategy: CamelCase words such as "Registration", "State"
fn arb_words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-Z][a-z]{1,6}", 1..5)
}

// Strategy: library prefixes in arbitrary case
fn arb_prefix() -> impl Strategy<Value = String> {
    "[a-zA-Z]{1,8}"
}

proptest! {
    /// Property: applying strip_leading_prefix twice equals applying it once
    #[test]
    fn proptest_strip_leading_prefix_idempotent(s in ".{0,40}", prefix in arb_prefix()) {
        let once = strip_leading_prefix(&s, &prefix);
        let twice = strip_leading_prefix(once, &prefix);

        prop_assert_eq!(once, twice);
    }

    /// Property: the result never starts with the prefix, in any case
    #[test]
    fn proptest_strip_leading_prefix_removes_all_leading_copies(
        prefix in arb_prefix(),
        copies in 0usize..4,
        rest in "[0-9_]{0,10}"
    ) {
        let input = format!("{}{}", prefix.to_uppercase().repeat(copies), rest);

        let stripped = strip_leading_prefix(&input, &prefix);

        prop_assert_eq!(stripped, rest.as_str());
    }

    /// Property: strings not starting with the prefix are returned unchanged
    #[test]
    fn proptest_strip_leading_prefix_leaves_unmatched_input(s in "[0-9][a-z]{0,20}") {
        prop_assert_eq!(strip_leading_prefix(&s, "linphone"), s.as_str());
    }

    /// Property: event names are the affix-free words, lowercased and joined by '_'
    #[test]
    fn proptest_compute_event_name_shape(words in arb_words()) {
        let native = format!("LinphoneCore{}Cb", words.concat());

        let name = compute_event_name(&native, "linphone");

        let expected = words
            .iter()
            .map(|w| w.to_lowercase())
            .collect::<Vec<_>>()
            .join("_");
        prop_assert_eq!(name, expected);
    }

    /// Property: camel_to_snake inserts one underscore per non-leading uppercase letter
    #[test]
    fn proptest_camel_to_snake_underscore_count(s in "[a-zA-Z]{1,30}") {
        let snake = camel_to_snake(&s);

        let uppercase_after_first = s.chars().skip(1).filter(|c| c.is_ascii_uppercase()).count();
        prop_assert_eq!(snake.matches('_').count(), uppercase_after_first);
        prop_assert!(!snake.chars().any(|c| c.is_ascii_uppercase()));
        prop_assert_eq!(snake.len(), s.len() + uppercase_after_first);
    }
}
