//! Property-based tests for type rule resolution
//!
//! Resolution is a pure function of its inputs, known enums always win, and
//! anything unknown falls back to the opaque-object rule.

use apiwrap_core::type_rule::{SemanticKind, TypeRule, resolve};
use proptest::prelude::*;
use std::collections::BTreeSet;

const SCALAR_TOKENS: &[&str] = &[
    "char", "int", "int8_t", "int16_t", "int32_t", "uint8_t", "uint16_t", "uint32_t", "int64_t",
    "uint64_t", "size_t", "float", "double", "bool_t",
];

// Strategy: a scalar token from the fixed table
fn arb_scalar() -> impl Strategy<Value = &'static str> {
    prop::sample::select(SCALAR_TOKENS)
}

// Strategy: complete type spellings with optional qualifiers
fn arb_complete(basic: &'static str) -> impl Strategy<Value = String> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(move |(konst, unsigned, pointer)| {
        let mut spelling = String::new();
        if konst {
            spelling.push_str("const ");
        }
        if unsigned {
            spelling.push_str("unsigned ");
        }
        spelling.push_str(basic);
        if pointer {
            spelling.push_str(" *");
        }
        spelling
    })
}

// Strategy: enum name sets in canonical (prefix-free) form
fn arb_enum_names() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set("[A-Z][a-zA-Z]{2,12}", 0..6)
}

proptest! {
    /// Property: resolving the same triple twice yields the same rule
    #[test]
    fn proptest_resolve_is_deterministic(
        (basic, complete) in arb_scalar().prop_flat_map(|b| (Just(b), arb_complete(b))),
        enums in arb_enum_names()
    ) {
        let first = resolve(basic, &complete, &enums, "linphone");
        let second = resolve(basic, &complete, &enums, "linphone");

        prop_assert_eq!(first, second);
    }

    /// Property: scalar tokens never resolve to the opaque rule
    #[test]
    fn proptest_scalar_tokens_are_never_opaque(
        (basic, complete) in arb_scalar().prop_flat_map(|b| (Just(b), arb_complete(b)))
    ) {
        let rule = resolve(basic, &complete, &BTreeSet::new(), "linphone");

        prop_assert!(!rule.is_opaque());
        prop_assert!(rule.check.is_some());
        prop_assert!(rule.converter.is_some());
    }

    /// Property: a known enum wins, even when it shadows a scalar token
    #[test]
    fn proptest_enum_name_always_wins(
        name in prop_oneof!["[A-Z][a-zA-Z]{2,12}".prop_map(String::from), arb_scalar().prop_map(String::from)],
        prefixed in any::<bool>()
    ) {
        prop_assume!(!name.to_ascii_lowercase().starts_with("linphone"));
        let enums: BTreeSet<String> = [name.clone()].into_iter().collect();
        let basic = if prefixed { format!("Linphone{name}") } else { name.clone() };

        let rule = resolve(&basic, &basic, &enums, "linphone");

        prop_assert_eq!(rule, TypeRule::ENUM);
        prop_assert_eq!(rule.kind, SemanticKind::EnumAsInt);
    }

    /// Property: unknown non-scalar tokens fall back to the opaque rule
    #[test]
    fn proptest_unknown_token_is_opaque(name in "Linphone[A-Z][a-z]{2,10}", enums in arb_enum_names()) {
        prop_assume!(!enums.contains(name.trim_start_matches("Linphone")));

        let rule = resolve(&name, &format!("{name} *"), &enums, "linphone");

        prop_assert_eq!(rule, TypeRule::OPAQUE);
    }

    /// Property: a char pointer is always a string, with or without qualifiers
    #[test]
    fn proptest_char_pointer_is_string(konst in any::<bool>(), unsigned in any::<bool>()) {
        let complete = format!(
            "{}{}char *",
            if konst { "const " } else { "" },
            if unsigned { "unsigned " } else { "" }
        );

        prop_assert_eq!(resolve("char", &complete, &BTreeSet::new(), "linphone"), TypeRule::STRING);
    }
}
