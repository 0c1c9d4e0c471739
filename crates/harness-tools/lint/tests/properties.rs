//! Property tests for the tool-name contract.

use mcplint::{ALLOWED_VERBS, MAX_TOOL_NAME_LEN, ToolNameError, validate_tool_name, validate_tools};
use proptest::prelude::*;

fn verb() -> impl Strategy<Value = String> {
    proptest::sample::select(ALLOWED_VERBS).prop_map(str::to_string)
}

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,8}"
}

/// Names that satisfy every rule: `verb[_seg]*` or `module_verb[_seg]*`.
fn valid_name() -> impl Strategy<Value = String> {
    let verb_first = (verb(), proptest::collection::vec(segment(), 0..4))
        .prop_map(|(v, rest)| std::iter::once(v).chain(rest).collect::<Vec<_>>().join("_"));
    let module_prefixed = (segment(), verb(), proptest::collection::vec(segment(), 0..4))
        .prop_map(|(m, v, rest)| {
            [m, v]
                .into_iter()
                .chain(rest)
                .collect::<Vec<_>>()
                .join("_")
        });
    prop_oneof![verb_first, module_prefixed]
        .prop_filter("within length limit", |n| n.len() <= MAX_TOOL_NAME_LEN)
}

proptest! {
    #[test]
    fn valid_names_pass(name in valid_name()) {
        prop_assert_eq!(validate_tool_name(&name), Ok(()));
    }

    #[test]
    fn uppercase_is_reported_as_snake_case_violation(name in valid_name(), idx in 0usize..64) {
        let i = idx % name.len();
        let mut chars: Vec<char> = name.chars().collect();
        prop_assume!(chars[i].is_ascii_lowercase());
        chars[i] = chars[i].to_ascii_uppercase();
        let bad: String = chars.into_iter().collect();
        let is_snake_case_error = matches!(
            validate_tool_name(&bad),
            Err(ToolNameError::NotSnakeCase { .. })
        );
        prop_assert!(is_snake_case_error);
    }

    #[test]
    fn overlong_names_are_reported_as_too_long(extra in 1usize..40) {
        let name = format!("get_{}", "x".repeat(MAX_TOOL_NAME_LEN - 4 + extra));
        let err = validate_tool_name(&name).unwrap_err();
        let is_too_long = matches!(err, ToolNameError::TooLong { .. });
        prop_assert!(is_too_long);
        prop_assert!(err.to_string().contains(&(MAX_TOOL_NAME_LEN + extra).to_string()));
    }

    #[test]
    fn non_verb_names_are_reported_as_missing_verb(a in "[q-z]{3,6}", b in "[q-z]{3,6}") {
        // letters q..z cannot spell any allowed verb of length >= 3 in both segments
        prop_assume!(!ALLOWED_VERBS.contains(&a.as_str()) && !ALLOWED_VERBS.contains(&b.as_str()));
        let name = format!("{a}_{b}");
        let is_missing_verb = matches!(
            validate_tool_name(&name),
            Err(ToolNameError::MissingVerb { .. })
        );
        prop_assert!(is_missing_verb);
    }

    #[test]
    fn error_count_matches_invalid_count(
        valid in proptest::collection::vec(valid_name(), 0..8),
        invalid in proptest::collection::vec("[A-Z][a-zA-Z]{0,10}", 0..8),
        seed in any::<u64>(),
    ) {
        let mut all: Vec<String> = valid.iter().chain(invalid.iter()).cloned().collect();
        // deterministic shuffle so ordering does not matter
        let n = all.len();
        if n > 1 {
            let mut s = seed;
            for i in (1..n).rev() {
                s = s.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
                let j = (s % (i as u64 + 1)) as usize;
                all.swap(i, j);
            }
        }
        prop_assert_eq!(validate_tools(&all).len(), invalid.len());
    }
}
