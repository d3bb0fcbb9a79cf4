//! Property tests for the case-conversion registry
//!
//! Converters must stabilize under repeated application and never emit
//! characters outside their own alphabet, for arbitrary messy input.

use proptest::prelude::*;
use stencil_case::{
    to_camel_case, to_dot_case, to_kebab_case, to_pascal_case, to_snake_case, to_space_case,
    CaseRegistry,
};

proptest! {
    /// Applying a converter to its own output is a fixed point.
    #[test]
    fn converters_are_idempotent(input in ".{0,64}") {
        prop_assert_eq!(to_pascal_case(&to_pascal_case(&input)), to_pascal_case(&input));
        prop_assert_eq!(to_snake_case(&to_snake_case(&input)), to_snake_case(&input));
        prop_assert_eq!(to_kebab_case(&to_kebab_case(&input)), to_kebab_case(&input));
        prop_assert_eq!(to_space_case(&to_space_case(&input)), to_space_case(&input));
    }

    /// Snake and kebab agree modulo their separator.
    #[test]
    fn snake_and_kebab_share_tokens(input in "[a-zA-Z0-9 _-]{0,64}") {
        prop_assert_eq!(to_snake_case(&input).replace('_', "-"), to_kebab_case(&input));
    }

    /// Output alphabets stay closed per case.
    #[test]
    fn output_alphabets_are_closed(input in ".{0,64}") {
        prop_assert!(to_snake_case(&input).chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        prop_assert!(to_kebab_case(&input).chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        prop_assert!(to_dot_case(&input).chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.'));
        prop_assert!(to_pascal_case(&input).chars().all(|c| c.is_ascii_alphanumeric()));
        prop_assert!(to_camel_case(&input).chars().all(|c| c.is_ascii_alphanumeric()));
    }

    /// No registered converter panics, whatever the input.
    #[test]
    fn registry_never_panics(input in ".{0,128}") {
        let registry = CaseRegistry::builtin();
        for name in registry.names().collect::<Vec<_>>() {
            let f = registry.get(name).unwrap();
            let _ = f(&input);
        }
    }
}
