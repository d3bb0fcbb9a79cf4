#![warn(missing_docs)]

//! Case-conversion registry for stencil
//!
//! Pure string transforms keyed by the names template authors use as
//! variable suffixes (`${componentName_toPascalCase}`). Every converter
//! first normalizes its input to alphanumeric tokens separated by single
//! spaces, then recombines them with case-specific separators and
//! capitalization. Empty input always yields an empty output; converters
//! never fail.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Signature shared by every registered converter.
pub type CaseFn = fn(&str) -> String;

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9 ]").unwrap());
static NON_ALPHA: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z ]").unwrap());
static NON_NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9 ]").unwrap());
static LEADING_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+").unwrap());
static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalizes `input` to alphanumeric tokens separated by single spaces.
///
/// Characters in `preserve` survive the cleanup in addition to
/// alphanumerics. With `start_with_alpha`, a leading run of digits is
/// stripped first so the result can start an identifier.
pub fn clean(input: &str, preserve: &str, start_with_alpha: bool) -> String {
    let trimmed = input.trim();
    let stripped = if start_with_alpha {
        LEADING_DIGITS.replace(trimmed, "")
    } else {
        std::borrow::Cow::Borrowed(trimmed)
    };

    let cleaned = if preserve.is_empty() {
        NON_ALNUM.replace_all(&stripped, " ").into_owned()
    } else {
        let class = format!("[^a-zA-Z0-9 {}]", regex::escape(preserve));
        match Regex::new(&class) {
            Ok(re) => re.replace_all(&stripped, " ").into_owned(),
            Err(_) => NON_ALNUM.replace_all(&stripped, " ").into_owned(),
        }
    };

    MULTI_SPACE.replace_all(&cleaned, " ").trim().to_string()
}

/// Keeps only digits, space-separated: `"Foo--123-Bar"` → `"123"`.
pub fn to_numeric_case(input: &str) -> String {
    let cleaned = NON_NUMERIC.replace_all(input.trim(), " ");
    MULTI_SPACE.replace_all(&cleaned, " ").trim().to_string()
}

/// Keeps only letters, space-separated: `"Foo--123-Bar"` → `"Foo Bar"`.
pub fn to_alpha_case(input: &str) -> String {
    let cleaned = NON_ALPHA.replace_all(input.trim(), " ");
    MULTI_SPACE.replace_all(&cleaned, " ").trim().to_string()
}

/// Alphanumeric tokens, leading digits stripped:
/// `"Foo--123-Bar-@-Qux"` → `"Foo 123 Bar Qux"`.
pub fn to_alpha_numeric_case(input: &str) -> String {
    clean(input, "", true)
}

/// Splits camel humps into spaced tokens: `"fooBarQux"` → `"foo Bar Qux"`.
pub fn to_space_case(input: &str) -> String {
    let base = to_alpha_numeric_case(input);
    let mut spaced = String::with_capacity(base.len() + 8);
    for ch in base.chars() {
        if ch.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(ch);
    }
    MULTI_SPACE.replace_all(&spaced, " ").trim().to_string()
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn map_words<F: Fn(&str) -> String>(input: &str, f: F) -> Vec<String> {
    input.split(' ').filter(|w| !w.is_empty()).map(|w| f(w)).collect()
}

/// `"FooBar-Qux__Baz"` → `"Foo Bar Qux Baz"`.
pub fn to_title_case(input: &str) -> String {
    map_words(&to_space_case(input), capitalize_first).join(" ")
}

/// `"FooBar-Qux__Baz"` → `"fooBarQuxBaz"`.
pub fn to_camel_case(input: &str) -> String {
    let joined = map_words(&to_space_case(input), capitalize_first).join("");
    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// `"Foo--123-Bar-@-Qux-Baz"` → `"Foo123BarQuxBaz"`.
pub fn to_pascal_case(input: &str) -> String {
    map_words(&to_space_case(input), capitalize_first).join("")
}

/// `"FooBar-Qux__Baz"` → `"foo_bar_qux_baz"`.
pub fn to_snake_case(input: &str) -> String {
    to_space_case(input).replace(' ', "_").to_lowercase()
}

/// `"FooBar-Qux__Baz"` → `"FOO_BAR_QUX_BAZ"`.
pub fn to_snake_upper_case(input: &str) -> String {
    to_snake_case(input).to_uppercase()
}

/// `"FooBar-Qux__Baz"` → `"Foo_Bar_Qux_Baz"`.
pub fn to_snake_title_case(input: &str) -> String {
    to_title_case(input).replace(' ', "_")
}

/// `"FooBar-Qux__Baz"` → `"foo-bar-qux-baz"`.
pub fn to_kebab_case(input: &str) -> String {
    to_space_case(input).replace(' ', "-").to_lowercase()
}

/// `"FooBar-Qux__Baz"` → `"FOO-BAR-QUX-BAZ"`.
pub fn to_kebab_upper_case(input: &str) -> String {
    to_kebab_case(input).to_uppercase()
}

/// `"FooBar-Qux__Baz"` → `"Foo-Bar-Qux-Baz"`.
pub fn to_kebab_title_case(input: &str) -> String {
    to_title_case(input).replace(' ', "-")
}

/// `"FooBar-Qux__Baz"` → `"foo.bar.qux.baz"`.
pub fn to_dot_case(input: &str) -> String {
    to_space_case(input).replace(' ', ".").to_lowercase()
}

/// `"FooBar-Qux__Baz"` → `"FOO.BAR.QUX.BAZ"`.
pub fn to_dot_upper_case(input: &str) -> String {
    to_dot_case(input).to_uppercase()
}

/// `"FooBar-Qux__Baz"` → `"Foo.Bar.Qux.Baz"`.
pub fn to_dot_title_case(input: &str) -> String {
    to_title_case(input).replace(' ', ".")
}

/// `"FooBar-Qux__Baz"` → `"foo/bar/qux/baz"`.
pub fn to_path_case(input: &str) -> String {
    to_space_case(input).replace(' ', "/").to_lowercase()
}

/// `"foo bar-qux Baz"` → `"Foo bar qux Baz"` (first character only).
pub fn to_sentence_case(input: &str) -> String {
    capitalize_first(&to_alpha_numeric_case(input))
}

/// `"foo bar qux"` → `"Foo Bar Qux"` (word starts only, rest untouched).
pub fn to_capitalized_words(input: &str) -> String {
    map_words(&to_alpha_numeric_case(input), capitalize_first).join(" ")
}

/// `"foo bar"` → `"FoO BaR"` (alternating per-character case).
pub fn to_studly_caps(input: &str) -> String {
    to_alpha_numeric_case(input)
        .chars()
        .enumerate()
        .map(|(i, ch)| {
            if i % 2 == 0 {
                ch.to_ascii_uppercase()
            } else {
                ch.to_ascii_lowercase()
            }
        })
        .collect()
}

/// `"fooBar"` → `"FOOBAR"`.
pub fn to_upper_case(input: &str) -> String {
    to_alpha_numeric_case(input).to_uppercase()
}

/// `"FOOBAR"` → `"foobar"`.
pub fn to_lower_case(input: &str) -> String {
    to_alpha_numeric_case(input).to_lowercase()
}

/// Ordered name → converter map.
///
/// Names are the template-facing spelling; `split_suffix` recognizes them
/// as `_`-joined variable suffixes for case-suffix inference.
#[derive(Debug)]
pub struct CaseRegistry {
    ordered: Vec<(&'static str, CaseFn)>,
    by_name: HashMap<&'static str, CaseFn>,
}

impl CaseRegistry {
    /// Builds the registry with every built-in converter.
    pub fn builtin() -> Self {
        let ordered: Vec<(&'static str, CaseFn)> = vec![
            ("toNumericCase", to_numeric_case),
            ("toAlphaCase", to_alpha_case),
            ("toAlphaNumericCase", to_alpha_numeric_case),
            ("toSpaceCase", to_space_case),
            ("toTitleCase", to_title_case),
            ("toCamelCase", to_camel_case),
            ("toPascalCase", to_pascal_case),
            ("toSnakeCase", to_snake_case),
            ("toSnakeUpperCase", to_snake_upper_case),
            ("toSnakeTitleCase", to_snake_title_case),
            ("toKebabCase", to_kebab_case),
            ("toKebabUpperCase", to_kebab_upper_case),
            ("toKebabTitleCase", to_kebab_title_case),
            ("toDotCase", to_dot_case),
            ("toDotUpperCase", to_dot_upper_case),
            ("toDotTitleCase", to_dot_title_case),
            ("toPathCase", to_path_case),
            ("toSentenceCase", to_sentence_case),
            ("toCapitalizedWords", to_capitalized_words),
            ("toStudlyCaps", to_studly_caps),
            ("toUpperCase", to_upper_case),
            ("toLowerCase", to_lower_case),
        ];
        let by_name = ordered.iter().copied().collect();
        Self { ordered, by_name }
    }

    /// Looks up a converter by name; a leading underscore is tolerated.
    pub fn get(&self, name: &str) -> Option<CaseFn> {
        self.by_name.get(name.trim_start_matches('_')).copied()
    }

    /// All registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.ordered.iter().map(|(name, _)| *name)
    }

    /// Decomposes an identifier carrying a case suffix.
    ///
    /// `"componentName_toPascalCase"` → `("componentName", "toPascalCase")`.
    /// The longest registered suffix wins; an identifier that is nothing
    /// but a suffix does not decompose.
    pub fn split_suffix<'a>(&self, identifier: &'a str) -> Option<(&'a str, &'static str, CaseFn)> {
        let mut best: Option<(&'a str, &'static str, CaseFn)> = None;
        for (name, f) in &self.ordered {
            let suffix = format!("_{}", name);
            if identifier.len() > suffix.len() && identifier.ends_with(&suffix) {
                let base = &identifier[..identifier.len() - suffix.len()];
                if base.is_empty() {
                    continue;
                }
                match best {
                    Some((_, current, _)) if current.len() >= name.len() => {}
                    _ => best = Some((base, name, *f)),
                }
            }
        }
        best
    }
}

impl Default for CaseRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
