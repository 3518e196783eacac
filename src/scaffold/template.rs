//! Template token expansion and name helpers.
//!
//! Boilerplate files carry `${token}` references that are filled from a
//! replacement map in one scan. This is a different contract from the
//! settings resolver: templates are expanded once at scaffold time, and
//! substituted values are never rescanned.

use std::collections::HashMap;

use regex_lite::Regex;

const TOKEN_PATTERN: &str = r"\$\{([^}]+)\}";

/// Expand `${token}` references in `text` from `replacements`.
///
/// Tokens without a mapping are left exactly as written. Values are
/// substituted verbatim; a value that itself spells a token is not
/// expanded again.
pub fn expand_template(text: &str, replacements: &HashMap<String, String>) -> String {
    let token_re = Regex::new(TOKEN_PATTERN).unwrap();
    let mut output = String::with_capacity(text.len());
    let mut last = 0;
    for caps in token_re.captures_iter(text) {
        let token = match caps.get(0) {
            Some(token) => token,
            None => continue,
        };
        output.push_str(&text[last..token.start()]);
        match replacements.get(&caps[1]) {
            Some(value) => output.push_str(value),
            None => output.push_str(token.as_str()),
        }
        last = token.end();
    }
    output.push_str(&text[last..]);
    output
}

/// Type-name form of a scaffold name: words capitalized and joined.
///
/// Words split on spaces, `-` and `_`; each word is first-upper,
/// rest-lower, so "nav bar", "nav-bar" and "NAV_BAR" all become
/// "NavBar".
pub fn to_camel_case(name: &str) -> String {
    words(name).map(capitalize).collect()
}

/// Module-file form of a scaffold name: lowercase words joined by `_`.
pub fn to_snake_case(name: &str) -> String {
    words(name).map(str::to_lowercase).collect::<Vec<_>>().join("_")
}

fn words(name: &str) -> impl Iterator<Item = &str> {
    name.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Normalize a version to `X.Y.Z` form, accepting `X.Y` shorthand.
///
/// Anything else is rejected with `None`.
pub fn normalize_version(version: &str) -> Option<String> {
    let version_re = Regex::new(r"^(\d+)\.(\d+)(\.(\d+))?$").unwrap();
    let caps = version_re.captures(version)?;
    match caps.get(3) {
        Some(_) => Some(version.to_string()),
        None => Some(format!("{}.0", version)),
    }
}
