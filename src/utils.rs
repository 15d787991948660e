use regex::{Captures, Regex};

lazy_static::lazy_static! {
    // `\w` is spelled out so only ASCII word characters are affected.
    static ref PASCAL_BOUNDARY: Regex =
        Regex::new(r"^[A-Za-z0-9_]|-[A-Za-z0-9_]").expect("a valid regex pattern");
    static ref CAMEL_BOUNDARY: Regex =
        Regex::new(r"-[A-Za-z0-9_]").expect("a valid regex pattern");
}

fn clear_and_upper(caps: &Captures) -> String {
    caps[0].replacen('-', "", 1).to_uppercase()
}

/// Converts a kebab-case name to PascalCase.
///
/// The first character and every character following a `-` are uppercased, and those hyphens
/// are dropped. Anything else (dots, slashes, a trailing `-`) passes through untouched:
///
/// `some-api-route.ts` -> `SomeApiRoute.ts`
pub fn to_pascal_case(text: &str) -> String {
    PASCAL_BOUNDARY
        .replace_all(text, clear_and_upper)
        .into_owned()
}

/// Converts a kebab-case name to camelCase, leaving the first character as typed.
pub fn to_camel_case(text: &str) -> String {
    CAMEL_BOUNDARY.replace_all(text, clear_and_upper).into_owned()
}

/// Everything before the first `.`, or the whole name when there is none.
pub fn stem_before_first_dot(name: &str) -> &str {
    name.split_once('.').map_or(name, |(stem, _)| stem)
}
