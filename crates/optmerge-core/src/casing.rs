//! Name spelling helpers shared by the normalizers and the asset resolver.

use once_cell::sync::Lazy;
use regex_lite::{Captures, Regex};

static DASH_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"-(\w)").expect("valid regex"));

/// `my-comp` -> `myComp`. Anything without dashes is returned unchanged.
pub fn camelize(name: &str) -> String {
    DASH_CHAR
        .replace_all(name, |caps: &Captures<'_>| caps[1].to_uppercase())
        .into_owned()
}

/// Uppercase the first character.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
