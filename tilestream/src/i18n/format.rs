//! Positional placeholder substitution.
//!
//! Message templates carry placeholders of two forms:
//!
//! - indexed: `{0}`, `{1}`, ... referring to an argument by position
//! - sequential: `{}` consuming the next unused argument index
//!
//! A translated template may use the indexed form to reorder arguments
//! relative to the source string; substitution itself never depends on the
//! locale. Doubled braces (`{{`, `}}`) escape literal braces.

use std::collections::BTreeSet;
use std::fmt::Display;
use std::sync::OnceLock;

use regex::Regex;

/// Matches `{}`, `{0}`..`{99}`, and escaped `{{` / `}}`.
fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{|\}\}|\{(\d{0,2})\}").expect("placeholder regex"))
}

/// Substitutes positional arguments into a message template.
///
/// Sequential `{}` placeholders take indices 0, 1, ... in order of
/// appearance. A placeholder whose index has no matching argument is left
/// in the output verbatim rather than dropped, so a mismatched catalogue
/// entry stays visible instead of silently losing a value.
pub fn format_positional(template: &str, args: &[&dyn Display]) -> String {
    let mut next_auto = 0usize;
    placeholder_re()
        .replace_all(template, |caps: &regex::Captures<'_>| {
            match caps.get(0).map(|m| m.as_str()) {
                Some("{{") => "{".to_string(),
                Some("}}") => "}".to_string(),
                _ => {
                    let spec = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                    let index = if spec.is_empty() {
                        let i = next_auto;
                        next_auto += 1;
                        i
                    } else {
                        // Two digits at most, cannot fail
                        spec.parse::<usize>().unwrap_or(usize::MAX)
                    };
                    match args.get(index) {
                        Some(arg) => arg.to_string(),
                        None => caps[0].to_string(),
                    }
                }
            }
        })
        .into_owned()
}

/// Returns the set of argument indices a template consumes.
///
/// Sequential placeholders are resolved to their effective indices, so
/// `"{} line {}"` yields `{0, 1}` exactly like `"{0} line {1}"`. Used to
/// check that a translation consumes the same arguments as its source.
pub fn placeholder_set(template: &str) -> BTreeSet<usize> {
    let mut indices = BTreeSet::new();
    let mut next_auto = 0usize;
    for caps in placeholder_re().captures_iter(template) {
        match caps.get(0).map(|m| m.as_str()) {
            Some("{{") | Some("}}") => continue,
            _ => {
                let spec = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                let index = if spec.is_empty() {
                    let i = next_auto;
                    next_auto += 1;
                    i
                } else {
                    spec.parse::<usize>().unwrap_or(usize::MAX)
                };
                indices.insert(index);
            }
        }
    }
    indices
}
