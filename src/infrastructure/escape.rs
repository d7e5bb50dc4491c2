//! Escape normalizer - reverses stacked backslash escaping
//!
//! Upstream text routinely gets serialized into JSON more than once, so a
//! newline can arrive as anything from `\n` to `\\\\n`. Replacements run
//! from the most-escaped form down to the least; the reverse order would
//! corrupt longer escape runs.
//!
//! A backslash run ahead of an escape letter reads as a deeper-escaped
//! control character, never as literal backslashes: `\\t` becomes a tab.
//! Only runs left over after escape replacement collapse to a single
//! backslash.

use once_cell::sync::Lazy;
use regex::Regex;

static BACKSLASH_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\{2,}").unwrap());

const CONTROL_ESCAPES: [(&str, &str); 3] = [("n", "\n"), ("r", "\r"), ("t", "\t")];

/// Reduce 0-4 levels of backslash escaping to real control characters and
/// unescaped quotes. Idempotent: already-normalized text passes through
/// unchanged.
pub fn normalize(text: &str) -> String {
    let mut out = text.to_string();

    for (letter, real) in CONTROL_ESCAPES {
        for depth in (1..=4).rev() {
            let pattern = format!("{}{}", "\\".repeat(depth), letter);
            out = out.replace(&pattern, real);
        }
    }

    for depth in (1..=4).rev() {
        let pattern = format!("{}\"", "\\".repeat(depth));
        out = out.replace(&pattern, "\"");
    }

    // A run of leftover backslashes collapses to one in a single pass,
    // which is what keeps the whole function idempotent.
    BACKSLASH_RUN_RE.replace_all(&out, "\\").into_owned()
}
