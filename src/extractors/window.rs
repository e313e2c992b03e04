// src/extractors/window.rs

//! Fixed-width window extraction.
//!
//! Every metric in a report is located the same way: find the first
//! occurrence of an anchor phrase (plain, case-sensitive substring match) and
//! look at the next [`WINDOW_CHARS`] characters. Whatever falls in that window
//! is the raw value. Nothing here validates plausibility; `None` only ever
//! means "anchor not present".

use once_cell::sync::Lazy;
use regex::Regex;

/// Width of the window following an anchor, in characters (not bytes).
pub const WINDOW_CHARS: usize = 50;

// --- Regex Patterns for Numeric Tokens (Lazy Static) ---
static ALL_DIGITS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+$").expect("Failed to compile ALL_DIGITS_RE")
});

// A period only counts as a decimal point when it touches a digit, so
// sentence-final tokens such as "tons." are not mistaken for numbers.
static DECIMAL_POINT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]\.|\.[0-9]").expect("Failed to compile DECIMAL_POINT_RE")
});

/// Returns the slice `text[p + anchor.len() .. p + anchor.len() + 50]`, where `p`
/// is the first occurrence of `anchor`, clamped at the end of `text`.
pub fn window_after<'a>(text: &'a str, anchor: &str) -> Option<&'a str> {
    let start = text.find(anchor)? + anchor.len();
    let rest = &text[start..];
    let end = rest
        .char_indices()
        .nth(WINDOW_CHARS)
        .map(|(idx, _)| idx)
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Keeps the whitespace-delimited tokens of the window that are all digits or
/// carry a decimal point, concatenated with no separator.
///
/// `Some("")` means the anchor was found but nothing numeric followed it.
pub fn numeric_anchor(text: &str, anchor: &str) -> Option<String> {
    let window = window_after(text, anchor)?;
    let value = window
        .split_whitespace()
        .filter(|token| is_numeric_token(token))
        .collect::<String>();
    tracing::trace!("numeric_anchor '{}': window {:?} -> {:?}", anchor, window, value);
    Some(value)
}

/// The window after `anchor`, cut at its first period (exclusive).
pub fn context_anchor(text: &str, anchor: &str) -> Option<String> {
    let window = window_after(text, anchor)?;
    let value = window.split('.').next().unwrap_or_default();
    tracing::trace!("context_anchor '{}': window {:?} -> {:?}", anchor, window, value);
    Some(value.to_string())
}

fn is_numeric_token(token: &str) -> bool {
    ALL_DIGITS_RE.is_match(token) || DECIMAL_POINT_RE.is_match(token)
}
