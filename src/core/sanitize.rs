// src/core/sanitize.rs
//
// Text and number normalizers for menu and label text.
// All of these are total: odd input gives `None` or an empty string, never an error.

use unicode_normalization::UnicodeNormalization;

static_regex! {
    /// Leading number with an optional unit: `140mg`, `2.5 g`, `10µg`.
    static AMOUNT = r"^([0-9]+(?:\.[0-9]+)?)\s*([a-zA-Zµμ]+)?";
}

/// Label spellings that don't survive the generic key derivation.
const LABEL_KEY_ALIASES: &[(&str, &str)] = &[
    ("include na added sugars", "added_sugars"),
    ("potas.", "potassium"),
    ("potas", "potassium"),
];

/// Collapse every whitespace run (NBSP included) to one ASCII space, trimmed.
pub fn normalize_space(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Fold a venue name for comparison: decompose, drop anything non-ASCII
/// (diacritics included), lowercase, non-alphanumeric runs → one space.
///
/// Idempotent: the output only holds `[a-z0-9 ]` with single inner spaces.
pub fn normalize_name(s: &str) -> String {
    let ascii: String = s.nfkd().filter(char::is_ascii).collect();
    collapse_non_alnum(&ascii.to_ascii_lowercase(), ' ')
}

/// Canonical snake-case key for a nutrient label, e.g. `Total Fat` → `total_fat`.
pub fn normalize_label_key(label: &str) -> String {
    let key = normalize_space(label).to_lowercase();
    if let Some((_, canonical)) = LABEL_KEY_ALIASES.iter().find(|(alias, _)| *alias == key) {
        return s!(*canonical);
    }
    collapse_non_alnum(&key, '_')
}

/// Keep `[a-z0-9]`, replacing each run of anything else with a single `sep`.
/// Leading/trailing runs are dropped.
fn collapse_non_alnum(s: &str, sep: char) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending = false;
    for ch in s.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending && !out.is_empty() { out.push(sep); }
            pending = false;
            out.push(ch);
        } else {
            pending = true;
        }
    }
    out
}

/// Split an amount like `140mg` into quantity and unit.
/// No leading number → `(None, None)`.
pub fn parse_amount(value: &str) -> (Option<f64>, Option<String>) {
    let text = value.replace('%', "").replace('\u{a0}', " ");
    let Some(caps) = AMOUNT.captures(text.trim()) else {
        return (None, None);
    };
    let Ok(quantity) = caps[1].parse::<f64>() else {
        return (None, None);
    };
    (Some(quantity), caps.get(2).map(|m| s!(m.as_str())))
}

/// `23%` → 23.0. Anything that isn't a finite number once `%` is removed → `None`.
pub fn parse_percent(value: &str) -> Option<f64> {
    value
        .replace('%', "")
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Keep only the ASCII digits and read them as one integer: `230 kcal` → 230.
pub fn parse_digits(value: &str) -> Option<i64> {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// `Entrees (Choose 1)` → (`Entrees`, `Some("Choose 1")`).
/// Only a parenthesized suffix counts; anything else is all title.
pub fn split_guidance(text: &str) -> (String, Option<String>) {
    if text.ends_with(')') {
        if let Some(open) = text.rfind('(') {
            let guidance = text[open + 1..text.len() - 1].trim();
            return (s!(text[..open].trim()), Some(s!(guidance)));
        }
    }
    (s!(text), None)
}

/// `Some(s)` unless `s` is empty.
pub fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}
