//! Translatability rules for raw text content.

use std::sync::LazyLock;

use regex::Regex;

/// Texts that are a single one of these symbols are never translated.
const PUNCTUATION: &[&str] = &[
    "[", "]", ".", ",", "-", "_", ";", "!", "^", "#", "+", "$", "%", "&", "*", ":", "?",
];

/// Markup or an existing interpolation means the text is not plain copy.
const BANNED_SEQUENCES: &[&str] = &["<", ">", "{{", "}}"];

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Turn raw text content into a fragment, or `None` if it is not translatable.
///
/// Newlines are removed before the checks; the surviving text has every
/// whitespace run collapsed to a single space.
pub fn to_fragment(raw: &str) -> Option<String> {
    let text = strip_newlines(raw);
    is_translatable(&text).then(|| collapse_whitespace(&text))
}

/// Normalize text the same way fragments are normalized, without filtering.
pub fn normalize(raw: &str) -> String {
    collapse_whitespace(&strip_newlines(raw))
}

pub fn is_translatable(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty()
        && !PUNCTUATION.contains(&trimmed)
        && !BANNED_SEQUENCES.iter().any(|seq| text.contains(seq))
        && !coerces_to_number(text)
}

fn strip_newlines(text: &str) -> String {
    text.replace('\n', "")
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

/// Whether `Number(text)` would produce a number rather than `NaN`.
///
/// Surrounding whitespace is ignored and empty text counts as zero. Accepts
/// signed decimals with optional fraction and exponent, signed `Infinity`,
/// and unsigned `0x`/`0o`/`0b` integers.
fn coerces_to_number(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return true;
    }

    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if unsigned == "Infinity" {
        return true;
    }

    if unsigned.len() == trimmed.len() {
        for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
            if let Some(digits) = trimmed.strip_prefix(prefix) {
                return !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix));
            }
        }
    }

    is_decimal_literal(unsigned)
}

fn is_decimal_literal(text: &str) -> bool {
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());

    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(i) => (&text[..i], Some(&text[i + 1..])),
        None => (text, None),
    };
    let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    if integer.is_empty() && fraction.is_empty() {
        return false;
    }
    if !all_digits(integer) || !all_digits(fraction) {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !exp.is_empty() && all_digits(exp)
        }
    }
}
