//! Shelf offers
//!
//! Shelf promotion labels arrive as free text ("3x2", "2da al 70%",
//! "Llevá 2 y pagá 1"). This module turns a label into a machine-actionable rule:
//! a purchase threshold N ("for every N units bought, the group is priced at
//! the promotional unit price") and, separately, the discount magnitude the
//! label advertises. Unrecognised labels simply carry no quantity rule; a
//! flat promotional price may still apply.

use decimal_percentage::Percentage;

/// Extract the purchase threshold from a shelf offer label.
///
/// Recognised patterns, case-insensitive, whitespace-tolerant:
/// - `"<N> x <M>"` multi-buys ("3x2" -> 3, "2x1" -> 2).
/// - Spanish ordinal + "al" ("2da al 70%" -> 2, "3ra al 50%" -> 3).
///
/// Anything else yields `None`: no quantity-based rule.
#[must_use]
pub fn offer_threshold(label: &str) -> Option<u32> {
    let chars: Vec<char> = label.to_lowercase().chars().collect();

    multi_buy(&chars)
        .map(|(n, _)| n)
        .or_else(|| nth_unit(&chars))
}

/// Extract the advertised discount magnitude from a shelf offer label.
///
/// Multi-buys of the form `"<N> x 1"` give the discounted unit away (100%
/// off); otherwise the known percentage levels are recovered by containment
/// (80%, 70%, 50%). Labels advertising neither yield `None`.
#[must_use]
pub fn offer_discount(label: &str) -> Option<Percentage> {
    let lower = label.to_lowercase();
    let chars: Vec<char> = lower.chars().collect();

    if let Some((_, 1)) = multi_buy(&chars) {
        return Some(Percentage::from(1.0));
    }

    [("80", 0.8), ("70", 0.7), ("50", 0.5)]
        .into_iter()
        .find(|(needle, _)| lower.contains(needle))
        .map(|(_, level)| Percentage::from(level))
}

/// Find a `"<N> x <M>"` pattern anywhere in the label.
fn multi_buy(chars: &[char]) -> Option<(u32, u32)> {
    let mut i = 0;
    while i < chars.len() {
        // Only start at the beginning of a digit run.
        let starts_run = chars.get(i).is_some_and(char::is_ascii_digit)
            && (i == 0 || !chars.get(i - 1).is_some_and(char::is_ascii_digit));
        if starts_run {
            if let Some(pair) = multi_buy_at(chars, i) {
                return Some(pair);
            }
        }
        i += 1;
    }
    None
}

/// Try to read `"<N> x <M>"` starting at `start`.
fn multi_buy_at(chars: &[char], start: usize) -> Option<(u32, u32)> {
    let (n, after_n) = read_number(chars, start)?;
    let after_ws = skip_whitespace(chars, after_n);
    if chars.get(after_ws) != Some(&'x') {
        return None;
    }
    let after_x = skip_whitespace(chars, after_ws + 1);
    let (m, _) = read_number(chars, after_x)?;
    Some((n, m))
}

/// Find an ordinal + "al" pattern ("2da al", "3ra al") anywhere in the label.
fn nth_unit(chars: &[char]) -> Option<u32> {
    let mut i = 0;
    while i < chars.len() {
        let starts_run = chars.get(i).is_some_and(char::is_ascii_digit)
            && (i == 0 || !chars.get(i - 1).is_some_and(char::is_ascii_digit));
        if starts_run {
            if let Some(n) = nth_unit_at(chars, i) {
                return Some(n);
            }
        }
        i += 1;
    }
    None
}

/// Try to read `<N><ordinal suffix> al` starting at `start`.
fn nth_unit_at(chars: &[char], start: usize) -> Option<u32> {
    const SUFFIXES: [(char, char); 6] = [
        ('d', 'o'),
        ('d', 'a'),
        ('r', 'a'),
        ('r', 'o'),
        ('t', 'a'),
        ('t', 'o'),
    ];

    let (n, after_n) = read_number(chars, start)?;

    let suffix = (*chars.get(after_n)?, *chars.get(after_n + 1)?);
    if !SUFFIXES.contains(&suffix) {
        return None;
    }

    let after_ws = skip_whitespace(chars, after_n + 2);
    if chars.get(after_ws) == Some(&'a') && chars.get(after_ws + 1) == Some(&'l') {
        Some(n)
    } else {
        None
    }
}

/// Read a run of ASCII digits; returns the value and the index after the run.
fn read_number(chars: &[char], start: usize) -> Option<(u32, usize)> {
    let mut value: u32 = 0;
    let mut i = start;
    let mut seen = false;

    while let Some(c) = chars.get(i) {
        let Some(digit) = c.to_digit(10) else {
            break;
        };
        value = value.checked_mul(10)?.checked_add(digit)?;
        seen = true;
        i += 1;
    }

    seen.then_some((value, i))
}

/// Index of the first non-whitespace character at or after `start`.
fn skip_whitespace(chars: &[char], start: usize) -> usize {
    let mut i = start;
    while chars.get(i).is_some_and(|c| c.is_whitespace()) {
        i += 1;
    }
    i
}
