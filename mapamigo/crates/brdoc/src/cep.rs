//! CEP (Código de Endereçamento Postal) masking and shape checks.

use std::sync::OnceLock;

use regex::Regex;

static SHAPE: OnceLock<Regex> = OnceLock::new();

fn shape_regex() -> &'static Regex {
    SHAPE.get_or_init(|| {
        Regex::new(r"^\d{5}-\d{3}$")
            .unwrap_or_else(|err| panic!("CEP shape pattern must compile: {err}"))
    })
}

/// Applies the `XXXXX-XXX` display mask to whatever prefix of a CEP has been
/// typed so far. Non-digit characters are dropped and input is capped at
/// eight digits.
#[must_use]
pub fn mask(input: &str) -> String {
    let mut masked = String::with_capacity(9);
    for (index, digit) in input
        .chars()
        .filter(char::is_ascii_digit)
        .take(8)
        .enumerate()
    {
        if index == 5 {
            masked.push('-');
        }
        masked.push(digit);
    }
    masked
}

/// Returns `true` when the input carries the complete `XXXXX-XXX` mask.
#[must_use]
pub fn matches_shape(input: &str) -> bool {
    shape_regex().is_match(input)
}

/// Strips formatting and returns the bare digits when exactly eight remain.
///
/// This is the gate for postal lookups: shorter or longer inputs are not a
/// complete CEP and yield `None`.
#[must_use]
pub fn digits(input: &str) -> Option<String> {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    (digits.len() == 8).then_some(digits)
}
