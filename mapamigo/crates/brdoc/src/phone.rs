//! Brazilian phone-number masking and shape checks.
//!
//! Landlines carry eight local digits and mask as `(XX) XXXX-XXXX`; mobile
//! numbers carry nine and mask as `(XX) XXXXX-XXXX`. The masker infers which
//! layout applies from the digit count alone.

use std::sync::OnceLock;

use regex::Regex;

static SHAPE: OnceLock<Regex> = OnceLock::new();

fn shape_regex() -> &'static Regex {
    SHAPE.get_or_init(|| {
        Regex::new(r"^\(\d{2}\) \d{4,5}-\d{4}$")
            .unwrap_or_else(|err| panic!("phone shape pattern must compile: {err}"))
    })
}

/// Applies the phone display mask to whatever prefix has been typed so far.
///
/// Non-digit characters are dropped and input is capped at eleven digits. The
/// area code is wrapped in parentheses once a third digit arrives; the hyphen
/// moves from the eight-digit landline position to the nine-digit mobile
/// position when an eleventh digit shows up.
#[must_use]
pub fn mask(input: &str) -> String {
    let digits: Vec<char> = input
        .chars()
        .filter(char::is_ascii_digit)
        .take(11)
        .collect();
    if digits.len() < 3 {
        return digits.into_iter().collect();
    }
    let (area, rest) = digits.split_at(2);
    let mut masked = String::with_capacity(16);
    masked.push('(');
    masked.extend(area);
    masked.push_str(") ");
    let prefix_len = if digits.len() == 11 { 5 } else { 4 };
    if rest.len() > prefix_len {
        let (prefix, line) = rest.split_at(prefix_len);
        masked.extend(prefix);
        masked.push('-');
        masked.extend(line);
    } else {
        masked.extend(rest);
    }
    masked
}

/// Returns `true` when the input carries a complete landline or mobile mask.
#[must_use]
pub fn matches_shape(input: &str) -> bool {
    shape_regex().is_match(input)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", "")]
    #[case("1", "1")]
    #[case("11", "11")]
    #[case("119", "(11) 9")]
    #[case("119876", "(11) 9876")]
    #[case("1198765", "(11) 9876-5")]
    #[case("1198765432", "(11) 9876-5432")]
    #[case("11987654321", "(11) 98765-4321")]
    #[case("(11) 98765-4321", "(11) 98765-4321")]
    #[case("11 98765 4321 99", "(11) 98765-4321")]
    fn mask_applies_progressively(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(mask(input), expected);
    }

    #[rstest]
    #[case("(11) 3456-7890", true)]
    #[case("(11) 98765-4321", true)]
    #[case("11987654321", false)]
    #[case("(11) 987-4321", false)]
    #[case("(11)98765-4321", false)]
    #[case("", false)]
    fn shape_requires_full_mask(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(matches_shape(input), expected);
    }
}
