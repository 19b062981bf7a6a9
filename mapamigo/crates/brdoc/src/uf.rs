//! Federative-unit (UF) shape checks.

/// Returns `true` when the input is exactly two ASCII letters, in either case.
///
/// Only the shape is checked; `XX` passes even though no state uses it.
#[must_use]
pub fn matches_shape(input: &str) -> bool {
    let mut chars = input.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(first), Some(second), None)
            if first.is_ascii_alphabetic() && second.is_ascii_alphabetic()
    )
}
