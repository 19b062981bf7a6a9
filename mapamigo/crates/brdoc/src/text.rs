//! Small text transforms shared by name, e-mail, and state fields.

/// Uppercases the first letter of each space-separated word and lowercases
/// the rest.
///
/// Splitting is on single spaces and the separators are preserved, so a name
/// typed with a trailing space keeps it and can still grow a second word.
#[must_use]
pub fn capitalize(input: &str) -> String {
    input
        .split(' ')
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Trims surrounding whitespace.
#[must_use]
pub fn trim(input: &str) -> String {
    input.trim().to_owned()
}

/// Uppercases the whole input.
#[must_use]
pub fn uppercase(input: &str) -> String {
    input.to_uppercase()
}
