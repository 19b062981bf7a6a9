//! CPF (Cadastro de Pessoas Físicas) masking and checksum validation.
//!
//! A CPF is an eleven-digit taxpayer number whose last two digits are check
//! digits. Each check digit is a weighted sum of the digits before it, taken
//! modulo eleven, with remainders of ten and eleven collapsing to zero.

/// Ways an input can fail CPF validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CpfError {
    /// The input does not contain exactly eleven digits once punctuation is
    /// stripped.
    #[error("CPF must contain exactly eleven digits")]
    Length,
    /// At least one of the two check digits disagrees with the weighted
    /// checksum of the digits before it.
    #[error("CPF check digits do not match the checksum")]
    Checksum,
}

/// Applies the `XXX.XXX.XXX-XX` display mask to whatever prefix of a CPF has
/// been typed so far.
///
/// Non-digit characters are dropped, input is capped at eleven digits, and
/// separators appear as soon as the digit after them exists, so the mask is
/// stable under repeated application.
#[must_use]
pub fn mask(input: &str) -> String {
    let mut masked = String::with_capacity(14);
    for (index, digit) in input
        .chars()
        .filter(char::is_ascii_digit)
        .take(11)
        .enumerate()
    {
        match index {
            3 | 6 => masked.push('.'),
            9 => masked.push('-'),
            _ => {}
        }
        masked.push(digit);
    }
    masked
}

/// Checks that the input strips to eleven digits and that both check digits
/// match the weighted checksum.
///
/// Uniform sequences such as `111.111.111-11` satisfy the checksum arithmetic
/// and are accepted; rejecting reserved numbers is a policy decision left to
/// callers.
///
/// # Errors
///
/// Returns [`CpfError::Length`] when the digit count is not eleven and
/// [`CpfError::Checksum`] when either check digit disagrees.
pub fn validate(input: &str) -> Result<(), CpfError> {
    let digits: Vec<u32> = input.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 11 {
        return Err(CpfError::Length);
    }
    if check_digit(&digits[..9], 10) != digits[9] || check_digit(&digits[..10], 11) != digits[10] {
        return Err(CpfError::Checksum);
    }
    Ok(())
}

/// Computes one check digit. Weights run from `weight_start` down to two, one
/// per input digit; the doubled remainder rule maps ten and eleven to zero.
fn check_digit(digits: &[u32], weight_start: u32) -> u32 {
    let sum: u32 = digits
        .iter()
        .zip((2..=weight_start).rev())
        .map(|(digit, weight)| digit * weight)
        .sum();
    let remainder = (sum * 10) % 11;
    if remainder >= 10 { 0 } else { remainder }
}
