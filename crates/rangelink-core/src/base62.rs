//! Positional base-62 encoding of numeric ids.
//!
//! The alphabet is digits, then lowercase, then uppercase letters. Encoding
//! never pads, so every `u64` maps to exactly one canonical string and
//! [`decode`] rejects anything that [`encode`] would not have produced.

use crate::error::CoreError;

/// Symbols in ascending digit order.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of symbols in [`ALPHABET`].
pub const BASE: u64 = ALPHABET.len() as u64;

/// Length of `encode(u64::MAX)`, the longest code any id can produce.
pub const MAX_ENCODED_LEN: usize = 11;

/// Encodes `n` most-significant digit first.
///
/// `encode(0)` is the single first symbol of the alphabet.
pub fn encode(mut n: u64) -> String {
    if n == 0 {
        return char::from(ALPHABET[0]).to_string();
    }

    let mut digits = Vec::with_capacity(MAX_ENCODED_LEN);
    while n > 0 {
        digits.push(ALPHABET[(n % BASE) as usize]);
        n /= BASE;
    }
    digits.reverse();

    // every byte comes from ALPHABET, which is ASCII
    digits.into_iter().map(char::from).collect()
}

/// Decodes a canonical base-62 string back into the id it encodes.
pub fn decode(s: &str) -> Result<u64, CoreError> {
    if s.is_empty() {
        return Err(CoreError::InvalidEncoding("empty input".to_string()));
    }

    if s.len() > 1 && s.as_bytes()[0] == ALPHABET[0] {
        return Err(CoreError::InvalidEncoding(format!(
            "leading zero digit is not canonical: '{s}'"
        )));
    }

    s.bytes().try_fold(0_u64, |acc, byte| {
        let digit = digit_value(byte).ok_or_else(|| {
            CoreError::InvalidEncoding(format!(
                "character '{}' is outside the base-62 alphabet",
                char::from(byte)
            ))
        })?;

        acc.checked_mul(BASE)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| CoreError::InvalidEncoding(format!("'{s}' overflows u64")))
    })
}

/// Returns whether `byte` is a symbol of the alphabet.
pub fn is_symbol(byte: u8) -> bool {
    digit_value(byte).is_some()
}

fn digit_value(byte: u8) -> Option<u64> {
    match byte {
        b'0'..=b'9' => Some(u64::from(byte - b'0')),
        b'a'..=b'z' => Some(u64::from(byte - b'a') + 10),
        b'A'..=b'Z' => Some(u64::from(byte - b'A') + 36),
        _ => None,
    }
}
