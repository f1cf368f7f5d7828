//! ISO 3779 Vehicle Identification Number validation.
//!
//! A VIN is a 17-character identifier whose ninth character (position 8)
//! is a check digit computed from the other sixteen via a weighted
//! transliteration sum mod 11. The letters `I`, `O` and `Q` are excluded
//! by the standard as ambiguous with digits.

use crate::error::ReportError;
use serde::{Deserialize, Serialize};
use std::fmt;

const VIN_LENGTH: usize = 17;
const CHECK_DIGIT_POSITION: usize = 8;

/// Positional weights from ISO 3779; the check-digit slot carries weight 0.
const WEIGHTS: [u32; VIN_LENGTH] = [8, 7, 6, 5, 4, 3, 2, 10, 0, 9, 8, 7, 6, 5, 4, 3, 2];

/// Map a VIN character to its numeric value for the checksum.
///
/// Digits map to themselves; letters map through the ISO 3779
/// transliteration table. Returns `None` for any character outside the
/// VIN alphabet, including the disallowed `I`/`O`/`Q`.
fn transliterate(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32),
        'A' => Some(1),
        'B' => Some(2),
        'C' => Some(3),
        'D' => Some(4),
        'E' => Some(5),
        'F' => Some(6),
        'G' => Some(7),
        'H' => Some(8),
        'J' => Some(1),
        'K' => Some(2),
        'L' => Some(3),
        'M' => Some(4),
        'N' => Some(5),
        'P' => Some(7),
        'R' => Some(9),
        'S' => Some(2),
        'T' => Some(3),
        'U' => Some(4),
        'V' => Some(5),
        'W' => Some(6),
        'X' => Some(7),
        'Y' => Some(8),
        'Z' => Some(9),
        _ => None,
    }
}

/// Validate a VIN according to ISO 3779.
///
/// Pure function, no I/O. Case-insensitive: the input is uppercased
/// before checking. Returns `false` for anything that is not exactly
/// 17 characters, contains `I`/`O`/`Q` or a character outside the VIN
/// alphabet, or whose check digit does not match the computed one.
pub fn validate(vin: &str) -> bool {
    let vin = vin.to_uppercase();
    let chars: Vec<char> = vin.chars().collect();
    if chars.len() != VIN_LENGTH {
        return false;
    }

    if chars.iter().any(|c| matches!(c, 'I' | 'O' | 'Q')) {
        return false;
    }

    let mut total: u32 = 0;
    for (i, &c) in chars.iter().enumerate() {
        match transliterate(c) {
            Some(value) => total += value * WEIGHTS[i],
            None => return false,
        }
    }

    let remainder = total % 11;
    let check_digit = if remainder == 10 {
        'X'
    } else {
        (b'0' + remainder as u8) as char
    };

    chars[CHECK_DIGIT_POSITION] == check_digit
}

/// A checksum-validated VIN.
///
/// Constructing a `Vin` is the only way to get one, so downstream
/// signatures that take `&Vin` carry proof of validation. The stored
/// form is trimmed and uppercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vin(String);

impl Vin {
    /// Normalize and validate a raw VIN string.
    ///
    /// Fails fast with [`ReportError::InvalidVin`] carrying the original
    /// input so callers can echo it back.
    pub fn new(raw: &str) -> Result<Self, ReportError> {
        let normalized = raw.trim().to_uppercase();
        if validate(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(ReportError::InvalidVin(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Vin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Honda Accord press VIN with an X check digit.
    const KNOWN_VALID: &str = "1HGBH41JXMN109186";

    #[test]
    fn known_valid_vin_passes() {
        assert!(validate(KNOWN_VALID));
        // All-ones is the classic self-checking VIN: sum of weights is 89,
        // 89 mod 11 == 1, and position 8 is '1'.
        assert!(validate("11111111111111111"));
    }

    #[test]
    fn validation_is_case_insensitive() {
        assert!(validate("1hgbh41jxmn109186"));
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(!validate(""));
        assert!(!validate("1HGBH41JXMN10918"));
        assert!(!validate("1HGBH41JXMN1091866"));
    }

    #[test]
    fn ambiguous_letters_are_rejected_regardless_of_checksum() {
        assert!(!validate("1HGBH41JXMN10918I"));
        assert!(!validate("OHGBH41JXMN109186"));
        assert!(!validate("1HGBH41JXMN10Q186"));
    }

    #[test]
    fn non_alphanumeric_characters_are_rejected() {
        assert!(!validate("1HGBH41JXMN10918-"));
        assert!(!validate("1HGBH41JXMN10918 "));
    }

    #[test]
    fn flipped_character_breaks_the_checksum() {
        // Change a single non-check-digit character.
        assert!(!validate("2HGBH41JXMN109186"));
        assert!(!validate("1HGBH41JXMN109187"));
    }

    #[test]
    fn wrong_check_digit_is_rejected() {
        assert!(!validate("1HGBH41J0MN109186"));
    }

    #[test]
    fn vin_newtype_normalizes_input() {
        let vin = Vin::new("  1hgbh41jxmn109186 ").unwrap();
        assert_eq!(vin.as_str(), KNOWN_VALID);
    }

    #[test]
    fn vin_newtype_rejects_invalid_input() {
        let err = Vin::new("not-a-vin").unwrap_err();
        assert!(matches!(err, ReportError::InvalidVin(_)));
    }
}
