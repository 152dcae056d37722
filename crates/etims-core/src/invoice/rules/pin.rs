//! KRA PIN correction and validation.
//!
//! A KRA PIN is 11 characters: a letter, nine digits, a letter. Scanned
//! documents routinely misread the digit `0` as the letter `O` inside the
//! digit block, and occasionally duplicate the leading letter into a
//! 12-character artifact. Both are corrected before validation.

/// Fix common OCR misreads in an extracted KRA PIN.
///
/// Idempotent: an already-valid 11-character PIN passes through unchanged.
pub fn cleanup_kra_pin(pin: &str) -> String {
    let mut chars: Vec<char> = pin.chars().collect();

    // 12-character artifact where the second character is a misread '0'.
    if chars.len() == 12 && chars[0].is_ascii_alphabetic() && chars[1] == 'O' {
        chars[1] = '0';
    }

    // O -> 0 across the interior digit block.
    if chars.len() >= 11 {
        let last = chars.len() - 1;
        for c in &mut chars[1..last] {
            if *c == 'O' {
                *c = '0';
            }
        }
    }

    // 12-character artifact with a duplicated leading letter: keep one.
    if chars.len() == 12 && chars[0].is_ascii_alphabetic() && chars[1].is_ascii_alphabetic() {
        chars.remove(1);
    }

    chars.into_iter().collect()
}

/// Check the KRA PIN format: exactly 11 alphanumeric characters.
///
/// Format correctness only; KRA publishes no checksum to verify against.
pub fn validate_kra_pin(pin: &str) -> bool {
    pin.chars().count() == 11 && pin.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_o_corrected_to_zero() {
        assert_eq!(cleanup_kra_pin("PO52006107N"), "P052006107N");
        assert!(validate_kra_pin(&cleanup_kra_pin("PO52006107N")));
    }

    #[test]
    fn test_multiple_interior_misreads() {
        assert_eq!(cleanup_kra_pin("PO52OO61O7N"), "P052006107N");
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let valid = "P052006107N";
        assert_eq!(cleanup_kra_pin(valid), valid);
        assert_eq!(cleanup_kra_pin(&cleanup_kra_pin(valid)), valid);
    }

    #[test]
    fn test_twelve_char_duplicated_letter_reduced() {
        // "PP" + 9 digits + letter collapses to a single leading letter.
        assert_eq!(cleanup_kra_pin("PP052006107N"), "P052006107N");
    }

    #[test]
    fn test_twelve_char_misread_second_zero() {
        // 'O' in position 1 of a 12-char read is a digit misread; the
        // result stays 12 chars since both leading chars are not letters.
        assert_eq!(cleanup_kra_pin("PO052006107N"), "P0052006107N");
    }

    #[test]
    fn test_validate_format() {
        assert!(validate_kra_pin("P052006107N"));
        assert!(validate_kra_pin("A123456789B"));
        assert!(!validate_kra_pin("P05200610N")); // 10 chars
        assert!(!validate_kra_pin("P0520061077N7")); // 13 chars
        assert!(!validate_kra_pin("P05200-107N")); // non-alphanumeric
        assert!(!validate_kra_pin(""));
    }

    #[test]
    fn test_short_strings_untouched() {
        assert_eq!(cleanup_kra_pin("PO52"), "PO52");
        assert_eq!(cleanup_kra_pin(""), "");
    }
}
