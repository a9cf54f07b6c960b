//! Numeric literal grammar shared by assembler operands and raw byte entry.
//!
//! - `0x` prefix: hexadecimal (`0x0F` → 15)
//! - `%` prefix: binary (`%1010` → 10)
//! - no prefix: decimal (`42` → 42)
//!
//! Prefixes are case-insensitive. Parsing is strict: every digit must be
//! valid for the selected base or the token yields no value at all — there
//! are no partial parses and no negative literals.

/// Parses a numeric literal token.
///
/// Returns `None` for malformed input. The result is deliberately wider
/// than a machine byte: the assembler range-checks against [0, 255] itself
/// so an out-of-range literal reports the token that was written, and raw
/// byte entry shells can do the same.
///
/// # Examples
///
/// ```
/// use micro8::parse_literal;
///
/// assert_eq!(parse_literal("0xFF"), Some(255));
/// assert_eq!(parse_literal("%10"), Some(2));
/// assert_eq!(parse_literal("10"), Some(10));
/// assert_eq!(parse_literal("0xZZ"), None);
/// assert_eq!(parse_literal("-5"), None);
/// ```
pub fn parse_literal(token: &str) -> Option<u16> {
    let token = token.trim().to_ascii_lowercase();

    if let Some(digits) = token.strip_prefix("0x") {
        u16::from_str_radix(digits, 16).ok()
    } else if let Some(digits) = token.strip_prefix('%') {
        u16::from_str_radix(digits, 2).ok()
    } else {
        token.parse::<u16>().ok()
    }
}
