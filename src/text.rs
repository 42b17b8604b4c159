//! Text normalisation and lenient numeric parsing for ingested fields.
//!
//! The dataset carries stray bytes (non-breaking spaces, quotes, trailing
//! control characters) around titles and names. Every key that reaches an
//! index goes through [`normalize`] so user input and stored keys agree.

/// Keep ASCII alphanumerics, space, `:` and `-`; drop everything else.
///
/// # Examples
///
/// ```
/// use nexus_catalog::text::normalize;
///
/// assert_eq!(normalize("Avatar\u{a0}"), "Avatar");
/// assert_eq!(normalize("Spider-Man 3: \"Venom\""), "Spider-Man 3: Venom");
/// ```
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | ':' | '-'))
        .collect()
}

/// Accumulate every decimal digit in `text`, ignoring all other characters.
///
/// Empty or digit-free input yields 0. Overflow saturates.
///
/// ```
/// use nexus_catalog::text::parse_int;
///
/// assert_eq!(parse_int("2009"), 2009);
/// assert_eq!(parse_int(" 1,999 "), 1999);
/// assert_eq!(parse_int(""), 0);
/// ```
pub fn parse_int(text: &str) -> i32 {
    text.bytes()
        .filter(u8::is_ascii_digit)
        .fold(0i32, |acc, b| {
            acc.saturating_mul(10).saturating_add(i32::from(b - b'0'))
        })
}

/// Parse a decimal number: digits before the first `.` form the integer
/// part, digits after it the fraction. Other characters are ignored.
///
/// ```
/// use nexus_catalog::text::parse_real;
///
/// assert!((parse_real("7.9") - 7.9).abs() < 1e-9);
/// assert_eq!(parse_real("n/a"), 0.0);
/// ```
pub fn parse_real(text: &str) -> f64 {
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (text, ""),
    };

    let mut value = whole
        .bytes()
        .filter(u8::is_ascii_digit)
        .fold(0.0f64, |acc, b| acc * 10.0 + f64::from(b - b'0'));

    let mut factor = 0.1;
    for b in fraction.bytes().filter(u8::is_ascii_digit) {
        value += f64::from(b - b'0') * factor;
        factor *= 0.1;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keeps_allowed_punctuation() {
        assert_eq!(normalize("X-Men: Days of Future Past"), "X-Men: Days of Future Past");
        assert_eq!(normalize("Amélie"), "Amlie");
        assert_eq!(normalize("  "), "  ");
        assert_eq!(normalize("!!!"), "");
    }

    #[test]
    fn test_parse_int_ignores_noise() {
        assert_eq!(parse_int("-5"), 5);
        assert_eq!(parse_int("12a3"), 123);
        assert_eq!(parse_int("99999999999999"), i32::MAX);
    }

    #[test]
    fn test_parse_real() {
        assert!((parse_real("8.35") - 8.35).abs() < 1e-9);
        assert!((parse_real("10") - 10.0).abs() < 1e-9);
        assert!((parse_real(".5") - 0.5).abs() < 1e-9);
        assert!((parse_real("6.") - 6.0).abs() < 1e-9);
        // Only the first dot separates; later dots are noise.
        assert!((parse_real("1.2.3") - 1.23).abs() < 1e-9);
    }
}
