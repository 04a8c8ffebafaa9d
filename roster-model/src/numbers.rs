//! Numeric coercion for measure-like string attributes.
//!
//! The remote API encodes measures (`mass`, `height`) as strings and uses
//! placeholders such as `"unknown"` or `"n/a"` when a value is missing. A
//! measure reads as its longest leading decimal number; a value with no
//! numeric prefix orders as `0.0`. Callers never see an error for a malformed
//! measure.

/// Parse a measure attribute into an `f64`, defaulting to `0.0`.
///
/// Leading whitespace is skipped and the longest prefix that forms a decimal
/// literal is read, so `"78.2kg"` is `78.2` and `"1,358"` is `1.0` (the
/// comma ends the number). `Infinity` with an optional sign is accepted as a
/// prefix; everything else without leading digits is `0.0`.
pub fn parse_measure(raw: &str) -> f64 {
    let text = raw.trim_start();
    let prefix = numeric_prefix(text);
    if prefix.is_empty() {
        return 0.0;
    }

    match prefix.parse::<f64>() {
        Ok(value) if !value.is_nan() => value,
        _ => 0.0,
    }
}

/// Longest prefix of `text` shaped like `[+-]digits[.digits][e[+-]digits]`
/// or `[+-]Infinity`. Empty when no digit is present.
fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if text[end..].starts_with("Infinity") {
        return &text[..end + "Infinity".len()];
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(&bytes[exp..]);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    &text[..end]
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
