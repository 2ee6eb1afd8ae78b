//! Locale-aware numeric normalization (Brazilian formatting).

use rust_decimal::Decimal;
use std::str::FromStr;

/// Normalize a numeric literal to dot-decimal form.
///
/// `1.234,56` and `1 234,56` become `1234.56`, `928,72` becomes `928.72`.
/// Thousands separators are removed before the decimal comma is rewritten, so
/// `12,345` stays fractional. A lone `.` in a literal without a comma is read
/// as a decimal point, which makes the output a fixed point of this function.
///
/// Total over any input: unexpected characters are passed through.
pub fn normalize_number(raw: &str) -> String {
    let trimmed = raw.trim();
    let dots_are_grouping = trimmed.contains(',') || trimmed.matches('.').count() > 1;
    strip_grouping(trimmed, dots_are_grouping)
}

/// Normalize a depth literal, where every `.` followed by exactly three
/// digits is a thousands separator.
///
/// Depths are measured in hundreds or thousands of meters and never carry
/// three decimals, so `PROFD 1.350` is `1350`. Diameters such as `2.441` go
/// through [`normalize_number`] instead.
pub fn normalize_depth(raw: &str) -> String {
    strip_grouping(raw.trim(), true)
}

fn strip_grouping(trimmed: &str, dots_are_grouping: bool) -> String {
    let chars: Vec<char> = trimmed.chars().collect();

    let mut normalized = String::with_capacity(trimmed.len());
    for (i, &c) in chars.iter().enumerate() {
        let separator = c.is_whitespace() || (c == '.' && dots_are_grouping);
        if separator && is_thousands_position(&chars, i) {
            continue;
        }
        normalized.push(c);
    }

    normalized.replace(',', ".")
}

/// A separator at `i` sits between a digit and exactly three digits.
fn is_thousands_position(chars: &[char], i: usize) -> bool {
    if i == 0 || !chars[i - 1].is_ascii_digit() {
        return false;
    }
    let group = match chars.get(i + 1..i + 4) {
        Some(group) => group,
        None => return false,
    };
    if !group.iter().all(|c| c.is_ascii_digit()) {
        return false;
    }
    chars
        .get(i + 4)
        .is_none_or(|c| !(c.is_alphanumeric() || *c == '_'))
}

/// Parse a canonical number.
pub fn parse_canonical(canonical: &str) -> Option<Decimal> {
    Decimal::from_str(canonical).ok()
}

/// Render a depth value with at most two decimals and no trailing zeros.
///
/// `1350.00` renders as `1350`, `980.0` as `980`. Returns `None` when the
/// input is not a canonical number.
pub fn render_depth(canonical: &str) -> Option<String> {
    parse_canonical(canonical).map(format_depth)
}

pub fn format_depth(value: Decimal) -> String {
    value.round_dp(2).normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_brazilian_formats() {
        assert_eq!(normalize_number("1.234,56"), "1234.56");
        assert_eq!(normalize_number("1 234,56"), "1234.56");
        assert_eq!(normalize_number("12 345 678,90"), "12345678.90");
        assert_eq!(normalize_number("928,72"), "928.72");
        assert_eq!(normalize_number("1.234.567"), "1234567");
        assert_eq!(normalize_number("  2441,00\n"), "2441.00");
    }

    #[test]
    fn test_comma_followed_by_three_digits_is_fractional() {
        assert_eq!(normalize_number("12,345"), "12.345");
        assert_eq!(normalize_number("2,992"), "2.992");
    }

    #[test]
    fn test_lone_dot_is_decimal_point() {
        assert_eq!(normalize_number("2.441"), "2.441");
        assert_eq!(normalize_number("943.21"), "943.21");
        assert_eq!(normalize_number("1350"), "1350");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["1.234,56", "1 234,56", "12,345", "2.441", "2441,00", "1.234.567", "7"] {
            let once = normalize_number(raw);
            assert_eq!(normalize_number(&once), once, "not idempotent for {raw}");
        }
    }

    #[test]
    fn test_depth_lone_dot_is_grouping() {
        assert_eq!(normalize_depth("1.350"), "1350");
        assert_eq!(normalize_depth("1.455"), "1455");
        assert_eq!(normalize_depth("1.350,31"), "1350.31");
        assert_eq!(normalize_depth("1200.5"), "1200.5");
        assert_eq!(normalize_depth("943.21"), "943.21");
        assert_eq!(normalize_depth(" 2441,00 "), "2441.00");
    }

    #[test]
    fn test_depth_output_is_canonical() {
        for raw in ["1.350", "1.234.567", "1 480,00", "980,0"] {
            let depth = normalize_depth(raw);
            assert_eq!(normalize_number(&depth), depth, "not canonical for {raw}");
        }
    }

    #[test]
    fn test_normalize_is_total() {
        assert_eq!(normalize_number(""), "");
        assert_eq!(normalize_number("abc"), "abc");
        assert_eq!(normalize_number("1.5,3"), "1.5.3");
    }

    #[test]
    fn test_render_depth() {
        assert_eq!(render_depth("1350.00").as_deref(), Some("1350"));
        assert_eq!(render_depth("980.0").as_deref(), Some("980"));
        assert_eq!(render_depth("1350.31").as_deref(), Some("1350.31"));
        assert_eq!(render_depth("1200.5").as_deref(), Some("1200.5"));
        assert_eq!(render_depth("12.346").as_deref(), Some("12.35"));
        assert_eq!(render_depth("1.5.3"), None);
    }
}
