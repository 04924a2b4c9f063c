use crate::interpreter::constants::RESULT_PRECISION;
use crate::parser::ast::{ArithOp, Comparator};
use crate::parser::lexer::is_space;

/// Failure of a single arithmetic step
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,
}

/// Read operand text as a decimal number.
///
/// After leading ASCII whitespace, the longest prefix of the form
/// `[+-]digits[.digits][e[+-]digits]` counts. Text with no such prefix (or no
/// text at all) is zero; hexadecimal and `inf`/`nan` spellings are not numbers
/// here.
pub fn parse_number(text: Option<&str>) -> f64 {
    let Some(text) = text else {
        return 0.0;
    };
    let s = text.trim_start_matches(is_space);
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        digits += frac_end - (end + 1);
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(0.0)
}

/// Fixed two-decimal rendering used for every arithmetic result
pub fn format_number(value: f64) -> String {
    format!("{:.*}", RESULT_PRECISION, value)
}

/// Apply one arithmetic operator to two operand texts.
///
/// A zero right operand of `/` is an error; callers report it and use zero.
pub fn arithmetic(
    left: Option<&str>,
    op: ArithOp,
    right: Option<&str>,
) -> Result<String, ArithmeticError> {
    let a = parse_number(left);
    let b = parse_number(right);

    let result = match op {
        ArithOp::Add => a + b,
        ArithOp::Sub => a - b,
        ArithOp::Mul => a * b,
        ArithOp::Div => {
            if b == 0.0 {
                return Err(ArithmeticError::DivisionByZero);
            }
            a / b
        }
    };

    Ok(format_number(result))
}

/// Numeric comparison of two operand texts; no comparator means false.
pub fn compare(left: Option<&str>, comparator: Option<Comparator>, right: Option<&str>) -> bool {
    let a = parse_number(left);
    let b = parse_number(right);

    match comparator {
        Some(Comparator::Lt) => a < b,
        Some(Comparator::Gt) => a > b,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_prefixes() {
        assert_eq!(parse_number(Some("42")), 42.0);
        assert_eq!(parse_number(Some("  -3.5abc")), -3.5);
        assert_eq!(parse_number(Some("2.00")), 2.0);
        assert_eq!(parse_number(Some("1e3")), 1000.0);
        assert_eq!(parse_number(Some("7e")), 7.0);
        assert_eq!(parse_number(Some(".5")), 0.5);
        assert_eq!(parse_number(Some("5.")), 5.0);
    }

    #[test]
    fn test_parse_number_non_numeric_is_zero() {
        assert_eq!(parse_number(None), 0.0);
        assert_eq!(parse_number(Some("")), 0.0);
        assert_eq!(parse_number(Some("abc")), 0.0);
        assert_eq!(parse_number(Some("-")), 0.0);
        assert_eq!(parse_number(Some(".")), 0.0);
    }

    #[test]
    fn test_parse_number_is_decimal_only() {
        assert_eq!(parse_number(Some("0x1A")), 0.0);
        assert_eq!(parse_number(Some("inf")), 0.0);
        assert_eq!(parse_number(Some("-infinity")), 0.0);
        assert_eq!(parse_number(Some("nan")), 0.0);
        assert_eq!(parse_number(Some("\u{a0}5")), 0.0);
        assert_eq!(parse_number(Some("\t\x0b5")), 5.0);
    }

    #[test]
    fn test_arithmetic_formats_two_decimals() {
        assert_eq!(arithmetic(Some("2"), ArithOp::Add, Some("3")), Ok("5.00".to_string()));
        assert_eq!(arithmetic(Some("2"), ArithOp::Sub, Some("3")), Ok("-1.00".to_string()));
        assert_eq!(arithmetic(Some("2.5"), ArithOp::Mul, Some("4")), Ok("10.00".to_string()));
        assert_eq!(arithmetic(Some("1"), ArithOp::Div, Some("3")), Ok("0.33".to_string()));
        assert_eq!(arithmetic(Some("2"), ArithOp::Div, Some("3")), Ok("0.67".to_string()));
    }

    #[test]
    fn test_arithmetic_absent_operands_are_zero() {
        assert_eq!(arithmetic(None, ArithOp::Add, Some("4")), Ok("4.00".to_string()));
        assert_eq!(arithmetic(Some("hi"), ArithOp::Mul, None), Ok("0.00".to_string()));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            arithmetic(Some("5"), ArithOp::Div, Some("0")),
            Err(ArithmeticError::DivisionByZero)
        );
        assert_eq!(
            arithmetic(Some("5"), ArithOp::Div, None),
            Err(ArithmeticError::DivisionByZero)
        );
        assert_eq!(
            arithmetic(Some("5"), ArithOp::Div, Some("0.00")),
            Err(ArithmeticError::DivisionByZero)
        );
    }

    #[test]
    fn test_compare() {
        assert!(compare(Some("1"), Some(Comparator::Lt), Some("2")));
        assert!(!compare(Some("1"), Some(Comparator::Gt), Some("2")));
        assert!(compare(Some("3.00"), Some(Comparator::Gt), Some("2")));
        assert!(!compare(Some("2"), Some(Comparator::Lt), Some("2.00")));
        assert!(compare(None, Some(Comparator::Lt), Some("1")));
        assert!(!compare(Some("1"), None, Some("2")));
    }
}
