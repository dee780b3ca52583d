//! Numeric codec tests: parsing, formatting round trips, rounding

use schem::core::numeric::{
    format, format_engineering, order_of_magnitude, parse, round_to_significant_digits, split,
    NumericError, Suffix,
};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= expected.abs() * 1e-12,
        "expected {}, got {}",
        expected,
        actual
    );
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_parse_then_format_recovers_numeral() {
    let cases = [
        ("1k", 1000.0, Suffix::Kilo),
        ("1.5M", 1_500_000.0, Suffix::Mega),
        ("2.2u", 2.2e-9, Suffix::Micro),
        ("3p", 3e-12, Suffix::Pico),
        ("470n", 470e-6, Suffix::Nano),
        ("10m", 0.01, Suffix::Milli),
        ("1G", 1e9, Suffix::Giga),
    ];

    for (text, expected, suffix) in cases {
        let value = parse(text);
        assert_close(value, expected);
        assert_eq!(format(value, suffix).unwrap(), text, "round trip of {}", text);
    }
}

#[test]
fn test_scientific_matches_suffixed() {
    assert_close(parse("1e-3"), 0.001);
    assert_close(parse("1e-3"), parse("1m"));
    assert_close(parse("4.7E3"), parse("4.7k"));
    assert_eq!(format(parse("1e-3"), Suffix::Milli).unwrap(), "1m");
}

#[test]
fn test_split_then_parse_agree() {
    for text in ["4.7k", "100", "22n", "0.5M"] {
        let (mantissa, suffix) = split(text).unwrap();
        let rebuilt = format!("{}{}", mantissa, suffix);
        assert_eq!(rebuilt, text);
        assert_close(parse(&rebuilt), parse(text));
    }
}

#[test]
fn test_engineering_format_of_parsed_values() {
    assert_eq!(format_engineering(parse("4700")).unwrap(), "4.7k");
    assert_eq!(format_engineering(parse("0.0022")).unwrap(), "2.2m");
    assert_eq!(format_engineering(parse("1.2345678M")).unwrap(), "1.23457M");
}

// ============================================================================
// Rounding
// ============================================================================

#[test]
fn test_rounding_reference_values() {
    assert_eq!(round_to_significant_digits(123456789.0, 6).unwrap(), 123457000.0);
    assert_eq!(round_to_significant_digits(0.0001234567, 6).unwrap(), 0.000123457);
    assert_eq!(round_to_significant_digits(-42.0, 6).unwrap(), -42.0);
}

#[test]
fn test_rounding_keeps_exact_values() {
    for value in [1.0, 47.0, 0.5, 3.3, 250.0] {
        assert_eq!(round_to_significant_digits(value, 6).unwrap(), value);
    }
}

// ============================================================================
// Malformed input and domain errors
// ============================================================================

#[test]
fn test_malformed_parse_is_nan() {
    for text in ["abc", "1x", "--5", "k", "1.2.3", "1 k", "e5"] {
        assert!(parse(text).is_nan(), "{:?} should not parse", text);
    }
}

#[test]
fn test_domain_errors() {
    assert!(matches!(
        order_of_magnitude(parse("abc")),
        Err(NumericError::InvalidArgument(_))
    ));
    assert!(matches!(
        round_to_significant_digits(parse("--5"), 6),
        Err(NumericError::InvalidArgument(_))
    ));
    assert!(matches!(split("2e3"), Err(NumericError::MalformedNumber(_))));
    assert_eq!(order_of_magnitude(parse("2.2k")).unwrap(), 3);
}
