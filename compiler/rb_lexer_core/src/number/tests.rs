use super::*;
use pretty_assertions::assert_eq;

fn int(text: &str) -> i64 {
    match scan_number(text).value {
        NumericValue::Integer(value) => value,
        other => panic!("{text}: expected integer, got {other:?}"),
    }
}

fn float(text: &str) -> f64 {
    match scan_number(text).value {
        NumericValue::Float(value) => value,
        other => panic!("{text}: expected float, got {other:?}"),
    }
}

fn big(text: &str) -> String {
    match scan_number(text).value {
        NumericValue::Big(value) => value.to_string(),
        other => panic!("{text}: expected bignum, got {other:?}"),
    }
}

fn kinds(text: &str) -> Vec<IssueKind> {
    scan_number(text).issues.iter().map(|i| i.kind).collect()
}

// === Integers ===

#[test]
fn zeros() {
    assert_eq!(int("0"), 0);
    assert_eq!(int("0000"), 0);
    assert_eq!(
        int("0_0_00000_0_0_00000000000000000000_00_00000000000000000000000000000"),
        0
    );
}

#[test]
fn octal() {
    assert_eq!(int("0777"), 0o777);
    assert_eq!(int("000000000000000000000000000000000000076541"), 0o76541);
    assert_eq!(int("0o000_000000000000000000000000000000000076541"), 0o76541);
    assert_eq!(int("0o0"), 0);
}

#[test]
fn hex_binary_decimal_prefixes() {
    assert_eq!(int("0x0"), 0);
    assert_eq!(int("0xa_F"), 0xaf);
    assert_eq!(int("0x000000_0000000000000000000aF"), 0xaf);
    assert_eq!(int("0b0"), 0);
    assert_eq!(int("0b000000000000_000000000000000000000000000101"), 5);
    assert_eq!(int("0d0"), 0);
    assert_eq!(int("0d00000000_0000000000000000000000000000000101"), 101);
}

#[test]
fn decimal() {
    assert_eq!(int("1"), 1);
    assert_eq!(int("1_000_000"), 1_000_000);
    assert_eq!(int("9223372036854775807"), i64::MAX);
}

#[test]
fn overflow_promotes_to_bignum() {
    assert_eq!(big("9223372036854775808"), "9223372036854775808");
    assert_eq!(
        big("0x10000000000_00000000000000aF"),
        "20282409603651670423947251286191"
    );
    assert_eq!(
        big("0d10000000_0000000000000000000000_000000000101"),
        "100000000000000000000000000000000000000101"
    );
    assert_eq!(
        big("0100000000000000_000000000000000000000076541"),
        "10633823966279326983230456482242788705"
    );
}

#[test]
fn wide_values_that_fit_stay_native() {
    assert_eq!(
        int("0b10000000_0000000000000000000000000000000101"),
        2_199_023_255_557
    );
}

#[test]
fn integer_length_stops_before_dot() {
    let literal = scan_number("1.");
    assert_eq!(literal.value, NumericValue::Integer(1));
    assert_eq!(literal.len, 1);
    assert!(literal.issues.is_empty());

    assert_eq!(scan_number("1._1").len, 1);
    assert_eq!(scan_number("122312.   1212").len, 6);
    assert_eq!(scan_number("1.e").len, 1);
}

// === Floats ===

#[test]
fn floats() {
    assert_eq!(float("0.0"), 0.0);
    assert_eq!(float("0e-000"), 0.0);
    assert_eq!(float("0e2"), 0.0);
    assert_eq!(float("0e+2"), 0.0);
    assert_eq!(float("1e2"), 100.0);
    assert_eq!(float("1e+2"), 100.0);
    assert_eq!(float("1e-2"), 0.01);
    assert_eq!(float("3_1_3_2_1_3_2_1_3_5_4_6_5_3_1_3_2.0"), 31_321_321_354_653_132.0);
    assert_eq!(float("1_3_2.3_1_3_2_1_3"), 132.313_213);
    assert_eq!(float("1.1e-0"), 1.1);
    assert_eq!(float("1.1e+0"), 1.1);
    assert_eq!(float("1.1e0"), 1.1);
    assert_eq!(float("1.1e-1"), 0.11);
    assert_eq!(float("1_2.4_5e2_2"), 12.45e22);
    assert_eq!(float("4.94065645841247e-324"), f64::from_bits(1));
}

#[test]
fn float_range() {
    assert_eq!(float("1.1e-300"), 1.1e-300);
    assert!(kinds("1.1e-300").is_empty());

    assert_eq!(float("1.1e-1021"), 0.0);
    assert_eq!(kinds("1.1e-1021"), vec![IssueKind::FloatOutOfRange]);

    assert_eq!(float("1.1e1024"), f64::INFINITY);
    assert_eq!(kinds("1.1e1024"), vec![IssueKind::FloatOutOfRange]);

    assert_eq!(float("1.1e1025"), f64::INFINITY);
    assert_eq!(kinds("1.1e1025"), vec![IssueKind::FloatOutOfRange]);

    assert_eq!(float("1.1e-30000"), 0.0);
    assert_eq!(kinds("1.1e-30000"), vec![IssueKind::FloatOutOfRange]);

    let huge = "1.1e3_1_3_2_1_3_2_1_3_5_4_6_5_3_1_3_2";
    assert_eq!(float(huge), f64::INFINITY);
    assert_eq!(kinds(huge), vec![IssueKind::FloatOutOfRange]);
}

#[test]
fn float_clamping_is_reported() {
    assert_eq!(float("1e400"), f64::INFINITY);
    assert_eq!(kinds("1e400"), vec![IssueKind::FloatOutOfRange]);

    assert_eq!(float("1e-400"), 0.0);
    assert_eq!(kinds("1e-400"), vec![IssueKind::FloatOutOfRange]);

    let long = format!("1{}.0", "0".repeat(400));
    assert_eq!(float(&long), f64::INFINITY);
    assert_eq!(kinds(&long), vec![IssueKind::FloatOutOfRange]);

    // Zero digits are not an underflow.
    assert_eq!(float("0.0e-400"), 0.0);
    assert!(kinds("0.0e-400").is_empty());
    assert!(kinds("0.0").is_empty());
}

// === Malformed ===

#[test]
fn underscores() {
    assert_eq!(int("12__1212"), 12);
    assert_eq!(kinds("12__1212"), vec![IssueKind::TrailingUnderscore]);
    assert_eq!(scan_number("12__1212").len, 3);

    assert_eq!(int("123_.123"), 123);
    assert_eq!(kinds("123_.123"), vec![IssueKind::TrailingUnderscore]);

    for text in ["0_8", "0_x", "0_"] {
        assert_eq!(int(text), 0, "{text}");
        assert_eq!(kinds(text), vec![IssueKind::TrailingUnderscore], "{text}");
    }
}

#[test]
fn illegal_octal_reads_decimal() {
    assert_eq!(int("08"), 8);
    assert_eq!(kinds("08"), vec![IssueKind::IllegalOctalDigit]);
}

#[test]
fn prefix_without_digits() {
    for text in ["0x_", "0x", "0x_1"] {
        assert_eq!(int(text), 0, "{text}");
        assert_eq!(kinds(text), vec![IssueKind::NumericLiteralWithoutDigits], "{text}");
    }
    // The underscore is not part of the literal.
    assert_eq!(scan_number("0x_1").len, 2);
}

#[test]
fn no_floating_literal_after_prefix() {
    assert_eq!(int("00.0"), 0);
    assert_eq!(kinds("00.0"), vec![IssueKind::NoFloatingLiteral]);
    assert!(kinds("00.foo").is_empty());
    assert!(kinds("00.e-1").is_empty());

    assert_eq!(int("0x.0"), 0);
    assert_eq!(
        kinds("0x.0"),
        vec![IssueKind::NumericLiteralWithoutDigits, IssueKind::NoFloatingLiteral]
    );
    assert_eq!(kinds("0x.foo"), vec![IssueKind::NumericLiteralWithoutDigits]);
}

#[test]
fn dangling_exponent() {
    assert_eq!(float("1.2e"), 1.2);
    assert_eq!(kinds("1.2e"), vec![IssueKind::TrailingE]);

    assert_eq!(int("1e"), 1);
    assert_eq!(kinds("1e"), vec![IssueKind::TrailingE]);

    assert_eq!(int("1e-"), 1);
    assert_eq!(kinds("1e-"), vec![IssueKind::TrailingMinus]);
    assert_eq!(scan_number("1e-").len, 1);

    assert_eq!(int("1e+"), 1);
    assert_eq!(kinds("1e+"), vec![IssueKind::TrailingPlus]);
}

#[test]
fn octal_stops_at_exponent_marker() {
    assert_eq!(int("01234e12"), 0o1234);
    assert_eq!(scan_number("01234e12").len, 5);
}

// === Integer() parsing ===

#[test]
fn parse_integer_vectors() {
    let small = |text: &str, base: u32| match parse_integer(text, base) {
        NumericValue::Integer(value) => value,
        other => panic!("{text:?}: {other:?}"),
    };

    assert_eq!(small("", 0), 0);
    assert_eq!(small("", 16), 0);
    assert_eq!(small("    ", 0), 0);
    assert_eq!(small("-", 0), 0);
    assert_eq!(small("+", 0), 0);
    assert_eq!(small("0", 0), 0);
    assert_eq!(small("00", 0), 0);
    assert_eq!(small("0x", 0), 0);
    assert_eq!(small("-0x", 0), 0);
    assert_eq!(small("+0x", 0), 0);
    assert_eq!(small("  1234   ", 0), 1234);
    assert_eq!(small("  1_2_3_4   ", 0), 1234);
    assert_eq!(small("  _1234   ", 0), 0);
    assert_eq!(small("  12a34   ", 0), 12);
    assert_eq!(small("  1_2__34   ", 0), 12);
    assert_eq!(small("  -1_2", 0), -12);
    assert_eq!(small("0x1234", 0), 0x1234);
    assert_eq!(small("0x1234", 10), 0);
    assert_eq!(small("0x1234", 16), 0x1234);
    assert_eq!(small("0b102", 0), 2);
    assert_eq!(small("0b1000000_000000_0000000", 0), 524_288);
    assert_eq!(small("-0b1000000_000000_0000000", 0), -524_288);
}

#[test]
fn parse_integer_bignums() {
    let text = |value: NumericValue| match value {
        NumericValue::Big(value) => value.to_string(),
        other => panic!("{other:?}"),
    };
    assert_eq!(
        text(parse_integer("1000_000000_0000000000", 0)),
        "10000000000000000000"
    );
    assert_eq!(
        text(parse_integer("1000000_000000_0000000", 16)),
        "75557863725914323419136"
    );
    assert_eq!(
        text(parse_integer("0x1000000_000000_0000000", 0)),
        "75557863725914323419136"
    );
    assert_eq!(
        text(parse_integer("-1000_000000_0000000000", 0)),
        "-10000000000000000000"
    );
}

#[test]
fn parse_integer_demotes_at_i64_min() {
    assert_eq!(
        parse_integer("-9223372036854775808", 10),
        NumericValue::Integer(i64::MIN)
    );
}
