//! End-to-end formatting, comparison, codec, and arithmetic scenarios.

use num_bigint::BigInt;
use numtower::{
    compare, float_divmod, float_mod, float_power, format_str, hex_decode, hex_encode,
    number_hash, Error, FormatSpec, Locale, Number, SignMode,
};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::str::FromStr;

fn fmt(value: impl Into<Number>, spec: &str) -> String {
    format_str(&value.into(), spec).unwrap()
}

fn dec(text: &str) -> Number {
    Number::Decimal(Decimal::from_str(text).unwrap())
}

#[test]
fn test_float_fixed_precision() {
    assert_eq!(fmt(1234.5, ".2f"), "1234.50");
    assert_eq!(fmt(-1234.5, ".2f"), "-1234.50");
    assert_eq!(fmt(0.125, ".2f"), "0.12");
    assert_eq!(fmt(1234.5678, ",.1f"), "1,234.6");
}

#[test]
fn test_float_default_thresholds() {
    assert_eq!(fmt(0.00009, ""), "9e-05");
    assert_eq!(fmt(0.0001, ""), "0.0001");
    assert_eq!(fmt(1e12, ""), "1e+12");
    assert_eq!(fmt(999999999999.0, ""), "999999999999.0");
    assert_eq!(fmt(2.0, ""), "2.0");
    assert_eq!(fmt(-0.0, ""), "-0.0");
}

#[test]
fn test_int_presentation_codes() {
    assert_eq!(fmt(255, "x"), "ff");
    assert_eq!(fmt(255, "#X"), "0XFF");
    assert_eq!(fmt(-255, "#x"), "-0xff");
    assert_eq!(fmt(8, "o"), "10");
    assert_eq!(fmt(5, "b"), "101");
    assert_eq!(fmt(65, "c"), "A");
    assert_eq!(fmt(1234567, ",d"), "1,234,567");
}

#[test]
fn test_int_float_presentation() {
    assert_eq!(fmt(5, ".2f"), "5.00");
    assert_eq!(fmt(1234567, "e"), "1.234567e+06");
    assert_eq!(fmt(5, "%"), "500.000000%");
    let big = BigInt::from_str("123456789012345678901234567890").unwrap();
    assert_eq!(fmt(Number::Int(big), ".3e"), "1.235e+29");
}

#[test]
fn test_alignment_and_fill() {
    assert_eq!(fmt(-42, "*>8"), "*****-42");
    assert_eq!(fmt(-42, "*<8"), "-42*****");
    assert_eq!(fmt(-42, "*^8"), "**-42***");
    assert_eq!(fmt(-42, "*=8"), "-*****42");
    assert_eq!(fmt(5, "08.2f"), "00005.00");
    assert_eq!(fmt(-5, "08.2f"), "-0005.00");
}

#[test]
fn test_sign_modes() {
    assert_eq!(fmt(42, "+d"), "+42");
    assert_eq!(fmt(42, " d"), " 42");
    assert_eq!(fmt(-42, "+d"), "-42");
    assert_eq!(fmt(0.0, "+.1f"), "+0.0");
    assert_eq!(fmt(-0.0, "+.1f"), "-0.0");
}

#[test]
fn test_decimal_formatting() {
    assert_eq!(fmt(dec("123.456"), ".2f"), "123.46");
    assert_eq!(fmt(dec("2.675"), ".2f"), "2.68");
    assert_eq!(fmt(dec("0.25"), ".1%"), "25.0%");
    assert_eq!(fmt(dec("2"), ""), "2.0");
    assert_eq!(fmt(dec("-1234.5"), ",.1f"), "-1,234.5");
}

#[test]
fn test_locale_separators() {
    let de = Locale {
        decimal_point: ',',
        thousands_sep: '.',
        use_grouping: true,
    };
    let spec = FormatSpec::default().with_type_code('n');
    let text =
        numtower::format_number_with_locale(&Number::from(1234.5), &spec, &de).unwrap();
    assert_eq!(text, "1.234,5");
}

#[test]
fn test_format_errors() {
    assert!(matches!(
        format_str(&Number::from(1), ".2d"),
        Err(Error::Value(_))
    ));
    assert!(matches!(
        format_str(&Number::from(1.5), "x"),
        Err(Error::Value(_))
    ));
    assert!(matches!(
        format_str(&Number::from(256), "c"),
        Err(Error::Overflow(_))
    ));
    assert!(matches!(
        format_str(&Number::from(1), ".q"),
        Err(Error::Value(_))
    ));
}

#[test]
fn test_cross_kind_ordering() {
    assert_eq!(compare(&Number::from(2), &Number::from(2.0)), Ordering::Equal);
    assert_eq!(compare(&Number::from(2), &Number::from(2.5)), Ordering::Less);
    assert_eq!(compare(&Number::from(2.5), &dec("2.5")), Ordering::Equal);
    assert_eq!(compare(&Number::from(0.1), &dec("0.1")), Ordering::Greater);
    assert_eq!(
        compare(&Number::from(f64::NAN), &Number::from(f64::NEG_INFINITY)),
        Ordering::Greater
    );
    assert_eq!(
        compare(&Number::from(f64::NAN), &Number::from(i64::MIN)),
        Ordering::Less
    );
}

#[test]
fn test_hash_agrees_with_equality() {
    let pairs = [
        (Number::from(2), Number::from(2.0)),
        (Number::from(2), dec("2.000")),
        (Number::from(0.5), dec("0.5")),
        (Number::from(-2.5), dec("-2.5")),
        (Number::from(0), Number::from(-0.0)),
    ];
    for (a, b) in pairs {
        assert_eq!(compare(&a, &b), Ordering::Equal, "{a:?} vs {b:?}");
        assert_eq!(number_hash(&a), number_hash(&b), "{a:?} vs {b:?}");
    }
}

#[test]
fn test_hex_codec_round_trip() {
    assert_eq!(hex_decode("0x1.8p+1").unwrap(), 3.0);
    assert_eq!(hex_encode(3.0), "0x1.8p+1");
    for value in [0.1, -2.5, 1e-300, f64::MAX, 5e-324] {
        assert_eq!(
            hex_decode(&hex_encode(value)).unwrap().to_bits(),
            value.to_bits()
        );
    }
    assert!(matches!(hex_decode(""), Err(Error::Value(_))));
    assert!(matches!(hex_decode("0x1p1024"), Err(Error::Overflow(_))));
}

#[test]
fn test_floored_arithmetic() {
    assert_eq!(float_mod(5.0, -3.0).unwrap(), -1.0);
    assert_eq!(float_mod(-5.0, 3.0).unwrap(), 1.0);
    assert_eq!(float_divmod(-7.0, 2.0).unwrap(), (-4.0, 1.0));
    assert!(matches!(float_mod(1.0, 0.0), Err(Error::ZeroDivision(_))));
    assert!(matches!(
        float_power(0.0, -1.0),
        Err(Error::ZeroDivision(_))
    ));
    assert!(matches!(float_power(-2.0, 0.5), Err(Error::Value(_))));
    assert_eq!(float_power(-2.0, 3.0).unwrap(), -8.0);
}

#[test]
fn test_builder_spec_matches_parsed() {
    let parsed = FormatSpec::parse("+,.2f").unwrap();
    let built = FormatSpec::default()
        .with_sign(SignMode::Plus)
        .with_thousands()
        .with_precision(2)
        .with_type_code('f');
    assert_eq!(parsed, built);
    assert_eq!(
        format_str(&Number::from(1234.5), "+,.2f").unwrap(),
        "+1,234.50"
    );
}
