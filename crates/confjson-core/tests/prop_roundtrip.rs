/// Property-based roundtrip tests.
///
/// Uses `proptest` to generate random configuration trees and verify that
/// `decode(encode(value)) == value` holds for all of them.
///
/// Strategies generate:
/// - strings with edge cases (empty, unicode, escapes, the reserved key as a *value*)
/// - all three numeric widths, with `Integer64` kept outside the `i32` range
///   (an in-range `Integer64` legitimately decodes as `Integer32`)
/// - arbitrary finite floats, including whole numbers
/// - nested sequences and mappings up to four levels deep
/// - `Vector` objects anywhere in the tree
///
/// Mapping keys never equal the reserved `"=="` key.
use confjson_core::{
    decode_str, encode_to_string, numeric, ConfigSerializable, ConfigValue, Fields, Registry,
    Vector,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_]{0,12}").unwrap(),
        Just("".to_string()),
        Just("with space".to_string()),
        Just("=".to_string()),
        Just("===".to_string()),
    ]
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,30}",
        Just("".to_string()),
        Just("==".to_string()),
        Just("42".to_string()),
        Just("4.0".to_string()),
        Just("null".to_string()),
        Just("line1\nline2".to_string()),
        Just("say \"hi\"".to_string()),
        Just("caf\u{00e9}".to_string()),
    ]
}

fn arb_int64_wide() -> impl Strategy<Value = i64> {
    prop_oneof![
        (i64::from(i32::MAX) + 1)..=i64::MAX,
        i64::MIN..=(i64::from(i32::MIN) - 1),
    ]
}

fn arb_finite_float() -> impl Strategy<Value = f64> {
    prop_oneof![
        any::<f64>().prop_filter("finite", |f| f.is_finite()),
        (-1_000_000i64..1_000_000i64).prop_map(|n| n as f64),
    ]
}

fn arb_vector() -> impl Strategy<Value = ConfigValue> {
    (arb_finite_float(), arb_finite_float(), arb_finite_float())
        .prop_map(|(x, y, z)| Vector::new(x, y, z).to_value())
}

fn arb_leaf() -> impl Strategy<Value = ConfigValue> {
    prop_oneof![
        Just(ConfigValue::Null),
        any::<bool>().prop_map(ConfigValue::Boolean),
        any::<i32>().prop_map(ConfigValue::Integer32),
        arb_int64_wide().prop_map(ConfigValue::Integer64),
        arb_finite_float().prop_map(ConfigValue::Float64),
        arb_text().prop_map(ConfigValue::Text),
        arb_vector(),
    ]
}

fn arb_value() -> impl Strategy<Value = ConfigValue> {
    arb_leaf().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(ConfigValue::Sequence),
            prop::collection::vec((arb_key(), inner), 0..6).prop_map(|pairs| {
                ConfigValue::Mapping(pairs.into_iter().collect::<Fields>())
            }),
        ]
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_roundtrip_identity(value in arb_value()) {
        let registry = Registry::with_builtins();
        let json = encode_to_string(&value, &registry).unwrap();
        let decoded = decode_str(&json, &registry).unwrap();
        prop_assert_eq!(decoded, value, "JSON was: {}", json);
    }

    #[test]
    fn prop_int32_width_preserved(n in any::<i32>()) {
        let registry = Registry::new();
        let json = encode_to_string(&ConfigValue::Integer32(n), &registry).unwrap();
        prop_assert_eq!(decode_str(&json, &registry).unwrap(), ConfigValue::Integer32(n));
    }

    #[test]
    fn prop_int64_width_preserved(n in arb_int64_wide()) {
        let registry = Registry::new();
        let json = encode_to_string(&ConfigValue::Integer64(n), &registry).unwrap();
        prop_assert_eq!(decode_str(&json, &registry).unwrap(), ConfigValue::Integer64(n));
    }

    #[test]
    fn prop_float_width_preserved(f in arb_finite_float()) {
        let registry = Registry::new();
        let json = encode_to_string(&ConfigValue::Float64(f), &registry).unwrap();
        prop_assert!(json.contains('.'), "float literal without decimal point: {}", json);
        prop_assert_eq!(decode_str(&json, &registry).unwrap(), ConfigValue::Float64(f));
    }

    #[test]
    fn prop_integer_literals_have_no_decimal_point(n in any::<i64>()) {
        let json = encode_to_string(&ConfigValue::Integer64(n), &Registry::new()).unwrap();
        prop_assert!(!json.contains('.'));
    }

    #[test]
    fn prop_classify_never_panics(s in "[-+0-9.eE]{0,24}") {
        let _ = numeric::classify_literal(&s);
    }

    #[test]
    fn prop_mapping_key_order_preserved(keys in prop::collection::vec(arb_key(), 0..10)) {
        let registry = Registry::new();
        let fields: Fields = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.clone(), ConfigValue::Integer32(i as i32)))
            .collect();
        let expected: Vec<String> = fields.keys().cloned().collect();
        let json = encode_to_string(&ConfigValue::Mapping(fields), &registry).unwrap();
        let decoded = decode_str(&json, &registry).unwrap();
        let actual: Vec<String> = decoded.as_fields().unwrap().keys().cloned().collect();
        prop_assert_eq!(actual, expected);
    }
}
