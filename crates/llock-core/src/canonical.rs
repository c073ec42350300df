//! # Canonical Serialization — JCS Byte Production
//!
//! `CanonicalBytes` is the sole construction path for bytes used as digest
//! input anywhere in Ledger-Lock.
//!
//! ## Security Invariant
//!
//! The inner field is private. The only constructors are `CanonicalBytes::new()`
//! and `CanonicalBytes::from_value()`, both of which run the coercion pipeline
//! before JCS serialization. Any function that hashes ledger content must accept
//! `&CanonicalBytes`, so hashing a non-canonical encoding is unrepresentable.
//!
//! ## Rules
//!
//! 1. **Reject floats.** Float formatting is the classic source of
//!    cross-platform digest drift. Amounts are integers and probabilities are
//!    integer basis points.
//! 2. **Timestamps** serialize through [`crate::Timestamp`] as
//!    `YYYY-MM-DDTHH:MM:SSZ`.
//! 3. **Keys** are sorted lexicographically (RFC 8785), independent of struct
//!    field order or map insertion order.
//!
//! After coercion, serialization uses `serde_jcs` for RFC 8785 (JSON
//! Canonicalization Scheme) output: sorted keys, compact separators, UTF-8.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS canonicalization with float rejection.
///
/// # Invariants
///
/// - All numbers are integers.
/// - Object keys are sorted; separators are compact.
/// - The same logical value always yields the same bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::FloatRejected` if the value contains a
    /// float. Returns `CanonicalizationError::SerializationFailed` if the value
    /// cannot be represented as JSON (e.g. a map with non-string keys).
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        Self::from_value(value)
    }

    /// Construct canonical bytes from an already-built JSON value.
    pub fn from_value(value: Value) -> Result<Self, CanonicalizationError> {
        let coerced = coerce_json_value(value)?;
        let bytes = serialize_canonical(&coerced)?;
        Ok(Self(bytes))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// View the canonical bytes as UTF-8 text.
    ///
    /// JCS output is always valid UTF-8, so this is lossless.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Recursively validate a JSON tree against the canonicalization rules.
///
/// 1. `null`, `bool`, `string`, integer: pass through unchanged.
/// 2. float: **rejected** with `FloatRejected`.
/// 3. `object`, `array`: recursed.
fn coerce_json_value(value: Value) -> Result<Value, CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(value),
        Value::Number(ref n) => {
            if n.is_f64() && !n.is_i64() && !n.is_u64() {
                if let Some(f) = n.as_f64() {
                    return Err(CanonicalizationError::FloatRejected(f));
                }
            }
            Ok(value)
        }
        Value::Object(map) => {
            let mut coerced = serde_json::Map::new();
            for (k, v) in map {
                coerced.insert(k, coerce_json_value(v)?);
            }
            Ok(Value::Object(coerced))
        }
        Value::Array(arr) => {
            let coerced: Result<Vec<_>, _> = arr.into_iter().map(coerce_json_value).collect();
            Ok(Value::Array(coerced?))
        }
    }
}

/// Serialize a JSON value in JCS-canonical form (RFC 8785).
fn serialize_canonical(value: &Value) -> Result<Vec<u8>, CanonicalizationError> {
    let s = serde_jcs::to_string(value)?;
    Ok(s.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_canonical_bytes_simple_dict() {
        let data = serde_json::json!({"b": 2, "a": 1, "c": "hello"});
        let cb = CanonicalBytes::new(&data).expect("should canonicalize");
        assert_eq!(cb.as_str(), r#"{"a":1,"b":2,"c":"hello"}"#);
    }

    #[test]
    fn test_struct_field_order_does_not_matter() {
        #[derive(Serialize)]
        struct Forward {
            previous_hash: &'static str,
            amount: u64,
        }
        #[derive(Serialize)]
        struct Backward {
            amount: u64,
            previous_hash: &'static str,
        }
        let a = CanonicalBytes::new(&Forward { previous_hash: "0", amount: 5000 }).unwrap();
        let b = CanonicalBytes::new(&Backward { amount: 5000, previous_hash: "0" }).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), r#"{"amount":5000,"previous_hash":"0"}"#);
    }

    #[test]
    fn test_map_insertion_order_does_not_matter() {
        let mut first = HashMap::new();
        first.insert("sender_id", "IN12345");
        first.insert("receiver_id", "US67890");
        let mut second = HashMap::new();
        second.insert("receiver_id", "US67890");
        second.insert("sender_id", "IN12345");
        assert_eq!(
            CanonicalBytes::new(&first).unwrap(),
            CanonicalBytes::new(&second).unwrap()
        );
    }

    #[test]
    fn test_canonical_bytes_nested() {
        let data = serde_json::json!({
            "outer": {"b": 2, "a": 1},
            "list": [3, 2, 1]
        });
        let cb = CanonicalBytes::new(&data).expect("should canonicalize");
        assert_eq!(cb.as_str(), r#"{"list":[3,2,1],"outer":{"a":1,"b":2}}"#);
    }

    #[test]
    fn test_float_rejection() {
        let data = serde_json::json!({"fraud_probability": 12.5});
        match CanonicalBytes::new(&data) {
            Err(CanonicalizationError::FloatRejected(f)) => assert_eq!(f, 12.5),
            other => panic!("expected FloatRejected, got: {other:?}"),
        }
    }

    #[test]
    fn test_integral_float_still_rejected() {
        // 5000.0 is a float on the wire even though it is integral.
        let data = serde_json::json!({"amount": 5000.0});
        assert!(CanonicalBytes::new(&data).is_err());
    }

    #[test]
    fn test_deeply_nested_float_rejected() {
        let data = serde_json::json!({"a": {"b": [{"c": 3.14}]}});
        assert!(CanonicalBytes::new(&data).is_err());
    }

    #[test]
    fn test_non_string_map_keys_rejected() {
        let mut data = HashMap::new();
        data.insert((1u8, 2u8), "tuple key");
        assert!(matches!(
            CanonicalBytes::new(&data),
            Err(CanonicalizationError::SerializationFailed(_))
        ));
    }

    #[test]
    fn test_null_and_bool_passthrough() {
        let data = serde_json::json!({"key": null, "flag": true});
        let cb = CanonicalBytes::new(&data).unwrap();
        assert_eq!(cb.as_str(), r#"{"flag":true,"key":null}"#);
    }

    #[test]
    fn test_empty_object() {
        let cb = CanonicalBytes::new(&serde_json::json!({})).unwrap();
        assert_eq!(cb.as_bytes(), b"{}");
        assert!(!cb.is_empty());
        assert_eq!(cb.len(), 2);
    }

    #[test]
    fn test_negative_and_large_integers() {
        let data = serde_json::json!({"neg": -42, "big": 9999999999i64});
        let cb = CanonicalBytes::new(&data).unwrap();
        assert_eq!(cb.as_str(), r#"{"big":9999999999,"neg":-42}"#);
    }

    #[test]
    fn test_unicode_passthrough() {
        let data = serde_json::json!({"name": "\u{00e9}\u{00e8}"});
        let cb = CanonicalBytes::new(&data).unwrap();
        assert!(cb.as_str().contains('\u{00e9}'));
    }

    #[test]
    fn test_reparse_reproduces_bytes() {
        let data = serde_json::json!({"z": [1, {"y": "x"}], "a": false});
        let cb = CanonicalBytes::new(&data).unwrap();
        let reparsed: Value = serde_json::from_slice(cb.as_bytes()).unwrap();
        assert_eq!(CanonicalBytes::from_value(reparsed).unwrap(), cb);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating JSON-compatible values without floats.
    fn json_value_no_floats() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| serde_json::json!(n)),
            "[a-zA-Z0-9_ ]{0,50}".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 64, 8, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,10}", inner, 0..8).prop_map(|m| {
                    let map: serde_json::Map<String, Value> = m.into_iter().collect();
                    Value::Object(map)
                }),
            ]
        })
    }

    proptest! {
        #[test]
        fn canonical_bytes_never_fails_without_floats(value in json_value_no_floats()) {
            let result = CanonicalBytes::new(&value);
            prop_assert!(result.is_ok(), "canonicalization failed: {:?}", result.err());
        }

        #[test]
        fn canonical_bytes_deterministic(value in json_value_no_floats()) {
            let a = CanonicalBytes::new(&value).unwrap();
            let b = CanonicalBytes::new(&value).unwrap();
            prop_assert_eq!(a.as_bytes(), b.as_bytes());
        }

        /// Parsing canonical output and canonicalizing again is a fixed point.
        #[test]
        fn canonical_bytes_reparse_fixed_point(value in json_value_no_floats()) {
            let cb = CanonicalBytes::new(&value).unwrap();
            let parsed: Value = serde_json::from_slice(cb.as_bytes()).unwrap();
            let again = CanonicalBytes::from_value(parsed).unwrap();
            prop_assert_eq!(cb.as_bytes(), again.as_bytes());
        }

        #[test]
        fn float_always_rejected(f in any::<f64>().prop_filter("finite non-integer", |f| {
            f.fract() != 0.0 && f.is_finite()
        })) {
            let data = serde_json::json!({"val": f});
            prop_assert!(CanonicalBytes::new(&data).is_err());
        }
    }
}
