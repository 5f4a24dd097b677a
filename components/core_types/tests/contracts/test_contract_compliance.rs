//! Contract compliance tests for core_types
//!
//! These tests verify the surface other components rely on: variant set,
//! trait implementations and conversion helpers.

use core_types::{ErrorKind, JsError, Value};
use num_bigint::BigInt;

#[cfg(test)]
mod value_contract_tests {
    use super::*;

    /// Contract: Value enum must have all specified variants
    #[test]
    fn test_value_has_undefined_variant() {
        let _: Value = Value::Undefined;
    }

    #[test]
    fn test_value_has_null_variant() {
        let _: Value = Value::Null;
    }

    #[test]
    fn test_value_has_boolean_variant() {
        let _: Value = Value::Boolean(true);
        let _: Value = Value::Boolean(false);
    }

    #[test]
    fn test_value_has_smi_variant() {
        let _: Value = Value::Smi(0);
        let _: Value = Value::Smi(i32::MAX);
        let _: Value = Value::Smi(i32::MIN);
    }

    #[test]
    fn test_value_has_double_variant() {
        let _: Value = Value::Double(0.0);
        let _: Value = Value::Double(f64::MAX);
    }

    #[test]
    fn test_value_has_string_variant() {
        let _: Value = Value::String(String::new());
    }

    #[test]
    fn test_value_has_bigint_variant() {
        let _: Value = Value::BigInt(BigInt::from(0));
    }

    #[test]
    fn test_value_has_list_variant() {
        let _: Value = Value::List(Vec::new());
    }

    #[test]
    fn test_value_has_error_variant() {
        let _: Value = Value::Error(JsError::type_error("t"));
    }

    /// Contract: Value must be cloneable, comparable and printable
    #[test]
    fn test_value_traits() {
        let value = Value::Smi(1);
        let cloned = value.clone();
        assert_eq!(value, cloned);
        assert_eq!(format!("{value}"), "1");
        assert!(format!("{value:?}").contains("Smi"));
    }
}

#[cfg(test)]
mod error_contract_tests {
    use super::*;

    /// Contract: ErrorKind must expose the runtime's error constructors
    #[test]
    fn test_error_kind_variants() {
        let _: ErrorKind = ErrorKind::Error;
        let _: ErrorKind = ErrorKind::TypeError;
        let _: ErrorKind = ErrorKind::RangeError;
    }

    /// Contract: JsError must expose kind and message fields
    #[test]
    fn test_js_error_fields() {
        let error = JsError::new(ErrorKind::TypeError, "m");
        let _: &ErrorKind = &error.kind;
        let _: &String = &error.message;
    }

    /// Contract: JsError must implement std::error::Error
    #[test]
    fn test_js_error_is_std_error() {
        fn assert_error<E: std::error::Error>(_e: &E) {}
        assert_error(&JsError::type_error("m"));
    }
}
