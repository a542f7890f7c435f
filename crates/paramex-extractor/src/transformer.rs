//! Lenient coercion of a recovered object into typed outputs

use crate::types::ExtractedObject;
use indexmap::IndexMap;
use paramex_domain::{ParameterSpec, ParameterType, ParameterValue};
use serde_json::Value;

/// Coerce `object` into exactly one typed value per declared parameter
///
/// Values that cannot be coerced are dropped and replaced by the type's
/// default, in declaration order.
pub fn transform_result(
    object: &ExtractedObject,
    parameters: &[ParameterSpec],
) -> IndexMap<String, ParameterValue> {
    parameters
        .iter()
        .map(|parameter| {
            let value = object
                .get(&parameter.name)
                .and_then(|raw| coerce(raw, parameter.parameter_type))
                .unwrap_or_else(|| ParameterValue::default_for(parameter.parameter_type));
            (parameter.name.clone(), value)
        })
        .collect()
}

/// The all-defaults object used when nothing could be recovered
pub fn default_object(parameters: &[ParameterSpec]) -> ExtractedObject {
    parameters
        .iter()
        .map(|p| (p.name.clone(), ParameterValue::default_for(p.parameter_type).to_json()))
        .collect()
}

/// Coerce one raw value, `None` when it cannot be typed
pub fn coerce(raw: &Value, parameter_type: ParameterType) -> Option<ParameterValue> {
    match parameter_type {
        ParameterType::Number => coerce_number(raw),
        ParameterType::Bool => coerce_bool(raw),
        ParameterType::String | ParameterType::Select => {
            raw.as_str().map(|s| ParameterValue::String(s.to_string()))
        }
    }
}

fn coerce_number(raw: &Value) -> Option<ParameterValue> {
    match raw {
        Value::Number(n) => number_value(n),
        Value::String(s) => {
            let s = s.trim();
            if s.contains('.') {
                s.parse::<f64>().ok().filter(|f| f.is_finite()).map(ParameterValue::Float)
            } else {
                s.parse::<i64>().ok().map(ParameterValue::Int)
            }
        }
        _ => None,
    }
}

fn number_value(n: &serde_json::Number) -> Option<ParameterValue> {
    n.as_i64()
        .map(ParameterValue::Int)
        .or_else(|| n.as_f64().map(ParameterValue::Float))
}

fn coerce_bool(raw: &Value) -> Option<ParameterValue> {
    match raw {
        Value::Bool(b) => Some(ParameterValue::Bool(*b)),
        Value::String(s) => match s.to_lowercase().as_str() {
            "true" => Some(ParameterValue::Bool(true)),
            "false" => Some(ParameterValue::Bool(false)),
            _ => None,
        },
        Value::Number(n) if n.is_i64() || n.is_u64() => {
            Some(ParameterValue::Bool(n.as_i64() != Some(0)))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> ExtractedObject {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {}", other),
        }
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(coerce(&json!("3.14"), ParameterType::Number), Some(ParameterValue::Float(3.14)));
        assert_eq!(coerce(&json!("42"), ParameterType::Number), Some(ParameterValue::Int(42)));
        assert_eq!(coerce(&json!(" -7 "), ParameterType::Number), Some(ParameterValue::Int(-7)));
        assert_eq!(coerce(&json!("abc"), ParameterType::Number), None);
        assert_eq!(coerce(&json!("1e5"), ParameterType::Number), None);
        assert_eq!(coerce(&json!(5), ParameterType::Number), Some(ParameterValue::Int(5)));
        assert_eq!(coerce(&json!(2.5), ParameterType::Number), Some(ParameterValue::Float(2.5)));
        assert_eq!(coerce(&json!(true), ParameterType::Number), None);
        assert_eq!(coerce(&json!(null), ParameterType::Number), None);
    }

    #[test]
    fn test_boolean_coercion() {
        assert_eq!(coerce(&json!("True"), ParameterType::Bool), Some(ParameterValue::Bool(true)));
        assert_eq!(coerce(&json!("false"), ParameterType::Bool), Some(ParameterValue::Bool(false)));
        assert_eq!(coerce(&json!(1), ParameterType::Bool), Some(ParameterValue::Bool(true)));
        assert_eq!(coerce(&json!(0), ParameterType::Bool), Some(ParameterValue::Bool(false)));
        assert_eq!(coerce(&json!(-3), ParameterType::Bool), Some(ParameterValue::Bool(true)));
        assert_eq!(coerce(&json!("yes"), ParameterType::Bool), None);
        assert_eq!(coerce(&json!(0.5), ParameterType::Bool), None);
        assert_eq!(coerce(&json!(false), ParameterType::Bool), Some(ParameterValue::Bool(false)));
    }

    #[test]
    fn test_string_coercion() {
        assert_eq!(
            coerce(&json!("SF"), ParameterType::String),
            Some(ParameterValue::String("SF".into()))
        );
        assert_eq!(coerce(&json!(3), ParameterType::String), None);
        assert_eq!(coerce(&json!(["a"]), ParameterType::Select), None);
    }

    #[test]
    fn test_transform_fills_defaults_in_order() {
        let parameters = vec![
            ParameterSpec::new("name", ParameterType::String),
            ParameterSpec::new("count", ParameterType::Number),
            ParameterSpec::new("flag", ParameterType::Bool),
            ParameterSpec::new("choice", ParameterType::Select).with_options(["a"]),
        ];
        let obj = object(json!({"count": "abc", "flag": "True", "extra": 1}));

        let out = transform_result(&obj, &parameters);
        let names: Vec<&str> = out.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["name", "count", "flag", "choice"]);
        assert_eq!(out["name"], ParameterValue::String(String::new()));
        assert_eq!(out["count"], ParameterValue::Int(0));
        assert_eq!(out["flag"], ParameterValue::Bool(true));
        assert_eq!(out["choice"], ParameterValue::String(String::new()));
    }

    #[test]
    fn test_default_object() {
        let parameters = vec![
            ParameterSpec::new("n", ParameterType::Number),
            ParameterSpec::new("b", ParameterType::Bool),
            ParameterSpec::new("s", ParameterType::String),
        ];
        assert_eq!(
            Value::Object(default_object(&parameters)),
            json!({"n": 0, "b": false, "s": ""})
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::Map;

    fn raw_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            (-1.0e9f64..1.0e9).prop_map(Value::from),
            "[a-zA-Z0-9.]{0,8}".prop_map(Value::from),
            Just(Value::Null),
        ]
    }

    fn parameter_type() -> impl Strategy<Value = ParameterType> {
        prop_oneof![
            Just(ParameterType::String),
            Just(ParameterType::Number),
            Just(ParameterType::Bool),
            Just(ParameterType::Select),
        ]
    }

    proptest! {
        /// Property: one output per parameter, typed, and transforming again changes nothing
        #[test]
        fn test_transform_is_total_and_idempotent(
            fields in proptest::collection::vec((parameter_type(), raw_value()), 0..8),
        ) {
            let parameters: Vec<ParameterSpec> = fields
                .iter()
                .enumerate()
                .map(|(i, (t, _))| ParameterSpec::new(format!("p{}", i), *t))
                .collect();
            let object: Map<String, Value> = parameters
                .iter()
                .zip(&fields)
                .map(|(p, (_, raw))| (p.name.clone(), raw.clone()))
                .collect();

            let once = transform_result(&object, &parameters);
            prop_assert_eq!(once.len(), parameters.len());
            for parameter in &parameters {
                prop_assert!(once[&parameter.name].matches(parameter.parameter_type));
            }

            let typed: Map<String, Value> = once
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect();
            let twice = transform_result(&typed, &parameters);
            prop_assert_eq!(once, twice);
        }
    }
}
