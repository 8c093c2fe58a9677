//! Dynamic value shapes from the pricing service
//!
//! The remote `dynamic_fields` map carries loosely typed values: a scalar,
//! an object holding an exchange `rate`, an object holding an `amount`, or a
//! reference object holding an `id` (possibly with a nested `value`). This
//! module replaces ad hoc nested-property probing with one tagged union and
//! one canonical extraction function.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical form of a remotely supplied field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DynamicValue {
    /// Plain scalar (number, string, bool)
    Scalar { raw: String },
    /// Object carrying an exchange rate, e.g. `{"rate": 12500}`
    Rate { rate: f64 },
    /// Object carrying a monetary amount, e.g. `{"amount": "250.00"}`
    Amount { amount: String },
    /// Reference object carrying an id, e.g. `{"id": 7, "name": "USD"}`
    Reference { id: String },
}

impl DynamicValue {
    /// Classify a raw JSON value from the remote response.
    ///
    /// Extraction precedence: `.rate`, else `.value` (recursing once), else
    /// `.amount`, else `.id`, else stringify the whole value. Returns `None`
    /// for JSON `null`.
    pub fn from_json(value: &Value) -> Option<Self> {
        Self::from_json_depth(value, 0)
    }

    fn from_json_depth(value: &Value, depth: u8) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Object(map) => {
                if let Some(rate) = map.get("rate").and_then(Value::as_f64) {
                    return Some(Self::Rate { rate });
                }
                if depth == 0 {
                    if let Some(inner) = map.get("value") {
                        if let Some(v) = Self::from_json_depth(inner, 1) {
                            return Some(v);
                        }
                    }
                }
                if let Some(amount) = map.get("amount") {
                    return Some(Self::Amount {
                        amount: stringify(amount),
                    });
                }
                if let Some(id) = map.get("id") {
                    return Some(Self::Reference { id: stringify(id) });
                }
                tracing::debug!(%value, "opaque dynamic value, storing raw JSON");
                Some(Self::Scalar {
                    raw: value.to_string(),
                })
            }
            other => Some(Self::Scalar {
                raw: stringify(other),
            }),
        }
    }

    /// The string form written into a line item's field map
    pub fn into_field_value(self) -> String {
        match self {
            Self::Scalar { raw } => raw,
            Self::Rate { rate } => format_rate(rate),
            Self::Amount { amount } => amount,
            Self::Reference { id } => id,
        }
    }

    /// Extract straight to a field string, the common path
    pub fn extract(value: &Value) -> Option<String> {
        Self::from_json(value).map(Self::into_field_value)
    }
}

/// Stringify a scalar without JSON quoting artifacts
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Rates are written without a forced decimal point when integral
fn format_rate(rate: f64) -> String {
    if rate.fract() == 0.0 {
        format!("{}", rate as i64)
    } else {
        format!("{}", rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_passthrough() {
        assert_eq!(DynamicValue::extract(&json!(42)), Some("42".to_string()));
        assert_eq!(
            DynamicValue::extract(&json!("12500.5")),
            Some("12500.5".to_string())
        );
        assert_eq!(DynamicValue::extract(&json!(null)), None);
    }

    #[test]
    fn test_rate_preferred_over_everything() {
        let v = json!({"rate": 12500.0, "id": 3, "amount": "9"});
        assert_eq!(
            DynamicValue::from_json(&v),
            Some(DynamicValue::Rate { rate: 12500.0 })
        );
        assert_eq!(DynamicValue::extract(&v), Some("12500".to_string()));
    }

    #[test]
    fn test_nested_value_recurses_once() {
        let v = json!({"value": {"rate": 11.5}});
        assert_eq!(DynamicValue::extract(&v), Some("11.5".to_string()));

        let v = json!({"value": {"id": 7}});
        assert_eq!(DynamicValue::extract(&v), Some("7".to_string()));

        // A second level of nesting is not chased; the inner object falls
        // through to its own amount/id probing, here none, so it stringifies.
        let v = json!({"value": {"value": {"rate": 1.0}}});
        let extracted = DynamicValue::extract(&v).unwrap();
        assert!(extracted.contains("rate"));
    }

    #[test]
    fn test_amount_before_id() {
        let v = json!({"amount": "150.00", "id": 9});
        assert_eq!(DynamicValue::extract(&v), Some("150.00".to_string()));
    }

    #[test]
    fn test_reference_id() {
        let v = json!({"id": 12, "name": "USD"});
        assert_eq!(
            DynamicValue::from_json(&v),
            Some(DynamicValue::Reference {
                id: "12".to_string()
            })
        );
    }

    #[test]
    fn test_opaque_object_stringified() {
        let v = json!({"name": "roll-a"});
        match DynamicValue::from_json(&v) {
            Some(DynamicValue::Scalar { raw }) => assert!(raw.contains("roll-a")),
            other => panic!("expected scalar, got {:?}", other),
        }
    }
}
