//! JSON encoding and decoding of attribute bags.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::model::AttributeBag;

/// Error returned when a payload cannot be encoded or decoded.
#[derive(Debug, Error)]
pub enum MalformedPayloadError {
    /// The text is not valid JSON, or a value could not be encoded.
    #[error("Malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The text is valid JSON but not an object where one is required.
    #[error("Expected a JSON object but found {found}")]
    NotAnObject {
        /// The JSON type that was found instead.
        found: &'static str,
    },
}

/// Converts attribute bags to and from JSON text.
///
/// # Example
///
/// ```rust
/// use billing_api::JsonCodec;
///
/// let text = r#"{"id":"P-1","name":"Basic","custom_field":[1,2]}"#;
/// let bag = JsonCodec::from_json(text).unwrap();
/// assert_eq!(bag.get_str("id"), Some("P-1"));
/// assert_eq!(JsonCodec::to_json(&bag).unwrap(), text);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Decodes a JSON object into a bag, keeping key order and unknown keys.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedPayloadError::Json`] if `text` is not valid JSON and
    /// [`MalformedPayloadError::NotAnObject`] if the top-level value is not
    /// an object.
    pub fn from_json(text: &str) -> Result<AttributeBag, MalformedPayloadError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Converts an already-parsed JSON value into a bag.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedPayloadError::NotAnObject`] if `value` is not an object.
    pub fn from_value(value: Value) -> Result<AttributeBag, MalformedPayloadError> {
        match value {
            Value::Object(map) => Ok(AttributeBag::from(map)),
            other => Err(MalformedPayloadError::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }

    /// Encodes a bag as compact JSON text. Unset fields are absent.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedPayloadError::Json`] if encoding fails.
    pub fn to_json(bag: &AttributeBag) -> Result<String, MalformedPayloadError> {
        Self::encode(bag)
    }

    /// Encodes a bag as indented JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedPayloadError::Json`] if encoding fails.
    pub fn to_json_pretty(bag: &AttributeBag) -> Result<String, MalformedPayloadError> {
        Ok(serde_json::to_string_pretty(bag)?)
    }

    /// Encodes any serializable payload (such as a patch document) as JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedPayloadError::Json`] if encoding fails.
    pub fn encode<T: Serialize + ?Sized>(payload: &T) -> Result<String, MalformedPayloadError> {
        Ok(serde_json::to_string(payload)?)
    }
}

pub(crate) const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_rejects_invalid_text() {
        let result = JsonCodec::from_json("{not json");
        assert!(matches!(result, Err(MalformedPayloadError::Json(_))));

        let result = JsonCodec::from_json("");
        assert!(matches!(result, Err(MalformedPayloadError::Json(_))));
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        let result = JsonCodec::from_json("[1, 2]");
        assert!(matches!(
            result,
            Err(MalformedPayloadError::NotAnObject { found: "an array" })
        ));

        let result = JsonCodec::from_json("\"text\"");
        assert!(matches!(
            result,
            Err(MalformedPayloadError::NotAnObject { found: "a string" })
        ));
    }

    #[test]
    fn test_from_json_preserves_input_key_order() {
        let bag = JsonCodec::from_json(r#"{"z":1,"a":2,"m":{"y":1,"b":2}}"#).unwrap();
        let keys: Vec<&str> = bag.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);

        let nested = bag.get_bag("m").unwrap();
        let nested_keys: Vec<&str> = nested.keys().collect();
        assert_eq!(nested_keys, vec!["y", "b"]);
    }

    #[test]
    fn test_round_trip_keeps_unknown_fields_verbatim() {
        let text = r#"{"id":"P-5ML4271244454362WXNWU5NQ","product_id":"PROD-XXCD1234QWER65782","name":"Video Streaming Service Plan","status":"ACTIVE","usage_type":"LICENSED","links":[{"href":"https://api-m.sandbox.paypal.com/v1/billing/plans/P-5ML4271244454362WXNWU5NQ","rel":"self","method":"GET"}],"taxes":{"percentage":"10","inclusive":false},"quantity_supported":null}"#;
        let bag = JsonCodec::from_json(text).unwrap();
        assert_eq!(JsonCodec::to_json(&bag).unwrap(), text);
    }

    #[test]
    fn test_round_trip_keeps_numbers_exact() {
        let text = r#"{"id":"P-1","sequence":123456789012345678901234567890,"rate":0.1000000000000000055511151231257827,"fee":-18446744073709551617}"#;
        let bag = JsonCodec::from_json(text).unwrap();
        assert_eq!(JsonCodec::to_json(&bag).unwrap(), text);
        assert!(bag.get_u64("sequence").is_none());
    }

    #[test]
    fn test_pretty_output_parses_back() {
        let bag = JsonCodec::from_json(r#"{"a":1,"b":[true,null]}"#).unwrap();
        let pretty = JsonCodec::to_json_pretty(&bag).unwrap();
        assert!(pretty.contains('\n'));
        assert_eq!(JsonCodec::from_json(&pretty).unwrap(), bag);
    }

    #[test]
    fn test_encode_arbitrary_payload() {
        let text = JsonCodec::encode(&vec![1, 2, 3]).unwrap();
        assert_eq!(text, "[1,2,3]");
    }
}
