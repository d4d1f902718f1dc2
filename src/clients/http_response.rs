//! HTTP response type for the billing API client.

use std::collections::HashMap;

use serde_json::Value;

/// Name of the response header carrying the server's correlation ID.
pub const DEBUG_ID_HEADER: &str = "paypal-debug-id";

/// An HTTP response from the billing API.
///
/// Header names are stored lowercased. The body is the raw response text;
/// it is empty for `204 No Content`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new response, lowercasing header names.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: impl Into<String>) -> Self {
        let mut normalized: HashMap<String, Vec<String>> = HashMap::new();
        for (name, values) in headers {
            normalized
                .entry(name.to_lowercase())
                .or_default()
                .extend(values);
        }
        Self {
            code,
            headers: normalized,
            body: body.into(),
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `PayPal-Debug-Id` header value, if present.
    ///
    /// This ID should be included in error reports to the API provider.
    #[must_use]
    pub fn debug_id(&self) -> Option<&str> {
        self.header(DEBUG_ID_HEADER)
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the body is not valid JSON.
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Returns the body as an error payload.
    ///
    /// Parsed JSON when possible, the raw text as a JSON string otherwise,
    /// and `null` for an empty body.
    #[must_use]
    pub fn error_body(&self) -> Value {
        if self.body.trim().is_empty() {
            return Value::Null;
        }
        self.json()
            .unwrap_or_else(|_| Value::String(self.body.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), vec![(*v).to_string()]))
            .collect()
    }

    #[test]
    fn test_is_ok_covers_2xx() {
        for code in [200, 201, 204, 299] {
            assert!(HttpResponse::new(code, HashMap::new(), "").is_ok());
        }
        for code in [199, 301, 404, 500] {
            assert!(!HttpResponse::new(code, HashMap::new(), "").is_ok());
        }
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let response = HttpResponse::new(
            200,
            headers(&[("PayPal-Debug-Id", "b1f2c3"), ("Content-Type", "application/json")]),
            "{}",
        );
        assert_eq!(response.debug_id(), Some("b1f2c3"));
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("CONTENT-TYPE"), Some("application/json"));
    }

    #[test]
    fn test_error_body_variants() {
        let parsed = HttpResponse::new(404, HashMap::new(), r#"{"name":"RESOURCE_NOT_FOUND"}"#);
        assert_eq!(parsed.error_body(), json!({"name": "RESOURCE_NOT_FOUND"}));

        let raw = HttpResponse::new(502, HashMap::new(), "Bad Gateway");
        assert_eq!(raw.error_body(), json!("Bad Gateway"));

        let empty = HttpResponse::new(500, HashMap::new(), "");
        assert_eq!(empty.error_body(), Value::Null);
    }

    #[test]
    fn test_json_parses_body() {
        let response = HttpResponse::new(200, HashMap::new(), r#"{"id":"P-1"}"#);
        assert_eq!(response.json().unwrap()["id"], "P-1");
        assert!(HttpResponse::new(204, HashMap::new(), "").json().is_err());
    }
}
