//! Assertion helpers
//!
//! Every failure response has the same JSON shape, so most negative tests
//! reduce to one status and one message check.

use axum::http::StatusCode;
use axum_test::TestResponse;
use serde_json::Value;

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}

/// Assert a `{success: false, message}` body with the given status
///
/// Returns the body for further checks.
pub fn assert_error(response: &TestResponse, status: StatusCode, message: &str) -> Value {
    assert_eq!(
        response.status_code(),
        status,
        "unexpected status, body: {}",
        response.text()
    );
    let body: Value = response.json();
    assert_eq!(body["success"], false, "body: {body}");
    assert_eq!(body["message"], message, "body: {body}");
    body
}

/// Assert that no value anywhere in `body` carries a password field
pub fn assert_no_password(body: &Value) {
    match body {
        Value::Object(map) => {
            for (key, value) in map {
                assert!(
                    !key.to_ascii_lowercase().contains("password"),
                    "response exposes {key}: {body}"
                );
                assert_no_password(value);
            }
        }
        Value::Array(items) => items.iter().for_each(assert_no_password),
        _ => {}
    }
}
