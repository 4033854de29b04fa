//! Domain-specific assertion macros for docket harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages naming the
//! variable or response field that was wrong.

// ---------------------------------------------------------------------------
// Variable assertions
// ---------------------------------------------------------------------------

/// Assert that normalized variables carry `key` with the expected JSON value.
///
/// ```rust
/// assert_variable!(vars, "caseNumber", "S.C.No. 2 of 2025");
/// ```
#[macro_export]
macro_rules! assert_variable {
    ($vars:expr, $key:expr, $($value:tt)+) => {{
        let json = docket_core::TemplateVariables::to_json(&$vars);
        let key: &str = $key;
        let expected = serde_json::json!($($value)+);
        match json.get(key) {
            Some(actual) => pretty_assertions::assert_eq!(
                actual, &expected,
                "assert_variable! failed for {:?}", key
            ),
            None => panic!(
                "assert_variable! failed: {:?} missing.\n  Available: {:?}",
                key,
                json.as_object().map(|m| m.keys().collect::<Vec<_>>())
            ),
        }
    }};
}

/// Assert that every listed key is present in the normalized variables.
#[macro_export]
macro_rules! assert_variables_present {
    ($vars:expr, $keys:expr) => {{
        let json = docket_core::TemplateVariables::to_json(&$vars);
        let missing: Vec<&str> = $keys
            .iter()
            .copied()
            .filter(|k: &&str| json.get(*k).is_none())
            .collect();
        assert!(
            missing.is_empty(),
            "assert_variables_present! failed: missing {:?}",
            missing
        );
    }};
}

// ---------------------------------------------------------------------------
// Response assertions
// ---------------------------------------------------------------------------

/// Assert a JSON error body: `{"success": false, "error": <message>}`.
#[macro_export]
macro_rules! assert_api_error {
    ($body:expr, $message:expr) => {{
        let body: &serde_json::Value = &$body;
        pretty_assertions::assert_eq!(body["success"], serde_json::json!(false), "body: {}", body);
        pretty_assertions::assert_eq!(body["error"], serde_json::json!($message), "body: {}", body);
    }};
}

/// Assert a response's `Content-Type` header starts with `expected`.
#[macro_export]
macro_rules! assert_content_type {
    ($response:expr, $expected:expr) => {{
        let actual = $response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("<none>");
        assert!(
            actual.starts_with($expected),
            "assert_content_type! failed:\n  expected: {}\n  actual:   {}",
            $expected,
            actual
        );
    }};
}
