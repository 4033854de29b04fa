//! Test builders: ergonomic constructors for form payloads and requests.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use axum::body::Body;
use axum::http::{header, Method, Request};
use docket_core::FormData;
use serde_json::{json, Map, Value};

// ---------------------------------------------------------------------------
// FormBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for `formData` objects.
///
/// ```rust
/// let form = FormBuilder::new()
///     .field("caseNumber", "SC0002")
///     .accused("John Doe")
///     .build();
/// ```
#[derive(Default)]
pub struct FormBuilder {
    fields: Map<String, Value>,
}

impl FormBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn accused(self, name: &str) -> Self {
        self.push("accused", json!({ "name": name }))
    }

    pub fn defendant(self, name: &str) -> Self {
        self.push("defendants", json!({ "name": name }))
    }

    pub fn point(self, text: &str) -> Self {
        self.push("petitionPoints", json!(text))
    }

    fn push(mut self, key: &str, item: Value) -> Self {
        let slot = self
            .fields
            .entry(key.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        slot.as_array_mut()
            .unwrap_or_else(|| panic!("{key} is not an array"))
            .push(item);
        self
    }

    pub fn json(self) -> Value {
        Value::Object(self.fields)
    }

    pub fn build(self) -> FormData {
        FormData::from_json(&self.json())
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

/// `POST /api/templates/render` with the given body fields.
pub fn render_request(template_id: Value, form: Value, format: Option<&str>) -> Request<Body> {
    let mut body = json!({ "templateId": template_id, "formData": form });
    if let Some(format) = format {
        body["format"] = json!(format);
    }
    post_json("/api/templates/render", &body)
}

/// `GET /api/templates/render/{id}` with `formData` percent-encoded into the
/// query string.
pub fn preview_request(id: &str, form: Option<&str>) -> Request<Body> {
    match form {
        Some(raw) => get(&format!(
            "/api/templates/render/{id}?formData={}",
            percent_encode(raw)
        )),
        None => get(&format!("/api/templates/render/{id}")),
    }
}

fn percent_encode(s: &str) -> String {
    s.bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}
