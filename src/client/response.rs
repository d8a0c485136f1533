use serde_json::{json, Value};

use super::transport::HttpResponse;

/// A response body decoded according to its content type.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// JSON when the server says so and the text parses; raw text otherwise.
    pub fn decode(resp: &HttpResponse) -> Self {
        if resp.is_json() {
            if let Ok(value) = serde_json::from_str::<Value>(&resp.body) {
                return ResponseBody::Json(value);
            }
        }
        ResponseBody::Text(resp.body.clone())
    }

    /// Success payload: JSON as-is, text wrapped as `{"message": text}`.
    pub fn into_payload(self) -> Value {
        match self {
            ResponseBody::Json(value) => value,
            ResponseBody::Text(text) => json!({ "message": text }),
        }
    }
}

/// Pull a human-readable message out of a failed response.
///
/// Order: list-shaped `detail` (validation errors), `detail`, `message`, `error`,
/// the serialized body, and finally `HTTP <status>`.
pub fn error_message(status: u16, body: &ResponseBody) -> String {
    let fallback = || format!("HTTP {}", status);

    let value = match body {
        ResponseBody::Text(text) if text.trim().is_empty() => return fallback(),
        ResponseBody::Text(text) => return text.clone(),
        ResponseBody::Json(value) => value,
    };

    match value {
        Value::Null => return fallback(),
        Value::String(s) if s.is_empty() => return fallback(),
        Value::String(s) => return s.clone(),
        Value::Object(map) if map.is_empty() => return fallback(),
        _ => {}
    }

    if let Some(Value::Array(items)) = value.get("detail") {
        return validation_errors(items);
    }

    for key in ["detail", "message", "error"] {
        if let Some(Value::String(s)) = value.get(key) {
            if !s.is_empty() {
                return s.clone();
            }
        }
    }

    value.to_string()
}

/// Render `[{loc: ["body", "email"], msg: "..."}]` as `body.email: ...`, comma separated.
fn validation_errors(items: &[Value]) -> String {
    items
        .iter()
        .map(|item| {
            let loc = item
                .get("loc")
                .and_then(Value::as_array)
                .map(|parts| {
                    parts
                        .iter()
                        .map(|p| match p {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .collect::<Vec<_>>()
                        .join(".")
                })
                .unwrap_or_default();
            let msg = item
                .get("msg")
                .and_then(Value::as_str)
                .unwrap_or_default();
            format!("{}: {}", loc, msg)
        })
        .collect::<Vec<_>>()
        .join(", ")
}
