use std::ffi::CString;

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::B3_OK;

const RESERVED_FIELDS: &[&str] = &["ok", "code", "msg"];

/// JSON object handed to C callers as an owned, NUL-terminated string.
pub struct Envelope {
    map: Map<String, Value>,
}

impl Envelope {
    pub fn ok() -> Self {
        let mut map = Map::new();
        map.insert("ok".into(), json!(true));
        map.insert("code".into(), json!(B3_OK));
        map.insert("msg".into(), json!("OK"));
        Self { map }
    }

    /// Add a payload field. Reserved envelope keys are refused.
    pub fn with_field<T: Serialize>(mut self, key: &str, value: T) -> Self {
        assert!(
            !RESERVED_FIELDS.contains(&key),
            "field '{key}' is reserved by the FFI envelope"
        );
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.map.insert(key.to_owned(), value);
        self
    }

    pub fn into_string(self) -> String {
        Value::Object(self.map).to_string()
    }

    /// JSON escapes control characters, so the rendering never holds a NUL.
    pub fn into_cstring(self) -> CString {
        CString::new(self.into_string()).unwrap_or_default()
    }
}
