//! Field lookup for path rendering.
//!
//! The surrounding resource layer holds the currently configured field values
//! as dynamic JSON values. Rendering only ever needs to ask "is there a value
//! for this name, and is it a string?" — that capability is [`FieldReader`],
//! and the string check lives in [`expect_string`] so the type mismatch is
//! reported with the field name rather than surfacing as a bad cast deep in
//! the caller.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::FieldError;

/// The common concrete carrier of configured field values.
pub type FieldMap = HashMap<String, Value>;

/// Read-only access to configured field values, keyed by field name.
pub trait FieldReader {
    /// Look up the value configured for `name`, if any.
    fn get(&self, name: &str) -> Option<&Value>;
}

impl FieldReader for FieldMap {
    fn get(&self, name: &str) -> Option<&Value> {
        HashMap::get(self, name)
    }
}

impl<T: FieldReader + ?Sized> FieldReader for &T {
    fn get(&self, name: &str) -> Option<&Value> {
        (**self).get(name)
    }
}

/// Validate that a field value is a string, for use as a path parameter.
///
/// # Errors
///
/// Returns [`FieldError::NotAString`] naming the field and the actual JSON
/// type when the value is anything other than a string.
pub fn expect_string<'v>(name: &str, value: &'v Value) -> Result<&'v str, FieldError> {
    value.as_str().ok_or_else(|| FieldError::NotAString {
        field: name.to_owned(),
        actual: json_type_name(value),
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
